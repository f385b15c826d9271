//! Container recreation core.
//!
//! This module replaces an existing Docker container with a new one built
//! from a possibly-updated image reference while preserving the original's
//! configuration, network links, and name identity.
//!
//! ## Architecture
//!
//! The recreation path is composed of small, separately testable pieces:
//!
//! - [`image`]: image reference parsing and tag resolution
//! - [`links`]: rewriting declared container links so they survive renames
//! - [`plan`]: cloning a container's specification for the replacement
//! - [`sequencer`]: the ordered name-swap handoff between old and new
//! - [`orchestrator`]: the single public `recreate` operation
//! - [`runtime`]: the [`ContainerRuntime`] seam the sequencer drives
//! - [`docker`]: the bollard-backed runtime implementation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recreate::{DockerRuntime, RecreateOptions, Recreator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = DockerRuntime::connect().await?;
//!     let recreator = Recreator::new(runtime, RecreateOptions::default());
//!
//!     let recreation = recreator.recreate("web", Some("v2")).await?;
//!     println!(
//!         "replaced {} with {}",
//!         recreation.previous_container_id, recreation.new_container_id
//!     );
//!     Ok(())
//! }
//! ```

mod docker;
mod image;
mod links;
mod orchestrator;
mod plan;
mod runtime;
mod sequencer;

pub use docker::DockerRuntime;
pub use image::ImageReference;
pub use links::rewrite_links;
pub use orchestrator::{RecreateOptions, Recreator};
pub use plan::RecreationPlan;
pub use runtime::{ContainerRuntime, ContainerSnapshot, RegistryConf};
pub use sequencer::{
    NameSwapSequencer, Recreation, SwapError, SwapPhase, STOP_GRACE_PERIOD_SECS,
};

/// Recreation errors.
#[derive(Debug, thiserror::Error)]
pub enum RecreateError {
    /// A declared container link could not be parsed
    #[error("unable to parse link `{0}`")]
    ParseError(String),

    /// Container or image not found
    #[error("not found: {0}")]
    NotFound(String),

    /// A container name is already taken
    #[error("name conflict: {0}")]
    NameConflict(String),

    /// Image pull or registry authentication failure
    #[error("registry error: {0}")]
    Registry(String),

    /// The runtime rejected a container specification
    #[error("invalid container spec: {0}")]
    InvalidSpec(String),

    /// A stop or start exceeded its grace period
    #[error("timed out: {0}")]
    Timeout(String),

    /// The name swap failed partway through
    #[error(transparent)]
    Swap(#[from] SwapError),

    /// Docker Engine API error
    #[error("container API error: {0}")]
    Api(#[from] bollard::errors::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recreation operations.
pub type Result<T> = std::result::Result<T, RecreateError>;
