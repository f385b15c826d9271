//! # recreate
//!
//! In-place recreation of a running Docker container: given an existing
//! container, build a replacement from a possibly-updated image reference,
//! preserving the original's configuration, network links, and name
//! identity, then stop the old container and start the new one.
//!
//! ## Architecture Overview
//!
//! - **[`recreate`]**: the recreation core — image resolution, link
//!   rewriting, specification cloning, the naming swap sequencer, and the
//!   orchestrator that composes them over a [`ContainerRuntime`]
//! - **[`cli`]**: argument parsing and the on-disk registry configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recreate::{DockerRuntime, RecreateOptions, Recreator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = DockerRuntime::connect().await?;
//!     let recreator = Recreator::new(
//!         runtime,
//!         RecreateOptions {
//!             pull_image: true,
//!             ..Default::default()
//!         },
//!     );
//!
//!     let recreation = recreator.recreate("web", Some("v2")).await?;
//!     println!(
//!         "replaced {} with {}",
//!         recreation.previous_container_id, recreation.new_container_id
//!     );
//!     Ok(())
//! }
//! ```

/// The recreation core: resolver, link rewriter, cloner, sequencer,
/// orchestrator, and the container runtime seam.
pub mod recreate;

/// Command-line collaborators: argument parsing and registry configuration.
pub mod cli;

pub use recreate::{
    ContainerRuntime, ContainerSnapshot, DockerRuntime, ImageReference, NameSwapSequencer,
    RecreateError, RecreateOptions, Recreation, RecreationPlan, Recreator, RegistryConf, Result,
    SwapError, SwapPhase, STOP_GRACE_PERIOD_SECS,
};
