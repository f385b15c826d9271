//! High-level recreation orchestration.
//!
//! Composes image resolution, specification cloning, and the naming swap
//! into the single `recreate` operation the CLI calls.

use crate::recreate::{
    ContainerRuntime, ImageReference, NameSwapSequencer, Recreation, RecreationPlan, RegistryConf,
    Result,
};
use bollard::auth::DockerCredentials;
use tracing::{debug, info, warn};

/// Options governing one recreation run.
#[derive(Debug, Clone, Default)]
pub struct RecreateOptions {
    /// Pull the resolved image before creating the replacement
    pub pull_image: bool,
    /// Delete the old container after a successful swap. Accepted for
    /// compatibility but not enacted; the old container is always left in
    /// place as a fallback artifact.
    pub delete_container: bool,
    /// Registry credentials, in order, matched by repository host
    pub registries: Vec<RegistryConf>,
}

/// Recreates containers against a [`ContainerRuntime`].
///
/// Holds no state across invocations; each call is one complete run of
/// inspect → resolve image → (optional pull) → clone spec → name swap.
/// Every runtime failure is immediately fatal to the whole operation; there
/// are no retries anywhere in this path.
pub struct Recreator<R: ContainerRuntime> {
    runtime: R,
    options: RecreateOptions,
}

impl<R: ContainerRuntime> Recreator<R> {
    /// Create a recreator over the given runtime.
    pub fn new(runtime: R, options: RecreateOptions) -> Self {
        Self { runtime, options }
    }

    /// Replace an existing container with one built from a possibly-updated
    /// image reference.
    ///
    /// `container_id` must resolve through the runtime's inspect call. An
    /// absent or empty `desired_tag` keeps the tag already embedded in the
    /// container's image reference.
    ///
    /// On success exactly one container holds the logical name — the newly
    /// created one — and the old container survives under a timestamped
    /// name. On failure the side effects of the steps already completed
    /// stay in place; see [`SwapError`] for what was left behind.
    ///
    /// [`SwapError`]: crate::recreate::SwapError
    pub async fn recreate(
        &self,
        container_id: &str,
        desired_tag: Option<&str>,
    ) -> Result<Recreation> {
        let snapshot = self.runtime.inspect(container_id).await?;
        let image = ImageReference::resolve(&snapshot.image, desired_tag);
        info!(container = %snapshot.name, image = %image, "recreating container");

        if self.options.pull_image {
            let auth = self.credentials_for(&image);
            info!(image = %image, authenticated = auth.is_some(), "pulling image");
            self.runtime
                .pull(&image.repository, &image.tag, auth)
                .await?;
        }

        let plan = RecreationPlan::from_snapshot(&snapshot, &image)?;

        let sequencer = NameSwapSequencer::new(&self.runtime);
        let recreation = sequencer.run(&snapshot, &plan).await?;

        if self.options.delete_container {
            warn!(
                old_id = %recreation.previous_container_id,
                "deleting the old container is not supported; it was left in place"
            );
        }

        Ok(recreation)
    }

    /// Pick credentials for the image's registry: first configured entry
    /// whose host prefixes the repository wins, otherwise the pull is
    /// anonymous.
    fn credentials_for(&self, image: &ImageReference) -> Option<DockerCredentials> {
        let host = image.registry_host()?;
        let registry = self
            .options
            .registries
            .iter()
            .find(|registry| registry.host == host)?;
        debug!(host = %registry.host, "matched registry credentials");
        Some(registry.credentials())
    }

    /// The runtime this recreator drives.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}
