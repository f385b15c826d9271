//! Cloning a container's specification for its replacement.

use crate::recreate::{links, ContainerSnapshot, ImageReference, Result};
use bollard::models::{ContainerConfig, HostConfig};

/// The creation request for the replacement container.
///
/// A structural copy of the snapshot's configuration and host configuration
/// with three substitutions: the resolved image, rewritten links, and
/// `volumes_from` pointing at the old container so the replacement inherits
/// its volumes. The temporary name under which the container is created is
/// owned by the sequencer, which stamps it alongside the old container's
/// parking name from a single clock read.
#[derive(Debug, Clone)]
pub struct RecreationPlan {
    /// Container configuration with the image substituted
    pub config: ContainerConfig,
    /// Host configuration with links rewritten and `volumes_from` replaced
    pub host_config: HostConfig,
}

impl RecreationPlan {
    /// Clone the snapshot's specification, substituting the resolved image.
    ///
    /// The snapshot is never mutated; all substitutions happen on the copy.
    /// `volumes_from` is overwritten to contain exactly the old container's
    /// id — the replacement inherits storage only from its immediate
    /// predecessor, not transitively.
    ///
    /// # Errors
    ///
    /// Propagates a [`ParseError`] from link rewriting; there are no other
    /// failure modes.
    ///
    /// [`ParseError`]: crate::recreate::RecreateError::ParseError
    pub fn from_snapshot(snapshot: &ContainerSnapshot, image: &ImageReference) -> Result<Self> {
        let mut config = snapshot.config.clone();
        config.image = Some(image.to_string());

        let mut host_config = snapshot.host_config.clone();
        host_config.volumes_from = Some(vec![snapshot.id.clone()]);
        host_config.links = match snapshot.links() {
            Some(links) => Some(links::rewrite_links(links)?),
            None => None,
        };

        Ok(Self {
            config,
            host_config,
        })
    }
}
