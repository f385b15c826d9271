//! Bollard-backed [`ContainerRuntime`] implementation.
//!
//! Wraps the Docker Engine API and maps its failures onto the recreation
//! error taxonomy. Connection goes through the local defaults (Unix socket,
//! or whatever `DOCKER_HOST` points at) and is verified with a ping before
//! use.

use crate::recreate::{
    ContainerRuntime, ContainerSnapshot, RecreateError, RecreationPlan, Result,
};
use async_trait::async_trait;
use bollard::auth::DockerCredentials;
use bollard::container::{
    Config, CreateContainerOptions, RemoveContainerOptions, RenameContainerOptions,
    StopContainerOptions,
};
use bollard::image::CreateImageOptions;
use bollard::models::HostConfig;
use bollard::Docker;
use futures::stream::StreamExt;
use tracing::{debug, info};

/// Docker Engine client for the recreation path.
#[derive(Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect to the engine via local defaults and verify the connection.
    ///
    /// # Errors
    ///
    /// Returns error if no engine is reachable or the ping fails.
    pub async fn connect() -> Result<Self> {
        debug!("connecting to container runtime");
        let docker = Docker::connect_with_local_defaults()?;
        docker.ping().await?;
        debug!("container runtime ping successful");
        Ok(Self { docker })
    }

    /// Wrap an existing bollard client.
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Direct access to the underlying bollard client.
    pub fn docker(&self) -> &Docker {
        &self.docker
    }
}

/// Map an engine failure onto the recreation taxonomy.
fn classify(subject: &str, error: bollard::errors::Error) -> RecreateError {
    use bollard::errors::Error;

    match error {
        Error::DockerResponseServerError {
            status_code: 404, ..
        } => RecreateError::NotFound(subject.to_string()),
        Error::DockerResponseServerError {
            status_code: 409,
            message,
        } => RecreateError::NameConflict(message),
        Error::DockerResponseServerError {
            status_code: 400,
            message,
        } => RecreateError::InvalidSpec(message),
        Error::RequestTimeoutError => RecreateError::Timeout(subject.to_string()),
        error => RecreateError::Api(error),
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn inspect(&self, id: &str) -> Result<ContainerSnapshot> {
        let response = self
            .docker
            .inspect_container(id, None)
            .await
            .map_err(|e| classify(id, e))?;
        ContainerSnapshot::from_inspect(response)
    }

    async fn pull(
        &self,
        repository: &str,
        tag: &str,
        auth: Option<DockerCredentials>,
    ) -> Result<()> {
        let options = CreateImageOptions {
            from_image: repository,
            tag,
            ..Default::default()
        };

        let mut stream = self.docker.create_image(Some(options), None, auth);
        while let Some(progress) = stream.next().await {
            let progress =
                progress.map_err(|e| RecreateError::Registry(e.to_string()))?;
            if let Some(error) = progress.error {
                return Err(RecreateError::Registry(error));
            }
            if let Some(status) = progress.status {
                debug!(status = %status, "pull progress");
            }
        }

        info!(image = %format!("{}:{}", repository, tag), "pulled image");
        Ok(())
    }

    async fn create(&self, name: &str, plan: &RecreationPlan) -> Result<String> {
        let options = CreateContainerOptions {
            name: name.to_string(),
            ..Default::default()
        };

        let mut config = Config::from(plan.config.clone());
        config.host_config = Some(plan.host_config.clone());

        let response = self
            .docker
            .create_container(Some(options), config)
            .await
            .map_err(|e| classify(name, e))?;

        debug!(id = %response.id, name = %name, "created container");
        Ok(response.id)
    }

    async fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        self.docker
            .rename_container(id, RenameContainerOptions { name: new_name })
            .await
            .map_err(|e| classify(id, e))?;
        debug!(id = %id, name = %new_name, "renamed container");
        Ok(())
    }

    async fn stop(&self, id: &str, grace_period_secs: i64) -> Result<()> {
        self.docker
            .stop_container(
                id,
                Some(StopContainerOptions {
                    t: grace_period_secs,
                }),
            )
            .await
            .map_err(|e| classify(id, e))?;
        debug!(id = %id, "stopped container");
        Ok(())
    }

    async fn start(&self, id: &str, _host_config: &HostConfig) -> Result<()> {
        // The engine applies host configuration at create time; starting
        // only flips the container on.
        self.docker
            .start_container::<String>(id, None)
            .await
            .map_err(|e| classify(id, e))?;
        debug!(id = %id, "started container");
        Ok(())
    }

    async fn remove(&self, id: &str, force: bool) -> Result<()> {
        self.docker
            .remove_container(
                id,
                Some(RemoveContainerOptions {
                    force,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| classify(id, e))?;
        debug!(id = %id, "removed container");
        Ok(())
    }
}
