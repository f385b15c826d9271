//! The container runtime seam.
//!
//! The recreation sequencer drives a small, blocking-per-call slice of the
//! Docker Engine API, expressed here as the [`ContainerRuntime`] trait so
//! the sequencing logic can be exercised against an in-memory runtime in
//! tests. The production implementation is [`DockerRuntime`].
//!
//! [`DockerRuntime`]: crate::recreate::DockerRuntime

use crate::recreate::{RecreateError, RecreationPlan, Result};
use async_trait::async_trait;
use bollard::auth::DockerCredentials;
use bollard::models::{ContainerConfig, ContainerInspectResponse, HostConfig};
use serde::{Deserialize, Serialize};

/// Immutable view of an existing container, captured once at the start of a
/// recreation run via the engine's inspect call.
#[derive(Debug, Clone)]
pub struct ContainerSnapshot {
    /// Runtime-assigned container ID
    pub id: String,
    /// Logical name, with the engine's leading `/` stripped
    pub name: String,
    /// Image reference string the container was created from
    pub image: String,
    /// Full container configuration
    pub config: ContainerConfig,
    /// Full host configuration
    pub host_config: HostConfig,
    /// Whether the container was running when inspected
    pub running: bool,
}

impl ContainerSnapshot {
    /// Build a snapshot from an engine inspect response.
    ///
    /// # Errors
    ///
    /// Returns [`RecreateError::InvalidSpec`] if the response is missing an
    /// id or name.
    pub fn from_inspect(response: ContainerInspectResponse) -> Result<Self> {
        let id = response
            .id
            .ok_or_else(|| RecreateError::InvalidSpec("inspect response has no id".to_string()))?;
        let name = response
            .name
            .ok_or_else(|| RecreateError::InvalidSpec("inspect response has no name".to_string()))?;
        let name = name.strip_prefix('/').unwrap_or(&name).to_string();

        let config = response.config.unwrap_or_default();
        let image = config.image.clone().unwrap_or_default();
        let running = response
            .state
            .and_then(|state| state.running)
            .unwrap_or(false);

        Ok(Self {
            id,
            name,
            image,
            config,
            host_config: response.host_config.unwrap_or_default(),
            running,
        })
    }

    /// The container's declared links, if any.
    pub fn links(&self) -> Option<&[String]> {
        self.host_config.links.as_deref()
    }
}

/// Authentication material for one registry host, consumed verbatim by the
/// image pull call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConf {
    /// Registry host this entry applies to (e.g. `registry.example.com`)
    pub host: String,
    /// Account name
    #[serde(default)]
    pub username: Option<String>,
    /// Account password or token
    #[serde(default)]
    pub password: Option<String>,
}

impl RegistryConf {
    /// Convert to engine credentials for a pull against this registry.
    pub fn credentials(&self) -> DockerCredentials {
        DockerCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
            serveraddress: Some(self.host.clone()),
            ..Default::default()
        }
    }
}

/// The slice of the Docker Engine API the recreation path needs.
///
/// Every call blocks until the engine answers or its own timeout elapses;
/// nothing here is retried. `remove` exists solely for the explicit
/// recovery operation after a partial swap; the recreation sequence itself
/// never deletes anything.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Inspect an existing container.
    async fn inspect(&self, id: &str) -> Result<ContainerSnapshot>;

    /// Pull `repository:tag`, optionally authenticating against its registry.
    async fn pull(
        &self,
        repository: &str,
        tag: &str,
        auth: Option<DockerCredentials>,
    ) -> Result<()>;

    /// Create a container under `name` from the given plan, returning its id.
    async fn create(&self, name: &str, plan: &RecreationPlan) -> Result<String>;

    /// Rename a container.
    async fn rename(&self, id: &str, new_name: &str) -> Result<()>;

    /// Stop a container, allowing it `grace_period_secs` to exit.
    async fn stop(&self, id: &str, grace_period_secs: i64) -> Result<()>;

    /// Start a created container.
    ///
    /// `host_config` is the configuration the started container runs with.
    /// The engine applies host configuration at create time, so
    /// implementations backed by a modern engine do not resend it.
    async fn start(&self, id: &str, host_config: &HostConfig) -> Result<()>;

    /// Force-remove a container. Used only by swap recovery.
    async fn remove(&self, id: &str, force: bool) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::ContainerState;

    fn inspect_response() -> ContainerInspectResponse {
        ContainerInspectResponse {
            id: Some("abcd1234".to_string()),
            name: Some("/web".to_string()),
            config: Some(ContainerConfig {
                image: Some("myapp:v1".to_string()),
                ..Default::default()
            }),
            host_config: Some(HostConfig {
                links: Some(vec!["/db:/web/db".to_string()]),
                ..Default::default()
            }),
            state: Some(ContainerState {
                running: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_strips_name_prefix() {
        let snapshot = ContainerSnapshot::from_inspect(inspect_response()).unwrap();
        assert_eq!(snapshot.name, "web");
        assert_eq!(snapshot.id, "abcd1234");
        assert_eq!(snapshot.image, "myapp:v1");
        assert!(snapshot.running);
        assert_eq!(snapshot.links(), Some(&["/db:/web/db".to_string()][..]));
    }

    #[test]
    fn test_snapshot_missing_state_means_not_running() {
        let mut response = inspect_response();
        response.state = None;
        let snapshot = ContainerSnapshot::from_inspect(response).unwrap();
        assert!(!snapshot.running);
    }

    #[test]
    fn test_snapshot_requires_id_and_name() {
        let mut response = inspect_response();
        response.id = None;
        assert!(matches!(
            ContainerSnapshot::from_inspect(response),
            Err(RecreateError::InvalidSpec(_))
        ));

        let mut response = inspect_response();
        response.name = None;
        assert!(matches!(
            ContainerSnapshot::from_inspect(response),
            Err(RecreateError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_registry_credentials_carry_host() {
        let conf = RegistryConf {
            host: "registry.example.com".to_string(),
            username: Some("ops".to_string()),
            password: Some("secret".to_string()),
        };
        let credentials = conf.credentials();
        assert_eq!(
            credentials.serveraddress.as_deref(),
            Some("registry.example.com")
        );
        assert_eq!(credentials.username.as_deref(), Some("ops"));
    }
}
