//! The naming swap sequencer.
//!
//! The engine forbids two containers from sharing a name, so the logical
//! name must be vacated before the replacement can claim it. The sequencer
//! owns that handoff: it creates the replacement under a timestamped
//! temporary name, parks the old container under a name stamped one second
//! earlier, renames the replacement into place, and finally swaps the
//! running state. The old container is renamed rather than deleted so it
//! remains inspectable and manually restartable after a failure.
//!
//! There is no internal compensation: a failed transition surfaces
//! immediately as a [`SwapError`] recording which step failed and what
//! partial state was left behind. [`NameSwapSequencer::recover`] is the
//! explicit, operator-invoked undo for that partial state; the recreation
//! path never calls it.

use crate::recreate::{ContainerRuntime, ContainerSnapshot, RecreateError, RecreationPlan, Result};
use chrono::Utc;
use std::fmt;
use tracing::{debug, info, warn};

/// Grace period, in seconds, granted to the old container when stopping it.
pub const STOP_GRACE_PERIOD_SECS: i64 = 10;

/// The transition that was executing when a swap failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    /// Creating the replacement under its temporary name. The only phase
    /// with a clean abort: the old container is untouched and operable.
    Create,
    /// Renaming the old container away from the logical name. On failure an
    /// orphaned replacement is left under its temporary name.
    RenameOld,
    /// Renaming the replacement onto the logical name. On failure no
    /// container holds the logical name at all.
    RenameNew,
    /// Stopping the old container.
    StopOld,
    /// Starting the replacement.
    StartNew,
}

impl fmt::Display for SwapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            SwapPhase::Create => "creating the replacement container",
            SwapPhase::RenameOld => "renaming the old container away",
            SwapPhase::RenameNew => "renaming the replacement into place",
            SwapPhase::StopOld => "stopping the old container",
            SwapPhase::StartNew => "starting the replacement container",
        };
        f.write_str(phase)
    }
}

/// A swap failure, together with the partial state it left behind.
///
/// `new_container_id` is set once the replacement was created;
/// `old_renamed` is set once the old container no longer holds the logical
/// name. Both feed [`NameSwapSequencer::recover`].
#[derive(Debug, thiserror::Error)]
#[error("recreation failed while {phase}: {source}")]
pub struct SwapError {
    /// The transition that failed
    pub phase: SwapPhase,
    /// Id of the replacement container, if one was created
    pub new_container_id: Option<String>,
    /// Whether the old container was renamed away from the logical name
    pub old_renamed: bool,
    /// The underlying runtime failure
    #[source]
    pub source: Box<RecreateError>,
}

impl SwapError {
    fn new(
        phase: SwapPhase,
        new_container_id: Option<String>,
        old_renamed: bool,
        source: RecreateError,
    ) -> Self {
        Self {
            phase,
            new_container_id,
            old_renamed,
            source: Box::new(source),
        }
    }
}

/// The terminal result of a successful recreation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recreation {
    /// Id of the container that was replaced
    pub previous_container_id: String,
    /// Id of the replacement container now holding the logical name
    pub new_container_id: String,
}

/// Drives the ordered name-swap handoff between old and new containers.
///
/// Enforces the invariant that at most one container holds the logical name
/// at any externally observable instant, modulo the unavoidable gap between
/// the two renames. Calls are strictly sequential with no retries.
pub struct NameSwapSequencer<'a, R: ContainerRuntime> {
    runtime: &'a R,
    stop_grace_period: i64,
}

impl<'a, R: ContainerRuntime> NameSwapSequencer<'a, R> {
    /// Create a sequencer with the default stop grace period.
    pub fn new(runtime: &'a R) -> Self {
        Self {
            runtime,
            stop_grace_period: STOP_GRACE_PERIOD_SECS,
        }
    }

    /// Create a sequencer with a custom stop grace period.
    pub fn with_grace_period(runtime: &'a R, stop_grace_period: i64) -> Self {
        Self {
            runtime,
            stop_grace_period,
        }
    }

    /// Run the swap, strictly ordered:
    ///
    /// 1. create the replacement under `{name}_{now}`;
    /// 2. rename the old container to `{name}_{now - 1}` — one second
    ///    earlier than the replacement's suffix, so the two temporary names
    ///    stay distinct even when both land within the same second;
    /// 3. rename the replacement onto the logical name;
    /// 4. only if the snapshot observed the old container running: stop it,
    ///    then start the replacement with the cloned host configuration.
    ///    A container that was not running is left created-but-not-started.
    ///
    /// A failure at any step aborts immediately; side effects of the steps
    /// already completed stay in place and are reported through the
    /// returned [`SwapError`].
    pub async fn run(
        &self,
        snapshot: &ContainerSnapshot,
        plan: &RecreationPlan,
    ) -> std::result::Result<Recreation, SwapError> {
        let now = Utc::now().timestamp();
        let temporary_name = format!("{}_{}", snapshot.name, now);
        let parking_name = format!("{}_{}", snapshot.name, now - 1);

        debug!(
            container = %snapshot.name,
            temporary_name = %temporary_name,
            "creating replacement container"
        );
        let new_id = self
            .runtime
            .create(&temporary_name, plan)
            .await
            .map_err(|e| SwapError::new(SwapPhase::Create, None, false, e))?;
        info!(new_id = %new_id, name = %temporary_name, "created replacement container");

        debug!(old_id = %snapshot.id, parking_name = %parking_name, "renaming old container away");
        self.runtime
            .rename(&snapshot.id, &parking_name)
            .await
            .map_err(|e| SwapError::new(SwapPhase::RenameOld, Some(new_id.clone()), false, e))?;

        debug!(new_id = %new_id, name = %snapshot.name, "renaming replacement into place");
        self.runtime
            .rename(&new_id, &snapshot.name)
            .await
            .map_err(|e| SwapError::new(SwapPhase::RenameNew, Some(new_id.clone()), true, e))?;

        if snapshot.running {
            info!(old_id = %snapshot.id, "stopping old container");
            self.runtime
                .stop(&snapshot.id, self.stop_grace_period)
                .await
                .map_err(|e| SwapError::new(SwapPhase::StopOld, Some(new_id.clone()), true, e))?;

            info!(new_id = %new_id, "starting replacement container");
            self.runtime
                .start(&new_id, &plan.host_config)
                .await
                .map_err(|e| SwapError::new(SwapPhase::StartNew, Some(new_id.clone()), true, e))?;
        } else {
            debug!(
                old_id = %snapshot.id,
                "old container was not running, leaving replacement stopped"
            );
        }

        Ok(Recreation {
            previous_container_id: snapshot.id.clone(),
            new_container_id: new_id,
        })
    }

    /// Undo the partial state a failed swap left behind.
    ///
    /// Force-removes the orphaned replacement (if one was created) and, if
    /// the old container had been renamed away, puts the logical name back
    /// on it. The old container is not restarted; after a failure past the
    /// stop step it is left stopped for the operator to start manually.
    ///
    /// Never invoked by the recreation path itself.
    pub async fn recover(&self, snapshot: &ContainerSnapshot, failure: &SwapError) -> Result<()> {
        if let Some(new_id) = &failure.new_container_id {
            warn!(new_id = %new_id, "removing orphaned replacement container");
            self.runtime.remove(new_id, true).await?;
        }

        if failure.old_renamed {
            warn!(
                old_id = %snapshot.id,
                name = %snapshot.name,
                "restoring logical name to old container"
            );
            self.runtime.rename(&snapshot.id, &snapshot.name).await?;
        }

        Ok(())
    }
}
