use std::time::Duration;

use log::{debug, trace};

use hostsync_shared::{generate_diff, StateSyncPayload, Timer, Value, ValueError};

/// Host-side replication clock. On each tick it diffs canonical state
/// against the snapshot taken at the previous tick that changed anything.
///
/// Snapshots are only taken here, never on every mutation: mutations can
/// be far more frequent than ticks and cloning dominates the cost.
pub(crate) struct SyncScheduler {
    timer: Timer,
    previous: Value,
}

impl SyncScheduler {
    pub(crate) fn new(interval: Duration, initial_state: &Value) -> Result<Self, ValueError> {
        Ok(Self {
            timer: Timer::new(interval),
            previous: initial_state.deep_clone()?,
        })
    }

    pub(crate) fn ringing(&self) -> bool {
        self.timer.ringing()
    }

    /// Diffs `current` against the previous snapshot. Returns the payload to
    /// broadcast, or `None` when nothing changed.
    pub(crate) fn tick(&mut self, current: &Value) -> Result<Option<StateSyncPayload>, ValueError> {
        self.timer.reset();

        // a tree too deep to snapshot is also too deep to decode on the
        // other side, so refuse before anything is diffed or sent
        let snapshot = current.deep_clone()?;

        let payload = match generate_diff(&self.previous, current) {
            Some(patches) if patches.is_empty() => {
                trace!("SyncScheduler: no changes since last tick");
                return Ok(None);
            }
            Some(patches) => {
                debug!("SyncScheduler: {} patches", patches.len());
                StateSyncPayload::Patches { patches }
            }
            None => {
                debug!("SyncScheduler: root replaced, sending full state");
                StateSyncPayload::Full {
                    full_state: snapshot.clone(),
                }
            }
        };

        self.previous = snapshot;
        Ok(Some(payload))
    }
}
