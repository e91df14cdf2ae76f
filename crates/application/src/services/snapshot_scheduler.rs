use crate::ports::SnapshotStore;
use crate::services::FrequencyStore;
use chrono::{DateTime, TimeZone};
use dnsprofiler_domain::{BucketKey, Classification, FrequencyLevel};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The bucket's internal artifact exists, or this process already
    /// attempted the bucket and its write failed.
    AlreadyProduced,
    /// Another caller is producing the snapshot right now.
    InProgress,
    /// The existence check itself failed; nothing was touched.
    Unavailable,
    Produced {
        bucket: BucketKey,
        failed_writes: usize,
    },
}

/// Produces the hourly "top queried names" artifacts.
///
/// There is no timer: every call re-derives the current bucket and checks
/// whether its internal artifact exists. Production is serialized within the
/// process; a caller that finds it already running returns immediately
/// instead of waiting. The internal artifact is written last so that its
/// presence means the bucket is complete.
///
/// A bucket whose internal write failed is not attempted again by this
/// process.
pub struct SnapshotScheduler {
    store: Arc<FrequencyStore>,
    artifacts: Arc<dyn SnapshotStore>,
    prefix: String,
    max_levels: usize,
    /// Last bucket this process attempted.
    production: Mutex<Option<BucketKey>>,
}

impl SnapshotScheduler {
    pub fn new(
        store: Arc<FrequencyStore>,
        artifacts: Arc<dyn SnapshotStore>,
        prefix: impl Into<String>,
        max_levels: usize,
    ) -> Self {
        Self {
            store,
            artifacts,
            prefix: prefix.into(),
            max_levels,
            production: Mutex::new(None),
        }
    }

    async fn gate_exists(&self, bucket: &BucketKey, gate: &str) -> Option<bool> {
        match self.artifacts.exists(gate).await {
            Ok(exists) => Some(exists),
            Err(e) => {
                warn!(bucket = %bucket, error = %e, "Snapshot existence check failed");
                None
            }
        }
    }

    pub async fn maybe_snapshot<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> SnapshotOutcome {
        let bucket = BucketKey::from_datetime(now);
        let gate = bucket.artifact_name(&self.prefix, Classification::Internal);

        match self.gate_exists(&bucket, &gate).await {
            Some(true) => return SnapshotOutcome::AlreadyProduced,
            Some(false) => {}
            None => return SnapshotOutcome::Unavailable,
        }

        let Ok(mut last_attempt) = self.production.try_lock() else {
            return SnapshotOutcome::InProgress;
        };
        if last_attempt.as_ref() == Some(&bucket) {
            return SnapshotOutcome::AlreadyProduced;
        }
        // A concurrent producer may have finished between the check and the lock.
        match self.gate_exists(&bucket, &gate).await {
            Some(true) => return SnapshotOutcome::AlreadyProduced,
            Some(false) => {}
            None => return SnapshotOutcome::Unavailable,
        }
        *last_attempt = Some(bucket.clone());

        // Drain under the store lock, rank and write outside it.
        let drained = self.store.take_all();

        let mut failed_writes = 0;
        for (classification, counts) in drained.into_iter().rev() {
            let levels = FrequencyLevel::rank(&counts, self.max_levels);
            let name = bucket.artifact_name(&self.prefix, classification);

            debug!(
                %classification,
                names = counts.len(),
                levels = levels.len(),
                "Writing snapshot"
            );

            if let Err(e) = self
                .artifacts
                .write(&name, &FrequencyLevel::render(&levels))
                .await
            {
                warn!(%classification, artifact = %name, error = %e, "Snapshot write failed");
                failed_writes += 1;
            }
        }

        info!(bucket = %bucket, failed_writes, "Snapshot produced");

        SnapshotOutcome::Produced {
            bucket,
            failed_writes,
        }
    }
}
