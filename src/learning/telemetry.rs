use std::{
    collections::HashSet,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};
use tokio::{runtime::Handle, task::JoinHandle};
use uuid::Uuid;

use crate::{
    learning::CourseApi,
    model::entity::{ContentInteractionCreate, InteractionType},
    render::InteractionSink,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedInteraction {
    pub block_id: Uuid,
    pub interaction_type: InteractionType,
    pub metadata: serde_json::Value,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps interactions locally and, for signed-in learners, sends them on
/// detached tasks. Sends are at-most-once; failures are only logged.
pub struct Telemetry {
    api: Arc<dyn CourseApi>,
    user_id: Option<Uuid>,
    recorded: Mutex<Vec<TrackedInteraction>>,
    viewed: Mutex<HashSet<Uuid>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl Telemetry {
    pub fn new(api: Arc<dyn CourseApi>, user_id: Option<Uuid>) -> Self {
        Self {
            api,
            user_id,
            recorded: Mutex::new(Vec::new()),
            viewed: Mutex::new(HashSet::new()),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn track(&self, block_id: Uuid, interaction_type: InteractionType, metadata: serde_json::Value) {
        lock(&self.recorded).push(TrackedInteraction {
            block_id,
            interaction_type,
            metadata: metadata.clone(),
        });

        let Some(user_id) = self.user_id else {
            return;
        };

        let api = self.api.clone();
        let data = ContentInteractionCreate {
            user_id,
            content_block_id: block_id,
            interaction_type,
            metadata,
        };
        self.spawn(async move {
            if let Err(e) = api.record_interaction(data).await {
                tracing::warn!("failed to record {} interaction: {}", interaction_type.as_str(), e);
            }
        });
    }

    /// Runs `task` detached. Outside a runtime the task is dropped.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match Handle::try_current() {
            Ok(handle) => {
                let mut pending = lock(&self.pending);
                pending.retain(|h| !h.is_finished());
                pending.push(handle.spawn(task));
            }
            Err(_) => tracing::warn!("no runtime available, dropping telemetry task"),
        }
    }

    /// Dispatched tasks not yet reaped. Finished ones are dropped on the
    /// next dispatch or by [`Telemetry::settle`].
    pub fn in_flight(&self) -> usize {
        lock(&self.pending).len()
    }

    pub fn recorded(&self) -> Vec<TrackedInteraction> {
        lock(&self.recorded).clone()
    }

    /// Waits for every task dispatched so far.
    pub async fn settle(&self) {
        let pending: Vec<JoinHandle<()>> = std::mem::take(&mut *lock(&self.pending));
        for handle in pending {
            if let Err(e) = handle.await {
                tracing::warn!("telemetry task failed: {}", e);
            }
        }
    }
}

impl InteractionSink for Telemetry {
    /// Views are reported once per block.
    fn record(&self, content_block_id: Uuid, kind: InteractionType, metadata: serde_json::Value) {
        if kind == InteractionType::View && !lock(&self.viewed).insert(content_block_id) {
            return;
        }
        self.track(content_block_id, kind, metadata);
    }
}
