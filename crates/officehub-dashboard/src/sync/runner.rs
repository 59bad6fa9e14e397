//! The engine loop: one consumer of refresh triggers, coalescing bursts.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::sync::engine::SyncEngine;
use crate::trigger::{RefreshScope, RefreshTrigger, TriggerSource};

/// Cheap, cloneable producer side of the trigger channel.
#[derive(Debug, Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<RefreshTrigger>,
}

impl SyncHandle {
    /// Create a handle and the receiver the runner consumes.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RefreshTrigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a trigger without waiting. Returns `false` once the runner
    /// has stopped.
    pub fn submit(&self, trigger: RefreshTrigger) -> bool {
        let source = trigger.source;
        match self.tx.send(trigger) {
            Ok(()) => {
                tracing::debug!(source = %source, "Refresh trigger queued");
                true
            }
            Err(_) => {
                tracing::warn!(source = %source, "Refresh loop stopped, trigger dropped");
                false
            }
        }
    }
}

/// Consumes triggers and runs at most one cycle at a time.
///
/// Triggers that arrive while a cycle runs are merged into exactly one
/// follow-up cycle.
#[derive(Debug)]
pub struct SyncRunner {
    engine: Arc<SyncEngine>,
    rx: mpsc::UnboundedReceiver<RefreshTrigger>,
    timer_skip: Duration,
    last_completed: Option<Instant>,
}

impl SyncRunner {
    /// Create a runner over `rx`. Timer triggers within `timer_skip` of the
    /// last completed all-surface cycle are dropped.
    pub fn new(
        engine: Arc<SyncEngine>,
        rx: mpsc::UnboundedReceiver<RefreshTrigger>,
        timer_skip: Duration,
    ) -> Self {
        Self {
            engine,
            rx,
            timer_skip,
            last_completed: None,
        }
    }

    /// Run until cancelled or until every [`SyncHandle`] is dropped.
    pub async fn run(mut self, mut cancel: watch::Receiver<bool>) {
        tracing::info!("Dashboard refresh loop started");

        loop {
            let trigger = tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Dashboard refresh loop received shutdown signal");
                        break;
                    }
                    continue;
                }
                next = self.rx.recv() => match next {
                    Some(trigger) => trigger,
                    None => {
                        tracing::info!("All trigger producers dropped");
                        break;
                    }
                },
            };

            let mut pending = self.admit(&trigger);
            while let Some(scope) = pending.take() {
                self.engine.run_cycle(&scope).await;
                // Only a full cycle makes a timer tick redundant.
                if scope == RefreshScope::All {
                    self.last_completed = Some(Instant::now());
                }
                pending = self.drain();
            }
        }

        tracing::info!("Dashboard refresh loop stopped");
    }

    /// Merge every queued trigger into at most one scope.
    fn drain(&mut self) -> Option<RefreshScope> {
        let mut merged: Option<RefreshScope> = None;
        let mut count = 0usize;
        while let Ok(trigger) = self.rx.try_recv() {
            count += 1;
            if let Some(scope) = self.admit(&trigger) {
                merged = Some(match merged {
                    Some(existing) => existing.merge(scope),
                    None => scope,
                });
            }
        }
        if count > 0 {
            tracing::debug!(count, coalesced = merged.is_some(), "Coalesced queued triggers");
        }
        merged
    }

    /// Scope of a trigger, or `None` if it should be dropped.
    fn admit(&self, trigger: &RefreshTrigger) -> Option<RefreshScope> {
        if trigger.source == TriggerSource::Timer
            && self
                .last_completed
                .is_some_and(|t| t.elapsed() < self.timer_skip)
        {
            tracing::debug!("Skipping timer refresh, dashboard refreshed recently");
            return None;
        }
        let scope = trigger.scope();
        (!scope.is_empty()).then_some(scope)
    }
}
