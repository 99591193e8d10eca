//! The status display component.
//!
//! Mounting spawns a single task that performs one health fetch. The task
//! owns the write side of a `watch` channel holding the [`ViewState`]; every
//! reader (page handlers, tests) sees the latest state without waiting on
//! the request.
//!
//! Unmounting (or dropping) the component signals cancellation and aborts
//! the task, so a response arriving afterwards is discarded instead of
//! updating a disposed component.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::observability::{self, FetchOutcome};
use crate::{HealthClient, HealthStatus, view};

/// What the card shows. There is no partially populated state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "health", rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Loading,
    Resolved(HealthStatus),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn health(&self) -> Option<&HealthStatus> {
        match self {
            ViewState::Loading => None,
            ViewState::Resolved(h) => Some(h),
        }
    }
}

pub struct StatusDisplay {
    view: watch::Receiver<ViewState>,
    settled: watch::Receiver<bool>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl StatusDisplay {
    /// Mount the component and start its one fetch. Must be called from
    /// within a Tokio runtime.
    pub fn mount(client: Arc<dyn HealthClient>) -> Self {
        let (view_tx, view_rx) = watch::channel(ViewState::Loading);
        let (settled_tx, settled_rx) = watch::channel(false);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let task = tokio::spawn(run_fetch(client, view_tx, cancel_rx, settled_tx));

        Self {
            view: view_rx,
            settled: settled_rx,
            cancel: cancel_tx,
            task,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    pub fn render(&self) -> String {
        view::render_page(&self.view.borrow())
    }

    /// Wait until the fetch attempt has concluded, whatever the outcome.
    pub async fn settled(&self) {
        let mut rx = self.settled.clone();
        // The sender only goes away after flagging, or if the task was aborted;
        // either way there is nothing left to wait for.
        let _ = rx.wait_for(|done| *done).await;
    }

    pub fn is_settled(&self) -> bool {
        *self.settled.borrow()
    }

    /// Dispose of the component, cancelling the fetch if it is still in flight.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for StatusDisplay {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
        self.task.abort();
    }
}

async fn run_fetch(
    client: Arc<dyn HealthClient>,
    view_tx: watch::Sender<ViewState>,
    mut cancel_rx: watch::Receiver<bool>,
    settled_tx: watch::Sender<bool>,
) {
    tokio::select! {
        result = client.fetch_health() => {
            // A cancellation that raced the response still wins.
            if *cancel_rx.borrow() {
                observability::record_fetch(FetchOutcome::Cancelled);
            } else {
                match result {
                    Ok(health) => {
                        tracing::info!(
                            status = %health.status,
                            timestamp = ?health.timestamp_utc(),
                            "backend health resolved"
                        );
                        view_tx.send_replace(ViewState::Resolved(health));
                        observability::record_fetch(FetchOutcome::Resolved);
                    }
                    Err(e) => observability::report_failure(&e),
                }
            }
        }
        // The wait must not hand a `watch::Ref` to the handler; the other arm
        // borrows `cancel_rx` again.
        () = async {
            let _ = cancel_rx.wait_for(|cancelled| *cancelled).await;
        } => {
            tracing::debug!("status display unmounted before the health fetch completed");
            observability::record_fetch(FetchOutcome::Cancelled);
        }
    }
    settled_tx.send_replace(true);
}
