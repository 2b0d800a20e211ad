//! Label selection store
//!
//! Holds the [`LabelState`] of a label-editing screen and forwards user
//! actions to a [`LabelService`]. Every remote operation issues exactly one
//! request and applies its result to the state when the request completes.
//!
//! State lives in a `tokio::sync::watch` channel, so any number of UI layers
//! can [`subscribe`](LabelSelectionStore::subscribe) and re-render on change.
//! The store is cheap to clone; clones share the same state and lifetime.

use crate::color::Color;
use crate::error::StoreError;
use crate::models::{Item, Label};
use crate::service::LabelService;
use crate::state::label_state::LabelState;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// State holder for the label-editing screen
#[derive(Clone)]
pub struct LabelSelectionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    service: Arc<dyn LabelService>,
    state: watch::Sender<LabelState>,
    /// Requests issued and not yet released. Completions set `is_loading` to
    /// `> 0`; a failed load releases its slot but leaves the flag set.
    /// Only touched inside the sender's modify closures, which serialize access.
    in_flight: AtomicUsize,
    /// Cancelled when the screen goes away
    lifetime: CancellationToken,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

impl LabelSelectionStore {
    /// Create a store with empty state
    pub fn new(service: Arc<dyn LabelService>) -> Self {
        let (state, _) = watch::channel(LabelState::new());
        Self {
            inner: Arc::new(StoreInner {
                service,
                state,
                in_flight: AtomicUsize::new(0),
                lifetime: CancellationToken::new(),
            }),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> LabelState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<LabelState> {
        self.inner.state.subscribe()
    }

    /// Run `observer` with each new state until the store is closed
    ///
    /// The observer sees a copy of the state and is never called while the
    /// state lock is held.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime; the observer runs on a
    /// spawned task.
    pub fn on_change<F>(&self, mut observer: F) -> JoinHandle<()>
    where
        F: FnMut(&LabelState) + Send + 'static,
    {
        let mut receiver = self.subscribe();
        let lifetime = self.inner.lifetime.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = lifetime.cancelled() => break,
                    changed = receiver.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = receiver.borrow_and_update().clone();
                        observer(&state);
                    }
                }
            }
        })
    }

    /// Whether a request is outstanding
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// Whether the catalog has been loaded once
    pub fn has_loaded_initial_labels(&self) -> bool {
        self.inner.state.borrow().has_loaded_initial_labels
    }

    /// End the store's lifetime
    ///
    /// Outstanding requests are dropped and their results discarded; later
    /// remote operations fail with [`StoreError::Closed`] without reaching
    /// the service.
    pub fn close(&self) {
        if !self.inner.lifetime.is_cancelled() {
            debug!("Closing label store");
            self.inner.lifetime.cancel();
        }
    }

    /// False once [`close`](Self::close) has been called
    pub fn is_active(&self) -> bool {
        !self.inner.lifetime.is_cancelled()
    }

    /// Load the catalog once; later calls are no-ops
    ///
    /// With an `item`, its labels become the selection and the rest of the
    /// catalog the unselected list. If the request fails the loading flag is
    /// left set until another request completes.
    pub async fn load_labels(&self, item: Option<&Item>) -> Result<(), StoreError> {
        self.ensure_active()?;
        if self.has_loaded_initial_labels() {
            debug!("Labels already loaded, skipping fetch");
            return Ok(());
        }

        self.begin_request();
        match self.run(self.inner.service.fetch_labels()).await {
            Ok(labels) => {
                let count = labels.len();
                self.complete_request(|state| state.apply_catalog(labels, item));
                info!(
                    count = count,
                    item_id = item.map(|i| i.id.as_str()).unwrap_or(""),
                    "Loaded label catalog"
                );
                Ok(())
            }
            Err(e) => {
                self.release_request();
                warn!(error = %e, "Failed to load labels");
                Err(e)
            }
        }
    }

    /// Create a label and put it at the front of the catalog
    ///
    /// A color that cannot be hex-encoded is sent as an empty string.
    pub async fn create_label(
        &self,
        name: &str,
        color: Color,
        description: Option<&str>,
    ) -> Result<Label, StoreError> {
        self.ensure_active()?;
        let color_hex = color.to_hex().unwrap_or_else(|| {
            debug!(color = %color, "Color cannot be hex-encoded, sending empty color");
            String::new()
        });

        self.begin_request();
        let result = self
            .run(self.inner.service.create_label(name, &color_hex, description))
            .await;
        match result {
            Ok(label) => {
                let created = label.clone();
                self.complete_request(|state| state.insert_created(created));
                info!(label_id = %label.id, name = %label.name, "Created label");
                Ok(label)
            }
            Err(e) => {
                self.complete_request(|_| {});
                warn!(error = %e, name = %name, "Failed to create label");
                Err(e)
            }
        }
    }

    /// Delete a label from the catalog
    ///
    /// Selected and unselected lists are not touched.
    pub async fn delete_label(&self, label_id: &str) -> Result<(), StoreError> {
        self.ensure_active()?;

        self.begin_request();
        match self.run(self.inner.service.delete_label(label_id)).await {
            Ok(()) => {
                self.complete_request(|state| state.remove_from_catalog(label_id));
                info!(label_id = %label_id, "Deleted label");
                Ok(())
            }
            Err(e) => {
                self.complete_request(|_| {});
                warn!(error = %e, label_id = %label_id, "Failed to delete label");
                Err(e)
            }
        }
    }

    /// Persist the current selection as the item's labels
    ///
    /// `on_complete` receives the labels the service applied; the store's
    /// own lists are left unchanged.
    pub async fn save_item_label_changes<F>(
        &self,
        item_id: &str,
        on_complete: F,
    ) -> Result<(), StoreError>
    where
        F: FnOnce(Vec<Label>) + Send,
    {
        self.ensure_active()?;
        let label_ids = self.inner.state.borrow().selected_label_ids();

        self.begin_request();
        let result = self
            .run(self.inner.service.update_item_labels(item_id, &label_ids))
            .await;
        self.complete_request(|_| {});
        match result {
            Ok(labels) => {
                info!(item_id = %item_id, count = labels.len(), "Saved item labels");
                on_complete(labels);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, item_id = %item_id, "Failed to save item labels");
                Err(e)
            }
        }
    }

    /// Assign a label to the item in context (local only)
    pub fn add_label_to_item(&self, label: Label) {
        self.inner
            .state
            .send_modify(|state| state.add_label_to_item(label));
    }

    /// Unassign a label from the item in context (local only)
    pub fn remove_label_from_item(&self, label: Label) {
        self.inner
            .state
            .send_modify(|state| state.remove_label_from_item(label));
    }

    /// Show or hide the create-label modal
    pub fn set_show_create_modal(&self, show: bool) {
        self.inner.state.send_if_modified(|state| {
            let changed = state.show_create_modal != show;
            state.show_create_modal = show;
            changed
        });
    }

    fn ensure_active(&self) -> Result<(), StoreError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(StoreError::Closed)
        }
    }

    /// Await a service call unless the store is closed first
    async fn run<T, Fut>(&self, request: Fut) -> Result<T, StoreError>
    where
        Fut: Future<Output = Result<T, crate::error::ServiceError>>,
    {
        tokio::select! {
            biased;
            _ = self.inner.lifetime.cancelled() => Err(StoreError::Closed),
            result = request => result.map_err(StoreError::from),
        }
    }

    fn begin_request(&self) {
        let inner = &self.inner;
        inner.state.send_modify(|state| {
            inner.in_flight.fetch_add(1, Ordering::SeqCst);
            state.is_loading = true;
        });
    }

    /// Release one request slot and apply its result
    ///
    /// Dropped entirely once the store is closed.
    fn complete_request(&self, apply: impl FnOnce(&mut LabelState)) {
        if !self.is_active() {
            debug!("Label store closed, discarding completion");
            return;
        }

        let inner = &self.inner;
        inner.state.send_modify(|state| {
            let remaining = inner.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            state.is_loading = remaining > 0;
            apply(state);
        });
    }

    /// Release one request slot without touching `is_loading`
    ///
    /// The flag is recomputed by the next completion.
    fn release_request(&self) {
        if !self.is_active() {
            return;
        }

        let inner = &self.inner;
        inner.state.send_if_modified(|_| {
            inner.in_flight.fetch_sub(1, Ordering::SeqCst);
            false
        });
    }
}
