use crate::core::notification::Notification;
use crate::core::resource::Resource;
use crate::domain::model::Id;
use crate::domain::ports::RecordApi;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store assigned this identifier; the list has been reloaded.
    Created(Id),
    /// A required field was empty. No request was issued.
    Rejected,
    /// Another create request was still outstanding. No request was issued.
    Ignored,
    /// The store rejected the request; the form keeps the operator's input.
    Failed(String),
}

/// Clears the in-flight flag when a submission resolves or its future is
/// dropped before resolving.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct ViewState<R: Resource> {
    phase: LoadPhase,
    records: Vec<R::Record>,
    form: R::Form,
    form_open: bool,
    notifications: Vec<Notification>,
}

/// Load, render, create, reload. One instance per open view; nothing in it
/// is shared with other views.
pub struct ListView<R: Resource> {
    api: Arc<dyn RecordApi>,
    state: Mutex<ViewState<R>>,
    creating: AtomicBool,
}

impl<R: Resource> ListView<R> {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self {
            api,
            state: Mutex::new(ViewState {
                phase: LoadPhase::Idle,
                records: Vec::new(),
                form: R::Form::default(),
                form_open: false,
                notifications: Vec::new(),
            }),
            creating: AtomicBool::new(false),
        }
    }

    pub async fn activate(&self) -> LoadPhase {
        self.reload().await
    }

    /// Replace the collection with the store's current list. A failed load
    /// keeps whatever was displayed before.
    pub async fn reload(&self) -> LoadPhase {
        self.state.lock().await.phase = LoadPhase::Loading;
        tracing::debug!("Loading {}", R::PLURAL);

        let result = R::list(self.api.as_ref()).await;

        let mut state = self.state.lock().await;
        let phase = match result {
            Ok(records) => {
                tracing::debug!("Loaded {} {}", records.len(), R::PLURAL);
                state.records = records;
                LoadPhase::Loaded
            }
            Err(e) => {
                let status = e.status_text();
                tracing::warn!("Failed to load {}: {}", R::PLURAL, status);
                state.notifications.push(Notification::error(format!(
                    "Failed to load {}. Please check if the API is running. ({})",
                    R::PLURAL,
                    status
                )));
                LoadPhase::Failed(status)
            }
        };
        state.phase = phase.clone();
        phase
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.creating.swap(true, Ordering::AcqRel) {
            tracing::debug!("Ignoring {} submission while one is in flight", R::PLURAL);
            return SubmitOutcome::Ignored;
        }
        let _in_flight = InFlight(&self.creating);

        let draft = R::prepare(&self.state.lock().await.form);
        let Some(draft) = draft else {
            return SubmitOutcome::Rejected;
        };

        tracing::info!("Creating {} entry: {:?}", R::PLURAL, draft);
        match R::create(self.api.as_ref(), &draft).await {
            Ok(id) => {
                {
                    let mut state = self.state.lock().await;
                    state.form = R::Form::default();
                    state.form_open = false;
                }
                self.reload().await;
                self.push(Notification::success(R::CREATED_MESSAGE)).await;
                SubmitOutcome::Created(id)
            }
            Err(e) => {
                let status = e.status_text();
                tracing::warn!("Failed to create {} entry: {}", R::PLURAL, status);
                self.push(Notification::error(format!(
                    "{} ({})",
                    R::CREATE_FAILED_MESSAGE,
                    status
                )))
                .await;
                SubmitOutcome::Failed(status)
            }
        }
    }

    pub async fn records(&self) -> Vec<R::Record> {
        self.state.lock().await.records.clone()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.lock().await.phase.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.phase().await == LoadPhase::Loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating.load(Ordering::Acquire)
    }

    pub async fn form(&self) -> R::Form {
        self.state.lock().await.form.clone()
    }

    pub async fn set_form(&self, form: R::Form) {
        self.state.lock().await.form = form;
    }

    pub async fn update_form(&self, edit: impl FnOnce(&mut R::Form)) {
        edit(&mut self.state.lock().await.form);
    }

    /// Show or hide the create form; returns whether it is now shown.
    pub async fn toggle_form(&self) -> bool {
        let mut state = self.state.lock().await;
        state.form_open = !state.form_open;
        state.form_open
    }

    pub async fn is_form_open(&self) -> bool {
        self.state.lock().await.form_open
    }

    pub async fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.state.lock().await.notifications)
    }

    async fn push(&self, notification: Notification) {
        self.state.lock().await.notifications.push(notification);
    }
}
