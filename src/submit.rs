//! Calculator form submission.
//!
//! [`transition`] is the whole state machine: a pure function from the
//! current state and an event to the next state plus the side effects to
//! perform. [`SubmissionController`] feeds it events and carries the effects
//! out against the page.

use std::cell::RefCell;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::api::PredictApi;
use crate::cookie;
use crate::dom::{DomSurface, ElementHandle, Surface, HIDDEN_CLASS};
use crate::error::{js_error_text, SubmitError};
use crate::model::FormInput;
use crate::transfer::{SessionBackend, TransferStore};

pub const FORM_ID: &str = "carbonForm";
pub const LOADING_ID: &str = "loadingState";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitEvent {
    Submit(FormInput),
    /// The request finished; `Ok` carries a successful body that has already
    /// been handed to the transfer store.
    Completed(Result<Value, SubmitError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    Alert(String),
    LockForm,
    UnlockForm,
    ShowLoading,
    HideLoading,
    SendRequest(FormInput),
    Navigate,
}

pub fn transition(state: SubmitState, event: SubmitEvent) -> (SubmitState, Vec<SideEffect>) {
    use SideEffect::*;

    match (state, event) {
        (SubmitState::Idle | SubmitState::Failed, SubmitEvent::Submit(input)) => {
            match input.validate() {
                Ok(()) => (
                    SubmitState::Submitting,
                    vec![LockForm, ShowLoading, SendRequest(input)],
                ),
                Err(e) => (state, vec![Alert(e.to_string())]),
            }
        }
        // One request at a time; after success the page is already navigating away.
        (SubmitState::Submitting | SubmitState::Succeeded, SubmitEvent::Submit(_)) => (state, vec![]),

        (SubmitState::Submitting, SubmitEvent::Completed(Ok(_))) => {
            (SubmitState::Succeeded, vec![Navigate])
        }
        (SubmitState::Submitting, SubmitEvent::Completed(Err(e))) => (
            SubmitState::Failed,
            vec![Alert(e.to_string()), HideLoading, UnlockForm],
        ),
        (_, SubmitEvent::Completed(_)) => (state, vec![]),
    }
}

/// Page operations the controller needs.
pub trait SubmitHost {
    fn alert(&self, message: &str);
    fn set_form_locked(&self, locked: bool);
    fn set_loading(&self, visible: bool);
    fn navigate(&self, path: &str);
    /// Raw `document.cookie` text.
    fn cookies(&self) -> String;
}

pub struct SubmissionController<A, B, H> {
    api: A,
    store: TransferStore<B>,
    host: H,
    results_path: String,
    csrf_cookie: String,
    state: RefCell<SubmitState>,
}

impl<A: PredictApi, B: SessionBackend, H: SubmitHost> SubmissionController<A, B, H> {
    pub fn new(
        api: A,
        store: TransferStore<B>,
        host: H,
        results_path: impl Into<String>,
        csrf_cookie: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            host,
            results_path: results_path.into(),
            csrf_cookie: csrf_cookie.into(),
            state: RefCell::new(SubmitState::Idle),
        }
    }

    pub fn state(&self) -> SubmitState {
        *self.state.borrow()
    }

    /// Handle a form submission through to navigation or restored form.
    pub async fn submit(&self, input: FormInput) {
        let Some(input) = self.dispatch(SubmitEvent::Submit(input)) else {
            return;
        };

        let csrf = cookie::find_cookie(&self.host.cookies(), &self.csrf_cookie).unwrap_or_else(|| {
            warn!("No {} cookie; sending empty CSRF token", self.csrf_cookie);
            String::new()
        });

        let outcome = match self.api.predict(&input, &csrf).await {
            Ok(body) => self.store.write(&body).map(|_| body).map_err(SubmitError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            match e {
                SubmitError::Application(message) => warn!("Prediction rejected: {}", message),
                other => error!("Prediction request failed: {}", other.detail()),
            }
        }

        self.dispatch(SubmitEvent::Completed(outcome));
    }

    /// Advance the state machine and perform its effects. Returns the input to
    /// send if the transition asked for a request.
    fn dispatch(&self, event: SubmitEvent) -> Option<FormInput> {
        let current = self.state();
        let (next, effects) = transition(current, event);
        if current == next && effects.is_empty() {
            info!("Submission ignored while {:?}", current);
        }
        *self.state.borrow_mut() = next;

        let mut request = None;
        for effect in effects {
            match effect {
                SideEffect::Alert(message) => self.host.alert(&message),
                SideEffect::LockForm => self.host.set_form_locked(true),
                SideEffect::UnlockForm => self.host.set_form_locked(false),
                SideEffect::ShowLoading => self.host.set_loading(true),
                SideEffect::HideLoading => self.host.set_loading(false),
                SideEffect::SendRequest(input) => request = Some(input),
                SideEffect::Navigate => {
                    info!("Prediction stored; opening {}", self.results_path);
                    self.host.navigate(&self.results_path);
                }
            }
        }
        request
    }
}

/// The form and loading indicator: `#carbonForm` and `#loadingState`.
pub struct FormView<S> {
    surface: S,
}

impl<S: Surface> FormView<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn set_locked(&self, locked: bool) {
        if let Some(form) = self.surface.bind(FORM_ID).bound() {
            let (opacity, pointer_events) = if locked { ("0.5", "none") } else { ("1", "auto") };
            form.set_style("opacity", opacity);
            form.set_style("pointer-events", pointer_events);
        }
    }

    pub fn set_loading(&self, visible: bool) {
        if let Some(loading) = self.surface.bind(LOADING_ID).bound() {
            if visible {
                loading.remove_class(HIDDEN_CLASS);
            } else {
                loading.add_class(HIDDEN_CLASS);
            }
        }
    }
}

/// The calculator page in the browser.
pub struct BrowserHost {
    form: FormView<DomSurface>,
}

impl BrowserHost {
    pub fn new(surface: DomSurface) -> Self {
        Self {
            form: FormView::new(surface),
        }
    }
}

impl SubmitHost for BrowserHost {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn set_form_locked(&self, locked: bool) {
        self.form.set_locked(locked);
    }

    fn set_loading(&self, visible: bool) {
        self.form.set_loading(visible);
    }

    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                error!("Navigation to {} failed: {}", path, js_error_text(&e));
            }
        }
    }

    fn cookies(&self) -> String {
        cookie::document_cookies()
    }
}
