//! AssistantSession - the conversational orchestrator.
//!
//! Owns one session's message log, location state and doctor list, and
//! drives the AI responder, geolocator and doctor search around them.
//!
//! # Concurrency
//!
//! - Session state sits behind one async mutex that is released before any
//!   call to a port is awaited.
//! - Only one submission runs at a time; a second one is rejected with
//!   [`SubmitError::RequestInFlight`].
//! - Delayed doctor searches run as spawned tasks that watch a shutdown
//!   channel. [`AssistantSession::close`] (also run on drop) signals it and
//!   aborts them, so nothing touches the log after close.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use crate::domain::conversation::{replies, Message, MessageId, MessageLog, Sender};
use crate::domain::doctor::{dedupe_by_id, Doctor};
use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::handoff::{ActiveCall, Navigation, PendingSelection};
use crate::domain::location::{Coordinates, LocationState, LocationStatus};
use crate::domain::specialty::{MatchMode, Specialty, SpecialtyDetector};
use crate::ports::{
    AIError, AIRequest, AIResponder, DoctorSearch, GeolocationError, Geolocator, HandoffError,
    HandoffStore, Notice, PositionOptions, SearchQuery, SessionEvent, SessionNotifier,
};

use super::errors::SubmitError;
use super::in_flight::InFlightGuard;
use super::outcome::{SearchOutcome, TurnOutcome};

/// Collaborators of a session.
#[derive(Clone)]
pub struct AssistantDeps {
    pub ai: Arc<dyn AIResponder>,
    pub search: Arc<dyn DoctorSearch>,
    pub geolocator: Arc<dyn Geolocator>,
    pub handoff: Arc<dyn HandoffStore>,
    pub notifier: Arc<dyn SessionNotifier>,
}

/// Tunables of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssistantConfig {
    /// Wait between a specialty-bearing reply and the doctor search.
    pub search_delay: Duration,
    /// Options passed to the geolocator; `timeout` is also enforced here.
    pub position_options: PositionOptions,
    pub match_mode: MatchMode,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            search_delay: Duration::from_secs(1),
            position_options: PositionOptions::default(),
            match_mode: MatchMode::default(),
        }
    }
}

struct SessionState {
    log: MessageLog,
    location: LocationState,
    doctors: Vec<Doctor>,
}

struct SessionInner {
    id: SessionId,
    config: AssistantConfig,
    detector: SpecialtyDetector,
    deps: AssistantDeps,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
    loading: AtomicBool,
    closed: AtomicBool,
    shutdown: watch::Sender<bool>,
    tasks: StdMutex<Vec<JoinHandle<()>>>,
}

/// One patient's conversation with the assistant.
///
/// Not `Clone`: dropping the session closes it. Share it behind an `Arc`
/// if several tasks need it.
pub struct AssistantSession {
    inner: Arc<SessionInner>,
}

impl AssistantSession {
    /// Opens a session whose log holds the greeting, and publishes it.
    pub fn new(deps: AssistantDeps, config: AssistantConfig) -> Result<Self, DomainError> {
        let log = MessageLog::with_greeting(replies::GREETING)?;
        let greeting = log.last().cloned();
        let (shutdown, _) = watch::channel(false);
        let id = SessionId::new();

        let inner = Arc::new(SessionInner {
            id,
            config,
            detector: SpecialtyDetector::new(config.match_mode),
            deps,
            state: Mutex::new(SessionState {
                log,
                location: LocationState::new(),
                doctors: Vec::new(),
            }),
            in_flight: AtomicBool::new(false),
            loading: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            shutdown,
            tasks: StdMutex::new(Vec::new()),
        });

        if let Some(message) = greeting {
            inner.notify(SessionEvent::MessageAppended { message });
        }

        tracing::info!(session_id = %id, "Assistant session opened");
        Ok(Self { inner })
    }

    pub fn id(&self) -> SessionId {
        self.inner.id
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// Processes one user submission.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` for blank text
    /// - `RequestInFlight` while another submission is running
    /// - `SessionClosed` after [`close`](Self::close)
    ///
    /// AI failures are not errors: they produce the fallback message.
    pub async fn submit(&self, text: &str) -> Result<TurnOutcome, SubmitError> {
        self.inner.submit(text).await
    }

    /// Asks for the device location. No-op unless the status is idle.
    pub async fn request_permission(&self) -> LocationStatus {
        self.inner.request_permission().await
    }

    /// Declines location sharing. No-op unless the status is idle.
    pub async fn decline_permission(&self) -> LocationStatus {
        self.inner.decline_permission().await
    }

    /// Runs a doctor search right away.
    pub async fn search_doctors(&self, specialty: Specialty) -> SearchOutcome {
        self.inner.search_doctors(specialty).await
    }

    /// Hands a doctor to the booking workflow.
    pub async fn book_doctor(&self, doctor: &Doctor) -> Result<Navigation, HandoffError> {
        let selection = PendingSelection::new(doctor.clone());
        self.inner.deps.handoff.put_pending_selection(selection).await?;
        tracing::info!(session_id = %self.inner.id, doctor_id = %doctor.id, "Doctor selected for booking");
        Ok(Navigation::ScheduleAppointment)
    }

    /// Starts a call with a doctor under a fresh call id.
    pub async fn start_call(&self, doctor: &Doctor) -> Result<Navigation, HandoffError> {
        let call = ActiveCall::start(doctor.clone());
        let call_id = call.id;
        self.inner.deps.handoff.put_active_call(call).await?;
        tracing::info!(session_id = %self.inner.id, doctor_id = %doctor.id, call_id = %call_id, "Call started");
        Ok(Navigation::Call { call_id })
    }

    /// Snapshot of the log.
    pub async fn messages(&self) -> Vec<Message> {
        self.inner.state.lock().await.log.messages().to_vec()
    }

    pub async fn location(&self) -> LocationState {
        self.inner.state.lock().await.location
    }

    /// Doctors from the latest successful search.
    pub async fn doctors(&self) -> Vec<Doctor> {
        self.inner.state.lock().await.doctors.clone()
    }

    /// True while an AI call is outstanding.
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Number of scheduled searches that have not finished yet.
    pub fn pending_searches(&self) -> usize {
        self.inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Cancels pending searches and rejects further submissions.
    pub fn close(&self) {
        self.inner.close();
    }
}

impl Drop for AssistantSession {
    fn drop(&mut self) {
        self.inner.close();
    }
}

impl SessionInner {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.shutdown.send_replace(true);

        let tasks: Vec<_> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for task in &tasks {
            task.abort();
        }
        tracing::info!(session_id = %self.id, cancelled = tasks.len(), "Assistant session closed");
    }

    fn notify(&self, event: SessionEvent) {
        self.deps.notifier.notify(event);
    }

    fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::Release);
        self.notify(SessionEvent::LoadingChanged { loading });
    }

    fn append(&self, state: &mut SessionState, sender: Sender, text: &str) -> Result<MessageId, DomainError> {
        let message = state.log.append(sender, text)?.clone();
        let id = message.id();
        self.notify(SessionEvent::MessageAppended { message });
        Ok(id)
    }

    fn append_bot(&self, state: &mut SessionState, text: &str) -> Option<MessageId> {
        match self.append(state, Sender::Bot, text) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "Failed to append bot message");
                None
            }
        }
    }

    async fn submit(self: &Arc<Self>, text: &str) -> Result<TurnOutcome, SubmitError> {
        if self.is_closed() {
            return Err(SubmitError::SessionClosed);
        }
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::RequestInFlight)?;

        let request = {
            let mut state = self.state.lock().await;
            let agrees_to_location =
                state.location.status().is_idle() && text.to_lowercase().contains("yes");
            self.append(&mut state, Sender::User, text)?;

            if agrees_to_location {
                None
            } else {
                Some(AIRequest::new(text, state.log.turns()))
            }
        };

        let Some(request) = request else {
            tracing::debug!(session_id = %self.id, "User agreed to share location");
            let status = self.request_permission().await;
            return Ok(TurnOutcome::PermissionRequested { status });
        };

        self.set_loading(true);
        let result = self.deps.ai.respond(request).await;
        let outcome = self.record_reply(result).await;
        self.set_loading(false);

        let outcome = outcome?;
        if let TurnOutcome::Replied {
            specialty: Some(specialty),
            search_scheduled: true,
            ..
        } = outcome
        {
            self.schedule_search(specialty);
        }
        Ok(outcome)
    }

    async fn record_reply(
        &self,
        result: Result<String, AIError>,
    ) -> Result<TurnOutcome, SubmitError> {
        let mut state = self.state.lock().await;
        if self.is_closed() {
            return Err(SubmitError::SessionClosed);
        }

        match result {
            Ok(reply) if !reply.trim().is_empty() => {
                let reply_id = self.append(&mut state, Sender::Bot, &reply)?;
                let specialty = self.detector.detect(&reply);
                let search_scheduled = specialty.is_some() && state.location.status().is_granted();
                tracing::debug!(
                    session_id = %self.id,
                    specialty = ?specialty,
                    search_scheduled,
                    "AI replied"
                );
                Ok(TurnOutcome::Replied {
                    reply_id,
                    specialty,
                    search_scheduled,
                })
            }
            Ok(_) => {
                tracing::warn!(session_id = %self.id, "AI returned an empty reply");
                let message_id = self.append(&mut state, Sender::Bot, replies::AI_FALLBACK)?;
                Ok(TurnOutcome::FallbackUsed { message_id })
            }
            Err(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "Error getting AI response");
                let message_id = self.append(&mut state, Sender::Bot, replies::AI_FALLBACK)?;
                Ok(TurnOutcome::FallbackUsed { message_id })
            }
        }
    }

    async fn request_permission(&self) -> LocationStatus {
        {
            let mut state = self.state.lock().await;
            if self.is_closed() || !state.location.status().is_idle() {
                return state.location.status();
            }
            if let Err(err) = state.location.begin_request() {
                tracing::warn!(session_id = %self.id, error = %err, "Cannot request location");
                return state.location.status();
            }
            self.notify(SessionEvent::LocationChanged {
                location: state.location,
            });
        }

        let options = self.config.position_options;
        tracing::info!(session_id = %self.id, timeout_ms = options.timeout.as_millis() as u64, "Requesting device location");
        let fix = locate(self.deps.geolocator.as_ref(), options).await;

        let mut state = self.state.lock().await;
        if self.is_closed() {
            return state.location.status();
        }

        let (transition, text) = match fix {
            Ok(coordinates) => {
                tracing::debug!(session_id = %self.id, %coordinates, "Location granted");
                (state.location.grant(coordinates), replies::LOCATION_GRANTED)
            }
            Err(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "Error getting location");
                (state.location.deny(), replies::LOCATION_FAILED)
            }
        };
        if let Err(err) = transition {
            tracing::warn!(session_id = %self.id, error = %err, "Location transition rejected");
            return state.location.status();
        }

        self.notify(SessionEvent::LocationChanged {
            location: state.location,
        });
        self.append_bot(&mut state, text);
        state.location.status()
    }

    async fn decline_permission(&self) -> LocationStatus {
        let mut state = self.state.lock().await;
        if self.is_closed() || !state.location.status().is_idle() {
            return state.location.status();
        }
        if let Err(err) = state.location.deny() {
            tracing::warn!(session_id = %self.id, error = %err, "Cannot decline location");
            return state.location.status();
        }

        tracing::info!(session_id = %self.id, "Location declined");
        self.notify(SessionEvent::LocationChanged {
            location: state.location,
        });
        self.append_bot(&mut state, replies::LOCATION_DECLINED);
        state.location.status()
    }

    fn schedule_search(self: &Arc<Self>, specialty: Specialty) {
        let inner = Arc::clone(self);
        let mut shutdown = self.shutdown.subscribe();
        let delay = self.config.search_delay;

        tracing::info!(
            session_id = %self.id,
            %specialty,
            delay_ms = delay.as_millis() as u64,
            "Scheduling doctor search"
        );

        let handle = tokio::spawn(async move {
            if *shutdown.borrow() {
                return;
            }
            tokio::select! {
                _ = shutdown.changed() => {
                    tracing::debug!(session_id = %inner.id, "Scheduled search cancelled");
                    return;
                }
                _ = sleep(delay) => {}
            }
            tokio::select! {
                _ = shutdown.changed() => {
                    tracing::debug!(session_id = %inner.id, "Doctor search cancelled");
                }
                _ = inner.search_doctors(specialty) => {}
            }
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        if self.is_closed() {
            handle.abort();
        } else {
            tasks.push(handle);
        }
    }

    async fn search_doctors(&self, specialty: Specialty) -> SearchOutcome {
        if self.is_closed() {
            return SearchOutcome::Cancelled;
        }
        let position = self.state.lock().await.location.granted_position();
        let Some(location) = position else {
            tracing::info!(session_id = %self.id, %specialty, "Doctor search needs location");
            self.notify(SessionEvent::Notice {
                notice: Notice::location_required(),
            });
            self.request_permission().await;
            return SearchOutcome::LocationRequired;
        };

        let result = self.deps.search.search(SearchQuery::new(specialty, location)).await;

        let mut state = self.state.lock().await;
        if self.is_closed() {
            return SearchOutcome::Cancelled;
        }

        match result {
            Ok(found) => {
                let doctors: Vec<Doctor> = dedupe_by_id(found)
                    .into_iter()
                    .map(Doctor::with_fallback_image)
                    .collect();
                tracing::info!(session_id = %self.id, %specialty, count = doctors.len(), "Doctors found");

                state.doctors = doctors.clone();
                self.notify(SessionEvent::DoctorsFound {
                    specialty,
                    doctors: doctors.clone(),
                });
                self.append_bot(&mut state, &replies::doctors_found(specialty.name()));
                SearchOutcome::Found { specialty, doctors }
            }
            Err(err) => {
                tracing::warn!(session_id = %self.id, %specialty, error = %err, "Error searching for doctors");
                self.notify(SessionEvent::Notice {
                    notice: Notice::search_error(),
                });
                SearchOutcome::Failed
            }
        }
    }
}

/// Queries the geolocator, enforcing the timeout and validating the fix.
async fn locate(geolocator: &dyn Geolocator, options: PositionOptions) -> Result<Coordinates, GeolocationError> {
    match timeout(options.timeout, geolocator.current_position(&options)).await {
        Ok(Ok(position)) => Ok(position.coordinates()?),
        Ok(Err(err)) => Err(err),
        Err(_) => Err(GeolocationError::timeout(options.timeout)),
    }
}
