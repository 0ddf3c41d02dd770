//! End-to-end flows of the assistant session against scripted ports.
//!
//! Time is paused in every test, so the search delay and the geolocation
//! timeout are exercised without real waiting.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep, Instant};

use kabiraj_assistant::adapters::ai::MockAIResponder;
use kabiraj_assistant::adapters::geolocation::MockGeolocator;
use kabiraj_assistant::adapters::handoff::InMemoryHandoffStore;
use kabiraj_assistant::adapters::notify::ChannelNotifier;
use kabiraj_assistant::adapters::search::MockDoctorSearch;
use kabiraj_assistant::application::{
    AssistantConfig, AssistantDeps, AssistantSession, SearchOutcome, SubmitError, TurnOutcome,
};
use kabiraj_assistant::domain::conversation::{replies, Sender};
use kabiraj_assistant::domain::doctor::Doctor;
use kabiraj_assistant::domain::location::{Coordinates, LocationStatus};
use kabiraj_assistant::domain::specialty::{MatchMode, Specialty};
use kabiraj_assistant::ports::{AIError, Notice, SearchError, SearchQuery, SessionEvent};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Fixture {
    session: AssistantSession,
    ai: MockAIResponder,
    search: MockDoctorSearch,
    geolocator: MockGeolocator,
    events: UnboundedReceiver<SessionEvent>,
}

fn fixture(ai: MockAIResponder, search: MockDoctorSearch, geolocator: MockGeolocator) -> Fixture {
    fixture_with(ai, search, geolocator, AssistantConfig::default())
}

fn fixture_with(
    ai: MockAIResponder,
    search: MockDoctorSearch,
    geolocator: MockGeolocator,
    config: AssistantConfig,
) -> Fixture {
    let (notifier, events) = ChannelNotifier::channel();
    let deps = AssistantDeps {
        ai: Arc::new(ai.clone()),
        search: Arc::new(search.clone()),
        geolocator: Arc::new(geolocator.clone()),
        handoff: Arc::new(InMemoryHandoffStore::new()),
        notifier: Arc::new(notifier),
    };
    let session = AssistantSession::new(deps, config).unwrap();
    Fixture {
        session,
        ai,
        search,
        geolocator,
        events,
    }
}

fn doctor(id: &str, name: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: "Neurologist".to_string(),
        description: "Consultant neurologist".to_string(),
        address: "12 Hosur Rd, Koramangala, Bangalore".to_string(),
        url: format!("https://directory.example/{}", id),
        image: String::new(),
        distance: Some("Nearby".to_string()),
    }
}

fn bangalore() -> Coordinates {
    Coordinates::new(12.9, 77.6).unwrap()
}

fn drain(events: &mut UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

async fn texts(session: &AssistantSession) -> Vec<String> {
    session
        .messages()
        .await
        .iter()
        .map(|m| m.text().to_string())
        .collect()
}

// =============================================================================
// Location consent
// =============================================================================

#[tokio::test(start_paused = true)]
async fn yes_while_idle_skips_the_ai_and_grants_location() {
    let f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
    );

    let outcome = f.session.submit("yes").await.unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::PermissionRequested {
            status: LocationStatus::Granted
        }
    );
    assert_eq!(f.ai.call_count(), 0);
    assert_eq!(f.session.location().await.granted_position(), Some(bangalore()));
    assert_eq!(
        texts(&f.session).await,
        vec![replies::GREETING, "yes", replies::LOCATION_GRANTED]
    );
}

#[tokio::test(start_paused = true)]
async fn yes_after_location_is_decided_goes_to_the_ai() {
    let f = fixture(
        MockAIResponder::new().with_reply("Glad to hear it."),
        MockDoctorSearch::new(),
        MockGeolocator::new(),
    );
    f.session.decline_permission().await;

    let outcome = f.session.submit("Yes, I took the medicine").await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Replied { .. }));
    assert_eq!(f.ai.call_count(), 1);
    assert_eq!(f.geolocator.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn geolocation_hang_times_out_into_denied() {
    let f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new(),
        MockGeolocator::new().hanging(),
    );
    let start = Instant::now();

    let status = f.session.request_permission().await;

    assert_eq!(status, LocationStatus::Denied);
    assert!(start.elapsed() >= Duration::from_secs(15));
    let location = f.session.location().await;
    assert!(location.position().is_none());

    let failures = texts(&f.session)
        .await
        .into_iter()
        .filter(|t| t == replies::LOCATION_FAILED)
        .count();
    assert_eq!(failures, 1);
}

#[tokio::test(start_paused = true)]
async fn geolocator_receives_platform_options() {
    let f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
    );

    f.session.request_permission().await;

    let options = f.geolocator.calls()[0];
    assert!(options.enable_high_accuracy);
    assert_eq!(options.timeout, Duration::from_secs(15));
    assert_eq!(options.maximum_age, Duration::from_secs(10));
}

// =============================================================================
// Specialty detection and delayed search
// =============================================================================

#[tokio::test(start_paused = true)]
async fn headache_scenario_searches_neurologists_near_the_patient() {
    let mut f = fixture(
        MockAIResponder::new().with_reply("This could be a migraine. Please see a Neurologist."),
        MockDoctorSearch::new().with_doctors(vec![doctor("n1", "Asha Rao"), doctor("n2", "Vikram Shah")]),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;
    let start = Instant::now();

    let outcome = f.session.submit("I have a headache").await.unwrap();

    assert!(matches!(
        outcome,
        TurnOutcome::Replied {
            specialty: Some(Specialty::Neurologist),
            search_scheduled: true,
            ..
        }
    ));
    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.session.pending_searches(), 1);

    sleep(Duration::from_millis(1500)).await;

    let calls = f.search.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, SearchQuery::new(Specialty::Neurologist, bangalore()));
    let waited = calls[0].1.duration_since(start);
    assert!(waited >= Duration::from_secs(1) && waited < Duration::from_millis(1100));

    let doctors = f.session.doctors().await;
    assert_eq!(doctors.len(), 2);
    assert!(doctors.iter().all(|d| !d.image.is_empty()));
    assert_eq!(
        texts(&f.session).await.last().map(String::as_str),
        Some(replies::doctors_found("Neurologist").as_str())
    );
    assert!(drain(&mut f.events)
        .iter()
        .any(|e| matches!(e, SessionEvent::DoctorsFound { specialty: Specialty::Neurologist, doctors } if doctors.len() == 2)));
    assert_eq!(f.session.pending_searches(), 0);
}

#[tokio::test(start_paused = true)]
async fn cardiologist_reply_schedules_exactly_one_search() {
    let f = fixture(
        MockAIResponder::new().with_reply("A CARDIOLOGIST should check your heart; cardiologist visits are quick."),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;

    f.session.submit("My chest hurts").await.unwrap();
    sleep(Duration::from_secs(5)).await;

    let calls = f.search.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.specialty, Specialty::Cardiologist);
    assert_eq!(calls[0].0.location, bangalore());
}

#[tokio::test(start_paused = true)]
async fn specialty_without_location_grant_never_searches() {
    let f = fixture(
        MockAIResponder::new().with_reply("You should see a Cardiologist."),
        MockDoctorSearch::new(),
        MockGeolocator::new(),
    );

    let outcome = f.session.submit("My chest hurts").await.unwrap();
    sleep(Duration::from_secs(5)).await;

    assert!(matches!(
        outcome,
        TurnOutcome::Replied {
            specialty: Some(Specialty::Cardiologist),
            search_scheduled: false,
            ..
        }
    ));
    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.session.pending_searches(), 0);
}

#[tokio::test(start_paused = true)]
async fn word_boundary_mode_ignores_embedded_names() {
    let config = AssistantConfig {
        match_mode: MatchMode::WordBoundary,
        ..AssistantConfig::default()
    };
    let f = fixture_with(
        MockAIResponder::new().with_reply("Ask about NonCardiologist options."),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
        config,
    );
    f.session.request_permission().await;

    let outcome = f.session.submit("What now?").await.unwrap();

    assert!(!outcome.search_scheduled());
}

#[tokio::test(start_paused = true)]
async fn closing_before_the_delay_cancels_the_search() {
    let f = fixture(
        MockAIResponder::new().with_reply("Please see a Dermatologist."),
        MockDoctorSearch::new().with_doctors(vec![doctor("d1", "Meera Iyer")]),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;
    f.session.submit("I have a rash").await.unwrap();
    let before = f.session.messages().await.len();

    f.session.close();
    sleep(Duration::from_secs(3)).await;

    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.session.messages().await.len(), before);
    assert!(f.session.doctors().await.is_empty());
    assert!(matches!(f.session.submit("hello").await, Err(SubmitError::SessionClosed)));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_cancels_the_search() {
    let f = fixture(
        MockAIResponder::new().with_reply("Please see a Dermatologist."),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;
    f.session.submit("I have a rash").await.unwrap();
    let search = f.search.clone();

    drop(f);
    sleep(Duration::from_secs(3)).await;

    assert_eq!(search.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn closing_mid_search_discards_the_results() {
    let f = fixture(
        MockAIResponder::new().with_reply("Please see a Dermatologist."),
        MockDoctorSearch::new()
            .with_doctors(vec![doctor("d1", "Meera Iyer")])
            .with_delay(Duration::from_secs(2)),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;
    f.session.submit("I have a rash").await.unwrap();
    let before = f.session.messages().await.len();

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(f.search.call_count(), 1);
    f.session.close();
    sleep(Duration::from_secs(3)).await;

    assert_eq!(f.session.messages().await.len(), before);
    assert!(f.session.doctors().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn closed_session_ignores_location_and_search_requests() {
    let mut f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.close();
    drain(&mut f.events);
    let before = f.session.messages().await.len();

    let status = f.session.request_permission().await;
    let outcome = f.session.search_doctors(Specialty::Neurologist).await;

    assert_eq!(status, LocationStatus::Idle);
    assert_eq!(outcome, SearchOutcome::Cancelled);
    assert_eq!(f.session.location().await.status(), LocationStatus::Idle);
    assert_eq!(f.geolocator.call_count(), 0);
    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.session.messages().await.len(), before);
    assert!(drain(&mut f.events).is_empty());
}

// =============================================================================
// Doctor search results
// =============================================================================

#[tokio::test(start_paused = true)]
async fn identical_responses_render_identical_lists() {
    let list = vec![doctor("a", "Asha Rao"), doctor("b", "Vikram Shah"), doctor("a", "Asha Rao")];
    let f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new().with_doctors(list.clone()).with_doctors(list),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;

    f.session.search_doctors(Specialty::Neurologist).await;
    let first = f.session.doctors().await;
    f.session.search_doctors(Specialty::Neurologist).await;
    let second = f.session.doctors().await;

    assert_eq!(first, second);
    let ids: Vec<_> = first.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn search_failure_shows_a_notice_and_keeps_the_log() {
    let mut f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new().with_error(SearchError::unavailable("upstream down")),
        MockGeolocator::new().with_position(12.9, 77.6),
    );
    f.session.request_permission().await;
    let before = texts(&f.session).await;
    drain(&mut f.events);

    let outcome = f.session.search_doctors(Specialty::Orthopedic).await;

    assert_eq!(outcome, SearchOutcome::Failed);
    assert_eq!(texts(&f.session).await, before);
    assert_eq!(
        drain(&mut f.events),
        vec![SessionEvent::Notice {
            notice: Notice::search_error()
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn search_without_location_triggers_the_permission_flow() {
    let f = fixture(
        MockAIResponder::new(),
        MockDoctorSearch::new(),
        MockGeolocator::new().with_position(12.9, 77.6),
    );

    let outcome = f.session.search_doctors(Specialty::Pediatrician).await;

    assert_eq!(outcome, SearchOutcome::LocationRequired);
    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.session.location().await.status(), LocationStatus::Granted);
}

// =============================================================================
// Submission rules
// =============================================================================

#[tokio::test(start_paused = true)]
async fn concurrent_submission_is_rejected() {
    let f = fixture(
        MockAIResponder::new()
            .with_reply("Rest and hydrate.")
            .with_delay(Duration::from_secs(2)),
        MockDoctorSearch::new(),
        MockGeolocator::new(),
    );

    let (first, second) = tokio::join!(f.session.submit("I feel tired"), f.session.submit("hello?"));

    assert!(matches!(first, Ok(TurnOutcome::Replied { .. })));
    assert!(matches!(second, Err(SubmitError::RequestInFlight)));
    assert_eq!(f.ai.call_count(), 1);
    assert_eq!(texts(&f.session).await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn loading_is_raised_only_during_the_ai_call() {
    let f = fixture(
        MockAIResponder::new()
            .with_reply("Rest and hydrate.")
            .with_delay(Duration::from_secs(2)),
        MockDoctorSearch::new(),
        MockGeolocator::new(),
    );

    let (_, loading_mid_call) = tokio::join!(f.session.submit("I feel tired"), async {
        sleep(Duration::from_secs(1)).await;
        f.session.is_loading()
    });

    assert!(loading_mid_call);
    assert!(!f.session.is_loading());
}

#[tokio::test(start_paused = true)]
async fn ai_failure_appends_the_fallback_once() {
    let f = fixture(
        MockAIResponder::new().with_error(AIError::network("connection reset")),
        MockDoctorSearch::new(),
        MockGeolocator::new(),
    );

    let outcome = f.session.submit("I have a fever").await.unwrap();

    assert!(matches!(outcome, TurnOutcome::FallbackUsed { .. }));
    let messages = f.session.messages().await;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender(), Sender::User);
    assert_eq!(messages[2].text(), replies::AI_FALLBACK);
}

#[tokio::test(start_paused = true)]
async fn message_ids_follow_log_positions() {
    let f = fixture(
        MockAIResponder::new().with_reply("one").with_error(AIError::AuthenticationFailed),
        MockDoctorSearch::new(),
        MockGeolocator::new(),
    );

    f.session.submit("first").await.unwrap();
    assert!(f.session.submit("  ").await.is_err());
    f.session.submit("second").await.unwrap();

    let ids: Vec<u64> = f.session.messages().await.iter().map(|m| m.id().value()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}
