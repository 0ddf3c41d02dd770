//! Terminal front end for the Kabiraj assistant.
//!
//! Lines typed on stdin are submitted as chat messages; lines starting with
//! `/` are commands (see `/help`). Session events are rendered as they
//! arrive.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use kabiraj_assistant::adapters::ai::{HttpAIResponder, HttpAIResponderConfig, KeywordResponder};
use kabiraj_assistant::adapters::geolocation::{CachedGeolocator, FixedGeolocator};
use kabiraj_assistant::adapters::handoff::InMemoryHandoffStore;
use kabiraj_assistant::adapters::notify::ChannelNotifier;
use kabiraj_assistant::adapters::search::{HttpDoctorSearch, HttpDoctorSearchConfig};
use kabiraj_assistant::application::{AssistantDeps, AssistantSession};
use kabiraj_assistant::config::AppConfig;
use kabiraj_assistant::domain::conversation::Sender;
use kabiraj_assistant::domain::location::LocationStatus;
use kabiraj_assistant::domain::specialty::Specialty;
use kabiraj_assistant::ports::{AIResponder, SessionEvent};
use kabiraj_assistant::telemetry::init_tracing;

const HELP: &str = "\
Commands:
  /allow           share your location
  /deny            keep your location private
  /search <name>   search doctors of a specialty now
  /book <n>        book doctor number n from the last list
  /call <n>        call doctor number n from the last list
  /quit            leave";

/// Talk to the Kabiraj health assistant
#[derive(Parser, Debug)]
#[command(name = "kabiraj-assistant", version)]
struct Args {
    /// Latitude reported as the device location
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<f64>,

    /// Longitude reported as the device location
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<f64>,

    /// Log filter for stderr output
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if args.latitude.is_some() {
        config.location.latitude = args.latitude;
        config.location.longitude = args.longitude;
    }
    config.validate()?;
    init_tracing(&args.log_level, config.is_production());

    let (notifier, events) = ChannelNotifier::channel();
    let deps = AssistantDeps {
        ai: build_responder(&config)?,
        search: Arc::new(HttpDoctorSearch::new(search_client_config(&config))?),
        geolocator: Arc::new(CachedGeolocator::new(FixedGeolocator::from_option(
            config.location.fixed_position(),
        ))),
        handoff: Arc::new(InMemoryHandoffStore::new()),
        notifier: Arc::new(notifier),
    };

    let printer = tokio::spawn(print_events(events));
    let session = AssistantSession::new(deps, config.assistant_config())?;
    tracing::info!(session_id = %session.id(), "Terminal session started");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&session, line.trim()).await {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.close();
    drop(session);
    printer.abort();
    Ok(())
}

fn build_responder(config: &AppConfig) -> Result<Arc<dyn AIResponder>, Box<dyn Error + Send + Sync>> {
    let Some(endpoint) = config.ai.endpoint() else {
        tracing::info!("No AI endpoint configured, using offline replies");
        return Ok(Arc::new(KeywordResponder::new()));
    };

    let mut responder_config = HttpAIResponderConfig::new(endpoint)
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries)
        .with_backoff_base(config.ai.retry_backoff());
    if let Some(key) = config.ai.api_key.clone() {
        responder_config = responder_config.with_api_key(key);
    }
    Ok(Arc::new(HttpAIResponder::new(responder_config)?))
}

fn search_client_config(config: &AppConfig) -> HttpDoctorSearchConfig {
    let search = HttpDoctorSearchConfig::new(config.search.endpoint.clone())
        .with_timeout(config.search.timeout());
    match config.search.api_key.clone() {
        Some(key) => search.with_api_key(key),
        None => search,
    }
}

/// Handles one input line. Returns false when the user wants to leave.
async fn handle_line(session: &AssistantSession, line: &str) -> bool {
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "/quit" | "/exit" => return false,
        "/help" => println!("{}", HELP),
        "/allow" => {
            session.request_permission().await;
        }
        "/deny" => {
            session.decline_permission().await;
        }
        "/search" => match argument.parse::<Specialty>() {
            Ok(specialty) => {
                session.search_doctors(specialty).await;
            }
            Err(err) => println!("! {}", err),
        },
        "/book" | "/call" => {
            let doctors = session.doctors().await;
            let picked = argument
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| doctors.get(index));
            let Some(doctor) = picked else {
                println!("! Pick a number between 1 and {}", doctors.len());
                return true;
            };

            let navigation = if command == "/book" {
                session.book_doctor(doctor).await
            } else {
                session.start_call(doctor).await
            };
            match navigation {
                Ok(navigation) => println!("-> {} ({})", navigation, doctor.name),
                Err(err) => println!("! {}", err),
            }
        }
        _ if command.starts_with('/') => println!("! Unknown command, try /help"),
        _ => {
            if let Err(err) = session.submit(line).await {
                println!("! {}", err);
            }
        }
    }
    true
}

async fn print_events(mut events: UnboundedReceiver<SessionEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::MessageAppended { message } => {
                let who = match message.sender() {
                    Sender::User => "you",
                    Sender::Bot => "kabiraj",
                };
                println!("[{}] {}: {}", message.time(), who, message.text());
            }
            SessionEvent::LocationChanged { location } => {
                if location.status() == LocationStatus::Requesting {
                    println!("   (locating...)");
                }
            }
            SessionEvent::LoadingChanged { loading: true } => println!("   (thinking...)"),
            SessionEvent::LoadingChanged { loading: false } => {}
            SessionEvent::DoctorsFound { doctors, .. } => {
                for (n, doctor) in doctors.iter().enumerate() {
                    println!(
                        "   {}. {} - {} ({})",
                        n + 1,
                        doctor.name,
                        doctor.address,
                        doctor.distance.as_deref().unwrap_or("distance unknown")
                    );
                }
                if !doctors.is_empty() {
                    println!("   /book <n> to schedule, /call <n> to call");
                }
            }
            SessionEvent::Notice { notice } => {
                println!("! {}: {}", notice.title, notice.description);
            }
        }
    }
}
