//! MealBuddy terminal session
//!
//! Drives one user's match session from the terminal:
//! - Random and manual buddy requests for a campus location and time
//! - Accepting and declining pending matches
//! - Browsing campus locations and joining announced meetups

use match_store::{Catalog, CandidateGenerator};
use rand::{rngs::StdRng, SeedableRng};
use tokio::io::BufReader;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod session;

use config::AppConfig;
use session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let log_level = match config.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("mealbuddy={},match_store={}", log_level, log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = ?config.seed,
        search_delay_ms = config.search_delay_ms,
        "Starting MealBuddy session"
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let generator =
        CandidateGenerator::with_config(rng, config.generator.clone(), Catalog::default())?;
    let mut session = Session::new(generator, config.search_delay());

    let stdin = BufReader::new(tokio::io::stdin());
    session.run(stdin, tokio::io::stdout()).await?;

    info!(
        matches = session.store().matches().len(),
        "Session ended"
    );
    Ok(())
}
