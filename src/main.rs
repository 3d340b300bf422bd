#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use vigil::{CleanupConfig, SessionRegistry};

/// `Vigil` - session lifecycle registry.
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author = "theonlyhennygod")]
#[command(version)]
#[command(
    about = "Drive a simulated workload against the session registry.",
    long_about = "\
Drive a simulated workload against the session registry.

Spawns a handful of simulated users against one shared registry with the
background sweep running: some keep touching their session, some go idle
until they expire, some log out and wait for collection. Progress is logged
through tracing (RUST_LOG to adjust) and a JSON summary is printed at exit.

Examples:
  vigil
  vigil --users 8 --period-millis 250 --timeout-millis 1000
  RUST_LOG=debug vigil --run-millis 10000"
)]
struct Cli {
    /// Background sweep period in milliseconds
    #[arg(long, default_value_t = 500)]
    period_millis: i64,

    /// Idle budget in milliseconds before a session counts as stale
    #[arg(long, default_value_t = 1500)]
    timeout_millis: i64,

    /// Number of simulated users
    #[arg(long, default_value_t = 6)]
    users: usize,

    /// Total run time in milliseconds
    #[arg(long, default_value_t = 6000)]
    run_millis: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = CleanupConfig {
        sweep_period_millis: cli.period_millis,
        idle_timeout_millis: cli.timeout_millis,
    };

    let registry = Arc::new(SessionRegistry::new());
    registry.start_auto_cleanup_with(&config)?;
    info!(
        users = cli.users,
        period_millis = config.sweep_period_millis,
        timeout_millis = config.idle_timeout_millis,
        "workload starting"
    );

    let mut workers = Vec::new();
    for index in 0..cli.users {
        workers.push(tokio::spawn(simulate_user(
            Arc::clone(&registry),
            index,
            cli.run_millis,
        )));
    }

    // Report the stored-record count while the workers run.
    let reporter = {
        let registry = Arc::clone(&registry);
        let run_millis = cli.run_millis;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(1000));
            let deadline = tokio::time::Instant::now() + Duration::from_millis(run_millis);
            while tokio::time::Instant::now() < deadline {
                ticker.tick().await;
                info!(stored = registry.active_session_count(), "registry size");
            }
        })
    };

    for worker in workers {
        worker.await??;
    }
    reporter.await?;
    registry.stop_auto_cleanup();

    let mut sessions = serde_json::Map::new();
    for index in 0..cli.users {
        let user_id = user_id(index);
        let state = registry.session_state(&user_id)?;
        sessions.insert(user_id, serde_json::to_value(&state)?);
    }
    let summary = serde_json::json!({
        "stored_records": registry.active_session_count(),
        "sessions": sessions,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn user_id(index: usize) -> String {
    format!("user-{index}")
}

/// One simulated user. Behavior cycles by index: keep-alives touch until the
/// end of the run, while drifters go idle at halfway and leavers terminate
/// there.
async fn simulate_user(registry: Arc<SessionRegistry>, index: usize, run_millis: u64) -> Result<()> {
    let user_id = user_id(index);
    registry.begin(&user_id)?;

    let halfway = run_millis / 2;
    let mut elapsed: u64 = 0;
    while elapsed < run_millis {
        tokio::time::sleep(Duration::from_millis(200)).await;
        elapsed += 200;

        match index % 3 {
            // Keep-alive: touches until the end of the run.
            0 => registry.touch(&user_id)?,
            // Drifter: goes idle at halfway and is left to expire.
            1 => {
                if elapsed < halfway {
                    registry.touch(&user_id)?;
                }
            }
            // Leaver: terminates at halfway, then stays quiet.
            _ => {
                if elapsed < halfway {
                    registry.touch(&user_id)?;
                } else if elapsed - 200 < halfway {
                    registry.terminate(&user_id)?;
                }
            }
        }
    }
    Ok(())
}
