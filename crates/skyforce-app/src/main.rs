use std::process::ExitCode;

use tracing::{error, info};

use skyforce_app::config;
use skyforce_app::game_loop::{demo_script, LoopOptions};
use skyforce_app::state::AppState;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> ExitCode {
    init_tracing();

    let sim_config = match config::sim_config_from_env() {
        Ok(sim_config) => sim_config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let options = LoopOptions {
        max_ticks: Some(config::max_ticks_from_env()),
        paced: false,
        script: demo_script(),
    };
    info!(seed = sim_config.seed, max_ticks = ?options.max_ticks, "starting headless run");

    let state = AppState::new();
    if let Err(e) = state.start_simulation(sim_config, options) {
        error!(error = %e, "failed to start simulation");
        return ExitCode::FAILURE;
    }

    match state.wait() {
        Ok(summary) => {
            info!(
                ticks = summary.ticks,
                status = ?summary.mission_status,
                score = summary.score.points,
                kills = summary.score.enemies_destroyed,
                "run finished"
            );
            match serde_json::to_string(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => error!(error = %e, "failed to encode summary"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "game loop failed");
            ExitCode::FAILURE
        }
    }
}
