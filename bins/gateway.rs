use std::process::ExitCode;

use common::utils::logging::init_logging_json;
use dotenvy::dotenv;
use gateway::bootstrap;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    dotenv().ok();
    init_logging_json();
    info!(service = "gateway", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "gateway",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "gateway", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "gateway", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "gateway",
        event = "start",
        %service_id,
        pid,
        version,
        upstream = %cfg.gateway.upstream_url,
        "gateway service starting"
    );

    match rt.block_on(bootstrap::run(&cfg.gateway)) {
        Ok(()) => {
            info!(service = "gateway", event = "stop", %service_id, pid, "gateway service stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "gateway", event = "run_failed", error = %e, "gateway::bootstrap::run returned error");
            ExitCode::FAILURE
        }
    }
}
