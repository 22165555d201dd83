use {
    clap::Parser,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    pharos_audit::{Runner, RunDefaults},
    pharos_browser::{CdpAuditEngine, ChromeLauncher, LauncherConfig, detect},
    pharos_gateway::{AppState, start_gateway},
};

#[derive(Parser)]
#[command(name = "pharos", about = "Pharos — web performance audit gateway")]
struct Cli {
    /// Address to bind to.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Default attempt count for requests that omit one.
    #[arg(long, env = "ATTEMPTS", default_value_t = 3)]
    attempts: u32,

    /// Path to a Chrome/Chromium binary (auto-detected if unset).
    #[arg(long, env = "CHROME")]
    chrome_path: Option<String>,

    /// CDP request timeout in milliseconds; bounds navigation waits.
    #[arg(long, default_value_t = 60_000)]
    request_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);
    info!(version = env!("CARGO_PKG_VERSION"), "pharos starting");

    detect::check_and_warn(cli.chrome_path.as_deref());

    let launcher = ChromeLauncher::new(LauncherConfig {
        chrome_path: cli.chrome_path.clone(),
        request_timeout_ms: cli.request_timeout_ms,
        chrome_args: Vec::new(),
    });
    let runner = Runner::shared(launcher, CdpAuditEngine);

    let state = AppState::new(
        runner,
        RunDefaults {
            attempts: cli.attempts,
        },
    );

    start_gateway(&cli.bind, cli.port, state).await?;
    Ok(())
}
