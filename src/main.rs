use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use kiosk::backend::{Backend, HttpBackend};
use kiosk::config::KioskConfig;
use kiosk::controller::{poller, KioskAction, KioskController};
use kiosk::surface::ConsoleSurface;

#[derive(Parser)]
#[command(name = "kiosk", about = "Face-recognition attendance kiosk controller.")]
struct Cli {
    /// Backend base URL (overrides config and KIOSK_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Config file (replaces ~/.kiosk and .kiosk lookup)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive dashboard (default)
    Tui,
    /// Start the backend camera
    Start,
    /// Stop the backend camera
    Stop,
    /// Print the current recognition status
    Status,
    /// Register the face currently in frame
    Register { name: String },
    /// Retrain the recognizer
    Train,
    /// Mark attendance for the recognized face
    Mark,
    /// Open today's attendance report, or save it with --output
    Download {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Info lines would scribble over the dashboard.
    let directive = match cli.command {
        None | Some(Command::Tui) => "kiosk=warn",
        Some(_) => "kiosk=info",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => KioskConfig::load_from(path).map_err(anyhow::Error::msg)?,
        None => KioskConfig::load(),
    };
    config.apply_url_override(cli.url.clone());

    info!("kiosk backend at {}", config.base_url);
    let http = HttpBackend::with_base_url(config.base_url.clone());

    let action = match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => return kiosk::tui::runner::run_tui(Arc::new(http), &config).await,
        Command::Status => {
            let status = http.status().await.context("status request failed")?;
            poller::apply_status(&ConsoleSurface, &status);
            return Ok(());
        }
        Command::Download {
            output: Some(path),
        } => {
            let bytes = http
                .fetch_today_report()
                .await
                .context("report download failed")?;
            std::fs::write(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Saved {} ({} bytes)", path.display(), bytes.len());
            return Ok(());
        }
        Command::Download { output: None } => KioskAction::DownloadToday,
        Command::Start => KioskAction::StartCamera,
        Command::Stop => KioskAction::StopCamera,
        Command::Register { name } => KioskAction::CaptureRegister(name),
        Command::Train => KioskAction::Train,
        Command::Mark => KioskAction::MarkAttendance,
    };

    let controller =
        KioskController::from_config(Arc::new(http), Arc::new(ConsoleSurface), &config);
    controller.dispatch(action).await;
    Ok(())
}
