//! Command-line front end for one export-and-download cycle:
//! 1. Read the API token from the `MESHCAPADE_API_TOKEN` environment variable.
//! 2. Start a GLB export of the given avatar.
//! 3. Poll until the export is ready.
//! 4. Download the exported file to `<asset_id>.glb`.
//!
//! Usage:
//! `meshcapade-export <ASSET_ID>`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use meshcapade::{ExportFormat, MeshcapadeClient};
use tracing_subscriber::EnvFilter;

/// Export an avatar from the Meshcapade platform and download the result.
#[derive(Parser, Debug)]
#[command(name = "meshcapade-export", version, about)]
struct Cli {
    /// Id of the avatar to export.
    asset_id: String,

    /// Where to write the exported file. Defaults to `<asset_id>.glb` in the
    /// current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of seconds to wait for the export to finish.
    #[arg(long, default_value_t = 600)]
    timeout_secs: u64,

    /// Seconds to sleep between status polls.
    #[arg(long, default_value_t = 5)]
    poll_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.glb", cli.asset_id)));

    // Initialize the client from the MESHCAPADE_API_TOKEN environment variable.
    let client = MeshcapadeClient::new(None)?
        .with_poll_interval(Duration::from_secs(cli.poll_secs))
        .with_max_wait(Some(Duration::from_secs(cli.timeout_secs)));

    tracing::info!(asset_id = %cli.asset_id, "starting export");
    let job = client.start_export(&cli.asset_id, ExportFormat::Glb).await?;

    tracing::info!(asset_id = %cli.asset_id, "waiting for export to finish");
    let status = client.wait_until_ready(&job).await?;
    let download_url = status
        .download_url
        .context("export finished without a download URL")?;

    let path = client.download(&download_url, &output).await?;
    println!("Avatar downloaded and saved to: {}", path.display());

    Ok(())
}
