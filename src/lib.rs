//! An unofficial Rust client for the Meshcapade avatar export API.
//!
//! This crate provides a convenient, asynchronous interface for exporting
//! avatars hosted on the Meshcapade platform into downloadable 3D model files.
//! It handles API requests, status polling, error handling, and file downloads,
//! allowing you to focus on your application's core logic.
//!
//! ## Features
//! - Starting an avatar export in a chosen format (GLB by default).
//! - Status polling to wait for export completion, with a configurable
//!   interval and wait budget.
//! - Helper function for downloading the exported file.
//! - Typed error handling for robust applications.
//!
//! ## Example
//!
//! ```no_run
//! use meshcapade::{ExportFormat, MeshcapadeClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads MESHCAPADE_API_TOKEN from the environment.
//!     let client = MeshcapadeClient::new(None)?;
//!
//!     let job = client
//!         .start_export("7fae7513-9860-4fa0-80a4-3dd1e75fb8d4", ExportFormat::Glb)
//!         .await?;
//!     let status = client.wait_until_ready(&job).await?;
//!
//!     if let Some(url) = &status.download_url {
//!         client.download(url, "avatar.glb").await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::MeshcapadeClient;
pub use error::MeshcapadeError;
pub use types::{ExportFormat, ExportJob, ExportState, ExportStatus};
