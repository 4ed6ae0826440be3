use crate::error::MeshcapadeError;
use crate::types::{
    ApiDocument, ExportAttributes, ExportFormat, ExportJob, ExportRequest, ExportState,
    ExportStatus,
};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.meshcapade.com/api/v1/";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(600);

/// The main client for interacting with the Meshcapade export API.
///
/// It holds the shared `reqwest::Client` and the base URL for all API requests.
/// It is designed to be cloneable and safe to share across threads.
#[derive(Clone, Debug)]
pub struct MeshcapadeClient {
    client: reqwest::Client,
    base_url: Url,
    poll_interval: Duration,
    max_wait: Option<Duration>,
}

impl MeshcapadeClient {
    /// Creates a new `MeshcapadeClient`.
    ///
    /// This method initializes the client with an API token. It first checks the
    /// `api_token` parameter. If it's `None`, it falls back to the
    /// `MESHCAPADE_API_TOKEN` environment variable. No network call is made here.
    ///
    /// # Errors
    ///
    /// - `MeshcapadeError::MissingApiToken` if the token is not provided in either way.
    /// - `MeshcapadeError::RequestFailed` if the internal HTTP client fails to build.
    /// - `MeshcapadeError::UrlParseFailed` if the default API URL is invalid.
    pub fn new(api_token: Option<String>) -> Result<Self, MeshcapadeError> {
        let api_token = api_token
            .or_else(|| env::var("MESHCAPADE_API_TOKEN").ok())
            .ok_or(MeshcapadeError::MissingApiToken)?;
        Self::new_with_url(api_token, DEFAULT_API_URL)
    }

    /// Creates a new `MeshcapadeClient` with a custom base URL.
    ///
    /// This is useful for testing or for connecting to a different API endpoint.
    ///
    /// # Errors
    ///
    /// - `MeshcapadeError::RequestFailed` if the internal HTTP client fails to build.
    /// - `MeshcapadeError::UrlParseFailed` if the provided `base_url` is invalid.
    pub fn new_with_url(api_token: String, base_url: &str) -> Result<Self, MeshcapadeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", api_token).parse().unwrap(),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: Some(DEFAULT_MAX_WAIT),
        })
    }

    /// Sets the delay between consecutive status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the total wait budget for [`wait_until_ready`](Self::wait_until_ready).
    ///
    /// Passing `None` makes the wait unbounded. Exceeding the budget aborts the
    /// wait locally; the remote job keeps running.
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Starts an export of the given avatar in the given format.
    ///
    /// # Arguments
    ///
    /// * `asset_id` - The id of the avatar to export.
    /// * `format` - The desired output file format.
    ///
    /// # Returns
    ///
    /// An [`ExportJob`] handle to poll with
    /// [`poll_status`](Self::poll_status) or
    /// [`wait_until_ready`](Self::wait_until_ready).
    pub async fn start_export(
        &self,
        asset_id: &str,
        format: ExportFormat,
    ) -> Result<ExportJob, MeshcapadeError> {
        if asset_id.is_empty() {
            return Err(MeshcapadeError::EmptyAssetId);
        }

        let status = self.request_export(asset_id, format).await?;

        Ok(ExportJob {
            asset_id: asset_id.to_string(),
            format,
            id: status.id,
        })
    }

    /// Queries the current state of a previously started export.
    ///
    /// The export endpoint is idempotent for an avatar with an export already in
    /// flight, so a poll re-issues the original export request and reads the
    /// state from the response. Each call is independent and does not mutate
    /// the job.
    pub async fn poll_status(&self, job: &ExportJob) -> Result<ExportStatus, MeshcapadeError> {
        self.request_export(&job.asset_id, job.format).await
    }

    /// Waits for an export to reach a terminal state by polling its status.
    ///
    /// This method repeatedly calls [`poll_status`](Self::poll_status) at the
    /// configured interval until the state is `Ready` or `Error`. Unrecognized
    /// states count as still in flight.
    ///
    /// # Returns
    ///
    /// The final [`ExportStatus`], whose `download_url` is guaranteed to be
    /// `Some`.
    ///
    /// # Errors
    ///
    /// - `MeshcapadeError::ExportFailed` if the job reaches the `Error` state.
    /// - `MeshcapadeError::Timeout` if the configured wait budget is exceeded.
    ///   The remote job is not cancelled.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use meshcapade::{ExportFormat, MeshcapadeClient};
    /// # #[tokio::main]
    /// # async fn main() -> anyhow::Result<()> {
    /// # let client = MeshcapadeClient::new(Some("your_api_token".to_string()))?;
    /// let job = client.start_export("7fae7513-9860-4fa0-80a4-3dd1e75fb8d4", ExportFormat::Glb).await?;
    /// let status = client.wait_until_ready(&job).await?;
    /// println!("Download URL: {:?}", status.download_url);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_until_ready(
        &self,
        job: &ExportJob,
    ) -> Result<ExportStatus, MeshcapadeError> {
        let started = Instant::now();

        loop {
            let status = self.poll_status(job).await?;
            tracing::debug!(
                asset_id = %job.asset_id,
                state = ?status.state,
                elapsed_secs = started.elapsed().as_secs(),
                "export status"
            );

            match status.state {
                ExportState::Ready => {
                    if status.download_url.is_none() {
                        return Err(MeshcapadeError::EmptyExportResponse);
                    }
                    return Ok(status);
                }
                ExportState::Error => {
                    return Err(MeshcapadeError::ExportFailed {
                        asset_id: job.asset_id.clone(),
                    });
                }
                // Pending, Processing, and anything the server adds later.
                _ => {}
            }

            if let Some(max_wait) = self.max_wait {
                if started.elapsed() >= max_wait {
                    return Err(MeshcapadeError::Timeout {
                        waited: started.elapsed(),
                    });
                }
            }

            sleep(self.poll_interval).await;
        }
    }

    /// Downloads an exported file to the given path.
    ///
    /// This function handles the HTTP request to the export's download URL and
    /// writes the payload to `dest` byte for byte. Parent directories are
    /// created as needed; an existing file at `dest` is overwritten.
    ///
    /// # Returns
    ///
    /// The `PathBuf` of the newly written file.
    ///
    /// # Errors
    ///
    /// This function can return an error if the download fails, if the
    /// destination directory or file cannot be created, or if there's an issue
    /// writing the file to disk.
    pub async fn download<P: AsRef<Path>>(
        &self,
        download_url: &str,
        dest: P,
    ) -> Result<PathBuf, MeshcapadeError> {
        let dest = dest.as_ref();
        let response = self.client.get(download_url).send().await?;

        if !response.status().is_success() {
            return Err(MeshcapadeError::ApiError {
                status: response.status(),
                message: format!("failed to download file from {}", download_url),
            });
        }

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = response.bytes().await?;
        let mut file = fs::File::create(dest).await?;
        file.write_all(&content).await?;
        file.flush().await?;

        Ok(dest.to_path_buf())
    }

    /// Issues the export request and parses one status observation out of the
    /// JSON:API response envelope.
    async fn request_export(
        &self,
        asset_id: &str,
        format: ExportFormat,
    ) -> Result<ExportStatus, MeshcapadeError> {
        let url = self
            .base_url
            .join(&format!("avatars/{}/export", asset_id))?;
        let request_body = ExportRequest {
            format,
            anim: Some("scan"),
        };

        let response = self.client.post(url).json(&request_body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_response: serde_json::Value = response.json().await.unwrap_or_default();
            return Err(MeshcapadeError::ApiError {
                status,
                message: error_response.to_string(),
            });
        }

        let document: ApiDocument<ExportAttributes> = response.json().await?;
        let attributes = document
            .data
            .attributes
            .ok_or(MeshcapadeError::EmptyExportResponse)?;

        Ok(ExportStatus {
            id: document.data.id,
            state: attributes.state,
            download_url: attributes.url.map(|u| u.path),
        })
    }
}
