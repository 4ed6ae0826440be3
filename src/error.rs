use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum MeshcapadeError {
    #[error("API token is missing. Please provide it or set the MESHCAPADE_API_TOKEN environment variable.")]
    MissingApiToken,
    #[error("Asset id must not be empty")]
    EmptyAssetId,
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API request failed with status {status}: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("Export response came back empty")]
    EmptyExportResponse,
    #[error("Export of avatar `{asset_id}` finished in the ERROR state")]
    ExportFailed { asset_id: String },
    #[error("Export did not reach a terminal state within {}s", waited.as_secs())]
    Timeout { waited: Duration },
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
