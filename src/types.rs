use serde::{Deserialize, Serialize};

/// The file formats the export endpoint can produce.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    /// Binary glTF container, the default for downstream tooling.
    Glb,
    Obj,
    Fbx,
}

/// A private struct for serializing the export request body.
#[derive(Serialize, Debug)]
pub(crate) struct ExportRequest {
    pub(crate) format: ExportFormat,
    /// Animation to bake into the export. The service reads this verbatim;
    /// whether animation data ends up in the file depends on the avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) anim: Option<&'static str>,
}

/// Represents the lifecycle state of an export job.
///
/// States the server may add later deserialize to [`ExportState::Other`] and
/// must be treated as still in flight, never as success.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportState {
    /// The export has been accepted but has not started processing.
    Pending,
    /// The export is actively being processed.
    Processing,
    /// The export completed and the file is available for download.
    Ready,
    /// The export failed.
    Error,
    /// Any state this client does not recognize.
    #[serde(other)]
    Other,
}

impl ExportState {
    /// Returns `true` for states from which no further transition occurs.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportState::Ready | ExportState::Error)
    }
}

/// A handle to an export started with
/// [`start_export`](crate::MeshcapadeClient::start_export).
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// The id of the avatar being exported.
    pub asset_id: String,
    /// The requested output format, replayed on every status poll.
    pub format: ExportFormat,
    /// The server-side id of the export resource, when the server reports one.
    pub id: Option<String>,
}

/// One observation of an export job's status.
#[derive(Debug, Clone)]
pub struct ExportStatus {
    /// The server-side id of the export resource.
    pub id: Option<String>,
    /// The state of the job at the time of the poll.
    pub state: ExportState,
    /// The URL of the exported file. Present once the job is `Ready`.
    pub download_url: Option<String>,
}

/// (Internal) The JSON:API envelope wrapping every export response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiDocument<T> {
    pub(crate) data: Resource<T>,
}

/// (Internal) A single JSON:API resource object.
#[derive(Debug, Deserialize)]
pub(crate) struct Resource<T> {
    #[serde(default)]
    pub(crate) id: Option<String>,
    pub(crate) attributes: Option<T>,
}

/// (Internal) The attributes of an export resource.
#[derive(Debug, Deserialize)]
pub(crate) struct ExportAttributes {
    pub(crate) state: ExportState,
    #[serde(default)]
    pub(crate) url: Option<DownloadRef>,
}

/// (Internal) The download reference nested under an export's `url` attribute.
#[derive(Debug, Deserialize)]
pub(crate) struct DownloadRef {
    pub(crate) path: String,
}
