use thiserror::Error;

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Request rejected, timed out or answered with a non-success status.
    #[error("network failure: {0}")]
    Network(String),

    /// Response body is not the expected JSON.
    #[error("decode failure: {0}")]
    Decode(String),

    /// A single telemetry entry has unparseable fields.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("nothing to export")]
    EmptyExport,

    #[error("invalid alert thresholds: {0}")]
    InvalidThresholds(String),

    #[error("invalid department code: {0}")]
    InvalidDepartment(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DashboardError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            DashboardError::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            DashboardError::Decode(err.to_string())
        } else {
            DashboardError::Network(err.to_string())
        }
    }
}

impl DashboardError {
    /// Errors the poll loop absorbs as "no update this tick".
    pub fn is_transient(&self) -> bool {
        matches!(self, DashboardError::Network(_) | DashboardError::Decode(_))
    }
}
