use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Malformed reference '{name}': {reason}")]
    MalformedReference { name: String, reason: String },

    #[error("Panel file is not a JSON object of reference entries")]
    InvalidPanelFormat,

    #[error("No usable reference entries in panel")]
    EmptyPanel,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
