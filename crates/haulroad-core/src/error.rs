pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] haulroad_layout::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON5 error: {message}")]
    Json5 { message: String },

    #[error("Unsupported file format: {path} (expected .json, .json5, .yaml or .yml)")]
    UnsupportedFormat { path: String },

    #[error("Invalid content catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Invalid link on {node}/{leaf}: {url}: {message}")]
    InvalidLink {
        node: String,
        leaf: String,
        url: String,
        message: String,
    },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },
}

impl From<json5::Error> for Error {
    fn from(value: json5::Error) -> Self {
        Self::Json5 {
            message: value.to_string(),
        }
    }
}
