use std::path::PathBuf;

/// Failures raised while loading the two input documents. Everything past
/// loading is infallible: unknown types degrade, missing field classes mean
/// an empty payload.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
