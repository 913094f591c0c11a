use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid UTF-8 input{}: {source}", describe_path(.path))]
    InvalidEncoding {
        path: Option<PathBuf>,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::InvalidEncoding {
            path: None,
            source: value,
        }
    }
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" in `{}`", path.display()))
        .unwrap_or_default()
}
