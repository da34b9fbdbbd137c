//! Error types for report rendering

use thiserror::Error;

/// Errors while writing a rendered report to its sink
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write report output")]
    WriteFailure(#[source] std::io::Error),

    #[error("failed to encode CSV report")]
    Csv(#[source] csv::Error),
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::WriteFailure(err)
    }
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return RenderError::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => RenderError::WriteFailure(io),
            other => RenderError::WriteFailure(std::io::Error::other(format!("{other:?}"))),
        }
    }
}
