use std::fs;
use std::path::Path;

use super::{Report, SourceError};

/// Load reports from a JSON array previously written by [`save_reports`]
/// or captured from the reporting service.
pub fn load_reports<P: AsRef<Path>>(path: P) -> Result<Vec<Report>, SourceError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SourceError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let reports: Vec<Report> =
        serde_json::from_slice(&bytes).map_err(|source| SourceError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), reports = reports.len(), "loaded reports from file");
    Ok(reports)
}

/// Write reports as a pretty-printed JSON array.
pub fn save_reports<P: AsRef<Path>>(path: P, reports: &[Report]) -> Result<(), SourceError> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(reports).map_err(SourceError::Encode)?;
    fs::write(path, json).map_err(|source| SourceError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), reports = reports.len(), "saved reports to file");
    Ok(())
}
