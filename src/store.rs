use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, ResultsError};
use crate::tools::merge::Dataset;

/// Read and validate the results dataset.
///
/// Any problem (missing file, bad JSON, wrong shape) is an input error: nothing
/// downstream runs on a dataset that did not load.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = fs::read_to_string(path).map_err(|e| ResultsError::input(path, e))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| ResultsError::input(path, e))?;
    let dataset = Dataset::from_value(value).map_err(|e| ResultsError::input(path, e))?;
    debug!(path = %path.display(), entries = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Write the whole dataset to a sibling temp file, then rename it over `path`.
pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let tmp = temp_path_for(path);
    let json = serde_json::to_string_pretty(dataset)?;

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(ResultsError::output(path, e));
    }

    debug!(path = %path.display(), entries = dataset.len(), "saved dataset");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
