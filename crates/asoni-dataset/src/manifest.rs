use std::fs;
use std::path::Path;

use asoni_types::LabelRecord;

use crate::error::DatasetError;

/// `file_name,text` CSV with a header row
pub fn write_manifest(path: &Path, records: &[LabelRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    // Header written by hand so an empty dataset still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["file_name", "text"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Labels saved to {}", path.display());
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<LabelRecord>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<LabelRecord>, _>>()?;
    Ok(records)
}
