use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use asoni_types::LabelRecord;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::error::DatasetError;

const IMAGES_DIR: &str = "images";
const MANIFEST_NAME: &str = "labels.csv";

/// Zip the manifest and every image it lists. Returns the number of images packed.
///
/// PNGs are stored as-is, the manifest is deflated.
pub fn package_dataset(
    images_dir: &Path,
    manifest: &Path,
    records: &[LabelRecord],
    zip_path: &Path,
) -> Result<usize, DatasetError> {
    let io_error = |path: &Path, source: io::Error| DatasetError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = zip_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let file = File::create(zip_path).map_err(|e| io_error(zip_path, e))?;
    let mut zip = zip::ZipWriter::new(file);

    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(MANIFEST_NAME, deflated)?;
    let manifest_bytes = fs::read(manifest).map_err(|e| io_error(manifest, e))?;
    zip.write_all(&manifest_bytes)
        .map_err(|e| io_error(zip_path, e))?;

    for record in records {
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let path = images_dir.join(&record.file_name);
        let image = File::open(&path).map_err(|e| io_error(&path, e))?;
        zip.start_file(format!("{}/{}", IMAGES_DIR, record.file_name), stored)?;
        io::copy(&mut BufReader::new(image), &mut zip).map_err(|e| io_error(&path, e))?;
    }

    zip.finish()?;
    tracing::info!("Packaged {} images into {}", records.len(), zip_path.display());

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::write_manifest;
    use std::io::Read;

    #[test]
    fn test_package_contains_manifest_and_images() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("raw");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("a_0.png"), b"png-bytes").unwrap();

        let records = vec![LabelRecord {
            file_name: "a_0.png".to_string(),
            text: "ენა".to_string(),
        }];
        let manifest = dir.path().join("labels.csv");
        write_manifest(&manifest, &records).unwrap();

        let zip_path = dir.path().join("out").join("dataset.zip");
        assert_eq!(package_dataset(&images, &manifest, &records, &zip_path).unwrap(), 1);

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut labels = String::new();
        archive
            .by_name("labels.csv")
            .unwrap()
            .read_to_string(&mut labels)
            .unwrap();
        assert!(labels.contains("a_0.png,ენა"));

        let mut image = Vec::new();
        archive
            .by_name("images/a_0.png")
            .unwrap()
            .read_to_end(&mut image)
            .unwrap();
        assert_eq!(image, b"png-bytes");
    }

    #[test]
    fn test_missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("labels.csv");
        let records = vec![LabelRecord {
            file_name: "gone.png".to_string(),
            text: "x".to_string(),
        }];
        write_manifest(&manifest, &records).unwrap();

        let result = package_dataset(dir.path(), &manifest, &records, &dir.path().join("d.zip"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
