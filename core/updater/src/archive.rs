//! Zip extraction for the resource bundle

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::UpdateError;

/// Extract a downloaded zip archive into the target directory.
///
/// Existing files are overwritten in place; nothing is deleted first.
/// Entries that would escape the target directory are skipped.
pub async fn extract_zip(archive_path: PathBuf, target_dir: PathBuf) -> Result<(), UpdateError> {
    tokio::task::spawn_blocking(move || extract_zip_blocking(&archive_path, &target_dir))
        .await
        .map_err(|e| UpdateError::Io(io::Error::other(e)))?
}

fn extract_zip_blocking(archive_path: &Path, target_dir: &Path) -> Result<(), UpdateError> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        // enclosed_name rejects absolute paths and parent traversal
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let destination = target_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&destination)?;
            continue;
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut output = fs::File::create(&destination)?;
        io::copy(&mut entry, &mut output)?;
    }

    tracing::debug!("Extracted {:?} into {:?}", archive_path, target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[tokio::test]
    async fn test_extracts_nested_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bundle.zip");
        write_zip(
            &archive,
            &[
                ("Resources/snow.png", "png-bytes"),
                ("Resources/deep/ice.png", "more-bytes"),
                ("readme.txt", "hello"),
            ],
        );

        extract_zip(archive, dir.path().to_path_buf()).await.unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("Resources/snow.png")).unwrap(),
            "png-bytes"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("Resources/deep/ice.png")).unwrap(),
            "more-bytes"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("readme.txt")).unwrap(),
            "hello"
        );
    }

    #[tokio::test]
    async fn test_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "old").unwrap();

        let archive = dir.path().join("bundle.zip");
        write_zip(&archive, &[("readme.txt", "new")]);
        extract_zip(archive, dir.path().to_path_buf()).await.unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("readme.txt")).unwrap(),
            "new"
        );
    }

    #[tokio::test]
    async fn test_skips_traversal_entries() {
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("install");
        fs::create_dir(&target).unwrap();

        let archive = parent.path().join("bundle.zip");
        write_zip(
            &archive,
            &[("../escape.txt", "should not land"), ("safe.txt", "fine")],
        );
        extract_zip(archive, target.clone()).await.unwrap();

        assert!(!parent.path().join("escape.txt").exists());
        assert_eq!(fs::read_to_string(target.join("safe.txt")).unwrap(), "fine");
    }

    #[tokio::test]
    async fn test_invalid_archive_reports_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let result = extract_zip(archive, dir.path().to_path_buf()).await;
        assert!(matches!(result, Err(UpdateError::Archive(_))));
    }
}
