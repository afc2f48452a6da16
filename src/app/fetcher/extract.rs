//! In-memory zip extraction
//!
//! Downloaded archives are buffered fully in memory, so extraction reads from
//! a cursor rather than a file. Entry paths are validated with
//! `enclosed_name`; entries that would escape the destination directory are
//! skipped with a warning instead of being written.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::Path;

use zip::ZipArchive;

use crate::errors::ExtractResult;

/// Extract all entries of a zip archive into `dest`
///
/// Returns the number of file entries written. Directory entries are created
/// but not counted.
pub fn extract_archive(data: Vec<u8>, dest: &Path) -> ExtractResult<usize> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut extracted = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let entry_path = match entry.enclosed_name() {
            Some(safe) => dest.join(safe),
            None => {
                tracing::warn!("Skipping archive entry with unsafe path: {}", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&entry_path)?;
            continue;
        }

        if let Some(parent) = entry_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut outfile = File::create(&entry_path)?;
        io::copy(&mut entry, &mut outfile)?;
        extracted += 1;
    }

    tracing::debug!("Extracted {} entr(ies) into {}", extracted, dest.display());
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::tempdir;
    use zip::write::FileOptions;

    fn archive_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_nested_entries() {
        let dir = tempdir().unwrap();
        let data = archive_with(&[
            ("top.txt", b"top"),
            ("inner/data.txt", b"payload"),
        ]);

        let count = extract_archive(data, dir.path()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(dir.path().join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dir.path().join("inner/data.txt")).unwrap(),
            "payload"
        );
    }

    #[test]
    fn test_skips_entries_that_escape_destination() {
        let dir = tempdir().unwrap();
        let data = archive_with(&[("../evil.txt", b"nope"), ("safe.txt", b"ok")]);

        let count = extract_archive(data, dir.path()).unwrap();

        assert_eq!(count, 1);
        assert!(dir.path().join("safe.txt").exists());
        assert!(!dir.path().parent().unwrap().join("evil.txt").exists());
    }

    #[test]
    fn test_directory_entries_are_created() {
        let dir = tempdir().unwrap();

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.add_directory("hollow", FileOptions::default()).unwrap();
        let data = writer.finish().unwrap().into_inner();

        let count = extract_archive(data, dir.path()).unwrap();

        assert_eq!(count, 0);
        assert!(dir.path().join("hollow").is_dir());
    }

    #[test]
    fn test_rejects_non_zip_data() {
        let dir = tempdir().unwrap();
        let result = extract_archive(b"this is not an archive".to_vec(), dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn test_overwrites_existing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("top.txt"), "stale").unwrap();

        let data = archive_with(&[("top.txt", b"fresh")]);
        extract_archive(data, dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("top.txt")).unwrap(), "fresh");
    }
}
