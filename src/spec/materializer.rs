//! Turns a base64-encoded spec archive into a spec file on disk.
//!
//! The archive must hold exactly one file entry. The extracted file lives in
//! a scoped temporary directory owned by [`MaterializedSpec`] and is removed
//! when that value is dropped.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::core::{Error, Result};

/// File name used when the archive entry has no usable name
const FALLBACK_SPEC_NAME: &str = "spec";

/// An extracted OpenAPI spec backed by a temporary directory
#[derive(Debug)]
pub struct MaterializedSpec {
    // Held for its Drop: removes the extracted spec.
    _dir: TempDir,
    path: PathBuf,
}

impl MaterializedSpec {
    /// Absolute path to the extracted spec file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode `encoded`, unzip its single entry and return the extracted spec.
pub fn materialize(encoded: &str) -> Result<MaterializedSpec> {
    let bytes = STANDARD.decode(encoded.trim())?;
    debug!(bytes = bytes.len(), "Decoded spec archive");

    // The decoded archive only needs to live until its entry is extracted
    let mut archive_file = NamedTempFile::new()?;
    archive_file.write_all(&bytes)?;
    archive_file.flush()?;

    let mut archive = ZipArchive::new(archive_file.reopen()?)?;
    let index = single_file_entry(&mut archive)?;
    let mut entry = archive.by_index(index)?;

    let file_name = entry
        .enclosed_name()
        .and_then(|p| p.file_name().map(|n| n.to_os_string()))
        .unwrap_or_else(|| OsString::from(FALLBACK_SPEC_NAME));

    let dir = tempfile::Builder::new()
        .prefix("openworld-spec-")
        .tempdir()?;
    let path = dir.path().join(&file_name);

    let mut out = File::create(&path)?;
    let copied = io::copy(&mut entry, &mut out)?;
    out.flush()?;

    let path = path.canonicalize().unwrap_or(path);
    info!(
        entry = %entry.name(),
        bytes = copied,
        path = %path.display(),
        "Materialized spec file"
    );

    Ok(MaterializedSpec { _dir: dir, path })
}

/// Index of the only file entry, ignoring directory entries.
fn single_file_entry<R: io::Read + io::Seek>(archive: &mut ZipArchive<R>) -> Result<usize> {
    let mut files = Vec::new();
    for i in 0..archive.len() {
        if !archive.by_index(i)?.is_dir() {
            files.push(i);
        }
    }

    match files.as_slice() {
        [] => Err(Error::EmptyArchive),
        [index] => Ok(*index),
        many => Err(Error::MultipleEntries { count: many.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;

    const SPEC: &str = "openapi: 3.0.0\ninfo:\n  title: Rapid\n  version: 1.0.0\npaths: {}\n";

    fn encode_zip(entries: &[(&str, &[u8])]) -> String {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            let options = SimpleFileOptions::default();
            for (name, content) in entries {
                if name.ends_with('/') {
                    zip.add_directory(*name, options).unwrap();
                } else {
                    zip.start_file(*name, options).unwrap();
                    zip.write_all(content).unwrap();
                }
            }
            zip.finish().unwrap();
        }
        STANDARD.encode(buffer.into_inner())
    }

    #[test]
    fn test_materialize_single_entry() {
        let encoded = encode_zip(&[("rapid.yaml", SPEC.as_bytes())]);

        let spec = materialize(&encoded).unwrap();

        assert!(spec.path().is_absolute());
        assert_eq!(spec.path().file_name().unwrap(), "rapid.yaml");
        assert_eq!(std::fs::read_to_string(spec.path()).unwrap(), SPEC);
    }

    #[test]
    fn test_materialize_large_entry_is_copied_intact() {
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let encoded = encode_zip(&[("big.json", &content)]);

        let spec = materialize(&encoded).unwrap();

        assert_eq!(std::fs::read(spec.path()).unwrap(), content);
    }

    #[test]
    fn test_materialize_keeps_only_file_name_of_nested_entry() {
        let encoded = encode_zip(&[("specs/", b""), ("specs/lodging.yaml", SPEC.as_bytes())]);

        let spec = materialize(&encoded).unwrap();

        assert_eq!(spec.path().file_name().unwrap(), "lodging.yaml");
        assert_eq!(std::fs::read_to_string(spec.path()).unwrap(), SPEC);
    }

    #[test]
    fn test_materialize_tolerates_surrounding_whitespace() {
        let encoded = format!("  {}\n", encode_zip(&[("spec.yaml", SPEC.as_bytes())]));
        assert!(materialize(&encoded).is_ok());
    }

    #[test]
    fn test_materialize_removes_file_on_drop() {
        let encoded = encode_zip(&[("spec.yaml", SPEC.as_bytes())]);
        let spec = materialize(&encoded).unwrap();
        let path = spec.path().to_path_buf();
        assert!(path.exists());

        drop(spec);

        assert!(!path.exists());
    }

    #[test]
    fn test_materialize_empty_archive_fails() {
        let encoded = encode_zip(&[]);
        let err = materialize(&encoded).unwrap_err();
        assert!(matches!(err, Error::EmptyArchive), "got {err:?}");
    }

    #[test]
    fn test_materialize_directory_only_archive_fails() {
        let encoded = encode_zip(&[("specs/", b"")]);
        let err = materialize(&encoded).unwrap_err();
        assert!(matches!(err, Error::EmptyArchive), "got {err:?}");
    }

    #[test]
    fn test_materialize_multiple_entries_fails() {
        let encoded = encode_zip(&[("a.yaml", b"a"), ("b.yaml", b"b")]);
        let err = materialize(&encoded).unwrap_err();
        assert!(matches!(err, Error::MultipleEntries { count: 2 }), "got {err:?}");
    }

    #[test]
    fn test_materialize_invalid_base64_fails() {
        let err = materialize("this is not base64!").unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_materialize_non_zip_payload_fails() {
        let encoded = STANDARD.encode(b"plain text, not an archive");
        let err = materialize(&encoded).unwrap_err();
        assert!(matches!(err, Error::Archive(_)), "got {err:?}");
    }
}
