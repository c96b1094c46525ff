//! Package extraction from CRX and ZIP payloads

use crate::error::{ExtensionError, Result};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

const CRX_MAGIC: &[u8] = b"Cr24";

fn invalid_archive() -> ExtensionError {
    ExtensionError::Fetch("invalid package archive".to_string())
}

fn read_u32_le(bytes: &[u8], at: usize) -> Option<usize> {
    let field: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    usize::try_from(u32::from_le_bytes(field)).ok()
}

/// Offset of the ZIP payload inside a package.
///
/// CRX2: magic, version, public key length, signature length, then both
/// blobs. CRX3: magic, version, header length, then the header. Anything
/// without the magic is assumed to be a bare ZIP.
pub fn payload_offset(bytes: &[u8]) -> Result<usize> {
    if !bytes.starts_with(CRX_MAGIC) {
        return Ok(0);
    }

    let offset = match read_u32_le(bytes, 4) {
        Some(2) => {
            let key_len = read_u32_le(bytes, 8).ok_or_else(invalid_archive)?;
            let sig_len = read_u32_le(bytes, 12).ok_or_else(invalid_archive)?;
            16usize.checked_add(key_len).and_then(|n| n.checked_add(sig_len))
        }
        Some(3) => {
            let header_len = read_u32_le(bytes, 8).ok_or_else(invalid_archive)?;
            12usize.checked_add(header_len)
        }
        _ => None,
    };

    offset
        .filter(|&offset| offset <= bytes.len())
        .ok_or_else(invalid_archive)
}

/// Extract every entry of a CRX or ZIP package into `destination`,
/// creating the directory if needed.
pub fn unpack(bytes: &[u8], destination: &Path) -> Result<()> {
    let offset = payload_offset(bytes)?;
    let payload = bytes.get(offset..).ok_or_else(invalid_archive)?;

    let mut archive = ZipArchive::new(Cursor::new(payload)).map_err(|e| {
        debug!(error = %e, "package is not a readable archive");
        invalid_archive()
    })?;

    fs::create_dir_all(destination).map_err(|e| ExtensionError::io(destination, e))?;

    // Checksum and inflate failures surface as `ZipError::Io` too
    archive.extract(destination).map_err(|e: ZipError| {
        debug!(error = %e, destination = %destination.display(), "extraction failed");
        invalid_archive()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::{FileOptions, ZipWriter};

    fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn crx3(payload: &[u8]) -> Vec<u8> {
        let header = [7u8; 10];
        let mut bytes = b"Cr24".to_vec();
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&(header.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_payload_offset_plain_zip() {
        assert_eq!(payload_offset(b"PK\x03\x04rest").unwrap(), 0);
    }

    #[test]
    fn test_payload_offset_crx2() {
        let mut bytes = b"Cr24".to_vec();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&5u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 8]);
        bytes.extend_from_slice(b"PK");
        assert_eq!(payload_offset(&bytes).unwrap(), 24);
    }

    #[test]
    fn test_payload_offset_truncated_header() {
        let mut bytes = b"Cr24".to_vec();
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(payload_offset(&bytes), Err(ExtensionError::Fetch(_))));

        assert!(payload_offset(b"Cr24\x09\x00\x00\x00").is_err());
    }

    #[test]
    fn test_unpack_crx3_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("extensions").join("demo");

        let package = crx3(&zip_bytes(&[
            ("manifest.json", r#"{"manifest_version": 3, "name": "Demo", "version": "1"}"#),
            ("js/background.js", "console.log('bg');"),
        ]));
        unpack(&package, &destination).unwrap();

        assert!(destination.join("manifest.json").is_file());
        assert_eq!(
            fs::read_to_string(destination.join("js/background.js")).unwrap(),
            "console.log('bg');"
        );
    }

    #[test]
    fn test_unpack_rejects_non_archive() {
        let temp_dir = TempDir::new().unwrap();
        let result = unpack(b"<html>not found</html>", &temp_dir.path().join("x"));
        match result {
            Err(ExtensionError::Fetch(message)) => assert_eq!(message, "invalid package archive"),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn test_unpack_rejects_corrupted_entry_data() {
        let temp_dir = TempDir::new().unwrap();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("a.js", options).unwrap();
        zip.write_all(b"console.log('intact');").unwrap();
        let mut bytes = zip.finish().unwrap().into_inner();

        // first data byte: 30-byte local header plus the 4-byte name
        bytes[34] ^= 0xff;

        match unpack(&bytes, &temp_dir.path().join("x")) {
            Err(ExtensionError::Fetch(message)) => assert_eq!(message, "invalid package archive"),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
