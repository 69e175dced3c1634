//! Buffer source loading

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::document::Buffer;
use crate::error::{Error, Result};

/// Load the bytes behind buffer `index`.
///
/// `data:` URIs are decoded in place; any other URI is a path relative to
/// `resource_dir`. When the buffer declares `byteLength`, the source is cut
/// to that length.
///
/// # Errors
/// Returns an error if the buffer has no URI, the data URI is not base64,
/// the file cannot be read, or the source is shorter than `byteLength`.
pub fn load_buffer(index: usize, buffer: &Buffer, resource_dir: &Path) -> Result<Vec<u8>> {
    let uri = buffer
        .uri()
        .ok_or(Error::MissingBufferSource { buffer: index })?;

    let mut data = match uri.strip_prefix("data:") {
        Some(data_uri) => decode_data_uri(index, data_uri)?,
        None => {
            let path = resource_dir.join(uri);
            tracing::debug!("loading buffer {index} from {}", path.display());
            fs::read(&path)?
        }
    };

    if let Some(declared) = buffer.byte_length() {
        let declared_len = usize::try_from(declared).unwrap_or(usize::MAX);
        if data.len() < declared_len {
            return Err(Error::BufferTooShort {
                buffer: index,
                declared,
                actual: data.len(),
            });
        }
        data.truncate(declared_len);
    }

    Ok(data)
}

/// Decode the part of a data URI after `data:`.
fn decode_data_uri(index: usize, data_uri: &str) -> Result<Vec<u8>> {
    let (media, payload) = data_uri
        .split_once(',')
        .ok_or(Error::InvalidDataUri { buffer: index })?;
    if !media.ends_with(";base64") {
        return Err(Error::InvalidDataUri { buffer: index });
    }
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buffer(fields: serde_json::Value) -> Buffer {
        serde_json::from_value(fields).unwrap()
    }

    #[test]
    fn test_data_uri() {
        let buf = buffer(json!({
            "byteLength": 3,
            "uri": "data:application/octet-stream;base64,AQIDBA=="
        }));

        assert_eq!(load_buffer(0, &buf, Path::new(".")).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_file_uri_relative_to_resource_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("geometry.bin"), [9u8, 8, 7, 6]).unwrap();
        let buf = buffer(json!({"uri": "geometry.bin"}));

        assert_eq!(load_buffer(0, &buf, dir.path()).unwrap(), vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_source_errors() {
        let dir = Path::new(".");

        assert!(matches!(
            load_buffer(2, &buffer(json!({"byteLength": 4})), dir),
            Err(Error::MissingBufferSource { buffer: 2 })
        ));
        assert!(matches!(
            load_buffer(0, &buffer(json!({"uri": "data:text/plain,hello"})), dir),
            Err(Error::InvalidDataUri { buffer: 0 })
        ));
        assert!(matches!(
            load_buffer(1, &buffer(json!({"byteLength": 8, "uri": "data:;base64,AQID"})), dir),
            Err(Error::BufferTooShort { buffer: 1, declared: 8, actual: 3 })
        ));
    }
}
