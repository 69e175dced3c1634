//! GLB container writer

use std::path::Path;

use serde_json::{Map, Value};

use super::Packager;
use super::sources::load_buffer;
use crate::document::{Buffer, Index, IndexedDocument};
use crate::error::{Error, Result};

/// Conventional extension of binary glTF files.
pub const GLB_EXTENSION: &str = "glb";

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"
const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Packages documents as binary glTF with every buffer merged into the
/// embedded BIN chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlbPackager;

impl Packager for GlbPackager {
    fn extension(&self) -> &'static str {
        GLB_EXTENSION
    }

    fn package(&self, document: &IndexedDocument, resource_dir: &Path) -> Result<Vec<u8>> {
        let (packed, bin) = merge_buffers(document, resource_dir)?;
        let json = packed.to_json_vec()?;
        write_glb(&json, &bin)
    }
}

/// Load every buffer and concatenate them into one binary blob, each
/// starting on a 4-byte boundary.
///
/// Returns a copy of `document` whose bufferViews all point at buffer `0`
/// with offsets shifted into the merged blob, and whose `buffers` is the
/// single merged entry (empty if the merged blob is empty).
///
/// # Errors
/// Returns an error if a buffer cannot be loaded, a bufferView points at
/// a buffer that does not exist, or a shifted offset overflows.
pub fn merge_buffers(
    document: &IndexedDocument,
    resource_dir: &Path,
) -> Result<(IndexedDocument, Vec<u8>)> {
    let mut bin = Vec::new();
    let mut offsets = Vec::with_capacity(document.buffers.len());

    for (index, buffer) in document.buffers.iter().enumerate() {
        let data = load_buffer(index, buffer, resource_dir)?;
        pad_to_four(&mut bin, 0);
        offsets.push(bin.len() as u64);
        bin.extend_from_slice(&data);
    }

    let mut packed = document.clone();
    for (view_index, view) in packed.buffer_views.iter_mut().enumerate() {
        let base = view
            .buffer
            .get()
            .and_then(|buffer| offsets.get(buffer))
            .copied()
            .ok_or(Error::UnresolvedBufferIndex {
                view: view_index,
                buffer: view.buffer.raw(),
            })?;

        view.buffer = Index::new(0);
        view.byte_offset = match (view.byte_offset, base) {
            (None, 0) => None,
            (offset, base) => Some(
                offset
                    .unwrap_or(0)
                    .checked_add(base)
                    .ok_or(Error::ByteOffsetOverflow { view: view_index })?,
            ),
        };
    }

    // A buffer entry needs byteLength >= 1.
    packed.buffers = if bin.is_empty() {
        Vec::new()
    } else {
        let mut fields = Map::new();
        fields.insert("byteLength".to_string(), Value::from(bin.len() as u64));
        vec![Buffer { fields }]
    };

    tracing::debug!(
        "merged {} buffers into {} bytes",
        document.buffers.len(),
        bin.len()
    );
    Ok((packed, bin))
}

/// Assemble a GLB container from JSON and binary chunk contents.
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros; an
/// empty `bin` omits the BIN chunk.
///
/// # Errors
/// Returns [`Error::GlbTooLarge`] if the container length does not fit in
/// 32 bits.
pub fn write_glb(json: &[u8], bin: &[u8]) -> Result<Vec<u8>> {
    let json_chunk_len = json.len().next_multiple_of(4);
    let bin_chunk_len = bin.len().next_multiple_of(4);

    let mut total_len = HEADER_LEN + CHUNK_HEADER_LEN + json_chunk_len;
    if !bin.is_empty() {
        total_len += CHUNK_HEADER_LEN + bin_chunk_len;
    }
    let total_len_u32 = u32::try_from(total_len).map_err(|_| Error::GlbTooLarge(total_len))?;

    let mut output = Vec::with_capacity(total_len);

    // GLB header
    output.extend_from_slice(GLB_MAGIC);
    output.extend_from_slice(&GLB_VERSION.to_le_bytes());
    output.extend_from_slice(&total_len_u32.to_le_bytes());

    // JSON chunk
    output.extend_from_slice(&(json_chunk_len as u32).to_le_bytes());
    output.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    output.extend_from_slice(json);
    pad_to_four(&mut output, b' ');

    // Binary chunk
    if !bin.is_empty() {
        output.extend_from_slice(&(bin_chunk_len as u32).to_le_bytes());
        output.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        output.extend_from_slice(bin);
        pad_to_four(&mut output, 0);
    }

    Ok(output)
}

fn pad_to_four(bytes: &mut Vec<u8>, fill: u8) {
    let padded = bytes.len().next_multiple_of(4);
    bytes.resize(padded, fill);
}
