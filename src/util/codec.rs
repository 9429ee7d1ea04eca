//! Embedding codec for binary payloads in text scene files.
//!
//! Payloads travel as zlib-compressed, base64-encoded text so they can be
//! inlined into the legacy scene format. Float arrays get a little-endian,
//! count-prefixed frame before compression.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::util::{Error, Result};

/// Encode raw bytes for embedding.
///
/// zlib at best compression, then base64 (standard alphabet), then a
/// trailing newline so the payload terminates a line in the scene file.
pub fn encode(data: &[u8]) -> Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    let mut text = STANDARD.encode(&compressed);
    text.push('\n');
    Ok(text)
}

/// Decode an embedded payload back to raw bytes.
///
/// Whitespace (including the trailing newline and any wrapping) is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let stripped: String = text.split_whitespace().collect();
    let compressed = STANDARD.decode(stripped.as_bytes())?;

    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut data = Vec::new();
    decoder
        .read_to_end(&mut data)
        .map_err(|e| Error::codec(format!("zlib inflate failed: {e}")))?;
    Ok(data)
}

/// Decode an embedded payload that is known to be UTF-8 text.
pub fn decode_str(text: &str) -> Result<String> {
    Ok(String::from_utf8(decode(text)?)?)
}

/// Pack a float array into a count-prefixed little-endian frame.
///
/// Format: `[count: u64 LE][values: f32 LE...]`
pub fn pack_floats(values: &[f32]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(8 + values.len() * 4);
    buf.write_u64::<LittleEndian>(values.len() as u64)?;
    for v in values {
        buf.write_f32::<LittleEndian>(*v)?;
    }
    Ok(buf)
}

/// Unpack a float array from a count-prefixed little-endian frame.
///
/// The header is untrusted input; the length check multiplies with
/// overflow detection so an oversized count fails instead of panicking.
pub fn unpack_floats(data: &[u8]) -> Result<Vec<f32>> {
    let mut cursor = data;
    let count = cursor.read_u64::<LittleEndian>()?;
    if count.checked_mul(4) != Some(cursor.len() as u64) {
        return Err(Error::codec(format!(
            "float frame length mismatch: header says {count} values, {} bytes remain",
            cursor.len()
        )));
    }

    let count = count as usize;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(cursor.read_f32::<LittleEndian>()?);
    }
    Ok(values)
}

/// Embed a float array: packed frame, compressed, base64.
pub fn encode_floats(values: &[f32]) -> Result<String> {
    encode(&pack_floats(values)?)
}

/// Recover a float array embedded with [`encode_floats`].
pub fn decode_floats(text: &str) -> Result<Vec<f32>> {
    unpack_floats(&decode(text)?)
}
