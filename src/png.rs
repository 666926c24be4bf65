//! Minimal PNG encoder.
//!
//! Serializes a finished [`Canvas`] into a standards-compliant PNG byte
//! stream: 8-bit truecolor (color type 2), filter type 0 on every scanline,
//! non-interlaced, one IDAT chunk. Pixel data goes through a zlib-framed
//! deflate stream at maximum effort; no imaging library is involved, so the
//! chunk layout here is the binding contract with any decoder.

use std::path::Path;

use miniz_oxide::deflate::{CompressionLevel, compress_to_vec_zlib};

use crate::{
    canvas::Canvas,
    error::{RasterfigError, RasterfigResult},
};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_TRUECOLOR: u8 = 2;
const FILTER_NONE: u8 = 0;

/// Encodes the canvas as a complete PNG byte stream.
pub fn encode(canvas: &Canvas) -> Vec<u8> {
    // Raw image stream: every scanline prefixed with the filter-type byte,
    // rows concatenated top to bottom.
    let stride = 1 + canvas.width() as usize * 3;
    let mut raw = Vec::with_capacity(stride * canvas.height() as usize);
    for y in 0..canvas.height() {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(canvas.row(y));
    }

    let compressed = compress_to_vec_zlib(&raw, CompressionLevel::UberCompression as u8);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&canvas.width().to_be_bytes());
    ihdr.extend_from_slice(&canvas.height().to_be_bytes());
    ihdr.push(BIT_DEPTH);
    ihdr.push(COLOR_TYPE_TRUECOLOR);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&PNG_SIGNATURE);
    push_chunk(&mut out, b"IHDR", &ihdr);
    push_chunk(&mut out, b"IDAT", &compressed);
    push_chunk(&mut out, b"IEND", &[]);
    out
}

/// Encodes the canvas and writes it to `path`, creating the parent
/// directory if needed. A sink failure is surfaced directly; no retry, no
/// partial-write recovery.
#[tracing::instrument(skip(canvas), fields(width = canvas.width(), height = canvas.height()))]
pub fn write_png(path: &Path, canvas: &Canvas) -> RasterfigResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            RasterfigError::encode(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let bytes = encode(canvas);
    std::fs::write(path, &bytes).map_err(|e| {
        RasterfigError::encode(format!("failed to write png '{}': {e}", path.display()))
    })?;
    Ok(())
}

/// Serializes one chunk: payload length (u32 BE), 4-byte type tag, payload,
/// CRC-32 (u32 BE) over tag + payload.
fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc32(tag, payload).to_be_bytes());
}

// CRC-32, reflected polynomial 0xEDB88320, as PNG requires.
fn crc32(tag: &[u8; 4], payload: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in tag.iter().chain(payload) {
        crc ^= u32::from(b);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
