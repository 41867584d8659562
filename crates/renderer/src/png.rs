//! PNG encoding for RGBA image data.
//!
//! Two encoding modes:
//! - **Indexed PNG (color type 3)** when the image has at most 256 unique
//!   colors. Smaller output, one palette index per pixel.
//! - **RGBA PNG (color type 6)** fallback for richer images.
//!
//! A sparse overlay (mostly transparent, a handful of quantized ramp
//! colors) takes the indexed path; a dense continuous surface falls back
//! to RGBA. Use [`encode_png_auto`] for the selection.

use std::collections::HashMap;
use std::io::Write;

/// Maximum palette entries for an indexed PNG (PNG8).
const MAX_PALETTE_SIZE: usize = 256;

/// Encode RGBA pixels with automatic format selection.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: image width in pixels
/// - `height`: image height in pixels
pub fn encode_png_auto(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    match extract_palette(pixels) {
        Some((palette, indices)) => encode_png_indexed(width, height, &palette, &indices),
        None => encode_png_rgba(pixels, width, height),
    }
}

/// Pack RGBA bytes into a u32 key for hashing.
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Build a palette and per-pixel index list, or `None` when the image has
/// more than [`MAX_PALETTE_SIZE`] unique colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<(u8, u8, u8, u8)>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<(u8, u8, u8, u8)> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Encode an indexed PNG (color type 3) from a palette and indices.
pub fn encode_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> Result<Vec<u8>, String> {
    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth (8 bits per palette index)
    ihdr_data.push(3); // color type 3 = indexed
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // PLTE chunk
    let mut plte_data = Vec::with_capacity(palette.len() * 3);
    for (r, g, b, _) in palette {
        plte_data.push(*r);
        plte_data.push(*g);
        plte_data.push(*b);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS chunk, only when some palette entry is not fully opaque
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    // IDAT chunk
    let idat_data = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode an RGBA PNG (color type 6).
pub fn encode_png_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type 6 = RGBA
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk
    let idat_data = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write one PNG chunk: length, type, data, CRC over type+data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each scanline with a filter byte (0 = none) and zlib-compress.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, String> {
    let stride = width * bytes_per_pixel;
    if data.len() < stride * height {
        return Err(format!(
            "pixel buffer too short: {} bytes for {}x{}",
            data.len(),
            width,
            height
        ));
    }

    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for y in 0..height {
        uncompressed.push(0); // filter type: none
        let row_start = y * stride;
        uncompressed.extend_from_slice(&data[row_start..row_start + stride]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .map_err(|e| format!("IDAT compression failed: {e}"))?;
    encoder
        .finish()
        .map_err(|e| format!("IDAT compression failed: {e}"))
}
