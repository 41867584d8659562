//! Tests for heat overlay assembly.
//!
//! Most assertions work at the PNG chunk level: signature, IHDR fields,
//! PLTE and tRNS contents. The row-order test inflates the IDAT to check
//! which way is up.

use std::io::Read;

use flate2::read::ZlibDecoder;
use renderer::overlay::render_overlay;
use renderer::surface::{rasterize_slice, Raster};
use scout_common::BoundingBox;
use test_utils::scatter_grid;

// ============================================================================
// Helper functions
// ============================================================================

/// A fully-defined raster: one station on each corner of the bbox.
fn full_raster(width: usize, height: usize, value_fn: impl Fn(usize, usize) -> f64) -> Raster {
    let observations = scatter_grid(3.40, -76.60, 2, 2, 0.10, value_fn);
    let bbox = BoundingBox::new(-76.60, 3.40, -76.50, 3.50);
    rasterize_slice(&observations, bbox, width, height)
}

/// Byte offset of the first chunk with the given type, or None.
fn find_chunk(png: &[u8], name: &[u8; 4]) -> Option<usize> {
    png.windows(4).position(|w| w == name)
}

/// Big-endian u32 at the given offset.
fn be_u32(png: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([png[at], png[at + 1], png[at + 2], png[at + 3]])
}

/// tRNS chunk payload (per-palette-entry alpha values).
fn trns_entries(png: &[u8]) -> Vec<u8> {
    let at = find_chunk(png, b"tRNS").expect("indexed overlay should carry tRNS");
    let len = be_u32(png, at - 4) as usize;
    png[at + 4..at + 4 + len].to_vec()
}

/// Inflated scanline stream (filter byte, then one palette index per
/// column, row by row) from the overlay's single IDAT chunk.
fn inflate_idat(png: &[u8]) -> Vec<u8> {
    let at = find_chunk(png, b"IDAT").expect("PNG should carry an IDAT chunk");
    let len = be_u32(png, at - 4) as usize;
    let mut scanlines = Vec::new();
    ZlibDecoder::new(&png[at + 4..at + 4 + len])
        .read_to_end(&mut scanlines)
        .expect("IDAT should inflate");
    scanlines
}

/// RGB of the given palette entry.
fn plte_rgb(png: &[u8], entry: u8) -> [u8; 3] {
    let at = find_chunk(png, b"PLTE").expect("indexed overlay should carry PLTE");
    let base = at + 4 + entry as usize * 3;
    [png[base], png[base + 1], png[base + 2]]
}

// ============================================================================
// render_overlay tests
// ============================================================================

#[test]
fn test_overlay_is_valid_png_with_raster_dims() {
    let raster = full_raster(16, 12, |_, _| 5.0);
    let overlay = render_overlay(&raster, 0.6).unwrap();

    assert_eq!(&overlay.png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let ihdr = find_chunk(&overlay.png, b"IHDR").unwrap();
    assert_eq!(be_u32(&overlay.png, ihdr + 4), 16);
    assert_eq!(be_u32(&overlay.png, ihdr + 8), 12);
}

#[test]
fn test_constant_surface_packs_into_palette() {
    let overlay = render_overlay(&full_raster(16, 16, |_, _| 5.0), 0.6).unwrap();

    let ihdr = find_chunk(&overlay.png, b"IHDR").unwrap();
    // color type byte: 3 = indexed
    assert_eq!(overlay.png[ihdr + 13], 3);
    assert!(find_chunk(&overlay.png, b"PLTE").is_some());
}

#[test]
fn test_opacity_baked_into_palette_alpha() {
    let overlay = render_overlay(&full_raster(8, 8, |_, _| 5.0), 0.6).unwrap();
    // 0.6 * 255 rounds to 153
    assert!(trns_entries(&overlay.png).contains(&153));
}

#[test]
fn test_nodata_cells_stay_transparent() {
    // Stations only along the south edge of a taller bbox: the hull leaves
    // the northern raster rows undefined.
    let observations = scatter_grid(3.40, -76.60, 3, 2, 0.02, |_, _| 5.0);
    let bbox = BoundingBox::new(-76.60, 3.40, -76.56, 3.50);
    let raster = rasterize_slice(&observations, bbox, 16, 16);
    assert!(raster.defined_cells() > 0);
    assert!(raster.defined_cells() < 16 * 16);

    let overlay = render_overlay(&raster, 0.6).unwrap();
    let entries = trns_entries(&overlay.png);
    assert!(
        entries.contains(&0),
        "no-data cells need a fully transparent palette entry"
    );
    assert!(entries.contains(&153));
}

#[test]
fn test_smooth_ramp_falls_back_to_rgba() {
    // A sloped plane across a 96x96 raster runs through far more than 256
    // ramp colors, so auto selection must pick the RGBA encoder.
    let overlay = render_overlay(
        &full_raster(96, 96, |col, row| col as f64 * 3.5 + row as f64 * 1.5),
        0.6,
    )
    .unwrap();

    let ihdr = find_chunk(&overlay.png, b"IHDR").unwrap();
    // color type byte: 6 = RGBA
    assert_eq!(overlay.png[ihdr + 13], 6);
}

#[test]
fn test_out_of_range_opacity_is_clamped() {
    let raster = full_raster(8, 8, |_, _| 3.0);

    let opaque = render_overlay(&raster, 2.5).unwrap();
    // Fully opaque palette needs no tRNS at all
    assert!(find_chunk(&opaque.png, b"tRNS").is_none());

    let invisible = render_overlay(&raster, -1.0).unwrap();
    assert!(trns_entries(&invisible.png).contains(&0));
}

#[test]
fn test_data_uri_prefix() {
    let overlay = render_overlay(&full_raster(4, 4, |_, _| 2.0), 0.6).unwrap();
    let uri = overlay.data_uri();
    // base64 of the PNG signature always starts with iVBOR
    assert!(uri.starts_with("data:image/png;base64,iVBOR"));
}

#[test]
fn test_bounds_follow_raster() {
    let overlay = render_overlay(&full_raster(8, 8, |_, _| 3.0), 0.6).unwrap();
    assert_eq!(
        overlay.bounds.leaflet_bounds(),
        [[3.40, -76.60], [3.50, -76.50]]
    );
}

#[test]
fn test_north_rows_land_on_top_scanlines() {
    // South stations sit below the ramp floor and north stations above its
    // ceiling, so the edge rows keep the clamped end colors no matter how
    // the interpolation rounds. Raster row 0 is the south row; the encoder
    // must flip it to the bottom of the image.
    let raster = full_raster(8, 8, |_, row| row as f64 * 20.0 - 5.0);
    assert_eq!(raster.defined_cells(), 8 * 8);

    let overlay = render_overlay(&raster, 0.6).unwrap();
    let scanlines = inflate_idat(&overlay.png);
    let stride = 1 + 8; // filter byte, then one index per column
    assert_eq!(scanlines.len(), 8 * stride);
    assert_eq!(scanlines[0], 0, "rows should use filter type none");

    let top = plte_rgb(&overlay.png, scanlines[1]);
    let bottom = plte_rgb(&overlay.png, scanlines[7 * stride + 1]);
    assert_eq!(top, [255, 0, 0], "north row should be the top scanline");
    assert_eq!(bottom, [0, 0, 255], "south row should be the bottom scanline");
}
