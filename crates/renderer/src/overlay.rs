//! Heat overlay assembly.

use crate::colormap::pressure_color;
use crate::error::RenderError;
use crate::png::encode_png_auto;
use crate::surface::Raster;
use base64::Engine;
use scout_common::BoundingBox;

/// A color-mapped transparent PNG aligned to geographic bounds.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub png: Vec<u8>,
    pub bounds: BoundingBox,
}

impl Overlay {
    /// Inline `data:` URI for embedding in the map document.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Render a raster into a PNG overlay.
///
/// Defined cells go through the pressure ramp with `opacity` baked into
/// the alpha channel; no-data cells stay fully transparent, so convex-hull
/// gaps read as holes over the base map. Raster rows run south-first while
/// PNG scanlines run north-first, so rows are flipped here and the image
/// drops onto its bounds without any resampling.
pub fn render_overlay(raster: &Raster, opacity: f64) -> Result<Overlay, RenderError> {
    let width = raster.width();
    let height = raster.height();
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;

    let mut pixels = vec![0u8; width * height * 4];
    for row in 0..height {
        let flipped = height - 1 - row;
        for col in 0..width {
            let value = raster.get(col, row);
            if value.is_nan() {
                continue; // stays (0, 0, 0, 0)
            }
            let color = pressure_color(value as f64);
            let idx = (flipped * width + col) * 4;
            pixels[idx] = color.r;
            pixels[idx + 1] = color.g;
            pixels[idx + 2] = color.b;
            pixels[idx + 3] = alpha;
        }
    }

    let png = encode_png_auto(&pixels, width, height).map_err(RenderError::PngEncode)?;

    tracing::debug!(
        "overlay {}x{}: {} defined cell(s), {} byte PNG",
        width,
        height,
        raster.defined_cells(),
        png.len()
    );

    Ok(Overlay {
        png,
        bounds: raster.bbox(),
    })
}
