// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Media decoding and encoding.
//!
//! Every input is normalized to a plain RGBA raster: raster files are decoded
//! directly, PDFs contribute only their first page, rasterized at display
//! resolution. The rest of the pipeline never sees a document object.

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use std::path::Path;

use crate::util::scale::{compute_fit_scale, MAX_WIDTH};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A decoded document: the raster backing store and its native dimensions.
pub struct LoadedDocument {
    pub width: u32,
    pub height: u32,
    /// RGBA, row-major, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl LoadedDocument {
    /// Fit factor for this document's native width.
    pub fn fit_scale(&self) -> f64 {
        compute_fit_scale(self.width as f64, MAX_WIDTH)
    }

    /// Display size at zoom 1: native dimensions times the fit factor.
    pub fn display_size(&self) -> (f64, f64) {
        let fit = self.fit_scale();
        (self.width as f64 * fit, self.height as f64 * fit)
    }
}

/// Decode an input file into a raster. PDFs are reduced to their first page;
/// later pages are ignored. Any other extension is decoded as an image.
pub fn load_document(path: &Path) -> Result<LoadedDocument> {
    let is_pdf = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        rasterize_first_page(path)
    } else {
        load_raster(path)
    }
}

fn load_raster(path: &Path) -> Result<LoadedDocument> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    Ok(from_rgba(img.to_rgba8()))
}

/// Render a PDF's first page into a raster no wider than `MAX_WIDTH`.
///
/// The captured raster becomes the document: its pixel space is the logical
/// space markers are stored in, and it is what gets persisted on save.
fn rasterize_first_page(path: &Path) -> Result<LoadedDocument> {
    use pdfium_render::prelude::*;

    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| anyhow!("PDF renderer unavailable: {:?}", e))?;
    let pdfium = Pdfium::new(bindings);

    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = pdfium
        .load_pdf_from_byte_slice(&bytes, None)
        .map_err(|e| anyhow!("failed to parse {}: {:?}", path.display(), e))?;

    let pages = document.pages();
    if pages.len() == 0 {
        bail!("{} has no pages", path.display());
    }
    let page = pages
        .first()
        .map_err(|e| anyhow!("failed to open first page: {:?}", e))?;

    let page_width = f64::from(page.width().value);
    let render_width = (page_width * compute_fit_scale(page_width, MAX_WIDTH)).round() as i32;
    let config = PdfRenderConfig::new().set_target_width(render_width.max(1));
    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| anyhow!("failed to render first page: {:?}", e))?;

    Ok(from_rgba(bitmap.as_image().to_rgba8()))
}

fn from_rgba(rgba: RgbaImage) -> LoadedDocument {
    LoadedDocument {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    }
}

/// Encode a raster as a self-contained PNG data URL for persistence.
pub fn encode_data_url(document: &LoadedDocument) -> Result<String> {
    let rgba = RgbaImage::from_raw(document.width, document.height, document.pixels.clone())
        .ok_or_else(|| anyhow!("raster buffer does not match its dimensions"))?;

    let mut png = Vec::new();
    rgba.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .context("failed to encode PNG")?;

    Ok(format!("{}{}", DATA_URL_PREFIX, BASE64.encode(png)))
}

/// Decode a data URL produced by [`encode_data_url`] back into a raster.
pub fn decode_data_url(data_url: &str) -> Result<LoadedDocument> {
    let encoded = data_url
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .unwrap_or(data_url);
    let bytes = BASE64
        .decode(encoded.trim())
        .context("stored image is not valid base64")?;
    let img = image::load_from_memory(&bytes).context("failed to decode stored image")?;
    Ok(from_rgba(img.to_rgba8()))
}
