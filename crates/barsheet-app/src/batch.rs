// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The batch pipeline: image directory, document setup, one render per code,
// then a single PDF write. The first error aborts the run.

use std::path::{Path, PathBuf};

use barsheet_core::error::{BarsheetError, Result};
use barsheet_core::{BatchConfig, CodeEntry, Cursor};
use barsheet_document::{BarcodeSheet, PdfInspector, SymbolRaster, encode};
use tracing::{debug, info, instrument, warn};

/// Gap below each barcode reserved for its label when labels are drawn.
const LABEL_GAP: f32 = 20.0;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// JPEG written for each entry, in registry order.
    pub images: Vec<PathBuf>,
    /// Top-left corner of each placed image, in registry order.
    pub placements: Vec<Cursor>,
    /// The PDF file.
    pub output: PathBuf,
}

/// Render every entry of `registry` and write the sheet.
#[instrument(skip_all, fields(entries = registry.len()))]
pub fn run(config: &BatchConfig, registry: &[CodeEntry]) -> Result<BatchReport> {
    std::fs::create_dir_all(&config.image_dir).map_err(|source| BarsheetError::ImageDir {
        path: config.image_dir.clone(),
        source,
    })?;
    debug!(dir = %config.image_dir.display(), "Image directory ready");

    let mut sheet = BarcodeSheet::new(config.paper_size, &config.title);
    sheet.load_font(&config.font_name, &config.font_path)?;
    sheet.set_font(&config.font_name, config.font_size)?;

    let mut cursor = config.origin;
    let mut images = Vec::with_capacity(registry.len());
    let mut placements = Vec::with_capacity(registry.len());

    for entry in registry {
        let placed = cursor;
        cursor = render_code(config, &mut sheet, entry, cursor)?;
        images.push(config.image_path(entry));
        placements.push(placed);
    }

    sheet.write_to_file(&config.output_path)?;

    let (pages, embedded) = summarize_output(&config.output_path).unzip();
    info!(
        pages,
        embedded,
        output = %config.output_path.display(),
        "Batch complete"
    );

    Ok(BatchReport {
        images,
        placements,
        output: config.output_path.clone(),
    })
}

/// Page and image counts of the written PDF, for the completion log. The
/// sheet is already on disk, so a read-back failure is only a warning.
fn summarize_output(path: &Path) -> Option<(usize, usize)> {
    match PdfInspector::open(path) {
        Ok(written) => Some((written.page_count(), written.image_count())),
        Err(err) => {
            warn!(error = %err, "Written PDF could not be read back");
            None
        }
    }
}

/// Encode, rasterise, save and embed one code at `cursor`. Returns the cursor
/// for the next entry.
#[instrument(skip(config, sheet, entry), fields(entry = %entry))]
pub fn render_code(
    config: &BatchConfig,
    sheet: &mut BarcodeSheet,
    entry: &CodeEntry,
    cursor: Cursor,
) -> Result<Cursor> {
    let symbol = encode(entry)?;
    let raster = SymbolRaster::scale(&symbol, config.barcode_width, config.barcode_height)?;

    let path = config.image_path(entry);
    raster
        .save_jpeg(&path, config.jpeg_quality)
        .map_err(|err| BarsheetError::ImageWrite {
            code: entry.code.clone(),
            reason: err.to_string(),
        })?;

    let placed = sheet.place_image(&entry.code, &path, cursor)?;
    info!(path = %path.display(), x = placed.x, y = placed.y, "Barcode placed");

    if config.draw_labels {
        let label_at = placed.advance(config.barcode_height as f32);
        sheet.place_label(&entry.code, label_at)?;
        return Ok(label_at.advance(LABEL_GAP));
    }

    Ok(placed.advance(config.row_spacing()))
}
