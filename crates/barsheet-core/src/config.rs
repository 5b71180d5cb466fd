// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch configuration. All values are compile-time defaults; nothing is read
// from the environment or the command line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{CodeEntry, Cursor, PaperSize};

/// Settings for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory receiving the intermediate barcode JPEGs.
    pub image_dir: PathBuf,
    /// Path of the finished PDF.
    pub output_path: PathBuf,
    /// TrueType font embedded in the document.
    pub font_path: PathBuf,
    /// Name the font is registered under.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f32,
    /// Paper size of the single page.
    pub paper_size: PaperSize,
    /// Raster width of each barcode in pixels.
    pub barcode_width: u32,
    /// Raster height of each barcode in pixels.
    pub barcode_height: u32,
    /// How far each row overlaps the previous one, in points.
    pub row_overlap: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Top-left position of the first barcode.
    pub origin: Cursor,
    /// Draw the code as text under each barcode.
    pub draw_labels: bool,
    /// Title stored in the PDF metadata.
    pub title: String,
}

impl BatchConfig {
    /// Vertical distance between consecutive barcodes.
    pub fn row_spacing(&self) -> f32 {
        self.barcode_height.saturating_sub(self.row_overlap) as f32
    }

    /// Where the JPEG for `entry` is written.
    pub fn image_path(&self, entry: &CodeEntry) -> PathBuf {
        self.image_dir.join(entry.image_file_name())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("images"),
            output_path: PathBuf::from("test.pdf"),
            font_path: PathBuf::from("fonts/DejaVuSans.ttf"),
            font_name: "dejavu".into(),
            font_size: 14.0,
            paper_size: PaperSize::A4,
            barcode_width: 500,
            barcode_height: 200,
            row_overlap: 50,
            jpeg_quality: 100,
            origin: Cursor::ORIGIN,
            draw_labels: false,
            title: "Barcode sheet".into(),
        }
    }
}
