// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// barsheet-document — Barcode and document processing for Barsheet.
//
// Provides barcode encoding (EAN-8, Code 128), rasterisation of encoded symbols
// to fixed-size JPEG images, and single-page PDF composition and inspection.

pub mod barcode;
pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `barsheet_document::BarcodeSheet` etc.
pub use barcode::{BarcodeSymbol, encode};
pub use image::raster::SymbolRaster;
pub use pdf::reader::{ImagePlacement, PdfInspector};
pub use pdf::writer::BarcodeSheet;
