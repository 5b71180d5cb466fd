// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — composing the barcode sheet and reading it back.

pub mod reader;
pub mod writer;

pub use reader::{ImagePlacement, PdfInspector};
pub use writer::BarcodeSheet;
