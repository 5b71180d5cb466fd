// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Barsheet.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Symbology;

/// Top-level error type for all Barsheet operations.
#[derive(Debug, Error)]
pub enum BarsheetError {
    // -- Environment errors --
    #[error("failed to create image directory {}: {source}", path.display())]
    ImageDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("font file {} could not be read: {source}", path.display())]
    FontMissing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("font file {} is not a usable TrueType font", path.display())]
    FontInvalid { path: PathBuf },

    #[error("failed to select font: {0}")]
    FontSelect(String),

    // -- Encoding errors --
    #[error("cannot encode {code:?} as {symbology}: {reason}")]
    Encoding {
        code: String,
        symbology: Symbology,
        reason: String,
    },

    // -- Codec errors --
    #[error("cannot scale barcode {code:?}: {reason}")]
    Scale { code: String, reason: String },

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("failed to write barcode image for {code:?}: {reason}")]
    ImageWrite { code: String, reason: String },

    // -- Embedding errors --
    #[error("failed to embed barcode {code:?} into the PDF: {reason}")]
    Embed { code: String, reason: String },

    // -- Serialization errors --
    #[error("failed to write PDF to {}: {source}", path.display())]
    PdfWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BarsheetError {
    /// The product code the error relates to, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Encoding { code, .. }
            | Self::Scale { code, .. }
            | Self::ImageWrite { code, .. }
            | Self::Embed { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Short name of the pipeline step that failed, for diagnostics.
    pub fn step(&self) -> &'static str {
        match self {
            Self::ImageDir { .. } => "directory creation",
            Self::FontMissing { .. } | Self::FontInvalid { .. } => "font loading",
            Self::FontSelect(_) => "font selection",
            Self::Encoding { .. } => "barcode encoding",
            Self::Scale { .. } => "barcode scaling",
            Self::ImageError(_) | Self::ImageWrite { .. } | Self::Io(_) => "image writing",
            Self::Embed { .. } => "PDF embedding",
            Self::PdfWrite { .. } | Self::PdfError(_) => "PDF writing",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BarsheetError>;
