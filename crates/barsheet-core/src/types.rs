// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Barsheet.

use serde::{Deserialize, Serialize};

/// Barcode symbologies Barsheet can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum Symbology {
    /// Fixed-length numeric retail code (EAN-8).
    Ean8,
    /// Variable-length alphanumeric shipping/logistics code, encoded as Code 128.
    Gs1_128,
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ean8 => write!(f, "EAN8"),
            Self::Gs1_128 => write!(f, "GS1_128"),
        }
    }
}

/// A product code and the symbology it is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub symbology: Symbology,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            code: code.into(),
            symbology,
        }
    }

    /// File name of the rendered barcode image (`<code>.jpg`).
    pub fn image_file_name(&self) -> String {
        format!("{}.jpg", self.code)
    }
}

impl std::fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.symbology, self.code)
    }
}

/// The fixed set of codes rendered by the batch, in page order.
pub fn default_registry() -> Vec<CodeEntry> {
    vec![
        CodeEntry::new("00012345", Symbology::Ean8),
        CodeEntry::new("1212526228612", Symbology::Gs1_128),
    ]
}

/// Insertion point on a page, in points, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    /// Where the first barcode is placed.
    pub const ORIGIN: Cursor = Cursor { x: 20.0, y: 20.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Move down by `dy`; `x` is unchanged.
    pub fn advance(self, dy: f32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::Letter => (216, 279),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_ordered_and_fixed() {
        let registry = default_registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry[0], CodeEntry::new("00012345", Symbology::Ean8));
        assert_eq!(
            registry[1],
            CodeEntry::new("1212526228612", Symbology::Gs1_128)
        );
    }

    #[test]
    fn image_file_name_is_derived_from_code() {
        let entry = CodeEntry::new("1212526228612", Symbology::Gs1_128);
        assert_eq!(entry.image_file_name(), "1212526228612.jpg");
        assert_eq!(entry.to_string(), "GS1_128_1212526228612");
    }

    #[test]
    fn cursor_advance_only_moves_down() {
        let next = Cursor::ORIGIN.advance(150.0);
        assert_eq!(next, Cursor::new(20.0, 170.0));
        assert_eq!(next.advance(150.0), Cursor::new(20.0, 320.0));
    }
}
