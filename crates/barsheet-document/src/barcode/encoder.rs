// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode encoder — turns a product code into the bar/space module pattern of
// its symbology using the `barcoders` crate.

use barcoders::sym::code128::Code128;
use barcoders::sym::ean8::EAN8;
use barsheet_core::error::{BarsheetError, Result};
use barsheet_core::types::{CodeEntry, Symbology};
use tracing::{debug, instrument, warn};

/// Code 128 character set B selector understood by `barcoders`.
const CODE128_SET_B: char = 'Ɓ';

/// Longest shipping code accepted. Longer symbols would not fit the raster
/// width at one pixel per module.
pub const MAX_CODE128_LEN: usize = 42;

/// An encoded 1D barcode: one entry per module, `1` for a bar, `0` for a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeSymbol {
    code: String,
    symbology: Symbology,
    modules: Vec<u8>,
}

impl BarcodeSymbol {
    /// The code string the symbol was encoded from.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    /// Number of modules in the symbol.
    pub fn width(&self) -> usize {
        self.modules.len()
    }

    /// The EAN-8 check digit carried by the symbol.
    pub fn check_digit(&self) -> Option<u8> {
        match self.symbology {
            Symbology::Ean8 => ean8_check_digit(&self.code[..7]),
            Symbology::Gs1_128 => None,
        }
    }
}

/// Encode `entry` under its symbology.
#[instrument(skip_all, fields(code = %entry.code, symbology = %entry.symbology))]
pub fn encode(entry: &CodeEntry) -> Result<BarcodeSymbol> {
    check_file_name(entry)?;

    let modules = match entry.symbology {
        Symbology::Ean8 => encode_ean8(&entry.code)?,
        Symbology::Gs1_128 => encode_code128(&entry.code)?,
    };

    debug!(modules = modules.len(), "Barcode encoded");

    Ok(BarcodeSymbol {
        code: entry.code.clone(),
        symbology: entry.symbology,
        modules,
    })
}

/// The code doubles as the image file name, so it must stay a single path
/// component inside the image directory.
fn check_file_name(entry: &CodeEntry) -> Result<()> {
    let code = entry.code.as_str();
    let reason = if code.contains(['/', '\\']) {
        "path separators are not allowed"
    } else if code == "." || code == ".." {
        "code is not a valid file name"
    } else {
        return Ok(());
    };
    Err(BarsheetError::Encoding {
        code: code.to_string(),
        symbology: entry.symbology,
        reason: reason.into(),
    })
}

fn encode_ean8(code: &str) -> Result<Vec<u8>> {
    let invalid = |reason: String| BarsheetError::Encoding {
        code: code.to_string(),
        symbology: Symbology::Ean8,
        reason,
    };

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("only digits are allowed".into()));
    }
    if code.len() != 7 && code.len() != 8 {
        return Err(invalid(format!(
            "expected 7 or 8 digits, got {}",
            code.len()
        )));
    }

    // The encoder always derives the check digit from the 7-digit payload.
    let payload = &code[..7];
    if code.len() == 8 {
        let supplied = code.as_bytes()[7] - b'0';
        if let Some(expected) = ean8_check_digit(payload) {
            if supplied != expected {
                warn!(
                    code,
                    supplied, expected, "EAN-8 check digit mismatch, encoding computed digit"
                );
            }
        }
    }

    EAN8::new(payload.to_string())
        .map(|barcode| barcode.encode())
        .map_err(|err| invalid(format!("{err:?}")))
}

fn encode_code128(code: &str) -> Result<Vec<u8>> {
    let invalid = |reason: String| BarsheetError::Encoding {
        code: code.to_string(),
        symbology: Symbology::Gs1_128,
        reason,
    };

    if code.is_empty() {
        return Err(invalid("code is empty".into()));
    }
    if code.len() > MAX_CODE128_LEN {
        return Err(invalid(format!(
            "at most {} characters allowed, got {}",
            MAX_CODE128_LEN,
            code.len()
        )));
    }
    if let Some(bad) = code.chars().find(|c| !matches!(c, ' '..='~')) {
        return Err(invalid(format!("unsupported character {bad:?}")));
    }

    Code128::new(format!("{CODE128_SET_B}{code}"))
        .map(|barcode| barcode.encode())
        .map_err(|err| invalid(format!("{err:?}")))
}

/// EAN-8 check digit for a 7-digit payload: weights 3,1,3,1,3,1,3.
pub fn ean8_check_digit(payload: &str) -> Option<u8> {
    if payload.len() != 7 {
        return None;
    }
    let mut sum = 0u32;
    for (i, ch) in payload.chars().enumerate() {
        let digit = ch.to_digit(10)?;
        sum += if i % 2 == 0 { digit * 3 } else { digit };
    }
    Some(((10 - sum % 10) % 10) as u8)
}
