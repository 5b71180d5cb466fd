// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Symbol raster — scales a barcode symbol to a fixed pixel size and encodes
// it as JPEG. Operates on in-memory images using the `image` crate.

use std::path::Path;

use barsheet_core::error::{BarsheetError, Result};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use tracing::{debug, info, instrument};

use crate::barcode::BarcodeSymbol;

const BAR: Luma<u8> = Luma([0]);
const SPACE: Luma<u8> = Luma([255]);

/// A rendered barcode image.
#[derive(Debug)]
pub struct SymbolRaster {
    /// The current working image.
    image: DynamicImage,
}

impl SymbolRaster {
    // -- Construction ---------------------------------------------------------

    /// Scale `symbol` to exactly `width` x `height` pixels.
    ///
    /// Every module gets the same integer number of pixel columns, the largest
    /// that fits, and the symbol is centred horizontally on a white background.
    /// Bars run the full height of the image.
    #[instrument(skip(symbol), fields(code = symbol.code(), modules = symbol.width()))]
    pub fn scale(symbol: &BarcodeSymbol, width: u32, height: u32) -> Result<Self> {
        let modules = symbol.width() as u32;
        if modules == 0 || height == 0 {
            return Err(BarsheetError::Scale {
                code: symbol.code().to_string(),
                reason: "empty barcode or zero height".into(),
            });
        }

        let module_px = width / modules;
        if module_px == 0 {
            return Err(BarsheetError::Scale {
                code: symbol.code().to_string(),
                reason: format!(
                    "{modules} modules do not fit into an image {width} pixels wide"
                ),
            });
        }
        let offset = (width - module_px * modules) / 2;

        debug!(module_px, offset, "Module geometry");

        let bars = symbol.modules();
        let image: GrayImage = ImageBuffer::from_fn(width, height, |x, _| {
            if x < offset {
                return SPACE;
            }
            match bars.get(((x - offset) / module_px) as usize) {
                Some(&1) => BAR,
                _ => SPACE,
            }
        });

        info!(width, height, "Barcode scaled");
        Ok(Self {
            image: DynamicImage::ImageLuma8(image),
        })
    }

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            BarsheetError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the raster and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let luma = self.image.to_luma8();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        luma.write_with_encoder(encoder).map_err(|err| {
            BarsheetError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }

    /// Write the image to `path` as a JPEG, replacing any existing file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_jpeg(&self, path: impl AsRef<Path>, quality: u8) -> Result<()> {
        let bytes = self.to_jpeg_bytes(quality)?;
        std::fs::write(path.as_ref(), &bytes).map_err(|err| {
            BarsheetError::ImageError(format!(
                "failed to write {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(bytes = bytes.len(), "JPEG written");
        Ok(())
    }
}
