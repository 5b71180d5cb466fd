// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — lays barcode images out on a single page using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: a page is a `PdfPage` holding a
// `Vec<Op>` operation list, and the document is serialised via
// `PdfDocument::save()`. `BarcodeSheet` accumulates the ops for its one page
// and only builds the page when the document is serialised.

use std::collections::HashMap;
use std::path::Path;

use barsheet_core::error::{BarsheetError, Result};
use barsheet_core::{Cursor, PaperSize};
use printpdf::{
    FontId, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::image::SymbolRaster;

/// Images are embedded at one pixel per point.
const NATURAL_DPI: f32 = 72.0;

/// A single-page PDF with barcode images placed at explicit positions.
///
/// Positions are given as [`Cursor`]s measured from the top-left corner of
/// the page, in points.
pub struct BarcodeSheet {
    doc: PdfDocument,
    paper_size: PaperSize,
    /// Loaded fonts by registration name.
    fonts: HashMap<String, FontId>,
    /// Font and size used for labels.
    active_font: Option<(FontId, f32)>,
    /// Content of the single page.
    ops: Vec<Op>,
    images: usize,
}

impl BarcodeSheet {
    /// Start an empty document with one page of `paper_size`.
    pub fn new(paper_size: PaperSize, title: &str) -> Self {
        info!(paper = ?paper_size, title, "Creating barcode sheet");
        Self {
            doc: PdfDocument::new(title),
            paper_size,
            fonts: HashMap::new(),
            active_font: None,
            ops: Vec::new(),
            images: 0,
        }
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    fn page_height_pt(&self) -> f32 {
        self.page_dimensions().1.into_pt().0
    }

    // -- Fonts ----------------------------------------------------------------

    /// Load a TrueType font from `path` and register it under `name`.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_font(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| BarsheetError::FontMissing {
            path: path.to_path_buf(),
            source,
        })?;

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let font = ParsedFont::from_bytes(&bytes, 0, &mut warnings).ok_or_else(|| {
            BarsheetError::FontInvalid {
                path: path.to_path_buf(),
            }
        })?;

        let id = self.doc.add_font(&font);
        self.fonts.insert(name.to_string(), id);
        info!(bytes = bytes.len(), "Font loaded");
        Ok(())
    }

    /// Select a loaded font and size for subsequent labels.
    pub fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        let id = self
            .fonts
            .get(name)
            .ok_or_else(|| BarsheetError::FontSelect(format!("font {name:?} was never loaded")))?;
        if !(size.is_finite() && size > 0.0) {
            return Err(BarsheetError::FontSelect(format!(
                "invalid font size {size}"
            )));
        }
        self.active_font = Some((id.clone(), size));
        debug!(name, size, "Font selected");
        Ok(())
    }

    // -- Placement ------------------------------------------------------------

    /// Embed the image at `path` with its top-left corner at `cursor`, at its
    /// natural size. Returns the cursor the image was placed at.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), x = cursor.x, y = cursor.y))]
    pub fn place_image(
        &mut self,
        code: &str,
        path: impl AsRef<Path>,
        cursor: Cursor,
    ) -> Result<Cursor> {
        let embed_err = |reason: String| BarsheetError::Embed {
            code: code.to_string(),
            reason,
        };

        let raster = SymbolRaster::open(path.as_ref()).map_err(|err| embed_err(err.to_string()))?;
        let width = raster.width();
        let height = raster.height();

        let rgb_image = raster.into_dynamic().to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // printpdf measures from the bottom-left corner.
        let translate_y = self.page_height_pt() - cursor.y - height as f32;
        self.ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(cursor.x)),
                translate_y: Some(Pt(translate_y)),
                scale_x: None,
                scale_y: None,
                dpi: Some(NATURAL_DPI),
                rotate: None,
            },
        });
        self.images += 1;

        debug!(width, height, translate_y, "Image placed on page");
        Ok(cursor)
    }

    /// Write `text` with the selected font, its top edge at `cursor`.
    pub fn place_label(&mut self, text: &str, cursor: Cursor) -> Result<()> {
        let (font, size) = self
            .active_font
            .clone()
            .ok_or_else(|| BarsheetError::FontSelect("no font selected".into()))?;

        let baseline = self.page_height_pt() - cursor.y - size;
        self.ops.extend([
            Op::StartTextSection,
            Op::SetTextCursor {
                pos: Point {
                    x: Pt(cursor.x),
                    y: Pt(baseline),
                },
            },
            Op::SetFontSize {
                size: Pt(size),
                font: font.clone(),
            },
            Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font,
            },
            Op::EndTextSection,
        ]);
        Ok(())
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of images placed so far.
    pub fn image_count(&self) -> usize {
        self.images
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the document.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        let (page_w, page_h) = self.page_dimensions();
        self.doc.pages = vec![PdfPage::new(page_w, page_h, self.ops.clone())];

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(
            images = self.images,
            warnings = warnings.len(),
            bytes = output.len(),
            "PDF serialised"
        );
        output
    }

    /// Serialise the document and write it to `path` in a single call.
    pub fn write_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes();
        std::fs::write(path.as_ref(), &bytes).map_err(|source| BarsheetError::PdfWrite {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::barcode::encode;
    use crate::pdf::PdfInspector;
    use barsheet_core::types::{CodeEntry, Symbology};

    pub(crate) fn bundled_font() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fonts/DejaVuSans.ttf")
    }

    fn write_barcode(dir: &Path, code: &str, symbology: Symbology) -> std::path::PathBuf {
        let symbol = encode(&CodeEntry::new(code, symbology)).unwrap();
        let path = dir.join(format!("{code}.jpg"));
        SymbolRaster::scale(&symbol, 500, 200)
            .unwrap()
            .save_jpeg(&path, 100)
            .unwrap();
        path
    }

    #[test]
    fn missing_font_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = BarcodeSheet::new(PaperSize::A4, "t");
        let err = sheet
            .load_font("dejavu", dir.path().join("nope.ttf"))
            .unwrap_err();
        assert!(matches!(err, BarsheetError::FontMissing { .. }));
    }

    #[test]
    fn garbage_font_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let mut sheet = BarcodeSheet::new(PaperSize::A4, "t");
        let err = sheet.load_font("dejavu", &path).unwrap_err();
        assert!(matches!(err, BarsheetError::FontInvalid { .. }));
    }

    #[test]
    fn selecting_unknown_font_fails() {
        let mut sheet = BarcodeSheet::new(PaperSize::A4, "t");
        assert!(matches!(
            sheet.set_font("dejavu", 14.0),
            Err(BarsheetError::FontSelect(_))
        ));
        sheet.load_font("dejavu", bundled_font()).unwrap();
        assert!(sheet.set_font("dejavu", 14.0).is_ok());
        assert!(sheet.set_font("dejavu", 0.0).is_err());
    }

    #[test]
    fn embedding_missing_image_names_the_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = BarcodeSheet::new(PaperSize::A4, "t");
        let err = sheet
            .place_image("00012345", dir.path().join("00012345.jpg"), Cursor::ORIGIN)
            .unwrap_err();
        assert!(matches!(err, BarsheetError::Embed { .. }));
        assert_eq!(err.code(), Some("00012345"));
        assert_eq!(sheet.image_count(), 0);
    }

    #[test]
    fn sheet_with_two_barcodes_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_barcode(dir.path(), "00012348", Symbology::Ean8);
        let second = write_barcode(dir.path(), "1212526228612", Symbology::Gs1_128);

        let mut sheet = BarcodeSheet::new(PaperSize::A4, "t");
        sheet.load_font("dejavu", bundled_font()).unwrap();
        sheet.set_font("dejavu", 14.0).unwrap();
        let placed = sheet.place_image("00012348", &first, Cursor::ORIGIN).unwrap();
        assert_eq!(placed, Cursor::ORIGIN);
        sheet
            .place_image("1212526228612", &second, Cursor::ORIGIN.advance(150.0))
            .unwrap();
        sheet.place_label("1212526228612", Cursor::new(20.0, 370.0)).unwrap();
        assert_eq!(sheet.image_count(), 2);

        let out = dir.path().join("sheet.pdf");
        sheet.write_to_file(&out).unwrap();

        let inspector = PdfInspector::open(&out).unwrap();
        assert_eq!(inspector.page_count(), 1);
        assert_eq!(inspector.image_count(), 2);

        // A4 is 841.89 pt tall; top edges at 20 and 170 from the top.
        let placed = inspector.image_placements().unwrap();
        assert_eq!(placed.len(), 2);
        assert_close(placed[0].x, 20.0);
        assert_close(placed[0].y, 841.89 - 20.0 - 200.0);
        assert_close(placed[1].y, 841.89 - 170.0 - 200.0);
        for image in &placed {
            assert_close(image.width, 500.0);
            assert_close(image.height, 200.0);
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn letter_sheet_measures_from_its_own_top_edge() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_barcode(dir.path(), "96385074", Symbology::Ean8);

        let mut sheet = BarcodeSheet::new(PaperSize::Letter, "t");
        sheet.place_image("96385074", &path, Cursor::ORIGIN).unwrap();
        let inspector = PdfInspector::from_bytes(&sheet.to_bytes()).unwrap();

        // 279 mm = 790.87 pt.
        let placed = inspector.image_placements().unwrap();
        assert_eq!(placed.len(), 1);
        assert_close(placed[0].x, 20.0);
        assert_close(placed[0].y, 790.87 - 20.0 - 200.0);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = BarcodeSheet::new(PaperSize::A4, "t");
        let err = sheet
            .write_to_file(dir.path().join("missing").join("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, BarsheetError::PdfWrite { .. }));
    }
}
