// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspector — re-opens a written sheet with `lopdf` to confirm it parses
// and to report its pages, embedded images and where those images are drawn.

use std::path::Path;

use barsheet_core::error::{BarsheetError, Result};
use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::{debug, info, instrument};

/// Where an image XObject is drawn on a page, in points from the bottom-left
/// corner of the page, as set by the current transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// PDF affine matrix `[a b c d e f]`.
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m` applied before `n` (the `cm` operator concatenates as `m × CTM`).
fn concat(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

/// Read-only view of an existing PDF file.
pub struct PdfInspector {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfInspector {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BarsheetError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Parse a PDF already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BarsheetError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Number of image XObjects stored in the document.
    pub fn image_count(&self) -> usize {
        self.document
            .objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => matches!(
                    stream.dict.get(b"Subtype").and_then(Object::as_name),
                    Ok(name) if name == b"Image"
                ),
                _ => false,
            })
            .count()
    }

    /// Placement of every image drawn on the first page, in drawing order.
    ///
    /// Follows `q`/`Q`/`cm` through the page content stream and records the
    /// transformation in effect at each `Do`. The sheet only draws images.
    pub fn image_placements(&self) -> Result<Vec<ImagePlacement>> {
        let pdf_err = |err: lopdf::Error| BarsheetError::PdfError(err.to_string());

        let page_id = *self
            .document
            .get_pages()
            .values()
            .next()
            .ok_or_else(|| BarsheetError::PdfError("document has no pages".into()))?;
        let content = self
            .document
            .get_page_content(page_id)
            .map_err(pdf_err)?;
        let content = Content::decode(&content).map_err(pdf_err)?;

        let mut ctm = IDENTITY;
        let mut saved = Vec::new();
        let mut placements = Vec::new();

        for op in &content.operations {
            match op.operator.as_str() {
                "q" => saved.push(ctm),
                "Q" => ctm = saved.pop().unwrap_or(IDENTITY),
                "cm" => {
                    if op.operands.len() != 6 {
                        return Err(BarsheetError::PdfError(format!(
                            "cm with {} operands",
                            op.operands.len()
                        )));
                    }
                    let mut m = IDENTITY;
                    for (slot, operand) in m.iter_mut().zip(&op.operands) {
                        *slot = operand.as_float().map_err(pdf_err)?;
                    }
                    ctm = concat(&m, &ctm);
                }
                "Do" => placements.push(ImagePlacement {
                    x: ctm[4],
                    y: ctm[5],
                    width: ctm[0],
                    height: ctm[3],
                }),
                _ => {}
            }
        }

        debug!(images = placements.len(), "Image placements read");
        Ok(placements)
    }
}
