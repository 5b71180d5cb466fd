// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — scaling barcode symbols to rasters and JPEG output.

pub mod raster;

pub use raster::SymbolRaster;
