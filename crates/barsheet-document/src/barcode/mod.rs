// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode module — EAN-8 and Code 128 symbol encoding.

pub mod encoder;

pub use encoder::{BarcodeSymbol, encode};
