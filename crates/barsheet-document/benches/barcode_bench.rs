// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the barcode rendering path in the barsheet-document
// crate: encode a code, scale it to the 500x200 raster, compress to JPEG.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use barsheet_core::{CodeEntry, Symbology};
use barsheet_document::{SymbolRaster, encode};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Full per-code render for both symbologies, minus the file write.
fn bench_render(c: &mut Criterion) {
    let entries = [
        CodeEntry::new("00012345", Symbology::Ean8),
        CodeEntry::new("1212526228612", Symbology::Gs1_128),
    ];

    for entry in entries {
        c.bench_function(&format!("render {entry} (500x200 q100)"), |b| {
            b.iter(|| {
                let symbol = encode(black_box(&entry)).unwrap();
                let raster = SymbolRaster::scale(&symbol, 500, 200).unwrap();
                black_box(raster.to_jpeg_bytes(100).unwrap());
            });
        });
    }
}

/// Scaling alone, which dominates for short symbols.
fn bench_scale(c: &mut Criterion) {
    let symbol = encode(&CodeEntry::new("1212526228612", Symbology::Gs1_128)).unwrap();

    c.bench_function("scale code128 (500x200)", |b| {
        b.iter(|| black_box(SymbolRaster::scale(black_box(&symbol), 500, 200).unwrap()));
    });
}

criterion_group!(benches, bench_render, bench_scale);
criterion_main!(benches);
