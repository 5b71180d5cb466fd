// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barsheet — batch barcode sheet generator
//
// Entry point. Initialises logging, renders the fixed code registry into
// `images/` and writes `test.pdf`. Any failure is logged and ends the process
// with a non-zero status.

mod batch;

use barsheet_core::{BatchConfig, default_registry};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Barsheet starting");

    let config = BatchConfig::default();
    match batch::run(&config, &default_registry()) {
        Ok(report) => {
            tracing::info!(
                images = report.images.len(),
                last_y = report.placements.last().map(|c| c.y).unwrap_or(config.origin.y),
                output = %report.output.display(),
                "sheet written"
            );
        }
        Err(e) => {
            tracing::error!(
                step = e.step(),
                code = e.code().unwrap_or("-"),
                error = %e,
                "batch aborted"
            );
            std::process::exit(1);
        }
    }
}
