/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! extraction of soaring forecast products from numerical weather model output.
//!
//! Each job processes the input files of a forecast run (one item per file), isolates per-file
//! failures and returns a `BatchReport`. Configuration problems are reported as errors before
//! any file is processed.

mod errors;
pub use errors::*;

pub mod config;
pub use config::{ExtractConfig, ExtractContext};

pub mod batch;
pub use batch::{BatchReport, ItemOutcome, run_batch};

pub mod sink;
pub use sink::{write_json, write_grid_document, size_mb};

pub mod cli;

pub mod summary;
pub mod grids;
pub mod sites;
pub mod soaring;

use tracing_subscriber::EnvFilter;

/// install the fmt subscriber for binaries. The level is set by `RUST_LOG` and defaults to `info`
pub fn init_tracing () {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
