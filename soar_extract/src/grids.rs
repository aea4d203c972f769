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

//! per-hour grids of surface fields and derived wind for map display

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use soar_calc::WindField;
use soar_common::{datetime::fmt_yyyymmdd, fs::filename};
use soar_grid::{GridDocument, GridSource, open_source, decimate_field, T2M, U10, V10};
use crate::{BatchReport, ExtractContext, run_batch, write_grid_document, write_json, size_mb};
use crate::errors::Result;

pub const INDEX_FILE: &str = "index.json";

const DIMS: [&str;2] = ["south_north", "west_east"];

/// entry of the `index.json` that lists all successfully written hourly grids
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct GridIndexEntry {
    pub hour: usize,
    pub file: String,
    pub vars: Vec<String>,
    pub size_mb: f64,
}

/// the grid document for the single time step of `src`, decimated by `stride`
pub fn hour_grid (src: &dyn GridSource, stride: usize)->Result<GridDocument> {
    let grid = src.grid().decimate(stride);
    let t2m = decimate_field( src.field(&T2M, 0)?, stride);
    let wind = WindField::new(
        decimate_field( src.field(&U10, 0)?, stride),
        decimate_field( src.field(&V10, 0)?, stride)
    )?;

    let mut doc = GridDocument::new();
    doc.add_coord("lat", &DIMS, &grid.lat().to_owned())?;
    doc.add_coord("lon", &DIMS, &grid.lon().to_owned())?;

    doc.add_variable("t2m", &DIMS, &t2m)?;
    doc.add_variable("wspd_10m", &DIMS, &wind.speed())?;
    doc.add_variable("wdir_10m", &DIMS, &wind.direction())?;
    let (u10, v10) = wind.into_components();
    doc.add_variable("u10", &DIMS, &u10)?;
    doc.add_variable("v10", &DIMS, &v10)?;

    doc.set_attr("source", src.name());
    doc.set_attr("stride", stride.max(1));
    if let Some(t) = src.times().first() {
        doc.set_attr("time", t);
    }
    Ok(doc)
}

fn write_hour_grid (ctx: &ExtractContext, out_dir: &Path, path: &Path, hour: usize)->Result<GridIndexEntry> {
    let src = open_source(path)?;
    let mut doc = hour_grid( src.as_ref(), ctx.config.stride)?;
    doc.set_attr("hour", hour);
    doc.set_attr("date", fmt_yyyymmdd(&ctx.date));

    let file = ctx.hour_filename(hour);
    let out_path = write_grid_document( out_dir, &file, &doc)?;
    debug!("{} -> {:?}", src.name(), out_path);

    Ok( GridIndexEntry { hour, file, vars: doc.variable_names(), size_mb: size_mb(&out_path) })
}

/// write a `<prefix>_f<hhh>.json` grid document for each input file and an `index.json` of the written files
pub fn extract_grids (ctx: &ExtractContext)->Result<BatchReport<GridIndexEntry>> {
    let files = ctx.input_files()?;
    let out_dir = ctx.prepare_output_dir()?;

    let report = run_batch( &files, |p| filename(p).unwrap_or("?").to_string(), |hour, path| {
        write_hour_grid( ctx, out_dir, path, hour)
    });

    let index: Vec<&GridIndexEntry> = report.succeeded().map(|(_,e)| e).collect();
    write_json( out_dir, INDEX_FILE, &index)?;

    info!("{} hourly grids written to {:?}", index.len(), out_dir);
    Ok(report)
}
