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

//! hourly domain summaries: one small JSON record per forecast hour plus a `metadata.json`
//! that lists the status of all processed hours

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::info;

use soar_calc::{WindField, wind_direction};
use soar_common::{MinMaxAvg, fs::filename};
use soar_grid::{open_source, T2M, U10, V10};
use crate::{BatchReport, ExtractContext, run_batch, write_json};
use crate::errors::Result;

pub const METADATA_FILE: &str = "metadata.json";

/// domain means of a single forecast hour
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct HourSummary {
    pub hour: usize,
    pub t2m: f64,
    pub u10: f64,
    pub v10: f64,
    pub wspd_10m: f64,
    /// direction of the mean wind vector
    pub wdir_10m: f64,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct HourStatus {
    pub hour: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "soar_common::is_none", default)]
    pub error: Option<String>,
}

/// compute the summary of the single time step in `path`
pub fn summarize_file (path: &Path, hour: usize)->Result<HourSummary> {
    let src = open_source(path)?;

    let t2m = src.field(&T2M, 0)?;
    let wind = WindField::new( src.field(&U10, 0)?.to_owned(), src.field(&V10, 0)?.to_owned())?;

    let u10 = mean(wind.u().iter());
    let v10 = mean(wind.v().iter());

    Ok( HourSummary {
        hour,
        t2m: mean(t2m.iter()),
        u10,
        v10,
        wspd_10m: mean(wind.speed().iter()),
        wdir_10m: wind_direction(u10, v10),
    })
}

fn mean<'a> (xs: impl Iterator<Item=&'a f64>)->f64 {
    xs.collect::<MinMaxAvg>().avg
}

/// write `<prefix>_f<hhh>.json` for each input file and a `metadata.json` with the status of each hour
pub fn extract_summaries (ctx: &ExtractContext)->Result<BatchReport<PathBuf>> {
    let files = ctx.input_files()?;
    let out_dir = ctx.prepare_output_dir()?;

    let report = run_batch( &files, |p| filename(p).unwrap_or("?").to_string(), |hour, path| {
        let summary = summarize_file(path, hour)?;
        write_json( out_dir, &ctx.hour_filename(hour), &summary)
    });

    let status: Vec<HourStatus> = report.outcomes.iter().enumerate().map(|(hour,o)| {
        HourStatus { hour, success: o.is_ok(), error: o.result.as_ref().err().cloned() }
    }).collect();
    write_json( out_dir, METADATA_FILE, &status)?;

    info!("{} hourly summaries written to {:?}", report.n_succeeded(), out_dir);
    Ok(report)
}
