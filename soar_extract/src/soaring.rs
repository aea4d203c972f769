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

//! soaring parameters: boundary layer height, thermal updraft velocity (W*), surface wind and
//! upper level wind for all time steps of a model output file

use std::path::Path;
use ndarray::{Array2, Array3, ArrayView2, Axis, stack};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use soar_calc::{ThermalInputs, WindField};
use soar_common::fs::{filename, filestem};
use soar_grid::{GridDocument, GridSource, Param, open_source, HFX, PBLH, T2M, U10, V10};
use crate::{BatchReport, ExtractContext, run_batch, write_grid_document};
use crate::errors::{Result, op_failed};

const DIMS: [&str;3] = ["time", "south_north", "west_east"];
const COORD_DIMS: [&str;2] = ["south_north", "west_east"];

/// per-file result of the soaring extraction
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SoaringResult {
    pub output_file: String,
    pub pblh_max: f64,
    pub w_star_max: f64,
}

/// output name for `input_name`: `input_token` replaced by `output_token` in the file stem, with a `.json` extension
pub fn soaring_filename (input_name: &str, input_token: &str, output_token: &str)->String {
    let stem = filestem(&input_name).unwrap_or(input_name);
    format!("{}.json", stem.replace(input_token, output_token))
}

/// fields of a single time step
struct StepFields {
    pblh: Array2<f64>,
    w_star: Array2<f64>,
    wspd_10m: Array2<f64>,
    wdir_10m: Array2<f64>,
    wspd_upper: Array2<f64>,
    wdir_upper: Array2<f64>,
}

fn step_fields (src: &dyn GridSource, t: usize, hpa: u32)->Result<StepFields> {
    let pblh = src.field(&PBLH, t)?.to_owned();
    let thermals = ThermalInputs::new( src.field(&HFX, t)?.to_owned(), pblh.clone(), src.field(&T2M, t)?.to_owned())?;

    let wind10 = WindField::new( src.field(&U10, t)?.to_owned(), src.field(&V10, t)?.to_owned())?;
    let upper = WindField::new(
        src.field_on_pressure_level(Param::UWind, t, hpa)?,
        src.field_on_pressure_level(Param::VWind, t, hpa)?
    )?;

    Ok( StepFields {
        w_star: thermals.velocity(),
        pblh,
        wspd_10m: wind10.speed(),
        wdir_10m: wind10.direction(),
        wspd_upper: upper.speed(),
        wdir_upper: upper.direction(),
    })
}

fn stack_steps (steps: &[StepFields], f: impl Fn(&StepFields)->&Array2<f64>)->Result<Array3<f64>> {
    let views: Vec<ArrayView2<f64>> = steps.iter().map(|s| f(s).view()).collect();
    stack(Axis(0), &views).map_err(|e| op_failed( format!("cannot stack time steps: {e}")))
}

/// the soaring parameter document for all time steps of `src`
pub fn soaring_document (src: &dyn GridSource, hpa: u32)->Result<GridDocument> {
    let n_times = src.n_times();
    if n_times == 0 {
        return Err( op_failed( format!("no time steps in {}", src.name())))
    }

    let steps = (0..n_times).map(|t| step_fields(src, t, hpa)).collect::<Result<Vec<StepFields>>>()?;
    debug!("computed {} time steps of {}", steps.len(), src.name());

    let grid = src.grid();
    let mut doc = GridDocument::new();
    doc.add_coord("lat", &COORD_DIMS, &grid.lat().to_owned())?;
    doc.add_coord("lon", &COORD_DIMS, &grid.lon().to_owned())?;
    doc.times = src.times().to_vec();

    doc.add_variable("pblh", &DIMS, &stack_steps(&steps, |s| &s.pblh)?)?;
    doc.add_variable("w_star", &DIMS, &stack_steps(&steps, |s| &s.w_star)?)?;
    doc.add_variable("wspd_10m", &DIMS, &stack_steps(&steps, |s| &s.wspd_10m)?)?;
    doc.add_variable("wdir_10m", &DIMS, &stack_steps(&steps, |s| &s.wdir_10m)?)?;
    doc.add_variable(&format!("wspd_{hpa}hpa"), &DIMS, &stack_steps(&steps, |s| &s.wspd_upper)?)?;
    doc.add_variable(&format!("wdir_{hpa}hpa"), &DIMS, &stack_steps(&steps, |s| &s.wdir_upper)?)?;

    doc.set_attr("description", "Soaring forecast parameters");
    doc.set_attr("source", src.name());
    doc.set_attr("pressure_level_hpa", hpa);
    Ok(doc)
}

fn extract_file (ctx: &ExtractContext, out_dir: &Path, path: &Path)->Result<SoaringResult> {
    let src = open_source(path)?;
    let cfg = &ctx.config;
    let doc = soaring_document( src.as_ref(), cfg.pressure_level)?;

    let pblh_max = doc.variables.get("pblh").map(|v| max_of(&v.data)).unwrap_or(f64::NAN);
    let w_star_max = doc.variables.get("w_star").map(|v| max_of(&v.data)).unwrap_or(f64::NAN);

    let output_file = soaring_filename( src.name(), &cfg.input_token, &cfg.output_token);
    write_grid_document( out_dir, &output_file, &doc)?;
    info!("{}: max PBLH {:.0} m, max W* {:.2} m/s", output_file, pblh_max, w_star_max);

    Ok( SoaringResult { output_file, pblh_max, w_star_max })
}

fn max_of (data: &[f64])->f64 {
    data.iter().copied().filter(|v| v.is_finite()).fold(f64::NAN, f64::max)
}

/// write a soaring parameter document for each input file
pub fn extract_soaring (ctx: &ExtractContext)->Result<BatchReport<SoaringResult>> {
    let files = ctx.input_files()?;
    let out_dir = ctx.prepare_output_dir()?;

    let report = run_batch( &files, |p| filename(p).unwrap_or("?").to_string(), |_, path| {
        extract_file( ctx, out_dir, path)
    });

    info!("{} soaring files written to {:?}", report.n_succeeded(), out_dir);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soaring_filename() {
        assert_eq!( soaring_filename("wrfout_d01_2025-10-12_00:00:00.json", "wrfout", "soaring"), "soaring_d01_2025-10-12_00:00:00.json");
        assert_eq!( soaring_filename("wrfout_d02", "wrfout", "soaring"), "soaring_d02.json");
        assert_eq!( soaring_filename("arome_f003.grib2", "wrfout", "soaring"), "arome_f003.json");
    }
}
