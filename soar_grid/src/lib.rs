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

//! access to gridded numerical weather model output.
//!
//! Sources are opened per file and provide named 2D fields (`FieldKey`) for each time step they
//! contain, the lat/lon coordinates of the grid, nearest grid point sampling and (if the source has
//! 3D model level data) vertical interpolation to pressure levels.

use std::path::Path;
use ndarray::{ArrayView2, ArrayView3};
use tracing::debug;

mod errors;
pub use errors::*;

pub mod field;
pub use field::*;

pub mod grid;
pub use grid::*;

pub mod vertical;
pub mod document;
pub use document::{GridDocument, Variable};

pub mod json_source;
pub use json_source::JsonGridSource;

pub mod grib_source;
pub use grib_source::GribSource;

pub mod wrf_source;
pub use wrf_source::WrfSource;

pub mod sites;
pub use sites::{Site, load_sites};

/// the abstraction for model output files we extract data from
pub trait GridSource {
    /// identifier of the source (usually its file name)
    fn name (&self)->&str;

    fn grid (&self)->&LatLonGrid;

    /// number of time steps in this source
    fn n_times (&self)->usize;

    /// optional labels of the time steps
    fn times (&self)->&[String] { &[] }

    fn has_field (&self, key: &FieldKey)->bool;

    /// 2D [j,i] field for time step `t`
    fn field (&self, key: &FieldKey, t: usize)->Result<ArrayView2<'_,f64>>;

    /// 3D [k,j,i] field on native model levels for time step `t`
    fn model_field (&self, param: Param, _t: usize)->Result<ArrayView3<'_,f64>> {
        Err( missing_field( format!("{} in {}", FieldKey::model(param), self.name())))
    }

    fn has_model_field (&self, _param: Param)->bool { false }

    /// value of field `key` at time step `t` at the grid point closest to (lat,lon)
    fn sample_nearest (&self, key: &FieldKey, t: usize, lat: f64, lon: f64)->Result<f64> {
        let (j,i) = self.grid().nearest(lat, lon).ok_or_else(|| op_failed( format!("no grid point near {lat},{lon} in {}", self.name())))?;
        let a = self.field(key, t)?;
        a.get((j,i)).copied().ok_or_else(|| shape_mismatch( format!("{key} does not cover grid index {j},{i}")))
    }

    /// field of `param` on the isobaric surface `hpa`. We use an isobaric field if the source has one,
    /// otherwise we interpolate from model levels (which requires a `pressure@model` field in hPa)
    fn field_on_pressure_level (&self, param: Param, t: usize, hpa: u32)->Result<ndarray::Array2<f64>> {
        let key = FieldKey::isobaric(param, hpa);
        if self.has_field(&key) {
            Ok( self.field(&key, t)?.to_owned() )

        } else if self.has_model_field(param) && self.has_model_field(Param::Pressure) {
            debug!("interpolating {} to {} hPa in {}", param, hpa, self.name());
            let f = self.model_field(param, t)?;
            let p = self.model_field(Param::Pressure, t)?;
            vertical::interpolate_to_pressure(f, p, hpa as f64)

        } else {
            Err( missing_field( format!("{key} (no isobaric or model level data) in {}", self.name())))
        }
    }
}

/// open a model output file, choosing the reader based on the file extension. WRF output files
/// usually have none (`wrfout_d01_2025-10-12_00:00:00`) and are recognized by their name
pub fn open_source (path: impl AsRef<Path>)->Result<Box<dyn GridSource>> {
    let path = path.as_ref();
    match soar_common::fs::extension(&path) {
        Some("grib2" | "grb2" | "grib") => Ok( Box::new( GribSource::open(path)?)),
        Some("json") => Ok( Box::new( JsonGridSource::open(path)?)),
        Some("nc" | "nc4") => Ok( Box::new( WrfSource::open(path)?)),
        _ if is_wrf_output(path) => Ok( Box::new( WrfSource::open(path)?)),
        _ => Err( SoarGridError::UnsupportedFormat( format!("{:?}", path)))
    }
}

fn is_wrf_output (path: &Path)->bool {
    soar_common::fs::filename(&path).is_some_and(|name| name.starts_with("wrfout_"))
}

pub(crate) fn check_time_index (t: usize, n_times: usize)->Result<()> {
    if t < n_times { Ok(()) } else { Err( SoarGridError::TimeOutOfRange(t, n_times)) }
}
