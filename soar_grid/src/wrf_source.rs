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

use std::{collections::HashMap, path::Path};
use ndarray::{Array2, Array3, Array4, ArrayView2, ArrayView3, Axis};
use tracing::{debug, warn};

use crate::{GridSource, LatLonGrid, FieldKey, Param, T2M, U10, V10, HFX, PBLH, check_time_index, normalize_lon};
use crate::errors::{Result, missing_field, shape_mismatch, decode_error};

/// WRF output variables for the 2D fields we provide
const SURFACE_VARS: [(&str, FieldKey); 5] = [
    ("T2", T2M),    // K
    ("U10", U10),   // m/s grid relative
    ("V10", V10),   // m/s grid relative
    ("HFX", HFX),   // W/m²
    ("PBLH", PBLH), // m
];

/// a WRF output file (`wrfout_d0<n>_<date>`) in NetCDF format. All time steps are read on open.
///
/// Besides the surface fields this provides the model level fields `pressure@model` (`P`+`PB`, in hPa)
/// and `u_wind@model`/`v_wind@model`, which are the staggered `U`/`V` averaged to mass points.
/// Winds are relative to the model grid, there is no rotation to earth coordinates
#[derive(Debug)]
pub struct WrfSource {
    name: String,
    grid: LatLonGrid,
    n_times: usize,
    times: Vec<String>,
    fields: HashMap<FieldKey,Array3<f64>>,
    model_fields: HashMap<Param,Array4<f64>>,
}

impl WrfSource {
    pub fn open (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let name = soar_common::fs::filename(&path).unwrap_or("?").to_string();
        let file = netcdf::open(path)?;

        let grid = read_grid(&file)?;
        let (ny,nx) = grid.shape();
        let n_times = file.dimension_len("Time").ok_or_else(|| missing_field( format!("Time dimension in {name}")))?;

        let times = read_times(&file)?;
        if !times.is_empty() && times.len() != n_times {
            return Err( shape_mismatch( format!("{} time labels for {n_times} time steps in {name}", times.len())))
        }

        let mut fields: HashMap<FieldKey,Array3<f64>> = HashMap::new();
        for (var_name, key) in SURFACE_VARS {
            if file.variable(var_name).is_some() {
                let a = read_array3(&file, var_name)?;
                check_shape( var_name, a.shape(), &[n_times,ny,nx])?;
                fields.insert( key, a);
            } else {
                debug!("no {var_name} in {name}");
            }
        }

        let mut model_fields: HashMap<Param,Array4<f64>> = HashMap::new();
        if file.variable("P").is_some() && file.variable("PB").is_some() {
            let p = read_array4(&file, "P")? + read_array4(&file, "PB")?;
            model_fields.insert( Param::Pressure, p / 100.0); // Pa -> hPa
        }
        if let Some(u) = read_destaggered(&file, "U", Axis(3))? {
            model_fields.insert( Param::UWind, u);
        }
        if let Some(v) = read_destaggered(&file, "V", Axis(2))? {
            model_fields.insert( Param::VWind, v);
        }

        let mut nz: Option<usize> = None;
        for (param, a) in &model_fields {
            let shape = a.shape();
            check_shape( &FieldKey::model(*param).to_string(), &[shape[0], shape[2], shape[3]], &[n_times,ny,nx])?;
            match nz {
                None => nz = Some(shape[1]),
                Some(n) if n != shape[1] => return Err( shape_mismatch( format!("{param} has {} levels, expected {n}", shape[1]))),
                _ => {}
            }
        }
        if !model_fields.is_empty() && !model_fields.contains_key(&Param::Pressure) {
            warn!("no P/PB in {name}, model level winds cannot be interpolated");
        }

        debug!("opened {name} with {n_times} time steps, grid {ny}x{nx}");
        Ok( WrfSource { name, grid, n_times, times, fields, model_fields } )
    }
}

/// dimension lengths and values (converted to f64) of a variable
fn read_values (file: &netcdf::File, var_name: &str)->Result<(Vec<usize>,Vec<f64>)> {
    let var = file.variable(var_name).ok_or_else(|| missing_field(var_name))?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let values = var.get_values::<f64,_>(..)?;
    Ok( (shape, values) )
}

fn read_array3 (file: &netcdf::File, var_name: &str)->Result<Array3<f64>> {
    match read_values(file, var_name)? {
        (shape, values) if shape.len() == 3 => {
            Array3::from_shape_vec((shape[0],shape[1],shape[2]), values).map_err(|e| decode_error( format!("{var_name}: {e}")))
        }
        (shape, _) => Err( shape_mismatch( format!("{var_name} has dimensions {:?}, expected [Time,south_north,west_east]", shape)))
    }
}

fn read_array4 (file: &netcdf::File, var_name: &str)->Result<Array4<f64>> {
    match read_values(file, var_name)? {
        (shape, values) if shape.len() == 4 => {
            Array4::from_shape_vec((shape[0],shape[1],shape[2],shape[3]), values).map_err(|e| decode_error( format!("{var_name}: {e}")))
        }
        (shape, _) => Err( shape_mismatch( format!("{var_name} has dimensions {:?}, expected [Time,bottom_top,south_north,west_east]", shape)))
    }
}

/// average a staggered wind component to mass points along `axis`. Returns None if the file
/// does not have this variable
fn read_destaggered (file: &netcdf::File, var_name: &str, axis: Axis)->Result<Option<Array4<f64>>> {
    if file.variable(var_name).is_none() {
        return Ok(None)
    }

    let a = read_array4(file, var_name)?;
    if a.len_of(axis) < 2 {
        return Err( shape_mismatch( format!("{var_name} is not staggered along axis {}", axis.index())))
    }
    Ok( Some( destagger(&a, axis)) )
}

pub(crate) fn destagger (a: &Array4<f64>, axis: Axis)->Array4<f64> {
    let n = a.len_of(axis);
    let lo = a.slice_axis(axis, (0..n-1).into());
    let hi = a.slice_axis(axis, (1..n).into());
    (&lo + &hi) * 0.5
}

/// WRF stores XLAT/XLONG for each time step, we use the first one
fn read_grid (file: &netcdf::File)->Result<LatLonGrid> {
    let lat = read_coord(file, "XLAT")?;
    let lon = read_coord(file, "XLONG")?.mapv(normalize_lon);
    LatLonGrid::new(lat, lon)
}

fn read_coord (file: &netcdf::File, var_name: &str)->Result<Array2<f64>> {
    let (shape, values) = read_values(file, var_name)?;
    let (ny,nx) = match shape.as_slice() {
        [ny,nx] | [_,ny,nx] => (*ny, *nx),
        _ => return Err( shape_mismatch( format!("{var_name} has dimensions {:?}", shape)))
    };
    let values: Vec<f64> = values.into_iter().take(ny*nx).collect();
    Array2::from_shape_vec((ny,nx), values).map_err(|e| decode_error( format!("{var_name}: {e}")))
}

/// the `Times` char array (Time, DateStrLen) as ISO labels, e.g. "2025-10-12_06:00:00" -> "2025-10-12T06:00:00".
/// Files without `Times` have no labels
fn read_times (file: &netcdf::File)->Result<Vec<String>> {
    let Some(var) = file.variable("Times") else { return Ok(Vec::new()) };

    let str_len = match var.dimensions() {
        [_, d] => d.len(),
        _ => return Err( shape_mismatch("Times is not a [Time,DateStrLen] char array"))
    };
    if str_len == 0 {
        return Ok(Vec::new())
    }

    let bytes = var.get_raw_values(..)?;
    Ok( bytes.chunks(str_len).map(time_label).collect() )
}

fn time_label (chars: &[u8])->String {
    let s = String::from_utf8_lossy(chars);
    s.trim_end_matches(|c: char| c == '\0' || c.is_whitespace()).replacen('_', "T", 1)
}

fn check_shape (what: &str, shape: &[usize], expected: &[usize])->Result<()> {
    if shape == expected {
        Ok(())
    } else {
        Err( shape_mismatch( format!("{what} has shape {:?}, expected {:?}", shape, expected)))
    }
}

impl GridSource for WrfSource {
    fn name (&self)->&str { self.name.as_str() }

    fn grid (&self)->&LatLonGrid { &self.grid }

    fn n_times (&self)->usize { self.n_times }

    fn times (&self)->&[String] { self.times.as_slice() }

    fn has_field (&self, key: &FieldKey)->bool { self.fields.contains_key(key) }

    fn field (&self, key: &FieldKey, t: usize)->Result<ArrayView2<'_,f64>> {
        check_time_index(t, self.n_times)?;
        let a = self.fields.get(key).ok_or_else(|| missing_field( format!("{key} in {}", self.name)))?;
        Ok( a.index_axis(Axis(0), t) )
    }

    fn model_field (&self, param: Param, t: usize)->Result<ArrayView3<'_,f64>> {
        check_time_index(t, self.n_times)?;
        let a = self.model_fields.get(&param).ok_or_else(|| missing_field( format!("{} in {}", FieldKey::model(param), self.name)))?;
        Ok( a.index_axis(Axis(0), t) )
    }

    fn has_model_field (&self, param: Param)->bool { self.model_fields.contains_key(&param) }
}
