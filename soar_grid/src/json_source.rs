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

use std::{collections::HashMap, path::Path, str::FromStr};
use ndarray::{Array3, Array4, ArrayView2, ArrayView3, Axis, Ix1, Ix2, Ix3, Ix4};
use tracing::debug;

use crate::{GridSource, LatLonGrid, FieldKey, Param, GridDocument, check_time_index};
use crate::errors::{Result, missing_field, shape_mismatch, decode_error};

/// a grid source backed by a `GridDocument` JSON file whose variables are named by their
/// `FieldKey` (e.g. "temperature@2m"). Coordinates are given by `lat` and `lon` coords, either as
/// 2D [y,x] arrays or as 1D axes. 2D fields have dims [time,y,x] (or [y,x] for a single time step),
/// model level fields [time,level,y,x] (or [level,y,x])
#[derive(Debug)]
pub struct JsonGridSource {
    name: String,
    grid: LatLonGrid,
    n_times: usize,
    times: Vec<String>,
    fields: HashMap<FieldKey,Array3<f64>>,
    model_fields: HashMap<Param,Array4<f64>>,
}

impl JsonGridSource {
    pub fn open (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let doc = GridDocument::from_path(path)?;
        let name = soar_common::fs::filename(&path).unwrap_or("?").to_string();
        Self::from_document( name, doc)
    }

    pub fn from_document (name: String, doc: GridDocument)->Result<Self> {
        let grid = read_grid(&doc)?;
        let (ny,nx) = grid.shape();

        let mut fields: HashMap<FieldKey,Array3<f64>> = HashMap::new();
        let mut model_fields: HashMap<Param,Array4<f64>> = HashMap::new();
        let mut n_times: Option<usize> = None;

        for (var_name, var) in &doc.variables {
            let key = match FieldKey::from_str(var_name) {
                Ok(key) => key,
                Err(_) => { debug!("ignoring variable {var_name} in {name}"); continue }
            };

            let nt = if key.is_model_level() {
                let a: Array4<f64> = match var.ndim() {
                    3 => var.to_array_of::<Ix3>()?.insert_axis(Axis(0)),
                    4 => var.to_array_of::<Ix4>()?,
                    n => return Err( shape_mismatch( format!("{var_name} has rank {n}")))
                };
                check_spatial( var_name, &a.shape()[2..], ny, nx)?;
                let nt = a.len_of(Axis(0));
                model_fields.insert( key.param, a);
                nt

            } else {
                let a: Array3<f64> = match var.ndim() {
                    2 => var.to_array_of::<Ix2>()?.insert_axis(Axis(0)),
                    3 => var.to_array_of::<Ix3>()?,
                    n => return Err( shape_mismatch( format!("{var_name} has rank {n}")))
                };
                check_spatial( var_name, &a.shape()[1..], ny, nx)?;
                let nt = a.len_of(Axis(0));
                fields.insert( key, a);
                nt
            };

            match n_times {
                None => n_times = Some(nt),
                Some(n) if n != nt => return Err( shape_mismatch( format!("{var_name} has {nt} time steps, expected {n}"))),
                _ => {}
            }
        }

        let n_times = n_times.ok_or_else(|| missing_field( format!("no field variables in {name}")))?;
        if !doc.times.is_empty() && doc.times.len() != n_times {
            return Err( shape_mismatch( format!("{} time labels for {n_times} time steps", doc.times.len())))
        }

        Ok( JsonGridSource { name, grid, n_times, times: doc.times, fields, model_fields } )
    }
}

fn read_grid (doc: &GridDocument)->Result<LatLonGrid> {
    let lat = doc.coords.get("lat").ok_or_else(|| missing_field("lat coordinate"))?;
    let lon = doc.coords.get("lon").ok_or_else(|| missing_field("lon coordinate"))?;

    match (lat.ndim(), lon.ndim()) {
        (1,1) => {
            let lats = lat.to_array_of::<Ix1>()?;
            let lons = lon.to_array_of::<Ix1>()?;
            Ok( LatLonGrid::from_axes( lats.as_slice().unwrap_or(&[]), lons.as_slice().unwrap_or(&[])) )
        }
        (2,2) => LatLonGrid::new( lat.to_array_of::<Ix2>()?, lon.to_array_of::<Ix2>()?),
        (a,b) => Err( decode_error( format!("unsupported coordinate ranks lat:{a}, lon:{b}")))
    }
}

fn check_spatial (var_name: &str, shape: &[usize], ny: usize, nx: usize)->Result<()> {
    if shape == [ny,nx] {
        Ok(())
    } else {
        Err( shape_mismatch( format!("{var_name} grid {:?} does not match coordinates [{ny}, {nx}]", shape)))
    }
}

impl GridSource for JsonGridSource {
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
