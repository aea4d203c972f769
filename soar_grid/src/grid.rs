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

use ndarray::{s, Array2, ArrayView2};

use crate::errors::{Result, shape_mismatch};

/// 2D geographic coordinates (degrees) of grid points, indexed as [j,i] (south_north, west_east)
#[derive(Debug,Clone,PartialEq)]
pub struct LatLonGrid {
    lat: Array2<f64>,
    lon: Array2<f64>,
}

impl LatLonGrid {
    pub fn new (lat: Array2<f64>, lon: Array2<f64>)->Result<Self> {
        if lat.shape() != lon.shape() {
            return Err( shape_mismatch( format!("lat {:?} vs lon {:?}", lat.shape(), lon.shape())))
        }
        Ok( LatLonGrid { lat, lon } )
    }

    /// regular grid from 1D latitude (rows) and longitude (columns) axes
    pub fn from_axes (lats: &[f64], lons: &[f64])->Self {
        let shape = (lats.len(), lons.len());
        let lat = Array2::from_shape_fn( shape, |(j,_)| lats[j]);
        let lon = Array2::from_shape_fn( shape, |(_,i)| lons[i]);
        LatLonGrid { lat, lon }
    }

    pub fn lat (&self)->ArrayView2<'_,f64> { self.lat.view() }
    pub fn lon (&self)->ArrayView2<'_,f64> { self.lon.view() }

    /// (ny,nx)
    pub fn shape (&self)->(usize,usize) { self.lat.dim() }

    pub fn is_empty (&self)->bool { self.lat.is_empty() }

    /// index (j,i) of the grid point closest to the given position.
    /// This uses the equirectangular approximation, which is accurate enough for the cell sizes of
    /// regional models. Returns None for empty grids or if no grid point has valid coordinates
    pub fn nearest (&self, lat: f64, lon: f64)->Option<(usize,usize)> {
        let cos_lat = lat.to_radians().cos();
        let mut best: Option<((usize,usize),f64)> = None;

        for ((idx, &glat), &glon) in self.lat.indexed_iter().zip(self.lon.iter()) {
            let dlat = glat - lat;
            let dlon = normalize_lon(glon - lon) * cos_lat;
            let d2 = dlat*dlat + dlon*dlon;

            if d2.is_finite() {
                match best {
                    Some((_,d2_min)) if d2_min <= d2 => {}
                    _ => best = Some((idx, d2))
                }
            }
        }

        best.map(|(idx,_)| idx)
    }

    /// every `stride`-th row and column. A stride of 0 or 1 returns the full grid
    pub fn decimate (&self, stride: usize)->LatLonGrid {
        let st = stride.max(1) as isize;
        LatLonGrid {
            lat: self.lat.slice(s![..;st, ..;st]).to_owned(),
            lon: self.lon.slice(s![..;st, ..;st]).to_owned(),
        }
    }
}

/// map longitude (difference) into [-180,180)
pub fn normalize_lon (lon: f64)->f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// every `stride`-th row and column of a 2D field, matching `LatLonGrid::decimate`
pub fn decimate_field (a: ArrayView2<f64>, stride: usize)->Array2<f64> {
    let st = stride.max(1) as isize;
    a.slice(s![..;st, ..;st]).to_owned()
}
