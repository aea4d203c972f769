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

use std::{collections::HashMap, fs::File, io::BufReader, path::Path};
use ndarray::{Array2, ArrayView2};
use tracing::{debug, warn};

use crate::{GridSource, LatLonGrid, FieldKey, Level, Param, check_time_index, normalize_lon};
use crate::errors::{Result, missing_field, decode_error};

// GRIB2 surface types (code table 4.5)
const SFC_GROUND: u8 = 1;
const SFC_ISOBARIC: u8 = 100;
const SFC_HEIGHT_ABOVE_GROUND: u8 = 103;

/// (discipline, parameter category, parameter number) -> Param, from GRIB2 code table 4.2
fn param_for (discipline: u8, category: u8, number: u8)->Option<Param> {
    match (discipline, category, number) {
        (0,0,0) => Some(Param::Temperature),           // TMP [K]
        (0,0,11) => Some(Param::SensibleHeatFlux),     // SHTFL [W/m²]
        (0,2,2) => Some(Param::UWind),                 // UGRD [m/s]
        (0,2,3) => Some(Param::VWind),                 // VGRD [m/s]
        (0,3,0) => Some(Param::Pressure),              // PRES [Pa]
        (0,3,18) => Some(Param::BoundaryLayerHeight),  // HPBL [m]
        _ => None
    }
}

fn level_for (surface_type: u8, value: f64)->Option<Level> {
    match surface_type {
        SFC_GROUND => Some(Level::Surface),
        SFC_HEIGHT_ABOVE_GROUND if value.is_finite() && value >= 0.0 => Some( Level::AboveGround( value.round() as u32)),
        SFC_ISOBARIC if value.is_finite() && value > 0.0 => Some( Level::Isobaric( (value / 100.0).round() as u32)), // Pa -> hPa
        _ => None
    }
}

/// a single forecast step GRIB2 file (e.g. `arome_f012.grib2`). Only messages for known
/// parameters/levels are decoded, everything else is skipped.
/// All decoded fields have to be on the same grid
#[derive(Debug)]
pub struct GribSource {
    name: String,
    grid: LatLonGrid,
    fields: HashMap<FieldKey,Array2<f64>>,
}

impl GribSource {
    pub fn open (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let name = soar_common::fs::filename(&path).unwrap_or("?").to_string();

        let reader = BufReader::new( File::open(path)?);
        let grib2 = grib::from_reader(reader)?;

        let mut grid: Option<LatLonGrid> = None;
        let mut fields: HashMap<FieldKey,Array2<f64>> = HashMap::new();

        for (_idx, submessage) in grib2.iter() {
            let discipline = submessage.indicator().discipline;
            let prod_def = submessage.prod_def();

            let param = match (prod_def.parameter_category(), prod_def.parameter_number()) {
                (Some(c), Some(n)) => param_for(discipline, c, n),
                _ => None
            };
            let level = prod_def.fixed_surfaces().and_then(|(first,_)| level_for(first.surface_type, first.value()));

            let key = match (param, level) {
                (Some(param), Some(level)) => FieldKey::new(param, level),
                _ => continue
            };
            if fields.contains_key(&key) {
                warn!("duplicate {key} in {name} ignored");
                continue
            }

            let (ni, nj) = submessage.grid_shape()?;

            if grid.is_none() {
                let (lats, lons): (Vec<f64>,Vec<f64>) = submessage.latlons()?
                    .map(|(lat,lon)| (lat as f64, normalize_lon(lon as f64)))
                    .unzip();
                let lat = Array2::from_shape_vec((nj,ni), lats).map_err(|e| decode_error( format!("{key} coordinates: {e}")))?;
                let lon = Array2::from_shape_vec((nj,ni), lons).map_err(|e| decode_error( format!("{key} coordinates: {e}")))?;
                grid = Some( LatLonGrid::new(lat, lon)?);
            }

            let decoder = grib::Grib2SubmessageDecoder::from(submessage)?;
            let mut values: Vec<f64> = decoder.dispatch()?.map(|v| v as f64).collect();
            if key.param == Param::Pressure {
                for v in values.iter_mut() { *v /= 100.0 } // we keep pressure in hPa
            }

            let a = Array2::from_shape_vec((nj,ni), values).map_err(|e| decode_error( format!("{key} values: {e}")))?;
            if let Some(g) = &grid {
                if g.shape() != a.dim() {
                    return Err( decode_error( format!("{key} grid {:?} differs from {:?}", a.dim(), g.shape())))
                }
            }

            debug!("decoded {key} {:?} from {name}", a.dim());
            fields.insert( key, a);
        }

        let grid = grid.ok_or_else(|| missing_field( format!("no supported fields in {name}")))?;
        Ok( GribSource { name, grid, fields } )
    }

    pub fn field_keys (&self)->Vec<FieldKey> {
        self.fields.keys().cloned().collect()
    }
}

impl GridSource for GribSource {
    fn name (&self)->&str { self.name.as_str() }

    fn grid (&self)->&LatLonGrid { &self.grid }

    fn n_times (&self)->usize { 1 }

    fn has_field (&self, key: &FieldKey)->bool { self.fields.contains_key(key) }

    fn field (&self, key: &FieldKey, t: usize)->Result<ArrayView2<'_,f64>> {
        check_time_index(t, 1)?;
        let a = self.fields.get(key).ok_or_else(|| missing_field( format!("{key} in {}", self.name)))?;
        Ok( a.view() )
    }
}
