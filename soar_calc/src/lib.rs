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

//! derived meteorological fields for soaring forecasts: wind speed and (meteorological) wind direction
//! from u/v wind components, and the convective velocity scale W* ("thermal velocity") from surface
//! sensible heat flux, boundary layer height and near surface temperature.
//!
//! All functions are pure and elementwise. The array versions return arrays of exactly the shape of
//! their inputs. Inputs of different shapes are rejected when the input set is constructed, derived
//! field computation itself cannot fail.

use ndarray::{Array, ArrayView, Dimension, Zip};

mod errors;
pub use errors::*;

pub mod constants {
    /// gravitational acceleration [m/s²]
    pub const G: f64 = 9.81;
    /// air density [kg/m³]
    pub const RHO_AIR: f64 = 1.2;
    /// specific heat of air at constant pressure [J/(kg·K)]
    pub const CP_AIR: f64 = 1004.0;

    pub const KELVIN_OFFSET: f64 = 273.15;
    pub const MS_TO_KMH: f64 = 3.6;
}
use constants::*;

/* #region scalar functions ****************************************************************************/

/// wind speed [m/s] for eastward (u) and northward (v) components [m/s]
#[inline]
pub fn wind_speed (u: f64, v: f64)->f64 {
    (u*u + v*v).sqrt()
}

/// meteorological wind direction [deg] the wind is blowing FROM, clockwise from north, in [0,360).
/// Note the argument order of atan2 is (v,u). Calm wind (u = v = 0) yields 270, callers have to
/// treat the direction of near zero speeds as undefined
#[inline]
pub fn wind_direction (u: f64, v: f64)->f64 {
    // the rhs is in [90,450], for which rem_euclid is exact
    (270.0 - v.atan2(u).to_degrees()).rem_euclid(360.0)
}

/// convective velocity scale W* [m/s]:
/// ```text
///   W* = [ (g/T) · (max(H,0) / (ρ·cp)) · PBLH ]^(1/3)
/// ```
/// with H: surface sensible heat flux [W/m²], PBLH: boundary layer height [m], T: temperature [K].
/// Negative (stable) heat flux contributes nothing. Non-finite results (T = 0, negative radicands,
/// NaN inputs) are mapped to 0, i.e. the result is always finite and >= 0
#[inline]
pub fn thermal_velocity (heat_flux: f64, boundary_layer_height: f64, temperature: f64)->f64 {
    let h = if heat_flux > 0.0 { heat_flux } else { 0.0 }; // NaN flux is treated as no flux
    let w = ((G / temperature) * (h / (RHO_AIR * CP_AIR)) * boundary_layer_height).powf(1.0/3.0);

    if w.is_finite() { w } else { 0.0 }
}

#[inline] pub fn kelvin_to_celsius (t: f64)->f64 { t - KELVIN_OFFSET }

#[inline] pub fn ms_to_kmh (spd: f64)->f64 { spd * MS_TO_KMH }

/* #endregion scalar functions */

/* #region field types *********************************************************************************/

/// a wind vector field of eastward (u) and northward (v) components [m/s] with identical shapes
#[derive(Debug,Clone)]
pub struct WindField<D: Dimension> {
    u: Array<f64,D>,
    v: Array<f64,D>,
}

impl<D: Dimension> WindField<D> {
    pub fn new (u: Array<f64,D>, v: Array<f64,D>)->Result<Self> {
        check_shape( "v", u.shape(), v.shape())?;
        Ok( WindField { u, v } )
    }

    pub fn u (&self)->&Array<f64,D> { &self.u }
    pub fn v (&self)->&Array<f64,D> { &self.v }
    pub fn shape (&self)->&[usize] { self.u.shape() }

    pub fn speed (&self)->Array<f64,D> {
        Zip::from(&self.u).and(&self.v).map_collect(|&u,&v| wind_speed(u,v))
    }

    pub fn direction (&self)->Array<f64,D> {
        Zip::from(&self.u).and(&self.v).map_collect(|&u,&v| wind_direction(u,v))
    }

    pub fn into_components (self)->(Array<f64,D>,Array<f64,D>) {
        (self.u, self.v)
    }
}

/// co-located inputs for the thermal velocity computation
#[derive(Debug,Clone)]
pub struct ThermalInputs<D: Dimension> {
    heat_flux: Array<f64,D>,             // W/m²
    boundary_layer_height: Array<f64,D>, // m
    temperature: Array<f64,D>,           // K
}

impl<D: Dimension> ThermalInputs<D> {
    pub fn new (heat_flux: Array<f64,D>, boundary_layer_height: Array<f64,D>, temperature: Array<f64,D>)->Result<Self> {
        check_shape( "boundary_layer_height", heat_flux.shape(), boundary_layer_height.shape())?;
        check_shape( "temperature", heat_flux.shape(), temperature.shape())?;
        Ok( ThermalInputs { heat_flux, boundary_layer_height, temperature } )
    }

    pub fn heat_flux (&self)->&Array<f64,D> { &self.heat_flux }
    pub fn boundary_layer_height (&self)->&Array<f64,D> { &self.boundary_layer_height }
    pub fn temperature (&self)->&Array<f64,D> { &self.temperature }
    pub fn shape (&self)->&[usize] { self.heat_flux.shape() }

    pub fn velocity (&self)->Array<f64,D> {
        Zip::from(&self.heat_flux).and(&self.boundary_layer_height).and(&self.temperature)
            .map_collect(|&h,&z,&t| thermal_velocity(h,z,t))
    }
}

/* #endregion field types */

/* #region array view functions ************************************************************************/

// these are for callers that only hold views (e.g. time slices of 3D source arrays) and don't want to
// construct owned input sets

pub fn wind_speed_field<D: Dimension> (u: ArrayView<f64,D>, v: ArrayView<f64,D>)->Result<Array<f64,D>> {
    check_shape( "v", u.shape(), v.shape())?;
    Ok( Zip::from(u).and(v).map_collect(|&u,&v| wind_speed(u,v)) )
}

pub fn wind_direction_field<D: Dimension> (u: ArrayView<f64,D>, v: ArrayView<f64,D>)->Result<Array<f64,D>> {
    check_shape( "v", u.shape(), v.shape())?;
    Ok( Zip::from(u).and(v).map_collect(|&u,&v| wind_direction(u,v)) )
}

pub fn thermal_velocity_field<D: Dimension> (heat_flux: ArrayView<f64,D>, boundary_layer_height: ArrayView<f64,D>,
                                             temperature: ArrayView<f64,D>)->Result<Array<f64,D>> {
    check_shape( "boundary_layer_height", heat_flux.shape(), boundary_layer_height.shape())?;
    check_shape( "temperature", heat_flux.shape(), temperature.shape())?;
    Ok( Zip::from(heat_flux).and(boundary_layer_height).and(temperature).map_collect(|&h,&z,&t| thermal_velocity(h,z,t)) )
}

/* #endregion array view functions */
