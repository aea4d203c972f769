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

use std::{fmt, str::FromStr};
use serde::{Deserialize,Serialize};
use strum::{Display,EnumString,IntoStaticStr};

use crate::errors::SoarGridError;

/// the physical quantities we extract from model output
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Display,EnumString,IntoStaticStr,Serialize,Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Temperature,         // K
    UWind,               // m/s eastward
    VWind,               // m/s northward
    SensibleHeatFlux,    // W/m²
    BoundaryLayerHeight, // m
    Pressure,            // hPa
}

/// vertical location of a 2D field
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Level {
    Surface,
    AboveGround(u32), // meters
    Isobaric(u32),    // hPa
    Model,            // all native model levels (3D field)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Surface => write!(f, "sfc"),
            Level::AboveGround(m) => write!(f, "{m}m"),
            Level::Isobaric(hpa) => write!(f, "{hpa}hPa"),
            Level::Model => write!(f, "model"),
        }
    }
}

impl FromStr for Level {
    type Err = SoarGridError;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        let invalid = || SoarGridError::InvalidFieldKey(format!("unknown level '{s}'"));

        match s {
            "sfc" => Ok(Level::Surface),
            "model" => Ok(Level::Model),
            _ => {
                if let Some(n) = s.strip_suffix("hPa") {
                    n.parse::<u32>().map(Level::Isobaric).map_err(|_| invalid())
                } else if let Some(n) = s.strip_suffix('m') {
                    n.parse::<u32>().map(Level::AboveGround).map_err(|_| invalid())
                } else {
                    Err(invalid())
                }
            }
        }
    }
}

/// identifies a field within a grid source, string form is `❬param❭@❬level❭` (e.g. "u_wind@10m")
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct FieldKey {
    pub param: Param,
    pub level: Level,
}

impl FieldKey {
    pub const fn new (param: Param, level: Level)->Self { FieldKey { param, level } }

    pub const fn above_ground (param: Param, meters: u32)->Self { FieldKey::new( param, Level::AboveGround(meters)) }
    pub const fn isobaric (param: Param, hpa: u32)->Self { FieldKey::new( param, Level::Isobaric(hpa)) }
    pub const fn surface (param: Param)->Self { FieldKey::new( param, Level::Surface) }
    pub const fn model (param: Param)->Self { FieldKey::new( param, Level::Model) }

    pub fn is_model_level (&self)->bool { self.level == Level::Model }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.param, self.level)
    }
}

impl FromStr for FieldKey {
    type Err = SoarGridError;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        let (p, l) = s.split_once('@').ok_or_else(|| SoarGridError::InvalidFieldKey(s.to_string()))?;
        let param = Param::from_str(p).map_err(|_| SoarGridError::InvalidFieldKey(format!("unknown parameter '{p}'")))?;
        let level = Level::from_str(l)?;
        Ok( FieldKey { param, level } )
    }
}

// the surface fields of the common extraction jobs
pub const T2M: FieldKey = FieldKey::above_ground( Param::Temperature, 2);
pub const U10: FieldKey = FieldKey::above_ground( Param::UWind, 10);
pub const V10: FieldKey = FieldKey::above_ground( Param::VWind, 10);
pub const HFX: FieldKey = FieldKey::surface( Param::SensibleHeatFlux);
pub const PBLH: FieldKey = FieldKey::surface( Param::BoundaryLayerHeight);
