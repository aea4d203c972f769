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

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// a named location (e.g. a launch site) we extract time series for
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Site {
    #[serde(rename = "Site", alias = "site", alias = "name")]
    pub name: String,

    #[serde(rename = "Latitude", alias = "latitude", alias = "lat")]
    pub lat: f64,

    #[serde(rename = "Longitude", alias = "longitude", alias = "lon")]
    pub lon: f64,
}

impl Site {
    /// name that can be used as part of a filename
    pub fn file_name_component (&self)->String {
        self.name.replace(' ', "_")
    }
}

/// read the site list from a CSV file with (at least) `Site`, `Latitude` and `Longitude` columns
pub fn load_sites (path: impl AsRef<Path>)->Result<Vec<Site>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path.as_ref())?;
    let mut sites = Vec::new();
    for rec in rdr.deserialize() {
        sites.push( rec?);
    }
    Ok(sites)
}
