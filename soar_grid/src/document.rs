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

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};
use ndarray::{Array, ArrayD, Dimension, IxDyn};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, shape_mismatch, op_failed};

/// a self describing gridded data container. This is what we write for derived grids, and what
/// `JsonGridSource` reads as (pre-processed) model input.
/// Variable data is stored flattened in row-major order. Non-finite values are stored as `null`
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct GridDocument {
    #[serde(default)]
    pub attrs: BTreeMap<String,String>,

    /// time labels (ISO 8601) of the `time` dimension, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<String>,

    #[serde(default)]
    pub coords: BTreeMap<String,Variable>,

    pub variables: BTreeMap<String,Variable>,
}

impl GridDocument {
    pub fn new ()->Self { Self::default() }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok( serde_json::from_reader( BufReader::new(file))? )
    }

    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string(self)? )
    }

    pub fn set_attr (&mut self, key: impl ToString, value: impl ToString) {
        self.attrs.insert( key.to_string(), value.to_string());
    }

    pub fn add_coord<D: Dimension> (&mut self, name: &str, dims: &[&str], a: &Array<f64,D>)->Result<()> {
        self.coords.insert( name.to_string(), Variable::from_array(dims, a)?);
        Ok(())
    }

    pub fn add_variable<D: Dimension> (&mut self, name: &str, dims: &[&str], a: &Array<f64,D>)->Result<()> {
        self.variables.insert( name.to_string(), Variable::from_array(dims, a)?);
        Ok(())
    }

    pub fn variable_names (&self)->Vec<String> {
        self.variables.keys().cloned().collect()
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Variable {
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    #[serde(with = "nullable_f64")]
    pub data: Vec<f64>,
}

impl Variable {
    pub fn from_array<D: Dimension> (dims: &[&str], a: &Array<f64,D>)->Result<Self> {
        if dims.len() != a.ndim() {
            return Err( shape_mismatch( format!("{} dimension names for array of rank {}", dims.len(), a.ndim())))
        }

        Ok( Variable {
            dims: dims.iter().map(|d| d.to_string()).collect(),
            shape: a.shape().to_vec(),
            data: a.iter().cloned().collect(), // logical (row-major) order regardless of memory layout
        })
    }

    pub fn to_array (&self)->Result<ArrayD<f64>> {
        ArrayD::from_shape_vec( IxDyn(&self.shape), self.data.clone())
            .map_err(|e| shape_mismatch( format!("data length {} for shape {:?}: {e}", self.data.len(), self.shape)))
    }

    pub fn to_array_of<D: Dimension> (&self)->Result<Array<f64,D>> {
        self.to_array()?.into_dimensionality::<D>().map_err(|e| op_failed( format!("rank {} variable: {e}", self.shape.len())))
    }

    pub fn ndim (&self)->usize { self.shape.len() }
}

/// serialize non-finite f64 values as JSON null (JSON has no NaN), and read null back as NaN
mod nullable_f64 {
    use serde::{Deserialize, Deserializer, Serializer, ser::SerializeSeq};

    pub fn serialize<S: Serializer> (data: &Vec<f64>, s: S)->Result<S::Ok,S::Error> {
        let mut seq = s.serialize_seq(Some(data.len()))?;
        for x in data {
            if x.is_finite() { seq.serialize_element(x)? } else { seq.serialize_element(&Option::<f64>::None)? }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>> (d: D)->Result<Vec<f64>,D::Error> {
        let v: Vec<Option<f64>> = Vec::deserialize(d)?;
        Ok( v.into_iter().map(|x| x.unwrap_or(f64::NAN)).collect() )
    }
}
