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

use thiserror::Error;
use soar_common::map_to_opaque_error;

pub type Result<T> = std::result::Result<T, SoarGridError>;

#[derive(Error,Debug)]
pub enum SoarGridError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("decode error {0}")]
    DecodeError(String),

    #[error("unsupported format {0}")]
    UnsupportedFormat(String),

    #[error("missing field {0}")]
    MissingField(String),

    #[error("invalid field key {0}")]
    InvalidFieldKey(String),

    #[error("shape mismatch {0}")]
    ShapeMismatch(String),

    #[error("time index {0} out of range (0..{1})")]
    TimeOutOfRange(usize,usize),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

map_to_opaque_error!(grib::GribError => SoarGridError::DecodeError);
map_to_opaque_error!(netcdf::Error => SoarGridError::DecodeError);

pub fn op_failed (msg: impl ToString)->SoarGridError {
    SoarGridError::OpFailed(msg.to_string())
}

pub fn missing_field (msg: impl ToString)->SoarGridError {
    SoarGridError::MissingField(msg.to_string())
}

pub fn decode_error (msg: impl ToString)->SoarGridError {
    SoarGridError::DecodeError(msg.to_string())
}

pub fn shape_mismatch (msg: impl ToString)->SoarGridError {
    SoarGridError::ShapeMismatch(msg.to_string())
}
