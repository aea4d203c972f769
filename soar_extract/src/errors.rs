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

pub type Result<T> = std::result::Result<T, SoarExtractError>;

#[derive(Error,Debug)]
pub enum SoarExtractError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("{0}")]
    CommonError( #[from] soar_common::SoarCommonError),

    #[error("grid error {0}")]
    GridError( #[from] soar_grid::SoarGridError),

    #[error("calc error {0}")]
    CalcError( #[from] soar_calc::CalcError),

    #[error("invalid file pattern {0}")]
    PatternError( #[from] regex::Error),

    /// missing or invalid configuration, this is fatal and reported before any item is processed
    #[error("config error {0}")]
    ConfigError(String),

    #[error("no input files {0}")]
    NoInputFiles(String),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

pub fn op_failed (msg: impl ToString)->SoarExtractError {
    SoarExtractError::OpFailed(msg.to_string())
}

pub fn config_error (msg: impl ToString)->SoarExtractError {
    SoarExtractError::ConfigError(msg.to_string())
}
