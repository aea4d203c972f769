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

pub type Result<T> = std::result::Result<T, SoarCommonError>;

#[derive(Error,Debug)]
pub enum SoarCommonError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config parse error {0}")]
    ConfigParseError( #[from] ron::error::SpannedError),

    #[error("config not found {0}")]
    ConfigNotFound(String),

    #[error("invalid pattern {0}")]
    PatternError(String),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

pub fn op_failed (msg: impl ToString)->SoarCommonError {
    SoarCommonError::OpFailed(msg.to_string())
}

pub fn config_not_found (msg: impl ToString)->SoarCommonError {
    SoarCommonError::ConfigNotFound(msg.to_string())
}

pub fn pattern_error (msg: impl ToString)->SoarCommonError {
    SoarCommonError::PatternError(msg.to_string())
}
