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

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum CalcError {
    #[error("shape mismatch: {name} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch { name: &'static str, expected: Vec<usize>, found: Vec<usize> },
}

pub(crate) fn check_shape (name: &'static str, expected: &[usize], found: &[usize])->Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err( CalcError::ShapeMismatch { name, expected: expected.to_vec(), found: found.to_vec() })
    }
}
