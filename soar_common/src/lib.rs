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

#![allow(unused)]

pub mod macros;
pub mod errors;
pub mod fs;
pub mod datetime;
pub mod config;

pub use errors::*;

// a global fn that can be used with serde(skip_serializing_if="soar_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// a simple incremental min/max/avg accumulator that ignores non-finite observations
/// (model output uses NaN for undefined grid points)
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::NAN, max: f64::NAN, avg: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        if !x.is_finite() { return }
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    pub fn add_all<'a> (&mut self, xs: impl IntoIterator<Item=&'a f64>) {
        for x in xs { self.add(*x) }
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

impl Default for MinMaxAvg {
    fn default()->Self { Self::new() }
}

impl<'a> FromIterator<&'a f64> for MinMaxAvg {
    fn from_iter<I: IntoIterator<Item=&'a f64>> (iter: I)->Self {
        let mut acc = MinMaxAvg::new();
        acc.add_all(iter);
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_avg() {
        let xs = [1.0, f64::NAN, 3.0, f64::INFINITY, 5.0];
        let acc: MinMaxAvg = xs.iter().collect();
        assert_eq!(acc.n, 3);
        assert_eq!(acc.min, 1.0);
        assert_eq!(acc.max, 5.0);
        assert!((acc.avg - 3.0).abs() < 1e-12);

        let empty = MinMaxAvg::new();
        assert!(empty.is_empty());
        assert!(empty.avg.is_nan());
    }
}
