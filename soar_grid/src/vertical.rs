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

use ndarray::{Array2, ArrayView1, ArrayView3, Axis, Zip};

use crate::errors::{Result, shape_mismatch};

/// interpolate a 3D field on native model levels [k,j,i] to the isobaric surface `target` (hPa),
/// using the pressure [hPa] of each model level grid point.
///
/// Interpolation is linear in pressure between the two levels that bracket the target value. Columns
/// that do not reach the target pressure (e.g. 800hPa below mountain terrain) yield NaN
pub fn interpolate_to_pressure (field: ArrayView3<f64>, pressure: ArrayView3<f64>, target: f64)->Result<Array2<f64>> {
    if field.shape() != pressure.shape() {
        return Err( shape_mismatch( format!("field {:?} vs pressure {:?}", field.shape(), pressure.shape())))
    }

    let (_, ny, nx) = field.dim();
    let mut result = Array2::<f64>::from_elem((ny,nx), f64::NAN);

    Zip::from(&mut result)
        .and(field.lanes(Axis(0)))
        .and(pressure.lanes(Axis(0)))
        .for_each(|r, f, p| *r = interpolate_column(f, p, target));

    Ok(result)
}

fn interpolate_column (f: ArrayView1<f64>, p: ArrayView1<f64>, target: f64)->f64 {
    for k in 1..p.len() {
        let (p0, p1) = (p[k-1], p[k]);
        let (f0, f1) = (f[k-1], f[k]);

        if p0 == target { return f0 }
        if p1 == target { return f1 }

        if (p0 - target) * (p1 - target) < 0.0 { // strictly bracketed (works for both level orders)
            let w = (target - p0) / (p1 - p0);
            return f0 + w * (f1 - f0)
        }
    }

    if p.len() == 1 && p[0] == target { f[0] } else { f64::NAN }
}
