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

use anyhow::Result;
use clap::Parser;
use soar_extract::{cli::ExtractArgs, init_tracing, soaring::extract_soaring};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "write soaring parameters (PBLH, W*, surface and upper level wind) for each model output file")]
pub struct Args {
    #[command(flatten)]
    pub extract: ExtractArgs,
}

fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();

    let ctx = args.extract.context("wrf_soaring.ron")?;
    let report = extract_soaring(&ctx)?;
    for (_,res) in report.succeeded() {
        println!("{}: max PBLH {:.0} m, max W* {:.2} m/s", res.output_file, res.pblh_max, res.w_star_max);
    }
    println!("{report}");
    Ok(())
}
