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
use soar_extract::{cli::ExtractArgs, init_tracing, sites::extract_site_series};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "write per-site time series of temperature and 10m wind")]
pub struct Args {
    #[command(flatten)]
    pub extract: ExtractArgs,
}

fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();

    let ctx = args.extract.context("arome.ron")?;
    let output = extract_site_series(&ctx)?;
    println!("{}", output.report);
    println!("{} site series written", output.site_files.len());
    Ok(())
}
