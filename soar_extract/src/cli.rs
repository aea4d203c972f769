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

use clap::Args;
use tracing::info;

use soar_common::datetime::{parse_yyyymmdd, utc_today};
use crate::{ExtractConfig, ExtractContext};
use crate::errors::Result;

/// command line options shared by all extraction binaries
#[derive(Args,Debug,Clone)]
pub struct ExtractArgs {
    /// RON config file (path or name in the config dirs)
    #[arg(short, long)]
    pub config: Option<String>,

    /// reference date of the forecast run as YYYYMMDD (default: today UTC)
    #[arg(short, long)]
    pub date: Option<String>,

    /// input dir (pattern), overrides the config
    #[arg(long)]
    pub input_dir: Option<String>,

    /// output dir (pattern), overrides the config
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ExtractArgs {
    /// load the config (`default_config` if none was given), apply the overrides and resolve it
    pub fn context (&self, default_config: &str)->Result<ExtractContext> {
        let config_name = self.config.as_deref().unwrap_or(default_config);
        let mut config = ExtractConfig::load(config_name)?;
        self.apply_overrides(&mut config);

        let date = match &self.date {
            Some(s) => parse_yyyymmdd(s)?,
            None => utc_today()
        };
        info!("using config {config_name} for {date}");

        ExtractContext::new(config, date)
    }

    pub fn apply_overrides (&self, config: &mut ExtractConfig) {
        if let Some(dir) = &self.input_dir { config.input_dir = dir.clone() }
        if let Some(dir) = &self.output_dir { config.output_dir = dir.clone() }
    }
}
