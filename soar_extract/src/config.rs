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

use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use soar_common::{datetime::{expand_date_pattern, fmt_yyyymmdd}, fs::{ensure_writable_dir, matching_files_in_dir}};
use crate::errors::{Result, SoarExtractError, config_error};

/// the configuration of an extraction job. Directory names are patterns that can contain
/// `${yyyyMMdd}`, `${yyyy}`, `${MM}` or `${dd}` which are expanded with the reference date
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ExtractConfig {
    pub input_dir: String,
    pub output_dir: String,

    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// input files that are smaller (e.g. still being downloaded) are ignored
    #[serde(default = "default_min_file_size")]
    pub min_file_size: u64,

    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// CSV with `Site`, `Latitude` and `Longitude` columns (only used for site time series)
    #[serde(default)]
    pub sites_csv: Option<String>,

    /// grid decimation factor for per-hour grids, 1 is full resolution
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// isobaric level (hPa) of the upper wind in soaring parameter grids
    #[serde(default = "default_pressure_level")]
    pub pressure_level: u32,

    /// soaring output file names are input file names with `input_token` replaced by `output_token`
    #[serde(default = "default_input_token")]
    pub input_token: String,

    #[serde(default = "default_output_token")]
    pub output_token: String,
}

fn default_file_pattern ()->String { r"^arome.*\.grib2$".to_string() }
fn default_min_file_size ()->u64 { 1_000_000 }
fn default_output_prefix ()->String { "arome".to_string() }
fn default_stride ()->usize { 1 }
fn default_pressure_level ()->u32 { 800 }
fn default_input_token ()->String { "wrfout".to_string() }
fn default_output_token ()->String { "soaring".to_string() }

impl ExtractConfig {
    pub fn new (input_dir: impl ToString, output_dir: impl ToString)->Self {
        ExtractConfig {
            input_dir: input_dir.to_string(),
            output_dir: output_dir.to_string(),
            file_pattern: default_file_pattern(),
            min_file_size: default_min_file_size(),
            output_prefix: default_output_prefix(),
            sites_csv: None,
            stride: default_stride(),
            pressure_level: default_pressure_level(),
            input_token: default_input_token(),
            output_token: default_output_token(),
        }
    }

    /// load from a RON file, see `soar_common::config::load_config` for the lookup order
    pub fn load (filename: &str)->Result<Self> {
        Ok( soar_common::config::load_config(filename)? )
    }
}

/// a config resolved for a reference date. Creating it checks everything a job needs before
/// it starts to process items
#[derive(Debug,Clone)]
pub struct ExtractContext {
    pub config: ExtractConfig,
    pub date: NaiveDate,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub file_regex: Regex,
}

impl ExtractContext {
    pub fn new (config: ExtractConfig, date: NaiveDate)->Result<Self> {
        let input_dir = PathBuf::from( expand_date_pattern( &config.input_dir, &date)?);
        let output_dir = PathBuf::from( expand_date_pattern( &config.output_dir, &date)?);
        let file_regex = Regex::new( &config.file_pattern)?;

        if !input_dir.is_dir() {
            return Err( config_error( format!("input dir {:?} does not exist", input_dir)))
        }
        if config.output_prefix.is_empty() {
            return Err( config_error("empty output_prefix"))
        }
        if config.input_token.is_empty() {
            return Err( config_error("empty input_token"))
        }

        debug!("{} input: {:?}, output: {:?}", fmt_yyyymmdd(&date), input_dir, output_dir);
        Ok( ExtractContext { config, date, input_dir, output_dir, file_regex } )
    }

    /// the sorted list of input files. An empty list is a configuration error
    pub fn input_files (&self)->Result<Vec<PathBuf>> {
        let files = matching_files_in_dir( &self.input_dir, &self.file_regex, self.config.min_file_size)?;
        if files.is_empty() {
            return Err( SoarExtractError::NoInputFiles(
                format!("no files matching '{}' in {:?}", self.config.file_pattern, self.input_dir)))
        }
        info!("found {} input files in {:?}", files.len(), self.input_dir);
        Ok(files)
    }

    /// create the output dir if it does not exist yet
    pub fn prepare_output_dir (&self)->Result<&Path> {
        ensure_writable_dir( &self.output_dir)
            .map_err(|e| config_error( format!("output dir {:?} not writable: {e}", self.output_dir)))?;
        Ok( self.output_dir.as_path() )
    }

    /// `<prefix>_f<hhh>.json`
    pub fn hour_filename (&self, hour: usize)->String {
        format!("{}_f{:03}.json", self.config.output_prefix, hour)
    }
}
