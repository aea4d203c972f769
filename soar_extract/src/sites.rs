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

//! per-site time series: nearest grid point values for each named site over all forecast hours

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use tracing::info;

use soar_calc::{kelvin_to_celsius, ms_to_kmh, wind_direction, wind_speed};
use soar_common::fs::filename;
use soar_grid::{GridSource, Site, load_sites, open_source, T2M, U10, V10};
use crate::{BatchReport, ExtractContext, run_batch, write_json};
use crate::errors::{Result, config_error};

/// the values of one forecast hour at a site
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SiteRecord {
    pub hour: usize,
    pub t2m_c: f64,
    pub wspd_ms: f64,
    pub wspd_kmh: f64,
    pub wdir_deg: f64,
}

/// result of a site extraction. The batch report covers input files, `site_files` are the
/// series that were written (one per site)
#[derive(Debug)]
pub struct SiteSeriesOutput {
    pub report: BatchReport<usize>,
    pub site_files: Vec<PathBuf>,
}

/// sample all `sites` at the nearest grid point of `src` (first time step)
pub fn sample_sites (src: &dyn GridSource, sites: &[Site], hour: usize)->Result<Vec<SiteRecord>> {
    let mut records = Vec::with_capacity(sites.len());

    for site in sites {
        let t2 = src.sample_nearest(&T2M, 0, site.lat, site.lon)?;
        let u = src.sample_nearest(&U10, 0, site.lat, site.lon)?;
        let v = src.sample_nearest(&V10, 0, site.lat, site.lon)?;

        let spd = wind_speed(u, v);
        records.push( SiteRecord {
            hour,
            t2m_c: kelvin_to_celsius(t2),
            wspd_ms: spd,
            wspd_kmh: ms_to_kmh(spd),
            wdir_deg: wind_direction(u, v),
        });
    }

    Ok(records)
}

/// `site_<name>.json` with blanks in the site name replaced by '_'
pub fn site_filename (site: &Site)->String {
    format!("site_{}.json", site.file_name_component())
}

/// extract the time series of all sites in the configured site list. A file that cannot be
/// processed does not contribute a record to any site
pub fn extract_site_series (ctx: &ExtractContext)->Result<SiteSeriesOutput> {
    let sites_csv = ctx.config.sites_csv.as_ref().ok_or_else(|| config_error("no sites_csv configured"))?;
    let sites = load_sites(sites_csv).map_err(|e| config_error( format!("cannot read site list {sites_csv}: {e}")))?;
    if sites.is_empty() {
        return Err( config_error( format!("no sites in {sites_csv}")))
    }
    info!("extracting time series for {} sites", sites.len());

    let files = ctx.input_files()?;
    let out_dir = ctx.prepare_output_dir()?;

    let mut series: Vec<Vec<SiteRecord>> = vec![Vec::new(); sites.len()];

    let report = run_batch( &files, |p| filename(p).unwrap_or("?").to_string(), |hour, path| {
        let src = open_source(path)?;
        let records = sample_sites( src.as_ref(), &sites, hour)?;
        let n = records.len();
        for (s,rec) in series.iter_mut().zip(records.into_iter()) {
            s.push(rec)
        }
        Ok::<usize,crate::SoarExtractError>(n)
    });

    let mut site_files = Vec::with_capacity(sites.len());
    for (site,recs) in sites.iter().zip(series.iter()) {
        site_files.push( write_json( out_dir, &site_filename(site), recs)?);
    }

    info!("{} site series written to {:?}", site_files.len(), out_dir);
    Ok( SiteSeriesOutput { report, site_files })
}
