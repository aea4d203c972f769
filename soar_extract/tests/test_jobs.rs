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

use std::{fs, path::{Path, PathBuf}};
use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndarray::{Array3, ArrayD, Dimension, IxDyn};
use soar_grid::{GridDocument, LatLonGrid};
use soar_extract::*;
use soar_extract::{cli::ExtractArgs, grids::*, sites::*, soaring::*, summary::*};

// run with "cargo test test_xx -- --nocapture"

const DIMS: [&str;3] = ["time", "south_north", "west_east"];

fn date ()->NaiveDate { NaiveDate::from_ymd_opt(2025, 10, 12).unwrap() }

/// a 3x4 grid document with `n_times` steps. 2m temperature varies over the grid, wind is uniform
fn input_document (n_times: usize, u: f64, v: f64)->GridDocument {
    let grid = LatLonGrid::from_axes( &[43.0, 43.1, 43.2], &[-1.6, -1.5, -1.4, -1.3]);
    let (ny,nx) = grid.shape();
    let shape = (n_times,ny,nx);

    let mut doc = GridDocument::new();
    doc.add_coord("lat", &["south_north","west_east"], &grid.lat().to_owned()).unwrap();
    doc.add_coord("lon", &["south_north","west_east"], &grid.lon().to_owned()).unwrap();
    doc.times = (0..n_times).map(|t| format!("2025-10-12T{:02}:00:00Z", t+12)).collect();

    let t2 = Array3::<f64>::from_shape_fn(shape, |(_,j,i)| 280.0 + 0.1 * (j*nx + i) as f64);
    doc.add_variable("temperature@2m", &DIMS, &t2).unwrap();
    doc.add_variable("u_wind@10m", &DIMS, &Array3::from_elem(shape, u)).unwrap();
    doc.add_variable("v_wind@10m", &DIMS, &Array3::from_elem(shape, v)).unwrap();
    doc
}

fn soaring_input (n_times: usize)->GridDocument {
    let mut doc = input_document(n_times, 3.0, -4.0);
    let shape = (n_times,3,4);
    doc.add_variable("sensible_heat_flux@sfc", &DIMS, &Array3::from_elem(shape, 200.0)).unwrap();
    doc.add_variable("u_wind@800hPa", &DIMS, &Array3::from_elem(shape, 10.0)).unwrap();
    doc.add_variable("v_wind@800hPa", &DIMS, &Array3::from_elem(shape, 0.0)).unwrap();

    let t2 = Array3::<f64>::from_elem(shape, 300.0);
    doc.add_variable("temperature@2m", &DIMS, &t2).unwrap();

    let pblh = Array3::<f64>::from_shape_fn(shape, |(t,_,_)| if t == 0 { 1500.0 } else { 1000.0 });
    doc.add_variable("boundary_layer_height@sfc", &DIMS, &pblh).unwrap();
    doc
}

fn write_doc (dir: &Path, name: &str, doc: &GridDocument) {
    fs::write( dir.join(name), doc.to_json().unwrap()).unwrap();
}

/// input dir with 3 hourly files, the second one is malformed
fn arome_context (root: &Path)->ExtractContext {
    let input = root.join("input/20251012_00");
    fs::create_dir_all(&input).unwrap();

    write_doc( &input, "arome_f000.json", &input_document(1, 3.0, -4.0));
    fs::write( input.join("arome_f001.json"), "{ \"coords\": [").unwrap();
    write_doc( &input, "arome_f002.json", &input_document(1, 6.0, -8.0));
    fs::write( input.join("readme.txt"), "not an input file").unwrap();

    let mut cfg = ExtractConfig::new(
        format!("{}/input/${{yyyyMMdd}}_00", root.display()),
        format!("{}/output/${{yyyyMMdd}}", root.display())
    );
    cfg.file_pattern = r"^arome_f\d{3}\.json$".to_string();
    cfg.min_file_size = 0;

    ExtractContext::new(cfg, date()).unwrap()
}

#[test]
fn test_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = arome_context(tmp.path());

    let report = extract_summaries(&ctx).unwrap();
    println!("{report}");
    assert_eq!( report.n_total(), 3);
    assert_eq!( report.n_succeeded(), 2);
    let failed: Vec<(&str,&str)> = report.failures().collect();
    assert_eq!( failed.len(), 1);
    assert_eq!( failed[0].0, "arome_f001.json");

    let out = tmp.path().join("output/20251012");
    assert!( !out.join("arome_f001.json").exists());

    let s: HourSummary = serde_json::from_str( &fs::read_to_string(out.join("arome_f000.json")).unwrap()).unwrap();
    assert_eq!( s.hour, 0);
    assert_relative_eq!( s.t2m, 280.55, epsilon = 1e-9);
    assert_relative_eq!( s.u10, 3.0);
    assert_relative_eq!( s.v10, -4.0);
    assert_relative_eq!( s.wspd_10m, 5.0, epsilon = 1e-12);
    assert_relative_eq!( s.wdir_10m, 323.13010235415595, epsilon = 1e-9);

    let s: HourSummary = serde_json::from_str( &fs::read_to_string(out.join("arome_f002.json")).unwrap()).unwrap();
    assert_eq!( s.hour, 2);
    assert_relative_eq!( s.wspd_10m, 10.0, epsilon = 1e-12);

    let status: Vec<HourStatus> = serde_json::from_str( &fs::read_to_string(out.join(METADATA_FILE)).unwrap()).unwrap();
    assert_eq!( status.len(), 3);
    assert!( status[0].success && status[2].success);
    assert!( !status[1].success);
    assert!( status[1].error.is_some());
    assert!( status[0].error.is_none());
}

#[test]
fn test_summary_wind_direction() {
    let tmp = tempfile::tempdir().unwrap();
    let mut doc = input_document(1, 0.0, 0.0);

    // western half from 346°, eastern half from 37°: the mean vector blows from 14°
    let u = Array3::<f64>::from_shape_fn((1,3,4), |(_,_,i)| if i < 2 { 1.0 } else { -3.0 });
    let v = Array3::<f64>::from_elem((1,3,4), -4.0);
    doc.add_variable("u_wind@10m", &DIMS, &u).unwrap();
    doc.add_variable("v_wind@10m", &DIMS, &v).unwrap();
    write_doc( tmp.path(), "arome_f005.json", &doc);

    let s = summarize_file( &tmp.path().join("arome_f005.json"), 5).unwrap();
    assert_eq!( s.hour, 5);
    assert_relative_eq!( s.u10, -1.0, epsilon = 1e-12);
    assert_relative_eq!( s.wdir_10m, 14.036243467926479, epsilon = 1e-9); // not the 191.4° mean of the point directions
    assert_relative_eq!( s.wspd_10m, (17.0f64.sqrt() + 5.0) / 2.0, epsilon = 1e-12);
}

#[test]
fn test_grids() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ctx = arome_context(tmp.path());
    ctx.config.stride = 2;

    let report = extract_grids(&ctx).unwrap();
    println!("{report}");
    assert_eq!( report.n_succeeded(), 2);
    assert_eq!( report.n_failed(), 1);

    let out = tmp.path().join("output/20251012");
    let doc = GridDocument::from_path( out.join("arome_f002.json")).unwrap();
    assert_eq!( doc.variable_names(), vec!["t2m", "u10", "v10", "wdir_10m", "wspd_10m"]);

    let t2m = doc.variables.get("t2m").unwrap();
    assert_eq!( t2m.shape, vec![2,2]);  // 3x4 decimated by 2
    assert_relative_eq!( t2m.data[1], 280.2, epsilon = 1e-9);
    assert_relative_eq!( doc.variables.get("wspd_10m").unwrap().data[0], 10.0, epsilon = 1e-12);
    assert_eq!( doc.coords.get("lat").unwrap().shape, vec![2,2]);
    assert_eq!( doc.attrs.get("hour").map(|s| s.as_str()), Some("2"));
    assert_eq!( doc.attrs.get("stride").map(|s| s.as_str()), Some("2"));

    let index: Vec<GridIndexEntry> = serde_json::from_str( &fs::read_to_string(out.join(INDEX_FILE)).unwrap()).unwrap();
    assert_eq!( index.len(), 2);
    assert_eq!( index[0].hour, 0);
    assert_eq!( index[1].hour, 2);
    assert_eq!( index[1].file, "arome_f002.json");
    assert_eq!( index[1].vars.len(), 5);
    assert!( index[1].size_mb >= 0.0);
}

#[test]
fn test_sites() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ctx = arome_context(tmp.path());

    assert!( matches!( extract_site_series(&ctx), Err(SoarExtractError::ConfigError(_))));

    let csv = tmp.path().join("sites.csv");
    fs::write( &csv, "Site,Latitude,Longitude\nLa Rhune,43.19,-1.32\nBaigura,43.0,-1.6\n").unwrap();
    ctx.config.sites_csv = Some( csv.display().to_string());

    let output = extract_site_series(&ctx).unwrap();
    println!("{}", output.report);
    assert_eq!( output.report.n_succeeded(), 2);
    assert_eq!( output.report.n_failed(), 1);
    assert_eq!( output.site_files.len(), 2);

    let out = tmp.path().join("output/20251012");
    let recs: Vec<SiteRecord> = serde_json::from_str( &fs::read_to_string(out.join("site_La_Rhune.json")).unwrap()).unwrap();
    assert_eq!( recs.len(), 2); // the malformed hour contributes nothing
    assert_eq!( recs[0].hour, 0);
    assert_eq!( recs[1].hour, 2);
    assert_relative_eq!( recs[0].t2m_c, 281.1 - 273.15, epsilon = 1e-9); // nearest point (2,3)
    assert_relative_eq!( recs[0].wspd_ms, 5.0, epsilon = 1e-12);
    assert_relative_eq!( recs[0].wspd_kmh, 18.0, epsilon = 1e-9);
    assert_relative_eq!( recs[1].wspd_kmh, 36.0, epsilon = 1e-9);

    let recs: Vec<SiteRecord> = serde_json::from_str( &fs::read_to_string(out.join("site_Baigura.json")).unwrap()).unwrap();
    assert_relative_eq!( recs[0].t2m_c, 280.0 - 273.15, epsilon = 1e-9); // nearest point (0,0)
}

#[test]
fn test_soaring() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("wrf");
    fs::create_dir_all(&input).unwrap();

    write_doc( &input, "wrfout_d01_2025-10-12.json", &soaring_input(2));
    write_doc( &input, "wrfout_d01_nopblh.json", &input_document(1, 3.0, -4.0)); // valid document, missing fields
    write_doc( &input, "wrfout_d02_2025-10-12.json", &soaring_input(1)); // not matched by the pattern

    let mut cfg = ExtractConfig::new( input.display().to_string(), tmp.path().join("out").display().to_string());
    cfg.file_pattern = r"^wrfout_d01.*\.json$".to_string();
    cfg.min_file_size = 0;
    let ctx = ExtractContext::new(cfg, date()).unwrap();

    let report = extract_soaring(&ctx).unwrap();
    println!("{report}");
    assert_eq!( report.n_total(), 2);
    assert_eq!( report.n_failed(), 1);
    assert_eq!( report.failures().next().unwrap().0, "wrfout_d01_nopblh.json");

    let (_,res) = report.succeeded().next().unwrap();
    assert_eq!( res.output_file, "soaring_d01_2025-10-12.json");
    assert_relative_eq!( res.pblh_max, 1500.0);
    assert_relative_eq!( res.w_star_max, 2.0117994396195433, epsilon = 1e-9);

    let doc = GridDocument::from_path( tmp.path().join("out").join(&res.output_file)).unwrap();
    assert_eq!( doc.times.len(), 2);
    assert_eq!( doc.attrs.get("pressure_level_hpa").map(|s| s.as_str()), Some("800"));
    assert!( doc.attrs.contains_key("description"));
    assert_eq!( doc.attrs.get("source").map(|s| s.as_str()), Some("wrfout_d01_2025-10-12.json"));

    for name in ["pblh", "w_star", "wspd_10m", "wdir_10m", "wspd_800hpa", "wdir_800hpa"] {
        let var = doc.variables.get(name).unwrap();
        assert_eq!( var.dims, vec!["time", "south_north", "west_east"]);
        assert_eq!( var.shape, vec![2,3,4]);
    }

    let wspd = doc.variables.get("wspd_800hpa").unwrap();
    assert_relative_eq!( wspd.data[0], 10.0, epsilon = 1e-12);
    let wdir = doc.variables.get("wdir_800hpa").unwrap();
    assert_relative_eq!( wdir.data[0], 270.0, epsilon = 1e-9);

    let w_star = doc.variables.get("w_star").unwrap();
    assert_relative_eq!( w_star.data[0], 2.0117994396195433, epsilon = 1e-9);
    assert!( w_star.data[12] < w_star.data[0]); // second step has a lower boundary layer
}

/// NC_CHAR element for the WRF `Times` variable
#[derive(Clone,Copy)]
#[repr(transparent)]
struct NcChar(u8);

unsafe impl netcdf::NcTypeDescriptor for NcChar {
    fn type_descriptor ()->netcdf::types::NcVariableType { netcdf::types::NcVariableType::Char }
}

fn put_f32 (file: &mut netcdf::FileMut, name: &str, dims: &[&str], f: impl Fn(&[usize])->f32) {
    let shape: Vec<usize> = dims.iter().map(|d| file.dimension_len(d).unwrap()).collect();
    let values: Vec<f32> = ArrayD::<f32>::from_shape_fn( IxDyn(&shape), |idx| f(idx.slice())).iter().copied().collect();
    file.add_variable::<f32>(name, dims).unwrap().put_values(&values, ..).unwrap();
}

/// WRF output with the same surface fields as `soaring_input(2)` and a uniform 10 m/s westerly on all model levels
fn write_wrfout (path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    for (dim, len) in [("Time",2), ("DateStrLen",19), ("bottom_top",3), ("south_north",3), ("west_east",4), ("south_north_stag",4), ("west_east_stag",5)] {
        file.add_dimension(dim, len).unwrap();
    }

    let times: Vec<NcChar> = ["2025-10-12_12:00:00", "2025-10-12_13:00:00"].iter().flat_map(|s| s.bytes()).map(NcChar).collect();
    file.add_variable::<NcChar>("Times", &["Time","DateStrLen"]).unwrap().put_values(&times, ..).unwrap();

    let sfc = ["Time","south_north","west_east"];
    put_f32( &mut file, "XLAT", &sfc, |idx| 43.0 + 0.1 * idx[1] as f32);
    put_f32( &mut file, "XLONG", &sfc, |idx| -1.6 + 0.1 * idx[2] as f32);
    put_f32( &mut file, "T2", &sfc, |_| 300.0);
    put_f32( &mut file, "U10", &sfc, |_| 3.0);
    put_f32( &mut file, "V10", &sfc, |_| -4.0);
    put_f32( &mut file, "HFX", &sfc, |_| 200.0);
    put_f32( &mut file, "PBLH", &sfc, |idx| if idx[0] == 0 { 1500.0 } else { 1000.0 });

    put_f32( &mut file, "P", &["Time","bottom_top","south_north","west_east"], |_| 0.0);
    put_f32( &mut file, "PB", &["Time","bottom_top","south_north","west_east"], |idx| [95000.0, 85000.0, 75000.0][idx[1]]);
    put_f32( &mut file, "U", &["Time","bottom_top","south_north","west_east_stag"], |_| 10.0);
    put_f32( &mut file, "V", &["Time","bottom_top","south_north_stag","west_east"], |_| 0.0);
}

#[test]
fn test_soaring_wrfout() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("wrf");
    fs::create_dir_all(&input).unwrap();

    write_wrfout( &input.join("wrfout_d01_2025-10-12_12.nc"));
    fs::write( input.join("wrfout_d01_2025-10-12_13.nc"), "truncated").unwrap();

    let mut cfg: ExtractConfig = ron::de::from_str( &fs::read_to_string("../configs/wrf_soaring.ron").unwrap()).unwrap();
    cfg.input_dir = input.display().to_string();
    cfg.output_dir = tmp.path().join("out").display().to_string();
    let ctx = ExtractContext::new(cfg, date()).unwrap();

    let report = extract_soaring(&ctx).unwrap();
    println!("{report}");
    assert_eq!( report.n_total(), 2);
    assert_eq!( report.n_failed(), 1);
    assert_eq!( report.failures().next().unwrap().0, "wrfout_d01_2025-10-12_13.nc");

    let (_,res) = report.succeeded().next().unwrap();
    assert_eq!( res.output_file, "soaring_d01_2025-10-12_12.json");
    assert_relative_eq!( res.pblh_max, 1500.0);
    assert_relative_eq!( res.w_star_max, 2.0117994396195433, epsilon = 1e-9);

    let doc = GridDocument::from_path( tmp.path().join("out").join(&res.output_file)).unwrap();
    assert_eq!( doc.times, vec!["2025-10-12T12:00:00", "2025-10-12T13:00:00"]);
    assert_eq!( doc.attrs.get("source").map(|s| s.as_str()), Some("wrfout_d01_2025-10-12_12.nc"));

    let wspd = doc.variables.get("wspd_800hpa").unwrap();
    assert_eq!( wspd.shape, vec![2,3,4]);
    assert_relative_eq!( wspd.data[23], 10.0, epsilon = 1e-9); // interpolated from model levels
    let wdir = doc.variables.get("wdir_800hpa").unwrap();
    assert_relative_eq!( wdir.data[0], 270.0, epsilon = 1e-9);
}

#[test]
fn test_fatal_config() {
    let tmp = tempfile::tempdir().unwrap();

    // input dir does not exist
    let cfg = ExtractConfig::new( tmp.path().join("missing").display().to_string(), tmp.path().join("out").display().to_string());
    assert!( matches!( ExtractContext::new(cfg, date()), Err(SoarExtractError::ConfigError(_))));

    // no matching files
    let cfg = ExtractConfig::new( tmp.path().display().to_string(), tmp.path().join("out").display().to_string());
    let ctx = ExtractContext::new(cfg, date()).unwrap();
    assert!( matches!( extract_summaries(&ctx), Err(SoarExtractError::NoInputFiles(_))));
    assert!( !tmp.path().join("out").exists()); // nothing was processed
}

#[test]
fn test_cli_args() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("20251012");
    fs::create_dir_all(&input).unwrap();

    let cfg_path = tmp.path().join("test.ron");
    fs::write( &cfg_path, r#"ExtractConfig( input_dir: "/nowhere/${yyyyMMdd}", output_dir: "/nowhere/out", stride: 4 )"#).unwrap();

    let args = ExtractArgs {
        config: Some( cfg_path.display().to_string()),
        date: Some("20251012".to_string()),
        input_dir: Some( format!("{}/${{yyyyMMdd}}", tmp.path().display())),
        output_dir: None,
    };
    let ctx = args.context("arome.ron").unwrap();
    assert_eq!( ctx.input_dir, input);
    assert_eq!( ctx.output_dir, PathBuf::from("/nowhere/out"));
    assert_eq!( ctx.config.stride, 4);
    assert_eq!( ctx.date, date());

    let args = ExtractArgs { date: Some("2025-10-12".to_string()), ..args };
    assert!( args.context("arome.ron").is_err());

    let args = ExtractArgs { config: Some("no_such_config.ron".to_string()), date: None, input_dir: None, output_dir: None };
    assert!( matches!( args.context("arome.ron"), Err(SoarExtractError::CommonError(_))));
}
