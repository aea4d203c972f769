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

use std::fs;
use regex::Regex;
use serde::Deserialize;
use soar_common::fs::{matching_files_in_dir, store_file_contents_in_dir, ensure_writable_dir, filename};
use soar_common::config::{load_config, load_config_from_path};

// run with "cargo test test_xx -- --nocapture"

#[test]
fn test_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    fs::write( d.join("arome_f002.grib2"), vec![0u8; 64]).unwrap();
    fs::write( d.join("arome_f000.grib2"), vec![0u8; 64]).unwrap();
    fs::write( d.join("arome_f001.grib2"), vec![0u8; 8]).unwrap(); // too small
    fs::write( d.join("other.grib2"), vec![0u8; 64]).unwrap();
    fs::create_dir( d.join("arome_dir.grib2")).unwrap();

    let re = Regex::new( r"^arome.*\.grib2$").unwrap();
    let files = matching_files_in_dir( &d, &re, 32).unwrap();
    let names: Vec<&str> = files.iter().filter_map(|p| filename(p)).collect();
    assert_eq!( names, vec!["arome_f000.grib2", "arome_f002.grib2"]);

    assert!( matching_files_in_dir( &d.join("nonexistent"), &re, 0).is_err());
}

#[test]
fn test_store_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out").join("20251012_00");
    ensure_writable_dir( &out_dir).unwrap();

    let path = store_file_contents_in_dir( &out_dir, "index.json", b"[]").unwrap();
    assert_eq!( fs::read_to_string(&path).unwrap(), "[]");

    // only the final file remains, no temp leftovers
    let n = fs::read_dir(&out_dir).unwrap().count();
    assert_eq!( n, 1);
}

#[derive(Deserialize,Debug)]
struct TestConfig {
    name: String,
    level: u32,
}

#[test]
fn test_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ron");
    fs::write( &path, r#"TestConfig( name: "arome", level: 800 )"#).unwrap();

    let cfg: TestConfig = load_config( path.to_str().unwrap()).unwrap();
    assert_eq!( cfg.name, "arome");
    assert_eq!( cfg.level, 800);

    fs::write( &path, r#"TestConfig( name: "arome" "#).unwrap();
    assert!( load_config_from_path::<TestConfig>(&path).is_err());

    assert!( load_config::<TestConfig>("no_such_config_file.ron").is_err());
}
