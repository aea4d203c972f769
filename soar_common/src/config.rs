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

use std::{env, path::{Path,PathBuf}};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{Result,config_not_found};
use crate::fs::filepath_contents_as_string;

pub const CONFIGS: &'static str = "configs";

/// locate a config file. Lookup order is
///   1. `filename` itself if it is an existing path
///   2. `$SOAR_CONFIG_DIR/❬filename❭`
///   3. `~/.soar/configs/❬filename❭`
///   4. `❬workspace❭/configs/❬filename❭` (the defaults that come with the repo)
pub fn find_config_file (filename: &str) -> Option<PathBuf> {
    let path = Path::new(filename);
    if path.is_file() { return Some(path.to_path_buf()) }

    if let Ok(dir) = env::var("SOAR_CONFIG_DIR") {
        let path = Path::new(dir.as_str()).join(filename);
        if path.is_file() { return Some(path) }
    }

    if let Ok(usr_home) = env::var("HOME") {
        let path = Path::new(usr_home.as_str()).join(".soar").join(CONFIGS).join(filename);
        if path.is_file() { return Some(path) }
    }

    if let Some(ws_dir) = Path::new(env!("CARGO_MANIFEST_DIR")).parent() {
        let path = ws_dir.join(CONFIGS).join(filename);
        if path.is_file() { return Some(path) }
    }

    None
}

/// find and deserialize a RON config
pub fn load_config<C> (filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    let path = find_config_file(filename).ok_or_else(|| config_not_found(filename))?;
    debug!("loading config {:?}", path);
    load_config_from_path(&path)
}

pub fn load_config_from_path<C> (path: impl AsRef<Path>) -> Result<C> where C: for <'a> Deserialize<'a> {
    let path = path.as_ref();
    let data = filepath_contents_as_string(&path)?;
    Ok( ron::de::from_str( data.as_str())? )
}
