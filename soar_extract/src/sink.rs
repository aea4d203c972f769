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
use serde::Serialize;
use tracing::debug;

use soar_common::fs::store_file_contents_in_dir;
use soar_grid::GridDocument;
use crate::errors::{Result, op_failed};

/// write `value` as pretty printed JSON to `dir`/`filename`. The file is written to a temp file
/// in `dir` first and then renamed, i.e. readers either see the previous or the complete new file
pub fn write_json<T: Serialize> (dir: impl AsRef<Path>, filename: &str, value: &T)->Result<PathBuf> {
    let json = serde_json::to_string_pretty(value)?;
    store(dir.as_ref(), filename, json.as_bytes())
}

pub fn write_grid_document (dir: impl AsRef<Path>, filename: &str, doc: &GridDocument)->Result<PathBuf> {
    let json = doc.to_json()?;
    store(dir.as_ref(), filename, json.as_bytes())
}

fn store (dir: &Path, filename: &str, data: &[u8])->Result<PathBuf> {
    if filename.is_empty() || filename.contains('/') {
        return Err( op_failed( format!("invalid output filename '{filename}'")))
    }
    let path = store_file_contents_in_dir( &dir, filename, data)?;
    debug!("wrote {} bytes to {:?}", data.len(), path);
    Ok(path)
}

/// file size in decimal megabytes (10⁶ bytes) rounded to 2 digits, as reported in output indices.
/// Missing files have size 0
pub fn size_mb (path: impl AsRef<Path>)->f64 {
    let len = soar_common::fs::file_length(path).unwrap_or(0);
    (len as f64 / 1e6 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json( dir.path(), "metadata.json", &json!({"hour": 3, "success": true})).unwrap();
        let s = std::fs::read_to_string(&path).unwrap();
        assert!( s.contains("\"hour\": 3"));

        // only the final file is left in the dir
        assert_eq!( std::fs::read_dir(dir.path()).unwrap().count(), 1);

        assert!( write_json( dir.path(), "", &1).is_err());
        assert!( write_json( dir.path(), "../x.json", &1).is_err());
    }

    #[test]
    fn test_size_mb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arome_f000.json");

        std::fs::write( &path, vec![b' '; 1_500_000]).unwrap();
        assert_eq!( size_mb(&path), 1.5);

        std::fs::write( &path, vec![b' '; 1_048_576]).unwrap(); // 1 MiB
        assert_eq!( size_mb(&path), 1.05);

        assert_eq!( size_mb( dir.path().join("missing.json")), 0.0);
    }
}
