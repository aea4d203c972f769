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

use std::fs::{self,File};
use std::io::{self,Read,Write,ErrorKind};
use std::path::{Path,PathBuf};
use regex::Regex;
use tempfile::NamedTempFile;

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

pub fn filestem <'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn file_length <P: AsRef<Path>> (path: P) -> Option<u64> {
    fs::metadata(path).ok().map(|md| md.len())
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut contents = String::with_capacity(len as usize);
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// all regular files in `dir` whose name matches `fname_regex` and that have at least `min_len` bytes,
/// sorted by filename. Forecast files carry their step in the name, which makes this the forecast order
pub fn matching_files_in_dir<P: AsRef<Path>> (dir: &P, fname_regex: &Regex, min_len: u64) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    let mut list: Vec<PathBuf> = Vec::new();

    if !dir.is_dir() {
        return Err(io_error!(ErrorKind::NotFound, "input dir {:?}", dir))
    }

    for entry in fs::read_dir(dir)? {
        if let Ok(entry) = entry {
            let path = entry.path();
            if !path.is_file() { continue }

            if let Some(fname) = entry.file_name().to_str() {
                if fname_regex.is_match( fname) && file_length(&path).unwrap_or(0) >= min_len {
                    list.push(path)
                }
            }
        }
    }

    list.sort();
    Ok(list)
}

/// write `contents` to `dir`/`filename` so that readers never see a partially written file.
/// We write to a temp file within the same dir and then persist (rename) it to its final name
pub fn store_file_contents_in_dir<P: AsRef<Path>> (dir: &P, filename: &str, contents: &[u8]) -> Result<PathBuf> {
    let dir: &Path = dir.as_ref();
    let path = dir.join(filename);

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all( contents)?;
    file.flush()?;
    file.persist(&path).map_err(|e| e.error)?;

    Ok(path)
}
