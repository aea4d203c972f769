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

use chrono::{Datelike,NaiveDate,Utc};

use crate::errors::{Result,pattern_error};

/// the reference date of a forecast run (the model run day)
pub fn utc_today ()->NaiveDate {
    Utc::now().date_naive()
}

/// parse a `yyyyMMdd` date string (e.g. "20251012")
pub fn parse_yyyymmdd (s: &str)->Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|e| pattern_error( format!("invalid date '{s}': {e}")))
}

pub fn fmt_yyyymmdd (date: &NaiveDate)->String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// expand date fields in a path pattern such as `/data/arome/${yyyyMMdd}_00`.
/// Supported fields are `${yyyyMMdd}`, `${yyyy}`, `${MM}` and `${dd}`. Any other `${..}` field is an error
pub fn expand_date_pattern (pattern: &str, date: &NaiveDate)->Result<String> {
    let s = pattern
        .replace("${yyyyMMdd}", fmt_yyyymmdd(date).as_str())
        .replace("${yyyy}", format!("{:04}", date.year()).as_str())
        .replace("${MM}", format!("{:02}", date.month()).as_str())
        .replace("${dd}", format!("{:02}", date.day()).as_str());

    if let Some(i) = s.find("${") {
        let end = s[i..].find('}').map(|j| i+j+1).unwrap_or(s.len());
        return Err( pattern_error( format!("unknown field {} in '{pattern}'", &s[i..end])))
    }

    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
        assert_eq!( expand_date_pattern("/data/${yyyyMMdd}_00", &date).unwrap(), "/data/20251012_00");
        assert_eq!( expand_date_pattern("${yyyy}/${MM}/${dd}", &date).unwrap(), "2025/10/12");
        assert_eq!( expand_date_pattern("/plain/dir", &date).unwrap(), "/plain/dir");
        assert!( expand_date_pattern("/data/${hh}", &date).is_err());
    }

    #[test]
    fn test_parse() {
        let date = parse_yyyymmdd("20251012").unwrap();
        assert_eq!( fmt_yyyymmdd(&date), "20251012");
        assert!( parse_yyyymmdd("2025-10-12").is_err());
    }
}
