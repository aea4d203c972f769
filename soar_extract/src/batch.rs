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

use std::fmt;
use tracing::{info, warn};

/// the result of processing a single item of a batch
#[derive(Debug,Clone)]
pub struct ItemOutcome<T> {
    pub item: String,
    pub result: Result<T,String>,
}

impl<T> ItemOutcome<T> {
    pub fn is_ok (&self)->bool { self.result.is_ok() }
}

/// ordered per-item outcomes of a batch. Failed items never abort the batch, they are
/// recorded here with their cause
#[derive(Debug,Clone)]
pub struct BatchReport<T> {
    pub outcomes: Vec<ItemOutcome<T>>,
}

impl<T> BatchReport<T> {
    pub fn new ()->Self { BatchReport { outcomes: Vec::new() } }

    pub fn push (&mut self, item: impl ToString, result: Result<T,String>) {
        self.outcomes.push( ItemOutcome { item: item.to_string(), result });
    }

    pub fn n_total (&self)->usize { self.outcomes.len() }

    pub fn n_succeeded (&self)->usize { self.outcomes.iter().filter(|o| o.is_ok()).count() }

    pub fn n_failed (&self)->usize { self.n_total() - self.n_succeeded() }

    pub fn is_complete_success (&self)->bool { self.n_failed() == 0 }

    /// (item, value) of all successfully processed items, in processing order
    pub fn succeeded (&self)->impl Iterator<Item=(&str,&T)> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok().map(|v| (o.item.as_str(), v)))
    }

    /// (item, cause) of all failed items, in processing order
    pub fn failures (&self)->impl Iterator<Item=(&str,&str)> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (o.item.as_str(), e.as_str())))
    }
}

impl<T> Default for BatchReport<T> {
    fn default()->Self { Self::new() }
}

impl<T> fmt::Display for BatchReport<T> {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{} of {} items succeeded", self.n_succeeded(), self.n_total())?;
        for (item,cause) in self.failures() {
            write!(f, "\n  failed {item}: {cause}")?;
        }
        Ok(())
    }
}

/// process `items` in order. `process` gets the position of the item within the batch and the item.
/// Errors are captured per item so that one malformed item does not prevent the others from being processed
pub fn run_batch<I,T,E,N,F> (items: I, item_name: N, mut process: F)->BatchReport<T>
    where I: IntoIterator, N: Fn(&I::Item)->String, F: FnMut(usize,&I::Item)->Result<T,E>, E: fmt::Display
{
    let mut report = BatchReport::new();

    for (idx,item) in items.into_iter().enumerate() {
        let name = item_name(&item);
        match process(idx, &item) {
            Ok(v) => {
                info!("processed {name}");
                report.push( name, Ok(v));
            }
            Err(e) => {
                warn!("failed to process {name}: {e}");
                report.push( name, Err(e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_batch() {
        let items = vec!["1", "2", "x", "4"];
        let report = run_batch( items, |s| s.to_string(), |_,s| s.parse::<i32>());

        assert_eq!( report.n_total(), 4);
        assert_eq!( report.n_succeeded(), 3);
        assert_eq!( report.n_failed(), 1);

        let vals: Vec<i32> = report.succeeded().map(|(_,v)| *v).collect();
        assert_eq!( vals, vec![1,2,4]);

        let failed: Vec<(&str,&str)> = report.failures().collect();
        assert_eq!( failed.len(), 1);
        assert_eq!( failed[0].0, "x");

        let s = report.to_string();
        println!("{s}");
        assert!( s.starts_with("3 of 4 items succeeded"));
        assert!( s.contains("failed x:"));

        assert!( report.outcomes[2].result.is_err());
        assert!( report.outcomes[3].is_ok());
    }

    #[test]
    fn test_empty_batch() {
        let report = run_batch( Vec::<String>::new(), |s| s.clone(), |_,_| Ok::<(),String>(()));
        assert_eq!( report.n_total(), 0);
        assert!( report.is_complete_success());
        assert_eq!( report.to_string(), "0 of 0 items succeeded");
    }
}
