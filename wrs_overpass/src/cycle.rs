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
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wrs_common::datetime::{add_days, days_between};
use crate::{MAX_PATH, errors::{data_integrity, op_failed, OverpassError, Result}};

/// number of days in the WRS-2 repeat cycle
pub const CYCLE_DAYS: u8 = 16;

/// the reference date on which cycle day 1 starts (day offset 0)
pub const CYCLE_ANCHOR: NaiveDate = NaiveDate::from_ymd_opt( 2024, 10, 6).unwrap();

/* #region cycle table **********************************************************************************************/

/// the paths imaged on each day of the 16 day repeat cycle, in imaging order.
/// Consecutive orbits are 16 paths apart, a cycle day starts with the first orbit that has a path <= 16.
/// The 233 orbits of a cycle therefore split into 9 days with 15 paths and 7 days with 14 paths
static WRS2_CYCLE_DAY_PATHS: [&[u16]; CYCLE_DAYS as usize] = [
    &[13, 29, 45, 61, 77, 93, 109, 125, 141, 157, 173, 189, 205, 221],
    &[4, 20, 36, 52, 68, 84, 100, 116, 132, 148, 164, 180, 196, 212, 228],
    &[11, 27, 43, 59, 75, 91, 107, 123, 139, 155, 171, 187, 203, 219],
    &[2, 18, 34, 50, 66, 82, 98, 114, 130, 146, 162, 178, 194, 210, 226],
    &[9, 25, 41, 57, 73, 89, 105, 121, 137, 153, 169, 185, 201, 217, 233],
    &[16, 32, 48, 64, 80, 96, 112, 128, 144, 160, 176, 192, 208, 224],
    &[7, 23, 39, 55, 71, 87, 103, 119, 135, 151, 167, 183, 199, 215, 231],
    &[14, 30, 46, 62, 78, 94, 110, 126, 142, 158, 174, 190, 206, 222],
    &[5, 21, 37, 53, 69, 85, 101, 117, 133, 149, 165, 181, 197, 213, 229],
    &[12, 28, 44, 60, 76, 92, 108, 124, 140, 156, 172, 188, 204, 220],
    &[3, 19, 35, 51, 67, 83, 99, 115, 131, 147, 163, 179, 195, 211, 227],
    &[10, 26, 42, 58, 74, 90, 106, 122, 138, 154, 170, 186, 202, 218],
    &[1, 17, 33, 49, 65, 81, 97, 113, 129, 145, 161, 177, 193, 209, 225],
    &[8, 24, 40, 56, 72, 88, 104, 120, 136, 152, 168, 184, 200, 216, 232],
    &[15, 31, 47, 63, 79, 95, 111, 127, 143, 159, 175, 191, 207, 223],
    &[6, 22, 38, 54, 70, 86, 102, 118, 134, 150, 166, 182, 198, 214, 230],
];

/// where a path is imaged within the repeat cycle
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct CyclePosition {
    pub cycle_day: u8,   // 1..=16
    pub ordinal: usize,  // 0-based position within the paths of the cycle day
}

/// read-only view of a cycle day table. This is a cheap Copy type over static data, the default is the WRS-2 schedule.
/// Lookups are linear searches over (at most) 233 entries
#[derive(Debug,Clone,Copy)]
pub struct CycleTable {
    days: &'static [&'static [u16]]
}

impl CycleTable {
    pub const WRS2: CycleTable = CycleTable { days: &WRS2_CYCLE_DAY_PATHS };

    /// alternative tables, e.g. for other missions or for testing. Index 0 holds cycle day 1
    pub const fn from_static (days: &'static [&'static [u16]]) -> Self {
        CycleTable { days }
    }

    pub fn n_days (&self) -> usize { self.days.len() }

    pub fn position_of (&self, path: u16) -> Result<CyclePosition> {
        for (i, paths) in self.days.iter().enumerate() {
            if let Some(ordinal) = paths.iter().position( |p| *p == path) {
                return Ok( CyclePosition { cycle_day: (i+1) as u8, ordinal })
            }
        }
        Err( data_integrity!("path {} not found in any cycle day", path))
    }

    pub fn cycle_day_of (&self, path: u16) -> Result<u8> {
        self.position_of( path).map( |pos| pos.cycle_day)
    }

    pub fn ordinal_of (&self, path: u16) -> Result<usize> {
        self.position_of( path).map( |pos| pos.ordinal)
    }

    /// the inverse lookup: ordered paths of a cycle day (1-based)
    pub fn paths_of (&self, cycle_day: u8) -> Option<&'static [u16]> {
        if cycle_day == 0 { return None }
        self.days.get( (cycle_day - 1) as usize).copied()
    }

    /// iterate over (cycle_day, paths) in cycle order
    pub fn entries (&self) -> impl Iterator<Item=(u8, &'static [u16])> + '_ {
        self.days.iter().enumerate().map( |(i,paths)| ((i+1) as u8, *paths))
    }

    /// check that every path in 1..=MAX_PATH shows up exactly once, and nothing else does
    pub fn validate (&self) -> Result<()> {
        let mut seen: Vec<Option<u8>> = vec![None; MAX_PATH as usize + 1];

        for (cycle_day, paths) in self.entries() {
            for &path in paths {
                if path == 0 || path > MAX_PATH {
                    return Err( data_integrity!("invalid path {} in cycle day {}", path, cycle_day))
                }
                if let Some(other_day) = seen[path as usize] {
                    return Err( data_integrity!("path {} in cycle day {} and {}", path, other_day, cycle_day))
                }
                seen[path as usize] = Some(cycle_day);
            }
        }

        if let Some(missing) = (1..=MAX_PATH).find( |p| seen[*p as usize].is_none()) {
            return Err( data_integrity!("path {} not in any cycle day", missing))
        }
        Ok(())
    }
}

impl Default for CycleTable {
    fn default () -> Self { CycleTable::WRS2 }
}

/* #endregion cycle table */

/* #region cycle scheduler ******************************************************************************************/

/// the result of a cycle day projection
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct CycleOccurrence {
    pub cycle_day: u8,
    pub next_date: NaiveDate,
    pub offset_days: u8, // 1..=16
}

impl fmt::Display for CycleOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle day {} on {} (+{}d)", self.cycle_day, self.next_date, self.offset_days)
    }
}

/// projects calendar dates onto the repeat cycle, relative to an anchor date on which cycle day 1 starts
#[derive(Debug,Clone,Copy)]
pub struct CycleScheduler {
    table: CycleTable,
    anchor: NaiveDate,
}

impl CycleScheduler {
    pub fn new (table: CycleTable, anchor: NaiveDate) -> Self {
        CycleScheduler { table, anchor }
    }

    pub fn with_anchor (anchor: NaiveDate) -> Self {
        CycleScheduler { table: CycleTable::WRS2, anchor }
    }

    pub fn table (&self) -> &CycleTable { &self.table }
    pub fn anchor (&self) -> NaiveDate { self.anchor }

    fn n_days (&self) -> i64 { self.table.n_days() as i64 }

    /// 0-based phase of `date` within the cycle. Note this has to be a floored modulo since dates can precede the anchor
    pub fn phase_of (&self, date: NaiveDate) -> u8 {
        days_between( date, self.anchor).rem_euclid( self.n_days()) as u8
    }

    /// the cycle day label (1-based) of `date`
    pub fn cycle_day_on (&self, date: NaiveDate) -> u8 {
        self.phase_of( date) + 1
    }

    /// number of days (1..=cycle length) from `current_date` to the next date labeled `cycle_day`.
    /// If `current_date` already has that label we return the full cycle length, i.e. the next occurrence is
    /// always strictly in the future
    pub fn forward_offset (&self, current_date: NaiveDate, cycle_day: u8) -> u8 {
        let n = self.n_days();
        let t = days_between( current_date, self.anchor);
        let offset = ((cycle_day as i64 - 1) + n - t.rem_euclid(n)).rem_euclid(n);
        if offset == 0 { n as u8 } else { offset as u8 }
    }

    pub fn next_occurrence_of_day (&self, current_date: NaiveDate, cycle_day: u8) -> Result<CycleOccurrence> {
        if cycle_day == 0 || cycle_day as usize > self.table.n_days() {
            return Err( op_failed!("invalid cycle day {}", cycle_day))
        }

        let offset_days = self.forward_offset( current_date, cycle_day);
        let next_date = add_days( current_date, offset_days as u64)
            .ok_or_else( || OverpassError::DateRangeError( format!("{} + {} days", current_date, offset_days)))?;

        Ok( CycleOccurrence { cycle_day, next_date, offset_days })
    }

    /// next date (after `current_date`) on which `path` is imaged
    pub fn next_occurrence (&self, current_date: NaiveDate, path: u16) -> Result<CycleOccurrence> {
        let cycle_day = self.table.cycle_day_of( path)?;
        let occ = self.next_occurrence_of_day( current_date, cycle_day)?;
        debug!("path {} next occurrence after {}: {}", path, current_date, occ);
        Ok(occ)
    }

    /// successive occurrences of `path` after `current_date`. The iterator ends if we run out of representable dates
    pub fn occurrences (&self, current_date: NaiveDate, path: u16) -> Result<impl Iterator<Item=CycleOccurrence> + use<>> {
        let first = self.next_occurrence( current_date, path)?;
        let cycle_len = self.table.n_days() as u64;

        Ok( std::iter::successors( Some(first), move |occ| {
            add_days( occ.next_date, cycle_len).map( |next_date| CycleOccurrence { next_date, offset_days: cycle_len as u8, ..*occ })
        }))
    }
}

impl Default for CycleScheduler {
    fn default () -> Self { CycleScheduler::new( CycleTable::WRS2, CYCLE_ANCHOR) }
}

/* #endregion cycle scheduler */
