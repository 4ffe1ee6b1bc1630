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

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serializer;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// this should be used wherever we might have to use a sim clock instead of wall clock
#[inline]
pub fn utc_today()->NaiveDate {
    Utc::now().date_naive()
}

/// get a DateTime<Utc> for the start of a NaiveDate that is supposed to be in Utc
pub fn naive_utc_date_to_utc_datetime (nd: NaiveDate) -> DateTime<Utc> {
    nd.and_time( NaiveTime::MIN).and_utc()
}

/// number of whole days from `earlier` to `later`, negative if `later` precedes `earlier`
#[inline]
pub fn days_between (later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// the date `n` days after `date`. Returns None if the result is outside of the chrono date range
#[inline]
pub fn add_days (date: NaiveDate, n: u64) -> Option<NaiveDate> {
    date.checked_add_days( Days::new(n))
}

/// convert fractional minutes into a TimeDelta with millisecond resolution
pub fn fractional_minutes (minutes: f64) -> TimeDelta {
    TimeDelta::milliseconds( (minutes * 60_000.0).round() as i64)
}

//--- misc string format parsing

/// parse "%Y-%m-%d" date specs
pub fn parse_date (s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str( s.trim(), DATE_FORMAT).ok()
}

pub fn parse_optional_date_or<F> (spec: &Option<String>, f: F) -> Option<NaiveDate> where F: FnOnce()->NaiveDate {
    match spec {
        Some(s) => parse_date(s),
        None => Some(f())
    }
}

/// local datetime with zone abbreviation, e.g. "2024-10-22 01:00:00 BST"
pub fn local_datetime_string<Tz> (dt: &DateTime<Tz>) -> String where Tz: TimeZone, Tz::Offset: std::fmt::Display {
    dt.format( LOCAL_DATETIME_FORMAT).to_string()
}

//--- support for serde

pub fn ser_local_datetime<S: Serializer, Tz> (dt: &DateTime<Tz>, s: S) -> Result<S::Ok, S::Error> where Tz: TimeZone, Tz::Offset: std::fmt::Display {
    s.serialize_str( &local_datetime_string(dt))
}
