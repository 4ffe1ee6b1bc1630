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
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, warn};
use wrs_common::{
    datetime::{fractional_minutes, local_datetime_string, naive_utc_date_to_utc_datetime, ser_local_datetime},
    geo::GeoPoint
};
use crate::{
    AcquisitionMode, GridCell,
    cycle::{CycleOccurrence, CycleScheduler, CycleTable},
    grid::{GridResolver, PolygonDataset},
    timezone::TimezoneResolver,
    errors::{OverpassError, Result}
};

/// approximate duration of one orbit, i.e. the time between two consecutive paths of a cycle day
pub const PATH_DURATION_MINUTES: f64 = 98.8;

/// approximate time the satellite needs to advance by one row
pub const ROW_DURATION_MINUTES: f64 = 0.39;

/// minutes after midnight UTC at which the path with given (0-based) position within its cycle day reaches `row`.
/// This is a linear approximation that ignores the actual orbit start time of the day
pub fn elapsed_minutes (ordinal: usize, row: u16) -> f64 {
    ordinal as f64 * PATH_DURATION_MINUTES + row as f64 * ROW_DURATION_MINUTES
}

/// estimates acquisition times for (path,row,date) triples
#[derive(Debug,Clone,Copy,Default)]
pub struct OverpassTimeCalculator {
    table: CycleTable
}

impl OverpassTimeCalculator {
    pub fn new (table: CycleTable) -> Self {
        OverpassTimeCalculator { table }
    }

    pub fn elapsed_minutes_for (&self, path: u16, row: u16) -> Result<f64> {
        let ordinal = self.table.ordinal_of( path)?;
        Ok( elapsed_minutes( ordinal, row))
    }

    /// the acquisition time in UTC (millisecond resolution)
    pub fn utc_time_of (&self, path: u16, row: u16, date: NaiveDate) -> Result<DateTime<Utc>> {
        let minutes = self.elapsed_minutes_for( path, row)?;
        naive_utc_date_to_utc_datetime( date)
            .checked_add_signed( fractional_minutes( minutes))
            .ok_or_else( || OverpassError::DateRangeError( format!("{} + {} min", date, minutes)))
    }

    /// the acquisition time in the local zone of `point`
    pub fn time_of<Z> (&self, path: u16, row: u16, date: NaiveDate, point: &GeoPoint, zones: &Z) -> Result<DateTime<Tz>> where Z: TimezoneResolver {
        let utc = self.utc_time_of( path, row, date)?;
        let tz = zones.zone_for( point).ok_or_else( || unresolved_zone( point))?;
        Ok( utc.with_timezone( &tz))
    }
}

fn unresolved_zone (point: &GeoPoint) -> OverpassError {
    OverpassError::TimezoneUnresolved { lat: point.latitude_degrees(), lon: point.longitude_degrees() }
}

/// OverpassPredictor output: when the satellite will image the grid cell of a location next
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct OverpassEvent {
    #[serde(flatten)]
    pub cell: GridCell,

    pub cycle_day: u8,

    pub next_date: NaiveDate,

    pub utc_time: DateTime<Utc>,

    #[serde(rename="time_at_location", serialize_with="ser_local_datetime")]
    pub local_time: DateTime<Tz>,

    pub zone: Tz,
}

impl OverpassEvent {
    pub fn path (&self) -> u16 { self.cell.path }
    pub fn row (&self) -> u16 { self.cell.row }
    pub fn mode (&self) -> AcquisitionMode { self.cell.mode }
}

impl fmt::Display for OverpassEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Overpass( {}, cycle_day:{}, date:{}, local_time:{})",
            self.cell, self.cycle_day, self.next_date, local_datetime_string( &self.local_time))
    }
}

/// the object that combines grid cell lookup, cycle projection and time estimation.
/// Once constructed this is read-only and can be shared between threads if its dataset and zone resolvers can
pub struct OverpassPredictor<D,Z> where D: PolygonDataset, Z: TimezoneResolver {
    resolver: GridResolver<D>,
    scheduler: CycleScheduler,
    calculator: OverpassTimeCalculator,
    zones: Z,
    fallback_zone: Option<Tz>,
}

impl<D,Z> OverpassPredictor<D,Z> where D: PolygonDataset, Z: TimezoneResolver {
    pub fn new (dataset: D, zones: Z) -> Self {
        let scheduler = CycleScheduler::default();
        let calculator = OverpassTimeCalculator::new( *scheduler.table());
        OverpassPredictor { resolver: GridResolver::new( dataset), scheduler, calculator, zones, fallback_zone: None }
    }

    pub fn with_scheduler (mut self, scheduler: CycleScheduler) -> Self {
        self.calculator = OverpassTimeCalculator::new( *scheduler.table());
        self.scheduler = scheduler;
        self
    }

    /// zone to use if the resolvers don't know the location. Without it such locations are errors
    pub fn with_fallback_zone (mut self, fallback_zone: Option<Tz>) -> Self {
        self.fallback_zone = fallback_zone;
        self
    }

    pub fn grid_resolver (&self) -> &GridResolver<D> { &self.resolver }
    pub fn scheduler (&self) -> &CycleScheduler { &self.scheduler }
    pub fn calculator (&self) -> &OverpassTimeCalculator { &self.calculator }

    pub fn zone_for (&self, point: &GeoPoint) -> Result<Tz> {
        match self.zones.zone_for( point) {
            Some(tz) => Ok(tz),
            None => match self.fallback_zone {
                Some(tz) => {
                    warn!("no time zone for {}, using {}", point, tz);
                    Ok(tz)
                }
                None => Err( unresolved_zone( point))
            }
        }
    }

    /// the next overpass strictly after `current_date`
    pub fn predict (&self, point: &GeoPoint, mode: AcquisitionMode, current_date: NaiveDate) -> Result<OverpassEvent> {
        let cell = self.resolver.resolve( point, mode)?;
        let occ = self.scheduler.next_occurrence( current_date, cell.path)?;
        let zone = self.zone_for( point)?;

        self.event_for( cell, &occ, zone)
    }

    /// the next `count` overpasses after `current_date`, which are one cycle apart
    pub fn upcoming (&self, point: &GeoPoint, mode: AcquisitionMode, current_date: NaiveDate, count: usize) -> Result<Vec<OverpassEvent>> {
        let cell = self.resolver.resolve( point, mode)?;
        let zone = self.zone_for( point)?;

        self.scheduler.occurrences( current_date, cell.path)?
            .take( count)
            .map( |occ| self.event_for( cell, &occ, zone))
            .collect()
    }

    fn event_for (&self, cell: GridCell, occ: &CycleOccurrence, zone: Tz) -> Result<OverpassEvent> {
        let utc_time = self.calculator.utc_time_of( cell.path, cell.row, occ.next_date)?;
        let local_time = utc_time.with_timezone( &zone);

        let event = OverpassEvent { cell, cycle_day: occ.cycle_day, next_date: occ.next_date, utc_time, local_time, zone };
        debug!("{}", event);
        Ok(event)
    }
}
