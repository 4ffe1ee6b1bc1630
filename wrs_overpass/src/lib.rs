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

//! Landsat overpass prediction based on the Worldwide Reference System 2 (WRS-2).
//! A location is mapped to a (path,row) grid cell, the path is mapped onto the 16 day repeat cycle and the
//! cycle day is projected into the calendar. The result is the next acquisition date with an estimated
//! acquisition time, converted into the local time zone of the location

use std::{fmt, path::PathBuf, str::FromStr};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::info;
use wrs_common::{define_load_config, geo::GeoPoint};

pub mod errors;
use errors::Result;

pub mod cycle;
pub mod grid;
pub mod timezone;
pub mod overpass;

pub use cycle::{CycleTable, CycleScheduler, CycleOccurrence, CyclePosition, CYCLE_ANCHOR, CYCLE_DAYS};
pub use grid::{PolygonDataset, GridResolver, WrsGrid, WrsFeature};
pub use timezone::{TimezoneResolver, ZoneBoundaries, FixedZone, ZoneResolverChain};
pub use overpass::{OverpassTimeCalculator, OverpassEvent, OverpassPredictor, PATH_DURATION_MINUTES, ROW_DURATION_MINUTES};

define_load_config!{}

/// highest WRS-2 path number
pub const MAX_PATH: u16 = 233;

/// highest WRS-2 row number
pub const MAX_ROW: u16 = 248;

/// the orbit direction in which the satellite images a scene. Landsat daytime acquisitions are descending
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Default,Serialize,Deserialize)]
pub enum AcquisitionMode {
    #[serde(rename="A", alias="a", alias="ascending")]
    Ascending,

    #[default]
    #[serde(rename="D", alias="d", alias="descending")]
    Descending,
}

impl AcquisitionMode {
    /// the single letter code used in WRS-2 datasets
    pub fn code (&self) -> &'static str {
        match self {
            AcquisitionMode::Ascending => "A",
            AcquisitionMode::Descending => "D",
        }
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for AcquisitionMode {
    type Err = String;

    fn from_str (s: &str) -> std::result::Result<Self,Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "asc" | "ascending" => Ok(AcquisitionMode::Ascending),
            "d" | "desc" | "descending" => Ok(AcquisitionMode::Descending),
            _ => Err( format!("unknown acquisition mode '{s}' (expected A or D)"))
        }
    }
}

/// a WRS-2 grid cell
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub struct GridCell {
    pub path: u16,
    pub row: u16,
    pub mode: AcquisitionMode,
}

impl GridCell {
    pub fn is_valid (&self) -> bool {
        (1..=MAX_PATH).contains( &self.path) && (1..=MAX_ROW).contains( &self.row)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:03}/R{:03}/{}", self.path, self.row, self.mode)
    }
}

/// the RON config for overpass predictors
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct OverpassConfig {
    /// GeoJSON FeatureCollection of WRS-2 cells with PATH, ROW and MODE properties
    pub wrs_dataset: PathBuf,

    /// GeoJSON FeatureCollection of time zone boundaries with `tzid` properties
    #[serde(default)]
    pub tz_dataset: Option<PathBuf>,

    /// zone to use for locations outside of `tz_dataset` (or if there is none)
    #[serde(default)]
    pub fallback_tz: Option<Tz>,

    /// report UTC if we can't resolve the zone. Only used if there is no `fallback_tz`
    #[serde(default)]
    pub utc_fallback: bool,

    #[serde(default)]
    pub default_mode: AcquisitionMode,

    #[serde(default="default_cycle_anchor")]
    pub cycle_anchor: NaiveDate,
}

fn default_cycle_anchor () -> NaiveDate { CYCLE_ANCHOR }

impl OverpassConfig {
    pub fn fallback_zone (&self) -> Option<Tz> {
        self.fallback_tz.or( self.utc_fallback.then_some( Tz::UTC))
    }
}

/// create a predictor from the datasets and settings of a config
pub fn predictor_from_config (config: &OverpassConfig) -> Result<OverpassPredictor<WrsGrid,ZoneResolverChain>> {
    let grid = WrsGrid::from_geojson_file( &config.wrs_dataset)?;

    let mut zones = ZoneResolverChain::new();
    if let Some(path) = &config.tz_dataset {
        zones.push( ZoneBoundaries::from_geojson_file( path)?);
    }
    info!("zone resolvers: {}, fallback: {:?}", zones.len(), config.fallback_zone());

    Ok( OverpassPredictor::new( grid, zones)
        .with_scheduler( CycleScheduler::with_anchor( config.cycle_anchor))
        .with_fallback_zone( config.fallback_zone()) )
}

/// one-shot prediction of the next overpass for a (latitude,longitude) location
pub fn predict_overpass<D,Z> (dataset: &D, zones: &Z, latitude: f64, longitude: f64, mode: AcquisitionMode, current_date: NaiveDate) -> Result<OverpassEvent>
    where D: PolygonDataset, Z: TimezoneResolver
{
    let point = GeoPoint::from_lat_lon_degrees( latitude, longitude)?;
    OverpassPredictor::new( dataset, zones).predict( &point, mode, current_date)
}
