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

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;
use wrs_common::{
    check_cli, define_cli,
    datetime::{local_datetime_string, parse_optional_date_or, utc_today},
    geo::GeoPoint
};
use wrs_overpass::{errors::OverpassError, load_config, predictor_from_config, AcquisitionMode, OverpassConfig, OverpassEvent};

define_cli! { ARGS [about="predict the next Landsat (WRS-2) overpasses for a given location", allow_negative_numbers=true] =
    config: String [help="filename of config", short, long, default_value="wrs_overpass.ron"],
    mode: Option<AcquisitionMode> [help="acquisition mode A|D (if not specified use configured mode)", short, long],
    date: Option<String> [help="current date spec YYYY-MM-DD (if not specified use today)", short, long],
    count: usize [help="number of overpasses to compute", short='n', long, default_value="1"],
    json: bool [help="print JSON", long],
    ron: bool [help="print RON", long],
    lat: f64 [help="latitude in degrees"],
    lon: f64 [help="longitude in degrees"]
}

fn main() -> Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();

    let config: OverpassConfig = load_config( &ARGS.config)?;
    let current_date = parse_optional_date_or( &ARGS.date, utc_today).ok_or( anyhow!("invalid date spec (expected YYYY-MM-DD)"))?;
    let mode = ARGS.mode.unwrap_or( config.default_mode);
    let point = GeoPoint::from_lat_lon_degrees( ARGS.lat, ARGS.lon)?;

    let predictor = predictor_from_config( &config)?;

    match predictor.upcoming( &point, mode, current_date, ARGS.count) {
        Ok(events) => {
            if ARGS.json {
                println!("{}", serde_json::to_string_pretty( &events)?);
            } else if ARGS.ron {
                println!("{}", ron::ser::to_string_pretty( &events, ron::ser::PrettyConfig::default().compact_structs(true))?);
            } else {
                print_events( &events);
            }
            Ok(())
        }
        Err(e @ OverpassError::CellNotFound{..}) => {
            println!("no matching path/row found for lat={}, lon={} in mode {}", ARGS.lat, ARGS.lon, mode);
            Err( anyhow!(e))
        }
        Err(e) => Err( anyhow!(e))
    }
}

fn print_events (events: &[OverpassEvent]) {
    if let Some(e) = events.first() {
        println!("path: {}, row: {}, mode: {}", e.path(), e.row(), e.mode());
        println!("path {} is imaged on cycle day {}", e.path(), e.cycle_day);
    }

    for e in events {
        println!("{}: {} ({} UTC)", e.next_date, local_datetime_string( &e.local_time), e.utc_time.format("%H:%M:%S"));
    }
}
