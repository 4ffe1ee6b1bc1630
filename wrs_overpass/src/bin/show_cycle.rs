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
use wrs_common::{check_cli, define_cli, datetime::{parse_date, parse_optional_date_or, utc_today}};
use wrs_overpass::{CycleScheduler, CYCLE_ANCHOR};

define_cli! { ARGS [about="show the WRS-2 16 day repeat cycle"] =
    date: Option<String> [help="date spec YYYY-MM-DD to project onto the cycle (if not specified use today)", short, long],
    anchor: Option<String> [help="date spec YYYY-MM-DD on which cycle day 1 starts", short, long],
    path: Option<u16> [help="show position and next occurrence of this path", short, long]
}

fn main() -> Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();

    let date = parse_optional_date_or( &ARGS.date, utc_today).ok_or( anyhow!("invalid date spec"))?;
    let anchor = match &ARGS.anchor {
        Some(s) => parse_date( s).ok_or( anyhow!("invalid anchor spec '{s}'"))?,
        None => CYCLE_ANCHOR
    };

    let scheduler = CycleScheduler::with_anchor( anchor);
    let table = scheduler.table();
    table.validate()?;

    if let Some(path) = ARGS.path {
        let pos = table.position_of( path)?;
        let occ = scheduler.next_occurrence( date, path)?;
        println!("path {} is #{} on cycle day {}", path, pos.ordinal + 1, pos.cycle_day);
        println!("next occurrence after {}: {}", date, occ.next_date);

    } else {
        let today = scheduler.cycle_day_on( date);
        for (cycle_day, paths) in table.entries() {
            let marker = if cycle_day == today { "*" } else { " " };
            let paths: Vec<String> = paths.iter().map( |p| p.to_string()).collect();
            println!("{marker}{cycle_day:>3}: {}", paths.join(","));
        }
        println!("\n{} is cycle day {} (anchor {})", date, today, anchor);
    }

    Ok(())
}
