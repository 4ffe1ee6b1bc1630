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

//! support for RON config files.
//! Configs are plain serde types. We look them up in an explicit path, or in `$WRS_HOME/configs/<crate>/<file>`
//! and then in the `configs/` dir of the crate source (which is where the defaults live)

use std::{env, fs, path::{Path, PathBuf}};
use serde::Deserialize;
use crate::errors::Result;

/// load and deserialize a RON config from an explicit path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// parse a RON config from a string (mostly for inlined defaults and tests)
pub fn config_from_str<C> (s: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::de::from_str(s)? )
}

/// locate a config file for given crate. `crate_dir` is the CARGO_MANIFEST_DIR of the caller
pub fn find_config_file (crate_name: &str, crate_dir: &str, filename: &str) -> Option<PathBuf> {
    if let Ok(home) = env::var("WRS_HOME") {
        let path = Path::new(&home).join("configs").join(crate_name).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new(crate_dir).join("configs").join(filename);
    if path.is_file() { Some(path) } else { None }
}

/// define a `load_config(filename)` function for the calling crate that uses [`find_config_file`] lookup
#[macro_export]
macro_rules! define_load_config {
    () => {
        pub fn load_config<C> (filename: &str) -> $crate::Result<C> where C: for <'a> serde::Deserialize<'a> {
            match $crate::config::find_config_file( env!("CARGO_PKG_NAME"), env!("CARGO_MANIFEST_DIR"), filename) {
                Some(path) => $crate::config::load_config_path( path),
                None => $crate::config::load_config_path( filename) // last resort - try as given
            }
        }
    }
}
