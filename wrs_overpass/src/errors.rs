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

use thiserror::Error;
use crate::AcquisitionMode;

pub type Result<T> = std::result::Result<T, OverpassError>;

#[derive(Error,Debug)]
pub enum OverpassError {

    /// the point is not inside of any grid cell of the requested mode. This is a regular outcome
    #[error("no matching grid cell for lat={lat}, lon={lon} and mode {mode}")]
    CellNotFound { lat: f64, lon: f64, mode: AcquisitionMode },

    /// the cycle table does not know a path that was reported by the grid dataset
    #[error("data integrity error: {0}")]
    DataIntegrityError(String),

    #[error("could not determine local time zone for lat={lat}, lon={lon}")]
    TimezoneUnresolved { lat: f64, lon: f64 },

    #[error("dataset error {0}")]
    DatasetError(String),

    #[error("date out of range {0}")]
    DateRangeError(String),

    #[error("common error {0}")]
    CommonError( #[from] wrs_common::WrsCommonError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

macro_rules! data_integrity {
    ($fmt:literal $(, $arg:expr )* ) => {
        OverpassError::DataIntegrityError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use data_integrity;

macro_rules! dataset_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OverpassError::DatasetError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use dataset_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        OverpassError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
