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

use std::{fs, path::Path, sync::Arc};
use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};
use tracing::{debug, info, Level};
use wrs_common::geo::{GeoMultiPolygon, GeoPoint};
use crate::{AcquisitionMode, GridCell, errors::{dataset_error, OverpassError, Result}};

/// abstraction for the polygon layer we use to map locations to grid cells.
/// Implementations have to be read-only after construction so that they can be shared between threads
pub trait PolygonDataset {
    /// the first cell (in dataset order) with matching `mode` whose area contains `point` (boundary inclusive)
    fn query (&self, point: &GeoPoint, mode: AcquisitionMode) -> Option<GridCell>;

    /// all matching cells in dataset order. Datasets that can't enumerate matches only report the first one
    fn query_all (&self, point: &GeoPoint, mode: AcquisitionMode) -> Vec<GridCell> {
        self.query( point, mode).into_iter().collect()
    }
}

impl<T> PolygonDataset for &T where T: PolygonDataset + ?Sized {
    fn query (&self, point: &GeoPoint, mode: AcquisitionMode) -> Option<GridCell> { (**self).query( point, mode) }
    fn query_all (&self, point: &GeoPoint, mode: AcquisitionMode) -> Vec<GridCell> { (**self).query_all( point, mode) }
}

impl<T> PolygonDataset for Arc<T> where T: PolygonDataset + ?Sized {
    fn query (&self, point: &GeoPoint, mode: AcquisitionMode) -> Option<GridCell> { (**self).query( point, mode) }
    fn query_all (&self, point: &GeoPoint, mode: AcquisitionMode) -> Vec<GridCell> { (**self).query_all( point, mode) }
}

/// a grid cell together with its footprint
#[derive(Debug,Clone)]
pub struct WrsFeature {
    pub cell: GridCell,
    pub area: GeoMultiPolygon,
}

impl WrsFeature {
    pub fn new (cell: GridCell, area: GeoMultiPolygon) -> Self {
        WrsFeature { cell, area }
    }

    pub fn matches (&self, point: &GeoPoint, mode: AcquisitionMode) -> bool {
        self.cell.mode == mode && self.area.contains_inclusive( point)
    }
}

/// in-memory WRS-2 feature layer. Features are kept in file order, which determines which cell wins
/// if a point is on a shared boundary or in an overlap area
#[derive(Debug,Clone,Default)]
pub struct WrsGrid {
    features: Vec<WrsFeature>
}

impl WrsGrid {
    pub fn new (features: Vec<WrsFeature>) -> Self {
        WrsGrid { features }
    }

    pub fn len (&self) -> usize { self.features.len() }
    pub fn is_empty (&self) -> bool { self.features.is_empty() }
    pub fn features (&self) -> &[WrsFeature] { &self.features }

    pub fn from_geojson_file<P: AsRef<Path>> (path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string( path)?;
        let grid = Self::from_geojson_str( &s)?;
        info!("loaded {} WRS-2 features from {:?}", grid.len(), path);
        Ok(grid)
    }

    pub fn from_geojson_str (s: &str) -> Result<Self> {
        let geojson: GeoJson = s.parse()?;
        let fc = FeatureCollection::try_from( geojson)?;
        Self::from_feature_collection( fc)
    }

    /// this fails on the first feature that does not have a valid PATH, ROW or MODE property, or has no areal geometry
    pub fn from_feature_collection (fc: FeatureCollection) -> Result<Self> {
        let mut features = Vec::with_capacity( fc.features.len());

        for (i, feature) in fc.features.into_iter().enumerate() {
            let path = cell_number( &feature, "PATH", i)?;
            let row = cell_number( &feature, "ROW", i)?;
            let mode = acquisition_mode( &feature, i)?;

            let cell = GridCell { path, row, mode };
            if !cell.is_valid() {
                return Err( dataset_error!("feature {} has out of range path/row {}/{}", i, path, row))
            }

            let geometry = feature.geometry.ok_or_else( || dataset_error!("feature {} ({}) has no geometry", i, cell))?;
            let area = GeoMultiPolygon::try_from( geometry)?;

            features.push( WrsFeature::new( cell, area));
        }

        Ok( WrsGrid { features })
    }

    fn matching<'a> (&'a self, point: &'a GeoPoint, mode: AcquisitionMode) -> impl Iterator<Item=&'a WrsFeature> + 'a {
        self.features.iter().filter( move |f| f.matches( point, mode))
    }

    /// all cells of `mode` that contain `point`, in dataset order. Scenes overlap so this is usually more than one
    pub fn matching_cells (&self, point: &GeoPoint, mode: AcquisitionMode) -> Vec<GridCell> {
        self.matching( point, mode).map( |f| f.cell).collect()
    }
}

impl PolygonDataset for WrsGrid {
    fn query (&self, point: &GeoPoint, mode: AcquisitionMode) -> Option<GridCell> {
        self.matching( point, mode).next().map( |f| f.cell)
    }

    fn query_all (&self, point: &GeoPoint, mode: AcquisitionMode) -> Vec<GridCell> {
        self.matching_cells( point, mode)
    }
}

// WRS-2 attribute tables use upper case names but we also see lower case in converted datasets
fn property<'a> (feature: &'a Feature, name: &str) -> Option<&'a JsonValue> {
    feature.property( name).or_else( || feature.property( name.to_ascii_lowercase()))
}

fn cell_number (feature: &Feature, name: &str, idx: usize) -> Result<u16> {
    let v = property( feature, name).ok_or_else( || dataset_error!("feature {} has no {} property", idx, name))?;

    let n = match v {
        JsonValue::Number(n) => n.as_u64().or_else( || n.as_f64().filter( |x| x.fract() == 0.0 && *x >= 0.0).map( |x| x as u64)),
        JsonValue::String(s) => s.trim().parse::<u64>().ok(),
        _ => None
    };

    n.and_then( |n| u16::try_from(n).ok())
        .ok_or_else( || dataset_error!("feature {} has invalid {} value {}", idx, name, v))
}

fn acquisition_mode (feature: &Feature, idx: usize) -> Result<AcquisitionMode> {
    match property( feature, "MODE") {
        Some(JsonValue::String(s)) => s.parse::<AcquisitionMode>().map_err( |e: String| dataset_error!("feature {}: {}", idx, e)),
        Some(v) => Err( dataset_error!("feature {} has invalid MODE value {}", idx, v)),
        None => Err( dataset_error!("feature {} has no MODE property", idx))
    }
}

/// maps locations to grid cells
#[derive(Debug,Clone)]
pub struct GridResolver<D> where D: PolygonDataset {
    dataset: D
}

impl<D> GridResolver<D> where D: PolygonDataset {
    pub fn new (dataset: D) -> Self {
        GridResolver { dataset }
    }

    pub fn dataset (&self) -> &D { &self.dataset }

    /// find the grid cell of `point` for acquisitions in `mode`. Locations outside of the
    /// grid (or with no cell of the requested mode) are reported as [`OverpassError::CellNotFound`]
    pub fn resolve (&self, point: &GeoPoint, mode: AcquisitionMode) -> Result<GridCell> {
        match self.dataset.query( point, mode) {
            Some(cell) => {
                if tracing::enabled!( Level::DEBUG) {
                    let candidates = self.dataset.query_all( point, mode);
                    if candidates.len() > 1 {
                        debug!("{} is in {} cells {:?}, using {}", point, candidates.len(), candidates, cell);
                    } else {
                        debug!("{} resolved to {}", point, cell);
                    }
                }
                Ok(cell)
            }
            None => Err( OverpassError::CellNotFound {
                lat: point.latitude_degrees(),
                lon: point.longitude_degrees(),
                mode
            })
        }
    }
}
