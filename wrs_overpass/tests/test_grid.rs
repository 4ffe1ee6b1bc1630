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

use wrs_common::geo::{GeoMultiPolygon, GeoPoint, GeoPolygon};
use wrs_overpass::{
    errors::OverpassError, AcquisitionMode::{self, Ascending, Descending},
    GridCell, GridResolver, PolygonDataset, WrsFeature, WrsGrid
};

// run with "cargo test --test test_grid -- --nocapture"

fn square (lon0: f64, lat0: f64, size: f64) -> GeoMultiPolygon {
    GeoPolygon::from_lon_lat_degrees( &[
        (lon0, lat0), (lon0 + size, lat0), (lon0 + size, lat0 + size), (lon0, lat0 + size), (lon0, lat0)
    ]).into()
}

fn feature (path: u16, row: u16, mode: AcquisitionMode, area: GeoMultiPolygon) -> WrsFeature {
    WrsFeature::new( GridCell { path, row, mode }, area)
}

/// two descending cells that share the lon=0 edge, and an ascending cell covering both
fn fixture_grid () -> WrsGrid {
    WrsGrid::new( vec![
        feature( 13, 24, Descending, square( -1.0, 50.0, 1.0)),
        feature( 29, 24, Descending, square( 0.0, 50.0, 1.0)),
        feature( 120, 200, Ascending, square( -2.0, 49.0, 4.0)),
    ])
}

fn point (lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::from_lat_lon_degrees( lat, lon).unwrap()
}

#[test]
fn test_resolve_inside () {
    let resolver = GridResolver::new( fixture_grid());

    let cell = resolver.resolve( &point( 50.5, -0.5), Descending).unwrap();
    assert_eq!( cell, GridCell { path: 13, row: 24, mode: Descending });

    let cell = resolver.resolve( &point( 50.5, 0.5), Descending).unwrap();
    assert_eq!( cell.path, 29);

    let cell = resolver.resolve( &point( 50.5, 0.5), Ascending).unwrap();
    assert_eq!( cell, GridCell { path: 120, row: 200, mode: Ascending });
}

#[test]
fn test_resolve_not_found () {
    let resolver = GridResolver::new( fixture_grid());

    match resolver.resolve( &point( -30.0, 100.0), Descending) {
        Err(OverpassError::CellNotFound{lat,lon,mode}) => {
            assert_eq!( lat, -30.0);
            assert_eq!( lon, 100.0);
            assert_eq!( mode, Descending);
        }
        other => panic!("expected CellNotFound, got {other:?}")
    }

    // covered only by an ascending cell
    assert!( matches!( resolver.resolve( &point( 52.5, 1.5), Descending), Err(OverpassError::CellNotFound{..})));
    assert!( resolver.resolve( &point( 52.5, 1.5), Ascending).is_ok());

    // empty datasets are no error, they just don't contain anything
    let empty = GridResolver::new( WrsGrid::default());
    assert!( matches!( empty.resolve( &point( 50.5, -0.5), Descending), Err(OverpassError::CellNotFound{..})));
}

#[test]
fn test_shared_boundary_first_wins () {
    let grid = fixture_grid();
    let on_edge = point( 50.5, 0.0);

    assert_eq!( grid.matching_cells( &on_edge, Descending).iter().map( |c| c.path).collect::<Vec<_>>(), vec![13, 29]);
    assert_eq!( grid.query( &on_edge, Descending).unwrap().path, 13);
    assert_eq!( grid.query_all( &on_edge, Descending).len(), 2);

    // reversed dataset order reverses the winner
    let mut features = grid.features().to_vec();
    features.swap( 0, 1);
    let reversed = WrsGrid::new( features);
    assert_eq!( reversed.query( &on_edge, Descending).unwrap().path, 29);

    // outer corner is still inside (boundary inclusive)
    assert_eq!( grid.query( &point( 51.0, -1.0), Descending).unwrap().path, 13);
}

#[test]
fn test_dataset_by_reference () {
    let grid = fixture_grid();
    let resolver = GridResolver::new( &grid);
    assert_eq!( resolver.resolve( &point( 50.5, -0.5), Descending).unwrap().path, 13);
    assert_eq!( resolver.dataset().len(), 3);
}

const WRS_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "PATH": 204, "ROW": 24, "MODE": "D" },
      "geometry": { "type": "Polygon", "coordinates": [[[-5.5, 50.0], [-3.0, 50.0], [-3.0, 52.0], [-5.5, 52.0], [-5.5, 50.0]]] }
    },
    {
      "type": "Feature",
      "properties": { "PATH": "205", "ROW": 24.0, "MODE": "A" },
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[179.0, 0.0], [180.0, 0.0], [180.0, 1.0], [179.0, 1.0], [179.0, 0.0]]],
          [[[-180.0, 0.0], [-179.0, 0.0], [-179.0, 1.0], [-180.0, 1.0], [-180.0, 0.0]]]
        ]
      }
    },
    {
      "type": "Feature",
      "properties": { "path": 13, "row": 1, "mode": "d" },
      "geometry": { "type": "Polygon", "coordinates": [[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 11.0], [10.0, 10.0]]] }
    }
  ]
}"#;

#[test]
fn test_load_geojson () {
    let grid = WrsGrid::from_geojson_str( WRS_GEOJSON).unwrap();
    assert_eq!( grid.len(), 3);

    let cells: Vec<GridCell> = grid.features().iter().map( |f| f.cell).collect();
    assert_eq!( cells, vec![
        GridCell { path: 204, row: 24, mode: Descending },
        GridCell { path: 205, row: 24, mode: Ascending },
        GridCell { path: 13, row: 1, mode: Descending },
    ]);

    let resolver = GridResolver::new( grid);
    assert_eq!( resolver.resolve( &point( 50.85, -4.35), Descending).unwrap().path, 204);
    assert_eq!( resolver.resolve( &point( 0.5, -179.5), Ascending).unwrap().path, 205);
    assert_eq!( resolver.resolve( &point( 0.5, 179.5), Ascending).unwrap().path, 205);
    assert_eq!( resolver.resolve( &point( 10.5, 10.5), Descending).unwrap().path, 13);
}

fn single_feature (properties: &str, geometry: &str) -> String {
    format!( r#"{{ "type": "FeatureCollection", "features": [ {{ "type": "Feature", "properties": {properties}, "geometry": {geometry} }} ] }}"#)
}

const UNIT_SQUARE: &str = r#"{ "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]] }"#;

#[test]
fn test_load_geojson_errors () {
    let cases = [
        single_feature( r#"{ "ROW": 24, "MODE": "D" }"#, UNIT_SQUARE),            // no PATH
        single_feature( r#"{ "PATH": 1, "ROW": 24, "MODE": "X" }"#, UNIT_SQUARE), // bad MODE
        single_feature( r#"{ "PATH": 1, "ROW": 24, "MODE": 1 }"#, UNIT_SQUARE),   // MODE not a string
        single_feature( r#"{ "PATH": 234, "ROW": 24, "MODE": "D" }"#, UNIT_SQUARE), // path out of range
        single_feature( r#"{ "PATH": 1, "ROW": 24.5, "MODE": "D" }"#, UNIT_SQUARE), // fractional row
        single_feature( r#"{ "PATH": 1, "ROW": 24, "MODE": "D" }"#, "null"),       // no geometry
    ];

    for (i, input) in cases.iter().enumerate() {
        match WrsGrid::from_geojson_str( input) {
            Err(OverpassError::DatasetError(msg)) => println!("case {i}: {msg}"),
            other => panic!("case {i}: expected DatasetError, got {other:?}")
        }
    }

    let line = single_feature( r#"{ "PATH": 1, "ROW": 24, "MODE": "D" }"#, r#"{ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }"#);
    assert!( matches!( WrsGrid::from_geojson_str( &line), Err(OverpassError::CommonError(_))));

    assert!( WrsGrid::from_geojson_str( "not json").is_err());
}
