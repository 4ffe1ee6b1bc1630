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

use wrs_common::geo::*;
use wrs_common::WrsCommonError;

// run with "cargo test test_geo -- --nocapture"

fn unit_square (lon0: f64, lat0: f64) -> GeoPolygon {
    GeoPolygon::from_lon_lat_degrees( &[
        (lon0, lat0), (lon0 + 1.0, lat0), (lon0 + 1.0, lat0 + 1.0), (lon0, lat0 + 1.0), (lon0, lat0)
    ])
}

#[test]
fn test_point_ranges () {
    let p = GeoPoint::from_lat_lon_degrees( 50.85, -4.35).unwrap();
    assert_eq!( p.latitude_degrees(), 50.85);
    assert_eq!( p.longitude_degrees(), -4.35);
    println!("p = {p}");

    assert!( GeoPoint::from_lat_lon_degrees( 90.0, 180.0).is_ok());
    assert!( GeoPoint::from_lat_lon_degrees( -90.0, -180.0).is_ok());

    match GeoPoint::from_lat_lon_degrees( 91.0, 0.0) {
        Err(WrsCommonError::InvalidCoordinates(lat,lon)) => { assert_eq!(lat, 91.0); assert_eq!(lon, 0.0) }
        other => panic!("expected InvalidCoordinates, got {other:?}")
    }
    assert!( GeoPoint::from_lat_lon_degrees( 0.0, 180.5).is_err());
    assert!( GeoPoint::from_lat_lon_degrees( f64::NAN, 0.0).is_err());
}

#[test]
fn test_point_serde () {
    let input = r#"{ "latitude": 37.0, "longitude": -122.0 }"#;
    let p: GeoPoint = serde_json::from_str(input).unwrap();
    assert_eq!( p, GeoPoint::from_lat_lon_degrees( 37.0, -122.0).unwrap());

    // alternative field names
    let p1: GeoPoint = serde_json::from_str( r#"{ "lon": -122.0, "lat": 37.0 }"#).unwrap();
    let p2: GeoPoint = serde_json::from_str( r#"{ "x": -122.0, "y": 37.0 }"#).unwrap();
    assert_eq!( p, p1);
    assert_eq!( p, p2);

    let s = serde_json::to_string(&p).unwrap();
    println!("serialized GeoPoint: '{s}'");
    assert_eq!( s, r#"{"lat":37.0,"lon":-122.0}"#);

    // ctor checks turn into deserialization errors
    assert!( serde_json::from_str::<GeoPoint>( r#"{ "lat": 100.0, "lon": 0.0 }"#).is_err());
    assert!( serde_json::from_str::<GeoPoint>( r#"{ "lat": 10.0 }"#).is_err());
}

#[test]
fn test_polygon_contains () {
    let poly = unit_square( 10.0, 20.0);
    let inside = GeoPoint::from_lat_lon_degrees( 20.5, 10.5).unwrap();
    let outside = GeoPoint::from_lat_lon_degrees( 21.5, 10.5).unwrap();
    let on_edge = GeoPoint::from_lat_lon_degrees( 20.5, 11.0).unwrap();
    let on_vertex = GeoPoint::from_lat_lon_degrees( 20.0, 10.0).unwrap();

    assert!( poly.contains_inclusive( &inside));
    assert!( !poly.contains_inclusive( &outside));
    assert!( poly.contains_inclusive( &on_edge));
    assert!( poly.contains_inclusive( &on_vertex));

    let mp = GeoMultiPolygon::from( poly);
    assert_eq!( mp.polygon_count(), 1);
    assert!( mp.contains_inclusive( &inside));
    assert!( mp.contains_inclusive( &on_edge));
    assert!( !mp.contains_inclusive( &outside));
}

#[test]
fn test_polygon_with_hole () {
    let ext: Vec<GeoPoint> = [(0.0,0.0),(0.0,4.0),(4.0,4.0),(4.0,0.0),(0.0,0.0)].iter()
        .map( |(lat,lon)| GeoPoint::from_lat_lon_degrees(*lat,*lon).unwrap()).collect();
    let hole: Vec<GeoPoint> = [(1.0,1.0),(1.0,3.0),(3.0,3.0),(3.0,1.0),(1.0,1.0)].iter()
        .map( |(lat,lon)| GeoPoint::from_lat_lon_degrees(*lat,*lon).unwrap()).collect();
    let poly = GeoPolygon::from_geo_points( &ext, &[hole]);
    assert!( poly.has_interiors());

    assert!( poly.contains_inclusive( &GeoPoint::from_lat_lon_degrees( 0.5, 0.5).unwrap()));
    assert!( !poly.contains_inclusive( &GeoPoint::from_lat_lon_degrees( 2.0, 2.0).unwrap()));
}

#[test]
fn test_multipolygon_from_geojson () {
    let input = r#"{
        "type": "MultiPolygon",
        "coordinates": [
            [[[179.0, 0.0], [180.0, 0.0], [180.0, 1.0], [179.0, 1.0], [179.0, 0.0]]],
            [[[-180.0, 0.0], [-179.0, 0.0], [-179.0, 1.0], [-180.0, 1.0], [-180.0, 0.0]]]
        ]
    }"#;
    let geometry: geojson::Geometry = serde_json::from_str(input).unwrap();
    let mp = GeoMultiPolygon::try_from( geometry).unwrap();
    assert_eq!( mp.polygon_count(), 2);

    assert!( mp.contains_inclusive( &GeoPoint::from_lat_lon_degrees( 0.5, 179.5).unwrap()));
    assert!( mp.contains_inclusive( &GeoPoint::from_lat_lon_degrees( 0.5, -179.5).unwrap()));
    assert!( !mp.contains_inclusive( &GeoPoint::from_lat_lon_degrees( 0.5, 0.0).unwrap()));

    let line = r#"{ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }"#;
    let geometry: geojson::Geometry = serde_json::from_str(line).unwrap();
    match GeoMultiPolygon::try_from( geometry) {
        Err(WrsCommonError::UnsupportedGeometry(name)) => assert_eq!( name, "LineString"),
        other => panic!("expected UnsupportedGeometry, got {other:?}")
    }
}
