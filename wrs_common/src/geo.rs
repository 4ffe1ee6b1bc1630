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

//! this module provides geodetic value types for point-in-polygon lookups.
//! We use the [geo](https://docs.rs/geo/latest/geo/index.html) crate for the algorithms and wrap its types with the
//! Rust [new type](https://doc.rust-lang.org/rust-by-example/generics/new_types.html) pattern so that we can
//! add value semantics (validated latitude/longitude degrees) without copying overhead.
//! Note that `geo` uses x/y order, i.e. longitude comes first.

use std::fmt;

use serde::ser::{Serialize as SerializeTrait, Serializer, SerializeStruct};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, Visitor, SeqAccess, MapAccess};

use geo::{BoundingRect, Coord, Intersects, LineString, MultiPolygon, Point, Polygon, Rect};

use crate::impl_deserialize_struct;
use crate::errors::{Result, WrsCommonError};

pub type GeoCoord = Coord<f64>;

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64.
/// Values are checked on construction, we do not normalize out-of-range input
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lat_lon_degrees (lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err( WrsCommonError::InvalidCoordinates(lat,lon))
        }
        Ok( GeoPoint( Point::new( lon, lat)) )
    }

    /// x/y order version for sources that store longitude first (GeoJSON, `geo` serializations)
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Result<Self> {
        Self::from_lat_lon_degrees( lat, lon)
    }

    #[inline] pub fn latitude_degrees(&self) -> f64 { self.0.y() }
    #[inline] pub fn longitude_degrees(&self) -> f64 { self.0.x() }

    pub fn point (&self) -> &Point { &self.0 }
    pub fn coord (&self) -> GeoCoord { self.0.0 }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

impl SerializeTrait for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.end()
    }
}

// we accept "lat", "latitude" or "y" for latitude degrees and "lon", "longitude" or "x" for longitude degrees so that
// we can directly read points serialized by `geo` types
impl_deserialize_struct!{ GeoPoint::from_lat_lon_degrees( lat | latitude | y, lon | longitude | x) }

/* #endregion GeoPoint */

/* #region GeoPolygon **********************************************************************************************/

/// a single polygon with optional holes.
/// Containment checks are boundary inclusive
#[derive(Debug,Clone,PartialEq)]
pub struct GeoPolygon(Polygon);

impl GeoPolygon {
    pub fn from_geo_points (exterior: &[GeoPoint], interiors: &[Vec<GeoPoint>]) -> Self {
        let ext = LineString::new( exterior.iter().map(|p| p.coord()).collect());
        let ints: Vec<LineString> = interiors.iter()
            .map( |ps| LineString::new( ps.iter().map(|p| p.coord()).collect()))
            .collect();

        GeoPolygon( Polygon::new( ext, ints))
    }

    pub fn from_exterior_geo_points (exterior: &[GeoPoint]) -> Self {
        Self::from_geo_points( exterior, &[])
    }

    /// convenience ctor for (lon,lat) degree tuples, which is the order used by GeoJSON.
    /// Note this does not check ranges
    pub fn from_lon_lat_degrees (exterior: &[(f64,f64)]) -> Self {
        let ext: Vec<GeoCoord> = exterior.iter().map( |(lon,lat)| Coord { x: *lon, y: *lat }).collect();
        GeoPolygon( Polygon::new( LineString::new( ext), Vec::new()))
    }

    pub fn polygon (&self) -> &Polygon { &self.0 }

    pub fn exterior_coords_count (&self) -> usize { self.0.exterior().0.len() }

    pub fn has_interiors (&self) -> bool { !self.0.interiors().is_empty() }

    /// true if `p` is inside or on the boundary of this polygon (but not inside a hole)
    pub fn contains_inclusive (&self, p: &GeoPoint) -> bool { self.0.intersects( p.point()) }

    pub fn bounding_rect (&self) -> Option<Rect> { self.0.bounding_rect() }
}

/* #endregion GeoPolygon */

/* #region GeoMultiPolygon *****************************************************************************************/

/// the general area type we use for dataset features. Single polygons are stored as one-element multi polygons
/// so that antimeridian-split geometries need no special treatment
#[derive(Debug,Clone,PartialEq)]
pub struct GeoMultiPolygon {
    polygons: MultiPolygon,
    bbox: Option<Rect> // cached for quick rejection
}

impl GeoMultiPolygon {
    pub fn from_polygons (polygons: Vec<GeoPolygon>) -> Self {
        let polygons = MultiPolygon::new( polygons.into_iter().map(|p| p.0).collect());
        let bbox = polygons.bounding_rect();
        GeoMultiPolygon { polygons, bbox }
    }

    pub fn polygon_count (&self) -> usize { self.polygons.0.len() }

    pub fn bounding_rect (&self) -> Option<Rect> { self.bbox }

    /// boundary inclusive containment test
    pub fn contains_inclusive (&self, p: &GeoPoint) -> bool {
        match &self.bbox {
            Some(bbox) if is_within_rect( bbox, &p.coord()) => self.polygons.intersects( p.point()),
            _ => false
        }
    }
}

impl From<GeoPolygon> for GeoMultiPolygon {
    fn from (p: GeoPolygon) -> Self { GeoMultiPolygon::from_polygons( vec![p]) }
}

/// GeoJSON geometries of feature layers. Only areal geometries are accepted
impl TryFrom<geojson::Geometry> for GeoMultiPolygon {
    type Error = WrsCommonError;

    fn try_from (geometry: geojson::Geometry) -> Result<Self> {
        let geom: geo_types::Geometry<f64> = geometry.try_into()?;
        match geom {
            geo_types::Geometry::Polygon(p) => Ok( GeoPolygon(p).into() ),
            geo_types::Geometry::MultiPolygon(mp) => Ok( GeoMultiPolygon::from_polygons( mp.0.into_iter().map( GeoPolygon).collect()) ),
            other => Err( WrsCommonError::UnsupportedGeometry( geometry_type_name( &other).to_string()) )
        }
    }
}

fn geometry_type_name (geom: &geo_types::Geometry<f64>) -> &'static str {
    match geom {
        geo_types::Geometry::Point(_) => "Point",
        geo_types::Geometry::LineString(_) => "LineString",
        geo_types::Geometry::MultiPoint(_) => "MultiPoint",
        geo_types::Geometry::MultiLineString(_) => "MultiLineString",
        geo_types::Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "Geometry"
    }
}

#[inline]
fn is_within_rect (r: &Rect, c: &GeoCoord) -> bool {
    let min = r.min();
    let max = r.max();
    c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y
}

/* #endregion GeoMultiPolygon */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_prefilter_is_inclusive () {
        let r = Rect::new( Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 2.0 });
        assert!( is_within_rect( &r, &Coord { x: 1.0, y: 2.0 }));
        assert!( is_within_rect( &r, &Coord { x: 0.0, y: 1.0 }));
        assert!( !is_within_rect( &r, &Coord { x: 1.000001, y: 1.0 }));
    }
}
