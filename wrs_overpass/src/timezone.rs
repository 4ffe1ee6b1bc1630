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

//! location to IANA time zone lookup.
//! The DST rules come from chrono-tz, the zone boundaries from GeoJSON datasets such as
//! the ones published by the timezone-boundary-builder project (one feature per zone with a `tzid` property)

use std::{fs, path::Path, sync::Arc};
use chrono_tz::Tz;
use geojson::{FeatureCollection, GeoJson, JsonValue};
use tracing::{info, warn};
use wrs_common::geo::{GeoMultiPolygon, GeoPoint};
use crate::errors::{dataset_error, OverpassError, Result};

pub trait TimezoneResolver {
    /// None means there is no zone for this location (e.g. open ocean)
    fn zone_for (&self, point: &GeoPoint) -> Option<Tz>;
}

impl<T> TimezoneResolver for &T where T: TimezoneResolver + ?Sized {
    fn zone_for (&self, point: &GeoPoint) -> Option<Tz> { (**self).zone_for( point) }
}

impl<T> TimezoneResolver for Box<T> where T: TimezoneResolver + ?Sized {
    fn zone_for (&self, point: &GeoPoint) -> Option<Tz> { (**self).zone_for( point) }
}

impl<T> TimezoneResolver for Arc<T> where T: TimezoneResolver + ?Sized {
    fn zone_for (&self, point: &GeoPoint) -> Option<Tz> { (**self).zone_for( point) }
}

/// resolves every location to the same zone
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FixedZone(pub Tz);

impl TimezoneResolver for FixedZone {
    fn zone_for (&self, _point: &GeoPoint) -> Option<Tz> { Some(self.0) }
}

/// polygon based zone lookup. The first zone (in dataset order) that contains the point wins
#[derive(Debug,Clone,Default)]
pub struct ZoneBoundaries {
    zones: Vec<(Tz,GeoMultiPolygon)>
}

impl ZoneBoundaries {
    pub fn new (zones: Vec<(Tz,GeoMultiPolygon)>) -> Self {
        ZoneBoundaries { zones }
    }

    pub fn len (&self) -> usize { self.zones.len() }
    pub fn is_empty (&self) -> bool { self.zones.is_empty() }

    pub fn from_geojson_file<P: AsRef<Path>> (path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string( path)?;
        let zones = Self::from_geojson_str( &s)?;
        info!("loaded {} time zone boundaries from {:?}", zones.len(), path);
        Ok(zones)
    }

    pub fn from_geojson_str (s: &str) -> Result<Self> {
        let geojson: GeoJson = s.parse()?;
        let fc = FeatureCollection::try_from( geojson)?;
        Self::from_feature_collection( fc)
    }

    /// features without a zone id or geometry are errors. Zone ids that are not in the chrono-tz database
    /// (boundary releases can be newer) are skipped with a warning
    pub fn from_feature_collection (fc: FeatureCollection) -> Result<Self> {
        let mut zones = Vec::with_capacity( fc.features.len());

        for (i, feature) in fc.features.into_iter().enumerate() {
            let tzid = match feature.property("tzid").or_else( || feature.property("TZID")) {
                Some(JsonValue::String(s)) => s.clone(),
                _ => return Err( dataset_error!("feature {} has no tzid property", i))
            };

            let Ok(tz) = tzid.parse::<Tz>() else {
                warn!("skipping unknown time zone '{}'", tzid);
                continue
            };

            let geometry = feature.geometry.ok_or_else( || dataset_error!("time zone {} has no geometry", tzid))?;
            zones.push( (tz, GeoMultiPolygon::try_from( geometry)?) );
        }

        Ok( ZoneBoundaries { zones })
    }
}

impl TimezoneResolver for ZoneBoundaries {
    fn zone_for (&self, point: &GeoPoint) -> Option<Tz> {
        self.zones.iter().find( |(_,area)| area.contains_inclusive( point)).map( |(tz,_)| *tz)
    }
}

/// a sequence of resolvers that are tried in order
#[derive(Default)]
pub struct ZoneResolverChain {
    resolvers: Vec<Box<dyn TimezoneResolver + Send + Sync>>
}

impl ZoneResolverChain {
    pub fn new () -> Self { ZoneResolverChain { resolvers: Vec::new() } }

    pub fn push<R> (&mut self, resolver: R) where R: TimezoneResolver + Send + Sync + 'static {
        self.resolvers.push( Box::new(resolver))
    }

    pub fn with<R> (mut self, resolver: R) -> Self where R: TimezoneResolver + Send + Sync + 'static {
        self.push( resolver);
        self
    }

    pub fn len (&self) -> usize { self.resolvers.len() }
    pub fn is_empty (&self) -> bool { self.resolvers.is_empty() }
}

impl TimezoneResolver for ZoneResolverChain {
    fn zone_for (&self, point: &GeoPoint) -> Option<Tz> {
        self.resolvers.iter().find_map( |r| r.zone_for( point))
    }
}
