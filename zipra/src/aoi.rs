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

//! areas of interest. An AOI can be given as WKT, GeoJSON text, a vector file (shapefile, GeoJSON)
//! or an in-memory geometry collection. All forms are resolved into a single (multi) polygon and
//! the SRS it is expressed in

use std::{path::{Path,PathBuf}, str::FromStr};
use geojson::GeoJson;
use tracing::{debug,info,warn};
use zipra_gdal::{
    Geometry, LayerAccess, SpatialRef, ToGdal,
    geometry_type_name, is_polygonal, open_vector_dataset, srs_from_definition, union_all,
};

use crate::attempt;
use crate::errors::{Result, Outcome, Stage, invalid_aoi, not_found};

/// the CRS of AOIs that don't carry their own (longitude,latitude order)
pub const DEFAULT_AOI_CRS: &str = "EPSG:4326";

/// file extensions we accept for vector AOI files (compared case insensitive)
pub const VECTOR_EXTS: [&str;3] = ["shp", "geojson", "json"];

#[derive(Debug,Clone)]
pub enum AoiSource {
    Wkt(String),
    GeoJson(String),
    VectorFile(PathBuf),
    Collection { geometries: geo_types::GeometryCollection<f64>, crs: String },
}

impl AoiSource {
    /// interpret a command line argument: paths with a vector file extension are files, text
    /// starting with '{' is GeoJSON, everything else is WKT
    pub fn from_arg (arg: &str) -> Self {
        let s = arg.trim();
        if s.starts_with('{') {
            AoiSource::GeoJson( s.to_string())
        } else if has_vector_ext( Path::new(s)) {
            AoiSource::VectorFile( PathBuf::from(s))
        } else {
            AoiSource::Wkt( s.to_string())
        }
    }
}

fn has_vector_ext (path: &Path) -> bool {
    path.extension()
        .and_then( |e| e.to_str())
        .map( |e| VECTOR_EXTS.contains( &e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// a resolved AOI. `geometry` is always a polygon or multipolygon in `srs`
pub struct Aoi {
    pub geometry: Geometry,
    pub srs: SpatialRef,
}

/// resolve an AOI source into a single polygonal geometry. `crs` is used for sources that don't
/// specify their own CRS (WKT, GeoJSON and vector files without SRS); it defaults to `DEFAULT_AOI_CRS`
pub fn resolve_aoi (source: &AoiSource, crs: Option<&str>) -> Result<Outcome<Aoi>> {
    let crs = crs.unwrap_or( DEFAULT_AOI_CRS);

    match source {
        AoiSource::Wkt(wkt) => {
            let geom = Geometry::from_wkt( wkt).map_err( |e| invalid_aoi( format!("malformed WKT: {e}")))?;
            let srs = parse_crs( crs)?;
            union_polygons( vec![geom], srs)
        }
        AoiSource::GeoJson(json) => {
            let gj = GeoJson::from_str( json).map_err( |e| invalid_aoi( format!("malformed GeoJSON: {e}")))?;
            let gc: geo_types::GeometryCollection<f64> = geojson::quick_collection( &gj)
                .map_err( |e| invalid_aoi( format!("unsupported GeoJSON: {e}")))?;
            let geoms = to_gdal_geometries( &gc)?;
            union_polygons( geoms, parse_crs( crs)?)
        }
        AoiSource::Collection { geometries, crs } => {
            let geoms = to_gdal_geometries( geometries)?;
            union_polygons( geoms, parse_crs( crs)?)
        }
        AoiSource::VectorFile(path) => resolve_vector_file( path, crs)
    }
}

fn parse_crs (crs: &str) -> Result<SpatialRef> {
    srs_from_definition( crs).map_err( |e| invalid_aoi( format!("unknown CRS {crs}: {e}")))
}

fn to_gdal_geometries (gc: &geo_types::GeometryCollection<f64>) -> Result<Vec<Geometry>> {
    let mut geoms = Vec::with_capacity( gc.0.len());
    for g in gc.iter() {
        match g {
            geo_types::Geometry::Polygon(_) | geo_types::Geometry::MultiPolygon(_) => {
                geoms.push( g.to_gdal().map_err( |e| invalid_aoi(e))?);
            }
            other => return Err( invalid_aoi( format!("only Polygon and MultiPolygon AOIs are supported, got {other:?}")))
        }
    }
    Ok(geoms)
}

fn resolve_vector_file (path: &Path, default_crs: &str) -> Result<Outcome<Aoi>> {
    if !has_vector_ext( path) {
        return Err( invalid_aoi( format!("unsupported AOI file type {path:?}, expected one of {VECTOR_EXTS:?}")))
    }
    if !path.is_file() { return Err( not_found(path)) }

    let ds = attempt!( Stage::Aoi, open_vector_dataset( path));
    if ds.layer_count() == 0 {
        return Err( invalid_aoi( format!("no layers in {path:?}")))
    }
    if ds.layer_count() > 1 {
        warn!("AOI file {path:?} has {} layers, using the first one", ds.layer_count());
    }

    let mut layer = attempt!( Stage::Aoi, ds.layer(0));
    let srs = match layer.spatial_ref() {
        Some(mut srs) => {
            srs.set_axis_mapping_strategy( zipra_gdal::AxisMappingStrategy::TraditionalGisOrder);
            srs
        }
        None => {
            debug!("AOI file {path:?} has no SRS, assuming {default_crs}");
            parse_crs( default_crs)?
        }
    };

    let geoms: Vec<Geometry> = layer.features()
        .filter_map( |f| f.geometry().cloned())
        .collect();

    info!("read {} AOI geometries from {path:?}", geoms.len());
    union_polygons( geoms, srs)
}

/// check geometries and merge them into one
fn union_polygons (geoms: Vec<Geometry>, srs: SpatialRef) -> Result<Outcome<Aoi>> {
    if geoms.is_empty() { return Err( invalid_aoi("no geometries")) }

    for g in &geoms {
        if !is_polygonal( g) {
            return Err( invalid_aoi( format!("only Polygon and MultiPolygon AOIs are supported, got {}", geometry_type_name(g))))
        }
        if g.is_empty() { return Err( invalid_aoi("empty polygon")) }
        if !g.is_valid() { return Err( invalid_aoi("self-intersecting or otherwise invalid polygon")) }
    }

    let geometry = if geoms.len() == 1 {
        geoms.into_iter().next()
    } else {
        union_all( &geoms)
    };

    match geometry {
        Some(geometry) => Ok( Outcome::Completed( Aoi { geometry, srs })),
        None => Ok( Outcome::failed( Stage::Aoi, "cannot compute union of AOI geometries"))
    }
}
