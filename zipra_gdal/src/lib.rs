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

#![allow(unused)]

//! thin layer over the `gdal` crate (and some raw `gdal_sys` calls that are not exposed by `gdal`)
//! for the raster operations we delegate to GDAL: separate-band VRT mosaics, warping, windowed reads
//! and geometry masks

pub mod errors;
pub mod warp;
pub mod vrt;
pub mod mask;

use gdal::{errors::CplErrType, raster::RasterCreationOptions, DatasetOptions, GdalOpenFlags};
use lazy_static::lazy_static;
use static_init::constructor;
use std::{collections::HashMap, ffi::CStr, path::Path, sync::Mutex};
use libc::c_char;
use tracing::{debug,trace};

// we re-export these so that other crates don't have to use a direct gdal depedency to import.
pub use gdal::{self, Driver, DriverManager, Metadata, Dataset, errors::GdalError, GeoTransform, GeoTransformEx};
pub use gdal::raster::{GdalType,GdalDataType,RasterBand,Buffer};
pub use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
pub use gdal::vector::{Geometry, LayerAccess, ToGdal};

use crate::errors::{Result, misc_error, ZipraGdalError};
use crate::mask::PixelWindow;

lazy_static! {
    // note that we can't automatically populate this by iterating over DriverManager since some
    // drivers use the same file extension
    static ref EXT_MAP: HashMap<&'static str, &'static str> = HashMap::from( [ // file extension -> driver short name
        //-- raster drivers we read or write
        ("tif", "GTiff"),
        ("tiff", "GTiff"),
        ("jp2", "JP2OpenJPEG"),
        ("vrt", "VRT"),

        //--- vector drivers for AOI files
        ("json", "GeoJSON"),
        ("geojson", "GeoJSON"),
        ("shp", "ESRI Shapefile"),
    ]);
}

/// use this to protect non-threadsafe GDAL operations
static GLOB_GDAL_MUTEX: Mutex<usize> = Mutex::new(0);

#[constructor(0)]
extern "C" fn _initialize_gdal() {
    gdal::config::set_error_handler(trace_gdal_error);
}

// GDAL messages only go to the trace log. Failures are reported through our own error types
fn trace_gdal_error (cpl_et: CplErrType, ec: i32, msg: &str) {
    match cpl_et {
        CplErrType::Failure | CplErrType::Fatal => debug!("GDAL error {ec}: {msg}"),
        _ => trace!("GDAL {cpl_et:?} {ec}: {msg}")
    }
}

fn lowercase_extension (path: &Path) -> Option<String> {
    path.extension().and_then( |ext| ext.to_str()).map( |ext| ext.to_ascii_lowercase())
}

pub fn get_driver_name_from_filename (filename: impl AsRef<Path>) -> Option<&'static str> {
    lowercase_extension( filename.as_ref()).and_then( |ext| EXT_MAP.get( ext.as_str()).map(|v| &**v))
}

pub fn get_driver_by_name (name: &str) -> Result<Driver> {
    Ok( DriverManager::get_driver_by_name( name)? )
}

pub fn pc_char_to_string (pc_char: *const c_char) -> String {
    let cstr = unsafe { CStr::from_ptr(pc_char) };
    String::from_utf8_lossy(cstr.to_bytes()).to_string()
}

/// run the provided closure with the global GDAL error handler disabled. Note this does not
/// change the return value but prevents GDAL from printing errors and warnings to the console
pub fn run_quiet<T,F> (f: F)->Result<T> where F: FnOnce()->Result<T> {
    let lock = GLOB_GDAL_MUTEX.lock().map_err( |_| misc_error("poisoned GDAL mutex"))?;
    unsafe { gdal_sys::CPLPushErrorHandler( Some(gdal_sys::CPLQuietErrorHandler)); }
    let result = f();
    unsafe { gdal_sys::CPLPopErrorHandler(); }
    result
}

pub fn open_dataset (path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    run_quiet( || Ok( Dataset::open(path)? ))
}

/// open a vector dataset (shapefile, GeoJSON..)
pub fn open_vector_dataset (path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let dso = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_VECTOR | GdalOpenFlags::GDAL_OF_READONLY,
        allowed_drivers: None,
        open_options: None,
        sibling_files: None
    };
    run_quiet( || Ok( Dataset::open_ex(path, dso)? ))
}

pub fn new_geotransform (x_upper_left: f64, x_resolution: f64, row_rotation: f64,
                         y_upper_left: f64, col_rotation: f64, y_resolution: f64) -> GeoTransform {
    [x_upper_left,x_resolution,row_rotation,y_upper_left,col_rotation,y_resolution]
}

/* #region well known SpatialRefs *********************************************************************************/

/// parse anything OSRSetFromUserInput understands ("EPSG:32633", WKT, PROJ strings..).
/// The returned SpatialRef always uses x,y (easting/longitude first) axis order
pub fn srs_from_definition (def: &str) -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_definition(def)?;
    srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

pub fn srs_epsg (epsg: u32) -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_epsg(epsg)?;
    srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

/// the dataset SRS (if any) in traditional GIS axis order
pub fn dataset_srs (ds: &Dataset) -> Option<SpatialRef> {
    ds.spatial_ref().ok().map( |mut srs| {
        srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
        srs
    })
}

/* #endregion well known SpatialRefs */

/* #region geometries *********************************************************************************/

/// is this a (multi) polygon, ignoring Z/M dimensions
pub fn is_polygonal (geom: &Geometry) -> bool {
    use gdal_sys::OGRwkbGeometryType::{wkbPolygon, wkbMultiPolygon};
    let t = unsafe { gdal_sys::OGR_GT_Flatten( geom.geometry_type()) };
    t == wkbPolygon || t == wkbMultiPolygon
}

pub fn geometry_type_name (geom: &Geometry) -> String {
    gdal::vector::geometry_type_to_name( geom.geometry_type())
}

/// union of all provided geometries. None if there are none or GEOS support is missing
pub fn union_all (geoms: &[Geometry]) -> Option<Geometry> {
    let (first, rest) = geoms.split_first()?;
    rest.iter().try_fold( first.clone(), |acc, g| acc.union(g))
}

/* #endregion geometries */

/* #region generic Dataset/Rasterband access *********************************************************************************/

pub fn create_dataset<P> (driver: &Driver, path: P, width: usize, height: usize, n_bands: usize, data_type: GdalDataType, co: Option<RasterCreationOptions>)->Result<Dataset>
    where P: AsRef<Path>
{
    use GdalDataType::*;
    let co = co.unwrap_or_else( RasterCreationOptions::new);
    match data_type {
        UInt8   => Ok( driver.create_with_band_type_with_options::<u8,P>(path, width, height, n_bands, &co)? ),
        UInt16  => Ok( driver.create_with_band_type_with_options::<u16,P>(path, width, height, n_bands, &co)? ),
        UInt32  => Ok( driver.create_with_band_type_with_options::<u32,P>(path, width, height, n_bands, &co)? ),
        UInt64  => Ok( driver.create_with_band_type_with_options::<u64,P>(path, width, height, n_bands, &co)? ),
        Int8    => Ok( driver.create_with_band_type_with_options::<i8,P>(path, width, height, n_bands, &co)? ),
        Int16   => Ok( driver.create_with_band_type_with_options::<i16,P>(path, width, height, n_bands, &co)? ),
        Int32   => Ok( driver.create_with_band_type_with_options::<i32,P>(path, width, height, n_bands, &co)? ),
        Int64   => Ok( driver.create_with_band_type_with_options::<i64,P>(path, width, height, n_bands, &co)? ),
        Float32 => Ok( driver.create_with_band_type_with_options::<f32,P>(path, width, height, n_bands, &co)? ),
        Float64 => Ok( driver.create_with_band_type_with_options::<f64,P>(path, width, height, n_bands, &co)? ),
        _ => Err( misc_error("unsupported GDAL data type"))
    }
}

/// read a whole band as f64 values (row major)
pub fn read_band_f64 (ds: &Dataset, band_index: usize) -> Result<Vec<f64>> {
    let band = ds.rasterband(band_index)?;
    let size = band.size();
    let buf: Buffer<f64> = band.read_as( (0,0), size, size, None)?;
    Ok( buf.data().to_vec() )
}

pub fn read_window_f64 (band: &RasterBand, window: &PixelWindow) -> Result<Vec<f64>> {
    let buf: Buffer<f64> = band.read_as( window.offset(), window.size(), window.size(), None)?;
    Ok( buf.data().to_vec() )
}

/// write a full band from row major f64 values. GDAL converts to the band type
pub fn write_band_f64 (band: &mut RasterBand, data: Vec<f64>) -> Result<()> {
    let size = band.size();
    if data.len() != size.0 * size.1 { return Err( misc_error("band data does not match band size")) }
    let mut buf = Buffer::new( size, data);
    Ok( band.write( (0,0), size, &mut buf)? )
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct RasterInfo {
    pub cols: usize,
    pub left: f64,
    pub right: f64,
    pub dx: f64,

    pub rows: usize,
    pub top: f64,
    pub bottom: f64,
    pub dy: f64
}

impl RasterInfo {
    /// ground area of a single pixel in squared SRS units
    pub fn pixel_area (&self) -> f64 {
        self.dx.abs() * self.dy.abs()
    }

    pub fn bounds (&self) -> (f64,f64,f64,f64) {
        (self.left.min(self.right), self.bottom.min(self.top), self.left.max(self.right), self.bottom.max(self.top))
    }

    /// the raster extent as an OGR polygon
    pub fn extent_polygon (&self) -> Result<Geometry> {
        let (x_min,y_min,x_max,y_max) = self.bounds();
        let wkt = format!("POLYGON (({x_min} {y_min},{x_max} {y_min},{x_max} {y_max},{x_min} {y_max},{x_min} {y_min}))");
        Ok( Geometry::from_wkt( &wkt)? )
    }
}

pub fn get_raster_info (ds: &Dataset)->Result<RasterInfo> {
    let (cols,rows) = ds.raster_size();
    let a = ds.geo_transform()?;
    if a[2] != 0.0 || a[4] != 0.0 { return Err( misc_error("rotated geotransforms are not supported")) }

    let left = a[0];
    let dx = a[1];
    let right = left + (dx * cols as f64);

    let top = a[3];
    let dy = a[5];
    let bottom = top + (dy * rows as f64);

    Ok( RasterInfo { cols, left, right, dx, rows, top, bottom, dy } )
}

/* #endregion generic Dataset/Rasterband access */
