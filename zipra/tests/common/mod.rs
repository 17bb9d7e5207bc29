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

use std::{fs, path::{Path,PathBuf}};
use anyhow::Result;
use zipra_gdal::{GdalDataType, create_dataset, get_driver_by_name, srs_epsg, write_band_f64};

pub const GRANULE: &str = "L2A_T33TWF_A046000_20240601T100031";
pub const TILE: &str = "T33TWF_20240601T100031";

// all fixtures cover the same 80x80m UTM 33N area
pub const X0: f64 = 500000.0;
pub const Y0: f64 = 4000000.0;
pub const EXTENT: f64 = 80.0;

pub fn write_tif (path: &Path, res: f64, data_type: GdalDataType, nodata: Option<f64>, values: Vec<f64>) -> Result<()> {
    let size = (EXTENT / res) as usize;
    let driver = get_driver_by_name("GTiff")?;
    let mut ds = create_dataset( &driver, path, size, size, 1, data_type, None)?;
    ds.set_geo_transform( &[X0, res, 0.0, Y0, 0.0, -res])?;
    ds.set_spatial_ref( &srs_epsg(32633)?)?;
    let mut band = ds.rasterband(1)?;
    if nodata.is_some() { band.set_no_data_value( nodata)?; }
    write_band_f64( &mut band, values)?;
    Ok(())
}

pub fn write_const_tif (path: &Path, res: f64, value: f64) -> Result<()> {
    let size = (EXTENT / res) as usize;
    write_tif( path, res, GdalDataType::UInt16, None, vec![value; size*size])
}

/// the band file path within a SAFE product, e.g. `.../IMG_DATA/R10m/T33TWF_20240601T100031_B02_10m.tif`
pub fn band_file (safe_dir: &Path, folder: &str, code: &str) -> PathBuf {
    let res = folder.trim_start_matches('R');
    safe_dir.join("GRANULE").join(GRANULE).join("IMG_DATA").join(folder).join( format!("{TILE}_{code}_{res}.tif"))
}

/// create a SAFE tree with the given (folder,band) files. If `rasters` is set, each band file is a
/// constant GeoTIFF with the numeric part of the band code as value (B02 -> 2, SCL -> 100)
pub fn create_safe (parent: &Path, name: &str, bands: &[(&str,&str)], rasters: bool) -> Result<PathBuf> {
    let safe_dir = parent.join(name);
    for (folder,code) in bands {
        let path = band_file( &safe_dir, folder, code);
        fs::create_dir_all( path.parent().unwrap())?;
        if rasters {
            let res = if *folder == "R10m" { 10.0 } else if *folder == "R20m" { 20.0 } else { 40.0 };
            write_const_tif( &path, res, band_value( code))?;
        } else {
            fs::write( &path, b"")?;
        }
    }
    Ok(safe_dir)
}

/// write a UInt16 band file with the given row major values into a SAFE tree
pub fn write_band_values (safe_dir: &Path, folder: &str, code: &str, res: f64, values: Vec<f64>) -> Result<PathBuf> {
    let path = band_file( safe_dir, folder, code);
    fs::create_dir_all( path.parent().unwrap())?;
    write_tif( &path, res, GdalDataType::UInt16, None, values)?;
    Ok(path)
}

/// distinct values per pixel: `offset + row*size + col`
pub fn ramp_values (res: f64, offset: f64) -> Vec<f64> {
    let size = (EXTENT / res) as usize;
    (0..size*size).map( |i| offset + i as f64).collect()
}

pub fn band_value (code: &str) -> f64 {
    code.trim_start_matches('B').parse::<f64>().unwrap_or(100.0)
}
