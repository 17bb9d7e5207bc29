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

//! clip a raster to an area of interest (mask-and-crop)

use std::path::{Path,PathBuf};
use tracing::{info,warn};
use zipra_gdal::{
    CoordTransform, Dataset, Metadata, create_dataset, dataset_srs, get_driver_by_name,
    get_driver_name_from_filename, get_raster_info, open_dataset, read_window_f64, write_band_f64,
    gdal::raster::RasterCreationOptions,
    mask::{PixelWindow, apply_mask, burn_mask, window_for_bounds},
};

use crate::attempt;
use crate::aoi::{AoiSource, resolve_aoi};
use crate::errors::{Result, Outcome, Stage, not_found};

pub const CLIPPED_SUFFIX: &str = "_CLIPPED";

/// what a successful clip produced
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum ClipOutput {
    Written(PathBuf),

    /// the AOI does not overlap the raster. Nothing is written in this case
    NoIntersection,
}

impl ClipOutput {
    pub fn path (&self) -> Option<&Path> {
        match self {
            ClipOutput::Written(p) => Some(p),
            ClipOutput::NoIntersection => None
        }
    }
}

/// `<dir>/<stem>_CLIPPED.<ext>`
pub fn default_clip_path (raster_path: &Path) -> PathBuf {
    let stem = raster_path.file_stem().map( |s| s.to_string_lossy().to_string()).unwrap_or_default();
    let name = match raster_path.extension() {
        Some(ext) => format!("{stem}{CLIPPED_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{CLIPPED_SUFFIX}")
    };
    raster_path.with_file_name( name)
}

/// clip all bands of `raster_path` to the AOI. The output covers the AOI/raster intersection envelope
/// (in whole source pixels) and all pixels whose center is outside the AOI are set to the band nodata
/// value (or 0 if the band has none)
pub fn clip_to_aoi (raster_path: impl AsRef<Path>, aoi: &AoiSource, aoi_crs: Option<&str>, output: Option<&Path>) -> Result<Outcome<ClipOutput>> {
    let raster_path = raster_path.as_ref();
    if !raster_path.is_file() { return Err( not_found(raster_path)) }

    let aoi = match resolve_aoi( aoi, aoi_crs)? {
        Outcome::Completed(aoi) => aoi,
        Outcome::Failed(e) => return Ok( Outcome::Failed(e))
    };

    let src_ds = attempt!( Stage::Open, open_dataset( raster_path));
    let info = attempt!( Stage::Read, get_raster_info( &src_ds));
    let gt = attempt!( Stage::Read, src_ds.geo_transform());
    let raster_srs = dataset_srs( &src_ds);

    let geometry = match &raster_srs {
        Some(srs) if *srs != aoi.srs => {
            let ct = attempt!( Stage::Aoi, CoordTransform::new( &aoi.srs, srs));
            attempt!( Stage::Aoi, aoi.geometry.transform( &ct))
        }
        Some(_) => aoi.geometry,
        None => {
            warn!("raster {raster_path:?} has no SRS, assuming AOI coordinates are in raster coordinates");
            aoi.geometry
        }
    };

    let extent = attempt!( Stage::Read, info.extent_polygon());
    if !geometry.intersects( &extent) {
        info!("AOI does not intersect {raster_path:?}");
        return Ok( Outcome::Completed( ClipOutput::NoIntersection))
    }
    let clipped = match geometry.intersection( &extent) {
        Some(g) if !g.is_empty() => g,
        Some(_) => {
            info!("AOI only touches {raster_path:?}");
            return Ok( Outcome::Completed( ClipOutput::NoIntersection))
        }
        None => return Ok( Outcome::failed( Stage::Aoi, "cannot intersect AOI with raster extent"))
    };

    let env = clipped.envelope();
    let Some(window) = window_for_bounds( &gt, src_ds.raster_size(), env.MinX, env.MinY, env.MaxX, env.MaxY) else {
        info!("AOI does not cover any pixel of {raster_path:?}");
        return Ok( Outcome::Completed( ClipOutput::NoIntersection))
    };
    let window_gt = window.geotransform( &gt);

    let mask = attempt!( Stage::Aoi, burn_mask( &clipped, &window_gt, &window, raster_srs.as_ref()));

    let output = output.map( |p| p.to_path_buf()).unwrap_or_else( || default_clip_path( raster_path));
    match write_clipped( &src_ds, &window, &window_gt, &mask, &output) {
        Ok(()) => {
            info!("clipped {raster_path:?} to {}x{} pixels, saved as {output:?}", window.cols, window.rows);
            Ok( Outcome::Completed( ClipOutput::Written(output)))
        }
        Err(e) => {
            if output.is_file() { let _ = std::fs::remove_file( &output); }
            Ok( Outcome::failed( Stage::Write, e))
        }
    }
}

// assemble the clipped bands in memory and copy them to the output driver. CreateCopy also covers
// drivers such as JP2OpenJPEG that cannot create datasets directly
fn write_clipped (src_ds: &Dataset, window: &PixelWindow, window_gt: &[f64;6], mask: &[u8], output: &Path) -> zipra_gdal::errors::Result<()> {
    let n_bands = src_ds.raster_count();
    let data_type = src_ds.rasterband(1)?.band_type();

    let mem_driver = get_driver_by_name("MEM")?;
    let mut mem_ds = create_dataset( &mem_driver, "", window.cols, window.rows, n_bands, data_type, None)?;
    mem_ds.set_geo_transform( window_gt)?;
    if let Some(srs) = dataset_srs( src_ds) {
        mem_ds.set_spatial_ref( &srs)?;
    }

    for i in 1..=n_bands {
        let src_band = src_ds.rasterband(i)?;
        let nodata = src_band.no_data_value();

        let mut data = read_window_f64( &src_band, window)?;
        apply_mask( &mut data, mask, nodata.unwrap_or(0.0));

        let mut tgt_band = mem_ds.rasterband(i)?;
        if nodata.is_some() { tgt_band.set_no_data_value( nodata)?; }
        let desc = src_band.description()?;
        if !desc.is_empty() { tgt_band.set_description( &desc)?; }
        write_band_f64( &mut tgt_band, data)?;
    }

    let driver_name = match get_driver_name_from_filename( output) {
        Some(name) => name,
        None => {
            warn!("unknown raster extension of {output:?}, writing GTiff");
            "GTiff"
        }
    };
    let driver = get_driver_by_name( driver_name)?;
    let out_ds = mem_ds.create_copy( &driver, output, &RasterCreationOptions::new())?;
    drop(out_ds);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clip_path () {
        assert_eq!( default_clip_path( Path::new("/data/T33_20240601.tif")), PathBuf::from("/data/T33_20240601_CLIPPED.tif"));
        assert_eq!( default_clip_path( Path::new("scene.jp2")), PathBuf::from("scene_CLIPPED.jp2"));
    }
}
