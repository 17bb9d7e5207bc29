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

//! extract a set of bands from a Sentinel-2 product into a single multi-band raster on a common grid

use std::{fs, path::{Path,PathBuf}};
use tracing::{info,warn};
use zipra_gdal::{Metadata, vrt::build_separate_vrt, warp::{ResampleAlg, SimpleWarpBuilder}};

use crate::attempt;
use crate::archive::{ProductInput, classify_input, extract_archive, product_parent_dir};
use crate::band::{Band, parse_band_request};
use crate::config::ExtractionConfig;
use crate::errors::{Result, Outcome, Stage};
use crate::locator::locate_parsed_bands;

#[derive(Debug,Clone)]
pub struct Extraction {
    pub output: PathBuf,
    pub granule: String,
    pub requested: Vec<Band>,

    /// the bands that were found, which is also the band order of the output
    pub bands: Vec<Band>,
}

impl Extraction {
    pub fn is_complete (&self) -> bool { self.bands.len() == self.requested.len() }
}

/// extract the requested bands (or the configured default bands if `requested` is empty) from a zip
/// archive or SAFE directory into a raster resampled to the configured target resolution.
/// Input errors are returned as `Err`, failures of the zip/GDAL steps as `Ok(Outcome::Failed)`
pub fn extract_bands<S: AsRef<str>> (input: impl AsRef<Path>, requested: &[S], output: Option<&Path>,
                                     config: &ExtractionConfig) -> Result<Outcome<Extraction>> {
    let input = input.as_ref();
    let bands = if requested.is_empty() { config.default_bands.clone() } else { parse_band_request( requested)? };

    let safe_dir = match classify_input( input)? {
        ProductInput::Safe(dir) => dir,
        ProductInput::Zip(zip_path) => match extract_archive( &zip_path)? {
            Outcome::Completed(dir) => dir,
            Outcome::Failed(e) => return Ok( Outcome::Failed(e))
        }
    };

    let location = locate_parsed_bands( &safe_dir, &bands)?;
    if location.resolved.is_empty() {
        return Ok( Outcome::failed( Stage::Mosaic, format!("none of the bands {bands:?} found in {safe_dir:?}")))
    }

    let output = resolve_output_path( input, output, &location.granule);
    let found = location.found_bands();

    let (mosaic_alg, warp_alg) = resampling_for( &found, config);
    let vrt = attempt!( Stage::Mosaic, build_separate_vrt( &location.paths(), mosaic_alg));
    info!("VRT created successfully");

    let mut warper = SimpleWarpBuilder::new( &vrt, &output);
    attempt!( Stage::Resample, warper.set_tgt_format( &config.output_format));
    warper.set_tgt_resolution( config.target_resolution.0, config.target_resolution.1);
    warper.set_resample_alg( warp_alg);
    warper.set_create_options( &config.create_options);

    let preexisting = output.exists();
    let tgt_ds = match warper.exec() {
        Ok(ds) => ds,
        Err(e) => {
            if !preexisting && output.is_file() { let _ = fs::remove_file( &output); }
            return Ok( Outcome::failed( Stage::Resample, e))
        }
    };

    for (i,band) in found.iter().enumerate() {
        let mut rb = attempt!( Stage::Write, tgt_ds.rasterband( i+1));
        attempt!( Stage::Write, rb.set_description( band.code()));
    }
    drop(tgt_ds); // flush and close before we report success

    info!("file resampled and saved as {} at {output:?}", config.output_format);
    Ok( Outcome::Completed( Extraction { output, granule: location.granule, requested: location.requested, bands: found }))
}

/// resampling of the (mosaic, warp) steps. If the finest band already has the target resolution
/// the mosaic is on the target grid, coarser bands are upsampled in the mosaic with the warp kernel
/// and the warp only copies pixels, so that native resolution bands keep their exact values
pub fn resampling_for (bands: &[Band], config: &ExtractionConfig) -> (ResampleAlg,ResampleAlg) {
    let finest = bands.iter().map( |b| b.resolution().meters()).fold( f64::INFINITY, f64::min);
    let (res_x, res_y) = config.target_resolution;

    if finest == res_x.abs() && finest == res_y.abs() {
        (config.warp_resampling, ResampleAlg::NearestNeighbour)
    } else {
        (config.mosaic_resampling, config.warp_resampling)
    }
}

/// the default output is `<granule>.tif` next to the input. An explicit output has to be a .tif/.tiff file,
/// otherwise we fall back to the default
pub fn resolve_output_path (input: &Path, output: Option<&Path>, granule: &str) -> PathBuf {
    let default_path = product_parent_dir( input).join( format!("{granule}.tif"));

    match output {
        None => default_path,
        Some(path) if is_tif_path( path) => path.to_path_buf(),
        Some(path) => {
            warn!("the output path {path:?} is not valid or complete, data will be saved in {default_path:?}");
            default_path
        }
    }
}

fn is_tif_path (path: &Path) -> bool {
    matches!( path.extension().and_then( |e| e.to_str()), Some("tif") | Some("tiff"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path () {
        let input = Path::new("/data/S2A_X.SAFE");
        assert_eq!( resolve_output_path( input, None, "L2A_T33"), PathBuf::from("/data/L2A_T33.tif"));
        assert_eq!( resolve_output_path( input, Some(Path::new("/out/x.tif")), "L2A_T33"), PathBuf::from("/out/x.tif"));
        assert_eq!( resolve_output_path( input, Some(Path::new("/out/x.png")), "L2A_T33"), PathBuf::from("/data/L2A_T33.tif"));
    }

    #[test]
    fn test_resampling_for () {
        let config = ExtractionConfig::default();
        use ResampleAlg::*;

        // finest band on the 10m target grid: the warp must not touch native 10m pixels
        assert_eq!( resampling_for( &[Band::B04, Band::B12], &config), (CubicSpline, NearestNeighbour));
        assert_eq!( resampling_for( &[Band::B02], &config), (CubicSpline, NearestNeighbour));

        // only coarser bands: mosaic as is, resample in the warp
        assert_eq!( resampling_for( &[Band::B12, Band::SCL], &config), (NearestNeighbour, CubicSpline));
    }
}
