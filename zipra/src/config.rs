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

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};
use zipra_gdal::warp::ResampleAlg;

use crate::band::{Band, DEFAULT_BANDS};

/// settings for the band extraction mosaic/warp step. The `Default` values are what
/// Sentinel-2 processing normally wants - a 10m grid for all bands
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// target (x,y) ground resolution in SRS units
    pub target_resolution: (f64,f64),

    /// used to assemble the separate-band VRT when none of the bands is on the target grid
    pub mosaic_resampling: ResampleAlg,

    /// kernel that brings coarser bands to the target resolution. If the finest band already has the
    /// target resolution it is applied while building the VRT and the warp itself uses nearest neighbour
    pub warp_resampling: ResampleAlg,

    /// GDAL driver short name of the output
    pub output_format: String,

    /// GDAL create options such as "COMPRESS=DEFLATE"
    pub create_options: Vec<String>,

    pub default_bands: Vec<Band>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            target_resolution: (10.0, 10.0),
            mosaic_resampling: ResampleAlg::NearestNeighbour,
            warp_resampling: ResampleAlg::CubicSpline,
            output_format: "GTiff".into(),
            create_options: Vec::new(),
            default_bands: DEFAULT_BANDS.to_vec(),
        }
    }
}

#[derive(thiserror::Error,Debug)]
pub enum ConfigError {
    #[error("config IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config parse error {0}")]
    ParseError( #[from] ron::error::SpannedError),
}

pub fn load_config (path: impl AsRef<Path>) -> Result<ExtractionConfig,ConfigError> {
    let s = fs::read_to_string( path)?;
    parse_config( &s)
}

pub fn parse_config (s: &str) -> Result<ExtractionConfig,ConfigError> {
    Ok( ron::from_str(s)? )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config () {
        let cfg = parse_config( r#"(
            target_resolution: (20.0, 20.0),
            create_options: ["COMPRESS=DEFLATE", "PREDICTOR=2"],
            default_bands: [B04, B8A],
        )"#).unwrap();

        assert_eq!( cfg.target_resolution, (20.0,20.0));
        assert_eq!( cfg.default_bands, vec![Band::B04, Band::B8A]);
        assert_eq!( cfg.warp_resampling, ResampleAlg::CubicSpline);
        assert_eq!( cfg.output_format, "GTiff");
    }

    #[test]
    fn test_bad_config () {
        assert!( parse_config("(target_resolution: 10)").is_err());
    }
}
