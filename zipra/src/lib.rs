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

//! extraction and analysis of Sentinel-2 L2A products: assemble selected bands of a zip/SAFE product
//! into a 10m multi-band GeoTIFF, compute land cover class areas from classification bands and clip
//! rasters to areas of interest. The raster heavy lifting is delegated to GDAL through `zipra_gdal`

pub mod errors;
pub mod band;
pub mod locator;
pub mod archive;
pub mod config;
pub mod extract;
pub mod area;
pub mod aoi;
pub mod clip;

use tracing_subscriber::EnvFilter;

pub use errors::{Result, ZipraError, Outcome, Stage, CollaboratorError};
pub use band::{Band, Resolution, BAND_CATALOG, DEFAULT_BANDS, parse_band_request, parse_band_list, valid_band_codes};
pub use locator::{BandLocation, ResolvedBand, locate_bands, locate_parsed_bands};
pub use archive::{ProductInput, classify_input, prepare_product};
pub use config::{ExtractionConfig, ConfigError, load_config};
pub use extract::{Extraction, extract_bands};
pub use area::{ClassValues, ClassSet, ClassHistogram, compute_class_area, class_histogram};
pub use aoi::{AoiSource, Aoi, DEFAULT_AOI_CRS, resolve_aoi};
pub use clip::{ClipOutput, clip_to_aoi, default_clip_path};

/// install a fmt subscriber that is filtered by RUST_LOG (defaulting to `info`). Note this only
/// succeeds if there is no global subscriber set yet
pub fn init_tracing () {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_target( false)
        .try_init();
}
