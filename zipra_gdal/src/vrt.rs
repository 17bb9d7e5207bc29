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

use std::path::Path;
use gdal::programs::raster::{build_vrt, BuildVRTOptions};
use tracing::debug;

use crate::{Dataset, open_dataset};
use crate::errors::Result;
use crate::warp::ResampleAlg;

/// build an in-memory VRT that has one output band per input file, in input order. The VRT uses
/// the finest input resolution so that bands at that resolution are passed through unchanged, coarser
/// bands are upsampled with `resample_alg` when read. The VRT is gone once the returned Dataset is dropped
pub fn build_separate_vrt<P: AsRef<Path>> (src_paths: &[P], resample_alg: ResampleAlg) -> Result<Dataset> {
    let src_datasets = src_paths.iter()
        .map( |p| open_dataset(p))
        .collect::<Result<Vec<Dataset>>>()?;

    let opts = BuildVRTOptions::new( ["-separate", "-resolution", "highest", "-r", resample_alg.vrt_name()])?;
    let vrt = build_vrt( None, &src_datasets, Some(opts))?;
    debug!("built separate VRT with {} bands", vrt.raster_count());

    Ok(vrt)
}
