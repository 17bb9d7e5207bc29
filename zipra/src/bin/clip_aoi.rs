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

use std::path::PathBuf;
use anyhow::{anyhow,Result};
use clap::Parser;
use lazy_static::lazy_static;
use zipra::{AoiSource, ClipOutput, Outcome, clip_to_aoi, init_tracing};

#[derive(Parser, Debug)]
#[command(version, about = "clip a raster to an area of interest")]
struct Args {
    /// CRS of WKT/GeoJSON AOIs (default EPSG:4326 lon/lat)
    #[arg(long)]
    aoi_crs: Option<String>,

    /// output raster. Defaults to <stem>_CLIPPED.<ext> next to the input
    #[arg(short,long)]
    output: Option<PathBuf>,

    raster: PathBuf,

    /// vector file (.shp, .geojson, .json), GeoJSON text or WKT polygon
    aoi: String,
}

lazy_static! { static ref ARGS: Args = Args::parse(); }

fn main()->Result<()> {
    init_tracing();

    let aoi = AoiSource::from_arg( &ARGS.aoi);
    match clip_to_aoi( &ARGS.raster, &aoi, ARGS.aoi_crs.as_deref(), ARGS.output.as_deref())? {
        Outcome::Completed(ClipOutput::Written(path)) => println!("clipped raster saved to {path:?}"),
        Outcome::Completed(ClipOutput::NoIntersection) => println!("AOI does not intersect {:?}, nothing written", ARGS.raster),
        Outcome::Failed(e) => return Err( anyhow!(e))
    }
    Ok(())
}
