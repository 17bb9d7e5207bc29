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
use zipra::{ExtractionConfig, Outcome, extract_bands, init_tracing, load_config, parse_band_list};

#[derive(Parser, Debug)]
#[command(version, about = "extract Sentinel-2 bands from a .zip or .SAFE product into a single 10m GeoTIFF")]
struct Args {
    /// comma separated band codes (e.g. "B02,B03,B04"). Uses the configured default bands if not set
    #[arg(short,long)]
    bands: Option<String>,

    /// RON file with extraction settings
    #[arg(short,long)]
    config: Option<PathBuf>,

    /// output .tif file. Defaults to <granule>.tif next to the input
    #[arg(short,long)]
    output: Option<PathBuf>,

    /// Sentinel-2 product (.zip archive or .SAFE directory)
    input: PathBuf,
}

lazy_static! { static ref ARGS: Args = Args::parse(); }

fn main()->Result<()> {
    init_tracing();

    let config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => ExtractionConfig::default()
    };

    let bands: Vec<&str> = match &ARGS.bands {
        Some(list) => parse_band_list( list)?.iter().map( |b| b.code()).collect(),
        None => Vec::new()
    };

    match extract_bands( &ARGS.input, &bands, ARGS.output.as_deref(), &config)? {
        Outcome::Completed(extraction) => {
            if !extraction.is_complete() {
                println!("warning: only {} of {} requested bands found", extraction.bands.len(), extraction.requested.len());
            }
            let codes: Vec<&str> = extraction.bands.iter().map( |b| b.code()).collect();
            println!("bands {} of granule {} saved to {:?}", codes.join(","), extraction.granule, extraction.output);
            Ok(())
        }
        Outcome::Failed(e) => Err( anyhow!(e))
    }
}
