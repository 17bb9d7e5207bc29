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

//! resolve band identifiers to image files within a decompressed SAFE product
//! (`root/GRANULE/<granule>/IMG_DATA/<resolution>/*<band>*`)

use std::{fs, path::{Path,PathBuf}};
use tracing::{info,warn};

use crate::band::{Band, DEFAULT_BANDS, parse_band_request};
use crate::errors::{Result, not_found};

pub const GRANULE_DIR: &str = "GRANULE";
pub const IMG_DATA_DIR: &str = "IMG_DATA";

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ResolvedBand {
    pub band: Band,
    pub path: PathBuf,
}

/// the result of a band lookup. Bands that could not be found are not in `resolved`, which is
/// otherwise in request order
#[derive(Debug,Clone)]
pub struct BandLocation {
    pub granule: String,
    pub img_data_dir: PathBuf,
    pub requested: Vec<Band>,
    pub resolved: Vec<ResolvedBand>,
}

impl BandLocation {
    pub fn found_count (&self) -> usize { self.resolved.len() }

    pub fn requested_count (&self) -> usize { self.requested.len() }

    pub fn is_complete (&self) -> bool { self.found_count() == self.requested_count() }

    pub fn found_bands (&self) -> Vec<Band> {
        self.resolved.iter().map( |rb| rb.band).collect()
    }

    pub fn paths (&self) -> Vec<&Path> {
        self.resolved.iter().map( |rb| rb.path.as_path()).collect()
    }

    pub fn missing_bands (&self) -> Vec<Band> {
        let mut found = self.found_bands();
        self.requested.iter().filter( |b| {
            if let Some(i) = found.iter().position( |f| f == *b) { found.remove(i); false } else { true }
        }).copied().collect()
    }
}

/// validate the requested band codes and resolve them within the product tree rooted at `product_root`
pub fn locate_bands<S: AsRef<str>> (product_root: impl AsRef<Path>, requested: &[S]) -> Result<BandLocation> {
    let bands = parse_band_request( requested)?; // before we touch the file system
    locate_parsed_bands( product_root, &bands)
}

pub fn locate_parsed_bands (product_root: impl AsRef<Path>, bands: &[Band]) -> Result<BandLocation> {
    let product_root = product_root.as_ref();
    if !product_root.exists() { return Err( not_found(product_root)) }

    let requested: Vec<Band> = if bands.is_empty() { DEFAULT_BANDS.to_vec() } else { bands.to_vec() };

    let granule_dir = product_root.join( GRANULE_DIR);
    let granule = find_granule( &granule_dir)?;
    let img_data_dir = granule_dir.join( &granule).join( IMG_DATA_DIR);
    info!("band folder: {img_data_dir:?}");

    let mut resolved: Vec<ResolvedBand> = Vec::with_capacity( requested.len());
    for band in &requested {
        let res_dir = img_data_dir.join( band.resolution().folder_name());
        match find_band_file( &res_dir, *band)? {
            Some(path) => {
                info!("band {band} found at {path:?}");
                resolved.push( ResolvedBand { band: *band, path });
            }
            None => warn!("band {band} not found in {res_dir:?}")
        }
    }
    info!("a total of {} out of {} bands have been found", resolved.len(), requested.len());

    Ok( BandLocation { granule, img_data_dir, requested, resolved } )
}

/// the first directory entry within GRANULE (directory listing order). Products normally have exactly one
fn find_granule (granule_dir: &Path) -> Result<String> {
    if !granule_dir.is_dir() { return Err( not_found(granule_dir)) }

    let mut granules: Vec<String> = Vec::new();
    for entry in fs::read_dir( granule_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            granules.push( entry.file_name().to_string_lossy().to_string());
        }
    }

    if granules.len() > 1 {
        warn!("{granule_dir:?} has {} granules, using the first one: {}", granules.len(), granules[0]);
    }
    granules.into_iter().next().ok_or_else( || not_found( granule_dir.join("*")))
}

/// the first file (in name order) of `res_dir` that contains the band code
fn find_band_file (res_dir: &Path, band: Band) -> Result<Option<PathBuf>> {
    if !res_dir.is_dir() {
        warn!("resolution folder {res_dir:?} does not exist");
        return Ok(None)
    }

    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir( res_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push( entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();

    Ok( names.into_iter().find( |n| n.contains( band.code())).map( |n| res_dir.join(n)) )
}
