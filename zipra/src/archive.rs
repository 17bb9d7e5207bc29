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

//! turn a product input (zip archive or already extracted SAFE dir) into a SAFE directory we can
//! locate bands in

use std::{fs::{self,File}, path::{Path,PathBuf}};
use tracing::info;
use zip::ZipArchive;

use crate::attempt;
use crate::errors::{Result, Outcome, Stage, not_found, invalid_format};

pub const ZIP_EXT: &str = "zip";
pub const SAFE_EXT: &str = "SAFE";

#[derive(Debug,Clone,PartialEq,Eq)]
pub enum ProductInput {
    Zip(PathBuf),
    Safe(PathBuf),
}

/// check existence and (case sensitive) extension of a product input path
pub fn classify_input (input: impl AsRef<Path>) -> Result<ProductInput> {
    let input = input.as_ref();
    if !input.exists() { return Err( not_found(input)) }

    match input.extension().and_then( |e| e.to_str()) {
        Some(ZIP_EXT) => Ok( ProductInput::Zip( input.to_path_buf())),
        Some(SAFE_EXT) => Ok( ProductInput::Safe( input.to_path_buf())),
        _ => Err( invalid_format(input))
    }
}

/// the directory archives get extracted into and default outputs are stored in
pub fn product_parent_dir (input: &Path) -> PathBuf {
    match input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from(".")
    }
}

/// get the SAFE directory for the given input, extracting zip archives if required
pub fn prepare_product (input: impl AsRef<Path>) -> Result<Outcome<PathBuf>> {
    match classify_input( input)? {
        ProductInput::Safe(dir) => Ok( Outcome::Completed(dir)),
        ProductInput::Zip(zip_path) => extract_archive( &zip_path)
    }
}

/// extract a zip archive next to it. The archive is first decompressed into a staging dir that is
/// removed on failure, i.e. we never leave a partially extracted product behind
pub fn extract_archive (zip_path: &Path) -> Result<Outcome<PathBuf>> {
    let parent_dir = product_parent_dir( zip_path);
    let target = zip_path.with_extension("");

    // X.SAFE.zip extracts to X.SAFE, X.zip normally to X.SAFE as well
    for candidate in [target.clone(), target.with_extension( SAFE_EXT)] {
        if candidate.is_dir() {
            info!("using already extracted product {candidate:?}");
            return Ok( Outcome::Completed(candidate))
        }
    }

    let staging = attempt!( Stage::Extract, tempfile::Builder::new().prefix(".zipra-").tempdir_in( &parent_dir));
    let file = attempt!( Stage::Extract, File::open( zip_path));
    let mut archive = attempt!( Stage::Extract, ZipArchive::new( file));
    attempt!( Stage::Extract, archive.extract( staging.path()));

    let extracted = match target.file_name() {
        Some(name) if staging.path().join(name).is_dir() => staging.path().join(name),
        _ => attempt!( Stage::Extract, single_safe_dir( staging.path()))
    };

    let target = match extracted.file_name() {
        Some(name) => parent_dir.join(name),
        None => return Ok( Outcome::failed( Stage::Extract, "no product directory in archive"))
    };
    if target.exists() {
        return Ok( Outcome::failed( Stage::Extract, format!("{target:?} already exists")))
    }
    attempt!( Stage::Extract, fs::rename( &extracted, &target));

    info!("file ZIP decompressed successfully into {target:?}");
    Ok( Outcome::Completed(target))
}

fn single_safe_dir (dir: &Path) -> std::result::Result<PathBuf,String> {
    let mut safe_dirs: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err( |e| e.to_string())? {
        let path = entry.map_err( |e| e.to_string())?.path();
        if path.is_dir() && path.extension().and_then( |e| e.to_str()) == Some(SAFE_EXT) {
            safe_dirs.push(path);
        }
    }

    if safe_dirs.len() == 1 {
        Ok( safe_dirs.remove(0))
    } else {
        Err( format!("archive contains {} .SAFE products, expected one", safe_dirs.len()))
    }
}
