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

use std::{fs::{self,File}, io::Write, path::Path};
use anyhow::Result;
use zip::{ZipWriter, write::SimpleFileOptions};
use zipra::{ProductInput, Stage, ZipraError, classify_input, locate_bands, prepare_product};

mod common;
use common::*;

/// run with "cargo test --test test_archive -- --nocapture"

fn write_product_zip (zip_path: &Path, safe_name: &str) -> Result<()> {
    let mut zip = ZipWriter::new( File::create( zip_path)?);
    let opts = SimpleFileOptions::default();

    let dir = format!("{safe_name}/GRANULE/{GRANULE}/IMG_DATA/R10m/");
    zip.add_directory( dir.as_str(), opts)?;
    zip.start_file( format!("{dir}{TILE}_B02_10m.jp2"), opts)?;
    zip.write_all( b"not really a jp2")?;
    zip.start_file( format!("{safe_name}/manifest.safe"), opts)?;
    zip.write_all( b"<xfdu/>")?;
    zip.finish()?;
    Ok(())
}

fn dir_entries (dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?.map( |e| e.map( |e| e.file_name().to_string_lossy().to_string())).collect::<std::io::Result<_>>()?;
    names.sort();
    Ok(names)
}

#[test]
fn test_classify () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tar = dir.path().join("S2A_TEST.tar");
    fs::write( &tar, b"")?;
    assert!( matches!( classify_input( &tar), Err(ZipraError::InvalidFormat(_))));

    let upper = dir.path().join("S2A_TEST.ZIP"); // extensions are case sensitive
    fs::write( &upper, b"")?;
    assert!( matches!( classify_input( &upper), Err(ZipraError::InvalidFormat(_))));

    assert!( matches!( classify_input( dir.path().join("S2A_TEST.zip")), Err(ZipraError::NotFound(_))));

    let safe = dir.path().join("S2A_TEST.SAFE");
    fs::create_dir( &safe)?;
    assert_eq!( classify_input( &safe)?, ProductInput::Safe( safe.clone()));
    Ok(())
}

#[test]
fn test_extract_zip () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let zip_path = dir.path().join("S2A_TEST.zip");
    write_product_zip( &zip_path, "S2A_TEST.SAFE")?;

    let safe = prepare_product( &zip_path)?.completed().expect("extraction failed");
    assert_eq!( safe, dir.path().join("S2A_TEST.SAFE"));
    assert_eq!( dir_entries( dir.path())?, vec!["S2A_TEST.SAFE", "S2A_TEST.zip"]); // no staging leftovers

    let loc = locate_bands( &safe, &["B02"])?;
    assert_eq!( loc.found_count(), 1);

    // a second call re-uses the extracted product
    let again = prepare_product( &zip_path)?.completed().expect("re-use failed");
    assert_eq!( again, safe);
    Ok(())
}

#[test]
fn test_corrupt_zip () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let zip_path = dir.path().join("S2A_BROKEN.zip");
    fs::write( &zip_path, b"PK this is not a zip archive")?;

    let outcome = prepare_product( &zip_path)?;
    assert_eq!( outcome.failed_stage(), Some(Stage::Extract));
    assert_eq!( dir_entries( dir.path())?, vec!["S2A_BROKEN.zip"]);
    Ok(())
}
