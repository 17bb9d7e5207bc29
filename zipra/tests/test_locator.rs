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

use std::fs;
use anyhow::Result;
use zipra::{Band, DEFAULT_BANDS, ZipraError, locate_bands};

mod common;
use common::*;

/// run with "cargo test --test test_locator -- --nocapture"

#[test]
fn test_request_order () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let safe = create_safe( dir.path(), "S2A_TEST.SAFE", &[("R10m","B02"), ("R10m","B04"), ("R10m","B08"), ("R20m","B12")], false)?;

    let loc = locate_bands( &safe, &["B04", "B02", "B08"])?;
    assert_eq!( loc.granule, GRANULE);
    assert_eq!( loc.found_bands(), vec![Band::B04, Band::B02, Band::B08]);
    assert_eq!( loc.resolved[0].path, band_file( &safe, "R10m", "B04"));
    assert!( loc.is_complete());
    Ok(())
}

#[test]
fn test_missing_band_is_skipped () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let safe = create_safe( dir.path(), "S2A_TEST.SAFE", &[("R10m","B02"), ("R20m","B12")], false)?;

    let loc = locate_bands( &safe, &["B02", "B03", "B12"])?;
    assert_eq!( loc.found_bands(), vec![Band::B02, Band::B12]);
    assert_eq!( loc.missing_bands(), vec![Band::B03]);
    assert!( loc.found_count() < loc.requested_count());
    Ok(())
}

#[test]
fn test_missing_resolution_folder () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let safe = create_safe( dir.path(), "S2A_TEST.SAFE", &[("R10m","B02")], false)?;

    let loc = locate_bands( &safe, &["B01", "B02"])?; // no R60m folder
    assert_eq!( loc.found_bands(), vec![Band::B02]);
    Ok(())
}

#[test]
fn test_default_bands () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let safe = create_safe( dir.path(), "S2A_TEST.SAFE", &[("R10m","B02"), ("R20m","SCL")], false)?;

    let loc = locate_bands::<&str>( &safe, &[])?;
    assert_eq!( loc.requested, DEFAULT_BANDS.to_vec());
    assert_eq!( loc.found_bands(), vec![Band::B02, Band::SCL]);
    Ok(())
}

#[test]
fn test_invalid_band_before_fs_access () {
    // band validation comes first, even if the product does not exist
    match locate_bands( "/nonexistent/S2A.SAFE", &["B02", "B99"]) {
        Err(ZipraError::InvalidBand { band, valid }) => {
            assert_eq!( band, "B99");
            assert_eq!( valid.len(), 13);
        }
        other => panic!("unexpected result {other:?}")
    }

    // parsing is case sensitive
    assert!( matches!( locate_bands( "/nonexistent/S2A.SAFE", &["b02"]), Err(ZipraError::InvalidBand{..})));
}

#[test]
fn test_missing_product () {
    assert!( matches!( locate_bands( "/nonexistent/S2A.SAFE", &["B02"]), Err(ZipraError::NotFound(_))));
}

#[test]
fn test_granule_files_are_ignored () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let safe = create_safe( dir.path(), "S2A_TEST.SAFE", &[("R10m","B02")], false)?;
    fs::write( safe.join("GRANULE").join("0_readme.txt"), b"not a granule")?;

    let loc = locate_bands( &safe, &["B02"])?;
    assert_eq!( loc.granule, GRANULE);
    Ok(())
}
