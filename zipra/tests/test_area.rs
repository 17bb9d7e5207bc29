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
use zipra::{ClassValues, Stage, ZipraError, class_histogram, compute_class_area};
use zipra_gdal::GdalDataType;

mod common;
use common::*;

/// run with "cargo test --test test_area -- --nocapture"

// 4x4 SCL-like classification at 20m (pixel area 400)
const SCL: [f64;16] = [
    4.0, 4.0, 5.0, 6.0,
    4.0, 8.0, 8.0, 6.0,
    0.0, 4.0, 5.0, 6.0,
    9.0, 9.0, 4.0, 4.0,
];

fn scl_fixture (dir: &std::path::Path) -> Result<std::path::PathBuf> {
    let path = dir.join("scl.tif");
    write_tif( &path, 20.0, GdalDataType::UInt8, None, SCL.to_vec())?;
    Ok(path)
}

fn area (path: &std::path::Path, classes: impl Into<ClassValues>) -> Result<f64> {
    Ok( compute_class_area( path, 1, classes)?.completed().expect("area computation failed") )
}

#[test]
fn test_class_area () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = scl_fixture( dir.path())?;

    assert_eq!( area( &path, 4i64)?, 6.0 * 400.0);
    assert_eq!( area( &path, vec![4i64,5])?, 8.0 * 400.0);
    assert_eq!( area( &path, "6")?, 3.0 * 400.0);
    assert_eq!( area( &path, 11i64)?, 0.0);
    Ok(())
}

#[test]
fn test_area_properties () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = scl_fixture( dir.path())?;

    // scalar is the same as a single element list
    assert_eq!( area( &path, 6i64)?, area( &path, vec![6i64])?);

    // order and duplicates don't matter
    assert_eq!( area( &path, vec![4i64,5,6])?, area( &path, vec![6i64,4,5,4])?);

    // the classes of a partition add up to the total raster area
    let all = area( &path, vec![0i64,4,5,6,8,9])?;
    assert_eq!( all, 16.0 * 400.0);
    let parts = area( &path, vec![0i64,4])? + area( &path, vec![5i64,6])? + area( &path, vec![8i64,9])?;
    assert_eq!( parts, all);
    Ok(())
}

#[test]
fn test_histogram () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = scl_fixture( dir.path())?;

    let hist = class_histogram( &path, 1)?.completed().expect("histogram failed");
    assert_eq!( hist.total_pixels(), 16);
    assert_eq!( hist.counts.get(&4), Some(&6));
    assert_eq!( hist.area(9), 800.0);
    Ok(())
}

#[test]
fn test_area_errors () -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = scl_fixture( dir.path())?;

    assert!( matches!( compute_class_area( &path, 0, 4i64), Err(ZipraError::InvalidBandIndex{ index: 0, count: 1 })));
    assert!( matches!( compute_class_area( &path, 2, 4i64), Err(ZipraError::InvalidBandIndex{ index: 2, count: 1 })));
    assert!( matches!( compute_class_area( &path, 1, vec![4.5]), Err(ZipraError::InvalidClassList(_))));
    assert!( matches!( compute_class_area( dir.path().join("none.tif"), 1, 4i64), Err(ZipraError::NotFound(_))));

    let garbage = dir.path().join("garbage.tif");
    fs::write( &garbage, b"no raster")?;
    let outcome = compute_class_area( &garbage, 1, 4i64)?;
    assert_eq!( outcome.failed_stage(), Some(Stage::Open));
    Ok(())
}
