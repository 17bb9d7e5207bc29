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

//! ground area of land cover classes, computed from pixel counts of a classification band
//! (such as the Sentinel-2 SCL band) and the pixel footprint of the raster

use std::{collections::{BTreeMap,BTreeSet}, path::Path};
use tracing::info;
use zipra_gdal::{Dataset, get_raster_info, open_dataset, read_band_f64};

use crate::attempt;
use crate::errors::{Result, Outcome, Stage, ZipraError, invalid_class_list, not_found};

/// the forms in which callers can specify class values. Use `ClassSet::try_from` to validate
#[derive(Debug,Clone,PartialEq)]
pub enum ClassValues {
    Scalar(i64),
    List(Vec<i64>),
    Real(Vec<f64>), // only valid if all values are integral
    Text(String),   // comma separated
}

impl From<i64> for ClassValues { fn from (v: i64) -> Self { ClassValues::Scalar(v) } }
impl From<i32> for ClassValues { fn from (v: i32) -> Self { ClassValues::Scalar(v as i64) } }
impl From<u8> for ClassValues { fn from (v: u8) -> Self { ClassValues::Scalar(v as i64) } }
impl From<Vec<i64>> for ClassValues { fn from (v: Vec<i64>) -> Self { ClassValues::List(v) } }
impl From<&[i64]> for ClassValues { fn from (v: &[i64]) -> Self { ClassValues::List(v.to_vec()) } }
impl<const N: usize> From<[i64;N]> for ClassValues { fn from (v: [i64;N]) -> Self { ClassValues::List(v.to_vec()) } }
impl From<f64> for ClassValues { fn from (v: f64) -> Self { ClassValues::Real(vec![v]) } }
impl From<Vec<f64>> for ClassValues { fn from (v: Vec<f64>) -> Self { ClassValues::Real(v) } }
impl From<&[f64]> for ClassValues { fn from (v: &[f64]) -> Self { ClassValues::Real(v.to_vec()) } }
impl From<&str> for ClassValues { fn from (v: &str) -> Self { ClassValues::Text(v.to_string()) } }

/// a validated set of class codes. Each pixel has exactly one class so areas of set members are additive
#[derive(Debug,Clone,PartialEq,Eq,Default)]
pub struct ClassSet(BTreeSet<i64>);

impl ClassSet {
    pub fn new (values: impl IntoIterator<Item=i64>) -> Self {
        ClassSet( values.into_iter().collect())
    }

    pub fn len (&self) -> usize { self.0.len() }

    pub fn is_empty (&self) -> bool { self.0.is_empty() }

    pub fn contains (&self, class: i64) -> bool { self.0.contains(&class) }

    /// check a raster value. Non-integral values never match
    pub fn contains_value (&self, v: f64) -> bool {
        v.fract() == 0.0 && self.0.contains( &(v as i64))
    }

    pub fn iter (&self) -> impl Iterator<Item=i64> + '_ { self.0.iter().copied() }
}

impl TryFrom<ClassValues> for ClassSet {
    type Error = ZipraError;

    fn try_from (cv: ClassValues) -> Result<ClassSet> {
        match cv {
            ClassValues::Scalar(v) => Ok( ClassSet::new( [v])),
            ClassValues::List(vs) => Ok( ClassSet::new( vs)),
            ClassValues::Real(vs) => {
                let mut set = BTreeSet::new();
                for v in vs {
                    if !v.is_finite() || v.fract() != 0.0 { return Err( invalid_class_list( format!("{v} is not an integer class value"))) }
                    set.insert( v as i64);
                }
                Ok( ClassSet(set))
            }
            ClassValues::Text(s) => {
                let mut set = BTreeSet::new();
                for t in s.split(',').map( |t| t.trim()) {
                    let v = t.parse::<i64>().map_err( |_| invalid_class_list( format!("'{t}' is not an integer class value")))?;
                    set.insert(v);
                }
                Ok( ClassSet(set))
            }
        }
    }
}

/// the pure core: area of all pixels whose value is in `classes`
pub fn class_area_of_values (values: &[f64], pixel_area: f64, classes: &ClassSet) -> f64 {
    let n = values.iter().filter( |v| classes.contains_value(**v)).count();
    n as f64 * pixel_area
}

fn check_band_index (ds: &Dataset, band_index: usize) -> Result<()> {
    let count = ds.raster_count();
    if band_index == 0 || band_index > count {
        Err( ZipraError::InvalidBandIndex { index: band_index, count })
    } else {
        Ok(())
    }
}

/// total area (in squared raster SRS units) of the pixels in the 1-based `band_index` band that have
/// one of the given class values
pub fn compute_class_area (raster_path: impl AsRef<Path>, band_index: usize, class_values: impl Into<ClassValues>) -> Result<Outcome<f64>> {
    let classes = ClassSet::try_from( class_values.into())?;
    let path = raster_path.as_ref();
    if !path.exists() { return Err( not_found(path)) }

    let ds = attempt!( Stage::Open, open_dataset( path));
    check_band_index( &ds, band_index)?;

    let info = attempt!( Stage::Read, get_raster_info( &ds));
    let values = attempt!( Stage::Read, read_band_f64( &ds, band_index));

    let area = class_area_of_values( &values, info.pixel_area(), &classes);
    info!("area of classes {:?} in {path:?}: {area}", classes.0);
    Ok( Outcome::Completed(area))
}

/// pixel counts per class value
#[derive(Debug,Clone,PartialEq)]
pub struct ClassHistogram {
    pub pixel_area: f64,
    pub counts: BTreeMap<i64,usize>,

    /// number of pixels with non-integral (or NaN) values
    pub unclassified: usize,
}

impl ClassHistogram {
    pub fn from_values (values: &[f64], pixel_area: f64) -> Self {
        let mut counts: BTreeMap<i64,usize> = BTreeMap::new();
        let mut unclassified = 0;
        for v in values {
            if v.fract() == 0.0 {
                *counts.entry( *v as i64).or_insert(0) += 1;
            } else {
                unclassified += 1;
            }
        }
        ClassHistogram { pixel_area, counts, unclassified }
    }

    pub fn total_pixels (&self) -> usize {
        self.counts.values().sum::<usize>() + self.unclassified
    }

    pub fn area (&self, class: i64) -> f64 {
        self.counts.get(&class).copied().unwrap_or(0) as f64 * self.pixel_area
    }

    pub fn area_of (&self, classes: &ClassSet) -> f64 {
        classes.iter().map( |c| self.area(c)).sum()
    }
}

pub fn class_histogram (raster_path: impl AsRef<Path>, band_index: usize) -> Result<Outcome<ClassHistogram>> {
    let path = raster_path.as_ref();
    if !path.exists() { return Err( not_found(path)) }

    let ds = attempt!( Stage::Open, open_dataset( path));
    check_band_index( &ds, band_index)?;

    let info = attempt!( Stage::Read, get_raster_info( &ds));
    let values = attempt!( Stage::Read, read_band_f64( &ds, band_index));

    Ok( Outcome::Completed( ClassHistogram::from_values( &values, info.pixel_area())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_set () {
        assert_eq!( ClassSet::try_from( ClassValues::from(4i64)).unwrap(), ClassSet::new([4]));
        assert_eq!( ClassSet::try_from( ClassValues::from("4, 5,4")).unwrap(), ClassSet::new([4,5]));
        assert_eq!( ClassSet::try_from( ClassValues::from(vec![6.0, 4.0])).unwrap(), ClassSet::new([4,6]));

        assert!( matches!( ClassSet::try_from( ClassValues::from(1.5)), Err(ZipraError::InvalidClassList(_))));
        assert!( matches!( ClassSet::try_from( ClassValues::from("4,vegetation")), Err(ZipraError::InvalidClassList(_))));
    }

    #[test]
    fn test_area_of_values () {
        let values = [4.0, 4.0, 5.0, 6.0, 0.0, 4.0];
        assert_eq!( class_area_of_values( &values, 400.0, &ClassSet::new([4])), 1200.0);
        assert_eq!( class_area_of_values( &values, 400.0, &ClassSet::new([4,5])), 1600.0);
        assert_eq!( class_area_of_values( &values, 400.0, &ClassSet::new([9])), 0.0);

        let hist = ClassHistogram::from_values( &values, 400.0);
        assert_eq!( hist.total_pixels(), 6);
        assert_eq!( hist.area_of( &ClassSet::new([4,5])), 1600.0);
        assert_eq!( hist.area(0), 400.0);
    }
}
