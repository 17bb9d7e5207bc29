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

//! the Sentinel-2 L2A band catalog: which bands exist and in which resolution folder of the
//! SAFE product they are stored

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};

use crate::errors::{Result, ZipraError};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub enum Band {
    B01, B02, B03, B04, B05, B06, B07, B08, B8A, B09, B11, B12,
    SCL, // scene classification layer
}

/// native resolution folder of a band within IMG_DATA
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Resolution {
    R10m,
    R20m,
    R60m,
}

impl Resolution {
    pub fn folder_name (&self) -> &'static str {
        match *self {
            Resolution::R10m => "R10m",
            Resolution::R20m => "R20m",
            Resolution::R60m => "R60m",
        }
    }

    pub fn meters (&self) -> f64 {
        match *self {
            Resolution::R10m => 10.0,
            Resolution::R20m => 20.0,
            Resolution::R60m => 60.0,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str( self.folder_name())
    }
}

/// all catalog bands in catalog order
pub const BAND_CATALOG: [Band;13] = [
    Band::B01, Band::B02, Band::B03, Band::B04, Band::B05, Band::B06, Band::B07,
    Band::B08, Band::B8A, Band::B09, Band::B11, Band::B12, Band::SCL
];

/// what we extract if the caller doesn't ask for anything specific
pub const DEFAULT_BANDS: [Band;6] = [ Band::B02, Band::B03, Band::B04, Band::B08, Band::B12, Band::SCL ];

impl Band {
    pub fn code (&self) -> &'static str {
        match *self {
            Band::B01 => "B01",
            Band::B02 => "B02",
            Band::B03 => "B03",
            Band::B04 => "B04",
            Band::B05 => "B05",
            Band::B06 => "B06",
            Band::B07 => "B07",
            Band::B08 => "B08",
            Band::B8A => "B8A",
            Band::B09 => "B09",
            Band::B11 => "B11",
            Band::B12 => "B12",
            Band::SCL => "SCL",
        }
    }

    pub fn resolution (&self) -> Resolution {
        use Resolution::*;
        match *self {
            Band::B02 | Band::B03 | Band::B04 | Band::B08 => R10m,
            Band::B05 | Band::B06 | Band::B07 | Band::B8A | Band::B11 | Band::B12 | Band::SCL => R20m,
            Band::B01 | Band::B09 => R60m,
        }
    }

    /// note that band codes are case sensitive
    pub fn from_code (code: &str) -> Option<Band> {
        BAND_CATALOG.iter().find( |b| b.code() == code).copied()
    }
}

impl fmt::Display for Band {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str( self.code())
    }
}

impl FromStr for Band {
    type Err = ZipraError;

    fn from_str (s: &str) -> Result<Band> {
        Band::from_code(s).ok_or_else( || invalid_band(s))
    }
}

pub fn valid_band_codes () -> Vec<&'static str> {
    BAND_CATALOG.iter().map( |b| b.code()).collect()
}

fn invalid_band (code: &str) -> ZipraError {
    ZipraError::InvalidBand { band: code.to_string(), valid: valid_band_codes() }
}

/// parse a whole band request. This fails on the first unknown band code without partial results,
/// an empty request is replaced by the `DEFAULT_BANDS`
pub fn parse_band_request<S: AsRef<str>> (requested: &[S]) -> Result<Vec<Band>> {
    if requested.is_empty() {
        Ok( DEFAULT_BANDS.to_vec() )
    } else {
        requested.iter().map( |s| s.as_ref().parse::<Band>()).collect()
    }
}

/// parse a comma separated list such as "B02,B03,B04"
pub fn parse_band_list (list: &str) -> Result<Vec<Band>> {
    let codes: Vec<&str> = list.split(',').map( |s| s.trim()).filter( |s| !s.is_empty()).collect();
    parse_band_request( &codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog () {
        assert_eq!( BAND_CATALOG.len(), 13);
        assert_eq!( Band::B01.resolution(), Resolution::R60m);
        assert_eq!( Band::B8A.resolution(), Resolution::R20m);
        assert_eq!( Band::B08.resolution(), Resolution::R10m);
        assert_eq!( Band::SCL.resolution().folder_name(), "R20m");

        for b in BAND_CATALOG {
            assert_eq!( Band::from_code( b.code()), Some(b));
        }
    }

    #[test]
    fn test_parse () {
        assert_eq!( parse_band_list("B04, B02,B08").unwrap(), vec![Band::B04, Band::B02, Band::B08]);
        assert_eq!( parse_band_list("").unwrap(), DEFAULT_BANDS.to_vec());

        match parse_band_request( &["B02", "b03"]) {
            Err(ZipraError::InvalidBand{band, valid}) => {
                assert_eq!( band, "b03");
                assert_eq!( valid.len(), 13);
            }
            other => panic!("unexpected result {other:?}")
        }

        assert!( "B10".parse::<Band>().is_err());
    }
}
