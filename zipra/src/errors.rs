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

use std::{fmt, path::Path};
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, ZipraError>;

/// input validation errors. These are returned before we attempt anything with side effects
#[derive(Error,Debug)]
pub enum ZipraError {
    #[error("file is not found at this path: {0}")]
    NotFound(String),

    #[error("the provided file is neither a .zip nor a .SAFE file: {0}")]
    InvalidFormat(String),

    #[error("band {band} is not valid. Please choose from {valid:?}")]
    InvalidBand { band: String, valid: Vec<&'static str> },

    #[error("invalid AOI: {0}")]
    InvalidAoi(String),

    #[error("invalid class list: {0}")]
    InvalidClassList(String),

    #[error("invalid band index {index}, raster has {count} band(s)")]
    InvalidBandIndex { index: usize, count: usize },

    // pass through for IO errors while scanning local product trees
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

pub fn not_found (path: impl AsRef<Path>)->ZipraError {
    ZipraError::NotFound( format!("{:?}", path.as_ref()))
}

pub fn invalid_format (path: impl AsRef<Path>)->ZipraError {
    ZipraError::InvalidFormat( format!("{:?}", path.as_ref()))
}

pub fn invalid_aoi (msg: impl ToString)->ZipraError {
    ZipraError::InvalidAoi(msg.to_string())
}

pub fn invalid_class_list (msg: impl ToString)->ZipraError {
    ZipraError::InvalidClassList(msg.to_string())
}

/// the external operation that failed after we started to work on valid input
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Stage {
    Extract,
    Mosaic,
    Resample,
    Open,
    Read,
    Aoi,
    Write,
}

impl fmt::Display for Stage {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Extract => "archive extraction",
            Stage::Mosaic => "VRT mosaic",
            Stage::Resample => "resampling",
            Stage::Open => "raster open",
            Stage::Read => "raster read",
            Stage::Aoi => "AOI resolution",
            Stage::Write => "raster write",
        };
        f.write_str(s)
    }
}

#[derive(Error,Debug)]
#[error("{stage} failed: {msg}")]
pub struct CollaboratorError {
    pub stage: Stage,
    pub msg: String,
}

/// result of an operation that delegates to GDAL or the zip crate. A failure of these collaborators
/// is not an input error - it is logged and reported as a tagged value that callers have to check
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    Completed(T),
    Failed(CollaboratorError),
}

impl<T> Outcome<T> {
    /// log the failure and wrap it
    pub fn failed (stage: Stage, e: impl fmt::Display) -> Self {
        let err = CollaboratorError { stage, msg: e.to_string() };
        error!("{err}");
        Outcome::Failed(err)
    }

    pub fn completed (self) -> Option<T> {
        match self {
            Outcome::Completed(v) => Some(v),
            Outcome::Failed(_) => None
        }
    }

    pub fn failure (&self) -> Option<&CollaboratorError> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Failed(e) => Some(e)
        }
    }

    pub fn failed_stage (&self) -> Option<Stage> {
        self.failure().map( |e| e.stage)
    }
}

/// unwrap a collaborator result or return early with `Ok(Outcome::Failed(..))` for the given stage
#[macro_export]
macro_rules! attempt {
    ($stage:expr, $e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => return Ok( $crate::errors::Outcome::failed( $stage, e))
        }
    }
}
