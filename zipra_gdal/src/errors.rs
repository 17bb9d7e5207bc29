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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZipraGdalError>;

#[derive(Error,Debug)]
pub enum ZipraGdalError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    // pass through for errors in gdal crate
    #[error("gdal error {0}")]
    GdalError( #[from] gdal::errors::GdalError),

    // the last CPL error message if a raw gdal_sys call failed
    #[error("GDAL operation failed: {0}")]
    LastGdalError(String),

    #[error("invalid C string {0}")]
    NulError( #[from] std::ffi::NulError),

    #[error("{0}")]
    MiscError(String)
}

pub fn misc_error (msg: impl ToString)->ZipraGdalError {
    ZipraGdalError::MiscError(msg.to_string())
}

/// retrieve the last CPL error message. Note this has to be called right after a failed gdal_sys call
pub fn last_gdal_error ()->ZipraGdalError {
    let msg = unsafe {
        let c_msg = gdal_sys::CPLGetLastErrorMsg();
        if c_msg.is_null() {
            String::from("unknown GDAL error")
        } else {
            crate::pc_char_to_string(c_msg)
        }
    };
    unsafe { gdal_sys::CPLErrorReset(); }
    ZipraGdalError::LastGdalError(msg)
}
