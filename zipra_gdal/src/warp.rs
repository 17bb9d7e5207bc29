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

//! GDALWarp access. The `gdal` crate only exposes `reproject()` so we go through the gdal_sys
//! GDALWarpAppOptions API, which gives us the full gdalwarp command line option set

use std::{ffi::CString, path::{Path,PathBuf}, ptr::null_mut};
use libc::{c_char, c_int};
use serde::{Serialize,Deserialize};
use tracing::debug;

use crate::{Dataset, DriverManager};
use crate::errors::{Result, last_gdal_error, misc_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ResampleAlg {
    NearestNeighbour,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
}

impl ResampleAlg {
    /// name as used by gdalwarp (-r)
    pub fn warp_name (&self) -> &'static str {
        match *self {
            ResampleAlg::NearestNeighbour => "near",
            ResampleAlg::Bilinear => "bilinear",
            ResampleAlg::Cubic => "cubic",
            ResampleAlg::CubicSpline => "cubicspline",
            ResampleAlg::Lanczos => "lanczos",
            ResampleAlg::Average => "average",
            ResampleAlg::Mode => "mode",
        }
    }

    /// name as used by gdalbuildvrt (-r), which differs from gdalwarp for nearest neighbour
    pub fn vrt_name (&self) -> &'static str {
        match *self {
            ResampleAlg::NearestNeighbour => "nearest",
            _ => self.warp_name()
        }
    }

    pub fn from_name (name: &str) -> Option<ResampleAlg> {
        match name {
            "near" | "nearest" => Some(ResampleAlg::NearestNeighbour),
            "bilinear" => Some(ResampleAlg::Bilinear),
            "cubic" => Some(ResampleAlg::Cubic),
            "cubicspline" => Some(ResampleAlg::CubicSpline),
            "lanczos" => Some(ResampleAlg::Lanczos),
            "average" => Some(ResampleAlg::Average),
            "mode" => Some(ResampleAlg::Mode),
            _ => None
        }
    }
}

/// builder for a single source GDALWarp into a new file
pub struct SimpleWarpBuilder<'a> {
    src_ds: &'a Dataset,
    tgt_path: PathBuf,
    tgt_format: Option<String>,
    tgt_res: Option<(f64,f64)>,
    resample_alg: Option<ResampleAlg>,
    create_options: Vec<String>,
}

impl <'a> SimpleWarpBuilder<'a> {
    pub fn new (src_ds: &'a Dataset, tgt_path: impl AsRef<Path>) -> Self {
        SimpleWarpBuilder {
            src_ds,
            tgt_path: tgt_path.as_ref().to_path_buf(),
            tgt_format: None,
            tgt_res: None,
            resample_alg: None,
            create_options: Vec::new(),
        }
    }

    /// check that the driver is available before we start warping
    pub fn set_tgt_format (&mut self, driver_name: &str) -> Result<()> {
        DriverManager::get_driver_by_name( driver_name)?;
        self.tgt_format = Some(driver_name.to_string());
        Ok(())
    }

    pub fn set_tgt_resolution (&mut self, res_x: f64, res_y: f64) {
        self.tgt_res = Some((res_x,res_y));
    }

    pub fn set_resample_alg (&mut self, alg: ResampleAlg) {
        self.resample_alg = Some(alg);
    }

    pub fn set_create_options (&mut self, opts: &[String]) {
        self.create_options = opts.to_vec();
    }

    /// the gdalwarp command line equivalent of our settings
    pub fn args (&self) -> Vec<String> {
        let mut args: Vec<String> = vec![ "-overwrite".into() ];

        if let Some(fmt) = &self.tgt_format {
            args.push("-of".into());
            args.push(fmt.clone());
        }
        if let Some((res_x,res_y)) = self.tgt_res {
            args.push("-tr".into());
            args.push(res_x.to_string());
            args.push(res_y.to_string());
        }
        if let Some(alg) = self.resample_alg {
            args.push("-r".into());
            args.push(alg.warp_name().into());
        }
        for co in &self.create_options {
            args.push("-co".into());
            args.push(co.clone());
        }

        args
    }

    /// run the warp and return the (open) target dataset
    pub fn exec (&self) -> Result<Dataset> {
        let args = self.args();
        debug!("gdalwarp {} {:?}", args.join(" "), self.tgt_path);

        let c_args = args.iter().map( |a| CString::new(a.as_str())).collect::<std::result::Result<Vec<CString>,_>>()?;
        let mut argv: Vec<*mut c_char> = c_args.iter().map( |a| a.as_ptr() as *mut c_char).collect();
        argv.push( null_mut());

        let tgt_path = self.tgt_path.to_str().ok_or_else( || misc_error( format!("invalid target path {:?}", self.tgt_path)))?;
        let c_tgt_path = CString::new( tgt_path)?;

        unsafe {
            let opts = gdal_sys::GDALWarpAppOptionsNew( argv.as_mut_ptr(), null_mut());
            if opts.is_null() { return Err( last_gdal_error()) }

            let mut src_handles = [ self.src_ds.c_dataset() ];
            let mut usage_error: c_int = 0;
            let h_tgt = gdal_sys::GDALWarp( c_tgt_path.as_ptr(), null_mut(), 1, src_handles.as_mut_ptr(), opts, &mut usage_error);
            gdal_sys::GDALWarpAppOptionsFree( opts);

            if h_tgt.is_null() {
                Err( last_gdal_error())
            } else {
                Ok( Dataset::from_c_dataset( h_tgt))
            }
        }
    }
}
