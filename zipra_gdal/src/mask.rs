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

//! pixel windows and geometry masks for mask-and-crop operations. This only supports north-up
//! (non-rotated) geotransforms

use gdal::raster::rasterize;

use crate::{Buffer, DriverManager, GeoTransform, Geometry, SpatialRef, new_geotransform};
use crate::errors::Result;

// tolerance (in pixels) for bounds that are numerically on a pixel edge
const EDGE_EPS: f64 = 1e-6;

/// a rectangular sub-region of a raster in pixel coordinates
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct PixelWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub cols: usize,
    pub rows: usize,
}

impl PixelWindow {
    pub fn full (cols: usize, rows: usize) -> Self {
        PixelWindow { col_off: 0, row_off: 0, cols, rows }
    }

    pub fn offset (&self) -> (isize,isize) { (self.col_off as isize, self.row_off as isize) }

    pub fn size (&self) -> (usize,usize) { (self.cols, self.rows) }

    /// the geotransform of a raster covering just this window
    pub fn geotransform (&self, gt: &GeoTransform) -> GeoTransform {
        let c = self.col_off as f64;
        let r = self.row_off as f64;
        new_geotransform( gt[0] + c*gt[1] + r*gt[2], gt[1], gt[2],
                          gt[3] + c*gt[4] + r*gt[5], gt[4], gt[5])
    }
}

/// get the outward rounded pixel window that covers the given world bounds, clipped to the raster size.
/// Returns None if the bounds don't overlap the raster
pub fn window_for_bounds (gt: &GeoTransform, raster_size: (usize,usize),
                          x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Option<PixelWindow> {
    let (n_cols, n_rows) = raster_size;

    let ca = (x_min - gt[0]) / gt[1];
    let cb = (x_max - gt[0]) / gt[1];
    let ra = (y_max - gt[3]) / gt[5];
    let rb = (y_min - gt[3]) / gt[5];

    let c0 = (ca.min(cb) + EDGE_EPS).floor().max(0.0);
    let c1 = (ca.max(cb) - EDGE_EPS).ceil().min(n_cols as f64);
    let r0 = (ra.min(rb) + EDGE_EPS).floor().max(0.0);
    let r1 = (ra.max(rb) - EDGE_EPS).ceil().min(n_rows as f64);

    if c1 <= c0 || r1 <= r0 {
        None
    } else {
        Some( PixelWindow {
            col_off: c0 as usize,
            row_off: r0 as usize,
            cols: (c1 - c0) as usize,
            rows: (r1 - r0) as usize,
        })
    }
}

/// burn the geometry into a window sized u8 mask (1: inside, 0: outside). A pixel is inside if its
/// center is inside the geometry. The geometry has to be in the SRS of the geotransform
pub fn burn_mask (geometry: &Geometry, window_gt: &GeoTransform, window: &PixelWindow, srs: Option<&SpatialRef>) -> Result<Vec<u8>> {
    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut mask_ds = driver.create_with_band_type::<u8,_>( "", window.cols, window.rows, 1)?;
    mask_ds.set_geo_transform( window_gt)?;
    if let Some(srs) = srs { mask_ds.set_spatial_ref( srs)?; }

    rasterize( &mut mask_ds, &[1], &[geometry.clone()], &[1.0], None)?;

    let band = mask_ds.rasterband(1)?;
    let buf: Buffer<u8> = band.read_as( (0,0), window.size(), window.size(), None)?;
    Ok( buf.data().to_vec() )
}

/// replace all values outside of the mask with `fill`
pub fn apply_mask (data: &mut [f64], mask: &[u8], fill: f64) {
    for (v,m) in data.iter_mut().zip( mask.iter()) {
        if *m == 0 { *v = fill }
    }
}
