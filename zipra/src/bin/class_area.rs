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

use std::path::PathBuf;
use anyhow::{anyhow,Result};
use clap::Parser;
use lazy_static::lazy_static;
use zipra::{ClassValues, Outcome, class_histogram, compute_class_area, init_tracing};

#[derive(Parser, Debug)]
#[command(version, about = "compute the ground area of classes in a classification raster band")]
struct Args {
    /// 1-based band index
    #[arg(short,long, default_value_t = 1)]
    band: usize,

    /// comma separated class values (e.g. "4,5" for SCL vegetation and bare soil)
    #[arg(short,long)]
    classes: Option<String>,

    /// print the area of each class value found in the band
    #[arg(long)]
    histogram: bool,

    raster: PathBuf,
}

lazy_static! { static ref ARGS: Args = Args::parse(); }

fn main()->Result<()> {
    init_tracing();

    if ARGS.histogram {
        match class_histogram( &ARGS.raster, ARGS.band)? {
            Outcome::Completed(hist) => {
                println!("class      pixels            area");
                for (class,count) in &hist.counts {
                    println!("{class:>5} {count:>11} {:>15.1}", hist.area(*class));
                }
                if hist.unclassified > 0 {
                    println!("unclassified pixels: {}", hist.unclassified);
                }
            }
            Outcome::Failed(e) => return Err( anyhow!(e))
        }
    }

    if let Some(classes) = &ARGS.classes {
        match compute_class_area( &ARGS.raster, ARGS.band, ClassValues::from( classes.as_str()))? {
            Outcome::Completed(area) => println!("area of classes [{classes}]: {area}"),
            Outcome::Failed(e) => return Err( anyhow!(e))
        }
    } else if !ARGS.histogram {
        return Err( anyhow!("neither --classes nor --histogram specified"))
    }

    Ok(())
}
