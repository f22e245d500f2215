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
#![allow(unused)]

use tracing_subscriber::EnvFilter;

pub mod macros;
pub mod fs;
pub mod net;
pub mod config;

// a global fn that can be used with serde(skip_serializing_if="nws_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// install a global fmt subscriber that writes to stderr, using RUST_LOG to set the max level (default "warn").
/// Note this only succeeds if there is no global subscriber set yet, subsequent calls are ignored
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_writer( std::io::stderr) // keep stdout for the tool output
        .try_init();
}

/// format an optional value the way the tool output lists missing values
pub fn opt_display<T: std::fmt::Display> (opt: &Option<T>)->String {
    match opt {
        Some(v) => v.to_string(),
        None => "None".to_string()
    }
}
