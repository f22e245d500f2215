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
//! typed RON configuration files
//!
//! config structs derive `Deserialize` and `Default`, tools either load them from a user supplied
//! RON file or fall back to the built-in defaults

use std::path::Path;
use serde::{Serialize, de::DeserializeOwned};
use ron::ser::PrettyConfig;

use crate::{define_error, fs::{filepath_contents_as_string, set_filepath_contents}};

define_error!{ pub ConfigError =
    IOError(#[from] std::io::Error) : "config IO error: {0}",
    RonError(#[from] ron::Error) : "config RON error: {0}",
    RonSerdeError(#[from] ron::error::SpannedError) : "config serialize/deserialize RON error: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub fn load_config<C,P> (path: P) -> Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let data = filepath_contents_as_string( &path.as_ref())?;
    Ok( ron::de::from_str( data.as_str())? )
}

/// load from `path` if there is one, otherwise use the `Default` of `C`
pub fn load_config_or_default<C,P> (path: Option<P>) -> Result<C> where C: DeserializeOwned + Default, P: AsRef<Path> {
    match path {
        Some(path) => load_config( path),
        None => Ok( C::default())
    }
}

pub fn config_to_string<C: Serialize> (config: &C) -> Result<String> {
    Ok( ron::ser::to_string_pretty( config, PrettyConfig::default())? )
}

pub fn store_config<C,P> (config: &C, path: P) -> Result<()> where C: Serialize, P: AsRef<Path> {
    let s = config_to_string( config)?;
    Ok( set_filepath_contents( path, s.as_bytes())? )
}
