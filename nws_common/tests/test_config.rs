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

use std::time::Duration;
use serde::{Serialize,Deserialize};
use nws_common::config::{load_config, load_config_or_default, store_config, ConfigError};

#[derive(Serialize,Deserialize,Debug,PartialEq)]
struct TestConfig {
    url: String,
    delay: Duration,
    max_retry: u8,
}

impl Default for TestConfig {
    fn default()->Self {
        TestConfig { url: "https://example.com".to_string(), delay: Duration::from_millis(200), max_retry: 0 }
    }
}

#[test]
fn test_load_ron() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ron");
    std::fs::write( &path, r#"
        TestConfig (
            url: "https://api.weather.gov/points",
            delay: (secs: 1, nanos: 500000000),
            max_retry: 3,
        )
    "#).unwrap();

    let config: TestConfig = load_config( &path).unwrap();
    assert_eq!( config.url, "https://api.weather.gov/points");
    assert_eq!( config.delay, Duration::from_millis(1500));
    assert_eq!( config.max_retry, 3);
}

#[test]
fn test_store_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stored.ron");
    let config = TestConfig { max_retry: 7, ..TestConfig::default() };

    store_config( &config, &path).unwrap();
    let reloaded: TestConfig = load_config( &path).unwrap();
    assert_eq!( reloaded, config);
}

#[test]
fn test_default_without_path() {
    let config: TestConfig = load_config_or_default::<TestConfig,&str>( None).unwrap();
    assert_eq!( config, TestConfig::default());
}

#[test]
fn test_missing_and_malformed() {
    let dir = tempfile::tempdir().unwrap();

    let res: Result<TestConfig,_> = load_config( dir.path().join("does_not_exist.ron"));
    assert!( matches!( res, Err(ConfigError::IOError(_))));

    let path = dir.path().join("bad.ron");
    std::fs::write( &path, "TestConfig ( url: 42 )").unwrap();
    let res: Result<TestConfig,_> = load_config( &path);
    assert!( matches!( res, Err(ConfigError::RonSerdeError(_))));
}
