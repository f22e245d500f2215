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

use std::{sync::Mutex, time::{Duration,Instant}};
use async_trait::async_trait;
use bytes::Bytes;
use nws_grid::{
    cities::cities_from, enrich_cities, lookup_records, op_failed, read_cities, state_capitals, write_cities,
    CityLookup, CityRecord, EnrichSummary, FailureKind, GridConfig, LookupOutcome, PointsTransport, Result
};

// run with "cargo test test_xx -- --nocapture"

const BMX: &str = include_str!("../resources/points_bmx.json");
const NO_GRID_ID: &str = include_str!("../resources/points_no_grid_id.json");

/// what the fake transport answers for a single request
#[derive(Clone)]
enum Fixture {
    Body(&'static str),
    Fail(&'static str),
}

/// replays fixtures in call order (the last one repeats) and records the requested URLs with their timestamps
struct FixtureTransport {
    fixtures: Vec<Fixture>,
    calls: Mutex<Vec<(String,Instant)>>,
}

impl FixtureTransport {
    fn new (fixtures: Vec<Fixture>)->Self {
        FixtureTransport { fixtures, calls: Mutex::new(Vec::new()) }
    }

    fn calls (&self)->Vec<(String,Instant)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PointsTransport for FixtureTransport {
    async fn get_points (&self, url: &str) -> Result<Bytes> {
        let mut calls = self.calls.lock().unwrap();
        let i = calls.len().min( self.fixtures.len() - 1);
        calls.push( (url.to_string(), Instant::now()));

        match &self.fixtures[i] {
            Fixture::Body(s) => Ok( Bytes::from_static( s.as_bytes())),
            Fixture::Fail(msg) => Err( op_failed(msg)),
        }
    }
}

fn test_config()->GridConfig {
    GridConfig { request_delay: Duration::ZERO, ..GridConfig::default() }
}

fn three_cities()->Vec<CityRecord> {
    cities_from( &[
        ("Montgomery", 32.3792, -86.3077),
        ("Juneau", 58.3019, -134.4197),
        ("Phoenix", 33.4484, -112.0740),
    ])
}

#[tokio::test]
async fn test_same_length_and_order() {
    let transport = FixtureTransport::new( vec![Fixture::Body(BMX)]);
    let cities = state_capitals();
    let names: Vec<String> = cities.iter().map( |c| c.name.clone()).collect();

    let lookups = enrich_cities( &transport, &test_config(), cities, |_| {}).await;
    let records = lookup_records( &lookups);

    assert_eq!( records.len(), names.len());
    for (i, (rec, name)) in records.iter().zip( names.iter()).enumerate() {
        assert_eq!( &rec.name, name);
        assert_eq!( lookups[i].pos, i+1);
        assert_eq!( rec.grid_id.as_deref(), Some("BMX"));
    }

    // requests were issued in input order with the coordinates of each city
    let calls = transport.calls();
    assert_eq!( calls.len(), 50);
    assert_eq!( calls[0].0, "https://api.weather.gov/points/32.3792,-86.3077");
    assert_eq!( calls[49].0, "https://api.weather.gov/points/41.14,-104.8202");
}

#[tokio::test]
async fn test_failed_lookup_keeps_record() {
    let transport = FixtureTransport::new( vec![
        Fixture::Body(BMX),
        Fixture::Fail("connection refused"),
        Fixture::Body(BMX),
    ]);

    let mut reported: Vec<String> = Vec::new();
    let lookups = enrich_cities( &transport, &test_config(), three_cities(), |l| reported.push( l.report(3))).await;
    let records = lookup_records( &lookups);

    assert_eq!( records.len(), 3);
    assert_eq!( records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["Montgomery", "Juneau", "Phoenix"]);

    assert!( records[0].is_enriched());
    assert_eq!( (records[0].grid_x, records[0].grid_y), (Some(65), Some(46)));

    // coordinates preserved, grid fields absent
    assert_eq!( records[1], CityRecord::new( "Juneau", 58.3019, -134.4197));
    assert!( !records[1].is_enriched());
    match &lookups[1].outcome {
        LookupOutcome::Failed(e) => assert_eq!( e.kind(), FailureKind::Other),
        other => panic!("expected failure, got {other:?}")
    }

    assert!( records[2].is_enriched());

    assert_eq!( reported, vec![
        "[1/3] Success: Montgomery -> BMX/65,46",
        "[2/3] Error: Juneau (operation failed connection refused)",
        "[3/3] Success: Phoenix -> BMX/65,46",
    ]);
    assert_eq!( EnrichSummary::of(&lookups), EnrichSummary { resolved: 2, failed: 1 });
}

#[tokio::test]
async fn test_partial_extraction() {
    let transport = FixtureTransport::new( vec![Fixture::Body(NO_GRID_ID)]);
    let lookups = enrich_cities( &transport, &test_config(), cities_from( &[("Juneau", 58.3019, -134.4197)]), |_| {}).await;
    let rec = &lookup_records( &lookups)[0];

    assert!( lookups[0].is_resolved());
    assert_eq!( rec.grid_id, None);
    assert_eq!( rec.grid_x, Some(161));
    assert_eq!( rec.grid_y, Some(68));
}

#[tokio::test]
async fn test_decode_failure() {
    let transport = FixtureTransport::new( vec![
        Fixture::Body("<html><body>503 Service Unavailable</body></html>"),
        Fixture::Body(r#"{"properties": null}"#),
        Fixture::Body(BMX),
    ]);
    let lookups = enrich_cities( &transport, &test_config(), three_cities(), |_| {}).await;

    for lookup in &lookups[..2] {
        match &lookup.outcome {
            LookupOutcome::Failed(e) => assert_eq!( e.kind(), FailureKind::Decode),
            other => panic!("expected decode failure, got {other:?}")
        }
        assert!( !lookup.city().is_enriched());
    }
    assert!( lookups[2].is_resolved());
}

#[tokio::test]
async fn test_request_delay() {
    let delay = Duration::from_millis(50);
    let cfg = GridConfig { request_delay: delay, ..GridConfig::default() };
    let transport = FixtureTransport::new( vec![
        Fixture::Body(BMX),
        Fixture::Fail("timeout"),
        Fixture::Body(BMX),
        Fixture::Body(BMX),
    ]);

    let cities = cities_from( &[
        ("Montgomery", 32.3792, -86.3077),
        ("Juneau", 58.3019, -134.4197),
        ("Phoenix", 33.4484, -112.0740),
        ("Little Rock", 34.7465, -92.2896),
    ]);
    enrich_cities( &transport, &cfg, cities, |_| {}).await;

    let calls = transport.calls();
    assert_eq!( calls.len(), 4);
    for w in calls.windows(2) {
        let dt = w[1].1.duration_since( w[0].1);
        assert!( dt >= delay, "requests only {dt:?} apart");
    }
}

#[tokio::test]
async fn test_output_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path_1 = dir.path().join("run1.json");
    let path_2 = dir.path().join("run2.json");

    for path in [&path_1, &path_2] {
        let transport = FixtureTransport::new( vec![Fixture::Body(BMX)]);
        let lookups = enrich_cities( &transport, &test_config(), three_cities(), |_| {}).await;
        write_cities( path, &lookup_records(&lookups)).unwrap();
    }

    let run_1 = std::fs::read( &path_1).unwrap();
    let run_2 = std::fs::read( &path_2).unwrap();
    assert!( !run_1.is_empty());
    assert_eq!( run_1, run_2);
}

#[tokio::test]
async fn test_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nws_cities.json");
    std::fs::write( &path, "stale content from a previous run that is much longer than what we write now ........").unwrap();

    let transport = FixtureTransport::new( vec![ Fixture::Fail("dns error"), Fixture::Body(BMX) ]);
    let lookups = enrich_cities( &transport, &test_config(), cities_from( &[("Montgomery", 32.3792, -86.3077), ("Dover", 39.1582, -75.5244)]), |_| {}).await;
    let n = write_cities( &path, &lookup_records(&lookups)).unwrap();
    assert_eq!( n, 2);

    let json: serde_json::Value = serde_json::from_str( &std::fs::read_to_string(&path).unwrap()).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!( arr.len(), 2);

    let failed = arr[0].as_object().unwrap();
    assert_eq!( failed.len(), 3);
    assert_eq!( failed["name"], "Montgomery");
    assert_eq!( failed["lat"], 32.3792);
    assert_eq!( failed["lng"], -86.3077);
    assert!( !failed.contains_key("gridId"));

    let enriched = arr[1].as_object().unwrap();
    assert_eq!( enriched["gridId"], "BMX");
    assert_eq!( enriched["gridX"], 65);
    assert_eq!( enriched["gridY"], 46);

    let records = read_cities( &path).unwrap();
    assert_eq!( records, lookup_records(&lookups));
}

#[test]
fn test_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    // the output path is an existing directory
    let res = write_cities( dir.path(), &three_cities());
    match res {
        Err(e) => assert!( e.is_fatal()),
        Ok(_) => panic!("writing to a directory path should fail")
    }
}
