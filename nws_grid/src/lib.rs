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

//! enrich a list of cities with the forecast grid cells of the NWS points API (https://api.weather.gov/points/{lat},{lng}).
//!
//! Cities are processed strictly sequentially with a fixed delay after each request. A failed lookup leaves the
//! city unenriched and processing continues with the next one. The result list is written once, after all
//! cities have been processed.

use std::{path::Path, time::Duration, fmt};
use serde::{Deserialize,Serialize};
use serde_json::{Value, ser::{PrettyFormatter,Serializer}};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, header::{HeaderMap,HeaderValue,ACCEPT}};
use tracing::{debug,info,warn};

use nws_common::{
    is_none, opt_display,
    fs::{filepath_contents_as_string, set_filepath_contents},
    net::{build_client, get_bytes},
};

mod errors;
pub use errors::*;

pub mod cities;
pub use cities::{state_capitals, STATE_CAPITALS};

/// points API lookup configuration. The defaults are what the `get_nws_grids` tool uses without a config file
#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(default)]
pub struct GridConfig {
    /// URL prefix of the points endpoint, the request URL is `{points_url}/{lat},{lng}`
    pub points_url: String,

    /// sent as User-Agent header. api.weather.gov rejects or throttles requests without identification
    pub user_agent: String,

    /// pause after each lookup, successful or not
    pub request_delay: Duration,

    /// max time for a single request
    pub timeout: Duration,

    /// pathname of the JSON file we write the (enriched) cities to
    pub output: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            points_url: "https://api.weather.gov/points".to_string(),
            user_agent: "(myweatherapp.com, contact@example.com)".to_string(),
            request_delay: Duration::from_millis(200),
            timeout: Duration::from_secs(10),
            output: "nws_cities.json".to_string(),
        }
    }
}

/// a named location that is either unenriched (no grid fields) or enriched with whatever grid fields the points
/// API returned for it. Absent grid fields are not serialized
#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct CityRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,

    #[serde(default, skip_serializing_if="is_none")]
    pub grid_id: Option<String>,

    #[serde(default, skip_serializing_if="is_none")]
    pub grid_x: Option<i64>,

    #[serde(default, skip_serializing_if="is_none")]
    pub grid_y: Option<i64>,
}

impl CityRecord {
    pub fn new (name: impl ToString, lat: f64, lng: f64)->Self {
        CityRecord { name: name.to_string(), lat, lng, grid_id: None, grid_x: None, grid_y: None }
    }

    /// a copy of this record with the grid fields set from `cell`
    pub fn with_grid (&self, cell: &GridCell)->Self {
        CityRecord {
            grid_id: cell.grid_id.clone(),
            grid_x: cell.grid_x,
            grid_y: cell.grid_y,
            ..self.clone()
        }
    }

    pub fn is_enriched (&self)->bool {
        self.grid_id.is_some() || self.grid_x.is_some() || self.grid_y.is_some()
    }
}

/// the forecast office grid cell of a location as reported in the `properties` of a points response.
/// Each field is optional on its own - a response that lacks some of them still yields the others
#[derive(Clone,Serialize,Deserialize,Debug,Default,PartialEq,Eq)]
#[serde(rename_all="camelCase")]
pub struct GridCell {
    pub grid_id: Option<String>,
    pub grid_x: Option<i64>,
    pub grid_y: Option<i64>,
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}/{},{}", opt_display(&self.grid_id), opt_display(&self.grid_x), opt_display(&self.grid_y))
    }
}

/// extract the grid cell from the `properties` of a points response body. The remaining fields (forecast URLs,
/// relative location etc.) are ignored. The body has to be a JSON object, and so does `properties` if present.
/// A missing `properties` yields an empty cell
pub fn parse_grid_cell (body: &[u8]) -> Result<GridCell> {
    let response: Value = serde_json::from_slice( body).map_err(|e| decode_error(e))?;
    let Some(response) = response.as_object() else {
        return Err( decode_error("points response is not a JSON object"))
    };

    match response.get("properties") {
        None => Ok( GridCell::default() ),
        Some(props) if props.is_object() => GridCell::deserialize( props).map_err(|e| decode_error(e)),
        Some(other) => Err( decode_error( format!("points properties is not a JSON object: {other}")))
    }
}

pub fn points_url (cfg: &GridConfig, city: &CityRecord) -> String {
    format!("{}/{},{}", cfg.points_url.trim_end_matches('/'), city.lat, city.lng)
}

/* #region transport *********************************************************************************************/

/// the abstraction of how we retrieve points responses. This is where tests inject fixtures
#[async_trait]
pub trait PointsTransport: Send + Sync {
    /// single GET request without retry. Returns the body of a success response, any transport failure
    /// or non-success status is an error
    async fn get_points (&self, url: &str) -> Result<Bytes>;
}

/// the reqwest based transport to the real points API
pub struct LivePointsTransport {
    client: Client
}

impl LivePointsTransport {
    pub fn new (cfg: &GridConfig)->Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert( ACCEPT, HeaderValue::from_static("application/geo+json"));

        let client = build_client( &cfg.user_agent, cfg.timeout, headers)?;
        Ok( LivePointsTransport { client } )
    }
}

#[async_trait]
impl PointsTransport for LivePointsTransport {
    async fn get_points (&self, url: &str) -> Result<Bytes> {
        Ok( get_bytes( &self.client, url).await? )
    }
}

/* #endregion transport */

/* #region enrichment loop ***************************************************************************************/

/// result of a single lookup
#[derive(Debug)]
pub enum LookupOutcome {
    Resolved(GridCell),
    Failed(NwsGridError),
}

/// the explicit per-city result of an enrichment run
#[derive(Debug)]
pub struct CityLookup {
    /// 1-based position in the input list
    pub pos: usize,
    pub input: CityRecord,
    pub outcome: LookupOutcome,
}

impl CityLookup {
    /// the record to store: the enriched copy if the lookup succeeded, the unchanged input otherwise
    pub fn city (&self)->CityRecord {
        match &self.outcome {
            LookupOutcome::Resolved(cell) => self.input.with_grid( cell),
            LookupOutcome::Failed(_) => self.input.clone()
        }
    }

    pub fn is_resolved (&self)->bool {
        matches!( self.outcome, LookupOutcome::Resolved(_))
    }

    /// the progress line we print for this lookup
    pub fn report (&self, total: usize)->String {
        match &self.outcome {
            LookupOutcome::Resolved(cell) => format!("[{}/{}] Success: {} -> {}", self.pos, total, self.input.name, cell),
            LookupOutcome::Failed(e) => format!("[{}/{}] Error: {} ({})", self.pos, total, self.input.name, e)
        }
    }
}

/// lookup counts of a run
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct EnrichSummary {
    pub resolved: usize,
    pub failed: usize,
}

impl EnrichSummary {
    pub fn of (lookups: &[CityLookup])->Self {
        let resolved = lookups.iter().filter( |l| l.is_resolved()).count();
        EnrichSummary { resolved, failed: lookups.len() - resolved }
    }

    pub fn total (&self)->usize { self.resolved + self.failed }
}

/// get the grid cell for a single city
pub async fn lookup_city<T> (transport: &T, cfg: &GridConfig, city: &CityRecord) -> Result<GridCell> where T: PointsTransport + ?Sized {
    let url = points_url( cfg, city);
    debug!("lookup {} at {}", city.name, url);

    let body = transport.get_points( &url).await?;
    parse_grid_cell( &body)
}

/// look up all `cities` in order, one at a time, pausing `cfg.request_delay` after each attempt. Failed lookups
/// do not abort the run. `on_lookup` is called right after each attempt (e.g. to report progress).
/// The returned lookups have the same length and order as `cities`
pub async fn enrich_cities<T,F> (transport: &T, cfg: &GridConfig, cities: Vec<CityRecord>, mut on_lookup: F) -> Vec<CityLookup>
    where T: PointsTransport + ?Sized, F: FnMut(&CityLookup)
{
    let mut lookups: Vec<CityLookup> = Vec::with_capacity( cities.len());

    for (i, city) in cities.into_iter().enumerate() {
        let outcome = match lookup_city( transport, cfg, &city).await {
            Ok(cell) => LookupOutcome::Resolved(cell),
            Err(e) => {
                warn!("lookup of {} failed: {}", city.name, e);
                LookupOutcome::Failed(e)
            }
        };

        let lookup = CityLookup { pos: i+1, input: city, outcome };
        on_lookup( &lookup);
        lookups.push( lookup);

        if !cfg.request_delay.is_zero() {
            tokio::time::sleep( cfg.request_delay).await;
        }
    }

    lookups
}

/// the records to store for a completed run, in lookup order
pub fn lookup_records (lookups: &[CityLookup])->Vec<CityRecord> {
    lookups.iter().map( |l| l.city()).collect()
}

/* #endregion enrichment loop */

/// serialize cities as a JSON array with 4-space indentation
pub fn cities_to_json (cities: &[CityRecord]) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::with_capacity( cities.len() * 128);
    let mut ser = Serializer::with_formatter( &mut buf, PrettyFormatter::with_indent(b"    "));
    cities.serialize( &mut ser)?;
    Ok(buf)
}

/// write cities to `path`, replacing whatever was there before. Returns the number of written records
pub fn write_cities (path: impl AsRef<Path>, cities: &[CityRecord]) -> Result<usize> {
    let path = path.as_ref();
    let data = cities_to_json( cities)?;
    set_filepath_contents( path, &data)?;

    info!("saved {} cities to {:?}", cities.len(), path);
    Ok( cities.len() )
}

pub fn read_cities (path: impl AsRef<Path>) -> Result<Vec<CityRecord>> {
    let s = filepath_contents_as_string( &path.as_ref())?;
    Ok( serde_json::from_str( &s)? )
}
