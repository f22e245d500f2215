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

//! metadata and image export of the NDFD temperature MapServer
//! (https://mapservices.weather.noaa.gov/raster/rest/services/NDFD/NDFD_temp/MapServer)

use std::{path::Path, time::Duration, fmt};
use serde::{Deserialize,Serialize};
use serde_json::{Map,Value};
use chrono::{DateTime,Utc,SecondsFormat};
use strum::{Display,EnumString};
use reqwest::{Client, header::HeaderMap};
use tracing::{debug,info};

use nws_common::net::{build_client, download_url, get_bytes};

mod errors;
pub use errors::*;

/// geographic bounding box in decimal degrees (WGS84)
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl BoundingBox {
    pub fn new (west: f64, south: f64, east: f64, north: f64)->Self {
        BoundingBox { west, south, east, north }
    }
}

/// MapServer export request parameters
#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(default)]
pub struct ExportParams {
    pub bbox: BoundingBox,
    pub width: u32,
    pub height: u32,
    /// MapServer image format (png, png8, png24, png32, jpg, gif, ..)
    pub format: String,
    pub transparent: bool,
    pub dpi: u32,
}

impl Default for ExportParams {
    fn default() -> Self {
        ExportParams {
            bbox: BoundingBox::new( -125.0, 24.0, -66.0, 50.0), // CONUS
            width: 1600,
            height: 900,
            format: "png".to_string(),
            transparent: true,
            dpi: 96,
        }
    }
}

#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(default)]
pub struct NdfdConfig {
    /// MapServer root URL
    pub service_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub export: ExportParams,
}

impl Default for NdfdConfig {
    fn default() -> Self {
        NdfdConfig {
            service_url: "https://mapservices.weather.noaa.gov/raster/rest/services/NDFD/NDFD_temp/MapServer".to_string(),
            user_agent: "(myweatherapp.com, contact@example.com)".to_string(),
            timeout: Duration::from_secs(30),
            export: ExportParams::default(),
        }
    }
}

pub fn ndfd_client (cfg: &NdfdConfig)->Result<Client> {
    Ok( build_client( &cfg.user_agent, cfg.timeout, HeaderMap::new())? )
}

/* #region metadata ********************************************************************************************/

/// service or layer time metadata. We only interpret the time extent, the remaining fields are kept as sent
#[derive(Clone,Serialize,Deserialize,Debug,PartialEq,Default)]
#[serde(rename_all="camelCase")]
pub struct TimeInfo {
    /// [start,end] in epoch millis, either of them can be null
    #[serde(default)]
    pub time_extent: Option<Vec<Option<i64>>>,

    #[serde(flatten)]
    pub other: Map<String,Value>,
}

impl TimeInfo {
    pub fn extent (&self)->Option<(DateTime<Utc>,DateTime<Utc>)> {
        match self.time_extent.as_deref() {
            Some([Some(start), Some(end)]) => {
                Some( (DateTime::from_timestamp_millis(*start)?, DateTime::from_timestamp_millis(*end)?) )
            }
            _ => None
        }
    }
}

impl fmt::Display for TimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((start,end)) = self.extent() {
            write!( f, "{} - {}", start.to_rfc3339_opts(SecondsFormat::Secs, true), end.to_rfc3339_opts(SecondsFormat::Secs, true))?;
        } else {
            write!( f, "no time extent")?;
        }

        for (k,v) in &self.other {
            if !v.is_null() {
                write!( f, ", {k}: {v}")?;
            }
        }
        Ok(())
    }
}

/// entry of the service layer list
#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct LayerSummary {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub time_info: Option<TimeInfo>,
}

#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(rename_all="camelCase")]
pub struct MapServiceInfo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time_info: Option<TimeInfo>,
    #[serde(default)]
    pub layers: Vec<LayerSummary>,
}

/// metadata of a single layer
#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(rename_all="camelCase")]
pub struct LayerInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time_info: Option<TimeInfo>,
}

#[derive(Deserialize,Debug)]
struct ServiceErrorBody {
    code: i64,
    #[serde(default)]
    message: String,
}

/// decode a MapServer JSON response, turning `{"error": {..}}` bodies into errors
pub fn parse_service_response<T> (body: &[u8]) -> Result<T> where T: for<'a> Deserialize<'a> {
    let mut value: Value = serde_json::from_slice( body)?;

    if let Some(err) = value.get_mut("error") {
        let err: ServiceErrorBody = serde_json::from_value( err.take())?;
        return Err( NdfdError::ServiceError( err.code, err.message))
    }

    Ok( serde_json::from_value( value)? )
}

pub fn service_info_url (cfg: &NdfdConfig)->String {
    format!("{}?f=pjson", cfg.service_url.trim_end_matches('/'))
}

pub fn layer_info_url (cfg: &NdfdConfig, layer_id: u32)->String {
    format!("{}/{}?f=pjson", cfg.service_url.trim_end_matches('/'), layer_id)
}

pub async fn get_service_info (client: &Client, cfg: &NdfdConfig) -> Result<MapServiceInfo> {
    let body = get_bytes( client, &service_info_url(cfg)).await?;
    parse_service_response( &body)
}

pub async fn get_layer_info (client: &Client, cfg: &NdfdConfig, layer_id: u32) -> Result<LayerInfo> {
    let body = get_bytes( client, &layer_info_url(cfg, layer_id)).await?;
    parse_service_response( &body)
}

/* #endregion metadata */

/* #region layer catalog ****************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum LayerCategory {
    MaxTemp,
    MinTemp,
    Other,
}

impl LayerCategory {
    pub fn of (layer_name: &str)->Self {
        if layer_name.contains("MaxTemp") {
            LayerCategory::MaxTemp
        } else if layer_name.contains("MinTemp") {
            LayerCategory::MinTemp
        } else {
            LayerCategory::Other
        }
    }

    pub fn title (&self)->&'static str {
        match self {
            LayerCategory::MaxTemp => "MAX TEMPERATURE LAYERS",
            LayerCategory::MinTemp => "MIN TEMPERATURE LAYERS",
            LayerCategory::Other => "OTHER LAYERS",
        }
    }
}

/// (name,id) lists per category, sorted by name and then id
#[derive(Debug,Default,PartialEq)]
pub struct LayerCatalog {
    pub max_temp: Vec<(String,u32)>,
    pub min_temp: Vec<(String,u32)>,
    pub other: Vec<(String,u32)>,
}

impl LayerCatalog {
    pub fn len (&self)->usize {
        self.max_temp.len() + self.min_temp.len() + self.other.len()
    }

    pub fn category (&self, cat: LayerCategory)->&Vec<(String,u32)> {
        match cat {
            LayerCategory::MaxTemp => &self.max_temp,
            LayerCategory::MinTemp => &self.min_temp,
            LayerCategory::Other => &self.other,
        }
    }
}

pub fn categorize_layers (layers: &[LayerSummary])->LayerCatalog {
    let mut catalog = LayerCatalog::default();

    for layer in layers {
        let entry = (layer.name.clone(), layer.id);
        match LayerCategory::of( &layer.name) {
            LayerCategory::MaxTemp => catalog.max_temp.push( entry),
            LayerCategory::MinTemp => catalog.min_temp.push( entry),
            LayerCategory::Other => catalog.other.push( entry),
        }
    }

    catalog.max_temp.sort();
    catalog.min_temp.sort();
    catalog.other.sort();
    catalog
}

/// the listing printed by `ndfd_layers`. Empty "other" sections are omitted
pub fn format_catalog (catalog: &LayerCatalog)->String {
    let rule = "=".repeat(70);
    let sep = "-".repeat(70);
    let mut s = String::with_capacity( 128 + catalog.len() * 64);

    s.push_str( &format!("Total layers found: {}\n\n", catalog.len()));
    s.push_str( &format!("{rule}\n"));

    for cat in [LayerCategory::MaxTemp, LayerCategory::MinTemp, LayerCategory::Other] {
        let entries = catalog.category(cat);
        if cat == LayerCategory::Other && entries.is_empty() { continue }

        s.push_str( &format!("\n{}:\n{sep}\n", cat.title()));
        for (name,id) in entries {
            s.push_str( &format!("  {name:<40} ID: {id}\n"));
        }
    }

    s.push_str( &format!("\n{rule}\n"));
    s
}

/* #endregion layer catalog */

/* #region forecast layers and export ***************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,EnumString)]
#[strum(serialize_all="lowercase")]
pub enum ForecastKind {
    High,
    Low,
}

/// the MapServer layer that holds the daily max (High) or min (Low) temperature forecast for
/// day 1..3. Day 3 lows are not published
pub fn forecast_layer_id (kind: ForecastKind, day: u32)->Option<u32> {
    match (kind, day) {
        (ForecastKind::High, 1) => Some(124),
        (ForecastKind::High, 2) => Some(128),
        (ForecastKind::High, 3) => Some(132),
        (ForecastKind::Low, 1) => Some(137),
        (ForecastKind::Low, 2) => Some(141),
        _ => None
    }
}

/// an explicit layer id takes precedence, otherwise kind and day (default: high, day 1) have to map to a known layer
pub fn select_layer (layer: Option<u32>, kind: Option<ForecastKind>, day: Option<u32>)->Result<u32> {
    if let Some(id) = layer {
        return Ok(id)
    }

    let kind = kind.unwrap_or( ForecastKind::High);
    let day = day.unwrap_or(1);
    forecast_layer_id( kind, day).ok_or_else( || NdfdError::LayerNotAvailable( format!("{kind} day {day}")))
}

pub fn export_url (cfg: &NdfdConfig, layer_id: u32)->String {
    let p = &cfg.export;
    let b = &p.bbox;
    format!("{}/export?bbox={},{},{},{}&bboxSR=4326&imageSR=3857&size={},{}&dpi={}&format={}&transparent={}&layers=show:{}&f=image",
        cfg.service_url.trim_end_matches('/'),
        b.west, b.south, b.east, b.north,
        p.width, p.height,
        p.dpi,
        p.format,
        p.transparent,
        layer_id
    )
}

/// default output filename for an exported layer image
pub fn export_filename (cfg: &NdfdConfig, layer_id: u32)->String {
    let ext = if cfg.export.format.starts_with("png") { "png" } else { cfg.export.format.as_str() };
    format!("ndfd_{layer_id}.{ext}")
}

/// export the given layer as image and store it in `path`. Returns the image size in bytes.
/// Responses that are not images (the MapServer reports errors as JSON) are rejected
pub async fn export_layer_image (client: &Client, cfg: &NdfdConfig, layer_id: u32, path: impl AsRef<Path>) -> Result<u64> {
    let url = export_url( cfg, layer_id);
    let len = download_url( client, &url, Some("image/"), path.as_ref()).await?;
    info!("{} bytes of layer {} saved to {:?}", len, layer_id, path.as_ref());
    Ok(len)
}

/* #endregion forecast layers and export */
