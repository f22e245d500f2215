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
//! common utility functions for network operations

use std::{io::Write, path::Path, time::Duration};
use reqwest::{header::{HeaderMap,HeaderValue,CONTENT_TYPE,USER_AGENT}, Client, StatusCode, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{define_error, fs::{persist_tmp, tmp_file_for}};

define_error!{ pub NetError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    StatusError(u16,String) : "response status {0} for {1}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    ContentTypeError(String) : "unexpected content type: {0}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// build a client that identifies itself with `user_agent` on every request and gives up after `timeout`.
/// NOAA services throttle or reject anonymous requests, hence we do not accept an empty user agent
pub fn build_client (user_agent: &str, timeout: Duration, mut default_headers: HeaderMap) -> Result<Client> {
    if user_agent.trim().is_empty() {
        return Err( NetError::OpFailed("empty user agent".into()))
    }

    let ua = HeaderValue::from_str( user_agent).map_err(|e| NetError::OpFailed(format!("invalid user agent: {e}")))?;
    default_headers.insert( USER_AGENT, ua);

    Ok( Client::builder()
        .default_headers( default_headers)
        .timeout( timeout)
        .build()? )
}

/// turn non-success responses into errors
pub fn check_status (response: Response) -> Result<Response> {
    let url = response.url().to_string();
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err( NetError::NotFoundError(url)),
        other => Err( NetError::StatusError( other.as_u16(), url))
    }
}

/// single GET request without retry, returning the complete body of a success response
pub async fn get_bytes (client: &Client, url: &str) -> Result<bytes::Bytes> {
    debug!("GET {url}");
    let response = check_status( client.get(url).send().await? )?;
    Ok( response.bytes().await? )
}

pub async fn get_json<T> (client: &Client, url: &str) -> Result<T> where T: DeserializeOwned {
    let bytes = get_bytes( client, url).await?;
    serde_json::from_slice( &bytes).map_err(|e| NetError::ParseError(e.to_string()))
}

pub fn content_type (response: &Response) -> Option<&str> {
    response.headers().get(CONTENT_TYPE).and_then( |v| v.to_str().ok())
}

/// fetch URL using HTTP GET and store the body in `path`. Retrieve in chunks to support large files.
/// If `content_prefix` is set the response content-type has to start with it.
/// The file only becomes visible once it is completely downloaded
pub async fn download_url (client: &Client, url: &str, content_prefix: Option<&str>, path: impl AsRef<Path>) -> Result<u64> {
    debug!("GET {url}");
    let mut response = check_status( client.get(url).send().await? )?;

    if let Some(prefix) = content_prefix {
        match content_type( &response) {
            Some(ct) if ct.starts_with(prefix) => {}
            other => return Err( NetError::ContentTypeError( other.unwrap_or("none").to_string()))
        }
    }

    let mut file = tmp_file_for( path.as_ref())?;
    let mut len: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        len += chunk.len() as u64;
        file.write_all(&chunk)?;
    }
    file.flush()?;

    if len == 0 {
        return Err( NetError::OpFailed(format!("empty response from {url}")))
    }

    persist_tmp( file, path)?;
    Ok(len)
}
