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
use thiserror::Error;
use nws_common::{config::ConfigError, net::NetError};

pub type Result<T> = std::result::Result<T, NwsGridError>;

#[derive(Error,Debug)]
pub enum NwsGridError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config error {0}")]
    ConfigError( #[from] ConfigError),

    #[error("{0}")]
    NetError( #[from] NetError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    /// response body that is not the JSON we expect
    #[error("decode error {0}")]
    DecodeError(String),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

/// where in the processing chain an error originated
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum FailureKind {
    /// DNS, connect, timeout
    Transport,
    /// non-success HTTP status
    Protocol,
    /// body is not valid JSON or has an unexpected structure
    Decode,
    /// output file could not be written
    Output,
    Config,
    Other,
}

impl NwsGridError {
    pub fn kind (&self)->FailureKind {
        match self {
            NwsGridError::NetError(NetError::HttpError(_)) => FailureKind::Transport,
            NwsGridError::NetError(NetError::StatusError(..)) | NwsGridError::NetError(NetError::NotFoundError(_)) => FailureKind::Protocol,
            NwsGridError::NetError(NetError::ParseError(_)) | NwsGridError::DecodeError(_) => FailureKind::Decode,
            NwsGridError::NetError(_) => FailureKind::Transport,
            NwsGridError::IOError(_) | NwsGridError::JsonError(_) => FailureKind::Output,
            NwsGridError::ConfigError(_) => FailureKind::Config,
            NwsGridError::OpFailed(_) => FailureKind::Other,
        }
    }

    /// per-record failures leave the record unenriched, everything else terminates the run
    pub fn is_fatal (&self)->bool {
        matches!( self.kind(), FailureKind::Output | FailureKind::Config)
    }
}

pub fn op_failed (msg: impl ToString)->NwsGridError {
    NwsGridError::OpFailed(msg.to_string())
}

pub fn decode_error (msg: impl ToString)->NwsGridError {
    NwsGridError::DecodeError(msg.to_string())
}
