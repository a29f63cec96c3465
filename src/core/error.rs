// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the browser core
//!
//! Component operations return the error of their component. Entry points
//! that span components (loading every system, deleting a game from the
//! library and the disk) return the top-level [`BrowserError`].

use crate::core::library::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for browser operations
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Library construction or mutation failed
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// No configured system could be loaded
    #[error("No systems found")]
    NoSystems,

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Texture cache errors
#[derive(Debug, Error)]
pub enum TextureError {
    /// Resource data could not be read
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Resource data is not a decodable image
    #[error("Invalid image data in '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The GPU backend refused the upload
    #[error("GPU upload failed for '{0}'")]
    Upload(String),
}

/// Library model errors
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The node id does not refer to a live node
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    /// The operation needs a game but got a folder
    #[error("Node {0:?} is not a game")]
    NotAGame(NodeId),

    /// The operation needs a folder but got a game
    #[error("Node {0:?} is not a folder")]
    NotAFolder(NodeId),

    /// The root folder cannot be removed
    #[error("The root folder cannot be removed")]
    RootRemoval,

    /// The system start path does not exist
    #[error("Start path '{0}' does not exist")]
    MissingStartPath(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Game launch errors
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The system has no launch command
    #[error("System '{0}' has no launch command")]
    NoCommand(String),

    /// The emulator process could not be spawned
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The emulator exited with a failure status
    #[error("Emulator exited with status {0}")]
    ExitStatus(i32),
}
