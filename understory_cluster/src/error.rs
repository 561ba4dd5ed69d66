// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Rejected [`ClusterConfig`](crate::ClusterConfig) values.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The base radius is zero, negative, or not finite.
    #[error("radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),

    /// More zoom levels were requested than the index supports.
    #[error("max zoom {max_zoom} exceeds the supported limit of {limit}")]
    ZoomOutOfRange {
        /// Requested maximum zoom.
        max_zoom: u32,
        /// Largest accepted maximum zoom.
        limit: u32,
    },

    /// The scaled radius at some level is too small to bucket points.
    #[error("radius {radius} underflows at zoom {zoom}")]
    RadiusUnderflow {
        /// Base radius.
        radius: f64,
        /// First zoom at which the scaled radius is no longer a normal float.
        zoom: u32,
    },
}

/// Errors returned by [`ClusterIndex`](crate::ClusterIndex).
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// Construction was attempted with an invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A point with a non-finite coordinate was offered.
    #[error("invalid point ({x}, {y}): coordinates must be finite")]
    InvalidPoint {
        /// Offered x coordinate.
        x: f64,
        /// Offered y coordinate.
        y: f64,
    },

    /// The index cannot hand out more 32-bit point or cluster ids.
    #[error("index is full: point and cluster ids are 32-bit")]
    CapacityExceeded,
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;
