// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clustering configuration.

use crate::error::ConfigError;

/// Largest accepted [`ClusterConfig::max_zoom`].
pub const MAX_ZOOM_LIMIT: u32 = 32;

/// Configuration of a [`ClusterIndex`](crate::ClusterIndex).
///
/// Level `z` clusters anything within `radius · 2^(−z)`: finer zoom means a
/// smaller radius and more, tighter clusters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterConfig {
    /// Finest zoom level. Levels `0..=max_zoom` are maintained.
    pub max_zoom: u32,
    /// Clustering radius at zoom 0, in the caller's planar units.
    pub radius: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_zoom: 18,
            radius: 5.0,
        }
    }
}

impl ClusterConfig {
    /// Create a configuration.
    pub const fn new(max_zoom: u32, radius: f64) -> Self {
        Self { max_zoom, radius }
    }

    /// Replace the finest zoom level.
    #[must_use]
    pub const fn with_max_zoom(mut self, max_zoom: u32) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Replace the zoom-0 radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Clustering radius at `zoom`.
    pub fn radius_at(&self, zoom: u32) -> f64 {
        // `powi` is not available in core; halving is exact anyway.
        let mut r = self.radius;
        for _ in 0..zoom {
            r *= 0.5;
        }
        r
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if self.max_zoom > MAX_ZOOM_LIMIT {
            return Err(ConfigError::ZoomOutOfRange {
                max_zoom: self.max_zoom,
                limit: MAX_ZOOM_LIMIT,
            });
        }
        if !self.radius_at(self.max_zoom).is_normal() {
            let zoom = (0..=self.max_zoom)
                .find(|&z| !self.radius_at(z).is_normal())
                .unwrap_or(self.max_zoom);
            return Err(ConfigError::RadiusUnderflow {
                radius: self.radius,
                zoom,
            });
        }
        Ok(())
    }
}
