/// Startup configuration for the renderer
use nalgebra::Vector3;
use std::f32::consts::PI;
use std::time::Duration;

use crate::error::{RenderError, RenderResult};

/// Brightness ramp from dimmest to brightest
pub const DEFAULT_BRIGHTNESS_RAMP: &str = ".,-~:;=!*#$@";

/// Minimum number of distinct shading levels a ramp must provide
pub const MIN_RAMP_LEVELS: usize = 10;

/// Star field parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StarConfig {
    pub count: usize,
    /// Distance travelled along z per frame
    pub speed: f32,
    /// Stars spawn in x ∈ [-half_width, half_width]
    pub half_width: f32,
    /// Stars spawn in y ∈ [-half_height, half_height]
    pub half_height: f32,
    /// Respawn depth; also the lower bound of the initial depth range
    pub far_z: f32,
    /// Upper bound of the initial depth range
    pub spawn_near_z: f32,
    /// A star whose z exceeds this after an update is recycled
    pub recycle_z: f32,
    pub glyph: char,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 300,
            speed: 20.0,
            half_width: 80.0,
            half_height: 30.0,
            far_z: -200.0,
            spawn_near_z: -5.0,
            recycle_z: 5.0,
            glyph: '*',
        }
    }
}

/// Orbiting-camera illusion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Orbit angle advance per frame (radians)
    pub orbit_speed: f32,
    /// Vertical bob speed, expressed relative to `orbit_speed`
    pub vertical_speed: f32,
    /// Horizontal sway amplitude
    pub horizontal_amount: f32,
    /// Vertical bob amplitude
    pub vertical_amount: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_speed: PI / 200.0,
            vertical_speed: PI / 400.0,
            horizontal_amount: 10.0,
            vertical_amount: 8.0,
        }
    }
}

/// Per-frame object rotation increments (radians).
///
/// The orbit angle advances by `CameraConfig::orbit_speed`, the same value
/// the vertical bob divides by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for RotationStep {
    fn default() -> Self {
        Self {
            x: PI / 30.0,
            y: PI / 50.0,
            z: PI / 60.0,
        }
    }
}

/// Complete renderer configuration, fixed at startup
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// World-scale constant used for the mesh size and perspective constants
    pub world_scale: f32,
    /// Vertical squash compensating for tall terminal cells
    pub aspect_ratio: f32,
    pub light_direction: Vector3<f32>,
    pub brightness_ramp: String,
    pub stars: StarConfig,
    pub camera: CameraConfig,
    pub rotation_step: RotationStep,
    pub target_frame_duration: Duration,
}

impl RenderConfig {
    /// Perspective constants `(K1, K2)` derived from screen size and world scale
    pub fn perspective_constants(&self) -> (f32, f32) {
        let k1 = (self.width as f32 * self.world_scale * 2.0).trunc();
        let k2 = (self.height as f32 * self.world_scale * 2.0).trunc();
        (k1, k2)
    }

    /// Reject configurations the pipeline cannot render
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "screen must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(RenderError::InvalidConfig(format!(
                "screen {}x{} exceeds addressable range",
                self.width, self.height
            )));
        }
        if !(self.world_scale.is_finite() && self.world_scale > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "world scale must be positive, got {}",
                self.world_scale
            )));
        }
        if !self.aspect_ratio.is_finite() {
            return Err(RenderError::InvalidConfig("aspect ratio must be finite".to_string()));
        }
        let light_norm = self.light_direction.norm();
        if !light_norm.is_finite() || light_norm == 0.0 {
            return Err(RenderError::InvalidConfig(
                "light direction must be a finite non-zero vector".to_string(),
            ));
        }
        let levels = self.brightness_ramp.chars().count();
        if levels < MIN_RAMP_LEVELS {
            return Err(RenderError::InvalidConfig(format!(
                "brightness ramp needs at least {} levels, got {}",
                MIN_RAMP_LEVELS, levels
            )));
        }
        let stars = &self.stars;
        for (name, value) in [
            ("stars.speed", stars.speed),
            ("stars.half_width", stars.half_width),
            ("stars.half_height", stars.half_height),
            ("stars.far_z", stars.far_z),
            ("stars.spawn_near_z", stars.spawn_near_z),
            ("stars.recycle_z", stars.recycle_z),
            ("camera.orbit_speed", self.camera.orbit_speed),
            ("camera.vertical_speed", self.camera.vertical_speed),
            ("camera.horizontal_amount", self.camera.horizontal_amount),
            ("camera.vertical_amount", self.camera.vertical_amount),
            ("rotation_step.x", self.rotation_step.x),
            ("rotation_step.y", self.rotation_step.y),
            ("rotation_step.z", self.rotation_step.z),
        ] {
            if !value.is_finite() {
                return Err(RenderError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.camera.orbit_speed == 0.0 {
            return Err(RenderError::InvalidConfig(
                "camera orbit speed must be non-zero".to_string(),
            ));
        }
        let (_, k2) = self.perspective_constants();
        if stars.far_z <= -k2 {
            return Err(RenderError::InvalidConfig(format!(
                "star far depth {} is at or behind the eye plane ({})",
                stars.far_z, -k2
            )));
        }
        if stars.far_z >= stars.spawn_near_z {
            return Err(RenderError::InvalidConfig(format!(
                "star depth range is empty: far {} >= near {}",
                stars.far_z, stars.spawn_near_z
            )));
        }
        if stars.half_width < 0.0 || stars.half_height < 0.0 {
            return Err(RenderError::InvalidConfig(
                "star extents must be non-negative".to_string(),
            ));
        }
        if self.target_frame_duration.is_zero() {
            return Err(RenderError::InvalidConfig(
                "target frame duration must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 33,
            world_scale: 10.0,
            aspect_ratio: 0.5,
            light_direction: Vector3::new(0.0, 1.0, -1.0).normalize(),
            brightness_ramp: DEFAULT_BRIGHTNESS_RAMP.to_string(),
            stars: StarConfig::default(),
            camera: CameraConfig::default(),
            rotation_step: RotationStep::default(),
            target_frame_duration: Duration::from_secs(1) / 30,
        }
    }
}
