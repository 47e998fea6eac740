/// Perspective projection into the character grid
use nalgebra::Point3;

use crate::config::RenderConfig;

/// A projected point: screen coordinates plus inverse depth (larger is nearer)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub inv_depth: f32,
}

/// Fixed perspective projector derived from the screen size and world scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    k1: f32,
    k2: f32,
    half_width: f32,
    half_height: f32,
    aspect_ratio: f32,
}

impl Projector {
    pub fn new(config: &RenderConfig) -> Self {
        let (k1, k2) = config.perspective_constants();
        Self {
            k1,
            k2,
            half_width: config.width as f32 / 2.0,
            half_height: config.height as f32 / 2.0,
            aspect_ratio: config.aspect_ratio,
        }
    }

    /// Distance from the eye to the projection origin along z
    pub fn k2(&self) -> f32 {
        self.k2
    }

    /// Project a 3D point to screen space.
    ///
    /// Points at or behind the eye plane (`K2 + z <= 0`) have no projection.
    pub fn project(&self, point: &Point3<f32>) -> Option<ScreenPoint> {
        let depth = self.k2 + point.z;
        if depth.is_nan() || depth <= 0.0 {
            return None;
        }

        let inv_depth = 1.0 / depth;
        let scale = self.k1 * inv_depth;

        Some(ScreenPoint {
            x: point.x * scale + self.half_width,
            y: point.y * scale * self.aspect_ratio + self.half_height,
            inv_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_center() {
        let projector = Projector::new(&RenderConfig::default());
        let center = projector.project(&Point3::origin()).expect("origin is visible");
        assert!((center.x - 60.0).abs() < 1e-6);
        assert!((center.y - 16.5).abs() < 1e-6);
        assert!((center.inv_depth - 1.0 / 660.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearer_has_larger_inverse_depth() {
        let projector = Projector::new(&RenderConfig::default());
        let near = projector.project(&Point3::new(0.0, 0.0, -10.0)).unwrap();
        let far = projector.project(&Point3::new(0.0, 0.0, 10.0)).unwrap();
        assert!(near.inv_depth > far.inv_depth);
    }

    #[test]
    fn test_aspect_ratio_squashes_y() {
        let projector = Projector::new(&RenderConfig::default());
        let p = projector.project(&Point3::new(5.0, 5.0, 0.0)).unwrap();
        let dx = p.x - 60.0;
        let dy = p.y - 16.5;
        assert!((dy - dx * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_singularity_rejected() {
        let projector = Projector::new(&RenderConfig::default());
        assert!(projector.project(&Point3::new(1.0, 1.0, -660.0)).is_none());
        assert!(projector.project(&Point3::new(1.0, 1.0, -700.0)).is_none());
        assert!(projector.project(&Point3::new(1.0, 1.0, f32::NAN)).is_none());
    }
}
