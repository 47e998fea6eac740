/// Z-buffered triangle fill and line drawing into the glyph grid
use log::{debug, trace};
use nalgebra::{Point3, Vector3};

use crate::buffer::{DepthBuffer, FrameBuffer};
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::geometry::Triangle;
use crate::projection::Projector;
use crate::shading::BrightnessRamp;

/// What happened to a triangle handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleOutcome {
    /// Facing away from the camera
    Culled,
    /// Zero-area triangle with no usable normal
    Degenerate,
    /// A vertex has no projection
    Clipped,
    /// Rasterized; `pixels` were written through the depth test
    Drawn { pixels: usize },
}

/// Software rasterizer owning the frame and depth buffers
pub struct Rasterizer {
    width: usize,
    height: usize,
    frame: FrameBuffer,
    depth: DepthBuffer,
    projector: Projector,
    light_dir: Vector3<f32>,
    ramp: BrightnessRamp,
}

impl Rasterizer {
    pub fn new(config: &RenderConfig) -> Self {
        let (width, height) = (config.width, config.height);
        let mut light_dir = config.light_direction;
        crate::geometry::normalize_in_place(&mut light_dir);

        Self {
            width,
            height,
            frame: FrameBuffer::new(width, height),
            depth: DepthBuffer::new(width * height),
            projector: Projector::new(config),
            light_dir,
            ramp: BrightnessRamp::new(&config.brightness_ramp),
        }
    }

    pub fn clear(&mut self) {
        self.frame.clear();
        self.depth.clear();
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Cull, shade, project and fill one camera-space triangle
    pub fn draw_triangle(&mut self, triangle: &Triangle) -> RenderResult<TriangleOutcome> {
        if !triangle.is_finite() {
            return Err(RenderError::InvalidTriangle(format!(
                "non-finite vertices {:?}",
                triangle.vertices()
            )));
        }

        if triangle.is_degenerate() {
            trace!("skipping degenerate triangle {:?}", triangle.vertices());
            return Ok(TriangleOutcome::Degenerate);
        }

        let normal = triangle.normal();
        if normal.z >= 0.0 {
            return Ok(TriangleOutcome::Culled);
        }

        let glyph = self.ramp.glyph(normal.dot(&self.light_dir));

        // Project vertices to screen space
        let mut screen = [Point3::origin(); 3];
        let mut depth_sum = 0.0;
        for (slot, vertex) in screen.iter_mut().zip(triangle.vertices()) {
            match self.projector.project(vertex) {
                Some(p) => {
                    *slot = Point3::new(p.x, p.y, 0.0);
                    depth_sum += p.inv_depth;
                }
                None => {
                    debug!("vertex {:?} has no projection, skipping triangle", vertex);
                    return Ok(TriangleOutcome::Clipped);
                }
            }
        }
        let avg_depth = depth_sum / 3.0;

        let screen_triangle = Triangle::new(screen[0], screen[1], screen[2]);
        let pixels = self.fill_triangle(&screen_triangle, avg_depth, glyph);
        Ok(TriangleOutcome::Drawn { pixels })
    }

    /// Fill a screen-space triangle at a single depth; returns pixels written
    pub fn fill_triangle(&mut self, screen: &Triangle, depth: f32, glyph: char) -> usize {
        let bbox = screen.bounding_box().clamp_to(self.width, self.height);
        if bbox.is_empty() {
            return 0;
        }

        let mut written = 0;
        for y in bbox.min_y..=bbox.max_y {
            for x in bbox.min_x..=bbox.max_x {
                let covered = screen
                    .barycentric(x as f32, y as f32)
                    .map_or(false, |b| b.is_inside());
                if !covered {
                    continue;
                }
                let Some(idx) = self.frame.index(x, y) else {
                    continue;
                };
                if self.depth.test_and_set(idx, depth) {
                    self.frame.set(idx, glyph);
                    written += 1;
                }
            }
        }
        written
    }

    /// Integer line between two screen points, ignoring the depth buffer.
    ///
    /// The segment is clipped to the screen (plus a one-cell margin) before
    /// stepping, so far off-screen endpoints cost nothing.
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), glyph: char) -> usize {
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
            return 0;
        }

        let bounds = (
            (-1.0, -1.0),
            (self.width as f64, self.height as f64),
        );
        let Some((start, end)) = clip_segment(
            (from.0 as f64, from.1 as f64),
            (to.0 as f64, to.1 as f64),
            bounds,
        ) else {
            return 0;
        };

        let (x_end, y_end) = (end.0 as i64, end.1 as i64);
        let (mut x, mut y) = (start.0 as i64, start.1 as i64);

        let delta_x = (x_end - x).abs();
        let delta_y = (y_end - y).abs();
        let step_x = if x_end > x { 1 } else { -1 };
        let step_y = if y_end > y { 1 } else { -1 };
        let mut error = delta_x - delta_y;

        let mut written = 0;
        loop {
            if let (Ok(px), Ok(py)) = (i32::try_from(x), i32::try_from(y)) {
                if self.frame.put(px, py, glyph) {
                    written += 1;
                }
            }

            if x == x_end && y == y_end {
                break;
            }

            let doubled = 2 * error;
            if doubled > -delta_y {
                error -= delta_y;
                x += step_x;
            }
            if doubled < delta_x {
                error += delta_x;
                y += step_y;
            }
        }
        written
    }
}

type Segment = ((f64, f64), (f64, f64));

/// Liang-Barsky clip of `from -> to` against the rectangle `(min, max)`
fn clip_segment(from: (f64, f64), to: (f64, f64), (min, max): Segment) -> Option<Segment> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, from.0 - min.0),
        (dx, max.0 - from.0),
        (-dy, from.1 - min.1),
        (dy, max.1 - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BLANK;

    fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
        Point3::new(x, y, z)
    }

    fn screen_triangle() -> Triangle {
        Triangle::new(p(2.0, 2.0, 0.0), p(20.0, 2.0, 0.0), p(2.0, 12.0, 0.0))
    }

    #[test]
    fn test_depth_overwrite_policy() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let tri = screen_triangle();

        let first = raster.fill_triangle(&tri, 0.5, 'a');
        assert!(first > 0);
        let idx = raster.frame().index(4, 4).unwrap();
        assert_eq!(raster.frame().as_slice()[idx], 'a');

        // Farther and equal depths leave glyph and depth alone
        assert_eq!(raster.fill_triangle(&tri, 0.25, 'b'), 0);
        assert_eq!(raster.fill_triangle(&tri, 0.5, 'c'), 0);
        assert_eq!(raster.frame().as_slice()[idx], 'a');
        assert_eq!(raster.depth().get(idx), 0.5);

        // Nearer overwrites both
        assert_eq!(raster.fill_triangle(&tri, 0.75, 'd'), first);
        assert_eq!(raster.frame().as_slice()[idx], 'd');
        assert_eq!(raster.depth().get(idx), 0.75);
    }

    #[test]
    fn test_fill_is_edge_inclusive() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        raster.fill_triangle(&screen_triangle(), 1.0, '#');
        assert_eq!(raster.frame().get(2, 2), Some('#'));
        assert_eq!(raster.frame().get(10, 2), Some('#'));
        assert_eq!(raster.frame().get(2, 7), Some('#'));
        assert_eq!(raster.frame().get(19, 11), Some(BLANK));
    }

    #[test]
    fn test_fill_clamps_to_screen() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let huge = Triangle::new(p(-500.0, -500.0, 0.0), p(900.0, -500.0, 0.0), p(-500.0, 900.0, 0.0));
        let written = raster.fill_triangle(&huge, 1.0, '#');
        assert_eq!(written, 120 * 33);
    }

    #[test]
    fn test_draw_triangle_end_to_end() {
        let config = RenderConfig {
            light_direction: Vector3::new(0.0, 0.0, -1.0),
            ..RenderConfig::default()
        };
        let mut raster = Rasterizer::new(&config);
        // Wound to face the camera (normal along -z)
        let tri = Triangle::new(p(0.0, 0.0, 5.0), p(0.0, 1.0, 5.0), p(1.0, 0.0, 5.0));

        let outcome = raster.draw_triangle(&tri).unwrap();
        assert!(matches!(outcome, TriangleOutcome::Drawn { pixels } if pixels > 0));

        // dot(normal, light) = 1 maps to the brightest glyph
        let glyph = '@';
        assert_eq!(raster.frame().get(61, 17), Some(glyph));

        let bbox = tri
            .map_vertices(|v| {
                let s = raster.projector().project(&v).unwrap();
                p(s.x, s.y, 0.0)
            })
            .bounding_box();
        for y in 0..33 {
            for x in 0..120 {
                let cell = raster.frame().get(x, y).unwrap();
                if bbox.contains(x, y) {
                    assert!(cell == BLANK || cell == glyph);
                } else {
                    assert_eq!(cell, BLANK, "({}, {}) outside the triangle was drawn", x, y);
                }
            }
        }
    }

    #[test]
    fn test_partly_off_screen_triangle_matches_coverage() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let projector = *raster.projector();

        // Back-project screen targets onto z = 0; the triangle crosses x = 0 and y = 32
        let scale = 2400.0 / 660.0;
        let world = |sx: f32, sy: f32| p((sx - 60.0) / scale, (sy - 16.5) / (scale * 0.5), 0.0);
        let tri = Triangle::new(world(-10.0, 20.0), world(-10.0, 45.0), world(30.0, 20.0));

        let screen = tri.map_vertices(|v| {
            let s = projector.project(&v).unwrap();
            p(s.x, s.y, 0.0)
        });
        let mut expected = 0;
        for y in 0..33 {
            for x in 0..120 {
                if screen.barycentric(x as f32, y as f32).map_or(false, |b| b.is_inside()) {
                    expected += 1;
                }
            }
        }
        assert!(expected > 0);

        let outcome = raster.draw_triangle(&tri).unwrap();
        assert_eq!(outcome, TriangleOutcome::Drawn { pixels: expected });

        let mut drawn = 0;
        for y in 0..33 {
            for x in 0..120 {
                if raster.frame().get(x, y) != Some(BLANK) {
                    drawn += 1;
                    let inside = screen
                        .barycentric(x as f32, y as f32)
                        .map_or(false, |b| b.is_inside());
                    assert!(inside, "({}, {}) outside the triangle was drawn", x, y);
                }
            }
        }
        assert_eq!(drawn, expected);
        assert_ne!(raster.frame().get(0, 32), Some(BLANK));
    }

    #[test]
    fn test_back_face_culled() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let tri = Triangle::new(p(0.0, 0.0, 5.0), p(1.0, 0.0, 5.0), p(0.0, 1.0, 5.0));
        assert_eq!(raster.draw_triangle(&tri).unwrap(), TriangleOutcome::Culled);
        assert!(raster.frame().as_slice().iter().all(|&c| c == BLANK));
    }

    #[test]
    fn test_degenerate_skipped() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let tri = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 2.0, 0.0));
        assert_eq!(raster.draw_triangle(&tri).unwrap(), TriangleOutcome::Degenerate);
    }

    #[test]
    fn test_behind_eye_clipped() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let tri = Triangle::new(p(0.0, 0.0, -700.0), p(0.0, 1.0, -700.0), p(1.0, 0.0, -700.0));
        assert_eq!(raster.draw_triangle(&tri).unwrap(), TriangleOutcome::Clipped);
    }

    #[test]
    fn test_non_finite_triangle_is_fatal() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let tri = Triangle::new(p(f32::NAN, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 0.0, 0.0));
        assert!(matches!(
            raster.draw_triangle(&tri),
            Err(RenderError::InvalidTriangle(_))
        ));
    }

    #[test]
    fn test_line_endpoints_and_bounds() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        let written = raster.draw_line((3.0, 4.0), (10.0, 7.0), '*');
        assert_eq!(written, 8);
        assert_eq!(raster.frame().get(3, 4), Some('*'));
        assert_eq!(raster.frame().get(10, 7), Some('*'));

        // Partially off-screen lines only touch visible cells
        let written = raster.draw_line((-5.0, 0.0), (2.0, 0.0), '*');
        assert_eq!(written, 3);
    }

    #[test]
    fn test_far_off_screen_line_is_clipped() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        assert_eq!(raster.draw_line((-3.0e9, 0.0), (10.0, 0.0), '*'), 11);
        assert_eq!(raster.frame().get(0, 0), Some('*'));
        assert_eq!(raster.frame().get(10, 0), Some('*'));
        assert_eq!(raster.frame().get(11, 0), Some(BLANK));

        // Entirely outside: nothing to walk
        assert_eq!(raster.draw_line((5.0e9, -4.0e9), (9.0e9, 2.0e9), '*'), 0);
        assert_eq!(raster.draw_line((-1.0e9, 5.0), (2.0e9, 5.0), '#'), 120);
    }

    #[test]
    fn test_single_point_line() {
        let mut raster = Rasterizer::new(&RenderConfig::default());
        assert_eq!(raster.draw_line((5.5, 5.9), (5.1, 5.2), '*'), 1);
        assert_eq!(raster.frame().get(5, 5), Some('*'));
    }
}
