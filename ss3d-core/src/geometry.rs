/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// Screen-space determinant below which a triangle has no usable area
const BARYCENTRIC_EPSILON: f64 = 1e-10;

/// Normalize `v` in place, leaving a zero-length vector untouched
pub fn normalize_in_place(v: &mut Vector3<f32>) {
    let magnitude = v.norm();
    if magnitude > 0.0 {
        *v /= magnitude;
    }
}

/// Barycentric weights of a point relative to vertices a, b and c
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Barycentric {
    /// Inside or on an edge of the triangle
    pub fn is_inside(&self) -> bool {
        self.alpha >= 0.0 && self.beta >= 0.0 && self.gamma >= 0.0
    }
}

/// Integer pixel range covered by a triangle (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Restrict to the visible `[0, width-1] x [0, height-1]` range
    pub fn clamp_to(self, width: usize, height: usize) -> Self {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX) - 1;
        let max_y = i32::try_from(height).unwrap_or(i32::MAX) - 1;
        Self {
            min_x: self.min_x.max(0),
            max_x: self.max_x.min(max_x),
            min_y: self.min_y.max(0),
            max_y: self.max_y.min(max_y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// A triangle face with its derived unit normal.
///
/// The normal is recomputed whenever the vertices change, so it always
/// follows the winding `(b - a) x (c - a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
    normal: Vector3<f32>,
}

impl Triangle {
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let vertices = [a, b, c];
        Self {
            vertices,
            normal: Self::calculate_normal(&vertices),
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Build a new triangle by mapping every vertex, recomputing the normal
    pub fn map_vertices<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Point3<f32>) -> Point3<f32>,
    {
        let [a, b, c] = self.vertices;
        Self::new(f(a), f(b), f(c))
    }

    /// Collinear vertices leave a zero normal
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm_squared() < f32::EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
    }

    /// Calculate the face normal from the triangle's vertices
    fn calculate_normal(vertices: &[Point3<f32>; 3]) -> Vector3<f32> {
        let edge1 = vertices[1] - vertices[0];
        let edge2 = vertices[2] - vertices[0];

        let mut normal = edge1.cross(&edge2);
        normalize_in_place(&mut normal);
        normal
    }

    /// x/y extent truncated toward zero; callers clamp to the screen
    pub fn bounding_box(&self) -> BoundingBox {
        let [a, b, c] = self.vertices;
        BoundingBox {
            min_x: a.x.min(b.x).min(c.x) as i32,
            max_x: a.x.max(b.x).max(c.x) as i32,
            min_y: a.y.min(b.y).min(c.y) as i32,
            max_y: a.y.max(b.y).max(c.y) as i32,
        }
    }

    /// Barycentric coordinates of `(px, py)` in the triangle's x/y projection.
    ///
    /// Returns `None` when the projected triangle has (numerically) zero area.
    pub fn barycentric(&self, px: f32, py: f32) -> Option<Barycentric> {
        // Solved in f64: the Gram determinant cancels badly in f32 at pixel scale.
        let [a, b, c] = self.vertices;
        let (ax, ay) = (a.x as f64, a.y as f64);
        let (ab_x, ab_y) = (b.x as f64 - ax, b.y as f64 - ay);
        let (ac_x, ac_y) = (c.x as f64 - ax, c.y as f64 - ay);
        let (ap_x, ap_y) = (px as f64 - ax, py as f64 - ay);

        let dot_ac_ac = ac_x * ac_x + ac_y * ac_y;
        let dot_ac_ab = ac_x * ab_x + ac_y * ab_y;
        let dot_ac_ap = ac_x * ap_x + ac_y * ap_y;
        let dot_ab_ab = ab_x * ab_x + ab_y * ab_y;
        let dot_ab_ap = ab_x * ap_x + ab_y * ap_y;

        let denom = dot_ac_ac * dot_ab_ab - dot_ac_ab * dot_ac_ab;
        if denom.abs() < BARYCENTRIC_EPSILON {
            return None;
        }

        let inv = 1.0 / denom;
        let gamma = (dot_ab_ab * dot_ac_ap - dot_ac_ab * dot_ab_ap) * inv;
        let beta = (dot_ac_ac * dot_ab_ap - dot_ac_ab * dot_ac_ap) * inv;
        let alpha = 1.0 - beta - gamma;

        Some(Barycentric {
            alpha: alpha as f32,
            beta: beta as f32,
            gamma: gamma as f32,
        })
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
