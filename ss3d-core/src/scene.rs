/// Static scene construction: the pentagonal star bipyramid
use nalgebra::Point3;
use std::f32::consts::PI;

use crate::geometry::{Mesh, Triangle};

const POINTS: usize = 5;
const INNER_RADIUS_RATIO: f32 = 0.4;
const APEX_HEIGHT_RATIO: f32 = 0.3;

const TOP_APEX: usize = 0;
const BOTTOM_APEX: usize = 1;

fn outer(i: usize) -> usize {
    2 + i % POINTS
}

fn inner(i: usize) -> usize {
    2 + POINTS + i % POINTS
}

/// Indexed vertex/face layout of the star mesh
#[derive(Debug, Clone)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<[usize; 3]>,
}

impl IndexedMesh {
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.faces.len());
        for &[a, b, c] in &self.faces {
            mesh.add_triangle(Triangle::new(
                self.vertices[a],
                self.vertices[b],
                self.vertices[c],
            ));
        }
        mesh
    }
}

/// Vertices and outward-wound faces of a five-pointed star bipyramid.
///
/// Two apexes sit on the y axis; the outer ring (radius `length`) forms
/// the star's points and the inner ring sits between them.
pub fn star_layout(length: f32) -> IndexedMesh {
    let inner_radius = length * INNER_RADIUS_RATIO;
    let apex_height = length * APEX_HEIGHT_RATIO;

    let mut vertices = Vec::with_capacity(2 + 2 * POINTS);
    vertices.push(Point3::new(0.0, apex_height, 0.0));
    vertices.push(Point3::new(0.0, -apex_height, 0.0));

    let angles: Vec<f32> = (0..POINTS)
        .map(|i| 2.0 * PI * i as f32 / POINTS as f32 - PI / 2.0)
        .collect();
    for &angle in &angles {
        vertices.push(Point3::new(length * angle.cos(), 0.0, length * angle.sin()));
    }
    for &angle in &angles {
        let angle = angle + PI / POINTS as f32;
        vertices.push(Point3::new(
            inner_radius * angle.cos(),
            0.0,
            inner_radius * angle.sin(),
        ));
    }

    let mut faces = Vec::with_capacity(4 * POINTS);
    for i in 0..POINTS {
        // Top half
        faces.push([outer(i), TOP_APEX, inner(i)]);
        faces.push([inner(i), TOP_APEX, outer(i + 1)]);
        // Bottom half
        faces.push([outer(i), inner(i), BOTTOM_APEX]);
        faces.push([inner(i), outer(i + 1), BOTTOM_APEX]);
    }

    IndexedMesh { vertices, faces }
}

/// The star bipyramid as a triangle list in world space
pub fn star_mesh(length: f32) -> Mesh {
    star_layout(length).to_mesh()
}
