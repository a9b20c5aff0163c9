//! Hard-coded shapes.
//!
//! Every shape is literal data: the same [`Shape`] always produces the same vertices and
//! indices. Triangles wind counter-clockwise when seen from the front.

use std::{fmt, str::FromStr};

use glam::{Vec2, Vec3, vec2, vec3};

use super::Vertex;
use crate::error::{Error, Result};

/// The closed set of built-in shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Quad,
    Triangle,
    /// Four side faces as a plain triangle list, without indices.
    Pyramid,
    /// Front, left, back and right faces over eight shared corners.
    Cube,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Quad, Shape::Triangle, Shape::Pyramid, Shape::Cube];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Quad => "quad",
            Shape::Triangle => "triangle",
            Shape::Pyramid => "pyramid",
            Shape::Cube => "cube",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedShape(s.to_string()))
    }
}

/// Vertices plus an optional index list describing a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub vertices: Vec<Vertex>,
    /// Empty when the vertices are drawn in order.
    pub indices: Vec<u32>,
}

const RED: Vec3 = vec3(1.0, 0.0, 0.0);
const GREEN: Vec3 = vec3(0.0, 1.0, 0.0);
const BLUE: Vec3 = vec3(0.0, 0.0, 1.0);
const YELLOW: Vec3 = vec3(1.0, 1.0, 0.0);

fn v(position: Vec3, colour: Vec3, texcoord: Vec2, normal: Vec3) -> Vertex {
    Vertex::new(position, colour, texcoord, normal)
}

impl Primitive {
    /// Builds the literal geometry for `shape`.
    pub fn generate(shape: Shape) -> Self {
        match shape {
            Shape::Quad => Self::quad(),
            Shape::Triangle => Self::triangle(),
            Shape::Pyramid => Self::pyramid(),
            Shape::Cube => Self::cube(),
        }
    }

    /// Wraps raw data after checking that it describes a triangle list.
    pub fn from_raw(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        let primitive = Self { vertices, indices };
        primitive.validate()?;
        Ok(primitive)
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of elements a draw call covers.
    pub fn element_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.vertices.len()
        }
    }

    /// The triangles as vertex index triples.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        if self.is_indexed() {
            self.indices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect()
        } else {
            (0..self.vertices.len() as u32 / 3)
                .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
                .collect()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() {
            return Err(Error::InvalidGeometry("no vertices".to_string()));
        }
        if self.element_count() % 3 != 0 {
            return Err(Error::InvalidGeometry(format!(
                "{} elements do not form whole triangles",
                self.element_count()
            )));
        }
        if let Some(index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(Error::InvalidGeometry(format!(
                "index {index} out of range for {} vertices",
                self.vertices.len()
            )));
        }
        Ok(())
    }

    fn quad() -> Self {
        let normal = Vec3::Z;
        Self {
            vertices: vec![
                v(vec3(-0.5, 0.5, 0.0), RED, vec2(0.0, 1.0), normal),
                v(vec3(-0.5, -0.5, 0.0), GREEN, vec2(0.0, 0.0), normal),
                v(vec3(0.5, -0.5, 0.0), BLUE, vec2(1.0, 0.0), normal),
                v(vec3(0.5, 0.5, 0.0), YELLOW, vec2(1.0, 1.0), normal),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    fn triangle() -> Self {
        let normal = Vec3::Z;
        Self {
            vertices: vec![
                v(vec3(-0.5, -0.5, 0.0), RED, vec2(0.0, 1.0), normal),
                v(vec3(0.5, -0.5, 0.0), GREEN, vec2(0.0, 0.0), normal),
                v(vec3(0.0, 0.5, 0.0), BLUE, vec2(1.0, 0.0), normal),
            ],
            indices: vec![0, 1, 2],
        }
    }

    fn pyramid() -> Self {
        let apex = vec3(0.0, 0.5, 0.0);
        let top = vec2(0.5, 1.0);
        let front = Vec3::Z;
        let left = Vec3::NEG_X;
        let back = Vec3::NEG_Z;
        // Kept as authored: not unit length and not perpendicular to the face.
        let right = vec3(1.0, 0.0, 1.0);
        Self {
            vertices: vec![
                v(apex, RED, top, front),
                v(vec3(-0.5, -0.5, 0.5), GREEN, vec2(0.0, 0.0), front),
                v(vec3(0.5, -0.5, 0.5), BLUE, vec2(1.0, 0.0), front),
                v(apex, YELLOW, top, left),
                v(vec3(-0.5, -0.5, -0.5), BLUE, vec2(0.0, 0.0), left),
                v(vec3(-0.5, -0.5, 0.5), BLUE, vec2(1.0, 0.0), left),
                v(apex, YELLOW, top, back),
                v(vec3(0.5, -0.5, -0.5), BLUE, vec2(0.0, 0.0), back),
                v(vec3(-0.5, -0.5, -0.5), BLUE, vec2(1.0, 0.0), back),
                v(apex, YELLOW, top, right),
                v(vec3(0.5, -0.5, 0.5), BLUE, vec2(0.0, 0.0), right),
                v(vec3(0.5, -0.5, -0.5), BLUE, vec2(1.0, 0.0), right),
            ],
            indices: Vec::new(),
        }
    }

    fn cube() -> Self {
        let front = Vec3::Z;
        let back = Vec3::NEG_Z;
        Self {
            vertices: vec![
                v(vec3(-0.5, 0.5, 0.5), RED, vec2(0.0, 1.0), front),
                v(vec3(-0.5, -0.5, 0.5), GREEN, vec2(0.0, 0.0), front),
                v(vec3(0.5, -0.5, 0.5), BLUE, vec2(1.0, 0.0), front),
                v(vec3(0.5, 0.5, 0.5), YELLOW, vec2(1.0, 1.0), front),
                v(vec3(0.5, 0.5, -0.5), RED, vec2(0.0, 1.0), back),
                v(vec3(0.5, -0.5, -0.5), GREEN, vec2(0.0, 0.0), back),
                v(vec3(-0.5, -0.5, -0.5), BLUE, vec2(1.0, 0.0), back),
                v(vec3(-0.5, 0.5, -0.5), YELLOW, vec2(1.0, 1.0), back),
            ],
            indices: vec![
                0, 1, 2, 0, 2, 3, // front
                7, 6, 1, 7, 1, 0, // left
                4, 5, 6, 4, 6, 7, // back
                3, 2, 5, 3, 5, 4, // right
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_have_documented_sizes() {
        let sizes: Vec<(usize, usize)> = Shape::ALL
            .iter()
            .map(|&shape| {
                let p = Primitive::generate(shape);
                (p.vertices.len(), p.indices.len())
            })
            .collect();
        assert_eq!(sizes, vec![(4, 6), (3, 3), (12, 0), (8, 24)]);
    }

    #[test]
    fn generation_is_deterministic_and_in_range() {
        for shape in Shape::ALL {
            let a = Primitive::generate(shape);
            let b = Primitive::generate(shape);
            assert_eq!(a, b, "{shape} changed between calls");
            assert!(a.validate().is_ok(), "{shape} failed validation");
            assert!(
                a.indices.iter().all(|&i| (i as usize) < a.vertices.len()),
                "{shape} has an out of range index"
            );
        }
    }

    #[test]
    fn quad_indices_match_face_list() {
        let quad = Primitive::generate(Shape::Quad);
        assert_eq!(quad.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(quad.triangles(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn cube_triangles_match_face_list() {
        let cube = Primitive::generate(Shape::Cube);
        assert_eq!(cube.indices.len() % 3, 0);
        assert_eq!(
            cube.triangles(),
            vec![
                [0, 1, 2],
                [0, 2, 3],
                [7, 6, 1],
                [7, 1, 0],
                [4, 5, 6],
                [4, 6, 7],
                [3, 2, 5],
                [3, 5, 4],
            ]
        );
    }

    #[test]
    fn front_faces_wind_counter_clockwise() {
        // Seen from +Z, a counter-clockwise triangle has a positive z cross product.
        for shape in [Shape::Quad, Shape::Triangle] {
            let p = Primitive::generate(shape);
            for [a, b, c] in p.triangles() {
                let (a, b, c) = (
                    p.vertices[a as usize].position,
                    p.vertices[b as usize].position,
                    p.vertices[c as usize].position,
                );
                assert!((b - a).cross(c - a).z > 0.0, "{shape} winds clockwise");
            }
        }
    }

    #[test]
    fn pyramid_is_unindexed() {
        let pyramid = Primitive::generate(Shape::Pyramid);
        assert!(!pyramid.is_indexed());
        assert_eq!(pyramid.element_count(), 12);
        assert_eq!(pyramid.triangles().len(), 4);
        assert_eq!(pyramid.vertices[0].position, vec3(0.0, 0.5, 0.0));
        assert_eq!(pyramid.vertices[9].normal, vec3(1.0, 0.0, 1.0));
    }

    #[test]
    fn shape_names_parse() {
        assert_eq!("Cube".parse::<Shape>().unwrap(), Shape::Cube);
        assert_eq!(" quad ".parse::<Shape>().unwrap(), Shape::Quad);
        assert!(matches!(
            "sphere".parse::<Shape>(),
            Err(Error::UnsupportedShape(name)) if name == "sphere"
        ));
    }

    #[test]
    fn raw_geometry_is_validated() {
        let corner = Vertex::new(Vec3::ZERO, RED, Vec2::ZERO, Vec3::Z);
        assert!(Primitive::from_raw(vec![corner; 3], vec![0, 1, 2]).is_ok());
        assert!(Primitive::from_raw(vec![corner; 3], Vec::new()).is_ok());
        assert!(matches!(
            Primitive::from_raw(vec![corner; 3], vec![0, 1, 3]),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Primitive::from_raw(vec![corner; 3], vec![0, 1]),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Primitive::from_raw(vec![corner; 4], Vec::new()),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Primitive::from_raw(Vec::new(), Vec::new()),
            Err(Error::InvalidGeometry(_))
        ));
    }
}
