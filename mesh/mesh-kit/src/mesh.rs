//! Core triangle mesh representation.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// A mesh vertex: position plus unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in the mesh's frame.
    pub position: Point3<f64>,
    /// Unit normal. Zero until computed for generator-built meshes.
    pub normal: Vector3<f64>,
}

impl Vertex {
    /// Create a vertex with a zero normal.
    #[must_use]
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
        }
    }

    /// Create a vertex with an explicit normal.
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// An indexed triangle mesh.
///
/// Faces index into `vertices` counter-clockwise when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_kit::{TriMesh, Vertex};
/// use nalgebra::Point3;
///
/// let mut mesh = TriMesh::new();
/// mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
/// mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
/// mesh.vertices.push(Vertex::new(Point3::new(0.0, 1.0, 0.0)));
/// mesh.faces.push([0, 1, 2]);
/// mesh.recompute_normals();
///
/// assert!((mesh.vertices[0].normal.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex list.
    pub vertices: Vec<Vertex>,
    /// Triangle list, indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the mesh has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Append another mesh, offsetting its face indices.
    pub fn merge(&mut self, other: &TriMesh) {
        let offset = u32::try_from(self.vertices.len()).unwrap_or(u32::MAX);
        self.vertices.extend_from_slice(&other.vertices);
        for face in &other.faces {
            self.faces.push([
                face[0].saturating_add(offset),
                face[1].saturating_add(offset),
                face[2].saturating_add(offset),
            ]);
        }
    }

    /// A copy of this mesh with positions and normals transformed.
    ///
    /// Normals are transformed with the inverse-transpose of the linear part
    /// so non-uniform scaling keeps them perpendicular to the surface.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Self {
        let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear
            .try_inverse()
            .map_or(linear, |inverse| inverse.transpose());

        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                let normal = (normal_matrix * v.normal)
                    .try_normalize(f64::EPSILON)
                    .unwrap_or(v.normal);
                Vertex::with_normal(matrix.transform_point(&v.position), normal)
            })
            .collect();

        Self {
            vertices,
            faces: self.faces.clone(),
        }
    }

    /// Recompute vertex normals as the normalized sum of adjacent face
    /// normals, weighted by face area.
    ///
    /// Must be called after any deformation that moves vertices (the hose sag
    /// does), otherwise lighting shows the old surface.
    pub fn recompute_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = Vector3::zeros();
        }
        for face in &self.faces {
            let [a, b, c] = face.map(|i| i as usize);
            if a >= self.vertices.len() || b >= self.vertices.len() || c >= self.vertices.len() {
                continue;
            }
            let pa = self.vertices[a].position;
            // Cross product magnitude is twice the face area, which gives the
            // area weighting for free.
            let weighted =
                (self.vertices[b].position - pa).cross(&(self.vertices[c].position - pa));
            self.vertices[a].normal += weighted;
            self.vertices[b].normal += weighted;
            self.vertices[c].normal += weighted;
        }
        for v in &mut self.vertices {
            v.normal = v.normal.try_normalize(f64::EPSILON).unwrap_or(Vector3::y());
        }
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty
    /// vertex list.
    #[must_use]
    pub fn aabb(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices {
            min.x = min.x.min(v.position.x);
            min.y = min.y.min(v.position.y);
            min.z = min.z.min(v.position.z);
            max.x = max.x.max(v.position.x);
            max.y = max.y.max(v.position.y);
            max.z = max.z.max(v.position.z);
        }
        Some((min, max))
    }
}
