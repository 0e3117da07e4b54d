//! Scene tree nodes.

use nalgebra::{Matrix4, Point3, Translation3, UnitQuaternion, Vector3};

/// A node in the scene tree: a local transform plus bookkeeping.
///
/// Nodes are assembled once during equipment construction. The local
/// transform is `translation · rotation · scale`; world transforms are
/// composed by [`SceneGraph`](crate::SceneGraph).
///
/// # Example
///
/// ```
/// use scene_graph::TransformNode;
///
/// let node = TransformNode::new("pump/outlet")
///     .with_position(1.0, 2.0, 0.0)
///     .with_euler(0.0, std::f64::consts::FRAC_PI_2, 0.0);
/// assert_eq!(node.id(), "pump/outlet");
/// ```
#[derive(Debug, Clone)]
pub struct TransformNode {
    /// Unique identifier within the scene.
    id: String,

    /// Local translation.
    position: Vector3<f64>,

    /// Local rotation.
    rotation: UnitQuaternion<f64>,

    /// Local scale, per axis.
    scale: Vector3<f64>,

    /// Raw local matrix overriding the components, used for world-anchored
    /// children whose local transform is an inverse that has no
    /// translation/rotation/scale decomposition.
    matrix_override: Option<Matrix4<f64>>,

    /// Parent node id (non-owning).
    parent_id: Option<String>,

    /// Child ids in attachment order. Maintained by the graph.
    pub(crate) children: Vec<String>,

    /// Visibility flag consumed by the view layer.
    visible: bool,
}

impl TransformNode {
    /// Create a node with an identity transform.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            matrix_override: None,
            parent_id: None,
            children: Vec::new(),
            visible: true,
        }
    }

    /// Node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Local translation.
    #[must_use]
    pub const fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    /// Local rotation.
    #[must_use]
    pub const fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    /// Local per-axis scale.
    #[must_use]
    pub const fn scale(&self) -> &Vector3<f64> {
        &self.scale
    }

    /// Parent node id, if any.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Child ids in attachment order.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Whether this node is visible (ignoring ancestors).
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Set the local translation (builder pattern).
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    /// Set the local rotation (builder pattern).
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the local rotation from extrinsic X-Y-Z euler angles in radians
    /// (builder pattern).
    #[must_use]
    pub fn with_euler(mut self, rx: f64, ry: f64, rz: f64) -> Self {
        self.rotation = UnitQuaternion::from_euler_angles(rx, ry, rz);
        self
    }

    /// Set a uniform scale (builder pattern).
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Set a per-axis scale (builder pattern).
    #[must_use]
    pub fn with_scale_xyz(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Set the parent node (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the visibility flag (builder pattern).
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The local transform matrix: `translation · rotation · scale`.
    #[must_use]
    pub fn local_matrix(&self) -> Matrix4<f64> {
        if let Some(matrix) = self.matrix_override {
            return matrix;
        }
        Translation3::from(self.position).to_homogeneous()
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Rotate this node about an explicit pivot in the parent's frame.
    ///
    /// Applies the rotation to both the node's position and orientation in
    /// one closed-form step, so any point of the node coinciding with the
    /// pivot stays exactly fixed. This replaces the
    /// rotate-then-patch-the-position sequences that only keep their fixed
    /// point when the arithmetic happens to line up.
    pub fn rotate_about(&mut self, pivot: Point3<f64>, rotation: UnitQuaternion<f64>) {
        self.position = pivot.coords + rotation * (self.position - pivot.coords);
        self.rotation = rotation * self.rotation;
    }

    /// Install a raw local matrix, bypassing the component transform.
    pub(crate) fn set_matrix_override(&mut self, matrix: Matrix4<f64>) {
        self.matrix_override = Some(matrix);
    }

    /// Set the parent id directly (graph bookkeeping).
    pub(crate) fn set_parent(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_by_default() {
        let node = TransformNode::new("n");
        let m = node.local_matrix();
        assert_relative_eq!(m, Matrix4::identity(), epsilon = 1e-12);
        assert!(node.is_visible());
    }

    #[test]
    fn test_local_matrix_order_is_trs() {
        // Scale must apply before rotation: a point on +X scaled by 2 then
        // rotated 90 degrees about Z lands on +Y at distance 2.
        let node = TransformNode::new("n")
            .with_euler(0.0, 0.0, std::f64::consts::FRAC_PI_2)
            .with_scale_xyz(2.0, 1.0, 1.0);

        let p = node.local_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_keeps_pivot_fixed() {
        let mut node = TransformNode::new("cone").with_position(0.0, 10.0, 0.0);

        // The node origin sits at the pivot: a point at the node origin must
        // not move, however the node is turned.
        let pivot = Point3::new(0.0, 10.0, 0.0);
        let tilt = UnitQuaternion::from_euler_angles(0.0, 0.0, 50.0_f64.to_radians());
        node.rotate_about(pivot, tilt);

        assert_relative_eq!(node.position().y, 10.0, epsilon = 1e-12);
        assert_relative_eq!(node.position().x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_moves_offset_node() {
        let mut node = TransformNode::new("n").with_position(1.0, 0.0, 0.0);
        let half_turn = UnitQuaternion::from_euler_angles(0.0, std::f64::consts::PI, 0.0);
        node.rotate_about(Point3::origin(), half_turn);

        assert_relative_eq!(node.position().x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_euler_matches_quaternion() {
        let node = TransformNode::new("n").with_euler(0.1, 0.2, 0.3);
        let expected = UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3);
        assert_relative_eq!(
            node.rotation().angle_to(&expected),
            0.0,
            epsilon = 1e-12
        );
    }
}
