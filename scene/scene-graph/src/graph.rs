//! The flat-arena scene container.

use hashbrown::{HashMap, HashSet};
use nalgebra::{Matrix4, Point3};
use tracing::warn;

use crate::error::{SceneError, SceneResult};
use crate::node::TransformNode;

/// A scene of [`TransformNode`]s keyed by id.
///
/// The graph owns every node; hierarchy is expressed through parent ids, and
/// world transforms are composed on demand by walking the parent chain. The
/// node graph is expected to be a forest; [`SceneGraph::validate`] reports
/// violations and the parent walks are cycle-safe either way.
///
/// # Example
///
/// ```
/// use scene_graph::{SceneGraph, TransformNode};
///
/// let mut scene = SceneGraph::new();
/// scene.add_node(TransformNode::new("room").with_position(100.0, 0.0, 0.0)).unwrap();
/// scene
///     .add_node(TransformNode::new("room/pump").with_parent("room").with_position(5.0, 0.0, 0.0))
///     .unwrap();
///
/// let world = scene.world_position("room/pump").unwrap();
/// assert_eq!(world.x, 105.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: HashMap<String, TransformNode>,
}

impl SceneGraph {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Node management
    // =========================================================================

    /// Add a node to the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if a node with the same id already exists, or the
    /// node names a parent that does not.
    pub fn add_node(&mut self, node: TransformNode) -> SceneResult<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(SceneError::DuplicateNode {
                id: node.id().to_string(),
            });
        }
        if let Some(parent_id) = node.parent_id() {
            if !self.nodes.contains_key(parent_id) {
                return Err(SceneError::ParentNotFound {
                    id: node.id().to_string(),
                    parent_id: parent_id.to_string(),
                });
            }
        }

        let id = node.id().to_string();
        if let Some(parent_id) = node.parent_id().map(String::from)
            && let Some(parent) = self.nodes.get_mut(&parent_id)
        {
            parent.children.push(id.clone());
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Add a child of `parent_id` whose local matrix is the inverse of the
    /// parent's world matrix.
    ///
    /// Geometry attached under the returned node can carry world-space
    /// coordinates while living inside an equipment's group: the parent's
    /// own transform is cancelled instead of being applied twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent does not exist, the id is taken, or
    /// the parent's world transform cannot be inverted.
    pub fn add_world_anchor(
        &mut self,
        parent_id: &str,
        id: impl Into<String>,
    ) -> SceneResult<String> {
        let id = id.into();
        let world = self
            .world_matrix(parent_id)
            .ok_or_else(|| SceneError::NodeNotFound {
                id: parent_id.to_string(),
            })?;
        let inverse = world
            .try_inverse()
            .ok_or_else(|| SceneError::NonInvertibleTransform {
                id: parent_id.to_string(),
            })?;

        let mut node = TransformNode::new(id.clone()).with_parent(parent_id);
        node.set_matrix_override(inverse);
        self.add_node(node)?;
        Ok(id)
    }

    /// Remove a node, returning it.
    ///
    /// Children are detached and become roots; ports resolving through the
    /// removed node will report missing from then on.
    pub fn remove_node(&mut self, id: &str) -> Option<TransformNode> {
        let node = self.nodes.remove(id)?;

        if let Some(parent_id) = node.parent_id()
            && let Some(parent) = self.nodes.get_mut(parent_id)
        {
            parent.children.retain(|child| child != id);
        }
        for child_id in node.children() {
            if let Some(child) = self.nodes.get_mut(child_id) {
                child.set_parent(None);
            }
        }

        Some(node)
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TransformNode> {
        self.nodes.get(id)
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut TransformNode> {
        self.nodes.get_mut(id)
    }

    /// Whether a node exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// The composed world matrix of a node, identity at a root.
    ///
    /// Returns `None` if the node does not exist or its ancestor chain
    /// contains a cycle.
    #[must_use]
    pub fn world_matrix(&self, id: &str) -> Option<Matrix4<f64>> {
        let mut chain: Vec<&TransformNode> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(id);

        while let Some(current_id) = current {
            if !visited.insert(current_id) {
                warn!(node = current_id, "Cycle in ancestor chain");
                return None;
            }
            let node = self.nodes.get(current_id)?;
            chain.push(node);
            current = node.parent_id();
        }

        let mut matrix = Matrix4::identity();
        for node in chain.iter().rev() {
            matrix *= node.local_matrix();
        }
        Some(matrix)
    }

    /// World position of a node's origin.
    #[must_use]
    pub fn world_position(&self, id: &str) -> Option<Point3<f64>> {
        self.world_matrix(id)
            .map(|m| m.transform_point(&Point3::origin()))
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Set a node's visibility flag. Returns `false` if the node is missing.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.set_visible(visible);
                true
            }
            None => false,
        }
    }

    /// Effective visibility: the node and every ancestor must be visible.
    #[must_use]
    pub fn is_visible_world(&self, id: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(id);
        while let Some(current_id) = current {
            if !visited.insert(current_id) {
                return false;
            }
            let Some(node) = self.nodes.get(current_id) else {
                return false;
            };
            if !node.is_visible() {
                return false;
            }
            current = node.parent_id();
        }
        true
    }

    // =========================================================================
    // Traversal & validation
    // =========================================================================

    /// Ids of the subtree under `id` (excluding `id`), depth-first in child
    /// attachment order.
    #[must_use]
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = Vec::new();
        if let Some(node) = self.nodes.get(id) {
            for child in node.children().iter().rev() {
                stack.push(child);
            }
        }
        let mut guard: HashSet<&str> = HashSet::new();
        while let Some(current) = stack.pop() {
            if !guard.insert(current) {
                continue;
            }
            out.push(current.to_string());
            if let Some(node) = self.nodes.get(current) {
                for child in node.children().iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Check structural invariants without mutating anything.
    #[must_use]
    pub fn validate(&self) -> SceneValidation {
        let mut result = SceneValidation::default();

        for node in self.nodes.values() {
            if let Some(parent_id) = node.parent_id()
                && !self.nodes.contains_key(parent_id)
            {
                result
                    .orphan_parents
                    .push((node.id().to_string(), parent_id.to_string()));
            }
            if self.has_cycle_from(node.id()) {
                result.circular.push(node.id().to_string());
            }
        }
        result.circular.sort();
        result
    }

    fn has_cycle_from(&self, id: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(id);
        while let Some(current_id) = current {
            if !visited.insert(current_id) {
                return true;
            }
            current = self.nodes.get(current_id).and_then(TransformNode::parent_id);
        }
        false
    }
}

/// Structural problems found by [`SceneGraph::validate`].
#[derive(Debug, Clone, Default)]
pub struct SceneValidation {
    /// `(node, missing parent)` pairs.
    pub orphan_parents: Vec<(String, String)>,
    /// Nodes whose ancestor chain loops.
    pub circular: Vec<String>,
}

impl SceneValidation {
    /// Whether no problems were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.orphan_parents.is_empty() && self.circular.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn nested_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        scene
            .add_node(TransformNode::new("room").with_position(100.0, 0.0, -50.0))
            .unwrap();
        scene
            .add_node(
                TransformNode::new("room/tank")
                    .with_parent("room")
                    .with_position(10.0, 0.0, 5.0)
                    .with_euler(0.0, std::f64::consts::FRAC_PI_2, 0.0),
            )
            .unwrap();
        scene
            .add_node(
                TransformNode::new("room/tank/nozzle")
                    .with_parent("room/tank")
                    .with_position(2.0, 3.0, 0.0)
                    .with_scale(2.0),
            )
            .unwrap();
        scene
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("a")).unwrap();
        assert!(matches!(
            scene.add_node(TransformNode::new("a")),
            Err(SceneError::DuplicateNode { .. })
        ));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut scene = SceneGraph::new();
        assert!(matches!(
            scene.add_node(TransformNode::new("child").with_parent("ghost")),
            Err(SceneError::ParentNotFound { .. })
        ));
    }

    #[test]
    fn test_world_matrix_composes_ancestors() {
        let scene = nested_scene();

        // Invariant: world(n) == world(parent) * local(n).
        for id in ["room/tank", "room/tank/nozzle"] {
            let node = scene.get(id).unwrap();
            let parent = node.parent_id().unwrap();
            let expected = scene.world_matrix(parent).unwrap() * node.local_matrix();
            let actual = scene.world_matrix(id).unwrap();
            assert_relative_eq!(actual, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_world_matrix_identity_at_root() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("root")).unwrap();
        assert_relative_eq!(
            scene.world_matrix("root").unwrap(),
            Matrix4::identity(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_world_position_through_rotation() {
        let scene = nested_scene();
        // tank is rotated 90 degrees about Y: its local +X maps to world -Z.
        let p = scene.world_position("room/tank/nozzle").unwrap();
        assert_relative_eq!(p.x, 110.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, -47.0, epsilon = 1e-9);
    }

    #[test]
    fn test_children_track_attachment_order() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("root")).unwrap();
        for name in ["b", "a", "c"] {
            scene
                .add_node(TransformNode::new(name).with_parent("root"))
                .unwrap();
        }
        assert_eq!(scene.get("root").unwrap().children(), ["b", "a", "c"]);
    }

    #[test]
    fn test_remove_node_detaches_children() {
        let mut scene = nested_scene();
        let removed = scene.remove_node("room/tank");
        assert!(removed.is_some());
        assert!(scene.get("room/tank/nozzle").unwrap().parent_id().is_none());
        assert!(scene.get("room").unwrap().children().is_empty());
    }

    #[test]
    fn test_world_anchor_cancels_parent_transform() {
        let mut scene = nested_scene();
        let anchor = scene.add_world_anchor("room/tank", "room/tank/conduits").unwrap();

        let m = scene.world_matrix(&anchor).unwrap();
        assert_relative_eq!(m, Matrix4::identity(), epsilon = 1e-9);
    }

    #[test]
    fn test_world_anchor_rejects_zero_scale() {
        let mut scene = SceneGraph::new();
        scene
            .add_node(TransformNode::new("flat").with_scale_xyz(1.0, 0.0, 1.0))
            .unwrap();
        assert!(matches!(
            scene.add_world_anchor("flat", "flat/anchor"),
            Err(SceneError::NonInvertibleTransform { .. })
        ));
    }

    #[test]
    fn test_cycle_detected_not_hung() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("a")).unwrap();
        scene
            .add_node(TransformNode::new("b").with_parent("a"))
            .unwrap();
        // Force a cycle through the mutable accessor.
        scene.get_mut("a").unwrap().set_parent(Some("b".to_string()));

        assert!(scene.world_matrix("a").is_none());
        let validation = scene.validate();
        assert!(!validation.is_valid());
        assert_eq!(validation.circular, ["a", "b"]);
    }

    #[test]
    fn test_validate_clean_scene() {
        assert!(nested_scene().validate().is_valid());
    }

    #[test]
    fn test_descendants_depth_first() {
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("r")).unwrap();
        scene.add_node(TransformNode::new("r/a").with_parent("r")).unwrap();
        scene.add_node(TransformNode::new("r/a/x").with_parent("r/a")).unwrap();
        scene.add_node(TransformNode::new("r/b").with_parent("r")).unwrap();

        assert_eq!(scene.descendants("r"), ["r/a", "r/a/x", "r/b"]);
    }

    #[test]
    fn test_visibility_inherited() {
        let mut scene = nested_scene();
        assert!(scene.is_visible_world("room/tank/nozzle"));

        scene.set_visible("room", false);
        assert!(!scene.is_visible_world("room/tank/nozzle"));
        // The node's own flag is untouched.
        assert!(scene.get("room/tank/nozzle").unwrap().is_visible());
    }

    #[test]
    fn test_rotate_about_world_fixed_point() {
        // A cone hanging under a manifold: rotate it half a turn then tilt it
        // toward the center while its top anchor must stay put.
        let mut scene = SceneGraph::new();
        scene.add_node(TransformNode::new("cone").with_position(3.0, 8.0, 0.0)).unwrap();

        let top_anchor = Point3::new(3.0, 10.0, 0.0);
        let before = scene.world_matrix("cone").unwrap().transform_point(
            &Point3::new(0.0, 2.0, 0.0),
        );
        assert_relative_eq!((before - top_anchor).norm(), 0.0, epsilon = 1e-12);

        // Flip the cone upside down about its top anchor: the same material
        // point must still sit at the anchor afterwards.
        let flip = UnitQuaternion::from_euler_angles(std::f64::consts::PI, 0.0, 0.0);
        scene.get_mut("cone").unwrap().rotate_about(top_anchor, flip);
        let after = scene.world_matrix("cone").unwrap().transform_point(
            &Point3::new(0.0, 2.0, 0.0),
        );
        assert_relative_eq!((after - top_anchor).norm(), 0.0, epsilon = 1e-9);
    }
}
