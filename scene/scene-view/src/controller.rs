//! The per-instance view state machine.

use scene_graph::{SceneGraph, SceneResult};
use tracing::{debug, warn};

use crate::state::{ViewState, VisibleIn};

type InteriorBuilder = Box<dyn FnOnce(&mut SceneGraph) -> SceneResult<String> + Send>;

/// Two-state visibility machine for one equipment instance.
///
/// Owns the instance's current [`ViewState`] and the scene group ids whose
/// visibility the state implies:
///
/// - the exterior group (shell, platforms, ladders)
/// - the interior group, built lazily on the first interior entry and
///   memoized for every toggle after that
/// - ghost groups: translucent exterior outlines shown only inside, for
///   spatial orientation
/// - signage groups: ground-level labels hidden inside
/// - external conduit groups, each tagged with the states it belongs to
///
/// Both transitions are total: a missing group id is logged and skipped, the
/// remaining groups still switch. Re-entering the current state is a no-op.
pub struct ViewStateController {
    state: ViewState,
    exterior_group: String,
    interior_group: Option<String>,
    interior_builder: Option<InteriorBuilder>,
    ghost_groups: Vec<String>,
    signage_groups: Vec<String>,
    external_conduits: Vec<(String, VisibleIn)>,
}

impl std::fmt::Debug for ViewStateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateController")
            .field("state", &self.state)
            .field("exterior_group", &self.exterior_group)
            .field("interior_group", &self.interior_group)
            .field("pending_builder", &self.interior_builder.is_some())
            .field("ghost_groups", &self.ghost_groups)
            .field("signage_groups", &self.signage_groups)
            .field("external_conduits", &self.external_conduits)
            .finish()
    }
}

impl ViewStateController {
    /// Create a controller in the exterior state.
    #[must_use]
    pub fn new(exterior_group: impl Into<String>) -> Self {
        Self {
            state: ViewState::Exterior,
            exterior_group: exterior_group.into(),
            interior_group: None,
            interior_builder: None,
            ghost_groups: Vec::new(),
            signage_groups: Vec::new(),
            external_conduits: Vec::new(),
        }
    }

    /// Provide the lazy interior constructor (builder pattern).
    ///
    /// The closure runs at most once, on the first interior entry, and must
    /// return the id of the interior group it added to the scene (hidden;
    /// the controller shows it as part of the transition).
    #[must_use]
    pub fn with_interior_builder(
        mut self,
        builder: impl FnOnce(&mut SceneGraph) -> SceneResult<String> + Send + 'static,
    ) -> Self {
        self.interior_builder = Some(Box::new(builder));
        self
    }

    /// Use an already-built interior group (builder pattern).
    #[must_use]
    pub fn with_interior_group(mut self, id: impl Into<String>) -> Self {
        self.interior_group = Some(id.into());
        self
    }

    /// Register a ghost overlay group, visible only in the interior view.
    pub fn add_ghost_group(&mut self, id: impl Into<String>) {
        self.ghost_groups.push(id.into());
    }

    /// Register a signage group, hidden in the interior view.
    pub fn add_signage_group(&mut self, id: impl Into<String>) {
        self.signage_groups.push(id.into());
    }

    /// Tag an external conduit group with the states it is visible in.
    pub fn tag_external_conduit(&mut self, id: impl Into<String>, visible_in: VisibleIn) {
        self.external_conduits.push((id.into(), visible_in));
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// Id of the exterior group.
    #[must_use]
    pub fn exterior_group(&self) -> &str {
        &self.exterior_group
    }

    /// Id of the interior group, once built.
    #[must_use]
    pub fn interior_group(&self) -> Option<&str> {
        self.interior_group.as_deref()
    }

    /// Whether the interior has been constructed yet.
    #[must_use]
    pub const fn is_interior_built(&self) -> bool {
        self.interior_group.is_some()
    }

    /// Switch to the interior view.
    ///
    /// On the first entry the interior builder runs and its group id is
    /// memoized; afterwards the cached group is reused. Re-invoking while
    /// already interior is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only if the interior builder itself fails; the state
    /// is left unchanged in that case.
    pub fn show_interior(&mut self, scene: &mut SceneGraph) -> SceneResult<()> {
        if self.state == ViewState::Interior {
            return Ok(());
        }
        if self.interior_group.is_none()
            && let Some(builder) = self.interior_builder.take()
        {
            let id = builder(scene)?;
            debug!(group = %id, "Interior group built");
            self.interior_group = Some(id);
        }
        self.state = ViewState::Interior;
        self.apply(scene);
        Ok(())
    }

    /// Switch to the exterior view. Exact inverse of
    /// [`ViewStateController::show_interior`]; re-invoking while already
    /// exterior is a no-op.
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` keeps the two transitions symmetric.
    pub fn show_exterior(&mut self, scene: &mut SceneGraph) -> SceneResult<()> {
        if self.state == ViewState::Exterior {
            return Ok(());
        }
        self.state = ViewState::Exterior;
        self.apply(scene);
        Ok(())
    }

    /// Push the current state's visibility configuration into the scene.
    pub fn apply(&self, scene: &mut SceneGraph) {
        let interior = self.state == ViewState::Interior;

        self.set_group(scene, &self.exterior_group, !interior);
        if let Some(ref id) = self.interior_group {
            self.set_group(scene, id, interior);
        }
        for id in &self.ghost_groups {
            self.set_group(scene, id, interior);
        }
        for id in &self.signage_groups {
            self.set_group(scene, id, !interior);
        }
        for (id, tag) in &self.external_conduits {
            self.set_group(scene, id, tag.visible_in(self.state));
        }
    }

    fn set_group(&self, scene: &mut SceneGraph, id: &str, visible: bool) {
        if !scene.set_visible(id, visible) {
            warn!(group = id, "View group missing from scene");
        }
    }
}
