//! View state vocabulary.

/// The display mode of one equipment instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewState {
    /// The exterior shell. Initial state of every instance.
    #[default]
    Exterior,
    /// The interior mechanical layout.
    Interior,
}

/// Which view states a tagged scene group is visible in.
///
/// External conduits get tagged with this: a slurry line feeding the tower
/// reads as "passing through the wall" and stays visible inside, while a
/// roof vent only makes sense from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VisibleIn {
    /// Visible only in the exterior view.
    Exterior,
    /// Visible only in the interior view.
    Interior,
    /// Visible in both views.
    Both,
}

impl VisibleIn {
    /// Whether a group with this tag is visible in the given state.
    #[must_use]
    pub const fn visible_in(self, state: ViewState) -> bool {
        match self {
            Self::Both => true,
            Self::Exterior => matches!(state, ViewState::Exterior),
            Self::Interior => matches!(state, ViewState::Interior),
        }
    }
}
