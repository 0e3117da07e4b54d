//! Built conduit geometry: placed segments and their meshes.

use mesh_kit::TriMesh;
use nalgebra::{Point3, UnitQuaternion};

use crate::color::Color;

/// Shape and dimensions of one placed segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentShape {
    /// A straight circular cylinder.
    Cylinder {
        /// Cross-section radius.
        radius: f64,
        /// Length along the segment axis.
        length: f64,
    },
    /// A circular tube swept along a curved centerline.
    Tube {
        /// Cross-section radius.
        radius: f64,
        /// Arc length of the swept centerline.
        length: f64,
    },
    /// A loft between two cross-sections of different shape.
    MorphRing {
        /// `(width, height)` of the section at the segment start.
        section_start: (f64, f64),
        /// `(width, height)` of the section at the segment end.
        section_end: (f64, f64),
        /// Length along the segment's arc.
        length: f64,
    },
    /// A thin annular band around a pipe.
    Ring {
        /// Centerline radius of the band.
        radius: f64,
        /// Band thickness.
        band: f64,
    },
    /// A rectangular solid.
    Panel {
        /// Extents along the oriented x, y, z axes.
        extents: [f64; 3],
    },
}

/// What a segment is for. Lets callers pick out flanges or flow cores
/// without guessing from dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    /// The conduit body itself.
    Body,
    /// The inner wall of a double-walled hose.
    InnerWall,
    /// The cosmetic flow-direction core.
    FlowCore,
    /// A connection flange at an endpoint.
    Flange,
    /// A longitudinal stiffening rib.
    Rib,
    /// An annular reinforcement ring.
    ReinforcementRing,
    /// Support steel: bracket, post or floor pad.
    Support,
}

/// One placed primitive of a built conduit.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitSegment {
    shape: SegmentShape,
    role: SegmentRole,
    center: Point3<f64>,
    orientation: UnitQuaternion<f64>,
    color: Color,
    mesh: TriMesh,
}

impl ConduitSegment {
    /// Assemble a segment.
    #[must_use]
    pub fn new(
        shape: SegmentShape,
        role: SegmentRole,
        center: Point3<f64>,
        orientation: UnitQuaternion<f64>,
        color: Color,
        mesh: TriMesh,
    ) -> Self {
        Self {
            shape,
            role,
            center,
            orientation,
            color,
            mesh,
        }
    }

    /// Shape and dimensions.
    #[must_use]
    pub const fn shape(&self) -> &SegmentShape {
        &self.shape
    }

    /// Role within the conduit.
    #[must_use]
    pub const fn role(&self) -> SegmentRole {
        self.role
    }

    /// Segment center in the conduit's frame.
    #[must_use]
    pub const fn center(&self) -> &Point3<f64> {
        &self.center
    }

    /// Orientation mapping the canonical +Y axis onto the segment axis.
    #[must_use]
    pub const fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.orientation
    }

    /// Render color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Triangle mesh of this segment.
    #[must_use]
    pub const fn mesh(&self) -> &TriMesh {
        &self.mesh
    }
}

/// Where a built conduit hangs in the scene.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attachment {
    /// Under the injected world root; coordinates are world coordinates.
    #[default]
    WorldRoot,
    /// Under an equipment's local group, through a counter-transform anchor
    /// so the equipment's own transform is not applied twice.
    EquipmentLocal(
        /// Node id of the owning equipment's root.
        String,
    ),
}

/// The renderable result of building one conduit.
///
/// Built once and immutable afterwards: accessors only. The segment list is
/// ordered along the flow direction of the connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitGeometry {
    id: String,
    segments: Vec<ConduitSegment>,
    path_length: f64,
    attachment: Attachment,
}

impl ConduitGeometry {
    /// Assemble built geometry.
    #[must_use]
    pub fn new(id: impl Into<String>, segments: Vec<ConduitSegment>, path_length: f64) -> Self {
        Self {
            id: id.into(),
            segments,
            path_length,
            attachment: Attachment::default(),
        }
    }

    /// Choose the attachment (builder pattern).
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = attachment;
        self
    }

    /// Conduit id, matching the spec it was built from.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Segments in path order.
    #[must_use]
    pub fn segments(&self) -> &[ConduitSegment] {
        &self.segments
    }

    /// Segments filtered by role.
    pub fn segments_with_role(
        &self,
        role: SegmentRole,
    ) -> impl Iterator<Item = &ConduitSegment> {
        self.segments.iter().filter(move |s| s.role() == role)
    }

    /// Arc length of the centerline path.
    #[must_use]
    pub const fn path_length(&self) -> f64 {
        self.path_length
    }

    /// Where this conduit is attached.
    #[must_use]
    pub const fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// All segment meshes merged into one, for consumers that want a single
    /// buffer per conduit.
    #[must_use]
    pub fn merged_mesh(&self) -> TriMesh {
        let mut merged = TriMesh::new();
        for segment in &self.segments {
            merged.merge(segment.mesh());
        }
        merged
    }
}
