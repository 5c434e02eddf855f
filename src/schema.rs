//! Request and response bodies for the agent endpoints.
//!
//! DESIGN
//! ======
//! The editor owns the canvas document; these types are per-request
//! snapshots and never persisted. Serde does the structural decoding, and a
//! `validate` pass enforces the semantic invariants JSON cannot express
//! (finite numbers, positive extents, non-empty ids). Any failure collapses
//! to the same generic 400 at the route layer with no partial processing.

use serde::{Deserialize, Serialize};

use crate::agent::intent::{Align, Axis, Distribute, LayoutTarget, TransformAction};

// =============================================================================
// GEOMETRY
// =============================================================================

/// Visible page-space rectangle, supplied fresh per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Viewport {
    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.x + self.w / 2.0, y: self.y + self.h / 2.0 }
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        ViewportSize { w: self.w, h: self.h }
    }

    fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportSize {
    pub w: f64,
    pub h: f64,
}

impl ViewportSize {
    fn is_valid(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

/// Axis-aligned shape bounds in page space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// Snapshot of one editor shape. Ids are editor-owned opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    pub bounds: Bounds,
}

impl Shape {
    fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.kind.is_empty() && self.bounds.is_valid()
    }
}

/// Reduced shape snapshot used by the layout endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutShape {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub bounds: Bounds,
}

impl LayoutShape {
    fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.kind.is_empty() && self.bounds.is_valid()
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Request failed semantic validation; the route answers a generic 400.
#[derive(Debug, thiserror::Error)]
#[error("invalid request: {0}")]
pub struct InvalidRequest(pub &'static str);

/// Semantic validation applied after structural decoding.
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`InvalidRequest`] when a field violates the data-model
    /// invariants (non-finite numbers, empty ids, empty message, ...).
    fn validate(&self) -> Result<(), InvalidRequest>;
}

/// `POST /api/canvas-agent` — orchestrated multi-step request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    pub message: String,
    pub viewport_size: ViewportSize,
    pub visible_center: Point,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub selection_ids: Vec<String>,
}

impl Validate for AgentRequest {
    fn validate(&self) -> Result<(), InvalidRequest> {
        if self.message.is_empty() {
            return Err(InvalidRequest("empty message"));
        }
        if !self.viewport_size.is_valid() {
            return Err(InvalidRequest("bad viewport size"));
        }
        if !self.visible_center.is_valid() {
            return Err(InvalidRequest("bad visible center"));
        }
        if !self.shapes.iter().all(Shape::is_valid) {
            return Err(InvalidRequest("bad shape"));
        }
        Ok(())
    }
}

/// `POST /api/shape-llm` — single-shape placement request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub message: String,
    pub viewport: Viewport,
    #[serde(default)]
    pub shape_hint: Option<String>,
}

impl Validate for CreateRequest {
    fn validate(&self) -> Result<(), InvalidRequest> {
        if self.message.is_empty() {
            return Err(InvalidRequest("empty message"));
        }
        if !self.viewport.is_valid() {
            return Err(InvalidRequest("bad viewport"));
        }
        Ok(())
    }
}

/// Client-parsed hints forwarded to the transform endpoint. Shape and color
/// stay free-form strings — matching against shape snapshots is substring
/// based, not enum based.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TransformAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// `POST /api/shape-llm/transform` — single-shape transform request.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformRequest {
    pub message: String,
    pub viewport: Viewport,
    #[serde(default)]
    pub hints: Option<TransformHints>,
    pub shapes: Vec<Shape>,
}

impl Validate for TransformRequest {
    fn validate(&self) -> Result<(), InvalidRequest> {
        if self.message.is_empty() {
            return Err(InvalidRequest("empty message"));
        }
        if !self.viewport.is_valid() {
            return Err(InvalidRequest("bad viewport"));
        }
        if self.shapes.is_empty() {
            return Err(InvalidRequest("no shapes"));
        }
        if !self.shapes.iter().all(Shape::is_valid) {
            return Err(InvalidRequest("bad shape"));
        }
        Ok(())
    }
}

/// Client-parsed hints forwarded to the layout endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribute: Option<Distribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<LayoutTarget>,
}

/// `POST /api/canvas-agent/layout` — layout distribution request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub message: String,
    pub viewport: Viewport,
    #[serde(default)]
    pub hints: Option<LayoutHints>,
    pub shapes: Vec<LayoutShape>,
    #[serde(default)]
    pub selection_ids: Option<Vec<String>>,
}

impl Validate for LayoutRequest {
    fn validate(&self) -> Result<(), InvalidRequest> {
        if self.message.is_empty() {
            return Err(InvalidRequest("empty message"));
        }
        if !self.viewport.is_valid() {
            return Err(InvalidRequest("bad viewport"));
        }
        if !self.shapes.iter().all(LayoutShape::is_valid) {
            return Err(InvalidRequest("bad shape"));
        }
        if let Some(hints) = &self.hints {
            if let Some(gap) = hints.gap_px {
                if gap == 0 || gap > crate::agent::tools::MAX_GAP_PX {
                    return Err(InvalidRequest("gap out of range"));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// One absolute move emitted by the layout endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMove {
    pub id: String,
    pub to: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub moves: Vec<LayoutMove>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<Delta>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeSpec {
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeDelta {
    pub dw: f64,
    pub dh: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResizeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<SizeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<SizeDelta>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RotateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<crate::agent::intent::AngleUnit>,
}

/// Transform endpoint response: one action against one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub action: TransformAction,
    pub shape_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "move")]
    pub move_spec: Option<MoveSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize: Option<ResizeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<RotateSpec>,
}

/// Create endpoint response / model placement proposal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}
