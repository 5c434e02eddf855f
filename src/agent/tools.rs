//! Tool schema — the closed operation vocabulary and its validator.
//!
//! DESIGN
//! ======
//! Every candidate operation, whether it came from the heuristic resolver or
//! the language model, passes through the same per-step validation. A
//! malformed step is dropped silently; sibling steps still execute. Size
//! bearing steps (addShape, resizeShape.to) are clamped into
//! `[MIN_SIZE, container dimension]` before schema checks, so out-of-range
//! sizes are corrected rather than rejected. Steps that name a shape id must
//! reference an id present in the request snapshot — ids introduced by an
//! earlier addShape idHint in the same plan count as present for later steps.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::intent::{Align, AngleUnit, Axis, LayoutTarget};
use crate::schema::{Delta, Point, SizeDelta, SizeSpec, ViewportSize};

/// Smallest width/height any emitted operation may carry.
pub const MIN_SIZE: f64 = 8.0;

/// Upper bound on an explicit layout gap, in pixels.
pub const MAX_GAP_PX: u32 = 2000;

// =============================================================================
// VOCABULARY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolName {
    #[serde(rename = "addShape")]
    AddShape,
    #[serde(rename = "updateShape")]
    UpdateShape,
    #[serde(rename = "moveShapes")]
    MoveShapes,
    #[serde(rename = "resizeShape")]
    ResizeShape,
    #[serde(rename = "rotateShape")]
    RotateShape,
    #[serde(rename = "layoutDistribute")]
    LayoutDistribute,
    #[serde(rename = "deleteShapes")]
    DeleteShapes,
}

impl ToolName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddShape => "addShape",
            Self::UpdateShape => "updateShape",
            Self::MoveShapes => "moveShapes",
            Self::ResizeShape => "resizeShape",
            Self::RotateShape => "rotateShape",
            Self::LayoutDistribute => "layoutDistribute",
            Self::DeleteShapes => "deleteShapes",
        }
    }
}

/// One raw candidate step. An unknown tool name fails deserialization of the
/// whole envelope, which rejects a model plan outright; argument problems are
/// handled later, per step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub tool: ToolName,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl Step {
    #[must_use]
    pub fn new(tool: ToolName, args: serde_json::Value) -> Self {
        Self { tool, args }
    }
}

// =============================================================================
// VALIDATED ARGUMENTS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
struct AddShapeRaw {
    #[serde(default, rename = "idHint")]
    id_hint: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    geo: Option<String>,
    x: f64,
    y: f64,
    #[serde(default)]
    w: Option<f64>,
    #[serde(default)]
    h: Option<f64>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddShapeArgs {
    #[serde(rename = "idHint", skip_serializing_if = "Option::is_none")]
    pub id_hint: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<String>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShapeArgs {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<UpdateProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<Delta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveShapesArgs {
    pub moves: Vec<MoveItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeShapeArgs {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<SizeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<SizeDelta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotateShapeArgs {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<f64>,
    /// Degrees when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<AngleUnit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDistributeArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(default)]
    pub axis: Axis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<LayoutTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteShapesArgs {
    pub ids: Vec<String>,
}

/// A step whose arguments passed clamping and schema validation.
#[derive(Debug, Clone)]
pub enum ValidatedStep {
    AddShape(AddShapeArgs),
    UpdateShape(UpdateShapeArgs),
    MoveShapes(MoveShapesArgs),
    ResizeShape(ResizeShapeArgs),
    RotateShape(RotateShapeArgs),
    LayoutDistribute(LayoutDistributeArgs),
    DeleteShapes(DeleteShapesArgs),
}

impl ValidatedStep {
    #[must_use]
    pub fn tool(&self) -> ToolName {
        match self {
            Self::AddShape(_) => ToolName::AddShape,
            Self::UpdateShape(_) => ToolName::UpdateShape,
            Self::MoveShapes(_) => ToolName::MoveShapes,
            Self::ResizeShape(_) => ToolName::ResizeShape,
            Self::RotateShape(_) => ToolName::RotateShape,
            Self::LayoutDistribute(_) => ToolName::LayoutDistribute,
            Self::DeleteShapes(_) => ToolName::DeleteShapes,
        }
    }

    /// Serialize the validated arguments back into the wire payload.
    ///
    /// # Errors
    ///
    /// Returns a serde error if serialization fails (it cannot for these
    /// types, but the caller drops the step rather than aborting the plan).
    pub fn args_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::AddShape(a) => serde_json::to_value(a),
            Self::UpdateShape(a) => serde_json::to_value(a),
            Self::MoveShapes(a) => serde_json::to_value(a),
            Self::ResizeShape(a) => serde_json::to_value(a),
            Self::RotateShape(a) => serde_json::to_value(a),
            Self::LayoutDistribute(a) => serde_json::to_value(a),
            Self::DeleteShapes(a) => serde_json::to_value(a),
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("malformed args: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("non-finite number in {0}")]
    NonFinite(&'static str),
    #[error("{0} out of range")]
    OutOfRange(&'static str),
    #[error("empty {0}")]
    Empty(&'static str),
    #[error("unknown shape id: {0}")]
    UnknownId(String),
}

/// Clamp a requested size into `[MIN_SIZE, container dimension]`, each axis
/// independently.
#[must_use]
pub fn clamp_size(container: ViewportSize, w: f64, h: f64) -> (f64, f64) {
    (w.min(container.w).max(MIN_SIZE), h.min(container.h).max(MIN_SIZE))
}

fn check_known(id: &str, known_ids: &HashSet<String>) -> Result<(), StepError> {
    if id.is_empty() {
        return Err(StepError::Empty("id"));
    }
    if known_ids.contains(id) {
        Ok(())
    } else {
        Err(StepError::UnknownId(id.to_string()))
    }
}

/// Validate one candidate step against the tool schema.
///
/// `known_ids` is seeded from the request snapshot; a successful addShape
/// with an idHint extends it so later steps may target the new shape.
///
/// # Errors
///
/// Returns a [`StepError`] describing why the step must be dropped. The
/// caller drops it silently and continues with the remaining steps.
pub fn validate_step(
    step: &Step,
    container: ViewportSize,
    known_ids: &mut HashSet<String>,
) -> Result<ValidatedStep, StepError> {
    match step.tool {
        ToolName::AddShape => {
            let raw: AddShapeRaw = serde_json::from_value(step.args.clone())?;
            if raw.kind.is_empty() {
                return Err(StepError::Empty("type"));
            }
            if !raw.x.is_finite() || !raw.y.is_finite() {
                return Err(StepError::NonFinite("position"));
            }
            let (w, h) = clamp_size(container, raw.w.unwrap_or(100.0), raw.h.unwrap_or(100.0));
            if let Some(hint) = &raw.id_hint {
                if !hint.is_empty() {
                    known_ids.insert(hint.clone());
                }
            }
            Ok(ValidatedStep::AddShape(AddShapeArgs {
                id_hint: raw.id_hint,
                kind: raw.kind,
                geo: raw.geo,
                x: raw.x,
                y: raw.y,
                w,
                h,
                color: raw.color,
                text: raw.text,
            }))
        }
        ToolName::UpdateShape => {
            let args: UpdateShapeArgs = serde_json::from_value(step.args.clone())?;
            check_known(&args.id, known_ids)?;
            if args.x.is_some_and(|v| !v.is_finite()) || args.y.is_some_and(|v| !v.is_finite()) {
                return Err(StepError::NonFinite("position"));
            }
            if args.rotation.is_some_and(|v| !v.is_finite()) {
                return Err(StepError::NonFinite("rotation"));
            }
            if let Some(props) = &args.props {
                if props.w.is_some_and(|v| !v.is_finite() || v <= 0.0) || props.h.is_some_and(|v| !v.is_finite() || v <= 0.0) {
                    return Err(StepError::OutOfRange("props size"));
                }
            }
            Ok(ValidatedStep::UpdateShape(args))
        }
        ToolName::MoveShapes => {
            let args: MoveShapesArgs = serde_json::from_value(step.args.clone())?;
            for item in &args.moves {
                check_known(&item.id, known_ids)?;
                if item.to.is_some_and(|p| !p.x.is_finite() || !p.y.is_finite())
                    || item.by.is_some_and(|d| !d.dx.is_finite() || !d.dy.is_finite())
                {
                    return Err(StepError::NonFinite("move"));
                }
            }
            Ok(ValidatedStep::MoveShapes(args))
        }
        ToolName::ResizeShape => {
            let mut args: ResizeShapeArgs = serde_json::from_value(step.args.clone())?;
            check_known(&args.id, known_ids)?;
            if let Some(to) = args.to {
                let (w, h) = clamp_size(container, to.w, to.h);
                args.to = Some(SizeSpec { w, h });
            }
            if args.by.is_some_and(|d| !d.dw.is_finite() || !d.dh.is_finite()) {
                return Err(StepError::NonFinite("resize"));
            }
            Ok(ValidatedStep::ResizeShape(args))
        }
        ToolName::RotateShape => {
            let args: RotateShapeArgs = serde_json::from_value(step.args.clone())?;
            check_known(&args.id, known_ids)?;
            if args.to.is_some_and(|v| !v.is_finite()) || args.by.is_some_and(|v| !v.is_finite()) {
                return Err(StepError::NonFinite("angle"));
            }
            Ok(ValidatedStep::RotateShape(args))
        }
        ToolName::LayoutDistribute => {
            let args: LayoutDistributeArgs = serde_json::from_value(step.args.clone())?;
            if let Some(gap) = args.gap_px {
                if gap > MAX_GAP_PX {
                    return Err(StepError::OutOfRange("gapPx"));
                }
            }
            if let Some(ids) = &args.ids {
                for id in ids {
                    check_known(id, known_ids)?;
                }
            }
            Ok(ValidatedStep::LayoutDistribute(args))
        }
        ToolName::DeleteShapes => {
            let args: DeleteShapesArgs = serde_json::from_value(step.args.clone())?;
            if args.ids.is_empty() {
                return Err(StepError::Empty("ids"));
            }
            for id in &args.ids {
                check_known(id, known_ids)?;
            }
            Ok(ValidatedStep::DeleteShapes(args))
        }
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
