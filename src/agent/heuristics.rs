//! Heuristic resolver — deterministic geometry from hints + shape state.
//!
//! DESIGN
//! ======
//! Always produces a usable result without a model: this is the fallback
//! baseline the augmentation layer is measured against, and the only path
//! when no credential is configured. Everything here is a pure function of
//! the request — same input, same operations.
//!
//! Target selection is first-match, never best-match: prefer a shape
//! matching both the kind and color hints, then kind only, then color only,
//! then the first shape in selection-or-all order. Ties break by list order.

use std::collections::HashSet;

use serde_json::json;

use super::colors;
use super::intent::{self, Axis, LayoutTarget, TransformAction};
use super::tools::{self, Step, ToolName};
use crate::schema::{
    AgentRequest, LayoutMove, LayoutRequest, LayoutResponse, LayoutShape, MoveSpec, Placement, Point, ResizeSpec,
    RotateSpec, Shape, SizeSpec, TransformRequest, TransformResponse, Viewport,
};

/// Default creation footprint; circles get the square variant.
const DEFAULT_SHAPE_W: f64 = 200.0;
const DEFAULT_SHAPE_H: f64 = 120.0;
const DEFAULT_CIRCLE_SIZE: f64 = 160.0;

/// Minimum size for a model-sourced placement on the create endpoint.
const MIN_PLACEMENT_SIZE: f64 = 24.0;

/// Default rotation delta when no explicit angle was given.
const DEFAULT_ROTATE_DEG: f64 = 45.0;

// =============================================================================
// PLAN (orchestrated endpoint)
// =============================================================================

/// A multi-step edit plan plus an optional advisory remark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub say: Option<String>,
}

/// Build the heuristic plan for an orchestrated request: at most one create,
/// one recolor, one transform, and one layout step, in that order.
#[must_use]
pub fn build_plan(req: &AgentRequest) -> Plan {
    let mut steps = Vec::new();

    let create = intent::parse_create(&req.message);
    let transform = intent::parse_transform(&req.message);
    let layout = intent::parse_layout(&req.message);
    let color = colors::resolve_color(&req.message);

    if create.has_create_intent {
        let (w, h) = if create.shape == intent::CreatedShape::Circle {
            (DEFAULT_CIRCLE_SIZE, DEFAULT_CIRCLE_SIZE)
        } else {
            (DEFAULT_SHAPE_W, DEFAULT_SHAPE_H)
        };
        let (w, h) = tools::clamp_size(req.viewport_size, w, h);
        let mut args = json!({
            "type": "geo",
            "geo": create.shape.geo(),
            "x": req.visible_center.x - (w / 2.0).round(),
            "y": req.visible_center.y - (h / 2.0).round(),
            "w": w,
            "h": h,
        });
        if let (Some(c), Some(map)) = (color, args.as_object_mut()) {
            map.insert("color".into(), json!(c.as_str()));
        }
        steps.push(Step::new(ToolName::AddShape, args));
    }

    if let Some(target) = pick_target_shape(&req.shapes, &req.selection_ids) {
        if let Some(c) = color {
            steps.push(Step::new(
                ToolName::UpdateShape,
                json!({ "id": target.id, "props": { "color": c.as_str() } }),
            ));
        }
        match transform.action {
            Some(TransformAction::Move) => {
                steps.push(Step::new(
                    ToolName::MoveShapes,
                    json!({ "moves": [{ "id": target.id, "to": { "x": req.visible_center.x, "y": req.visible_center.y } }] }),
                ));
            }
            Some(TransformAction::Resize) => {
                let (w, h) = tools::clamp_size(req.viewport_size, target.bounds.w * 2.0, target.bounds.h * 2.0);
                steps.push(Step::new(
                    ToolName::ResizeShape,
                    json!({ "id": target.id, "to": { "w": w.round(), "h": h.round() } }),
                ));
            }
            Some(TransformAction::Rotate) => {
                let (by, unit) = intent::parse_rotation(&req.message)
                    .unwrap_or((DEFAULT_ROTATE_DEG, intent::AngleUnit::Deg));
                steps.push(Step::new(
                    ToolName::RotateShape,
                    json!({ "id": target.id, "by": by, "unit": unit }),
                ));
            }
            None => {}
        }
    }

    if layout.has_layout_intent {
        let mut args = json!({
            "axis": layout.axis.unwrap_or_default(),
            "target": layout.target.unwrap_or(LayoutTarget::Viewport),
        });
        if let Some(map) = args.as_object_mut() {
            if let Some(align) = layout.align {
                map.insert("align".into(), json!(align));
            }
            if let Some(gap) = layout.gap_px {
                map.insert("gapPx".into(), json!(gap));
            }
        }
        steps.push(Step::new(ToolName::LayoutDistribute, args));
    }

    let say = steps.is_empty().then(|| "(note) No intent detected.".to_string());
    Plan { steps, say }
}

/// First selected shape in snapshot order, else the first shape overall.
fn pick_target_shape<'a>(shapes: &'a [Shape], selection_ids: &[String]) -> Option<&'a Shape> {
    let selected: HashSet<&str> = selection_ids.iter().map(String::as_str).collect();
    shapes
        .iter()
        .find(|s| selected.contains(s.id.as_str()))
        .or_else(|| shapes.first())
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// Resolve a transform request without a model. Hints the client did not
/// supply are recovered from the message text, so the endpoint behaves the
/// same whether or not the caller ran the parser itself.
#[must_use]
pub fn transform_heuristic(req: &TransformRequest) -> TransformResponse {
    let parsed = intent::parse_transform(&req.message);
    let hints = req.hints.clone().unwrap_or_default();

    let shape_hint = hints
        .shape
        .or_else(|| parsed.shape_hint.map(|s| s.as_str().to_string()));
    let color_hint = hints
        .color
        .or_else(|| parsed.color_hint.map(|c| c.as_str().to_string()));

    // validate() guarantees at least one shape.
    let chosen = pick_best_shape(&req.shapes, shape_hint.as_deref(), color_hint.as_deref());
    let action = hints.action.or(parsed.action).unwrap_or(TransformAction::Move);

    match action {
        TransformAction::Move => {
            let center = req.viewport.center();
            TransformResponse {
                action,
                shape_id: chosen.id.clone(),
                move_spec: Some(MoveSpec {
                    to: Some(Point { x: center.x.round(), y: center.y.round() }),
                    by: None,
                }),
                resize: None,
                rotate: None,
            }
        }
        TransformAction::Resize => {
            let (w, h) = tools::clamp_size(req.viewport.size(), chosen.bounds.w * 2.0, chosen.bounds.h * 2.0);
            TransformResponse {
                action,
                shape_id: chosen.id.clone(),
                move_spec: None,
                resize: Some(ResizeSpec { to: Some(SizeSpec { w: w.round(), h: h.round() }), by: None }),
                rotate: None,
            }
        }
        TransformAction::Rotate => {
            let (by, unit) =
                intent::parse_rotation(&req.message).unwrap_or((DEFAULT_ROTATE_DEG, intent::AngleUnit::Deg));
            TransformResponse {
                action,
                shape_id: chosen.id.clone(),
                move_spec: None,
                resize: None,
                rotate: Some(RotateSpec { to: None, by: Some(by), unit: Some(unit) }),
            }
        }
    }
}

/// First shape matching both hints, else kind only, else color only, else
/// the first shape. Substring matching against the snapshot's geo/type and
/// color fields; ties break by list order.
fn pick_best_shape<'a>(shapes: &'a [Shape], shape_hint: Option<&str>, color_hint: Option<&str>) -> &'a Shape {
    let shape_hint = shape_hint.map(str::to_lowercase);
    let color_hint = color_hint.map(str::to_lowercase);

    let matches_kind = |s: &Shape| {
        shape_hint.as_deref().is_none_or(|hint| {
            s.geo.as_deref().unwrap_or(&s.kind).to_lowercase().contains(hint) || s.kind.to_lowercase().contains(hint)
        })
    };
    let matches_color = |s: &Shape| {
        color_hint
            .as_deref()
            .is_none_or(|hint| s.color.as_deref().unwrap_or("").to_lowercase().contains(hint))
    };

    if shape_hint.is_some() || color_hint.is_some() {
        if let Some(both) = shapes.iter().find(|s| matches_kind(s) && matches_color(s)) {
            return both;
        }
        if shape_hint.is_some() {
            if let Some(by_kind) = shapes.iter().find(|s| matches_kind(s)) {
                return by_kind;
            }
        }
        if color_hint.is_some() {
            if let Some(by_color) = shapes.iter().find(|s| matches_color(s)) {
                return by_color;
            }
        }
    }
    &shapes[0]
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Distribute shapes along a row or column without a model.
///
/// Targets the selection when requested and non-empty, else all shapes.
/// Fewer than two targets emits no moves. Shapes are placed at a running
/// cursor from the minimum leading edge; the perpendicular coordinate
/// centers every shape on the median of the original perpendicular centers.
/// Alignment keywords are accepted but do not change the centering formula.
#[must_use]
pub fn layout_heuristic(req: &LayoutRequest) -> LayoutResponse {
    let hints = req.hints.unwrap_or_default();
    let targets = pick_layout_targets(&req.shapes, req.selection_ids.as_deref(), hints.target);
    if targets.len() < 2 {
        return LayoutResponse { moves: Vec::new() };
    }

    let axis = hints.axis.unwrap_or_default();
    let lead = |s: &LayoutShape| match axis {
        Axis::Row => s.bounds.x,
        Axis::Column => s.bounds.y,
    };
    let size = |s: &LayoutShape| match axis {
        Axis::Row => s.bounds.w,
        Axis::Column => s.bounds.h,
    };
    let perp_center = |s: &LayoutShape| match axis {
        Axis::Row => s.bounds.center_y(),
        Axis::Column => s.bounds.center_x(),
    };
    let perp_size = |s: &LayoutShape| match axis {
        Axis::Row => s.bounds.h,
        Axis::Column => s.bounds.w,
    };

    let mut sorted: Vec<&LayoutShape> = targets.clone();
    sorted.sort_by(|a, b| lead(a).total_cmp(&lead(b)));

    // Median resists outliers from stray shapes; mean would drag the line.
    let baseline = median(sorted.iter().map(|s| perp_center(s)).collect());

    let min_lead = sorted.iter().map(|s| lead(s)).fold(f64::INFINITY, f64::min);
    let max_trail = sorted
        .iter()
        .map(|s| lead(s) + size(s))
        .fold(f64::NEG_INFINITY, f64::max);

    let gap = match hints.gap_px {
        Some(g) => f64::from(g),
        None => {
            let total: f64 = sorted.iter().map(|s| size(s)).sum();
            let free = (max_trail - min_lead - total).max(0.0);
            #[allow(clippy::cast_precision_loss)]
            let slots = (sorted.len() - 1) as f64;
            (free / slots).round()
        }
    };

    let mut cursor = min_lead;
    let moves = sorted
        .iter()
        .map(|s| {
            let perp = (baseline - perp_size(s) / 2.0).round();
            let to = match axis {
                Axis::Row => Point { x: cursor.round(), y: perp },
                Axis::Column => Point { x: perp, y: cursor.round() },
            };
            cursor += size(s) + gap;
            LayoutMove { id: s.id.clone(), to }
        })
        .collect();

    LayoutResponse { moves }
}

fn pick_layout_targets<'a>(
    shapes: &'a [LayoutShape],
    selection_ids: Option<&[String]>,
    target: Option<LayoutTarget>,
) -> Vec<&'a LayoutShape> {
    if target == Some(LayoutTarget::Selection) {
        if let Some(ids) = selection_ids {
            if !ids.is_empty() {
                let set: HashSet<&str> = ids.iter().map(String::as_str).collect();
                return shapes.iter().filter(|s| set.contains(s.id.as_str())).collect();
            }
        }
    }
    shapes.iter().collect()
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

// =============================================================================
// CREATE PLACEMENT
// =============================================================================

/// Default placement for a new shape: centered in the viewport, 200×120
/// (160×160 for a circle hint).
#[must_use]
pub fn create_placement(viewport: Viewport, shape_hint: Option<&str>) -> Placement {
    let circle = shape_hint == Some("circle");
    let (w, h) = if circle {
        (DEFAULT_CIRCLE_SIZE, DEFAULT_CIRCLE_SIZE)
    } else {
        (DEFAULT_SHAPE_W, DEFAULT_SHAPE_H)
    };
    Placement {
        x: (viewport.x + viewport.w / 2.0 - w / 2.0).round(),
        y: (viewport.y + viewport.h / 2.0 - h / 2.0).round(),
        w,
        h,
    }
}

/// Clamp a model-sourced placement into the viewport with minimum size 24.
#[must_use]
pub fn clamp_placement(viewport: Viewport, p: Placement) -> Placement {
    let w = p.w.min(viewport.w).max(MIN_PLACEMENT_SIZE);
    let h = p.h.min(viewport.h).max(MIN_PLACEMENT_SIZE);
    let x = p.x.min(viewport.x + viewport.w - w).max(viewport.x);
    let y = p.y.min(viewport.y + viewport.h - h).max(viewport.y);
    Placement { x: x.round(), y: y.round(), w: w.round(), h: h.round() }
}

#[cfg(test)]
#[path = "heuristics_test.rs"]
mod tests;
