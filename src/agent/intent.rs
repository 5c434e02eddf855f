//! Intent parser — free text to typed, partial hints.
//!
//! DESIGN
//! ======
//! Three independent detectors (create, transform, layout), each a pure
//! function of the message string. Every detector is an ordered list of
//! (pattern, extraction) rules; the first matching rule wins, and the
//! declared order is the tie-break, not text position. No intent detected
//! means the hint carries only its boolean — downstream stages treat absent
//! fields as "no constraint", never as a zero value.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::colors::{self, Color};

// =============================================================================
// VOCABULARY
// =============================================================================

/// Shape kinds accepted at creation time. "circle" is user-facing sugar for
/// an ellipse with equal width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatedShape {
    Rectangle,
    Ellipse,
    Triangle,
    Diamond,
    Circle,
}

impl CreatedShape {
    /// The editor geometry this shape kind maps to.
    #[must_use]
    pub fn geo(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse | Self::Circle => "ellipse",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
        }
    }
}

/// Broader target vocabulary for transform commands — includes text and line
/// shapes that cannot be created through this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetShape {
    Rectangle,
    Circle,
    Ellipse,
    Triangle,
    Diamond,
    Text,
    Line,
}

impl TargetShape {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Text => "text",
            Self::Line => "line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformAction {
    Move,
    Resize,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Default for Axis {
    fn default() -> Self {
        Self::Row
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribute {
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutTarget {
    Selection,
    Viewport,
}

/// Angle unit for rotations. Degrees unless radians are explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Deg,
    Rad,
}

// =============================================================================
// HINTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateHint {
    pub has_create_intent: bool,
    /// Defaults to rectangle when no shape keyword matched.
    pub shape: CreatedShape,
    /// Defaults to black when no color alias matched.
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformHint {
    pub has_transform_intent: bool,
    pub action: Option<TransformAction>,
    pub shape_hint: Option<TargetShape>,
    pub color_hint: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutHint {
    pub has_layout_intent: bool,
    pub axis: Option<Axis>,
    pub distribute: Option<Distribute>,
    pub align: Option<Align>,
    pub gap_px: Option<u32>,
    /// Always populated once layout intent is detected.
    pub target: Option<LayoutTarget>,
}

// =============================================================================
// PATTERNS
// =============================================================================

fn pattern(src: &str) -> Regex {
    Regex::new(src).expect("static intent pattern")
}

static CREATE_INTENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(\bcreate\b|\badd\b|\bmake\b)"));

/// Created-shape keyword groups, checked in declared order.
static CREATED_SHAPES: LazyLock<Vec<(Regex, CreatedShape)>> = LazyLock::new(|| {
    vec![
        (pattern(r"(?i)\b(circle|ellipse|oval)\b"), CreatedShape::Circle),
        (pattern(r"(?i)\b(rectangle|rect|box|square)\b"), CreatedShape::Rectangle),
        (pattern(r"(?i)\btriangle\b"), CreatedShape::Triangle),
        (pattern(r"(?i)\bdiamond\b"), CreatedShape::Diamond),
    ]
});

static MOVE_INTENT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(\bmove\b|\btranslate\b|\bdrag\b|\bposition\b|\bcenter\b)"));
static RESIZE_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)(\bresize\b|\bscale\b|\bgrow\b|\bshrink\b|\bdouble size\b|\btwice as big\b)")
});
static ROTATE_INTENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(\brotate\b|\bturn\b|\bspin\b)"));

/// Transform-target keyword groups, checked in declared order. Rectangle is
/// checked before circle, and circle before the bare ellipse group, so
/// "ellipse" resolves to circle — the declared order is the observable
/// behavior, keep it fixed.
static TARGET_SHAPES: LazyLock<Vec<(Regex, TargetShape)>> = LazyLock::new(|| {
    vec![
        (pattern(r"(?i)\b(rectangle|rect|box|square)\b"), TargetShape::Rectangle),
        (pattern(r"(?i)\b(circle|ellipse|oval)\b"), TargetShape::Circle),
        (pattern(r"(?i)\b(ellipse|oval)\b"), TargetShape::Ellipse),
        (pattern(r"(?i)\btriangle\b"), TargetShape::Triangle),
        (pattern(r"(?i)\bdiamond\b"), TargetShape::Diamond),
        (pattern(r"(?i)\b(text|label|title|heading|word|words)\b"), TargetShape::Text),
        (pattern(r"(?i)\b(line|arrow|rule|stroke)\b"), TargetShape::Line),
    ]
});

static LAYOUT_INTENT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(arrange|layout|space|distribute|row|column|horizontal|vertical|stack)"));
static AXIS_ROW: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(\brow\b|horizontal|side by side)"));
static AXIS_COLUMN: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(\bcolumn\b|vertical|stack(ed)?)"));
static DISTRIBUTE_EVEN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)(space(\s+them|\s+these|\s+the)?\s+even(ly)?|distribute(\s+even(ly)?)?|equal(ly)?\s+spac(ed|ing)?)")
});

/// Align keyword groups in canonical key order. "center" and "middle" are
/// cross-aliased: both patterns match either word, so the key order — not
/// text position — decides which label is returned.
static ALIGNS: LazyLock<Vec<(Regex, Align)>> = LazyLock::new(|| {
    vec![
        (pattern(r"(?i)\bleft\b"), Align::Left),
        (pattern(r"(?i)\b(center|centre|middle)\b"), Align::Center),
        (pattern(r"(?i)\bright\b"), Align::Right),
        (pattern(r"(?i)\btop\b"), Align::Top),
        (pattern(r"(?i)\b(middle|center|centre)\b"), Align::Middle),
        (pattern(r"(?i)\bbottom\b"), Align::Bottom),
    ]
});

static GAP: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(gap|spacing|space)\s*(of|=)?\s*(\d{1,4})"));
static TARGET_SELECTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(these|selected|selection)"));

static ROTATION_ANGLE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(-?\d+(?:\.\d+)?)\s*(deg(?:ree)?s?|rad(?:ian)?s?|°)"));

// =============================================================================
// DETECTORS
// =============================================================================

/// Detect a creation command. Shape and color always carry defaults
/// (rectangle, black) — creation never needs to distinguish "unspecified".
#[must_use]
pub fn parse_create(input: &str) -> CreateHint {
    let has_create_intent = CREATE_INTENT.is_match(input);

    let shape = CREATED_SHAPES
        .iter()
        .find(|(p, _)| p.is_match(input))
        .map_or(CreatedShape::Rectangle, |&(_, s)| s);

    let color = colors::resolve_color(input).unwrap_or(Color::Black);

    CreateHint { has_create_intent, shape, color }
}

/// Detect a transform command. When several action families match, the fixed
/// priority is move > resize > rotate.
#[must_use]
pub fn parse_transform(input: &str) -> TransformHint {
    let has_move = MOVE_INTENT.is_match(input);
    let has_resize = RESIZE_INTENT.is_match(input);
    let has_rotate = ROTATE_INTENT.is_match(input);

    let has_transform_intent = has_move || has_resize || has_rotate;
    if !has_transform_intent {
        return TransformHint::default();
    }

    let action = if has_move {
        Some(TransformAction::Move)
    } else if has_resize {
        Some(TransformAction::Resize)
    } else {
        Some(TransformAction::Rotate)
    };

    let shape_hint = TARGET_SHAPES
        .iter()
        .find(|(p, _)| p.is_match(input))
        .map(|&(_, s)| s);

    TransformHint {
        has_transform_intent,
        action,
        shape_hint,
        color_hint: colors::resolve_color(input),
    }
}

/// Detect a layout command. Row keywords are checked before column keywords;
/// the target field is always populated once intent is detected.
#[must_use]
pub fn parse_layout(input: &str) -> LayoutHint {
    if !LAYOUT_INTENT.is_match(input) {
        return LayoutHint::default();
    }

    let axis = if AXIS_ROW.is_match(input) {
        Some(Axis::Row)
    } else if AXIS_COLUMN.is_match(input) {
        Some(Axis::Column)
    } else {
        None
    };

    let distribute = DISTRIBUTE_EVEN.is_match(input).then_some(Distribute::Even);

    let align = ALIGNS
        .iter()
        .find(|(p, _)| p.is_match(input))
        .map(|&(_, a)| a);

    let gap_px = GAP
        .captures(input)
        .and_then(|c| c.get(3))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&v| v > 0)
        .map(|v| v.min(super::tools::MAX_GAP_PX));

    let target = if TARGET_SELECTION.is_match(input) {
        Some(LayoutTarget::Selection)
    } else {
        Some(LayoutTarget::Viewport)
    };

    LayoutHint { has_layout_intent: true, axis, distribute, align, gap_px, target }
}

/// Extract an explicit rotation angle ("45 degrees", "1.5 radians", "90°").
/// A unit token is required: a bare number ("rotate it 90", "rotate the 3
/// boxes") is ambiguous with counts. Absence means the caller applies the
/// default 45° delta.
#[must_use]
pub fn parse_rotation(input: &str) -> Option<(f64, AngleUnit)> {
    let caps = ROTATION_ANGLE.captures(input)?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    let unit = match caps.get(2) {
        Some(m) if m.as_str().to_ascii_lowercase().starts_with("rad") => AngleUnit::Rad,
        _ => AngleUnit::Deg,
    };
    Some((value, unit))
}

#[cfg(test)]
#[path = "intent_test.rs"]
mod tests;
