use super::*;
use serde_json::json;

fn container() -> ViewportSize {
    ViewportSize { w: 1200.0, h: 800.0 }
}

fn known(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(ToString::to_string).collect()
}

#[test]
fn clamp_size_floor_and_ceiling() {
    assert_eq!(clamp_size(container(), 2.0, 5000.0), (MIN_SIZE, 800.0));
    assert_eq!(clamp_size(container(), 300.0, 200.0), (300.0, 200.0));
    assert_eq!(clamp_size(container(), 99999.0, 0.0), (1200.0, MIN_SIZE));
}

#[test]
fn unknown_tool_rejects_the_envelope() {
    let result = serde_json::from_value::<Step>(json!({ "tool": "explodeShape", "args": {} }));
    assert!(result.is_err());
}

#[test]
fn step_args_default_to_null() {
    let step: Step = serde_json::from_value(json!({ "tool": "addShape" })).expect("deserialize");
    assert_eq!(step.tool, ToolName::AddShape);
    assert!(step.args.is_null());
}

#[test]
fn add_shape_defaults_missing_size_to_100() {
    let step = Step::new(ToolName::AddShape, json!({ "type": "geo", "geo": "rectangle", "x": 10.0, "y": 20.0 }));
    let mut ids = known(&[]);
    let validated = validate_step(&step, container(), &mut ids).expect("valid");
    match validated {
        ValidatedStep::AddShape(args) => {
            assert_eq!(args.w, 100.0);
            assert_eq!(args.h, 100.0);
        }
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn add_shape_clamps_size_into_container() {
    let step = Step::new(
        ToolName::AddShape,
        json!({ "type": "geo", "geo": "rectangle", "x": 0.0, "y": 0.0, "w": 99999.0, "h": 2.0 }),
    );
    let mut ids = known(&[]);
    let validated = validate_step(&step, container(), &mut ids).expect("valid");
    match validated {
        ValidatedStep::AddShape(args) => {
            assert_eq!(args.w, 1200.0);
            assert_eq!(args.h, MIN_SIZE);
        }
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn add_shape_rejects_empty_type() {
    let step = Step::new(ToolName::AddShape, json!({ "type": "", "x": 0.0, "y": 0.0 }));
    let mut ids = known(&[]);
    assert!(matches!(validate_step(&step, container(), &mut ids), Err(StepError::Empty("type"))));
}

#[test]
fn add_shape_id_hint_extends_known_ids() {
    let add = Step::new(
        ToolName::AddShape,
        json!({ "idHint": "fresh", "type": "geo", "geo": "rectangle", "x": 0.0, "y": 0.0 }),
    );
    let mv = Step::new(ToolName::MoveShapes, json!({ "moves": [{ "id": "fresh", "to": { "x": 1.0, "y": 2.0 } }] }));

    let mut ids = known(&[]);
    validate_step(&add, container(), &mut ids).expect("add valid");
    assert!(ids.contains("fresh"));
    validate_step(&mv, container(), &mut ids).expect("move targets the new id");
}

#[test]
fn move_unknown_id_is_rejected() {
    let step = Step::new(ToolName::MoveShapes, json!({ "moves": [{ "id": "ghost", "to": { "x": 1.0, "y": 2.0 } }] }));
    let mut ids = known(&["a"]);
    assert!(matches!(validate_step(&step, container(), &mut ids), Err(StepError::UnknownId(_))));
}

#[test]
fn resize_to_is_clamped() {
    let step = Step::new(ToolName::ResizeShape, json!({ "id": "a", "to": { "w": 4.0, "h": 9000.0 } }));
    let mut ids = known(&["a"]);
    let validated = validate_step(&step, container(), &mut ids).expect("valid");
    match validated {
        ValidatedStep::ResizeShape(args) => {
            let to = args.to.expect("to");
            assert_eq!(to.w, MIN_SIZE);
            assert_eq!(to.h, 800.0);
        }
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn update_rejects_non_positive_props_size() {
    let step = Step::new(ToolName::UpdateShape, json!({ "id": "a", "props": { "w": 0.0 } }));
    let mut ids = known(&["a"]);
    assert!(matches!(validate_step(&step, container(), &mut ids), Err(StepError::OutOfRange(_))));
}

#[test]
fn layout_gap_over_max_is_rejected() {
    let step = Step::new(ToolName::LayoutDistribute, json!({ "gapPx": MAX_GAP_PX + 1 }));
    let mut ids = known(&[]);
    assert!(matches!(validate_step(&step, container(), &mut ids), Err(StepError::OutOfRange(_))));
}

#[test]
fn layout_defaults_axis_to_row() {
    let step = Step::new(ToolName::LayoutDistribute, json!({}));
    let mut ids = known(&[]);
    let validated = validate_step(&step, container(), &mut ids).expect("valid");
    match validated {
        ValidatedStep::LayoutDistribute(args) => assert_eq!(args.axis, Axis::Row),
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn layout_ids_must_be_known() {
    let step = Step::new(ToolName::LayoutDistribute, json!({ "ids": ["a", "ghost"] }));
    let mut ids = known(&["a"]);
    assert!(matches!(validate_step(&step, container(), &mut ids), Err(StepError::UnknownId(_))));
}

#[test]
fn delete_rejects_empty_and_unknown_ids() {
    let empty = Step::new(ToolName::DeleteShapes, json!({ "ids": [] }));
    let ghost = Step::new(ToolName::DeleteShapes, json!({ "ids": ["ghost"] }));
    let mut ids = known(&["a"]);
    assert!(matches!(validate_step(&empty, container(), &mut ids), Err(StepError::Empty("ids"))));
    assert!(matches!(validate_step(&ghost, container(), &mut ids), Err(StepError::UnknownId(_))));
}

#[test]
fn delete_known_ids_passes() {
    let step = Step::new(ToolName::DeleteShapes, json!({ "ids": ["a", "b"] }));
    let mut ids = known(&["a", "b"]);
    let validated = validate_step(&step, container(), &mut ids).expect("valid");
    assert_eq!(validated.tool(), ToolName::DeleteShapes);
}

#[test]
fn malformed_args_are_a_decode_error() {
    let step = Step::new(ToolName::RotateShape, json!({ "id": "a", "by": "ninety" }));
    let mut ids = known(&["a"]);
    assert!(matches!(validate_step(&step, container(), &mut ids), Err(StepError::Decode(_))));
}

#[test]
fn args_value_round_trips_the_wire_shape() {
    let step = Step::new(ToolName::RotateShape, json!({ "id": "a", "by": 45.0, "unit": "deg" }));
    let mut ids = known(&["a"]);
    let validated = validate_step(&step, container(), &mut ids).expect("valid");
    let value = validated.args_value().expect("serialize");
    assert_eq!(value, json!({ "id": "a", "by": 45.0, "unit": "deg" }));
}
