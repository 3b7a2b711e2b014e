//! Integration tests for the megawidget runtime protocols: usability,
//! mutable properties, and the silent-programmatic / notified-user-driven
//! split, observed through a recording host binding.

mod common;

use std::sync::Arc;

use common::{NotificationRecorder, Push, RecordingBinder, StateChangeRecorder};
use horizon_formwork::controls::{CheckboxMegawidget, IntegerSpinnerMegawidget};
use horizon_formwork::factory::SpecifierFactory;
use horizon_formwork::megawidget::{
    CreationParams, HostHandle, Megawidget, Usability, megawidget_cast_mut,
};
use horizon_formwork::{ParamValue, ParameterMap};

fn build(
    map: &ParameterMap,
    creation: &CreationParams,
) -> Box<dyn Megawidget> {
    common::init_tracing();
    SpecifierFactory::with_standard_kinds()
        .create_specifier(map)
        .unwrap()
        .create_megawidget(HostHandle::detached(), creation)
        .unwrap()
}

#[test]
fn test_usability_pushed_already_combined() {
    let binder = RecordingBinder::new();
    let creation = CreationParams::new(Arc::new(binder.clone()));
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce");
    let mut megawidget = build(&map, &creation);

    megawidget.set_editable(false);
    megawidget.set_enabled(false);
    megawidget.set_editable(true); // still disabled, no push
    megawidget.set_enabled(true);

    let usabilities: Vec<Push> = binder
        .pushes_for("announce")
        .into_iter()
        .filter(|push| matches!(push, Push::Usability(_)))
        .collect();
    assert_eq!(
        usabilities,
        vec![
            Push::Usability(Usability::Active),   // initial
            Push::Usability(Usability::ReadOnly), // editable off
            Push::Usability(Usability::Inert),    // enabled off
            Push::Usability(Usability::Active),   // enabled back on, editable already restored
        ]
    );
}

#[test]
fn test_programmatic_state_reaches_binding_but_not_listener() {
    let binder = RecordingBinder::new();
    let state_changes = Arc::new(StateChangeRecorder::default());
    let creation = CreationParams::new(Arc::new(binder.clone()))
        .with_state_change_listener(state_changes.clone());
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce");
    let mut megawidget = build(&map, &creation);
    binder.clear();

    megawidget
        .as_stateful_mut()
        .unwrap()
        .set_state("announce", &ParamValue::Bool(true))
        .unwrap();

    assert_eq!(
        binder.pushes_for("announce"),
        vec![Push::State("announce".into(), ParamValue::Bool(true))]
    );
    assert!(state_changes.changes.lock().is_empty());
}

#[test]
fn test_user_change_notifies_but_does_not_push() {
    let binder = RecordingBinder::new();
    let state_changes = Arc::new(StateChangeRecorder::default());
    let notifications = Arc::new(NotificationRecorder::default());
    let creation = CreationParams::new(Arc::new(binder.clone()))
        .with_state_change_listener(state_changes.clone())
        .with_notification_listener(notifications.clone());
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce")
        .with("callback_data", "ctx");
    let mut megawidget = build(&map, &creation);
    binder.clear();

    megawidget_cast_mut::<CheckboxMegawidget>(megawidget.as_mut())
        .unwrap()
        .user_toggled(true);

    // The change came from the host control; nothing is echoed back at it.
    assert!(binder.pushes_for("announce").is_empty());
    assert_eq!(
        *state_changes.changes.lock(),
        vec![(
            "announce".to_string(),
            "announce".to_string(),
            ParamValue::Bool(true)
        )]
    );
    assert_eq!(
        *notifications.invocations.lock(),
        vec![("announce".to_string(), Some(ParamValue::from("ctx")))]
    );
}

#[test]
fn test_bulk_set_is_atomic() {
    let binder = RecordingBinder::new();
    let creation = CreationParams::new(Arc::new(binder.clone()));
    let map = ParameterMap::new()
        .with("type", "integer_spinner")
        .with("field", "count")
        .with("min_value", 0)
        .with("max_value", 10)
        .with("values", 2);
    let mut megawidget = build(&map, &creation);
    binder.clear();

    // "increment_delta" sorts before "values"; the invalid "values" entry
    // must still prevent the valid delta from applying.
    let batch = ParameterMap::new()
        .with("increment_delta", 5)
        .with("values", 99);
    let err = megawidget.set_mutable_properties(&batch).unwrap_err();
    assert_eq!(err.property, "values");

    assert!(binder.pushes_for("count").is_empty());
    assert_eq!(
        megawidget.mutable_property("increment_delta").unwrap(),
        ParamValue::Int(1)
    );
    assert_eq!(megawidget.mutable_property("values").unwrap(), ParamValue::Int(2));

    // The same batch with a legal value applies in full.
    let batch = ParameterMap::new()
        .with("increment_delta", 5)
        .with("values", 9);
    megawidget.set_mutable_properties(&batch).unwrap();
    assert_eq!(megawidget.mutable_property("values").unwrap(), ParamValue::Int(9));
    assert_eq!(
        megawidget.mutable_property("increment_delta").unwrap(),
        ParamValue::Int(5)
    );
}

#[test]
fn test_bulk_set_can_mix_flags_and_state() {
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce");
    let creation = CreationParams::new(Arc::new(RecordingBinder::new()));
    let mut megawidget = build(&map, &creation);

    let batch = ParameterMap::new()
        .with("enable", false)
        .with("values", true);
    megawidget.set_mutable_properties(&batch).unwrap();
    assert!(!megawidget.is_enabled());
    assert_eq!(megawidget.mutable_property("values").unwrap(), ParamValue::Bool(true));
}

#[test]
fn test_unknown_property_rejected_everywhere() {
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce");
    let creation = CreationParams::new(Arc::new(RecordingBinder::new()));
    let mut megawidget = build(&map, &creation);

    let err = megawidget.mutable_property("volume").unwrap_err();
    assert_eq!(err.reason, "no such mutable property");
    assert!(megawidget
        .validate_mutable_property("volume", &ParamValue::Int(1))
        .is_err());
    assert!(megawidget
        .set_mutable_property("volume", &ParamValue::Int(1))
        .is_err());

    let batch = ParameterMap::new().with("volume", 1).with("enable", false);
    assert!(megawidget.set_mutable_properties(&batch).is_err());
    assert!(megawidget.is_enabled());
}

#[test]
fn test_increment_delta_pushed_as_property() {
    let binder = RecordingBinder::new();
    let creation = CreationParams::new(Arc::new(binder.clone()));
    let map = ParameterMap::new()
        .with("type", "integer_spinner")
        .with("field", "count");
    let mut megawidget = build(&map, &creation);
    binder.clear();

    megawidget
        .set_mutable_property("increment_delta", &ParamValue::Int(10))
        .unwrap();
    assert_eq!(
        binder.pushes_for("count"),
        vec![Push::Property("increment_delta".into(), ParamValue::Int(10))]
    );

    let spinner = megawidget
        .as_any_mut()
        .downcast_mut::<IntegerSpinnerMegawidget>()
        .unwrap();
    assert_eq!(spinner.increment_delta(), 10);
}
