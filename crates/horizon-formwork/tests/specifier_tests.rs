//! Integration tests for specifier construction and the factory.

mod common;

use std::sync::Arc;

use horizon_formwork::factory::SpecifierFactory;
use horizon_formwork::megawidget::{CreationParams, DetachedBinder, HostHandle};
use horizon_formwork::{ParamValue, ParameterMap};

fn creation() -> CreationParams {
    common::init_tracing();
    CreationParams::new(Arc::new(DetachedBinder))
}

#[test]
fn test_json_map_round_trip() {
    let map = ParameterMap::from_json_str(
        r#"{
            "type": "integer_spinner",
            "field": "retries",
            "label": "Retries",
            "min_value": 0,
            "max_value": 10,
            "values": 3
        }"#,
    )
    .unwrap();
    // Integral JSON numbers land as integers.
    assert_eq!(map.get("values"), Some(&ParamValue::Int(3)));

    let factory = SpecifierFactory::with_standard_kinds();
    let specifier = factory.create_specifier(&map).unwrap();
    assert_eq!(specifier.identifier().as_str(), "retries");

    let megawidget = specifier
        .create_megawidget(HostHandle::detached(), &creation())
        .unwrap();
    assert_eq!(
        megawidget.mutable_property("values").unwrap(),
        ParamValue::Int(3)
    );
    assert!(megawidget.is_enabled());
    assert!(megawidget.is_editable());
}

#[test]
fn test_specification_error_carries_canonical_tuple() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce")
        .with("values", "definitely");
    let err = factory.create_specifier(&map).unwrap_err();
    assert_eq!(err.identifier, "announce");
    assert_eq!(err.type_tag, "checkbox");
    assert_eq!(err.parameter, "values");
    assert_eq!(err.value, ParamValue::String("definitely".into()));
    assert_eq!(err.reason, "must be a boolean");
    // Display folds the whole tuple into one line.
    let rendered = err.to_string();
    assert!(rendered.contains("announce"));
    assert!(rendered.contains("checkbox"));
    assert!(rendered.contains("must be a boolean"));
}

#[test]
fn test_specifier_is_reusable_across_megawidgets() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "checkbox")
        .with("field", "announce")
        .with("values", true);
    let specifier = factory.create_specifier(&map).unwrap();

    let mut first = specifier
        .clone()
        .create_megawidget(HostHandle::detached(), &creation())
        .unwrap();
    let second = specifier
        .create_megawidget(HostHandle::detached(), &creation())
        .unwrap();

    // Mutating one live megawidget never leaks into its siblings or the
    // shared description.
    first
        .as_stateful_mut()
        .unwrap()
        .set_state("announce", &ParamValue::Bool(false))
        .unwrap();
    assert_eq!(
        second.mutable_property("values").unwrap(),
        ParamValue::Bool(true)
    );
}

#[test]
fn test_composite_identifier_rules() {
    let factory = SpecifierFactory::with_standard_kinds();

    // Single-valued kinds reject composite identifiers.
    let map = ParameterMap::new()
        .with("type", "combo_box")
        .with("field", "a:b")
        .with("choices", vec![ParamValue::from("x")]);
    let err = factory.create_specifier(&map).unwrap_err();
    assert_eq!(err.parameter, "field");
    assert!(err.reason.contains("composite"));

    // Malformed composites fail for every kind.
    let map = ParameterMap::new()
        .with("type", "time_range")
        .with("field", "start::end");
    assert!(factory.create_specifier(&map).is_err());
    let map = ParameterMap::new()
        .with("type", "time_range")
        .with("field", "start:start");
    assert!(factory.create_specifier(&map).is_err());
}

#[test]
fn test_unknown_and_missing_type_tags() {
    let factory = SpecifierFactory::with_standard_kinds();

    let err = factory
        .create_specifier(&ParameterMap::new().with("field", "x").with("type", "gauge"))
        .unwrap_err();
    assert_eq!(err.reason, "unknown megawidget type \"gauge\"");

    let err = factory
        .create_specifier(&ParameterMap::new().with("field", "x"))
        .unwrap_err();
    assert_eq!(err.parameter, "type");
}

#[test]
fn test_control_options_flow_through() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "label")
        .with("field", "title")
        .with("width", 2)
        .with("full_width", true)
        .with("spacing", 8)
        .with("editable", false);
    let specifier = factory.create_specifier(&map).unwrap();
    let options = specifier.control_options().unwrap();
    assert_eq!(options.width, 2);
    assert!(options.full_width);
    assert_eq!(options.spacing, 8);
    assert!(!options.editable);
}
