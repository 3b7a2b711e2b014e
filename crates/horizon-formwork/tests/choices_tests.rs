//! Integration tests for the choices validation engine as seen through the
//! choice-based kinds.

mod common;

use std::sync::Arc;

use horizon_formwork::factory::SpecifierFactory;
use horizon_formwork::megawidget::{CreationParams, DetachedBinder, HostHandle};
use horizon_formwork::{ParamValue, ParameterMap};

fn creation() -> CreationParams {
    common::init_tracing();
    CreationParams::new(Arc::new(DetachedBinder))
}

fn bundle(name: &str, identifier: Option<&str>, children: Option<Vec<ParamValue>>) -> ParamValue {
    let mut map = ParameterMap::new();
    map.insert("name", name);
    if let Some(identifier) = identifier {
        map.insert("identifier", identifier);
    }
    if let Some(children) = children {
        map.insert("children", ParamValue::List(children));
    }
    ParamValue::Map(map)
}

#[test]
fn test_duplicate_identifier_reports_second_occurrence() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "combo_box")
        .with("field", "severity")
        .with(
            "choices",
            vec![
                ParamValue::from("low"),
                ParamValue::from("high"),
                ParamValue::from("low"),
            ],
        );
    let err = factory.create_specifier(&map).unwrap_err();
    assert_eq!(err.parameter, "choices[2]");
    assert!(err.reason.contains("\"low\""));
    assert!(err.reason.contains("duplicate"));
}

#[test]
fn test_flat_policy_rejects_children() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "check_list")
        .with("field", "toppings")
        .with(
            "choices",
            vec![bundle("veggies", None, Some(vec![ParamValue::from("olives")]))],
        );
    let err = factory.create_specifier(&map).unwrap_err();
    assert_eq!(err.identifier, "toppings");
    assert!(err.parameter.starts_with("choices[0]"));
}

#[test]
fn test_hierarchical_identifier_must_not_contain_separator() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "check_tree")
        .with("field", "hazards")
        .with("choices", vec![bundle("Hydro", Some("hy:dro"), None)]);
    let err = factory.create_specifier(&map).unwrap_err();
    assert!(err.parameter.contains("identifier"));
}

#[test]
fn test_choices_must_be_a_list() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "combo_box")
        .with("field", "severity")
        .with("choices", "low");
    let err = factory.create_specifier(&map).unwrap_err();
    assert_eq!(err.parameter, "choices");
    assert_eq!(err.reason, "must be a list of choices");
}

#[test]
fn test_bundle_identifier_defaults_to_name() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "combo_box")
        .with("field", "severity")
        .with(
            "choices",
            vec![bundle("Low severity", None, None), bundle("High", Some("hi"), None)],
        )
        .with("values", "hi");
    let specifier = factory.create_specifier(&map).unwrap();
    let megawidget = specifier
        .create_megawidget(HostHandle::detached(), &creation())
        .unwrap();
    assert_eq!(
        megawidget.mutable_property("values").unwrap(),
        ParamValue::String("hi".into())
    );

    // Bad membership lists bundle identifiers, name-defaulted ones included.
    let err = megawidget
        .validate_mutable_property("values", &ParamValue::from("nope"))
        .unwrap_err();
    assert_eq!(err.reason, "must be one of [Low severity, hi]");
}

#[test]
fn test_deep_subset_membership_error_is_scoped() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "check_tree")
        .with("field", "hazards")
        .with(
            "choices",
            vec![
                bundle(
                    "hydro",
                    None,
                    Some(vec![ParamValue::from("flood"), ParamValue::from("flash")]),
                ),
                ParamValue::from("wind"),
            ],
        );
    let specifier = factory.create_specifier(&map).unwrap();
    let mut megawidget = specifier
        .create_megawidget(HostHandle::detached(), &creation())
        .unwrap();

    let state = ParamValue::List(vec![bundle(
        "hydro",
        None,
        Some(vec![ParamValue::from("wind")]),
    )]);
    let err = megawidget
        .as_stateful_mut()
        .unwrap()
        .set_state("hazards", &state)
        .unwrap_err();
    // "wind" is legal at the top level but not inside hydro; the error names
    // only the siblings at the failing level.
    assert_eq!(err.property, "hazards[0].children[0]");
    assert_eq!(err.reason, "must be one of [flood, flash]");
}

#[test]
fn test_unbounded_kind_accepts_novel_strings() {
    let factory = SpecifierFactory::with_standard_kinds();
    let map = ParameterMap::new()
        .with("type", "list_builder")
        .with("field", "recipients");
    let specifier = factory.create_specifier(&map).unwrap();
    let mut megawidget = specifier
        .create_megawidget(HostHandle::detached(), &creation())
        .unwrap();

    let novel = ParamValue::List(vec![ParamValue::from("anyone"), ParamValue::from("at all")]);
    megawidget
        .as_stateful_mut()
        .unwrap()
        .set_state("recipients", &novel)
        .unwrap();
    assert_eq!(megawidget.mutable_property("values").unwrap(), novel);
}
