//! Integration tests for the container kinds: child construction through
//! the factory, flag propagation, and identifier lookup.

mod common;

use std::sync::Arc;

use common::{Push, RecordingBinder};
use horizon_formwork::controls::TabbedPanelMegawidget;
use horizon_formwork::factory::SpecifierFactory;
use horizon_formwork::megawidget::{
    ContainerMegawidget, CreationParams, HostHandle, Megawidget, Usability, megawidget_cast,
};
use horizon_formwork::{ParamValue, ParameterMap};

fn child(kind: &str, field: &str) -> ParamValue {
    ParamValue::Map(
        ParameterMap::new().with("type", kind).with("field", field),
    )
}

fn build(map: &ParameterMap, creation: &CreationParams) -> Box<dyn Megawidget> {
    common::init_tracing();
    SpecifierFactory::with_standard_kinds()
        .create_specifier(map)
        .unwrap()
        .create_megawidget(HostHandle::detached(), creation)
        .unwrap()
}

#[test]
fn test_group_propagation_and_override() {
    let binder = RecordingBinder::new();
    let creation = CreationParams::new(Arc::new(binder.clone()));
    let map = ParameterMap::new()
        .with("type", "group")
        .with("field", "filters")
        .with(
            "fields",
            vec![
                child("checkbox", "a"),
                child("label", "b"),
                child("integer_spinner", "c"),
            ],
        );
    let mut megawidget = build(&map, &creation);
    binder.clear();

    megawidget.set_enabled(false);
    for id in ["filters", "a", "b", "c"] {
        assert_eq!(
            binder.pushes_for(id),
            vec![Push::Usability(Usability::Inert)]
        );
    }

    // A later per-child call wins until the next parent-level call.
    megawidget
        .as_container_mut()
        .unwrap()
        .child_by_identifier_mut("b")
        .unwrap()
        .set_enabled(true);
    {
        let container = megawidget.as_container().unwrap();
        assert!(!container.child_by_identifier("a").unwrap().is_enabled());
        assert!(container.child_by_identifier("b").unwrap().is_enabled());
    }

    megawidget.set_enabled(true);
    let container = megawidget.as_container().unwrap();
    for index in 0..container.child_count() {
        assert!(container.child(index).is_enabled());
    }
}

#[test]
fn test_nested_group_propagates_transitively() {
    let inner = ParamValue::Map(
        ParameterMap::new()
            .with("type", "group")
            .with("field", "inner")
            .with("fields", vec![child("checkbox", "deep")]),
    );
    let map = ParameterMap::new()
        .with("type", "group")
        .with("field", "outer")
        .with("fields", vec![inner, child("checkbox", "shallow")]);
    let creation = CreationParams::new(Arc::new(RecordingBinder::new()));
    let mut megawidget = build(&map, &creation);

    megawidget.set_editable(false);
    let outer = megawidget.as_container().unwrap();
    let inner = outer
        .child_by_identifier("inner")
        .unwrap()
        .as_container()
        .unwrap();
    assert_eq!(
        inner.child_by_identifier("deep").unwrap().usability(),
        Usability::ReadOnly
    );
    assert_eq!(
        outer.child_by_identifier("shallow").unwrap().usability(),
        Usability::ReadOnly
    );
}

#[test]
fn test_tabbed_panel_pages_and_propagation() {
    let page = |name: &str, fields: Vec<ParamValue>| {
        ParamValue::Map(
            ParameterMap::new().with("page", name).with("fields", fields),
        )
    };
    let map = ParameterMap::new()
        .with("type", "tabbed_panel")
        .with("field", "settings")
        .with(
            "pages",
            vec![
                page("General", vec![child("checkbox", "a"), child("label", "b")]),
                page("Advanced", vec![child("checkbox", "c")]),
            ],
        );
    let creation = CreationParams::new(Arc::new(RecordingBinder::new()));
    let mut megawidget = build(&map, &creation);
    megawidget.set_enabled(false);

    let panel = megawidget_cast::<TabbedPanelMegawidget>(megawidget.as_ref()).unwrap();
    assert_eq!(panel.page_names(), ["General", "Advanced"]);
    let advanced = panel.page_children("Advanced").unwrap();
    assert_eq!(advanced, 2..3);
    assert_eq!(panel.child(advanced.start).identifier(), "c");
    for index in 0..panel.child_count() {
        assert!(!panel.child(index).is_enabled());
    }
}

#[test]
fn test_non_control_child_fails_parent() {
    let factory = SpecifierFactory::with_standard_kinds();
    let menu = ParamValue::Map(
        ParameterMap::new()
            .with("type", "menu")
            .with("field", "ctx")
            .with("choices", vec![ParamValue::from("grid")]),
    );
    let map = ParameterMap::new()
        .with("type", "group")
        .with("field", "filters")
        .with("fields", vec![menu]);
    let err = factory.create_specifier(&map).unwrap_err();
    assert_eq!(err.type_tag, "menu");
    assert_eq!(err.reason, "this megawidget type cannot be used as an in-form child");
}
