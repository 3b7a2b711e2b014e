//! Canonical parameter names.
//!
//! Every megawidget kind reads its configuration from these keys. The
//! constants double as mutable property names where the runtime protocol
//! reuses them (`enable`, `editable`, `values`, `increment_delta`).

/// The megawidget identifier (possibly colon-joined composite).
pub const FIELD: &str = "field";
/// The specifier type tag, consumed by the factory.
pub const TYPE: &str = "type";
/// Display label text.
pub const LABEL: &str = "label";
/// Whether the megawidget starts enabled.
pub const ENABLE: &str = "enable";
/// Whether the megawidget starts editable.
pub const EDITABLE: &str = "editable";
/// Width in layout columns.
pub const WIDTH: &str = "width";
/// Whether the megawidget fills the full width of its column.
pub const FULL_WIDTH: &str = "full_width";
/// Vertical spacing above the megawidget.
pub const SPACING: &str = "spacing";
/// Initial state value(s).
pub const VALUES: &str = "values";
/// Choice list for choice-based kinds.
pub const CHOICES: &str = "choices";
/// Free-form data passed through with every notification.
pub const CALLBACK_DATA: &str = "callback_data";
/// Child specifier maps for the group kind.
pub const FIELDS: &str = "fields";
/// Page list for the tabbed panel kind.
pub const PAGES: &str = "pages";
/// Page name inside a tabbed panel page map.
pub const PAGE: &str = "page";
/// Spinner minimum value.
pub const MIN_VALUE: &str = "min_value";
/// Spinner maximum value.
pub const MAX_VALUE: &str = "max_value";
/// Spinner step size; also a mutable property.
pub const INCREMENT_DELTA: &str = "increment_delta";
/// Whether a menu attaches to its parent menu instead of the menu bar.
pub const ON_PARENT_MENU: &str = "on_parent_menu";
/// Whether a menu is preceded by a separator on its parent.
pub const LEADING_SEPARATOR: &str = "leading_separator";

/// Choice bundle display name.
pub const NAME: &str = "name";
/// Choice bundle identifier (defaults to the name).
pub const IDENTIFIER: &str = "identifier";
/// Reserved key for nested choices inside a hierarchical bundle.
pub const CHILDREN: &str = "children";
