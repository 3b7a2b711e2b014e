//! The concrete megawidget kinds.
//!
//! Each kind is one file holding a `*Specifier` (the validated immutable
//! description) and a `*Megawidget` (the live object it creates). The kinds
//! compose the shared pieces rather than inheriting them: every specifier
//! embeds a [`SpecifierBase`], every megawidget a [`MegawidgetBase`], and
//! choice-based kinds embed a [`ChoiceTree`].
//!
//! | tag | state |
//! |---|---|
//! | `label` | none |
//! | `button` | none (notifies on activation) |
//! | `checkbox` | boolean |
//! | `integer_spinner` | bounded integer |
//! | `time_range` | one epoch-millis instant per identifier part |
//! | `combo_box` | single choice |
//! | `check_list` | list of choices |
//! | `check_tree` | subset of a hierarchical choice tree |
//! | `list_builder` | open list of strings |
//! | `menu` | subset of a hierarchical choice tree |
//! | `group` | none (owns children) |
//! | `tabbed_panel` | none (owns children across named pages) |
//!
//! [`SpecifierBase`]: crate::specifier::SpecifierBase
//! [`MegawidgetBase`]: crate::megawidget::MegawidgetBase
//! [`ChoiceTree`]: crate::choices::ChoiceTree

mod button;
mod check_list;
mod check_tree;
mod checkbox;
mod combo_box;
mod group;
mod label;
mod list_builder;
mod menu;
mod spinner;
mod tabbed_panel;
mod time_range;

pub use button::{ButtonMegawidget, ButtonSpecifier};
pub use check_list::{CheckListMegawidget, CheckListSpecifier};
pub use check_tree::{CheckTreeMegawidget, CheckTreeSpecifier};
pub use checkbox::{CheckboxMegawidget, CheckboxSpecifier};
pub use combo_box::{ComboBoxMegawidget, ComboBoxSpecifier};
pub use group::{GroupMegawidget, GroupSpecifier};
pub use label::{LabelMegawidget, LabelSpecifier};
pub use list_builder::{ListBuilderMegawidget, ListBuilderSpecifier};
pub use menu::{MenuMegawidget, MenuSpecifier};
pub use spinner::{IntegerSpinnerMegawidget, IntegerSpinnerSpecifier};
pub use tabbed_panel::{TabbedPanelMegawidget, TabbedPanelSpecifier};
pub use time_range::{TimeRangeMegawidget, TimeRangeSpecifier};
