//! Option bundles shared across specifier kinds.
//!
//! These are the composed-in "options manager" helpers: small immutable
//! value structs embedded by value inside a specifier, so enable/width/
//! spacing/menu-placement parsing is written once instead of once per kind.

use horizon_formwork_core::SpecResult;

use crate::specifier::{SpecifierBase, params};

/// Layout and editability options shared by all control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOptions {
    /// Whether the control starts editable (as opposed to read-only).
    pub editable: bool,
    /// Width in layout columns; at least 1.
    pub width: i64,
    /// Whether the control stretches to the full width of its column.
    pub full_width: bool,
    /// Vertical spacing above the control, in pixels; non-negative.
    pub spacing: i64,
}

impl ControlOptions {
    /// Parse the control options from a specifier's parameters.
    pub fn from_parameters(base: &SpecifierBase) -> SpecResult<Self> {
        Ok(Self {
            editable: base.optional_bool(params::EDITABLE, true)?,
            width: base.optional_i64_at_least(params::WIDTH, 1, 1)?,
            full_width: base.optional_bool(params::FULL_WIDTH, false)?,
            spacing: base.optional_i64_at_least(params::SPACING, 0, 0)?,
        })
    }
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            editable: true,
            width: 1,
            full_width: false,
            spacing: 0,
        }
    }
}

/// Placement options shared by menu kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuOptions {
    /// Attach to the parent menu instead of the top-level menu bar.
    pub on_parent_menu: bool,
    /// Precede the menu with a separator on its parent.
    pub leading_separator: bool,
}

impl MenuOptions {
    /// Parse the menu options from a specifier's parameters.
    pub fn from_parameters(base: &SpecifierBase) -> SpecResult<Self> {
        Ok(Self {
            on_parent_menu: base.optional_bool(params::ON_PARENT_MENU, false)?,
            leading_separator: base.optional_bool(params::LEADING_SEPARATOR, false)?,
        })
    }
}
