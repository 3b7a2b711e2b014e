//! Capability records for megawidget kinds.
//!
//! Instead of a deep inheritance tree, each kind carries a
//! [`Capabilities`] struct-of-flags derived at construction. The flags say
//! what the kind *is* (a control, stateful, a notifier, a parent, a menu);
//! the per-capability traits in [`crate::megawidget`] say what it can *do*.

/// How much vertical room a control kind occupies in a form column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOccupancy {
    /// Fits on a single form line (labels, buttons, combo boxes).
    Single,
    /// Spans multiple lines (lists, trees, groups).
    Multi,
}

/// The capability record of one megawidget kind.
///
/// Built with the `const` constructors and `with_*` builders:
///
/// ```
/// use horizon_formwork::specifier::{Capabilities, LineOccupancy};
///
/// let caps = Capabilities::control(LineOccupancy::Single)
///     .with_stateful()
///     .with_notifier();
/// assert!(caps.control && caps.stateful && caps.notifier);
/// assert!(!caps.menu);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The kind renders as an in-form control.
    pub control: bool,
    /// The kind owns identifier-addressed state.
    pub stateful: bool,
    /// The kind can notify an external listener on user activation.
    pub notifier: bool,
    /// The kind owns child megawidgets.
    pub parent: bool,
    /// The kind renders as a menu rather than an in-form control.
    pub menu: bool,
    /// Line occupancy for control kinds; `None` for menus.
    pub occupancy: Option<LineOccupancy>,
}

impl Capabilities {
    /// A control kind with the given line occupancy.
    pub const fn control(occupancy: LineOccupancy) -> Self {
        Self {
            control: true,
            stateful: false,
            notifier: false,
            parent: false,
            menu: false,
            occupancy: Some(occupancy),
        }
    }

    /// A menu kind.
    pub const fn menu() -> Self {
        Self {
            control: false,
            stateful: false,
            notifier: false,
            parent: false,
            menu: true,
            occupancy: None,
        }
    }

    /// Mark the kind as stateful.
    pub const fn with_stateful(mut self) -> Self {
        self.stateful = true;
        self
    }

    /// Mark the kind as a notifier.
    pub const fn with_notifier(mut self) -> Self {
        self.notifier = true;
        self
    }

    /// Mark the kind as a parent of child megawidgets.
    pub const fn with_parent(mut self) -> Self {
        self.parent = true;
        self
    }
}
