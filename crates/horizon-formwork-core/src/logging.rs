//! Logging facilities for Horizon Formwork.
//!
//! The framework is instrumented with the `tracing` crate and never installs
//! a subscriber itself. To see logs, install one in the hosting application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Events are target-scoped per subsystem so hosts can filter them with
//! `tracing` directives, e.g. `horizon_formwork::specifier=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_formwork_core";
    /// Listener dispatch target.
    pub const NOTIFY: &str = "horizon_formwork_core::notify";
    /// Specifier construction target.
    pub const SPECIFIER: &str = "horizon_formwork::specifier";
    /// Choices validation target.
    pub const CHOICES: &str = "horizon_formwork::choices";
    /// Megawidget runtime target.
    pub const MEGAWIDGET: &str = "horizon_formwork::megawidget";
    /// Specifier factory target.
    pub const FACTORY: &str = "horizon_formwork::factory";
}
