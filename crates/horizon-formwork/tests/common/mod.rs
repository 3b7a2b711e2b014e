//! Shared test doubles: a binder that records every push a megawidget makes,
//! and listener recorders for the three notification channels.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use parking_lot::Mutex;

use horizon_formwork::megawidget::{ControlBinder, ControlBinding, HostHandle, Usability};
use horizon_formwork::specifier::Specifier;
use horizon_formwork::{
    NotificationListener, ParamValue, ResizeListener, StateChangeListener,
};

/// Install the env-filtered subscriber once per test binary, so
/// `RUST_LOG=horizon_formwork=trace` surfaces the crate's spans in test
/// output.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// One push received by a recording binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Push {
    Usability(Usability),
    State(String, ParamValue),
    Property(String, ParamValue),
}

/// A binder whose bindings log every push, keyed by megawidget identifier.
#[derive(Clone, Default)]
pub struct RecordingBinder {
    log: Arc<Mutex<Vec<(String, Push)>>>,
}

impl RecordingBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every push so far, in order, as `(identifier, push)` pairs.
    pub fn pushes(&self) -> Vec<(String, Push)> {
        self.log.lock().clone()
    }

    /// The pushes received by one megawidget's binding.
    pub fn pushes_for(&self, identifier: &str) -> Vec<Push> {
        self.log
            .lock()
            .iter()
            .filter(|(id, _)| id == identifier)
            .map(|(_, push)| push.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

impl ControlBinder for RecordingBinder {
    fn bind(&self, _parent: HostHandle<'_>, specifier: &dyn Specifier) -> Box<dyn ControlBinding> {
        Box::new(RecordingBinding {
            identifier: specifier.identifier().as_str().to_string(),
            log: self.log.clone(),
        })
    }
}

struct RecordingBinding {
    identifier: String,
    log: Arc<Mutex<Vec<(String, Push)>>>,
}

impl ControlBinding for RecordingBinding {
    fn apply_usability(&mut self, usability: Usability) {
        self.log
            .lock()
            .push((self.identifier.clone(), Push::Usability(usability)));
    }

    fn apply_state(&mut self, state_identifier: &str, value: &ParamValue) {
        self.log.lock().push((
            self.identifier.clone(),
            Push::State(state_identifier.to_string(), value.clone()),
        ));
    }

    fn apply_property(&mut self, name: &str, value: &ParamValue) {
        self.log.lock().push((
            self.identifier.clone(),
            Push::Property(name.to_string(), value.clone()),
        ));
    }
}

/// Records notification-listener invocations.
#[derive(Default)]
pub struct NotificationRecorder {
    pub invocations: Mutex<Vec<(String, Option<ParamValue>)>>,
}

impl NotificationListener for NotificationRecorder {
    fn megawidget_invoked(&self, identifier: &str, callback_data: Option<&ParamValue>) {
        self.invocations
            .lock()
            .push((identifier.to_string(), callback_data.cloned()));
    }
}

/// Records state-change-listener invocations.
#[derive(Default)]
pub struct StateChangeRecorder {
    pub changes: Mutex<Vec<(String, String, ParamValue)>>,
}

impl StateChangeListener for StateChangeRecorder {
    fn megawidget_state_changed(&self, identifier: &str, state_identifier: &str, value: &ParamValue) {
        self.changes.lock().push((
            identifier.to_string(),
            state_identifier.to_string(),
            value.clone(),
        ));
    }
}

/// Records resize-listener invocations.
#[derive(Default)]
pub struct ResizeRecorder {
    pub resizes: Mutex<Vec<String>>,
}

impl ResizeListener for ResizeRecorder {
    fn megawidget_resized(&self, identifier: &str) {
        self.resizes.lock().push(identifier.to_string());
    }
}
