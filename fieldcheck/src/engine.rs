//! Activation lifecycle and the interaction entry point.
//!
//! An [`Engine`] holds at most one [`Activation`] per form id. Activating a
//! form that is already active tears the old activation down first,
//! aborting every pending timer, so no stale timer can fire against stale
//! configuration.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};

use formdom::{FieldEvent, Form};

use crate::error::ConfigError;
use crate::options::{RawOptions, ValidationOptions};
use crate::pipeline::{self, Outcome};
use crate::report::{LogReporter, Observers, Reporter};
use crate::resolver::resolve;
use crate::scheduler::DebounceScheduler;

/// One activated form: its resolved options, reporter, observers, and
/// debounce scheduler. Dropping an activation aborts its pending timers.
pub struct Activation {
    form: Arc<RwLock<Form>>,
    options: Arc<ValidationOptions>,
    reporter: Arc<dyn Reporter>,
    observers: Observers,
    scheduler: DebounceScheduler,
}

impl Activation {
    fn new(
        form: Arc<RwLock<Form>>,
        options: ValidationOptions,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let scheduler = DebounceScheduler::new(options.timeout);
        Self {
            form,
            options: Arc::new(options),
            reporter,
            observers: Observers::new(),
            scheduler,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// Number of timers currently outstanding, across all fields.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Entry point for every observed blur/change/input event on a field
    /// of the activated set. Synchronous; the validation itself runs after
    /// the quiet period, on the original event's identity, against the
    /// field's value as it stands at fire time.
    pub fn on_interaction(&self, event: FieldEvent) {
        if !self.options.fields.contains_key(&event.field) {
            trace!("interaction on unconfigured field {:?}, ignored", event.field);
            return;
        }

        let form = Arc::clone(&self.form);
        let options = Arc::clone(&self.options);
        let reporter = Arc::clone(&self.reporter);
        let observers = self.observers.clone();
        let key = event.field.clone();

        self.scheduler.schedule(&key, move || {
            let Ok(form) = form.read() else {
                return;
            };
            let Some(outcome) = pipeline::validate(&event, &form, &options) else {
                return;
            };
            let Some(field) = form.field_by_name(&event.field) else {
                return;
            };
            match &outcome {
                Outcome::Valid { .. } => reporter.on_valid(field, &form, &options),
                Outcome::Invalid(failure) => reporter.on_invalid(field, failure, &form, &options),
            }
            observers.emit(field, &outcome);
        });
    }

    /// Abort all pending timers without dropping the activation.
    pub fn cancel_pending(&self) {
        self.scheduler.cancel_all();
    }
}

impl std::fmt::Debug for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Activation")
            .field("options", &self.options)
            .field("observers", &self.observers)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

/// Registry of activations, keyed by form id.
#[derive(Debug, Default)]
pub struct Engine {
    activations: HashMap<String, Activation>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a form with the default (log-only) reporter.
    pub fn activate(
        &mut self,
        form: Arc<RwLock<Form>>,
        raw: RawOptions,
    ) -> Result<(), ConfigError> {
        self.activate_with(form, raw, Arc::new(LogReporter))
    }

    /// Activate a form with an injected reporter. Re-entrant: an existing
    /// activation for the same form id is fully torn down first.
    pub fn activate_with(
        &mut self,
        form: Arc<RwLock<Form>>,
        raw: RawOptions,
        reporter: Arc<dyn Reporter>,
    ) -> Result<(), ConfigError> {
        let (form_id, options) = {
            let Ok(mut guard) = form.write() else {
                warn!("form lock poisoned, activation skipped");
                return Ok(());
            };
            let options = resolve(&guard, &raw)?;
            // Native validation is suppressed once the engine owns the form.
            guard.novalidate = true;
            (guard.id.clone(), options)
        };

        if let Some(stale) = self.activations.remove(&form_id) {
            debug!("re-activating form {form_id:?}, cancelling stale timers");
            stale.cancel_pending();
        }

        debug!(
            "activated form {form_id:?} with {} field(s), timeout {:?}",
            options.fields.len(),
            options.timeout
        );
        self.activations
            .insert(form_id, Activation::new(form, options, reporter));
        Ok(())
    }

    /// Tear an activation down. Returns false if the form was not active.
    pub fn deactivate(&mut self, form_id: &str) -> bool {
        match self.activations.remove(form_id) {
            Some(activation) => {
                activation.cancel_pending();
                debug!("deactivated form {form_id:?}");
                true
            }
            None => false,
        }
    }

    pub fn activation(&self, form_id: &str) -> Option<&Activation> {
        self.activations.get(form_id)
    }

    /// Forward an interaction event to the form's activation, if any.
    pub fn on_interaction(&self, form_id: &str, event: FieldEvent) {
        match self.activations.get(form_id) {
            Some(activation) => activation.on_interaction(event),
            None => trace!("interaction on inactive form {form_id:?}, ignored"),
        }
    }

    /// Activate every form carrying the auto-activation marker, with
    /// default options. Glue over `activate`, not core. Returns how many
    /// forms were activated.
    pub fn auto_activate(
        &mut self,
        forms: impl IntoIterator<Item = Arc<RwLock<Form>>>,
    ) -> Result<usize, ConfigError> {
        let mut activated = 0;
        for form in forms {
            let wants = form
                .read()
                .map(|f| f.wants_auto_activation())
                .unwrap_or(false);
            if wants {
                self.activate(form, RawOptions::default())?;
                activated += 1;
            }
        }
        Ok(activated)
    }
}
