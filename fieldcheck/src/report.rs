//! Outcome reporting: the injected reporter strategy and the explicit
//! observer registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use uuid::Uuid;

use formdom::{Field, Form};

use crate::options::ValidationOptions;
use crate::pipeline::{Failure, Outcome};

/// Strategy for surfacing validation outcomes, supplied at activation time.
/// The default only logs; UI layers override this to render errors.
pub trait Reporter: Send + Sync {
    fn on_invalid(&self, field: &Field, failure: &Failure, form: &Form, options: &ValidationOptions);

    fn on_valid(&self, field: &Field, form: &Form, options: &ValidationOptions);
}

/// Inert default reporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_invalid(
        &self,
        field: &Field,
        failure: &Failure,
        _form: &Form,
        _options: &ValidationOptions,
    ) {
        warn!(
            "field {:?} invalid ({:?}{}): {}",
            field.name,
            failure.kind,
            if failure.live { ", live" } else { "" },
            failure.message
        );
    }

    fn on_valid(&self, field: &Field, _form: &Form, _options: &ValidationOptions) {
        debug!("field {:?} valid", field.name);
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

type ObserverFn = Box<dyn Fn(&Field, &Outcome) + Send + Sync>;

/// Explicit subscribe/unsubscribe registry. Every produced outcome, valid
/// or invalid, is delivered to all subscribers; a live-gated no-op delivers
/// nothing.
#[derive(Default)]
pub struct Observers {
    inner: Arc<Mutex<HashMap<SubscriberId, ObserverFn>>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriberId
    where
        F: Fn(&Field, &Outcome) + Send + Sync + 'static,
    {
        let id = SubscriberId(Uuid::new_v4());
        if let Ok(mut observers) = self.inner.lock() {
            observers.insert(id, Box::new(observer));
        }
        id
    }

    /// Remove a subscriber. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        match self.inner.lock() {
            Ok(mut observers) => observers.remove(&id).is_some(),
            Err(_) => false,
        }
    }

    pub fn emit(&self, field: &Field, outcome: &Outcome) {
        if let Ok(observers) = self.inner.lock() {
            for observer in observers.values() {
                observer(field, outcome);
            }
        }
    }
}

impl Clone for Observers {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.inner.lock().map(|o| o.len()).unwrap_or(0);
        write!(f, "Observers({len} subscriber(s))")
    }
}
