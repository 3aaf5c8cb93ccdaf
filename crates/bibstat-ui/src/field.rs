//! Field state
//!
//! Uniform enable/disable and value access over one form input. A `Field`
//! holds only references; every call re-reads the live page, so there is no
//! cached state to go stale.
//!
//! Mutations are no-ops unless the field resolves to exactly one attached
//! element. Optional and conditionally rendered inputs can therefore be
//! driven unconditionally.

use bibstat_dom::{Document, DomEvent, EventType, HandlerId, NodeId, handler};

use crate::number::to_number;
use crate::target::Target;
use crate::validation::FieldValidation;

/// Events that signal the field content may have changed
pub const CHANGE_EVENTS: [EventType; 3] = [EventType::Change, EventType::Paste, EventType::KeyUp];

/// A form input plus the control whose enabled state tracks it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    element: Target,
    auxiliary: Option<Target>,
    validation_name: Option<String>,
}

impl Field {
    pub fn new(element: impl Into<Target>) -> Self {
        Self {
            element: element.into(),
            auxiliary: None,
            validation_name: None,
        }
    }

    /// Attach a dependent control (e.g. a dropdown button) that is enabled
    /// and disabled together with the field. Every element it resolves to
    /// is updated.
    pub fn with_auxiliary(mut self, control: impl Into<Target>) -> Self {
        self.auxiliary = Some(control.into());
        self
    }

    /// Register with the validator under `name` instead of the element's
    /// `name` attribute
    pub fn with_validation_name(mut self, name: impl Into<String>) -> Self {
        self.validation_name = Some(name.into());
        self
    }

    pub fn target(&self) -> &Target {
        &self.element
    }

    pub fn auxiliary(&self) -> Option<&Target> {
        self.auxiliary.as_ref()
    }

    /// The field's element, if exactly one is attached
    pub fn element(&self, doc: &Document) -> Option<NodeId> {
        self.element.resolve_one(doc)
    }

    /// Name the field is validated under
    pub fn validation_name(&self, doc: &Document) -> Option<String> {
        if let Some(name) = &self.validation_name {
            return Some(name.clone());
        }
        let element = self.element(doc)?;
        doc.attr(element, "name").map(str::to_string)
    }

    /// Native disabled flag. An absent field is not disabled.
    pub fn is_disabled(&self, doc: &Document) -> bool {
        self.element(doc).is_some_and(|id| doc.is_disabled(id))
    }

    pub fn is_enabled(&self, doc: &Document) -> bool {
        !self.is_disabled(doc)
    }

    /// Disable the field.
    ///
    /// Displayed validation state is cleared and the field's validators are
    /// deactivated before anything is marked disabled, so no error indicator
    /// survives on a disabled field. Returns false if the field is absent.
    pub fn disable<V>(&self, doc: &mut Document, validation: &mut V) -> bool
    where
        V: FieldValidation + ?Sized,
    {
        let Some(element) = self.element(doc) else {
            tracing::trace!("field {} not on page, disable skipped", self.element);
            return false;
        };

        match self.validation_name(doc) {
            Some(name) if validation.is_registered(&name) => {
                validation.reset_field(doc, element);
                validation.enable_field_validators(&name, false);
            }
            _ => tracing::trace!("no validators for field {}", self.element),
        }

        self.set_auxiliary_disabled(doc, true);
        doc.set_disabled(element, true);
        tracing::debug!("disabled field {}", self.element);
        true
    }

    /// Enable the field and reactivate its validators. Validation is not run;
    /// the field only becomes eligible again. Returns false if the field is
    /// absent.
    pub fn enable<V>(&self, doc: &mut Document, validation: &mut V) -> bool
    where
        V: FieldValidation + ?Sized,
    {
        let Some(element) = self.element(doc) else {
            tracing::trace!("field {} not on page, enable skipped", self.element);
            return false;
        };

        self.set_auxiliary_disabled(doc, false);
        doc.set_disabled(element, false);

        if let Some(name) = self.validation_name(doc) {
            if validation.is_registered(&name) {
                validation.enable_field_validators(&name, true);
            }
        }
        tracing::debug!("enabled field {}", self.element);
        true
    }

    fn set_auxiliary_disabled(&self, doc: &mut Document, disabled: bool) {
        let Some(auxiliary) = &self.auxiliary else {
            return;
        };
        for control in auxiliary.resolve(doc) {
            doc.set_disabled(control, disabled);
        }
    }

    /// Call `handler` whenever the content may have changed: on change,
    /// paste and key release. Returns None if the field is absent.
    pub fn on_change<F>(&self, doc: &mut Document, handler_fn: F) -> Option<ChangeSubscription>
    where
        F: FnMut(&mut Document, &DomEvent) + 'static,
    {
        let element = self.element(doc)?;
        let shared = handler(handler_fn);
        let handlers = CHANGE_EVENTS
            .iter()
            .map(|&event_type| doc.add_listener(element, event_type, shared.clone()))
            .collect();
        Some(ChangeSubscription { element, handlers })
    }

    /// Current content with surrounding whitespace removed; empty if absent
    pub fn value(&self, doc: &Document) -> String {
        self.element(doc)
            .and_then(|id| doc.value(id))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// [`Field::value`] as a number. NaN when the content is not numeric;
    /// callers must check.
    pub fn number(&self, doc: &Document) -> f64 {
        to_number(&self.value(doc))
    }
}

/// Handle for a registered change handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSubscription {
    element: NodeId,
    handlers: Vec<HandlerId>,
}

impl ChangeSubscription {
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Stop receiving notifications
    pub fn cancel(self, doc: &mut Document) {
        for id in self.handlers {
            doc.remove_listener(self.element, id);
        }
    }
}
