//! Form validation
//!
//! [`FieldValidation`] is the seam fields use to talk to whatever validates
//! the page. [`FormValidator`] is the concrete implementation: validators
//! registered per field name, with a displayed status per element.

use std::collections::HashMap;

use bibstat_dom::{Document, NodeId, Selector};

use crate::config::UiConfig;
use crate::number::to_number;

/// Validation subsystem as seen by a field
pub trait FieldValidation {
    /// Whether any validators are registered under `name`
    fn is_registered(&self, name: &str) -> bool;

    /// Whether the validators for `name` are currently active
    fn validators_enabled(&self, name: &str) -> bool;

    /// Activate or deactivate the validators for `name`
    fn enable_field_validators(&mut self, name: &str, enabled: bool);

    /// Clear any displayed validation state of `element`
    fn reset_field(&mut self, doc: &mut Document, element: NodeId);
}

/// For pages without a validated form
#[derive(Debug, Clone, Copy, Default)]
pub struct Unvalidated;

impl FieldValidation for Unvalidated {
    fn is_registered(&self, _name: &str) -> bool {
        false
    }

    fn validators_enabled(&self, _name: &str) -> bool {
        false
    }

    fn enable_field_validators(&mut self, _name: &str, _enabled: bool) {}

    fn reset_field(&mut self, _doc: &mut Document, _element: NodeId) {}
}

/// Validity flags for one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub too_long: bool,
    pub too_short: bool,
    /// Numeric constraint on text that is not a number
    pub bad_input: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
}

impl ValidityState {
    pub fn is_valid(&self) -> bool {
        !self.value_missing
            && !self.too_long
            && !self.too_short
            && !self.bad_input
            && !self.range_underflow
            && !self.range_overflow
            && !self.step_mismatch
    }

    /// Message for the first failed constraint, empty when valid
    pub fn message(&self) -> &'static str {
        if self.value_missing {
            "Please fill out this field."
        } else if self.bad_input {
            "Please enter a number."
        } else if self.too_long {
            "Please shorten this text."
        } else if self.too_short {
            "Please lengthen this text."
        } else if self.range_underflow {
            "Value must be greater or equal to minimum."
        } else if self.range_overflow {
            "Value must be less or equal to maximum."
        } else if self.step_mismatch {
            "Please enter a valid value."
        } else {
            ""
        }
    }
}

/// Constraints registered for a field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationConstraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Value must be numeric even without bounds
    pub numeric: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl ValidationConstraints {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    pub fn number() -> Self {
        Self {
            numeric: true,
            ..Default::default()
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.numeric = true;
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn is_numeric(&self) -> bool {
        self.numeric || self.min.is_some() || self.max.is_some() || self.step.is_some()
    }

    /// Validate trimmed field text. Empty optional fields are valid.
    pub fn validate(&self, value: &str) -> ValidityState {
        let mut state = ValidityState::default();

        if value.is_empty() {
            state.value_missing = self.required;
            return state;
        }

        let len = value.chars().count();
        if let Some(max) = self.max_length {
            state.too_long = len > max;
        }
        if let Some(min) = self.min_length {
            state.too_short = len < min;
        }

        if self.is_numeric() {
            let n = to_number(value);
            if n.is_nan() {
                state.bad_input = true;
                return state;
            }
            if let Some(min) = self.min {
                state.range_underflow = n < min;
            }
            if let Some(max) = self.max {
                state.range_overflow = n > max;
            }
            if let Some(step) = self.step {
                let base = self.min.unwrap_or(0.0);
                state.step_mismatch = step > 0.0 && ((n - base) % step).abs() > 1e-10;
            }
        }

        state
    }
}

/// Displayed validation result for one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStatus {
    pub validity: ValidityState,
    pub message: String,
}

#[derive(Debug, Clone)]
struct FieldRule {
    constraints: ValidationConstraints,
    enabled: bool,
}

/// Validator for one form, keyed by field name
#[derive(Debug, Clone)]
pub struct FormValidator {
    fields: HashMap<String, FieldRule>,
    status: HashMap<NodeId, FieldStatus>,
    error_class: String,
    success_class: String,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator {
    pub fn new() -> Self {
        Self::from_config(&UiConfig::default())
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            fields: HashMap::new(),
            status: HashMap::new(),
            error_class: config.validation.error_class.clone(),
            success_class: config.validation.success_class.clone(),
        }
    }

    /// Register validators for a field name; they start active
    pub fn register(&mut self, name: &str, constraints: ValidationConstraints) -> &mut Self {
        self.fields.insert(
            name.to_string(),
            FieldRule {
                constraints,
                enabled: true,
            },
        );
        self
    }

    /// Displayed status of an element, if it has been validated
    pub fn status(&self, element: NodeId) -> Option<&FieldStatus> {
        self.status.get(&element)
    }

    /// Validate every enabled element named `name`. Unknown names and
    /// deactivated validators are valid.
    pub fn validate_field(&mut self, doc: &mut Document, name: &str) -> bool {
        let Some(rule) = self.fields.get(name) else {
            tracing::trace!("no validators registered for {:?}", name);
            return true;
        };
        if !rule.enabled {
            return true;
        }
        let constraints = rule.constraints.clone();

        let mut valid = true;
        for element in doc.query_all(&Selector::attr_equals("name", name)) {
            if doc.is_disabled(element) {
                continue;
            }
            let value = doc.value(element).unwrap_or_default().trim().to_string();
            let validity = constraints.validate(&value);
            let ok = validity.is_valid();
            valid &= ok;

            doc.toggle_class(element, &self.error_class, Some(!ok));
            doc.toggle_class(element, &self.success_class, Some(ok));
            self.status.insert(
                element,
                FieldStatus {
                    validity,
                    message: validity.message().to_string(),
                },
            );
        }

        tracing::debug!("validated {:?}: {}", name, if valid { "valid" } else { "invalid" });
        valid
    }

    /// Validate all registered fields
    pub fn validate(&mut self, doc: &mut Document) -> bool {
        let mut names: Vec<String> = self.fields.keys().cloned().collect();
        names.sort();
        let mut valid = true;
        for name in names {
            valid &= self.validate_field(doc, &name);
        }
        valid
    }
}

impl FieldValidation for FormValidator {
    fn is_registered(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn validators_enabled(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|rule| rule.enabled)
    }

    fn enable_field_validators(&mut self, name: &str, enabled: bool) {
        if let Some(rule) = self.fields.get_mut(name) {
            rule.enabled = enabled;
        }
    }

    fn reset_field(&mut self, doc: &mut Document, element: NodeId) {
        self.status.remove(&element);
        doc.remove_class(element, &self.error_class);
        doc.remove_class(element, &self.success_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_constraint() {
        let c = ValidationConstraints::required();
        assert!(c.validate("").value_missing);
        assert!(c.validate("x").is_valid());
        assert!(ValidationConstraints::default().validate("").is_valid());
    }

    #[test]
    fn test_numeric_constraints() {
        let c = ValidationConstraints::number().with_range(0.0, 100.0);
        assert!(c.validate("abc").bad_input);
        assert!(c.validate("-1").range_underflow);
        assert!(c.validate("101").range_overflow);
        assert!(c.validate("50").is_valid());

        let stepped = ValidationConstraints {
            step: Some(5.0),
            ..Default::default()
        };
        assert!(stepped.validate("7").step_mismatch);
        assert!(stepped.validate("10").is_valid());
    }

    #[test]
    fn test_length_constraints() {
        let c = ValidationConstraints {
            min_length: Some(2),
            max_length: Some(4),
            ..Default::default()
        };
        assert!(c.validate("a").too_short);
        assert!(c.validate("abcde").too_long);
        assert!(c.validate("åäö").is_valid());
    }

    #[test]
    fn test_message_order() {
        let state = ValidityState {
            value_missing: true,
            too_long: true,
            ..Default::default()
        };
        assert_eq!(state.message(), "Please fill out this field.");
        assert_eq!(ValidityState::default().message(), "");
    }

    #[test]
    fn test_validate_marks_and_reset_clears() {
        let mut doc = Document::new();
        let input = doc.append_element(doc.root(), "input", &[("name", "staff")]);
        let mut validator = FormValidator::new();
        validator.register("staff", ValidationConstraints::number());

        doc.set_value(input, "many");
        assert!(!validator.validate_field(&mut doc, "staff"));
        assert!(doc.has_class(input, "has-error"));
        assert!(validator.status(input).unwrap().validity.bad_input);

        validator.reset_field(&mut doc, input);
        assert!(!doc.has_class(input, "has-error"));
        assert!(validator.status(input).is_none());
    }

    #[test]
    fn test_disabled_validators_pass() {
        let mut doc = Document::new();
        let input = doc.append_element(doc.root(), "input", &[("name", "staff")]);
        let mut validator = FormValidator::new();
        validator.register("staff", ValidationConstraints::required());

        validator.enable_field_validators("staff", false);
        assert!(validator.validate(&mut doc));
        assert!(validator.status(input).is_none());

        validator.enable_field_validators("staff", true);
        assert!(!validator.validate(&mut doc));
    }

    #[test]
    fn test_unregistered_name_is_valid() {
        let mut doc = Document::new();
        let mut validator = FormValidator::new();
        assert!(validator.validate_field(&mut doc, "missing"));
        assert!(!validator.is_registered("missing"));
        validator.enable_field_validators("missing", true);
        assert!(!validator.validators_enabled("missing"));
    }
}
