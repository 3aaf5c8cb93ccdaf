//! Page conventions
//!
//! Class names and selectors the widgets bind to. Every key is optional in
//! JSON; missing keys keep the defaults below.

use serde::Deserialize;

use crate::Result;

/// Default truncation length for [`crate::ellipsis`]
pub const DEFAULT_ELLIPSIS_CHARS: usize = 50;

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub selection: SelectionSelectors,
    pub validation: ValidationClasses,
    /// Class that hides an element
    pub hidden_class: String,
    /// Class mirrored onto disabled bulk-action controls
    pub disabled_class: String,
    pub ellipsis_max_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            selection: SelectionSelectors::default(),
            validation: ValidationClasses::default(),
            hidden_class: "hidden".to_string(),
            disabled_class: "disabled".to_string(),
            ellipsis_max_chars: DEFAULT_ELLIPSIS_CHARS,
        }
    }
}

impl UiConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Selectors for the table selection widgets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectionSelectors {
    pub row: String,
    pub select_all: String,
    pub bulk_action: String,
    pub none_indicator: String,
    pub single_indicator: String,
    pub multiple_indicator: String,
    pub count_label: String,
}

impl Default for SelectionSelectors {
    fn default() -> Self {
        Self {
            row: ".select-one".to_string(),
            select_all: ".select-all".to_string(),
            bulk_action: ".btn-toggle".to_string(),
            none_indicator: ".selected-default".to_string(),
            single_indicator: ".selected-single".to_string(),
            multiple_indicator: ".selected-multiple".to_string(),
            count_label: ".selected-count".to_string(),
        }
    }
}

/// Classes the form validator marks fields with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationClasses {
    pub error_class: String,
    pub success_class: String,
}

impl Default for ValidationClasses {
    fn default() -> Self {
        Self {
            error_class: "has-error".to_string(),
            success_class: "has-success".to_string(),
        }
    }
}
