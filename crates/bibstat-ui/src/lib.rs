//! bibstat UI - form field state and table row selection
//!
//! Two independent widgets that work against a live [`Document`]:
//!
//! - [`Field`] gives a form input uniform enable/disable and value access,
//!   keeping a dependent control and the page's validator consistent with
//!   the input's enabled state.
//! - [`SelectionController`] keeps a table's select-all checkbox, bulk-action
//!   buttons and selection-count indicator consistent with its checked rows.
//!
//! Both are handed the elements they operate on ([`Target`]) instead of
//! looking them up by fixed ids, so a page can carry several forms and
//! tables.
//!
//! # Example
//! ```rust,ignore
//! use bibstat_ui::{Field, SelectionController, UiConfig, Unvalidated};
//!
//! let controller = SelectionController::from_config(&UiConfig::default())?;
//! let attachment = controller.attach(&mut doc);
//!
//! let field = Field::new(input).with_auxiliary(dropdown);
//! field.disable(&mut doc, &mut Unvalidated);
//! ```

mod config;
mod error;
mod field;
mod number;
mod selection;
mod target;
mod text;
mod validation;

pub use bibstat_dom::Document;
pub use config::{DEFAULT_ELLIPSIS_CHARS, SelectionSelectors, UiConfig, ValidationClasses};
pub use error::{Result, UiError};
pub use field::{CHANGE_EVENTS, ChangeSubscription, Field};
pub use number::to_number;
pub use selection::{
    DisplayMode, SelectionAttachment, SelectionBindings, SelectionController, SelectionSummary,
};
pub use target::Target;
pub use text::ellipsis;
pub use validation::{
    FieldStatus, FieldValidation, FormValidator, Unvalidated, ValidationConstraints, ValidityState,
};
