//! Table row selection
//!
//! Keeps the select-all checkbox, the bulk-action buttons and the
//! selection-count indicator consistent with the checked row checkboxes.
//! Every recomputation scans the rows afresh; nothing is cached between
//! events.

use std::rc::Rc;

use bibstat_dom::{Document, EventType, HandlerId, NodeId, handler};

use crate::config::{SelectionSelectors, UiConfig};
use crate::target::Target;
use crate::Result;

/// Which selection-count indicator is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    None,
    Single,
    Multiple,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::None,
        DisplayMode::Single,
        DisplayMode::Multiple,
    ];

    pub fn from_count(checked: usize) -> Self {
        match checked {
            0 => Self::None,
            1 => Self::Single,
            _ => Self::Multiple,
        }
    }
}

/// Aggregate state of the row checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub checked: usize,
    pub total: usize,
}

impl SelectionSummary {
    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_count(self.checked)
    }

    /// Every row checked, and there is at least one row
    pub fn all_checked(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }

    pub fn any_checked(&self) -> bool {
        self.checked > 0
    }
}

/// The elements a selection controller drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionBindings {
    pub rows: Target,
    pub select_all: Target,
    pub bulk_actions: Target,
    pub none_indicator: Target,
    pub single_indicator: Target,
    pub multiple_indicator: Target,
    pub count_label: Target,
}

impl SelectionBindings {
    pub fn from_config(selectors: &SelectionSelectors) -> Result<Self> {
        Ok(Self {
            rows: Target::parse(&selectors.row)?,
            select_all: Target::parse(&selectors.select_all)?,
            bulk_actions: Target::parse(&selectors.bulk_action)?,
            none_indicator: Target::parse(&selectors.none_indicator)?,
            single_indicator: Target::parse(&selectors.single_indicator)?,
            multiple_indicator: Target::parse(&selectors.multiple_indicator)?,
            count_label: Target::parse(&selectors.count_label)?,
        })
    }

    pub fn indicator(&self, mode: DisplayMode) -> &Target {
        match mode {
            DisplayMode::None => &self.none_indicator,
            DisplayMode::Single => &self.single_indicator,
            DisplayMode::Multiple => &self.multiple_indicator,
        }
    }
}

/// Derives select-all, bulk-action and indicator state from the rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    bindings: SelectionBindings,
    hidden_class: String,
    disabled_class: String,
}

impl SelectionController {
    pub fn new(bindings: SelectionBindings) -> Self {
        let config = UiConfig::default();
        Self {
            bindings,
            hidden_class: config.hidden_class,
            disabled_class: config.disabled_class,
        }
    }

    pub fn from_config(config: &UiConfig) -> Result<Self> {
        Ok(Self::new(SelectionBindings::from_config(&config.selection)?)
            .with_classes(&config.hidden_class, &config.disabled_class))
    }

    /// Override the classes used for hiding indicators and marking
    /// disabled bulk-action controls
    pub fn with_classes(mut self, hidden_class: &str, disabled_class: &str) -> Self {
        self.hidden_class = hidden_class.to_string();
        self.disabled_class = disabled_class.to_string();
        self
    }

    pub fn bindings(&self) -> &SelectionBindings {
        &self.bindings
    }

    /// Count checked rows without touching the page
    pub fn summary(&self, doc: &Document) -> SelectionSummary {
        let rows = self.bindings.rows.resolve(doc);
        SelectionSummary {
            checked: rows.iter().filter(|&&id| doc.is_checked(id)).count(),
            total: rows.len(),
        }
    }

    /// Propagate a select-all toggle to every row checkbox
    pub fn on_select_all_toggled(&self, doc: &mut Document, checked: bool) {
        let rows = self.bindings.rows.resolve(doc);
        for &row in &rows {
            doc.set_checked(row, checked);
        }
        tracing::debug!(
            "select-all {}: {} rows updated",
            if checked { "checked" } else { "cleared" },
            rows.len()
        );
    }

    /// Rescan the rows and update, in order, the bulk-action controls, the
    /// select-all control and the indicator regions. Missing dependent
    /// controls are skipped.
    pub fn recompute_from_rows(&self, doc: &mut Document) -> SelectionSummary {
        let summary = self.summary(doc);
        let mode = summary.mode();

        let enabled = summary.any_checked();
        for button in self.resolve_or_trace(doc, &self.bindings.bulk_actions, "bulk-action") {
            doc.set_disabled(button, !enabled);
            doc.toggle_class(button, &self.disabled_class, Some(!enabled));
        }

        for control in self.resolve_or_trace(doc, &self.bindings.select_all, "select-all") {
            doc.set_checked(control, summary.all_checked());
        }

        for candidate in DisplayMode::ALL {
            let target = self.bindings.indicator(candidate);
            for region in self.resolve_or_trace(doc, target, "indicator") {
                doc.toggle_class(region, &self.hidden_class, Some(candidate != mode));
            }
        }

        if mode != DisplayMode::None {
            let text = summary.checked.to_string();
            for label in self.resolve_or_trace(doc, &self.bindings.count_label, "count label") {
                doc.set_text_content(label, &text);
            }
        }

        tracing::debug!(
            "selection {}/{} -> {:?}",
            summary.checked,
            summary.total,
            mode
        );
        summary
    }

    fn resolve_or_trace(&self, doc: &Document, target: &Target, what: &str) -> Vec<NodeId> {
        let ids = target.resolve(doc);
        if ids.is_empty() {
            tracing::trace!("no {} control matches {}, skipped", what, target);
        }
        ids
    }

    /// Wire the controller to the page: row toggles recompute, select-all
    /// toggles propagate and then recompute. Runs one recomputation so the
    /// page is consistent from the start.
    pub fn attach(self, doc: &mut Document) -> SelectionAttachment {
        let controller = Rc::new(self);
        let mut handlers = Vec::new();

        let c = Rc::clone(&controller);
        let on_row = handler(move |doc, _| {
            c.recompute_from_rows(doc);
        });
        for row in controller.bindings.rows.resolve(doc) {
            handlers.push((row, doc.add_listener(row, EventType::Change, Rc::clone(&on_row))));
        }

        let c = Rc::clone(&controller);
        let on_select_all = handler(move |doc, event| {
            let checked = doc.is_checked(event.target);
            c.on_select_all_toggled(doc, checked);
            c.recompute_from_rows(doc);
        });
        for control in controller.bindings.select_all.resolve(doc) {
            handlers.push((
                control,
                doc.add_listener(control, EventType::Change, Rc::clone(&on_select_all)),
            ));
        }

        controller.recompute_from_rows(doc);
        SelectionAttachment { controller, handlers }
    }
}

/// A controller wired to a page
#[derive(Debug)]
pub struct SelectionAttachment {
    controller: Rc<SelectionController>,
    handlers: Vec<(NodeId, HandlerId)>,
}

impl SelectionAttachment {
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Number of controls listened to
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Remove every handler registered by [`SelectionController::attach`]
    pub fn detach(self, doc: &mut Document) {
        for (target, id) in self.handlers {
            doc.remove_listener(target, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        doc: Document,
        rows: Vec<NodeId>,
        select_all: NodeId,
        button: NodeId,
        none: NodeId,
        single: NodeId,
        multiple: NodeId,
        count: NodeId,
    }

    fn page(rows: usize) -> Page {
        let mut doc = Document::new();
        let root = doc.root();
        let select_all =
            doc.append_element(root, "input", &[("type", "checkbox"), ("class", "select-all")]);
        let rows: Vec<NodeId> = (0..rows)
            .map(|_| {
                doc.append_element(root, "input", &[("type", "checkbox"), ("class", "select-one")])
            })
            .collect();
        let button = doc.append_element(root, "button", &[("class", "btn btn-toggle")]);
        let none = doc.append_element(root, "span", &[("class", "selected-default")]);
        let single = doc.append_element(root, "span", &[("class", "selected-single hidden")]);
        let multiple = doc.append_element(root, "span", &[("class", "selected-multiple hidden")]);
        let count = doc.append_element(multiple, "span", &[("class", "selected-count")]);
        Page {
            doc,
            rows,
            select_all,
            button,
            none,
            single,
            multiple,
            count,
        }
    }

    fn controller() -> SelectionController {
        SelectionController::from_config(&UiConfig::default()).unwrap()
    }

    #[test]
    fn test_display_mode_from_count() {
        assert_eq!(DisplayMode::from_count(0), DisplayMode::None);
        assert_eq!(DisplayMode::from_count(1), DisplayMode::Single);
        assert_eq!(DisplayMode::from_count(2), DisplayMode::Multiple);
        assert_eq!(DisplayMode::from_count(500), DisplayMode::Multiple);
    }

    #[test]
    fn test_summary_all_checked_needs_rows() {
        let empty = SelectionSummary { checked: 0, total: 0 };
        assert!(!empty.all_checked());
        assert!(!empty.any_checked());
        assert!(SelectionSummary { checked: 3, total: 3 }.all_checked());
    }

    #[test]
    fn test_recompute_single() {
        let mut p = page(3);
        let c = controller();
        p.doc.set_checked(p.rows[1], true);

        let summary = c.recompute_from_rows(&mut p.doc);
        assert_eq!(summary, SelectionSummary { checked: 1, total: 3 });
        assert!(!p.doc.is_disabled(p.button));
        assert!(!p.doc.has_class(p.button, "disabled"));
        assert!(!p.doc.is_checked(p.select_all));
        assert!(p.doc.has_class(p.none, "hidden"));
        assert!(!p.doc.has_class(p.single, "hidden"));
        assert!(p.doc.has_class(p.multiple, "hidden"));
        assert_eq!(p.doc.text_content(p.count), "1");
    }

    #[test]
    fn test_recompute_none_disables_buttons() {
        let mut p = page(2);
        let c = controller();
        c.recompute_from_rows(&mut p.doc);

        assert!(p.doc.is_disabled(p.button));
        assert!(p.doc.has_class(p.button, "disabled"));
        assert!(!p.doc.has_class(p.none, "hidden"));
        assert_eq!(p.doc.text_content(p.count), "");
    }

    #[test]
    fn test_select_all_toggle_sets_every_row() {
        let mut p = page(4);
        let c = controller();
        c.on_select_all_toggled(&mut p.doc, true);
        assert!(p.rows.iter().all(|&r| p.doc.is_checked(r)));

        let summary = c.recompute_from_rows(&mut p.doc);
        assert!(summary.all_checked());
        assert!(p.doc.is_checked(p.select_all));
        assert_eq!(p.doc.text_content(p.count), "4");

        c.on_select_all_toggled(&mut p.doc, false);
        assert!(p.rows.iter().all(|&r| !p.doc.is_checked(r)));
    }

    #[test]
    fn test_missing_controls_are_skipped() {
        let mut doc = Document::new();
        let root = doc.root();
        let row = doc.append_element(root, "input", &[("class", "select-one")]);
        doc.set_checked(row, true);

        let summary = controller().recompute_from_rows(&mut doc);
        assert_eq!(summary, SelectionSummary { checked: 1, total: 1 });
    }

    #[test]
    fn test_attach_and_detach() {
        let mut p = page(2);
        let attachment = controller().attach(&mut p.doc);
        assert_eq!(attachment.len(), 3);
        assert!(p.doc.is_disabled(p.button));

        p.doc.user_set_checked(p.rows[0], true);
        assert!(!p.doc.has_class(p.single, "hidden"));

        p.doc.user_set_checked(p.select_all, true);
        assert!(p.rows.iter().all(|&r| p.doc.is_checked(r)));
        assert!(!p.doc.has_class(p.multiple, "hidden"));

        attachment.detach(&mut p.doc);
        p.doc.user_set_checked(p.rows[0], false);
        // no longer reflected
        assert!(p.doc.is_checked(p.select_all));
    }
}
