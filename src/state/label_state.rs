// Label screen state
// Plain snapshot of everything the UI renders, plus the pure transitions the
// store applies to it

use crate::models::{Item, Label, LabelId};
use std::collections::HashSet;

/// Observable state of the label-editing screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelState {
    /// True while at least one request is outstanding
    pub is_loading: bool,
    /// Full label catalog
    pub all_labels: Vec<Label>,
    /// Labels assigned to the item in context
    pub selected_labels: Vec<Label>,
    /// Labels not assigned to the item in context
    pub unselected_labels: Vec<Label>,
    /// Whether the "create label" modal is shown
    pub show_create_modal: bool,
    /// Set after the first successful catalog load
    pub has_loaded_initial_labels: bool,
}

impl LabelState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog and, if an item is given, split it into
    /// selected (item order) and unselected (catalog order) labels
    pub(crate) fn apply_catalog(&mut self, labels: Vec<Label>, item: Option<&Item>) {
        if let Some(item) = item {
            self.selected_labels = item.labels.clone();
            self.unselected_labels = labels
                .iter()
                .filter(|label| !item.has_label(&label.id))
                .cloned()
                .collect();
        }
        self.all_labels = labels;
        self.has_loaded_initial_labels = true;
    }

    /// Put a freshly created label at the front of the catalog and the
    /// unselected list, and dismiss the create modal
    pub(crate) fn insert_created(&mut self, label: Label) {
        self.all_labels.insert(0, label.clone());
        self.unselected_labels.insert(0, label);
        self.show_create_modal = false;
    }

    /// Drop a label from the catalog only; selections are left as they are
    pub(crate) fn remove_from_catalog(&mut self, label_id: &str) {
        self.all_labels.retain(|label| label.id != label_id);
    }

    /// Mark a label as assigned to the item in context
    pub fn add_label_to_item(&mut self, label: Label) {
        self.unselected_labels.retain(|l| l.id != label.id);
        self.selected_labels.insert(0, label);
    }

    /// Mark a label as not assigned to the item in context
    pub fn remove_label_from_item(&mut self, label: Label) {
        self.selected_labels.retain(|l| l.id != label.id);
        self.unselected_labels.insert(0, label);
    }

    /// IDs of the selected labels, in current order
    pub fn selected_label_ids(&self) -> Vec<LabelId> {
        self.selected_labels
            .iter()
            .map(|label| label.id.clone())
            .collect()
    }

    /// Look up a catalog label by ID
    pub fn label(&self, label_id: &str) -> Option<&Label> {
        self.all_labels.iter().find(|label| label.id == label_id)
    }

    /// Whether selected and unselected labels are disjoint and both drawn
    /// from the catalog (by ID)
    pub fn is_consistent(&self) -> bool {
        let catalog: HashSet<&str> = self.all_labels.iter().map(|l| l.id.as_str()).collect();
        let selected: HashSet<&str> = self
            .selected_labels
            .iter()
            .map(|l| l.id.as_str())
            .collect();

        self.selected_labels
            .iter()
            .chain(&self.unselected_labels)
            .all(|l| catalog.contains(l.id.as_str()))
            && self
                .unselected_labels
                .iter()
                .all(|l| !selected.contains(l.id.as_str()))
    }
}
