//! Single-select control shown by both filter widgets

use crate::categories::{Category, CategoryCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// `None` for the leading "no filter" option
    pub value: Option<Category>,
    pub label: String,
}

/// State of a category drop-down: its options and the value it displays
#[derive(Debug, Clone)]
pub struct FacetSelect {
    id: String,
    label: Option<String>,
    options: Vec<SelectOption>,
    value: Option<Category>,
    /// Number of times the displayed value has been changed
    #[cfg(test)]
    revision: u64,
}

impl FacetSelect {
    /// Empty option first, then one option per offered category in catalog order
    pub fn new(id: impl Into<String>, label: Option<String>, catalog: &CategoryCatalog) -> Self {
        let options = std::iter::once(SelectOption { value: None, label: String::new() })
            .chain(catalog.iter().map(|e| SelectOption {
                value: Some(e.category),
                label: e.label.clone(),
            }))
            .collect();
        Self {
            id: id.into(),
            label,
            options,
            value: None,
            #[cfg(test)]
            revision: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Currently displayed value
    pub fn value(&self) -> Option<Category> {
        self.value
    }

    /// Label of the displayed option (empty for "no filter")
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.as_str())
            .unwrap_or("")
    }

    #[cfg(test)]
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    /// Show `value`, touching the control only if it differs. Returns whether it changed.
    pub(crate) fn sync(&mut self, value: Option<Category>) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        #[cfg(test)]
        {
            self.revision += 1;
        }
        true
    }
}
