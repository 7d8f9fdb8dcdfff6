//! Floating-row companion of [`CategoryFilter`]

use std::sync::Arc;

use super::facet::CategoryFilter;
use super::select::FacetSelect;
use crate::categories::{Category, CategoryCatalog};

/// Grid-provided access to the paired filter: runs the given closure on it
pub type ParentFilterInstance = Box<dyn Fn(&mut dyn FnMut(&mut CategoryFilter))>;

pub struct FloatingFilterParams {
    pub field: String,
    pub catalog: Arc<CategoryCatalog>,
    pub parent_filter_instance: ParentFilterInstance,
}

/// Compact drop-down in the filter row. Holds no model of its own: picks go to
/// the parent filter, and the display follows the parent's model.
pub struct CategoryFloatingFilter {
    catalog: Arc<CategoryCatalog>,
    gui: FacetSelect,
    parent_filter_instance: ParentFilterInstance,
}

impl CategoryFloatingFilter {
    pub fn new(params: FloatingFilterParams) -> Self {
        let gui = FacetSelect::new(format!("floating_filter_{}", params.field), None, &params.catalog);
        Self {
            catalog: params.catalog,
            gui,
            parent_filter_instance: params.parent_filter_instance,
        }
    }

    pub fn gui(&self) -> &FacetSelect {
        &self.gui
    }

    /// Displayed value
    pub fn value(&self) -> Option<Category> {
        self.gui.value()
    }

    /// User picked `model` in this widget; hand it to the parent filter
    pub fn forward_model(&self, model: &str) {
        (self.parent_filter_instance)(&mut |filter: &mut CategoryFilter| filter.set_model(model));
    }

    pub fn forward_selection(&self, selection: Option<Category>) {
        (self.parent_filter_instance)(&mut |filter: &mut CategoryFilter| filter.set_selection(selection));
    }

    /// The parent filter's model changed. Invalid models leave the display as is.
    pub fn on_parent_model_changed(&mut self, model: &str) {
        match self.catalog.resolve(model) {
            Ok(selection) => {
                self.gui.sync(selection);
            }
            Err(e) => tracing::debug!(field = %self.gui.id(), "ignoring parent model: {}", e),
        }
    }
}
