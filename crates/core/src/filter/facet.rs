//! Column filter restricting rows to one category

use std::sync::Arc;

use super::select::FacetSelect;
use crate::categories::{has_category, Category, CategoryCatalog, CategoryRow};

const FILTER_LABEL: &str = "Category";

/// Called by the filter after every accepted model change, with the filter
/// already holding the new model
pub type FilterChangedCallback = Box<dyn FnMut(&CategoryFilter)>;

/// What the grid hands a category filter when attaching it to a column
pub struct FilterParams {
    /// Field name of the column, used for widget ids
    pub field: String,
    pub catalog: Arc<CategoryCatalog>,
    pub filter_changed: FilterChangedCallback,
}

/// Category filter of one column. The only owner of the selected category.
pub struct CategoryFilter {
    catalog: Arc<CategoryCatalog>,
    gui: FacetSelect,
    filter: Option<Category>,
    filter_active: bool,
    filter_changed: FilterChangedCallback,
}

impl CategoryFilter {
    pub fn new(params: FilterParams) -> Self {
        let gui = FacetSelect::new(
            format!("filter_{}", params.field),
            Some(FILTER_LABEL.to_string()),
            &params.catalog,
        );
        Self {
            catalog: params.catalog,
            gui,
            filter: None,
            filter_active: false,
            filter_changed: params.filter_changed,
        }
    }

    /// The filter's control. Always the same instance.
    pub fn gui(&self) -> &FacetSelect {
        &self.gui
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Every row passes while inactive; otherwise the row must have the selected
    /// category. Rows without category data never pass an active filter.
    pub fn does_filter_pass<R: CategoryRow + ?Sized>(&self, row: &R) -> bool {
        match self.filter {
            Some(category) if self.filter_active => has_category(row.categories(), category),
            _ => true,
        }
    }

    pub fn is_filter_active(&self) -> bool {
        self.filter_active
    }

    pub fn model(&self) -> Option<Category> {
        self.filter
    }

    /// Model as the grid passes it around: a category key, or `""` when inactive
    pub fn model_key(&self) -> &'static str {
        self.filter.map_or("", |c| c.key())
    }

    /// Set the model from a key. `""` clears the filter; anything that is not
    /// an offered category key is ignored.
    pub fn set_model(&mut self, model: &str) {
        match self.catalog.resolve(model) {
            Ok(selection) => self.apply(selection),
            Err(e) => tracing::debug!(field = %self.gui.id(), "ignoring filter model: {}", e),
        }
    }

    /// Typed variant of [`set_model`](Self::set_model)
    pub fn set_selection(&mut self, selection: Option<Category>) {
        match self.catalog.validate(selection) {
            Ok(selection) => self.apply(selection),
            Err(e) => tracing::debug!(field = %self.gui.id(), "ignoring filter model: {}", e),
        }
    }

    fn apply(&mut self, selection: Option<Category>) {
        self.filter = selection;
        self.filter_active = self.filter.is_some();
        self.gui.sync(selection);
        tracing::debug!(field = %self.gui.id(), model = self.model_key(), "category filter changed");
        let mut filter_changed = std::mem::replace(&mut self.filter_changed, Box::new(|_: &CategoryFilter| {}));
        filter_changed(self);
        self.filter_changed = filter_changed;
    }
}
