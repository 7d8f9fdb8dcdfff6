//! Category facet filter for the games grid
//!
//! A column gets a [`CategoryFilter`], which holds the selected category and
//! answers row queries, and a [`CategoryFloatingFilter`] in the filter row,
//! which only mirrors the filter's model and forwards user picks to it.
//! Plain text columns use a [`TextFilter`].

mod select;
mod facet;
mod floating;
mod text;
#[cfg(feature = "ui")]
mod ui;

pub use select::{FacetSelect, SelectOption};
pub use facet::{CategoryFilter, FilterChangedCallback, FilterParams};
pub use floating::{CategoryFloatingFilter, FloatingFilterParams, ParentFilterInstance};
pub use text::TextFilter;
