//! Shared core of game-shelf
//!
//! Category facet filtering and "last played" formatting for the games grid.
//! Enable the `ui` feature for the egui widgets.

pub mod categories;
pub mod error;
pub mod filter;
pub mod models;
pub mod relative_time;

pub use categories::{has_category, Category, CategoryCatalog, CategoryEntry, CategoryRow, CategorySet};
pub use error::{FilterError, TimestampError};
pub use filter::{
    CategoryFilter, CategoryFloatingFilter, FacetSelect, FilterChangedCallback, FilterParams,
    FloatingFilterParams, ParentFilterInstance, SelectOption, TextFilter,
};
pub use models::{FriendInfo, GameRow};
pub use relative_time::{format_relative, parse_sql_timestamp, RelativeTime, RelativeTimeBucket, EXACT_FORMAT};
