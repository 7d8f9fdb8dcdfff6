//! Main application: owns the library rows and the column filters

mod games_table;

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use eframe::egui;
use game_shelf_core::{
    CategoryCatalog, CategoryFilter, CategoryFloatingFilter, FilterParams, FloatingFilterParams, TextFilter,
};

use crate::config::Config;
use crate::library::{load_library, Library};

const CATEGORIES_FIELD: &str = "categories";

/// Text filters of the filter row
#[derive(Debug, Default)]
pub struct TextFilters {
    pub title: TextFilter,
    /// Matched against the comma-joined friend names
    pub friends: TextFilter,
}

pub struct GameShelfApp {
    library: Library,
    load_error: Option<String>,
    catalog: Arc<CategoryCatalog>,
    category_filter: Rc<RefCell<CategoryFilter>>,
    floating_filter: CategoryFloatingFilter,
    text_filters: TextFilters,
    /// Set whenever a filter's model changes
    filter_changed: Rc<Cell<bool>>,
    /// Indices into `library.games` passing all filters
    visible: Vec<usize>,
}

impl GameShelfApp {
    pub fn new(config: &Config) -> Self {
        let (library, load_error) = match load_library(Path::new(&config.library_path)) {
            Ok(library) => (library, None),
            Err(e) => {
                tracing::warn!("{}", e);
                (Library::default(), Some(e.to_string()))
            }
        };
        let mut app = Self::with_library(library, config.category_catalog());
        app.load_error = load_error;
        app
    }

    pub fn with_library(library: Library, catalog: CategoryCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let filter_changed = Rc::new(Cell::new(false));

        let changed = filter_changed.clone();
        let category_filter = Rc::new(RefCell::new(CategoryFilter::new(FilterParams {
            field: CATEGORIES_FIELD.to_string(),
            catalog: catalog.clone(),
            filter_changed: Box::new(move |_: &CategoryFilter| changed.set(true)),
        })));

        let parent = Rc::downgrade(&category_filter);
        let floating_filter = CategoryFloatingFilter::new(FloatingFilterParams {
            field: CATEGORIES_FIELD.to_string(),
            catalog: catalog.clone(),
            parent_filter_instance: Box::new(move |f: &mut dyn FnMut(&mut CategoryFilter)| {
                let Some(filter) = parent.upgrade() else {
                    return;
                };
                match filter.try_borrow_mut() {
                    Ok(mut filter) => f(&mut *filter),
                    Err(_) => tracing::warn!("Category filter busy, dropping floating filter change"),
                };
            }),
        });

        let visible = (0..library.games.len()).collect();
        Self {
            library,
            load_error: None,
            catalog,
            category_filter,
            floating_filter,
            text_filters: TextFilters::default(),
            filter_changed,
            visible,
        }
    }

    /// Re-run the filters over all rows and resync the floating filter after a model change
    fn process_filter_changes(&mut self) {
        if !self.filter_changed.replace(false) {
            return;
        }
        let filter = self.category_filter.borrow();
        self.visible = filtered_indices(&self.library, &filter, &self.text_filters);
        self.floating_filter.on_parent_model_changed(filter.model_key());
        tracing::info!(
            model = filter.model_key(),
            title = self.text_filters.title.text(),
            friends = self.text_filters.friends.text(),
            "Filters changed: {} of {} games shown",
            self.visible.len(),
            self.library.games.len()
        );
    }
}

/// Indices of the rows passing the category filter and every text filter
pub fn filtered_indices(library: &Library, category: &CategoryFilter, text: &TextFilters) -> Vec<usize> {
    library
        .games
        .iter()
        .enumerate()
        .filter(|(_, g)| category.does_filter_pass(*g))
        .filter(|(_, g)| text.title.does_filter_pass(&g.title))
        .filter(|(_, g)| {
            !text.friends.is_filter_active() || text.friends.does_filter_pass(&library.friend_names(g).join(","))
        })
        .map(|(idx, _)| idx)
        .collect()
}

impl eframe::App for GameShelfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_filter_changes();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("My Games");
                ui.add_space(16.0);
                self.category_filter.borrow_mut().ui(ui);
                ui.add_space(16.0);
                ui.label(format!("{} of {} games", self.visible.len(), self.library.games.len()));
            });
            if let Some(error) = &self.load_error {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let text_changed = games_table::render_games_table(
                ui,
                &self.library,
                &self.visible,
                &self.catalog,
                &self.floating_filter,
                &mut self.text_filters,
            );
            if text_changed {
                self.filter_changed.set(true);
            }
        });

        // Picks made this frame take effect without waiting for the next input event
        if self.filter_changed.get() {
            self.process_filter_changes();
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_shelf_core::{Category, CategorySet, FriendInfo, GameRow};

    fn game(title: &str, categories: Option<&[Category]>, friends: &[&str]) -> GameRow {
        GameRow {
            title: title.to_string(),
            categories: categories.map(|cs| cs.iter().map(|&c| (c, true)).collect::<CategorySet>()),
            friends: friends.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    fn app() -> GameShelfApp {
        let friends = [("steam_1", "Alice"), ("steam_2", "Bob")]
            .into_iter()
            .map(|(id, name)| (id.to_string(), FriendInfo { name: name.to_string() }))
            .collect();
        GameShelfApp::with_library(
            Library {
                games: vec![
                    game("Celeste", Some(&[Category::Single]), &[]),
                    game("It Takes Two", Some(&[Category::Coop, Category::Multi]), &["steam_1", "steam_2"]),
                    game("Mystery", None, &["steam_2"]),
                    game("Rocket League", Some(&[Category::Multi, Category::Pvp]), &["steam_9"]),
                ],
                friends,
            },
            CategoryCatalog::default(),
        )
    }

    fn set_text(app: &mut GameShelfApp, pick: fn(&mut TextFilters) -> &mut TextFilter, text: &str) {
        if pick(&mut app.text_filters).set_text(text) {
            app.filter_changed.set(true);
        }
    }

    #[test]
    fn test_all_rows_visible_initially() {
        let app = app();
        assert_eq!(app.visible, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_floating_pick_refilters_and_resyncs() {
        let mut app = app();
        app.floating_filter.forward_selection(Some(Category::Multi));
        assert!(app.filter_changed.get());
        app.process_filter_changes();
        assert_eq!(app.visible, vec![1, 3]);
        assert_eq!(app.floating_filter.value(), Some(Category::Multi));
        assert!(!app.filter_changed.get());
    }

    #[test]
    fn test_header_clear_restores_rows() {
        let mut app = app();
        app.category_filter.borrow_mut().set_model("pvp");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![3]);
        app.category_filter.borrow_mut().set_model("");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![0, 1, 2, 3]);
        assert_eq!(app.floating_filter.value(), None);
    }

    #[test]
    fn test_invalid_model_changes_nothing() {
        let mut app = app();
        app.category_filter.borrow_mut().set_model("single");
        app.process_filter_changes();
        app.category_filter.borrow_mut().set_model("vr");
        assert!(!app.filter_changed.get());
        app.process_filter_changes();
        assert_eq!(app.visible, vec![0]);
    }

    #[test]
    fn test_title_filter_ignores_case() {
        let mut app = app();
        set_text(&mut app, |t| &mut t.title, "TAKES");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![1]);
        set_text(&mut app, |t| &mut t.title, "");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_title_and_category_filters_combine() {
        let mut app = app();
        app.category_filter.borrow_mut().set_model("multi");
        set_text(&mut app, |t| &mut t.title, "rocket");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![3]);
        // the text change does not disturb the category model
        assert_eq!(app.floating_filter.value(), Some(Category::Multi));
        app.category_filter.borrow_mut().set_model("");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![3]);
    }

    #[test]
    fn test_friends_filter_matches_names() {
        let mut app = app();
        assert!(app.library.has_friends());
        set_text(&mut app, |t| &mut t.friends, "bob");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![1, 2]);
        // unknown ids match by id
        set_text(&mut app, |t| &mut t.friends, "steam_9");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![3]);
        set_text(&mut app, |t| &mut t.friends, "alice,bob");
        app.process_filter_changes();
        assert_eq!(app.visible, vec![1]);
    }
}
