//! Games table: one row per visible game, filter row under the headers

use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use game_shelf_core::{format_relative, CategoryCatalog, CategoryFloatingFilter, GameRow};

use super::TextFilters;
use crate::library::Library;

const TEXT_FILTER_HINT: &str = "Filter...";

/// Render the games table
///
/// Returns whether a text filter changed this frame
pub fn render_games_table(
    ui: &mut Ui,
    library: &Library,
    visible: &[usize],
    catalog: &CategoryCatalog,
    floating_filter: &CategoryFloatingFilter,
    text_filters: &mut TextFilters,
) -> bool {
    let body_font_size = egui::TextStyle::Body.resolve(ui.style()).size;
    let row_height = body_font_size.max(ui.spacing().interact_size.y) + 8.0;
    let header_height = row_height * 2.0;
    let now = chrono::Local::now().naive_local();
    let show_friends_column = library.has_friends();
    let mut text_changed = false;

    let mut table_builder = TableBuilder::new(ui)
        .id_salt("games_table")
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(300.0).at_least(150.0).clip(true).resizable(true)) // Title
        .column(Column::exact(100.0)) // Platforms
        .column(Column::initial(170.0).at_least(130.0).clip(true)) // Categories
        .column(Column::exact(80.0)) // Played
        .column(Column::exact(110.0)) // Last played
        .column(Column::initial(110.0)); // Rating

    if show_friends_column {
        table_builder = table_builder.column(Column::remainder().at_least(170.0).clip(true)); // Friends
    }

    table_builder
        .min_scrolled_height(0.0)
        .header(header_height, |mut header| {
            header.col(|ui| {
                ui.vertical(|ui| {
                    ui.strong("Title");
                    text_changed |= text_filters.title.ui(ui, TEXT_FILTER_HINT);
                });
            });
            header.col(|ui| {
                ui.strong("Platforms");
            });
            header.col(|ui| {
                ui.vertical(|ui| {
                    ui.strong("Categories");
                    floating_filter.ui(ui);
                });
            });
            header.col(|ui| {
                ui.strong("Played");
            });
            header.col(|ui| {
                ui.strong("Last Played");
            });
            header.col(|ui| {
                ui.strong("Rating");
            });
            if show_friends_column {
                header.col(|ui| {
                    ui.vertical(|ui| {
                        ui.strong("Friends");
                        text_changed |= text_filters.friends.ui(ui, TEXT_FILTER_HINT);
                    });
                });
            }
        })
        .body(|body| {
            body.rows(row_height, visible.len(), |mut row| {
                let game = &library.games[visible[row.index()]];
                row.col(|ui| {
                    ui.label(RichText::new(&game.title).strong());
                });
                row.col(|ui| {
                    ui.label(game.platforms.replace(',', ", "));
                });
                row.col(|ui| {
                    ui.label(category_labels(game, catalog));
                });
                row.col(|ui| {
                    if let Some(hours) = game.playtime_hours() {
                        ui.label(format!("{:.1}\u{202F}h", hours));
                    }
                });
                row.col(|ui| {
                    if let Some(last_played) = format_relative(now, game.last_played_at()) {
                        ui.label(last_played.phrase()).on_hover_text(&last_played.exact);
                    }
                });
                row.col(|ui| {
                    if game.rating > 0 {
                        ui.label("⭐".repeat(game.rating.into()))
                            .on_hover_text(format!("{} stars", game.rating));
                    }
                });
                if show_friends_column {
                    row.col(|ui| {
                        let names = library.friend_names(game);
                        if !names.is_empty() {
                            ui.label(names.join(", ")).on_hover_text(names.join("\n"));
                        }
                    });
                }
            });
        });

    text_changed
}

/// Labels of the categories a game has, in catalog order
fn category_labels(game: &GameRow, catalog: &CategoryCatalog) -> String {
    let Some(categories) = &game.categories else {
        return String::new();
    };
    catalog
        .iter()
        .filter(|e| categories.contains(e.category))
        .map(|e| e.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
