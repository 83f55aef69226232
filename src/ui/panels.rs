use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use pub_atlas::config::{MAX_MILES_RANGE, RANKING_SIZE_RANGE};
use pub_atlas::RankOrder;

use crate::state::{AppState, CountView, Page};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – page picker
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pick display");
    ui.separator();
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.title());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} pubs in {} authorities",
                ds.len(),
                state.authorities.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

pub fn home_page(ui: &mut Ui) {
    ui.heading("London Pubs");
    ui.add_space(8.0);
    ui.strong("Welcome to all of the UK pub information you could ever want!");
    ui.label(
        "The UK is home to pubs in almost every city. Explore their locations on a map, \
         the number of pubs in various cities and towns, the postcodes with the most and \
         least pubs, and a list of every pub within a chosen distance of London Bridge.",
    );
}

pub fn map_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Location of pubs based on city:");

    let current = state.options.map_authority.clone().unwrap_or_default();
    let mut picked = None;
    egui::ComboBox::from_id_salt("map_authority")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for authority in &state.authorities {
                if ui.selectable_label(current == *authority, authority).clicked() {
                    picked = Some(authority.clone());
                }
            }
        });
    if let Some(authority) = picked {
        state.set_map_authority(authority);
    }

    ui.label(format!(
        "This map shows the locations of all pubs in {current}. \
         Hover to see a pub's name and address."
    ));

    let Some(views) = &state.views else {
        return no_data(ui);
    };
    if let Some(centre) = views.map_pubs.centroid() {
        ui.small(format!("Centred on {centre}"));
    }
    plot::pub_map(ui, &views.map_pubs);
}

pub fn count_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Number of pubs based on city or postcode:");

    egui::ComboBox::from_id_salt("count_view")
        .selected_text(match state.count_view {
            CountView::City => "City",
            CountView::Postcode => "Postcode",
        })
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut state.count_view, CountView::City, "City");
            ui.selectable_value(&mut state.count_view, CountView::Postcode, "Postcode");
        });

    match state.count_view {
        CountView::City => city_counts(ui, state),
        CountView::Postcode => postcode_counts(ui, state),
    }
}

fn city_counts(ui: &mut Ui, state: &mut AppState) {
    let full = state.options.authorities.is_full();
    let mut toggled = None;

    egui::CollapsingHeader::new(RichText::new("Choose up to 5 cities").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("None").clicked() {
                toggled = Some(None);
            }
            ScrollArea::vertical()
                .max_height(160.0)
                .show(ui, |ui: &mut Ui| {
                    for authority in &state.authorities {
                        let mut checked = state.options.authorities.contains(authority);
                        let enabled = checked || !full;
                        if ui
                            .add_enabled(enabled, egui::Checkbox::new(&mut checked, authority))
                            .changed()
                        {
                            toggled = Some(Some(authority.clone()));
                        }
                    }
                });
        });

    match toggled {
        Some(Some(authority)) => state.toggle_authority(&authority),
        Some(None) => state.clear_authorities(),
        None => {}
    }

    let Some(views) = &state.views else {
        return no_data(ui);
    };
    ui.label(format!(
        "This chart shows how many pubs are in{}.",
        state.options.authorities.caption()
    ));
    plot::authority_chart(ui, &views.authority_counts, state.color_map.as_ref());
}

fn postcode_counts(ui: &mut Ui, state: &mut AppState) {
    let mut least = state.options.ranking_order == RankOrder::Bottom;
    if ui
        .toggle_value(
            &mut least,
            "Toggle on for postcodes with the least pubs, off for the most",
        )
        .changed()
    {
        state.set_least_common(least);
    }

    let mut k = state.options.ranking_size.get();
    if ui
        .add(
            egui::Slider::new(&mut k, RANKING_SIZE_RANGE)
                .text("How many postcodes do you wish to see?"),
        )
        .changed()
    {
        state.set_ranking_size(k);
    }

    let Some(views) = &state.views else {
        return no_data(ui);
    };
    ui.label("This chart shows postcodes with the most or least pubs inside them.");
    plot::postcode_chart(ui, &views.postcode_ranking);
}

pub fn distance_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("List and count of pubs in a certain radius of London Bridge:");

    let mut miles = state.options.max_miles.get();
    if ui
        .add(egui::Slider::new(&mut miles, MAX_MILES_RANGE).text("Enter distance"))
        .changed()
    {
        state.set_max_miles(miles);
    }

    let Some(views) = &state.views else {
        return no_data(ui);
    };
    ui.label(views.nearby.summary());
    ui.add_space(4.0);
    table::distance_table(ui, &views.nearby.records);
}

fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a pub CSV to begin  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open pub data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
