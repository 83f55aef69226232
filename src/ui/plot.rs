use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, PlotPoints, Points};
use pub_atlas::{CountMap, Dataset, RankedList};

use crate::color::ColorMap;

/// "cornflowerblue"
const POSTCODE_BAR_COLOR: Color32 = Color32::from_rgb(100, 149, 237);
/// Map marker colour.
const PUB_POINT_COLOR: Color32 = Color32::from_rgb(150, 50, 250);

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Pubs per authority, one coloured bar each.
pub fn authority_chart(ui: &mut Ui, counts: &CountMap, colors: Option<&ColorMap>) {
    let entries: Vec<(String, usize)> = counts.iter().map(|(k, v)| (k.to_string(), v)).collect();
    let bars = entries
        .iter()
        .enumerate()
        .map(|(i, (authority, count))| {
            let color = colors
                .map(|cm| cm.color_for(authority))
                .unwrap_or(Color32::DARK_GREEN);
            Bar::new(i as f64, *count as f64)
                .name(format!("{authority}: {count}"))
                .fill(color)
                .stroke((1.0, Color32::BLACK))
        })
        .collect();
    category_chart(ui, "authority_chart", "Cities", &entries, bars);
}

/// Top or bottom postcode prefixes.
pub fn postcode_chart(ui: &mut Ui, ranked: &RankedList) {
    let bars = ranked
        .entries
        .iter()
        .enumerate()
        .map(|(i, (prefix, count))| {
            Bar::new(i as f64, *count as f64)
                .name(format!("{prefix}: {count}"))
                .fill(POSTCODE_BAR_COLOR)
                .stroke((1.0, Color32::BLACK))
        })
        .collect();
    category_chart(ui, "postcode_chart", "Postcodes", &ranked.entries, bars);
}

/// Bar chart whose x axis shows the category key under each bar.
fn category_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    entries: &[(String, usize)],
    bars: Vec<Bar>,
) {
    let keys: Vec<String> = entries.iter().map(|(k, _)| k.clone()).collect();

    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&keys, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}

/// Axis text for a grid mark: the key when the mark sits on a bar.
fn category_label(keys: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    keys.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Scatter of pub locations (x = longitude, y = latitude). Hovering shows
/// the nearest pub's name and address.
pub fn pub_map(ui: &mut Ui, pubs: &Dataset) {
    let points: PlotPoints = pubs.iter().map(|r| [r.longitude, r.latitude]).collect();
    let hover_pubs = pubs.clone();

    Plot::new("pub_map")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.6)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, hovered: &PlotPoint| nearest_label(&hover_pubs, hovered))
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("Pubs")
                    .color(PUB_POINT_COLOR)
                    .filled(true)
                    .radius(4.0),
            );
        });
}

fn nearest_label(pubs: &Dataset, at: &PlotPoint) -> String {
    pubs.iter()
        .min_by(|a, b| {
            let da = (a.longitude - at.x).powi(2) + (a.latitude - at.y).powi(2);
            let db = (b.longitude - at.x).powi(2) + (b.latitude - at.y).powi(2);
            da.total_cmp(&db)
        })
        .map(|r| r.label())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, "NW1")]
    #[case(2.0, "SW1")]
    #[case(0.5, "")]
    #[case(3.0, "")]
    #[case(-1.0, "")]
    fn axis_labels_follow_bars(#[case] value: f64, #[case] expected: &str) {
        let keys = ["NW1", "OX1", "SW1"].map(String::from);
        assert_eq!(category_label(&keys, value), expected);
    }
}
