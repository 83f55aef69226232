use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use pub_atlas::DistanceRecord;

const ROW_HEIGHT: f32 = 18.0;

/// Name / address / distance table for the pubs near London Bridge.
pub fn distance_table(ui: &mut Ui, rows: &[DistanceRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(80.0))
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Address");
            });
            header.col(|ui| {
                ui.strong("Distance (mi)");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(&r.record.name);
                });
                row.col(|ui| {
                    ui.label(&r.record.address);
                });
                row.col(|ui| {
                    ui.label(format!("{:.3}", r.distance));
                });
            });
        });
}
