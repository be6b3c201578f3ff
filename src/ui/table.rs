use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::stats::{round2, GroupMeans};

const HEADINGS: [&str; 5] = [
    "Sex",
    "Average Job Prestige",
    "Average Income",
    "Average Socioeconomic Index",
    "Average Education",
];

/// Mean job prestige, income, socioeconomic index and education by sex.
pub fn summary_table(ui: &mut Ui, rows: &[GroupMeans]) {
    TableBuilder::new(ui)
        .id_salt("summary_table")
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .columns(Column::remainder().at_least(120.0), HEADINGS.len() - 1)
        .header(22.0, |mut header| {
            for heading in HEADINGS {
                header.col(|ui| {
                    ui.strong(heading);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(20.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.group.to_string());
                    });
                    for mean in &row.means {
                        table_row.col(|ui| {
                            match mean {
                                Some(v) => ui.label(format!("{:.2}", round2(*v))),
                                None => ui.weak("–"),
                            };
                        });
                    }
                });
            }
        });
}
