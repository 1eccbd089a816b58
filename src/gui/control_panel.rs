//! Control Panel Widget
//! Left side panel with data source, axis selection and export controls.

use crate::data::{Axis, Metric};
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings shown in the panel
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub x_metric: Metric,
    pub y_metric: Metric,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            x_metric: Metric::Poverty,
            y_metric: Metric::Obesity,
        }
    }
}

/// Left side control panel with file selection and chart controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub row_count: usize,
    pub is_loading: bool,
    pub last_export: Option<PathBuf>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            row_count: 0,
            is_loading: false,
            last_export: None,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the chart's active metrics
    pub fn sync_selection(&mut self, x: Metric, y: Metric) {
        self.settings.x_metric = x;
        self.settings.y_metric = y;
    }

    fn selected(&mut self, axis: Axis) -> &mut Metric {
        match axis {
            Axis::X => &mut self.settings.x_metric,
            Axis::Y => &mut self.settings.y_metric,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Health Scatter")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Health risks by state")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
                if self.row_count > 0 {
                    ui.label(
                        RichText::new(format!("{} regions", self.row_count))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Axis Section =====
        let has_data = self.row_count > 0;
        for (axis, title) in [(Axis::X, "↔ X Axis"), (Axis::Y, "↕ Y Axis")] {
            ui.label(RichText::new(title).size(14.0).strong());
            ui.add_space(5.0);
            ui.add_enabled_ui(has_data, |ui| {
                for metric in Metric::for_axis(axis) {
                    let current = *self.selected(axis);
                    if ui.radio(current == metric, metric.label()).clicked() && current != metric {
                        *self.selected(axis) = metric;
                        action = ControlPanelAction::SelectMetric(metric);
                    }
                }
            });
            ui.add_space(10.0);
        }

        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(has_data, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Image").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportImage;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.last_export.is_some(), |ui| {
                let open_button = egui::Button::new(RichText::new("📄 Open Export").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(open_button).clicked() {
                    action = ControlPanelAction::OpenExport;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectMetric(Metric),
    ExportImage,
    OpenExport,
}
