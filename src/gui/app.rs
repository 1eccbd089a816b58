//! Health Scatter Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{Axis, DataLoader, Metric, Record};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        path: PathBuf,
        records: Vec<Record>,
    },
    Error(String),
}

/// Main application window.
pub struct HealthScatterApp {
    config: AppConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl HealthScatterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.sync_selection(config.initial_x, config.initial_y);

        let mut app = Self {
            loader: DataLoader::new(),
            control_panel,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            config,
        };
        if let Some(path) = app.config.data_path.clone() {
            app.start_loading(path);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Read the CSV in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.control_panel.is_loading = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        info!("Loading {}", path.display());
        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match DataLoader::read_records(&path) {
                Ok(records) => {
                    let _ = tx.send(LoadResult::Complete { path, records });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self, now: f64) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { path, records } => {
                        self.finish_loading(path, records, now);
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(e) => {
                        error!("CSV load failed: {}", e);
                        self.control_panel.set_status(&format!("Error: {}", e));
                        self.set_loading(false);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn finish_loading(&mut self, path: PathBuf, records: Vec<Record>, now: f64) {
        self.loader.set_records(path, records.clone());
        self.set_loading(false);

        let x = self.control_panel.settings.x_metric;
        let y = self.control_panel.settings.y_metric;
        match self
            .chart_viewer
            .set_records(self.config.chart.clone(), records, x, y, now)
        {
            Ok(()) => {
                let rows = self.loader.get_row_count();
                self.control_panel.row_count = rows;
                self.control_panel.set_status(&format!("Loaded {} regions", rows));
            }
            Err(e) => {
                error!("Chart initialization failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.control_panel.is_loading = loading;
    }

    fn handle_select_metric(&mut self, metric: Metric, now: f64) {
        self.chart_viewer.select_metric(metric, now);
    }

    /// Export the current chart as PNG or SVG
    fn handle_export_image(&mut self) {
        let Some(view) = self.chart_viewer.view() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .add_filter("SVG Image", &["svg"])
            .set_file_name("health_scatter.png")
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::export(view, &output_path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                self.control_panel.last_export = Some(output_path);
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_export(&mut self) {
        if let Some(path) = &self.control_panel.last_export {
            if let Err(e) = open::that(path) {
                warn!("Could not open {}: {}", path.display(), e);
                self.control_panel
                    .set_status(&format!("Error: cannot open export ({})", e));
            }
        }
    }
}

impl eframe::App for HealthScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        // Check for background results
        self.check_load_results(now);

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectMetric(metric) => {
                            self.handle_select_metric(metric, now)
                        }
                        ControlPanelAction::ExportImage => self.handle_export_image(),
                        ControlPanelAction::OpenExport => self.handle_open_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.chart_viewer.show(ctx, ui);
            });
        });

        // Label clicks on the canvas change the selection too
        if let (Some(x), Some(y)) = (
            self.chart_viewer.active_metric(Axis::X),
            self.chart_viewer.active_metric(Axis::Y),
        ) {
            self.control_panel.sync_selection(x, y);
        }
    }
}
