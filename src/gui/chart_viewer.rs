//! Chart Viewer Widget
//! Central panel that paints the scatter chart and turns pointer input
//! into `ChartView` events. The canvas follows the panel width.

use crate::charts::scale::tick_label;
use crate::charts::{
    ChartConfig, ChartView, Channel, LinearScale, RenderEffect, Stage, ViewError,
};
use crate::data::{Axis, Metric, Record};
use egui::epaint::TextShape;
use egui::{
    Align2, Color32, CursorIcon, FontId, Id, Order, Pos2, Rect, RichText, Sense, Stroke, Vec2,
};
use std::f32::consts::FRAC_PI_2;
use tracing::{debug, error};

const CIRCLE_FILL: Color32 = Color32::from_rgb(137, 189, 211);
const MARK_TEXT: Color32 = Color32::WHITE;
const AXIS_COLOR: Color32 = Color32::from_rgb(60, 60, 60);
const ACTIVE_LABEL: Color32 = Color32::from_rgb(0, 0, 0);
const INACTIVE_LABEL: Color32 = Color32::from_rgb(0xc6, 0xc6, 0xc6);
const HOVER_LABEL: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);

const LABEL_FONT: f32 = 16.0;
const TICK_FONT: f32 = 11.0;
const TICK_SIZE: f32 = 6.0;
/// Tooltip placement relative to the pointer.
const TOOLTIP_OFFSET: Vec2 = Vec2::new(-60.0, 40.0);

/// Width used before the panel has been measured once.
const DEFAULT_WIDTH: f64 = 960.0;

/// Hosts a `ChartView` and executes its effects on a `Stage`.
pub struct ChartViewer {
    view: Option<ChartView>,
    stage: Stage,
    last_width: Option<f64>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            view: None,
            stage: Stage::new(),
            last_width: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&ChartView> {
        self.view.as_ref()
    }

    /// Clear the chart
    pub fn clear(&mut self) {
        self.view = None;
        self.stage.clear();
    }

    /// Replace the data set and build a fresh chart.
    pub fn set_records(
        &mut self,
        config: ChartConfig,
        records: Vec<Record>,
        x: Metric,
        y: Metric,
        now: f64,
    ) -> Result<(), ViewError> {
        let width = self.last_width.unwrap_or(DEFAULT_WIDTH);
        let (view, effects) = ChartView::initialize(config, width, records, x, y)?;
        self.stage.clear();
        self.stage.apply(effects, now);
        self.view = Some(view);
        Ok(())
    }

    /// Switch the metric of `metric`'s axis (no-op if already active).
    pub fn select_metric(&mut self, metric: Metric, now: f64) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        match view.select_axis_metric(metric.axis(), metric) {
            Ok(effects) => self.stage.apply(effects, now),
            Err(e) => error!("Axis selection failed: {}", e),
        }
    }

    pub fn active_metric(&self, axis: Axis) -> Option<Metric> {
        self.view.as_ref().map(|v| v.active_metric(axis))
    }

    /// Draw the chart, handle resize, clicks and hover.
    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let now = ui.input(|i| i.time);

        // Container width in whole pixels
        let width = f64::from(ui.available_width().floor().max(1.0));
        if self.last_width != Some(width) {
            self.last_width = Some(width);
            if let Some(view) = self.view.as_mut() {
                let effects = view.resize(width);
                self.stage.apply(effects, now);
            }
        }

        if self.view.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let Some(layout) = self.view.as_ref().map(|v| v.layout().clone()) else {
            return;
        };
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(layout.width as f32, layout.height as f32),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        let origin = rect.min;
        let to_screen = |x: f64, y: f64| origin + Vec2::new(x as f32, y as f32);

        self.paint_axes(&painter, &layout, now, &to_screen);
        self.paint_marks(&painter, layout.circle_radius as f32, now, &to_screen);

        if let Some(metric) = self.paint_axis_labels(ui, &painter, &layout, origin) {
            self.select_metric(metric, now);
        }

        self.handle_hover(&response, origin, now);
        self.show_tooltip(ctx, &response);

        if self.stage.is_animating(now) {
            ctx.request_repaint();
        } else {
            self.stage.settle(now);
        }
    }

    /// Scale whose domain is the animated domain currently on screen.
    fn displayed_scale(&self, axis: Axis, range: (f64, f64), now: f64) -> LinearScale {
        let d0 = self.stage.value(Channel::DomainStart(axis), now);
        let d1 = self.stage.value(Channel::DomainEnd(axis), now);
        LinearScale::new((d0, d1), range)
    }

    fn paint_axes(
        &self,
        painter: &egui::Painter,
        layout: &crate::charts::Layout,
        now: f64,
        to_screen: &impl Fn(f64, f64) -> Pos2,
    ) {
        let stroke = Stroke::new(1.0, AXIS_COLOR);
        let font = FontId::proportional(TICK_FONT);
        let count = layout.tick_count;

        // X axis
        let axis_y = layout.x_axis_y();
        let scale = self.displayed_scale(Axis::X, layout.x_range(), now);
        let (r0, r1) = scale.range();
        painter.line_segment([to_screen(r0, axis_y), to_screen(r1, axis_y)], stroke);
        let step = scale.tick_step(count);
        for value in scale.ticks(count) {
            let p = to_screen(scale.apply(value), axis_y);
            painter.line_segment([p, p + Vec2::new(0.0, TICK_SIZE)], stroke);
            painter.text(
                p + Vec2::new(0.0, TICK_SIZE + 2.0),
                Align2::CENTER_TOP,
                tick_label(value, step),
                font.clone(),
                AXIS_COLOR,
            );
        }

        // Y axis
        let axis_x = layout.y_axis_x();
        let scale = self.displayed_scale(Axis::Y, layout.y_range(), now);
        let (r0, r1) = scale.range();
        painter.line_segment([to_screen(axis_x, r0), to_screen(axis_x, r1)], stroke);
        let step = scale.tick_step(count);
        for value in scale.ticks(count) {
            let p = to_screen(axis_x, scale.apply(value));
            painter.line_segment([p - Vec2::new(TICK_SIZE, 0.0), p], stroke);
            painter.text(
                p - Vec2::new(TICK_SIZE + 3.0, 0.0),
                Align2::RIGHT_CENTER,
                tick_label(value, step),
                font.clone(),
                AXIS_COLOR,
            );
        }
    }

    fn paint_marks(
        &self,
        painter: &egui::Painter,
        radius: f32,
        now: f64,
        to_screen: &impl Fn(f64, f64) -> Pos2,
    ) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let font = FontId::proportional(radius);

        for mark in view.marks() {
            let i = mark.record;
            let cx = self.stage.value(Channel::Cx(i), now);
            let cy = self.stage.value(Channel::Cy(i), now);
            if !cx.is_finite() || !cy.is_finite() {
                continue;
            }
            painter.circle(
                to_screen(cx, cy),
                radius,
                CIRCLE_FILL,
                Stroke::new(1.0, self.stage.stroke(i)),
            );

            let tx = self.stage.value(Channel::TextX(i), now);
            let ty = self.stage.value(Channel::TextY(i), now);
            painter.text(
                to_screen(tx, ty),
                Align2::CENTER_BOTTOM,
                &mark.abbr,
                font.clone(),
                MARK_TEXT,
            );
        }
    }

    /// Paint the six axis labels. Returns the inactive label that was clicked.
    fn paint_axis_labels(
        &self,
        ui: &egui::Ui,
        painter: &egui::Painter,
        layout: &crate::charts::Layout,
        origin: Pos2,
    ) -> Option<Metric> {
        let spacing = layout.config().label_spacing as f32;
        let font = FontId::proportional(LABEL_FONT);
        let mut clicked = None;

        for metric in Metric::ALL {
            let active = self.stage.is_label_active(metric);
            let offset = metric.label_slot() as f32 * spacing;
            let galley =
                painter.layout_no_wrap(metric.label().to_string(), font.clone(), ACTIVE_LABEL);
            let size = galley.size();

            let (rect, text_pos, angle) = match metric.axis() {
                Axis::X => {
                    let (ax, ay) = layout.x_label_anchor();
                    let center = origin + Vec2::new(ax as f32, ay as f32 + offset);
                    let rect = Rect::from_center_size(center, size);
                    (rect, rect.min, 0.0)
                }
                Axis::Y => {
                    // Rotated -90°: text runs bottom to top, local y maps to screen x.
                    let (ax, ay) = layout.y_label_anchor();
                    let center = origin + Vec2::new(ax as f32 + offset, ay as f32);
                    let rect = Rect::from_center_size(center, Vec2::new(size.y, size.x));
                    (rect, Pos2::new(rect.min.x, rect.max.y), -FRAC_PI_2)
                }
            };

            let id = Id::new(("axis_label", metric.column()));
            let response = ui.interact(rect, id, Sense::click());
            let color = if active {
                ACTIVE_LABEL
            } else if response.hovered() {
                HOVER_LABEL
            } else {
                INACTIVE_LABEL
            };
            painter.add(TextShape::new(text_pos, galley, color).with_angle(angle));

            if !active {
                let response = response.on_hover_cursor(CursorIcon::PointingHand);
                if response.clicked() {
                    clicked = Some(metric);
                }
            }
        }
        clicked
    }

    /// Translate pointer movement into enter/leave events.
    fn handle_hover(&mut self, response: &egui::Response, origin: Pos2, now: f64) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let target = response.hover_pos().and_then(|p| {
            let local = p - origin;
            view.hit_test(f64::from(local.x), f64::from(local.y))
        });
        if target == view.hovered() {
            return;
        }

        let mut effects: Vec<RenderEffect> = Vec::new();
        match target {
            Some(mark) => effects.extend(view.pointer_enter(mark)),
            None => {
                if let Some(previous) = view.hovered() {
                    effects.extend(view.pointer_leave(previous));
                }
            }
        }
        debug!("Hover changed to {:?}", target);
        self.stage.apply(effects, now);
    }

    fn show_tooltip(&self, ctx: &egui::Context, response: &egui::Response) {
        let (Some(tooltip), Some(pointer)) = (self.stage.tooltip(), response.hover_pos()) else {
            return;
        };
        egui::Area::new(Id::new("mark_tooltip"))
            .order(Order::Tooltip)
            .fixed_pos(pointer + TOOLTIP_OFFSET)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(&tooltip.title).strong());
                    ui.label(&tooltip.x_line);
                    ui.label(&tooltip.y_line);
                });
            });
    }
}
