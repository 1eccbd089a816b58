//! Static Chart Renderer
//! Exports the current chart as an image using plotters.
//!
//! Layout matches the interactive canvas:
//! 1. Axis lines at the scale range edges, with ticks and tick labels
//! 2. Circles with the region abbreviation inside
//! 3. Three stacked labels per axis, the active one emphasised

use crate::charts::scale::tick_label;
use crate::charts::view::ChartView;
use crate::data::{Axis, Metric};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;
use tracing::info;

// Colors
const CIRCLE_FILL: RGBColor = RGBColor(137, 189, 211);
const CIRCLE_STROKE: RGBColor = RGBColor(0xe3, 0xe3, 0xe3);
const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);
const ACTIVE_LABEL: RGBColor = RGBColor(0, 0, 0);
const INACTIVE_LABEL: RGBColor = RGBColor(0xc6, 0xc6, 0xc6);

const TICK_SIZE: i32 = 6;
const TICK_FONT: f64 = 10.0;
const LABEL_FONT: f64 = 16.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Chart is empty")]
    Empty,
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Write the chart to `path`: SVG for a `.svg` extension, PNG otherwise.
    pub fn export(view: &ChartView, path: &Path) -> Result<(), RenderError> {
        if view.marks().is_empty() {
            return Err(RenderError::Empty);
        }
        let (w, h) = Self::canvas_size(view);

        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            let root = SVGBackend::new(path, (w, h)).into_drawing_area();
            Self::draw_chart(&root, view)?;
            root.present().map_err(draw_err)?;
        } else {
            let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
            Self::draw_chart(&root, view)?;
            root.present().map_err(draw_err)?;
        }

        info!("Exported chart ({}x{}) to {}", w, h, path.display());
        Ok(())
    }

    /// Whole-pixel canvas size of the view.
    pub fn canvas_size(view: &ChartView) -> (u32, u32) {
        let layout = view.layout();
        (
            layout.width.max(1.0).round() as u32,
            layout.height.max(1.0).round() as u32,
        )
    }

    /// Draw the chart onto any plotters drawing area.
    pub fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &ChartView,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;
        Self::draw_axes(root, view)?;
        Self::draw_marks(root, view)?;
        Self::draw_axis_labels(root, view)?;
        Ok(())
    }

    fn draw_axes<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &ChartView,
    ) -> Result<(), RenderError> {
        let layout = view.layout();
        let tick_count = layout.tick_count;
        let axis_y = layout.x_axis_y() as i32;
        let axis_x = layout.y_axis_x() as i32;

        // X axis
        let x_scale = view.x_scale();
        let (r0, r1) = x_scale.range();
        root.draw(&PathElement::new(
            vec![(r0 as i32, axis_y), (r1 as i32, axis_y)],
            AXIS_COLOR.stroke_width(1),
        ))
        .map_err(draw_err)?;
        let step = x_scale.tick_step(tick_count);
        for value in x_scale.ticks(tick_count) {
            let px = x_scale.apply(value) as i32;
            root.draw(&PathElement::new(
                vec![(px, axis_y), (px, axis_y + TICK_SIZE)],
                AXIS_COLOR.stroke_width(1),
            ))
            .map_err(draw_err)?;
            root.draw(&Text::new(
                tick_label(value, step),
                (px, axis_y + TICK_SIZE + 2),
                ("sans-serif", TICK_FONT)
                    .into_font()
                    .color(&AXIS_COLOR)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(draw_err)?;
        }

        // Y axis
        let y_scale = view.y_scale();
        let (r0, r1) = y_scale.range();
        root.draw(&PathElement::new(
            vec![(axis_x, r0 as i32), (axis_x, r1 as i32)],
            AXIS_COLOR.stroke_width(1),
        ))
        .map_err(draw_err)?;
        let step = y_scale.tick_step(tick_count);
        for value in y_scale.ticks(tick_count) {
            let py = y_scale.apply(value) as i32;
            root.draw(&PathElement::new(
                vec![(axis_x - TICK_SIZE, py), (axis_x, py)],
                AXIS_COLOR.stroke_width(1),
            ))
            .map_err(draw_err)?;
            root.draw(&Text::new(
                tick_label(value, step),
                (axis_x - TICK_SIZE - 3, py),
                ("sans-serif", TICK_FONT)
                    .into_font()
                    .color(&AXIS_COLOR)
                    .pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_marks<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &ChartView,
    ) -> Result<(), RenderError> {
        let radius = view.layout().circle_radius;
        let r = radius.round() as u32;

        for mark in view.marks().iter().filter(|m| m.is_placed()) {
            let center = (mark.cx.round() as i32, mark.cy.round() as i32);
            root.draw(&Circle::new(center, r, CIRCLE_FILL.filled()))
                .map_err(draw_err)?;
            root.draw(&Circle::new(center, r, CIRCLE_STROKE.stroke_width(1)))
                .map_err(draw_err)?;
            root.draw(&Text::new(
                mark.abbr.clone(),
                (mark.text_x.round() as i32, mark.text_y.round() as i32),
                ("sans-serif", radius)
                    .into_font()
                    .color(&WHITE)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            ))
            .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_axis_labels<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &ChartView,
    ) -> Result<(), RenderError> {
        let layout = view.layout();
        let spacing = layout.config().label_spacing;

        for axis in [Axis::X, Axis::Y] {
            for metric in Metric::for_axis(axis) {
                let color = if view.is_active(metric) {
                    ACTIVE_LABEL
                } else {
                    INACTIVE_LABEL
                };
                let offset = metric.label_slot() as f64 * spacing;
                let style = ("sans-serif", LABEL_FONT)
                    .into_font()
                    .color(&color)
                    .pos(Pos::new(HPos::Center, VPos::Center));

                let (pos, style) = match axis {
                    Axis::X => {
                        let (ax, ay) = layout.x_label_anchor();
                        ((ax as i32, (ay + offset) as i32), style)
                    }
                    Axis::Y => {
                        // Rotated -90°: the group's local y runs along screen x.
                        let (ax, ay) = layout.y_label_anchor();
                        (
                            ((ax + offset) as i32, ay as i32),
                            style.transform(FontTransform::Rotate270),
                        )
                    }
                };
                root.draw(&Text::new(metric.label(), pos, style))
                    .map_err(draw_err)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::layout::ChartConfig;
    use crate::data::Record;

    #[test]
    fn canvas_size_follows_layout() {
        let records = vec![Record::new("AL", "Alabama")
            .with(Metric::Poverty, 18.3)
            .with(Metric::Obesity, 32.6)];
        let (view, _) = ChartView::initialize(
            ChartConfig::default(),
            780.0,
            records,
            Metric::Poverty,
            Metric::Obesity,
        )
        .unwrap();
        assert_eq!(StaticChartRenderer::canvas_size(&view), (780, 580));
    }

    #[test]
    fn empty_chart_is_not_exported() {
        let (view, _) = ChartView::initialize(
            ChartConfig::default(),
            780.0,
            Vec::new(),
            Metric::Poverty,
            Metric::Obesity,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = StaticChartRenderer::export(&view, &dir.path().join("chart.png")).unwrap_err();
        assert!(matches!(err, RenderError::Empty));
    }
}
