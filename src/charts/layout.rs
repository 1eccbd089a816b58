//! Layout Module
//! Canvas geometry derived from the container width.

use serde::{Deserialize, Serialize};

/// Canvas height is `width - width / ASPECT_DIVISOR`.
pub const ASPECT_DIVISOR: f64 = 3.9;

/// Widths up to this use the small circle radius.
pub const RADIUS_BREAKPOINT: f64 = 530.0;
pub const SMALL_RADIUS: f64 = 5.0;
pub const LARGE_RADIUS: f64 = 10.0;

/// Widths up to this request fewer axis ticks.
pub const TICK_BREAKPOINT: f64 = 500.0;
pub const FEW_TICKS: usize = 5;
pub const MANY_TICKS: usize = 10;

/// Fixed style parameters of the chart (pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer margin on every side
    pub margin: f64,
    /// Space reserved left of and below the plot for the axis label groups
    pub label_area: f64,
    /// Offset of the x label group above the bottom margin
    pub text_pad_bottom: f64,
    /// Offset of the y label group right of the left margin
    pub text_pad_left: f64,
    /// Distance between stacked axis labels
    pub label_spacing: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            label_area: 110.0,
            text_pad_bottom: 40.0,
            text_pad_left: 40.0,
            label_spacing: 26.0,
        }
    }
}

/// Geometry of the canvas at one width.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub circle_radius: f64,
    pub tick_count: usize,
    config: ChartConfig,
}

impl Layout {
    pub fn for_width(width: f64, config: &ChartConfig) -> Self {
        Self {
            width,
            height: width - width / ASPECT_DIVISOR,
            circle_radius: circle_radius(width),
            tick_count: tick_count(width),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Pixel range of the x scale.
    pub fn x_range(&self) -> (f64, f64) {
        let c = &self.config;
        (c.margin + c.label_area, self.width - c.margin)
    }

    /// Pixel range of the y scale; inverted because screen y grows downward.
    pub fn y_range(&self) -> (f64, f64) {
        let c = &self.config;
        (self.height - c.margin - c.label_area, c.margin)
    }

    /// Vertical position of the x axis line.
    pub fn x_axis_y(&self) -> f64 {
        self.height - self.config.margin - self.config.label_area
    }

    /// Horizontal position of the y axis line.
    pub fn y_axis_x(&self) -> f64 {
        self.config.margin + self.config.label_area
    }

    /// Centre of the x label group (below the plot).
    pub fn x_label_anchor(&self) -> (f64, f64) {
        let c = &self.config;
        (
            (self.width - c.label_area) / 2.0 + c.label_area,
            self.height - c.margin - c.text_pad_bottom,
        )
    }

    /// Centre of the y label group (left of the plot, rotated -90°).
    pub fn y_label_anchor(&self) -> (f64, f64) {
        let c = &self.config;
        (
            c.margin + c.text_pad_left,
            (self.height + c.label_area) / 2.0 - c.label_area,
        )
    }

    /// Vertical offset of a mark's label from the circle centre.
    pub fn label_offset(&self) -> f64 {
        self.circle_radius / 3.0
    }
}

pub fn circle_radius(width: f64) -> f64 {
    if width <= RADIUS_BREAKPOINT {
        SMALL_RADIUS
    } else {
        LARGE_RADIUS
    }
}

pub fn tick_count(width: f64) -> usize {
    if width <= TICK_BREAKPOINT {
        FEW_TICKS
    } else {
        MANY_TICKS
    }
}
