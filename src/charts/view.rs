//! Chart View
//! Owns the mapping between data space and canvas space and keeps every
//! mark in step with the current axis selections and viewport width.
//!
//! Each event handler updates the view and returns the `RenderEffect`s
//! the host has to execute; the view never draws anything itself.

use crate::charts::effects::{
    Channel, RenderEffect, DEFAULT_STROKE, HIGHLIGHT_STROKE, TRANSITION,
};
use crate::charts::layout::{ChartConfig, Layout};
use crate::charts::scale::{padded_domain, LinearScale};
use crate::charts::tooltip::Tooltip;
use crate::data::{Axis, Metric, Record};
use thiserror::Error;
use tracing::{debug, info};

/// Domain used when a metric has no finite value at all.
const FALLBACK_DOMAIN: (f64, f64) = (0.0, 1.0);

#[derive(Error, Debug, PartialEq)]
pub enum ViewError {
    #[error("Metric '{metric}' does not belong to the {} axis", .axis.name())]
    MetricNotOnAxis { metric: Metric, axis: Axis },
}

/// The active metric of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSelection {
    axis: Axis,
    active: Metric,
}

impl AxisSelection {
    pub fn new(axis: Axis, active: Metric) -> Result<Self, ViewError> {
        Self::check(axis, active)?;
        Ok(Self { axis, active })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn active(&self) -> Metric {
        self.active
    }

    pub fn is_active(&self, metric: Metric) -> bool {
        self.active == metric
    }

    /// Make `metric` active. Returns the previously active metric, or
    /// `None` when `metric` already was active.
    pub fn select(&mut self, metric: Metric) -> Result<Option<Metric>, ViewError> {
        Self::check(self.axis, metric)?;
        if self.active == metric {
            return Ok(None);
        }
        Ok(Some(std::mem::replace(&mut self.active, metric)))
    }

    fn check(axis: Axis, metric: Metric) -> Result<(), ViewError> {
        if metric.axis() == axis {
            Ok(())
        } else {
            Err(ViewError::MetricNotOnAxis { metric, axis })
        }
    }
}

/// Circle plus abbreviation label for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Index into the record set
    pub record: usize,
    pub abbr: String,
    pub cx: f64,
    pub cy: f64,
    pub text_x: f64,
    pub text_y: f64,
}

impl Mark {
    fn derive(record: usize, data: &Record, view: &ChartView) -> Self {
        let cx = view.x_scale.apply(data.value(view.x.active()));
        let cy = view.y_scale.apply(data.value(view.y.active()));
        Self {
            record,
            abbr: data.abbr.clone(),
            cx,
            cy,
            text_x: cx,
            text_y: cy + view.layout.label_offset(),
        }
    }

    /// Whether the mark can be placed at all (its values parsed).
    pub fn is_placed(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite()
    }
}

/// Scatter chart state: selections, scales, layout and derived marks.
#[derive(Debug, Clone)]
pub struct ChartView {
    config: ChartConfig,
    layout: Layout,
    records: Vec<Record>,
    x: AxisSelection,
    y: AxisSelection,
    x_scale: LinearScale,
    y_scale: LinearScale,
    marks: Vec<Mark>,
    hovered: Option<usize>,
}

impl ChartView {
    /// Build the chart for `records` at the given container width.
    pub fn initialize(
        config: ChartConfig,
        width: f64,
        records: Vec<Record>,
        initial_x: Metric,
        initial_y: Metric,
    ) -> Result<(Self, Vec<RenderEffect>), ViewError> {
        let x = AxisSelection::new(Axis::X, initial_x)?;
        let y = AxisSelection::new(Axis::Y, initial_y)?;
        let layout = Layout::for_width(width, &config);

        let x_scale = LinearScale::new(Self::domain_of(&records, initial_x), layout.x_range());
        let y_scale = LinearScale::new(Self::domain_of(&records, initial_y), layout.y_range());

        let mut view = Self {
            config,
            layout,
            records,
            x,
            y,
            x_scale,
            y_scale,
            marks: Vec::new(),
            hovered: None,
        };
        view.rebuild_marks();

        info!(
            "Chart initialized: {} marks, x={}, y={}, width={}",
            view.marks.len(),
            initial_x,
            initial_y,
            width
        );

        let mut effects = vec![RenderEffect::Relayout(view.layout.clone())];
        effects.extend(view.snap_effects());
        for metric in Metric::ALL {
            effects.push(RenderEffect::SetLabelActive {
                metric,
                active: view.is_active(metric),
            });
        }
        for mark in 0..view.marks.len() {
            effects.push(RenderEffect::SetStroke {
                mark,
                color: DEFAULT_STROKE,
            });
        }
        Ok((view, effects))
    }

    /// Make `metric` drive `axis` and animate the marks to their new places.
    ///
    /// Selecting the metric that is already active is a no-op.
    pub fn select_axis_metric(
        &mut self,
        axis: Axis,
        metric: Metric,
    ) -> Result<Vec<RenderEffect>, ViewError> {
        let Some(previous) = self.selection_mut(axis).select(metric)? else {
            debug!("{} already drives the {} axis", metric, axis.name());
            return Ok(Vec::new());
        };

        let old_domain = self.scale(axis).domain();
        let old_marks = std::mem::take(&mut self.marks);

        let domain = Self::domain_of(&self.records, metric);
        self.scale_mut(axis).set_domain(domain);
        self.rebuild_marks();

        info!(
            "{} axis: {} -> {} (domain {:.3}..{:.3})",
            axis.name(),
            previous,
            metric,
            domain.0,
            domain.1
        );

        let mut effects = vec![
            Self::animate(Channel::DomainStart(axis), old_domain.0, domain.0),
            Self::animate(Channel::DomainEnd(axis), old_domain.1, domain.1),
        ];
        for (old, new) in old_marks.iter().zip(&self.marks) {
            let i = new.record;
            match axis {
                Axis::X => {
                    effects.push(Self::animate(Channel::Cx(i), old.cx, new.cx));
                    effects.push(Self::animate(Channel::TextX(i), old.text_x, new.text_x));
                }
                Axis::Y => {
                    effects.push(Self::animate(Channel::Cy(i), old.cy, new.cy));
                    effects.push(Self::animate(Channel::TextY(i), old.text_y, new.text_y));
                }
            }
        }
        effects.push(RenderEffect::SetLabelActive {
            metric: previous,
            active: false,
        });
        effects.push(RenderEffect::SetLabelActive {
            metric,
            active: true,
        });

        // An open tooltip shows the old metric's value.
        if let Some(tooltip) = self.hovered.and_then(|i| self.tooltip(i)) {
            effects.push(RenderEffect::ShowTooltip(tooltip));
        }
        Ok(effects)
    }

    /// Fit the chart to a new container width. Everything snaps; nothing animates.
    pub fn resize(&mut self, width: f64) -> Vec<RenderEffect> {
        self.layout = Layout::for_width(width, &self.config);
        self.x_scale.set_range(self.layout.x_range());
        self.y_scale.set_range(self.layout.y_range());
        self.rebuild_marks();

        debug!(
            "Resized to {}x{:.1}, radius {}, {} ticks",
            self.layout.width, self.layout.height, self.layout.circle_radius, self.layout.tick_count
        );

        let mut effects = vec![RenderEffect::Relayout(self.layout.clone())];
        effects.extend(self.snap_effects());
        effects
    }

    /// Pointer entered a mark: show its tooltip and highlight its border.
    pub fn pointer_enter(&mut self, mark: usize) -> Vec<RenderEffect> {
        if mark >= self.marks.len() || self.hovered == Some(mark) {
            return Vec::new();
        }

        let mut effects = match self.hovered {
            Some(previous) => self.pointer_leave(previous),
            None => Vec::new(),
        };
        if let Some(tooltip) = self.tooltip(mark) {
            effects.push(RenderEffect::ShowTooltip(tooltip));
        }
        effects.push(RenderEffect::SetStroke {
            mark,
            color: HIGHLIGHT_STROKE,
        });
        self.hovered = Some(mark);
        effects
    }

    /// Pointer left a mark: hide the tooltip and restore the border.
    pub fn pointer_leave(&mut self, mark: usize) -> Vec<RenderEffect> {
        if self.hovered != Some(mark) {
            return Vec::new();
        }
        self.hovered = None;
        vec![
            RenderEffect::HideTooltip,
            RenderEffect::SetStroke {
                mark,
                color: DEFAULT_STROKE,
            },
        ]
    }

    /// Topmost mark whose circle covers `(x, y)`; its label sits inside the circle.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let r = self.layout.circle_radius;
        self.marks
            .iter()
            .rev()
            .filter(|m| m.is_placed())
            .find(|m| {
                let (dx, dy) = (x - m.cx, y - m.cy);
                dx * dx + dy * dy <= r * r
            })
            .map(|m| m.record)
    }

    /// Tooltip for a mark under the current selections.
    pub fn tooltip(&self, mark: usize) -> Option<Tooltip> {
        let record = self.records.get(mark)?;
        Some(Tooltip::for_record(
            mark,
            record,
            self.x.active(),
            self.y.active(),
        ))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn scale(&self, axis: Axis) -> &LinearScale {
        match axis {
            Axis::X => &self.x_scale,
            Axis::Y => &self.y_scale,
        }
    }

    pub fn selection(&self, axis: Axis) -> &AxisSelection {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn active_metric(&self, axis: Axis) -> Metric {
        self.selection(axis).active()
    }

    pub fn is_active(&self, metric: Metric) -> bool {
        self.selection(metric.axis()).is_active(metric)
    }

    fn selection_mut(&mut self, axis: Axis) -> &mut AxisSelection {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    fn scale_mut(&mut self, axis: Axis) -> &mut LinearScale {
        match axis {
            Axis::X => &mut self.x_scale,
            Axis::Y => &mut self.y_scale,
        }
    }

    fn domain_of(records: &[Record], metric: Metric) -> (f64, f64) {
        padded_domain(records, metric).unwrap_or(FALLBACK_DOMAIN)
    }

    fn rebuild_marks(&mut self) {
        let marks = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| Mark::derive(i, r, self))
            .collect();
        self.marks = marks;
    }

    /// `Set` effects placing every channel at its current target.
    fn snap_effects(&self) -> Vec<RenderEffect> {
        let set = |channel, value| RenderEffect::Set { channel, value };
        let mut effects = Vec::with_capacity(4 + self.marks.len() * 4);
        for axis in [Axis::X, Axis::Y] {
            let (d0, d1) = self.scale(axis).domain();
            effects.push(set(Channel::DomainStart(axis), d0));
            effects.push(set(Channel::DomainEnd(axis), d1));
        }
        for m in &self.marks {
            effects.push(set(Channel::Cx(m.record), m.cx));
            effects.push(set(Channel::Cy(m.record), m.cy));
            effects.push(set(Channel::TextX(m.record), m.text_x));
            effects.push(set(Channel::TextY(m.record), m.text_y));
        }
        effects
    }

    fn animate(channel: Channel, from: f64, to: f64) -> RenderEffect {
        RenderEffect::Animate {
            channel,
            from,
            to,
            duration: TRANSITION,
        }
    }
}
