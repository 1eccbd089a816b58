//! Properties of the chart state under selection and resize events.

mod common;

use common::sample_records;
use health_scatter::charts::{ChartConfig, ChartView, RenderEffect, Stage, ViewError};
use health_scatter::data::{Axis, Metric, Record};

fn view_at(width: f64, x: Metric, y: Metric) -> ChartView {
    ChartView::initialize(ChartConfig::default(), width, sample_records(), x, y)
        .unwrap()
        .0
}

fn extremes(records: &[Record], metric: Metric) -> (f64, f64) {
    records.iter().map(|r| r.value(metric)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), v| (lo.min(v), hi.max(v)),
    )
}

// =============================================================================
// Domain Tests
// =============================================================================

#[test]
fn domain_is_padded_ten_percent_for_every_metric() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    for metric in Metric::ALL {
        view.select_axis_metric(metric.axis(), metric).unwrap();
        let (min, max) = extremes(view.records(), metric);
        assert_eq!(view.scale(metric.axis()).domain(), (0.9 * min, 1.1 * max));
    }
}

#[test]
fn two_state_example() {
    let records = vec![
        Record::new("AL", "Alabama")
            .with(Metric::Poverty, 18.3)
            .with(Metric::Obesity, 32.6),
        Record::new("AK", "Alaska")
            .with(Metric::Poverty, 11.0)
            .with(Metric::Obesity, 28.4),
    ];
    let (view, _) = ChartView::initialize(
        ChartConfig::default(),
        960.0,
        records,
        Metric::Poverty,
        Metric::Obesity,
    )
    .unwrap();

    let (d0, d1) = view.x_scale().domain();
    assert!((d0 - 9.9).abs() < 1e-9);
    assert!((d1 - 20.13).abs() < 1e-9);
    assert_eq!(view.marks()[0].abbr, "AL");
    assert_eq!(view.marks()[0].cx, view.x_scale().apply(18.3));
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn selecting_active_metric_changes_nothing() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    let before = (*view.x_scale(), *view.y_scale(), view.marks().to_vec());

    let effects = view.select_axis_metric(Axis::X, Metric::Poverty).unwrap();

    assert!(effects.is_empty());
    assert_eq!(
        (*view.x_scale(), *view.y_scale(), view.marks().to_vec()),
        before
    );
}

#[test]
fn marks_follow_newly_selected_metric() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    view.select_axis_metric(Axis::X, Metric::Age).unwrap();

    for mark in view.marks() {
        let record = &view.records()[mark.record];
        assert_eq!(mark.cx, view.x_scale().apply(record.value(Metric::Age)));
        assert_eq!(mark.text_x, mark.cx);
    }
    assert!(view.is_active(Metric::Age));
    assert!(!view.is_active(Metric::Poverty));
}

#[test]
fn exactly_one_label_active_per_axis() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    view.select_axis_metric(Axis::Y, Metric::Healthcare).unwrap();
    view.select_axis_metric(Axis::X, Metric::Income).unwrap();

    for axis in [Axis::X, Axis::Y] {
        let active = Metric::for_axis(axis)
            .iter()
            .filter(|m| view.is_active(**m))
            .count();
        assert_eq!(active, 1);
    }
}

#[test]
fn round_trip_matches_direct_selection() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    view.select_axis_metric(Axis::X, Metric::Income).unwrap();
    view.select_axis_metric(Axis::X, Metric::Age).unwrap();
    view.select_axis_metric(Axis::X, Metric::Income).unwrap();

    let mut direct = view_at(960.0, Metric::Poverty, Metric::Obesity);
    direct.select_axis_metric(Axis::X, Metric::Income).unwrap();

    assert_eq!(view.x_scale(), direct.x_scale());
    assert_eq!(view.marks(), direct.marks());
}

#[test]
fn metric_from_other_axis_is_rejected() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    let err = view.select_axis_metric(Axis::X, Metric::Smokes).unwrap_err();
    assert_eq!(
        err,
        ViewError::MetricNotOnAxis {
            metric: Metric::Smokes,
            axis: Axis::X
        }
    );
    assert!(view.is_active(Metric::Poverty));
}

// =============================================================================
// Resize Tests
// =============================================================================

#[test]
fn radius_breakpoint_is_exact() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    view.resize(530.0);
    assert_eq!(view.layout().circle_radius, 5.0);
    view.resize(531.0);
    assert_eq!(view.layout().circle_radius, 10.0);
}

#[test]
fn tick_breakpoint_is_exact() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    view.resize(500.0);
    assert_eq!(view.layout().tick_count, 5);
    view.resize(501.0);
    assert_eq!(view.layout().tick_count, 10);
}

#[test]
fn resize_snaps_and_keeps_domains() {
    let mut view = view_at(960.0, Metric::Poverty, Metric::Obesity);
    let domain = view.x_scale().domain();

    let effects = view.resize(480.0);

    assert!(!effects
        .iter()
        .any(|e| matches!(e, RenderEffect::Animate { .. })));
    assert_eq!(view.x_scale().domain(), domain);
    for mark in view.marks() {
        let record = &view.records()[mark.record];
        assert_eq!(mark.cy, view.y_scale().apply(record.value(Metric::Obesity)));
    }
}

// =============================================================================
// Stage Tests
// =============================================================================

#[test]
fn stage_settles_on_selected_positions() {
    let (mut view, effects) = ChartView::initialize(
        ChartConfig::default(),
        960.0,
        sample_records(),
        Metric::Poverty,
        Metric::Obesity,
    )
    .unwrap();
    let mut stage = Stage::new();
    stage.apply(effects, 0.0);

    stage.apply(view.select_axis_metric(Axis::Y, Metric::Smokes).unwrap(), 1.0);
    assert!(stage.is_animating(1.1));
    assert!(!stage.is_animating(1.5));

    for mark in view.marks() {
        let cy = stage.value(health_scatter::charts::Channel::Cy(mark.record), 2.0);
        assert!((cy - mark.cy).abs() < 1e-9);
    }
    assert!(stage.is_label_active(Metric::Smokes));
    assert!(!stage.is_label_active(Metric::Obesity));
}
