//! Stage
//! Executes render effects: holds what is currently on screen and
//! interpolates animated channels against a caller-supplied clock.

use crate::charts::effects::{Channel, RenderEffect, DEFAULT_STROKE};
use crate::charts::layout::Layout;
use crate::charts::tooltip::Tooltip;
use crate::data::Metric;
use egui::Color32;
use std::collections::HashMap;
use std::time::Duration;

/// d3's default transition easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// An in-flight interpolation of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    /// Clock time (seconds) the tween started at
    pub start: f64,
    pub duration: Duration,
}

impl Tween {
    pub fn value_at(&self, now: f64) -> f64 {
        let d = self.duration.as_secs_f64();
        if d <= 0.0 || now >= self.start + d {
            return self.to;
        }
        let t = ((now - self.start) / d).max(0.0);
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    pub fn is_done(&self, now: f64) -> bool {
        now >= self.start + self.duration.as_secs_f64()
    }
}

#[derive(Debug, Clone, Copy)]
struct ChannelState {
    value: f64,
    tween: Option<Tween>,
}

impl ChannelState {
    fn sample(&self, now: f64) -> f64 {
        self.tween.map_or(self.value, |t| t.value_at(now))
    }
}

/// Everything currently on the canvas.
#[derive(Debug, Default)]
pub struct Stage {
    channels: HashMap<Channel, ChannelState>,
    labels: HashMap<Metric, bool>,
    strokes: HashMap<usize, Color32>,
    tooltip: Option<Tooltip>,
    layout: Option<Layout>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (new data set).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, effects: impl IntoIterator<Item = RenderEffect>, now: f64) {
        for effect in effects {
            self.apply_one(effect, now);
        }
    }

    fn apply_one(&mut self, effect: RenderEffect, now: f64) {
        match effect {
            RenderEffect::Set { channel, value } => {
                self.channels.insert(channel, ChannelState { value, tween: None });
            }
            RenderEffect::Animate {
                channel,
                from,
                to,
                duration,
            } => {
                // Retarget in place: start from what is on screen right now.
                let from = self
                    .channels
                    .get(&channel)
                    .map_or(from, |state| state.sample(now));
                self.channels.insert(
                    channel,
                    ChannelState {
                        value: to,
                        tween: Some(Tween {
                            from,
                            to,
                            start: now,
                            duration,
                        }),
                    },
                );
            }
            RenderEffect::Relayout(layout) => self.layout = Some(layout),
            RenderEffect::SetLabelActive { metric, active } => {
                self.labels.insert(metric, active);
            }
            RenderEffect::SetStroke { mark, color } => {
                self.strokes.insert(mark, color);
            }
            RenderEffect::ShowTooltip(tooltip) => self.tooltip = Some(tooltip),
            RenderEffect::HideTooltip => self.tooltip = None,
        }
    }

    /// Displayed value of a channel at `now`, or NaN if it was never set.
    pub fn value(&self, channel: Channel, now: f64) -> f64 {
        self.channels
            .get(&channel)
            .map_or(f64::NAN, |state| state.sample(now))
    }

    /// Whether any channel is still moving at `now`.
    pub fn is_animating(&self, now: f64) -> bool {
        self.channels
            .values()
            .any(|s| s.tween.is_some_and(|t| !t.is_done(now)))
    }

    /// Drop finished tweens so sampling stays cheap.
    pub fn settle(&mut self, now: f64) {
        for state in self.channels.values_mut() {
            if state.tween.is_some_and(|t| t.is_done(now)) {
                state.tween = None;
            }
        }
    }

    pub fn is_label_active(&self, metric: Metric) -> bool {
        self.labels.get(&metric).copied().unwrap_or(false)
    }

    pub fn stroke(&self, mark: usize) -> Color32 {
        self.strokes.get(&mark).copied().unwrap_or(DEFAULT_STROKE)
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::effects::{HIGHLIGHT_STROKE, TRANSITION};

    const CX: Channel = Channel::Cx(0);

    fn animate(from: f64, to: f64) -> RenderEffect {
        RenderEffect::Animate {
            channel: CX,
            from,
            to,
            duration: TRANSITION,
        }
    }

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn animate_interpolates_then_settles() {
        let mut stage = Stage::new();
        stage.apply([RenderEffect::Set { channel: CX, value: 100.0 }], 0.0);
        stage.apply([animate(100.0, 200.0)], 0.0);

        assert_eq!(stage.value(CX, 0.0), 100.0);
        assert_eq!(stage.value(CX, 0.15), 150.0);
        assert!(stage.is_animating(0.2));
        assert_eq!(stage.value(CX, 0.3), 200.0);
        assert!(!stage.is_animating(0.3));

        stage.settle(0.3);
        assert_eq!(stage.value(CX, 0.0), 200.0);
    }

    #[test]
    fn second_animation_retargets_from_displayed_value() {
        let mut stage = Stage::new();
        stage.apply([RenderEffect::Set { channel: CX, value: 100.0 }], 0.0);
        stage.apply([animate(100.0, 200.0)], 0.0);
        let midway = stage.value(CX, 0.15);

        // The effect's own `from` is ignored once the channel is on screen.
        stage.apply([animate(200.0, 0.0)], 0.15);
        assert_eq!(stage.value(CX, 0.15), midway);
        assert_eq!(stage.value(CX, 0.45), 0.0);
    }

    #[test]
    fn set_cancels_tween() {
        let mut stage = Stage::new();
        stage.apply([animate(0.0, 10.0)], 0.0);
        stage.apply([RenderEffect::Set { channel: CX, value: 42.0 }], 0.1);
        assert_eq!(stage.value(CX, 0.1), 42.0);
        assert!(!stage.is_animating(0.1));
    }

    #[test]
    fn unset_channel_animates_from_effect_origin() {
        let mut stage = Stage::new();
        stage.apply([animate(10.0, 20.0)], 0.0);
        assert_eq!(stage.value(CX, 0.0), 10.0);
        assert!(stage.value(Channel::Cy(0), 0.0).is_nan());
    }

    #[test]
    fn tracks_labels_strokes_and_tooltip() {
        let mut stage = Stage::new();
        stage.apply(
            [
                RenderEffect::SetLabelActive {
                    metric: Metric::Age,
                    active: true,
                },
                RenderEffect::SetStroke {
                    mark: 3,
                    color: HIGHLIGHT_STROKE,
                },
            ],
            0.0,
        );
        assert!(stage.is_label_active(Metric::Age));
        assert!(!stage.is_label_active(Metric::Income));
        assert_eq!(stage.stroke(3), HIGHLIGHT_STROKE);
        assert_eq!(stage.stroke(4), DEFAULT_STROKE);
        assert!(stage.tooltip().is_none());
    }
}
