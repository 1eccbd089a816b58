//! Render Effects
//! Descriptions of visual changes emitted by `ChartView` event handlers.

use crate::charts::layout::Layout;
use crate::charts::tooltip::Tooltip;
use crate::data::{Axis, Metric};
use egui::Color32;
use std::time::Duration;

/// Duration of the animated move after an axis metric change.
pub const TRANSITION: Duration = Duration::from_millis(300);

/// Mark border while the pointer is over it.
pub const HIGHLIGHT_STROKE: Color32 = Color32::from_rgb(0x32, 0x32, 0x32);
/// Mark border otherwise.
pub const DEFAULT_STROKE: Color32 = Color32::from_rgb(0xe3, 0xe3, 0xe3);

/// One animatable scalar on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Circle centre x of a mark
    Cx(usize),
    /// Circle centre y of a mark
    Cy(usize),
    /// Abbreviation label x of a mark
    TextX(usize),
    /// Abbreviation label baseline y of a mark
    TextY(usize),
    /// Lower end of an axis domain (drives the tick positions)
    DomainStart(Axis),
    /// Upper end of an axis domain
    DomainEnd(Axis),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEffect {
    /// Snap a channel to a value.
    Set { channel: Channel, value: f64 },
    /// Move a channel from `from` to `to` over `duration`.
    Animate {
        channel: Channel,
        from: f64,
        to: f64,
        duration: Duration,
    },
    /// Canvas size, radius, tick density or label anchors changed.
    Relayout(Layout),
    /// Axis label emphasis.
    SetLabelActive { metric: Metric, active: bool },
    /// Border colour of a mark's circle.
    SetStroke { mark: usize, color: Color32 },
    ShowTooltip(Tooltip),
    HideTooltip,
}

impl RenderEffect {
    pub fn channel(&self) -> Option<Channel> {
        match self {
            RenderEffect::Set { channel, .. } | RenderEffect::Animate { channel, .. } => {
                Some(*channel)
            }
            _ => None,
        }
    }

    /// Final value a channel effect settles on.
    pub fn target(&self) -> Option<f64> {
        match self {
            RenderEffect::Set { value, .. } => Some(*value),
            RenderEffect::Animate { to, .. } => Some(*to),
            _ => None,
        }
    }
}
