//! Charts module - scales, chart state, effects and rendering

pub mod effects;
pub mod layout;
pub mod renderer;
pub mod scale;
pub mod stage;
pub mod tooltip;
pub mod view;

pub use effects::{Channel, RenderEffect, DEFAULT_STROKE, HIGHLIGHT_STROKE, TRANSITION};
pub use layout::{ChartConfig, Layout};
pub use renderer::{RenderError, StaticChartRenderer};
pub use scale::{padded_domain, LinearScale};
pub use stage::Stage;
pub use tooltip::Tooltip;
pub use view::{AxisSelection, ChartView, Mark, ViewError};
