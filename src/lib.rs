pub mod axis;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod grid;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod model;
pub mod snapshot;
pub mod view;

pub use axis::{AxisCell, AxisKey, CellMeta, TimeAxis};
pub use clock::{ClockTime, ClockTimeError, Interval};
pub use config::{ConfigError, TimelineConfig};
pub use geometry::BarPosition;
pub use grid::{Bar, BreakMark, RenderModel, ResourceGrid, ResourceRow};
pub use model::{Break, Resource, Shift, WeeklySchedule};
pub use snapshot::{
    SnapshotError, SnapshotResult, load_resources_from_csv, load_resources_from_json,
    save_render_model_to_json, save_resources_to_csv, save_resources_to_json, validate_resources,
};
pub use view::{Granularity, ViewController, ViewState, ZoomLevel};
