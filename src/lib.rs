pub mod assoc;
pub mod centroid_tracker;
pub mod config;
pub mod crossing;
pub mod detection;
pub mod error;
pub mod line_counter;
pub mod palette;
pub mod rect;
pub mod session;
pub mod track;
pub mod trajectory;

#[cfg(test)]
mod test_line_counter;

pub use centroid_tracker::{CentroidTracker, TrackedObject};
pub use config::{CounterConfig, UnmatchedPolicy};
pub use crossing::{CountingLine, CrossingDetector, CrossingDirection, CrossingEvent};
pub use detection::Detection;
pub use error::TrackError;
pub use line_counter::{FrameOutput, LineCounter};
pub use rect::{Centroid, Rect};
pub use session::{SessionAggregate, SessionRecord};
pub use track::Track;
pub use trajectory::Trajectory;
