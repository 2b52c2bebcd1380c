pub mod badge;
pub mod indicator;
pub mod on_update;
pub mod queue_state;
pub mod queues;

pub use badge::{Badge, Color, Icon};
pub use indicator::StatusIndicator;
pub use queue_state::{Flag, Flags, QueueState, QueueStatus};
