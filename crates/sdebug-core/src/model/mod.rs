pub mod component;
pub mod display;
pub mod log;
pub mod state;

pub use component::ComponentNode;
pub use display::{DisplayEntry, MapExtent, MapLayout};
pub use log::{LogEntry, LogLevel};
pub use state::{split_path, StateEntry, StateValue, ValueKind};
