pub mod app;
pub mod change;

pub use app::{AppRecord, Snapshot, Timeline};
pub use change::PriceChange;
