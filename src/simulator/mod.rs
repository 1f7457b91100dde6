//! Replay engine: one task per patient source, launched by the driver.

pub mod driver;
pub mod replay;

pub use driver::{run_forever, spawn_replays};
pub use replay::{PatientReplay, ReplayReport};
