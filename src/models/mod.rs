//! Data carried over the wire.

pub mod vitals;

pub use vitals::VitalReading;
