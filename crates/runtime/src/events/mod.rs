//! Event distribution for renderers and loggers.

mod bus;

pub use bus::EventBus;
