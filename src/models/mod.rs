// Module exports for models

pub mod application;
pub mod calendar;
pub mod car;
pub mod error;
pub mod period;
pub mod settings;
pub mod slot;
pub mod week;
pub mod winning;
