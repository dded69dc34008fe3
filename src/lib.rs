// Car Rental Calendar Library
// Exports all modules for testing and reuse

pub mod cli;
pub mod models;
pub mod services;
pub mod ui_text;
pub mod utils;
