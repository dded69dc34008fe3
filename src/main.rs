// Car Rental Calendar
// Command line entry point for the reservation calendar

use std::io;

use anyhow::Result;
use clap::Parser;

use car_rental_calendar::cli::{run, Cli};

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting car rental calendar");

    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}
