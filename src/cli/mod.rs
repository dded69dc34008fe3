// Command line interface
// Parses arguments and runs one command against the stored state

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::models::application::ApplicationRequest;
use crate::models::car::find_car;
use crate::models::settings::Settings;
use crate::models::slot::SlotId;
use crate::models::winning::WinRequest;
use crate::services::calendar_view::calendar_view;
use crate::services::database::Database;
use crate::services::period::{is_aligned, recommend_aligned_period, recommend_from_form};
use crate::services::settings::SettingsService;
use crate::services::state::AppState;
use crate::services::storage::SqliteStore;
use crate::ui_text::{
    render_application, render_filters, render_month, render_period, render_recommendation,
    render_roster, render_winning_count, render_winning_record,
};

#[derive(Parser, Debug)]
#[command(
    name = "car-rental-calendar",
    version,
    about = "Company car rental reservation calendar"
)]
pub struct Cli {
    /// Settings file (default: settings.toml in the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides `database_path` from the settings
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Command to run; prints the calendar when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rental period and the month calendars
    Show {
        /// Car to show (default from settings)
        #[arg(long)]
        car: Option<String>,
        /// slot1 or slot2 (default from settings)
        #[arg(long)]
        slot: Option<SlotId>,
        /// Only this month, as YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Set the rental period (YYYY-MM-DD)
    SetPeriod {
        start: String,
        end: String,
        /// Store the recommended slot-aligned dates instead
        #[arg(long)]
        aligned: bool,
    },
    /// Print slot-aligned dates for a raw range without storing anything
    Recommend { start: String, end: String },
    /// Apply for the slot starting on a given date
    Apply {
        /// Korean name
        #[arg(long)]
        name: String,
        /// English id
        #[arg(long = "id")]
        english_id: String,
        #[arg(long)]
        car: String,
        #[arg(long)]
        slot: SlotId,
        /// Start date of the slot (Monday for slot1, Friday for slot2)
        #[arg(long)]
        date: NaiveDate,
    },
    /// List applicants of the slot starting on a given date
    Roster {
        #[arg(long)]
        car: String,
        #[arg(long)]
        slot: SlotId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Manage the winning history
    #[command(subcommand)]
    Win(WinCommand),
}

#[derive(Subcommand, Debug)]
pub enum WinCommand {
    /// Record a drawing result
    Add {
        /// English id
        #[arg(long = "id")]
        english_id: String,
        /// Korean name
        #[arg(long)]
        name: String,
        #[arg(long)]
        car: String,
        /// Winning date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete a record by its number
    Delete { id: i64 },
    /// List records, optionally with per-car counts for one employee
    List {
        #[arg(long = "id")]
        english_id: Option<String>,
    },
}

/// Run a parsed command, writing user-facing output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let settings_service = match cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::with_default_path(),
    };
    let mut settings = settings_service.load()?;
    if let Some(db_path) = cli.db {
        settings.database_path = Some(db_path);
    }

    let command = cli.command.unwrap_or(Command::Show {
        car: None,
        slot: None,
        month: None,
    });

    // Recommendations never touch stored state
    if let Command::Recommend { start, end } = &command {
        return recommend(out, start, end);
    }

    let db = open_database(&settings)?;
    let store = SqliteStore::new(&db);
    let mut state = AppState::load(&store, settings.winning_policy())?;
    let now = Utc::now();

    match command {
        Command::Show { car, slot, month } => show(out, &state, &settings, car, slot, month),
        Command::SetPeriod { start, end, aligned } => {
            let (start, end) = if aligned {
                recommend_from_form(&start, &end)
                    .map(|r| r.form_values())
                    .ok_or_else(|| anyhow!("날짜 형식은 YYYY-MM-DD 입니다"))?
            } else {
                (start, end)
            };

            let period = state.set_period(&store, &start, &end, now)?;
            writeln!(out, "{}", render_period(Some(&period)))?;
            if !is_aligned(&period) {
                if let Some(r) =
                    recommend_aligned_period(Some(period.start_date), Some(period.end_date))
                {
                    writeln!(out, "{}", render_recommendation(&r))?;
                }
            }
            Ok(())
        }
        Command::Recommend { .. } => Ok(()),
        Command::Apply {
            name,
            english_id,
            car,
            slot,
            date,
        } => {
            let week_id = state.bookable_week(date, slot).ok_or_else(|| {
                anyhow!("{}은(는) 신청할 수 있는 {} 시작일이 아닙니다", date, slot.display_name())
            })?;
            let request = ApplicationRequest::new(name, english_id, car, week_id, slot);
            let application = state.submit_application(&store, request, now)?;
            let rate = state.competition_rate(&application.week_id, slot, &application.car_id);
            writeln!(out, "{}", render_application(&application, rate))?;
            Ok(())
        }
        Command::Roster { car, slot, date } => {
            let car_label = find_car(state.cars(), &car)
                .map(|c| c.label())
                .ok_or_else(|| anyhow!("Unknown car: {}", car))?;
            let week_id = state
                .bookable_week(date, slot)
                .ok_or_else(|| anyhow!("{}에 시작하는 {}가 없습니다", date, slot.display_name()))?;
            let applicants = state.applicants_for(&week_id, slot, &car);
            writeln!(out, "{}", render_roster(&week_id, slot, &car_label, &applicants))?;
            Ok(())
        }
        Command::Win(WinCommand::Add {
            english_id,
            name,
            car,
            date,
        }) => {
            let record = state.record_win(&store, WinRequest::new(english_id, name, car, date), now)?;
            let summary = state.winning_count(&record.english_id, &record.car_id);
            writeln!(out, "당첨 등록: {}", render_winning_record(&record))?;
            writeln!(out, "{}", render_winning_count(&summary, state.winning().policy().limit))?;
            Ok(())
        }
        Command::Win(WinCommand::Delete { id }) => {
            match state.delete_win(&store, id)? {
                Some(record) => writeln!(out, "당첨 기록 삭제: {}", render_winning_record(&record))?,
                None => writeln!(out, "#{} 당첨 기록이 없습니다", id)?,
            }
            Ok(())
        }
        Command::Win(WinCommand::List { english_id }) => win_list(out, &state, english_id),
    }
}

fn open_database(settings: &Settings) -> Result<Database> {
    let db_path = SettingsService::database_path(settings);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let db = Database::new(&db_path.to_string_lossy())?;
    db.initialize_schema()?;
    Ok(db)
}

fn recommend<W: Write>(out: &mut W, start: &str, end: &str) -> Result<()> {
    let Some(recommendation) = recommend_from_form(start, end) else {
        bail!("날짜 형식은 YYYY-MM-DD 입니다");
    };
    writeln!(out, "{}", render_recommendation(&recommendation))?;
    Ok(())
}

fn show<W: Write>(
    out: &mut W,
    state: &AppState,
    settings: &Settings,
    car: Option<String>,
    slot: Option<SlotId>,
    month: Option<String>,
) -> Result<()> {
    let car_id = car.unwrap_or_else(|| settings.default_car.clone());
    let slot = slot.unwrap_or(settings.default_slot);
    if find_car(state.cars(), &car_id).is_none() {
        bail!("Unknown car: {}", car_id);
    }

    writeln!(out, "{}", render_period(state.period()))?;
    let Some(period) = state.period() else {
        return Ok(());
    };

    if !is_aligned(period) {
        if let Some(r) = recommend_aligned_period(Some(period.start_date), Some(period.end_date)) {
            writeln!(out, "{}", render_recommendation(&r))?;
        }
    }
    writeln!(out, "{}", render_filters(state.cars(), &car_id, slot))?;

    let months: Vec<_> = calendar_view(state, &car_id, slot, settings.month_policy)
        .into_iter()
        .filter(|view| month.as_deref().map_or(true, |m| view.month.key() == m))
        .collect();
    if months.is_empty() {
        writeln!(out, "표시할 달이 없습니다")?;
    }

    for view in &months {
        writeln!(out)?;
        writeln!(out, "{}", render_month(view, state.cars()))?;
    }
    Ok(())
}

fn win_list<W: Write>(out: &mut W, state: &AppState, english_id: Option<String>) -> Result<()> {
    let records: Vec<_> = state
        .winning()
        .records()
        .iter()
        .filter(|r| english_id.as_deref().map_or(true, |id| r.english_id == id))
        .collect();

    if records.is_empty() {
        writeln!(out, "당첨 기록이 없습니다")?;
    }
    for record in &records {
        writeln!(out, "{}", render_winning_record(record))?;
    }

    if let Some(id) = english_id {
        let limit = state.winning().policy().limit;
        for car in state.cars() {
            let summary = state.winning_count(&id, &car.id);
            writeln!(out, "{}: {}", car.label(), render_winning_count(&summary, limit))?;
        }
    }
    Ok(())
}
