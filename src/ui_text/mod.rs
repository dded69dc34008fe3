// Text presentation layer
// Renders month views and period summaries for the terminal

use chrono::{Datelike, NaiveDate};

use crate::models::application::Application;
use crate::models::calendar::{CellState, MonthCell, MonthView};
use crate::models::car::{find_car, Car};
use crate::models::period::RentalPeriod;
use crate::models::slot::SlotId;
use crate::models::winning::{WinningCount, WinningRecord};
use crate::services::period::RecommendedPeriod;
use crate::utils::date::{format_ymd, korean_day_name, KOREAN_DAY_NAMES};

/// Marker legend printed under each month.
pub const LEGEND: &str =
    "* 신청 가능  ! 기간 부족  > 종료일  - 이용 중  ~ 다른 회차  . 기간 외";

/// Single-character marker drawn after the day number.
pub fn state_marker(state: CellState) -> char {
    match state {
        CellState::StartComplete => '*',
        CellState::StartIncomplete => '!',
        CellState::EndComplete => '>',
        CellState::MidRange => '-',
        CellState::OtherSlotSuppressed => '~',
        CellState::OutOfPeriod => '.',
        CellState::OtherMonth | CellState::Plain => ' ',
    }
}

fn render_cell(cell: &MonthCell) -> String {
    let state = cell.view.state();
    if state == CellState::OtherMonth {
        return "    ".to_string();
    }
    format!("{:>2}{} ", cell.view.cell.day(), state_marker(state))
}

fn date_with_day(date: NaiveDate) -> String {
    format!("{} ({})", format_ymd(date), korean_day_name(date.weekday()))
}

/// Grid, legend and applicant lines for one month.
pub fn render_month(view: &MonthView, cars: &[Car]) -> String {
    let car_label = find_car(cars, &view.car_id)
        .map(|car| car.label())
        .unwrap_or_else(|| view.car_id.clone());

    let mut lines = vec![
        format!(
            "{}  {} · {} ({})",
            view.month.title(),
            car_label,
            view.slot.display_name(),
            view.slot.time_window_label()
        ),
        KOREAN_DAY_NAMES
            .iter()
            .map(|name| format!(" {} ", name))
            .collect::<String>()
            .trim_end()
            .to_string(),
    ];

    for row in view.cells.chunks(7) {
        let line: String = row.iter().map(render_cell).collect();
        if !line.trim().is_empty() {
            lines.push(line.trim_end().to_string());
        }
    }

    lines.push(LEGEND.to_string());
    lines.extend(render_summaries(view));
    lines.join("\n")
}

/// One line per clickable start cell: date, week, competition and preview.
pub fn render_summaries(view: &MonthView) -> Vec<String> {
    view.cells
        .iter()
        .filter_map(|cell| {
            let summary = cell.summary.as_ref()?;
            let date = cell.view.cell.date;
            let mut line = format!(
                "{}/{} [{}] 경쟁률 {}",
                date.month(),
                date.day(),
                summary.week_id,
                summary.rate_label()
            );
            if !summary.preview.is_empty() {
                let names: Vec<&str> = summary
                    .preview
                    .iter()
                    .map(|app| app.korean_name.as_str())
                    .collect();
                line.push_str(&format!(" {}", names.join(", ")));
            }
            if summary.overflow > 0 {
                line.push_str(&format!(" +{}", summary.overflow));
            }
            Some(line)
        })
        .collect()
}

pub fn render_period(period: Option<&RentalPeriod>) -> String {
    match period {
        Some(period) => format!(
            "대여 기간: {} ~ {} ({}일)",
            date_with_day(period.start_date),
            date_with_day(period.end_date),
            period.len_days()
        ),
        None => "대여 기간이 설정되지 않았습니다".to_string(),
    }
}

pub fn render_recommendation(recommendation: &RecommendedPeriod) -> String {
    format!(
        "추천 기간: {} ~ {}",
        date_with_day(recommendation.aligned_start),
        date_with_day(recommendation.aligned_end)
    )
}

pub fn render_winning_count(summary: &WinningCount, limit: usize) -> String {
    let status = if summary.limit_reached { "신청 불가" } else { "신청 가능" };
    format!("당첨 {}/{}회 ({})", summary.count, limit, status)
}

/// Car and slot filter buttons, the selected ones in brackets.
pub fn render_filters(cars: &[Car], car_id: &str, slot: SlotId) -> String {
    let car_buttons: Vec<String> = cars
        .iter()
        .map(|car| bracket_if(car.id == car_id, car.label()))
        .collect();
    let slot_buttons: Vec<String> = SlotId::ALL
        .iter()
        .map(|&s| bracket_if(s == slot, format!("{} {}", s.display_name(), s.day_range_label())))
        .collect();

    format!(
        "차량: {}\n회차: {}",
        car_buttons.join("  "),
        slot_buttons.join("  ")
    )
}

fn bracket_if(selected: bool, label: String) -> String {
    if selected {
        format!("[{}]", label)
    } else {
        label
    }
}

pub fn render_application(application: &Application, competition_rate: usize) -> String {
    format!(
        "신청 완료: {} ({}) · {} · {} · {} · 경쟁률 {}:1",
        application.korean_name,
        application.english_id,
        application.car_name,
        application.slot_name,
        application.week_id,
        competition_rate
    )
}

/// Applicants of one slot occurrence in submission order.
pub fn render_roster(week_id: &str, slot: SlotId, car_label: &str, applicants: &[Application]) -> String {
    let mut lines = vec![format!(
        "{} · {} · {} · 경쟁률 {}:1",
        week_id,
        slot.display_name(),
        car_label,
        applicants.len()
    )];

    if applicants.is_empty() {
        lines.push("신청자가 없습니다".to_string());
    }
    for (i, app) in applicants.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({}) {}",
            i + 1,
            app.korean_name,
            app.english_id,
            app.created_at.format("%Y-%m-%d %H:%M")
        ));
    }

    lines.join("\n")
}

pub fn render_winning_record(record: &WinningRecord) -> String {
    format!(
        "#{} {} {} ({}) {}",
        record.id,
        format_ymd(record.winning_date),
        record.korean_name,
        record.english_id,
        record.car_name
    )
}
