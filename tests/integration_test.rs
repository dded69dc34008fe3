// Integration tests for state persistence and the reservation flow
mod fixtures;

use car_rental_calendar::models::calendar::{CellState, MonthPolicy};
use car_rental_calendar::models::error::RentalError;
use car_rental_calendar::models::settings::Settings;
use car_rental_calendar::models::slot::SlotId;
use car_rental_calendar::services::calendar_view::calendar_view;
use car_rental_calendar::services::database::Database;
use car_rental_calendar::services::settings::SettingsService;
use car_rental_calendar::services::state::AppState;
use car_rental_calendar::services::storage::{KeyValueStore, SqliteStore, RENTAL_PERIOD_KEY};
use fixtures::dates::{clock, november_end, november_start, ymd};
use fixtures::requests::{application, hong_porsche_w45, win};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn open(path: &std::path::Path) -> Database {
    let db = Database::new(path.to_str().unwrap()).expect("Failed to open database");
    db.initialize_schema().expect("Failed to initialize schema");
    db
}

#[test]
fn test_app_lifecycle_simulation() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("rental.db");
    let policy = Settings::default().winning_policy();

    // First launch: admin sets the period, an employee applies, a win is entered
    let win_id = {
        let db = open(&db_path);
        let store = SqliteStore::new(&db);
        let mut state = AppState::load(&store, policy).unwrap();
        assert!(state.period().is_none());

        state
            .set_period(&store, "2025-11-03", "2025-11-30", clock(0))
            .unwrap();
        state
            .submit_application(&store, hong_porsche_w45(), clock(1))
            .unwrap();
        state
            .record_win(&store, win("kim", "김철수", "benz", ymd(2025, 4, 7)), clock(2))
            .unwrap()
            .id
    };

    // Second launch: everything is still there
    {
        let db = open(&db_path);
        let store = SqliteStore::new(&db);
        let mut state = AppState::load(&store, policy).unwrap();

        let period = state.period().expect("period should persist");
        assert_eq!(period.start_date, november_start());
        assert_eq!(period.end_date, november_end());
        assert_eq!(state.competition_rate("2025-W45", SlotId::Slot1, "porsche"), 1);
        assert_eq!(state.winning_count("kim", "benz").count, 1);

        assert!(state.delete_win(&store, win_id).unwrap().is_some());
    }

    // Third launch: the deletion stuck
    {
        let db = open(&db_path);
        let store = SqliteStore::new(&db);
        let state = AppState::load(&store, policy).unwrap();
        assert!(state.winning().is_empty());
        assert_eq!(state.applications().len(), 1);
    }
}

#[test]
fn test_duplicate_and_limit_rejections() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir.path().join("rental.db"));
    let store = SqliteStore::new(&db);
    let mut state = AppState::load(&store, Settings::default().winning_policy()).unwrap();
    state
        .set_period(&store, "2025-11-03", "2025-11-30", clock(0))
        .unwrap();

    state
        .submit_application(&store, hong_porsche_w45(), clock(1))
        .unwrap();
    let err = state
        .submit_application(&store, hong_porsche_w45(), clock(2))
        .unwrap_err();
    assert!(matches!(err.rental(), Some(RentalError::DuplicateApplication { .. })));
    assert_eq!(state.applications().len(), 1);

    for (step, date) in [ymd(2025, 2, 3), ymd(2025, 9, 1)].into_iter().enumerate() {
        state
            .record_win(&store, win("lee", "이영희", "porsche", date), clock(3 + step as u32))
            .unwrap();
    }
    let third = state
        .record_win(&store, win("lee", "이영희", "porsche", ymd(2025, 10, 6)), clock(5))
        .unwrap_err();
    assert!(matches!(third.rental(), Some(RentalError::WinningLimitReached { count: 2, .. })));

    let blocked = state
        .submit_application(
            &store,
            application("이영희", "lee", "porsche", "2025-W46", SlotId::Slot1),
            clock(6),
        )
        .unwrap_err();
    assert!(matches!(blocked.rental(), Some(RentalError::WinningLimitReached { .. })));

    state
        .submit_application(
            &store,
            application("이영희", "lee", "benz", "2025-W46", SlotId::Slot1),
            clock(7),
        )
        .unwrap();
    assert_eq!(state.applications().len(), 2);
}

#[test]
fn test_corrupt_period_falls_back_to_unset() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir.path().join("rental.db"));
    let store = SqliteStore::new(&db);
    store.set(RENTAL_PERIOD_KEY, "{\"startDate\":").unwrap();

    let state = AppState::load(&store, Settings::default().winning_policy()).unwrap();
    assert!(state.period().is_none());
    assert!(calendar_view(&state, "porsche", SlotId::Slot1, MonthPolicy::default()).is_empty());
}

#[test]
fn test_calendar_for_cross_month_period() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir.path().join("rental.db"));
    let store = SqliteStore::new(&db);
    let mut state = AppState::load(&store, Settings::default().winning_policy()).unwrap();
    state
        .set_period(&store, "2025-11-24", "2025-12-11", clock(0))
        .unwrap();

    let months = calendar_view(&state, "benz", SlotId::Slot2, MonthPolicy::CompleteSlotsOnly);
    let titles: Vec<String> = months.iter().map(|m| m.month.title()).collect();
    assert_eq!(titles, vec!["2025년 11월", "2025년 12월"]);

    // Fri 11/28 - Mon 12/1 is complete and clickable in the November grid
    let november = &months[0];
    let friday = november
        .cells
        .iter()
        .find(|c| c.view.cell.is_current_month && c.view.cell.date == ymd(2025, 11, 28))
        .unwrap();
    assert_eq!(friday.view.state(), CellState::StartComplete);
    assert_eq!(friday.summary.as_ref().unwrap().week_id, "2025-W48");

    // Fri 12/12 is outside the period, so 12/5 is the last December anchor
    let december_anchors: Vec<u32> = months[1]
        .cells
        .iter()
        .filter(|c| c.summary.is_some())
        .map(|c| c.view.cell.day())
        .collect();
    assert_eq!(december_anchors, vec![5]);
}

#[test]
fn test_settings_drive_state_policy() {
    let dir = TempDir::new().unwrap();
    let service = SettingsService::new(dir.path().join("settings.toml"));
    let settings = Settings {
        winning_limit: 1,
        database_path: Some(dir.path().join("custom.db")),
        ..Settings::default()
    };
    service.save(&settings).unwrap();

    let loaded = service.load().unwrap();
    let db = open(&SettingsService::database_path(&loaded));
    let store = SqliteStore::new(&db);
    let mut state = AppState::load(&store, loaded.winning_policy()).unwrap();

    state
        .record_win(&store, win("hong", "홍길동", "porsche", ymd(2025, 5, 5)), clock(0))
        .unwrap();
    assert!(state.winning_count("hong", "porsche").limit_reached);
    assert!(dir.path().join("custom.db").exists());
}
