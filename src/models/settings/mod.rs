// Settings module
// User-editable configuration loaded from settings.toml

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::calendar::MonthPolicy;
use crate::models::car::{default_cars, find_car};
use crate::models::slot::SlotId;
use crate::models::winning::{
    default_window_end, default_window_start, WinningPolicy, DEFAULT_WINNING_LIMIT,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file holding the stored state; platform data dir when unset
    pub database_path: Option<PathBuf>,
    pub month_policy: MonthPolicy,
    pub winning_limit: usize,
    pub winning_window_start: NaiveDate,
    pub winning_window_end: NaiveDate,
    pub default_car: String,
    pub default_slot: SlotId,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            month_policy: MonthPolicy::default(),
            winning_limit: DEFAULT_WINNING_LIMIT,
            winning_window_start: default_window_start(),
            winning_window_end: default_window_end(),
            default_car: "porsche".to_string(),
            default_slot: SlotId::Slot1,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.winning_limit == 0 {
            return Err("winning_limit must be at least 1".to_string());
        }

        if self.winning_window_start > self.winning_window_end {
            return Err(format!(
                "winning window end {} is before its start {}",
                self.winning_window_end, self.winning_window_start
            ));
        }

        if find_car(&default_cars(), &self.default_car).is_none() {
            return Err(format!("default_car '{}' is not in the catalog", self.default_car));
        }

        Ok(())
    }

    pub fn winning_policy(&self) -> WinningPolicy {
        WinningPolicy {
            window_start: self.winning_window_start,
            window_end: self.winning_window_end,
            limit: self.winning_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.winning_policy(), WinningPolicy::default());
        assert_eq!(settings.month_policy, MonthPolicy::CompleteSlotsOnly);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let settings = Settings {
            winning_limit: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let settings = Settings {
            winning_window_start: default_window_end(),
            winning_window_end: default_window_start(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_default_car_rejected() {
        let settings = Settings {
            default_car: "tesla".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().contains("tesla"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            "month_policy = \"grid_collapse\"\ndefault_slot = \"slot2\"\n",
        )
        .unwrap();
        assert_eq!(settings.month_policy, MonthPolicy::GridCollapse);
        assert_eq!(settings.default_slot, SlotId::Slot2);
        assert_eq!(settings.winning_limit, 2);
        assert!(settings.database_path.is_none());
    }
}
