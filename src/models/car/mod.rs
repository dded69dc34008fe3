//! Car catalog.
//!
//! The fleet is fixed reference data; applications and winning records copy
//! the display name at creation time instead of referencing the catalog.

use serde::{Deserialize, Serialize};

/// A car that can be reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Stable identifier used in stored records (e.g. "porsche")
    pub id: String,
    /// Name shown to employees
    pub display_name: String,
    /// Emoji shown next to the name on filter buttons
    pub icon: String,
    /// Free-form specification line
    pub specs: String,
}

impl Car {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        icon: impl Into<String>,
        specs: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            icon: icon.into(),
            specs: specs.into(),
        }
    }

    /// Get the label (icon + name) for filter buttons.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.display_name)
    }
}

/// The two cars offered by the rental program.
pub fn default_cars() -> Vec<Car> {
    vec![
        Car::new("porsche", "포르쉐 타이칸 4S", "🏎️", "전기 스포츠 세단"),
        Car::new("benz", "벤츠 EQS 450+", "🚗", "전기 럭셔리 세단"),
    ]
}

/// Look up a car by id in a catalog.
pub fn find_car<'a>(cars: &'a [Car], id: &str) -> Option<&'a Car> {
    cars.iter().find(|car| car.id == id)
}
