//! Shared types for battery monitoring.

/// Battery charging state as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeState {
    /// Battery is actively charging
    Charging,
    /// Battery is discharging (on battery power)
    Discharging,
    /// Battery is full
    Full,
    /// Battery is empty
    Empty,
    /// State cannot be determined
    #[default]
    Unknown,
}

impl ChargeState {
    /// Returns true if the battery is currently charging.
    ///
    /// A full battery on external power is not charging.
    pub fn is_charging(&self) -> bool {
        matches!(self, ChargeState::Charging)
    }
}

impl From<starship_battery::State> for ChargeState {
    fn from(state: starship_battery::State) -> Self {
        match state {
            starship_battery::State::Charging => ChargeState::Charging,
            starship_battery::State::Discharging => ChargeState::Discharging,
            starship_battery::State::Empty => ChargeState::Empty,
            starship_battery::State::Full => ChargeState::Full,
            _ => ChargeState::Unknown,
        }
    }
}
