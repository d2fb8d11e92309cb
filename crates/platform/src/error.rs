/// The hardware battery source could not be attached.
///
/// Every variant means the same thing to callers: no live source is
/// available and a simulated one should be used instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Battery backend unavailable: {0}")]
    Unavailable(String),

    #[error("No battery found")]
    NoBattery,

    #[error("Battery backend error: {0}")]
    Backend(#[from] starship_battery::Error),

    #[error("Battery poller stopped before reporting")]
    PollerGone,
}

pub type Result<T> = std::result::Result<T, SourceError>;
