use std::fmt;

/// Rejected configuration, reported once at session construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    EmptyFormation { rows: usize, columns: usize },
    ZeroBulletCapacity,
    ZeroStartingLives,
    ZeroCadence { field: &'static str },
    NonPositive { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    FormationTooWide { needed: f32, available: f32 },
    FormationTooTall { needed: f32, available: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFormation { rows, columns } => {
                write!(f, "enemy formation is empty: {rows} rows x {columns} columns")
            }
            Self::ZeroBulletCapacity => write!(f, "bullet pool capacity must be at least 1"),
            Self::ZeroStartingLives => write!(f, "starting lives must be at least 1"),
            Self::ZeroCadence { field } => write!(f, "{field} must be at least 1 tick"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be a positive finite number, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be zero or a positive finite number, got {value}")
            }
            Self::FormationTooWide { needed, available } => write!(
                f,
                "formation needs {needed} units of width but only {available} fit between the paddings"
            ),
            Self::FormationTooTall { needed, available } => write!(
                f,
                "formation needs {needed} units of height but the screen only has {available}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
