// src/query/filter.rs

use std::str::FromStr;
use tracing::trace;

use crate::dataset::{
    value::{as_text, is_present},
    Dataset,
};
use crate::error::DataError;

/// Coarse time-of-day selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Morning,
    Afternoon,
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            other => Err(format!("unknown time window {other:?}")),
        }
    }
}

/// How a [`TimeWindow`] is matched, depending on which variant of the dataset is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFilterMode {
    /// One free-text column; a row matches if it contains the window's token.
    Text {
        column: String,
        morning_token: String,
        afternoon_token: String,
    },
    /// One boolean column per window; a row matches if that column is truthy.
    Boolean {
        morning_column: String,
        afternoon_column: String,
    },
}

impl Default for TimeFilterMode {
    fn default() -> Self {
        Self::Text {
            column: "PROGRAM_ESTBL_TIZN_VALUE".to_string(),
            morning_token: "오전".to_string(),
            afternoon_token: "오후".to_string(),
        }
    }
}

/// Column layout the filters run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub region_column: String,
    pub time: TimeFilterMode,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            region_column: "CTPRVN_NM".to_string(),
            time: TimeFilterMode::default(),
        }
    }
}

/// Region / time / weekday predicates, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramFilter {
    pub region: Option<String>,
    pub time: Option<TimeWindow>,
    pub days: Vec<String>,
}

impl ProgramFilter {
    /// Positions of the rows of `ds` that pass every active predicate, in file order.
    ///
    /// Each predicate narrows the survivors of the previous one. A column is only
    /// looked up when its predicate is active, so a dataset lacking e.g. the
    /// weekday columns still serves unfiltered requests.
    pub fn apply(&self, ds: &Dataset, settings: &FilterSettings) -> Result<Vec<usize>, DataError> {
        let mut active: Vec<usize> = (0..ds.len()).collect();

        if let Some(region) = self.region.as_deref().filter(|r| !r.is_empty()) {
            let col = ds.column_index(&settings.region_column)?;
            active.retain(|&row| {
                ds.cell(row, col)
                    .and_then(as_text)
                    .is_some_and(|v| v == region)
            });
            trace!(region, remaining = active.len(), "region filter");
        }

        if let Some(window) = self.time {
            match &settings.time {
                TimeFilterMode::Text {
                    column,
                    morning_token,
                    afternoon_token,
                } => {
                    let col = ds.column_index(column)?;
                    let token = match window {
                        TimeWindow::Morning => morning_token,
                        TimeWindow::Afternoon => afternoon_token,
                    };
                    active.retain(|&row| {
                        ds.cell(row, col)
                            .and_then(as_text)
                            .is_some_and(|v| v.contains(token.as_str()))
                    });
                }
                TimeFilterMode::Boolean {
                    morning_column,
                    afternoon_column,
                } => {
                    let column = match window {
                        TimeWindow::Morning => morning_column,
                        TimeWindow::Afternoon => afternoon_column,
                    };
                    let col = ds.column_index(column)?;
                    active.retain(|&row| ds.cell(row, col).is_some_and(is_present));
                }
            }
            trace!(?window, remaining = active.len(), "time filter");
        }

        for day in self.days.iter().filter(|d| !d.is_empty()) {
            let col = ds.column_index(day)?;
            active.retain(|&row| ds.cell(row, col).is_some_and(is_present));
            trace!(day = %day, remaining = active.len(), "weekday filter");
        }

        Ok(active)
    }
}
