//! Pure cycle computations over an in-memory snapshot of daily logs.
//!
//! Nothing in here touches storage or the clock: callers pass the logs, the
//! user's [`CycleConfig`](crate::models::CycleConfig) and, where a reference
//! day matters, an explicit `today`.

pub mod advice;
pub mod history;
pub mod irregularity;
pub mod predictor;
pub mod wellness;

pub use irregularity::{analyze, IrregularityReport};
pub use predictor::{classify_day, classify_month, DayClass};
pub use wellness::{summarize, WellnessSummary};
