//! Stats module - Aggregations over the loaded tables

mod calculator;
mod frequency;

pub use calculator::{
    CountMethod, GoalMinutes, Histogram, PlayerCount, StatsCalculator, StatsError, Summary,
};
pub use frequency::{FrequencyEntry, FrequencyTable};
