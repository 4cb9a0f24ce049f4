//! Nutrition statistics engine
//!
//! Pure, synchronous aggregation from meal records to a statistics report:
//! day bucketing, daily totals, period summaries and the nutrition score,
//! streaks, goal-day counts, XP, and previous-period baselines.

pub mod aggregator;
pub mod bucketer;
pub mod comparison;
pub mod config;
pub mod error;
pub mod gamification;
pub mod goals;
pub mod insight;
pub mod report;
pub mod source;
pub mod streaks;
pub mod summarizer;
pub mod window;

pub use config::{CalorieBand, ConfigError, StatsConfig, XpTier};
pub use error::{StatsError, StatsResult};
pub use insight::InsightContext;
pub use report::{compute_report, StatisticsReport};
pub use source::MealRecordSource;
pub use window::{PeriodKind, PeriodWindow};
