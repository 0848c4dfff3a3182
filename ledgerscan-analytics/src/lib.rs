//! ledgerscan-analytics: marker counts, monthly top credits and batch summaries

pub mod markers;
pub mod monthly;
pub mod summary;

pub use markers::{has_marker, marker_counts, MarkerSummary, Markers, SignedCounts};
pub use monthly::{top_monthly_credits, MonthlyCredit, MonthlyTopCredits, TOP_CREDITS_PER_MONTH};
pub use summary::{date_range, BatchSummary, DateRange};
