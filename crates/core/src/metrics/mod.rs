pub mod ingestion;
pub mod lag_join;
pub mod metrics_calculator;
pub mod metrics_model;
pub mod metrics_traits;
pub mod range_aggregation;


pub use ingestion::ingest_performance;
pub use lag_join::join_lagged;
pub use metrics_calculator::*;
pub use metrics_model::*;
pub use metrics_traits::PerformanceSourceTrait;
pub use range_aggregation::aggregate_range;
