//! Request and response shaping for career simulations.
//!
//! Everything here is pure: no I/O, no clock, no randomness.

pub mod builder;
pub mod display;
pub mod progress;
pub mod types;

pub use builder::{
    bonus_or_none, build_simulation_request, criteria_weight_total, default_success_criteria, int_or_none,
    num_or_none, Field, SimulationOptions, FIELD_ALIASES,
};
pub use display::{
    classify_simulations, compare_simulations, extract_key_metrics, format_for_display, ComparisonOutcome,
    FlattenedSimulationView, KeyMetrics, SimulationComparison, SkipReason,
};
pub use progress::{progress_for_status, simulation_progress, SimulationProgress};
pub use types::{
    BonusValue, CriteriaType, Criterion, Importance, MilestoneRequest, OptimalPath, RaiseScenarios,
    SimulationRecord, SimulationRequest, SimulationResponse, SimulationStatus,
};
