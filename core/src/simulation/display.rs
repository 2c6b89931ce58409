//! Display projections of simulation records.
//!
//! `None` from these functions means "not ready yet": the record exists
//! but has nothing computed to show. Callers render a pending state for it,
//! never an error.

use serde::Serialize;
use serde_json::Value;

use super::types::{SimulationRecord, SimulationResponse, SimulationStatus};

/// Flat, render-ready view of a simulation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedSimulationView {
    pub id: String,
    pub status: SimulationStatus,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
    pub computation_time: Option<f64>,
    pub career_paths: Vec<Value>,
    pub optimal_path: Option<Value>,
    pub path_rankings: Vec<Value>,
    pub decision_insights: Vec<Value>,
    pub risk_assessments: Vec<Value>,
    pub opportunity_analysis: Vec<Value>,
    pub next_step_recommendation: Option<Value>,
    pub long_term_strategy: Option<Value>,
    pub confidence_level: Option<Value>,
    pub data_sources: Vec<Value>,
    pub request: Value,
}

/// Compact numeric summary of the optimal path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_earnings_5yr: Option<f64>,
    pub total_earnings_10yr: Option<f64>,
    pub peak_salary: Option<f64>,
    pub career_growth_rate: Option<f64>,
    pub overall_score: Option<f64>,
    pub salary_score: Option<f64>,
    pub work_life_balance_score: Option<f64>,
    pub learning_score: Option<f64>,
    pub impact_score: Option<f64>,
    pub title_progression: Vec<Value>,
    pub companies_worked: Vec<Value>,
    pub probability_outcomes: Vec<Value>,
    pub decision_points: Vec<Value>,
}

/// One comparison row. Derived figures are `None` when the backend left
/// the underlying total out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationComparison {
    pub simulation_id: String,
    #[serde(flatten)]
    pub metrics: KeyMetrics,
    pub earnings_per_year_5yr: Option<f64>,
    pub earnings_per_year_10yr: Option<f64>,
    pub growth_potential: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Still pending or running.
    NotReady(SimulationStatus),
    /// The backend gave up on it.
    Failed(Option<String>),
    /// Finished, but the response carries no optimal path.
    MissingOptimalPath,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    Included(SimulationComparison),
    Skipped { simulation_id: String, reason: SkipReason },
}

impl ComparisonOutcome {
    pub fn included(&self) -> Option<&SimulationComparison> {
        match self {
            ComparisonOutcome::Included(row) => Some(row),
            ComparisonOutcome::Skipped { .. } => None,
        }
    }
}

fn list(items: &Option<Vec<Value>>) -> Vec<Value> {
    items.clone().unwrap_or_default()
}

pub fn format_for_display(simulation: Option<&SimulationRecord>) -> Option<FlattenedSimulationView> {
    let simulation = simulation?;
    let response: &SimulationResponse = simulation.response.as_ref()?;

    Some(FlattenedSimulationView {
        id: simulation.simulation_id.clone(),
        status: simulation.status.clone(),
        created_at: simulation.created_at.clone(),
        completed_at: simulation.completed_at.clone(),
        computation_time: simulation.computation_time_seconds,
        career_paths: list(&response.career_paths),
        optimal_path: response.optimal_path.clone(),
        path_rankings: list(&response.path_rankings),
        decision_insights: list(&response.decision_insights),
        risk_assessments: list(&response.risk_assessments),
        opportunity_analysis: list(&response.opportunity_analysis),
        next_step_recommendation: response.next_step_recommendation.clone(),
        long_term_strategy: response.long_term_strategy.clone(),
        confidence_level: response.confidence_level.clone(),
        data_sources: list(&response.data_sources),
        request: simulation.request.clone(),
    })
}

pub fn extract_key_metrics(simulation: Option<&SimulationRecord>) -> Option<KeyMetrics> {
    let path = simulation?.response.as_ref()?.parsed_optimal_path()?;

    Some(KeyMetrics {
        total_earnings_5yr: path.total_earnings_5yr,
        total_earnings_10yr: path.total_earnings_10yr,
        peak_salary: path.peak_salary,
        career_growth_rate: path.career_growth_rate,
        overall_score: path.overall_score,
        salary_score: path.salary_score,
        work_life_balance_score: path.work_life_balance_score,
        learning_score: path.learning_score,
        impact_score: path.impact_score,
        title_progression: list(&path.title_progression),
        companies_worked: list(&path.companies_worked),
        probability_outcomes: list(&path.probability_outcomes),
        decision_points: list(&path.decision_points),
    })
}

fn skip_reason(record: &SimulationRecord) -> SkipReason {
    match &record.status {
        SimulationStatus::Failed => SkipReason::Failed(record.error_message.clone()),
        SimulationStatus::Completed => SkipReason::MissingOptimalPath,
        other if record.response.is_none() => SkipReason::NotReady(other.clone()),
        _ => SkipReason::MissingOptimalPath,
    }
}

/// One outcome per record, in input order.
pub fn classify_simulations(simulations: &[SimulationRecord]) -> Vec<ComparisonOutcome> {
    simulations
        .iter()
        .map(|record| match extract_key_metrics(Some(record)) {
            Some(metrics) => ComparisonOutcome::Included(SimulationComparison {
                simulation_id: record.simulation_id.clone(),
                earnings_per_year_5yr: metrics.total_earnings_5yr.map(|t| t / 5.0),
                earnings_per_year_10yr: metrics.total_earnings_10yr.map(|t| t / 10.0),
                growth_potential: metrics.career_growth_rate.map(|r| r * 100.0),
                metrics,
            }),
            None => ComparisonOutcome::Skipped {
                simulation_id: record.simulation_id.clone(),
                reason: skip_reason(record),
            },
        })
        .collect()
}

/// Rows for the records that have metrics; the rest are left out, so the
/// result can be shorter than the input.
pub fn compare_simulations(simulations: &[SimulationRecord]) -> Vec<SimulationComparison> {
    classify_simulations(simulations)
        .into_iter()
        .filter_map(|outcome| match outcome {
            ComparisonOutcome::Included(row) => Some(row),
            ComparisonOutcome::Skipped { .. } => None,
        })
        .collect()
}
