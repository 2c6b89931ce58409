//! Wire types for career simulations.
//!
//! # Design
//! Request types serialize with `skip_serializing_if` on every optional
//! field, so an unset value is an absent key, never `null`. Response types
//! are lenient: every collection and score is optional, unknown keys are
//! kept, and unknown statuses are preserved instead of rejected, because
//! the backend owns the schema and may add to it.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::builder::num_or_none;

/// What a success criterion measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaType {
    Salary,
    WorkLifeBalance,
    LearningOpportunities,
    Impact,
    CareerGrowth,
    JobSecurity,
    Autonomy,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub criteria_type: CriteriaType,
    pub weight: f64,
    pub target_value: f64,
    pub importance: Importance,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RaiseScenarios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conservative: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<f64>,
}

impl RaiseScenarios {
    pub fn is_empty(&self) -> bool {
        self.conservative.is_none() && self.expected.is_none() && self.optimistic.is_none()
    }
}

/// A bonus is either an amount or a free-text description like `"10%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BonusValue {
    Amount(f64),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRequest {
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raise_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_base_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_expected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_value: Option<f64>,
}

/// Body of `POST /career-simulation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub offer_id: String,
    pub simulation_years: u32,
    pub success_criteria: Vec<Criterion>,
    pub personal_growth_rate: f64,
    pub risk_tolerance: f64,
    pub job_change_frequency: f64,
    pub geographic_flexibility: bool,
    pub industry_switch_willingness: bool,
    pub inflation_rate: f64,
    pub market_growth_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_raise_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raise_scenarios: Option<RaiseScenarios>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<MilestoneRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_bonus: Option<BonusValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_equity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Server-side lifecycle of a simulation. The client never sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SimulationStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl SimulationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SimulationStatus::Pending => "pending",
            SimulationStatus::Running => "running",
            SimulationStatus::Completed => "completed",
            SimulationStatus::Failed => "failed",
            SimulationStatus::Other(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SimulationStatus::Completed | SimulationStatus::Failed)
    }
}

impl From<String> for SimulationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => SimulationStatus::Pending,
            "running" => SimulationStatus::Running,
            "completed" => SimulationStatus::Completed,
            "failed" => SimulationStatus::Failed,
            _ => SimulationStatus::Other(s),
        }
    }
}

impl From<&str> for SimulationStatus {
    fn from(s: &str) -> Self {
        SimulationStatus::from(s.to_string())
    }
}

impl From<SimulationStatus> for String {
    fn from(status: SimulationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored simulation as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub simulation_id: String,
    pub status: SimulationStatus,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub completed_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub computation_time_seconds: Option<f64>,
    /// Echo of the submitted request, kept verbatim.
    #[serde(default)]
    pub request: Value,
    #[serde(default, deserialize_with = "lenient")]
    pub response: Option<SimulationResponse>,
    #[serde(default, deserialize_with = "lenient")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub career_paths: Option<Vec<Value>>,
    /// Kept as sent; `optimal_path()` reads the typed view.
    #[serde(default)]
    pub optimal_path: Option<Value>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub path_rankings: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub decision_insights: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub risk_assessments: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub opportunity_analysis: Option<Vec<Value>>,
    #[serde(default)]
    pub next_step_recommendation: Option<Value>,
    #[serde(default)]
    pub long_term_strategy: Option<Value>,
    #[serde(default)]
    pub confidence_level: Option<Value>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<Value>>,
}

impl SimulationResponse {
    /// Typed view of `optimal_path`; `None` when absent or not an object.
    pub fn parsed_optimal_path(&self) -> Option<OptimalPath> {
        self.optimal_path
            .as_ref()
            .filter(|v| v.is_object())
            .and_then(|v| OptimalPath::deserialize(v).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimalPath {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub total_earnings_5yr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub total_earnings_10yr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub peak_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub career_growth_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub salary_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub work_life_balance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub learning_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub title_progression: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub companies_worked: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub probability_outcomes: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub decision_points: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any value of the wrong shape reads as `None` instead of failing the record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// Numbers and numeric strings; anything else is `None`.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(num_or_none(&Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(items)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_is_preserved() {
        let status: SimulationStatus = serde_json::from_value(json!("cancelled")).unwrap();
        assert_eq!(status, SimulationStatus::Other("cancelled".into()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("cancelled"));
    }

    #[test]
    fn record_without_response_deserializes() {
        let record: SimulationRecord =
            serde_json::from_value(json!({"simulation_id": "sim-1", "status": "pending"})).unwrap();
        assert_eq!(record.status, SimulationStatus::Pending);
        assert!(record.response.is_none());
        assert!(record.request.is_null());
    }

    #[test]
    fn null_collections_read_as_none() {
        let resp: SimulationResponse = serde_json::from_value(json!({"career_paths": null})).unwrap();
        assert!(resp.career_paths.is_none());
    }

    #[test]
    fn optimal_path_keeps_unknown_fields() {
        let path: OptimalPath =
            serde_json::from_value(json!({"peak_salary": 250000.0, "path_name": "IC track"})).unwrap();
        assert_eq!(path.peak_salary, Some(250000.0));
        assert_eq!(path.extra["path_name"], "IC track");
    }

    #[test]
    fn optimal_path_serializes_only_present_fields() {
        let path: OptimalPath = serde_json::from_value(json!({"peak_salary": 5.0})).unwrap();
        assert_eq!(serde_json::to_value(&path).unwrap(), json!({"peak_salary": 5.0}));
    }

    #[test]
    fn wrong_shapes_read_as_none() {
        let record: SimulationRecord = serde_json::from_value(json!({
            "simulation_id": "s",
            "status": "failed",
            "created_at": 17,
            "error_message": {"code": 500},
            "response": "oops"
        }))
        .unwrap();
        assert!(record.created_at.is_none());
        assert!(record.error_message.is_none());
        assert!(record.response.is_none());

        let resp: SimulationResponse =
            serde_json::from_value(json!({"data_sources": "bls", "optimal_path": [1, 2]})).unwrap();
        assert!(resp.data_sources.is_none());
        assert!(resp.parsed_optimal_path().is_none());
    }

    #[test]
    fn bonus_serializes_as_number_or_string() {
        assert_eq!(serde_json::to_value(BonusValue::Amount(5000.0)).unwrap(), json!(5000.0));
        assert_eq!(serde_json::to_value(BonusValue::Description("10%".into())).unwrap(), json!("10%"));
    }
}
