//! Turns loosely typed form input into a `SimulationRequest`.
//!
//! # Design
//! Forms post strings that may be blank or non-numeric. Every optional
//! numeric field goes through a coercion that either yields a finite value
//! or drops the field; it never falls back to zero and never panics. Only
//! the fields with an explicit default (years, rates, flags) are always
//! present in the output.
//!
//! Each field may arrive under a camelCase or a snake_case key. Both names
//! live in `FIELD_ALIASES`; the camelCase key wins whenever it holds a
//! non-null value, even if that value later fails coercion.

use serde_json::{Map, Value};

use super::types::{
    BonusValue, CriteriaType, Criterion, Importance, MilestoneRequest, RaiseScenarios, SimulationRequest,
};

pub const DEFAULT_SIMULATION_YEARS: u32 = 5;
pub const DEFAULT_PERSONAL_GROWTH_RATE: f64 = 0.5;
pub const DEFAULT_RISK_TOLERANCE: f64 = 0.5;
pub const DEFAULT_JOB_CHANGE_FREQUENCY: f64 = 2.5;
pub const DEFAULT_INFLATION_RATE: f64 = 0.025;
pub const DEFAULT_MARKET_GROWTH_RATE: f64 = 0.05;
pub const DEFAULT_GEOGRAPHIC_FLEXIBILITY: bool = true;
pub const DEFAULT_INDUSTRY_SWITCH_WILLINGNESS: bool = false;

/// Horizons the backend can simulate.
pub const SUPPORTED_SIMULATION_YEARS: [u32; 2] = [5, 10];

/// Request fields that accept a caller-supplied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SimulationYears,
    SuccessCriteria,
    PersonalGrowthRate,
    RiskTolerance,
    JobChangeFrequency,
    GeographicFlexibility,
    IndustrySwitchWillingness,
    InflationRate,
    MarketGrowthRate,
    StartingSalary,
    AnnualRaisePercent,
    RaiseScenarios,
    Milestones,
    AnnualBonus,
    AnnualEquity,
    Notes,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldAlias {
    pub field: Field,
    pub camel: &'static str,
    pub snake: &'static str,
}

const fn alias(field: Field, camel: &'static str, snake: &'static str) -> FieldAlias {
    FieldAlias { field, camel, snake }
}

pub const FIELD_ALIASES: &[FieldAlias] = &[
    alias(Field::SimulationYears, "simulationYears", "simulation_years"),
    alias(Field::SuccessCriteria, "successCriteria", "success_criteria"),
    alias(Field::PersonalGrowthRate, "personalGrowthRate", "personal_growth_rate"),
    alias(Field::RiskTolerance, "riskTolerance", "risk_tolerance"),
    alias(Field::JobChangeFrequency, "jobChangeFrequency", "job_change_frequency"),
    alias(Field::GeographicFlexibility, "geographicFlexibility", "geographic_flexibility"),
    alias(Field::IndustrySwitchWillingness, "industrySwitchWillingness", "industry_switch_willingness"),
    alias(Field::InflationRate, "inflationRate", "inflation_rate"),
    alias(Field::MarketGrowthRate, "marketGrowthRate", "market_growth_rate"),
    alias(Field::StartingSalary, "startingSalary", "starting_salary"),
    alias(Field::AnnualRaisePercent, "annualRaisePercent", "annual_raise_percent"),
    alias(Field::RaiseScenarios, "raiseScenarios", "raise_scenarios"),
    alias(Field::Milestones, "milestones", "milestones"),
    alias(Field::AnnualBonus, "annualBonus", "annual_bonus"),
    alias(Field::AnnualEquity, "annualEquity", "annual_equity"),
    alias(Field::Notes, "notes", "notes"),
];

/// Milestone keys, same camel-first rule.
const MILESTONE_ALIASES: &[(&str, &str)] = &[
    ("raisePercent", "raise_percent"),
    ("newBaseSalary", "new_base_salary"),
    ("bonusExpected", "bonus_expected"),
    ("equityValue", "equity_value"),
];

fn lookup<'a>(map: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    map.get(camel)
        .filter(|v| !v.is_null())
        .or_else(|| map.get(snake))
        .filter(|v| !v.is_null())
}

/// Raw form state for a simulation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOptions {
    values: Map<String, Value>,
}

impl SimulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anything other than a JSON object yields empty options.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Caller value for `field`, or `None` when neither alias holds a non-null value.
    pub fn get(&self, field: Field) -> Option<&Value> {
        let alias = FIELD_ALIASES.iter().find(|a| a.field == field)?;
        lookup(&self.values, alias.camel, alias.snake)
    }
}

/// Finite number from a number or numeric string; `None` for anything else.
pub fn num_or_none(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Integer from a number (truncated) or from the leading integer of a string.
pub fn int_or_none(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_int(s.trim()),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let (sign, digits) = match s.as_bytes().first()? {
        b'-' => (-1, &s[1..]),
        b'+' => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Numeric bonus when the input is a plain amount, descriptive text otherwise.
///
/// Commas and `$` are ignored when parsing, but a `%` anywhere or a trailing
/// `k` keeps the trimmed text verbatim: `"$5,000"` is 5000, `"10%"` and
/// `"$5k"` stay strings.
pub fn bonus_or_none(value: &Value) -> Option<BonusValue> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(BonusValue::Amount),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '$').collect();
            let descriptive = trimmed.contains('%') || trimmed.ends_with(['k', 'K']);
            match cleaned.trim().parse::<f64>() {
                Ok(n) if n.is_finite() && !descriptive => Some(BonusValue::Amount(n)),
                _ => Some(BonusValue::Description(trimmed.to_string())),
            }
        }
        _ => None,
    }
}

/// JSON booleans and the strings `"true"`/`"false"`.
pub fn bool_or_none(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn text_or_none(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn default_success_criteria() -> Vec<Criterion> {
    vec![
        Criterion {
            criteria_type: CriteriaType::Salary,
            weight: 0.4,
            target_value: 150_000.0,
            importance: Importance::High,
            description: "Total compensation growth".to_string(),
        },
        Criterion {
            criteria_type: CriteriaType::WorkLifeBalance,
            weight: 0.3,
            target_value: 8.0,
            importance: Importance::High,
            description: "Sustainable hours and flexibility".to_string(),
        },
        Criterion {
            criteria_type: CriteriaType::LearningOpportunities,
            weight: 0.2,
            target_value: 8.0,
            importance: Importance::Medium,
            description: "Skill development and mentorship".to_string(),
        },
        Criterion {
            criteria_type: CriteriaType::Impact,
            weight: 0.1,
            target_value: 7.0,
            importance: Importance::Medium,
            description: "Scope and influence of the work".to_string(),
        },
    ]
}

/// Sum of criterion weights using compensated summation, so weights that
/// add to one on paper also add to exactly `1.0` here.
pub fn criteria_weight_total(criteria: &[Criterion]) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for w in criteria.iter().map(|c| c.weight) {
        let t = sum + w;
        if sum.abs() >= w.abs() {
            compensation += (sum - t) + w;
        } else {
            compensation += (w - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

fn success_criteria(value: Option<&Value>) -> Vec<Criterion> {
    match value {
        None => default_success_criteria(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match serde_json::from_value::<Criterion>(item.clone()) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping malformed success criterion");
                    None
                }
            })
            .collect(),
        Some(other) => {
            tracing::warn!(value = %other, "success criteria is not a list, using defaults");
            default_success_criteria()
        }
    }
}

fn milestone(value: &Value) -> MilestoneRequest {
    let empty = Map::new();
    let map = value.as_object().unwrap_or(&empty);
    let num = |idx: usize| {
        let (camel, snake) = MILESTONE_ALIASES[idx];
        lookup(map, camel, snake).and_then(num_or_none)
    };
    let year = map
        .get("year")
        .and_then(int_or_none)
        .filter(|y| *y >= 1)
        .and_then(|y| u32::try_from(y).ok())
        .unwrap_or(1);
    MilestoneRequest {
        year,
        title: map.get("title").and_then(text_or_none),
        raise_percent: num(0),
        new_base_salary: num(1),
        bonus_expected: num(2),
        equity_value: num(3),
    }
}

fn raise_scenarios(value: Option<&Value>) -> Option<RaiseScenarios> {
    let map = value?.as_object()?;
    let scenarios = RaiseScenarios {
        conservative: map.get("conservative").and_then(num_or_none),
        expected: map.get("expected").and_then(num_or_none),
        optimistic: map.get("optimistic").and_then(num_or_none),
    };
    (!scenarios.is_empty()).then_some(scenarios)
}

/// Build the body for `POST /career-simulation`.
///
/// `offer_id` is passed through unvalidated. Pure and deterministic.
pub fn build_simulation_request(offer_id: impl Into<String>, options: &SimulationOptions) -> SimulationRequest {
    let num = |field| options.get(field).and_then(num_or_none);
    let flag = |field| options.get(field).and_then(bool_or_none);

    let simulation_years = options
        .get(Field::SimulationYears)
        .and_then(int_or_none)
        .and_then(|y| u32::try_from(y).ok())
        .filter(|y| SUPPORTED_SIMULATION_YEARS.contains(y))
        .unwrap_or(DEFAULT_SIMULATION_YEARS);

    let milestones: Vec<MilestoneRequest> = options
        .get(Field::Milestones)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(milestone).collect())
        .unwrap_or_default();

    SimulationRequest {
        offer_id: offer_id.into(),
        simulation_years,
        success_criteria: success_criteria(options.get(Field::SuccessCriteria)),
        personal_growth_rate: num(Field::PersonalGrowthRate).unwrap_or(DEFAULT_PERSONAL_GROWTH_RATE),
        risk_tolerance: num(Field::RiskTolerance).unwrap_or(DEFAULT_RISK_TOLERANCE),
        job_change_frequency: num(Field::JobChangeFrequency).unwrap_or(DEFAULT_JOB_CHANGE_FREQUENCY),
        geographic_flexibility: flag(Field::GeographicFlexibility).unwrap_or(DEFAULT_GEOGRAPHIC_FLEXIBILITY),
        industry_switch_willingness: flag(Field::IndustrySwitchWillingness)
            .unwrap_or(DEFAULT_INDUSTRY_SWITCH_WILLINGNESS),
        inflation_rate: num(Field::InflationRate).unwrap_or(DEFAULT_INFLATION_RATE),
        market_growth_rate: num(Field::MarketGrowthRate).unwrap_or(DEFAULT_MARKET_GROWTH_RATE),
        starting_salary: num(Field::StartingSalary),
        annual_raise_percent: num(Field::AnnualRaisePercent),
        raise_scenarios: raise_scenarios(options.get(Field::RaiseScenarios)),
        milestones: (!milestones.is_empty()).then_some(milestones),
        annual_bonus: options.get(Field::AnnualBonus).and_then(bonus_or_none),
        annual_equity: num(Field::AnnualEquity),
        notes: options.get(Field::Notes).and_then(text_or_none),
    }
}
