//! Status to progress-bar mapping.
//!
//! The backend reports no real progress, so `running` is a fixed 50%.

use serde::Serialize;

use super::types::{SimulationRecord, SimulationStatus};

pub const FAILED_DEFAULT_MESSAGE: &str = "Simulation failed";
pub const UNKNOWN_STATUS: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationProgress {
    pub status: String,
    pub message: String,
    pub progress: u8,
}

fn progress(status: &str, message: &str, progress: u8) -> SimulationProgress {
    SimulationProgress {
        status: status.to_string(),
        message: message.to_string(),
        progress,
    }
}

/// Total over every input, including a missing record.
pub fn simulation_progress(simulation: Option<&SimulationRecord>) -> SimulationProgress {
    let Some(simulation) = simulation else {
        return progress(UNKNOWN_STATUS, "Unknown status", 0);
    };
    match &simulation.status {
        SimulationStatus::Failed => progress(
            "failed",
            simulation
                .error_message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(FAILED_DEFAULT_MESSAGE),
            0,
        ),
        other => progress_for_status(other.as_str()),
    }
}

/// Same mapping for callers holding only a status string.
pub fn progress_for_status(status: &str) -> SimulationProgress {
    match SimulationStatus::from(status) {
        SimulationStatus::Pending => progress(status, "Simulation is queued", 0),
        SimulationStatus::Running => progress(status, "Simulation is running", 50),
        SimulationStatus::Completed => progress(status, "Simulation completed", 100),
        SimulationStatus::Failed => progress(status, FAILED_DEFAULT_MESSAGE, 0),
        SimulationStatus::Other(_) => progress(status, "Unknown status", 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(status: &str) -> SimulationRecord {
        serde_json::from_value(json!({"simulation_id": "s", "status": status})).unwrap()
    }

    #[test]
    fn known_statuses() {
        assert_eq!(simulation_progress(Some(&record("pending"))).progress, 0);
        assert_eq!(simulation_progress(Some(&record("running"))).progress, 50);
        let done = simulation_progress(Some(&record("completed")));
        assert_eq!(done.progress, 100);
        assert_eq!(done.message, "Simulation completed");
    }

    #[test]
    fn failed_uses_error_message() {
        let rec: SimulationRecord = serde_json::from_value(
            json!({"simulation_id": "s", "status": "failed", "error_message": "timeout"}),
        )
        .unwrap();
        assert_eq!(
            simulation_progress(Some(&rec)),
            SimulationProgress {
                status: "failed".into(),
                message: "timeout".into(),
                progress: 0
            }
        );
    }

    #[test]
    fn failed_without_message_uses_default() {
        let p = simulation_progress(Some(&record("failed")));
        assert_eq!(p.message, FAILED_DEFAULT_MESSAGE);
    }

    #[test]
    fn garbage_and_missing_are_unknown() {
        let p = simulation_progress(Some(&record("garbage")));
        assert_eq!((p.status.as_str(), p.message.as_str(), p.progress), ("garbage", "Unknown status", 0));

        let p = simulation_progress(None);
        assert_eq!(p.status, UNKNOWN_STATUS);
        assert_eq!(p.message, "Unknown status");
    }

    #[test]
    fn serializes_with_three_keys() {
        let json = serde_json::to_value(progress_for_status("running")).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        for key in ["status", "message", "progress"] {
            assert!(keys.contains(&key));
        }
    }
}
