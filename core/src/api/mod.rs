//! One module per backend resource. Each exposes a borrowed view over
//! `ApiClient` with `build_*` / `parse_*` pairs.

pub mod advisors;
pub mod career_simulation;
pub mod offers;
pub mod progress_sharing;
pub mod references;
pub mod salary;
pub mod teams;
pub mod technical_prep;

pub use advisors::{AdvisorInvite, AdvisorsApi};
pub use career_simulation::CareerSimulationApi;
pub use offers::{ExportFormat, ExportedFile, OffersApi};
pub use progress_sharing::{ProgressSharingApi, ShareScope};
pub use references::{ReferenceRequest, ReferencesApi};
pub use salary::{SalaryApi, SalaryBenchmark, SalaryQuery};
pub use teams::{NewTeam, TeamInvite, TeamRole, TeamsApi};
pub use technical_prep::{ChallengeAttempt, TechnicalPrepApi};
