pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpRecordApi;
pub use config::Settings;
pub use crate::core::courses::CourseBoard;
pub use crate::core::enrollment::{eligible_students, EnrollmentManager, EnrollmentPhase};
pub use crate::core::list_view::{ListView, LoadPhase, SubmitOutcome};
pub use domain::model::{Course, Id, Instructor, Student};
pub use domain::ports::RecordApi;
pub use utils::error::{AdminError, Result};
