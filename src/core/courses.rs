use crate::core::enrollment::EnrollmentManager;
use crate::core::list_view::{ListView, SubmitOutcome};
use crate::core::resource::{Courses, Instructors};
use crate::domain::model::{Course, Id, Instructor};
use crate::domain::ports::RecordApi;
use std::sync::Arc;

pub const UNKNOWN_INSTRUCTOR: &str = "Unknown Instructor";

/// The courses view: the course list plus the instructor list it needs for
/// the owner column and the create form's instructor picker.
pub struct CourseBoard {
    api: Arc<dyn RecordApi>,
    courses: ListView<Courses>,
    instructors: ListView<Instructors>,
}

impl CourseBoard {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self {
            courses: ListView::new(api.clone()),
            instructors: ListView::new(api.clone()),
            api,
        }
    }

    pub async fn activate(&self) {
        tokio::join!(self.courses.activate(), self.instructors.activate());
    }

    pub fn courses(&self) -> &ListView<Courses> {
        &self.courses
    }

    pub fn instructors(&self) -> &ListView<Instructors> {
        &self.instructors
    }

    pub async fn instructor_name(&self, instructor_id: Id) -> String {
        self.instructors
            .records()
            .await
            .into_iter()
            .find(|i| i.id == Some(instructor_id))
            .map(|i| i.name)
            .unwrap_or_else(|| UNKNOWN_INSTRUCTOR.to_string())
    }

    /// Instructors that can be chosen as a course owner.
    pub async fn selectable_instructors(&self) -> Vec<Instructor> {
        self.instructors
            .records()
            .await
            .into_iter()
            .filter(|i| i.id.is_some())
            .collect()
    }

    /// Creating a course is disabled until at least one instructor exists.
    pub async fn can_create(&self) -> bool {
        !self.selectable_instructors().await.is_empty()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if !self.can_create().await {
            return SubmitOutcome::Rejected;
        }
        let outcome = self.courses.submit().await;
        if matches!(outcome, SubmitOutcome::Created(_)) {
            self.instructors.reload().await;
        }
        outcome
    }

    pub fn open_enrollment(&self, course: Course) -> EnrollmentManager {
        EnrollmentManager::open(self.api.clone(), course)
    }
}
