use crate::core::notification::Notification;
use crate::domain::model::{Course, Id, Student};
use crate::domain::ports::RecordApi;
use crate::utils::error::{AdminError, Result};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentPhase {
    Idle,
    Loading,
    Ready,
    /// Held while an enroll request is outstanding. A session whose `enroll`
    /// future was dropped stays here until `load` is called again.
    Enrolling,
    Failed(String),
}

/// Students from `all` whose identifier is not in `enrolled`, in `all`'s
/// order. Rows without an identifier are never eligible.
pub fn eligible_students(all: &[Student], enrolled: &[Student]) -> Vec<Student> {
    let enrolled_ids: HashSet<Id> = enrolled.iter().filter_map(|s| s.id).collect();
    all.iter()
        .filter(|s| s.id.is_some_and(|id| !enrolled_ids.contains(&id)))
        .cloned()
        .collect()
}

/// Enrollment session for one selected course.
pub struct EnrollmentManager {
    api: Arc<dyn RecordApi>,
    course: Course,
    phase: EnrollmentPhase,
    enrolled: Vec<Student>,
    eligible: Vec<Student>,
    notifications: Vec<Notification>,
}

impl EnrollmentManager {
    pub fn open(api: Arc<dyn RecordApi>, course: Course) -> Self {
        Self {
            api,
            course,
            phase: EnrollmentPhase::Idle,
            enrolled: Vec::new(),
            eligible: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Fetch the enrolled roster and the full roster together and derive the
    /// eligible subset. Either request failing fails the whole load and
    /// leaves the previous collections in place. A course the store has not
    /// identified yet cannot be loaded and stays `Idle`.
    pub async fn load(&mut self) -> Result<()> {
        let Some(course_id) = self.course.id else {
            tracing::debug!("Course '{}' has no identifier yet", self.course.name);
            return Ok(());
        };

        self.phase = EnrollmentPhase::Loading;
        tracing::debug!("Loading enrollment for course {}", course_id);

        let api = self.api.as_ref();
        let loaded = tokio::try_join!(api.list_enrolled_students(course_id), api.list_students());

        match loaded {
            Ok((enrolled, all)) => {
                self.eligible = eligible_students(&all, &enrolled);
                self.enrolled = enrolled;
                self.phase = EnrollmentPhase::Ready;
                tracing::debug!(
                    "Course {}: {} enrolled, {} eligible",
                    course_id,
                    self.enrolled.len(),
                    self.eligible.len()
                );
                Ok(())
            }
            Err(e) => {
                let status = e.status_text();
                tracing::warn!("Failed to load enrollment for course {}: {}", course_id, status);
                self.notifications.push(Notification::error(format!(
                    "Failed to load enrollment data. ({})",
                    status
                )));
                self.phase = EnrollmentPhase::Failed(status);
                Err(e)
            }
        }
    }

    /// Enroll an eligible student, then reload both rosters from the store.
    ///
    /// A rejected request leaves the session `Ready` with the collections it
    /// had before the call. Once the store accepts the enrollment this
    /// returns `Ok` even if the follow-up reload fails; that failure is
    /// reported through the session phase and notifications.
    pub async fn enroll(&mut self, student_id: Id) -> Result<()> {
        if self.phase != EnrollmentPhase::Ready {
            return Err(AdminError::SessionNotReady);
        }
        let course_id = self.course.id.ok_or(AdminError::SessionNotReady)?;
        if !self.eligible.iter().any(|s| s.id == Some(student_id)) {
            return Err(AdminError::NotEligible { student_id });
        }

        self.phase = EnrollmentPhase::Enrolling;
        tracing::info!("Enrolling student {} in course {}", student_id, course_id);

        if let Err(e) = self.api.enroll_student(course_id, student_id).await {
            let status = e.status_text();
            tracing::warn!(
                "Enrolling student {} in course {} failed: {}",
                student_id,
                course_id,
                status
            );
            self.notifications.push(Notification::error(format!(
                "Failed to enroll student. They may already be enrolled. ({})",
                status
            )));
            self.phase = EnrollmentPhase::Ready;
            return Err(e);
        }

        if self.load().await.is_ok() {
            self.notifications
                .push(Notification::success("Student enrolled successfully!"));
        }
        Ok(())
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn phase(&self) -> &EnrollmentPhase {
        &self.phase
    }

    pub fn enrolled(&self) -> &[Student] {
        &self.enrolled
    }

    pub fn eligible(&self) -> &[Student] {
        &self.eligible
    }

    /// The pick control is disabled, not an error, when nobody is eligible.
    pub fn can_pick(&self) -> bool {
        self.phase == EnrollmentPhase::Ready && !self.eligible.is_empty()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
