use crate::config::cli::{Command, CourseAction, NameAction};
use crate::core::courses::CourseBoard;
use crate::core::list_view::{ListView, LoadPhase, SubmitOutcome};
use crate::core::navigation::NAVIGATION;
use crate::core::notification::Notification;
use crate::core::resource::{CourseForm, Instructors, NameForm, Resource, Students};
use crate::domain::model::{Course, Id, Instructor, Student};
use crate::domain::ports::RecordApi;
use std::sync::Arc;

/// What a command printed and which notifications its views raised.
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<String>,
    pub notifications: Vec<Notification>,
}

impl Report {
    pub fn succeeded(&self) -> bool {
        !self.notifications.iter().any(Notification::is_error)
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

fn id_label(id: Option<Id>) -> String {
    id.map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#?".to_string())
}

fn student_line(student: &Student) -> String {
    format!("{:>5}  {}", id_label(student.id), student.name)
}

fn instructor_line(instructor: &Instructor) -> String {
    format!("{:>5}  {}", id_label(instructor.id), instructor.name)
}

/// Page shell: builds the view a command needs, drives it, collects output.
pub struct Shell {
    api: Arc<dyn RecordApi>,
}

impl Shell {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self { api }
    }

    pub async fn run(&self, command: &Command) -> Report {
        let mut report = Report::default();
        match command {
            Command::Dashboard => {
                report.line("School Management");
                for item in NAVIGATION.iter() {
                    report.line(format!("  {:<12} {:<13} {}", item.name, item.route, item.summary));
                }
            }
            Command::Students { action } => {
                let view: ListView<Students> = ListView::new(self.api.clone());
                self.name_view(&view, action, student_line, &mut report).await;
            }
            Command::Instructors { action } => {
                let view: ListView<Instructors> = ListView::new(self.api.clone());
                self.name_view(&view, action, instructor_line, &mut report).await;
            }
            Command::Courses { action } => self.courses(action, &mut report).await,
        }
        report
    }

    async fn name_view<R>(
        &self,
        view: &ListView<R>,
        action: &NameAction,
        render: fn(&R::Record) -> String,
        report: &mut Report,
    ) where
        R: Resource<Form = NameForm>,
    {
        if let NameAction::Create { name } = action {
            view.toggle_form().await;
            view.set_form(NameForm::new(name.as_str())).await;
            match view.submit().await {
                SubmitOutcome::Created(id) => {
                    report.line(format!("Created #{} in {}", id, R::PLURAL))
                }
                SubmitOutcome::Rejected => {
                    report.notifications.push(Notification::error("A name is required."))
                }
                SubmitOutcome::Ignored | SubmitOutcome::Failed(_) => {}
            }
        } else {
            view.activate().await;
        }

        if view.phase().await == LoadPhase::Loaded {
            let records = view.records().await;
            report.line(format!("{} ({})", R::PLURAL, records.len()));
            report.lines.extend(records.iter().map(render));
        }
        report.notifications.extend(view.take_notifications().await);
    }

    async fn courses(&self, action: &CourseAction, report: &mut Report) {
        let board = CourseBoard::new(self.api.clone());
        board.activate().await;

        match action {
            CourseAction::List => self.render_courses(&board, report).await,
            CourseAction::Create {
                name,
                semester,
                instructor_id,
            } => {
                board
                    .courses()
                    .set_form(CourseForm {
                        name: name.clone(),
                        semester: semester.clone(),
                        instructor_id: *instructor_id,
                    })
                    .await;
                let has_instructors = board.can_create().await;
                match board.submit().await {
                    SubmitOutcome::Created(id) => report.line(format!("Created course #{}", id)),
                    SubmitOutcome::Rejected if !has_instructors => {
                        report.notifications.push(Notification::error(
                            "No instructors available. Please add instructors first.",
                        ))
                    }
                    SubmitOutcome::Rejected => report.notifications.push(Notification::error(
                        "A course needs a name, a semester and an instructor.",
                    )),
                    SubmitOutcome::Ignored | SubmitOutcome::Failed(_) => {}
                }
                self.render_courses(&board, report).await;
            }
            CourseAction::Enrollment { course_id } => {
                self.enrollment(&board, *course_id, None, report).await
            }
            CourseAction::Enroll {
                course_id,
                student_id,
            } => {
                self.enrollment(&board, *course_id, Some(*student_id), report)
                    .await
            }
            CourseAction::Names { course_id } => {
                match self.api.list_enrolled_student_names(*course_id).await {
                    Ok(names) => report.lines.extend(names),
                    Err(e) => report.notifications.push(Notification::error(format!(
                        "Failed to load student names. ({})",
                        e.status_text()
                    ))),
                }
            }
        }

        report.notifications.extend(board.courses().take_notifications().await);
        report
            .notifications
            .extend(board.instructors().take_notifications().await);
    }

    async fn render_courses(&self, board: &CourseBoard, report: &mut Report) {
        if board.courses().phase().await != LoadPhase::Loaded {
            return;
        }
        let courses = board.courses().records().await;
        report.line(format!("courses ({})", courses.len()));
        for course in &courses {
            let instructor = board.instructor_name(course.instructor_id).await;
            report.line(format!(
                "{:>5}  {} [{}] {}",
                id_label(course.id),
                course.name,
                course.semester,
                instructor
            ));
        }
    }

    async fn enrollment(
        &self,
        board: &CourseBoard,
        course_id: Id,
        enroll: Option<Id>,
        report: &mut Report,
    ) {
        let courses = board.courses().records().await;
        let Some(course) = courses.into_iter().find(|c| c.id == Some(course_id)) else {
            if board.courses().phase().await == LoadPhase::Loaded {
                report
                    .notifications
                    .push(Notification::error(format!("Course #{} not found.", course_id)));
            }
            return;
        };
        let heading = course_heading(&course);

        let mut session = board.open_enrollment(course);
        if session.load().await.is_ok() {
            if let Some(student_id) = enroll {
                if let Err(e) = session.enroll(student_id).await {
                    if !e.is_request_error() {
                        report
                            .notifications
                            .push(Notification::error(e.user_friendly_message()));
                    }
                }
            }

            report.line(heading);
            report.line(format!("Enrolled students ({})", session.enrolled().len()));
            if session.enrolled().is_empty() {
                report.line("  No students enrolled");
            }
            report.lines.extend(session.enrolled().iter().map(student_line));
            report.line(format!("Eligible students ({})", session.eligible().len()));
            if !session.can_pick() {
                report.line("  All students are already enrolled or no students available.");
            }
            report.lines.extend(session.eligible().iter().map(student_line));
        }
        report.notifications.extend(session.take_notifications());
    }
}

fn course_heading(course: &Course) -> String {
    format!("{} - {}", course.name, course.semester)
}
