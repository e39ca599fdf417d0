use crate::domain::model::{Course, Id, Instructor, NewCourse, Student};
use crate::domain::ports::RecordApi;
use crate::utils::error::Result;
use crate::utils::validation::trimmed_required;
use async_trait::async_trait;
use std::fmt::Debug;

/// One entity kind served by a list-and-create view.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Record: Clone + Debug + Send + Sync;
    type Form: Clone + Debug + Default + Send + Sync;
    type Draft: Debug + Send + Sync;

    /// Lowercase plural used in log lines and messages, e.g. `"students"`.
    const PLURAL: &'static str;
    const CREATED_MESSAGE: &'static str;
    const CREATE_FAILED_MESSAGE: &'static str;

    /// Trim the form into a request payload. `None` means a required
    /// field is missing and no request may be issued.
    fn prepare(form: &Self::Form) -> Option<Self::Draft>;

    async fn list(api: &dyn RecordApi) -> Result<Vec<Self::Record>>;
    async fn create(api: &dyn RecordApi, draft: &Self::Draft) -> Result<Id>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameForm {
    pub name: String,
}

impl NameForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseForm {
    pub name: String,
    pub semester: String,
    pub instructor_id: Option<Id>,
}

pub struct Students;
pub struct Instructors;
pub struct Courses;

#[async_trait]
impl Resource for Students {
    type Record = Student;
    type Form = NameForm;
    type Draft = String;

    const PLURAL: &'static str = "students";
    const CREATED_MESSAGE: &'static str = "Student added successfully!";
    const CREATE_FAILED_MESSAGE: &'static str = "Failed to add student. Please try again.";

    fn prepare(form: &NameForm) -> Option<String> {
        trimmed_required(&form.name)
    }

    async fn list(api: &dyn RecordApi) -> Result<Vec<Student>> {
        api.list_students().await
    }

    async fn create(api: &dyn RecordApi, name: &String) -> Result<Id> {
        api.create_student(name).await
    }
}

#[async_trait]
impl Resource for Instructors {
    type Record = Instructor;
    type Form = NameForm;
    type Draft = String;

    const PLURAL: &'static str = "instructors";
    const CREATED_MESSAGE: &'static str = "Instructor added successfully!";
    const CREATE_FAILED_MESSAGE: &'static str = "Failed to add instructor. Please try again.";

    fn prepare(form: &NameForm) -> Option<String> {
        trimmed_required(&form.name)
    }

    async fn list(api: &dyn RecordApi) -> Result<Vec<Instructor>> {
        api.list_instructors().await
    }

    async fn create(api: &dyn RecordApi, name: &String) -> Result<Id> {
        api.create_instructor(name).await
    }
}

#[async_trait]
impl Resource for Courses {
    type Record = Course;
    type Form = CourseForm;
    type Draft = NewCourse;

    const PLURAL: &'static str = "courses";
    const CREATED_MESSAGE: &'static str = "Course created successfully!";
    const CREATE_FAILED_MESSAGE: &'static str = "Failed to create course. Please try again.";

    fn prepare(form: &CourseForm) -> Option<NewCourse> {
        Some(NewCourse {
            name: trimmed_required(&form.name)?,
            semester: trimmed_required(&form.semester)?,
            instructor_id: form.instructor_id?,
        })
    }

    async fn list(api: &dyn RecordApi) -> Result<Vec<Course>> {
        api.list_courses().await
    }

    async fn create(api: &dyn RecordApi, course: &NewCourse) -> Result<Id> {
        api.create_course(course).await
    }
}
