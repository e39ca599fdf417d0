use crate::domain::model::{Course, Id, Instructor, NewCourse, Student};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
}

/// The remote school record store.
#[async_trait]
pub trait RecordApi: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn create_student(&self, name: &str) -> Result<Id>;

    async fn list_instructors(&self) -> Result<Vec<Instructor>>;
    async fn create_instructor(&self, name: &str) -> Result<Id>;

    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn create_course(&self, course: &NewCourse) -> Result<Id>;

    async fn list_enrolled_students(&self, course_id: Id) -> Result<Vec<Student>>;
    async fn enroll_student(&self, course_id: Id, student_id: Id) -> Result<()>;
    async fn list_enrolled_student_names(&self, course_id: Id) -> Result<Vec<String>>;
}
