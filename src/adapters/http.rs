use crate::domain::model::{
    Course, EnrollStudent, Id, Instructor, NewCourse, NewInstructor, NewStudent, Student,
};
use crate::domain::ports::{ConfigProvider, RecordApi};
use crate::utils::error::{describe_status, AdminError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// `RecordApi` over JSON/HTTP against a fixed base address.
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    client: Client,
    base_url: String,
}

impl HttpRecordApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success("GET", &url, response)?;
        Ok(response.json::<T>().await?)
    }

    async fn post(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Response> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::ensure_success("POST", &url, response)
    }

    fn ensure_success(method: &str, url: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let description = describe_status(status);
        tracing::warn!("{} {} failed: {}", method, url, description);
        Err(AdminError::request(description))
    }
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.get_json("/students").await
    }

    async fn create_student(&self, name: &str) -> Result<Id> {
        let body = NewStudent {
            name: name.to_string(),
        };
        Ok(self.post("/students", &body).await?.json().await?)
    }

    async fn list_instructors(&self) -> Result<Vec<Instructor>> {
        self.get_json("/instructors").await
    }

    async fn create_instructor(&self, name: &str) -> Result<Id> {
        let body = NewInstructor {
            name: name.to_string(),
        };
        Ok(self.post("/instructors", &body).await?.json().await?)
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.get_json("/courses").await
    }

    async fn create_course(&self, course: &NewCourse) -> Result<Id> {
        Ok(self.post("/courses", course).await?.json().await?)
    }

    async fn list_enrolled_students(&self, course_id: Id) -> Result<Vec<Student>> {
        self.get_json(&format!("/courses/{}/students", course_id)).await
    }

    async fn enroll_student(&self, course_id: Id, student_id: Id) -> Result<()> {
        let body = EnrollStudent { student_id };
        // Response body is empty; only the status matters.
        self.post(&format!("/courses/{}/students", course_id), &body).await?;
        Ok(())
    }

    async fn list_enrolled_student_names(&self, course_id: Id) -> Result<Vec<String>> {
        self.get_json(&format!("/courses/{}/student_names", course_id)).await
    }
}
