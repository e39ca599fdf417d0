pub mod courses;
pub mod enrollment;
pub mod list_view;
pub mod navigation;
pub mod notification;
pub mod resource;

pub use crate::domain::model::{Course, Id, Instructor, NewCourse, Student};
pub use crate::domain::ports::{ConfigProvider, RecordApi};
pub use crate::utils::error::Result;
