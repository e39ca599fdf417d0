use crate::domain::model::Id;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Show the dashboard sections
    Dashboard,
    /// List or add students
    Students {
        #[command(subcommand)]
        action: NameAction,
    },
    /// List or add instructors
    Instructors {
        #[command(subcommand)]
        action: NameAction,
    },
    /// List, create and enroll into courses
    Courses {
        #[command(subcommand)]
        action: CourseAction,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum NameAction {
    List,
    Create { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum CourseAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        semester: String,
        #[arg(long)]
        instructor_id: Option<Id>,
    },
    /// Show enrolled and eligible students for a course
    Enrollment { course_id: Id },
    /// Enroll a student in a course
    Enroll { course_id: Id, student_id: Id },
    /// Print the names of the students enrolled in a course
    Names { course_id: Id },
}
