#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub route: &'static str,
    pub summary: &'static str,
}

pub const NAVIGATION: [NavItem; 4] = [
    NavItem {
        name: "Dashboard",
        route: "/",
        summary: "Manage your school's students, instructors, and courses",
    },
    NavItem {
        name: "Students",
        route: "/students",
        summary: "View and add students to the system",
    },
    NavItem {
        name: "Instructors",
        route: "/instructors",
        summary: "View and add instructors to the system",
    },
    NavItem {
        name: "Courses",
        route: "/courses",
        summary: "Create and manage course offerings",
    },
];
