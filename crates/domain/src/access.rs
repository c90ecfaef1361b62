//! Role and resource access tables.
//!
//! Every protected resource names its allowed roles explicitly. There is no
//! role hierarchy: Admin appears in an allow-list only where Admin genuinely
//! has access.

use serde::{Deserialize, Serialize};

/// The fixed set of portal roles.
///
/// String forms match the stored profile values exactly, including the
/// two-word roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Faculty,
    Student,
    #[serde(rename = "Academic Section")]
    AcademicSection,
    Director,
    #[serde(rename = "Hostel Warden")]
    HostelWarden,
    #[serde(rename = "Mess Supervisor")]
    MessSupervisor,
}

/// All roles, for enumeration in tests and reports.
pub const ALL_ROLES: [Role; 7] = [
    Role::Admin,
    Role::Faculty,
    Role::Student,
    Role::AcademicSection,
    Role::Director,
    Role::HostelWarden,
    Role::MessSupervisor,
];

impl Role {
    /// Converts to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Faculty => "Faculty",
            Role::Student => "Student",
            Role::AcademicSection => "Academic Section",
            Role::Director => "Director",
            Role::HostelWarden => "Hostel Warden",
            Role::MessSupervisor => "Mess Supervisor",
        }
    }

    /// Parses from the stored string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "Faculty" => Some(Role::Faculty),
            "Student" => Some(Role::Student),
            "Academic Section" => Some(Role::AcademicSection),
            "Director" => Some(Role::Director),
            "Hostel Warden" => Some(Role::HostelWarden),
            "Mess Supervisor" => Some(Role::MessSupervisor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protected portal resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Admin dashboard and its summary data.
    AdminDashboard,
    /// Creating and listing portal accounts.
    UserManagement,
    /// Department create/update/delete.
    DepartmentManage,
    /// Batch and section create/update/delete.
    BatchManage,
    /// Course and course assignment mutations.
    CourseManage,
    /// Backend health probes.
    BackendHealth,
    /// Activity log listing.
    ActivityLogs,
    /// Report configs, generation, and report data.
    Reports,
    /// Academic query threads (create, reply, resolve, list).
    AcademicQueries,
    /// Filing a hostel complaint.
    ComplaintCreate,
    /// Changing a hostel complaint's status.
    ComplaintStatusUpdate,
    /// Mess menu create/update/delete.
    MessMenuManage,
    /// Timetable create/update/delete.
    TimetableManage,
    /// Posting announcements.
    AnnouncementCreate,
    /// Holiday calendar mutations.
    HolidayManage,
}

/// Returns whether `role` may access `resource`.
///
/// One arm per resource, each enumerating its allowed roles.
pub fn can_access(role: Role, resource: Resource) -> bool {
    match resource {
        Resource::AdminDashboard => matches!(role, Role::Admin),
        Resource::UserManagement => matches!(role, Role::Admin),
        Resource::DepartmentManage => matches!(role, Role::Admin),
        Resource::BatchManage => matches!(role, Role::Admin),
        Resource::CourseManage => matches!(role, Role::Admin | Role::AcademicSection),
        Resource::BackendHealth => matches!(role, Role::Admin),
        Resource::ActivityLogs => matches!(role, Role::Admin),
        Resource::Reports => matches!(
            role,
            Role::Admin | Role::AcademicSection | Role::Faculty | Role::Director
        ),
        Resource::AcademicQueries => matches!(role, Role::Student | Role::Faculty | Role::Admin),
        Resource::ComplaintCreate => matches!(role, Role::Student),
        Resource::ComplaintStatusUpdate => matches!(role, Role::HostelWarden),
        Resource::MessMenuManage => matches!(role, Role::MessSupervisor | Role::Admin),
        Resource::TimetableManage => matches!(role, Role::AcademicSection | Role::Admin),
        Resource::AnnouncementCreate => matches!(role, Role::Admin | Role::Faculty),
        Resource::HolidayManage => matches!(role, Role::Admin | Role::AcademicSection),
    }
}

/// What a role can see and do, resolved once per login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCapabilities {
    pub role: Role,
    /// Navigation entries shown for this role.
    pub nav_items: Vec<&'static str>,
    pub can_manage_users: bool,
    pub can_view_reports: bool,
    pub can_post_announcements: bool,
    pub can_manage_mess_menu: bool,
    pub can_manage_timetable: bool,
    pub can_update_complaint_status: bool,
}

/// Resolves the capability record for a role.
pub fn capabilities(role: Role) -> RoleCapabilities {
    RoleCapabilities {
        role,
        nav_items: nav_items(role),
        can_manage_users: can_access(role, Resource::UserManagement),
        can_view_reports: can_access(role, Resource::Reports),
        can_post_announcements: can_access(role, Resource::AnnouncementCreate),
        can_manage_mess_menu: can_access(role, Resource::MessMenuManage),
        can_manage_timetable: can_access(role, Resource::TimetableManage),
        can_update_complaint_status: can_access(role, Resource::ComplaintStatusUpdate),
    }
}

fn nav_items(role: Role) -> Vec<&'static str> {
    match role {
        Role::Admin => vec![
            "dashboard",
            "users",
            "departments",
            "batches",
            "courses",
            "academic-queries",
            "announcements",
            "mess-menu",
            "timetable",
            "reports",
            "activity-logs",
            "backend-health",
            "profile",
        ],
        Role::Faculty => vec![
            "dashboard",
            "academic-queries",
            "announcements",
            "timetable",
            "mess-menu",
            "files",
            "reports",
            "profile",
        ],
        Role::Student => vec![
            "dashboard",
            "academic-queries",
            "hostel-complaints",
            "mess-menu",
            "timetable",
            "announcements",
            "files",
            "profile",
        ],
        Role::AcademicSection => vec![
            "dashboard",
            "timetable",
            "holidays",
            "reports",
            "announcements",
            "profile",
        ],
        Role::Director => vec![
            "dashboard",
            "reports",
            "announcements",
            "mess-menu",
            "timetable",
            "profile",
        ],
        Role::HostelWarden => vec![
            "dashboard",
            "hostel-complaints",
            "announcements",
            "mess-menu",
            "profile",
        ],
        Role::MessSupervisor => vec!["dashboard", "mess-menu", "announcements", "profile"],
    }
}
