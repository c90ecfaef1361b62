//! HTTP route handlers, one module per portal area.

pub mod academic_queries;
pub mod activity_logs;
pub mod admin_users;
pub mod announcements;
pub mod auth;
pub mod batches;
pub mod courses;
pub mod departments;
pub mod files;
pub mod health;
pub mod holidays;
pub mod hostel_complaints;
pub mod mess_menus;
pub mod notifications;
pub mod profiles;
pub mod reports;
pub mod timetables;
