//! Domain models, one module per entity cluster.

pub mod academic_query;
pub mod activity_log;
pub mod announcement;
pub mod batch;
pub mod course;
pub mod department;
pub mod file_upload;
pub mod health;
pub mod holiday;
pub mod hostel_complaint;
pub mod mess_menu;
pub mod notification;
pub mod profile;
pub mod report;
pub mod timetable;
pub mod user;
