//! Entity definitions (database row mappings).

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

pub use academic_query::AcademicQueryEntity;
pub use activity_log::ActivityLogEntity;
pub use announcement::AnnouncementEntity;
pub use batch::{BatchEntity, SectionEntity};
pub use course::{CourseAssignmentDetailEntity, CourseAssignmentEntity, CourseEntity};
pub use department::DepartmentEntity;
pub use file_upload::FileUploadEntity;
pub use health::ServiceHealthEntity;
pub use holiday::HolidayEntity;
pub use hostel_complaint::HostelComplaintEntity;
pub use mess_menu::MessMenuEntity;
pub use notification::NotificationPreferencesEntity;
pub use profile::ProfileEntity;
pub use report::{ReportConfigEntity, ReportDataEntity, ReportViewEntity};
pub use timetable::TimetableEntryEntity;
pub use user::{SessionEntity, UserEntity};
