//! Repository implementations, one per entity cluster.

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

pub use academic_query::AcademicQueryRepository;
pub use activity_log::ActivityLogRepository;
pub use announcement::AnnouncementRepository;
pub use batch::BatchRepository;
pub use course::CourseRepository;
pub use department::DepartmentRepository;
pub use file_upload::FileUploadRepository;
pub use health::BackendHealthRepository;
pub use holiday::HolidayRepository;
pub use hostel_complaint::HostelComplaintRepository;
pub use mess_menu::MessMenuRepository;
pub use notification::NotificationPreferencesRepository;
pub use profile::ProfileRepository;
pub use report::ReportRepository;
pub use timetable::TimetableRepository;
pub use user::UserRepository;
