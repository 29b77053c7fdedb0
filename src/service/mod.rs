//! Domain service: thin orchestration over the student repository.

mod student;
pub use student::StudentService;
