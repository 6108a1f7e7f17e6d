pub mod attendance;
pub mod classes;
pub mod core;
pub mod fees;
pub mod notifications;
pub mod reports;
pub mod session;
pub mod students;
pub mod tutors;
