pub mod credits;
pub mod directory;
pub mod occurrences;
pub mod reports;
pub mod timetable;
pub mod workflow;
