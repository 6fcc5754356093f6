pub mod absence;
pub mod employee;
pub mod insights;
pub mod message;
pub mod recruitment;
pub mod reports;
