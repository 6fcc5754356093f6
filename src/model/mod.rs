pub mod absence;
pub mod employee;
pub mod message;
pub mod recruitment;
pub mod role;
