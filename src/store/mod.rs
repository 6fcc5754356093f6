use std::fmt;

pub mod absence;
pub mod employee;
pub mod message;
pub mod recruitment;
mod seed;
pub mod token;

pub use absence::AbsenceBook;
pub use employee::EmployeeDirectory;
pub use message::MessageBoard;
pub use recruitment::RecruitmentDesk;
pub use token::TokenLedger;

/// Recoverable store-level failures. Handlers map these onto HTTP statuses;
/// none of them leaves a repository partially mutated.
#[derive(Debug, Eq, PartialEq)]
pub enum StoreError {
    NotFound,
    EmailTaken,
    InvertedDateRange,
    ReasonTooShort,
    AlreadyProcessed,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StoreError::NotFound => "record not found",
            StoreError::EmailTaken => "email already in use",
            StoreError::InvertedDateRange => "start_date cannot be after end_date",
            StoreError::ReasonTooShort => "reason must be at least 10 characters long",
            StoreError::AlreadyProcessed => "request not found or already processed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for StoreError {}

/// One repository per aggregate type. Each hides its collection behind the
/// operations the rest of the service is allowed to perform.
pub struct Store {
    pub employees: EmployeeDirectory,
    pub absences: AbsenceBook,
    pub recruitment: RecruitmentDesk,
    pub messages: MessageBoard,
    pub tokens: TokenLedger,
}

impl Store {
    /// The reference dataset the product ships with.
    pub fn seeded() -> Self {
        seed::seeded()
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
