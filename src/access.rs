use crate::model::role::AccessRole;

/// Coarse, page-level resource tags. There is no hierarchy and no
/// per-record ACL; every rule is a static role/resource membership test.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Resource {
    Dashboard,
    Directory,
    OwnAbsences,
    TeamAbsenceQueue,
    Messages,
    Insights,
    Recruitment,
    JobManagement,
    Reports,
    EmployeeCreate,
    EmployeeDelete,
}

/// Pure policy predicate. Denial is a response state for the caller to
/// render, never a process fault.
pub fn is_allowed(role: AccessRole, resource: Resource) -> bool {
    match resource {
        Resource::Insights
        | Resource::Recruitment
        | Resource::Reports
        | Resource::TeamAbsenceQueue
        | Resource::EmployeeCreate
        | Resource::EmployeeDelete
        | Resource::JobManagement => role == AccessRole::Hr,
        Resource::Dashboard
        | Resource::Directory
        | Resource::OwnAbsences
        | Resource::Messages => true,
    }
}
