use crate::model::employee::Employee;
use crate::store::{StoreError, new_id};
use std::sync::RwLock;

pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: String,
    pub team: String,
}

#[derive(Default)]
pub struct EmployeeDirectory {
    inner: RwLock<Vec<Employee>>,
}

impl EmployeeDirectory {
    pub fn with(employees: Vec<Employee>) -> Self {
        EmployeeDirectory {
            inner: RwLock::new(employees),
        }
    }

    pub fn list(&self) -> Vec<Employee> {
        self.inner.read().expect("employee directory poisoned").clone()
    }

    pub fn get(&self, id: &str) -> Option<Employee> {
        self.inner
            .read()
            .expect("employee directory poisoned")
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    pub fn get_by_email(&self, email: &str) -> Option<Employee> {
        self.inner
            .read()
            .expect("employee directory poisoned")
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Emails are the pseudo-credential, so they must stay unique.
    pub fn add(&self, fields: NewEmployee) -> Result<Employee, StoreError> {
        let mut employees = self.inner.write().expect("employee directory poisoned");
        if employees
            .iter()
            .any(|e| e.email.eq_ignore_ascii_case(&fields.email))
        {
            return Err(StoreError::EmailTaken);
        }
        let employee = Employee::new(
            new_id(),
            fields.name,
            fields.email,
            fields.avatar,
            fields.role,
            fields.team,
        );
        employees.push(employee.clone());
        Ok(employee)
    }

    /// No cascade: absence and message records referencing the removed id
    /// are left dangling and must be rendered as "N/A" by readers.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut employees = self.inner.write().expect("employee directory poisoned");
        let before = employees.len();
        employees.retain(|e| e.id != id);
        if employees.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
