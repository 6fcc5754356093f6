use crate::model::absence::{AbsenceRequest, AbsenceStatus};
use crate::store::{StoreError, new_id};
use chrono::NaiveDate;
use std::sync::RwLock;

pub const MIN_REASON_LEN: usize = 10;

pub struct NewAbsence {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Default)]
pub struct AbsenceBook {
    inner: RwLock<Vec<AbsenceRequest>>,
}

impl AbsenceBook {
    pub fn with(requests: Vec<AbsenceRequest>) -> Self {
        AbsenceBook {
            inner: RwLock::new(requests),
        }
    }

    pub fn list(&self) -> Vec<AbsenceRequest> {
        self.inner.read().expect("absence book poisoned").clone()
    }

    pub fn for_employee(&self, employee_id: &str) -> Vec<AbsenceRequest> {
        self.inner
            .read()
            .expect("absence book poisoned")
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<AbsenceRequest> {
        self.inner
            .read()
            .expect("absence book poisoned")
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Validation is a hard precondition: nothing is stored unless the date
    /// range and reason pass. New requests always start Pending; the caller
    /// is responsible for having resolved `employee_id` first.
    pub fn add(&self, fields: NewAbsence, employee_id: &str) -> Result<AbsenceRequest, StoreError> {
        if fields.start_date > fields.end_date {
            return Err(StoreError::InvertedDateRange);
        }
        if fields.reason.trim().len() < MIN_REASON_LEN {
            return Err(StoreError::ReasonTooShort);
        }
        let request = AbsenceRequest {
            id: new_id(),
            employee_id: employee_id.to_owned(),
            start_date: fields.start_date,
            end_date: fields.end_date,
            reason: fields.reason,
            status: AbsenceStatus::Pending,
        };
        self.inner
            .write()
            .expect("absence book poisoned")
            .push(request.clone());
        Ok(request)
    }

    /// Pending is the only state a decision can leave from. Approved and
    /// Rejected are terminal, so a second decision on the same request
    /// fails without touching the record.
    pub fn set_status(
        &self,
        id: &str,
        status: AbsenceStatus,
    ) -> Result<AbsenceRequest, StoreError> {
        let mut requests = self.inner.write().expect("absence book poisoned");
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        if request.status != AbsenceStatus::Pending {
            return Err(StoreError::AlreadyProcessed);
        }
        request.status = status;
        Ok(request.clone())
    }

    /// Recomputed on every call; an employee is on leave iff some Approved
    /// request's date range contains `date`.
    pub fn is_on_leave(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.inner
            .read()
            .expect("absence book poisoned")
            .iter()
            .any(|r| {
                r.employee_id == employee_id
                    && r.status == AbsenceStatus::Approved
                    && r.start_date <= date
                    && date <= r.end_date
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doctor_visit() -> NewAbsence {
        NewAbsence {
            start_date: date(2024, 8, 15),
            end_date: date(2024, 8, 16),
            reason: "Doctor appointment visit".into(),
        }
    }

    #[test]
    fn new_request_starts_pending_and_approval_touches_only_status() {
        let book = AbsenceBook::default();
        let created = book.add(doctor_visit(), "6").unwrap();
        assert_eq!(created.status, AbsenceStatus::Pending);
        assert!(book.list().iter().any(|r| r.id == created.id));

        let approved = book.set_status(&created.id, AbsenceStatus::Approved).unwrap();
        assert_eq!(approved.status, AbsenceStatus::Approved);
        assert_eq!(approved.employee_id, created.employee_id);
        assert_eq!(approved.start_date, created.start_date);
        assert_eq!(approved.end_date, created.end_date);
        assert_eq!(approved.reason, created.reason);
    }

    #[test]
    fn approved_request_cannot_be_rejected() {
        let book = AbsenceBook::default();
        let created = book.add(doctor_visit(), "6").unwrap();
        book.set_status(&created.id, AbsenceStatus::Approved).unwrap();

        assert_eq!(
            book.set_status(&created.id, AbsenceStatus::Rejected),
            Err(StoreError::AlreadyProcessed)
        );
        assert_eq!(book.get(&created.id).unwrap().status, AbsenceStatus::Approved);
    }

    #[test]
    fn decisions_on_unknown_ids_report_not_found() {
        let book = AbsenceBook::default();
        assert_eq!(
            book.set_status("ghost", AbsenceStatus::Approved),
            Err(StoreError::NotFound)
        );
    }

    #[test]
    fn rejected_inputs_leave_the_book_untouched() {
        let book = AbsenceBook::default();

        let inverted = NewAbsence {
            start_date: date(2024, 8, 16),
            end_date: date(2024, 8, 15),
            reason: "Doctor appointment visit".into(),
        };
        assert_eq!(book.add(inverted, "6"), Err(StoreError::InvertedDateRange));

        let terse = NewAbsence {
            start_date: date(2024, 8, 15),
            end_date: date(2024, 8, 16),
            reason: "Sick".into(),
        };
        assert_eq!(book.add(terse, "6"), Err(StoreError::ReasonTooShort));

        assert!(book.list().is_empty());
    }

    #[test]
    fn on_leave_tracks_approved_ranges_only() {
        let book = AbsenceBook::default();
        let created = book.add(doctor_visit(), "6").unwrap();

        // Pending requests never count.
        assert!(!book.is_on_leave("6", date(2024, 8, 15)));

        book.set_status(&created.id, AbsenceStatus::Approved).unwrap();
        assert!(book.is_on_leave("6", date(2024, 8, 15)));
        assert!(book.is_on_leave("6", date(2024, 8, 16)));
        assert!(!book.is_on_leave("6", date(2024, 8, 14)));
        assert!(!book.is_on_leave("6", date(2024, 8, 17)));
        assert!(!book.is_on_leave("7", date(2024, 8, 15)));
    }
}
