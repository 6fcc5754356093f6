use crate::model::recruitment::{Application, JobPosting, JobStatus};
use crate::store::{StoreError, new_id};
use chrono::Utc;
use std::sync::RwLock;

pub struct NewJob {
    pub title: String,
    pub description: String,
}

pub struct RecruitmentDesk {
    jobs: RwLock<Vec<JobPosting>>,
    applications: RwLock<Vec<Application>>,
}

impl Default for RecruitmentDesk {
    fn default() -> Self {
        RecruitmentDesk {
            jobs: RwLock::new(Vec::new()),
            applications: RwLock::new(Vec::new()),
        }
    }
}

impl RecruitmentDesk {
    pub fn with(jobs: Vec<JobPosting>, applications: Vec<Application>) -> Self {
        RecruitmentDesk {
            jobs: RwLock::new(jobs),
            applications: RwLock::new(applications),
        }
    }

    pub fn list_jobs(&self) -> Vec<JobPosting> {
        let mut jobs = self.jobs.read().expect("job board poisoned").clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    /// New postings always open Open.
    pub fn add_job(&self, fields: NewJob) -> JobPosting {
        let job = JobPosting {
            id: new_id(),
            title: fields.title,
            description: fields.description,
            status: JobStatus::Open,
            created_at: Utc::now(),
        };
        self.jobs
            .write()
            .expect("job board poisoned")
            .push(job.clone());
        job
    }

    /// Open and Closed cycle freely; neither is terminal.
    pub fn set_job_status(&self, id: &str, status: JobStatus) -> Result<JobPosting, StoreError> {
        let mut jobs = self.jobs.write().expect("job board poisoned");
        let job = jobs.iter_mut().find(|j| j.id == id).ok_or(StoreError::NotFound)?;
        job.status = status;
        Ok(job.clone())
    }

    pub fn list_applications(&self) -> Vec<Application> {
        self.applications
            .read()
            .expect("application list poisoned")
            .clone()
    }

    pub fn applications_for_job(&self, job_id: &str) -> Vec<Application> {
        self.applications
            .read()
            .expect("application list poisoned")
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postings_start_open_and_cycle_freely() {
        let desk = RecruitmentDesk::default();
        let job = desk.add_job(NewJob {
            title: "Senior Frontend Developer".into(),
            description: "Join our team.".into(),
        });
        assert_eq!(job.status, JobStatus::Open);

        let closed = desk.set_job_status(&job.id, JobStatus::Closed).unwrap();
        assert_eq!(closed.status, JobStatus::Closed);
        let reopened = desk.set_job_status(&job.id, JobStatus::Open).unwrap();
        assert_eq!(reopened.status, JobStatus::Open);
    }

    #[test]
    fn toggling_unknown_job_reports_not_found() {
        let desk = RecruitmentDesk::default();
        assert_eq!(
            desk.set_job_status("ghost", JobStatus::Closed),
            Err(StoreError::NotFound)
        );
    }
}
