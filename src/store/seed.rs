//! The mock dataset the product ships with. Ids are stable literals so the
//! documented scenarios (Jane the HR manager, Fiona's pending request, the
//! two seeded conversations) stay reproducible across restarts.

use crate::model::absence::{AbsenceRequest, AbsenceStatus};
use crate::model::employee::Employee;
use crate::model::message::{Conversation, Message};
use crate::model::recruitment::{Application, ApplicationStatus, JobPosting, JobStatus};
use crate::store::{
    AbsenceBook, EmployeeDirectory, MessageBoard, RecruitmentDesk, Store, TokenLedger,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn ts(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("valid seed timestamp")
}

fn employees() -> Vec<Employee> {
    [
        ("1", "Alice Johnson", "alice@talentflow.com", 237, "Frontend Developer", "Web"),
        ("2", "Bob Williams", "bob@talentflow.com", 238, "Backend Developer", "API"),
        ("3", "Charlie Brown", "charlie@talentflow.com", 239, "UI/UX Designer", "Design"),
        ("4", "Diana Miller", "diana@talentflow.com", 240, "Project Manager", "Management"),
        ("5", "Ethan Davis", "ethan@talentflow.com", 241, "DevOps Engineer", "Infrastructure"),
        ("6", "Fiona Clark", "fiona@talentflow.com", 242, "QA Tester", "Web"),
        ("7", "George Harrison", "george@talentflow.com", 243, "Product Owner", "Management"),
        ("8", "Hannah Scott", "hannah@talentflow.com", 244, "Data Scientist", "API"),
        ("9", "Ian Taylor", "ian@talentflow.com", 247, "Frontend Developer", "Web"),
        ("10", "Jane Doe", "jane@talentflow.com", 248, "HR Manager", "Management"),
    ]
    .into_iter()
    .map(|(id, name, email, photo, role, team)| {
        Employee::new(
            id,
            name,
            email,
            format!("https://picsum.photos/id/{photo}/200/200"),
            role,
            team,
        )
    })
    .collect()
}

fn absence_requests() -> Vec<AbsenceRequest> {
    let fixed = [
        ("req1", "1", date(2024, 8, 1), date(2024, 8, 5), "Vacation", AbsenceStatus::Approved),
        ("req2", "2", date(2024, 8, 10), date(2024, 8, 11), "Sick leave", AbsenceStatus::Approved),
        ("req3", "3", date(2024, 9, 1), date(2024, 9, 7), "Family trip", AbsenceStatus::Pending),
        ("req4", "6", date(2024, 8, 15), date(2024, 8, 16), "Doctor appointment", AbsenceStatus::Pending),
        ("req5", "5", date(2024, 7, 25), date(2024, 7, 25), "Personal day", AbsenceStatus::Approved),
        ("req6", "1", date(2024, 10, 10), date(2024, 10, 20), "Extended vacation", AbsenceStatus::Pending),
        ("req7", "4", date(2024, 8, 20), date(2024, 8, 22), "Conference", AbsenceStatus::Approved),
    ];

    let mut requests: Vec<AbsenceRequest> = fixed
        .into_iter()
        .map(|(id, employee_id, start_date, end_date, reason, status)| AbsenceRequest {
            id: id.into(),
            employee_id: employee_id.into(),
            start_date,
            end_date,
            reason: reason.into(),
            status,
        })
        .collect();

    // Keeps someone visibly on leave today, whatever today is.
    let today = Utc::now().date_naive();
    requests.push(AbsenceRequest {
        id: "req8".into(),
        employee_id: "6".into(),
        start_date: today,
        end_date: today + Duration::days(2),
        reason: "Feeling unwell".into(),
        status: AbsenceStatus::Approved,
    });

    requests
}

fn job_postings() -> Vec<JobPosting> {
    [
        ("job1", "Senior Frontend Developer", "Join our team to build amazing user experiences.", JobStatus::Open, ts(2024, 7, 15)),
        ("job2", "Lead Backend Engineer", "Lead our API team and build scalable services.", JobStatus::Open, ts(2024, 7, 10)),
        ("job3", "Marketing Intern", "Summer internship opportunity for marketing students.", JobStatus::Closed, ts(2024, 5, 20)),
    ]
    .into_iter()
    .map(|(id, title, description, status, created_at)| JobPosting {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        status,
        created_at,
    })
    .collect()
}

fn applications() -> Vec<Application> {
    [
        ("app1", "job1", "Liam Gallagher", "liam.g@example.com", ApplicationStatus::Received, ts(2024, 7, 20)),
        ("app2", "job1", "Noel Gallagher", "noel.g@example.com", ApplicationStatus::UnderReview, ts(2024, 7, 21)),
        ("app3", "job2", "Damon Albarn", "damon.a@example.com", ApplicationStatus::Received, ts(2024, 7, 18)),
        ("app4", "job3", "Graham Coxon", "graham.c@example.com", ApplicationStatus::Hired, ts(2024, 6, 1)),
    ]
    .into_iter()
    .map(|(id, job_id, candidate_name, candidate_email, status, applied_at)| Application {
        id: id.into(),
        job_id: job_id.into(),
        candidate_name: candidate_name.into(),
        candidate_email: candidate_email.into(),
        cv_url: "#".into(),
        status,
        applied_at,
    })
    .collect()
}

fn message_board() -> MessageBoard {
    let now = Utc::now();
    let messages: Vec<Message> = [
        ("msg1", "conv1", "6", "Hey Jane, do you have a minute to chat?", now - Duration::minutes(5)),
        ("msg2", "conv1", "10", "Sure Fiona, what's up?", now - Duration::minutes(4)),
        ("msg3", "conv1", "6", "I wanted to ask about the new project timeline.", now - Duration::minutes(3)),
        ("msg4", "conv2", "1", "Hey Bob, did you see the latest API docs?", now - Duration::hours(2)),
        ("msg5", "conv2", "2", "Not yet, I'll check them out now.", now - Duration::hours(1)),
    ]
    .into_iter()
    .map(|(id, conversation_id, sender_id, content, timestamp)| Message {
        id: id.into(),
        conversation_id: conversation_id.into(),
        sender_id: sender_id.into(),
        content: content.into(),
        timestamp,
    })
    .collect();

    let conversations = vec![
        Conversation {
            id: "conv1".into(),
            participant_ids: ["6".into(), "10".into()],
            last_message: messages[2].clone(),
        },
        Conversation {
            id: "conv2".into(),
            participant_ids: ["1".into(), "2".into()],
            last_message: messages[4].clone(),
        },
    ];

    MessageBoard::with(conversations, messages)
}

pub fn seeded() -> Store {
    Store {
        employees: EmployeeDirectory::with(employees()),
        absences: AbsenceBook::with(absence_requests()),
        recruitment: RecruitmentDesk::with(job_postings(), applications()),
        messages: message_board(),
        tokens: TokenLedger::default(),
    }
}

#[cfg(test)]
mod tests {
    use crate::model::role::AccessRole;
    use crate::store::Store;

    #[test]
    fn seed_roles_match_the_reference_dataset() {
        let store = Store::seeded();
        let jane = store.employees.get_by_email("jane@talentflow.com").unwrap();
        let fiona = store.employees.get_by_email("fiona@talentflow.com").unwrap();
        assert_eq!(jane.access_role, AccessRole::Hr);
        assert_eq!(fiona.access_role, AccessRole::Employee);
    }

    #[test]
    fn seed_counts_are_complete() {
        let store = Store::seeded();
        assert_eq!(store.employees.list().len(), 10);
        assert_eq!(store.absences.list().len(), 8);
        assert_eq!(store.recruitment.list_jobs().len(), 3);
        assert_eq!(store.recruitment.list_applications().len(), 4);
        assert_eq!(store.messages.conversations_for("6").len(), 1);
    }

    #[test]
    fn fiona_is_on_leave_today_via_the_rolling_seed_request() {
        let store = Store::seeded();
        let today = chrono::Utc::now().date_naive();
        assert!(store.absences.is_on_leave("6", today));
    }
}
