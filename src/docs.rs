use crate::api::absence::{AbsenceFilter, CreateAbsence};
use crate::api::employee::{CreateEmployee, EmployeeQuery, EmployeeResponse};
use crate::api::insights::{SuggestActionsReq, SuggestActionsResponse, SummaryResponse};
use crate::api::message::{ConversationResponse, OpenConversation, SendMessage};
use crate::api::recruitment::{CreateJob, SetJobStatus};
use crate::model::absence::{AbsenceRequest, AbsenceStatus};
use crate::model::employee::Employee;
use crate::model::message::{Conversation, Message};
use crate::model::recruitment::{Application, ApplicationStatus, JobPosting, JobStatus};
use crate::model::role::AccessRole;
use crate::models::{EnrollFaceReq, FaceLoginReq, LoginReq, SignupReq, TokenPair};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TalentFlow API",
        version = "1.0.0",
        description = r#"
## TalentFlow HR Management

This API powers **TalentFlow**, an HR management application.

### 🔹 Key Features
- **Employee Directory**
  - Search and browse the directory, with a live on-leave indicator
- **Absence Management**
  - File time-off requests; HR approves or rejects pending ones
- **Recruitment**
  - Publish job postings, toggle them open/closed, review applications
- **Messaging**
  - One-to-one conversations between employees
- **AI Insights & Reports**
  - Absence summaries, suggested manager actions, CSV exports

### 🔐 Security
Endpoints outside `/auth` require **JWT Bearer authentication**.
HR-only areas (insights, recruitment, reports, the team absence queue)
return **403 Access Denied** for the Employee role.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::signup,
        crate::auth::handlers::face_login,
        crate::auth::handlers::enroll_face,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::absence::list_absences,
        crate::api::absence::get_absence,
        crate::api::absence::create_absence,
        crate::api::absence::approve_absence,
        crate::api::absence::reject_absence,

        crate::api::recruitment::list_jobs,
        crate::api::recruitment::create_job,
        crate::api::recruitment::set_job_status,
        crate::api::recruitment::list_applications,
        crate::api::recruitment::job_applications,

        crate::api::message::list_conversations,
        crate::api::message::open_conversation,
        crate::api::message::list_messages,
        crate::api::message::send_message,

        crate::api::insights::absence_summary,
        crate::api::insights::suggest_actions,

        crate::api::reports::absences_csv
    ),
    components(
        schemas(
            LoginReq,
            SignupReq,
            FaceLoginReq,
            EnrollFaceReq,
            TokenPair,
            AccessRole,
            Employee,
            EmployeeQuery,
            EmployeeResponse,
            CreateEmployee,
            AbsenceStatus,
            AbsenceRequest,
            AbsenceFilter,
            CreateAbsence,
            JobStatus,
            JobPosting,
            ApplicationStatus,
            Application,
            CreateJob,
            SetJobStatus,
            Message,
            Conversation,
            ConversationResponse,
            OpenConversation,
            SendMessage,
            SummaryResponse,
            SuggestActionsReq,
            SuggestActionsResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, signup and session APIs"),
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Absence", description = "Absence request APIs"),
        (name = "Recruitment", description = "Job posting and application APIs"),
        (name = "Messaging", description = "Internal messaging APIs"),
        (name = "Insights", description = "AI insight APIs"),
        (name = "Reports", description = "Reporting and export APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
