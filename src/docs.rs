use crate::api::career::{ApplicationPage, DecisionRequest, SubmitApplication};
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::job::{CreateJob, JobListResponse};
use crate::api::mail_request::{MailRequestListResponse, SubmitMailRequest};
use crate::api::project::{AssignEmployees, CreateProject, ProjectListResponse, UpdateProject};
use crate::auth::handlers::LoginResponse;
use crate::model::career::{ApplicationStatus, CareerApplication};
use crate::model::employee::{ContactDetails, Employee, Position};
use crate::model::job::{Job, JobStatus};
use crate::model::mail_request::MailRequest;
use crate::model::project::{Project, ProjectStatus};
use crate::model::role::Role;
use crate::model::user::PublicUser;
use crate::models::{LoginReqDto, SignupReq};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Construction Back-Office API",
        version = "0.1.0",
        description = r#"
## Construction company back office

Backs the Admin, Manager and Employee dashboards.

### Key Features
- **Accounts** – signup, login and a token-gated echo
- **Employees** – intake form and listing
- **Projects** – create, update, delete and assign staff (assignment only ever adds)
- **Careers** – public applications, paginated review, approve/deny with email
- **Mail requests** – contact-form inbox
- **Jobs** – openings published by Admins and Managers

### Security
Send `Authorization: Bearer <token>` from `/login`. Tokens expire after one hour.
A missing token answers **401**, an unusable one **400**.

### Errors
Every error body is `{"message": "..."}`.
"#,
    ),
    paths(
        crate::auth::handlers::signup,
        crate::auth::handlers::login,
        crate::auth::handlers::protected,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,

        crate::api::project::create_project,
        crate::api::project::list_projects,
        crate::api::project::update_project,
        crate::api::project::delete_project,
        crate::api::project::assign_employees,

        crate::api::career::submit_application,
        crate::api::career::list_applications,
        crate::api::career::approve,
        crate::api::career::deny,

        crate::api::mail_request::submit_mail_request,
        crate::api::mail_request::list_mail_requests,
        crate::api::mail_request::delete_mail_request,

        crate::api::job::create_job,
        crate::api::job::list_jobs
    ),
    components(
        schemas(
            SignupReq,
            LoginReqDto,
            LoginResponse,
            PublicUser,
            Role,
            CreateEmployee,
            ContactDetails,
            Position,
            Employee,
            EmployeeListResponse,
            CreateProject,
            UpdateProject,
            AssignEmployees,
            ProjectStatus,
            Project,
            ProjectListResponse,
            SubmitApplication,
            DecisionRequest,
            ApplicationStatus,
            CareerApplication,
            ApplicationPage,
            SubmitMailRequest,
            MailRequest,
            MailRequestListResponse,
            CreateJob,
            JobStatus,
            Job,
            JobListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup, login and token checks"),
        (name = "Employee", description = "Employee intake"),
        (name = "Project", description = "Project tracking and staff assignment"),
        (name = "Career", description = "Job applications and decisions"),
        (name = "MailRequest", description = "Contact-form inbox"),
        (name = "Job", description = "Job openings"),
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
