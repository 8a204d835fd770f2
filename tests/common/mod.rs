use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use registrar::middleware::auth::{TokenAuthenticator, attach_identity};
use registrar::modules::students::model::{
    MessageResponse, Student, StudentListQuery, StudentPayload, StudentStatusChange,
    StudentUpdate,
};
use registrar::modules::students::service::StudentService;
use registrar::router::init_router;
use registrar::state::AppState;
use registrar_config::{CorsConfig, JwtConfig, ServiceAuthConfig};
use registrar_core::AppError;
use registrar_models::RequestIdentity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SERVICE_KEY: &str = "SECRET123";

/// One recorded call on the student service.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum StudentCall {
    List(StudentListQuery),
    Add(StudentPayload),
    Update(StudentUpdate),
    Detail(String),
    Status(StudentStatusChange),
}

/// In-memory student service that records every call.
///
/// When `failure` is set, every operation fails with it after recording.
#[derive(Default)]
pub struct RecordingStudentService {
    pub calls: Mutex<Vec<StudentCall>>,
    pub students: Vec<Student>,
    pub failure: Option<(StatusCode, &'static str)>,
}

#[allow(dead_code)]
impl RecordingStudentService {
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students,
            ..Default::default()
        }
    }

    pub fn failing(status: StatusCode, message: &'static str) -> Self {
        Self {
            failure: Some((status, message)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<StudentCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StudentCall) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some((status, message)) => Err(AppError::new(status, anyhow::anyhow!(message))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StudentService for RecordingStudentService {
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>, AppError> {
        self.record(StudentCall::List(query))?;
        Ok(self.students.clone())
    }

    async fn add_student(&self, payload: StudentPayload) -> Result<MessageResponse, AppError> {
        self.record(StudentCall::Add(payload))?;
        Ok(MessageResponse::new("Student added successfully"))
    }

    async fn update_student(&self, update: StudentUpdate) -> Result<MessageResponse, AppError> {
        self.record(StudentCall::Update(update))?;
        Ok(MessageResponse::new("Student updated successfully"))
    }

    async fn get_student_detail(&self, id: &str) -> Result<Student, AppError> {
        self.record(StudentCall::Detail(id.to_string()))?;
        self.students
            .iter()
            .find(|s| s.id.to_string() == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    async fn set_student_status(
        &self,
        change: StudentStatusChange,
    ) -> Result<MessageResponse, AppError> {
        self.record(StudentCall::Status(change))?;
        Ok(MessageResponse::new("Student status changed successfully"))
    }
}

/// Token authenticator double that counts invocations.
///
/// Attaches `identity` and continues, or answers 401 when `identity` is `None`.
pub struct CountingAuthenticator {
    pub invocations: AtomicUsize,
    pub identity: Option<RequestIdentity>,
}

#[allow(dead_code)]
impl CountingAuthenticator {
    pub fn accepting(identity: RequestIdentity) -> Self {
        Self {
            invocations: AtomicUsize::new(0),
            identity: Some(identity),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            invocations: AtomicUsize::new(0),
            identity: None,
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenAuthenticator for CountingAuthenticator {
    async fn authenticate(&self, mut req: Request, next: Next) -> axum::response::Response {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match &self.identity {
            Some(identity) => {
                attach_identity(&mut req, identity.clone());
                next.run(req).await
            }
            None => AppError::unauthorized("Missing authorization header").into_response(),
        }
    }
}

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn test_state(
    students: Arc<dyn StudentService>,
    token_authenticator: Arc<dyn TokenAuthenticator>,
) -> AppState {
    AppState {
        service_auth: ServiceAuthConfig::new(Some(SERVICE_KEY.to_string())),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        students,
        token_authenticator,
    }
}

#[allow(dead_code)]
pub fn setup_test_app(
    students: Arc<dyn StudentService>,
    token_authenticator: Arc<dyn TokenAuthenticator>,
) -> Router {
    init_router(test_state(students, token_authenticator))
}

#[allow(dead_code)]
pub fn user_identity(id: &str) -> RequestIdentity {
    RequestIdentity {
        id: id.to_string(),
        role: registrar_auth::Role::Admin,
        kind: registrar_models::IdentityKind::User,
    }
}

#[allow(dead_code)]
pub fn sample_student(id: i64, name: &str) -> Student {
    let timestamp = Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap();
    Student {
        id,
        name: name.to_string(),
        email: format!("student{}@school.test", id),
        class_id: Some(5),
        class_name: Some("Grade 5".to_string()),
        section_id: Some(1),
        section_name: Some("A".to_string()),
        roll: Some(id as i32),
        phone: None,
        address: None,
        date_of_birth: None,
        gender: None,
        blood_group: None,
        guardian_name: None,
        guardian_phone: None,
        guardian_email: None,
        admission_date: None,
        status: "active".to_string(),
        reviewer_id: None,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
