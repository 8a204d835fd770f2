//! Student service boundary and its PostgreSQL implementation.
//!
//! Handlers only ever see [`StudentService`]. All rules about which fields
//! are required, which filters and sort fields exist and which statuses are
//! allowed live behind it, in [`PgStudentService`].

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use registrar_core::AppError;

use crate::metrics::track_student_status_change;
use crate::modules::students::model::{
    MessageResponse, Student, StudentListQuery, StudentPayload, StudentStatus,
    StudentStatusChange, StudentUpdate,
};

#[async_trait]
pub trait StudentService: Send + Sync {
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>, AppError>;

    async fn add_student(&self, payload: StudentPayload) -> Result<MessageResponse, AppError>;

    async fn update_student(&self, update: StudentUpdate) -> Result<MessageResponse, AppError>;

    async fn get_student_detail(&self, id: &str) -> Result<Student, AppError>;

    async fn set_student_status(
        &self,
        change: StudentStatusChange,
    ) -> Result<MessageResponse, AppError>;
}

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

const STUDENT_SELECT: &str = r#"
    SELECT s.id, s.name, s.email,
           s.class_id, c.name AS class_name,
           s.section_id, sec.name AS section_name,
           s.roll, s.phone, s.address, s.date_of_birth, s.gender, s.blood_group,
           s.guardian_name, s.guardian_phone, s.guardian_email, s.admission_date,
           s.status, s.reviewer_id, s.created_at, s.updated_at
    FROM students s
    LEFT JOIN classes c ON c.id = s.class_id
    LEFT JOIN sections sec ON sec.id = s.section_id
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    Id,
    Name,
    Email,
    Roll,
    AdmissionDate,
    CreatedAt,
}

impl SortField {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "email" => Some(SortField::Email),
            "roll" => Some(SortField::Roll),
            "admissionDate" => Some(SortField::AdmissionDate),
            "createdAt" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            SortField::Id => "s.id",
            SortField::Name => "s.name",
            SortField::Email => "s.email",
            SortField::Roll => "s.roll",
            SortField::AdmissionDate => "s.admission_date",
            SortField::CreatedAt => "s.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// [`StudentListQuery`] after parsing.
#[derive(Debug, PartialEq)]
struct ListOptions {
    user_id: Option<i64>,
    class_id: Option<i64>,
    section_id: Option<i64>,
    name: Option<String>,
    sort: SortField,
    order: SortOrder,
    page: i64,
    limit: i64,
}

impl ListOptions {
    fn from_query(query: &StudentListQuery) -> Result<Self, AppError> {
        let sort = match non_blank(&query.sort_by) {
            None => SortField::Id,
            Some(value) => SortField::parse(value).ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("Unsupported sort field: {}", value))
            })?,
        };

        let order = match non_blank(&query.order).map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Unsupported sort order: {}",
                    other
                )));
            }
        };

        let page = parse_number("page", &query.page)?.unwrap_or(1).max(1);
        let limit = parse_number("limit", &query.limit)?
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        if (page - 1).checked_mul(limit).is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "page is out of range: {}",
                page
            )));
        }

        Ok(Self {
            user_id: parse_number("userId", &query.user_id)?,
            class_id: parse_number("classId", &query.class_id)?,
            section_id: parse_number("sectionId", &query.section_id)?,
            name: non_blank(&query.name).map(str::to_string),
            sort,
            order,
            page,
            limit,
        })
    }

    /// Row offset; `from_query` guarantees it fits in an `i64`.
    fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &str, value: &Option<String>) -> Result<Option<i64>, AppError> {
    non_blank(value)
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                AppError::bad_request(anyhow::anyhow!("{} must be a number, got {}", field, v))
            })
        })
        .transpose()
}

fn parse_student_id(id: &str) -> Result<i64, AppError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid student id: {}", id)))
}

/// Escapes `%`, `_` and `\` so a name fragment matches literally in `ILIKE`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn require_field<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    non_blank(value)
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("{} is required", field)))
}

fn reject_blank(field: &str, value: &Option<String>) -> Result<(), AppError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::bad_request(anyhow::anyhow!(
            "{} cannot be empty",
            field
        ))),
        _ => Ok(()),
    }
}

fn map_write_error(err: sqlx::Error, email: Option<&str>) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(format!(
                "Student with email {} already exists",
                email.unwrap_or_default()
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow::anyhow!("Class or section does not exist"));
        }
    }
    AppError::database(anyhow::Error::from(err))
}

pub struct PgStudentService {
    db: PgPool,
}

impl PgStudentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentService for PgStudentService {
    #[instrument(skip(self))]
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>, AppError> {
        let options = ListOptions::from_query(&query)?;

        let mut builder = QueryBuilder::<Postgres>::new(STUDENT_SELECT);
        builder.push(" WHERE 1 = 1");

        if let Some(user_id) = options.user_id {
            builder.push(" AND s.id = ").push_bind(user_id);
        }
        if let Some(class_id) = options.class_id {
            builder.push(" AND s.class_id = ").push_bind(class_id);
        }
        if let Some(section_id) = options.section_id {
            builder.push(" AND s.section_id = ").push_bind(section_id);
        }
        if let Some(name) = &options.name {
            builder
                .push(" AND s.name ILIKE ")
                .push_bind(format!("%{}%", escape_like(name)));
        }

        builder
            .push(" ORDER BY ")
            .push(options.sort.column())
            .push(" ")
            .push(options.order.keyword())
            .push(", s.id ASC LIMIT ")
            .push_bind(options.limit)
            .push(" OFFSET ")
            .push_bind(options.offset());

        let students = builder
            .build_query_as::<Student>()
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(self, payload))]
    async fn add_student(&self, payload: StudentPayload) -> Result<MessageResponse, AppError> {
        let name = require_field("name", &payload.name)?;
        let email = require_field("email", &payload.email)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO students (
                name, email, class_id, section_id, roll, phone, address, date_of_birth,
                gender, blood_group, guardian_name, guardian_phone, guardian_email,
                admission_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'active')
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(payload.class_id)
        .bind(payload.section_id)
        .bind(payload.roll)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(payload.date_of_birth)
        .bind(&payload.gender)
        .bind(&payload.blood_group)
        .bind(&payload.guardian_name)
        .bind(&payload.guardian_phone)
        .bind(&payload.guardian_email)
        .bind(payload.admission_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_write_error(e, Some(email)))?;

        info!(student_id = id, "Student added");
        Ok(MessageResponse::new("Student added successfully"))
    }

    #[instrument(skip(self, update), fields(user_id = %update.user_id))]
    async fn update_student(&self, update: StudentUpdate) -> Result<MessageResponse, AppError> {
        let id = parse_student_id(&update.user_id)?;
        let fields = &update.fields;
        reject_blank("name", &fields.name)?;
        reject_blank("email", &fields.email)?;

        let result = sqlx::query(
            r#"
            UPDATE students SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                class_id = COALESCE($3, class_id),
                section_id = COALESCE($4, section_id),
                roll = COALESCE($5, roll),
                phone = COALESCE($6, phone),
                address = COALESCE($7, address),
                date_of_birth = COALESCE($8, date_of_birth),
                gender = COALESCE($9, gender),
                blood_group = COALESCE($10, blood_group),
                guardian_name = COALESCE($11, guardian_name),
                guardian_phone = COALESCE($12, guardian_phone),
                guardian_email = COALESCE($13, guardian_email),
                admission_date = COALESCE($14, admission_date),
                updated_at = NOW()
            WHERE id = $15
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(fields.class_id)
        .bind(fields.section_id)
        .bind(fields.roll)
        .bind(&fields.phone)
        .bind(&fields.address)
        .bind(fields.date_of_birth)
        .bind(&fields.gender)
        .bind(&fields.blood_group)
        .bind(&fields.guardian_name)
        .bind(&fields.guardian_phone)
        .bind(&fields.guardian_email)
        .bind(fields.admission_date)
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| map_write_error(e, fields.email.as_deref()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(MessageResponse::new("Student updated successfully"))
    }

    #[instrument(skip(self))]
    async fn get_student_detail(&self, id: &str) -> Result<Student, AppError> {
        let id = parse_student_id(id)?;

        let student = sqlx::query_as::<_, Student>(&format!("{} WHERE s.id = $1", STUDENT_SELECT))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn set_student_status(
        &self,
        change: StudentStatusChange,
    ) -> Result<MessageResponse, AppError> {
        let status: StudentStatus = require_field("status", &change.status)?
            .parse()
            .map_err(|e: String| AppError::bad_request(anyhow::anyhow!(e)))?;
        let id = parse_student_id(&change.user_id)?;

        let result = sqlx::query(
            r#"
            UPDATE students
            SET status = $1, reviewer_id = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(status.as_str())
        .bind(&change.reviewer_id)
        .bind(id)
        .execute(&self.db)
        .await
        .context("Failed to update student status")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        track_student_status_change(status.as_str());
        info!(
            student_id = id,
            reviewer_id = %change.reviewer_id,
            status = status.as_str(),
            "Student status changed"
        );

        Ok(MessageResponse::new("Student status changed successfully"))
    }
}
