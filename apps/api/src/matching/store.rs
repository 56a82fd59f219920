//! Read-only access to stored jobs (`vagas`) and candidate profiles
//! (`candidatos`). Writes belong to the product's admin panels.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateProfile, CandidateRow};
use crate::models::job::{JobPosting, JobRow, JobStatus};

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<Option<JobPosting>, AppError> {
    let row: Option<JobRow> = sqlx::query_as("SELECT * FROM vagas WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(JobPosting::try_from).transpose()?)
}

/// Newest first; `status` narrows to a single lifecycle tag.
pub async fn list_jobs(
    pool: &PgPool,
    status: Option<JobStatus>,
) -> Result<Vec<JobPosting>, AppError> {
    let rows: Vec<JobRow> = match status {
        Some(status) => {
            sqlx::query_as("SELECT * FROM vagas WHERE status = $1 ORDER BY created_at DESC")
                .bind(status.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM vagas ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        }
    };

    let jobs = rows
        .into_iter()
        .map(JobPosting::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(jobs)
}

pub async fn get_candidate(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Option<CandidateProfile>, AppError> {
    let row: Option<CandidateRow> = sqlx::query_as("SELECT * FROM candidatos WHERE id = $1")
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(CandidateProfile::from))
}

/// Oldest first, so equal scores rank earlier applicants ahead.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateProfile>, AppError> {
    let rows: Vec<CandidateRow> =
        sqlx::query_as("SELECT * FROM candidatos ORDER BY created_at ASC")
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(CandidateProfile::from).collect())
}
