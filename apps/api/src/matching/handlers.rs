//! Axum route handlers for the compatibility API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::compatibility::CompatibilityResult;
use crate::matching::ranking::{
    rank_candidates, rank_jobs, RankedCandidate, RankedJob, RankingOptions,
};
use crate::matching::store;
use crate::models::candidate::CandidateProfile;
use crate::models::job::{JobPosting, JobStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    #[serde(rename = "candidato")]
    pub candidate: CandidateProfile,
    #[serde(rename = "vaga")]
    pub job: JobPosting,
}

#[derive(Debug, Serialize)]
pub struct CompatibilityResponse {
    pub result: CompatibilityResult,
    pub scorer_backend: String,
}

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateRankingResponse {
    pub vaga_id: Uuid,
    pub candidatos: Vec<RankedCandidate>,
}

#[derive(Debug, Serialize)]
pub struct JobRankingResponse {
    pub candidato_id: Uuid,
    pub vagas: Vec<RankedJob>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/compatibility
///
/// Scores an ad-hoc profile/job pair without touching the database.
pub async fn handle_compatibility(
    State(state): State<AppState>,
    Json(request): Json<CompatibilityRequest>,
) -> Result<Json<CompatibilityResponse>, AppError> {
    let result = state.scorer.score(&request.candidate, &request.job);

    Ok(Json(CompatibilityResponse {
        result,
        scorer_backend: state.scorer.backend().to_string(),
    }))
}

/// GET /api/v1/vagas?status=ativa
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<JobStatus>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let jobs = store::list_jobs(&state.db, status).await?;
    Ok(Json(jobs))
}

/// GET /api/v1/vagas/:id/ranking
///
/// Every stored candidate scored against one job, best first. Backs the
/// merchant's applicant list.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(options): Query<RankingOptions>,
) -> Result<Json<CandidateRankingResponse>, AppError> {
    validate_options(&options)?;

    let job = store::get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vaga {job_id} not found")))?;
    let candidates = store::list_candidates(&state.db).await?;

    let ranked = rank_candidates(state.scorer.as_ref(), &job, &candidates, options);
    info!(
        "Ranked {} candidates for job {job_id} ({})",
        ranked.len(),
        job.title
    );

    Ok(Json(CandidateRankingResponse {
        vaga_id: job_id,
        candidatos: ranked,
    }))
}

/// GET /api/v1/candidatos/:id/vagas
///
/// Active jobs scored for one candidate, best first.
pub async fn handle_rank_jobs(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Query(options): Query<RankingOptions>,
) -> Result<Json<JobRankingResponse>, AppError> {
    validate_options(&options)?;

    let candidate = store::get_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidato {candidate_id} not found")))?;
    let jobs = store::list_jobs(&state.db, Some(JobStatus::Ativa)).await?;

    let ranked = rank_jobs(state.scorer.as_ref(), &candidate, &jobs, options);
    info!(
        "Ranked {} active jobs for candidate {candidate_id}",
        ranked.len()
    );

    Ok(Json(JobRankingResponse {
        candidato_id: candidate_id,
        vagas: ranked,
    }))
}

fn validate_options(options: &RankingOptions) -> Result<(), AppError> {
    match options.min_score {
        Some(min) if min > 100 => Err(AppError::Validation(format!(
            "min_score must be between 0 and 100, got {min}"
        ))),
        _ => Ok(()),
    }
}
