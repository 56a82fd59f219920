use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::matching::compatibility::{CompatibilityResult, CompatibilityScorer};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;

/// Post-sort filters shared by both ranking directions.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RankingOptions {
    pub min_score: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankedCandidate {
    pub candidate_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub result: CompatibilityResult,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankedJob {
    pub job_id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "empresa")]
    pub company: String,
    pub result: CompatibilityResult,
}

/// Scores every candidate against `job`, best first. Ties keep input order.
pub fn rank_candidates(
    scorer: &dyn CompatibilityScorer,
    job: &JobPosting,
    candidates: &[CandidateProfile],
    options: RankingOptions,
) -> Vec<RankedCandidate> {
    let ranked = candidates
        .iter()
        .map(|candidate| RankedCandidate {
            candidate_id: candidate.id,
            name: candidate.name.clone(),
            result: scorer.score(candidate, job),
        })
        .collect();

    let ranked = finalize(ranked, options, |r| r.result.score_total);
    debug!(
        "Ranked {} of {} candidates for job {}",
        ranked.len(),
        candidates.len(),
        job.id
    );
    ranked
}

/// Scores every active job for `candidate`, best first. Paused and closed
/// postings are skipped.
pub fn rank_jobs(
    scorer: &dyn CompatibilityScorer,
    candidate: &CandidateProfile,
    jobs: &[JobPosting],
    options: RankingOptions,
) -> Vec<RankedJob> {
    let ranked = jobs
        .iter()
        .filter(|job| job.is_active())
        .map(|job| RankedJob {
            job_id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            result: scorer.score(candidate, job),
        })
        .collect();

    let ranked = finalize(ranked, options, |r| r.result.score_total);
    debug!(
        "Ranked {} of {} jobs for candidate {}",
        ranked.len(),
        jobs.len(),
        candidate.id
    );
    ranked
}

fn finalize<T>(mut ranked: Vec<T>, options: RankingOptions, score: impl Fn(&T) -> u8) -> Vec<T> {
    // sort_by_key is stable
    ranked.sort_by_key(|r| std::cmp::Reverse(score(r)));

    if let Some(min) = options.min_score {
        ranked.retain(|r| u32::from(score(r)) >= min);
    }
    if let Some(limit) = options.limit {
        ranked.truncate(limit);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStatus;

    /// Scores by the number of required skills the candidate lists verbatim.
    struct CountingScorer;

    impl CompatibilityScorer for CountingScorer {
        fn score(&self, profile: &CandidateProfile, job: &JobPosting) -> CompatibilityResult {
            let skills: Vec<&String> = profile.all_skills().collect();
            let hits = job
                .required_skills
                .iter()
                .filter(|s| skills.contains(s))
                .count();
            CompatibilityResult {
                score_total: (hits * 10) as u8,
                ..Default::default()
            }
        }

        fn backend(&self) -> &'static str {
            "counting"
        }
    }

    fn make_candidate(name: &str, skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            technical_skills: Some(skills.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn make_job(title: &str, status: JobStatus, skills: &[&str]) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Mercadinho da Praça".to_string(),
            neighborhood: "Taquara".to_string(),
            max_radius: "5km".to_string(),
            shift: "Manhã".to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_candidates_sorted_best_first() {
        let job = make_job("Repositor", JobStatus::Ativa, &["a", "b", "c"]);
        let candidates = vec![
            make_candidate("Um", &["a"]),
            make_candidate("Três", &["a", "b", "c"]),
            make_candidate("Dois", &["a", "b"]),
        ];
        let ranked = rank_candidates(&CountingScorer, &job, &candidates, RankingOptions::default());
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Três", "Dois", "Um"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let job = make_job("Repositor", JobStatus::Ativa, &["a"]);
        let candidates = vec![
            make_candidate("Primeiro", &["a"]),
            make_candidate("Sem", &[]),
            make_candidate("Segundo", &["a"]),
        ];
        let ranked = rank_candidates(&CountingScorer, &job, &candidates, RankingOptions::default());
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Primeiro", "Segundo", "Sem"]);
    }

    #[test]
    fn test_min_score_and_limit() {
        let job = make_job("Repositor", JobStatus::Ativa, &["a", "b"]);
        let candidates = vec![
            make_candidate("Zero", &[]),
            make_candidate("Dez", &["a"]),
            make_candidate("Vinte", &["a", "b"]),
            make_candidate("Vinte bis", &["b", "a"]),
        ];
        let options = RankingOptions {
            min_score: Some(10),
            limit: Some(2),
        };
        let ranked = rank_candidates(&CountingScorer, &job, &candidates, options);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.result.score_total == 20));
    }

    #[test]
    fn test_rank_jobs_skips_inactive_postings() {
        let candidate = make_candidate("Ana", &["caixa"]);
        let jobs = vec![
            make_job("Pausada", JobStatus::Pausada, &["caixa"]),
            make_job("Aberta sem match", JobStatus::Ativa, &["estoque"]),
            make_job("Encerrada", JobStatus::Encerrada, &["caixa"]),
            make_job("Aberta", JobStatus::Ativa, &["caixa"]),
        ];
        let ranked = rank_jobs(&CountingScorer, &candidate, &jobs, RankingOptions::default());
        let titles: Vec<&str> = ranked.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Aberta", "Aberta sem match"]);
    }

    #[test]
    fn test_empty_inputs_rank_to_empty() {
        let job = make_job("Repositor", JobStatus::Ativa, &[]);
        assert!(rank_candidates(&CountingScorer, &job, &[], RankingOptions::default()).is_empty());
        let candidate = make_candidate("Ana", &[]);
        assert!(rank_jobs(&CountingScorer, &candidate, &[], RankingOptions::default()).is_empty());
    }
}
