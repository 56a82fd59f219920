//! Compatibility scoring: a pluggable scorer that rates one candidate profile
//! against one job posting.
//!
//! Default: `WeightedCompatibilityScorer` (pure, synchronous, deterministic).
//! `AppState` holds an `Arc<dyn CompatibilityScorer>`, built at startup with
//! the distance table injected.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::distance::{NeighborhoodDistanceTable, UNKNOWN_DISTANCE_KM};
use crate::matching::skills::{has_skill, normalize_skills};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;

/// Shift names that satisfy any job shift.
const UNIVERSAL_SHIFTS: &[&str] = &["integral", "flexível", "qualquer"];
/// Shift names that satisfy a 12x36 rotation.
const ROTATION_SHIFTS: &[&str] = &["plantão", "escala"];
const ROTATION_JOB_SHIFT: &str = "12x36";

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Score plus the three explanation lists shown to the merchant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompatibilityResult {
    pub score_total: u8, // 0 – 100
    /// One entry per evaluated dimension, in evaluation order.
    #[serde(rename = "motivos")]
    pub reasons: Vec<String>,
    #[serde(rename = "pontos_fortes")]
    pub strengths: Vec<String>,
    #[serde(rename = "pontos_de_atencao")]
    pub concerns: Vec<String>,
}

/// Points awarded per dimension. The maxima sum to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityWeights {
    pub location: f64,
    pub availability: f64,
    pub skills: f64,
    pub experience: f64,
    /// Flat credit when a job lists no required skills.
    pub unconstrained_skills: f64,
}

pub const DEFAULT_WEIGHTS: CompatibilityWeights = CompatibilityWeights {
    location: 35.0,
    availability: 25.0,
    skills: 25.0,
    experience: 15.0,
    unconstrained_skills: 5.0,
};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers or
/// ranking. Carried in `AppState` as `Arc<dyn CompatibilityScorer>`.
pub trait CompatibilityScorer: Send + Sync {
    fn score(&self, profile: &CandidateProfile, job: &JobPosting) -> CompatibilityResult;

    /// Short label reported alongside results.
    fn backend(&self) -> &'static str;
}

/// Fixed-weight heuristic over location, availability, skills and experience.
pub struct WeightedCompatibilityScorer {
    distances: Arc<NeighborhoodDistanceTable>,
}

impl WeightedCompatibilityScorer {
    pub fn new(distances: Arc<NeighborhoodDistanceTable>) -> Self {
        Self { distances }
    }
}

impl CompatibilityScorer for WeightedCompatibilityScorer {
    fn score(&self, profile: &CandidateProfile, job: &JobPosting) -> CompatibilityResult {
        calculate_compatibility(&self.distances, profile, job)
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

/// Scores `profile` against `job`. Pure: the result depends only on the
/// arguments.
pub fn calculate_compatibility(
    distances: &NeighborhoodDistanceTable,
    profile: &CandidateProfile,
    job: &JobPosting,
) -> CompatibilityResult {
    compute_compatibility(distances, &DEFAULT_WEIGHTS, profile, job)
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Explanation {
    reasons: Vec<String>,
    strengths: Vec<String>,
    concerns: Vec<String>,
}

impl Explanation {
    fn favorable(&mut self, reason: String, strength: String) {
        self.reasons.push(reason);
        self.strengths.push(strength);
    }

    fn unfavorable(&mut self, reason: String, concern: String) {
        self.reasons.push(reason);
        self.concerns.push(concern);
    }
}

fn compute_compatibility(
    distances: &NeighborhoodDistanceTable,
    weights: &CompatibilityWeights,
    profile: &CandidateProfile,
    job: &JobPosting,
) -> CompatibilityResult {
    let mut explanation = Explanation::default();

    // Partial scores stay fractional until the final sum.
    let total = score_location(distances, weights, profile, job, &mut explanation)
        + score_availability(weights, profile, job, &mut explanation)
        + score_skills(weights, profile, job, &mut explanation)
        + score_experience(weights, profile, job, &mut explanation);

    CompatibilityResult {
        score_total: total.round().clamp(0.0, 100.0) as u8,
        reasons: explanation.reasons,
        strengths: explanation.strengths,
        concerns: explanation.concerns,
    }
}

fn score_location(
    distances: &NeighborhoodDistanceTable,
    weights: &CompatibilityWeights,
    profile: &CandidateProfile,
    job: &JobPosting,
    out: &mut Explanation,
) -> f64 {
    let Some(home) = profile
        .neighborhood
        .as_deref()
        .filter(|n| !n.trim().is_empty())
    else {
        out.unfavorable(
            "Localização não verificada: bairro não informado".to_string(),
            "Bairro não informado".to_string(),
        );
        return 0.0;
    };

    let distance = distances.distance_km(home, &job.neighborhood);
    let distance_text = if distance == UNKNOWN_DISTANCE_KM {
        format!(
            "Distância entre {home} e {} não cadastrada (considerada {UNKNOWN_DISTANCE_KM}km)",
            job.neighborhood
        )
    } else {
        format!("Mora a {distance}km")
    };

    match parse_radius_km(&job.max_radius) {
        Some(radius) if distance <= radius => {
            out.favorable(
                format!("{distance_text}, dentro do raio de {radius}km"),
                format!("Mora perto da vaga ({home})"),
            );
            weights.location
        }
        Some(radius) => {
            out.unfavorable(
                format!("{distance_text}, fora do raio de {radius}km"),
                format!("Mora fora do raio de {radius}km da vaga"),
            );
            0.0
        }
        None => {
            out.unfavorable(
                format!(
                    "{distance_text}, fora do raio (raio '{}' não reconhecido)",
                    job.max_radius
                ),
                "Raio máximo da vaga não pôde ser verificado".to_string(),
            );
            0.0
        }
    }
}

/// Leading integer of a radius such as `"5km"` or `" 10 km"`. Anything
/// without a numeric prefix is `None` and never satisfies the radius.
pub fn parse_radius_km(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn score_availability(
    weights: &CompatibilityWeights,
    profile: &CandidateProfile,
    job: &JobPosting,
    out: &mut Explanation,
) -> f64 {
    let job_shift = job.shift.to_lowercase();
    let shifts: Vec<String> = profile
        .availability
        .iter()
        .flatten()
        .map(|s| s.to_lowercase())
        .collect();

    let lists = |names: &[&str]| shifts.iter().any(|s| names.contains(&s.as_str()));

    let matched = shifts.contains(&job_shift)
        || lists(UNIVERSAL_SHIFTS)
        || (job_shift.contains(ROTATION_JOB_SHIFT) && lists(ROTATION_SHIFTS));

    if matched {
        out.favorable(
            format!("Disponível para o turno {}", job.shift),
            format!("Disponibilidade compatível com o turno {}", job.shift),
        );
        weights.availability
    } else if shifts.is_empty() {
        out.unfavorable(
            "Disponibilidade de turno não informada".to_string(),
            format!("Não informou disponibilidade para o turno {}", job.shift),
        );
        0.0
    } else {
        out.unfavorable(
            format!("Sem disponibilidade para o turno {}", job.shift),
            format!("Turno {} fora da disponibilidade informada", job.shift),
        );
        0.0
    }
}

fn score_skills(
    weights: &CompatibilityWeights,
    profile: &CandidateProfile,
    job: &JobPosting,
    out: &mut Explanation,
) -> f64 {
    if job.required_skills.is_empty() {
        out.reasons
            .push("Vaga sem requisitos obrigatórios de habilidade".to_string());
        return weights.unconstrained_skills;
    }

    let required = normalize_skills(&job.required_skills);
    let candidate_skills = normalize_skills(profile.all_skills());

    let mut matched = 0usize;
    for (skill, label) in required.iter().zip(&job.required_skills) {
        if has_skill(skill, &candidate_skills) {
            matched += 1;
            out.strengths.push(format!("Possui a habilidade: {label}"));
        } else {
            out.concerns.push(format!("Não comprovou a habilidade: {label}"));
        }
    }

    let total = required.len();
    out.reasons.push(format!(
        "Atende {matched}/{total} requisitos obrigatórios"
    ));

    (matched as f64 / total as f64) * weights.skills
}

fn score_experience(
    weights: &CompatibilityWeights,
    profile: &CandidateProfile,
    job: &JobPosting,
    out: &mut Explanation,
) -> f64 {
    let titles: Vec<String> = profile.prior_titles().map(str::to_lowercase).collect();

    if titles.is_empty() {
        out.unfavorable(
            "Nenhuma experiência anterior informada".to_string(),
            "Sem experiência anterior registrada".to_string(),
        );
        return 0.0;
    }

    let minimum = job
        .minimum_experience
        .as_deref()
        .filter(|m| !m.trim().is_empty());

    // Without a stated minimum, any word of the job title counts,
    // including short connectives such as "de".
    let (matched, expected) = match minimum {
        Some(min) => {
            let min_lower = min.to_lowercase();
            let matched = titles.iter().any(|t| t.contains(&min_lower));
            (matched, min)
        }
        None => {
            let title_lower = job.title.to_lowercase();
            let keywords: Vec<&str> = title_lower.split_whitespace().collect();
            let matched = titles
                .iter()
                .any(|t| keywords.iter().any(|k| t.contains(*k)));
            (matched, job.title.as_str())
        }
    };

    if matched {
        out.favorable(
            format!("Experiência anterior compatível com {expected}"),
            "Experiência prévia na função".to_string(),
        );
        weights.experience
    } else {
        out.unfavorable(
            format!("Experiência anterior não corresponde a {expected}"),
            format!("Sem experiência comprovada como {expected}"),
        );
        0.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
