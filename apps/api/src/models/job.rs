use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle tag of a posting. The scorer ignores it; ranking for candidates
/// only considers `Ativa`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Ativa,
    Pausada,
    Encerrada,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Ativa => "ativa",
            JobStatus::Pausada => "pausada",
            JobStatus::Encerrada => "encerrada",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ativa" => Ok(JobStatus::Ativa),
            "pausada" => Ok(JobStatus::Pausada),
            "encerrada" => Ok(JobStatus::Encerrada),
            other => Err(anyhow!("unknown job status '{other}'")),
        }
    }
}

/// An open position posted by a merchant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    #[serde(default)]
    pub id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "empresa", default)]
    pub company: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    /// Maximum commute radius as entered by the merchant, e.g. `"5km"`.
    #[serde(rename = "raio_max_km")]
    pub max_radius: String,
    #[serde(rename = "turno")]
    pub shift: String,
    #[serde(rename = "requisitos_obrigatorios", default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "requisitos_desejaveis", default)]
    pub desired_skills: Vec<String>,
    #[serde(rename = "experiencia_minima", default)]
    pub minimum_experience: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
}

impl JobPosting {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Ativa
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub titulo: String,
    pub empresa: String,
    pub bairro: String,
    pub raio_max_km: String,
    pub turno: String,
    pub requisitos_obrigatorios: Vec<String>,
    pub requisitos_desejaveis: Vec<String>,
    pub experiencia_minima: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for JobPosting {
    type Error = anyhow::Error;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(|e| e.context(format!("job {} has an invalid status", row.id)))?;

        Ok(JobPosting {
            id: row.id,
            title: row.titulo,
            company: row.empresa,
            neighborhood: row.bairro,
            max_radius: row.raio_max_km,
            shift: row.turno,
            required_skills: row.requisitos_obrigatorios,
            desired_skills: row.requisitos_desejaveis,
            minimum_experience: row.experiencia_minima,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_row(status: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            titulo: "Atendente de Balcão".to_string(),
            empresa: "Padaria Central".to_string(),
            bairro: "Freguesia".to_string(),
            raio_max_km: "5km".to_string(),
            turno: "Manhã".to_string(),
            requisitos_obrigatorios: vec!["Atendimento".to_string()],
            requisitos_desejaveis: vec![],
            experiencia_minima: None,
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("Ativa".parse::<JobStatus>().unwrap(), JobStatus::Ativa);
        assert_eq!(" pausada ".parse::<JobStatus>().unwrap(), JobStatus::Pausada);
        assert!("arquivada".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        assert!(JobPosting::try_from(make_row("rascunho")).is_err());
    }

    #[test]
    fn test_row_conversion_keeps_fields() {
        let job = JobPosting::try_from(make_row("encerrada")).unwrap();
        assert_eq!(job.status, JobStatus::Encerrada);
        assert!(!job.is_active());
        assert_eq!(job.max_radius, "5km");
        assert_eq!(job.required_skills, vec!["Atendimento"]);
    }

    #[test]
    fn test_deserialize_defaults_status_to_active() {
        let job: JobPosting = serde_json::from_value(json!({
            "titulo": "Repositor",
            "bairro": "Taquara",
            "raio_max_km": "3km",
            "turno": "Noite"
        }))
        .unwrap();
        assert!(job.is_active());
        assert!(job.required_skills.is_empty());
        assert!(job.minimum_experience.is_none());
    }
}
