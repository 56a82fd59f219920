use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A prior role listed on a candidate profile. Only `cargo` feeds the scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriorExperience {
    #[serde(rename = "cargo", default)]
    pub title: Option<String>,
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "periodo", default)]
    pub period: Option<String>,
}

/// A job seeker as stored by the product. Every scored field is optional:
/// absence means "cannot verify", never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CandidateProfile {
    #[serde(default)]
    pub id: Uuid,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "bairro", default)]
    pub neighborhood: Option<String>,
    #[serde(rename = "disponibilidade", default)]
    pub availability: Option<Vec<String>>,
    #[serde(rename = "habilidades_tecnicas", default)]
    pub technical_skills: Option<Vec<String>>,
    #[serde(rename = "habilidades_comportamentais", default)]
    pub behavioral_skills: Option<Vec<String>>,
    #[serde(rename = "experiencias", default)]
    pub experiences: Option<Vec<PriorExperience>>,
    #[serde(rename = "resumo", default)]
    pub summary: String,
}

impl CandidateProfile {
    /// Technical and behavioral skills chained, in that order.
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.technical_skills
            .iter()
            .flatten()
            .chain(self.behavioral_skills.iter().flatten())
    }

    pub fn prior_titles(&self) -> impl Iterator<Item = &str> {
        self.experiences
            .iter()
            .flatten()
            .filter_map(|e| e.title.as_deref())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub nome: String,
    pub bairro: Option<String>,
    pub disponibilidade: Option<Vec<String>>,
    pub habilidades_tecnicas: Option<Vec<String>>,
    pub habilidades_comportamentais: Option<Vec<String>>,
    pub experiencias: Option<Json<Vec<PriorExperience>>>,
    pub resumo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateProfile {
    fn from(row: CandidateRow) -> Self {
        CandidateProfile {
            id: row.id,
            name: row.nome,
            neighborhood: row.bairro,
            availability: row.disponibilidade,
            technical_skills: row.habilidades_tecnicas,
            behavioral_skills: row.habilidades_comportamentais,
            experiences: row.experiencias.map(|Json(e)| e),
            summary: row.resumo.unwrap_or_default(),
        }
    }
}
