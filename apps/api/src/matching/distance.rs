//! Neighborhood distance lookup used by the location dimension.
//!
//! The table is built once at startup (built-in defaults or a JSON file) and
//! shared read-only behind an `Arc`. Any pair it does not know resolves to
//! [`UNKNOWN_DISTANCE_KM`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Distance reported for unlisted neighborhoods or pairs.
pub const UNKNOWN_DISTANCE_KM: u32 = 99;

const DEFAULT_DISTANCES: &[(&str, &str, u32)] = &[
    ("Freguesia", "Pechincha", 2),
    ("Freguesia", "Taquara", 4),
    ("Freguesia", "Tanque", 5),
    ("Freguesia", "Anil", 3),
    ("Freguesia", "Curicica", 7),
    ("Pechincha", "Taquara", 3),
    ("Pechincha", "Tanque", 4),
    ("Pechincha", "Anil", 4),
    ("Pechincha", "Curicica", 6),
    ("Taquara", "Tanque", 2),
    ("Taquara", "Anil", 6),
    ("Taquara", "Curicica", 4),
    ("Tanque", "Anil", 7),
    ("Tanque", "Curicica", 5),
    ("Anil", "Curicica", 9),
];

#[derive(Debug, Error)]
pub enum DistanceTableError {
    #[error("failed to read distance table: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid distance table JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("negative distance between '{from}' and '{to}'")]
    NegativeDistance { from: String, to: String },

    #[error("conflicting distances between '{from}' and '{to}'")]
    Conflicting { from: String, to: String },
}

/// File format: `{"Freguesia": {"Pechincha": 2, ...}, ...}`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct DistanceFile(HashMap<String, HashMap<String, i64>>);

/// Symmetric km lookup between neighborhoods. Keys are trimmed and
/// lower-cased; a listed neighborhood is 0 km from itself.
#[derive(Debug, Clone, Default)]
pub struct NeighborhoodDistanceTable {
    distances: HashMap<String, HashMap<String, u32>>,
}

impl NeighborhoodDistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six Jacarepaguá neighborhoods served by the product.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(from, to, km) in DEFAULT_DISTANCES {
            table.insert(from, to, km);
        }
        table
    }

    pub fn from_json_str(json: &str) -> Result<Self, DistanceTableError> {
        let DistanceFile(raw) = serde_json::from_str(json)?;

        let mut table = Self::new();
        for (from, destinations) in &raw {
            table.register(from);
            for (to, &km) in destinations {
                let km = u32::try_from(km).map_err(|_| DistanceTableError::NegativeDistance {
                    from: from.clone(),
                    to: to.clone(),
                })?;
                // Both directions may be listed, but they must agree.
                if table.listed_km(from, to).is_some_and(|existing| existing != km) {
                    return Err(DistanceTableError::Conflicting {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
                table.insert(from, to, km);
            }
        }
        Ok(table)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DistanceTableError> {
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&contents)?;
        info!(
            "Loaded distance table for {} neighborhoods from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Records `km` in both directions.
    pub fn insert(&mut self, from: &str, to: &str, km: u32) {
        let (from, to) = (normalize(from), normalize(to));
        self.distances
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), km);
        self.distances.entry(to).or_default().insert(from, km);
    }

    fn listed_km(&self, from: &str, to: &str) -> Option<u32> {
        self.distances
            .get(&normalize(from))
            .and_then(|row| row.get(&normalize(to)))
            .copied()
    }

    fn register(&mut self, neighborhood: &str) {
        self.distances.entry(normalize(neighborhood)).or_default();
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn distance_km(&self, from: &str, to: &str) -> u32 {
        let (from, to) = (normalize(from), normalize(to));
        let Some(row) = self.distances.get(&from) else {
            return UNKNOWN_DISTANCE_KM;
        };
        if from == to {
            return 0;
        }
        row.get(&to).copied().unwrap_or(UNKNOWN_DISTANCE_KM)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_has_six_neighborhoods() {
        let table = NeighborhoodDistanceTable::builtin();
        assert_eq!(table.len(), 6);
        assert_eq!(table.distance_km("Curicica", "Curicica"), 0);
    }

    #[test]
    fn test_builtin_is_symmetric() {
        let table = NeighborhoodDistanceTable::builtin();
        for &(from, to, km) in DEFAULT_DISTANCES {
            assert_eq!(table.distance_km(from, to), km);
            assert_eq!(table.distance_km(to, from), km);
        }
    }

    #[test]
    fn test_curicica_to_freguesia_is_seven() {
        let table = NeighborhoodDistanceTable::builtin();
        assert_eq!(table.distance_km("Curicica", "Freguesia"), 7);
    }

    #[test]
    fn test_self_distance_is_zero_for_listed() {
        let table = NeighborhoodDistanceTable::builtin();
        assert_eq!(table.distance_km("Freguesia", "Freguesia"), 0);
        assert_eq!(
            table.distance_km("Barra", "Barra"),
            UNKNOWN_DISTANCE_KM,
            "unlisted neighborhood is unknown even to itself"
        );
    }

    #[test]
    fn test_unknown_pair_defaults_to_sentinel() {
        let table = NeighborhoodDistanceTable::builtin();
        assert_eq!(table.distance_km("Freguesia", "Copacabana"), 99);
        assert_eq!(table.distance_km("Copacabana", "Freguesia"), 99);
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let table = NeighborhoodDistanceTable::builtin();
        assert_eq!(table.distance_km("  freguesia ", "PECHINCHA"), 2);
    }

    #[test]
    fn test_json_one_sided_entries_are_mirrored() {
        let table =
            NeighborhoodDistanceTable::from_json_str(r#"{"Centro": {"Lapa": 1}}"#).unwrap();
        assert_eq!(table.distance_km("Lapa", "Centro"), 1);
        assert_eq!(table.distance_km("Centro", "Centro"), 0);
    }

    #[test]
    fn test_json_conflicting_directions_are_rejected() {
        let json = r#"{"Centro": {"Lapa": 2}, "Lapa": {"Centro": 9}}"#;
        for _ in 0..50 {
            let err = NeighborhoodDistanceTable::from_json_str(json).unwrap_err();
            assert!(matches!(err, DistanceTableError::Conflicting { .. }));
        }
    }

    #[test]
    fn test_json_agreeing_directions_load() {
        let json = r#"{"Centro": {"Lapa": 2}, "LAPA": {"centro": 2}}"#;
        let table = NeighborhoodDistanceTable::from_json_str(json).unwrap();
        assert_eq!(table.distance_km("Centro", "Lapa"), 2);
        assert_eq!(table.distance_km("Lapa", "Centro"), 2);
    }

    #[test]
    fn test_json_negative_distance_is_rejected() {
        let err = NeighborhoodDistanceTable::from_json_str(r#"{"Centro": {"Lapa": -1}}"#)
            .unwrap_err();
        assert!(matches!(err, DistanceTableError::NegativeDistance { .. }));
    }

    #[test]
    fn test_json_malformed_is_parse_error() {
        let err = NeighborhoodDistanceTable::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, DistanceTableError::Parse(_)));
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Anil": {{"Gardênia": 2}}}}"#).unwrap();

        let table = NeighborhoodDistanceTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.distance_km("gardênia", "anil"), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NeighborhoodDistanceTable::from_json_file(Path::new("/nonexistent/table.json"))
            .unwrap_err();
        assert!(matches!(err, DistanceTableError::Io(_)));
    }
}
