use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TEAM_SIZE: usize = 5;

/// Which side won a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Team1,
    Team2,
}

impl Winner {
    pub fn label(self) -> u8 {
        match self {
            Winner::Team1 => 1,
            Winner::Team2 => 2,
        }
    }

    /// Zero-based class index used inside the trees.
    pub fn index(self) -> usize {
        match self {
            Winner::Team1 => 0,
            Winner::Team2 => 1,
        }
    }
}

impl TryFrom<u8> for Winner {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Winner::Team1),
            2 => Ok(Winner::Team2),
            other => Err(AppError::Data(format!(
                "winner must be 1 or 2, found {}",
                other
            ))),
        }
    }
}

// games.csv row; unknown columns (gameId, seasonId, ...) are ignored
#[derive(Debug, Deserialize)]
pub(crate) struct MatchRow {
    pub t1_champ1id: u32,
    pub t1_champ2id: u32,
    pub t1_champ3id: u32,
    pub t1_champ4id: u32,
    pub t1_champ5id: u32,
    pub t2_champ1id: u32,
    pub t2_champ2id: u32,
    pub t2_champ3id: u32,
    pub t2_champ4id: u32,
    pub t2_champ5id: u32,
    #[serde(rename = "firstDragon")]
    pub first_dragon: u8,
    #[serde(rename = "firstBlood")]
    pub first_blood: u8,
    #[serde(rename = "firstTower")]
    pub first_tower: u8,
    #[serde(rename = "firstBaron")]
    pub first_baron: u8,
    pub winner: u8,
}

/// One historical game as read from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub team1: [u32; TEAM_SIZE],
    pub team2: [u32; TEAM_SIZE],
    pub first_dragon: u8,
    pub first_blood: u8,
    pub first_tower: u8,
    pub first_baron: u8,
    /// Raw label, expected to be 1 or 2.
    pub winner: u8,
}

impl MatchRecord {
    /// Champion ids for team 1 or team 2.
    pub fn team(&self, side: usize) -> &[u32; TEAM_SIZE] {
        debug_assert!(side == 1 || side == 2, "team side must be 1 or 2, got {}", side);
        if side == 1 {
            &self.team1
        } else {
            &self.team2
        }
    }

    /// First-event flags in feature column order.
    pub fn flags(&self) -> [u8; 4] {
        [
            self.first_dragon,
            self.first_blood,
            self.first_tower,
            self.first_baron,
        ]
    }
}

impl From<MatchRow> for MatchRecord {
    fn from(row: MatchRow) -> Self {
        MatchRecord {
            team1: [
                row.t1_champ1id,
                row.t1_champ2id,
                row.t1_champ3id,
                row.t1_champ4id,
                row.t1_champ5id,
            ],
            team2: [
                row.t2_champ1id,
                row.t2_champ2id,
                row.t2_champ3id,
                row.t2_champ4id,
                row.t2_champ5id,
            ],
            first_dragon: row.first_dragon,
            first_blood: row.first_blood,
            first_tower: row.first_tower,
            first_baron: row.first_baron,
            winner: row.winner,
        }
    }
}

// champion_info.json / Data Dragon champion.json
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFile {
    pub data: HashMap<String, CatalogEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// Read-only mapping from champion id to champion name.
#[derive(Debug, Clone, Default)]
pub struct ChampionCatalog {
    names: HashMap<u32, String>,
}

impl ChampionCatalog {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        ChampionCatalog {
            names: pairs.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }

    pub(crate) fn from_file(file: CatalogFile) -> Result<Self, AppError> {
        let mut names = HashMap::with_capacity(file.data.len());
        for (entry_key, entry) in file.data {
            // Data Dragon keys entries by champion slug and keeps the numeric id in `key`
            let id = entry_key
                .parse::<u32>()
                .ok()
                .or_else(|| entry.key.as_deref().and_then(|k| k.parse().ok()))
                .ok_or_else(|| {
                    AppError::Data(format!(
                        "catalog entry '{}' has no numeric champion id",
                        entry_key
                    ))
                })?;
            names.insert(id, entry.name);
        }
        Ok(ChampionCatalog { names })
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Case-insensitive exact lookup, returning the catalog's spelling.
    pub fn find_name(&self, query: &str) -> Option<&str> {
        let query = query.trim().to_lowercase();
        self.names
            .values()
            .find(|name| name.to_lowercase() == query)
            .map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_rejects_out_of_domain_labels() {
        assert_eq!(Winner::try_from(1).unwrap(), Winner::Team1);
        assert_eq!(Winner::try_from(2).unwrap(), Winner::Team2);
        assert!(matches!(Winner::try_from(0), Err(AppError::Data(_))));
        assert!(matches!(Winner::try_from(3), Err(AppError::Data(_))));
    }

    #[test]
    fn catalog_accepts_numeric_and_data_dragon_keys() {
        let json = r#"{"data": {
            "266": {"name": "Aatrox", "title": "the Darkin Blade"},
            "LeeSin": {"name": "Lee Sin", "key": "64"}
        }}"#;
        let file: CatalogFile = serde_json::from_str(json).unwrap();
        let catalog = ChampionCatalog::from_file(file).unwrap();
        assert_eq!(catalog.name(266), Some("Aatrox"));
        assert_eq!(catalog.name(64), Some("Lee Sin"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn catalog_entry_without_id_is_data_error() {
        let json = r#"{"data": {"Mystery": {"name": "Mystery"}}}"#;
        let file: CatalogFile = serde_json::from_str(json).unwrap();
        assert!(matches!(ChampionCatalog::from_file(file), Err(AppError::Data(_))));
    }

    #[test]
    fn team_returns_each_side() {
        let record = MatchRecord {
            team1: [1, 2, 3, 4, 5],
            team2: [6, 7, 8, 9, 10],
            first_dragon: 0,
            first_blood: 0,
            first_tower: 0,
            first_baron: 0,
            winner: 1,
        };
        assert_eq!(record.team(1), &[1, 2, 3, 4, 5]);
        assert_eq!(record.team(2), &[6, 7, 8, 9, 10]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "team side must be 1 or 2")]
    fn team_rejects_zero_side() {
        let record = MatchRecord {
            team1: [1; 5],
            team2: [2; 5],
            first_dragon: 0,
            first_blood: 0,
            first_tower: 0,
            first_baron: 0,
            winner: 2,
        };
        record.team(0);
    }

    #[test]
    fn find_name_ignores_case() {
        let catalog = ChampionCatalog::from_pairs([(64, "Lee Sin"), (266, "Aatrox")]);
        assert_eq!(catalog.find_name("lee sin"), Some("Lee Sin"));
        assert_eq!(catalog.find_name("Lee"), None);
    }
}
