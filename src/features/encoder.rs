//! One-hot encoding of champion picks.
//!
//! Every match becomes one row: the four first-event flags passed through,
//! followed by indicator columns for the champions each team picked.

use super::matrix::FeatureMatrix;
use crate::data::models::{ChampionCatalog, MatchRecord, TEAM_SIZE};
use crate::error::AppError;
use std::collections::{BTreeSet, HashMap};

pub const FLAG_COLUMNS: [&str; 4] = ["firstDragon", "firstBlood", "firstTower", "firstBaron"];

/// How champion picks are laid out as columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingMode {
    /// One block per (team, slot): `t1_champ3_Aatrox`. Same champion in a
    /// different slot is a different column.
    #[default]
    PerSlot,
    /// One block per team: `t1_Aatrox`, valued by how often the team picked it.
    Team,
}

/// Encoded feature rows plus their raw winner labels, row-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDataset {
    pub features: FeatureMatrix,
    pub labels: Vec<u8>,
}

impl EncodedDataset {
    pub fn new(features: FeatureMatrix, labels: Vec<u8>) -> Result<Self, AppError> {
        if features.n_rows() != labels.len() {
            return Err(AppError::Data(format!(
                "{} feature rows but {} labels",
                features.n_rows(),
                labels.len()
            )));
        }
        Ok(EncodedDataset { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn select_rows(&self, indices: &[usize]) -> EncodedDataset {
        EncodedDataset {
            features: self.features.select_rows(indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

// A group of champion slots sharing one set of indicator columns.
struct Block {
    team: usize,
    slots: Vec<usize>,
    prefix: String,
    offset: usize,
    columns: HashMap<String, usize>,
}

pub struct FeatureEncoder {
    mode: EncodingMode,
}

impl FeatureEncoder {
    pub fn new(mode: EncodingMode) -> Self {
        FeatureEncoder { mode }
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn encode(
        &self,
        matches: &[MatchRecord],
        catalog: &ChampionCatalog,
    ) -> Result<EncodedDataset, AppError> {
        let resolved = resolve_names(matches, catalog)?;
        let mut blocks = self.blocks();

        // Categories per block, sorted by name
        let mut names: Vec<String> = FLAG_COLUMNS.iter().map(|s| s.to_string()).collect();
        for block in &mut blocks {
            let side = block.team - 1;
            let slots = &block.slots;
            let observed: BTreeSet<&str> = resolved
                .iter()
                .flat_map(|teams| slots.iter().map(move |&s| teams[side][s]))
                .collect();
            block.offset = names.len();
            for (i, champion) in observed.into_iter().enumerate() {
                block.columns.insert(champion.to_string(), block.offset + i);
                names.push(format!("{}_{}", block.prefix, champion));
            }
        }

        let n_cols = names.len();
        let mut values = vec![0.0f32; matches.len() * n_cols];
        for (row, (record, teams)) in matches.iter().zip(&resolved).enumerate() {
            let cells = &mut values[row * n_cols..(row + 1) * n_cols];
            for (cell, flag) in cells.iter_mut().zip(record.flags()) {
                *cell = f32::from(flag);
            }
            for block in &blocks {
                for &slot in &block.slots {
                    let champion = teams[block.team - 1][slot];
                    // every resolved name was registered above
                    if let Some(&col) = block.columns.get(champion) {
                        cells[col] += 1.0;
                    }
                }
            }
        }

        log::debug!(
            "Encoded {} matches into {} columns ({:?})",
            matches.len(),
            n_cols,
            self.mode
        );

        let labels = matches.iter().map(|m| m.winner).collect();
        EncodedDataset::new(FeatureMatrix::new(names, values)?, labels)
    }

    fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        for team in 1..=2 {
            match self.mode {
                EncodingMode::PerSlot => {
                    for slot in 0..TEAM_SIZE {
                        blocks.push(Block {
                            team,
                            slots: vec![slot],
                            prefix: format!("t{}_champ{}", team, slot + 1),
                            offset: 0,
                            columns: HashMap::new(),
                        });
                    }
                }
                EncodingMode::Team => blocks.push(Block {
                    team,
                    slots: (0..TEAM_SIZE).collect(),
                    prefix: format!("t{}", team),
                    offset: 0,
                    columns: HashMap::new(),
                }),
            }
        }
        blocks
    }
}

type TeamNames<'a> = [[&'a str; TEAM_SIZE]; 2];

/// Maps every champion id to its name, failing on the first unknown id.
fn resolve_names<'a>(
    matches: &[MatchRecord],
    catalog: &'a ChampionCatalog,
) -> Result<Vec<TeamNames<'a>>, AppError> {
    matches
        .iter()
        .enumerate()
        .map(|(record, m)| -> Result<TeamNames<'a>, AppError> {
            let mut teams: TeamNames<'a> = [[""; TEAM_SIZE]; 2];
            for (side, names) in teams.iter_mut().enumerate() {
                for (slot, &champion_id) in m.team(side + 1).iter().enumerate() {
                    names[slot] = catalog
                        .name(champion_id)
                        .ok_or(AppError::Lookup { record, champion_id })?;
                }
            }
            Ok(teams)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ChampionCatalog {
        ChampionCatalog::from_pairs([
            (1, "Annie"),
            (2, "Olaf"),
            (3, "Galio"),
            (4, "Twisted Fate"),
            (5, "Xin Zhao"),
            (6, "Urgot"),
            (7, "LeBlanc"),
            (8, "Vladimir"),
            (9, "Fiddlesticks"),
            (10, "Kayle"),
            (266, "Aatrox"),
        ])
    }

    fn record(team1: [u32; 5], team2: [u32; 5], winner: u8) -> MatchRecord {
        MatchRecord {
            team1,
            team2,
            first_dragon: 1,
            first_blood: 2,
            first_tower: 0,
            first_baron: 1,
            winner,
        }
    }

    fn sample() -> Vec<MatchRecord> {
        vec![
            record([1, 2, 3, 4, 5], [6, 7, 8, 9, 10], 1),
            record([266, 2, 3, 4, 5], [6, 7, 8, 9, 1], 2),
            record([1, 266, 3, 4, 5], [6, 7, 8, 9, 10], 1),
        ]
    }

    #[test]
    fn per_slot_columns_follow_flags_then_teams() {
        let encoded = FeatureEncoder::new(EncodingMode::PerSlot)
            .encode(&sample(), &catalog())
            .unwrap();
        let names = encoded.features.names();
        assert_eq!(&names[..4], &FLAG_COLUMNS.map(String::from)[..]);
        // t1 slot 1 saw Aatrox and Annie, sorted
        assert_eq!(names[4], "t1_champ1_Aatrox");
        assert_eq!(names[5], "t1_champ1_Annie");
        assert_eq!(names[6], "t1_champ2_Aatrox");
        assert_eq!(names.last().map(String::as_str), Some("t2_champ5_Kayle"));
        // 4 flags + t1 (2+2+1+1+1) + t2 (1+1+1+1+2)
        assert_eq!(encoded.features.n_cols(), 4 + 7 + 6);
    }

    #[test]
    fn same_champion_in_other_slot_is_another_column() {
        let encoded = FeatureEncoder::new(EncodingMode::PerSlot)
            .encode(&sample(), &catalog())
            .unwrap();
        let slot1 = encoded.features.column_index("t1_champ1_Aatrox").unwrap();
        let slot2 = encoded.features.column_index("t1_champ2_Aatrox").unwrap();
        assert_eq!(encoded.features.get(1, slot1), 1.0);
        assert_eq!(encoded.features.get(1, slot2), 0.0);
        assert_eq!(encoded.features.get(2, slot1), 0.0);
        assert_eq!(encoded.features.get(2, slot2), 1.0);
    }

    #[test]
    fn each_team_sets_five_indicator_cells() {
        let encoded = FeatureEncoder::new(EncodingMode::PerSlot)
            .encode(&sample(), &catalog())
            .unwrap();
        let names = encoded.features.names();
        for row in encoded.features.rows() {
            for team in ["t1_", "t2_"] {
                let set: f32 = row
                    .iter()
                    .zip(names)
                    .filter(|(_, n)| n.starts_with(team))
                    .map(|(v, _)| *v)
                    .sum();
                assert_eq!(set, 5.0);
            }
            assert!(row[4..].iter().all(|&v| v == 0.0 || v == 1.0));
        }
    }

    #[test]
    fn team_mode_collapses_slots() {
        let encoded = FeatureEncoder::new(EncodingMode::Team)
            .encode(&sample(), &catalog())
            .unwrap();
        let aatrox = encoded.features.column_index("t1_Aatrox").unwrap();
        assert_eq!(encoded.features.get(1, aatrox), 1.0);
        assert_eq!(encoded.features.get(2, aatrox), 1.0);
        assert_eq!(encoded.features.get(0, aatrox), 0.0);
        // t1 saw 6 distinct names, t2 saw 6
        assert_eq!(encoded.features.n_cols(), 4 + 6 + 6);
    }

    #[test]
    fn flags_and_labels_pass_through() {
        let encoded = FeatureEncoder::new(EncodingMode::PerSlot)
            .encode(&sample(), &catalog())
            .unwrap();
        assert_eq!(encoded.len(), 3);
        assert_eq!(encoded.labels, vec![1, 2, 1]);
        assert_eq!(&encoded.features.row(0)[..4], &[1.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_champion_is_lookup_error() {
        let mut matches = sample();
        matches[2].team2[3] = 9999;
        let err = FeatureEncoder::new(EncodingMode::PerSlot)
            .encode(&matches, &catalog())
            .unwrap_err();
        match err {
            AppError::Lookup { record, champion_id } => {
                assert_eq!(record, 2);
                assert_eq!(champion_id, 9999);
            }
            other => panic!("expected lookup error, got {:?}", other),
        }
    }
}
