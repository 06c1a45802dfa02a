use crate::data::models::{ChampionCatalog, MatchRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// How a query string is matched against champion names. Both ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    #[default]
    Exact,
    /// Any champion whose name contains the query, so "Lee" also finds "Lee Sin".
    Substring,
}

#[derive(Debug, Clone)]
pub struct ChampionQuery {
    pub name: String,
    pub mode: MatchMode,
}

impl ChampionQuery {
    pub fn exact(name: &str) -> Self {
        ChampionQuery {
            name: name.trim().to_string(),
            mode: MatchMode::Exact,
        }
    }

    pub fn substring(name: &str) -> Self {
        ChampionQuery {
            name: name.trim().to_string(),
            mode: MatchMode::Substring,
        }
    }

    /// Catalog names this query selects, in name order.
    pub fn matched_names<'a>(&self, catalog: &'a ChampionCatalog) -> BTreeSet<&'a str> {
        match self.mode {
            MatchMode::Exact => catalog.find_name(&self.name).into_iter().collect(),
            MatchMode::Substring => {
                let query = self.name.to_lowercase();
                if query.is_empty() {
                    return BTreeSet::new();
                }
                catalog
                    .names()
                    .filter(|name| name.to_lowercase().contains(&query))
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRateReport {
    pub query: String,
    pub matched_names: Vec<String>,
    pub picks_team1: usize,
    pub wins_team1: usize,
    pub picks_team2: usize,
    pub wins_team2: usize,
}

impl WinRateReport {
    pub fn picks(&self) -> usize {
        self.picks_team1 + self.picks_team2
    }

    pub fn wins(&self) -> usize {
        self.wins_team1 + self.wins_team2
    }

    /// Zero when the champion was never picked.
    pub fn win_rate(&self) -> f64 {
        if self.picks() == 0 {
            0.0
        } else {
            self.wins() as f64 / self.picks() as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matched_names.is_empty()
    }
}

/// Counts picks and wins per side straight from the raw matches.
pub fn champion_win_rate(
    query: &ChampionQuery,
    matches: &[MatchRecord],
    catalog: &ChampionCatalog,
) -> WinRateReport {
    let matched_names = query.matched_names(catalog);
    let mut report = WinRateReport {
        query: query.name.clone(),
        matched_names: matched_names.iter().map(|n| n.to_string()).collect(),
        picks_team1: 0,
        wins_team1: 0,
        picks_team2: 0,
        wins_team2: 0,
    };

    if matched_names.is_empty() {
        log::warn!("No champion matches '{}' ({:?})", query.name, query.mode);
        return report;
    }

    let picked = |team: &[u32]| {
        team.iter()
            .filter_map(|&id| catalog.name(id))
            .any(|name| matched_names.contains(name))
    };

    for record in matches {
        if picked(&record.team1) {
            report.picks_team1 += 1;
            if record.winner == 1 {
                report.wins_team1 += 1;
            }
        }
        if picked(&record.team2) {
            report.picks_team2 += 1;
            if record.winner == 2 {
                report.wins_team2 += 1;
            }
        }
    }

    log::debug!(
        "{}: {} wins / {} picks over {} matches",
        query.name,
        report.wins(),
        report.picks(),
        matches.len()
    );

    report
}
