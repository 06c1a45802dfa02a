use super::evaluator::Evaluation;
use super::win_rate::WinRateReport;
use crate::error::AppError;
use crate::features::encoder::EncodingMode;
use crate::model::forest::ForestParams;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a run produced, as written by `--report`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub games_path: String,
    pub n_matches: usize,
    pub n_features: usize,
    pub encoding: EncodingMode,
    pub test_size: f64,
    pub forest: ForestParams,
    pub evaluation: Evaluation,
    pub win_rate: WinRateSummary,
}

#[derive(Debug, Serialize)]
pub struct WinRateSummary {
    #[serde(flatten)]
    pub counts: WinRateReport,
    pub win_rate: f64,
}

impl From<WinRateReport> for WinRateSummary {
    fn from(counts: WinRateReport) -> Self {
        let win_rate = counts.win_rate();
        WinRateSummary { counts, win_rate }
    }
}

impl RunReport {
    pub fn default_path(generated_at: DateTime<Utc>) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".league_predict")
            .join("reports")
            .join(format!("{}.json", generated_at.format("%Y%m%dT%H%M%SZ")))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Json(format!("Failed to serialize report: {}", e)))?;

        fs::write(path, json)
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        log::info!("Wrote run report to {}", path.display());
        Ok(())
    }
}
