use super::models::{CatalogFile, ChampionCatalog, MatchRecord, MatchRow};
use crate::error::AppError;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let matches = read_matches(file)?;
    log::info!("Loaded {} matches from {}", matches.len(), path.display());
    Ok(matches)
}

pub fn read_matches<R: Read>(reader: R) -> Result<Vec<MatchRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut matches = Vec::new();
    for result in reader.deserialize::<MatchRow>() {
        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            AppError::Data(format!("games row at line {}: {}", line, e))
        })?;
        matches.push(MatchRecord::from(row));
    }
    Ok(matches)
}

pub fn load_catalog(path: &Path) -> Result<ChampionCatalog, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let catalog = parse_catalog(&content)?;
    log::info!("Loaded {} champions from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn parse_catalog(content: &str) -> Result<ChampionCatalog, AppError> {
    let file: CatalogFile = serde_json::from_str(content)
        .map_err(|e| AppError::Json(format!("Failed to parse champion catalog: {}", e)))?;
    ChampionCatalog::from_file(file)
}
