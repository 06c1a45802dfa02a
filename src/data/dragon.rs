use super::models::{CatalogFile, ChampionCatalog};
use crate::error::AppError;

const DATA_DRAGON_URL: &str = "https://ddragon.leagueoflegends.com/cdn";

pub fn champion_url(version: &str) -> String {
    format!("{}/{}/data/en_US/champion.json", DATA_DRAGON_URL, version)
}

/// Downloads the champion catalog for a Data Dragon patch version.
pub fn fetch_catalog(version: &str) -> Result<ChampionCatalog, AppError> {
    let url = champion_url(version);
    log::info!("Fetching champion catalog from {}", url);

    let body = ureq::get(&url)
        .set("User-Agent", "league_predict/0.1.0")
        .call()
        .map_err(|e| AppError::Http(e.to_string()))?
        .into_string()
        .map_err(|e| AppError::Http(e.to_string()))?;

    let file: CatalogFile =
        serde_json::from_str(&body).map_err(|e| AppError::Json(e.to_string()))?;
    ChampionCatalog::from_file(file)
}
