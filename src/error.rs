use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Champion id {champion_id} (record {record}) is not in the champion catalog")]
    Lookup { record: usize, champion_id: u32 },

    #[error("Malformed data: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parsing error: {0}")]
    Json(String),
}

impl AppError {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Io(_) => 2,
            AppError::Lookup { .. } => 3,
            AppError::Data(_) => 4,
            AppError::Config(_) => 5,
            AppError::Http(_) | AppError::Json(_) => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let codes = [
            AppError::Io("x".into()).exit_code(),
            AppError::Lookup { record: 0, champion_id: 1 }.exit_code(),
            AppError::Data("x".into()).exit_code(),
            AppError::Config("x".into()).exit_code(),
            AppError::Http("x".into()).exit_code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn lookup_message_names_record_and_id() {
        let msg = AppError::Lookup { record: 7, champion_id: 999 }.to_string();
        assert!(msg.contains("999"));
        assert!(msg.contains("record 7"));
    }
}
