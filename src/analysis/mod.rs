pub mod evaluator;
pub mod report;
pub mod win_rate;
