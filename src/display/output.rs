use crate::analysis::evaluator::{Evaluation, RankedFeature};
use crate::analysis::win_rate::WinRateReport;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "#")]
    rank: String,
    feature: String,
    importance: String,
}

#[derive(Tabled)]
struct SideRow {
    side: String,
    wins: String,
    picks: String,
    win_rate: String,
}

pub fn display_evaluation(evaluation: &Evaluation) {
    println!("\n{}", "🎯 MODEL EVALUATION".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    println!("Model Accuracy: {}", evaluation.accuracy);
    println!(
        "  {} of {} holdout matches predicted correctly",
        evaluation.correct.to_string().green(),
        evaluation.total
    );

    let c = &evaluation.confusion.counts;
    println!(
        "  Team 1 wins: {} called, {} missed | Team 2 wins: {} called, {} missed\n",
        c[0][0], c[0][1], c[1][1], c[1][0]
    );

    display_feature_importances(&evaluation.top_features);
}

pub fn display_feature_importances(features: &[RankedFeature]) {
    if features.is_empty() {
        return;
    }

    println!("{}", "Top Features".bold().yellow());

    let rows: Vec<FeatureRow> = features
        .iter()
        .map(|f| FeatureRow {
            rank: format!("#{}", f.rank),
            feature: f.name.clone(),
            importance: format!("{:.4}", f.importance),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_win_rate(report: &WinRateReport) {
    println!(
        "\n{}",
        format!("📊 WIN RATE: {}", report.query).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if report.is_empty() {
        display_warning(&format!(
            "No champion matches '{}'; reporting 0 picks",
            report.query
        ));
    } else if report.matched_names.len() > 1 {
        display_info(&format!("Matched {}", report.matched_names.join(", ")));
    }

    let rows = vec![
        side_row("Team 1", report.wins_team1, report.picks_team1),
        side_row("Team 2", report.wins_team2, report.picks_team2),
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("Team 1: Wins={}, Picks={}", report.wins_team1, report.picks_team1);
    println!("Team 2: Wins={}, Picks={}", report.wins_team2, report.picks_team2);

    let rate = report.win_rate();
    let rate_str = format!("{}", rate);
    let colored_rate = if report.picks() == 0 {
        rate_str.normal()
    } else if rate >= 0.5 {
        rate_str.green()
    } else {
        rate_str.red()
    };
    println!("{} {}: {}\n", "Win Rate for".bold(), report.query, colored_rate);
}

fn side_row(side: &str, wins: usize, picks: usize) -> SideRow {
    let win_rate = if picks == 0 {
        "-".to_string()
    } else {
        format!("{:.1}%", wins as f64 / picks as f64 * 100.0)
    };
    SideRow {
        side: side.to_string(),
        wins: wins.to_string(),
        picks: picks.to_string(),
        win_rate,
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
