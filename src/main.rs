use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use indicatif::ProgressBar;
use league_predict::analysis::evaluator::evaluate;
use league_predict::analysis::report::RunReport;
use league_predict::analysis::win_rate::{champion_win_rate, ChampionQuery};
use league_predict::config::Config;
use league_predict::data::dragon::fetch_catalog;
use league_predict::data::loader::{load_catalog, load_matches};
use league_predict::display::output::{
    display_error, display_evaluation, display_info, display_success, display_win_rate,
};
use league_predict::error::AppError;
use league_predict::features::encoder::{EncodingMode, FeatureEncoder};
use league_predict::model::forest::{ForestParams, RandomForest};
use league_predict::model::split::train_test_split;
use log::LevelFilter;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "League Predict")]
#[command(about = "Predict match winners from champion picks and report champion win rates", long_about = None)]
struct Args {
    /// Match dataset CSV (default: $LEAGUE_PREDICT_GAMES or games.csv)
    #[arg(short, long)]
    games: Option<PathBuf>,

    /// Champion catalog JSON (default: $LEAGUE_PREDICT_CHAMPIONS or champion_info.json)
    #[arg(short, long)]
    champions: Option<PathBuf>,

    /// Download the catalog from Data Dragon for this patch instead of reading a file
    #[arg(long, value_name = "VERSION", conflicts_with = "champions")]
    fetch_catalog: Option<String>,

    /// Random seed for the split and the forest
    #[arg(long)]
    seed: Option<u64>,

    /// Number of trees in the forest
    #[arg(short, long)]
    trees: Option<usize>,

    /// Maximum tree depth (default: unlimited)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Fraction of matches held out for evaluation
    #[arg(long)]
    test_size: Option<f64>,

    /// Number of top features to display
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// How champion picks become columns
    #[arg(long, value_enum)]
    encoding: Option<EncodingMode>,

    /// Champion to report a win rate for (prompted when omitted)
    #[arg(long)]
    champion: Option<String>,

    /// Match every champion whose name contains the query
    #[arg(long)]
    fuzzy: bool,

    /// Write a JSON run report (default location: ~/.league_predict/reports/)
    #[arg(long, value_name = "PATH")]
    report: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("LEAGUE_PREDICT_LOG", "warn"))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        let code = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<AppError>())
            .map(AppError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Load configuration
    let mut config = Config::from_env().context("reading configuration")?;
    if let Some(games) = args.games {
        config.games_path = games;
    }
    if let Some(champions) = args.champions {
        config.champions_path = champions;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(trees) = args.trees {
        config.n_trees = trees;
    }
    if let Some(test_size) = args.test_size {
        config.test_size = test_size;
    }
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if let Some(encoding) = args.encoding {
        config.encoding = encoding;
    }
    config.max_depth = args.max_depth;
    config.validate().context("reading configuration")?;

    // Step 1: Load catalog and matches
    let catalog = match &args.fetch_catalog {
        Some(version) => {
            display_info(&format!("Fetching champion catalog for patch {}...", version));
            fetch_catalog(version)
        }
        None => load_catalog(&config.champions_path),
    }
    .context("loading champion catalog")?;

    let matches = load_matches(&config.games_path).context("loading matches")?;
    display_success(&format!(
        "Loaded {} matches and {} champions",
        matches.len(),
        catalog.len()
    ));

    // Step 2: Encode picks
    let encoded = FeatureEncoder::new(config.encoding)
        .encode(&matches, &catalog)
        .context("encoding features")?;
    display_info(&format!(
        "Encoded {} features ({:?})",
        encoded.features.n_cols(),
        config.encoding
    ));

    // Step 3: Holdout split
    let split =
        train_test_split(&encoded, config.test_size, config.seed).context("splitting dataset")?;

    // Step 4: Fit the forest
    let params = ForestParams {
        n_trees: config.n_trees,
        max_depth: config.max_depth,
        seed: config.seed,
        ..ForestParams::default()
    };
    let pb = ProgressBar::new(params.n_trees as u64);
    pb.set_message("Fitting trees");
    let forest = RandomForest::fit_with_progress(
        &split.train.features,
        &split.train.labels,
        &params,
        || pb.inc(1),
    )
    .context("fitting forest")?;
    pb.finish_with_message("✓ Forest fitted");

    // Step 5: Evaluate
    let evaluation = evaluate(&forest, &split.test, config.top_k).context("evaluating model")?;
    display_evaluation(&evaluation);

    // Step 6: Champion win rate on the raw matches
    let champion = match args.champion {
        Some(name) => name,
        None => prompt_champion().context("reading champion name")?,
    };
    let query = if args.fuzzy {
        ChampionQuery::substring(&champion)
    } else {
        ChampionQuery::exact(&champion)
    };
    let win_rate = champion_win_rate(&query, &matches, &catalog);
    display_win_rate(&win_rate);

    if let Some(report_path) = args.report {
        let generated_at = Utc::now();
        let path = report_path.unwrap_or_else(|| RunReport::default_path(generated_at));
        let report = RunReport {
            generated_at,
            games_path: config.games_path.display().to_string(),
            n_matches: matches.len(),
            n_features: encoded.features.n_cols(),
            encoding: config.encoding,
            test_size: config.test_size,
            forest: params,
            evaluation,
            win_rate: win_rate.into(),
        };
        report.save(&path).context("writing run report")?;
        display_success(&format!("Report saved to {}", path.display()));
    }

    Ok(())
}

fn prompt_champion() -> Result<String, AppError> {
    print!("Enter a champion name: ");
    io::stdout()
        .flush()
        .map_err(|e| AppError::Io(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::Io(format!("Failed to read champion name: {}", e)))?;
    Ok(line.trim().to_string())
}
