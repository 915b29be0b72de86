use clap::Parser;
use screenmatch::io::load_image;
use screenmatch::{
    Located, MatchConfig, MatchResult, Matcher, PredictorConfig, RecordedPosition, Resolution,
    Target, TargetPos,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Locate a search image on a screenshot (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum Mode {
    /// Best match over the full screen.
    Best,
    /// Every match over the full screen.
    All,
    /// Best match inside the predicted area only.
    Predicted,
    /// Predicted area first, full screen as fallback.
    #[default]
    Locate,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    threshold: f32,
    color_check: bool,
    max_count: usize,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            threshold: cfg.threshold,
            color_check: cfg.color_check,
            max_count: cfg.max_count,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PredictConfigJson {
    deviation: f64,
    record_pos: Option<(f64, f64)>,
    record_resolution: Option<(usize, usize)>,
    target_pos: u8,
}

impl Default for PredictConfigJson {
    fn default() -> Self {
        Self {
            deviation: PredictorConfig::default().deviation,
            record_pos: None,
            record_resolution: None,
            target_pos: TargetPos::Mid as u8,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    source_path: String,
    search_path: String,
    output_path: Option<String>,
    mode: Mode,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
    predict: PredictConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: String::new(),
            search_path: String::new(),
            output_path: None,
            mode: Mode::default(),
            match_cfg: MatchConfigJson::default(),
            predict: PredictConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    center: [i64; 2],
    region: [[i64; 2]; 4],
    confidence: f32,
    point: [i64; 2],
}

impl From<Located> for MatchRecord {
    fn from(value: Located) -> Self {
        let center = value.result.center();
        let region = (*value.result.region().corners()).map(|p| [p.x, p.y]);
        Self {
            center: [center.x, center.y],
            region,
            confidence: value.result.confidence(),
            point: [value.point.x, value.point.y],
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    found: bool,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("screenmatch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.source_path.is_empty() || config.search_path.is_empty() {
        return Err("source_path and search_path must be set in the config".into());
    }

    let match_cfg = MatchConfig {
        threshold: config.match_cfg.threshold,
        color_check: config.match_cfg.color_check,
        max_count: config.match_cfg.max_count,
        parallel: config.match_cfg.parallel,
    };
    match_cfg.validate()?;
    let predict_cfg = PredictorConfig {
        deviation: config.predict.deviation,
    };
    predict_cfg.validate()?;
    let matcher = Matcher::new()
        .with_config(match_cfg)
        .with_predictor(predict_cfg);

    let source = load_image(&config.source_path)?;
    let search = load_image(&config.search_path)?;
    tracing::info!(
        source_w = source.width(),
        source_h = source.height(),
        search_w = search.width(),
        search_h = search.height(),
        "images loaded"
    );
    let record_pos = config
        .predict
        .record_pos
        .map(|(dx, dy)| RecordedPosition::new(dx, dy));
    let record_resolution = config
        .predict
        .record_resolution
        .map(|(w, h)| Resolution::new(w, h));

    let target_pos = TargetPos::from_index(config.predict.target_pos)?;
    let mut target = Target::new(search.view()).with_target_pos(target_pos);
    if let Some(pos) = record_pos {
        target = target.with_record(pos, record_resolution);
    }
    let at_target = |result: MatchResult| Located {
        result,
        point: result.target_point(target_pos),
    };

    let located: Vec<Located> = match config.mode {
        Mode::Best => matcher
            .match_template(source.view(), search.view())?
            .map(at_target)
            .into_iter()
            .collect(),
        Mode::All => target.locate_all(source.view(), &matcher)?,
        Mode::Predicted => matcher
            .match_in_predicted_area(source.view(), search.view(), record_pos, record_resolution)?
            .map(at_target)
            .into_iter()
            .collect(),
        Mode::Locate => target.locate(source.view(), &matcher)?.into_iter().collect(),
    };

    let output = Output {
        found: !located.is_empty(),
        matches: located.into_iter().map(MatchRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
