use plsim::{ScenarioConfig, Scenario};
use plsim::run_2d;
use plsim::bench_rule_engine;

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`; built-in defaults when omitted
    #[arg(short, long)]
    file: Option<String>,

    /// Override the preset named in the scenario (nuclei, nuclei2, alive, fireflies)
    #[arg(short, long)]
    preset: Option<String>,

    /// Seed for the initial particle positions
    #[arg(long)]
    seed: Option<u64>,

    /// Time the rule engine instead of opening the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_rule_engine();
        return Ok(());
    }

    let mut scenario_cfg = match &args.file {
        Some(file_name) => load_scenario_from_yaml(file_name)?,
        None => ScenarioConfig::default(),
    };

    // command line wins over the file
    if let Some(preset) = args.preset {
        scenario_cfg.preset = Some(preset);
        scenario_cfg.rules = None;
    }
    if let Some(seed) = args.seed {
        scenario_cfg.parameters.seed = Some(seed);
    }

    let scenario = Scenario::build_scenario(&scenario_cfg).context("invalid scenario")?;
    run_2d(scenario);

    Ok(())
}
