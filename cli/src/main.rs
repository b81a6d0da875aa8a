use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use dice::api::{evaluate_request, find_preset, Presets, RollReport, RollRequest};
use dice::Die;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Clone, Default)]
struct RollFlags {
    /// Roll the first term twice and keep the higher result
    #[arg(long)]
    advantage: bool,
    /// Roll the first term twice and keep the lower result (cancels --advantage)
    #[arg(long)]
    disadvantage: bool,
    /// Natural d20 result at or above which the roll is a critical hit
    #[arg(long)]
    crit_hit: Option<i32>,
    /// Natural d20 result at or below which the roll is a critical miss
    #[arg(long)]
    crit_miss: Option<i32>,
    /// Detect criticals with the default 20/1 thresholds
    #[arg(long)]
    crits: bool,
    /// Re-draw natural 1s once
    #[arg(long)]
    lucky: bool,
    /// RNG seed for determinism
    #[arg(long)]
    seed: Option<u64>,
    /// Number of rolls
    #[arg(long, default_value_t = 1)]
    times: u32,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll dice notation, e.g. `1d20+5 "1d4 (Bless)" -1d6`
    Roll {
        #[arg(required = true, allow_hyphen_values = true)]
        notation: Vec<String>,
        #[command(flatten)]
        flags: RollFlags,
    },
    /// Roll against a Difficulty Class (meet or beat)
    Check {
        #[arg(required = true, allow_hyphen_values = true)]
        notation: Vec<String>,
        /// Difficulty Class to beat (>=)
        #[arg(long, allow_hyphen_values = true)]
        dc: i32,
        #[command(flatten)]
        flags: RollFlags,
    },
    /// Print the canonical form of a notation
    Parse {
        #[arg(allow_hyphen_values = true)]
        notation: String,
        /// Reject malformed numbers instead of reading them as zero
        #[arg(long)]
        strict: bool,
        /// Print the parsed fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Roll a named preset
    Preset {
        name: String,
        /// Presets file (YAML, or JSON by extension); defaults to the builtins
        #[arg(long)]
        file: Option<PathBuf>,
        /// RNG seed for determinism
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List preset names
    Presets {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "dice")]
#[command(about = "Tabletop dice roller")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Serialize)]
struct ParsedDie {
    notation: String,
    count: u32,
    sides: u32,
    modifier: i32,
    lucky: bool,
    debuff: bool,
    source: Option<String>,
}

impl From<&Die> for ParsedDie {
    fn from(die: &Die) -> Self {
        Self {
            notation: die.to_string(),
            count: die.count(),
            sides: die.sides(),
            modifier: die.modifier(),
            lucky: die.is_lucky(),
            debuff: die.is_debuff(),
            source: die.source().map(str::to_string),
        }
    }
}

fn to_request(notation: Vec<String>, flags: &RollFlags, dc: Option<i32>) -> RollRequest {
    RollRequest {
        dice: notation,
        advantage: flags.advantage,
        disadvantage: flags.disadvantage,
        critical_hit: flags.crit_hit,
        critical_miss: flags.crit_miss,
        allow_criticals: flags.crits,
        lucky: flags.lucky,
        dc,
        seed: flags.seed,
        repeat: Some(flags.times),
    }
}

fn load_presets(file: Option<&Path>) -> anyhow::Result<Presets> {
    match file {
        Some(path) => dice::api::load_presets(path),
        None => dice::content::builtin_presets(),
    }
}

fn print_report(report: &RollReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for line in &report.rolls {
        match (line.passed, report.dc) {
            (Some(passed), Some(dc)) => println!(
                "{} vs DC {} => {}",
                line.text,
                dc,
                if passed { "SUCCESS" } else { "FAIL" }
            ),
            _ => println!("{}", line.text),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dice::logging::init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { notation, flags } => {
            let report = evaluate_request(&to_request(notation, &flags, None))?;
            print_report(&report, flags.json)?;
        }
        Cmd::Check {
            notation,
            dc,
            flags,
        } => {
            let report = evaluate_request(&to_request(notation, &flags, Some(dc)))?;
            print_report(&report, flags.json)?;
        }
        Cmd::Parse {
            notation,
            strict,
            json,
        } => {
            let die = if strict {
                Die::try_parse(&notation).with_context(|| format!("cannot parse {notation:?}"))?
            } else {
                Die::parse(&notation)
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&ParsedDie::from(&die))?);
            } else {
                println!("{die}");
            }
        }
        Cmd::Preset {
            name,
            file,
            seed,
            json,
        } => {
            let presets = load_presets(file.as_deref())?;
            let mut req = find_preset(&presets, &name)
                .cloned()
                .ok_or_else(|| anyhow!("preset '{}' not found", name))?;
            if seed.is_some() {
                req.seed = seed;
            }
            tracing::info!(preset = %name, "rolling preset");
            print_report(&evaluate_request(&req)?, json)?;
        }
        Cmd::Presets { file } => {
            for (name, req) in load_presets(file.as_deref())? {
                println!("{name}: {}", req.dice.join(" + "));
            }
        }
    }
    Ok(())
}
