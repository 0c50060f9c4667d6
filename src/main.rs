use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fractaltree::config::{AppConfig, ConfigManager};
use fractaltree::engines::dna::{self, Genome};
use fractaltree::engines::growth::{ConsoleGrowthCallback, GrowthEngine};

#[derive(Parser, Debug)]
#[command(name = "fractaltree", version, about = "Grow fractal trees from a DNA strand")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the growth simulation and print the final stats.
    Grow {
        /// TOML config file; FRACTALTREE_* environment variables apply on top.
        #[arg(short, long, env = "FRACTALTREE_CONFIG")]
        config: Option<PathBuf>,
        /// Number of ticks to run (overrides the config).
        #[arg(short, long)]
        ticks: Option<u64>,
        /// Seed for a reproducible tree.
        #[arg(short, long)]
        seed: Option<u64>,
        /// DNA strand to grow from, compressed or not.
        #[arg(long)]
        dna: Option<String>,
        /// Stop as soon as every branch is fully grown or stopped.
        #[arg(long)]
        until_grown: bool,
        /// Write the final tree as JSON to this file.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print the DNA strand for the default genome plus overrides.
    Encode {
        /// Gene override as name=value; repeatable.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,
        /// Print the compressed share code instead of the full strand.
        #[arg(long)]
        compress: bool,
    },
    /// Print every gene held in a strand.
    Decode { strand: String },
    /// Run-length compress a strand.
    Compress { strand: String },
    /// Expand a compressed strand.
    Uncompress { strand: String },
    /// Print the gene schema manifest as JSON.
    Genes,
    /// Write the default configuration as TOML.
    InitConfig { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Grow {
            config,
            ticks,
            seed,
            dna,
            until_grown,
            snapshot,
        } => grow_command(config, ticks, seed, dna, until_grown, snapshot)?,
        Command::Encode { overrides, compress } => encode_command(&overrides, compress)?,
        Command::Decode { strand } => decode_command(&strand)?,
        Command::Compress { strand } => println!("{}", dna::compress(strand.trim())),
        Command::Uncompress { strand } => {
            println!("{}", dna::uncompress(strand.trim()).context("failed to uncompress strand")?)
        }
        Command::Genes => println!("{}", serde_json::to_string_pretty(&AppConfig::manifest())?),
        Command::InitConfig { path } => {
            ConfigManager::new()
                .save_to_file(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

fn grow_command(
    config_path: Option<PathBuf>,
    ticks: Option<u64>,
    seed: Option<u64>,
    dna: Option<String>,
    until_grown: bool,
    snapshot: Option<PathBuf>,
) -> Result<()> {
    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref())
        .context("failed to load configuration")?;
    manager
        .update(|config| {
            if let Some(ticks) = ticks {
                config.simulation.ticks = ticks;
            }
            if seed.is_some() {
                config.simulation.seed = seed;
            }
            if let Some(strand) = dna {
                config.dna.strand = Some(strand);
            }
            if until_grown {
                config.simulation.stop_when_grown = true;
            }
        })
        .context("invalid command-line overrides")?;

    let config = manager.get();
    let mut engine = GrowthEngine::from_config(&config)?;
    let callback = ConsoleGrowthCallback::new(config.simulation.progress_interval);
    let stats = engine.run(config.simulation.ticks, callback);

    println!("Age:          {}", stats.age);
    println!("Branches:     {}", stats.branch_count);
    println!("Total length: {:.1}", stats.total_length);
    println!("Generations:  {}", stats.max_generation);
    println!("Fully grown:  {}", stats.fully_grown);
    println!("DNA:          {}", engine.genome().compressed());

    if let Some(path) = snapshot {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &engine.snapshot())
            .context("failed to write snapshot")?;
        log::info!("snapshot written to {}", path.display());
    }

    Ok(())
}

fn encode_command(overrides: &[String], compress: bool) -> Result<()> {
    let mut genome = Genome::new();
    for entry in overrides {
        let Some((name, value)) = entry.split_once('=') else {
            bail!("override '{}' is not in name=value form", entry);
        };
        let value: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("value for '{}' is not an integer", name))?;
        genome.set_value(name.trim(), value)?;
    }

    if compress {
        println!("{}", genome.compressed());
    } else {
        println!("{}", genome.encode());
    }
    Ok(())
}

fn decode_command(strand: &str) -> Result<()> {
    let genome = Genome::from_strand(strand).context("failed to decode strand")?;
    for gene in genome.genes() {
        println!("{:<28} {}", gene.name(), gene.value());
    }
    Ok(())
}
