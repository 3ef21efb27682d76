//! Hex Snowflake CLI - Grow a snowflake and save it as a PNG.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use hex_snowflake::{
    compute::{Automaton, Grid, GrowthStats},
    render,
    schema::{GrowthConfig, Seed},
};

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    /// Print a default config and seed as JSON.
    Example,
    /// Grow a snowflake from parameters given inline.
    Positional(GrowthConfig),
    /// Grow a snowflake from JSON files.
    Files {
        config: PathBuf,
        seed: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Error parsing {name} ({value:?}): {reason}")]
    BadValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("hex-snowflake");

    let command = parse_args(args.get(1..).unwrap_or_default()).unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!();
        print_usage(program);
        std::process::exit(1);
    });

    let (config, seed) = match command {
        Command::Example => {
            print_example_config();
            return;
        }
        Command::Positional(config) => (config, Seed::default()),
        Command::Files { config, seed } => {
            load_run(&config, seed.as_deref()).unwrap_or_else(|e| {
                eprintln!("{}", e);
                std::process::exit(1);
            })
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!(
        "settings:\t A={:.4} B={:.4} Y={:.4} PP={:.4} PM={:.4} L={} size={} noise={:?}",
        config.diffusion,
        config.background,
        config.accretion,
        config.noise_scale,
        config.noise_amplitude,
        config.iterations,
        config.size,
        seed.pattern
    );

    let mut grid = Grid::from_seed(&seed, &config).unwrap_or_else(|e| {
        eprintln!("Error initializing grid: {}", e);
        std::process::exit(1);
    });
    let mut automaton = Automaton::new(&config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let steps = config.iterations;
    let start = Instant::now();

    for i in 0..steps {
        automaton.step(&mut grid);

        // Print progress every 10%
        if (i + 1) % (steps / 10).max(1) == 0 {
            let stats = GrowthStats::from_grid(&grid);
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "simulation:\t {}/{}: frozen={}, receptive={}, mass={:.4}, {:.1} steps/s",
                i + 1,
                steps,
                stats.frozen_cells,
                stats.receptive_cells,
                stats.total_mass,
                (i + 1) as f32 / elapsed
            );
        }
    }

    let stats = GrowthStats::from_grid(&grid);
    log::info!(
        "Finished {} steps in {:.2}s: {} frozen cells",
        stats.generation,
        start.elapsed().as_secs_f32(),
        stats.frozen_cells
    );

    let filename = output_filename(&config);
    if let Err(e) = render::save_png(&grid, &filename) {
        eprintln!("Error saving {}: {}", filename.display(), e);
        std::process::exit(1);
    }
    println!("saved result:\t {}", filename.display());
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <A> <B> <Y> <PP> <PM> <L> [size]", program);
    eprintln!("       {} --config <config.json> [--seed <seed.json>]", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Grow a snowflake on a hexagonal lattice.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  A     Diffusion coefficient");
    eprintln!("  B     Background coldness");
    eprintln!("  Y     Accretion per step for receptive cells");
    eprintln!("  PP    Noise coordinate scale");
    eprintln!("  PM    Noise amplitude");
    eprintln!("  L     Number of steps");
    eprintln!("  size  Grid size (even, default: 800)");
    eprintln!();
    eprintln!("Without --seed, the noise pattern comes from <config>.seed.json when");
    eprintln!("that file exists, otherwise Perlin noise is used.");
}

/// Parse everything after the program name.
fn parse_args(args: &[String]) -> Result<Command, CliError> {
    match args.first().map(String::as_str) {
        Some("--example") if args.len() == 1 => Ok(Command::Example),
        Some("--example") => Err(CliError::Usage(format!(
            "Unexpected argument after --example: {:?}",
            args[1]
        ))),
        Some("--config") => parse_file_args(args),
        Some(flag) if flag.starts_with("--") => {
            Err(CliError::Usage(format!("Unknown option {:?}", flag)))
        }
        _ if args.len() == 6 || args.len() == 7 => {
            parse_positional(args).map(Command::Positional)
        }
        _ => Err(CliError::Usage(format!(
            "Expected 6 or 7 positional arguments, got {}",
            args.len()
        ))),
    }
}

fn parse_file_args(args: &[String]) -> Result<Command, CliError> {
    let mut config = None;
    let mut seed = None;
    let mut rest = args.iter();

    while let Some(flag) = rest.next() {
        let slot = match flag.as_str() {
            "--config" => &mut config,
            "--seed" => &mut seed,
            other => {
                return Err(CliError::Usage(format!("Unexpected argument {:?}", other)));
            }
        };
        let value = rest
            .next()
            .ok_or_else(|| CliError::Usage(format!("{} needs a file path", flag)))?;
        if slot.replace(PathBuf::from(value)).is_some() {
            return Err(CliError::Usage(format!("{} given more than once", flag)));
        }
    }

    let config = config.ok_or_else(|| CliError::Usage("--config is required".into()))?;
    Ok(Command::Files { config, seed })
}

fn parse_positional(args: &[String]) -> Result<GrowthConfig, CliError> {
    fn parse<T>(args: &[String], idx: usize, name: &'static str) -> Result<T, CliError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        args[idx].parse().map_err(|e: T::Err| CliError::BadValue {
            name,
            value: args[idx].clone(),
            reason: e.to_string(),
        })
    }

    let size = if args.len() > 6 {
        parse(args, 6, "size")?
    } else {
        GrowthConfig::default().size
    };

    Ok(GrowthConfig {
        size,
        diffusion: parse(args, 0, "A")?,
        background: parse(args, 1, "B")?,
        accretion: parse(args, 2, "Y")?,
        noise_scale: parse(args, 3, "PP")?,
        noise_amplitude: parse(args, 4, "PM")?,
        iterations: parse(args, 5, "L (a non-negative integer)")?,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config, then the seed: an explicit `--seed` file wins over the
/// `<config>.seed.json` sidecar, which wins over the default pattern.
fn load_run(config_path: &Path, seed_path: Option<&Path>) -> Result<(GrowthConfig, Seed), CliError> {
    let config: GrowthConfig = read_json(config_path)?;

    let sidecar = config_path.with_extension("seed.json");
    let seed = match seed_path {
        Some(path) => read_json(path)?,
        None if sidecar.exists() => read_json(&sidecar)?,
        None => Seed::default(),
    };

    Ok((config, seed))
}

fn output_filename(config: &GrowthConfig) -> PathBuf {
    PathBuf::from("snowflakes").join(format!(
        "{:.4}-{:.4}-{:.4}-{:.4}-{:.4}-{}-{}.png",
        config.diffusion,
        config.background,
        config.accretion,
        config.noise_scale,
        config.noise_amplitude,
        config.iterations,
        config.size
    ))
}

fn print_example_config() {
    let examples = [
        ("config.json", serde_json::to_string_pretty(&GrowthConfig::default())),
        ("config.seed.json", serde_json::to_string_pretty(&Seed::default())),
    ];
    for (name, json) in examples {
        match json {
            Ok(json) => println!("// {}\n{}\n", name, json),
            Err(e) => eprintln!("Error serializing {}: {}", name, e),
        }
    }
}
