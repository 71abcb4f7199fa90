use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use govmap_core::config::{default_base_dir, Config};
use govmap_core::government::{Classification, GovernmentMapper, MappingRule, ReformCategory};
use govmap_core::{load_nations, select_nation, GovMapError, Result};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    let sources = SourceOverrides {
        governments: cli.governments,
        reforms: cli.reforms,
    };

    let result = match cli.command {
        Some(Commands::Classify { nations, tag, json }) => {
            handle_classify(&base_dir, &sources, &nations, tag.as_deref(), json)
        }
        Some(Commands::Reforms { levels }) => handle_reforms(&base_dir, &sources, levels),
        Some(Commands::Rules { source }) => handle_rules(&base_dir, &sources, source.as_deref()),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise -v shows mapping decisions and -q keeps errors only.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "govmap", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("GOVMAP_BASE") {
        return PathBuf::from(base);
    }

    default_base_dir()
}

/// Source files given on the command line
struct SourceOverrides {
    governments: Option<PathBuf>,
    reforms: Option<PathBuf>,
}

/// Build the mapper from config + CLI options
/// Priority: CLI options > config file > defaults
fn load_mapper(base_dir: &Path, sources: &SourceOverrides) -> Result<GovernmentMapper> {
    let mut config = Config::load(base_dir)?;

    // command-line paths are relative to the working directory, not the base dir
    let cwd = std::env::current_dir()?;
    if let Some(path) = &sources.governments {
        config.sources.governments = cwd.join(path);
    }
    if let Some(path) = &sources.reforms {
        config.sources.reforms = cwd.join(path);
    }

    GovernmentMapper::from_config(base_dir, &config)
}

fn handle_classify(
    base_dir: &Path,
    sources: &SourceOverrides,
    nations_file: &Path,
    tag: Option<&str>,
    json: bool,
) -> Result<()> {
    let mapper = load_mapper(base_dir, sources)?;

    let mut nations = load_nations(nations_file)?;
    if let Some(tag) = tag {
        nations = select_nation(nations, tag)?;
    }

    let results = mapper.classify_all(&nations);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!();
    for result in &results {
        print_classification(result);
    }

    let mapped = results.iter().filter(|r| r.is_mapped()).count();
    println!();
    if mapped == results.len() {
        println!(
            "{} {} of {} nations",
            "Mapped:".green(),
            mapped,
            results.len()
        );
    } else {
        println!(
            "{} {} of {} nations ({} unmapped)",
            "Mapped:".yellow(),
            mapped,
            results.len(),
            results.len() - mapped
        );
    }

    Ok(())
}

fn print_classification(result: &Classification) {
    let target = if result.is_mapped() {
        result.target.green().to_string()
    } else {
        "(unmapped)".yellow().to_string()
    };

    println!(
        "  {:<4} {} → {}  {}",
        result.tag.bold(),
        result.source.cyan(),
        target,
        format!(
            "political {:.2} ({})  social {:.2} ({})",
            result.progress.political,
            result.progress.political_sum,
            result.progress.social,
            result.progress.social_sum
        )
        .dimmed()
    );
}

fn handle_reforms(base_dir: &Path, sources: &SourceOverrides, levels: bool) -> Result<()> {
    let mapper = load_mapper(base_dir, sources)?;
    let catalog = mapper.catalog();

    println!();
    println!("{} {}", "Totals mode:".cyan().bold(), catalog.mode());

    for category in ReformCategory::ALL {
        println!();
        println!(
            "{} (total rank: {})",
            format!("{} reforms", category).cyan().bold(),
            catalog.total_rank(category)
        );

        let tracks = catalog.tracks(category);
        if tracks.is_empty() {
            println!("  {}", "(none)".dimmed());
            continue;
        }

        for track in tracks {
            let track_levels: Vec<_> = catalog.levels_in_track(category, track).collect();
            println!("  {} {}", track, format!("[{}]", track_levels.len()).dimmed());
            if levels {
                for level in track_levels {
                    println!("    {} {}", level.rank.to_string().dimmed(), level.name);
                }
            }
        }
    }
    println!();

    Ok(())
}

fn handle_rules(base_dir: &Path, sources: &SourceOverrides, source: Option<&str>) -> Result<()> {
    let mapper = load_mapper(base_dir, sources)?;

    let rules: Vec<(usize, &MappingRule)> = mapper
        .rules()
        .iter()
        .enumerate()
        .filter(|(_, r)| source.map_or(true, |s| r.source_regime == s))
        .collect();

    if rules.is_empty() {
        println!("No mapping rules found");
        return Ok(());
    }

    println!();
    for (i, rule) in rules {
        let party = if rule.required_ruling_ideology.is_empty() {
            String::new()
        } else {
            format!(" ruling_party={}", rule.required_ruling_ideology)
        };
        println!(
            "{}. {} → {}{}",
            (i + 1).to_string().bold(),
            rule.source_regime.cyan(),
            rule.target_regime.green(),
            party.yellow()
        );
        println!(
            "   {}",
            format!(
                "political >= {:.2}  social {:.2}..={:.2}",
                rule.min_political_progress, rule.min_social_progress, rule.max_social_progress
            )
            .dimmed()
        );
    }
    println!();

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load(base_dir)?
                .get(&key)
                .ok_or(GovMapError::ConfigKeyNotFound { key })?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
