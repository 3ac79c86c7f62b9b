//! Command-line interface for the graphpaint binary.
//!
//! The CLI validates the source image, prints the planned graph, and
//! replays the plan into a new git repository.

use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use graphpaint::{
    Error, GitRepository, GraphConfig, GraphPlan, emit_history, io_error, render_preview,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for painting contribution graphs.
#[derive(Debug, Parser,)]
#[command(name = "graphpaint", version, about = "Paint an image onto a contribution graph")]
struct Cli
{
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Create the repository, record the commits and print the preview.
    Generate(GraphArgs,),
    /// Print the preview without touching the filesystem.
    Preview(GraphArgs,),
    /// Print the planned commits as JSON.
    Plan(PlanArgs,),
}

/// Options shared by every command. Flags override the configuration file.
#[derive(Debug, Args, Default,)]
struct GraphArgs
{
    /// Path to a YAML configuration file.
    #[arg(long = "config", value_name = "PATH", env = "GRAPHPAINT_CONFIG")]
    config: Option<PathBuf,>,

    /// Source image, exactly 7 pixels tall.
    #[arg(long = "image", value_name = "PATH", env = "GRAPHPAINT_IMAGE")]
    image: Option<PathBuf,>,

    /// Year whose graph is painted.
    #[arg(long = "year", value_name = "YEAR", env = "GRAPHPAINT_YEAR")]
    year: Option<i32,>,

    /// Directory for the new repository. Must not exist.
    #[arg(long = "repo-dir", value_name = "DIR", env = "GRAPHPAINT_REPO_DIR")]
    repo_dir: Option<PathBuf,>,

    /// Swap dark and bright days. `--inverted=false` overrides the file.
    #[arg(
        long = "inverted",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    inverted: Option<bool,>,
}

#[derive(Debug, Args,)]
struct PlanArgs
{
    #[command(flatten)]
    graph: GraphArgs,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    let cli = Cli::parse();
    init_logging(cli.verbose,);

    if let Err(error,) = run(cli.command,) {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Installs the tracing subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u8,)
{
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("graphpaint={level}"),),);

    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Executes the parsed command.
///
/// # Errors
///
/// Propagates configuration, validation, and git errors.
fn run(command: Command,) -> Result<(), Error,>
{
    match command {
        Command::Generate(args,) => run_generate(&resolve_config(&args,)?,),
        Command::Preview(args,) => run_preview(&resolve_config(&args,)?,),
        Command::Plan(args,) => run_plan(&resolve_config(&args.graph,)?, args.pretty,),
    }
}

/// Merges the optional configuration file with command line overrides.
fn resolve_config(args: &GraphArgs,) -> Result<GraphConfig, Error,>
{
    let mut config = match args.config.as_deref() {
        Some(path,) => GraphConfig::load(path,)?,
        None => GraphConfig::default(),
    };

    if let Some(image,) = args.image.as_ref() {
        config.image_path = image.clone();
    }
    if let Some(year,) = args.year {
        config.target_year = year;
    }
    if let Some(repo_dir,) = args.repo_dir.as_ref() {
        config.repo_dir = repo_dir.clone();
    }
    if let Some(inverted,) = args.inverted {
        config.inverted_colors = inverted;
    }

    config.validate()?;
    Ok(config,)
}

fn run_generate(config: &GraphConfig,) -> Result<(), Error,>
{
    let plan = GraphPlan::prepare(config,)?;
    let mut repository = GitRepository::create(&config.repo_dir, config.author.as_ref(),)?;

    let progress = ProgressBar::new(plan.total_commits() as u64,);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.green} {pos}/{len} [{elapsed_precise}] {msg}",)
            .unwrap_or_else(|_| ProgressStyle::default_bar(),),
    );

    let recorded = emit_history(&mut repository, plan.samples(), |commit| {
        progress.set_message(commit.timestamp(),);
        progress.inc(1,);
    },)?;
    progress.finish_with_message(format!("{recorded} commits recorded"),);
    info!("History written to {}", repository.root().display());

    print_preview(&plan,)
}

fn run_preview(config: &GraphConfig,) -> Result<(), Error,>
{
    print_preview(&GraphPlan::prepare(config,)?,)
}

fn run_plan(config: &GraphConfig, pretty: bool,) -> Result<(), Error,>
{
    let plan = GraphPlan::prepare(config,)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_plan(&mut handle, &plan, pretty,)
}

fn print_preview(plan: &GraphPlan,) -> Result<(), Error,>
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_preview(&mut handle, plan.samples(), plan.width(), plan.height(),)
        .map_err(|source| io_error(Path::new("<stdout>",), source,),)
}

fn write_plan<W: io::Write,>(writer: &mut W, plan: &GraphPlan, pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, plan,)?;
    } else {
        serde_json::to_writer(writer, plan,)?;
    }

    Ok((),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, io::Cursor, path::Path};

    use clap::Parser;
    use graphpaint::{GraphPlan, PixelGrid};
    use image::RgbImage;
    use tempfile::tempdir;

    use super::{Cli, Command, GraphArgs, resolve_config, run, write_plan};

    #[test]
    fn cli_parses_generate_overrides()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "-vv",
            "generate",
            "--image",
            "heart.png",
            "--year",
            "2025",
            "--repo-dir",
            "out",
            "--inverted",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.verbose, 2);
        let args = match cli.command {
            Command::Generate(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        assert_eq!(args.image.as_deref(), Some(Path::new("heart.png")));
        assert_eq!(args.year, Some(2025));
        assert_eq!(args.repo_dir.as_deref(), Some(Path::new("out")));
        assert_eq!(args.inverted, Some(true));
    }

    #[test]
    fn inverted_flag_accepts_explicit_value()
    {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "preview", "--inverted=false",],)
            .expect("failed to parse CLI",);
        match cli.command {
            Command::Preview(args,) => assert_eq!(args.inverted, Some(false)),
            other => panic!("unexpected command variant: {other:?}"),
        }
    }

    #[test]
    fn inverted_flag_can_switch_off_configured_inversion()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("graph.yaml",);
        fs::write(&config_path, "inverted_colors: true\n",).expect("failed to write config",);

        let inherited = GraphArgs {
            config: Some(config_path.clone(),),
            ..GraphArgs::default()
        };
        assert!(resolve_config(&inherited,).expect("config",).inverted_colors);

        let overridden = GraphArgs {
            config: Some(config_path,),
            inverted: Some(false,),
            ..GraphArgs::default()
        };
        assert!(!resolve_config(&overridden,).expect("config",).inverted_colors);
    }

    #[test]
    fn flags_override_configuration_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("graph.yaml",);
        fs::write(&config_path, "image_path: file.png\ntarget_year: 2020\n",)
            .expect("failed to write config",);

        let args = GraphArgs {
            config: Some(config_path,),
            year: Some(2021,),
            ..GraphArgs::default()
        };
        let config = resolve_config(&args,).expect("config",);

        assert_eq!(config.image_path, Path::new("file.png"));
        assert_eq!(config.target_year, 2021);
        assert!(!config.inverted_colors);
    }

    #[test]
    fn missing_arguments_fall_back_to_defaults()
    {
        let config = resolve_config(&GraphArgs::default(),).expect("config",);
        assert_eq!(config.image_path, Path::new("pacman.png"));
        assert_eq!(config.target_year, 2024);
        assert_eq!(config.repo_dir, Path::new("2024-contribution-graph"));
    }

    #[test]
    fn plan_writer_switches_between_compact_and_pretty()
    {
        let pixels = PixelGrid::from_rgb_image(RgbImage::new(1, 7,),).expect("grid",);
        let plan = GraphPlan::from_pixels(&pixels, 2024, false,).expect("plan",);

        let mut compact = Cursor::new(Vec::new(),);
        write_plan(&mut compact, &plan, false,).expect("failed to serialize plan",);
        let compact = String::from_utf8(compact.into_inner(),).expect("invalid UTF-8",);
        assert!(compact.starts_with("{\"year\":2024,"));
        assert!(!compact.contains('\n'));

        let mut pretty = Cursor::new(Vec::new(),);
        write_plan(&mut pretty, &plan, true,).expect("failed to serialize plan",);
        let pretty = String::from_utf8(pretty.into_inner(),).expect("invalid UTF-8",);
        assert!(pretty.starts_with("{\n  \"year\": 2024,"));
    }

    #[test]
    fn generate_refuses_existing_destination_without_writing()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let image_path = temp.path().join("black.png",);
        RgbImage::new(50, 7,).save(&image_path,).expect("failed to write image",);
        let repo_dir = temp.path().join("graph",);
        fs::create_dir(&repo_dir,).expect("failed to create destination",);

        let args = GraphArgs {
            image: Some(image_path,),
            repo_dir: Some(repo_dir.clone(),),
            ..GraphArgs::default()
        };
        let error = run(Command::Generate(args,),).expect_err("expected destination error",);

        assert!(matches!(error, graphpaint::Error::DestinationExists { .. }));
        assert_eq!(fs::read_dir(&repo_dir).expect("read destination").count(), 0);
    }

    #[test]
    fn generate_rejects_invalid_image_before_creating_repository()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let image_path = temp.path().join("tall.png",);
        RgbImage::new(50, 8,).save(&image_path,).expect("failed to write image",);
        let repo_dir = temp.path().join("graph",);

        let args = GraphArgs {
            image: Some(image_path,),
            repo_dir: Some(repo_dir.clone(),),
            ..GraphArgs::default()
        };
        let error = run(Command::Generate(args,),).expect_err("expected dimension error",);

        assert!(matches!(error, graphpaint::Error::DimensionMismatch { .. }));
        assert!(!repo_dir.exists());
    }
}
