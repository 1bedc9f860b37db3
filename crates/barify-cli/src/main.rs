use barify_core::{BarifyConfig, ColorMode, DEFAULT_PAGE_FORMAT, ParseOptions, parse_chapters};
use barify_render::model::LayoutMode;
use barify_render::svg::{SvgRenderOptions, render_svg};
use barify_render::{LayoutOptions, layout_chapters};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_MARGIN_PERCENT: f64 = 4.0;
const DEFAULT_BAR_MARGIN_PERCENT: f64 = 2.0;
const DEFAULT_TEXT_WIDTH_PERCENT: f64 = 20.0;
const DEFAULT_COLOR: &str = "black";
const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const DEFAULT_FONT_SIZE: &str = "10pt";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] barify_core::Error),
    #[error(transparent)]
    Render(#[from] barify_render::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(barify_core::Error::EmptyInput)
            | CliError::Render(barify_render::Error::EmptyInput) => 3,
            _ => 1,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "barify",
    version,
    about = "Generate bar images from book chapter tables",
    args_conflicts_with_subcommands = true,
    after_help = "Input is CSV: index,name,start page[,color][,side text]. \
                  Without a subcommand, `render` is assumed."
)]
struct Cli {
    /// Log stage summaries to stderr (otherwise `BARIFY_LOG` controls logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized chapter list as JSON.
    Parse(InputArgs),
    /// Print the computed bar layout as JSON.
    Layout(LayoutArgs),
    /// Write the SVG image (default).
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Chapter table; omit or pass `-` to read stdin.
    input: Option<PathBuf>,

    /// Output file; stdout when omitted or `-`.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// YAML file with defaults for every option and extra page formats.
    #[arg(long, env = "BARIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Default bar color. Any CSS color; not checked.
    #[arg(short, long)]
    color: Option<String>,

    /// How the color column is used: uniform, per-row or sections.
    #[arg(long)]
    color_mode: Option<ColorMode>,

    /// Shorthand for `--color-mode sections`.
    #[arg(short = 'a', long, conflicts_with = "color_mode")]
    sections: bool,

    /// Indent JSON/SVG output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct LayoutArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Page format: a preset name (a3, a4, a5, 16:9, dci, cinemascope, letter, legal, ledger,
    /// or one from the config) or WxH in millimeters.
    #[arg(short, long)]
    size: Option<String>,

    /// Landscape: swap page width and height.
    #[arg(short, long)]
    flip: bool,

    /// Margin to the page edges, in percent.
    #[arg(short, long)]
    margin: Option<f64>,

    /// Gap between chapters on the same line, in percent of a line (block mode).
    #[arg(short = 'x', long)]
    bar_margin: Option<f64>,

    /// Bar height in percent of the page height; overrides automatic scaling.
    #[arg(short = 'r', long)]
    bar_height: Option<f64>,

    /// Pack chapters end to end across lines instead of one chapter per line.
    #[arg(short, long)]
    block_mode: bool,

    /// Draw the side text column.
    #[arg(short, long)]
    text: bool,

    /// Width of the side text column, in percent of the page width.
    #[arg(long)]
    text_width: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
struct RenderArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Font family for side text. Not checked.
    #[arg(long)]
    font_family: Option<String>,

    /// Font size for side text, as a CSS length (e.g. `10pt`).
    #[arg(long)]
    font_size: Option<String>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("BARIFY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<BarifyConfig, CliError> {
    match path {
        Some(path) => Ok(BarifyConfig::load(path)?),
        None => Ok(BarifyConfig::default()),
    }
}

fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_text(text: &str, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        Some(path) if path != Path::new("-") => {
            std::fs::write(path, text)?;
            tracing::debug!(path = %path.display(), bytes = text.len(), "wrote output");
            Ok(())
        }
        _ => {
            print!("{text}");
            Ok(())
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&Path>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    write_text(&text, out)
}

fn parse_options(args: &InputArgs, config: &BarifyConfig) -> ParseOptions {
    let color_mode = if args.sections {
        ColorMode::Sections
    } else {
        args.color_mode.or(config.color_mode).unwrap_or_default()
    };
    ParseOptions {
        default_color: args
            .color
            .clone()
            .or_else(|| config.color.clone())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        color_mode,
    }
}

fn layout_options(args: &LayoutArgs, config: &BarifyConfig) -> Result<LayoutOptions, CliError> {
    let formats = config.page_formats()?;
    let size = args
        .size
        .as_deref()
        .or(config.size.as_deref())
        .unwrap_or(DEFAULT_PAGE_FORMAT);
    let mut page = formats.resolve(size)?;
    if args.flip || config.flip.unwrap_or(false) {
        page = page.flipped();
    }

    let block_mode = args.block_mode || config.block_mode.unwrap_or(false);
    let text = args.text || config.text.unwrap_or(false);

    Ok(LayoutOptions {
        page,
        margin_percent: args
            .margin
            .or(config.margin)
            .unwrap_or(DEFAULT_MARGIN_PERCENT),
        bar_margin: args
            .bar_margin
            .or(config.bar_margin)
            .unwrap_or(DEFAULT_BAR_MARGIN_PERCENT)
            / 100.0,
        bar_height_percent: args.bar_height.or(config.bar_height),
        mode: if block_mode {
            LayoutMode::Block
        } else {
            LayoutMode::Simple
        },
        text_column_percent: text.then(|| {
            args.text_width
                .or(config.text_width)
                .unwrap_or(DEFAULT_TEXT_WIDTH_PERCENT)
        }),
    })
}

fn svg_options(args: &RenderArgs, config: &BarifyConfig) -> SvgRenderOptions {
    SvgRenderOptions {
        font_family: args
            .font_family
            .clone()
            .or_else(|| config.font_family.clone())
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        font_size: args
            .font_size
            .clone()
            .or_else(|| config.font_size.clone())
            .unwrap_or_else(|| DEFAULT_FONT_SIZE.to_string()),
        indent: args.layout.input.pretty,
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let command = cli.command.unwrap_or(Command::Render(cli.render));

    match command {
        Command::Parse(args) => {
            let config = load_config(args.config.as_deref())?;
            let text = read_input(args.input.as_deref())?;
            let chapters = parse_chapters(&text, &parse_options(&args, &config))?;
            write_json(&chapters, args.pretty, args.out.as_deref())
        }
        Command::Layout(args) => {
            let config = load_config(args.input.config.as_deref())?;
            let text = read_input(args.input.input.as_deref())?;
            let chapters = parse_chapters(&text, &parse_options(&args.input, &config))?;
            let layout = layout_chapters(&chapters, &layout_options(&args, &config)?)?;
            write_json(&layout, args.input.pretty, args.input.out.as_deref())
        }
        Command::Render(args) => {
            let input = &args.layout.input;
            let config = load_config(input.config.as_deref())?;
            let text = read_input(input.input.as_deref())?;
            let chapters = parse_chapters(&text, &parse_options(input, &config))?;
            let layout = layout_chapters(&chapters, &layout_options(&args.layout, &config)?)?;
            let svg = render_svg(&layout, &svg_options(&args, &config));
            write_text(&svg, input.out.as_deref())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("barify: {err}");
        std::process::exit(err.exit_code());
    }
}
