use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use lyrdeck::{DeckSession, LyrError, Options, Toolchain, Workspace};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "lyr", version, about = "Typeset lyrics into beamer slides")]
struct Cli {
    /// Lyrics document to render.
    #[arg(short, long, conflicts_with = "list")]
    file: Option<PathBuf>,

    /// Batch list of songs rendered and merged into one PDF.
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// Name of the merged PDF in batch mode (defaults to the list file stem).
    #[arg(short, long, requires = "list")]
    output: Option<String>,

    /// Keep the original capitalization of every row.
    #[arg(short, long, alias = "unlock_caps")]
    unlock_caps: bool,

    /// Only write the markup source; skip PDF generation.
    #[arg(short, long, alias = "mute_pdf")]
    mute_pdf: bool,

    /// Skip background graphics and costly row effects.
    #[arg(short, long)]
    draft: bool,

    /// Print debug messages and typesetter output.
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    paths: PathArgs,

    #[command(flatten)]
    tools: ToolArgs,
}

#[derive(clap::Args, Debug)]
struct PathArgs {
    /// Project root holding `lyrics/`, `ref/template.tex`, `out/` and `images/`.
    #[arg(long, env = "LYR_ROOT", default_value = ".")]
    root: PathBuf,

    /// Directory of lyrics documents used by batch lists.
    #[arg(long, env = "LYR_LYRICS_DIR")]
    lyrics_dir: Option<PathBuf>,

    /// Markup template with `%lyr_font_size` and `%lyr_text` markers.
    #[arg(long, env = "LYR_TEMPLATE")]
    template: Option<PathBuf>,

    /// Output directory for markup, logs and PDFs.
    #[arg(long, env = "LYR_OUT_DIR")]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ToolArgs {
    /// LaTeX engine.
    #[arg(long, env = "LYR_TYPESETTER", default_value = "pdflatex")]
    typesetter: String,

    /// PDF rasterizer/compressor.
    #[arg(long, env = "LYR_CONVERTER", default_value = "convert")]
    converter: String,

    /// PDF concatenation tool.
    #[arg(long, env = "LYR_MERGER", default_value = "pdfunite")]
    merger: String,

    /// Typesetter runs per document.
    #[arg(long, env = "LYR_PASSES", default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    passes: u32,
}

impl PathArgs {
    fn workspace(&self) -> Workspace {
        let mut ws = Workspace::under(&self.root);
        if let Some(dir) = &self.lyrics_dir {
            ws.lyrics_dir = dir.clone();
        }
        if let Some(template) = &self.template {
            ws.template = template.clone();
        }
        if let Some(dir) = &self.out_dir {
            ws.out_dir = dir.clone();
        }
        ws
    }
}

impl ToolArgs {
    fn toolchain(&self) -> Toolchain {
        Toolchain {
            typesetter: self.typesetter.clone(),
            converter: self.converter.clone(),
            merger: self.merger.clone(),
            typeset_passes: self.passes,
        }
    }
}

// Bad lyrics or list content, as opposed to a broken environment or toolchain (exit code 1).
const EXIT_INPUT_ERROR: u8 = 65;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            let input = err
                .downcast_ref::<LyrError>()
                .is_some_and(LyrError::is_input_error);
            if input {
                ExitCode::from(EXIT_INPUT_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.debug)?;

    let options = Options {
        unlock_caps: cli.unlock_caps,
        mute_pdf: cli.mute_pdf,
        draft: cli.draft,
        debug: cli.debug,
    };
    let mut session =
        DeckSession::new(cli.paths.workspace(), options).toolchain(cli.tools.toolchain());
    tracing::debug!(options = ?session.options(), workspace = ?session.workspace(), "session");

    match (&cli.file, &cli.list) {
        (Some(file), _) => {
            let outcome = session
                .process_document(file, None)
                .with_context(|| format!("render '{}'", file.display()))?;
            if let Some(pdf) = outcome.artifact {
                eprintln!("wrote {}", pdf.display());
            }
        }
        (None, Some(list)) => {
            let outcome = session
                .process_batch(list, cli.output.as_deref())
                .with_context(|| format!("render batch '{}'", list.display()))?;
            if let Some(pdf) = outcome.merged {
                eprintln!("wrote {}", pdf.display());
            }
        }
        (None, None) => {
            return Err(LyrError::configuration(
                "pass a lyrics document with --file or a batch list with --list",
            )
            .into());
        }
    }

    tracing::info!("process completed");
    Ok(())
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
