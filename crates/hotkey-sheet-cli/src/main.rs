use anyhow::Result;
use clap::Parser;
use hotkey_sheet::{Document, LayoutConfig, SheetError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "hotkey-sheet",
    about = "Generate a printable hotkey cheat sheet from YAML",
    version
)]
struct Cli {
    /// Input YAML file (title, optional config, sections)
    input: PathBuf,

    /// Output PDF file [default: input with a .pdf extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only validate the input, don't generate a PDF
    #[arg(short, long, conflicts_with = "estimate_pages")]
    validate: bool,

    /// Print the estimated page count without generating a PDF
    #[arg(short, long)]
    estimate_pages: bool,

    /// Layout config YAML file, replaces the input's `config` mapping
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of columns per page
    #[arg(long)]
    columns: Option<usize>,

    /// Entry font size in points
    #[arg(long)]
    font_size: Option<f32>,

    /// Page margin in points
    #[arg(long)]
    margin: Option<f32>,

    /// TrueType/OpenType font to embed, needed for text outside ASCII
    #[arg(long)]
    font: Option<PathBuf>,
}

impl Cli {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("pdf"))
    }

    fn apply_overrides(&self, config: &mut LayoutConfig) {
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }
        if let Some(font) = &self.font {
            config.font_file = Some(font.clone());
        }
    }
}

/// Exit status for a failed run: 2 malformed input, 3 invalid content,
/// 4 invalid layout config, 1 anything else
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SheetError>() {
        Some(SheetError::Structure(_)) => 2,
        Some(SheetError::Validation(_)) => 3,
        Some(SheetError::Config(_)) => 4,
        _ => 1,
    }
}

async fn load_document(cli: &Cli) -> Result<Document> {
    let mut document = hotkey_sheet::load_from_yaml(&cli.input).await?;

    if let Some(path) = &cli.config {
        document.config = LayoutConfig::load(path).await?;
    }
    cli.apply_overrides(&mut document.config);

    Ok(document)
}

async fn run(cli: Cli) -> Result<()> {
    let document = load_document(&cli).await?;

    if cli.validate {
        document.ensure_valid()?;
        println!(
            "✓ {} is valid ({} sections, {} hotkeys)",
            cli.input.display(),
            document.sections.len(),
            document.entry_count()
        );
        return Ok(());
    }

    if cli.estimate_pages {
        let pages = hotkey_sheet::estimate_pages(&document)?;
        println!("Estimated pages: {}", pages);
        return Ok(());
    }

    let output = cli.output_path();
    let plan = hotkey_sheet::generate_pdf(&document, &output).await?;
    let stats = hotkey_sheet::statistics_for_plan(&document, &plan);

    println!("Generated cheat sheet → {}", output.display());
    println!("  Title: {}", document.title);
    println!("  Sections: {}", stats.sections);
    println!("  Subsections: {}", stats.subsections);
    println!("  Hotkeys: {}", stats.entries);
    println!("  Pages: {}", stats.pages);

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("hotkey_sheet=info"))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}
