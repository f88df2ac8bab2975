use std::error::Error as _;
use std::path::{Path, PathBuf};

use clap::Parser;
use ficha_traslado::{Error, RecordDescription, RenderOptions, output_file_name, render_to_file};

/// Render an equipment transfer sheet (Ficha de Traslado) to PDF.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Record description (JSON). Attachment paths are relative to it.
    input: PathBuf,

    /// Output file, or directory to place `Ficha_Traslado_<name>.pdf` in
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header logo [env: FICHA_LOGO] [default: Logo.png]
    #[arg(long, conflicts_with = "no_logo")]
    logo: Option<PathBuf>,

    /// Render without a header logo
    #[arg(long)]
    no_logo: bool,
}

fn render_options(cli: &Cli) -> RenderOptions {
    if cli.no_logo {
        return RenderOptions::without_logo();
    }
    match cli
        .logo
        .clone()
        .or_else(|| std::env::var_os("FICHA_LOGO").map(PathBuf::from))
    {
        Some(path) => RenderOptions {
            logo_path: Some(path),
        },
        None => RenderOptions::default(),
    }
}

fn output_path(cli: &Cli, file_name: &str) -> PathBuf {
    match &cli.output {
        Some(out) if out.is_dir() => out.join(file_name),
        Some(out) => out.clone(),
        None => PathBuf::from(file_name),
    }
}

fn run(cli: &Cli) -> Result<PathBuf, Error> {
    let description = RecordDescription::load(&cli.input)?;
    let base_dir = cli.input.parent().unwrap_or(Path::new("."));
    let record = description.into_record(base_dir)?;

    let output = output_path(cli, &output_file_name(&record));
    render_to_file(&record, &render_options(cli), &output)?;
    Ok(output)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => println!("{}", output.display()),
        Err(err) => {
            eprintln!("Error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
