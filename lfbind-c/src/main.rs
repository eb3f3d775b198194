use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use lfbind_c::{Templates, generate};

/// lfbind-c - generate a C call table and weak trampolines for a module
/// binary carrying DWARF debug info
#[derive(Parser)]
#[command(name = "lfbind-c")]
#[command(version)]
#[command(about = "generate a C call table and weak trampolines for a module binary", long_about = None)]
struct Cli {
    /// path to the module binary (compile with -g)
    binary: PathBuf,

    /// package identifier used for file names, tags and the table symbol
    package: String,

    /// directory containing template.h and template.c (builtin templates
    /// when omitted)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// directory the generated <package>.h and <package>.c are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// print extracted signatures as JSON instead of generating output
    #[arg(short = 'j', long)]
    json: bool,

    /// suppress informational messages
    #[arg(short = 'q', long)]
    quiet: bool,

    /// verbose logging to console (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.verbose, cli.quiet);

    info!("binary: {}", cli.binary.display());
    info!("package: {}", cli.package);

    if cli.json {
        let analyzer = lfbind::ModuleAnalyzer::from_file(&cli.binary)?;
        let signatures = analyzer.extract_signatures()?.unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&signatures)?);
        return Ok(());
    }

    let templates = match &cli.templates {
        Some(dir) => Templates::from_dir(dir)?,
        None => Templates::builtin(),
    };

    match generate(&cli.binary, &cli.package, &templates, &cli.out_dir)? {
        Some(files) => {
            info!(
                "wrote {} and {}",
                files.header.display(),
                files.source.display()
            );
        }
        None => {
            debug!("no function region located; no output written");
        }
    }

    Ok(())
}

fn init_logger(verbose: u8, quiet: bool) {
    // quiet mode only shows warnings and errors
    let log_level = if quiet {
        log::LevelFilter::Warn
    } else {
        match verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}
