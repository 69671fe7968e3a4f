use clap::Parser;
use rayon::prelude::*;
use replaycss_lib::transform;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "replaycss")]
#[command(about = "Rewrite captured CSS so it can be replayed outside the recorded page")]
struct Args {
    /// Address of the page the CSS was captured from.
    #[arg(short, long)]
    base: String,

    /// Directory to write rewritten files into, keeping each input's file
    /// name (default: stdout). Inputs must have distinct file names.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Log every rewritten reference.
    #[arg(short, long)]
    verbose: bool,

    /// CSS files to rewrite. Reads stdin when none are given.
    inputs: Vec<PathBuf>,
}

fn main() {
    // parse the args given in terminal
    let args: Args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> io::Result<()> {
    if args.inputs.is_empty() {
        let mut css = String::new();
        io::stdin().read_to_string(&mut css)?;
        return write_stdout(&[transform(&args.base, &css)]);
    }

    // Resolve targets before doing any work so a clash fails early.
    let targets = match &args.out_dir {
        Some(dir) => Some(output_targets(dir, &args.inputs)?),
        None => None,
    };

    let rewritten = args
        .inputs
        .par_iter()
        .map(|path| {
            let css = fs::read_to_string(path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
            log::info!("rewriting {}", path.display());
            Ok(transform(&args.base, &css))
        })
        .collect::<io::Result<Vec<_>>>()?;

    match (&args.out_dir, targets) {
        (Some(dir), Some(targets)) => {
            fs::create_dir_all(dir)?;
            for (target, css) in targets.iter().zip(&rewritten) {
                fs::write(target, css)?;
                log::debug!("wrote {}", target.display());
            }
            Ok(())
        }
        _ => write_stdout(&rewritten),
    }
}

/// Each sheet goes to stdout followed by a newline, whatever its source.
fn write_stdout(sheets: &[String]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for css in sheets {
        writeln!(stdout, "{}", css)?;
    }
    stdout.flush()
}

/// Map every input to `<dir>/<file name>`, rejecting inputs whose file
/// names would land on the same target.
fn output_targets(dir: &Path, inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let name = input.file_name().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no file name", input.display()),
                )
            })?;
            if !seen.insert(name) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "{} would overwrite another input's output in {}",
                        input.display(),
                        dir.display()
                    ),
                ));
            }
            Ok(dir.join(name))
        })
        .collect()
}
