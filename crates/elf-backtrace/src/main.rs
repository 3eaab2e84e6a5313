use std::path::PathBuf;

use clap::Parser;
use elf_backtrace::{Addr2Line, Config, SearchMode};

/// Resolve a firmware crash backtrace into source locations using addr2line.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Backtrace addresses, either as one quoted string or as separate
    /// arguments. A leading `Backtrace:` label is ignored.
    ///
    /// Options must come before the first address. Everything after it is
    /// taken as an address, even if it starts with `-`.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    addresses: Vec<String>,

    /// Search the current directory for the ELF file instead of `./build`.
    #[arg(long)]
    cwd: bool,

    /// Search this directory for the ELF file.
    #[arg(long, short, conflicts_with = "cwd")]
    dir: Option<PathBuf>,

    /// Suffix identifying the ELF file.
    #[arg(long, default_value = elf_backtrace::DEFAULT_SUFFIX)]
    suffix: String,

    /// The addr2line executable to run. Chosen from the ELF architecture if not
    /// given.
    #[arg(long, short)]
    tool: Option<String>,
}

fn usage() -> String {
    let program = std::env::args().next().unwrap_or_else(|| "elf-backtrace".to_owned());

    format!(
        "Usage: {program} <backtrace-string>\n       \
         {program} <addr1> <addr2> ..."
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let addresses = elf_backtrace::extract_addresses(&args.addresses)?;
    if addresses.is_empty() {
        println!("{}", usage());
        std::process::exit(1);
    }

    let mode = if args.cwd {
        SearchMode::CurrentDir
    } else {
        SearchMode::Build
    };
    let mut config = Config::new(addresses)
        .search_mode(mode)
        .artifact_suffix(args.suffix)
        .tool(args.tool);
    if let Some(dir) = args.dir {
        config = config.search_dir(dir);
    }

    let mut symbolizer = Addr2Line::new(config.tool.clone());
    let stdout = std::io::stdout();
    elf_backtrace::run(&config, &mut symbolizer, &mut stdout.lock())?;

    Ok(())
}
