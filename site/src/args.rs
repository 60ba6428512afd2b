//! Command-line parsing.

use anyhow::{bail, Context};
use site_core::SiteConfig;

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub headless: bool,
    pub help: bool,
    pub config: SiteConfig,
}

/// Apply command-line flags on top of `base`.
///
/// `args` includes the program name at index 0.
pub fn parse_args(args: &[String], base: SiteConfig) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs {
        headless: false,
        help: false,
        config: base,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headless" => cli.headless = true,
            "-h" | "--help" => cli.help = true,
            "--ephemeral" => cli.config.ephemeral = true,
            "--path" => {
                let value = iter.next().context("--path needs a value")?;
                cli.config.start_path = value.clone();
            }
            "--storage" => {
                let value = iter.next().context("--storage needs a directory")?;
                cli.config.storage_dir = value.into();
            }
            "--origin" => {
                let value = iter.next().context("--origin needs a name")?;
                cli.config.origin = value.clone();
            }
            other => bail!("unknown argument '{other}'; see --help"),
        }
    }

    if !cli.help {
        cli.config.validate()?;
    }
    Ok(cli)
}

pub fn print_help() {
    println!("ARC Assessment - Strachwitz Consulting");
    println!();
    println!("USAGE:");
    println!("  arc-site [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help          Show this help message");
    println!("  --headless          Line-oriented mode on stdin/stdout (no TUI)");
    println!("  --path <PATH>       Initial location (default: /)");
    println!("  --storage <DIR>     Base directory for stored consent (default: .arc-site)");
    println!("  --origin <NAME>     Origin the consent is scoped to (default: arc-assessment)");
    println!("  --ephemeral         Keep consent in memory only");
    println!();
    println!("ENVIRONMENT:");
    println!("  ARC_SITE_STORAGE_DIR, ARC_SITE_ORIGIN, ARC_SITE_START_PATH");
    println!("  RUST_LOG            Log filter (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("  arc-site                               # Interactive TUI");
    println!("  arc-site --path /Datenschutz           # Start on the privacy policy");
    println!("  echo status | arc-site --headless --ephemeral");
}
