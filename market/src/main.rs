use clap::{CommandFactory, Parser};
use libmarket::Arch;
use libmarket::config::ColorChoice;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod logging;

/// Market - Marketplace Image Explorer
///
/// Lists the identifiers of public marketplace images: image id, version
/// ids, and the local image id for every zone of the requested
/// architecture. The local image id is the one to use when creating a
/// server.
#[derive(Parser, Debug)]
#[command(name = "market")]
#[command(long_about = None, disable_version_flag = true)]
struct Cli {
    /// Architecture: x86_64, arm64 or arm [default: x86_64]
    #[arg(short, long)]
    arch: Option<Arch>,

    /// Only show images whose name contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    name: String,

    /// Catalog API base URL
    #[arg(long, env = "MARKET_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, env = "MARKET_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to a YAML configuration file
    #[arg(long, env = "MARKET_CONFIG")]
    config: Option<PathBuf>,

    /// Control colored output: auto, always, never
    #[arg(long, env = "MARKET_COLOR")]
    color: Option<ColorChoice>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completion: Option<clap_complete::Shell>,

    /// Print version information and exit
    #[arg(short = 'V', long)]
    version: bool,
}

impl Cli {
    fn overrides(&self) -> context::CliOverrides {
        context::CliOverrides {
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
            timeout: self.timeout,
            arch: self.arch,
            color: self.color,
            name: self.name.clone(),
            verbose: self.verbose,
        }
    }
}

/// Rewrites single-dash long flags (`-arch x86_64`, `-name=ubuntu`) into
/// their double-dash form. Arguments after `--` are left untouched.
fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    const LEGACY: [&str; 2] = ["-arch", "-name"];

    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            for flag in LEGACY {
                if s == flag || s.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')) {
                    return OsString::from(format!("-{}", s));
                }
            }
            arg
        })
        .collect()
}

/// Get the version string for market and libmarket
fn get_version_string() -> String {
    format!(
        "market {}\nlibmarket {}",
        env!("CARGO_PKG_VERSION"),
        libmarket::version()
    )
}

/// Runs the CLI and returns the process exit code.
///
/// Usage errors (including an unknown architecture) are reported before
/// any configuration is read or any request is sent.
fn run<I, T>(args: I, out: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cli = match Cli::try_parse_from(normalize_legacy_flags(args)) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 1 } else { 0 };
        }
    };

    if cli.version {
        let _ = writeln!(out, "{}", get_version_string());
        return 0;
    }

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, bin_name, out);
        return 0;
    }

    let overrides = cli.overrides();
    logging::init(context::VerbosityLevel::from_count(overrides.verbose));

    let ctx = match context::AppContext::build(overrides) {
        Ok(ctx) => ctx,
        Err(e) => {
            format::error(cli.color.unwrap_or_default(), &format::error_chain(&e));
            return 1;
        }
    };

    commands::images::handle_images(&ctx, out)
}

fn main() {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = run(std::env::args_os(), &mut out);
    let _ = out.flush();
    std::process::exit(code);
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
