use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ncc::application::{AnnotateFilesUseCase, Config};
use ncc::domain::CommentError;
use ncc::infrastructure::{NebulaDecoder, UnifiedDiffRenderer, WalkdirFileSystem};

/// Long options that are also accepted with a single dash, e.g. `-format=name`.
const SINGLE_DASH_LONG: [&str; 5] = ["debug", "version", "large-file-limit", "comment", "format"];

const AFTER_HELP: &str = "\
If none of \"-d, -l, -w\" are specified, defaults to \"-d\".

If a directory is specified for FILE, it is searched recursively. Symlinks are skipped.

Format string is a comma separated list of formatters with optional modifiers (separated by colons)

    Formatters:

        name            --  name of the certificate
        version         --  version of the certificate
        curve           --  curve of the certificate
        groups          --  comma separated list of groups defined on the certificate
        notAfter        --  expiration timestamp in UTC of the certificate, formatted as YYYY-MM-DD
        fingerprint     --  fingerprint of the certificate
        networks        --  networks listed in certificate
        unsafeNetworks  --  unsafeNetworks listed in certificate
        json            --  the whole certificate as JSON

    Modifiers:

        !=<exclusion>  --  omits entry if it matches the exclusion string
                           EXAMPLES:  \"version:!=1\", \"curve:!=P256\"
        ?              --  omits entry if blank
                           EXAMPLES:  \"groups:?\"

Command line flags take precedence over their environment variables.";

#[derive(Parser, Debug)]
#[command(name = "nebula-cert-comment", version, about = "Annotate Nebula certificate blocks with a summary comment", after_help = AFTER_HELP)]
struct Cli {
    /// Display diffs
    #[arg(short = 'd')]
    diff: bool,

    /// Write result to files
    #[arg(short = 'w')]
    write: bool,

    /// List files whose comments need updating
    #[arg(short = 'l')]
    list: bool,

    /// Exit(1) if changes needed/made
    #[arg(short = 'e')]
    exit: bool,

    /// Log files we are skipping
    #[arg(long)]
    debug: bool,

    /// Don't process files larger than this in bytes, 0 disables the limit [default: 10000000]
    #[arg(long, value_name = "BYTES", env = "NEBULA_CERT_COMMENT_LARGE_FILE_LIMIT")]
    large_file_limit: Option<u64>,

    /// Prefix for comment lines [default: "# nebula:"]
    #[arg(long, value_name = "PREFIX", env = "NEBULA_CERT_COMMENT_PREFIX")]
    comment: Option<String>,

    /// The formatters to use for the comment
    #[arg(long, value_name = "FORMAT", env = "NEBULA_CERT_COMMENT_FORMAT")]
    format: Option<String>,

    #[arg(value_name = "FILE", default_value = ".")]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.class.exit_code() as u8)
        }
    }
}

/// Returns whether the process should exit with status 1.
fn run(cli: &Cli) -> Result<bool, CommentError> {
    let config = config(cli)?;
    debug!(format = %config.format, prefix = %config.comment_prefix, "configured");

    let use_case = AnnotateFilesUseCase::new(WalkdirFileSystem::new(), NebulaDecoder::new(), UnifiedDiffRenderer::new(), config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = use_case.execute(cli.paths.as_slice(), &mut out)?;
    out.flush()?;

    debug!(scanned = summary.files_scanned, skipped = summary.files_skipped, changed = summary.files_changed, "done");
    Ok(use_case.config().exit_on(&summary))
}

fn config(cli: &Cli) -> Result<Config, CommentError> {
    let mut config = Config::default()
        .with_modes(cli.diff, cli.write, cli.list)
        .with_exit_on_change(cli.exit);
    if let Some(limit) = cli.large_file_limit {
        config = config.with_large_file_limit(limit);
    }
    if let Some(prefix) = &cli.comment {
        config = config.with_comment_prefix(prefix.as_str())?;
    }
    if let Some(format) = &cli.format {
        config = config.with_format(format)?;
    }
    Ok(config)
}

fn init_tracing(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// A valid, non-empty `RUST_LOG` wins; otherwise `--debug` selects debug and the default is warn.
fn log_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(if debug { "debug" } else { "warn" }))
}

/// Rewrites `-debug`, `-format=x` and friends to their `--` form. Everything after `--` is left alone.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut positional = false;
    args.into_iter().enumerate().map(|(i, arg)| {
        if i == 0 || positional {
            return arg;
        }
        match arg.to_str() {
            Some("--") => {
                positional = true;
                arg
            }
            Some(s) if s.starts_with('-') && !s.starts_with("--") => {
                let name = s[1..].split('=').next().unwrap_or_default();
                if SINGLE_DASH_LONG.contains(&name) {
                    OsString::from(format!("-{}", s))
                } else {
                    arg
                }
            }
            _ => arg,
        }
    }).collect()
}
