//! ssm: secure secret manifest CLI
//!
//!   hide                 - bundle fragments into an encrypted envelope
//!   tell <input>         - open an envelope and print its fragments
//!   inspect <input>      - show the public part of an envelope (no key needed)
//!   config show          - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ssm::{Fact, Metadata, Ssm};
use ssm_core::{LogFormat, SsmConfig};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ssm",
    version,
    about = "Secure secret manifests",
    long_about = "ssm: bundle related secrets into one checksum-bound encrypted envelope"
)]
struct Cli {
    /// Path to ssm.toml configuration file
    #[arg(long, short = 'c', env = "SSM_CONFIG", default_value = "ssm.toml")]
    config: PathBuf,

    /// Log filter (overrides config; RUST_LOG wins over both)
    #[arg(long, env = "SSM_LOG")]
    log: Option<String>,

    /// Log format: json or text (overrides config)
    #[arg(long, env = "SSM_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt fragments into a secret envelope (JSON)
    Hide {
        /// Private fragment (repeatable, kept in order)
        #[arg(long, short = 'f')]
        fragment: Vec<String>,
        /// Read a private fragment from a file (repeatable, after --fragment)
        #[arg(long)]
        fragment_file: Vec<PathBuf>,
        /// Public metadata entry key=value (value parsed as JSON when possible)
        #[arg(long = "public", value_name = "KEY=VALUE")]
        public: Vec<String>,
        /// Protected metadata entry key=value (value parsed as JSON when possible)
        #[arg(long = "protected", value_name = "KEY=VALUE")]
        protected: Vec<String>,
        /// Encryption tag (default: from config)
        #[arg(long, short = 'e')]
        encryption: Option<String>,
        /// Fragment separator (default: from config)
        #[arg(long, short = 's')]
        separator: Option<String>,
        /// Passphrase (prompted when absent)
        #[arg(long, short = 'k', env = "SSM_KEY", hide_env_values = true)]
        key: Option<String>,
        /// Write the envelope here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Decrypt a secret envelope and print its fragments
    Tell {
        /// Envelope file, or - for stdin
        input: PathBuf,
        /// Passphrase (prompted when absent)
        #[arg(long, short = 'k', env = "SSM_KEY", hide_env_values = true)]
        key: Option<String>,
        /// Print the whole fact as JSON instead of one fragment per line
        #[arg(long)]
        json: bool,
    },

    /// Show the public part of an envelope without decrypting it
    Inspect {
        /// Envelope file, or - for stdin
        input: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, found) = load_config(&cli.config)?;

    init_logging(
        cli.log.as_deref().unwrap_or(&config.logging.level),
        cli.log_format.unwrap_or(config.logging.format),
    );
    if !found {
        tracing::warn!("config file not found: {}  (using defaults)", cli.config.display());
    }

    let ssm = Ssm::from_config(&config.envelope).context("initialising cipher store")?;

    match cli.command {
        Commands::Hide {
            fragment,
            fragment_file,
            public,
            protected,
            encryption,
            separator,
            key,
            output,
        } => {
            let encryption = encryption.unwrap_or_else(|| config.envelope.encryption.clone());
            let mut fact = ssm
                .create(&encryption, separator.as_deref())
                .with_context(|| format!("creating fact with encryption {encryption:?}"))?;

            for f in fragment {
                fact.push(f);
            }
            for path in &fragment_file {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("reading fragment: {}", path.display()))?;
                fact.push(bytes);
            }
            extend_metadata(fact.public_metadata_mut(), &public)?;
            extend_metadata(fact.protected_metadata_mut(), &protected)?;
            drop_empty_metadata(&mut fact);

            cmd_hide(&ssm, &mut fact, &passphrase(key, true)?, output.as_deref())
        }
        Commands::Tell { input, key, json } => {
            cmd_tell(&ssm, &input, &passphrase(key, false)?, json)
        }
        Commands::Inspect { input } => cmd_inspect(&ssm, &input),
        Commands::Config { action: ConfigAction::Show } => cmd_config_show(&config, &cli.config),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_hide(
    ssm: &Ssm,
    fact: &mut Fact,
    key: &SecretString,
    output: Option<&Path>,
) -> Result<()> {
    let secret = fact.hide(ssm, key).context("hiding fact")?;
    let json = secret.to_json_pretty().context("serializing secret")?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("writing secret: {}", path.display()))?;
            tracing::info!("{secret} written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_tell(ssm: &Ssm, input: &Path, key: &SecretString, json: bool) -> Result<()> {
    let data = read_input(input)?;
    let secret = ssm.parse(&data).context("parsing secret")?;
    let fact = secret.tell(ssm, key).context("telling secret")?;

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &fact).context("serializing fact")?;
        writeln!(stdout)?;
    } else {
        for fragment in &fact.private {
            stdout.write_all(fragment)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_inspect(ssm: &Ssm, input: &Path) -> Result<()> {
    let data = read_input(input)?;
    let secret = ssm.parse(&data).context("parsing secret")?;

    println!("{secret}");
    println!("  version:    {}", secret.public.version);
    println!("  encryption: {}", secret.public.encryption);
    println!("  protected:  {} bytes", secret.protected.len());
    match &secret.public.metadata {
        Some(metadata) => println!(
            "  metadata:   {}",
            serde_json::to_string_pretty(metadata).context("serializing metadata")?
        ),
        None => println!("  metadata:   (none)"),
    }
    Ok(())
}

fn cmd_config_show(config: &SsmConfig, config_path: &Path) -> Result<()> {
    println!("# config: {}", config_path.display());
    let rendered = toml::to_string_pretty(config).context("serializing config")?;
    print!("{rendered}");
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Load config from `path`, falling back to defaults when the file is absent.
/// The flag reports whether the file was found.
fn load_config(path: &Path) -> Result<(SsmConfig, bool)> {
    Ok(match SsmConfig::load(path)? {
        Some(config) => (config, true),
        None => (SsmConfig::default(), false),
    })
}

fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("reading secret from stdin")?;
        Ok(data)
    } else {
        std::fs::read(input).with_context(|| format!("reading secret: {}", input.display()))
    }
}

/// Passphrase from the flag/env, else an interactive prompt.
fn passphrase(key: Option<String>, confirm: bool) -> Result<SecretString> {
    if let Some(key) = key {
        return Ok(SecretString::from(key));
    }

    let first = rpassword::prompt_password("Passphrase: ").context("reading passphrase")?;
    if confirm {
        let second =
            rpassword::prompt_password("Confirm passphrase: ").context("reading passphrase")?;
        if first != second {
            anyhow::bail!("passphrases do not match");
        }
    }
    Ok(SecretString::from(first))
}

/// Parse `key=value` pairs into `metadata`. Values that are valid JSON keep
/// their type (`keys=1` is a number); anything else is stored as a string.
fn extend_metadata(metadata: &mut Metadata, pairs: &[String]) -> Result<()> {
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("metadata entry {pair:?} is not KEY=VALUE"))?;
        if key.is_empty() {
            anyhow::bail!("metadata entry {pair:?} has an empty key");
        }
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        metadata.insert(key.to_string(), value);
    }
    Ok(())
}

/// Keep `metadata: null` on the wire when no entries were given.
fn drop_empty_metadata(fact: &mut Fact) {
    if fact.public.metadata.as_ref().is_some_and(|m| m.is_empty()) {
        fact.public.metadata = None;
    }
    if fact.protected.metadata.as_ref().is_some_and(|m| m.is_empty()) {
        fact.protected.metadata = None;
    }
}
