//! ndkwrap - Android NDK toolchain resolver
//!
//! Entry point: parses flags, initializes logging, merges flags into the
//! configuration and runs one command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ndkwrap::commands::{
    ConfigAction, ConfigCommand, EnvCommand, InfoCommand, OutputFormat, PackageCommand,
};
use ndkwrap_core::{AppConfig, WrapperError, APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "ndkwrap", version, about = "Resolve Android NDK toolchains for CMake and make-style builds")]
struct Cli {
    /// Configuration file (defaults to the per-user config file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the toolchain environment without writing any file
    Env {
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Write WrappedToolchain.cmake and print the toolchain environment
    Package {
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
        /// Also write the environment as a .env file
        #[arg(long)]
        dotenv: Option<PathBuf>,
        /// Also write the environment as a shell script
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Show the NDK and target identifiers a request resolves to
    Info {
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigSubcommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    /// Write the current configuration to the config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Flags overriding the `[settings]`, `[ndk]` and `[output]` config sections
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// Build machine OS (Windows, Linux, Macos)
    #[arg(long)]
    os_build: Option<String>,
    /// Build machine architecture (x86, x86_64)
    #[arg(long)]
    arch_build: Option<String>,
    /// Target architecture (x86, x86_64, armv7, armv8)
    #[arg(long)]
    arch: Option<String>,
    /// Target Android API level
    #[arg(long)]
    api_level: Option<u32>,
    /// C++ runtime exported as ANDROID_STL
    #[arg(long)]
    stl: Option<String>,
    /// NDK root, takes precedence over ANDROID_NDK_HOME
    #[arg(long)]
    ndk_path: Option<PathBuf>,
    /// Directory WrappedToolchain.cmake is written into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Custom toolchain template
    #[arg(long)]
    template: Option<PathBuf>,
}

impl SettingsArgs {
    fn apply(self, config: &mut AppConfig) {
        if self.os_build.is_some() {
            config.settings.os_build = self.os_build;
        }
        if self.arch_build.is_some() {
            config.settings.arch_build = self.arch_build;
        }
        if self.arch.is_some() {
            config.settings.arch = self.arch;
        }
        if self.api_level.is_some() {
            config.settings.os_api_level = self.api_level;
        }
        if self.stl.is_some() {
            config.settings.compiler_libcxx = self.stl;
        }
        if self.ndk_path.is_some() {
            config.ndk.path = self.ndk_path;
        }
        if let Some(dir) = self.output_dir {
            config.output.dir = dir;
        }
        if self.template.is_some() {
            config.output.template = self.template;
        }
    }
}

/// Main entry point
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<WrapperError>() {
            Some(e) => {
                error!("{}", e.user_message());
                ExitCode::from(e.exit_code())
            }
            None => {
                error!("{:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Load `path`, or use defaults when no config location is known
async fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::load_from(path).await?),
        None => {
            debug!("No config directory available, using defaults");
            Ok(AppConfig::default())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    debug!("{} v{} starting", APP_NAME, VERSION);

    let config_path = cli.config.or_else(AppConfig::config_file);
    let mut config = load_config(config_path.as_deref()).await?;

    let output = match cli.command {
        Command::Env { settings, format } => {
            settings.apply(&mut config);
            EnvCommand { config, format }.execute()?
        }
        Command::Package {
            settings,
            format,
            dotenv,
            script,
        } => {
            settings.apply(&mut config);
            PackageCommand {
                config,
                format,
                dotenv,
                script,
            }
            .execute()
            .await?
        }
        Command::Info { settings, json } => {
            settings.apply(&mut config);
            InfoCommand { config, json }.execute()?
        }
        Command::Config { action } => {
            let action = match action {
                ConfigSubcommand::Init { force } => ConfigAction::Init {
                    path: config_path.ok_or_else(|| {
                        WrapperError::Config("Cannot determine config path, pass --config".into())
                    })?,
                    force,
                },
                ConfigSubcommand::Show => ConfigAction::Show,
            };
            ConfigCommand { config, action }.execute().await?
        }
    };

    print!("{}", output);
    Ok(())
}
