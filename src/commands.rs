//! CLI commands for ndkwrap
//!
//! Each command takes the merged configuration (file + flags) and runs one
//! resolution against it.

use std::path::PathBuf;
use anyhow::Result;
use clap::ValueEnum;
use tracing::info;

use ndkwrap_android_toolchain::{
    EnvFileWriter, ResolutionRequest, Resolver, ToolchainEnv, HostOs,
};
use ndkwrap_core::AppConfig;

/// How the variable mapping is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `export KEY='value'` lines (`set KEY=value` for Windows hosts)
    #[default]
    Shell,
    /// `KEY=value` lines
    Dotenv,
    /// A flat JSON object
    Json,
}

impl OutputFormat {
    pub fn render(&self, env: &ToolchainEnv, host_os: HostOs) -> Result<String> {
        Ok(match self {
            OutputFormat::Shell => env.shell_exports(host_os),
            OutputFormat::Dotenv => env.dotenv(),
            OutputFormat::Json => format!("{}\n", env.to_json()?),
        })
    }
}

/// Validate the configured settings into a request
pub fn build_request(config: &AppConfig) -> Result<ResolutionRequest> {
    let request = ResolutionRequest::from_settings(&config.settings)?
        .with_ndk_override(config.ndk.path.clone());
    Ok(request)
}

fn resolver(config: &AppConfig) -> Result<Resolver> {
    Ok(Resolver::new(build_request(config)?).with_template(config.output.template.clone()))
}

/// Print the variable mapping without writing anything
pub struct EnvCommand {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl EnvCommand {
    pub fn execute(&self) -> Result<String> {
        let resolver = resolver(&self.config)?;
        let resolution = resolver.plan(&resolver.locator(), &self.config.output.dir)?;
        self.format.render(&resolution.env, resolver.request().host_os)
    }
}

/// Write the toolchain file, optional env files, and print the mapping
pub struct PackageCommand {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub dotenv: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl PackageCommand {
    pub async fn execute(&self) -> Result<String> {
        let resolver = resolver(&self.config)?;
        let resolution = resolver.resolve(&resolver.locator(), &self.config.output.dir)?;
        let host_os = resolver.request().host_os;

        if let Some(path) = &self.dotenv {
            EnvFileWriter::write_dotenv(path, &resolution.env).await?;
        }
        if let Some(path) = &self.script {
            EnvFileWriter::write_shell_script(path, &resolution.env, host_os).await?;
        }

        info!("Toolchain file: {}", resolution.toolchain_file.display());
        self.format.render(&resolution.env, host_os)
    }
}

/// Describe the NDK and identifiers a request resolves to
pub struct InfoCommand {
    pub config: AppConfig,
    pub json: bool,
}

impl InfoCommand {
    pub fn execute(&self) -> Result<String> {
        let resolver = resolver(&self.config)?;
        let resolution = resolver.plan(&resolver.locator(), &self.config.output.dir)?;

        if self.json {
            return Ok(format!("{}\n", serde_json::to_string_pretty(&resolution)?));
        }

        let ids = &resolution.identifiers;
        let mut out = String::new();
        out.push_str(&format!("NDK:            {}\n", resolution.ndk.home.display()));
        out.push_str(&format!("Revision:       {}\n", resolution.ndk.revision));
        out.push_str(&format!("Host tag:       {}\n", ids.host_tag));
        out.push_str(&format!("ABI:            {}\n", ids.abi_tag));
        out.push_str(&format!("LLVM triplet:   {}\n", ids.llvm_triplet));
        out.push_str(&format!("Clang triplet:  {}\n", ids.clang_triplet));
        out.push_str(&format!("Sysroot:        {}\n", resolution.sysroot.display()));
        Ok(out)
    }
}

/// Configuration file actions
pub enum ConfigAction {
    /// Write the effective configuration to disk
    Init { path: PathBuf, force: bool },
    /// Print the effective configuration
    Show,
}

/// Config management command
pub struct ConfigCommand {
    pub config: AppConfig,
    pub action: ConfigAction,
}

impl ConfigCommand {
    pub async fn execute(&self) -> Result<String> {
        match &self.action {
            ConfigAction::Init { path, force } => {
                if path.exists() && !force {
                    anyhow::bail!("{} already exists, pass --force to overwrite", path.display());
                }
                self.config.save_to(path).await?;
                Ok(format!("Wrote {}\n", path.display()))
            }
            ConfigAction::Show => Ok(toml::to_string_pretty(&self.config)?),
        }
    }
}
