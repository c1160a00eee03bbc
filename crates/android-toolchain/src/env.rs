//! Environment Mapping
//!
//! Assembles the variables a resolution exports and renders them for shells,
//! `.env` files and JSON consumers.

use std::collections::BTreeMap;
use std::path::Path;
use serde::Serialize;
use tracing::info;

use ndkwrap_core::Result;

use crate::ndk::NdkInstallation;
use crate::settings::{HostOs, ResolutionRequest};
use crate::tools::ToolPaths;
use crate::triplet::DerivedIdentifiers;

/// Variable holding the generated CMake toolchain file
pub const TOOLCHAIN_FILE_VAR: &str = "CMAKE_TOOLCHAIN_FILE";

const FIND_ROOT_PATH_MODES: [&str; 4] = [
    "CMAKE_FIND_ROOT_PATH_MODE_PROGRAM",
    "CMAKE_FIND_ROOT_PATH_MODE_LIBRARY",
    "CMAKE_FIND_ROOT_PATH_MODE_INCLUDE",
    "CMAKE_FIND_ROOT_PATH_MODE_PACKAGE",
];

/// Flat variable mapping, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolchainEnv {
    vars: BTreeMap<String, String>,
}

impl ToolchainEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    fn set_path(&mut self, key: impl Into<String>, path: &Path) {
        self.set(key, path.to_string_lossy().to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Shell commands exporting every variable, in the host's shell syntax
    pub fn shell_exports(&self, host_os: HostOs) -> String {
        let mut exports = String::new();

        for (key, value) in self.iter() {
            if host_os == HostOs::Windows {
                exports.push_str(&format!("set {}={}\n", key, value));
            } else {
                exports.push_str(&format!("export {}={}\n", key, single_quote(value)));
            }
        }

        exports
    }

    /// `KEY=value` lines, values with spaces or quotes double-quoted
    pub fn dotenv(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}\n", key, dotenv_value(value)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// POSIX single quoting; nothing inside is expanded by the shell
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn dotenv_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '#' | '\\' | '$' | '`'));
    if needs_quotes {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Build the exported mapping from a finished resolution
pub fn assemble_env(
    install: &NdkInstallation,
    ids: &DerivedIdentifiers,
    request: &ResolutionRequest,
    toolchain_file: &Path,
    tools: &ToolPaths,
) -> ToolchainEnv {
    let mut env = ToolchainEnv::new();
    let sysroot = install.sysroot();

    env.set_path("NDK_HOME", &install.home);
    env.set_path("NDK_ROOT", &install.prebuilt);
    env.set("CHOST", ids.llvm_triplet.clone());
    env.set_path("SYSROOT", &sysroot);
    env.set_path(TOOLCHAIN_FILE_VAR, toolchain_file);

    env.set("ANDROID_NATIVE_API_LEVEL", request.api_level.to_string());
    env.set("ANDROID_TOOLCHAIN", "clang");
    env.set("ANDROID_ABI", ids.abi_tag);
    env.set("ANDROID_STL", request.runtime_library.clone());

    env.set_path("CMAKE_FIND_ROOT_PATH", &sysroot);
    for mode in FIND_ROOT_PATH_MODES {
        env.set(mode, "BOTH");
    }

    for (tool, path) in tools.iter() {
        env.set_path(tool.env_name(), path);
    }

    env
}

/// Environment file writer
pub struct EnvFileWriter;

impl EnvFileWriter {
    /// Write a .env file
    pub async fn write_dotenv(path: &Path, env: &ToolchainEnv) -> std::io::Result<()> {
        let mut content = String::new();
        content.push_str("# Android NDK toolchain environment\n\n");
        content.push_str(&env.dotenv());

        tokio::fs::write(path, content).await?;
        info!("Wrote environment to {:?}", path);
        Ok(())
    }

    /// Write a shell script for environment setup
    pub async fn write_shell_script(
        path: &Path,
        env: &ToolchainEnv,
        host_os: HostOs,
    ) -> std::io::Result<()> {
        let mut content = if host_os == HostOs::Windows {
            "@echo off\nREM Android NDK toolchain environment\n\n".to_string()
        } else {
            "#!/bin/sh\n# Android NDK toolchain environment\n\n".to_string()
        };

        content.push_str(&env.shell_exports(host_os));

        tokio::fs::write(path, content).await?;

        // Make executable on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = tokio::fs::metadata(path).await?.permissions();
            perms.set_mode(0o755);
            tokio::fs::set_permissions(path, perms).await?;
        }

        info!("Wrote shell script to {:?}", path);
        Ok(())
    }
}
