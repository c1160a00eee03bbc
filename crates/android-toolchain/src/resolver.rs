//! Toolchain Resolver
//!
//! Runs a full resolution: identifiers, NDK discovery, tool paths, the
//! exported mapping and finally the toolchain file. The file is written last,
//! so a failed resolution never hands back a mapping.

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{debug, info};

use ndkwrap_core::Result;

use crate::env::{assemble_env, ToolchainEnv};
use crate::ndk::{NdkInstallation, NdkLocator};
use crate::settings::ResolutionRequest;
use crate::toolchain_file::{write_bundled_toolchain_file, write_toolchain_file, TOOLCHAIN_FILE_NAME};
use crate::tools::{resolve_tool_paths, ToolPaths};
use crate::triplet::{resolve_identifiers, DerivedIdentifiers};

/// Result of a successful resolution
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub identifiers: DerivedIdentifiers,
    pub ndk: NdkInstallation,
    #[serde(skip)]
    pub tools: ToolPaths,
    pub sysroot: PathBuf,
    /// Location of the generated CMake toolchain file
    pub toolchain_file: PathBuf,
    pub env: ToolchainEnv,
}

/// Resolves one request against the filesystem
pub struct Resolver {
    request: ResolutionRequest,
    template: Option<PathBuf>,
}

impl Resolver {
    pub fn new(request: ResolutionRequest) -> Self {
        Self {
            request,
            template: None,
        }
    }

    /// Use a custom toolchain template instead of the bundled one
    pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
        self.template = template;
        self
    }

    pub fn request(&self) -> &ResolutionRequest {
        &self.request
    }

    /// Locator for this request: its override, then `ANDROID_NDK_HOME`
    pub fn locator(&self) -> NdkLocator {
        NdkLocator::from_env(self.request.ndk_override.clone())
    }

    /// Resolve everything without writing; the toolchain file path points into `output_dir`
    pub fn plan(&self, locator: &NdkLocator, output_dir: &Path) -> Result<Resolution> {
        let identifiers = resolve_identifiers(&self.request);
        debug!(
            "Resolving {} (API {}) on host {}",
            identifiers.clang_triplet, self.request.api_level, identifiers.host_tag
        );

        let ndk = locator.locate(&identifiers.host_tag)?;
        let tools = resolve_tool_paths(
            &ndk.prebuilt,
            &identifiers,
            self.request.host_os,
            self.request.api_level,
        );
        let toolchain_file = output_dir.join(TOOLCHAIN_FILE_NAME);
        let env = assemble_env(&ndk, &identifiers, &self.request, &toolchain_file, &tools);

        Ok(Resolution {
            sysroot: ndk.sysroot(),
            identifiers,
            ndk,
            tools,
            toolchain_file,
            env,
        })
    }

    /// Resolve and write the toolchain file into `output_dir`
    pub fn resolve(&self, locator: &NdkLocator, output_dir: &Path) -> Result<Resolution> {
        let resolution = self.plan(locator, output_dir)?;

        match &self.template {
            Some(template) => {
                write_toolchain_file(template, &resolution.toolchain_file, &resolution.ndk.home)?
            }
            None => write_bundled_toolchain_file(&resolution.toolchain_file, &resolution.ndk.home)?,
        }

        info!(
            "Resolved {} toolchain for {} from NDK {}",
            resolution.identifiers.abi_tag, resolution.identifiers.host_tag, resolution.ndk.revision
        );
        Ok(resolution)
    }
}
