//! NDK Discovery
//!
//! Locates an installed Android NDK and reads its revision.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{debug, info};

use ndkwrap_core::{Result, WrapperError};

use crate::NDK_HOME_ENV;

/// Metadata file shipped at the NDK root
pub const SOURCE_PROPERTIES: &str = "source.properties";

const REVISION_KEY: &str = "Pkg.Revision";

/// Where to look for the NDK
#[derive(Debug, Clone, Default)]
pub struct NdkLocator {
    /// Explicit path, preferred when non-empty
    pub override_path: Option<PathBuf>,
    /// Value of `ANDROID_NDK_HOME`, used when there is no override
    pub env_value: Option<OsString>,
}

impl NdkLocator {
    /// Create a locator with an explicit path and the current `ANDROID_NDK_HOME`
    pub fn from_env(override_path: Option<PathBuf>) -> Self {
        Self {
            override_path,
            env_value: std::env::var_os(NDK_HOME_ENV),
        }
    }

    /// The NDK root chosen by precedence, without touching the filesystem
    pub fn candidate(&self) -> Option<PathBuf> {
        if let Some(path) = self.override_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            debug!("Using explicit NDK path {:?}", path);
            return Some(path.clone());
        }
        if let Some(value) = self.env_value.as_ref().filter(|v| !v.is_empty()) {
            debug!("Using NDK path from {}: {:?}", NDK_HOME_ENV, value);
            return Some(PathBuf::from(value));
        }
        None
    }

    /// Find and validate the NDK for the given prebuilt host tag
    pub fn locate(&self, host_tag: &str) -> Result<NdkInstallation> {
        let home = self.candidate().ok_or_else(|| {
            WrapperError::NdkNotFound(format!("no NDK path given and {} is not set", NDK_HOME_ENV))
        })?;

        if !home.is_dir() {
            return Err(WrapperError::NdkNotFound(format!(
                "{} is not a directory",
                home.display()
            )));
        }

        let revision = parse_revision(&home.join(SOURCE_PROPERTIES))?;

        let prebuilt = home
            .join("toolchains")
            .join("llvm")
            .join("prebuilt")
            .join(host_tag);
        if !prebuilt.is_dir() {
            return Err(WrapperError::NdkNotFound(format!(
                "{} has no prebuilt toolchain for host `{}`",
                home.display(),
                host_tag
            )));
        }

        info!("Found Android NDK {} at {:?}", revision, home);

        Ok(NdkInstallation {
            home,
            revision,
            host_tag: host_tag.to_string(),
            prebuilt,
        })
    }
}

/// A validated NDK installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NdkInstallation {
    /// NDK root directory
    pub home: PathBuf,
    /// `Pkg.Revision` from `source.properties`
    pub revision: String,
    pub host_tag: String,
    /// `toolchains/llvm/prebuilt/<host_tag>`
    pub prebuilt: PathBuf,
}

impl NdkInstallation {
    pub fn bin_dir(&self) -> PathBuf {
        self.prebuilt.join("bin")
    }

    pub fn sysroot(&self) -> PathBuf {
        self.prebuilt.join("sysroot")
    }
}

/// Read the NDK revision from a `source.properties` file.
///
/// Any read failure is reported as `RevisionMissing`.
pub fn parse_revision(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| WrapperError::RevisionMissing {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_revision_str(&content).ok_or_else(|| WrapperError::RevisionMissing {
        path: path.to_path_buf(),
        reason: format!("no `{} = <value>` line", REVISION_KEY),
    })
}

/// Extract `Pkg.Revision` from properties text. The last matching line wins.
pub fn parse_revision_str(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            (key.trim() == REVISION_KEY && !value.is_empty()).then(|| value.to_string())
        })
        .last()
}
