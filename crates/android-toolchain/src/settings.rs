//! Resolution settings
//!
//! Typed host/target settings validated from the raw settings record.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use ndkwrap_core::{Result, SettingsConfig, WrapperError};

/// Build machine operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostOs {
    Windows,
    Linux,
    Macos,
}

impl HostOs {
    /// Detect the OS this process runs on
    pub fn current() -> Result<Self> {
        Self::from_consts(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value
    pub fn from_consts(os: &str) -> Result<Self> {
        match os {
            "windows" => Ok(HostOs::Windows),
            "linux" => Ok(HostOs::Linux),
            "macos" => Ok(HostOs::Macos),
            other => Err(WrapperError::UnsupportedHost(format!(
                "no NDK prebuilt toolchain for OS `{}`",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostOs::Windows => "Windows",
            HostOs::Linux => "Linux",
            HostOs::Macos => "Macos",
        }
    }
}

impl FromStr for HostOs {
    type Err = WrapperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(HostOs::Windows),
            "linux" => Ok(HostOs::Linux),
            "macos" => Ok(HostOs::Macos),
            _ => Err(WrapperError::invalid(
                "os_build",
                format!("`{}` is not one of Windows, Linux, Macos", s),
            )),
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build machine architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostArch {
    X86,
    X86_64,
}

impl HostArch {
    /// Detect the architecture this process runs on
    pub fn current() -> Result<Self> {
        Self::from_consts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map `std::env::consts::{OS, ARCH}` values
    pub fn from_consts(os: &str, arch: &str) -> Result<Self> {
        match arch {
            "x86" => Ok(HostArch::X86),
            "x86_64" => Ok(HostArch::X86_64),
            // Apple silicon runs the darwin-x86_64 prebuilts, which are universal binaries.
            "aarch64" if os == "macos" => Ok(HostArch::X86_64),
            other => Err(WrapperError::UnsupportedHost(format!(
                "no NDK prebuilt toolchain for architecture `{}`",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostArch::X86 => "x86",
            HostArch::X86_64 => "x86_64",
        }
    }
}

impl FromStr for HostArch {
    type Err = WrapperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x86" => Ok(HostArch::X86),
            "x86_64" => Ok(HostArch::X86_64),
            _ => Err(WrapperError::invalid(
                "arch_build",
                format!("`{}` is not one of x86, x86_64", s),
            )),
        }
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Android target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetArch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl TargetArch {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetArch::X86 => "x86",
            TargetArch::X86_64 => "x86_64",
            TargetArch::Armv7 => "armv7",
            TargetArch::Armv8 => "armv8",
        }
    }

    /// Get all supported target architectures
    pub fn all() -> &'static [TargetArch] {
        &[
            TargetArch::X86,
            TargetArch::X86_64,
            TargetArch::Armv7,
            TargetArch::Armv8,
        ]
    }
}

impl FromStr for TargetArch {
    type Err = WrapperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x86" => Ok(TargetArch::X86),
            "x86_64" => Ok(TargetArch::X86_64),
            "armv7" => Ok(TargetArch::Armv7),
            "armv8" => Ok(TargetArch::Armv8),
            _ => Err(WrapperError::invalid(
                "arch",
                format!("`{}` is not one of x86, x86_64, armv7, armv8", s),
            )),
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input of a single resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionRequest {
    pub host_os: HostOs,
    pub host_arch: HostArch,
    pub target_arch: TargetArch,
    pub api_level: u32,
    /// C++ runtime, exported as `ANDROID_STL`
    pub runtime_library: String,
    /// Explicit NDK location, preferred over the environment
    pub ndk_override: Option<PathBuf>,
}

impl ResolutionRequest {
    /// Validate a raw settings record.
    ///
    /// Unset host settings are detected from the running machine.
    pub fn from_settings(settings: &SettingsConfig) -> Result<Self> {
        if !settings.compiler.eq_ignore_ascii_case("clang") {
            return Err(WrapperError::invalid(
                "compiler",
                format!("`{}` is not supported, the NDK only ships clang", settings.compiler),
            ));
        }
        if !settings.os.eq_ignore_ascii_case("android") {
            return Err(WrapperError::invalid(
                "os",
                format!("`{}` is not supported, only Android is", settings.os),
            ));
        }

        let host_os = match settings.os_build.as_deref() {
            Some(os) => os.parse()?,
            None => HostOs::current()?,
        };
        let host_arch = match settings.arch_build.as_deref() {
            Some(arch) => arch.parse()?,
            None => HostArch::current()?,
        };
        let target_arch = settings
            .arch
            .as_deref()
            .ok_or_else(|| WrapperError::invalid("arch", "missing"))?
            .parse()?;

        let api_level = match settings.os_api_level {
            Some(0) => return Err(WrapperError::invalid("os_api_level", "must be positive")),
            Some(level) => level,
            None => return Err(WrapperError::invalid("os_api_level", "missing")),
        };

        let runtime_library = match settings.compiler_libcxx.as_deref() {
            Some(lib) if !lib.trim().is_empty() => lib.to_string(),
            _ => return Err(WrapperError::invalid("compiler_libcxx", "missing")),
        };

        Ok(Self {
            host_os,
            host_arch,
            target_arch,
            api_level,
            runtime_library,
            ndk_override: None,
        })
    }

    /// Set the explicit NDK location
    pub fn with_ndk_override(mut self, path: Option<PathBuf>) -> Self {
        self.ndk_override = path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndkwrap_core::AppConfig;

    fn settings() -> SettingsConfig {
        SettingsConfig {
            os_build: Some("Linux".to_string()),
            arch_build: Some("x86_64".to_string()),
            arch: Some("armv8".to_string()),
            os_api_level: Some(21),
            compiler_libcxx: Some("c++_shared".to_string()),
            ..Default::default()
        }
    }

    fn invalid_field(err: WrapperError) -> &'static str {
        match err {
            WrapperError::InvalidSettings { field, .. } => field,
            other => panic!("expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Windows".parse::<HostOs>().unwrap(), HostOs::Windows);
        assert_eq!("macos".parse::<HostOs>().unwrap(), HostOs::Macos);
        assert_eq!("x86".parse::<HostArch>().unwrap(), HostArch::X86);
        assert_eq!("armv7".parse::<TargetArch>().unwrap(), TargetArch::Armv7);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(invalid_field("FreeBSD".parse::<HostOs>().unwrap_err()), "os_build");
        assert_eq!(invalid_field("armv8".parse::<HostArch>().unwrap_err()), "arch_build");
        assert_eq!(invalid_field("mips".parse::<TargetArch>().unwrap_err()), "arch");
    }

    #[test]
    fn test_host_detection() {
        assert_eq!(HostOs::from_consts("linux").unwrap(), HostOs::Linux);
        assert_eq!(HostOs::from_consts("macos").unwrap(), HostOs::Macos);
        assert!(matches!(
            HostOs::from_consts("freebsd").unwrap_err(),
            WrapperError::UnsupportedHost(_)
        ));

        assert_eq!(HostArch::from_consts("linux", "x86_64").unwrap(), HostArch::X86_64);
        assert_eq!(HostArch::from_consts("macos", "aarch64").unwrap(), HostArch::X86_64);
        assert!(matches!(
            HostArch::from_consts("linux", "aarch64").unwrap_err(),
            WrapperError::UnsupportedHost(_)
        ));
    }

    #[test]
    fn test_from_settings() {
        let request = ResolutionRequest::from_settings(&settings()).unwrap();
        assert_eq!(request.host_os, HostOs::Linux);
        assert_eq!(request.host_arch, HostArch::X86_64);
        assert_eq!(request.target_arch, TargetArch::Armv8);
        assert_eq!(request.api_level, 21);
        assert_eq!(request.runtime_library, "c++_shared");
        assert!(request.ndk_override.is_none());
    }

    #[test]
    fn test_missing_api_level() {
        let mut s = settings();
        s.os_api_level = None;
        let err = ResolutionRequest::from_settings(&s).unwrap_err();
        assert_eq!(invalid_field(err), "os_api_level");

        s.os_api_level = Some(0);
        let err = ResolutionRequest::from_settings(&s).unwrap_err();
        assert_eq!(invalid_field(err), "os_api_level");
    }

    #[test]
    fn test_missing_target_arch() {
        let mut s = settings();
        s.arch = None;
        assert_eq!(invalid_field(ResolutionRequest::from_settings(&s).unwrap_err()), "arch");
    }

    #[test]
    fn test_rejects_non_clang_and_non_android() {
        let mut s = settings();
        s.compiler = "gcc".to_string();
        assert_eq!(invalid_field(ResolutionRequest::from_settings(&s).unwrap_err()), "compiler");

        let mut s = settings();
        s.os = "iOS".to_string();
        assert_eq!(invalid_field(ResolutionRequest::from_settings(&s).unwrap_err()), "os");
    }

    #[test]
    fn test_runtime_from_toml_is_required() {
        let config = AppConfig::from_toml(
            r#"
[settings]
os_build = "Linux"
arch_build = "x86_64"
arch = "armv8"
os_api_level = 21
"#,
        )
        .unwrap();
        let err = ResolutionRequest::from_settings(&config.settings).unwrap_err();
        assert_eq!(invalid_field(err), "compiler_libcxx");

        let config = AppConfig::from_toml(
            r#"
[settings]
os_build = "Linux"
arch_build = "x86_64"
arch = "armv8"
os_api_level = 21
compiler_libcxx = "c++_static"
"#,
        )
        .unwrap();
        let request = ResolutionRequest::from_settings(&config.settings).unwrap();
        assert_eq!(request.runtime_library, "c++_static");
    }

    #[test]
    fn test_rejects_empty_runtime() {
        let mut s = settings();
        s.compiler_libcxx = Some("  ".to_string());
        assert_eq!(
            invalid_field(ResolutionRequest::from_settings(&s).unwrap_err()),
            "compiler_libcxx"
        );
    }
}
