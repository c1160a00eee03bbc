//! Android NDK Toolchain Resolution
//!
//! Turns host/target settings into:
//! - Paths of the NDK's prebuilt clang and binutils-style tools
//! - Build environment variables (sysroot, ABI, CMake find-root modes)
//! - A generated CMake toolchain file wrapping the NDK's own

pub mod env;
pub mod ndk;
pub mod resolver;
pub mod settings;
pub mod toolchain_file;
pub mod tools;
pub mod triplet;

#[cfg(test)]
mod test_support;

pub use env::{assemble_env, EnvFileWriter, ToolchainEnv, TOOLCHAIN_FILE_VAR};
pub use ndk::{parse_revision, NdkInstallation, NdkLocator};
pub use resolver::{Resolution, Resolver};
pub use settings::{HostArch, HostOs, ResolutionRequest, TargetArch};
pub use toolchain_file::{
    render_template, write_bundled_toolchain_file, write_toolchain_file, NDK_HOME_PLACEHOLDER,
    TOOLCHAIN_FILE_NAME,
};
pub use tools::{resolve_tool_paths, Tool, ToolPaths};
pub use triplet::{resolve_identifiers, DerivedIdentifiers};

/// Environment variable consulted when no NDK path is given
pub const NDK_HOME_ENV: &str = "ANDROID_NDK_HOME";
