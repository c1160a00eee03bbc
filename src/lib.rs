//! ndkwrap - Android NDK toolchain resolver
//!
//! Locates an installed Android NDK and turns host/target settings into the
//! environment a cross build needs: clang and binutils-style tool paths,
//! sysroot, ABI and API level, plus a generated CMake toolchain file.
//!
//! ## Architecture
//!
//! - `ndkwrap-core`: error type and configuration
//! - `ndkwrap-android-toolchain`: settings validation, NDK discovery and the resolver
//! - `commands` (this crate): the CLI commands built on top of both

#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use ndkwrap_core as core;
pub use ndkwrap_android_toolchain as toolchain;

/// Prelude module for convenient imports
pub mod prelude {
    pub use ndkwrap_core::{AppConfig, WrapperError};
    pub use ndkwrap_android_toolchain::{NdkLocator, ResolutionRequest, Resolver};
}
