//! Target identifiers
//!
//! Table lookups that turn host/target settings into the names the NDK
//! uses on disk: platform tag, host tag, ABI tag and the two triplets.

use serde::Serialize;

use crate::settings::{HostArch, HostOs, ResolutionRequest, TargetArch};

/// Identifiers derived from a request. Computed, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedIdentifiers {
    /// `windows`, `darwin` or `linux`
    pub platform_tag: &'static str,
    /// Name of the `toolchains/llvm/prebuilt` subdirectory
    pub host_tag: String,
    /// Android ABI name, e.g. `arm64-v8a`
    pub abi_tag: &'static str,
    /// GNU-style triplet used to prefix binutils-style tools
    pub llvm_triplet: String,
    /// Triplet used by the API-level clang wrapper scripts
    pub clang_triplet: String,
}

/// NDK platform tag for the host OS
pub fn platform_tag(os: HostOs) -> &'static str {
    match os {
        HostOs::Windows => "windows",
        HostOs::Macos => "darwin",
        HostOs::Linux => "linux",
    }
}

/// Prebuilt directory name for the host
pub fn host_tag(os: HostOs, arch: HostArch) -> String {
    let platform = platform_tag(os);
    match arch {
        HostArch::X86 => platform.to_string(),
        HostArch::X86_64 => format!("{}-x86_64", platform),
    }
}

/// Android ABI name for the target
pub fn abi_tag(arch: TargetArch) -> &'static str {
    match arch {
        TargetArch::X86 => "x86",
        TargetArch::X86_64 => "x86_64",
        TargetArch::Armv7 => "armeabi-v7a",
        TargetArch::Armv8 => "arm64-v8a",
    }
}

fn llvm_arch(arch: TargetArch) -> &'static str {
    match arch {
        TargetArch::Armv7 => "arm",
        TargetArch::Armv8 => "aarch64",
        TargetArch::X86 => "i686",
        TargetArch::X86_64 => "x86_64",
    }
}

fn clang_arch(arch: TargetArch) -> &'static str {
    match arch {
        TargetArch::Armv7 => "armv7a",
        TargetArch::Armv8 => "aarch64",
        TargetArch::X86 => "i686",
        TargetArch::X86_64 => "x86_64",
    }
}

fn abi_suffix(arch: TargetArch) -> &'static str {
    match arch {
        TargetArch::Armv7 => "androideabi",
        _ => "android",
    }
}

/// Triplet prefixing the non-clang tools, e.g. `arm-linux-androideabi`
pub fn llvm_triplet(arch: TargetArch) -> String {
    format!("{}-linux-{}", llvm_arch(arch), abi_suffix(arch))
}

/// Triplet prefixing the clang wrappers, e.g. `armv7a-linux-androideabi`
pub fn clang_triplet(arch: TargetArch) -> String {
    format!("{}-linux-{}", clang_arch(arch), abi_suffix(arch))
}

/// Derive every identifier for a request
pub fn resolve_identifiers(request: &ResolutionRequest) -> DerivedIdentifiers {
    DerivedIdentifiers {
        platform_tag: platform_tag(request.host_os),
        host_tag: host_tag(request.host_os, request.host_arch),
        abi_tag: abi_tag(request.target_arch),
        llvm_triplet: llvm_triplet(request.target_arch),
        clang_triplet: clang_triplet(request.target_arch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_tags() {
        assert_eq!(abi_tag(TargetArch::X86), "x86");
        assert_eq!(abi_tag(TargetArch::X86_64), "x86_64");
        assert_eq!(abi_tag(TargetArch::Armv7), "armeabi-v7a");
        assert_eq!(abi_tag(TargetArch::Armv8), "arm64-v8a");
    }

    #[test]
    fn test_triplets_differ_only_for_armv7() {
        assert_eq!(llvm_triplet(TargetArch::Armv7), "arm-linux-androideabi");
        assert_eq!(clang_triplet(TargetArch::Armv7), "armv7a-linux-androideabi");

        for arch in [TargetArch::X86, TargetArch::X86_64, TargetArch::Armv8] {
            assert_eq!(llvm_triplet(arch), clang_triplet(arch));
        }
        assert_eq!(llvm_triplet(TargetArch::X86), "i686-linux-android");
        assert_eq!(llvm_triplet(TargetArch::X86_64), "x86_64-linux-android");
        assert_eq!(llvm_triplet(TargetArch::Armv8), "aarch64-linux-android");
    }

    #[test]
    fn test_host_tags() {
        for (os, tag) in [
            (HostOs::Windows, "windows"),
            (HostOs::Macos, "darwin"),
            (HostOs::Linux, "linux"),
        ] {
            assert_eq!(platform_tag(os), tag);
            assert_eq!(host_tag(os, HostArch::X86), tag);
            assert_eq!(host_tag(os, HostArch::X86_64), format!("{}-x86_64", tag));
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for &arch in TargetArch::all() {
            let request = ResolutionRequest {
                host_os: HostOs::Linux,
                host_arch: HostArch::X86_64,
                target_arch: arch,
                api_level: 21,
                runtime_library: "c++_static".to_string(),
                ndk_override: None,
            };
            assert_eq!(resolve_identifiers(&request), resolve_identifiers(&request));
        }
    }
}
