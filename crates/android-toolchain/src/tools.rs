//! Toolchain binaries
//!
//! Maps the logical tools a build needs onto NDK prebuilt file names.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::settings::HostOs;
use crate::triplet::DerivedIdentifiers;

/// A tool exported to the build environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Cc,
    Cxx,
    Ld,
    Ar,
    As,
    Ranlib,
    Strip,
    Addr2line,
    Nm,
    Objcopy,
    Objdump,
    Readelf,
    Elfedit,
}

impl Tool {
    /// Get all tools, in export order
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Cc,
            Tool::Cxx,
            Tool::Ld,
            Tool::Ar,
            Tool::As,
            Tool::Ranlib,
            Tool::Strip,
            Tool::Addr2line,
            Tool::Nm,
            Tool::Objcopy,
            Tool::Objdump,
            Tool::Readelf,
            Tool::Elfedit,
        ]
    }

    /// Environment variable the path is exported as
    pub fn env_name(&self) -> &'static str {
        match self {
            Tool::Cc => "CC",
            Tool::Cxx => "CXX",
            Tool::Ld => "LD",
            Tool::Ar => "AR",
            Tool::As => "AS",
            Tool::Ranlib => "RANLIB",
            Tool::Strip => "STRIP",
            Tool::Addr2line => "ADDR2LINE",
            Tool::Nm => "NM",
            Tool::Objcopy => "OBJCOPY",
            Tool::Objdump => "OBJDUMP",
            Tool::Readelf => "READELF",
            Tool::Elfedit => "ELFEDIT",
        }
    }

    /// Program name as it appears in the NDK file name
    pub fn program(&self) -> &'static str {
        match self {
            Tool::Cc => "clang",
            Tool::Cxx => "clang++",
            Tool::Ld => "ld",
            Tool::Ar => "ar",
            Tool::As => "as",
            Tool::Ranlib => "ranlib",
            Tool::Strip => "strip",
            Tool::Addr2line => "addr2line",
            Tool::Nm => "nm",
            Tool::Objcopy => "objcopy",
            Tool::Objdump => "objdump",
            Tool::Readelf => "readelf",
            Tool::Elfedit => "elfedit",
        }
    }

    /// Clang tools are API-level wrapper scripts
    pub fn is_clang(&self) -> bool {
        self.program().contains("clang")
    }
}

/// File name of `tool` inside the prebuilt `bin` directory
pub fn tool_file_name(
    tool: Tool,
    ids: &DerivedIdentifiers,
    host_os: HostOs,
    api_level: u32,
) -> String {
    let windows = host_os == HostOs::Windows;
    if tool.is_clang() {
        let suffix = if windows { ".cmd" } else { "" };
        format!("{}{}-{}{}", ids.clang_triplet, api_level, tool.program(), suffix)
    } else {
        let suffix = if windows { ".exe" } else { "" };
        format!("{}-{}{}", ids.llvm_triplet, tool.program(), suffix)
    }
}

/// Resolved tool paths, in `Tool::all()` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    entries: Vec<(Tool, PathBuf)>,
}

impl ToolPaths {
    pub fn get(&self, tool: Tool) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tool)
            .map(|(_, path)| path.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tool, &Path)> {
        self.entries.iter().map(|(tool, path)| (*tool, path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the path of every tool under `<prebuilt>/bin`
pub fn resolve_tool_paths(
    prebuilt: &Path,
    ids: &DerivedIdentifiers,
    host_os: HostOs,
    api_level: u32,
) -> ToolPaths {
    let bin_dir = prebuilt.join("bin");
    let entries = Tool::all()
        .iter()
        .map(|&tool| {
            let path = bin_dir.join(tool_file_name(tool, ids, host_os, api_level));
            info!("Creating {} environment variable: {}", tool.env_name(), path.display());
            (tool, path)
        })
        .collect();

    ToolPaths { entries }
}
