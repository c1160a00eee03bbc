//! CMake toolchain file generation

use std::path::Path;
use tracing::info;

use ndkwrap_core::{Result, WrapperError};

/// Token replaced with the NDK root
pub const NDK_HOME_PLACEHOLDER: &str = "@ANDROID_NDK_HOME@";

/// Name of the generated file
pub const TOOLCHAIN_FILE_NAME: &str = "WrappedToolchain.cmake";

/// Template used when no custom one is configured
pub const BUNDLED_TEMPLATE: &str = include_str!("../templates/WrappedToolchain.cmake");

/// Replace every placeholder, line by line. Line count and endings are kept.
pub fn render_template(template: &str, ndk_home: &Path) -> String {
    // CMake treats backslashes in quoted strings as escapes.
    let home = ndk_home.to_string_lossy().replace('\\', "/");
    template
        .split_inclusive('\n')
        .map(|line| line.replace(NDK_HOME_PLACEHOLDER, &home))
        .collect()
}

/// Render `template` into `dest`.
///
/// The NDK path is written with `/` separators, so on Windows hosts the
/// substituted value differs from `ndk_home` by its backslashes.
pub fn write_toolchain_file(template: &Path, dest: &Path, ndk_home: &Path) -> Result<()> {
    let text = std::fs::read_to_string(template).map_err(|source| {
        WrapperError::TemplateWriteFailed {
            path: template.to_path_buf(),
            source,
        }
    })?;
    write_rendered(&text, dest, ndk_home)
}

/// Render the bundled template into `dest`
pub fn write_bundled_toolchain_file(dest: &Path, ndk_home: &Path) -> Result<()> {
    write_rendered(BUNDLED_TEMPLATE, dest, ndk_home)
}

fn write_rendered(template: &str, dest: &Path, ndk_home: &Path) -> Result<()> {
    let failed = |source: std::io::Error| WrapperError::TemplateWriteFailed {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(failed)?;
    }
    std::fs::write(dest, render_template(template, ndk_home)).map_err(failed)?;

    info!("Wrote toolchain file to {:?}", dest);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let template = "set(A \"@ANDROID_NDK_HOME@\")\n# comment\ninclude(@ANDROID_NDK_HOME@/x.cmake)\n";
        let rendered = render_template(template, Path::new("/opt/ndk"));

        assert_eq!(
            rendered,
            "set(A \"/opt/ndk\")\n# comment\ninclude(/opt/ndk/x.cmake)\n"
        );
        assert_eq!(rendered.lines().count(), template.lines().count());
    }

    #[test]
    fn test_backslashes_become_forward_slashes() {
        let rendered = render_template("@ANDROID_NDK_HOME@\n", Path::new("C:\\Android\\ndk"));
        assert_eq!(rendered, "C:/Android/ndk\n");
    }

    #[test]
    fn test_keeps_missing_trailing_newline() {
        let rendered = render_template("a\n@ANDROID_NDK_HOME@", Path::new("/n"));
        assert_eq!(rendered, "a\n/n");
    }

    #[test]
    fn test_bundled_template_has_placeholder() {
        assert!(BUNDLED_TEMPLATE.contains(NDK_HOME_PLACEHOLDER));
        let rendered = render_template(BUNDLED_TEMPLATE, Path::new("/opt/ndk"));
        assert!(!rendered.contains(NDK_HOME_PLACEHOLDER));
        assert!(rendered.contains("build/cmake/android.toolchain.cmake"));
    }

    #[test]
    fn test_write_from_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.cmake");
        std::fs::write(&template, "@ANDROID_NDK_HOME@\nx\n@ANDROID_NDK_HOME@/bin\n").unwrap();

        let dest = dir.path().join("out").join(TOOLCHAIN_FILE_NAME);
        write_toolchain_file(&template, &dest, Path::new("/ndk")).unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, "/ndk\nx\n/ndk/bin\n");
    }

    #[test]
    fn test_unreadable_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_toolchain_file(
            &dir.path().join("missing.cmake"),
            &dir.path().join(TOOLCHAIN_FILE_NAME),
            Path::new("/ndk"),
        )
        .unwrap_err();
        assert!(matches!(err, WrapperError::TemplateWriteFailed { .. }));
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = write_bundled_toolchain_file(&blocker.join(TOOLCHAIN_FILE_NAME), Path::new("/ndk"))
            .unwrap_err();
        assert!(matches!(err, WrapperError::TemplateWriteFailed { .. }));
    }
}
