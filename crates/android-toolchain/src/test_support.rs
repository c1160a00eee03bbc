use std::path::Path;

/// Lay out a minimal NDK: `source.properties` plus one prebuilt host directory.
pub fn fake_ndk(root: &Path, host_tag: &str, revision: &str) {
    std::fs::write(
        root.join("source.properties"),
        format!("Pkg.Desc = Android NDK\nPkg.Revision = {}\n", revision),
    )
    .unwrap();

    let prebuilt = root.join("toolchains").join("llvm").join("prebuilt").join(host_tag);
    std::fs::create_dir_all(prebuilt.join("bin")).unwrap();
    std::fs::create_dir_all(prebuilt.join("sysroot")).unwrap();
}
