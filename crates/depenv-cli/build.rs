//! Build script stamping `DEPENV_VERSION`
//!
//! Release builds report the package version. Builds from a git checkout
//! append the described commit, e.g. `0.1.0 (v0.1.0-3-gabc1234-dev)`.

use std::path::PathBuf;
use std::process::Command;

/// Run git in the package directory, returning trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let package = env!("CARGO_PKG_VERSION");

    // The crate sits below the workspace root, so ask git where HEAD lives
    if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
        let head = PathBuf::from(git_dir).join("HEAD");
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let version = match git(&["describe", "--tags", "--always", "--dirty=-dev"]) {
        Some(described) if described.trim_start_matches('v') == package => package.to_string(),
        Some(described) => format!("{package} ({described})"),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=DEPENV_VERSION={version}");
}
