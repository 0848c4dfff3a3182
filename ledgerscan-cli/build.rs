use std::path::Path;
use std::process::Command;

/// Short commit hash of the workspace checkout, if there is one.
fn git_short_sha(workspace_root: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(workspace_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace_root = Path::new(&manifest_dir).join("..");

    let git_head = workspace_root.join(".git").join("HEAD");
    if git_head.exists() {
        println!("cargo:rerun-if-changed={}", git_head.display());
    }

    let sha = git_short_sha(&workspace_root).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=LEDGERSCAN_BUILD_SHA={}", sha);
}
