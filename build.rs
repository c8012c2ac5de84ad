use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=GIT_VERSION");

    println!("cargo:rustc-env=GIT_VERSION={}", git_version());
}

/// Prefer an explicit GIT_VERSION (container builds have no .git), then
/// `git describe`, then "dev".
fn git_version() -> String {
    std::env::var("GIT_VERSION")
        .ok()
        .filter(|v| !v.is_empty() && v != "dev")
        .or_else(|| {
            Command::new("git")
                .args(["describe", "--tags", "--always", "--dirty"])
                .output()
                .ok()
                .filter(|o| o.status.success())
                .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "dev".to_string())
}
