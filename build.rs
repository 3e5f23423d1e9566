use std::process::Command;

fn git(args: &[&str]) -> Option<std::process::Output> {
    Command::new("git").args(args).output().ok()
}

/// Short commit hash, suffixed with `-dirty` when the tree has local edits.
fn build_revision() -> String {
    let Some(head) = git(&["rev-parse", "--short", "HEAD"]).filter(|o| o.status.success()) else {
        return "unknown".to_string();
    };
    let hash = String::from_utf8_lossy(&head.stdout).trim().to_string();
    let dirty = git(&["diff", "--quiet"]).is_some_and(|o| !o.status.success());
    if dirty { format!("{hash}-dirty") } else { hash }
}

fn main() {
    println!("cargo:rustc-env=GATEWAY_BUILD_REV={}", build_revision());
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
