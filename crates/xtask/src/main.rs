use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

/// The domain crate must stay a leaf: no dependencies on other workspace
/// crates (persistence and composition live in the engine, not the domain).
fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let packages = metadata["packages"]
        .as_array()
        .context("metadata has no packages")?;

    let workspace_names: Vec<&str> = packages
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();

    let domain = packages
        .iter()
        .find(|p| p["name"] == "dmscreen-domain")
        .context("dmscreen-domain not in workspace")?;

    let offenders: Vec<&str> = domain["dependencies"]
        .as_array()
        .map(|deps| {
            deps.iter()
                .filter_map(|d| d["name"].as_str())
                .filter(|name| workspace_names.contains(name))
                .collect()
        })
        .unwrap_or_default();

    if !offenders.is_empty() {
        anyhow::bail!("dmscreen-domain must not depend on workspace crates: {offenders:?}")
    }

    println!("arch-check: ok");
    Ok(())
}
