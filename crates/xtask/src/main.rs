use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Allowed workspace-internal dependencies per crate. Crates not listed may
/// depend on anything in the workspace.
const LAYERS: &[(&str, &[&str])] = &[
    ("warband-domain", &[]),
    ("warband-shared", &["warband-domain"]),
    ("warband-engine", &["warband-domain", "warband-shared"]),
];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
    path: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let violations = layer_violations(&metadata);

    if violations.is_empty() {
        println!("arch-check: OK ({} crates)", metadata.packages.len());
        return Ok(());
    }
    for v in &violations {
        eprintln!("arch-check: {v}");
    }
    anyhow::bail!("{} layering violation(s)", violations.len())
}

/// Workspace-internal edges (path dependencies, dev-dependencies excluded)
/// that the layer table does not allow.
fn layer_violations(metadata: &Metadata) -> Vec<String> {
    let workspace: Vec<&str> = metadata.packages.iter().map(|p| p.name.as_str()).collect();
    let allowed: BTreeMap<&str, &[&str]> = LAYERS.iter().copied().collect();

    let mut violations = Vec::new();
    for package in &metadata.packages {
        let Some(allowed) = allowed.get(package.name.as_str()) else {
            continue;
        };
        for dep in &package.dependencies {
            let internal = dep.path.is_some() && workspace.contains(&dep.name.as_str());
            let dev_only = dep.kind.as_deref() == Some("dev");
            if internal && !dev_only && !allowed.contains(&dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
        }
    }
    violations
}
