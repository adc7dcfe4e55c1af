use anyhow::Context;
use serde::Deserialize;

/// Crates the domain crate must never pull in, directly or as dev-deps.
const DOMAIN_FORBIDDEN: &[&str] = &[
    "citegen-client",
    "dioxus",
    "web-sys",
    "js-sys",
    "wasm-bindgen",
    "directories",
    "clap",
];

const DOMAIN_CRATE: &str = "citegen-domain";

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
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
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
    let violations = domain_violations(&metadata)?;

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        anyhow::bail!("{} architecture violation(s)", violations.len());
    }

    println!("arch-check: {DOMAIN_CRATE} is free of client and platform crates");
    Ok(())
}

fn domain_violations(metadata: &Metadata) -> anyhow::Result<Vec<String>> {
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == DOMAIN_CRATE)
        .with_context(|| format!("{DOMAIN_CRATE} not found in workspace"))?;

    Ok(domain
        .dependencies
        .iter()
        .filter(|d| DOMAIN_FORBIDDEN.contains(&d.name.as_str()))
        .map(|d| match d.kind.as_deref() {
            Some(kind) => format!("{DOMAIN_CRATE} depends on {} ({kind})", d.name),
            None => format!("{DOMAIN_CRATE} depends on {}", d.name),
        })
        .collect())
}
