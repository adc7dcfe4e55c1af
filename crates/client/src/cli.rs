//! Command-line front end.
//!
//! Drives the same [`CitationController`] the web page uses, against the
//! desktop platform.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use citegen_domain::catalog;
use citegen_domain::common::format_money;
use citegen_domain::{ConfigurationKey, FormField};

use crate::application::{changelog, CitationController, ResetOutcome};
use crate::state::Platform;

/// Citation generator
///
/// Builds a citation from pasted MDW output or manual input and renders it
/// through the saved citation template.
#[derive(Parser, Debug)]
#[command(name = "citegen", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog charges, optionally filtered by name.
    Charges(ChargesArgs),

    /// Render a citation.
    Render(RenderArgs),

    /// Show, change or reset the saved officer configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print release notes and known issues.
    Changelog,
}

#[derive(Args, Debug)]
pub struct ChargesArgs {
    /// Case-insensitive part of a charge name.
    pub query: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// File holding MDW output (`-` reads stdin).
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Full name of the cited person.
    #[arg(long)]
    pub name: Option<String>,

    /// Fine amount.
    #[arg(long)]
    pub fine: Option<String>,

    /// License points.
    #[arg(long)]
    pub points: Option<String>,

    /// Charge identifier (`A`, `F`, ...) or name. Repeat to add more.
    #[arg(long = "charge", value_name = "ID_OR_NAME")]
    pub charges: Vec<String>,

    /// Template file to use instead of the saved template (not saved).
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Also copy the citation to the clipboard.
    #[arg(long)]
    pub copy: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the configuration in effect.
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Change one field and save the configuration.
    Set {
        /// department, officer-name, rank, callsign or template.
        field: String,

        /// New value.
        #[arg(required_unless_present = "file")]
        value: Option<String>,

        /// Read the value from a file (handy for templates).
        #[arg(long, conflicts_with = "value")]
        file: Option<PathBuf>,
    },

    /// Reset the configuration to the built-in defaults and save it.
    Reset {
        /// Confirm the reset.
        #[arg(long)]
        yes: bool,
    },
}

/// Runs a parsed command, writing results to `out`.
pub fn run(cli: Cli, platform: Platform, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Charges(args) => list_charges(&args, out),
        Commands::Render(args) => render(&args, CitationController::new(platform), out),
        Commands::Config(command) => configure(command, CitationController::new(platform), out),
        Commands::Changelog => print_changelog(out),
    }
}

fn print_changelog(out: &mut impl Write) -> anyhow::Result<()> {
    for release in changelog::RELEASES {
        writeln!(out, "{}", release.version)?;
        for change in release.changes {
            writeln!(out, "  - {}", change)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Known issues")?;
    for issue in changelog::KNOWN_ISSUES {
        writeln!(out, "  - {}", issue)?;
    }
    Ok(())
}

fn list_charges(args: &ChargesArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let hits = catalog::search(args.query.as_deref().unwrap_or(""));

    if args.json {
        let records: Vec<serde_json::Value> = hits
            .iter()
            .map(|(id, record)| {
                serde_json::json!({
                    "id": id,
                    "name": record.name,
                    "fineAmount": record.fine_amount,
                    "description": record.description,
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        return Ok(());
    }

    for (id, record) in hits {
        writeln!(
            out,
            "{:<2} {:>9}  {}",
            id.as_str(),
            format!("${}", format_money(f64::from(record.fine_amount))),
            record.name.trim_end()
        )?;
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    let text = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    // Windows clipboards paste CRLF; the report markers are matched per line.
    Ok(text.replace("\r\n", "\n"))
}

fn render(
    args: &RenderArgs,
    mut controller: CitationController,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(path) = &args.report {
        controller.set_report_text(&read_input(path)?);
        if let Some(e) = controller.report_error() {
            bail!("{}", e);
        }
    }

    if let Some(name) = &args.name {
        controller.update_field(FormField::FullName, name)?;
    }
    for charge in &args.charges {
        controller.add_charge(charge)?;
    }
    if let Some(fine) = &args.fine {
        controller.update_field(FormField::Fine, fine)?;
    } else if controller.form().fine_amount.is_none() && !args.charges.is_empty() {
        let suggested = controller.suggested_fine();
        controller.update_field(FormField::Fine, &suggested.to_string())?;
    }
    if let Some(points) = &args.points {
        controller.update_field(FormField::Points, points)?;
    }
    if let Some(path) = &args.template {
        let template = read_input(path)?;
        controller.update_field(FormField::Configuration(ConfigurationKey::Template), &template)?;
    }

    if let Some(e) = controller.template_error() {
        bail!("Template is invalid: {}", e);
    }

    writeln!(out, "{}", controller.output())?;

    if args.copy {
        controller.copy_output()?;
        tracing::info!("Citation copied to clipboard");
    }
    Ok(())
}

fn configure(
    command: ConfigCommand,
    mut controller: CitationController,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show { json } => show_configuration(&controller, json, out),
        ConfigCommand::Set { field, value, file } => {
            let key: ConfigurationKey = field.parse()?;
            let value = match (value, file) {
                (Some(value), _) => value,
                (None, Some(path)) => read_input(&path)?,
                (None, None) => bail!("A value or --file is required"),
            };
            controller.update_field(FormField::Configuration(key), &value)?;
            if let Some(e) = controller.template_error() {
                tracing::warn!("Saving a template that does not compile: {}", e);
            }
            controller.save_configuration();
            writeln!(out, "Saved {}.", key.display_name().to_lowercase())?;
            Ok(())
        }
        ConfigCommand::Reset { yes } => {
            if controller.is_configuration_default() {
                writeln!(out, "Configuration already matches the built-in defaults.")?;
                return Ok(());
            }
            let mut outcome = controller.reset_configuration_to_built_in_defaults();
            if yes {
                outcome = controller.reset_configuration_to_built_in_defaults();
            }
            match outcome {
                ResetOutcome::Armed => {
                    writeln!(
                        out,
                        "This replaces the saved configuration with the built-in defaults. Run again with --yes to confirm."
                    )?;
                }
                ResetOutcome::Committed => {
                    controller.save_configuration();
                    writeln!(out, "Configuration reset to the built-in defaults.")?;
                }
            }
            Ok(())
        }
    }
}

fn show_configuration(
    controller: &CitationController,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let configuration = controller.configuration();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(configuration)?)?;
        return Ok(());
    }

    for key in ConfigurationKey::ALL {
        let value = configuration.get(key);
        let marker = if value == key.built_in_value() {
            ""
        } else {
            " (custom)"
        };
        if key == ConfigurationKey::Template {
            writeln!(out, "{}{}:\n{}", key.display_name(), marker, value)?;
        } else {
            writeln!(out, "{}{}: {}", key.display_name(), marker, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::{MockPlatform, MockStorageProvider};
    use crate::ports::outbound::StorageProvider;

    fn run_args(mock: &MockPlatform, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("citegen").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, mock.platform(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_charges_table_and_filter() {
        let mock = MockPlatform::default();
        let table = run_args(&mock, &["charges", "speeding"]).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "J    $250.00  Third Degree Speeding");
        assert_eq!(lines[2], "L    $750.00  First Degree Speeding");
    }

    #[test]
    fn test_charges_json() {
        let mock = MockPlatform::default();
        let json = run_args(&mock, &["charges", "jaywalking", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "F");
        assert_eq!(value[0]["fineAmount"], 150);
    }

    #[test]
    fn test_changelog_lists_releases_then_known_issues() {
        let mock = MockPlatform::default();
        let text = run_args(&mock, &["changelog"]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "v0.5.0");
        assert_eq!(lines[1], "  - Copy button");
        assert!(lines.contains(&"v0.1.0"));
        let issues = lines.iter().position(|l| *l == "Known issues").unwrap();
        assert!(lines[issues + 1].starts_with("  - Duplicate charges"));
    }

    #[test]
    fn test_render_from_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(
            &path,
            "Bryan Barker (#1130)\r\nJaywalking\r\nWarrant for Arrest\r\n50 months / $20,425.00 fine / 1 point(s)\r\n",
        )
        .unwrap();

        let mock = MockPlatform::default();
        let output = run_args(&mock, &["render", "--report", path.to_str().unwrap(), "--copy"]).unwrap();
        assert!(output.contains("has hereby cited Bryan Barker"));
        assert!(output.contains("    \u{2022} Jaywalking\n"));
        assert!(output.contains("$20,425.00 fine and 1 points"));
        assert_eq!(mock.clipboard.copy_count(), 1);
    }

    #[test]
    fn test_render_rejects_bad_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "Jaywalking\n").unwrap();

        let mock = MockPlatform::default();
        let err = run_args(&mock, &["render", "--report", path.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().starts_with("Unexpected MDW output"));
    }

    #[test]
    fn test_render_manual_input_suggests_fine() {
        let mock = MockPlatform::default();
        let output = run_args(
            &mock,
            &["render", "--name", "Jane Doe", "--charge", "F", "--charge", "Littering"],
        )
        .unwrap();
        assert!(output.contains("cited Jane Doe"));
        assert!(output.contains("\u{2022} Jaywalking\n    \u{2022} Littering\n"));
        assert!(output.contains("a $400.00 fine."));
    }

    #[test]
    fn test_render_with_broken_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.hbs");
        std::fs::write(&path, "{{#if points}}").unwrap();

        let mock = MockPlatform::default();
        let err = run_args(&mock, &["render", "--template", path.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().starts_with("Template is invalid"));
    }

    #[test]
    fn test_config_set_and_show() {
        let mock = MockPlatform::default();
        let out = run_args(&mock, &["config", "set", "officer-name", "Ada Lane"]).unwrap();
        assert_eq!(out, "Saved officer name.\n");
        assert_eq!(mock.storage.load("officerName").as_deref(), Some("Ada Lane"));

        let shown = run_args(&mock, &["config", "show"]).unwrap();
        assert!(shown.contains("Officer name (custom): Ada Lane\n"));
        assert!(shown.contains("Rank: Undersheriff\n"));

        let json = run_args(&mock, &["config", "show", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["officerName"], "Ada Lane");
    }

    #[test]
    fn test_config_reset_requires_yes() {
        let storage = MockStorageProvider::with_entries([("rank", "Sheriff")]);
        let mock = MockPlatform::with_storage(storage);

        let out = run_args(&mock, &["config", "reset"]).unwrap();
        assert!(out.contains("--yes"));
        assert_eq!(mock.storage.load("rank").as_deref(), Some("Sheriff"));

        run_args(&mock, &["config", "reset", "--yes"]).unwrap();
        assert_eq!(mock.storage.load("rank").as_deref(), Some("Undersheriff"));
    }

    #[test]
    fn test_unknown_config_field() {
        let mock = MockPlatform::default();
        assert!(run_args(&mock, &["config", "set", "badge", "1"]).is_err());
    }
}
