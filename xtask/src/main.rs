//! Developer tasks (schema generation, fixture validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            // Fallback: assume we're in xtask dir or use current dir
            std::env::current_dir().expect("Cannot determine current directory")
        });

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .expect("xtask has no parent")
            .to_path_buf()
    } else {
        manifest_dir
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Get the tests/fixtures directory path.
fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

const SPEC_SCHEMA_FILE: &str = "repo-manager.spec.v1.json";
const REPORT_SCHEMA_FILE: &str = "repo-manager.report.v1.json";

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the spec file schema.
fn generate_spec_schema() -> schemars::Schema {
    schema_for!(repomgr_settings::SpecV1)
}

/// Generate the JSON run report schema.
fn generate_report_schema() -> schemars::Schema {
    schema_for!(repomgr_types::RunReport)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: SPEC_SCHEMA_FILE,
            generate: generate_spec_schema,
        },
        SchemaSpec {
            filename: REPORT_SCHEMA_FILE,
            generate: generate_report_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();

    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile_schema(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to convert schema to JSON")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Validate every fixture spec and golden report against the generated schemas.
///
/// Fixture specs are YAML; they are converted to JSON values before
/// validation. Golden reports keep `__TIMESTAMP__`-style placeholders, which
/// the report schema accepts since timestamps are plain strings there.
fn validate_fixtures() -> anyhow::Result<()> {
    let spec_validator = compile_schema(&generate_spec_schema())?;
    let report_validator = compile_schema(&generate_report_schema())?;

    let dir = fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    entries.sort();

    let mut checked = 0;
    let mut errors = Vec::new();

    for fixture in entries {
        let name = file_name(&fixture);

        let spec_path = fixture.join(repomgr_types::ids::DEFAULT_SPEC_FILENAME);
        if spec_path.exists() {
            let text = fs::read_to_string(&spec_path)
                .with_context(|| format!("Failed to read {}", spec_path.display()))?;
            let value: Value = serde_yaml::from_str(&text)
                .with_context(|| format!("{name}: spec is not valid YAML"))?;
            for err in spec_validator.iter_errors(&value) {
                errors.push(format!("{name}: spec: {err}"));
            }
            checked += 1;
        }

        let report_path = fixture.join("expected.report.json");
        if report_path.exists() {
            let text = fs::read_to_string(&report_path)
                .with_context(|| format!("Failed to read {}", report_path.display()))?;
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("{name}: expected.report.json is not valid JSON"))?;
            for err in report_validator.iter_errors(&value) {
                errors.push(format!("{name}: report: {err}"));
            }
            checked += 1;
        }

        println!("  ✓ {name}");
    }

    if checked == 0 {
        bail!("No fixture files found in {}", dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nFixture validation errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Fixture validation failed with {} errors", errors.len());
    }

    println!("\n✓ {checked} fixture files validate against their schemas");
    Ok(())
}

/// Validate that every rule has a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let rules = repomgr_types::ids::all_rule_names();
    let mut errors = Vec::new();

    for rule in rules {
        match repomgr_types::lookup_explanation(rule) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Rule '{rule}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Rule '{rule}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Rule '{rule}' has empty remediation"));
                }
                if exp.params.is_empty() {
                    errors.push(format!("Rule '{rule}' documents no params"));
                }
            }
            None => errors.push(format!("Rule '{rule}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} rules have explanations", rules.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help               Show this message");
    eprintln!("  emit-schemas       Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas   Check if schemas/ matches generated output (for CI)");
    eprintln!("  validate-fixtures  Validate tests/fixtures specs and golden reports");
    eprintln!("  print-schema-ids   Print known schema IDs");
    eprintln!("  explain-coverage   Validate all rules have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", repomgr_types::SCHEMA_REPORT_V1);
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
