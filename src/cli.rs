//! CLI command handlers.
//!
//! Default output is human readable; `--json` switches to a JSON envelope
//! with a `success` flag, suitable for driving from scripts.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use serde_json::{json, Value};

use crate::audit;
use crate::javap::{check_tool_available, JavapResolver};
use crate::registry;
use crate::report::ResourceReport;
use crate::scan::{collect_enabled_features, find_xml_roots, has_xml_extension, is_server_root};

/// CLI Commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Full reconciliation report: annotated resource requests vs declared resources
    Scan {
        /// Exploded WAR directory (classes under WEB-INF/classes)
        #[arg(short, long)]
        war: PathBuf,

        /// Configuration directories holding descriptor/server XML files
        #[arg(short, long)]
        config: Vec<PathBuf>,
    },

    /// List the features enabled across server.xml files
    Features {
        /// Configuration directories to search
        #[arg(short, long)]
        config: Vec<PathBuf>,
    },

    /// Engine status
    Status,
}

/// Handles a CLI command.
///
/// json_output: emit the JSON envelope instead of the human-readable form.
pub fn handle_command(cmd: Command, json_output: bool) -> Result<()> {
    // A name registered by two dialects would make classification order-
    // dependent; refuse to run rather than report from a shadowed table.
    registry::registrations_are_disjoint().map_err(|e| anyhow!(e))?;

    let result = match cmd {
        Command::Scan { war, config } => {
            let resolver = JavapResolver::new(&audit::classes_dir(&war));
            if !check_tool_available("javap") {
                tracing::warn!("javap not found; annotation occurrences will be empty");
            }
            audit::find_resources(&war, &config, &resolver)
                .map(|report| scan_value(&report, json_output))
                .map_err(|e| anyhow!(e))
        }

        Command::Features { config } => features_value(&config),

        Command::Status => {
            let version = env!("CARGO_PKG_VERSION");
            if json_output {
                Ok(json!({
                    "version": version,
                    "engine": "jndi-audit",
                    "dialects": {
                        "descriptor": registry::descriptor_registrations().len(),
                        "server": registry::server_registrations().len(),
                    },
                    "jdk_tools": { "javap": check_tool_available("javap") },
                }))
            } else {
                Ok(json!(format!(
                    "jndi-audit v{}\n\
                    Dialects: jakartaee descriptor ({} names), liberty server ({} names)\n\
                    JDK Tools: javap={}",
                    version,
                    registry::descriptor_registrations().len(),
                    registry::server_registrations().len(),
                    check_tool_available("javap")
                )))
            }
        }
    };

    match result {
        Ok(value) => {
            if json_output {
                let output = json!({
                    "success": true,
                    "data": value
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_value(&value);
            }
        }
        Err(e) => {
            if json_output {
                let output = json!({
                    "success": false,
                    "error": e.to_string()
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!("error: {e}");
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Prints a Value, writing strings bare and everything else as pretty JSON.
fn print_value(value: &Value) {
    match value {
        Value::String(s) => println!("{s}"),
        _ => println!("{}", serde_json::to_string_pretty(value).unwrap_or_default()),
    }
}

fn scan_value(report: &ResourceReport, json_output: bool) -> Value {
    if json_output {
        return serde_json::to_value(report).unwrap_or_default();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Resource summary ({} annotation occurrences, {} reference groups, {} features, {} resource groups)\n",
        report.annotation_occurrences.len(),
        report.environment_references.len(),
        report.enabled_features.len(),
        report.server_resources.len(),
    ));

    out.push_str("\nRequested by code (@Resource):\n");
    for occurrence in &report.annotation_occurrences {
        out.push_str(&format!(
            "  {:?} -> name={:?} type={}\n",
            occurrence.element, occurrence.annotation.name, occurrence.annotation.type_name
        ));
    }

    out.push_str("\nDeclared in deployment descriptors:\n");
    for group in &report.environment_references {
        out.push_str(&format!("  {} [{}]\n", group.document, group.container));
        for reference in &group.references {
            out.push_str(&format!(
                "    {} name={}\n",
                reference.kind,
                reference.name.as_deref().unwrap_or("<missing>")
            ));
        }
    }

    out.push_str("\nEnabled features:\n");
    for feature in &report.enabled_features {
        out.push_str(&format!("  {} ({})\n", feature.feature, feature.document));
    }

    out.push_str("\nProvisioned in server.xml:\n");
    for group in &report.server_resources {
        out.push_str(&format!("  {}\n", group.document));
        for resource in &group.resources {
            out.push_str(&format!(
                "    {} jndiName={}\n",
                resource.kind,
                resource.jndi_name.as_deref().unwrap_or("<none>")
            ));
        }
    }

    Value::String(out)
}

fn features_value(config_dirs: &[PathBuf]) -> Result<Value> {
    let mut features = Vec::new();
    for dir in config_dirs {
        for source in find_xml_roots(dir, has_xml_extension, is_server_root)
            .map_err(|e| anyhow!(e))?
        {
            match source.document() {
                Ok(doc) => features.extend(collect_enabled_features(&source.path, &doc)),
                Err(e) => {
                    tracing::debug!(path = %source.path.display(), error = %e, "skipping document")
                }
            }
        }
    }
    Ok(serde_json::to_value(features)?)
}
