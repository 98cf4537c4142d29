//! Formbase filter runner
//!
//! Fetch a form's fields and records, show which operators each category
//! supports, and list the records matching a filter set.
//!
//! Usage:
//!   formbase-filter --form 5
//!   formbase-filter --form 5 --where plain_text:gt:15
//!   formbase-filter --form 5 --where multiline_text:contains:hello --local --json

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use formbase_client::{telemetry, ClientConfig, RestBackend};
use formbase_core::{
    description_for, operators_for, Category, ClauseDraft, Combinator, FilterSet, FormSnapshot,
    Operator, Record,
};
use tracing::info;

const USAGE: &str = "\
Usage: formbase-filter --form <ID> [OPTIONS]

Options:
  -f, --form <ID>          Form to filter (required)
  -w, --where <C:OP:V>     Add a clause, e.g. plain_text:gt:15
      --or-where <C:OP:V>  Add a clause marked OR (evaluated as AND)
      --local              Evaluate in memory instead of on the backend
  -c, --config <PATH>      TOML config file (default: FORMBASE_CONFIG or env vars)
      --json               Print matching records as JSON
  -h, --help               Show this help";

#[derive(Debug, Clone, PartialEq)]
struct ClauseSpec {
    raw: String,
    category: Category,
    operator: Operator,
    value: String,
    combinator: Combinator,
}

#[derive(Debug, Default)]
struct Args {
    form_id: Option<i64>,
    clauses: Vec<ClauseSpec>,
    local: bool,
    config: Option<PathBuf>,
    json: bool,
    help: bool,
}

fn parse_clause(raw: &str, combinator: Combinator) -> Result<ClauseSpec, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(category), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "Invalid clause '{}': expected <category>:<operator>:<value>",
            raw
        ));
    };

    Ok(ClauseSpec {
        raw: raw.to_string(),
        category: category.parse()?,
        operator: operator.parse()?,
        value: value.to_string(),
        combinator,
    })
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, String> {
    let mut result = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut next_value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match arg.as_str() {
            "--form" | "-f" => {
                let value = next_value(arg.as_str())?;
                result.form_id = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid form id: {}", value))?,
                );
            }
            "--where" | "-w" => {
                let value = next_value(arg.as_str())?;
                result.clauses.push(parse_clause(&value, Combinator::And)?);
            }
            "--or-where" => {
                let value = next_value(arg.as_str())?;
                result.clauses.push(parse_clause(&value, Combinator::Or)?);
            }
            "--config" | "-c" => {
                result.config = Some(PathBuf::from(next_value(arg.as_str())?));
            }
            "--local" => result.local = true,
            "--json" => result.json = true,
            "--help" | "-h" => result.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(result)
}

fn print_records(records: &[Record], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for record in records {
        let values: Vec<String> = record
            .values
            .iter()
            .map(|(name, value)| match value {
                serde_json::Value::String(s) => format!("{}={}", name, s),
                other => format!("{}={}", name, other),
            })
            .collect();
        println!("#{} {}", record.id, values.join(" "));
    }
    println!("{} record(s)", records.len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }
    let form_id = args
        .form_id
        .ok_or_else(|| anyhow!("--form is required\n\n{}", USAGE))?;

    let config = ClientConfig::load(args.config.as_deref())?;
    let backend = RestBackend::new(&config)?;
    let snapshot = FormSnapshot::load(&backend, form_id)
        .await
        .with_context(|| format!("Failed to load form {}", form_id))?;

    let profiles = snapshot.profiles();
    println!("Form {}", form_id);
    for profile in profiles.iter() {
        let ops = operators_for(profile);
        if ops.is_empty() {
            println!("  {}: no data", profile.category.label());
            continue;
        }
        let labels: Vec<&str> = ops.iter().map(|o| o.label).collect();
        println!(
            "  {}: {}\n    operators: {}",
            profile.category.label(),
            description_for(profile),
            labels.join(", ")
        );
    }

    let mut filters = FilterSet::new();
    for spec in &args.clauses {
        filters
            .push(
                ClauseDraft::new()
                    .category(spec.category)
                    .operator(spec.operator)
                    .value(spec.value.clone())
                    .combinator(spec.combinator),
                &profiles,
            )
            .with_context(|| format!("Invalid filter '{}'", spec.raw))?;
    }

    let records = if args.local {
        snapshot.filter_local(&filters)
    } else {
        info!(query = %snapshot.query(&filters), "Filtering on backend");
        snapshot.filter_remote(&backend, &filters).await?
    };

    print_records(&records, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let parsed = parse_args(args(&[
            "--form",
            "5",
            "-w",
            "plain_text:gt:15",
            "--or-where",
            "dropdown:eq:red",
            "--local",
            "--json",
            "-c",
            "formbase.toml",
        ]))
        .unwrap();

        assert_eq!(parsed.form_id, Some(5));
        assert!(parsed.local);
        assert!(parsed.json);
        assert_eq!(parsed.config, Some(PathBuf::from("formbase.toml")));
        assert_eq!(parsed.clauses.len(), 2);
        assert_eq!(parsed.clauses[0].operator, Operator::GreaterThan);
        assert_eq!(parsed.clauses[1].combinator, Combinator::Or);
    }

    #[test]
    fn test_clause_value_may_contain_colons() {
        let spec = parse_clause("plain_text:eq:12:30", Combinator::And).unwrap();
        assert_eq!(spec.category, Category::PlainText);
        assert_eq!(spec.value, "12:30");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--form"])).is_err());
        assert!(parse_args(args(&["--form", "abc"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["-w", "plain_text:gt"])).is_err());
        assert!(parse_args(args(&["-w", "photo:eq:x"])).is_err());
    }
}
