use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use form_core::{log_rows, reduce, FormAction, FormState, Outcome};
use serde::Serialize;
use shared::{FormType, SchemaRegistry};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "warn")]
    log_filter: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every form type as `key<TAB>label`.
    List,
    /// Print one form schema as JSON.
    Schema { key: String },
    /// Apply a JSON array of form actions and print the final state.
    Replay { file: PathBuf },
}

#[derive(Debug, Serialize)]
struct ReplayReport<'a> {
    selection: Option<&'a str>,
    draft: &'a shared::Draft,
    error: Option<&'a str>,
    log: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_filter)),
        )
        .init();

    let registry = SchemaRegistry::global();
    match cli.command {
        Command::List => {
            for form_type in registry.form_types() {
                println!("{}\t{}", form_type.key(), form_type.label());
            }
        }
        Command::Schema { key } => {
            let form_type = key.parse::<FormType>().inspect_err(|err| warn!("{err}"))?;
            let schema = registry
                .get(form_type)
                .with_context(|| format!("no schema registered for '{key}'"))?;
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        Command::Replay { file } => {
            let actions = load_actions(&file)?;
            info!(file = %file.display(), actions = actions.len(), "replaying form actions");
            let (state, notices) = replay(registry, actions);
            for notice in notices {
                println!("{notice}");
            }
            println!("{}", serde_json::to_string_pretty(&report(&state))?);
        }
    }

    Ok(())
}

fn load_actions(path: &Path) -> Result<Vec<FormAction>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read replay file '{}'", path.display()))?;
    parse_actions(&raw)
}

fn parse_actions(raw: &str) -> Result<Vec<FormAction>> {
    serde_json::from_str(raw).context("replay file must be a JSON array of form actions")
}

/// Returns the final state and the acknowledgements raised along the way.
fn replay(registry: &SchemaRegistry, actions: Vec<FormAction>) -> (FormState, Vec<&'static str>) {
    let mut notices = Vec::new();
    let state = actions
        .into_iter()
        .enumerate()
        .fold(FormState::new(), |state, (step, action)| {
            let name = action.name();
            let transition = reduce(registry, state, action);
            debug!(step, action = name, outcome = ?transition.outcome, "replayed action");
            if let Outcome::Acknowledged(acknowledgement) = transition.outcome {
                notices.push(acknowledgement.message());
            }
            transition.state
        });
    (state, notices)
}

fn report(state: &FormState) -> ReplayReport<'_> {
    ReplayReport {
        selection: state.selection(),
        draft: state.draft(),
        error: state.error(),
        log: log_rows(state.log()).into_iter().map(|row| row.data).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn replays_submit_edit_and_delete() {
        let actions = parse_actions(
            r#"[
                {"action": "select_form", "key": "userInformation"},
                {"action": "set_field", "name": "firstName", "value": "Ada"},
                {"action": "set_field", "name": "lastName", "value": "Lovelace"},
                {"action": "submit"},
                {"action": "set_field", "name": "firstName", "value": "Grace"},
                {"action": "set_field", "name": "lastName", "value": "Hopper"},
                {"action": "submit"},
                {"action": "delete", "index": 0},
                {"action": "edit", "index": 0}
            ]"#,
        )
        .expect("actions");

        let (state, notices) = replay(SchemaRegistry::global(), actions);
        assert_eq!(
            notices,
            vec![
                "Form submitted successfully!",
                "Form submitted successfully!",
                "Entry deleted successfully",
            ]
        );
        assert!(state.log().is_empty());
        assert_eq!(state.value("firstName"), "Grace");

        let report = serde_json::to_value(report(&state)).expect("report");
        assert_eq!(
            report,
            serde_json::json!({
                "selection": "userInformation",
                "draft": {"firstName": "Grace", "lastName": "Hopper"},
                "error": null,
                "log": [],
            })
        );
    }

    #[test]
    fn report_lists_entries_as_json_strings() {
        let actions = parse_actions(
            r#"[
                {"action": "select_form", "key": "addressInformation"},
                {"action": "set_field", "name": "street", "value": "1 Main St"},
                {"action": "set_field", "name": "city", "value": "Austin"},
                {"action": "set_field", "name": "state", "value": "Texas"},
                {"action": "submit"},
                {"action": "submit"}
            ]"#,
        )
        .expect("actions");
        let (state, _) = replay(SchemaRegistry::global(), actions);
        let report = report(&state);

        assert_eq!(
            report.log,
            vec![r#"{"street":"1 Main St","city":"Austin","state":"Texas"}"#]
        );
        assert_eq!(report.error, Some("Please fill in all required fields."));
    }

    #[test]
    fn loads_actions_from_a_replay_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("form_cli_replay_{suffix}.json"));
        fs::write(
            &path,
            r#"[
                {"action": "select_form", "key": "paymentInformation"},
                {"action": "set_field", "name": "cardNumber", "value": "4111"},
                {"action": "submit"}
            ]"#,
        )
        .expect("write replay file");

        let actions = load_actions(&path);
        fs::remove_file(&path).expect("remove replay file");
        let actions = actions.expect("actions");

        assert_eq!(actions.len(), 3);
        let (state, notices) = replay(SchemaRegistry::global(), actions);
        assert!(notices.is_empty());
        assert_eq!(state.selection(), Some("paymentInformation"));
        assert_eq!(state.value("cardNumber"), "4111");
        assert_eq!(state.error(), Some("Please fill in all required fields."));
    }

    #[test]
    fn missing_replay_file_names_the_path() {
        let path = env::temp_dir().join("form_cli_replay_does_not_exist.json");
        let err = load_actions(&path).expect_err("missing file");
        assert!(format!("{err:#}").contains("failed to read replay file"));
    }

    #[test]
    fn rejects_unknown_action_names() {
        let err = parse_actions(r#"[{"action": "reset"}]"#).expect_err("unknown action");
        assert!(format!("{err:#}").contains("JSON array of form actions"));
    }
}
