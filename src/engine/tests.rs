//! Tests for the execution engines.

use super::*;
use crate::catalog::Catalog;
use crate::completion::{Message, Role};
use crate::resolver::Resolver;
use crate::test_support::{agent, crew, model, sample_catalog, sample_registry, task};
use crate::tools::ToolRegistry;
use std::collections::BTreeMap;

fn document_search_crew() -> ResolvedCrew {
    let catalog = sample_catalog();
    let tools = sample_registry();
    Resolver::new(&catalog, &tools)
        .resolve_crew("document_search_crew")
        .unwrap()
}

fn inputs(query: &str) -> KickoffInputs {
    KickoffInputs {
        user_query: query.to_string(),
        chat_history: Vec::new(),
        context: String::new(),
    }
}

#[test]
fn test_variables_format_chat_history() {
    let inputs = KickoffInputs {
        user_query: "and Bravo?".to_string(),
        chat_history: vec![
            Message::new(Role::User, "Who leads Alpha Team?"),
            Message::new(Role::Assistant, "Albert Wesker."),
        ],
        context: String::new(),
    };

    let vars = inputs.variables();
    assert_eq!(vars["user_query"], "and Bravo?");
    assert_eq!(
        vars["chat_history"],
        "user: Who leads Alpha Team?\nassistant: Albert Wesker."
    );
    assert_eq!(vars["context"], "");
}

#[test]
fn test_render_prompts_fill_inputs() {
    let crew = document_search_crew();
    let prompts = render_prompts(&crew, &inputs("Who is Nemesis?")).unwrap();

    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[0].task, "validate_and_route");
    assert!(prompts[0].description.contains("Question: Who is Nemesis?"));
    assert!(prompts[2].description.contains("Write the final answer to: Who is Nemesis?"));
}

#[test]
fn test_render_prompt_undefined_placeholder_is_validation() {
    let catalog = Catalog::new();
    catalog.models.create(model("m")).unwrap();
    catalog.agents.create(agent("a", "m", &[])).unwrap();
    let mut bad = task("t", "a", &[]);
    bad.description = "Use {tone} when answering {user_query}".to_string();
    catalog.crews.create(crew("c", vec![bad])).unwrap();

    let tools = ToolRegistry::new();
    let resolved = Resolver::new(&catalog, &tools).resolve_crew("c").unwrap();

    let err = render_prompts(&resolved, &inputs("hi")).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(err.to_string().contains("task 't' description"));
    assert!(err.to_string().contains("'tone'"));
}

#[tokio::test]
async fn test_dry_run_walks_tasks_in_order() {
    let crew = document_search_crew();
    let output = DryRunEngine.kickoff(&crew, &inputs("Who is Nemesis?")).await.unwrap();

    let names: Vec<&str> = output.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["validate_and_route", "search_and_analyze", "generate_response"]
    );
    assert_eq!(output.raw, output.tasks[2].raw);
    assert!(output.raw.starts_with("[generate_response] Chat Responder (azure/gpt-4o-mini)"));
    assert!(output.raw.contains("Context: validate_and_route, search_and_analyze"));
}

#[test]
fn test_build_engine_follows_settings() {
    let settings = Settings::default();
    assert_eq!(build_engine(&settings).unwrap().name(), "dry_run");

    let mut settings = Settings::default();
    settings.engine.kind = EngineKind::Command;
    settings.engine.command = "run-crew --json".to_string();
    assert_eq!(build_engine(&settings).unwrap().name(), "command");

    settings.engine.command = "'unterminated".to_string();
    assert!(build_engine(&settings).is_err());
}

#[cfg(unix)]
mod command_engine {
    use super::*;

    fn engine(command: &str) -> CommandEngine {
        CommandEngine::new(command, BTreeMap::new(), Duration::from_secs(10)).unwrap()
    }

    #[tokio::test]
    async fn test_plain_stdout_is_raw_output() {
        let crew = document_search_crew();
        let output = engine("sh -c 'cat > /dev/null; printf hello'")
            .kickoff(&crew, &inputs("hi"))
            .await
            .unwrap();
        assert_eq!(output.raw, "hello");
        assert!(output.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_request_is_written_to_stdin() {
        let crew = document_search_crew();
        let output = engine("cat").kickoff(&crew, &inputs("Who is Nemesis?")).await.unwrap();

        let request: serde_json::Value = serde_json::from_str(&output.raw).unwrap();
        assert_eq!(request["crew"]["name"], "document_search_crew");
        assert_eq!(request["inputs"]["user_query"], "Who is Nemesis?");
        assert_eq!(request["prompts"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_structured_stdout_is_decoded() {
        let crew = document_search_crew();
        let script = r#"sh -c 'cat > /dev/null; printf "%s" "{\"raw\": \"final\", \"tasks\": [{\"name\": \"generate_response\", \"raw\": \"final\"}]}"'"#;
        let output = engine(script).kickoff(&crew, &inputs("hi")).await.unwrap();
        assert_eq!(output.raw, "final");
        assert_eq!(output.tasks[0].name, "generate_response");
    }

    #[tokio::test]
    async fn test_environment_is_passed() {
        let crew = document_search_crew();
        let engine = CommandEngine::new(
            r#"sh -c 'cat > /dev/null; printf "%s" "$CREW_MODE"'"#,
            BTreeMap::from([("CREW_MODE".to_string(), "fast".to_string())]),
            Duration::from_secs(10),
        )
        .unwrap();
        let output = engine.kickoff(&crew, &inputs("hi")).await.unwrap();
        assert_eq!(output.raw, "fast");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_internal_with_stderr() {
        let crew = document_search_crew();
        let err = engine("sh -c 'cat > /dev/null; echo boom >&2; exit 3'")
            .kickoff(&crew, &inputs("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_timeout_kills_command() {
        let crew = document_search_crew();
        let engine =
            CommandEngine::new("sleep 5", BTreeMap::new(), Duration::from_millis(200)).unwrap();
        let err = engine.kickoff(&crew, &inputs("hi")).await.unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
        assert!(err.to_string().contains("timed out"));
    }

    /// A crew whose request is far larger than a pipe buffer.
    fn oversized_crew() -> ResolvedCrew {
        let mut crew = document_search_crew();
        crew.tasks[0].description = "x".repeat(256 * 1024);
        crew
    }

    #[tokio::test]
    async fn test_timeout_covers_unread_stdin() {
        let crew = oversized_crew();
        let engine =
            CommandEngine::new("sleep 3", BTreeMap::new(), Duration::from_millis(200)).unwrap();

        let started = std::time::Instant::now();
        let err = engine.kickoff(&crew, &inputs("hi")).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(err.to_string().contains("timed out"), "{}", err);
    }

    #[tokio::test]
    async fn test_exit_without_reading_stdin_reports_stderr() {
        let crew = oversized_crew();
        let err = engine("sh -c 'echo boom >&2; exit 3'")
            .kickoff(&crew, &inputs("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Internal(_)));
        let message = err.to_string();
        assert!(message.contains("exited with"), "{}", message);
        assert!(message.contains("boom"), "{}", message);
    }

    #[tokio::test]
    async fn test_missing_program_is_internal() {
        let crew = document_search_crew();
        let err = engine("ai-engine-no-such-program")
            .kickoff(&crew, &inputs("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
        assert!(err.to_string().contains("failed to start"));
    }
}
