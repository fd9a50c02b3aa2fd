//! Integration tests for Finsent annotation batches
//!
//! Drives the public API end to end with a scripted completion service and
//! real files on disk.

use async_trait::async_trait;
use finsent_core::{
    AnnotationClient, AnnotationRequest, AnnotationResult, AnnotationSession, Bank, BatchRunner,
    Completion, CompletionRequest, CompletionService, FinsentConfig, FinsentError, FinsentResult,
    JsonlAuditSink, QuotaConfig, QuotaTracker, SENTINEL_LABEL, SessionConfig,
    annotation::task_prompt,
    llm::SamplingParams,
    quota::FixedWindowClock,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Replays canned responses in order and records every request it sees
#[derive(Default)]
struct ScriptedService {
    responses: Mutex<VecDeque<FinsentResult<Completion>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedService {
    fn new(responses: Vec<FinsentResult<Completion>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> FinsentResult<Completion> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FinsentError::llm("script exhausted")))
    }
}

fn answer(content: &str) -> FinsentResult<Completion> {
    Ok(Completion {
        content: content.to_string(),
        raw_payload: serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [{"message": {"role": "assistant", "content": content}}],
        })
        .to_string(),
    })
}

fn session_config(bank: Bank) -> SessionConfig {
    SessionConfig::from_config(&FinsentConfig::default(), task_prompt(bank.display_name()))
}

fn audit_lines(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_batch_run_end_to_end() {
    let root = TempDir::new().unwrap();
    let data = root.path().join("Data").join("UBS");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("ubs_2023.csv"),
        "headline,article_content\n\
         Profit up,UBS reports higher profit\n\
         Lawsuit,UBS faces lawsuit\n\
         Update,UBS announces board changes\n",
    )
    .unwrap();

    let service = Arc::new(ScriptedService::new(vec![
        answer("1. Higher profit is good news."),
        Err(FinsentError::http_status("bad request", 400)),
        answer("0. Routine governance news."),
    ]));

    let mut config = FinsentConfig::default();
    config.paths.data_root = root.path().join("Data");
    config.paths.output_root = root.path().join("Output_Data");
    config.paths.log_dir = root.path().join("Output_Data").join("Logfiles");

    let runner = BatchRunner::new(config, service.clone())
        .with_clock(Arc::new(FixedWindowClock::new(Duration::from_secs(1))));
    let outcomes = runner.process_bank(Bank::Ubs).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert_eq!(outcome.rows, 3);
    assert_eq!(outcome.tally.positive, 1);
    assert_eq!(outcome.tally.neutral, 1);
    assert_eq!(outcome.tally.unparsed, 1);

    let output = std::fs::read_to_string(&outcome.output).unwrap();
    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, ["headline", "article_content", "Sentiment"]);
    let sentiments: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(2).unwrap().to_string())
        .collect();
    assert_eq!(
        sentiments,
        ["1. Higher profit is good news.", SENTINEL_LABEL, "0. Routine governance news."]
    );

    let audit = audit_lines(&outcome.audit_log);
    assert_eq!(audit.len(), 3);
    assert_eq!(audit[0]["outcome"], "success");
    assert_eq!(audit[0]["response"]["id"], "chatcmpl-test");
    assert_eq!(audit[1]["outcome"], "failure");
    assert_eq!(audit[2]["sequence"], 3);
    assert!(audit.iter().all(|line| line["session"] == "ubs_2023.csv"));

    // every request carries system instructions, article and the bank's prompt
    let requests = service.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].messages.len(), 3);
    assert_eq!(requests[0].messages[1].content, "UBS reports higher profit");
    assert!(requests[0].messages[2].content.contains("towards UBS"));
    assert_eq!(requests[0].model_id, "gpt-4-turbo-2024-04-09");
}

#[tokio::test(start_paused = true)]
async fn test_oversized_article_is_sent_after_one_window_reset() {
    let service = Arc::new(ScriptedService::new(vec![answer("-1. Weak quarter.")]));
    let clock = Arc::new(FixedWindowClock::new(Duration::from_secs(30)));
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("CS_test.txt");

    let mut session = AnnotationSession::new(
        "oversized",
        session_config(Bank::CreditSuisse),
        QuotaTracker::with_clock(QuotaConfig::new(10, 500), clock),
        AnnotationClient::new(service.clone()),
        Box::new(JsonlAuditSink::new(&log)),
    );

    let start = Instant::now();
    let label = session.annotate("fifteen chars!!").await.unwrap();
    assert_eq!(label, "-1. Weak quarter.");
    assert!(start.elapsed() >= Duration::from_secs(30));

    let summary = session.close().await.unwrap();
    assert_eq!(summary.quota.token_waits, 1);
    assert_eq!(summary.quota.request_waits, 0);
    assert_eq!(audit_lines(&log).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_request_budget_forces_wait() {
    let service = Arc::new(ScriptedService::new(vec![
        answer("1. a."),
        answer("1. b."),
        answer("1. c."),
    ]));
    let clock = Arc::new(FixedWindowClock::new(Duration::from_secs(45)));
    let dir = TempDir::new().unwrap();

    let mut session = AnnotationSession::new(
        "requests",
        session_config(Bank::Ubs),
        QuotaTracker::with_clock(QuotaConfig::new(1_000, 2), clock),
        AnnotationClient::new(service),
        Box::new(JsonlAuditSink::new(dir.path().join("UBS_test.txt"))),
    );

    let start = Instant::now();
    session.annotate("a").await.unwrap();
    session.annotate("b").await.unwrap();
    assert!(start.elapsed() < Duration::from_secs(1));

    session.annotate("c").await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(45));

    let summary = session.close().await.unwrap();
    assert_eq!(summary.quota.request_waits, 1);
    assert_eq!(summary.annotated, 3);
}

#[tokio::test]
async fn test_transport_failure_becomes_failure_result() {
    let service = Arc::new(ScriptedService::new(vec![Err(FinsentError::Http {
        message: "connection refused".to_string(),
        url: Some("http://127.0.0.1:9/chat/completions".to_string()),
        status_code: None,
        context: None,
    })]));
    let client = AnnotationClient::new(service);

    let request = AnnotationRequest {
        text: "Credit Suisse shares fall",
        system_instructions: "Pretend you are a sentiment analysis expert.",
        task_prompt: "Score it.",
        model_id: "gpt-4-turbo-2024-04-09",
        sampling: SamplingParams::default(),
    };

    let result = client.call(&request, &CancellationToken::new()).await;
    match &result {
        AnnotationResult::Failure { reason } => assert!(reason.contains("connection refused")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(result.label_or_sentinel(), SENTINEL_LABEL);
}

#[tokio::test]
async fn test_audit_log_is_appended_across_sessions() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("Logfiles").join("UBS_shared.txt");

    for (name, content) in [("first", "1. One."), ("second", "0. Two.")] {
        let service = Arc::new(ScriptedService::new(vec![answer(content)]));
        let mut session = AnnotationSession::new(
            name,
            session_config(Bank::Ubs),
            QuotaTracker::new(QuotaConfig::default()),
            AnnotationClient::new(service),
            Box::new(JsonlAuditSink::new(&log)),
        );
        session.annotate("article").await.unwrap();
        session.close().await.unwrap();
    }

    let audit = audit_lines(&log);
    assert_eq!(audit.len(), 2);
    assert_eq!(audit[0]["label"], "1. One.");
    assert_eq!(audit[1]["label"], "0. Two.");

    // both sessions start at sequence 1; the session name tells them apart
    assert_eq!(audit[0]["sequence"], 1);
    assert_eq!(audit[1]["sequence"], 1);
    assert_eq!(audit[0]["session"], "first");
    assert_eq!(audit[1]["session"], "second");
}
