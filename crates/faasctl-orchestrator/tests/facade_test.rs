use faasctl_core::{
    ExecutionRequest, ExecutionStatus, FunctionSpec, Language, SandboxMode,
};
use faasctl_metrics::{SourceKind, ADHOC_PLAIN_SOURCE_ID};
use faasctl_orchestrator::{Action, ActionOutcome, Orchestrator};
use uuid::Uuid;

const PLAIN_METRICS: &str = r#"{
    "detailed_metrics": [
        {
            "function_id": "normal_execution",
            "execution_time": 0.7,
            "status": "success",
            "error_message": null,
            "start_time": "2024-03-01T12:00:00Z",
            "end_time": "2024-03-01T12:00:01Z"
        }
    ],
    "aggregated_metrics": {
        "total_executions": 4,
        "successful_executions": 3,
        "failed_executions": 1,
        "avg_execution_time": 0.6125,
        "min_execution_time": 0.2,
        "max_execution_time": 1.1
    }
}"#;

#[tokio::test]
async fn test_create_get_delete_python_function() {
    let mut server = mockito::Server::new_async().await;
    let id = Uuid::new_v4().to_string();

    server
        .mock("POST", "/api/functions")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"function_id":"{id}"}}"#))
        .create_async()
        .await;
    server
        .mock("GET", format!("/api/functions/{id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"id":"{id}","name":"f1","language":"python","code":"print(1)","timeout":5}}"#
        ))
        .expect_at_least(1)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", format!("/api/functions/{id}").as_str())
        .with_status(200)
        .with_body(r#"{"message":"Function deleted successfully"}"#)
        .create_async()
        .await;

    let orchestrator = Orchestrator::new(&server.url());

    let spec = FunctionSpec::new(
        "f1".to_string(),
        Language::Python,
        "print(1)".to_string(),
        5,
    )
    .unwrap();

    let created = orchestrator
        .dispatch(Action::CreateFunction(spec))
        .await
        .unwrap();
    let created_id = match created {
        ActionOutcome::Created { id } => id,
        other => panic!("expected Created, got {other:?}"),
    };
    assert_eq!(created_id, id);

    let record = orchestrator.get_function(&id).await.unwrap();
    assert_eq!(record.language, Language::Python);

    // delete must pick the default family route after the read
    orchestrator
        .dispatch(Action::DeleteFunction { id: id.clone() })
        .await
        .unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn test_delete_js_function_routes_to_js_family() {
    let mut server = mockito::Server::new_async().await;
    let id = Uuid::new_v4().to_string();

    server
        .mock("GET", format!("/api/functions/{id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"id":"{id}","name":"f2","language":"javascript","code":"console.log(1)","timeout":5}}"#
        ))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", format!("/api/js-functions/{id}").as_str())
        .with_status(200)
        .with_body(r#"{"message":"Function deleted successfully"}"#)
        .create_async()
        .await;

    let orchestrator = Orchestrator::new(&server.url());
    orchestrator.delete_function(&id).await.unwrap();

    delete.assert_async().await;
}

#[tokio::test]
async fn test_execute_attaches_latest_sample() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/execute")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output":"1\n"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/execute/metrics")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PLAIN_METRICS)
        .create_async()
        .await;

    let orchestrator = Orchestrator::new(&server.url());
    let request =
        ExecutionRequest::new("print(1)".to_string(), Language::Python, 5, SandboxMode::Plain)
            .unwrap();

    let report = orchestrator.execute(&request).await.unwrap();
    assert!(report.outcome.status.is_success());
    let sample = report.latest_sample.unwrap();
    assert_eq!(sample.execution_time_seconds, 0.7);
}

#[tokio::test]
async fn test_execute_failure_outcome_with_message() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/execute")
        .with_status(500)
        .with_body(r#"{"error":"Execution failed or timeout","details":"ZeroDivisionError: division by zero"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/execute/metrics")
        .with_status(500)
        .with_body(r#"{"error":"Database error"}"#)
        .create_async()
        .await;

    let orchestrator = Orchestrator::new(&server.url());
    let request =
        ExecutionRequest::new("1/0".to_string(), Language::Python, 5, SandboxMode::Plain).unwrap();

    let report = orchestrator.execute(&request).await.unwrap();
    assert_eq!(report.outcome.status, ExecutionStatus::Failure);
    assert!(report
        .outcome
        .error_message
        .as_deref()
        .unwrap()
        .contains("ZeroDivisionError"));
    // metrics fetch failed, the execution result still stands
    assert!(report.latest_sample.is_none());
}

#[tokio::test]
async fn test_history_partial_degradation_through_facade() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/functions/metrics/aggregate")
        .with_status(500)
        .with_body(r#"{"error":"Database error"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/execute/metrics")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PLAIN_METRICS)
        .create_async()
        .await;

    let orchestrator = Orchestrator::new(&server.url());
    let outcome = orchestrator.dispatch(Action::FetchHistory).await.unwrap();

    let history = match outcome {
        ActionOutcome::History(view) => view,
        other => panic!("expected History, got {other:?}"),
    };

    assert_eq!(history.rows.len(), 1);
    assert_eq!(history.rows[0].source_id, ADHOC_PLAIN_SOURCE_ID);
    assert_eq!(history.warnings.len(), 1);
    assert_eq!(history.warnings[0].source, SourceKind::Functions);
}
