//! The spreadsheet sink against a real listener.
//!
//! The stub records each JSON body and answers with a configurable status;
//! whatever it answers, only a failure to send counts as an error.

mod support;

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use matrimony::domain::SubmissionEnvelope;
use matrimony::domain::ports::{SubmissionSink, SubmissionSinkError};
use matrimony::outbound::spreadsheet::SpreadsheetWebhookSink;
use rstest::rstest;
use serde_json::Value;
use url::Url;

use support::{complete_submission, fixture_timestamp};

#[derive(Clone)]
struct Stub {
    received: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    delay: Option<Duration>,
}

async fn record(stub: web::Data<Stub>, body: web::Json<Value>) -> HttpResponse {
    stub.received.lock().expect("stub lock").push(body.into_inner());
    if let Some(delay) = stub.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    HttpResponse::build(stub.status).body("<html>Moved</html>")
}

fn start_stub(stub: Stub) -> (Url, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    let data = web::Data::new(stub);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/macros/exec", web::post().to(record))
    })
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let url = Url::parse(&format!("http://{addr}/macros/exec")).expect("stub url");
    (url, handle)
}

fn stub(status: StatusCode) -> Stub {
    Stub {
        received: Arc::new(Mutex::new(Vec::new())),
        status,
        delay: None,
    }
}

fn envelope() -> SubmissionEnvelope {
    SubmissionEnvelope::wrap(complete_submission(), fixture_timestamp())
}

#[rstest]
#[case(StatusCode::OK)]
#[case(StatusCode::FOUND)]
#[case(StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn any_answer_counts_as_delivered(#[case] status: StatusCode) {
    let stub = stub(status);
    let received = Arc::clone(&stub.received);
    let (url, handle) = start_stub(stub);

    let sink = SpreadsheetWebhookSink::new(url, Some(Duration::from_secs(5))).expect("sink");
    let outcome = sink.deliver(&envelope()).await;
    handle.stop(true).await;

    assert_eq!(outcome, Ok(()));
    let bodies = received.lock().expect("stub lock").clone();
    assert_eq!(bodies.len(), 1, "exactly one POST per submission");
    let data = &bodies[0]["data"];
    assert_eq!(data["name"], "Asha Hiremath");
    assert_eq!(data["gender"], "female");
    assert_eq!(data["image1"], "");
    assert_eq!(data["image2"], "");
    assert_eq!(data["timestamp"], "2026-03-01T09:30:00.000Z");
}

#[actix_web::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/macros/exec")).expect("url");
    let sink = SpreadsheetWebhookSink::new(url, Some(Duration::from_secs(2))).expect("sink");
    let outcome = sink.deliver(&envelope()).await;
    assert!(matches!(outcome, Err(SubmissionSinkError::Transport { .. })));
}

#[actix_web::test]
async fn configured_timeout_bounds_the_wait() {
    let mut slow = stub(StatusCode::OK);
    slow.delay = Some(Duration::from_secs(3));
    let (url, handle) = start_stub(slow);

    let sink = SpreadsheetWebhookSink::new(url, Some(Duration::from_millis(200))).expect("sink");
    let outcome = sink.deliver(&envelope()).await;
    handle.stop(false).await;

    assert!(matches!(outcome, Err(SubmissionSinkError::Transport { .. })));
}
