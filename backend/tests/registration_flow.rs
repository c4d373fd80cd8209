//! End-to-end registration flow over the in-memory adapters.
//!
//! Sign up, record a payment intent, reconcile it the way the operator CLI
//! does, then submit the form.

mod support;

use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test as actix_test;
use matrimony::domain::{PaymentReconciliationService, PaymentStatus, UserId};
use serde_json::{Value, json};

use support::{MemoryStack, app, complete_submission, session_cookie};

fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn sign_up_body() -> Value {
    json!({
        "fullName": "Asha Hiremath",
        "mobile": "98450 00000",
        "email": "asha@example.com",
        "password": "correct horse"
    })
}

#[actix_web::test]
async fn paid_user_submits_registration() {
    let stack = MemoryStack::new();
    let app = actix_test::init_service(app(stack.state(), Key::generate())).await;

    let signed_up = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/sign-up")
            .set_json(sign_up_body())
            .to_request(),
    )
    .await;
    assert_eq!(signed_up.status(), StatusCode::OK);
    let cookie: Cookie<'static> = session_cookie(&signed_up).expect("session cookie");
    let body: Value = actix_test::read_body_json(signed_up).await;
    assert_eq!(body["next"]["redirect"], "/dashboard");
    let user_id = body["identity"]["id"].as_str().expect("uid").to_owned();

    let get_form = || {
        actix_test::TestRequest::get()
            .uri("/api/v1/registration")
            .cookie(cookie.clone())
            .to_request()
    };

    let unpaid = actix_test::call_service(&app, get_form()).await;
    assert_eq!(unpaid.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&unpaid).as_deref(), Some("/dashboard"));
    let unpaid_body: Value = actix_test::read_body_json(unpaid).await;
    assert_eq!(
        unpaid_body["notice"]["message"],
        "Please complete the payment first"
    );

    let intent = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/payments/intent")
            .cookie(cookie.clone())
            .set_json(json!({"method": "gpay"}))
            .to_request(),
    )
    .await;
    assert_eq!(intent.status(), StatusCode::OK);
    let intent_body: Value = actix_test::read_body_json(intent).await;
    assert_eq!(intent_body["record"]["status"], "initiated");
    assert_eq!(intent_body["next"], "registration");

    let initiated_only = actix_test::call_service(&app, get_form()).await;
    assert_eq!(initiated_only.status(), StatusCode::SEE_OTHER);

    PaymentReconciliationService::new(stack.payments.clone())
        .set_status(&UserId::new(user_id).expect("uid"), PaymentStatus::Completed)
        .await
        .expect("reconcile");

    let paid = actix_test::call_service(&app, get_form()).await;
    assert_eq!(paid.status(), StatusCode::OK);

    let incomplete = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .cookie(cookie.clone())
            .set_json(json!({"name": "Asha Hiremath"}))
            .to_request(),
    )
    .await;
    assert_eq!(incomplete.status(), StatusCode::BAD_REQUEST);
    let problems: Value = actix_test::read_body_json(incomplete).await;
    assert!(
        problems["details"]["missing"]
            .as_array()
            .is_some_and(|missing| missing.iter().any(|field| field == "father"))
    );
    assert!(stack.sink.delivered().is_empty());

    let submitted = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .cookie(cookie.clone())
            .set_json(complete_submission())
            .to_request(),
    )
    .await;
    assert_eq!(submitted.status(), StatusCode::OK);
    let outcome: Value = actix_test::read_body_json(submitted).await;
    assert_eq!(outcome["outcome"], "submitted");
    assert_eq!(outcome["confirmation"]["phone"], "+91 7829146919");

    let delivered = stack.sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].data.submission.name, "Asha Hiremath");
    assert_eq!(delivered[0].data.timestamp, "2026-03-01T09:30:00.000Z");
}

#[actix_web::test]
async fn profile_edits_show_on_the_dashboard() {
    let stack = MemoryStack::new();
    let app = actix_test::init_service(app(stack.state(), Key::generate())).await;
    let signed_up = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/sign-up")
            .set_json(sign_up_body())
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&signed_up).expect("session cookie");

    let empty: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(empty["fullName"], "");
    assert_eq!(empty["email"], "asha@example.com");

    for patch in [json!({"fullName": "Asha Hiremath"}), json!({"age": 27, "city": "Dharwad"})] {
        let saved = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/profile")
                .cookie(cookie.clone())
                .set_json(patch)
                .to_request(),
        )
        .await;
        assert_eq!(saved.status(), StatusCode::OK);
    }

    let dashboard: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(dashboard["profile"]["fullName"], "Asha Hiremath");
    assert_eq!(dashboard["profile"]["age"], 27);
    assert_eq!(dashboard["profile"]["city"], "Dharwad");
    assert!(dashboard["payment"].is_null());
    assert_eq!(dashboard["options"]["amount"], 5);
}

#[actix_web::test]
async fn anonymous_payment_intent_writes_nothing() {
    let stack = MemoryStack::new();
    let app = actix_test::init_service(app(stack.state(), Key::generate())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/payments/intent")
            .set_json(json!({"method": "phonepe"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let nobody = UserId::new("anyone").expect("uid");
    let updated = PaymentReconciliationService::new(stack.payments.clone())
        .set_status(&nobody, PaymentStatus::Completed)
        .await;
    assert!(updated.is_err(), "no record should exist to reconcile");
}

#[actix_web::test]
async fn signing_out_locks_the_form_again() {
    let stack = MemoryStack::new();
    let app = actix_test::init_service(app(stack.state(), Key::generate())).await;
    let signed_up = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/sign-up")
            .set_json(sign_up_body())
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&signed_up).expect("session cookie");

    let signed_out = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/sign-out")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(signed_out.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signed_out).as_deref(), Some("/"));

    let replayed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/registration")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(replayed.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&replayed).as_deref(), Some("/dashboard"));
}
