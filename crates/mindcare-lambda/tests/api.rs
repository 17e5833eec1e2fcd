use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use jiff::{Timestamp, ToSpan};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tower::ServiceExt;

use mindcare_auth::jwt::TokenVerifier;
use mindcare_core::analytics::utc_date;
use mindcare_core::keys;
use mindcare_lambda::router;
use mindcare_lambda::state::AppState;
use mindcare_storage::Store;

const SECRET: &[u8] = b"api-test-secret";
const ISSUER: &str = "https://auth.mindcare.test";

fn token(sub: &str, role: &str) -> String {
    let now = Timestamp::now().as_second();
    let claims = json!({
        "sub": sub,
        "iss": ISSUER,
        "token_use": "access",
        "exp": now + 3600,
        "iat": now,
        "email": format!("{sub}@example.edu"),
        "custom:role": role,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

struct TestApp {
    app: Router,
    store: Store,
}

impl TestApp {
    fn new() -> Self {
        Self::with_max_days(365)
    }

    fn with_max_days(max_days: u32) -> Self {
        let store = Store::memory();
        let state = AppState::new(
            store.clone(),
            TokenVerifier::shared_secret(SECRET, ISSUER),
            StdRng::seed_from_u64(7),
            max_days,
        );
        Self {
            app: router(state),
            store,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    /// Register `sub` with `role` and return a token for it.
    async fn signup(&self, sub: &str, role: &str, name: &str) -> String {
        let token = token(sub, role);
        let (status, _) = self.post("/signup", &token, json!({ "name": name })).await;
        assert_eq!(status, StatusCode::OK);
        token
    }
}

fn days_from_today(days: i64) -> String {
    utc_date(Timestamp::now())
        .checked_add(days.days())
        .unwrap()
        .to_string()
}

// --- public routes ---

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn instruments_are_public() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/instruments", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["PHQ-9", "GAD-7"]);

    let (status, body) = app.send(Method::GET, "/instruments/phq-9", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_count"], 9);
    assert_eq!(body["bands"].as_array().unwrap().len(), 5);

    let (status, body) = app.send(Method::GET, "/instruments/bdi", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// --- authentication ---

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/chat", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn token_from_another_issuer_is_unauthorized() {
    let app = TestApp::new();
    let now = Timestamp::now().as_second();
    let claims = json!({
        "sub": "mallory",
        "iss": "https://elsewhere.test",
        "token_use": "access",
        "exp": now + 3600,
        "iat": now,
    });
    let forged = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();

    let (status, _) = app.get("/chat", &forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn subject_with_key_separator_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app.get("/chat", &token("stu-1:extra", "student")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

// --- profiles ---

#[tokio::test]
async fn signup_takes_role_and_email_from_token() {
    let app = TestApp::new();
    let token = app.signup("stu-1", "student", "Sam").await;

    let (status, body) = app.get("/profile", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sam");
    assert_eq!(body["role"], "student");
    assert_eq!(body["email"], "stu-1@example.edu");

    let (status, _) = app.post("/signup", &token, json!({ "name": "Sam" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn concurrent_signups_create_one_profile() {
    let app = TestApp::new();
    let token = token("stu-1", "student");

    let mut created = 0;
    for _ in 0..20 {
        let first = app.post("/signup", &token, json!({ "name": "First" }));
        let second = app.post("/signup", &token, json!({ "name": "Second" }));
        let ((a, _), (b, _)) = tokio::join!(first, second);
        created += [a, b].iter().filter(|s| **s == StatusCode::OK).count();
    }
    assert_eq!(created, 1);

    let (status, _) = app.get("/profile", &token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn profile_before_signup_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get("/profile", &token("ghost", "student")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn counsellor_directory_is_sorted_by_name() {
    let app = TestApp::new();
    app.signup("c-2", "counsellor", "Zoe").await;
    app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;

    let (status, body) = app.get("/counsellors", &student).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": "c-1", "name": "Ada" }, { "id": "c-2", "name": "Zoe" }])
    );
}

// --- chat ---

#[tokio::test]
async fn crisis_message_books_first_counsellor_for_tomorrow() {
    let app = TestApp::new();
    app.signup("c-2", "counsellor", "Zoe").await;
    app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    let admin = token("admin-1", "admin");

    let (status, body) = app
        .post(
            "/chat",
            &student,
            json!({ "text": "I'm so stressed I want to end my life" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["message"]["tier"], "crisis");
    assert_eq!(body["message"]["is_from_user"], true);
    assert_eq!(body["reply"]["is_from_user"], false);
    assert!(!body["reply"]["text"].as_str().unwrap().is_empty());

    let sent_at: Timestamp = body["message"]["created_at"].as_str().unwrap().parse().unwrap();
    let expected_date = utc_date(sent_at).tomorrow().unwrap().to_string();
    let appointment = &body["appointment"];
    assert_eq!(appointment["status"], "auto-scheduled");
    assert_eq!(appointment["tier"], "crisis");
    assert_eq!(appointment["counsellor_id"], "c-1");
    assert_eq!(appointment["subject_id"], "stu-1");
    assert_eq!(appointment["time"], "10:00");
    assert_eq!(appointment["date"], expected_date);

    let (status, body) = app.get("/analytics", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["crisis"], 1);
    assert_eq!(body["grand_total"], 1);
    assert_eq!(body["crisis_rate"], 1.0);
}

#[tokio::test]
async fn broken_counter_does_not_block_escalation() {
    let app = TestApp::new();
    app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    let admin = token("admin-1", "admin");
    app.store
        .set(
            &keys::risk_counter(utc_date(Timestamp::now())),
            b"garbage".to_vec(),
        )
        .await
        .unwrap();

    let (status, body) = app
        .post("/chat", &student, json!({ "text": "I want to kill myself" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["tier"], "crisis");

    let (_, body) = app.get("/appointments", &admin).await;
    let appointments = body.as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["status"], "auto-scheduled");
    assert_eq!(appointments[0]["counsellor_id"], "c-1");
}

#[tokio::test]
async fn broken_counter_does_not_block_assessment_escalation() {
    let app = TestApp::new();
    app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    app.store
        .set(
            &keys::assessment_counter(utc_date(Timestamp::now())),
            b"garbage".to_vec(),
        )
        .await
        .unwrap();

    let (status, body) = app
        .post(
            "/assessments",
            &student,
            json!({ "instrument": "PHQ-9", "item_scores": [3, 3, 3, 3, 3, 3, 3, 3, 3] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["tier"], "crisis");

    let (_, body) = app.get("/assessments", &student).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn high_risk_with_no_counsellors_books_nothing() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;

    let (status, body) = app
        .post("/chat", &student, json!({ "text": "I feel hopeless" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["tier"], "high");
    assert!(body["appointment"].is_null());
}

#[tokio::test]
async fn low_and_moderate_messages_never_escalate() {
    let app = TestApp::new();
    app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;

    for (text, tier) in [("Had a good day", "low"), ("Exams are stressful", "moderate")] {
        let (status, body) = app.post("/chat", &student, json!({ "text": text })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"]["tier"], tier);
        assert!(body["appointment"].is_null());
    }

    let (_, body) = app.get("/appointments", &student).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn history_keeps_every_message_in_order() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;

    for text in ["first", "second", "third"] {
        let (status, _) = app.post("/chat", &student, json!({ "text": text })).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get("/chat", &student).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 6);

    let from_user: Vec<bool> = messages
        .iter()
        .map(|m| m["is_from_user"].as_bool().unwrap())
        .collect();
    assert_eq!(from_user, vec![true, false, true, false, true, false]);

    let texts: Vec<&str> = messages
        .iter()
        .filter(|m| m["is_from_user"] == true)
        .map(|m| m["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;
    let (status, body) = app.post("/chat", &student, json!({ "text": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn students_only_read_their_own_history() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;
    let other = app.signup("stu-2", "student", "Kim").await;
    let counsellor = app.signup("c-1", "counsellor", "Ada").await;
    app.post("/chat", &student, json!({ "text": "hello" })).await;

    let (status, _) = app.get("/chat?subject_id=stu-1", &other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/chat?subject_id=stu-1", &counsellor).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = app.get("/chat?subject_id=stu-1:x", &counsellor).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- assessments ---

#[tokio::test]
async fn maximum_phq9_is_severe_and_crisis() {
    let app = TestApp::new();
    app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;

    let (status, body) = app
        .post(
            "/assessments",
            &student,
            json!({ "instrument": "PHQ-9", "item_scores": [3, 3, 3, 3, 3, 3, 3, 3, 3] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["total_score"], 27);
    assert_eq!(body["submission"]["severity_label"], "Severe Depression");
    assert_eq!(body["submission"]["tier"], "crisis");
    assert_eq!(body["appointment"]["tier"], "crisis");

    let (_, body) = app.get("/assessments", &student).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn gad7_maximum_is_high_without_counsellors() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;

    let (status, body) = app
        .post(
            "/assessments",
            &student,
            json!({ "instrument": "GAD-7", "item_scores": [3, 3, 3, 3, 3, 3, 3] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["total_score"], 21);
    assert_eq!(body["submission"]["tier"], "high");
    assert!(body["appointment"].is_null());
}

#[tokio::test]
async fn invalid_items_are_rejected_without_side_effects() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;
    let admin = token("admin-1", "admin");

    for items in [json!([0, 1, 2]), json!([0, 0, 0, 0, 0, 0, 0, 0, 4]), json!([0, 0, 0, 0, 0, 0, 0, 0, -1])] {
        let (status, body) = app
            .post(
                "/assessments",
                &student,
                json!({ "instrument": "PHQ-9", "item_scores": items }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let (status, body) = app
        .post(
            "/assessments",
            &student,
            json!({ "instrument": "BDI-II", "item_scores": [] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, body) = app.get("/assessments", &student).await;
    assert_eq!(body, json!([]));
    let (_, body) = app.get("/analytics", &admin).await;
    assert_eq!(body["assessment_series"], json!([]));
}

// --- appointments ---

#[tokio::test]
async fn booking_checks_role_date_time_and_counsellor() {
    let app = TestApp::new();
    let counsellor = app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    let date = days_from_today(7);

    let (status, body) = app
        .post(
            "/appointments",
            &student,
            json!({ "counsellor_id": "c-1", "date": date, "time": "09:30:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["time"], "09:30");
    assert!(body["tier"].is_null());

    let (status, _) = app
        .post(
            "/appointments",
            &counsellor,
            json!({ "counsellor_id": "c-1", "date": date, "time": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/appointments",
            &student,
            json!({ "counsellor_id": "c-1", "date": days_from_today(-1), "time": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/appointments",
            &student,
            json!({ "counsellor_id": "c-1", "date": date, "time": "teatime" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/appointments",
            &student,
            json!({ "counsellor_id": "c-9", "date": date, "time": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn appointments_are_listed_by_role() {
    let app = TestApp::new();
    let ada = app.signup("c-1", "counsellor", "Ada").await;
    let zoe = app.signup("c-2", "counsellor", "Zoe").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    let other = app.signup("stu-2", "student", "Kim").await;
    let admin = token("admin-1", "admin");

    app.post(
        "/appointments",
        &student,
        json!({ "counsellor_id": "c-2", "date": days_from_today(3), "time": "14:00" }),
    )
    .await;
    app.post(
        "/appointments",
        &student,
        json!({ "counsellor_id": "c-1", "date": days_from_today(2), "time": "11:00" }),
    )
    .await;
    app.post(
        "/appointments",
        &other,
        json!({ "counsellor_id": "c-1", "date": days_from_today(2), "time": "09:00" }),
    )
    .await;

    let count = |body: &Value| body.as_array().unwrap().len();

    let (_, body) = app.get("/appointments", &student).await;
    assert_eq!(count(&body), 2);
    assert_eq!(body[0]["counsellor_id"], "c-1");

    let (_, body) = app.get("/appointments", &ada).await;
    assert_eq!(count(&body), 2);
    assert_eq!(body[0]["time"], "09:00");

    let (_, body) = app.get("/appointments", &zoe).await;
    assert_eq!(count(&body), 1);

    let (_, body) = app.get("/appointments", &admin).await;
    assert_eq!(count(&body), 3);
}

#[tokio::test]
async fn only_assigned_counsellor_or_admin_changes_status() {
    let app = TestApp::new();
    let ada = app.signup("c-1", "counsellor", "Ada").await;
    let zoe = app.signup("c-2", "counsellor", "Zoe").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    let admin = token("admin-1", "admin");

    let (_, body) = app
        .post("/chat", &student, json!({ "text": "I want to die" }))
        .await;
    let id = body["appointment"]["id"].as_str().unwrap().to_string();
    let uri = format!("/appointments/{id}/status");

    let (status, _) = app.patch(&uri, &student, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.patch(&uri, &zoe, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.patch(&uri, &ada, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, body) = app.patch(&uri, &admin, json!({ "status": "cancelled" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let missing = format!("/appointments/{}/status", uuid::Uuid::new_v4());
    let (status, _) = app.patch(&missing, &admin, json!({ "status": "cancelled" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn racing_status_changes_close_an_appointment_once() {
    let app = TestApp::new();
    let ada = app.signup("c-1", "counsellor", "Ada").await;
    let student = app.signup("stu-1", "student", "Sam").await;
    let admin = token("admin-1", "admin");

    let (_, body) = app
        .post("/chat", &student, json!({ "text": "I want to die" }))
        .await;
    let id = body["appointment"]["id"].as_str().unwrap().to_string();
    let uri = format!("/appointments/{id}/status");

    let complete = app.patch(&uri, &ada, json!({ "status": "completed" }));
    let cancel = app.patch(&uri, &admin, json!({ "status": "cancelled" }));
    let ((a, first), (b, second)) = tokio::join!(complete, cancel);

    let statuses = [a, b];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(),
        1
    );

    let winner = if a == StatusCode::OK { &first } else { &second };
    let (_, listed) = app.get("/appointments", &admin).await;
    assert_eq!(listed[0]["status"], winner["status"]);
}

// --- forum ---

#[tokio::test]
async fn anonymous_posts_hide_their_author() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;

    let (status, body) = app
        .post(
            "/forum",
            &student,
            json!({ "title": "Exam nerves", "content": "Anyone else?", "anonymous": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author_name"], "Anonymous");
    assert_eq!(body["author_id"], "");

    app.post(
        "/forum",
        &student,
        json!({ "title": "Study group", "content": "Library at 5" }),
    )
    .await;

    let (_, body) = app.get("/forum", &student).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "Study group");
    assert_eq!(posts[0]["author_name"], "Sam");
    assert_eq!(posts[1]["author_name"], "Anonymous");
}

#[tokio::test]
async fn replies_are_appended() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;
    let counsellor = app.signup("c-1", "counsellor", "Ada").await;

    let (_, post) = app
        .post(
            "/forum",
            &student,
            json!({ "title": "Sleep", "content": "Can't sleep before exams" }),
        )
        .await;
    let uri = format!("/forum/{}/replies", post["id"].as_str().unwrap());

    let (status, _) = app
        .post(&uri, &counsellor, json!({ "content": "Try a wind-down routine" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .post(&uri, &student, json!({ "content": "Thanks!" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let replies = body["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["author_name"], "Ada");
    assert_eq!(replies[1]["content"], "Thanks!");

    let missing = format!("/forum/{}/replies", uuid::Uuid::new_v4());
    let (status, body) = app.post(&missing, &student, json!({ "content": "hi" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// --- analytics ---

#[tokio::test]
async fn analytics_is_admin_only() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;
    let counsellor = app.signup("c-1", "counsellor", "Ada").await;

    for token in [&student, &counsellor] {
        let (status, body) = app.get("/analytics", token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn analytics_with_no_data_has_zero_crisis_rate() {
    let app = TestApp::new();
    let (status, body) = app.get("/analytics", &token("admin-1", "admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["range_days"], 30);
    assert_eq!(body["grand_total"], 0);
    assert_eq!(body["crisis_rate"], 0.0);
    assert_eq!(body["risk_series"], json!([]));
}

#[tokio::test]
async fn analytics_window_is_clamped() {
    let app = TestApp::with_max_days(90);
    let admin = token("admin-1", "admin");

    let (_, body) = app.get("/analytics?days=0", &admin).await;
    assert_eq!(body["range_days"], 1);

    let (_, body) = app.get("/analytics?days=5000", &admin).await;
    assert_eq!(body["range_days"], 90);

    let (status, _) = app.get("/analytics?days=soon", &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analytics_counts_chat_tiers_and_assessments() {
    let app = TestApp::new();
    let student = app.signup("stu-1", "student", "Sam").await;
    let admin = token("admin-1", "admin");

    for text in ["hi", "so lonely", "I feel worthless", "thinking about suicide"] {
        app.post("/chat", &student, json!({ "text": text })).await;
    }
    app.post(
        "/assessments",
        &student,
        json!({ "instrument": "GAD-7", "item_scores": [0, 0, 0, 0, 0, 0, 0] }),
    )
    .await;

    let (status, body) = app.get("/analytics?days=7", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["totals"],
        json!({ "low": 1, "moderate": 1, "high": 1, "crisis": 1 })
    );
    assert_eq!(body["grand_total"], 4);
    assert_eq!(body["crisis_rate"], 0.25);
    assert_eq!(body["assessment_totals"], json!({ "GAD-7": 1 }));
}
