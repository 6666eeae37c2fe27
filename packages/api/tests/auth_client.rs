//! Auth client against a disposable local HTTP server

use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use recipebook_api::{
    ApiConfig, ApiError, AuthClient, AuthFlow, AuthOutcome, LoginRequest, LogoutOutcome,
    RegisterRequest, TOKEN_KEY,
};
use recipebook_common::{KeyValueStore, MemoryStore};
use recipebook_widgets::messages::{take_stored_messages, MESSAGES_KEY};
use recipebook_widgets::MessageKind;
use tiny_http::{Header, Response, Server};

/// What the server saw
#[derive(Debug)]
struct Captured {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serve one canned response per request, then shut down
fn serve(replies: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = Server::from_listener(listener, None).unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in replies {
            let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(5)) else {
                return;
            };
            let mut received = String::new();
            request.as_reader().read_to_string(&mut received).unwrap();

            let captured = Captured {
                method: request.method().to_string(),
                url: request.url().to_string(),
                headers: request
                    .headers()
                    .iter()
                    .map(|h| (h.field.as_str().to_string(), h.value.as_str().to_string()))
                    .collect(),
                body: received,
            };
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
            request.respond(response).unwrap();
            tx.send(captured).unwrap();
        }
    });

    (format!("http://127.0.0.1:{}", port), rx)
}

fn client(base_url: &str) -> AuthClient<MemoryStore> {
    AuthClient::new(&ApiConfig::new(base_url), MemoryStore::new())
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        email: "ana@example.com".into(),
        username: "ana".into(),
        password: "Tomato42soup!".into(),
        remember: true,
    }
}

#[tokio::test]
async fn register_stores_token_and_queues_message() -> anyhow::Result<()> {
    let (base, requests) = serve(vec![(201, r#"{"token": "abc123", "user": {"username": "ana"}}"#)]);
    let client = client(&base);

    let outcome = client.register(&register_request(), "csrf-1").await?;
    assert_eq!(outcome, AuthOutcome::Success { redirect: base.clone() });
    assert_eq!(client.token()?, Some("abc123".to_string()));

    let queued = take_stored_messages(client.store())?;
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].message, "Account created successfully!");
    assert_eq!(queued[0].kind, MessageKind::Success);

    let seen = requests.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/api/auth/register/");
    assert_eq!(seen.header("X-CSRFToken"), Some("csrf-1"));
    assert_eq!(seen.header("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&seen.body)?;
    assert_eq!(body["username"], "ana");
    assert_eq!(body["remember"], true);
    Ok(())
}

#[tokio::test]
async fn register_rejection_uses_field_priority() -> anyhow::Result<()> {
    let (base, _requests) = serve(vec![(
        400,
        r#"{"detail": "Bad request", "email": ["user with this email already exists."]}"#,
    )]);
    let client = client(&base);

    let outcome = client.register(&register_request(), "").await?;
    assert_eq!(
        outcome,
        AuthOutcome::Rejected {
            message: "user with this email already exists.".to_string()
        }
    );
    assert_eq!(client.token()?, None);
    assert!(client.store().get_item(MESSAGES_KEY)?.is_none());
    Ok(())
}

#[tokio::test]
async fn login_without_token_still_succeeds() -> anyhow::Result<()> {
    let (base, requests) = serve(vec![(200, r#"{}"#)]);
    let client = client(&base);

    let request = LoginRequest {
        email_or_username: "ana".into(),
        password: "pw".into(),
    };
    let outcome = client.login(&request, "csrf-2").await?;
    assert!(matches!(outcome, AuthOutcome::Success { .. }));
    assert_eq!(client.token()?, None);
    assert_eq!(
        take_stored_messages(client.store())?[0].message,
        AuthFlow::Login.success_message()
    );

    let seen = requests.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(seen.url, "/api/auth/login/");
    let body: serde_json::Value = serde_json::from_str(&seen.body)?;
    assert_eq!(body["email_or_username"], "ana");
    Ok(())
}

#[tokio::test]
async fn login_rejection_falls_back() -> anyhow::Result<()> {
    let (base, _requests) = serve(vec![(401, r#"{"errors": "nope"}"#)]);
    let client = client(&base);

    let request = LoginRequest {
        email_or_username: "ana".into(),
        password: "wrong".into(),
    };
    let outcome = client.login(&request, "").await?;
    assert_eq!(
        outcome,
        AuthOutcome::Rejected {
            message: "Login failed. Please check your credentials.".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn unreadable_body_is_an_error() {
    let (base, _requests) = serve(vec![(500, "<html>oops</html>")]);
    let client = client(&base);

    let result = client.register(&register_request(), "").await;
    assert!(matches!(result, Err(ApiError::Json(_))));
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = client(&format!("http://127.0.0.1:{}", port));
    let result = client.register(&register_request(), "").await;
    assert!(matches!(result, Err(ApiError::Http(_))));
}

#[tokio::test]
async fn me_and_logout_use_bearer_token() -> anyhow::Result<()> {
    let (base, requests) = serve(vec![(200, r#"{"username": "ana", "email": "ana@example.com"}"#), (200, "{}")]);
    let client = client(&base);
    client.store().set_item(TOKEN_KEY, "tok")?;

    let user = client.me().await?;
    assert_eq!(user.map(|u| u.username), Some("ana".to_string()));

    let seen = requests.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.url, "/api/users/me/");
    assert_eq!(seen.header("Authorization"), Some("Bearer tok"));

    let outcome = client.logout().await?;
    assert_eq!(outcome, LogoutOutcome::LoggedOut { redirect: "/auth/".to_string() });
    assert_eq!(client.token()?, None);

    let seen = requests.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/api/auth/logout/");
    Ok(())
}

#[tokio::test]
async fn failed_logout_keeps_token() -> anyhow::Result<()> {
    let (base, _requests) = serve(vec![(403, "{}")]);
    let client = client(&base);
    client.store().set_item(TOKEN_KEY, "tok")?;

    let outcome = client.logout().await?;
    assert_eq!(outcome, LogoutOutcome::Failed { message: "Failed to log out.".to_string() });
    assert_eq!(client.token()?, Some("tok".to_string()));
    Ok(())
}

#[tokio::test]
async fn me_without_token_skips_request() -> anyhow::Result<()> {
    let client = client("http://127.0.0.1:9");
    assert_eq!(client.me().await?, None);
    Ok(())
}
