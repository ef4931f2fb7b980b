//! Drives the real reqwest transports against a local HTTP listener

use loginradius::{ClientConfig, Credentials, LoginRadiusError, TransportMode, UserProfile};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

const TOKEN: &str = "a0ba24d5-2290-43f8-a2f8-575848c9f0e8";
const SECRET: &str = "1337670d-f7fd-4066-a2e3-e440aec071ee";

struct Reply {
    status: &'static str,
    body: String,
}

impl Reply {
    fn new(status: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Answer one connection per reply, in order, on a background thread.
///
/// `replies` receives the listener's base URL so bodies can point back at it.
/// Request lines ("GET /path?query HTTP/1.1") come back over the channel.
fn serve<F>(replies: F) -> (String, mpsc::Receiver<String>)
where
    F: FnOnce(&str) -> Vec<Reply>,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap());
    let replies = replies(&base_url);
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            let _ = tx.send(request_line.trim_end().to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.status,
                reply.body.len(),
                reply.body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
    });

    (base_url, rx)
}

fn credentials() -> Credentials {
    Credentials::new(TOKEN, SECRET).unwrap()
}

fn redirect_body(base_url: &str) -> String {
    format!(
        r#"<html><body><a href="{0}"><img src="logo.png"></a>
        <h2>Object moved to <a href="{0}v2/userprofile.ashx">here</a>.</h2></body></html>"#,
        base_url
    )
}

#[test]
fn blocking_login_follows_redirect_to_second_anchor() {
    let (base_url, requests) = serve(|base| {
        vec![
            Reply::new("307 Temporary Redirect", redirect_body(base)),
            Reply::new("200 OK", r#"{"Id": "abc", "Provider": "twitter"}"#),
        ]
    });

    let config = ClientConfig::new(TransportMode::Blocking).with_base_url(base_url);
    let mut profile = UserProfile::with_config(credentials(), config).unwrap();

    assert!(profile.login().unwrap());
    assert!(profile.is_authenticated());
    assert_eq!(profile.id(), Some("abc"));
    assert_eq!(profile.provider(), Some("twitter"));

    let first = requests.recv().unwrap();
    let second = requests.recv().unwrap();
    let query = format!("apisecrete={}&token={}", SECRET, TOKEN);
    assert_eq!(first, format!("GET /userprofile.ashx?{} HTTP/1.1", query));
    assert_eq!(second, format!("GET /v2/userprofile.ashx?{} HTTP/1.1", query));
}

#[test]
fn blocking_contacts_returns_normalized_list() {
    let (base_url, requests) = serve(|_| {
        vec![Reply::new(
            "200 OK",
            r#"[{"Name": "Bob", "EmailID": "bob@example.com"}, {"Name": "Eve"}]"#,
        )]
    });

    let config = ClientConfig::new(TransportMode::Blocking).with_base_url(base_url);
    let mut profile = UserProfile::with_config(credentials(), config).unwrap();

    let contacts = profile.contacts().unwrap();
    assert_eq!(contacts[0]["email_id"], "bob@example.com");
    assert_eq!(contacts[1]["name"], "Eve");
    assert_eq!(
        requests.recv().unwrap(),
        format!("GET /contacts/{}/{} HTTP/1.1", SECRET, TOKEN)
    );
}

#[test]
fn blocking_server_error_is_transport_error() {
    let (base_url, _requests) = serve(|_| vec![Reply::new("500 Internal Server Error", "boom")]);

    let config = ClientConfig::new(TransportMode::Blocking).with_base_url(base_url);
    let mut profile = UserProfile::with_config(credentials(), config).unwrap();

    let err = profile.company().unwrap_err();
    assert!(matches!(err, LoginRadiusError::Transport { .. }));
    assert_eq!(err.status(), Some(500));
}

#[test]
fn blocking_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let config = ClientConfig::new(TransportMode::Blocking).with_base_url(base_url);
    let mut profile = UserProfile::with_config(credentials(), config).unwrap();

    let err = profile.login().unwrap_err();
    assert!(matches!(err, LoginRadiusError::Transport { status: None, .. }));
    assert!(!err.to_string().contains(SECRET));
}

#[tokio::test(flavor = "multi_thread")]
async fn event_driven_login_then_mentions() {
    let (base_url, requests) = serve(|_| {
        vec![
            Reply::new("200 OK", r#"{"ID": "abc", "Provider": "twitter"}"#),
            Reply::new("200 OK", r#"[{"Text": "hi", "DateTime": "2013-01-01"}]"#),
        ]
    });

    let config = ClientConfig::new(TransportMode::EventDriven).with_base_url(base_url);
    let mut profile = UserProfile::with_config(credentials(), config).unwrap();

    assert!(profile.login_async().await.unwrap());
    assert_eq!(profile.id(), Some("abc"));

    let mentions = profile.mentions_async().await.unwrap();
    assert_eq!(mentions[0]["date_time"], "2013-01-01");

    assert!(requests.recv().unwrap().starts_with("GET /userprofile.ashx?"));
    assert_eq!(
        requests.recv().unwrap(),
        format!("GET /status/mentions/{}/{} HTTP/1.1", SECRET, TOKEN)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn event_driven_redirect_without_target_fails() {
    let (base_url, _requests) = serve(|base| {
        vec![Reply::new(
            "302 Found",
            format!(r#"<a href="{}elsewhere">only one</a>"#, base),
        )]
    });

    let config = ClientConfig::new(TransportMode::EventDriven).with_base_url(base_url);
    let mut profile = UserProfile::with_config(credentials(), config).unwrap();

    let err = profile.login_async().await.unwrap_err();
    assert!(matches!(err, LoginRadiusError::RedirectResolution(_)));
    assert!(!profile.is_authenticated());
}
