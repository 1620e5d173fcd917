use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use hoops_watch_lambda_rust::config::SITE_URL;
use hoops_watch_lambda_rust::error::WatchError;
use hoops_watch_lambda_rust::notify::{Discord, LogNotifier, Notifier, Pushover};

/// Accepts connections and never answers; returns its base URL.
fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}

#[test]
fn discord_payload_carries_message_and_blocks_mentions() {
    let d = Discord::new("https://example.invalid/webhook".to_string(), Duration::from_secs(1));
    let payload = d.payload("@everyone Saturday game is open");

    assert_eq!(payload["content"], "@everyone Saturday game is open");
    assert_eq!(payload["allowed_mentions"]["parse"], serde_json::json!([]));
}

#[test]
fn discord_gives_up_on_a_hung_webhook() {
    let d = Discord::new(format!("{}/webhook", silent_server()), Duration::from_millis(300));

    let started = Instant::now();
    let err = d.send("Game is open").unwrap_err();
    assert!(matches!(err, WatchError::Notify(_)), "error was: {}", err);
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
}

#[test]
fn pushover_form_carries_tokens_and_emergency_settings() {
    let p = Pushover::new("app-token".to_string(), "user-token".to_string(), Duration::from_secs(1));
    let form = p.form("Game is open");
    let get = |k: &str| form.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str());

    assert_eq!(get("token"), Some("app-token"));
    assert_eq!(get("user"), Some("user-token"));
    assert_eq!(get("message"), Some("Game is open"));
    assert_eq!(get("priority"), Some("2"));
    assert_eq!(get("retry"), Some("60"));
    assert_eq!(get("expire"), Some("300"));
    assert_eq!(get("url"), Some(SITE_URL));
}

#[test]
fn log_notifier_always_succeeds() {
    assert!(LogNotifier.send("hello").is_ok());
}
