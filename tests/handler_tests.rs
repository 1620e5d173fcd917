use hoops_watch_lambda_rust::handler::{Mode, Request, Response};

#[test]
fn serde_mode_lowercase() {
    let m: Mode = serde_json::from_str("\"test\"").unwrap();
    assert_eq!(m, Mode::Test);
    let m2: Mode = serde_json::from_str("\"production\"").unwrap();
    assert_eq!(m2, Mode::Production);
    assert_eq!(serde_json::to_string(&Mode::Test).unwrap(), "\"test\"");
}

#[test]
fn request_defaults_to_production() {
    let req: Request = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(req.mode, Mode::Production);
}

#[test]
fn scheduled_event_payload_is_accepted() {
    let json = serde_json::json!({
        "version": "0",
        "id": "53dc4d37-cffa-4f76-80c9-8b7d4a4d2eaa",
        "detail-type": "Scheduled Event",
        "source": "aws.events",
        "time": "2025-06-20T19:00:00Z",
        "resources": ["arn:aws:events:us-west-2:123456789012:rule/hoops-watch"],
        "detail": {}
    });
    let req: Request = serde_json::from_value(json).unwrap();
    assert_eq!(req.mode, Mode::Production);

    let test: Request = serde_json::from_value(serde_json::json!({ "mode": "test" })).unwrap();
    assert_eq!(test.mode, Mode::Test);
}

#[test]
fn response_round_trips_without_statuses() {
    let resp: Response = serde_json::from_value(serde_json::json!({ "message": "Poll cycle skipped" })).unwrap();
    assert_eq!(resp.notified, 0);
    assert!(resp.statuses.is_empty());
    let back = serde_json::to_value(&resp).unwrap();
    assert_eq!(back["message"], "Poll cycle skipped");
}
