#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use hoops_watch_lambda_rust::config::Selectors;
use hoops_watch_lambda_rust::error::WatchError;
use hoops_watch_lambda_rust::extract::Extractor;
use hoops_watch_lambda_rust::fetch::Fetcher;
use hoops_watch_lambda_rust::notify::Notifier;

pub const GYM: &str = "Seattle Central College #1";
pub const GAME_TYPE: &str = "Saturday Morning Hoops";
pub const LEVEL: &str = "Recreational-CoEd";

pub fn load_sample() -> String {
    std::fs::read_to_string("tests/hod_sample.html").expect("failed to read hod_sample.html")
}

pub fn extractor() -> Extractor {
    Extractor::new(&Selectors::default()).expect("default selectors compile")
}

/// One game card in the registration page's markup.
pub fn card(time: &str, gym: &str, game_type: &str, level: &str, teams: Vec<(&str, Vec<&str>)>, full: bool) -> String {
    let mut roster = String::new();
    for (team, players) in &teams {
        roster.push_str("<div style=\"float:left;width:50%\">\n");
        roster.push_str(&format!("<span class=\"team_name\">{}</span><br>\n", team));
        for (i, player) in players.iter().enumerate() {
            roster.push_str(&format!("<span class=\"player_name\">{}. {}</span><br>\n", i + 1, player));
        }
        roster.push_str("</div>\n");
    }
    let link = if full { "FULL" } else { "Sign up" };
    format!(
        "<div class=\"mobilehod\">\n<div id=\"gameinfo\"><div>\n{}<br>\n{}<br>\n{}<br>\n{}\n</div></div>\n<div id=\"roster\">\n{}</div>\n<a href=\"#\">{}</a>\n</div>\n",
        time, gym, game_type, level, roster, link
    )
}

pub fn page(cards: &[String]) -> String {
    format!("<html><body>\n{}</body></html>", cards.concat())
}

/// Hands out queued responses in order; an empty queue is a fetch error.
#[derive(Default)]
pub struct StubFetcher {
    responses: Mutex<VecDeque<Result<Vec<u8>, String>>>,
}

impl StubFetcher {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| r.map(String::into_bytes)).collect()),
        }
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self) -> Result<Vec<u8>, WatchError> {
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(reason)) => Err(WatchError::Fetch { attempts: 1, reason }),
            None => Err(WatchError::Fetch { attempts: 1, reason: "no response queued".to_string() }),
        }
    }
}

/// Records every message instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, message: &str) -> Result<(), WatchError> {
        self.sent.lock().unwrap().push(message.to_string());
        if self.fail {
            Err(WatchError::Notify("stub failure".to_string()))
        } else {
            Ok(())
        }
    }
}
