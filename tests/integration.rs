//! Integration tests for j-tok

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use assert_cmd::Command;
use predicates::prelude::*;

use j_tok::{
    scan::{dispatch, generate_candidates, HttpProber, Prober},
    types::ScanConfig,
    Charset, JTokError, UsernameSniper,
};

/// Header lines of every request the test server received, lowercased names
type SeenHeaders = Arc<Mutex<Vec<Vec<(String, String)>>>>;

const PROFILE_BODY: &str = r#"<html><head><title>profile</title></head><body><script>{"user":{"id":"77","uniqueId":"ab"}}</script></body></html>"#;
const MISSING_BODY: &str = "<html><head><title>Couldn't find this account</title></head><body>Page not found</body></html>";

/// Serve canned profile pages on loopback, one connection per request.
fn spawn_profile_server() -> String {
    spawn_recording_server().0
}

/// Like `spawn_profile_server`, also handing back the headers each request carried.
fn spawn_recording_server() -> (String, SeenHeaders) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenHeaders = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            let mut headers = Vec::new();
            let mut line = String::new();
            while reader.read_line(&mut line).map(|n| n > 2).unwrap_or(false) {
                if let Some((name, value)) = line.trim_end().split_once(':') {
                    headers.push((name.trim().to_lowercase(), value.trim().to_string()));
                }
                line.clear();
            }
            recorder.lock().push(headers);

            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let (status, body) = match path {
                "/@ab" => ("200 OK", PROFILE_BODY),
                "/@bb" => ("404 Not Found", PROFILE_BODY),
                _ => ("200 OK", MISSING_BODY),
            };

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (format!("http://{}", addr), seen)
}

/// Accept connections and never answer them.
fn spawn_silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let mut held: Vec<TcpStream> = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    format!("http://{}", addr)
}

fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn local_config(base_url: String) -> ScanConfig {
    ScanConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

#[test]
fn test_http_prober_against_local_server() {
    let prober = HttpProber::new(&local_config(spawn_profile_server()));

    assert!(prober.probe("ab"));
    assert!(!prober.probe("ba"));
    // Right markers, wrong status
    assert!(!prober.probe("bb"));
}

#[test]
fn test_http_prober_sends_fixed_headers() {
    let (base_url, seen) = spawn_recording_server();
    let prober = HttpProber::new(&local_config(base_url));

    assert!(prober.probe("ab"));

    let requests = seen.lock();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0];
    assert_eq!(
        header(headers, "user-agent"),
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
    );
    assert_eq!(header(headers, "accept"), Some("application/json"));
    assert_eq!(header(headers, "referer"), Some("https://www.tiktok.com/"));
}

#[test]
fn test_http_prober_timeout_is_unavailable() {
    let config = ScanConfig {
        timeout: Duration::from_secs(1),
        ..local_config(spawn_silent_server())
    };
    let prober = HttpProber::new(&config);

    let started = Instant::now();
    match prober.check("ab") {
        Err(JTokError::Timeout { timeout_secs, .. }) => assert_eq!(timeout_secs, 1),
        other => panic!("expected a timeout, got {:?}", other),
    }
    assert!(!prober.probe("ab"));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_end_to_end_two_letter_alphabet() {
    let base_url = spawn_profile_server();
    let config = local_config(base_url);
    let prober = HttpProber::new(&config);

    let candidates = generate_candidates(2, 2, &['a', 'b']);
    assert_eq!(candidates, vec!["aa", "ab", "ba", "bb"]);

    for threads in [1, 2, 4] {
        let tally = dispatch(&candidates, threads, &prober, |_| {}).unwrap();
        assert_eq!(tally.found, vec!["ab"], "threads={}", threads);
        assert_eq!(tally.checked_count, 4);
    }
}

#[test]
fn test_end_to_end_with_stub_prober() {
    let candidates = generate_candidates(2, 2, &['a', 'b']);
    let stub = |name: &str| name == "ab";

    for threads in [1, 2, 4] {
        let tally = dispatch(&candidates, threads, &stub, |_| {}).unwrap();
        assert_eq!(tally.found, vec!["ab"]);
        assert_eq!(tally.checked_count, 4);
    }
}

#[test]
fn test_sniper_http_run_and_save() {
    let config = ScanConfig {
        threads: 4,
        min_length: 2,
        max_length: 2,
        charset: Charset::Letters,
        ..local_config(spawn_profile_server())
    };
    let sniper = UsernameSniper::new(config).unwrap();
    let candidates = sniper.candidates();

    let summary = sniper.run_http(&candidates, |_| {}).unwrap();
    assert_eq!(summary.total, 676);
    assert_eq!(summary.checked, 676);
    assert_eq!(summary.found, vec!["ab"]);

    let dir = tempfile::tempdir().unwrap();
    let path = j_tok::report::save_results(dir.path(), &summary.found)
        .unwrap()
        .unwrap();
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.starts_with("AVAILABLE TikTok USERNAMES FROM J TOK\n"));
    assert!(content.contains("\n1. @ab\n"));
}

#[test]
fn test_summary_serializes() {
    let summary = j_tok::ScanSummary {
        total: 4,
        checked: 4,
        found: vec!["ab".to_string()],
        elapsed: Duration::from_millis(1500),
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["checked"], 4);
    assert_eq!(json["found"][0], "ab");
}

#[test]
fn test_error_handling() {
    let error = JTokError::validation("test error");
    assert!(error.to_string().contains("test error"));

    let error = JTokError::config("config error");
    assert!(error.to_string().contains("config error"));

    let error = JTokError::internal("internal error");
    assert!(error.to_string().contains("internal error"));
}

#[test]
fn test_library_initialization() {
    assert!(j_tok::init().is_ok());
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("j-tok")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--threads"))
        .stdout(predicate::str::contains("--min-len"));
}

#[test]
fn test_cli_rejects_zero_threads() {
    Command::cargo_bin("j-tok")
        .unwrap()
        .args(["--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("thread count must be at least 1"));
}

#[test]
fn test_cli_rejects_oversized_range() {
    Command::cargo_bin("j-tok")
        .unwrap()
        .args(["--max-len", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed the limit"));
}

#[test]
fn test_cli_rejects_inverted_range() {
    Command::cargo_bin("j-tok")
        .unwrap()
        .args(["--min-len", "5", "--max-len", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds max length"));
}
