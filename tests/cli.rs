use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::io::{BufRead as _, BufReader, Write as _};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::JoinHandle;
use tempfile::TempDir;

/// Isolated home, data dir and settings file for one test.
struct TestEnv {
    tmp: TempDir,
    config: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let config = tmp.path().join("config.json");
        Self { tmp, config }
    }

    fn with_config(json: &str) -> Self {
        let env = Self::new();
        fs::write(&env.config, json).expect("write config");
        env
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("drills");
        cmd.env("DRILLS_CONFIG", &self.config)
            .env("HOME", self.tmp.path())
            .env("XDG_DATA_HOME", self.tmp.path().join("data"))
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Answers one HTTP request with `body`. Returns the base URL and a handle
/// yielding the request line the server saw.
fn serve_json_once(body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).expect("read request") == 0 || line == "\r\n" {
                break;
            }
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .expect("write response");
        request_line
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn square_positive_and_negative() {
    let env = TestEnv::new();
    env.cmd()
        .args(["square", "2"])
        .assert()
        .success()
        .stdout("2 squared is 4\n");
    env.cmd()
        .args(["square", "-4"])
        .assert()
        .success()
        .stdout("-4 squared is 16\n");
}

#[test]
fn square_rejects_text() {
    TestEnv::new()
        .cmd()
        .args(["square", "abc"])
        .assert()
        .code(1)
        .stdout("abc is not a number\n");
}

#[test]
fn square_accepts_values_beyond_32_bits() {
    let env = TestEnv::new();
    env.cmd()
        .args(["square", "3000000000"])
        .assert()
        .success()
        .stdout("3000000000 squared is 9000000000000000000\n");
    env.cmd()
        .args(["square", "-9223372036854775808"])
        .assert()
        .success()
        .stdout("-9223372036854775808 squared is 85070591730234615865843651857942052864\n");
}

#[test]
fn name_requires_exactly_one_argument() {
    let env = TestEnv::new();
    env.cmd()
        .arg("name")
        .assert()
        .code(1)
        .stdout("Too few arguments\n");
    env.cmd()
        .args(["name", "Alice", "Bob"])
        .assert()
        .code(1)
        .stdout("Too many arguments\n");
    env.cmd()
        .args(["name", "Alice"])
        .assert()
        .success()
        .stdout("My name is Alice\n");
}

#[test]
fn read_int_reprompts_until_valid() {
    TestEnv::new()
        .cmd()
        .arg("read-int")
        .write_stdin("abc\n5\n")
        .assert()
        .success()
        .stdout(contains("x is not a number\nEnter the value of x:").and(contains("x is 5\n")));
}

#[test]
fn read_int_silent_policy() {
    TestEnv::new()
        .cmd()
        .args(["read-int", "--policy", "silent"])
        .write_stdin("abc\nxyz\n12\n")
        .assert()
        .success()
        .stdout(contains("not a number").not().and(contains("x is 12")));
}

#[test]
fn read_int_terminate_policy() {
    TestEnv::new()
        .cmd()
        .args(["read-int", "--policy", "terminate"])
        .write_stdin("abc\n5\n")
        .assert()
        .code(1)
        .stdout(contains("x is not a number").and(contains("x is 5").not()));
}

#[test]
fn read_int_end_of_input() {
    TestEnv::new()
        .cmd()
        .arg("read-int")
        .write_stdin("abc\n")
        .assert()
        .code(1)
        .stdout(contains("No more input"));
}

#[test]
fn read_int_uses_configured_defaults() {
    TestEnv::with_config(r#"{"variable_name": "n", "retry_policy": "terminate"}"#)
        .cmd()
        .arg("read-int")
        .write_stdin("oops\n3\n")
        .assert()
        .code(1)
        .stdout(contains("Enter the value of n:n is not a number"));
}

#[test]
fn coin_is_reproducible_with_seed() {
    let env = TestEnv::new();
    let flip = || {
        env.cmd()
            .args(["coin", "--seed", "11"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    let first = flip();
    let second = flip();
    assert_eq!(first, second);
    let side = String::from_utf8(first).unwrap();
    assert!(side == "heads\n" || side == "tails\n", "unexpected output {side:?}");
}

#[test]
fn roll_bounds() {
    let env = TestEnv::new();
    env.cmd()
        .args(["roll", "--low", "3", "--high", "3"])
        .assert()
        .success()
        .stdout("3\n");
    env.cmd()
        .args(["roll", "--low", "5", "--high", "1"])
        .assert()
        .code(1)
        .stdout(contains("Invalid range"));
}

#[test]
fn shuffle_prints_every_card() {
    let out = TestEnv::new()
        .cmd()
        .args(["shuffle", "--seed", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();
    let mut cards: Vec<&str> = out.lines().collect();
    cards.sort_unstable();
    assert_eq!(
        cards,
        vec![
            "Ace of hearts",
            "Ace of spades",
            "Jack of clubs",
            "King of diamonds",
            "Queen of spades",
        ]
    );
}

#[test]
fn songs_requires_one_term() {
    TestEnv::new()
        .cmd()
        .arg("songs")
        .assert()
        .code(1)
        .stdout("Too few arguments\n");
}

const SEARCH_RESULTS: &str =
    r#"{"resultCount":2,"results":[{"trackName":"Buddy Holly"},{"trackName":"Undone"}]}"#;

fn songs_env(base: &str) -> TestEnv {
    TestEnv::with_config(&format!(r#"{{"songs_base_url": "{base}"}}"#))
}

#[test]
fn songs_prints_track_names() {
    let (base, server) = serve_json_once(SEARCH_RESULTS);
    songs_env(&base)
        .cmd()
        .args(["songs", "weezer"])
        .assert()
        .success()
        .stdout("Buddy Holly\nUndone\n");

    let request_line = server.join().expect("server thread");
    assert!(
        request_line.starts_with("GET /search?entity=song&limit=50&term=weezer "),
        "unexpected request {request_line:?}"
    );
}

#[test]
fn songs_raw_prints_indented_json_for_one_result() {
    let (base, server) = serve_json_once(SEARCH_RESULTS);
    let out = songs_env(&base)
        .cmd()
        .args(["songs", "weezer", "--raw"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("{\n  \"resultCount\": 2,\n"), "not indented: {out:?}");
    assert!(out.contains("\n      \"trackName\": \"Buddy Holly\"\n"), "not indented: {out:?}");
    let document: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(document["results"][1]["trackName"], "Undone");

    let request_line = server.join().expect("server thread");
    assert!(
        request_line.starts_with("GET /search?entity=song&limit=1&term=weezer "),
        "unexpected request {request_line:?}"
    );
}

#[test]
fn songs_limit_overrides_default() {
    let (base, server) = serve_json_once(SEARCH_RESULTS);
    songs_env(&base)
        .cmd()
        .args(["songs", "weezer", "--limit", "3"])
        .assert()
        .success();

    let request_line = server.join().expect("server thread");
    assert!(
        request_line.starts_with("GET /search?entity=song&limit=3&term=weezer "),
        "unexpected request {request_line:?}"
    );
}

#[test]
fn analyze_writes_charts() {
    let env = TestEnv::new();
    let out_dir = env.tmp.path().join("charts");
    env.cmd()
        .args(["analyze", "testdata/child_mortality.csv", "--out"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(contains("Chad").and(contains("Data analysis and visualizations complete.")));

    assert!(out_dir.join("mortality_by_country.svg").exists());
    assert!(out_dir.join("population_vs_mortality.svg").exists());
}

#[test]
fn preview_prints_rows() {
    TestEnv::new()
        .cmd()
        .args(["preview", "testdata/child_mortality.csv", "--rows", "2"])
        .assert()
        .success()
        .stdout(contains("Kenya").and(contains("Nepal").not()));
}

#[test]
fn config_show_and_init() {
    let env = TestEnv::with_config(r#"{"roll_high": 6}"#);
    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("\"roll_high\": 6").and(contains("\"variable_name\": \"x\"")));

    let fresh = TestEnv::new();
    fresh
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(contains("Wrote default config"));
    assert!(fresh.config.exists());
}
