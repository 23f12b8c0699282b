use integration_tests::harness::{TestServer, rule};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

#[test]
fn host_redirect_preserves_path_and_query() {
    let srv = TestServer::start(
        vec![rule(
            "^http://old\\.example/(.*)$",
            "http://new.example/$1",
            301,
        )],
        false,
    );

    let res = srv
        .get("/a?b=1")
        .header("host", "old.example")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "http://new.example/a?b=1");
}

#[test]
fn redirect_body_is_empty() {
    let srv = TestServer::start(
        vec![rule(
            "^http://old\\.example/(.*)$",
            "http://new.example/$1",
            301,
        )],
        false,
    );

    let res = srv.get("/a").header("host", "old.example").send().unwrap();

    assert_eq!(res.headers()["content-length"], "0");
    assert_eq!(res.text().unwrap(), "");
}

#[test]
fn trailing_slash_strip_redirects_with_found() {
    let srv = TestServer::start(vec![rule("^(.*)/$", "$1", 0)], false);

    let res = srv.get("/a/b/").send().unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    let location = res.headers()["location"].to_str().unwrap();
    assert!(
        location.ends_with("/a/b"),
        "unexpected location: {location}"
    );
}

#[test]
fn post_redirect_defaults_to_temporary_redirect() {
    let srv = TestServer::start(vec![rule("^(.*)/$", "$1", 0)], false);

    let res = srv.post("/a/b/").send().unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[test]
fn post_upgrades_moved_permanently_to_permanent_redirect() {
    let srv = TestServer::start(vec![rule("^(.*)/$", "$1", 301)], false);

    let res = srv.post("/a/b/").send().unwrap();

    assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);
}

#[test]
fn explicit_status_code_is_used_verbatim() {
    let srv = TestServer::start(vec![rule("^(.*)/$", "$1", 307)], false);

    let res = srv.get("/a/b/").send().unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[test]
fn first_matching_rule_wins() {
    let srv = TestServer::start(
        vec![
            rule("^http://[^/]+/(.*)$", "http://first.example/$1", 302),
            rule("^http://[^/]+/(.*)$", "http://second.example/$1", 302),
        ],
        false,
    );

    let res = srv.get("/a").send().unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "http://first.example/a");
}
