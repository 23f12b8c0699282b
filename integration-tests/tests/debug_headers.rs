use integration_tests::harness::{TestServer, rule};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

#[test]
fn debug_redirect_carries_diagnostic_headers() {
    let srv = TestServer::start(
        vec![rule(
            "^http://old\\.example/(.*)$",
            "http://new.example/$1",
            301,
        )],
        true,
    );

    let res = srv
        .get("/a?b=1")
        .header("host", "old.example")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["x-detour-name"], "redirect");
    assert_eq!(
        res.headers()["x-detour-regex"],
        "^http://old\\.example/(.*)$"
    );
    assert_eq!(
        res.headers()["x-detour-replacement"],
        "http://new.example/$1"
    );
    assert_eq!(res.headers()["x-detour-status-code"], "301");
    assert_eq!(res.headers()["x-detour-old-url"], "http://old.example/a?b=1");
    assert_eq!(res.headers()["x-detour-new-url"], "http://new.example/a?b=1");
}

#[test]
fn debug_headers_also_appear_on_the_rewrite_path() {
    let srv = TestServer::start(vec![rule("^http://(.*)$", "http://$1", 0)], true);

    let res = srv.get("/a").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-detour-regex"], "^http://(.*)$");
    assert_eq!(res.headers()["x-detour-name"], "redirect");
}

#[test]
fn no_debug_headers_when_disabled() {
    let srv = TestServer::start(
        vec![rule(
            "^http://old\\.example/(.*)$",
            "http://new.example/$1",
            301,
        )],
        false,
    );

    let res = srv.get("/a").header("host", "old.example").send().unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert!(res.headers().get("x-detour-name").is_none());
}
