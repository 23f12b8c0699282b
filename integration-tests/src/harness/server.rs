use crate::harness::upstream::start_upstream;
use detour_core::conf::types::{
    DetourConfig, RedirectDeviceConfig, RedirectRuleConfig, ServerConfig, UpstreamConfig,
};
use detour_core::server::build_pingora_server;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::redirect::Policy;
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to a running Detour test server.
pub struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    /// Start a Detour instance with the given redirect rules, in front of a
    /// scratch upstream that echoes the request target it receives.
    ///
    /// Ports are allocated dynamically; fully parallel-safe.
    pub fn start(rules: Vec<RedirectRuleConfig>, debug: bool) -> Self {
        let listen_port = free_port();
        let upstream_port = free_port();

        start_upstream(upstream_port);

        let cfg = DetourConfig {
            server: ServerConfig {
                listen: format!("127.0.0.1:{listen_port}"),
            },
            upstream: UpstreamConfig {
                addr: format!("127.0.0.1:{upstream_port}"),
            },
            redirect: RedirectDeviceConfig {
                enable: true,
                debug,
                name: "redirect".to_string(),
                rules,
            },
        };

        let server = build_pingora_server(&cfg).expect("failed to build detour server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        // Redirects must reach the test assertions, not be followed.
        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .redirect(Policy::none())
            .build()
            .expect("failed to build client");

        Self { base_url, client }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    /// Convenience helper for POST requests.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
