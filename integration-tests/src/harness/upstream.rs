use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

/// Minimal HTTP upstream that answers 200 and echoes the request target in
/// the body, so tests can observe exactly what the gateway forwarded.
pub fn start_upstream(port: u16) {
    let addr = format!("127.0.0.1:{port}");

    thread::spawn(move || {
        let listener = TcpListener::bind(&addr).expect("failed to bind upstream");
        for stream in listener.incoming() {
            let mut stream = stream.expect("stream error");

            let mut buf = [0u8; 4096];
            let mut read = 0;
            // Read until end of headers; requests in these tests carry no body.
            while read < buf.len() {
                match stream.read(&mut buf[read..]) {
                    Ok(0) => break,
                    Ok(n) => {
                        read += n;
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }

            let target = request_target(&buf[..read]);
            let body = format!("echo {target}");
            let resp = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        }
    });

    // tiny delay so the listener is actually ready
    thread::sleep(Duration::from_millis(25));
}

/// Pull the request-target out of the request line.
fn request_target(raw: &[u8]) -> String {
    let line = raw.split(|b| *b == b'\r').next().unwrap_or_default();
    let line = String::from_utf8_lossy(line);

    line.split_whitespace().nth(1).unwrap_or("").to_string()
}
