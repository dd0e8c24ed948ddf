//! Shared fixtures for the HTTP collaborator tests: canned Google payloads and
//! a one-shot local HTTP server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Encodes (38.5, -120.2), (40.7, -120.95), (43.252, -126.453).
pub const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// A directions payload with `count` routes; the first is 12.4 km / 31 min.
pub fn directions_json(count: usize) -> String {
    let routes: Vec<String> = (0..count)
        .map(|i| {
            let metres = 12_400 + i * 1_000;
            let seconds = 1_860 + i * 120;
            format!(
                r#"{{
                    "summary": "Route {i}",
                    "legs": [{{
                        "distance": {{"text": "{km:.1} km", "value": {metres}}},
                        "duration": {{"text": "{mins} mins", "value": {seconds}}}
                    }}],
                    "overview_polyline": {{"points": "{REFERENCE_POLYLINE}"}}
                }}"#,
                km = metres as f64 / 1_000.0,
                mins = seconds / 60,
            )
        })
        .collect();
    format!(r#"{{"status": "OK", "routes": [{}]}}"#, routes.join(","))
}

/// A places payload with `count` named hospitals a few hundred metres apart.
pub fn hospitals_json(count: usize) -> String {
    let places: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{
                    "displayName": {{"text": "Hospital {i}", "languageCode": "en"}},
                    "formattedAddress": "{i} Hospital Road",
                    "internationalPhoneNumber": "+91 40 0000 000{i}",
                    "location": {{"latitude": {lat}, "longitude": 78.4867}}
                }}"#,
                lat = 17.385 + i as f64 * 0.004,
            )
        })
        .collect();
    format!(r#"{{"places": [{}]}}"#, places.join(","))
}

/// Serve exactly one request on an ephemeral local port.
///
/// Returns the server's base URL and a handle resolving to the raw request
/// text (head and body).
pub async fn serve_once(status: u16, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let address = listener.local_addr().expect("local address");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n{body}",
            reason = if status == 200 { "OK" } else { "Error" },
            len = body.len(),
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        socket.shutdown().await.expect("close connection");
        request
    });
    (format!("http://{address}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = socket.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(head_end) = find(&buffer, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buffer[..head_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
