//! HTTP retrieval of structure documents against a local one-shot server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use oda_schemas::{HttpSchemaSource, SchemaError, SchemaSource};

/// Serve a single request with `status` and `body`, returning the URL.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/structure", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
    });
    (url, handle)
}

#[test]
fn successful_response_is_parsed() {
    let (url, server) = serve_once("200 OK", "<Structure><Header/></Structure>");
    let source = HttpSchemaSource::new().unwrap();

    let document = source.fetch(&url).unwrap();

    assert_eq!(document.root().name(), "Structure");
    server.join().unwrap();
}

#[test]
fn server_error_status_is_a_network_error() {
    let (url, server) = serve_once("500 Internal Server Error", "");
    let source = HttpSchemaSource::new().unwrap();

    let err = source.fetch(&url).unwrap_err();

    assert!(matches!(&err, SchemaError::Network { url: failed, .. } if *failed == url));
    assert!(err.is_retryable());
    server.join().unwrap();
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/structure", listener.local_addr().unwrap());
    drop(listener);
    let source = HttpSchemaSource::new().unwrap();

    assert!(matches!(
        source.fetch(&url),
        Err(SchemaError::Network { .. })
    ));
}

#[test]
fn truncated_body_is_a_parse_error() {
    let (url, server) = serve_once("200 OK", "<Structure><Structures>");
    let source = HttpSchemaSource::new().unwrap();

    let err = source.fetch(&url).unwrap_err();

    assert!(matches!(err, SchemaError::Parse { .. }));
    assert!(!err.is_retryable());
    server.join().unwrap();
}
