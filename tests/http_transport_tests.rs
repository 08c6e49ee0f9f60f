mod common;

use common::{create_test_image, fake_jpeg};
use img_optimizer::{
    HttpTransport, ImageOptimizer, OptimizerConfig, OptimizerError, OptimizerOptions, Payload,
    Transport,
};
use mockito::Matcher;
use std::fs;
use tempfile::TempDir;

fn optimizer_for(server: &mockito::ServerGuard, quality: u8) -> ImageOptimizer {
    let options = OptimizerOptions::new(Some(quality), Some(5)).with_endpoint(server.url());
    ImageOptimizer::new(options).unwrap()
}

#[test]
fn test_compress_file_over_http() {
    let mut server = mockito::Server::new();
    let dest = format!("{}/output/photo.jpg", server.url());

    let submit = server
        .mock("POST", "/")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="files"; filename="photo.jpg""#.to_string()),
            Matcher::Regex(r#"name="qlty"\r\n\r\n50\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"dest":"{}","src_size":284,"dest_size":4,"percent":98}}"#, dest))
        .create();
    let fetch = server
        .mock("GET", "/output/photo.jpg")
        .with_status(200)
        .with_header("content-type", "image/jpeg")
        .with_body("tiny")
        .create();

    let temp_dir = TempDir::new().unwrap();
    let source = create_test_image(temp_dir.path(), "photo.jpg", &fake_jpeg());

    let output = optimizer_for(&server, 50).compress_file(&source, None).unwrap();

    submit.assert();
    fetch.assert();
    assert_eq!(output, temp_dir.path().join("optimized-photo.jpg"));
    assert_eq!(fs::read(&output).unwrap(), b"tiny");
}

#[test]
fn test_compress_from_url_over_http() {
    let mut server = mockito::Server::new();
    let dest = format!("{}/output/banner.png", server.url());

    let submit = server
        .mock("POST", "/")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("img".to_string(), "https://example.com/banner.png".to_string()),
            Matcher::UrlEncoded("qlty".to_string(), "92".to_string()),
        ]))
        .with_status(200)
        .with_body(format!(r#"{{"dest":"{}"}}"#, dest))
        .create();
    let fetch = server
        .mock("GET", "/output/banner.png")
        .with_status(200)
        .with_body("png")
        .create();

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("banner.png");

    let result = optimizer_for(&server, 92)
        .compress_from_url("https://example.com/banner.png", &output)
        .unwrap();

    submit.assert();
    fetch.assert();
    assert_eq!(result, output);
    assert_eq!(fs::read(&output).unwrap(), b"png");
}

#[test]
fn test_service_error_body_with_error_status() {
    let mut server = mockito::Server::new();
    let _submit = server
        .mock("POST", "/")
        .with_status(400)
        .with_body(r#"{"error":"Invalid quality"}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.png");

    let result = optimizer_for(&server, 92).compress_from_url("https://example.com/a.png", &output);

    assert!(matches!(result, Err(OptimizerError::Service(msg)) if msg == "Invalid quality"));
    assert!(!output.exists());
}

#[test]
fn test_error_status_without_error_body_is_transport() {
    let mut server = mockito::Server::new();
    let _submit = server
        .mock("POST", "/")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create();

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.png");

    let result = optimizer_for(&server, 92).compress_from_url("https://example.com/a.png", &output);

    assert!(matches!(result, Err(OptimizerError::Transport { .. })));
}

#[test]
fn test_fetch_failure_is_transport_and_leaves_no_file() {
    let mut server = mockito::Server::new();
    let dest = format!("{}/output/missing.jpg", server.url());
    let _submit = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(format!(r#"{{"dest":"{}"}}"#, dest))
        .create();
    let _fetch = server
        .mock("GET", "/output/missing.jpg")
        .with_status(404)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let source = create_test_image(temp_dir.path(), "photo.jpg", &fake_jpeg());
    let output = temp_dir.path().join("out.jpg");

    let result = optimizer_for(&server, 92).compress_file(&source, Some(&output));

    match result {
        Err(OptimizerError::Transport { source, .. }) => {
            assert!(source.to_string().contains("404"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_connection_refused_is_transport() {
    // Nothing listens on the discard port
    let config = OptimizerConfig::new(
        OptimizerOptions::new(None, Some(2)).with_endpoint("http://127.0.0.1:9"),
    )
    .unwrap();
    let transport = HttpTransport::new(&config).unwrap();

    let result = transport.submit(Payload::Form {
        fields: vec![("img".to_string(), "https://example.com/a.png".to_string())],
    });

    assert!(matches!(result, Err(OptimizerError::Transport { .. })));
}
