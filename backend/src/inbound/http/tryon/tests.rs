//! Tests for try-on API handlers.

use super::*;
use crate::domain::{PreviewImage, TryOnSubmission};
use crate::inbound::http::multipart::UploadLimits;
use crate::inbound::http::test_utils::MockPorts;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::json;

const BOUNDARY: &str = "tryon-test-boundary";
const ISSUED_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

struct Part<'a> {
    name: &'a str,
    file_name: &'a str,
    content_type: &'a str,
    bytes: &'a [u8],
}

fn image_part<'a>(name: &'a str, bytes: &'a [u8]) -> Part<'a> {
    Part {
        name,
        file_name: "photo.PNG",
        content_type: "image/png",
        bytes,
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                part.name, part.file_name, part.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(mode: &str, parts: &[Part<'_>]) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(&format!("/api/tryon/{mode}"))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(parts))
        .to_request()
}

fn test_app(
    ports: MockPorts,
    limits: UploadLimits,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state(limits)))
        .service(
            web::scope("/api/tryon")
                .service(submit)
                .service(status)
                .service(preview),
        )
}

fn issued_id() -> TryOnRequestId {
    TryOnRequestId::parse(ISSUED_ID).expect("fixture id")
}

fn accepting_ports() -> MockPorts {
    let mut ports = MockPorts::default();
    ports
        .tryon_command
        .expect_submit()
        .times(1)
        .returning(|submission| Ok(TryOnAccepted::new(issued_id(), submission.mode)));
    ports
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("response JSON")
}

#[rstest]
#[case("2d", TryOnMode::TwoD)]
#[case("3D", TryOnMode::ThreeD)]
#[actix_web::test]
async fn upload_returns_request_id_and_preview_url(
    #[case] segment: &str,
    #[case] expected_mode: TryOnMode,
) {
    let mut ports = MockPorts::default();
    ports
        .tryon_command
        .expect_submit()
        .withf(move |submission: &TryOnSubmission| {
            submission.mode == expected_mode
                && submission.user_image.bytes() == b"user"
                && submission.clothing_image.bytes() == b"cloth"
                && submission.user_image.extension() == ".png"
        })
        .times(1)
        .returning(|submission| Ok(TryOnAccepted::new(issued_id(), submission.mode)));
    let app = actix_test::init_service(test_app(ports, UploadLimits::default())).await;

    let request = upload_request(
        segment,
        &[
            image_part("userImage", b"user"),
            image_part("clothingImage", b"cloth"),
        ],
    );
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = read_json(response).await;
    assert_eq!(value.get("success"), Some(&json!(true)));
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Processing started")
    );
    assert_eq!(
        value.get("requestId").and_then(Value::as_str),
        Some(ISSUED_ID)
    );
    assert_eq!(value.get("estimatedTimeSeconds"), Some(&json!(5)));
    assert_eq!(
        value.get("resultPreviewUrl").and_then(Value::as_str),
        Some(format!("/api/tryon/{expected_mode}/result/{ISSUED_ID}/preview").as_str())
    );
}

#[actix_web::test]
async fn upload_ignores_unknown_parts() {
    let app = actix_test::init_service(test_app(accepting_ports(), UploadLimits::default())).await;
    let request = upload_request(
        "2d",
        &[
            image_part("avatar", b"ignored"),
            image_part("userImage", b"user"),
            image_part("clothingImage", b"cloth"),
        ],
    );
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case::missing_clothing(
    vec![image_part("userImage", b"user")],
    "Both user image and clothing image are required",
    None
)]
#[case::no_parts(vec![], "Both user image and clothing image are required", None)]
#[case::not_an_image(
    vec![
        image_part("userImage", b"user"),
        Part { name: "clothingImage", file_name: "notes.txt", content_type: "text/plain", bytes: b"cloth" },
    ],
    "Invalid file type. Please upload image files only.",
    Some("clothingImage")
)]
#[actix_web::test]
async fn upload_rejects_bad_parts(
    #[case] parts: Vec<Part<'static>>,
    #[case] message: &str,
    #[case] field: Option<&str>,
) {
    let app = actix_test::init_service(test_app(MockPorts::default(), UploadLimits::default())).await;
    let response = actix_test::call_service(&app, upload_request("2d", &parts)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = read_json(response).await;
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(value.get("message").and_then(Value::as_str), Some(message));
    assert_eq!(
        value.pointer("/details/field").and_then(Value::as_str),
        field
    );
}

#[rstest]
#[case::empty(b"" as &[u8])]
#[case::oversized(b"0123456789abcdef" as &[u8])]
#[actix_web::test]
async fn upload_rejects_empty_and_oversized_files(#[case] user_bytes: &[u8]) {
    let app = actix_test::init_service(test_app(MockPorts::default(), UploadLimits::new(8))).await;
    let request = upload_request(
        "2d",
        &[
            image_part("userImage", user_bytes),
            image_part("clothingImage", b"cloth"),
        ],
    );
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = read_json(response).await;
    assert_eq!(
        value.pointer("/details/field").and_then(Value::as_str),
        Some("userImage")
    );
}

#[actix_web::test]
async fn upload_rejects_non_multipart_body() {
    let app = actix_test::init_service(test_app(MockPorts::default(), UploadLimits::default())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/tryon/2d")
        .set_json(json!({ "userImage": "nope" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn upload_to_unknown_mode_is_not_found() {
    let app = actix_test::init_service(test_app(MockPorts::default(), UploadLimits::default())).await;
    let request = upload_request(
        "4d",
        &[
            image_part("userImage", b"user"),
            image_part("clothingImage", b"cloth"),
        ],
    );
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let value = read_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("unknown try-on mode")
    );
}

#[actix_web::test]
async fn status_reports_processing_for_unknown_ids() {
    let mut ports = MockPorts::default();
    ports
        .tryon_query
        .expect_status()
        .withf(|mode: &TryOnMode, id: &TryOnRequestId| {
            *mode == TryOnMode::TwoD && id.as_str() == "abcde"
        })
        .returning(|_, _| Ok(TryOnStatus::Processing));
    let app = actix_test::init_service(test_app(ports, UploadLimits::default())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/tryon/2d/result/abcde")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({
            "status": "processing",
            "message": "Your virtual try-on is still processing",
            "requestId": "abcde",
        })
    );
}

#[actix_web::test]
async fn status_echoes_completed_result() {
    let mut ports = MockPorts::default();
    ports
        .tryon_query
        .expect_status()
        .returning(|_, _| Ok(TryOnStatus::Completed(json!({ "score": 0.9 }))));
    let app = actix_test::init_service(test_app(ports, UploadLimits::default())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/tryon/3d/result/{ISSUED_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(
        read_json(response).await,
        json!({
            "status": "completed",
            "result": { "score": 0.9 },
            "requestId": ISSUED_ID,
        })
    );
}

#[rstest]
#[case("/api/tryon/2d/result/abcd")]
#[case("/api/tryon/2d/result/abc..def")]
#[case("/api/tryon/2d/result/abcd%2F..%2Fx/preview")]
#[actix_web::test]
async fn malformed_ids_are_rejected(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(MockPorts::default(), UploadLimits::default())).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn status_surfaces_unreadable_results_as_internal() {
    let mut ports = MockPorts::default();
    ports
        .tryon_query
        .expect_status()
        .returning(|_, _| Err(Error::internal("malformed result document")));
    let app = actix_test::init_service(test_app(ports, UploadLimits::default())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/tryon/2d/result/{ISSUED_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[case(PreviewSource::Result, "public, max-age=86400")]
#[case(PreviewSource::Placeholder, "no-store")]
#[actix_web::test]
async fn preview_serves_png_with_cache_policy(
    #[case] source: PreviewSource,
    #[case] cache_control: &str,
) {
    let mut ports = MockPorts::default();
    ports.tryon_query.expect_preview().returning(move |_, _| {
        Ok(PreviewImage {
            source,
            bytes: b"\x89PNG".to_vec(),
        })
    });
    let app = actix_test::init_service(test_app(ports, UploadLimits::default())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/tryon/2d/result/{ISSUED_ID}/preview"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let header_value = |name| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(header_value(header::CONTENT_TYPE).as_deref(), Some("image/png"));
    assert_eq!(
        header_value(header::CACHE_CONTROL).as_deref(),
        Some(cache_control)
    );
    assert_eq!(actix_test::read_body(response).await.as_ref(), b"\x89PNG");
}

#[actix_web::test]
async fn preview_without_any_image_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .tryon_query
        .expect_preview()
        .returning(|_, _| Err(Error::not_found("Result image not found")));
    let app = actix_test::init_service(test_app(ports, UploadLimits::default())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/tryon/2d/result/{ISSUED_ID}/preview"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let value = read_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Result image not found")
    );
}
