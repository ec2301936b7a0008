use crate::responses::xlsx::XLSX_CONTENT_TYPE;
use crate::router::handle;
use crate::tests::utils::init_test_state;
use astra::Body;
use http::{Method, Request};
use std::io::Read;

#[test]
fn export_downloads_the_visible_listings() {
    let state = init_test_state("export");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/export?location=Strand&room=Single&room=Ensuite")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Export failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], XLSX_CONTENT_TYPE);
    assert_eq!(
        resp.headers()["Content-Disposition"],
        "attachment; filename=\"accommodation.xlsx\""
    );

    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
