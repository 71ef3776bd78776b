use std::cell::RefCell;
use std::io::Cursor;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[derive(Default)]
struct RecordingBrowser {
    opened: RefCell<Vec<String>>,
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.borrow_mut().push(url.to_owned());
        Ok(())
    }
}

struct FailingBrowser;

impl BrowserLauncher for FailingBrowser {
    fn open(&self, _url: &str) -> std::io::Result<()> {
        Err(std::io::Error::other("no display"))
    }
}

fn test_client() -> ShopifyClient {
    ShopifyClient::new("Mozilla/5.0", Some(5)).expect("failed to build test ShopifyClient")
}

fn options() -> CartOptions {
    CartOptions {
        quantity: 1,
        open_browser: false,
        use_post: false,
        variant: None,
    }
}

async fn mount_product(server: &MockServer, variants: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/products/widget.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": { "title": "Widget", "variants": variants }
        })))
        .mount(server)
        .await;
}

fn two_variants() -> serde_json::Value {
    json!([
        {"id": 11, "title": "Small", "price": "10.00"},
        {"id": 12, "title": "Large", "price": "12.50"}
    ])
}

fn variant(id: u64, title: &str) -> ShopifyVariant {
    serde_json::from_value(json!({"id": id, "title": title})).unwrap()
}

// ---------------------------------------------------------------------------
// Full flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prompts_for_variant_and_returns_checkout_link() {
    let server = MockServer::start().await;
    mount_product(&server, two_variants()).await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(b"2\n".to_vec());
    let mut out = Vec::<u8>::new();
    let browser = RecordingBrowser::default();

    let opts = CartOptions {
        quantity: 4,
        ..options()
    };
    let link = cart_from_product(&test_client(), &url, &opts, &mut input, &mut out, &browser)
        .await
        .expect("expected checkout link");

    assert_eq!(link.as_str(), format!("{}/cart/12:4", server.uri()));

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("=== Widget ==="), "output: {printed}");
    assert!(printed.contains("1. Small  |  ID: 11  | Price: 10.00"));
    assert!(printed.contains("2. Large  |  ID: 12  | Price: 12.50"));
    assert!(printed.contains("Choose a variant number: "));
    assert!(printed.contains("Selected: Large (ID 12)"));
    assert!(printed.contains(&format!("{}/cart/12:4", server.uri())));
    assert!(browser.opened.borrow().is_empty());
}

#[tokio::test]
async fn preselected_variant_skips_prompt() {
    let server = MockServer::start().await;
    mount_product(&server, two_variants()).await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(Vec::<u8>::new());
    let mut out = Vec::<u8>::new();

    let opts = CartOptions {
        variant: Some(1),
        ..options()
    };
    let link = cart_from_product(
        &test_client(),
        &url,
        &opts,
        &mut input,
        &mut out,
        &RecordingBrowser::default(),
    )
    .await
    .unwrap();

    assert!(link.as_str().ends_with("/cart/11:1"));
    let printed = String::from_utf8(out).unwrap();
    assert!(!printed.contains("Choose a variant number"));
}

#[tokio::test]
async fn empty_variant_list_fails_before_prompting() {
    let server = MockServer::start().await;
    mount_product(&server, json!([])).await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(b"1\n".to_vec());
    let mut out = Vec::<u8>::new();

    let err = cart_from_product(
        &test_client(),
        &url,
        &options(),
        &mut input,
        &mut out,
        &RecordingBrowser::default(),
    )
    .await
    .unwrap_err();

    assert!(
        matches!(err, WorkflowError::NoVariants { ref title } if title == "Widget"),
        "expected NoVariants, got: {err:?}"
    );
    assert!(out.is_empty(), "nothing should be printed");
    assert_eq!(input.position(), 0, "input must not be read");
}

#[tokio::test]
async fn post_option_sends_cart_request_and_prints_response() {
    let server = MockServer::start().await;
    mount_product(&server, two_variants()).await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(body_string_contains("id=11"))
        .and(body_string_contains("quantity=2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(b"1\n".to_vec());
    let mut out = Vec::<u8>::new();

    let opts = CartOptions {
        quantity: 2,
        use_post: true,
        ..options()
    };
    let link = cart_from_product(
        &test_client(),
        &url,
        &opts,
        &mut input,
        &mut out,
        &RecordingBrowser::default(),
    )
    .await
    .expect("a bad cart response is not fatal");

    assert!(link.as_str().ends_with("/cart/11:2"));
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Sending POST cart request..."));
    assert!(printed.contains(r#"Response: {"error":"Bad response","raw":"not json"}"#));
}

#[tokio::test]
async fn open_option_launches_browser_with_link() {
    let server = MockServer::start().await;
    mount_product(&server, two_variants()).await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(b"1\n".to_vec());
    let mut out = Vec::<u8>::new();
    let browser = RecordingBrowser::default();

    let opts = CartOptions {
        open_browser: true,
        ..options()
    };
    let link = cart_from_product(&test_client(), &url, &opts, &mut input, &mut out, &browser)
        .await
        .unwrap();

    assert_eq!(*browser.opened.borrow(), vec![link.into_string()]);
    assert!(String::from_utf8(out).unwrap().contains("Opening in browser..."));
}

#[tokio::test]
async fn browser_failure_is_reported() {
    let server = MockServer::start().await;
    mount_product(&server, two_variants()).await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(b"1\n".to_vec());
    let mut out = Vec::<u8>::new();

    let opts = CartOptions {
        open_browser: true,
        ..options()
    };
    let err = cart_from_product(&test_client(), &url, &opts, &mut input, &mut out, &FailingBrowser)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Browser(_)), "got: {err:?}");
}

#[tokio::test]
async fn closed_input_is_no_selection() {
    let server = MockServer::start().await;
    mount_product(&server, two_variants()).await;

    let url = format!("{}/products/widget", server.uri());
    let mut input = Cursor::new(Vec::<u8>::new());
    let mut out = Vec::<u8>::new();

    let err = cart_from_product(
        &test_client(),
        &url,
        &options(),
        &mut input,
        &mut out,
        &RecordingBrowser::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, WorkflowError::NoSelection), "got: {err:?}");
}

#[tokio::test]
async fn fetch_failure_on_both_paths_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/products/widget", server.uri());
    let err = cart_from_product(
        &test_client(),
        &url,
        &options(),
        &mut Cursor::new(Vec::<u8>::new()),
        &mut Vec::<u8>::new(),
        &RecordingBrowser::default(),
    )
    .await
    .unwrap_err();
    assert!(
        matches!(
            err,
            WorkflowError::Scraper(ScraperError::UnexpectedStatus { status: 404, .. })
        ),
        "got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Selection parsing
// ---------------------------------------------------------------------------

#[test]
fn resolve_selection_is_one_based() {
    let variants = vec![variant(1, "A"), variant(2, "B")];
    assert_eq!(resolve_selection(&variants, "1").unwrap().title, "A");
    assert_eq!(resolve_selection(&variants, "2").unwrap().title, "B");
}

#[test]
fn resolve_selection_rejects_zero_and_out_of_range() {
    let variants = vec![variant(1, "A"), variant(2, "B")];
    for raw in ["0", "3", "-1"] {
        let err = resolve_selection(&variants, raw).unwrap_err();
        assert!(
            matches!(err, WorkflowError::InvalidSelection { count: 2, .. }),
            "{raw}: got {err:?}"
        );
    }
}

#[test]
fn resolve_selection_rejects_non_numeric_input() {
    let variants = vec![variant(1, "A")];
    let err = resolve_selection(&variants, "large").unwrap_err();
    assert!(
        matches!(err, WorkflowError::InvalidSelection { ref input, .. } if input == "large"),
        "got: {err:?}"
    );
}
