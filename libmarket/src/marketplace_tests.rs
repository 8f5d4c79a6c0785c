use super::*;
use crate::error::MarketError;

#[test]
fn test_builder_defaults() {
    let builder = MarketplaceBuilder::new();
    assert_eq!(builder.base_url, DEFAULT_BASE_URL);
    assert_eq!(builder.client_config.timeout_seconds, None);
}

#[test]
fn test_builder_chaining() {
    let builder = Marketplace::builder()
        .base_url("http://localhost:8080")
        .timeout(5)
        .user_agent("test/0");
    assert_eq!(builder.base_url, "http://localhost:8080");
    assert_eq!(builder.client_config.timeout_seconds, Some(5));
    assert_eq!(builder.client_config.user_agent, "test/0");
}

#[test]
fn test_builder_with_config() {
    let config = Config::from_yaml_str("api:\n  url: http://catalog.internal/\n  timeout: 9").unwrap();
    let builder = Marketplace::builder().with_config(&config);

    assert_eq!(builder.base_url, "http://catalog.internal/");
    assert_eq!(builder.client_config.timeout_seconds, Some(9));

    let market = builder.build().unwrap();
    assert_eq!(market.base_url(), "http://catalog.internal");
}

const EMPTY_PAGE: &str = r#"{"images": []}"#;

#[test]
fn test_config_timeout_zero_means_no_timeout() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/images?only_current=true&arch=x86_64")
        .with_status(200)
        .with_body(EMPTY_PAGE)
        .expect(1)
        .create();

    let yaml = format!("api:\n  url: {}\n  timeout: 0\n", server.url());
    let config = Config::from_yaml_str(&yaml).unwrap();
    assert_eq!(config.api.timeout, Some(0));

    let market = Marketplace::builder().with_config(&config).build().unwrap();
    let images = market.list_images(Arch::X86_64, "").unwrap();

    mock.assert();
    assert!(images.is_empty());
}

#[test]
fn test_builder_timeout_zero_means_no_timeout() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/images?only_current=true&arch=arm")
        .with_status(200)
        .with_body(EMPTY_PAGE)
        .expect(1)
        .create();

    let market = Marketplace::builder()
        .base_url(server.url())
        .timeout(0)
        .build()
        .unwrap();

    assert!(market.list_images(Arch::Arm, "").unwrap().is_empty());
    mock.assert();
}

#[test]
fn test_build_with_empty_url_fails() {
    let result = Marketplace::builder().base_url("").build();
    assert!(matches!(
        result.err().unwrap(),
        MarketError::InvalidArgument { .. }
    ));
}

#[test]
fn test_list_images_end_to_end() {
    let mut server = mockito::Server::new();

    let page1 = server
        .mock("GET", "/images?only_current=true&arch=x86_64")
        .with_status(200)
        .with_header("Link", r#"</images?only_current=true&arch=x86_64&page=2>; rel="next""#)
        .with_body(
            r#"{"images": [{"id": "im1", "name": "Ubuntu Bionic", "versions": [
                {"id": "v1", "local_images": [{"id": "li1", "arch": "x86_64", "zone": "fr-par-1"}]}
            ]}]}"#,
        )
        .expect(1)
        .create();

    let page2 = server
        .mock("GET", "/images?only_current=true&arch=x86_64&page=2")
        .with_status(200)
        .with_body(r#"{"images": [{"id": "im2", "name": "Debian", "versions": []}]}"#)
        .expect(1)
        .create();

    let market = Marketplace::connect(&server.url()).unwrap();
    let images = market.list_images(Arch::X86_64, "bionic").unwrap();

    page1.assert();
    page2.assert();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].id, "im1");
    assert_eq!(
        crate::present::render_all(&images, Arch::X86_64),
        "Image im1 — Ubuntu Bionic\n  Version identifier: v1\n    Image identifier for x86_64 servers in fr-par-1: li1\n"
    );
}

#[test]
fn test_list_images_with_progress_counts_pages() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/images?only_current=true&arch=arm")
        .with_status(200)
        .with_body(r#"{"images": [{"id": "im1", "name": "Alpine", "versions": []}]}"#)
        .create();

    let market = Marketplace::connect(&server.url()).unwrap();
    let mut last = Progress::default();
    let images = market
        .list_images_with_progress(Arch::Arm, "", |p| last = *p)
        .unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(last.pages, 1);
    assert_eq!(last.seen, 1);
    assert_eq!(last.matched, 1);
}
