use super::*;

fn test_client(base_url: &str) -> StoreClient {
    StoreClient::with_base_url(base_url).expect("client construction should not fail")
}

#[test]
fn build_url_joins_listing_path_and_params() {
    let client = test_client("https://api.example.com");
    let page = 2usize.to_string();
    let page_size = 100u32.to_string();
    let url = client
        .build_url(ACCOUNTS_PATH, &[("page", &page), ("page_size", &page_size)])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/track-accounts/accounts/?page=2&page_size=100"
    );
}

#[test]
fn build_url_strips_trailing_slash_from_base() {
    let client = test_client("https://api.example.com/");
    let url = client.build_url(REPORTS_PATH, &[]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/track-accounts/reports/"
    );
}

#[test]
fn build_url_preserves_base_path_prefix() {
    let client = test_client("https://api.example.com/api/v1");
    let url = client.build_url("instagram/posts/", &[]).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/api/v1/instagram/posts/");
}

#[test]
fn build_url_encodes_date_params() {
    let client = test_client("https://api.example.com");
    let folder = "7".to_string();
    let start = "2025-03-01".to_string();
    let end = "2025-03-02".to_string();
    let url = client
        .build_url(
            "instagram/posts/",
            &[
                ("folder_id", &folder),
                ("start_date", &start),
                ("end_date", &end),
            ],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/instagram/posts/?folder_id=7&start_date=2025-03-01&end_date=2025-03-02"
    );
}

#[test]
fn new_rejects_unparseable_base_url() {
    let result = StoreClient::with_base_url("not a url");
    assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
}
