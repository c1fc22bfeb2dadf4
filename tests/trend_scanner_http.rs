use serde_json::json;
use sociaclip_core::agent::trend_scanner::TrendScanner;
use sociaclip_core::config::SearchConfig;
use sociaclip_core::engine::candidate::Niche;
use sociaclip_core::engine::template::TemplateBook;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn scanner_for(server: &MockServer, api_key: Option<&str>) -> TrendScanner {
    let search = SearchConfig {
        base_url: format!("{}/res/v1/web/search", server.uri()),
        api_key: api_key.map(|k| k.to_string()),
        request_timeout_secs: 5,
        ..Default::default()
    };
    TrendScanner::new(search, TemplateBook::default()).unwrap()
}

#[tokio::test]
async fn test_search_maps_web_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(header("X-Subscription-Token", "test-key"))
        .and(query_param("q", "best fitness clips going viral"))
        .and(query_param("count", "10"))
        .and(query_param("freshness", "pw"))
        .and(query_param("text_decorations", "false"))
        .and(query_param("search_lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "web": {
                "results": [
                    {"title": "Crazy gym clip", "url": "https://youtube.com/watch?v=1", "description": "viral", "age": "2 days ago"},
                    {"title": "No age", "url": "https://tiktok.com/@a/2"}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let scanner = scanner_for(&mock_server, Some("test-key"));
    let found = scanner
        .search("best fitness clips going viral", &Niche::Fitness)
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].identifier, "https://youtube.com/watch?v=1");
    assert_eq!(found[0].category, Niche::Fitness);
    assert_eq!(found[0].published.as_deref(), Some("2 days ago"));
    assert_eq!(found[0].search_query.as_deref(), Some("best fitness clips going viral"));
    assert!(found[1].description.is_empty());
    assert!(found[1].published.is_none());
}

#[tokio::test]
async fn test_scan_niche_skips_failing_queries() {
    let mock_server = MockServer::start().await;

    // Only one query succeeds; the rest hit the 500 fallback
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("q", "popular comedy videos this week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "web": {"results": [{"title": "Funny", "url": "https://youtube.com/watch?v=9"}]}
        })))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(5)
        .mount(&mock_server)
        .await;

    let scanner = scanner_for(&mock_server, Some("k"));
    let found = scanner.scan_niche(&Niche::Comedy).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Funny");
}

#[tokio::test]
async fn test_missing_web_section_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "search"})))
        .mount(&mock_server)
        .await;

    let scanner = scanner_for(&mock_server, Some("k"));
    let found = scanner.search("anything", &Niche::Food).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_no_api_key_is_an_error() {
    let mock_server = MockServer::start().await;
    let scanner = scanner_for(&mock_server, None);
    assert!(scanner.search("q", &Niche::Music).await.is_err());
    assert!(scanner.scan(&[Niche::Music]).await.is_err());
}
