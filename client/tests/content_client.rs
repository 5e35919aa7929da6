use fuckboss_client::{
    ClientError, ContentClient, ContentService, CreatePostRequest, Route, SearchQuery,
    ValidationError,
    controllers::{CreateController, DetailController, DetailState, ListController, SearchController},
};
use serde_json::json;
use std::num::NonZeroU32;
use tokio::net::TcpListener;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

/// Starts a content service on an ephemeral port and returns a client for it.
async fn spawn_api() -> ContentClient {
    let config = fuckboss_api::Config {
        posts_per_hour: NonZeroU32::new(1000).unwrap(),
        ..fuckboss_api::Config::default()
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(fuckboss_api::serve(listener, config));

    ContentClient::new(Some(&format!("http://{addr}")))
}

fn new_post(company: &str, city_code: &str, city_name: &str, content: &str) -> CreatePostRequest {
    CreatePostRequest {
        company: company.into(),
        city_code: city_code.into(),
        city_name: city_name.into(),
        content: content.into(),
        occurred_at: None,
    }
}

fn empty_page() -> serde_json::Value {
    json!({"posts": [], "total": 0, "page": 1, "pageSize": 20})
}

#[tokio::test]
async fn created_post_reads_back_identically() {
    let client = spawn_api().await;

    let created = client
        .create_post(&new_post("测试公司A", "beijing", "北京", "一二三四五六七八九十"))
        .await
        .unwrap();
    assert!(created.created_at > 0);

    let post = client.get_post(&created.post_id).await.unwrap();
    assert_eq!(post.id, created.post_id);
    assert_eq!(post.company, "测试公司A");
    assert_eq!(post.city_code, "beijing");
    assert_eq!(post.content, "一二三四五六七八九十");
    assert_eq!(post.created_at, created.created_at);

    assert_eq!(client.get_post(&created.post_id).await.unwrap(), post);
}

#[tokio::test]
async fn lists_twenty_five_posts_across_pages() {
    let client = spawn_api().await;
    for i in 0..25 {
        client
            .create_post(&new_post(&format!("Company {i}"), "beijing", "北京", "some long enough content"))
            .await
            .unwrap();
    }

    let first = client.list_posts("", 1, 20).await.unwrap();
    assert_eq!(first.posts.len(), 20);
    assert_eq!(first.total, 25);
    assert_eq!(first.page, 1);
    assert_eq!(first.posts[0].company, "Company 24");

    let second = client.list_posts("", 2, 20).await.unwrap();
    assert_eq!(second.posts.len(), 5);
    assert_eq!(second.page, 2);

    let beyond = client.list_posts("", 3, 20).await.unwrap();
    assert!(beyond.posts.is_empty());
    assert_eq!(beyond.total, 25);

    let elsewhere = client.list_posts("shanghai", 1, 20).await.unwrap();
    assert_eq!(elsewhere.total, 0);
}

#[tokio::test]
async fn search_past_the_last_page_is_empty_with_true_total() {
    let client = spawn_api().await;
    for company in ["Acme East", "Acme West", "Globex"] {
        client
            .create_post(&new_post(company, "beijing", "北京", "some long enough content"))
            .await
            .unwrap();
    }

    let first = client.search_posts(&SearchQuery::new("acme")).await.unwrap();
    assert_eq!(first.posts.len(), 2);
    assert_eq!(first.total, 2);

    let beyond = client
        .search_posts(&SearchQuery::new("acme").page(2, 20))
        .await
        .unwrap();
    assert!(beyond.posts.is_empty());
    assert_eq!(beyond.total, 2);
    assert_eq!(beyond.page, 2);
    assert_eq!(beyond.page_size, 20);
}

#[tokio::test]
async fn missing_post_is_classified_not_found() {
    let client = spawn_api().await;

    let err = client.get_post("nonexistent-id").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));

    let mut detail = DetailController::new();
    let request = detail.open("nonexistent-id").unwrap();
    detail.load(&client, request).await;
    let DetailState::Missing(missing) = detail.state() else {
        panic!("expected empty state, got {:?}", detail.state());
    };
    assert!(missing.not_found);
    assert_eq!(missing.back(), Route::Home);
}

#[tokio::test]
async fn create_controller_navigates_to_the_new_post() {
    let client = spawn_api().await;

    let mut create = CreateController::new();
    let form = create.form_mut();
    form.company = "AcmeCorp".into();
    form.city_code = "shanghai".into();
    form.content = "unpaid overtime every single week".into();

    let Some(Route::Post(id)) = create.submit_to(&client).await.unwrap() else {
        panic!("expected navigation to the new post");
    };

    let mut detail = DetailController::new();
    let request = detail.open(&id).unwrap();
    detail.load(&client, request).await;
    let DetailState::Found(post) = detail.state() else {
        panic!("expected the created post, got {:?}", detail.state());
    };
    assert_eq!(post.city_name, "上海");
}

#[tokio::test]
async fn search_and_list_controllers_against_the_service() {
    let client = spawn_api().await;
    client
        .create_post(&new_post("AcmeCorp", "beijing", "北京", "unpaid overtime every week"))
        .await
        .unwrap();
    client
        .create_post(&new_post("Globex", "shanghai", "上海", "acme contractor, all fine"))
        .await
        .unwrap();

    let mut search = SearchController::new(20);
    let request = search.submit("ACME", None).unwrap();
    search.load(&client, request).await;
    assert_eq!(search.total(), 2);
    let marked: Vec<&str> = search
        .highlighted()
        .iter()
        .flat_map(|view| view.company.iter().chain(view.content.iter()))
        .filter(|span| span.matched)
        .map(|span| span.text)
        .collect();
    assert_eq!(marked, vec!["acme", "Acme"]);

    let request = search.set_city(Some("beijing")).unwrap();
    search.load(&client, request).await;
    assert_eq!(search.total(), 1);

    // Single-character keywords are rejected by the service
    let request = search.submit("a", None).unwrap();
    search.load(&client, request).await;
    assert!(search.posts().is_empty());
    assert!(search.take_notice().unwrap().contains("at least 2 characters"));

    let mut list = ListController::new(20);
    let request = list.mount();
    list.load(&client, request).await;
    assert_eq!(list.total(), 2);
    let request = list.set_city("shanghai").unwrap();
    list.load(&client, request).await;
    assert_eq!(list.posts()[0].company, "Globex");
}

#[tokio::test]
async fn list_sends_empty_city_explicitly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(query_param("cityCode", ""))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "20"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContentClient::new(Some(&server.uri()));
    let page = client.list_posts("", 1, 20).await.unwrap();
    assert!(page.posts.is_empty());
}

#[tokio::test]
async fn search_fills_in_default_paging() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/search"))
        .and(body_json(json!({"keyword": "acme", "page": 1, "pageSize": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContentClient::new(Some(&server.uri()));
    client.search_posts(&SearchQuery::new("acme")).await.unwrap();
}

#[tokio::test]
async fn error_messages_fall_back_from_json_to_text_to_status() {
    let server = MockServer::start().await;
    Mock::given(path("/api/posts/json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid city"})))
        .mount(&server)
        .await;
    Mock::given(path("/api/posts/text"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway from proxy"))
        .mount(&server)
        .await;
    Mock::given(path("/api/posts/empty"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ContentClient::new(Some(&server.uri()));

    let err = client.get_post("json").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Request {
            status: Some(400),
            message: "invalid city".into()
        }
    );

    let err = client.get_post("text").await.unwrap_err();
    assert_eq!(err.message(), "bad gateway from proxy");
    assert_eq!(err.status(), Some(502));

    let err = client.get_post("empty").await.unwrap_err();
    assert_eq!(err.message(), "HTTP 503 Service Unavailable");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ContentClient::new(Some(&server.uri()));
    let mut create = CreateController::new();
    let form = create.form_mut();
    form.company = "测试公司A".into();
    form.city_code = "beijing".into();
    form.content = "一二三四五六七八九".into();

    assert!(matches!(
        create.submit_to(&client).await,
        Err(ValidationError::Fields(_))
    ));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error_without_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ContentClient::new(Some(&format!("http://{addr}")));
    let err = client.list_posts("", 1, 20).await.unwrap_err();
    assert!(matches!(err, ClientError::Request { status: None, .. }));
}
