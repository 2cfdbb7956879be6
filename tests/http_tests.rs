use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use blogly::util::db;

struct TestApp {
    router: Router,
    // keeps the SQLite file alive for the duration of the test
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("blogly_test.db");

        let pool = db::establish_pool(db_path.to_str().unwrap()).expect("pool");
        db::run_migrations(&pool).expect("migrations");

        TestApp {
            router: blogly::app(pool).expect("router"),
            _dir: dir,
        }
    }

    async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }

    async fn post_form(&self, uri: &str, body: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }
}

fn location(resp: &Response) -> String {
    resp.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_owned()
}

async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_redirects_to_users() {
    let app = TestApp::new();

    let resp = app.get("/").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");
}

#[tokio::test]
async fn create_user_and_post_end_to_end() {
    let app = TestApp::new();

    // create the user and follow the redirect
    let resp = app
        .post_form(
            "/users/new",
            "first_name=Lady&last_name=Whistledown&image_url=",
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let user_url = location(&resp);

    let resp = app.get(&user_url).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Lady Whistledown"));

    // the blank image_url fell back to the placeholder
    assert!(html.contains(blogly::models::user::DEFAULT_IMAGE_URL));

    // add a post under that user and follow the redirect
    let resp = app
        .post_form(
            &format!("{user_url}/posts/new"),
            "title=Who+Lady+Whistledown+Is+Not...&content=A+maid%2C+they+don%27t+have+the+time%21",
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let post_url = location(&resp);

    let resp = app.get(&post_url).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Who Lady Whistledown Is Not..."));

    // the post shows up on the user page too
    let html = body_string(app.get(&user_url).await).await;
    assert!(html.contains("Who Lady Whistledown Is Not..."));
}

#[tokio::test]
async fn user_edit_overwrites_fields() {
    let app = TestApp::new();

    let resp = app
        .post_form("/users/new", "first_name=Eloise&last_name=B&image_url=")
        .await;
    let user_url = location(&resp);

    let resp = app
        .post_form(
            &format!("{user_url}/edit"),
            "first_name=Penelope&last_name=Featherington&image_url=",
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), user_url);

    let html = body_string(app.get(&user_url).await).await;
    assert!(html.contains("Penelope Featherington"));
    assert!(!html.contains("Eloise"));
}

#[tokio::test]
async fn deleting_a_user_removes_them_from_the_list() {
    let app = TestApp::new();

    let resp = app
        .post_form("/users/new", "first_name=Eloise&last_name=B&image_url=")
        .await;
    let user_url = location(&resp);

    let resp = app.post_form(&format!("{user_url}/delete"), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");

    let html = body_string(app.get("/users").await).await;
    assert!(!html.contains("Eloise"));

    let resp = app.get(&user_url).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tag_crud_over_http() {
    let app = TestApp::new();

    let resp = app.post_form("/tags/new", "name=scandal").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/tags");

    let html = body_string(app.get("/tags").await).await;
    assert!(html.contains("scandal"));

    // duplicate name is a validation failure, not a server error
    let resp = app.post_form("/tags/new", "name=scandal").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = app.post_form("/tags/1/edit", "name=gossip").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let html = body_string(app.get("/tags/1").await).await;
    assert!(html.contains("gossip"));

    let resp = app.post_form("/tags/1/delete", "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = app.get("/tags/1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_form_checkboxes_select_tags() {
    let app = TestApp::new();

    app.post_form("/tags/new", "name=society").await;
    app.post_form("/tags/new", "name=scandal").await;

    let resp = app
        .post_form("/users/new", "first_name=Eloise&last_name=B&image_url=")
        .await;
    let user_url = location(&resp);

    let resp = app
        .post_form(
            &format!("{user_url}/posts/new"),
            "title=The+Season&content=&tags=1&tags=2",
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let post_url = location(&resp);

    let html = body_string(app.get(&post_url).await).await;
    assert!(html.contains("society"));
    assert!(html.contains("scandal"));

    // resync to just the second tag
    let resp = app
        .post_form(
            &format!("{post_url}/edit"),
            "title=The+Season&content=&tags=2",
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = body_string(app.get(&post_url).await).await;
    assert!(!html.contains("society"));
    assert!(html.contains("scandal"));

    // tag detail links back to the post
    let html = body_string(app.get("/tags/2").await).await;
    assert!(html.contains("The Season"));
}

#[tokio::test]
async fn missing_records_return_not_found_uniformly() {
    let app = TestApp::new();

    for uri in ["/users/999", "/users/999/posts/999", "/tags/999"] {
        let resp = app.get(uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }
}

#[tokio::test]
async fn blank_required_fields_are_rejected() {
    let app = TestApp::new();

    let resp = app
        .post_form("/users/new", "first_name=&last_name=&image_url=")
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(resp).await;
    assert!(html.contains("first_name"));

    let resp = app.post_form("/tags/new", "name=").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn new_forms_render() {
    let app = TestApp::new();

    let resp = app.get("/users/new").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Create User"));

    let resp = app.get("/tags/new").await;
    assert_eq!(resp.status(), StatusCode::OK);

    // the post form lists available tags as checkboxes
    app.post_form("/tags/new", "name=society").await;
    let resp = app
        .post_form("/users/new", "first_name=Eloise&last_name=&image_url=")
        .await;
    let user_url = location(&resp);

    let resp = app.get(&format!("{user_url}/posts/new")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("type=\"checkbox\""));
    assert!(html.contains("society"));
}
