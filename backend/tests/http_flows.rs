//! End-to-end handler flows over an in-memory database.
//!
//! Each test mounts the real route table with the real Diesel adapters and
//! drives it through Actix's test client, cookies and all.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use diesel::prelude::*;
use serde_json::Value;

use waymark::domain::ports::LandmarkRepository;
use waymark::domain::LandmarkId;
use waymark::inbound::http::{routes, HttpState};
use waymark::outbound::persistence::schema::{ratings, users, walk_landmarks, walks};
use waymark::outbound::persistence::DbPool;
use waymark::test_support::{memory_state, test_session_middleware, StubRouteMapper};

async fn spawn_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(routes::configure),
    )
    .await
}

fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

fn location(res: &ServiceResponse) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("redirect location")
        .to_str()
        .expect("ascii location")
}

fn credentials(email: &str, password: &str) -> Vec<(String, String)> {
    vec![
        ("email".to_owned(), email.to_owned()),
        ("password".to_owned(), password.to_owned()),
    ]
}

async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/registration")
            .set_form(credentials(email, password))
            .to_request(),
    )
    .await
}

async fn login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(credentials(email, password))
            .to_request(),
    )
    .await
}

async fn get_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    cookie: Option<Cookie<'static>>,
) -> Value {
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie);
    }
    test::call_and_read_body_json(app, req.to_request()).await
}

fn user_count(pool: &DbPool) -> i64 {
    let mut conn = pool.get().expect("checkout");
    users::table.count().get_result(&mut conn).expect("count users")
}

#[actix_rt::test]
async fn registration_creates_one_user_and_authenticates() {
    let (state, pool) = memory_state();
    let app = spawn_app(state).await;

    let res = register(&app, "ada@example.com", "hunter2").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    let cookie = session_cookie(&res).expect("authenticated session cookie");
    assert_eq!(user_count(&pool), 1);

    let profile = get_json(&app, "/profile", Some(cookie)).await;
    assert_eq!(profile["authenticated"], true);
    assert_eq!(profile["user"]["email"], "ada@example.com");
}

#[actix_rt::test]
async fn homepage_reports_identity_and_drains_flashes() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let anonymous = get_json(&app, "/", None).await;
    assert_eq!(anonymous["page"], "homepage");
    assert_eq!(anonymous["userId"], Value::Null);

    let registered = register(&app, "ada@example.com", "hunter2").await;
    let cookie = session_cookie(&registered).expect("session cookie");
    let home = get_json(&app, "/", Some(cookie)).await;
    assert_eq!(home["userId"], 1);
    assert_eq!(home["messages"][0], "Your account has been created.");
}

#[actix_rt::test]
async fn duplicate_registration_creates_no_second_user() {
    let (state, pool) = memory_state();
    let app = spawn_app(state).await;

    register(&app, "ada@example.com", "hunter2").await;
    let res = register(&app, "ada@example.com", "other-password").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    assert_eq!(user_count(&pool), 1);

    // The flash message explains the redirect on the login page.
    let cookie = session_cookie(&res).expect("session cookie with flash");
    let page = get_json(&app, "/login", Some(cookie)).await;
    assert_eq!(
        page["messages"][0],
        "An account has already been created for this email."
    );
}

#[actix_rt::test]
async fn password_is_not_stored_in_clear() {
    let (state, pool) = memory_state();
    let app = spawn_app(state).await;
    register(&app, "ada@example.com", "hunter2").await;

    let mut conn = pool.get().expect("checkout");
    let stored: String = users::table
        .select(users::password_hash)
        .first(&mut conn)
        .expect("stored hash");
    assert!(!stored.contains("hunter2"));
}

#[actix_rt::test]
async fn login_succeeds_with_correct_credentials() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;
    register(&app, "ada@example.com", "hunter2").await;

    let res = login(&app, "ada@example.com", "hunter2").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let cookie = session_cookie(&res).expect("session cookie");
    let profile = get_json(&app, "/profile", Some(cookie)).await;
    assert_eq!(profile["authenticated"], true);
}

#[actix_rt::test]
async fn bad_password_and_unknown_email_get_the_same_message() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;
    register(&app, "ada@example.com", "hunter2").await;

    let wrong_password = login(&app, "ada@example.com", "nope").await;
    assert_eq!(location(&wrong_password), "/login");
    let cookie = session_cookie(&wrong_password).expect("flash cookie");
    let first = get_json(&app, "/login", Some(cookie)).await;

    let unknown_email = login(&app, "nobody@example.com", "nope").await;
    assert_eq!(location(&unknown_email), "/login");
    let cookie = session_cookie(&unknown_email).expect("flash cookie");
    let second = get_json(&app, "/login", Some(cookie)).await;

    assert_eq!(first["messages"][0], "Verify email and password entered is correct.");
    assert_eq!(first["messages"], second["messages"]);

    // Neither attempt authenticated anybody.
    let profile = get_json(&app, "/profile", None).await;
    assert_eq!(profile["authenticated"], false);
}

#[actix_rt::test]
async fn empty_credentials_are_a_structured_bad_request() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let res = register(&app, "", "hunter2").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");

    let res = register(&app, "ada@example.com", "").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn unparseable_form_input_is_a_structured_bad_request() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/rate_landmark")
            .set_form(vec![
                ("score".to_owned(), "not-a-number".to_owned()),
                ("landmark_id".to_owned(), "1".to_owned()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");

    // Path segments that fail to parse take the same shape.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/landmarks/somewhere").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_rt::test]
async fn logout_clears_the_session_identity() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let registered = register(&app, "ada@example.com", "hunter2").await;
    let cookie = session_cookie(&registered).expect("session cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let cookie = session_cookie(&res).expect("updated session cookie");
    let profile = get_json(&app, "/profile", Some(cookie.clone())).await;
    assert_eq!(profile["authenticated"], false);

    // Logging out again is idempotent.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

async fn seed_landmark(state: &HttpState, name: &str) -> LandmarkId {
    state
        .landmarks
        .create(name, None)
        .await
        .expect("seed landmark")
        .id
}

async fn rate(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: Cookie<'static>,
    landmark_id: LandmarkId,
    score: i32,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/rate_landmark")
            .cookie(cookie)
            .set_form(vec![
                ("score".to_owned(), score.to_string()),
                ("landmark_id".to_owned(), landmark_id.to_string()),
            ])
            .to_request(),
    )
    .await
}

#[actix_rt::test]
async fn rating_twice_keeps_one_row_with_the_second_score() {
    let (state, pool) = memory_state();
    let landmark_id = seed_landmark(&state, "Fort Point").await;
    let app = spawn_app(state).await;

    let registered = register(&app, "ada@example.com", "hunter2").await;
    let cookie = session_cookie(&registered).expect("session cookie");

    let first = rate(&app, cookie.clone(), landmark_id, 3).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    let second = rate(&app, cookie, landmark_id, 5).await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);

    let mut conn = pool.get().expect("checkout");
    let rows: Vec<i32> = ratings::table
        .select(ratings::score)
        .load(&mut conn)
        .expect("load ratings");
    assert_eq!(rows, vec![5]);
}

#[actix_rt::test]
async fn rating_requires_a_logged_in_session() {
    let (state, _pool) = memory_state();
    let landmark_id = seed_landmark(&state, "Fort Point").await;
    let app = spawn_app(state).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/rate_landmark")
            .set_form(vec![
                ("score".to_owned(), "4".to_owned()),
                ("landmark_id".to_owned(), landmark_id.to_string()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn average_is_scoped_to_the_landmarks_own_ratings() {
    let (state, _pool) = memory_state();
    let bridge = seed_landmark(&state, "Golden Gate Bridge").await;
    let mural = seed_landmark(&state, "Mission Murals").await;
    let unrated = seed_landmark(&state, "Lands End").await;
    let app = spawn_app(state).await;

    let ada = session_cookie(&register(&app, "ada@example.com", "hunter2").await)
        .expect("ada session");
    let grace = session_cookie(&register(&app, "grace@example.com", "hunter2").await)
        .expect("grace session");

    rate(&app, ada.clone(), bridge, 3).await;
    rate(&app, grace.clone(), bridge, 5).await;
    rate(&app, ada, mural, 1).await;

    let page = get_json(&app, &format!("/landmarks/{bridge}"), None).await;
    assert_eq!(page["average"], 4.0);
    assert_eq!(page["ratings"].as_array().map(Vec::len), Some(2));

    let page = get_json(&app, &format!("/landmarks/{mural}"), None).await;
    assert_eq!(page["average"], 1.0);

    let page = get_json(&app, &format!("/landmarks/{unrated}"), None).await;
    assert_eq!(page["average"], Value::Null);
}

#[actix_rt::test]
async fn landmark_page_shows_the_viewers_own_rating() {
    let (state, _pool) = memory_state();
    let landmark_id = seed_landmark(&state, "Fort Point").await;
    let app = spawn_app(state).await;

    let cookie = session_cookie(&register(&app, "ada@example.com", "hunter2").await)
        .expect("session cookie");
    let redirected = rate(&app, cookie, landmark_id, 4).await;
    let cookie = session_cookie(&redirected).expect("cookie after rating");

    let page = get_json(&app, &format!("/landmarks/{landmark_id}"), Some(cookie)).await;
    assert_eq!(page["userRating"]["score"], 4);

    let anonymous = get_json(&app, &format!("/landmarks/{landmark_id}"), None).await;
    assert_eq!(anonymous["userRating"], Value::Null);
}

#[actix_rt::test]
async fn unknown_landmark_is_not_found() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/landmarks/999").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn anonymous_profile_is_a_defined_page() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let profile = get_json(&app, "/profile", None).await;
    assert_eq!(profile["authenticated"], false);
    assert!(profile.get("user").is_none());
}

#[actix_rt::test]
async fn walk_creation_without_a_mapper_is_service_unavailable() {
    let (state, _pool) = memory_state();
    let app = spawn_app(state).await;

    let cookie = session_cookie(&register(&app, "ada@example.com", "hunter2").await)
        .expect("session cookie");
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/walks/new?origin=Ferry%20Building&destination=Fort%20Point&time=90m")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "service_unavailable");
}

#[actix_rt::test]
async fn walk_creation_with_a_mapper_persists_the_walk_and_links() {
    let (state, pool) = memory_state();
    let stop = seed_landmark(&state, "Palace of Fine Arts").await;
    let state = state.with_route_mapper(StubRouteMapper { landmarks: vec![stop] }.into_port());
    let app = spawn_app(state).await;

    let cookie = session_cookie(&register(&app, "ada@example.com", "hunter2").await)
        .expect("session cookie");
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/walks/new?origin=Ferry%20Building&destination=Fort%20Point&time=90m")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/profile");

    let mut conn = pool.get().expect("checkout");
    let walk_count: i64 = walks::table.count().get_result(&mut conn).expect("walks");
    let link_count: i64 = walk_landmarks::table
        .count()
        .get_result(&mut conn)
        .expect("links");
    drop(conn);
    assert_eq!(walk_count, 1);
    assert_eq!(link_count, 1);

    let cookie = session_cookie(&res).expect("cookie after walk");
    let profile = get_json(&app, "/profile", Some(cookie)).await;
    assert_eq!(profile["walks"].as_array().map(Vec::len), Some(1));
    assert_eq!(profile["messages"][0], "Your walk has been mapped.");
}
