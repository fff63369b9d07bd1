use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, Query, State},
    response::{Html, Redirect},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{AddForm, EditForm, MovieQuery, NewMovie, SelectQuery},
    templates,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", get(add_form).post(add_search))
        .route("/select", get(select).post(select))
        .route("/edit", get(edit_form).post(edit_submit))
        .route("/delete", get(delete).post(delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.ranked().await?;
    Ok(Html(templates::list_page(&movies)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page())
}

pub async fn add_search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Html<String>> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("movie title is required".to_string()));
    }

    let candidates = state.tmdb.search_movies(title).await?;
    Ok(Html(templates::select_page(title, &candidates)))
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Redirect> {
    let details = state.tmdb.get_movie(q.id).await?;
    let new = NewMovie::from_details(details, &state.config.tmdb_image_base_url)?;
    let movie = state.store.create(new).await?;
    info!(movie_id = movie.id, tmdb_id = q.id, title = %movie.title, "movie added to list");
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.find(q.id).await?;
    Ok(Html(templates::edit_page(&movie)))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
    Form(form): Form<EditForm>,
) -> AppResult<Redirect> {
    let (rating, review) = form.validate()?;
    state.store.update_review(q.id, rating, review).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    info!(movie_id = q.id, "movie removed from list");
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{config::Config, db, store::MovieStore, tmdb::TmdbClient};

    async fn app() -> (Router, MovieStore) {
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            tmdb_api_key: String::new(),
            tmdb_base_url: "http://localhost".to_string(),
            tmdb_image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            tmdb_rps: 4,
            tmdb_timeout_secs: 1,
            database_url: "sqlite::memory:".to_string(),
            seed_sample: false,
        };
        let store = MovieStore::new(db::memory().await);
        let tmdb = TmdbClient::new(
            reqwest::Client::new(),
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_rps,
        );
        let state = Arc::new(AppState {
            config: Arc::new(config),
            store: store.clone(),
            tmdb: Arc::new(tmdb),
        });
        (router(state), store)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(resp: &axum::response::Response) -> &str {
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn search_lists_candidates_with_select_links() {
        let (app, _) = app().await;
        let resp = app.oneshot(post_form("/add", "title=matrix")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("The Matrix"));
        assert!(body.contains("/select?id=603"));
    }

    #[tokio::test]
    async fn blank_search_is_a_bad_request() {
        let (app, _) = app().await;
        let resp = app.oneshot(post_form("/add", "title=++")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn full_lifecycle_select_edit_list_delete() {
        let (app, store) = app().await;

        let resp = app.clone().oneshot(get("/select?id=27205")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let edit_url = location(&resp).to_string();
        let created = store.ranked().await.unwrap().remove(0);
        assert_eq!(edit_url, format!("/edit?id={}", created.id));
        assert_eq!(created.title, "Inception");
        assert_eq!(created.year, 2010);
        assert_eq!(created.img_url, "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg");

        let resp = app.clone().oneshot(get(&edit_url)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Inception"));

        let resp =
            app.clone().oneshot(post_form(&edit_url, "rating=9.0&review=Great")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");
        let edited = store.find(created.id).await.unwrap();
        assert_eq!(edited.rating, Some(9.0));
        assert_eq!(edited.review.as_deref(), Some("Great"));
        assert_eq!(edited.description, created.description);

        let resp = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("Inception"));
        assert!(body.contains("Great"));

        let resp = app.clone().oneshot(get(&format!("/delete?id={}", created.id))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn selecting_the_same_movie_twice_conflicts() {
        let (app, store) = app().await;
        let resp = app.clone().oneshot(get("/select?id=550")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let resp = app.oneshot(get("/select?id=550")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_provider_id_is_bad_gateway() {
        let (app, store) = app().await;
        let resp = app.oneshot(get("/select?id=1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn edit_and_delete_of_missing_movie_are_not_found() {
        let (app, _) = app().await;
        let resp = app.clone().oneshot(get("/edit?id=5")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = app.clone().oneshot(post_form("/edit?id=5", "rating=1&review=x")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = app.oneshot(post_form("/delete?id=5", "")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_with_non_numeric_rating_is_rejected() {
        let (app, store) = app().await;
        let resp = app.clone().oneshot(get("/select?id=1817")).await.unwrap();
        let url = location(&resp).to_string();
        let resp = app.oneshot(post_form(&url, "rating=great&review=x")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let movie = store.ranked().await.unwrap().remove(0);
        assert_eq!(movie.rating, None);
    }
}
