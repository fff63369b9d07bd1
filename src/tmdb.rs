use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, MovieDetails},
};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_API_KEY provided");
        }

        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, api_key, base_url, limiter }
    }

    fn is_mock(&self) -> bool {
        self.api_key.trim().is_empty()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Searches by free-text title, adult titles included.
    pub async fn search_movies(&self, title: &str) -> AppResult<Vec<Candidate>> {
        if self.is_mock() {
            return Ok(mock::search(title));
        }

        self.limiter.until_ready().await;

        debug!(title = %title, "searching TMDB");
        let resp: SearchResponse = self
            .client
            .get(self.url("/search/movie"))
            .query(&[("api_key", self.api_key.as_str()), ("query", title), ("include_adult", "true")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(title = %title, results = resp.results.len(), "TMDB search finished");
        Ok(resp.results)
    }

    pub async fn get_movie(&self, tmdb_id: i64) -> AppResult<MovieDetails> {
        if self.is_mock() {
            return mock::details(tmdb_id)
                .ok_or_else(|| AppError::Upstream(format!("no TMDB movie with id {tmdb_id}")));
        }

        self.limiter.until_ready().await;

        debug!(tmdb_id, "fetching TMDB movie");
        let details = self
            .client
            .get(self.url(&format!("/movie/{tmdb_id}")))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(details)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Candidate>,
}

mod mock {
    use crate::models::{Candidate, MovieDetails};

    const MOVIES: [(i64, &str, &str, &str, &str); 4] = [
        (
            550,
            "Fight Club",
            "1999-10-15",
            "A ticking-time-bomb insomniac and a slippery soap salesman channel primal male aggression into a shocking new form of therapy.",
            "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
        ),
        (
            27205,
            "Inception",
            "2010-07-15",
            "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets, is offered a chance to regain his old life.",
            "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
        ),
        (
            1817,
            "Phone Booth",
            "2002-11-14",
            "Publicist Stuart Shepard finds himself trapped in a phone booth, pinned down by an extortionist's sniper rifle.",
            "/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg",
        ),
        (
            603,
            "The Matrix",
            "1999-03-30",
            "Set in the 22nd century, The Matrix tells the story of a computer hacker who joins a group of underground insurgents fighting the vast and powerful computers who now rule the earth.",
            "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
        ),
    ];

    fn to_details((id, title, release_date, overview, poster): (i64, &str, &str, &str, &str)) -> MovieDetails {
        MovieDetails {
            id,
            title: title.to_string(),
            release_date: Some(release_date.to_string()),
            overview: Some(overview.to_string()),
            poster_path: Some(poster.to_string()),
        }
    }

    pub fn search(query: &str) -> Vec<Candidate> {
        let query = query.trim().to_lowercase();
        MOVIES
            .into_iter()
            .filter(|(_, title, ..)| title.to_lowercase().contains(&query))
            .map(to_details)
            .collect()
    }

    pub fn details(tmdb_id: i64) -> Option<MovieDetails> {
        MOVIES.into_iter().find(|(id, ..)| *id == tmdb_id).map(to_details)
    }
}
