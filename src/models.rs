use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// A movie as TMDB describes it, from either search or fetch-by-id.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Search results carry the same fields as a full lookup.
pub type Candidate = MovieDetails;

impl MovieDetails {
    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }
}

/// Leading `YYYY` of a `YYYY-MM-DD` release date.
pub fn parse_year(release_date: &str) -> Option<i32> {
    release_date.split('-').next().and_then(|y| y.trim().parse().ok())
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: String,
}

impl NewMovie {
    pub fn from_details(details: MovieDetails, image_base_url: &str) -> AppResult<Self> {
        let year = details.year().ok_or_else(|| {
            AppError::Upstream(format!(
                "TMDB movie {} has no usable release date ({:?})",
                details.id, details.release_date
            ))
        })?;
        let poster_path = details.poster_path.ok_or_else(|| {
            AppError::Upstream(format!("TMDB movie {} has no poster", details.id))
        })?;
        let description = details.overview.ok_or_else(|| {
            AppError::Upstream(format!("TMDB movie {} has no overview", details.id))
        })?;

        Ok(Self {
            title: details.title,
            year,
            description,
            img_url: format!("{image_base_url}{poster_path}"),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub rating: String,
    pub review: String,
}

impl EditForm {
    /// Both fields are required; the rating must be a finite number.
    pub fn validate(self) -> AppResult<(f64, String)> {
        let rating: f64 = self
            .rating
            .trim()
            .parse()
            .ok()
            .filter(|r: &f64| r.is_finite())
            .ok_or_else(|| AppError::Validation(format!("rating must be a number, got {:?}", self.rating)))?;
        let review = self.review.trim();
        if review.is_empty() {
            return Err(AppError::Validation("review is required".to_string()));
        }
        Ok((rating, review.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(release_date: Option<&str>, poster_path: Option<&str>) -> MovieDetails {
        MovieDetails {
            id: 1817,
            title: "Phone Booth".to_string(),
            release_date: release_date.map(str::to_string),
            overview: Some("Trapped.".to_string()),
            poster_path: poster_path.map(str::to_string),
        }
    }

    #[test]
    fn year_is_leading_component_of_release_date() {
        assert_eq!(parse_year("2002-01-01"), Some(2002));
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("soon"), None);
    }

    #[test]
    fn builds_record_from_details() {
        let movie =
            NewMovie::from_details(details(Some("2002-01-01"), Some("/abc.jpg")), "https://img/w500")
                .unwrap();
        assert_eq!(movie.year, 2002);
        assert_eq!(movie.title, "Phone Booth");
        assert_eq!(movie.description, "Trapped.");
        assert_eq!(movie.img_url, "https://img/w500/abc.jpg");
    }

    #[test]
    fn edit_form_requires_number_and_review() {
        let form = |rating: &str, review: &str| EditForm { rating: rating.into(), review: review.into() };
        assert_eq!(form(" 9 ", " Great ").validate().unwrap(), (9.0, "Great".to_string()));
        assert!(matches!(form("nine", "Great").validate(), Err(AppError::Validation(_))));
        assert!(matches!(form("NaN", "Great").validate(), Err(AppError::Validation(_))));
        assert!(matches!(form("7.5", "   ").validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn missing_poster_is_an_upstream_error() {
        let err = NewMovie::from_details(details(Some("2002-01-01"), None), "https://img").unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn blank_release_date_is_an_upstream_error() {
        let err = NewMovie::from_details(details(Some(""), Some("/p.jpg")), "https://img").unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
