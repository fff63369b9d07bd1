use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
    ranking,
};

/// Owns every read and write of the movie list.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        let created = model.insert(&self.db).await.map_err(|e| AppError::from_insert(e, &title))?;
        debug!(movie_id = created.id, title = %created.title, "added movie");
        Ok(created)
    }

    pub async fn find(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound(id))
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    /// Returns every movie in display order and persists the freshly computed
    /// rank of each one.
    pub async fn ranked(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        let movies = ranking::rank(movies);

        let txn = self.db.begin().await?;
        for m in &movies {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(m.ranking))
                .filter(movie::Column::Id.eq(m.id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        Ok(movies)
    }

    /// Overwrites rating and review, leaving every other column as stored.
    pub async fn update_review(&self, id: i32, rating: f64, review: String) -> AppResult<movie::Model> {
        let existing = self.find(id).await?;
        let mut active: movie::ActiveModel = existing.into();
        active.rating = Set(Some(rating));
        active.review = Set(Some(review));
        let updated = active.update(&self.db).await?;
        debug!(movie_id = id, rating, "updated review");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(id));
        }
        debug!(movie_id = id, "deleted movie");
        Ok(())
    }

    /// Inserts the sample movie when the list is empty. Returns whether it did.
    pub async fn seed_sample(&self) -> AppResult<bool> {
        if self.count().await? > 0 {
            return Ok(false);
        }

        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set("Phone Booth".to_string()),
            year: Set(2002),
            description: Set("Publicist Stuart Shepard finds himself trapped in a phone booth, pinned down by an extortionist's sniper rifle. Unable to leave or receive outside help, Stuart's negotiation with the caller leads to a jaw-dropping climax.".to_string()),
            rating: Set(Some(7.3)),
            ranking: Set(Some(10)),
            review: Set(Some("My favourite character was the caller.".to_string())),
            img_url: Set("https://image.tmdb.org/t/p/w500/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg".to_string()),
        };
        model.insert(&self.db).await?;
        Ok(true)
    }
}
