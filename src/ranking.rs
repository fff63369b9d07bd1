use std::cmp::Ordering;

use crate::entities::movie;

/// Display order of the list: rating descending with unrated movies last,
/// then release year ascending, then id so equal entries keep insertion order.
pub fn compare(a: &movie::Model, b: &movie::Model) -> Ordering {
    rating_desc(a.rating, b.rating).then(a.year.cmp(&b.year)).then(a.id.cmp(&b.id))
}

fn rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts `movies` into display order and stamps each with its 1-based rank.
pub fn rank(mut movies: Vec<movie::Model>) -> Vec<movie::Model> {
    movies.sort_by(compare);
    for (i, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(i as i32 + 1);
    }
    movies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, year: i32, rating: Option<f64>) -> movie::Model {
        movie::Model {
            id,
            title: format!("Movie {id}"),
            year,
            description: String::new(),
            rating,
            ranking: None,
            review: None,
            img_url: String::new(),
        }
    }

    fn ids(movies: &[movie::Model]) -> Vec<i32> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn orders_by_rating_descending() {
        let ranked = rank(vec![
            movie(1, 2000, Some(5.5)),
            movie(2, 2000, Some(9.1)),
            movie(3, 2000, Some(7.0)),
        ]);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn equal_ratings_fall_back_to_oldest_first() {
        let ranked = rank(vec![
            movie(1, 2010, Some(8.0)),
            movie(2, 1994, Some(8.0)),
            movie(3, 2002, Some(8.0)),
        ]);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn unrated_movies_sort_after_every_rated_one() {
        let ranked = rank(vec![
            movie(1, 1950, None),
            movie(2, 2020, Some(0.5)),
            movie(3, 1940, None),
            movie(4, 2021, Some(-1.0)),
        ]);
        assert_eq!(ids(&ranked), vec![2, 4, 3, 1]);
    }

    #[test]
    fn ranks_are_contiguous_from_one() {
        let ranked = rank(vec![
            movie(7, 2001, Some(6.0)),
            movie(3, 2001, Some(6.0)),
            movie(9, 1999, None),
            movie(4, 2005, Some(9.0)),
        ]);
        let ranks: Vec<i32> = ranked.iter().filter_map(|m| m.ranking).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        // same rating and year: lower id first
        assert_eq!(ids(&ranked), vec![4, 3, 7, 9]);
    }

    #[test]
    fn empty_list_ranks_to_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
