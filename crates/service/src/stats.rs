//! Rating statistics.

use moviedb_core::MovieRecord;
use serde::Serialize;

/// Summary of the ratings in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub best_rating: f64,
    /// Every title sharing the best rating, alphabetical.
    pub best: Vec<String>,
    pub worst_rating: f64,
    pub worst: Vec<String>,
}

impl RatingStats {
    /// Computes stats, or `None` for an empty catalog.
    #[must_use]
    pub fn compute(movies: &[MovieRecord]) -> Option<Self> {
        if movies.is_empty() {
            return None;
        }

        let mut ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
        ratings.sort_by(f64::total_cmp);

        let count = ratings.len();
        let average = ratings.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 1 {
            ratings[mid]
        } else {
            (ratings[mid - 1] + ratings[mid]) / 2.0
        };
        let worst_rating = ratings[0];
        let best_rating = ratings[count - 1];

        let titles_with = |rating: f64| {
            let mut titles: Vec<String> = movies
                .iter()
                .filter(|m| m.rating.total_cmp(&rating).is_eq())
                .map(|m| m.title.clone())
                .collect();
            titles.sort();
            titles
        };

        Some(Self {
            count,
            average,
            median,
            best_rating,
            best: titles_with(best_rating),
            worst_rating,
            worst: titles_with(worst_rating),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: f64) -> MovieRecord {
        MovieRecord::new(title, rating)
    }

    #[test]
    fn test_empty() {
        assert!(RatingStats::compute(&[]).is_none());
    }

    #[test]
    fn test_odd_count() {
        let stats =
            RatingStats::compute(&[movie("A", 6.0), movie("B", 9.0), movie("C", 7.5)]).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.average - 7.5).abs() < 1e-9);
        assert!((stats.median - 7.5).abs() < 1e-9);
        assert_eq!(stats.best, vec!["B"]);
        assert_eq!(stats.worst, vec!["A"]);
    }

    #[test]
    fn test_even_count_and_ties() {
        let stats = RatingStats::compute(&[
            movie("Fight Club", 8.8),
            movie("Inception", 8.8),
            movie("Scarface", 8.3),
            movie("La haine", 8.1),
        ])
        .unwrap();
        assert!((stats.median - 8.55).abs() < 1e-9);
        assert_eq!(stats.best, vec!["Fight Club", "Inception"]);
        assert!((stats.best_rating - 8.8).abs() < f64::EPSILON);
        assert_eq!(stats.worst, vec!["La haine"]);
    }
}
