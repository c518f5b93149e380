use chrono::{DateTime, Utc};

use crate::{
    model::user::ReviewDto,
    server::model::user::User,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub agent_id: i32,
    pub reviewer_id: i32,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model) -> Self {
        Self {
            id: entity.id,
            agent_id: entity.agent_id,
            reviewer_id: entity.reviewer_id,
            rating: entity.rating,
            review: entity.review,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self, reviewer: &User, app_url: &str) -> ReviewDto {
        ReviewDto {
            id: self.id,
            agent: self.agent_id,
            reviewer: reviewer.reviewer_dto(app_url),
            rating: self.rating,
            review: self.review,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewParam {
    pub agent_id: i32,
    pub reviewer_id: i32,
    pub rating: Option<i32>,
    pub review: Option<String>,
}

/// Average of the given ratings rounded to one decimal, `None` when nobody rated.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    let ratings: Vec<i32> = reviews.iter().filter_map(|review| review.rating).collect();
    if ratings.is_empty() {
        return None;
    }

    let mean = ratings.iter().map(|&r| r as f64).sum::<f64>() / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Option<i32>) -> Review {
        Review {
            id: 1,
            agent_id: 1,
            reviewer_id: 2,
            rating,
            review: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn averages_given_ratings_only() {
        let reviews = vec![review(Some(4)), review(None), review(Some(5)), review(Some(5))];

        assert_eq!(average_rating(&reviews), Some(4.7));
    }

    #[test]
    fn no_ratings_gives_none() {
        assert_eq!(average_rating(&[review(None)]), None);
        assert_eq!(average_rating(&[]), None);
    }
}
