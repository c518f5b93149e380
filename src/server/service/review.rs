use sea_orm::DatabaseConnection;

use crate::server::{
    data::{review::ReviewRepository, user::UserRepository},
    error::{validation::ValidationError, AppError},
    model::{
        review::{CreateReviewParam, Review},
        user::{Role, User},
    },
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Leaves a review on an agent.
    ///
    /// # Arguments
    /// - `reviewer` - The authenticated user writing the review
    /// - `agent_id` - User id of the reviewed agent
    /// - `rating` - Optional score from 1 to 5
    /// - `review` - Optional free-text review
    ///
    /// # Returns
    /// - `Ok(Review)` - The stored review
    /// - `Err(AppError::ValidationErr)` - Rating out of range or nothing submitted
    /// - `Err(AppError::NotFound)` - No agent with that id
    /// - `Err(AppError::BadRequest)` - The reviewer is the agent
    pub async fn create_review(
        &self,
        reviewer: &User,
        agent_id: i32,
        rating: Option<i32>,
        review: Option<String>,
    ) -> Result<Review, AppError> {
        let review = review.filter(|text| !text.trim().is_empty());
        if rating.is_none() && review.is_none() {
            return Err(ValidationError::new("error", "must provide 'review' or 'rating'.").into());
        }
        if let Some(rating) = rating {
            if !(1..=5).contains(&rating) {
                return Err(ValidationError::new(
                    "rating",
                    "Ensure this value is between 1 and 5.",
                )
                .into());
            }
        }

        let agent = UserRepository::new(self.db)
            .find_by_id(agent_id)
            .await?
            .filter(|user| user.role == Role::Agent)
            .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;

        if agent.id == reviewer.id {
            return Err(AppError::BadRequest("you cannot review yourself".to_string()));
        }

        let review = ReviewRepository::new(self.db)
            .create(CreateReviewParam {
                agent_id: agent.id,
                reviewer_id: reviewer.id,
                rating,
                review,
            })
            .await?;

        Ok(review)
    }
}
