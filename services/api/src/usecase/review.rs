use uuid::Uuid;

use carstore_domain::rating::Rating;

use crate::domain::repository::{ReviewRepository, UserRepository};
use crate::domain::types::{CarReviews, Review, ReviewPatch};
use crate::error::ApiError;
use crate::usecase::now;

pub(crate) fn rating(stars: i32) -> Result<Rating, ApiError> {
    Rating::new(stars).map_err(|_| ApiError::InvalidRating)
}

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewInput {
    pub car_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

pub struct CreateReviewUseCase<R: ReviewRepository, U: UserRepository> {
    pub reviews: R,
    pub users: U,
}

impl<R: ReviewRepository, U: UserRepository> CreateReviewUseCase<R, U> {
    /// The author's username is copied onto the review at creation time.
    pub async fn execute(&self, user_id: Uuid, input: CreateReviewInput) -> Result<Review, ApiError> {
        let rating = rating(input.rating)?;
        let author = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let now = now();
        let review = Review {
            id: Uuid::now_v7(),
            car_id: input.car_id,
            user_id,
            username: author.username,
            rating,
            comment: input.comment,
            created_at: now,
            updated_at: now,
        };
        self.reviews.create(&review).await?;
        tracing::info!(review_id = %review.id, car_id = %review.car_id, "review created");
        Ok(review)
    }
}

// ── GetCarReviews ────────────────────────────────────────────────────────────

pub struct GetCarReviewsUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> GetCarReviewsUseCase<R> {
    pub async fn execute(&self, car_id: Uuid) -> Result<CarReviews, ApiError> {
        self.repo.car_reviews(car_id).await
    }
}

// ── GetReview ────────────────────────────────────────────────────────────────

pub struct GetReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> GetReviewUseCase<R> {
    pub async fn execute(&self, review_id: Uuid) -> Result<Review, ApiError> {
        self.repo
            .find_by_id(review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

pub struct UpdateReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> UpdateReviewUseCase<R> {
    /// A missing review and someone else's review are indistinguishable to the caller.
    pub async fn execute(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        stars: i32,
        comment: String,
    ) -> Result<(), ApiError> {
        let patch = ReviewPatch {
            rating: rating(stars)?,
            comment,
        };
        if !self.repo.update(review_id, user_id, &patch).await? {
            return Err(ApiError::ReviewNotOwned);
        }
        Ok(())
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> DeleteReviewUseCase<R> {
    pub async fn execute(&self, review_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(review_id, user_id).await? {
            return Err(ApiError::ReviewNotOwned);
        }
        tracing::info!(review_id = %review_id, "review deleted");
        Ok(())
    }
}
