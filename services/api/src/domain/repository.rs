//! Persistence ports. Every backend (PostgreSQL, in-memory) implements the same contract.
//!
//! Methods return `Send` futures so handlers generic over a [`Store`] stay `Send`.
//! Implementors may write them as plain `async fn`.

use std::future::Future;

use uuid::Uuid;

use crate::domain::types::{
    Car, CarFilter, CarPatch, CarReviews, FavoriteWithCar, ProfileUpdate, Review, ReviewPatch,
    User,
};
use crate::error::ApiError;

pub trait CarRepository: Send + Sync {
    fn create(&self, car: &Car) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn find_by_id(&self, id: Uuid) -> impl Future<Output = Result<Option<Car>, ApiError>> + Send;

    /// Cars matching `filter`, newest first.
    fn list(&self, filter: &CarFilter) -> impl Future<Output = Result<Vec<Car>, ApiError>> + Send;

    /// Apply the present patch fields and refresh `updated_at`. `false` if no such car.
    fn update(
        &self,
        id: Uuid,
        patch: &CarPatch,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// `false` if no such car.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken email or username surfaces as
    /// [`ApiError::EmailTaken`] / [`ApiError::UsernameTaken`].
    fn create(&self, user: &User) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, ApiError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, ApiError>> + Send;

    fn find_by_id(&self, id: Uuid)
    -> impl Future<Output = Result<Option<User>, ApiError>> + Send;

    /// Overwrite the profile fields and refresh `updated_at`. `false` if no such user.
    fn update(
        &self,
        id: Uuid,
        profile: &ProfileUpdate,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

pub trait FavoriteRepository: Send + Sync {
    /// Idempotent: adding an existing pair succeeds without creating a second row.
    fn add(&self, user_id: Uuid, car_id: Uuid)
    -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Succeeds whether or not the pair existed.
    fn remove(
        &self,
        user_id: Uuid,
        car_id: Uuid,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Favorites joined with their cars, newest first. Favorites whose car no longer
    /// exists are skipped.
    fn list_with_cars(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<FavoriteWithCar>, ApiError>> + Send;

    fn count(&self, user_id: Uuid) -> impl Future<Output = Result<u64, ApiError>> + Send;

    fn is_favorite(
        &self,
        user_id: Uuid,
        car_id: Uuid,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

pub trait ReviewRepository: Send + Sync {
    fn create(&self, review: &Review) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// All reviews of a car, newest first, with their aggregate.
    fn car_reviews(
        &self,
        car_id: Uuid,
    ) -> impl Future<Output = Result<CarReviews, ApiError>> + Send;

    fn find_by_id(
        &self,
        review_id: Uuid,
    ) -> impl Future<Output = Result<Option<Review>, ApiError>> + Send;

    /// Matches on `id AND user_id`: `false` both when the review is missing and when
    /// `user_id` does not own it.
    fn update(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        patch: &ReviewPatch,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Same ownership filter as [`ReviewRepository::update`].
    fn delete(
        &self,
        review_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

/// A storage backend: hands out its four repositories.
pub trait Store: Clone + Send + Sync + 'static {
    type Cars: CarRepository + 'static;
    type Users: UserRepository + 'static;
    type Favorites: FavoriteRepository + 'static;
    type Reviews: ReviewRepository + 'static;

    fn cars(&self) -> Self::Cars;
    fn users(&self) -> Self::Users;
    fn favorites(&self) -> Self::Favorites;
    fn reviews(&self) -> Self::Reviews;

    /// Readiness probe: succeeds when the backend can serve requests.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Release connections. Called once after the server has drained.
    fn close(self) -> impl Future<Output = anyhow::Result<()>> + Send;
}
