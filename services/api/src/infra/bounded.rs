//! Time-budget decorator for repositories.
//!
//! Point operations run under `Budgets::point`, list and aggregate reads under
//! `Budgets::list`. When a budget expires the storage future is dropped and the
//! request fails with a 500.

use std::time::Duration;

use carstore_core::budget::within;
use uuid::Uuid;

use crate::domain::repository::{
    CarRepository, FavoriteRepository, ReviewRepository, UserRepository,
};
use crate::domain::types::{
    Car, CarFilter, CarPatch, CarReviews, FavoriteWithCar, ProfileUpdate, Review, ReviewPatch,
    User,
};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    pub point: Duration,
    pub list: Duration,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            point: Duration::from_secs(5),
            list: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct Bounded<R> {
    pub inner: R,
    pub budgets: Budgets,
}

impl<R> Bounded<R> {
    pub fn new(inner: R, budgets: Budgets) -> Self {
        Self { inner, budgets }
    }
}

// ── Cars ─────────────────────────────────────────────────────────────────────

impl<R: CarRepository> CarRepository for Bounded<R> {
    async fn create(&self, car: &Car) -> Result<(), ApiError> {
        within(self.budgets.point, "cars.create", self.inner.create(car)).await?
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, ApiError> {
        within(self.budgets.point, "cars.find_by_id", self.inner.find_by_id(id)).await?
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, ApiError> {
        within(self.budgets.list, "cars.list", self.inner.list(filter)).await?
    }

    async fn update(&self, id: Uuid, patch: &CarPatch) -> Result<bool, ApiError> {
        within(self.budgets.point, "cars.update", self.inner.update(id, patch)).await?
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        within(self.budgets.point, "cars.delete", self.inner.delete(id)).await?
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

impl<R: UserRepository> UserRepository for Bounded<R> {
    async fn create(&self, user: &User) -> Result<(), ApiError> {
        within(self.budgets.point, "users.create", self.inner.create(user)).await?
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        within(
            self.budgets.point,
            "users.find_by_email",
            self.inner.find_by_email(email),
        )
        .await?
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        within(
            self.budgets.point,
            "users.find_by_username",
            self.inner.find_by_username(username),
        )
        .await?
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        within(self.budgets.point, "users.find_by_id", self.inner.find_by_id(id)).await?
    }

    async fn update(&self, id: Uuid, profile: &ProfileUpdate) -> Result<bool, ApiError> {
        within(self.budgets.point, "users.update", self.inner.update(id, profile)).await?
    }
}

// ── Favorites ────────────────────────────────────────────────────────────────

impl<R: FavoriteRepository> FavoriteRepository for Bounded<R> {
    async fn add(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        within(self.budgets.point, "favorites.add", self.inner.add(user_id, car_id)).await?
    }

    async fn remove(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        within(
            self.budgets.point,
            "favorites.remove",
            self.inner.remove(user_id, car_id),
        )
        .await?
    }

    async fn list_with_cars(&self, user_id: Uuid) -> Result<Vec<FavoriteWithCar>, ApiError> {
        within(
            self.budgets.list,
            "favorites.list_with_cars",
            self.inner.list_with_cars(user_id),
        )
        .await?
    }

    async fn count(&self, user_id: Uuid) -> Result<u64, ApiError> {
        within(self.budgets.point, "favorites.count", self.inner.count(user_id)).await?
    }

    async fn is_favorite(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, ApiError> {
        within(
            self.budgets.point,
            "favorites.is_favorite",
            self.inner.is_favorite(user_id, car_id),
        )
        .await?
    }
}

// ── Reviews ──────────────────────────────────────────────────────────────────

impl<R: ReviewRepository> ReviewRepository for Bounded<R> {
    async fn create(&self, review: &Review) -> Result<(), ApiError> {
        within(self.budgets.point, "reviews.create", self.inner.create(review)).await?
    }

    async fn car_reviews(&self, car_id: Uuid) -> Result<CarReviews, ApiError> {
        within(
            self.budgets.list,
            "reviews.car_reviews",
            self.inner.car_reviews(car_id),
        )
        .await?
    }

    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<Review>, ApiError> {
        within(
            self.budgets.point,
            "reviews.find_by_id",
            self.inner.find_by_id(review_id),
        )
        .await?
    }

    async fn update(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        patch: &ReviewPatch,
    ) -> Result<bool, ApiError> {
        within(
            self.budgets.point,
            "reviews.update",
            self.inner.update(review_id, user_id, patch),
        )
        .await?
    }

    async fn delete(&self, review_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        within(
            self.budgets.point,
            "reviews.delete",
            self.inner.delete(review_id, user_id),
        )
        .await?
    }
}
