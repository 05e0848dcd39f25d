use uuid::Uuid;

use crate::domain::repository::FavoriteRepository;
use crate::domain::types::FavoriteWithCar;
use crate::error::ApiError;

// ── AddFavorite ──────────────────────────────────────────────────────────────

pub struct AddFavoriteUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> AddFavoriteUseCase<R> {
    /// The car is not looked up; a favorite of a missing car is simply never listed.
    pub async fn execute(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        self.repo.add(user_id, car_id).await
    }
}

// ── RemoveFavorite ───────────────────────────────────────────────────────────

pub struct RemoveFavoriteUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> RemoveFavoriteUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        self.repo.remove(user_id, car_id).await
    }
}

// ── ListFavorites ────────────────────────────────────────────────────────────

pub struct ListFavoritesUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> ListFavoritesUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<FavoriteWithCar>, ApiError> {
        self.repo.list_with_cars(user_id).await
    }
}

// ── CountFavorites ───────────────────────────────────────────────────────────

pub struct CountFavoritesUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> CountFavoritesUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<u64, ApiError> {
        self.repo.count(user_id).await
    }
}

// ── CheckFavorite ────────────────────────────────────────────────────────────

pub struct CheckFavoriteUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> CheckFavoriteUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, ApiError> {
        self.repo.is_favorite(user_id, car_id).await
    }
}
