//! In-process storage backend.
//!
//! Tables sit behind `tokio::sync::RwLock` (many readers or one writer). Uniqueness
//! checks and the insert they guard happen under the same write lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repository::{
    CarRepository, FavoriteRepository, ReviewRepository, Store, UserRepository,
};
use crate::domain::types::{
    Car, CarFilter, CarPatch, CarReviews, Favorite, FavoriteWithCar, ProfileUpdate, Review,
    ReviewPatch, User,
};
use crate::error::ApiError;

#[derive(Default)]
struct Tables {
    cars: RwLock<HashMap<Uuid, Car>>,
    users: RwLock<HashMap<Uuid, User>>,
    favorites: RwLock<Vec<Favorite>>,
    reviews: RwLock<HashMap<Uuid, Review>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Cars = MemoryCarRepository;
    type Users = MemoryUserRepository;
    type Favorites = MemoryFavoriteRepository;
    type Reviews = MemoryReviewRepository;

    fn cars(&self) -> Self::Cars {
        MemoryCarRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    fn users(&self) -> Self::Users {
        MemoryUserRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    fn favorites(&self) -> Self::Favorites {
        MemoryFavoriteRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    fn reviews(&self) -> Self::Reviews {
        MemoryReviewRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn close(self) -> anyhow::Result<()> {
        Ok(())
    }
}

// ── Cars ─────────────────────────────────────────────────────────────────────

pub struct MemoryCarRepository {
    tables: Arc<Tables>,
}

impl CarRepository for MemoryCarRepository {
    async fn create(&self, car: &Car) -> Result<(), ApiError> {
        self.tables.cars.write().await.insert(car.id, car.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, ApiError> {
        Ok(self.tables.cars.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, ApiError> {
        let mut cars: Vec<Car> = self
            .tables
            .cars
            .read()
            .await
            .values()
            .filter(|car| filter.matches(car))
            .cloned()
            .collect();
        cars.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(cars)
    }

    async fn update(&self, id: Uuid, patch: &CarPatch) -> Result<bool, ApiError> {
        let mut cars = self.tables.cars.write().await;
        match cars.get_mut(&id) {
            Some(car) => {
                patch.apply(car, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.tables.cars.write().await.remove(&id).is_some())
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

pub struct MemoryUserRepository {
    tables: Arc<Tables>,
}

fn conflict_with(
    users: &HashMap<Uuid, User>,
    id: Uuid,
    email: &str,
    username: &str,
) -> Option<ApiError> {
    let others = || users.values().filter(move |u| u.id != id);
    if others().any(|u| u.email == email) {
        return Some(ApiError::EmailTaken);
    }
    if others().any(|u| u.username == username) {
        return Some(ApiError::UsernameTaken);
    }
    None
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.tables.users.write().await;
        if let Some(conflict) = conflict_with(&users, user.id, &user.email, &user.username) {
            return Err(conflict);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let users = self.tables.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let users = self.tables.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.tables.users.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, profile: &ProfileUpdate) -> Result<bool, ApiError> {
        let mut users = self.tables.users.write().await;
        if !users.contains_key(&id) {
            return Ok(false);
        }
        if let Some(conflict) = conflict_with(&users, id, &profile.email, &profile.username) {
            return Err(conflict);
        }
        if let Some(user) = users.get_mut(&id) {
            user.username = profile.username.clone();
            user.email = profile.email.clone();
            user.first_name = profile.first_name.clone();
            user.last_name = profile.last_name.clone();
            user.phone = profile.phone.clone();
            user.updated_at = Utc::now();
        }
        Ok(true)
    }
}

// ── Favorites ────────────────────────────────────────────────────────────────

pub struct MemoryFavoriteRepository {
    tables: Arc<Tables>,
}

impl FavoriteRepository for MemoryFavoriteRepository {
    async fn add(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        let mut favorites = self.tables.favorites.write().await;
        if favorites
            .iter()
            .any(|f| f.user_id == user_id && f.car_id == car_id)
        {
            return Ok(());
        }
        favorites.push(Favorite {
            id: Uuid::now_v7(),
            user_id,
            car_id,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        self.tables
            .favorites
            .write()
            .await
            .retain(|f| !(f.user_id == user_id && f.car_id == car_id));
        Ok(())
    }

    async fn list_with_cars(&self, user_id: Uuid) -> Result<Vec<FavoriteWithCar>, ApiError> {
        // Lock order: favorites, then cars.
        let favorites = self.tables.favorites.read().await;
        let cars = self.tables.cars.read().await;
        let mut joined: Vec<FavoriteWithCar> = favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| {
                cars.get(&f.car_id).map(|car| FavoriteWithCar {
                    favorite: f.clone(),
                    car: car.clone(),
                })
            })
            .collect();
        joined.sort_by(|a, b| b.favorite.created_at.cmp(&a.favorite.created_at));
        Ok(joined)
    }

    async fn count(&self, user_id: Uuid) -> Result<u64, ApiError> {
        let favorites = self.tables.favorites.read().await;
        Ok(favorites.iter().filter(|f| f.user_id == user_id).count() as u64)
    }

    async fn is_favorite(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, ApiError> {
        let favorites = self.tables.favorites.read().await;
        Ok(favorites
            .iter()
            .any(|f| f.user_id == user_id && f.car_id == car_id))
    }
}

// ── Reviews ──────────────────────────────────────────────────────────────────

pub struct MemoryReviewRepository {
    tables: Arc<Tables>,
}

impl ReviewRepository for MemoryReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), ApiError> {
        self.tables
            .reviews
            .write()
            .await
            .insert(review.id, review.clone());
        Ok(())
    }

    async fn car_reviews(&self, car_id: Uuid) -> Result<CarReviews, ApiError> {
        let reviews: Vec<Review> = self
            .tables
            .reviews
            .read()
            .await
            .values()
            .filter(|r| r.car_id == car_id)
            .cloned()
            .collect();
        Ok(CarReviews::aggregate(reviews))
    }

    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<Review>, ApiError> {
        Ok(self.tables.reviews.read().await.get(&review_id).cloned())
    }

    async fn update(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        patch: &ReviewPatch,
    ) -> Result<bool, ApiError> {
        let mut reviews = self.tables.reviews.write().await;
        match reviews.get_mut(&review_id) {
            Some(review) if review.user_id == user_id => {
                review.rating = patch.rating;
                review.comment = patch.comment.clone();
                review.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, review_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let mut reviews = self.tables.reviews.write().await;
        match reviews.get(&review_id) {
            Some(review) if review.user_id == user_id => {
                reviews.remove(&review_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
