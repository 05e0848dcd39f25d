use chrono::{DateTime, Utc};
use uuid::Uuid;

use carstore_domain::rating::{self, Rating};
use carstore_domain::user::UserRole;

// ── Car ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    pub engine_size: f64,
    pub horsepower: i32,
    pub body_type: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog attributes supplied when listing a car.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    pub engine_size: f64,
    pub horsepower: i32,
    pub body_type: String,
    pub description: String,
    pub image_url: String,
}

pub const MIN_CAR_YEAR: i32 = 1900;

impl NewCar {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err("make and model are required");
        }
        if self.year < MIN_CAR_YEAR {
            return Err("year must be 1900 or later");
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err("price must be greater than 0");
        }
        Ok(())
    }

    pub fn into_car(self, id: Uuid, now: DateTime<Utc>) -> Car {
        Car {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            color: self.color,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            engine_size: self.engine_size,
            horsepower: self.horsepower,
            body_type: self.body_type,
            description: self.description,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub description: Option<String>,
}

impl CarPatch {
    pub fn apply(&self, car: &mut Car, now: DateTime<Utc>) {
        if let Some(price) = self.price {
            car.price = price;
        }
        if let Some(mileage) = self.mileage {
            car.mileage = mileage;
        }
        if let Some(ref description) = self.description {
            car.description = description.clone();
        }
        car.updated_at = now;
    }
}

/// List predicate. Absent fields impose no constraint; present ones AND together.
/// Ranges are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    pub make: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl CarFilter {
    pub fn matches(&self, car: &Car) -> bool {
        fn eq(want: &Option<String>, have: &str) -> bool {
            want.as_deref().is_none_or(|w| w == have)
        }

        eq(&self.make, &car.make)
            && eq(&self.body_type, &car.body_type)
            && eq(&self.fuel_type, &car.fuel_type)
            && eq(&self.transmission, &car.transmission)
            && self.min_price.is_none_or(|p| car.price >= p)
            && self.max_price.is_none_or(|p| car.price <= p)
            && self.min_year.is_none_or(|y| car.year >= y)
            && self.max_year.is_none_or(|y| car.year <= y)
    }
}

// ── User ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields overwritten by `UserRepository::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

// ── Favorite ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A favorite joined with the car it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteWithCar {
    pub favorite: Favorite,
    pub car: Car,
}

// ── Review ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPatch {
    pub rating: Rating,
    pub comment: String,
}

/// Reviews of one car with their aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct CarReviews {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: usize,
}

impl CarReviews {
    /// Sorts newest first and computes the mean rating (0.0 when empty).
    pub fn aggregate(mut reviews: Vec<Review>) -> Self {
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let average_rating = rating::average(reviews.iter().map(|r| r.rating));
        let total_reviews = reviews.len();
        Self {
            reviews,
            average_rating,
            total_reviews,
        }
    }
}
