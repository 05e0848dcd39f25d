use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use carstore_api_schema::{cars, favorites, reviews, users};
use carstore_domain::rating::Rating;

use crate::domain::repository::{
    CarRepository, FavoriteRepository, ReviewRepository, Store, UserRepository,
};
use crate::domain::types::{
    Car, CarFilter, CarPatch, CarReviews, Favorite, FavoriteWithCar, ProfileUpdate, Review,
    ReviewPatch, User,
};
use crate::error::ApiError;

/// PostgreSQL backend. Cloning shares the connection pool.
#[derive(Clone)]
pub struct DbStore {
    pub db: DatabaseConnection,
}

impl Store for DbStore {
    type Cars = DbCarRepository;
    type Users = DbUserRepository;
    type Favorites = DbFavoriteRepository;
    type Reviews = DbReviewRepository;

    fn cars(&self) -> Self::Cars {
        DbCarRepository {
            db: self.db.clone(),
        }
    }

    fn users(&self) -> Self::Users {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    fn favorites(&self) -> Self::Favorites {
        DbFavoriteRepository {
            db: self.db.clone(),
        }
    }

    fn reviews(&self) -> Self::Reviews {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.db.ping().await.context("ping database")
    }

    async fn close(self) -> anyhow::Result<()> {
        self.db.close().await.context("close database connection")
    }
}

fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}

/// Map a unique-index violation on `users` to the matching conflict.
fn user_conflict(detail: &str) -> ApiError {
    if detail.contains("email") {
        ApiError::EmailTaken
    } else {
        ApiError::UsernameTaken
    }
}

// ── Car repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCarRepository {
    pub db: DatabaseConnection,
}

impl CarRepository for DbCarRepository {
    async fn create(&self, car: &Car) -> Result<(), ApiError> {
        cars::ActiveModel {
            id: Set(car.id),
            make: Set(car.make.clone()),
            model_name: Set(car.model.clone()),
            year: Set(car.year),
            price: Set(car.price),
            mileage: Set(car.mileage),
            color: Set(car.color.clone()),
            fuel_type: Set(car.fuel_type.clone()),
            transmission: Set(car.transmission.clone()),
            engine_size: Set(car.engine_size),
            horsepower: Set(car.horsepower),
            body_type: Set(car.body_type.clone()),
            description: Set(car.description.clone()),
            image_url: Set(car.image_url.clone()),
            created_at: Set(car.created_at),
            updated_at: Set(car.updated_at),
        }
        .insert(&self.db)
        .await
        .context("insert car")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, ApiError> {
        let model = cars::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find car by id")?;
        Ok(model.map(car_from_model))
    }

    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, ApiError> {
        let condition = Condition::all()
            .add_option(filter.make.clone().map(|v| cars::Column::Make.eq(v)))
            .add_option(filter.body_type.clone().map(|v| cars::Column::BodyType.eq(v)))
            .add_option(filter.fuel_type.clone().map(|v| cars::Column::FuelType.eq(v)))
            .add_option(
                filter
                    .transmission
                    .clone()
                    .map(|v| cars::Column::Transmission.eq(v)),
            )
            .add_option(filter.min_price.map(|v| cars::Column::Price.gte(v)))
            .add_option(filter.max_price.map(|v| cars::Column::Price.lte(v)))
            .add_option(filter.min_year.map(|v| cars::Column::Year.gte(v)))
            .add_option(filter.max_year.map(|v| cars::Column::Year.lte(v)));

        let models = cars::Entity::find()
            .filter(condition)
            .order_by_desc(cars::Column::CreatedAt)
            .order_by_desc(cars::Column::Id)
            .all(&self.db)
            .await
            .context("list cars")?;
        Ok(models.into_iter().map(car_from_model).collect())
    }

    async fn update(&self, id: Uuid, patch: &CarPatch) -> Result<bool, ApiError> {
        let mut query = cars::Entity::update_many()
            .col_expr(cars::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cars::Column::Id.eq(id));
        if let Some(price) = patch.price {
            query = query.col_expr(cars::Column::Price, Expr::value(price));
        }
        if let Some(mileage) = patch.mileage {
            query = query.col_expr(cars::Column::Mileage, Expr::value(mileage));
        }
        if let Some(ref description) = patch.description {
            query = query.col_expr(cars::Column::Description, Expr::value(description.clone()));
        }
        let result = query.exec(&self.db).await.context("update car")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = cars::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete car")?;
        Ok(result.rows_affected > 0)
    }
}

fn car_from_model(m: cars::Model) -> Car {
    Car {
        id: m.id,
        make: m.make,
        model: m.model_name,
        year: m.year,
        price: m.price,
        mileage: m.mileage,
        color: m.color,
        fuel_type: m.fuel_type,
        transmission: m.transmission,
        engine_size: m.engine_size,
        horsepower: m.horsepower,
        body_type: m.body_type,
        description: m.description,
        image_url: m.image_url,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let inserted = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            phone: Set(user.phone.clone()),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(_) => Ok(()),
            Err(e) => match unique_violation(&e) {
                Some(detail) => Err(user_conflict(&detail)),
                None => Err(anyhow::Error::new(e).context("insert user").into()),
            },
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn update(&self, id: Uuid, profile: &ProfileUpdate) -> Result<bool, ApiError> {
        let updated = users::Entity::update_many()
            .col_expr(users::Column::Username, Expr::value(profile.username.clone()))
            .col_expr(users::Column::Email, Expr::value(profile.email.clone()))
            .col_expr(users::Column::FirstName, Expr::value(profile.first_name.clone()))
            .col_expr(users::Column::LastName, Expr::value(profile.last_name.clone()))
            .col_expr(users::Column::Phone, Expr::value(profile.phone.clone()))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await;

        match updated {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) => match unique_violation(&e) {
                Some(detail) => Err(user_conflict(&detail)),
                None => Err(anyhow::Error::new(e).context("update user").into()),
            },
        }
    }
}

fn user_from_model(m: users::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        email: m.email,
        password_hash: m.password_hash,
        first_name: m.first_name,
        last_name: m.last_name,
        phone: m.phone,
        // Unknown roles degrade to the least-privileged one.
        role: m.role.parse().unwrap_or_default(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn add(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        // The (user_id, car_id) unique index is the source of truth; losing a race
        // to a concurrent add is still "already a favorite".
        if self.is_favorite(user_id, car_id).await? {
            return Ok(());
        }
        let inserted = favorites::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            car_id: Set(car_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(_) => Ok(()),
            Err(e) if unique_violation(&e).is_some() => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context("insert favorite").into()),
        }
    }

    async fn remove(&self, user_id: Uuid, car_id: Uuid) -> Result<(), ApiError> {
        favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::CarId.eq(car_id))
            .exec(&self.db)
            .await
            .context("delete favorite")?;
        Ok(())
    }

    async fn list_with_cars(&self, user_id: Uuid) -> Result<Vec<FavoriteWithCar>, ApiError> {
        let rows = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_desc(favorites::Column::CreatedAt)
            .find_also_related(cars::Entity)
            .all(&self.db)
            .await
            .context("list favorites with cars")?;

        Ok(rows
            .into_iter()
            .filter_map(|(favorite, car)| {
                car.map(|car| FavoriteWithCar {
                    favorite: favorite_from_model(favorite),
                    car: car_from_model(car),
                })
            })
            .collect())
    }

    async fn count(&self, user_id: Uuid) -> Result<u64, ApiError> {
        let count = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count favorites")?;
        Ok(count)
    }

    async fn is_favorite(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, ApiError> {
        let count = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::CarId.eq(car_id))
            .count(&self.db)
            .await
            .context("check favorite")?;
        Ok(count > 0)
    }
}

fn favorite_from_model(m: favorites::Model) -> Favorite {
    Favorite {
        id: m.id,
        user_id: m.user_id,
        car_id: m.car_id,
        created_at: m.created_at,
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), ApiError> {
        reviews::ActiveModel {
            id: Set(review.id),
            car_id: Set(review.car_id),
            user_id: Set(review.user_id),
            username: Set(review.username.clone()),
            rating: Set(rating_to_column(review.rating)),
            comment: Set(review.comment.clone()),
            created_at: Set(review.created_at),
            updated_at: Set(review.updated_at),
        }
        .insert(&self.db)
        .await
        .context("insert review")?;
        Ok(())
    }

    async fn car_reviews(&self, car_id: Uuid) -> Result<CarReviews, ApiError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::CarId.eq(car_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list car reviews")?;
        let reviews = models
            .into_iter()
            .map(review_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(CarReviews::aggregate(reviews))
    }

    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<Review>, ApiError> {
        let model = reviews::Entity::find_by_id(review_id)
            .one(&self.db)
            .await
            .context("find review by id")?;
        Ok(model.map(review_from_model).transpose()?)
    }

    async fn update(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        patch: &ReviewPatch,
    ) -> Result<bool, ApiError> {
        let result = reviews::Entity::update_many()
            .col_expr(reviews::Column::Rating, Expr::value(rating_to_column(patch.rating)))
            .col_expr(reviews::Column::Comment, Expr::value(patch.comment.clone()))
            .col_expr(reviews::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reviews::Column::Id.eq(review_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("update review")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, review_id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        let result = reviews::Entity::delete_many()
            .filter(reviews::Column::Id.eq(review_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }
}

fn rating_to_column(rating: Rating) -> i16 {
    // Always 1..=5.
    rating.get() as i16
}

fn review_from_model(m: reviews::Model) -> anyhow::Result<Review> {
    let rating = Rating::new(i32::from(m.rating))
        .with_context(|| format!("review {} has out-of-range rating", m.id))?;
    Ok(Review {
        id: m.id,
        car_id: m.car_id,
        user_id: m.user_id,
        username: m.username,
        rating,
        comment: m.comment,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
