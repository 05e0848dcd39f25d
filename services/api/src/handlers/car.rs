use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::Store;
use crate::domain::types::{Car, CarFilter, CarPatch, NewCar};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, parse_id};
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::car::{
    CreateCarUseCase, DeleteCarUseCase, GetCarUseCase, ListCarsUseCase, UpdateCarUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub body_type: String,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub horsepower: i32,
    pub engine_size: f64,
    pub description: String,
    pub image_url: String,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            make: car.make,
            model: car.model,
            year: car.year,
            price: car.price,
            mileage: car.mileage,
            body_type: car.body_type,
            fuel_type: car.fuel_type,
            transmission: car.transmission,
            color: car.color,
            horsepower: car.horsepower,
            engine_size: car.engine_size,
            description: car.description,
            image_url: car.image_url,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateCarRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub body_type: String,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub horsepower: i32,
    pub engine_size: f64,
    pub description: String,
    pub image_url: String,
}

impl From<CreateCarRequest> for NewCar {
    fn from(req: CreateCarRequest) -> Self {
        Self {
            make: req.make,
            model: req.model,
            year: req.year,
            price: req.price,
            mileage: req.mileage,
            color: req.color,
            fuel_type: req.fuel_type,
            transmission: req.transmission,
            engine_size: req.engine_size,
            horsepower: req.horsepower,
            body_type: req.body_type,
            description: req.description,
            image_url: req.image_url,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateCarRequest {
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub description: Option<String>,
}

/// Raw list filters. Values stay strings so an empty parameter can mean "no
/// constraint"; numbers are parsed in [`CarListQuery::into_filter`].
///
/// Each multi-word filter is accepted in snake_case and camelCase. When both
/// spellings are sent the non-empty snake_case one wins.
#[derive(Deserialize, Default)]
pub struct CarListQuery {
    pub make: Option<String>,
    pub body_type: Option<String>,
    #[serde(rename = "bodyType")]
    pub body_type_camel: Option<String>,
    pub fuel_type: Option<String>,
    #[serde(rename = "fuelType")]
    pub fuel_type_camel: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price_camel: Option<String>,
    pub max_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price_camel: Option<String>,
    pub min_year: Option<String>,
    #[serde(rename = "minYear")]
    pub min_year_camel: Option<String>,
    pub max_year: Option<String>,
    #[serde(rename = "maxYear")]
    pub max_year_camel: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn either(snake: Option<String>, camel: Option<String>) -> Option<String> {
    present(snake).or_else(|| present(camel))
}

fn number<T: FromStr>(value: Option<String>) -> Result<Option<T>, ApiError> {
    present(value)
        .map(|v| v.parse().map_err(|_| ApiError::InvalidQuery))
        .transpose()
}

impl CarListQuery {
    pub fn into_filter(self) -> Result<CarFilter, ApiError> {
        Ok(CarFilter {
            make: present(self.make),
            body_type: either(self.body_type, self.body_type_camel),
            fuel_type: either(self.fuel_type, self.fuel_type_camel),
            transmission: present(self.transmission),
            min_price: number(either(self.min_price, self.min_price_camel))?,
            max_price: number(either(self.max_price, self.max_price_camel))?,
            min_year: number(either(self.min_year, self.min_year_camel))?,
            max_year: number(either(self.max_year, self.max_year_camel))?,
        })
    }
}

/// A car id that does not parse cannot name a stored car.
fn car_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_id(raw, ApiError::CarNotFound)
}

// ── GET /api/cars ────────────────────────────────────────────────────────────

pub async fn list_cars<S: Store>(
    State(state): State<AppState<S>>,
    ApiQuery(query): ApiQuery<CarListQuery>,
) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let filter = query.into_filter()?;
    let uc = ListCarsUseCase {
        repo: state.car_repo(),
    };
    let cars = uc.execute(&filter).await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

// ── POST /api/cars ───────────────────────────────────────────────────────────

pub async fn create_car<S: Store>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), ApiError> {
    let uc = CreateCarUseCase {
        repo: state.car_repo(),
    };
    let car = uc.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(car.into())))
}

// ── GET /api/cars/{id} ───────────────────────────────────────────────────────

pub async fn get_car<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<CarResponse>, ApiError> {
    let uc = GetCarUseCase {
        repo: state.car_repo(),
    };
    let car = uc.execute(car_id(&id)?).await?;
    Ok(Json(car.into()))
}

// ── PUT /api/cars/{id} ───────────────────────────────────────────────────────

pub async fn update_car<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateCarRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let uc = UpdateCarUseCase {
        repo: state.car_repo(),
    };
    let patch = CarPatch {
        price: body.price,
        mileage: body.mileage,
        description: body.description,
    };
    uc.execute(car_id(&id)?, patch).await?;
    Ok(MessageResponse::new("Car updated successfully"))
}

// ── DELETE /api/cars/{id} ────────────────────────────────────────────────────

pub async fn delete_car<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let uc = DeleteCarUseCase {
        repo: state.car_repo(),
    };
    uc.execute(car_id(&id)?).await?;
    Ok(MessageResponse::new("Car deleted successfully"))
}
