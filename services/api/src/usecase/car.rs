use uuid::Uuid;

use crate::domain::repository::CarRepository;
use crate::domain::types::{Car, CarFilter, CarPatch, NewCar};
use crate::error::ApiError;
use crate::usecase::now;

// ── CreateCar ────────────────────────────────────────────────────────────────

pub struct CreateCarUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> CreateCarUseCase<R> {
    pub async fn execute(&self, input: NewCar) -> Result<Car, ApiError> {
        input.validate().map_err(ApiError::InvalidCar)?;
        let car = input.into_car(Uuid::now_v7(), now());
        self.repo.create(&car).await?;
        tracing::info!(car_id = %car.id, make = %car.make, model = %car.model, "car created");
        Ok(car)
    }
}

// ── GetCar ───────────────────────────────────────────────────────────────────

pub struct GetCarUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> GetCarUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Car, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CarNotFound)
    }
}

// ── ListCars ─────────────────────────────────────────────────────────────────

pub struct ListCarsUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> ListCarsUseCase<R> {
    pub async fn execute(&self, filter: &CarFilter) -> Result<Vec<Car>, ApiError> {
        self.repo.list(filter).await
    }
}

// ── UpdateCar ────────────────────────────────────────────────────────────────

pub struct UpdateCarUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> UpdateCarUseCase<R> {
    pub async fn execute(&self, id: Uuid, patch: CarPatch) -> Result<(), ApiError> {
        if let Some(price) = patch.price {
            if price.is_nan() || price <= 0.0 {
                return Err(ApiError::InvalidCar("price must be greater than 0"));
            }
        }
        if !self.repo.update(id, &patch).await? {
            return Err(ApiError::CarNotFound);
        }
        Ok(())
    }
}

// ── DeleteCar ────────────────────────────────────────────────────────────────

pub struct DeleteCarUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> DeleteCarUseCase<R> {
    /// Reviews and favorites of the car are left in place.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::CarNotFound);
        }
        tracing::info!(car_id = %id, "car deleted");
        Ok(())
    }
}
