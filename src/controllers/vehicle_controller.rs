use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters, VehicleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{forbidden_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    bookings: BookingRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if user.role != UserRole::Owner {
            return Err(forbidden_error(
                "create vehicle",
                "only owners can publish vehicles",
            ));
        }

        let vehicle = self
            .repository
            .create(
                user.user_id,
                request.title,
                request.location,
                request.daily_price,
                request.monthly_price,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo publicado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list(&filters).await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if user.role != UserRole::Owner {
            return Err(forbidden_error(
                "update vehicle",
                "only owners can manage vehicles",
            ));
        }

        let vehicle = self
            .repository
            .update(
                id,
                user.user_id,
                request.title,
                request.location,
                request.daily_price,
                request.monthly_price,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        if user.role != UserRole::Owner {
            return Err(forbidden_error(
                "delete vehicle",
                "only owners can manage vehicles",
            ));
        }

        // Con una reserva sin resolver el vehículo no puede retirarse
        if self.bookings.has_active_booking(id).await? {
            return Err(AppError::Conflict(
                "Vehicle has an active booking".to_string(),
            ));
        }

        self.repository.delete(id, user.user_id).await?;
        Ok(())
    }
}
