use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::user::{KycStatus, UserRole};
use crate::repositories::booking_repository::BookingRepository;
use crate::services::booking_service::BookingService;
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppError};
use crate::utils::validation::validate_date_range;

pub struct BookingController {
    service: BookingService,
    repository: BookingRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: BookingService::new(pool.clone()),
            repository: BookingRepository::new(pool),
        }
    }

    /// Frontera de autorización de la admisión: rol, KYC y auto-reserva se
    /// comprueban aquí, antes de invocar la operación de admisión. La
    /// operación en sí no contiene lógica de roles.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        if validate_date_range(request.start_date, request.end_date).is_err() {
            return Err(validation_error(
                "start_date",
                "start_date must be strictly before end_date",
            ));
        }

        if user.role != UserRole::Renter {
            return Err(forbidden_error(
                "create booking",
                "only renters can book vehicles",
            ));
        }

        if user.kyc_status != KycStatus::Verified {
            return Err(forbidden_error(
                "create booking",
                "KYC verification is required before booking",
            ));
        }

        // Un propietario no reserva su propio vehículo
        let vehicle = self.service.find_vehicle(request.vehicle_id).await?;
        if vehicle.owner_id == user.user_id {
            return Err(forbidden_error(
                "create booking",
                "owners cannot book their own vehicles",
            ));
        }

        let booking = self.service.create_booking(user.user_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        user: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<BookingResponse, AppError> {
        let booking = self.load(booking_id).await?;

        if !Self::is_participant(user, &booking) && user.role != UserRole::Admin {
            return Err(forbidden_error(
                "view booking",
                "only the renter or the owner can view this booking",
            ));
        }

        Ok(booking.into())
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = match user.role {
            UserRole::Renter => self.repository.list_by_renter(user.user_id).await?,
            UserRole::Owner => self.repository.list_by_owner(user.user_id).await?,
            UserRole::Admin => self.repository.list_all().await?,
        };

        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// El propietario acepta la reserva
    pub async fn confirm(
        &self,
        user: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<BookingResponse, AppError> {
        let booking = self.load(booking_id).await?;

        if booking.owner_id != user.user_id {
            return Err(forbidden_error(
                "confirm booking",
                "only the vehicle owner can confirm",
            ));
        }

        self.transition(&booking, BookingStatus::Confirmed).await
    }

    /// El renter confirma el pago de una reserva aceptada
    pub async fn confirm_payment(
        &self,
        user: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<BookingResponse, AppError> {
        let booking = self.load(booking_id).await?;

        if booking.renter_id != user.user_id {
            return Err(forbidden_error(
                "confirm payment",
                "only the renter can confirm payment",
            ));
        }

        self.transition(&booking, BookingStatus::PaymentConfirmed).await
    }

    /// El propietario cierra la reserva al devolverse el vehículo.
    /// Libera el vehículo (is_available vuelve a true).
    pub async fn complete(
        &self,
        user: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<BookingResponse, AppError> {
        let booking = self.load(booking_id).await?;

        if booking.owner_id != user.user_id {
            return Err(forbidden_error(
                "complete booking",
                "only the vehicle owner can complete",
            ));
        }

        self.transition(&booking, BookingStatus::Completed).await
    }

    /// Cualquiera de las dos partes puede cancelar mientras la reserva no
    /// sea terminal. Libera el vehículo (is_available vuelve a true).
    pub async fn cancel(
        &self,
        user: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<BookingResponse, AppError> {
        let booking = self.load(booking_id).await?;

        if !Self::is_participant(user, &booking) {
            return Err(forbidden_error(
                "cancel booking",
                "only the renter or the owner can cancel",
            ));
        }

        self.transition(&booking, BookingStatus::Cancelled).await
    }

    fn is_participant(user: &AuthenticatedUser, booking: &Booking) -> bool {
        booking.renter_id == user.user_id || booking.owner_id == user.user_id
    }

    async fn load(&self, booking_id: Uuid) -> Result<Booking, AppError> {
        self.repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))
    }

    async fn transition(
        &self,
        booking: &Booking,
        next: BookingStatus,
    ) -> Result<BookingResponse, AppError> {
        let current = booking.status().ok_or_else(|| {
            AppError::Internal(format!("Unknown booking status '{}'", booking.status))
        })?;

        if !current.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Booking cannot transition from {} to {}",
                current.as_str(),
                next.as_str()
            )));
        }

        let updated = self.repository.transition(booking, next).await?;
        Ok(updated.into())
    }
}
