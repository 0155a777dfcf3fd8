use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Admitir una reserva: comprobar disponibilidad, insertar el booking en
    /// PENDING y marcar el vehículo como no disponible, todo en una sola
    /// transacción. El `FOR UPDATE` sobre la fila del vehículo serializa las
    /// admisiones concurrentes del mismo vehículo: como máximo una gana, el
    /// resto observa Conflict.
    pub async fn admit(
        &self,
        renter_id: Uuid,
        vehicle_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        total_price: Decimal,
        needs_delivery: bool,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(vehicle_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if !vehicle.is_available {
            return Err(AppError::Conflict("Vehicle is not available".to_string()));
        }

        // owner_id se desnormaliza desde el vehículo en el momento de la admisión
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (id, vehicle_id, renter_id, owner_id, status, start_date, end_date, total_price, needs_delivery, created_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(renter_id)
        .bind(vehicle.owner_id)
        .bind(start_date)
        .bind(end_date)
        .bind(total_price)
        .bind(needs_delivery)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE vehicles SET is_available = FALSE WHERE id = $1")
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn list_by_renter(&self, renter_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE renter_id = $1 ORDER BY created_at DESC",
        )
        .bind(renter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Aplicar una transición de estado. Cuando la transición libera el
    /// vehículo (cancelar/completar), la restauración de `is_available` va en
    /// la misma transacción que el cambio de estado.
    pub async fn transition(
        &self,
        booking: &Booking,
        next: BookingStatus,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(booking.id)
        .bind(next.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if next.releases_vehicle() {
            sqlx::query("UPDATE vehicles SET is_available = TRUE WHERE id = $1")
                .bind(booking.vehicle_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    /// ¿Tiene el vehículo algún booking sin resolver (no terminal)?
    pub async fn has_active_booking(&self, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE vehicle_id = $1 AND status NOT IN ('completed', 'cancelled')
            )
            "#,
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
