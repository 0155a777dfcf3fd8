//! Servicio de admisión de reservas
//!
//! Este módulo contiene la lógica de negocio de la admisión: validación del
//! rango de fechas, recálculo del precio en el servidor y la puerta de
//! disponibilidad. La puerta es el flag booleano del vehículo, no un chequeo
//! de solapamiento de intervalos: mientras el flag no se restaure, el
//! vehículo no admite ninguna otra reserva aunque las fechas no se solapen.
//!
//! La secuencia leer-comprobar-escribir sobre el flag es atómica por
//! vehículo. El `BookingStore` encapsula esa disciplina de bloqueo; la
//! implementación de producción es el repositorio sobre PostgreSQL con
//! `SELECT ... FOR UPDATE`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::booking_dto::CreateBookingRequest;
use crate::models::booking::Booking;
use crate::models::vehicle::Vehicle;
use crate::repositories::booking_repository::BookingRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{validate_date_range, validate_non_negative};

/// Persistencia de la admisión. `admit` es atómico respecto a admisiones
/// concurrentes del mismo vehículo: la comprobación del flag y sus dos
/// escrituras (insert del booking, flag a false) ocurren bajo el mismo
/// candado o transacción.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError>;

    async fn admit(
        &self,
        renter_id: Uuid,
        request: &CreateBookingRequest,
        total_price: Decimal,
    ) -> Result<Booking, AppError>;
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        BookingRepository::find_vehicle(self, vehicle_id).await
    }

    async fn admit(
        &self,
        renter_id: Uuid,
        request: &CreateBookingRequest,
        total_price: Decimal,
    ) -> Result<Booking, AppError> {
        BookingRepository::admit(
            self,
            renter_id,
            request.vehicle_id,
            request.start_date,
            request.end_date,
            total_price,
            request.needs_delivery,
        )
        .await
    }
}

/// Días de alquiler facturables: cada día empezado cuenta entero
pub fn rental_duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    (seconds + 86_399) / 86_400
}

/// Recalcular el precio total en el servidor a partir de las tarifas del
/// vehículo. Cada bloque completo de 30 días se factura a tarifa mensual si
/// el vehículo la tiene; el resto a tarifa diaria.
pub fn compute_total_price(
    daily_price: Decimal,
    monthly_price: Option<Decimal>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Decimal {
    let days = rental_duration_days(start, end);

    if let Some(monthly) = monthly_price {
        if days >= 30 && monthly > Decimal::ZERO {
            let blocks = days / 30;
            let rest = days % 30;
            return monthly * Decimal::from(blocks) + daily_price * Decimal::from(rest);
        }
    }

    daily_price * Decimal::from(days)
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: Arc::new(BookingRepository::new(pool)),
        }
    }

    /// Construir el servicio sobre un store alternativo
    pub fn with_store(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Vehicle, AppError> {
        self.store
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    /// Operación de admisión de una reserva.
    ///
    /// 1. Validar el rango de fechas antes de tocar la persistencia.
    /// 2. Buscar el vehículo; ausente => NotFound.
    /// 3. Recalcular el total y contrastarlo con el enviado por el cliente.
    /// 4. Admitir atómicamente: con flag en false => Conflict
    ///    "Vehicle is not available"; si no, booking en PENDING y flag a
    ///    false.
    pub async fn create_booking(
        &self,
        renter_id: Uuid,
        request: &CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        if validate_date_range(request.start_date, request.end_date).is_err() {
            return Err(validation_error(
                "start_date",
                "start_date must be strictly before end_date",
            ));
        }

        if validate_non_negative(request.total_price).is_err() {
            return Err(validation_error(
                "total_price",
                "total_price must be non-negative",
            ));
        }

        let vehicle = self.find_vehicle(request.vehicle_id).await?;

        let total_price = compute_total_price(
            vehicle.daily_price,
            vehicle.monthly_price,
            request.start_date,
            request.end_date,
        );

        if request.total_price != total_price {
            return Err(validation_error(
                "total_price",
                "total_price does not match vehicle pricing for the requested dates",
            ));
        }

        self.store.admit(renter_id, request, total_price).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    struct MemoryInner {
        vehicles: HashMap<Uuid, Vehicle>,
        bookings: Vec<Booking>,
    }

    /// Store en memoria con la misma disciplina de bloqueo que el
    /// repositorio: la comprobación del flag y las dos escrituras ocurren
    /// bajo un único candado.
    struct MemoryStore {
        inner: Mutex<MemoryInner>,
    }

    impl MemoryStore {
        fn new(vehicles: Vec<Vehicle>) -> Self {
            Self {
                inner: Mutex::new(MemoryInner {
                    vehicles: vehicles.into_iter().map(|v| (v.id, v)).collect(),
                    bookings: Vec::new(),
                }),
            }
        }

        async fn bookings(&self) -> Vec<Booking> {
            self.inner.lock().await.bookings.clone()
        }

        async fn vehicle(&self, id: Uuid) -> Option<Vehicle> {
            self.inner.lock().await.vehicles.get(&id).cloned()
        }
    }

    #[async_trait]
    impl BookingStore for MemoryStore {
        async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError> {
            Ok(self.inner.lock().await.vehicles.get(&vehicle_id).cloned())
        }

        async fn admit(
            &self,
            renter_id: Uuid,
            request: &CreateBookingRequest,
            total_price: Decimal,
        ) -> Result<Booking, AppError> {
            let mut inner = self.inner.lock().await;

            let vehicle = inner
                .vehicles
                .get_mut(&request.vehicle_id)
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

            if !vehicle.is_available {
                return Err(AppError::Conflict("Vehicle is not available".to_string()));
            }

            let owner_id = vehicle.owner_id;
            vehicle.is_available = false;

            let booking = Booking {
                id: Uuid::new_v4(),
                vehicle_id: request.vehicle_id,
                renter_id,
                owner_id,
                status: "pending".to_string(),
                start_date: request.start_date,
                end_date: request.end_date,
                total_price,
                needs_delivery: request.needs_delivery,
                created_at: Utc::now(),
            };
            inner.bookings.push(booking.clone());

            Ok(booking)
        }
    }

    fn vehicle_with_prices(daily: i64, monthly: Option<i64>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Toyota Corolla 2022".to_string(),
            location: "Dakar".to_string(),
            daily_price: Decimal::from(daily),
            monthly_price: monthly.map(Decimal::from),
            is_available: true,
            created_at: Utc::now(),
        }
    }

    fn march(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 0, 0, 0).unwrap()
    }

    fn request_for(vehicle_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>, total: i64) -> CreateBookingRequest {
        CreateBookingRequest {
            vehicle_id,
            start_date: start,
            end_date: end,
            needs_delivery: false,
            total_price: Decimal::from(total),
        }
    }

    #[test]
    fn test_duration_counts_started_days() {
        assert_eq!(rental_duration_days(march(1), march(2)), 1);
        assert_eq!(rental_duration_days(march(1), march(8)), 7);
        // día y medio factura dos días
        let end = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        assert_eq!(rental_duration_days(march(1), end), 2);
    }

    #[test]
    fn test_price_daily_rate() {
        let total = compute_total_price(Decimal::from(3000), None, march(1), march(2));
        assert_eq!(total, Decimal::from(3000));

        let total = compute_total_price(Decimal::from(3000), None, march(1), march(8));
        assert_eq!(total, Decimal::from(21_000));
    }

    #[test]
    fn test_price_monthly_blocks_plus_daily_rest() {
        let start = march(1);
        let end = Utc.with_ymd_and_hms(2026, 4, 2, 0, 0, 0).unwrap(); // 32 días
        let total =
            compute_total_price(Decimal::from(3000), Some(Decimal::from(60_000)), start, end);
        assert_eq!(total, Decimal::from(60_000 + 2 * 3000));
    }

    #[test]
    fn test_price_monthly_rate_ignored_below_thirty_days() {
        let total = compute_total_price(
            Decimal::from(3000),
            Some(Decimal::from(60_000)),
            march(1),
            march(8),
        );
        assert_eq!(total, Decimal::from(21_000));
    }

    #[tokio::test]
    async fn test_admission_reserves_vehicle() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let owner_id = vehicle.owner_id;
        let store = Arc::new(MemoryStore::new(vec![vehicle]));
        let service = BookingService::with_store(store.clone());

        let renter_id = Uuid::new_v4();
        let booking = service
            .create_booking(renter_id, &request_for(vehicle_id, march(1), march(2), 3000))
            .await
            .unwrap();

        assert_eq!(booking.status, "pending");
        assert_eq!(booking.renter_id, renter_id);
        assert_eq!(booking.owner_id, owner_id);
        assert_eq!(booking.total_price, Decimal::from(3000));
        assert!(!store.vehicle(vehicle_id).await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_unavailable_vehicle_is_rejected() {
        let mut vehicle = vehicle_with_prices(3000, None);
        vehicle.is_available = false;
        let vehicle_id = vehicle.id;
        let store = Arc::new(MemoryStore::new(vec![vehicle]));
        let service = BookingService::with_store(store.clone());

        let err = service
            .create_booking(Uuid::new_v4(), &request_for(vehicle_id, march(1), march(2), 3000))
            .await
            .unwrap_err();

        match err {
            AppError::Conflict(msg) => assert_eq!(msg, "Vehicle is not available"),
            other => panic!("expected Conflict, got {:?}", other),
        }
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_rejected() {
        let store = Arc::new(MemoryStore::new(vec![]));
        let service = BookingService::with_store(store.clone());

        let err = service
            .create_booking(Uuid::new_v4(), &request_for(Uuid::new_v4(), march(1), march(2), 3000))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_inverted_dates_rejected_before_store() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let store = Arc::new(MemoryStore::new(vec![vehicle]));
        let service = BookingService::with_store(store.clone());

        let err = service
            .create_booking(Uuid::new_v4(), &request_for(vehicle_id, march(2), march(1), 3000))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        // nada llegó a la persistencia
        assert!(store.bookings().await.is_empty());
        assert!(store.vehicle(vehicle_id).await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_equal_dates_rejected() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let service = BookingService::with_store(Arc::new(MemoryStore::new(vec![vehicle])));

        let err = service
            .create_booking(Uuid::new_v4(), &request_for(vehicle_id, march(1), march(1), 0))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_client_price_mismatch_rejected() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let store = Arc::new(MemoryStore::new(vec![vehicle]));
        let service = BookingService::with_store(store.clone());

        let err = service
            .create_booking(Uuid::new_v4(), &request_for(vehicle_id, march(1), march(2), 9999))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.vehicle(vehicle_id).await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_negative_client_price_rejected() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let service = BookingService::with_store(Arc::new(MemoryStore::new(vec![vehicle])));

        let mut request = request_for(vehicle_id, march(1), march(2), 0);
        request.total_price = Decimal::from(-3000);

        let err = service
            .create_booking(Uuid::new_v4(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    /// Dos admisiones concurrentes sobre el mismo vehículo disponible:
    /// exactamente una gana, la otra observa Conflict.
    #[tokio::test]
    async fn test_concurrent_admissions_single_winner() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let store = Arc::new(MemoryStore::new(vec![vehicle]));
        let service = Arc::new(BookingService::with_store(store.clone()));

        let first = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_booking(Uuid::new_v4(), &request_for(vehicle_id, march(1), march(2), 3000))
                    .await
            })
        };
        let second = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_booking(Uuid::new_v4(), &request_for(vehicle_id, march(3), march(4), 3000))
                    .await
            })
        };

        let results = vec![first.await.unwrap(), second.await.unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);

        let loser = results.into_iter().find(|r| r.is_err()).unwrap().unwrap_err();
        match loser {
            AppError::Conflict(msg) => assert_eq!(msg, "Vehicle is not available"),
            other => panic!("expected Conflict, got {:?}", other),
        }

        assert_eq!(store.bookings().await.len(), 1);
        assert!(!store.vehicle(vehicle_id).await.unwrap().is_available);
    }

    /// Escenario completo: R1 reserva V1 a 3000/día por un día; la segunda
    /// petición de R2 sobre el mismo vehículo choca con la puerta aunque
    /// pida otras fechas.
    #[tokio::test]
    async fn test_second_renter_conflicts_after_admission() {
        let vehicle = vehicle_with_prices(3000, None);
        let vehicle_id = vehicle.id;
        let store = Arc::new(MemoryStore::new(vec![vehicle]));
        let service = BookingService::with_store(store.clone());

        let r1 = Uuid::new_v4();
        let booking = service
            .create_booking(r1, &request_for(vehicle_id, march(1), march(2), 3000))
            .await
            .unwrap();
        assert_eq!(booking.status, "pending");
        assert_eq!(booking.total_price, Decimal::from(3000));
        assert!(!store.vehicle(vehicle_id).await.unwrap().is_available);

        let r2 = Uuid::new_v4();
        let err = service
            .create_booking(r2, &request_for(vehicle_id, march(10), march(11), 3000))
            .await
            .unwrap_err();
        match err {
            AppError::Conflict(msg) => assert_eq!(msg, "Vehicle is not available"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }
}
