use crate::model::{Reservation, ReservationId, RoomCatalog, RoomId};
use crate::notification::{DispatchOutcome, Dispatcher};
use crate::storage::{ReservationStore, StorageError};
use crate::validation::{Policy, RejectError, ValidationContext, Validator};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Demande de réservation telle que reçue de l'extérieur (CLI, démo).
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub room_id: String,
    pub requester: String,
    pub start: NaiveDateTime,
    pub duration_hours: f64,
    pub purpose: Option<String>,
}

/// Issue d'une opération de la façade. `Storage` est la seule variante
/// potentiellement fatale à l'opération ; les rejets métier et le
/// "non trouvé" sont des issues attendues sur lesquelles brancher.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Rejected(#[from] RejectError),
    #[error("reservation not found: {0}")]
    NotFound(ReservationId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Façade de réservation : validation → persistance → notification.
///
/// Contexte explicite (catalogue + store + dispatcher) fourni à la
/// construction, pas d'état global : chaque test isole sa propre instance.
pub struct ReservationService {
    rooms: RoomCatalog,
    store: Box<dyn ReservationStore>,
    dispatcher: Dispatcher,
    validator: Validator,
}

impl ReservationService {
    pub fn new(rooms: RoomCatalog, store: Box<dyn ReservationStore>, dispatcher: Dispatcher) -> Self {
        Self::with_policy(rooms, store, dispatcher, Policy::default())
    }

    pub fn with_policy(
        rooms: RoomCatalog,
        store: Box<dyn ReservationStore>,
        dispatcher: Dispatcher,
        policy: Policy,
    ) -> Self {
        Self {
            rooms,
            store,
            dispatcher,
            validator: Validator::new(policy),
        }
    }

    pub fn rooms(&self) -> &RoomCatalog {
        &self.rooms
    }

    /// Crée une réservation. Tout rejet du pipeline est renvoyé tel quel,
    /// sans persistance ni notification (aucun effet partiel). `now` est
    /// l'instant d'évaluation, injecté par l'appelant.
    pub fn create(
        &self,
        request: ReservationRequest,
        now: NaiveDateTime,
    ) -> Result<Reservation, ServiceError> {
        let candidate = Reservation::new(
            RoomId::new(&request.room_id),
            &request.requester,
            request.start,
            request.duration_hours,
            request.purpose,
        )
        .map_err(RejectError::Structural)?;

        let existing = self.store.find_by_room(&candidate.room_id)?;
        let ctx = ValidationContext {
            now,
            rooms: &self.rooms,
            existing: &existing,
        };
        self.validator.check(&candidate, &ctx)?;

        self.store.insert(&candidate)?;
        self.report(self.dispatcher.created(&candidate));
        Ok(candidate)
    }

    /// Annule par identifiant : suppression puis notification, séquentielles
    /// et best-effort (une notification en échec n'invalide pas l'annulation).
    pub fn cancel(&self, id: &ReservationId) -> Result<(), ServiceError> {
        if self.store.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound(id.clone()));
        }
        self.store.delete_by_id(id)?;
        self.report(self.dispatcher.cancelled(id));
        Ok(())
    }

    /// Lecture pure, ordre d'insertion.
    pub fn list_all(&self) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.store.list_all()?)
    }

    /// Lecture pure, réservations d'une seule salle.
    pub fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.store.find_by_room(room_id)?)
    }

    /// Les échecs de canaux sont avalés ici : purement diagnostiques.
    fn report(&self, outcomes: Vec<DispatchOutcome>) {
        for outcome in outcomes {
            if let Err(_err) = outcome.result {
                #[cfg(feature = "logging")]
                tracing::warn!(
                    channel = outcome.channel,
                    error = %_err,
                    "notification channel failed"
                );
            }
        }
    }
}
