#![forbid(unsafe_code)]
//! Resalle — bibliothèque de réservation de salles locale (sans BD).
//!
//! - Stockage fichiers (instantané JSON réécrit en entier à chaque mutation).
//! - Pipeline de validation : horaires d'ouverture, durée, conflits.
//! - Notifications en éventail (console, email/SMS simulés).
//! - Heure locale naïve, granularité minute ; saisie "YYYY-MM-DD HH:MM".

pub mod io;
pub mod model;
pub mod notification;
pub mod service;
pub mod storage;
pub mod validation;

pub use model::{build_room, Reservation, ReservationId, Room, RoomCatalog, RoomId, RoomKind};
pub use notification::{
    ConsoleNotifier, DispatchOutcome, Dispatcher, EmailNotifier, MessageRenderer, Notifier,
    NotifyError, SmsNotifier, TextMessage,
};
pub use service::{ReservationRequest, ReservationService, ServiceError};
pub use storage::{JsonStore, MemoryStore, ReservationStore, StorageError};
pub use validation::{Policy, RejectError, Rule, ValidationContext, Validator};
