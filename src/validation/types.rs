use crate::model::ReservationId;
use chrono::NaiveTime;
use thiserror::Error;

/// Politique métier appliquée par le pipeline de validation.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub min_duration_hours: f64,
    pub max_duration_hours: f64,
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    /// Fenêtre de réservation à l'avance (en jours) ; `None` = illimitée.
    pub max_advance_days: Option<i64>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_duration_hours: 1.0,
            max_duration_hours: 8.0,
            opening: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            closing: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            max_advance_days: None,
        }
    }
}

/// Motif de rejet d'une demande de réservation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectError {
    #[error("invalid request: {0}")]
    Structural(String),
    #[error("start is in the past")]
    PastStart,
    #[error("start and end must fall within business hours")]
    BusinessHours,
    #[error("duration must be between {min} and {max} hours")]
    DurationOutOfRange { min: f64, max: f64 },
    #[error("bookings open at most {max_days} days in advance")]
    TooFarAhead { max_days: i64 },
    #[error("unknown room: {0}")]
    UnknownRoom(String),
    #[error("conflicts with reservation {0}")]
    Conflict(ReservationId),
}
