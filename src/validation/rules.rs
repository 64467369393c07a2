use super::{Policy, RejectError, Rule, ValidationContext};
use crate::model::Reservation;
use chrono::NaiveTime;

/// Le début ne doit pas être strictement avant l'instant d'évaluation.
pub struct PastStartRule;

impl Rule for PastStartRule {
    fn name(&self) -> &'static str {
        "past_start"
    }
    fn check(
        &self,
        candidate: &Reservation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        if candidate.start < ctx.now {
            return Err(RejectError::PastStart);
        }
        Ok(())
    }
}

/// Fenêtre de réservation à l'avance (optionnelle).
pub struct AdvanceWindowRule {
    max_days: i64,
}

impl AdvanceWindowRule {
    pub fn new(policy: Policy) -> Self {
        Self {
            max_days: policy.max_advance_days.unwrap_or(90),
        }
    }
}

impl Rule for AdvanceWindowRule {
    fn name(&self) -> &'static str {
        "advance_window"
    }
    fn check(
        &self,
        candidate: &Reservation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        let days_ahead = (candidate.start.date() - ctx.now.date()).num_days();
        if days_ahead > self.max_days {
            return Err(RejectError::TooFarAhead {
                max_days: self.max_days,
            });
        }
        Ok(())
    }
}

/// Début et fin dans les horaires d'ouverture, le même jour.
/// Finir exactement à la fermeture est permis ; commencer à la fermeture non.
pub struct BusinessHoursRule {
    opening: NaiveTime,
    closing: NaiveTime,
}

impl BusinessHoursRule {
    pub fn new(policy: Policy) -> Self {
        Self {
            opening: policy.opening,
            closing: policy.closing,
        }
    }
}

impl Rule for BusinessHoursRule {
    fn name(&self) -> &'static str {
        "business_hours"
    }
    fn check(
        &self,
        candidate: &Reservation,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        let start = candidate.start;
        if start.time() < self.opening || start.time() >= self.closing {
            return Err(RejectError::BusinessHours);
        }
        let end = candidate.end();
        if end.date() != start.date() || end.time() > self.closing {
            return Err(RejectError::BusinessHours);
        }
        Ok(())
    }
}

/// Durée dans les bornes métier (1 à 8 heures par défaut), bornes incluses.
pub struct DurationRule {
    min: f64,
    max: f64,
}

impl DurationRule {
    pub fn new(policy: Policy) -> Self {
        Self {
            min: policy.min_duration_hours,
            max: policy.max_duration_hours,
        }
    }
}

impl Rule for DurationRule {
    fn name(&self) -> &'static str {
        "duration"
    }
    fn check(
        &self,
        candidate: &Reservation,
        _ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        if candidate.duration_hours < self.min || candidate.duration_hours > self.max {
            return Err(RejectError::DurationOutOfRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// La salle demandée doit exister dans le catalogue.
pub struct RoomExistsRule;

impl Rule for RoomExistsRule {
    fn name(&self) -> &'static str {
        "room_exists"
    }
    fn check(
        &self,
        candidate: &Reservation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        if ctx.rooms.find(&candidate.room_id).is_none() {
            return Err(RejectError::UnknownRoom(candidate.room_id.to_string()));
        }
        Ok(())
    }
}

/// Aucun chevauchement avec les réservations existantes de la salle.
/// Le rejet nomme la réservation en conflit.
pub struct OverlapRule;

impl Rule for OverlapRule {
    fn name(&self) -> &'static str {
        "overlap"
    }
    fn check(
        &self,
        candidate: &Reservation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        for existing in ctx.existing {
            if existing.id != candidate.id && existing.overlaps(candidate) {
                return Err(RejectError::Conflict(existing.id.clone()));
            }
        }
        Ok(())
    }
}
