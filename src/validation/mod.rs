mod rules;
mod types;

pub use rules::{
    AdvanceWindowRule, BusinessHoursRule, DurationRule, OverlapRule, PastStartRule, RoomExistsRule,
};
pub use types::{Policy, RejectError};

use crate::model::{Reservation, RoomCatalog};
use chrono::NaiveDateTime;

/// Contexte d'évaluation passé explicitement : l'horloge est injectée,
/// jamais lue globalement, pour des tests déterministes.
pub struct ValidationContext<'a> {
    pub now: NaiveDateTime,
    pub rooms: &'a RoomCatalog,
    /// Réservations existantes de la salle candidate.
    pub existing: &'a [Reservation],
}

/// Règle métier indépendante ; chaque règle suppose que les précédentes
/// du pipeline ont déjà accepté la demande.
pub trait Rule {
    fn name(&self) -> &'static str;
    fn check(
        &self,
        candidate: &Reservation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError>;
}

/// Pipeline ordonné de règles : la première violation court-circuite.
///
/// Le validateur est sans état ; tout le contexte arrive par
/// `ValidationContext`. De nouvelles règles s'ajoutent via [`Validator::push`]
/// sans toucher aux existantes.
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    pub fn new(policy: Policy) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = vec![Box::new(PastStartRule)];
        if policy.max_advance_days.is_some() {
            rules.push(Box::new(AdvanceWindowRule::new(policy)));
        }
        rules.push(Box::new(BusinessHoursRule::new(policy)));
        rules.push(Box::new(DurationRule::new(policy)));
        rules.push(Box::new(RoomExistsRule));
        rules.push(Box::new(OverlapRule));
        Self { rules }
    }

    /// Ajoute une règle en fin de pipeline.
    pub fn push(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn check(
        &self,
        candidate: &Reservation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), RejectError> {
        for rule in &self.rules {
            rule.check(candidate, ctx)?;
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}
