use crate::model::{Reservation, ReservationId};
use thiserror::Error;

/// Échec d'un canal de notification. Jamais fatal pour l'appelant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("channel failure: {0}")]
    Channel(String),
}

/// Permet de customiser le rendu du message (texte, mail, SMS...).
pub trait MessageRenderer {
    fn render_created(&self, reservation: &Reservation) -> String;
    fn render_cancelled(&self, id: &ReservationId) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMessage;

impl MessageRenderer for TextMessage {
    fn render_created(&self, reservation: &Reservation) -> String {
        format!(
            "Bonjour {name},\n\nVotre réservation {id} pour la salle {room} est confirmée, du {start} au {end}.\n",
            name = reservation.requester,
            id = reservation.id,
            room = reservation.room_id,
            start = reservation.start.format("%Y-%m-%d %H:%M"),
            end = reservation.end().format("%Y-%m-%d %H:%M"),
        )
    }

    fn render_cancelled(&self, id: &ReservationId) -> String {
        format!("La réservation {id} a été annulée.\n")
    }
}

/// Canal de notification abonné aux événements de réservation.
pub trait Notifier {
    fn name(&self) -> &'static str;
    fn notify_created(&self, reservation: &Reservation) -> Result<(), NotifyError>;
    fn notify_cancelled(&self, id: &ReservationId) -> Result<(), NotifyError>;
}

/// Canal console : écrit sur la sortie standard, réussit toujours.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    fn notify_created(&self, reservation: &Reservation) -> Result<(), NotifyError> {
        println!(
            "[console] réservation confirmée : {} | salle {} | {} → {} | {}",
            reservation.id,
            reservation.room_id,
            reservation.start.format("%Y-%m-%d %H:%M"),
            reservation.end().format("%H:%M"),
            reservation.requester,
        );
        Ok(())
    }

    fn notify_cancelled(&self, id: &ReservationId) -> Result<(), NotifyError> {
        println!("[console] réservation annulée : {id}");
        Ok(())
    }
}

/// Canal email simulé : aucun transport réel, le message est rendu puis
/// affiché comme s'il partait via `smtp_server`.
pub struct EmailNotifier {
    smtp_server: String,
    renderer: Box<dyn MessageRenderer>,
}

impl EmailNotifier {
    pub fn new<S: Into<String>>(smtp_server: S) -> Self {
        Self {
            smtp_server: smtp_server.into(),
            renderer: Box::new(TextMessage),
        }
    }

    pub fn with_renderer<S: Into<String>>(
        smtp_server: S,
        renderer: Box<dyn MessageRenderer>,
    ) -> Self {
        Self {
            smtp_server: smtp_server.into(),
            renderer,
        }
    }
}

impl Notifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    fn notify_created(&self, reservation: &Reservation) -> Result<(), NotifyError> {
        println!(
            "[email via {}] {}",
            self.smtp_server,
            self.renderer.render_created(reservation)
        );
        Ok(())
    }

    fn notify_cancelled(&self, id: &ReservationId) -> Result<(), NotifyError> {
        println!(
            "[email via {}] {}",
            self.smtp_server,
            self.renderer.render_cancelled(id)
        );
        Ok(())
    }
}

/// Canal SMS simulé : message court, aucun transport réel.
pub struct SmsNotifier {
    api_key: String,
}

impl SmsNotifier {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl Notifier for SmsNotifier {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn notify_created(&self, reservation: &Reservation) -> Result<(), NotifyError> {
        println!(
            "[sms ({})] Réservation confirmée : {} le {} (réf {})",
            self.api_key,
            reservation.room_id,
            reservation.start.format("%Y-%m-%d %H:%M"),
            reservation.id,
        );
        Ok(())
    }

    fn notify_cancelled(&self, id: &ReservationId) -> Result<(), NotifyError> {
        println!("[sms ({})] Réservation {} annulée", self.api_key, id);
        Ok(())
    }
}

/// Résultat individuel d'un canal, collecté à fin de diagnostic.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub channel: &'static str,
    pub result: Result<(), NotifyError>,
}

/// Diffusion en éventail vers les canaux abonnés.
///
/// La boucle capture chaque résultat sans s'interrompre : un canal en échec
/// ne bloque ni les suivants ni l'issue de la réservation.
#[derive(Default)]
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, channel: Box<dyn Notifier>) {
        self.channels.push(channel);
    }

    pub fn created(&self, reservation: &Reservation) -> Vec<DispatchOutcome> {
        self.channels
            .iter()
            .map(|c| DispatchOutcome {
                channel: c.name(),
                result: c.notify_created(reservation),
            })
            .collect()
    }

    pub fn cancelled(&self, id: &ReservationId) -> Vec<DispatchOutcome> {
        self.channels
            .iter()
            .map(|c| DispatchOutcome {
                channel: c.name(),
                result: c.notify_cancelled(id),
            })
            .collect()
    }
}
