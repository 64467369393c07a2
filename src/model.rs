use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Room (ex: "CL-101")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comportement d'un type de salle : libellé affichable et équipement par défaut.
///
/// Ajouter un type de salle = implémenter ce trait ; ni `Reservation`
/// ni les règles de validation ne branchent sur un type concret.
pub trait RoomKind {
    fn label(&self) -> String;
    fn equipment(&self) -> Vec<String>;
}

/// Salle de cours classique.
#[derive(Debug, Clone)]
pub struct Classroom {
    pub projector: bool,
    pub whiteboard: bool,
}

impl Default for Classroom {
    fn default() -> Self {
        Self {
            projector: true,
            whiteboard: true,
        }
    }
}

impl RoomKind for Classroom {
    fn label(&self) -> String {
        "Classroom".to_string()
    }
    fn equipment(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.projector {
            out.push("projector".to_string());
        }
        if self.whiteboard {
            out.push("whiteboard".to_string());
        }
        out.push("desks".to_string());
        out
    }
}

/// Salle de réunion équipée audio/vidéo.
#[derive(Debug, Clone)]
pub struct ConferenceRoom {
    pub video_conference: bool,
    pub sound_system: bool,
}

impl Default for ConferenceRoom {
    fn default() -> Self {
        Self {
            video_conference: true,
            sound_system: true,
        }
    }
}

impl RoomKind for ConferenceRoom {
    fn label(&self) -> String {
        "Conference Room".to_string()
    }
    fn equipment(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.video_conference {
            out.push("video_conference".to_string());
        }
        if self.sound_system {
            out.push("sound_system".to_string());
        }
        out.push("projector".to_string());
        out.push("conference_table".to_string());
        out
    }
}

/// Laboratoire, éventuellement spécialisé (chimie, physique...).
#[derive(Debug, Clone)]
pub struct Laboratory {
    pub lab_type: String,
    pub safety_equipment: bool,
}

impl Default for Laboratory {
    fn default() -> Self {
        Self {
            lab_type: "General".to_string(),
            safety_equipment: true,
        }
    }
}

impl RoomKind for Laboratory {
    fn label(&self) -> String {
        format!("Laboratory ({})", self.lab_type)
    }
    fn equipment(&self) -> Vec<String> {
        let mut out = vec!["workbenches".to_string(), "storage".to_string()];
        if self.safety_equipment {
            out.push("safety_equipment".to_string());
        }
        out
    }
}

/// Salle informatique : postes de travail + imprimante.
#[derive(Debug, Clone, Default)]
pub struct ComputerLab {
    /// 0 = un poste par place (résolu à la construction de la salle).
    pub computers: u32,
    pub printer: bool,
}

impl RoomKind for ComputerLab {
    fn label(&self) -> String {
        "Computer Lab".to_string()
    }
    fn equipment(&self) -> Vec<String> {
        let mut out = vec![format!("{} computers", self.computers), "network".to_string()];
        if self.printer {
            out.push("printer".to_string());
        }
        out
    }
}

/// Salle réservable : attributs communs + comportement du type via `RoomKind`.
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub kind: Box<dyn RoomKind>,
}

impl Room {
    /// Crée une salle en validant id, nom et capacité.
    pub fn new(
        id: &str,
        name: &str,
        capacity: u32,
        kind: Box<dyn RoomKind>,
    ) -> Result<Self, String> {
        if id.trim().is_empty() {
            return Err("room id cannot be empty".to_string());
        }
        if name.trim().is_empty() {
            return Err("room name cannot be empty".to_string());
        }
        if capacity == 0 {
            return Err("room capacity must be positive".to_string());
        }
        Ok(Self {
            id: RoomId::new(id.trim()),
            name: name.trim().to_string(),
            capacity,
            kind,
        })
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("kind", &self.kind.label())
            .finish()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (ID: {}, {} places)",
            self.kind.label(),
            self.name,
            self.id,
            self.capacity
        )
    }
}

/// Fabrique une salle depuis un libellé de type ("classroom", "conference",
/// "laboratory", "computer_lab"), avec l'équipement par défaut du type.
pub fn build_room(kind: &str, id: &str, name: &str, capacity: u32) -> Result<Room, String> {
    let kind: Box<dyn RoomKind> = match kind.trim().to_ascii_lowercase().as_str() {
        "classroom" => Box::new(Classroom::default()),
        "conference" | "conference_room" => Box::new(ConferenceRoom::default()),
        "laboratory" | "lab" => Box::new(Laboratory::default()),
        "computer_lab" => Box::new(ComputerLab {
            computers: capacity,
            printer: true,
        }),
        other => return Err(format!("unknown room type: {other}")),
    };
    Room::new(id, name, capacity, kind)
}

/// Catalogue de salles fourni au démarrage, jamais modifié par le cœur.
#[derive(Debug, Default)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }
    pub fn add(&mut self, room: Room) {
        self.rooms.push(room);
    }
    pub fn find(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }
    pub fn len(&self) -> usize {
        self.rooms.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Identifiant fort pour Reservation, format "RES-XXXXXXXX"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(String);

impl ReservationId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("RES-{}", hex[..8].to_ascii_uppercase()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Réservation d'une salle sur un intervalle semi-ouvert [start, end).
///
/// `end` est dérivé (`start + duration_hours`), jamais stocké. Heure locale
/// naïve, granularité minute. Immuable une fois enregistrée ; l'annulation
/// supprime l'enregistrement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub requester: String,
    pub start: NaiveDateTime,
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl Reservation {
    /// Crée une réservation en validant la structure (demandeur non vide,
    /// durée strictement positive). Les bornes métier (1-8h, horaires
    /// d'ouverture) relèvent du pipeline de validation, pas du constructeur.
    pub fn new(
        room_id: RoomId,
        requester: &str,
        start: NaiveDateTime,
        duration_hours: f64,
        purpose: Option<String>,
    ) -> Result<Self, String> {
        if requester.trim().is_empty() {
            return Err("requester name cannot be empty".to_string());
        }
        if !duration_hours.is_finite() || duration_hours <= 0.0 {
            return Err("duration must be strictly positive".to_string());
        }
        Ok(Self {
            id: ReservationId::random(),
            room_id,
            requester: requester.trim().to_string(),
            start,
            duration_hours,
            purpose: purpose.filter(|p| !p.trim().is_empty()),
        })
    }

    /// Fin dérivée, arrondie à la minute.
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes((self.duration_hours * 60.0).round() as i64)
    }

    /// Chevauchement semi-ouvert : même salle et `[s1,e1) ∩ [s2,e2) ≠ ∅`.
    /// Deux réservations dos à dos (fin = début) ne se chevauchent pas.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        self.room_id == other.room_id && self.start < other.end() && other.start < self.end()
    }
}
