use crate::model::{Reservation, ReservationId, RoomId};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Défaillance de la couche de stockage, distincte d'un simple "non trouvé".
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt store: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Capacité de stockage des réservations, indexées par identifiant.
///
/// Un id inconnu donne `Ok(None)` / `Ok(false)`, jamais une erreur ;
/// `StorageError` est réservé aux vraies défaillances (E/S, fichier corrompu).
/// L'ordre d'insertion est préservé par `list_all`.
pub trait ReservationStore {
    /// Insère ou remplace (même id) une réservation.
    fn insert(&self, reservation: &Reservation) -> Result<(), StorageError>;
    fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, StorageError>;
    /// Toutes les réservations d'une salle (requête du contrôle de conflit).
    fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<Reservation>, StorageError>;
    /// Renvoie `true` si une réservation a effectivement été supprimée.
    fn delete_by_id(&self, id: &ReservationId) -> Result<bool, StorageError>;
    fn list_all(&self) -> Result<Vec<Reservation>, StorageError>;
}

fn upsert(items: &mut Vec<Reservation>, reservation: &Reservation) {
    if let Some(slot) = items.iter_mut().find(|r| r.id == reservation.id) {
        *slot = reservation.clone();
    } else {
        items.push(reservation.clone());
    }
}

/// Stockage en mémoire, durée de vie du processus.
///
/// Le verrou unique sérialise les séquences lecture-modification-écriture
/// si l'hôte autorise des appels concurrents.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Vec<Reservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationStore for MemoryStore {
    fn insert(&self, reservation: &Reservation) -> Result<(), StorageError> {
        let mut items = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        upsert(&mut items, reservation);
        Ok(())
    }

    fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, StorageError> {
        let items = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.iter().find(|r| &r.id == id).cloned())
    }

    fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<Reservation>, StorageError> {
        let items = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items
            .iter()
            .filter(|r| &r.room_id == room_id)
            .cloned()
            .collect())
    }

    fn delete_by_id(&self, id: &ReservationId) -> Result<bool, StorageError> {
        let mut items = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        let before = items.len();
        items.retain(|r| &r.id != id);
        Ok(items.len() < before)
    }

    fn list_all(&self) -> Result<Vec<Reservation>, StorageError> {
        let items = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.clone())
    }
}

/// Stockage fichier : instantané JSON complet, réécrit atomiquement à chaque
/// mutation (tempfile + rename). Fichier absent = collection vide.
///
/// Non sûr pour plusieurs processus : la réécriture complète est une séquence
/// lecture-modification-écriture sans verrou inter-processus.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    fn load(&self) -> Result<Vec<Reservation>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&self, items: &[Reservation]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(items)?;
        let mut tmp =
            NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl ReservationStore for JsonStore {
    fn insert(&self, reservation: &Reservation) -> Result<(), StorageError> {
        let mut items = self.load()?;
        upsert(&mut items, reservation);
        self.save(&items)
    }

    fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, StorageError> {
        Ok(self.load()?.into_iter().find(|r| &r.id == id))
    }

    fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<Reservation>, StorageError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| &r.room_id == room_id)
            .collect())
    }

    fn delete_by_id(&self, id: &ReservationId) -> Result<bool, StorageError> {
        let mut items = self.load()?;
        let before = items.len();
        items.retain(|r| &r.id != id);
        if items.len() < before {
            self.save(&items)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn list_all(&self) -> Result<Vec<Reservation>, StorageError> {
        self.load()
    }
}
