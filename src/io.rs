use crate::model::{build_room, Reservation, Room};
use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Parse un horodatage saisi à la minute : "YYYY-MM-DD HH:MM" (ou avec 'T').
pub fn parse_minute(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    bail!("invalid date/time (expected YYYY-MM-DD HH:MM): {raw}")
}

/// Import du catalogue de salles depuis CSV: header `id,type,name,capacity`
pub fn import_rooms_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Room>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let kind = rec.get(1).context("missing type")?.trim();
        let name = rec.get(2).context("missing name")?.trim();
        let capacity: u32 = rec
            .get(3)
            .context("missing capacity")?
            .trim()
            .parse()
            .with_context(|| format!("invalid capacity for room {id}"))?;
        let room = build_room(kind, id, name, capacity).map_err(anyhow::Error::msg)?;
        out.push(room);
    }
    Ok(out)
}

/// Export JSON des réservations (jolie mise en forme)
pub fn export_reservations_json<P: AsRef<Path>>(
    path: P,
    reservations: &[Reservation],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(reservations)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `id,room_id,requester,start,end,duration_hours,purpose`
pub fn export_reservations_csv<P: AsRef<Path>>(
    path: P,
    reservations: &[Reservation],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "room_id",
        "requester",
        "start",
        "end",
        "duration_hours",
        "purpose",
    ])?;
    for r in reservations {
        let start = r.start.format("%Y-%m-%d %H:%M").to_string();
        let end = r.end().format("%Y-%m-%d %H:%M").to_string();
        let duration = r.duration_hours.to_string();
        w.write_record([
            r.id.as_str(),
            r.room_id.as_str(),
            r.requester.as_str(),
            start.as_str(),
            end.as_str(),
            duration.as_str(),
            r.purpose.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}
