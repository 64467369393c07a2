#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use resalle::{
    io,
    model::{build_room, ReservationId, RoomCatalog, RoomId},
    notification::{ConsoleNotifier, Dispatcher, EmailNotifier, SmsNotifier},
    service::{ReservationRequest, ReservationService, ServiceError},
    storage::JsonStore,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de réservation de salles (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des réservations
    #[arg(long, global = true, default_value = "reservations.json")]
    store: String,

    /// Catalogue de salles CSV (`id,type,name,capacity`) ;
    /// sinon catalogue de démonstration intégré
    #[arg(long, global = true)]
    rooms: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister le catalogue de salles
    Rooms,

    /// Créer une réservation
    Reserve {
        /// Identifiant de salle (ex: CL-101)
        #[arg(long)]
        room: String,
        /// Nom du demandeur
        #[arg(long)]
        name: String,
        /// "YYYY-MM-DD HH:MM" (heure locale)
        #[arg(long)]
        start: String,
        /// Durée en heures (1 à 8)
        #[arg(long, default_value_t = 1.0)]
        hours: f64,
        #[arg(long)]
        purpose: Option<String>,
    },

    /// Annuler une réservation par identifiant
    Cancel {
        #[arg(long)]
        id: String,
    },

    /// Lister et optionnellement exporter
    List {
        /// Restreindre à une salle
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

/// Catalogue de démonstration utilisé sans `--rooms`.
fn seed_catalog() -> Result<RoomCatalog> {
    let defs = [
        ("CL-101", "classroom", "Salle 101", 30),
        ("CL-102", "classroom", "Salle 102", 24),
        ("CONF-1", "conference", "Salle du conseil", 12),
        ("LAB-CH", "laboratory", "Labo chimie", 16),
        ("INFO-1", "computer_lab", "Salle info", 20),
    ];
    let mut catalog = RoomCatalog::default();
    for (id, kind, name, capacity) in defs {
        catalog.add(build_room(kind, id, name, capacity).map_err(anyhow::Error::msg)?);
    }
    Ok(catalog)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let catalog = match &cli.rooms {
        Some(path) => RoomCatalog::new(io::import_rooms_csv(path)?),
        None => seed_catalog()?,
    };

    let store = JsonStore::open(&cli.store)?;
    let mut dispatcher = Dispatcher::new();
    dispatcher.attach(Box::new(ConsoleNotifier));
    dispatcher.attach(Box::new(EmailNotifier::new("localhost")));
    dispatcher.attach(Box::new(SmsNotifier::new("demo_key")));
    let service = ReservationService::new(catalog, Box::new(store), dispatcher);

    let code = match cli.cmd {
        Commands::Rooms => {
            for room in service.rooms().iter() {
                println!("{room}");
                for item in room.kind.equipment() {
                    println!("  - {item}");
                }
            }
            0
        }
        Commands::Reserve {
            room,
            name,
            start,
            hours,
            purpose,
        } => {
            let start = io::parse_minute(&start)?;
            let request = ReservationRequest {
                room_id: room,
                requester: name,
                start,
                duration_hours: hours,
                purpose,
            };
            match service.create(request, Local::now().naive_local()) {
                Ok(r) => {
                    println!(
                        "OK: {} | salle {} | {} → {}",
                        r.id,
                        r.room_id,
                        r.start.format("%Y-%m-%d %H:%M"),
                        r.end().format("%H:%M")
                    );
                    0
                }
                Err(ServiceError::Rejected(reason)) => {
                    eprintln!("Refusé : {reason}");
                    // Code 2 = demande rejetée par une règle métier
                    2
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Cancel { id } => match service.cancel(&ReservationId::new(&id)) {
            Ok(()) => {
                println!("Annulée : {id}");
                0
            }
            Err(ServiceError::NotFound(_)) => {
                eprintln!("Introuvable : {id}");
                2
            }
            Err(err) => return Err(err.into()),
        },
        Commands::List {
            room,
            out_json,
            out_csv,
        } => {
            let items = match room {
                Some(id) => service.list_by_room(&RoomId::new(&id))?,
                None => service.list_all()?,
            };
            if let Some(path) = out_json {
                io::export_reservations_json(path, &items)?;
            }
            if let Some(path) = out_csv {
                io::export_reservations_csv(path, &items)?;
            }
            // impression compacte
            for r in &items {
                println!(
                    "{} | {} | {} → {} | {}",
                    r.id,
                    r.room_id,
                    r.start.format("%Y-%m-%d %H:%M"),
                    r.end().format("%Y-%m-%d %H:%M"),
                    r.requester
                );
            }
            0
        }
    };

    std::process::exit(code);
}
