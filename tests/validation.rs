#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveDateTime};
use resalle::{
    model::{build_room, Reservation, RoomCatalog, RoomId},
    validation::{Policy, RejectError, ValidationContext, Validator},
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn catalog() -> RoomCatalog {
    let mut c = RoomCatalog::default();
    c.add(build_room("classroom", "CL-101", "Salle 101", 30).unwrap());
    c
}

fn reservation(room: &str, start: NaiveDateTime, hours: f64) -> Reservation {
    Reservation::new(RoomId::new(room), "Alice", start, hours, None).unwrap()
}

fn check(start: NaiveDateTime, hours: f64) -> Result<(), RejectError> {
    check_against(start, hours, &[])
}

fn check_against(
    start: NaiveDateTime,
    hours: f64,
    existing: &[Reservation],
) -> Result<(), RejectError> {
    let rooms = catalog();
    let validator = Validator::new(Policy::default());
    let candidate = reservation("CL-101", start, hours);
    validator.check(
        &candidate,
        &ValidationContext {
            now: at(2025, 12, 1, 8, 0),
            rooms: &rooms,
            existing,
        },
    )
}

#[test]
fn opening_boundary_is_inclusive() {
    // 07:00 + 8h = 15:00 : accepté
    assert!(check(at(2025, 12, 20, 7, 0), 8.0).is_ok());
    // 06:59 : refusé
    assert_eq!(
        check(at(2025, 12, 20, 6, 59), 1.0),
        Err(RejectError::BusinessHours)
    );
}

#[test]
fn closing_boundary_allows_exact_end() {
    // 14:00 + 8h finit exactement à 22:00 : accepté
    assert!(check(at(2025, 12, 20, 14, 0), 8.0).is_ok());
    // 21:30 + 1h finit à 22:30 : refusé
    assert_eq!(
        check(at(2025, 12, 20, 21, 30), 1.0),
        Err(RejectError::BusinessHours)
    );
    // commencer à la fermeture : refusé
    assert_eq!(
        check(at(2025, 12, 20, 22, 0), 1.0),
        Err(RejectError::BusinessHours)
    );
}

#[test]
fn duration_bounds_are_inclusive() {
    assert!(check(at(2025, 12, 20, 10, 0), 1.0).is_ok());
    assert!(check(at(2025, 12, 20, 10, 0), 8.0).is_ok());
    assert!(matches!(
        check(at(2025, 12, 20, 10, 0), 0.5),
        Err(RejectError::DurationOutOfRange { .. })
    ));
    assert!(matches!(
        check(at(2025, 12, 20, 10, 0), 9.0),
        Err(RejectError::DurationOutOfRange { .. })
    ));
}

#[test]
fn past_start_rejected_but_now_is_allowed() {
    assert_eq!(
        check(at(2025, 11, 30, 10, 0), 1.0),
        Err(RejectError::PastStart)
    );
    // début exactement à l'instant d'évaluation (08:00) : accepté
    assert!(check(at(2025, 12, 1, 8, 0), 1.0).is_ok());
}

#[test]
fn unknown_room_rejected() {
    let rooms = catalog();
    let validator = Validator::new(Policy::default());
    let candidate = reservation("ZZ-999", at(2025, 12, 20, 10, 0), 1.0);
    let err = validator
        .check(
            &candidate,
            &ValidationContext {
                now: at(2025, 12, 1, 8, 0),
                rooms: &rooms,
                existing: &[],
            },
        )
        .unwrap_err();
    assert_eq!(err, RejectError::UnknownRoom("ZZ-999".to_string()));
}

#[test]
fn conflict_names_the_existing_reservation() {
    let existing = reservation("CL-101", at(2025, 12, 20, 14, 0), 2.0);
    let err = check_against(at(2025, 12, 20, 15, 0), 2.0, std::slice::from_ref(&existing))
        .unwrap_err();
    assert_eq!(err, RejectError::Conflict(existing.id.clone()));

    // dos à dos : pas de conflit
    assert!(check_against(at(2025, 12, 20, 16, 0), 2.0, &[existing]).is_ok());
}

#[test]
fn overlaps_is_symmetric() {
    let a = reservation("CL-101", at(2025, 12, 20, 14, 0), 2.0);
    let b = reservation("CL-101", at(2025, 12, 20, 15, 0), 2.0);
    let c = reservation("CL-101", at(2025, 12, 20, 16, 0), 2.0);

    assert_eq!(a.overlaps(&b), b.overlaps(&a));
    assert!(a.overlaps(&b));

    // bornes qui se touchent : aucun chevauchement, dans les deux sens
    assert!(!a.overlaps(&c));
    assert!(!c.overlaps(&a));
}

#[test]
fn advance_window_is_opt_in() {
    let rooms = catalog();
    let candidate = reservation("CL-101", at(2026, 6, 1, 10, 0), 1.0);
    let ctx = ValidationContext {
        now: at(2025, 12, 1, 8, 0),
        rooms: &rooms,
        existing: &[],
    };

    // politique par défaut : pas de limite
    assert!(Validator::new(Policy::default())
        .check(&candidate, &ctx)
        .is_ok());

    let bounded = Policy {
        max_advance_days: Some(30),
        ..Policy::default()
    };
    assert!(matches!(
        Validator::new(bounded).check(&candidate, &ctx),
        Err(RejectError::TooFarAhead { max_days: 30 })
    ));
}

#[test]
fn structural_errors_come_from_the_constructor() {
    assert!(Reservation::new(RoomId::new("CL-101"), "  ", at(2025, 12, 20, 10, 0), 1.0, None)
        .is_err());
    assert!(Reservation::new(RoomId::new("CL-101"), "Alice", at(2025, 12, 20, 10, 0), 0.0, None)
        .is_err());
    assert!(
        Reservation::new(RoomId::new("CL-101"), "Alice", at(2025, 12, 20, 10, 0), -2.0, None)
            .is_err()
    );
}
