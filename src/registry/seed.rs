//! Cold-start fixture data.
//!
//! Installed when a collection's key is absent from the backing store, so a
//! fresh data directory opens with a workable roster instead of three empty
//! lists.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Appointment, Patient, Provider, Specialty};

pub(crate) fn providers() -> Vec<Provider> {
    vec![
        Provider {
            id: "1".to_string(),
            name: "Dr. Juan Pérez".to_string(),
            specialty: Specialty::GeneralDentistry,
            email: "juan.perez@clinica.com".to_string(),
        },
        Provider {
            id: "2".to_string(),
            name: "Dra. Ana López".to_string(),
            specialty: Specialty::Orthodontics,
            email: "ana.lopez@clinica.com".to_string(),
        },
        Provider {
            id: "3".to_string(),
            name: "Dr. Roberto Gómez".to_string(),
            specialty: Specialty::MaxillofacialSurgery,
            email: "roberto.gomez@clinica.com".to_string(),
        },
    ]
}

pub(crate) fn patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "1".to_string(),
            name: "Carlos García".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 4, 12).expect("valid fixture date"),
            phone: "555-1234".to_string(),
            email: Some("carlos@mail.com".to_string()),
            subscriber: true,
        },
        Patient {
            id: "2".to_string(),
            name: "María Rodríguez".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1992, 8, 23).expect("valid fixture date"),
            phone: "555-5678".to_string(),
            email: None,
            subscriber: false,
        },
    ]
}

/// One appointment at 10:00 UTC on the day of `now`.
pub(crate) fn appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    let start = now
        .date_naive()
        .and_hms_opt(10, 0, 0)
        .expect("10:00 exists on every day")
        .and_utc();
    vec![Appointment {
        id: "1".to_string(),
        provider_id: "1".to_string(),
        patient_id: "1".to_string(),
        start,
        reason: "Annual cleaning".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::{appointments, patients, providers};

    #[test]
    fn fixture_records_pass_their_own_validation() {
        for provider in providers() {
            provider.validate().unwrap();
        }
        for patient in patients() {
            patient.validate().unwrap();
        }
        for appointment in appointments("2024-06-01T08:00:00Z".parse().unwrap()) {
            appointment.validate().unwrap();
        }
    }

    #[test]
    fn seeded_appointment_is_anchored_to_the_given_day() {
        let seeded = appointments("2024-06-01T22:30:00Z".parse().unwrap());
        assert_eq!(
            seeded[0].start,
            "2024-06-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
