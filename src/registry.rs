//! The clinic registry.
//!
//! The [`Registry`] owns the provider, patient and appointment collections
//! and is the sole mutator: every operation is a sequential
//! read-modify-persist cycle, and the double-booking and deletion-guard
//! rules are enforced here, at write time. Mutations flow through
//! `&mut self`, which serializes writers at compile time — the single-writer
//! discipline the design requires.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Clock seam used by the deletion guards.
pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod seed;

use crate::{
    domain::{Appointment, Entity, Patient, Provider, ValidationError, appointment, collate},
    storage::{Collection, LoadError, Store, StoreError},
};

/// The coordinating component owning all clinic records.
///
/// Constructed once per session over a backing [`Store`] and passed by
/// reference to collaborators. List queries return sorted snapshots, never
/// live views; mutations persist the touched collection before returning
/// (write-through, no batching).
#[derive(Debug)]
pub struct Registry<S, C = SystemClock> {
    store: S,
    clock: C,
    providers: Collection<Provider>,
    patients: Collection<Patient>,
    appointments: Collection<Appointment>,
}

impl<S: Store> Registry<S> {
    /// Opens the registry over `store` with the system clock.
    ///
    /// All three collections are loaded once, here. Absent keys are seeded
    /// with fixture data; the seed stays in memory until a mutation first
    /// persists its collection.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read or a stored blob is malformed.
    pub fn open(store: S) -> Result<Self, LoadError> {
        Self::open_with(store, SystemClock)
    }
}

impl<S: Store, C: Clock> Registry<S, C> {
    /// Opens the registry with an explicit clock.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read or a stored blob is malformed.
    pub fn open_with(store: S, clock: C) -> Result<Self, LoadError> {
        let providers = Collection::load_or_seed(&store, seed::providers)?;
        let patients = Collection::load_or_seed(&store, seed::patients)?;
        let now = clock.now();
        let appointments = Collection::load_or_seed(&store, || seed::appointments(now))?;
        Ok(Self {
            store,
            clock,
            providers,
            patients,
            appointments,
        })
    }

    /// Consumes the registry, handing back the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// All providers, sorted ascending by name.
    ///
    /// Uses the documented name comparator (see `domain::collate`); records
    /// with identical names keep their insertion order.
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<_> = self.providers.iter().cloned().collect();
        providers.sort_by(|a, b| collate::name_order(&a.name, &b.name));
        providers
    }

    /// All patients, sorted ascending by name.
    #[must_use]
    pub fn patients(&self) -> Vec<Patient> {
        let mut patients: Vec<_> = self.patients.iter().cloned().collect();
        patients.sort_by(|a, b| collate::name_order(&a.name, &b.name));
        patients
    }

    /// All appointments, sorted ascending by start instant.
    #[must_use]
    pub fn appointments(&self) -> Vec<Appointment> {
        let mut appointments: Vec<_> = self.appointments.iter().cloned().collect();
        appointments.sort_by_key(|a| a.start);
        appointments
    }

    /// One provider's agenda: their appointments, sorted ascending by start
    /// instant.
    #[must_use]
    pub fn appointments_for_provider(&self, provider_id: &str) -> Vec<Appointment> {
        let mut agenda: Vec<_> = self
            .appointments
            .iter()
            .filter(|a| a.provider_id == provider_id)
            .cloned()
            .collect();
        agenda.sort_by_key(|a| a.start);
        agenda
    }

    /// Looks up a provider by id.
    #[must_use]
    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.get(id)
    }

    /// Looks up a patient by id.
    #[must_use]
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.get(id)
    }

    /// Creates or replaces a provider record.
    ///
    /// An empty id marks a new record and a fresh id is minted; a non-empty
    /// id replaces the stored record wholesale (ids never change once
    /// minted). Returns the stored record with its id populated.
    ///
    /// # Errors
    ///
    /// Invalid records are refused before anything is written; storage
    /// failures surface as [`UpsertError::Store`].
    pub fn upsert_provider(&mut self, provider: Provider) -> Result<Provider, UpsertError> {
        provider.validate()?;
        let stored = Self::commit(&mut self.providers, &mut self.store, provider)?;
        tracing::info!("stored provider {}", stored.id);
        Ok(stored)
    }

    /// Creates or replaces a patient record. Same contract as
    /// [`upsert_provider`](Self::upsert_provider).
    ///
    /// # Errors
    ///
    /// Invalid records are refused before anything is written; storage
    /// failures surface as [`UpsertError::Store`].
    pub fn upsert_patient(&mut self, patient: Patient) -> Result<Patient, UpsertError> {
        patient.validate()?;
        let stored = Self::commit(&mut self.patients, &mut self.store, patient)?;
        tracing::info!("stored patient {}", stored.id);
        Ok(stored)
    }

    /// Removes a provider unless they still have future appointments.
    ///
    /// The guard blocks, it never cascades: appointments that started in the
    /// past neither block deletion nor get cleaned up, and are left pointing
    /// at the removed record. Removing an unknown id is a no-op success.
    ///
    /// # Errors
    ///
    /// [`DeleteError::FutureAppointments`] when a referencing appointment
    /// starts strictly after the current instant; the record is left intact.
    pub fn delete_provider(&mut self, id: &str) -> Result<(), DeleteError> {
        let now = self.clock.now();
        if self
            .appointments
            .iter()
            .any(|a| a.provider_id == id && a.start > now)
        {
            return Err(DeleteError::FutureAppointments(Role::Provider));
        }
        if self.providers.remove(id) {
            self.providers.persist(&mut self.store)?;
            tracing::info!("deleted provider {id}");
        }
        Ok(())
    }

    /// Removes a patient unless they still have future appointments. Same
    /// guard as [`delete_provider`](Self::delete_provider).
    ///
    /// # Errors
    ///
    /// [`DeleteError::FutureAppointments`] when a referencing appointment
    /// starts strictly after the current instant; the record is left intact.
    pub fn delete_patient(&mut self, id: &str) -> Result<(), DeleteError> {
        let now = self.clock.now();
        if self
            .appointments
            .iter()
            .any(|a| a.patient_id == id && a.start > now)
        {
            return Err(DeleteError::FutureAppointments(Role::Patient));
        }
        if self.patients.remove(id) {
            self.patients.persist(&mut self.store)?;
            tracing::info!("deleted patient {id}");
        }
        Ok(())
    }

    /// Checks whether a slot starting at `start` is free for the given
    /// provider.
    ///
    /// The slot end is derived from the fixed appointment length. `exclude`
    /// skips one appointment id — used when re-validating an edit against
    /// everything but itself. The scan reports the first conflict in
    /// insertion order, not all of them; with unchanged state, repeated
    /// calls return the same verdict. Intervals that only touch at an
    /// endpoint do not conflict.
    #[must_use]
    pub fn check_availability(
        &self,
        provider_id: &str,
        start: DateTime<Utc>,
        exclude: Option<&str>,
    ) -> Availability {
        let end = appointment::slot_end(start);
        self.appointments
            .iter()
            .filter(|a| a.provider_id == provider_id)
            .filter(|a| exclude != Some(a.id.as_str()))
            .find(|a| start < a.end() && end > a.start)
            .map_or(Availability::Free, |a| Availability::Busy {
                start: a.start,
                end: a.end(),
            })
    }

    /// Creates or replaces an appointment, enforcing referential integrity
    /// and the double-booking rule.
    ///
    /// Checks run in order — field validation, provider resolution, patient
    /// resolution, slot availability (excluding the appointment's own id
    /// when editing) — and the first failure returns without touching any
    /// state: a refused upsert is atomic from the caller's perspective.
    ///
    /// # Errors
    ///
    /// See [`ScheduleError`]. A failed check never reaches the persist step.
    pub fn upsert_appointment(
        &mut self,
        appointment: Appointment,
    ) -> Result<Appointment, ScheduleError> {
        appointment.validate()?;
        if !self.providers.contains(&appointment.provider_id) {
            return Err(ScheduleError::UnknownProvider(appointment.provider_id));
        }
        if !self.patients.contains(&appointment.patient_id) {
            return Err(ScheduleError::UnknownPatient(appointment.patient_id));
        }
        let exclude = (!appointment.id.is_empty()).then_some(appointment.id.as_str());
        if let Availability::Busy { start, end } =
            self.check_availability(&appointment.provider_id, appointment.start, exclude)
        {
            return Err(ScheduleError::Conflict { start, end });
        }
        let stored = Self::commit(&mut self.appointments, &mut self.store, appointment)?;
        tracing::info!(
            "scheduled appointment {} for provider {}",
            stored.id,
            stored.provider_id
        );
        Ok(stored)
    }

    /// Removes an appointment unconditionally — nothing references one.
    /// Removing an unknown id is a no-op success.
    ///
    /// # Errors
    ///
    /// Only storage failures; cancellation has no business-rule guard.
    pub fn delete_appointment(&mut self, id: &str) -> Result<(), StoreError> {
        if self.appointments.remove(id) {
            self.appointments.persist(&mut self.store)?;
            tracing::info!("cancelled appointment {id}");
        }
        Ok(())
    }

    /// Mints an id if needed, applies the upsert and persists the touched
    /// collection.
    fn commit<T>(
        collection: &mut Collection<T>,
        store: &mut S,
        mut record: T,
    ) -> Result<T, StoreError>
    where
        T: Entity + Serialize + DeserializeOwned + Clone,
    {
        if record.id().is_empty() {
            record.set_id(Uuid::new_v4().to_string());
        }
        collection.upsert(record.clone());
        collection.persist(store)?;
        Ok(record)
    }
}

/// Verdict of a scheduling-conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The slot does not overlap any existing appointment.
    Free,
    /// The slot overlaps the appointment occupying `[start, end)`.
    Busy {
        /// Start of the conflicting interval.
        start: DateTime<Utc>,
        /// End of the conflicting interval.
        end: DateTime<Utc>,
    },
}

impl Availability {
    /// Whether the slot is free.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("available"),
            Self::Busy { start, end } => {
                write!(f, "provider is already booked from {start} to {end}")
            }
        }
    }
}

/// Failure to store a provider or patient record.
#[derive(Debug, thiserror::Error)]
pub enum UpsertError {
    /// The record failed field validation; nothing was written.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The backing store rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Refusal or failure while deleting a provider or patient.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// A referencing appointment starts in the future; the record stays.
    #[error("{0} has future appointments")]
    FutureAppointments(Role),
    /// The backing store rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which side of an appointment a record plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The practitioner delivering the appointment.
    Provider,
    /// The person attending the appointment.
    Patient,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Provider => "provider",
            Self::Patient => "patient",
        })
    }
}

/// Refusal or failure while scheduling an appointment.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A required field is missing or malformed.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The referenced provider does not exist.
    #[error("no provider with id '{0}'")]
    UnknownProvider(String),
    /// The referenced patient does not exist.
    #[error("no patient with id '{0}'")]
    UnknownPatient(String),
    /// The slot overlaps an existing appointment for the same provider.
    #[error("provider is already booked from {start} to {end}")]
    Conflict {
        /// Start of the conflicting interval.
        start: DateTime<Utc>,
        /// End of the conflicting interval.
        end: DateTime<Utc>,
    },
    /// The backing store rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}
