//! Core types for the doctor registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for a doctor (assigned by the store, starts at 1).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DoctorId(pub u64);

impl DoctorId {
    /// The following id, or `None` once the counter is at `u64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(DoctorId)
    }
}

impl fmt::Debug for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DoctorId({})", self.0)
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DoctorId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(DoctorId)
    }
}

/// A single doctor record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique identifier (assigned by store, never changes).
    pub id: DoctorId,

    /// Display name, unique across the roster ignoring case.
    pub name: String,

    pub specialization: String,

    pub email: String,

    pub contact: String,
}

impl Doctor {
    /// Build a record from input and an assigned id.
    pub fn from_input(id: DoctorId, input: NewDoctor) -> Self {
        Self {
            id,
            name: input.name,
            specialization: input.specialization,
            email: input.email,
            contact: input.contact,
        }
    }

    /// Whether `name` matches this doctor's name, ignoring case.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Input for creating a new doctor (before an id is assigned).
///
/// Fields are taken as given; trimming and emptiness checks belong to the
/// caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub contact: String,
}

impl NewDoctor {
    pub fn new(
        name: impl Into<String>,
        specialization: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            specialization: specialization.into(),
            email: email.into(),
            contact: contact.into(),
        }
    }
}

/// Field changes for an existing doctor.
///
/// `None` and empty strings both leave the stored value alone. Name and id
/// cannot be changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DoctorUpdate {
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl DoctorUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn specialization(mut self, value: impl Into<String>) -> Self {
        self.specialization = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn contact(mut self, value: impl Into<String>) -> Self {
        self.contact = Some(value.into());
        self
    }

    /// Apply the non-empty fields to `doctor`.
    pub fn apply_to(self, doctor: &mut Doctor) {
        let fields = [
            (self.specialization, &mut doctor.specialization),
            (self.email, &mut doctor.email),
            (self.contact, &mut doctor.contact),
        ];
        for (value, slot) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    }
}

/// Ordering for listing the roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Specialization,
}

impl From<&str> for SortKey {
    /// Unrecognized keys fall back to [`SortKey::Id`].
    fn from(s: &str) -> Self {
        match s {
            "name" => SortKey::Name,
            "specialization" => SortKey::Specialization,
            _ => SortKey::Id,
        }
    }
}

/// Result of a store mutation that can fail for expected reasons.
///
/// Duplicate names and unknown ids are reported here rather than as
/// errors, so callers always get a flag and a message to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Added(DoctorId),
    Updated,
    Deleted,
    DuplicateName,
    NotFound,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Added(_) | Outcome::Updated | Outcome::Deleted)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Added(_) => "Doctor added successfully!",
            Outcome::Updated => "Doctor updated successfully!",
            Outcome::Deleted => "Doctor deleted successfully!",
            Outcome::DuplicateName => "Doctor name already exists!",
            Outcome::NotFound => "Doctor not found.",
        }
    }

    /// The id assigned by a successful add.
    pub fn added_id(&self) -> Option<DoctorId> {
        match self {
            Outcome::Added(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
