//! The doctor collection: the aggregate that is persisted as a whole.

use crate::types::{Doctor, DoctorId, SortKey};
use serde::{Deserialize, Serialize};

/// All doctors plus the id counter.
///
/// `doctors` keeps insertion order; that is the order written to disk and
/// the order search results come back in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Highest id ever assigned. Never decreases, so ids are not reused.
    pub last_id: DoctorId,

    pub doctors: Vec<Doctor>,
}

impl Collection {
    /// An empty collection with the counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    /// Bump the counter and return the new id. `None` leaves the counter
    /// untouched when it cannot go any higher.
    pub fn next_id(&mut self) -> Option<DoctorId> {
        self.last_id = self.last_id.next()?;
        Some(self.last_id)
    }

    /// Whether any doctor already uses `name`, ignoring case.
    pub fn contains_name(&self, name: &str) -> bool {
        self.doctors.iter().any(|d| d.has_name(name))
    }

    pub fn get(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DoctorId) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.id == id)
    }

    /// Remove the doctor with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: DoctorId) -> Option<Doctor> {
        let pos = self.doctors.iter().position(|d| d.id == id)?;
        Some(self.doctors.remove(pos))
    }

    /// A sorted copy of the roster. Stable, so equal keys keep insertion
    /// order.
    pub fn sorted(&self, key: SortKey) -> Vec<Doctor> {
        let mut doctors = self.doctors.clone();
        match key {
            SortKey::Id => doctors.sort_by_key(|d| d.id),
            SortKey::Name => doctors.sort_by_cached_key(|d| d.name.to_lowercase()),
            SortKey::Specialization => {
                doctors.sort_by_cached_key(|d| d.specialization.to_lowercase())
            }
        }
        doctors
    }

    /// Doctors whose name or specialization contains `keyword`, ignoring
    /// case. An empty keyword matches everyone.
    pub fn search(&self, keyword: &str) -> Vec<Doctor> {
        let keyword = keyword.to_lowercase();
        self.doctors
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&keyword)
                    || d.specialization.to_lowercase().contains(&keyword)
            })
            .cloned()
            .collect()
    }

    /// Largest id actually stored, if any.
    pub fn max_id(&self) -> Option<DoctorId> {
        self.doctors.iter().map(|d| d.id).max()
    }

    /// Raise `last_id` to cover every stored id. Returns the old value if it
    /// had to change.
    pub fn repair_last_id(&mut self) -> Option<DoctorId> {
        match self.max_id() {
            Some(max) if max > self.last_id => {
                let old = self.last_id;
                self.last_id = max;
                Some(old)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewDoctor;

    fn push(c: &mut Collection, name: &str, spec: &str) -> DoctorId {
        let id = c.next_id().unwrap();
        c.doctors.push(Doctor::from_input(
            id,
            NewDoctor::new(name, spec, "x@y.z", "000"),
        ));
        id
    }

    fn roster() -> Collection {
        let mut c = Collection::new();
        push(&mut c, "charlie", "Neurology");
        push(&mut c, "Alice", "cardiology");
        push(&mut c, "bob", "Cardiology");
        c
    }

    fn names(doctors: &[Doctor]) -> Vec<&str> {
        doctors.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_next_id_counts_up() {
        let mut c = Collection::new();
        assert_eq!(c.next_id(), Some(DoctorId(1)));
        assert_eq!(c.next_id(), Some(DoctorId(2)));
        assert_eq!(c.last_id, DoctorId(2));
        assert!(c.is_empty());
    }

    #[test]
    fn test_next_id_at_limit() {
        let mut c = Collection::new();
        c.last_id = DoctorId(u64::MAX);
        assert_eq!(c.next_id(), None);
        assert_eq!(c.last_id, DoctorId(u64::MAX));
    }

    #[test]
    fn test_sorted_by_name_ignores_case() {
        let c = roster();
        assert_eq!(names(&c.sorted(SortKey::Name)), ["Alice", "bob", "charlie"]);
        // stored order untouched
        assert_eq!(names(&c.doctors), ["charlie", "Alice", "bob"]);
    }

    #[test]
    fn test_sorted_by_specialization_is_stable() {
        let c = roster();
        // "cardiology" and "Cardiology" tie; insertion order decides
        assert_eq!(
            names(&c.sorted(SortKey::Specialization)),
            ["Alice", "bob", "charlie"]
        );
    }

    #[test]
    fn test_sorted_by_id() {
        let mut c = roster();
        c.doctors.reverse();
        let ids: Vec<u64> = c.sorted(SortKey::Id).iter().map(|d| d.id.0).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_search_matches_name_or_specialization() {
        let c = roster();
        assert_eq!(names(&c.search("CARDIO")), ["Alice", "bob"]);
        assert_eq!(names(&c.search("arl")), ["charlie"]);
        assert!(c.search("dermatology").is_empty());
        assert_eq!(c.search("").len(), 3);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut c = roster();
        let removed = c.remove(DoctorId(2)).unwrap();
        assert_eq!(removed.name, "Alice");
        assert_eq!(names(&c.doctors), ["charlie", "bob"]);
        assert!(c.remove(DoctorId(2)).is_none());
        assert_eq!(c.last_id, DoctorId(3));
    }

    #[test]
    fn test_contains_name() {
        let c = roster();
        assert!(c.contains_name("ALICE"));
        assert!(c.contains_name("Charlie"));
        assert!(!c.contains_name("dave"));
    }

    #[test]
    fn test_repair_last_id() {
        let mut c = roster();
        c.last_id = DoctorId(1);
        assert_eq!(c.repair_last_id(), Some(DoctorId(1)));
        assert_eq!(c.last_id, DoctorId(3));
        assert_eq!(c.repair_last_id(), None);
    }
}
