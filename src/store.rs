use crate::date_key::DateKey;
use crate::errors::StoreError;
use crate::models::{Habit, MAX_NAME_LEN};
use crate::status::DayStatus;
use crate::storage::HabitPersistence;
use chrono::Utc;
use tracing::{info, warn};

/// In-memory habit collection with load-at-open and save-after-every-mutation.
pub struct HabitStore<P> {
    habits: Vec<Habit>,
    persistence: P,
}

impl<P: HabitPersistence> HabitStore<P> {
    /// Loads the persisted collection, starting empty if it cannot be read.
    pub fn open(persistence: P) -> Self {
        let habits = match persistence.load() {
            Ok(habits) => habits,
            Err(err) => {
                warn!("discarding persisted habits: {err}");
                Vec::new()
            }
        };
        info!(count = habits.len(), "habit store opened");
        Self {
            habits,
            persistence,
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn add(&mut self, name: &str) -> Result<Habit, StoreError> {
        let name = validate_name(name)?;
        let habit = Habit::new(self.fresh_id(), name, Utc::now());
        self.habits.push(habit.clone());
        info!(id = %habit.id, name = %habit.name, "habit added");
        self.save()?;
        Ok(habit)
    }

    pub fn remove(&mut self, id: &str) -> Result<Habit, StoreError> {
        let index = self
            .habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.habits.remove(index);
        info!(id = %removed.id, "habit removed");
        self.save()?;
        Ok(removed)
    }

    pub fn set_status(
        &mut self,
        id: &str,
        day: DateKey,
        status: DayStatus,
    ) -> Result<(), StoreError> {
        self.habit_mut(id)?.set_status(day, status);
        info!(id, date = %day, ?status, "day status set");
        self.save()
    }

    /// Applies the click transition to `day` and returns the new status.
    pub fn toggle(&mut self, id: &str, day: DateKey) -> Result<DayStatus, StoreError> {
        let next = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?
            .status_on(day)
            .next();
        self.set_status(id, day, next)?;
        Ok(next)
    }

    /// Quick-mark: toggles whatever day it is locally when called.
    pub fn toggle_today(&mut self, id: &str) -> Result<(DateKey, DayStatus), StoreError> {
        let today = DateKey::today();
        let status = self.toggle(id, today)?;
        Ok((today, status))
    }

    fn habit_mut(&mut self, id: &str) -> Result<&mut Habit, StoreError> {
        self.habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn save(&self) -> Result<(), StoreError> {
        self.persistence.save(&self.habits).inspect_err(|err| {
            tracing::error!("failed to persist habits: {err}");
        })
    }
}

fn validate_name(raw: &str) -> Result<String, StoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(StoreError::validation("habit name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(StoreError::validation(format!(
            "habit name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::streak_at;
    use crate::storage::MemoryStore;

    #[test]
    fn add_trims_and_persists() {
        let backend = MemoryStore::new();
        let mut store = HabitStore::open(&backend);
        let habit = store.add("  Read  ").unwrap();
        assert_eq!(habit.name, "Read");
        assert!(habit.data.is_empty());

        let reloaded = backend.load().unwrap();
        assert_eq!(reloaded, vec![habit]);
    }

    #[test]
    fn whitespace_name_is_rejected_without_mutation() {
        let backend = MemoryStore::new();
        let mut store = HabitStore::open(&backend);
        store.add("Walk").unwrap();
        let before = backend.blob();

        let err = store.add("   ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.habits().len(), 1);
        assert_eq!(backend.blob(), before);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut store = HabitStore::open(MemoryStore::new());
        assert!(store.add(&"a".repeat(MAX_NAME_LEN)).is_ok());
        assert!(matches!(
            store.add(&"a".repeat(MAX_NAME_LEN + 1)),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn ids_are_unique_even_within_one_millisecond() {
        let mut store = HabitStore::open(MemoryStore::new());
        let ids: Vec<String> = (0..20)
            .map(|i| store.add(&format!("habit {i}")).unwrap().id)
            .collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn removed_habit_is_gone_after_reload() {
        let backend = MemoryStore::new();
        let mut store = HabitStore::open(&backend);
        let keep = store.add("Keep").unwrap();
        let dropped = store.add("Drop").unwrap();
        store.remove(&dropped.id).unwrap();

        let reopened = HabitStore::open(&backend);
        assert_eq!(reopened.habits().len(), 1);
        assert_eq!(reopened.habits()[0].id, keep.id);
    }

    #[test]
    fn unknown_id_is_not_found_and_store_unchanged() {
        let backend = MemoryStore::new();
        let mut store = HabitStore::open(&backend);
        store.add("Read").unwrap();
        let before = backend.blob();
        let day = DateKey::from_ymd(2026, 1, 5).unwrap();

        assert!(matches!(store.remove("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.set_status("nope", day, DayStatus::Completed),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.toggle("nope", day), Err(StoreError::NotFound(_))));
        assert_eq!(store.habits().len(), 1);
        assert_eq!(backend.blob(), before);
    }

    #[test]
    fn toggle_cycles_and_persists() {
        let backend = MemoryStore::new();
        let mut store = HabitStore::open(&backend);
        let id = store.add("Stretch").unwrap().id;
        let day = DateKey::from_ymd(2026, 2, 1).unwrap();

        assert_eq!(store.toggle(&id, day).unwrap(), DayStatus::Completed);
        assert_eq!(
            HabitStore::open(&backend).get(&id).unwrap().status_on(day),
            DayStatus::Completed
        );
        assert_eq!(store.toggle(&id, day).unwrap(), DayStatus::Unmarked);
        assert!(store.get(&id).unwrap().data.is_empty());
    }

    #[test]
    fn malformed_blob_opens_empty() {
        let mut store = HabitStore::open(MemoryStore::with_blob("{{not json"));
        assert!(store.habits().is_empty());
        store.add("Fresh start").unwrap();
        assert_eq!(store.persistence().load().unwrap().len(), 1);
    }

    #[test]
    fn read_streak_scenario() {
        let mut store = HabitStore::open(MemoryStore::new());
        let id = store.add("Read").unwrap().id;
        let today = DateKey::from_ymd(2026, 10, 18).unwrap();
        let yesterday = today.pred().unwrap();

        store.toggle(&id, today).unwrap();
        assert_eq!(streak_at(store.get(&id).unwrap(), today), 1);

        store.toggle(&id, yesterday).unwrap();
        assert_eq!(streak_at(store.get(&id).unwrap(), today), 2);

        store.toggle(&id, today).unwrap();
        let habit = store.get(&id).unwrap();
        assert_eq!(habit.status_on(yesterday), DayStatus::Completed);
        assert_eq!(streak_at(habit, today), 0);
    }

    #[test]
    fn toggle_today_uses_local_today() {
        let mut store = HabitStore::open(MemoryStore::new());
        let id = store.add("Meditate").unwrap().id;
        let (day, status) = store.toggle_today(&id).unwrap();
        assert_eq!(status, DayStatus::Completed);
        assert_eq!(store.get(&id).unwrap().status_on(day), DayStatus::Completed);
        assert!(matches!(store.toggle_today("nope"), Err(StoreError::NotFound(_))));
    }
}
