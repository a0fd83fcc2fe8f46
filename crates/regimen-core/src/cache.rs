//! Memoization of computed month calendars.
//!
//! The manager is the only writer: it stores a [`CalendarMonth`] after
//! computing it and invalidates the affected keys whenever a log entry is
//! created, edited or deleted.

use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard},
};

use crate::{access::UserId, models::CalendarMonth};

/// Groups of cached values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Month calendars built from workout logs
    WorkoutLog,
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheNamespace::WorkoutLog => f.write_str("workout_log"),
        }
    }
}

/// Structured cache key for one user's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub namespace: CacheNamespace,
    pub user_id: UserId,
    pub year: i16,
    pub month: i8,
}

impl CacheKey {
    /// Key of the workout log calendar of `user_id` for the given month.
    pub fn workout_log(user_id: UserId, year: i16, month: i8) -> Self {
        Self {
            namespace: CacheNamespace::WorkoutLog,
            user_id,
            year,
            month,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{:02}",
            self.namespace, self.user_id, self.year, self.month
        )
    }
}

/// Storage for computed calendars.
///
/// Every key carries a generation that [`CalendarCache::invalidate`] bumps.
/// A reader takes the generation before it reads the logs and stores its
/// month with [`CalendarCache::set_if_current`], so a month built before a
/// concurrent write is dropped instead of cached.
pub trait CalendarCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<CalendarMonth>;

    /// Current generation of `key`; starts at 0.
    fn generation(&self, key: &CacheKey) -> u64;

    /// Stores `month` unless `key` was invalidated since `generation` was
    /// read. Returns whether the month was stored.
    fn set_if_current(&self, key: CacheKey, generation: u64, month: CalendarMonth) -> bool;

    fn invalidate(&self, key: &CacheKey);
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CalendarMonth>,
    generations: HashMap<CacheKey, u64>,
}

/// Process-local cache backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    state: Mutex<CacheState>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // A panic while holding the lock cannot leave a half-written entry,
        // so the map is still usable
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().entries.is_empty()
    }
}

impl CalendarCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<CalendarMonth> {
        self.state().entries.get(key).cloned()
    }

    fn generation(&self, key: &CacheKey) -> u64 {
        self.state().generations.get(key).copied().unwrap_or(0)
    }

    fn set_if_current(&self, key: CacheKey, generation: u64, month: CalendarMonth) -> bool {
        let mut state = self.state();
        let current = state.generations.get(&key).copied().unwrap_or(0);
        if current != generation {
            log::debug!("skipped storing {key}: invalidated since generation {generation}");
            return false;
        }
        state.entries.insert(key, month);
        true
    }

    fn invalidate(&self, key: &CacheKey) {
        let mut state = self.state();
        *state.generations.entry(*key).or_insert(0) += 1;
        if state.entries.remove(key).is_some() {
            log::debug!("invalidated cache entry {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn month(year: i16, month: i8) -> CalendarMonth {
        CalendarMonth {
            year,
            month,
            days: BTreeMap::new(),
        }
    }

    #[test]
    fn test_set_get_invalidate() {
        let cache = MemoryCache::new();
        let key = CacheKey::workout_log(1, 2024, 3);

        assert!(cache.get(&key).is_none());

        assert!(cache.set_if_current(key, 0, month(2024, 3)));
        assert_eq!(cache.get(&key), Some(month(2024, 3)));

        cache.invalidate(&key);
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_are_per_user_and_month() {
        let cache = MemoryCache::new();
        cache.set_if_current(CacheKey::workout_log(1, 2024, 3), 0, month(2024, 3));
        cache.set_if_current(CacheKey::workout_log(2, 2024, 3), 0, month(2024, 3));
        cache.set_if_current(CacheKey::workout_log(1, 2024, 4), 0, month(2024, 4));
        assert_eq!(cache.len(), 3);

        cache.invalidate(&CacheKey::workout_log(1, 2024, 3));
        assert!(cache.get(&CacheKey::workout_log(2, 2024, 3)).is_some());
        assert!(cache.get(&CacheKey::workout_log(1, 2024, 4)).is_some());
    }

    #[test]
    fn test_invalidation_rejects_months_built_before_it() {
        let cache = MemoryCache::new();
        let key = CacheKey::workout_log(1, 2024, 3);

        let generation = cache.generation(&key);
        // A write lands while the month is being built
        cache.invalidate(&key);
        assert_eq!(cache.generation(&key), generation + 1);

        assert!(!cache.set_if_current(key, generation, month(2024, 3)));
        assert!(cache.get(&key).is_none());

        assert!(cache.set_if_current(key, cache.generation(&key), month(2024, 3)));
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_invalidation_only_bumps_its_own_key() {
        let cache = MemoryCache::new();
        cache.invalidate(&CacheKey::workout_log(1, 2024, 3));
        assert_eq!(cache.generation(&CacheKey::workout_log(1, 2024, 4)), 0);
        assert_eq!(cache.generation(&CacheKey::workout_log(2, 2024, 3)), 0);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            CacheKey::workout_log(7, 2024, 3).to_string(),
            "workout_log:7:2024-03"
        );
    }
}
