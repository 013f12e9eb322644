//! Recent-analysis cache with an injected clock

use crate::model::Analysis;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Time source injected into the cache so tests can control expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Process-local cache of recent analyses keyed by
/// `resumeId_occupationCode`. Last write wins; entries expire after the TTL
/// and are pruned on read.
pub struct AnalysisCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, (DateTime<Utc>, Analysis)>>,
}

impl AnalysisCache {
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn key(resume_id: &str, occupation_code: &str) -> String {
        format!("{}_{}", resume_id, occupation_code)
    }

    pub fn get(&self, key: &str) -> Option<Analysis> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((stored_at, analysis)) if now - *stored_at < self.ttl => Some(analysis.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, analysis: Analysis) {
        let now = self.clock.now();
        self.entries.lock().unwrap().insert(key, (now, analysis));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Utc::now()),
            })
        }

        fn advance(&self, secs: i64) {
            let mut now = self.now.lock().unwrap();
            *now += Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn sample_analysis() -> Analysis {
        Analysis::failed("r1", "15-1252.00", "Software Developers", "n/a", 0, Utc::now())
    }

    #[test]
    fn test_fresh_entry_is_returned() {
        let clock = ManualClock::new();
        let cache = AnalysisCache::new(3600, clock.clone());
        let key = AnalysisCache::key("r1", "15-1252.00");

        cache.put(key.clone(), sample_analysis());
        clock.advance(3599);
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_expired_entry_is_pruned() {
        let clock = ManualClock::new();
        let cache = AnalysisCache::new(3600, clock.clone());
        let key = AnalysisCache::key("r1", "15-1252.00");

        cache.put(key.clone(), sample_analysis());
        clock.advance(3600);
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let clock = ManualClock::new();
        let cache = AnalysisCache::new(3600, clock);
        let key = AnalysisCache::key("r1", "15-1252.00");

        let mut second = sample_analysis();
        second.occupation_title = "Updated".to_string();
        cache.put(key.clone(), sample_analysis());
        cache.put(key.clone(), second);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).unwrap().occupation_title, "Updated");
    }

    #[test]
    fn test_key_format() {
        assert_eq!(AnalysisCache::key("abc", "15-1252.00"), "abc_15-1252.00");
    }
}
