use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use crate::cache::keys::weather_key;
use crate::cache::models::weather::{CachedWeather, WeatherCacheEntry};

/// 天气结果缓存
///
/// 键由城市和时间桶组成。超过保留时长的条目在每次读写时顺带清理，
/// 也可由后台任务定期调用 [`WeatherCache::sweep`]。条目数达到上限时淘汰最旧的一条。
#[derive(Debug)]
pub struct WeatherCache {
    entries: Mutex<HashMap<String, WeatherCacheEntry>>,
    retention: TimeDelta,
    max_entries: usize,
}

impl WeatherCache {
    pub fn new(retention: Duration, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            retention: TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX),
            max_entries: max_entries.max(1),
        }
    }

    /// 读取缓存，返回的是副本
    pub fn get(&self, city: &str, bucket: i64) -> Option<CachedWeather> {
        self.get_at(city, bucket, Utc::now())
    }

    pub fn get_at(&self, city: &str, bucket: i64, now: DateTime<Utc>) -> Option<CachedWeather> {
        let key = weather_key(city, bucket);
        let mut entries = self.entries.lock();
        self.purge_expired(&mut entries, now);
        entries.get(&key).map(|entry| entry.payload.clone())
    }

    pub fn put(&self, city: &str, bucket: i64, payload: CachedWeather) {
        self.put_at(city, bucket, payload, Utc::now())
    }

    pub fn put_at(&self, city: &str, bucket: i64, payload: CachedWeather, now: DateTime<Utc>) {
        let key = weather_key(city, bucket);
        let mut entries = self.entries.lock();
        self.purge_expired(&mut entries, now);

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .values()
                .min_by_key(|entry| entry.inserted_at)
                .map(|entry| entry.key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("Weather cache full, evicting {}", oldest);
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key.clone(),
            WeatherCacheEntry {
                key,
                payload,
                inserted_at: now,
            },
        );
    }

    /// 清理过期条目，返回清理数量
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock();
        self.purge_expired(&mut entries, now)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(
        &self,
        entries: &mut HashMap<String, WeatherCacheEntry>,
        now: DateTime<Utc>,
    ) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| now.signed_duration_since(entry.inserted_at) < self.retention);
        before - entries.len()
    }
}
