//! Weather store: TTL cache, daily aggregation, and listener bus
//!
//! [`WeatherStore`] is an explicit context object owned by the application
//! shell and handed to every consumer. A cache hit requires both a coordinate
//! tolerance match and freshness; a fetch failure serves the stale entry as a
//! fallback when one exists. Fetch results are committed through a monotonic
//! sequence guard so a slow request resolving late cannot overwrite data from
//! a request issued after it.

use crate::advisory;
use crate::models::{
    Coordinates, DailySummary, IceRiskAssessment, IceRiskLevel, SnowfallPrediction,
    WeatherCondition, WeatherIcon, WeatherObservation,
};
use crate::provider::WeatherProvider;
use crate::storage::{self, Storage, keys};
use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Consecutive fetch failures before the stale-data warning is raised
const STALE_WARNING_THRESHOLD: u32 = 3;

/// Advisory outputs recomputed on every cache replacement
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryNotices {
    pub ice_risk: IceRiskAssessment,
    pub snowfall: SnowfallPrediction,
    pub winter_service_required: bool,
}

/// One fully-populated cache generation. Constructed fresh on every fetch,
/// never mutated afterwards, replaced wholesale.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub coordinates: Coordinates,
    pub location_label: String,
    pub current: WeatherObservation,
    /// Hourly forecast, chronological, capped to the configured horizon
    pub hourly: Vec<WeatherObservation>,
    /// One aggregate per calendar date, derived from `hourly`
    pub daily: Vec<DailySummary>,
    pub advisories: AdvisoryNotices,
    pub update_time: DateTime<Utc>,
}

/// Slimmed-down persisted form of the cache. Only enough to restore the
/// selected location across restarts; weather data is always refetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub coordinates: Coordinates,
    pub location_label: String,
    /// Unix timestamp of the cache generation this snapshot was taken from
    pub saved_at: i64,
}

/// Result of restoring a [`SessionSnapshot`] on startup
#[derive(Debug, Clone, PartialEq)]
pub struct RehydratedSession {
    pub coordinates: Coordinates,
    pub location_label: String,
    /// Whether the snapshot was saved within the TTL. A stale snapshot still
    /// restores the location but callers should refresh in the background.
    pub fresh: bool,
}

pub type WeatherListener = Box<dyn Fn(&CacheEntry) + Send>;

/// Cache and refresh coordinator for one selected location
pub struct WeatherStore {
    provider: Arc<dyn WeatherProvider>,
    storage: Arc<dyn Storage>,
    ttl: Duration,
    forecast_days: u32,
    snowfall_horizon_hours: usize,
    entry: Option<CacheEntry>,
    listeners: Vec<(u64, WeatherListener)>,
    next_listener_id: u64,
    consecutive_failures: u32,
    fetch_seq: u64,
    applied_seq: u64,
}

impl WeatherStore {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        storage: Arc<dyn Storage>,
        ttl: Duration,
        forecast_days: u32,
        snowfall_horizon_hours: usize,
    ) -> Self {
        Self {
            provider,
            storage,
            ttl,
            forecast_days,
            snowfall_horizon_hours,
            entry: None,
            listeners: Vec::new(),
            next_listener_id: 1,
            consecutive_failures: 0,
            fetch_seq: 0,
            applied_seq: 0,
        }
    }

    /// Serve weather data for the given coordinates, fetching when the cache
    /// is missing, stale, or populated for a different location.
    ///
    /// On fetch failure an existing entry is served as a fallback, however
    /// stale; the error only propagates when there is nothing to fall back
    /// to.
    pub async fn get_weather_data(
        &mut self,
        coordinates: Coordinates,
        location_label: &str,
    ) -> Result<CacheEntry> {
        coordinates.validate()?;

        if let Some(entry) = &self.entry {
            if entry.coordinates.matches(&coordinates) && self.is_fresh(entry, Utc::now()) {
                debug!("Serving cached weather for {}", coordinates.format());
                return Ok(entry.clone());
            }
        }

        let seq = self.begin_fetch();
        match self.fetch_entry(coordinates, location_label).await {
            Ok(entry) => Ok(self.commit(seq, entry).await),
            Err(error) => self.handle_fetch_failure(error).await,
        }
    }

    /// Register a listener invoked synchronously, in registration order, after
    /// every cache replacement. Returns an id for [`Self::unsubscribe`].
    pub fn subscribe(&mut self, listener: WeatherListener) -> u64 {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns whether the id was registered.
    pub fn unsubscribe(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Current cache generation, if any, regardless of freshness
    #[must_use]
    pub fn cached(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Restore the last selected location from storage, if a snapshot exists
    pub async fn rehydrate(&self) -> Option<RehydratedSession> {
        let snapshot: SessionSnapshot =
            storage::get_value(self.storage.as_ref(), keys::WEATHER_CACHE).await?;
        let age_secs = Utc::now().timestamp() - snapshot.saved_at;
        let fresh = age_secs >= 0 && (age_secs as u64) < self.ttl.as_secs();
        Some(RehydratedSession {
            coordinates: snapshot.coordinates,
            location_label: snapshot.location_label,
            fresh,
        })
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.update_time)
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(true)
    }

    /// Hand out the next fetch sequence number
    fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Install a fetched entry unless a later fetch already committed.
    /// Returns the entry the store holds afterwards.
    async fn commit(&mut self, seq: u64, entry: CacheEntry) -> CacheEntry {
        if seq <= self.applied_seq {
            debug!(
                "Discarding superseded fetch result (seq {seq}, latest applied {})",
                self.applied_seq
            );
            return self.entry.clone().unwrap_or(entry);
        }

        self.applied_seq = seq;
        self.entry = Some(entry.clone());
        self.consecutive_failures = 0;
        storage::put_value(self.storage.as_ref(), keys::PROVIDER_FAILURES, &0u32).await;
        self.persist_snapshot(&entry).await;
        self.notify_listeners(&entry);
        info!(
            "Weather cache updated for {} ({} hourly entries)",
            entry.coordinates.format(),
            entry.hourly.len()
        );
        entry
    }

    async fn fetch_entry(
        &self,
        coordinates: Coordinates,
        location_label: &str,
    ) -> Result<CacheEntry> {
        let current = self.provider.fetch_current(coordinates).await?;
        let from = Utc::now().date_naive();
        let to = from
            .checked_add_days(Days::new(u64::from(self.forecast_days)))
            .unwrap_or(from);
        let mut hourly = self.provider.fetch_forecast(coordinates, from, to).await?;
        hourly.truncate(self.forecast_days as usize * 24);

        let daily = aggregate_daily(&hourly);
        let advisories = compute_advisories(&current, &hourly, self.snowfall_horizon_hours);

        Ok(CacheEntry {
            coordinates,
            location_label: location_label.to_string(),
            current,
            hourly,
            daily,
            advisories,
            update_time: Utc::now(),
        })
    }

    async fn handle_fetch_failure(&mut self, error: anyhow::Error) -> Result<CacheEntry> {
        self.consecutive_failures += 1;
        storage::put_value(
            self.storage.as_ref(),
            keys::PROVIDER_FAILURES,
            &self.consecutive_failures,
        )
        .await;
        storage::put_value(
            self.storage.as_ref(),
            keys::LAST_FAILURE_TIME,
            &Utc::now().timestamp(),
        )
        .await;

        if self.consecutive_failures >= STALE_WARNING_THRESHOLD {
            warn!(
                "{} consecutive weather provider failures, displayed data may be stale",
                self.consecutive_failures
            );
        }

        if let Some(entry) = &self.entry {
            warn!("Weather fetch failed, serving stale cache: {error:#}");
            return Ok(entry.clone());
        }
        Err(error)
    }

    async fn persist_snapshot(&self, entry: &CacheEntry) {
        let snapshot = SessionSnapshot {
            coordinates: entry.coordinates,
            location_label: entry.location_label.clone(),
            saved_at: entry.update_time.timestamp(),
        };
        storage::put_value(self.storage.as_ref(), keys::WEATHER_CACHE, &snapshot).await;
    }

    fn notify_listeners(&self, entry: &CacheEntry) {
        for (id, listener) in &self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(entry))).is_err() {
                warn!("Weather listener {id} panicked during notification");
            }
        }
    }
}

/// Recompute the advisory outputs attached to a cache generation
fn compute_advisories(
    current: &WeatherObservation,
    hourly: &[WeatherObservation],
    snowfall_horizon_hours: usize,
) -> AdvisoryNotices {
    let ice_risk = match current.temperature {
        Some(temperature) => advisory::calculate_ice_risk(
            temperature,
            current.precipitation.unwrap_or(0.0),
            current.relative_humidity.unwrap_or(0.0),
        ),
        None => IceRiskAssessment {
            risk: IceRiskLevel::Low,
            description: "No significant risk of icing".to_string(),
        },
    };
    let winter_service_required = current
        .temperature
        .is_some_and(advisory::winter_service_required);
    let snowfall = advisory::predict_snowfall(hourly, snowfall_horizon_hours);

    AdvisoryNotices {
        ice_risk,
        snowfall,
        winter_service_required,
    }
}

/// Group hourly entries by the provider's calendar date and aggregate each
/// group. Dates appear in first-seen order; no timezone conversion happens
/// beyond what the provider timestamps already carry.
#[must_use]
pub fn aggregate_daily(hourly: &[WeatherObservation]) -> Vec<DailySummary> {
    let mut groups: Vec<(NaiveDate, Vec<&WeatherObservation>)> = Vec::new();
    for observation in hourly {
        let date = observation.timestamp.date_naive();
        match groups.iter_mut().find(|(grouped, _)| *grouped == date) {
            Some((_, entries)) => entries.push(observation),
            None => groups.push((date, vec![observation])),
        }
    }
    groups
        .into_iter()
        .map(|(date, entries)| summarize_day(date, &entries))
        .collect()
}

fn summarize_day(date: NaiveDate, entries: &[&WeatherObservation]) -> DailySummary {
    let max_temperature = entries
        .iter()
        .filter_map(|o| o.temperature)
        .fold(None, |acc: Option<f64>, t| {
            Some(acc.map_or(t, |current| current.max(t)))
        });
    let min_temperature = entries
        .iter()
        .filter_map(|o| o.temperature)
        .fold(None, |acc: Option<f64>, t| {
            Some(acc.map_or(t, |current| current.min(t)))
        });

    let condition = dominant(
        entries.iter().map(|o| o.condition),
        WeatherCondition::Unknown,
    );
    let icon = dominant(entries.iter().map(|o| o.icon), WeatherIcon::Cloudy);

    let precipitation_sum = entries.iter().filter_map(|o| o.precipitation).sum();
    let probabilities: Vec<f64> = entries
        .iter()
        .filter_map(|o| o.precipitation_probability)
        .collect();
    let precipitation_probability = if probabilities.is_empty() {
        None
    } else {
        Some(probabilities.iter().sum::<f64>() / probabilities.len() as f64)
    };

    let snow_amount_cm = entries
        .iter()
        .filter_map(|o| match (o.temperature, o.precipitation) {
            (Some(t), Some(p)) if t <= advisory::SNOW_TEMPERATURE_LIMIT && p > 0.0 => {
                Some(advisory::snow_amount_cm(t, p))
            }
            _ => None,
        })
        .sum();

    DailySummary {
        date,
        max_temperature,
        min_temperature,
        condition,
        icon,
        precipitation_sum,
        precipitation_probability,
        snow_amount_cm,
    }
}

/// Mode by frequency; the first-seen value wins ties
fn dominant<T: Copy + PartialEq>(items: impl Iterator<Item = T>, fallback: T) -> T {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(value, _)| *value == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map_or(fallback, |(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn observation(hour: u32, temperature: Option<f64>, precipitation: Option<f64>) -> WeatherObservation {
        let offset = FixedOffset::east_opt(3600).unwrap();
        WeatherObservation {
            timestamp: offset
                .with_ymd_and_hms(2026, 1, 10 + hour / 24, hour % 24, 0, 0)
                .unwrap(),
            temperature,
            precipitation,
            precipitation_probability: None,
            relative_humidity: Some(60.0),
            cloud_cover: None,
            wind_speed: None,
            wind_direction: None,
            wind_gust_speed: None,
            condition: WeatherCondition::Dry,
            icon: WeatherIcon::Cloudy,
            soil_temperature: None,
            pressure: None,
            visibility: None,
            dew_point: None,
            source_id: Some("1234".to_string()),
        }
    }

    struct ScriptedProvider {
        current: WeatherObservation,
        forecast: Vec<WeatherObservation>,
        fail: AtomicBool,
        current_calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(current: WeatherObservation, forecast: Vec<WeatherObservation>) -> Self {
            Self {
                current,
                forecast,
                fail: AtomicBool::new(false),
                current_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn fetch_current(&self, _coordinates: Coordinates) -> Result<WeatherObservation> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("provider offline");
            }
            Ok(self.current.clone())
        }

        async fn fetch_forecast(
            &self,
            _coordinates: Coordinates,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<WeatherObservation>> {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("provider offline");
            }
            Ok(self.forecast.clone())
        }
    }

    fn store_with(provider: Arc<ScriptedProvider>) -> WeatherStore {
        WeatherStore::new(
            provider,
            Arc::new(MemoryStorage::new()),
            Duration::from_secs(15 * 60),
            14,
            24,
        )
    }

    fn coords(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    #[tokio::test]
    async fn test_cache_hit_within_coordinate_tolerance() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), Some(0.0)),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider.clone());

        store
            .get_weather_data(coords(52.515, 13.405), "Berlin")
            .await
            .unwrap();
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);

        // rounds to within 0.01, served from cache
        store
            .get_weather_data(coords(52.521, 13.401), "Berlin")
            .await
            .unwrap();
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);

        // outside tolerance, refetched
        store
            .get_weather_data(coords(52.60, 13.40), "Berlin")
            .await
            .unwrap();
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_cache_served_on_fetch_failure() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), Some(0.0)),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider.clone());
        let position = coords(50.83, 12.92);

        let first = store.get_weather_data(position, "Chemnitz").await.unwrap();

        // age the entry past the TTL and take the provider down
        store.entry.as_mut().unwrap().update_time = Utc::now() - chrono::Duration::minutes(30);
        provider.fail.store(true, Ordering::SeqCst);

        let fallback = store.get_weather_data(position, "Chemnitz").await.unwrap();
        assert_eq!(fallback.current, first.current);
        assert_eq!(store.consecutive_failures(), 1);
    }

    #[tokio::test]
    async fn test_failure_without_cache_propagates() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![],
        ));
        provider.fail.store(true, Ordering::SeqCst);
        let mut store = store_with(provider);

        let result = store.get_weather_data(coords(50.83, 12.92), "Chemnitz").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failure_counter_accumulates_and_resets() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider.clone());
        let position = coords(50.83, 12.92);

        store.get_weather_data(position, "Chemnitz").await.unwrap();
        store.entry.as_mut().unwrap().update_time = Utc::now() - chrono::Duration::minutes(30);
        provider.fail.store(true, Ordering::SeqCst);

        for expected in 1..=3 {
            store.get_weather_data(position, "Chemnitz").await.unwrap();
            assert_eq!(store.consecutive_failures(), expected);
            store.entry.as_mut().unwrap().update_time =
                Utc::now() - chrono::Duration::minutes(30);
        }

        provider.fail.store(false, Ordering::SeqCst);
        store.get_weather_data(position, "Chemnitz").await.unwrap();
        assert_eq!(store.consecutive_failures(), 0);
    }

    #[tokio::test]
    async fn test_listeners_run_in_registration_order() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider);

        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            store.subscribe(Box::new(move |_| seen.lock().unwrap().push(tag)));
        }

        store
            .get_weather_data(coords(50.83, 12.92), "Chemnitz")
            .await
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_panicking_listener_does_not_block_others() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider);

        let reached = Arc::new(Mutex::new(false));
        store.subscribe(Box::new(|_| panic!("listener bug")));
        {
            let reached = reached.clone();
            store.subscribe(Box::new(move |_| *reached.lock().unwrap() = true));
        }

        store
            .get_weather_data(coords(50.83, 12.92), "Chemnitz")
            .await
            .unwrap();
        assert!(*reached.lock().unwrap());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_notifications() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider);

        let calls = Arc::new(AtomicUsize::new(0));
        let id = {
            let calls = calls.clone();
            store.subscribe(Box::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }))
        };

        let position = coords(50.83, 12.92);
        store.get_weather_data(position, "Chemnitz").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));

        store.entry.as_mut().unwrap().update_time = Utc::now() - chrono::Duration::minutes(30);
        store.get_weather_data(position, "Chemnitz").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_superseded_fetch_does_not_overwrite_later_result() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![observation(13, Some(1.0), None)],
        ));
        let mut store = store_with(provider);
        let position = coords(50.83, 12.92);

        let slow_seq = store.begin_fetch();
        let fast_seq = store.begin_fetch();

        let fast_entry = store.fetch_entry(position, "fast").await.unwrap();
        let slow_entry = store.fetch_entry(position, "slow").await.unwrap();

        store.commit(fast_seq, fast_entry).await;
        let served = store.commit(slow_seq, slow_entry).await;

        assert_eq!(served.location_label, "fast");
        assert_eq!(store.cached().unwrap().location_label, "fast");
    }

    #[tokio::test]
    async fn test_session_snapshot_rehydrates_location() {
        let provider = Arc::new(ScriptedProvider::new(
            observation(12, Some(2.0), None),
            vec![observation(13, Some(1.0), None)],
        ));
        let storage = Arc::new(MemoryStorage::new());
        let mut store = WeatherStore::new(
            provider,
            storage.clone(),
            Duration::from_secs(15 * 60),
            14,
            24,
        );
        let position = coords(50.83, 12.92);

        store.get_weather_data(position, "Chemnitz").await.unwrap();

        let restored = store.rehydrate().await.unwrap();
        assert!(restored.coordinates.matches(&position));
        assert_eq!(restored.location_label, "Chemnitz");
        assert!(restored.fresh);
    }

    #[test]
    fn test_daily_aggregation_exact_extremes() {
        // 24 entries for one date; max and min must survive aggregation
        // without rounding loss
        let mut hourly: Vec<WeatherObservation> = (0..24)
            .map(|h| observation(h, Some(1.0), Some(0.0)))
            .collect();
        hourly[14].temperature = Some(4.2);
        hourly[4].temperature = Some(-1.3);

        let daily = aggregate_daily(&hourly);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].max_temperature, Some(4.2));
        assert_eq!(daily[0].min_temperature, Some(-1.3));
    }

    #[test]
    fn test_daily_aggregation_groups_by_date_and_sums() {
        let mut hourly = Vec::new();
        for h in 0..48 {
            let mut o = observation(h, Some(-1.0), Some(0.5));
            if h >= 24 {
                o.condition = WeatherCondition::Snow;
                o.icon = WeatherIcon::Snow;
            }
            o.precipitation_probability = Some(if h >= 24 { 80.0 } else { 40.0 });
            hourly.push(o);
        }

        let daily = aggregate_daily(&hourly);
        assert_eq!(daily.len(), 2);

        // summed precipitation, averaged probability
        assert!((daily[0].precipitation_sum - 12.0).abs() < 1e-9);
        assert_eq!(daily[0].precipitation_probability, Some(40.0));
        assert_eq!(daily[1].precipitation_probability, Some(80.0));

        // at -1°C the factor-10 bucket applies: 0.5 mm/h over 24 h = 12 cm
        assert!((daily[1].snow_amount_cm - 12.0).abs() < 1e-9);
        assert_eq!(daily[1].condition, WeatherCondition::Snow);
    }

    #[test]
    fn test_dominant_first_seen_wins_ties() {
        let items = [
            WeatherCondition::Rain,
            WeatherCondition::Snow,
            WeatherCondition::Rain,
            WeatherCondition::Snow,
        ];
        assert_eq!(
            dominant(items.into_iter(), WeatherCondition::Unknown),
            WeatherCondition::Rain
        );
    }

    #[test]
    fn test_advisories_degrade_without_current_temperature() {
        let mut current = observation(12, None, Some(1.0));
        current.temperature = None;
        let advisories = compute_advisories(&current, &[], 24);
        assert_eq!(advisories.ice_risk.risk, IceRiskLevel::Low);
        assert!(!advisories.winter_service_required);
        assert!(!advisories.snowfall.will_snow);
    }
}
