//! Notification center and threshold-based alert monitor
//!
//! [`NotificationCenter`] keeps the user-visible, persisted notification
//! list. [`AlertMonitor`] is a two-state machine (unsubscribed / subscribed)
//! that polls the weather store on a fixed interval, runs an immediate check
//! on subscribe and on coordinate change, and turns threshold breaches into
//! notifications. Warnings and alerts additionally attempt a desktop
//! notification through the [`Notifier`] seam, best-effort.

use crate::FrostwachtError;
use crate::cache::{CacheEntry, WeatherStore};
use crate::models::{Coordinates, Notification, NotificationKind};
use crate::storage::{self, Storage, keys};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Precipitation probability above which freezing conditions escalate to a
/// clearance alert, %
const ALERT_PRECIPITATION_PROBABILITY: f64 = 50.0;
/// Precipitation probability above which near-freezing conditions warn of
/// possible ice, %
const ICE_PRECIPITATION_PROBABILITY: f64 = 40.0;
/// Minimum predicted accumulation for a snowfall warning, cm
const SNOWFALL_WARNING_CM: f64 = 1.0;

/// Desktop notification seam. The default implementation only logs; a real
/// frontend can plug in a native display here.
pub trait Notifier: Send + Sync {
    /// Ask for permission to show notifications. Returns whether granted.
    fn request_permission(&self) -> bool;

    /// Show a notification, best-effort. Failures stay inside the
    /// implementation.
    fn show(&self, title: &str, message: &str);
}

/// Notifier that writes to the log instead of a desktop surface
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_permission(&self) -> bool {
        true
    }

    fn show(&self, title: &str, message: &str) {
        info!("Notification: {title}: {message}");
    }
}

/// Ordered, persisted list of user-visible notifications
pub struct NotificationCenter {
    storage: Arc<dyn Storage>,
    notifications: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    /// Restore the notification list from storage, or start empty
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let notifications: Vec<Notification> =
            storage::get_value(storage.as_ref(), keys::NOTIFICATIONS_LIST)
                .await
                .unwrap_or_default();
        let next_id = notifications.iter().map(|n| n.id).max().map_or(1, |m| m + 1);
        Self {
            storage,
            notifications,
            next_id,
        }
    }

    /// Append a new notification and persist the list
    pub async fn push(&mut self, kind: NotificationKind, title: &str, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notifications
            .push(Notification::new(id, kind, title, message));
        self.persist().await;
        id
    }

    #[must_use]
    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Mark a notification as read. Returns whether the id existed.
    pub async fn mark_read(&mut self, id: u64) -> bool {
        let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        notification.read = true;
        self.persist().await;
        true
    }

    /// Remove a single notification. Returns whether the id existed.
    pub async fn remove(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        let removed = self.notifications.len() != before;
        if removed {
            self.persist().await;
        }
        removed
    }

    /// Remove all notifications
    pub async fn clear(&mut self) {
        self.notifications.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        storage::put_value(
            self.storage.as_ref(),
            keys::NOTIFICATIONS_LIST,
            &self.notifications,
        )
        .await;
    }
}

/// Threshold engine polling the weather store while subscribed
pub struct AlertMonitor {
    store: Arc<Mutex<WeatherStore>>,
    center: NotificationCenter,
    notifier: Arc<dyn Notifier>,
    storage: Arc<dyn Storage>,
    coordinates: Option<(Coordinates, String)>,
    subscribed: bool,
}

impl AlertMonitor {
    /// Build a monitor, restoring the subscription flag from storage
    pub async fn new(
        store: Arc<Mutex<WeatherStore>>,
        center: NotificationCenter,
        notifier: Arc<dyn Notifier>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let subscribed = storage::get_value(storage.as_ref(), keys::NOTIFICATIONS_ENABLED)
            .await
            .unwrap_or(false);
        Self {
            store,
            center,
            notifier,
            storage,
            coordinates: None,
            subscribed,
        }
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.center.all()
    }

    pub fn center_mut(&mut self) -> &mut NotificationCenter {
        &mut self.center
    }

    /// Enable polling. Requires notification permission; runs an immediate
    /// check when coordinates are already set.
    pub async fn subscribe(&mut self) -> Result<()> {
        if !self.notifier.request_permission() {
            return Err(FrostwachtError::validation("Notification permission was not granted").into());
        }
        self.subscribed = true;
        storage::put_value(self.storage.as_ref(), keys::NOTIFICATIONS_ENABLED, &true).await;
        info!("Weather notifications enabled");
        self.poll_once().await
    }

    /// Stop polling and record an info notification
    pub async fn unsubscribe(&mut self) {
        self.subscribed = false;
        storage::put_value(self.storage.as_ref(), keys::NOTIFICATIONS_ENABLED, &false).await;
        self.center
            .push(
                NotificationKind::Info,
                "Weather notifications disabled",
                "You will no longer receive weather alerts for your location.",
            )
            .await;
        info!("Weather notifications disabled");
    }

    /// Change the monitored location; triggers an immediate check while
    /// subscribed.
    pub async fn set_coordinates(&mut self, coordinates: Coordinates, label: &str) -> Result<()> {
        self.coordinates = Some((coordinates, label.to_string()));
        if self.subscribed {
            self.poll_once().await
        } else {
            Ok(())
        }
    }

    /// One poll cycle: refresh weather data and evaluate the thresholds.
    /// A no-op while unsubscribed or without coordinates.
    pub async fn poll_once(&mut self) -> Result<()> {
        if !self.subscribed {
            return Ok(());
        }
        let Some((coordinates, label)) = self.coordinates.clone() else {
            debug!("Notification poll skipped, no coordinates selected");
            return Ok(());
        };

        let entry = self
            .store
            .lock()
            .await
            .get_weather_data(coordinates, &label)
            .await?;
        self.evaluate(&entry).await;
        Ok(())
    }

    /// Apply the threshold cascade (first match wins) plus the independent
    /// snowfall check. At most one notification per branch per cycle.
    async fn evaluate(&mut self, entry: &CacheEntry) {
        let probability = entry.current.precipitation_probability.unwrap_or(0.0);

        if let Some(temperature) = entry.current.temperature {
            if temperature < 0.0 && probability > ALERT_PRECIPITATION_PROBABILITY {
                let message = format!(
                    "{:.1}°C with {probability:.0}% precipitation probability at {}. Clearing and gritting required.",
                    temperature, entry.location_label
                );
                self.emit(NotificationKind::Alert, "Clearance required", &message)
                    .await;
            } else if temperature < 0.0 {
                let message = format!(
                    "Temperatures below freezing at {} ({:.1}°C).",
                    entry.location_label, temperature
                );
                self.emit(NotificationKind::Warning, "Frost", &message).await;
            } else if temperature <= 3.0 && probability > ICE_PRECIPITATION_PROBABILITY {
                let message = format!(
                    "{:.1}°C with {probability:.0}% precipitation probability at {}. Surfaces may ice over.",
                    temperature, entry.location_label
                );
                self.emit(NotificationKind::Warning, "Possible ice", &message)
                    .await;
            }
        }

        let snowfall = &entry.advisories.snowfall;
        if snowfall.will_snow && snowfall.total_amount_cm > SNOWFALL_WARNING_CM {
            let message = format!(
                "Up to {:.1} cm of snow expected at {}.",
                snowfall.total_amount_cm, entry.location_label
            );
            self.emit(NotificationKind::Warning, "Snowfall expected", &message)
                .await;
        }
    }

    async fn emit(&mut self, kind: NotificationKind, title: &str, message: &str) {
        self.center.push(kind, title, message).await;
        if matches!(kind, NotificationKind::Warning | NotificationKind::Alert) {
            self.notifier.show(title, message);
        }
    }
}

/// Drive an [`AlertMonitor`] on a fixed interval until the task is dropped
pub async fn poll_loop(monitor: Arc<Mutex<AlertMonitor>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // the first tick completes immediately; subscribe already ran a check
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let mut monitor = monitor.lock().await;
        if !monitor.is_subscribed() {
            continue;
        }
        if let Err(error) = monitor.poll_once().await {
            warn!("Notification poll failed: {error:#}");
        }
    }
}
