use crate::alerts::Alert;
use std::collections::HashSet;

/// Session-scoped dismissal state for predictive alerts.
///
/// Dismissals are keyed by alert id (the rule name), so a dismissed rule
/// stays hidden across regeneration even if it re-fires with different
/// content; only `clear` brings it back. The set lives for the process
/// lifetime and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct AlertCenter {
    dismissed: HashSet<String>,
}

impl AlertCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide a single alert id. Idempotent.
    pub fn dismiss(&mut self, id: &str) {
        self.dismissed.insert(id.to_string());
    }

    /// Hide every alert currently in `alerts`.
    pub fn dismiss_all(&mut self, alerts: &[Alert]) {
        for alert in alerts {
            self.dismissed.insert(alert.id.clone());
        }
    }

    /// Forget all dismissals.
    pub fn clear(&mut self) {
        self.dismissed.clear();
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.dismissed.contains(id)
    }

    pub fn dismissed_count(&self) -> usize {
        self.dismissed.len()
    }

    /// Stamp the dismissed flag onto freshly generated alerts.
    pub fn mark(&self, alerts: &mut [Alert]) {
        for alert in alerts {
            alert.dismissed = self.dismissed.contains(&alert.id);
        }
    }

    /// The alerts not yet dismissed, original order preserved.
    pub fn visible(&self, alerts: &[Alert]) -> Vec<Alert> {
        alerts
            .iter()
            .filter(|alert| !self.dismissed.contains(&alert.id))
            .cloned()
            .collect()
    }
}
