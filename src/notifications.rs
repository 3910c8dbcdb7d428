//! Workshop notifications and the rules for which ones a learner sees.
//!
//! Notifications come from two places: a shared feed (scoped to products by
//! host and optional slug) and the workshop's own list. Fetching and caching
//! the shared feed is the caller's business; this module only filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Informational.
    Info,
    /// Something the learner should look at.
    Warning,
    /// Something is broken.
    Danger,
}

/// A product a notification is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Host the product is served from.
    pub host: String,
    /// Product slug; when absent, every product on the host matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl ProductRef {
    /// Returns `true` if this scope covers `product`.
    #[must_use]
    pub fn matches(&self, product: &ProductRef) -> bool {
        self.host == product.host
            && self
                .slug
                .as_ref()
                .map_or(true, |slug| product.slug.as_ref() == Some(slug))
    }
}

/// A message shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier used for muting.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Optional link for more information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Products this applies to; `None` means every product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductRef>>,
    /// When the notification stops being shown.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Returns `true` if the notification has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }

    /// Returns `true` if the notification applies to `product`.
    #[must_use]
    pub fn applies_to(&self, product: &ProductRef) -> bool {
        self.products
            .as_ref()
            .map_or(true, |scopes| scopes.iter().any(|s| s.matches(product)))
    }
}

/// Learner-side notification preferences, from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Deployed (hosted) instances show no notifications.
    pub deployed: bool,
    /// Ids the learner has muted.
    pub muted: Vec<String>,
}

/// Inputs for [`visible_notifications`] besides the notifications themselves.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityContext<'a> {
    /// The workshop's product.
    pub product: &'a ProductRef,
    /// Ids the learner has muted.
    pub muted: &'a [String],
    /// Deployed (hosted) instances show no notifications.
    pub deployed: bool,
    /// Current time, for expiry.
    pub now: DateTime<Utc>,
}

/// Selects the notifications the learner should see.
///
/// Shared-feed notifications are dropped when expired or scoped to other
/// products; the workshop's own notifications are appended unfiltered by
/// scope. Muted ids are removed from the combined list.
#[must_use]
pub fn visible_notifications(
    remote: &[Notification],
    local: &[Notification],
    ctx: VisibilityContext<'_>,
) -> Vec<Notification> {
    if ctx.deployed {
        return Vec::new();
    }

    remote
        .iter()
        .filter(|n| !n.is_expired(ctx.now))
        .filter(|n| n.applies_to(ctx.product))
        .chain(local)
        .filter(|n| !ctx.muted.contains(&n.id))
        .cloned()
        .collect()
}
