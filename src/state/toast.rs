//! Toast notifications

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Most toasts shown at once; older ones are dropped
pub const TOAST_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub created_at: DateTime<Utc>,
    shown_at: Instant,
}

/// Newest-first queue of toasts with auto-expiry
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
        }
    }

    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        variant: ToastVariant,
        now: Instant,
    ) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            variant,
            created_at: Utc::now(),
            shown_at: now,
        };
        let id = toast.id;
        self.toasts.insert(0, toast);
        self.toasts.truncate(TOAST_LIMIT);
        id
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>, now: Instant) {
        self.push(
            title,
            Some(description.into()),
            ToastVariant::Destructive,
            now,
        );
    }

    pub fn info(&mut self, title: impl Into<String>, now: Instant) {
        self.push(title, None, ToastVariant::Default, now);
    }

    /// Remove one toast, or the newest when `id` is `None`
    pub fn dismiss(&mut self, id: Option<Uuid>) {
        match id {
            Some(id) => self.toasts.retain(|t| t.id != id),
            None => {
                if !self.toasts.is_empty() {
                    self.toasts.remove(0);
                }
            }
        }
    }

    /// Drop toasts older than the configured duration
    pub fn expire(&mut self, now: Instant) {
        let duration = self.duration;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < duration);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
