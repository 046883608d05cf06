//! Transient notification banners.
//!
//! Each banner runs its own lifecycle (visible, fading, removed). Timers live
//! in the UI layer; this module only tracks which banners exist and which
//! phase they are in, so several can be on screen at once without queuing.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use super::todos::TodoError;

/// Banner severity, mapped to a CSS modifier and an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Info,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert--success",
            Self::Warning => "alert--warning",
            Self::Info => "alert--info",
            Self::Danger => "alert--danger",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
            Self::Danger => "🗑️",
        }
    }
}

/// A message waiting to be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Severity::Danger, message)
    }
}

impl From<&TodoError> for Notice {
    fn from(err: &TodoError) -> Self {
        match err {
            TodoError::EmptyText => Self::warning("Please enter a task before adding it to your list!"),
            TodoError::TextTooLong { max, .. } => {
                Self::warning(format!("Task is too long! Please keep it under {max} characters."))
            }
            TodoError::ImportNotSequence => Self::danger("Import failed: the file does not contain a task list."),
            TodoError::ImportDecode(_) | TodoError::InvalidRecord { .. } | TodoError::DuplicateId(_) => {
                Self::danger(format!("Import failed: {err}"))
            }
            TodoError::Encode(_) => Self::danger("Export failed: tasks could not be encoded."),
            TodoError::IdsExhausted(_) => {
                Self::warning("No more tasks can be added: task ids are used up.")
            }
        }
    }
}

/// Lifecycle phase of a banner on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BannerPhase {
    #[default]
    Visible,
    Fading,
}

/// A banner currently in the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub phase: BannerPhase,
}

/// Stack of independently timed banners, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub banners: Vec<Banner>,
    next_id: u64,
}

impl NotificationState {
    /// Append a banner and return its id for the fade/remove timers.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.banners.push(Banner { id, severity: notice.severity, message: notice.message, phase: BannerPhase::Visible });
        id
    }

    /// Mark a banner as fading. Missing ids are ignored (already dismissed).
    pub fn begin_fade(&mut self, id: u64) {
        if let Some(banner) = self.banners.iter_mut().find(|b| b.id == id) {
            banner.phase = BannerPhase::Fading;
        }
    }

    /// Drop a banner from the stack.
    pub fn remove(&mut self, id: u64) {
        self.banners.retain(|b| b.id != id);
    }
}
