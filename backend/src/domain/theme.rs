//! # Theme Settings
//!
//! Light/dark palette shared by every screen. Instead of a process-wide
//! global, a [`ThemeSettings`] handle is created once and passed to every
//! view model that needs colors. Cloning the handle shares the same state.
//!
//! - [`ThemeSettings::snapshot`] returns an immutable copy of the current theme
//! - [`ThemeSettings::toggle`] and [`ThemeSettings::set_mode`] change it
//! - [`ThemeSettings::subscribe`] notifies listeners on every change

use serde::{Deserialize, Serialize};
use shared::ThemeColors;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let colors = match mode {
            ThemeMode::Light => ThemeColors::light(),
            ThemeMode::Dark => ThemeColors::dark(),
        };
        Self { mode, colors }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }
}

#[derive(Clone)]
pub struct ThemeSettings {
    sender: Arc<watch::Sender<Theme>>,
}

impl ThemeSettings {
    pub fn new(mode: ThemeMode) -> Self {
        let (sender, _receiver) = watch::channel(Theme::for_mode(mode));
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn snapshot(&self) -> Theme {
        self.sender.borrow().clone()
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.sender.send_if_modified(|theme| {
            if theme.mode == mode {
                return false;
            }
            *theme = Theme::for_mode(mode);
            true
        });
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.snapshot().mode.toggled();
        self.set_mode(next);
        info!("Theme switched to {:?}", next);
        self.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        let settings = ThemeSettings::default();
        let theme = settings.snapshot();
        assert!(!theme.is_dark());
        assert_eq!(theme.colors.background, "#F2F4F7");
    }

    #[test]
    fn test_toggle_switches_palette() {
        let settings = ThemeSettings::new(ThemeMode::Light);
        let dark = settings.toggle();
        assert!(dark.is_dark());
        assert_eq!(dark.colors.text, "#F5F5F5");

        let light = settings.toggle();
        assert_eq!(light.mode, ThemeMode::Light);
    }

    #[test]
    fn test_clones_share_state() {
        let settings = ThemeSettings::new(ThemeMode::Light);
        let other = settings.clone();
        settings.set_mode(ThemeMode::Dark);
        assert!(other.snapshot().is_dark());
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_changes() {
        let settings = ThemeSettings::new(ThemeMode::Light);
        let before = settings.snapshot();
        settings.toggle();
        assert_eq!(before.mode, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let settings = ThemeSettings::new(ThemeMode::Light);
        let mut receiver = settings.subscribe();

        settings.toggle();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_dark());

        // Setting the current mode again is not a change
        settings.set_mode(ThemeMode::Dark);
        assert!(!receiver.has_changed().unwrap());
    }
}
