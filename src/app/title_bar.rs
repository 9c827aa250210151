//! Title bar state that survives the drawer covering the action bar.
//!
//! Panes announce their title at any time, including while the drawer is open.
//! The announcement is saved and only applied once the drawer is closed; while
//! open, the bar shows the process default title without subtitle.

use serde::{Deserialize, Serialize};

/// Title and subtitle as applied to the visible bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleText {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl TitleText {
    #[must_use]
    pub fn new(title: impl Into<String>, subtitle: Option<String>) -> Self {
        Self {
            title: title.into(),
            subtitle,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TitleBarState {
    default_title: String,
    saved_title: String,
    saved_subtitle: Option<String>,
    visible: TitleText,
}

impl TitleBarState {
    #[must_use]
    pub fn new(default_title: impl Into<String>) -> Self {
        let default_title = default_title.into();
        Self {
            saved_title: default_title.clone(),
            saved_subtitle: None,
            visible: TitleText::new(default_title.clone(), None),
            default_title,
        }
    }

    #[must_use]
    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    /// What the bar currently shows.
    #[must_use]
    pub const fn visible(&self) -> &TitleText {
        &self.visible
    }

    /// The pair that will be restored when the drawer closes.
    #[must_use]
    pub fn saved(&self) -> TitleText {
        TitleText::new(self.saved_title.clone(), self.saved_subtitle.clone())
    }

    /// Saves a pane announcement and applies it unless the drawer is open.
    ///
    /// Returns the text to apply, or `None` if the bar must stay unchanged.
    pub fn announce(
        &mut self,
        title: Option<&str>,
        subtitle: Option<&str>,
        drawer_open: bool,
    ) -> Option<TitleText> {
        self.saved_title = title.unwrap_or(&self.default_title).to_string();
        self.saved_subtitle = subtitle.map(str::to_string);

        if drawer_open {
            tracing::debug!(title = %self.saved_title, "title saved while drawer open");
            return None;
        }
        Some(self.apply(self.saved()))
    }

    pub fn on_drawer_opened(&mut self) -> TitleText {
        self.apply(TitleText::new(self.default_title.clone(), None))
    }

    pub fn on_drawer_closed(&mut self) -> TitleText {
        self.apply(self.saved())
    }

    fn apply(&mut self, text: TitleText) -> TitleText {
        self.visible = text.clone();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announce_while_drawer_open_is_deferred() {
        let mut bar = TitleBarState::new("Notes");
        bar.on_drawer_opened();

        assert_eq!(bar.announce(Some("X"), Some("Y"), true), None);
        assert_eq!(bar.visible(), &TitleText::new("Notes", None));

        let restored = bar.on_drawer_closed();
        assert_eq!(restored, TitleText::new("X", Some("Y".into())));
        assert_eq!(bar.visible(), &restored);
    }

    #[test]
    fn missing_title_falls_back_to_default() {
        let mut bar = TitleBarState::new("Notes");
        let applied = bar.announce(None, Some("3 selected"), false).unwrap();
        assert_eq!(applied, TitleText::new("Notes", Some("3 selected".into())));
    }

    #[test]
    fn drawer_open_shows_default_without_touching_saved() {
        let mut bar = TitleBarState::new("Notes");
        bar.announce(Some("Inbox"), Some("book"), false);

        assert_eq!(bar.on_drawer_opened(), TitleText::new("Notes", None));
        assert_eq!(bar.saved(), TitleText::new("Inbox", Some("book".into())));
    }
}
