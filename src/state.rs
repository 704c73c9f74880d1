use crate::config::DISPLAY_NAME_KEY;
use crate::errors::{JournalError, Result};
use crate::gateway::Gateway;
use crate::storage::KeyValueStore;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-session state handed to whatever renders the journal: the gateway
/// plus the user's display name and theme.
pub struct JournalContext<S> {
    gateway: Gateway<S>,
    theme: Theme,
}

impl<S: KeyValueStore> JournalContext<S> {
    pub fn new(gateway: Gateway<S>) -> Self {
        Self {
            gateway,
            theme: Theme::default(),
        }
    }

    pub fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut Gateway<S> {
        &mut self.gateway
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Read through to the store on every call so a sign-out elsewhere is
    /// picked up.
    pub fn display_name(&self) -> Result<Option<String>> {
        Ok(self
            .gateway
            .read_key(DISPLAY_NAME_KEY)?
            .filter(|name| !name.trim().is_empty()))
    }

    pub fn set_display_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(JournalError::InvalidDisplayName);
        }
        self.gateway.write_key(DISPLAY_NAME_KEY, name.to_string())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.gateway.remove_key(DISPLAY_NAME_KEY)
    }

    /// Avatar letter; `U` when no name is set.
    pub fn initial(&self) -> Result<char> {
        let initial = self
            .display_name()?
            .and_then(|name| name.chars().next())
            .and_then(|ch| ch.to_uppercase().next());
        Ok(initial.unwrap_or('U'))
    }
}
