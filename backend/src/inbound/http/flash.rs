//! One-shot flash messages carried in the session cookie.
//!
//! Messages accumulate across redirects and are drained the next time a page
//! renders, so "Rating saved." survives the `303` back to the homepage and
//! then disappears.

use crate::domain::Error;

use super::session::SessionContext;

const FLASH_KEY: &str = "flash";

impl SessionContext {
    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: &str) -> Result<(), Error> {
        let mut messages = self.pending_flashes()?;
        messages.push(message.to_owned());
        self.inner()
            .insert(FLASH_KEY, messages)
            .map_err(|error| Error::internal(format!("failed to queue flash message: {error}")))
    }

    /// Remove and return all queued messages.
    pub fn take_flashes(&self) -> Result<Vec<String>, Error> {
        let messages = self.pending_flashes()?;
        self.inner().remove(FLASH_KEY);
        Ok(messages)
    }

    fn pending_flashes(&self) -> Result<Vec<String>, Error> {
        self.inner()
            .get::<Vec<String>>(FLASH_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| Error::internal(format!("failed to read flash messages: {error}")))
    }
}
