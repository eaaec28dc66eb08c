//! Terminal rotation sequence
//!
//! A fixed cyclic ordering of destination names with exactly one active position.

/// Cyclic sequence of terminals; one is active at any tick
#[derive(Debug, Clone, Default)]
pub struct TerminalRotator {
    terminals: Vec<String>,
    active: usize,
}

impl TerminalRotator {
    /// Build the rotation from `cities` in the given order
    ///
    /// Duplicates each get their own slot. An empty list leaves the rotator
    /// uninitialized: there is no active terminal and `advance` does nothing.
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { terminals: cities.into_iter().map(Into::into).collect(), active: 0 }
    }

    /// Move to the next terminal, wrapping after the last
    pub fn advance(&mut self) {
        if self.terminals.is_empty() {
            return;
        }
        self.active = (self.active + 1) % self.terminals.len();
    }

    /// Name of the active terminal, if the rotator was initialized
    pub fn active_terminal(&self) -> Option<&str> {
        self.terminals.get(self.active).map(String::as_str)
    }

    /// Position of the active terminal in the rotation
    pub fn active_index(&self) -> Option<usize> {
        (!self.terminals.is_empty()).then_some(self.active)
    }

    /// Whether the rotator has at least one terminal
    pub fn is_initialized(&self) -> bool {
        !self.terminals.is_empty()
    }

    /// Number of rotation slots
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    /// Whether the rotation has no slots
    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    /// All terminals in rotation order
    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }
}
