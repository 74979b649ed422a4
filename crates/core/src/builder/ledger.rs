use crate::describe::Described;
use crate::errors::{CoreError, CoreResult};
use std::collections::HashSet;
use std::fmt;

/// Setup steps the registration builder can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupStep {
    AddLocalization,
    AddLogging,
    AddSqlServer,
    AddIdentity,
    AddCosmosDb,
    AddAutomapper,
    AddValidators,
    AddBusinesServices,
}

impl Described for SetupStep {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (SetupStep::AddLocalization, "AddLocalization"),
        (SetupStep::AddLogging, "AddLogging"),
        (SetupStep::AddSqlServer, "AddSqlServer"),
        (SetupStep::AddIdentity, "AddIdentity"),
        (SetupStep::AddCosmosDb, "AddCosmosDb"),
        (SetupStep::AddAutomapper, "AddAutomapper"),
        (SetupStep::AddValidators, "AddValidators"),
        (SetupStep::AddBusinesServices, "AddBusinesServices"),
    ];
}

impl SetupStep {
    /// Identifier recorded in the ledger
    pub fn identifier(&self) -> &'static str {
        self.description()
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Step identifiers already executed by one builder
///
/// Append-only: an identifier is recorded at most once and never removed.
#[derive(Debug, Clone, Default)]
pub struct RegistrationLedger {
    invoked: HashSet<String>,
}

impl RegistrationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_invoked(&self, identifier: &str) -> bool {
        self.invoked.contains(identifier)
    }

    /// Fail with `DuplicateStep` when `identifier` was already recorded
    pub fn ensure_not_invoked(&self, identifier: &str) -> CoreResult<()> {
        if self.is_invoked(identifier) {
            return Err(CoreError::duplicate_step(identifier));
        }
        Ok(())
    }

    /// Record a completed step
    pub fn record(&mut self, identifier: impl Into<String>) -> CoreResult<()> {
        let identifier = identifier.into();
        self.ensure_not_invoked(&identifier)?;
        self.invoked.insert(identifier);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.invoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.invoked.iter().map(String::as_str)
    }
}
