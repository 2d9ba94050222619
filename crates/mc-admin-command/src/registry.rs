//! Registry of available commands, built once at startup.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::RegistryError;
use crate::source::CommandSource;
use crate::spec::CommandSpec;

pub struct CommandRegistry<S> {
    commands: BTreeMap<&'static str, CommandSpec<S>>,
}

impl<S> CommandRegistry<S> {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Register a command. Names must be unique.
    pub fn register(&mut self, spec: CommandSpec<S>) -> Result<(), RegistryError> {
        if self.commands.contains_key(spec.name()) {
            return Err(RegistryError::Duplicate(spec.name().to_string()));
        }
        spec.validate()?;
        debug!("Registered /{} (level {})", spec.name(), spec.permission());
        self.commands.insert(spec.name(), spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec<S>> {
        self.commands.get(name)
    }

    /// All commands, sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec<S>> {
        self.commands.values()
    }

    /// Commands the source is allowed to run, sorted by name.
    pub fn available_to<'a>(
        &'a self,
        source: &'a CommandSource,
    ) -> impl Iterator<Item = &'a CommandSpec<S>> + 'a {
        self.commands
            .values()
            .filter(move |spec| source.has_permission(spec.permission()))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<S> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ArgKind;
    use crate::dispatcher::CommandContext;
    use crate::error::CommandError;
    use crate::message::ActionResult;
    use crate::source::permission;
    use crate::spec::argument;
    use mc_admin_world::Vec3;

    fn noop(_: &mut (), _: &CommandContext<'_, ()>) -> Result<ActionResult, CommandError> {
        Ok(ActionResult::new(0))
    }

    fn spec(name: &'static str, level: u8) -> CommandSpec<()> {
        CommandSpec::new(name, "test", level).form(vec![], noop)
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut reg = CommandRegistry::new();
        reg.register(spec("kick", permission::ADMIN)).unwrap();
        let err = reg.register(spec("kick", permission::ALL)).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("kick".into()));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("kick").unwrap().permission(), permission::ADMIN);
    }

    #[test]
    fn invalid_spec_is_not_registered() {
        let mut reg: CommandRegistry<()> = CommandRegistry::new();
        let bad = CommandSpec::new("bad", "", 0).form(
            vec![
                argument("a", ArgKind::Word).optional(),
                argument("b", ArgKind::Word),
            ],
            noop,
        );
        assert!(reg.register(bad).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn available_filters_by_permission() {
        let mut reg = CommandRegistry::new();
        reg.register(spec("help", permission::ALL)).unwrap();
        reg.register(spec("time", permission::GAMEMASTER)).unwrap();
        reg.register(spec("ban", permission::ADMIN)).unwrap();

        let mut source = CommandSource::console(Vec3::ZERO);
        source.permission_level = permission::GAMEMASTER;
        let names: Vec<&str> = reg.available_to(&source).map(|s| s.name()).collect();
        assert_eq!(names, vec!["help", "time"]);

        let all: Vec<&str> = reg.commands().map(|s| s.name()).collect();
        assert_eq!(all, vec!["ban", "help", "time"]);
    }
}
