use mc_admin_command::{argument, permission, ActionResult, ArgKind, CommandError, CommandSpec, Message};
use mc_admin_world::Text;

use super::{CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("help", "List commands or show how to use one", permission::ALL)
        .form(vec![], help_all)
        .form(vec![argument("command", ArgKind::Word)], help_command)
}

fn help_all(_: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let lines: Vec<String> = ctx
        .registry
        .available_to(ctx.source)
        .flat_map(|spec| spec.usage())
        .collect();
    Ok(usage_result(lines))
}

/// Unknown commands and commands the source may not run look the same.
fn help_command(_: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let name = ctx.args.word("command").unwrap_or_default();
    let name = name.strip_prefix('/').unwrap_or(name);
    let spec = ctx
        .registry
        .get(name)
        .filter(|spec| ctx.source.has_permission(spec.permission()))
        .ok_or_else(|| CommandError::not_found("commands.help.failed", vec![]))?;
    Ok(usage_result(spec.usage()))
}

fn usage_result(lines: Vec<String>) -> ActionResult {
    let mut result = ActionResult::new(lines.len() as i32);
    for line in lines {
        result.push(Message::success(Text::literal(line)));
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::Fixture;
    use mc_admin_command::ErrorKind;
    use mc_admin_world::Text;

    fn lines(fx: &mut Fixture) -> Vec<String> {
        fx.messages()
            .into_iter()
            .map(|m| match m.text {
                Text::Literal(s) => s,
                other => other.to_string(),
            })
            .collect()
    }

    #[test]
    fn lists_only_permitted_commands() {
        let mut fx = Fixture::new();
        let bob = fx.source("Bob");
        let code = fx.run(bob, "help").unwrap();
        let listed = lines(&mut fx);
        assert_eq!(listed, vec!["/help", "/help <command>", "/list", "/list uuids"]);
        assert_eq!(code, 4);

        let alice = fx.source("Alice");
        let code = fx.run(alice, "help").unwrap();
        let listed = lines(&mut fx);
        assert!(listed.contains(&"/ban <targets> [<reason>]".to_string()));
        assert!(listed.contains(&"/time set (day|noon|night|midnight)".to_string()));
        assert_eq!(code as usize, listed.len());
    }

    #[test]
    fn usage_of_one_command() {
        let mut fx = Fixture::new();
        let code = fx.run_console("help /weather").unwrap();
        assert_eq!(code, 3);
        assert_eq!(
            lines(&mut fx),
            vec![
                "/weather clear [<duration>]",
                "/weather rain [<duration>]",
                "/weather thunder [<duration>]",
            ]
        );
    }

    #[test]
    fn hidden_and_unknown_commands_fail_alike() {
        let mut fx = Fixture::new();
        let bob = fx.source("Bob");
        let hidden = fx.run(bob.clone(), "help ban").unwrap_err();
        let unknown = fx.run(bob, "help frobnicate").unwrap_err();
        assert_eq!(hidden, unknown);
        assert_eq!(hidden.kind(), ErrorKind::NotFound);
    }
}
