use mc_admin_command::{literal, permission, ActionResult, CommandSpec};
use mc_admin_world::{Player, Text};

use super::{num, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("list", "List online players", permission::ALL)
        .form(vec![], list_names)
        .form(vec![literal("uuids")], list_uuids)
}

fn list_names(state: &mut ServerState, _: &Ctx<'_>) -> CommandResult {
    Ok(format_list(state, |p| p.name.clone()))
}

fn list_uuids(state: &mut ServerState, _: &Ctx<'_>) -> CommandResult {
    Ok(format_list(state, |p| format!("{} ({})", p.name, p.id)))
}

fn format_list(state: &ServerState, describe: impl Fn(&Player) -> String) -> ActionResult {
    let online = state.players.players();
    let names: Vec<String> = online.iter().map(|p| describe(p)).collect();
    ActionResult::success(
        online.len() as i32,
        Text::translatable(
            "commands.list.players",
            vec![
                num(online.len()),
                num(state.players.max_players()),
                Text::literal(names.join(", ")),
            ],
        ),
    )
}
