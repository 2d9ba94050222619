use mc_admin_command::{literal, permission, ActionResult, CommandSpec, Message};
use mc_admin_world::{BanEntry, Text};

use super::{num, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("banlist", "Show banned players and addresses", permission::ADMIN)
        .form(vec![], list_all)
        .form(vec![literal("ips")], list_ips)
        .form(vec![literal("players")], list_players)
}

fn list_all(state: &mut ServerState, _: &Ctx<'_>) -> CommandResult {
    let bans = state.players.bans();
    Ok(show(bans.players.entries().chain(bans.ips.entries()).collect()))
}

fn list_ips(state: &mut ServerState, _: &Ctx<'_>) -> CommandResult {
    Ok(show(state.players.bans().ips.entries().collect()))
}

fn list_players(state: &mut ServerState, _: &Ctx<'_>) -> CommandResult {
    Ok(show(state.players.bans().players.entries().collect()))
}

fn show(entries: Vec<&BanEntry>) -> ActionResult {
    if entries.is_empty() {
        return ActionResult::success(0, Text::key("commands.banlist.none"));
    }
    let mut result = ActionResult::success(
        entries.len() as i32,
        Text::translatable("commands.banlist.list", vec![num(entries.len())]),
    );
    for entry in entries {
        result.push(Message::success(Text::translatable(
            "commands.banlist.entry",
            vec![
                Text::literal(entry.target.clone()),
                Text::literal(entry.source.clone()),
                Text::literal(entry.reason.clone()),
            ],
        )));
    }
    result
}
