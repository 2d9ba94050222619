use mc_admin_command::{argument, permission, ActionResult, ArgKind, CommandError, CommandSpec};
use mc_admin_world::{Difficulty, Packet, Text};

use super::{CommandResult, Ctx};
use crate::state::ServerState;

const DIFFICULTIES: &[&str] = &["peaceful", "easy", "normal", "hard"];

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("difficulty", "Show or change the difficulty", permission::GAMEMASTER)
        .form(vec![], query)
        .form(
            vec![argument("difficulty", ArgKind::Keyword(DIFFICULTIES))],
            set,
        )
}

fn display_name(difficulty: Difficulty) -> Text {
    Text::key(match difficulty {
        Difficulty::Peaceful => "options.difficulty.peaceful",
        Difficulty::Easy => "options.difficulty.easy",
        Difficulty::Normal => "options.difficulty.normal",
        Difficulty::Hard => "options.difficulty.hard",
    })
}

fn query(state: &mut ServerState, _: &Ctx<'_>) -> CommandResult {
    let difficulty = state.level.difficulty();
    Ok(ActionResult::success(
        difficulty.ordinal(),
        Text::translatable("commands.difficulty.query", vec![display_name(difficulty)]),
    ))
}

fn set(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let keyword = ctx.args.keyword("difficulty");
    let difficulty = Difficulty::ALL
        .into_iter()
        .find(|d| Some(d.id()) == keyword)
        .ok_or_else(|| CommandError::failed("command.unknown.argument", vec![]))?;
    if state.level.difficulty() == difficulty {
        return Err(CommandError::already(
            "commands.difficulty.failure",
            vec![Text::literal(difficulty.id())],
        ));
    }
    state.level.set_difficulty(difficulty);
    state.network.broadcast(Packet::ChangeDifficulty { difficulty });
    Ok(ActionResult::broadcast(
        difficulty.ordinal(),
        Text::translatable("commands.difficulty.success", vec![display_name(difficulty)]),
    ))
}
