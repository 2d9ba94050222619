use mc_admin_command::{argument, literal, permission, ActionResult, ArgKind, CommandError, CommandSpec};
use mc_admin_world::level::TICKS_PER_DAY;
use mc_admin_world::{GameRule, Packet, Text};

use super::{num, CommandResult, Ctx};
use crate::state::ServerState;

const PRESETS: &[&str] = &["day", "noon", "night", "midnight"];
const QUERIES: &[&str] = &["daytime", "gametime", "day"];

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("time", "Show or change the time of day", permission::GAMEMASTER)
        .form(
            vec![literal("set"), argument("time", ArgKind::Time { min: 0 })],
            set,
        )
        .form(
            vec![literal("set"), argument("preset", ArgKind::Keyword(PRESETS))],
            set,
        )
        .form(
            vec![literal("add"), argument("time", ArgKind::Time { min: 0 })],
            add,
        )
        .form(
            vec![literal("query"), argument("query", ArgKind::Keyword(QUERIES))],
            query,
        )
}

fn preset_ticks(preset: &str) -> Option<i64> {
    match preset {
        "day" => Some(1_000),
        "noon" => Some(6_000),
        "night" => Some(13_000),
        "midnight" => Some(18_000),
        _ => None,
    }
}

fn set(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let time = match ctx.args.time("time") {
        Some(t) => t as i64,
        None => ctx
            .args
            .keyword("preset")
            .and_then(preset_ticks)
            .ok_or_else(|| CommandError::failed("argument.time.invalid_unit", vec![]))?,
    };
    apply(state, time)
}

fn add(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let amount = ctx.args.time("time").unwrap_or_default() as i64;
    let time = state.level.day_time() + amount;
    apply(state, time)
}

fn apply(state: &mut ServerState, time: i64) -> CommandResult {
    state.level.set_day_time(time);
    let packet = Packet::SetTime {
        game_time: state.level.game_time(),
        day_time: state.level.day_time(),
        tick_day_time: state.rule(GameRule::DoDaylightCycle),
    };
    state.network.broadcast(packet);
    let daytime = day_time_of_day(state);
    Ok(ActionResult::broadcast(
        daytime,
        Text::translatable("commands.time.set", vec![num(daytime)]),
    ))
}

fn day_time_of_day(state: &ServerState) -> i32 {
    (state.level.day_time() % TICKS_PER_DAY) as i32
}

fn query(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let value = match ctx.args.keyword("query") {
        Some("gametime") => (state.level.game_time() % i32::MAX as i64) as i32,
        Some("day") => (state.level.day_time() / TICKS_PER_DAY % i32::MAX as i64) as i32,
        _ => day_time_of_day(state),
    };
    Ok(ActionResult::success(
        value,
        Text::translatable("commands.time.query", vec![num(value)]),
    ))
}
