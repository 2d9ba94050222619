use mc_admin_command::{argument, literal, permission, ActionResult, ArgKind, CommandSpec};
use mc_admin_world::Text;

use super::{CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    let duration = || argument("duration", ArgKind::Time { min: 1 }).optional();
    CommandSpec::new("weather", "Change the weather", permission::GAMEMASTER)
        .form(vec![literal("clear"), duration()], clear)
        .form(vec![literal("rain"), duration()], rain)
        .form(vec![literal("thunder"), duration()], thunder)
}

/// An omitted duration is sampled from the configured provider.
fn clear(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let provider = state.weather.rain_delay;
    let duration = ctx
        .args
        .time("duration")
        .unwrap_or_else(|| provider.sample(&mut state.rng));
    apply(state, duration, 0, false, false, "commands.weather.set.clear")
}

fn rain(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let provider = state.weather.rain_duration;
    let duration = ctx
        .args
        .time("duration")
        .unwrap_or_else(|| provider.sample(&mut state.rng));
    apply(state, 0, duration, true, false, "commands.weather.set.rain")
}

fn thunder(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let provider = state.weather.thunder_duration;
    let duration = ctx
        .args
        .time("duration")
        .unwrap_or_else(|| provider.sample(&mut state.rng));
    apply(state, 0, duration, true, true, "commands.weather.set.thunder")
}

fn apply(
    state: &mut ServerState,
    clear_time: i32,
    weather_time: i32,
    raining: bool,
    thundering: bool,
    key: &'static str,
) -> CommandResult {
    let before = state.level.weather();
    state
        .level
        .set_weather_parameters(clear_time, weather_time, raining, thundering);
    state.sync_weather(before);
    Ok(ActionResult::broadcast(
        clear_time.max(weather_time),
        Text::key(key),
    ))
}
