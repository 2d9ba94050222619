//! `setworldspawn` and `spawnpoint`.

use mc_admin_command::{argument, permission, ActionResult, ArgKind, CommandSpec, Message};
use mc_admin_world::{BlockPos, Dimension, Packet, RespawnPoint, SpawnPoint, Text};

use super::{num, player_name, targets_or_self, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec_world() -> CommandSpec<ServerState> {
    CommandSpec::new("setworldspawn", "Set the world spawn", permission::GAMEMASTER)
        .form(vec![], set_world_spawn)
        .form(vec![argument("pos", ArgKind::BlockPos)], set_world_spawn)
        .form(
            vec![argument("pos", ArgKind::BlockPos), argument("angle", ArgKind::Angle)],
            set_world_spawn,
        )
}

pub fn spec_point() -> CommandSpec<ServerState> {
    CommandSpec::new("spawnpoint", "Set players' respawn point", permission::GAMEMASTER)
        .form(vec![], set_spawn_point)
        .form(vec![argument("targets", ArgKind::Targets)], set_spawn_point)
        .form(
            vec![argument("targets", ArgKind::Targets), argument("pos", ArgKind::BlockPos)],
            set_spawn_point,
        )
        .form(
            vec![
                argument("targets", ArgKind::Targets),
                argument("pos", ArgKind::BlockPos),
                argument("angle", ArgKind::Angle),
            ],
            set_spawn_point,
        )
}

/// Position and angle from the arguments, defaulting to the source's block and 0.
fn location(ctx: &Ctx<'_>) -> (BlockPos, f32) {
    let pos = match ctx.args.block_pos("pos") {
        Some(coords) => coords.resolve_block(ctx.source.position),
        None => ctx.source.block_pos(),
    };
    let angle = ctx
        .args
        .angle("angle")
        .map_or(0.0, |a| a.resolve(ctx.source.yaw));
    (pos, angle)
}

fn coords(pos: BlockPos, angle: f32) -> Vec<Text> {
    vec![num(pos.x), num(pos.y), num(pos.z), num(angle)]
}

fn set_world_spawn(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    if ctx.source.dimension != Dimension::Overworld {
        return Ok(ActionResult::new(0).with(Message::failure(Text::key(
            "commands.setworldspawn.failure.not_overworld",
        ))));
    }
    let (pos, angle) = location(ctx);
    state.level.set_default_spawn(SpawnPoint { pos, angle });
    state.network.broadcast(Packet::SetDefaultSpawn { pos, angle });
    Ok(ActionResult::broadcast(
        1,
        Text::translatable("commands.setworldspawn.success", coords(pos, angle)),
    ))
}

fn set_spawn_point(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let ids = targets_or_self(state, ctx)?;
    let (pos, angle) = location(ctx);
    let point = RespawnPoint {
        dimension: ctx.source.dimension,
        pos,
        angle,
        forced: true,
    };
    let mut updated = Vec::new();
    for id in ids {
        if state.players.set_respawn(id, point) {
            updated.push(id);
        }
    }

    let mut args = coords(pos, angle);
    args.push(Text::literal(ctx.source.dimension.id()));
    let text = match updated.as_slice() {
        [only] => {
            args.push(player_name(state, *only));
            Text::translatable("commands.spawnpoint.success.single", args)
        }
        _ => {
            args.push(num(updated.len()));
            Text::translatable("commands.spawnpoint.success.multiple", args)
        }
    };
    Ok(ActionResult::broadcast(updated.len() as i32, text))
}
