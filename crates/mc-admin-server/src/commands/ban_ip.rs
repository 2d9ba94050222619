use std::net::IpAddr;

use mc_admin_command::{argument, permission, ActionResult, ArgKind, CommandError, CommandSpec, Message};
use mc_admin_world::{BanEntry, PlayerId, Text};
use tracing::info;

use super::ban::DEFAULT_REASON;
use super::{num, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("ban-ip", "Ban an address, or the address of a player", permission::ADMIN)
        .form(
            vec![
                argument("target", ArgKind::Word),
                argument("reason", ArgKind::Greedy).optional(),
            ],
            ban_ip,
        )
}

fn ban_ip(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let target = ctx.args.word("target").unwrap_or_default();
    let ip = match target.parse::<IpAddr>() {
        Ok(ip) => ip,
        Err(_) => state
            .players
            .player_by_name(target)
            .map(|p| p.address.ip())
            .ok_or_else(|| CommandError::failed("commands.banip.invalid", vec![]))?,
    };
    let reason = ctx.args.word("reason").unwrap_or(DEFAULT_REASON).to_string();

    let entry = BanEntry::new(ip.to_string(), &ctx.source.name, &reason);
    if !state.players.bans_mut().ips.add(ip, entry) {
        return Err(CommandError::already("commands.banip.failed", vec![]));
    }

    let affected: Vec<(PlayerId, String)> = state
        .players
        .players_with_address(ip)
        .into_iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();
    for (id, _) in &affected {
        state.disconnect(*id, Text::key("multiplayer.disconnect.ip_banned"));
    }
    state.persist();

    let mut result = ActionResult::broadcast(
        affected.len() as i32,
        Text::translatable(
            "commands.banip.success",
            vec![Text::literal(ip.to_string()), Text::literal(reason)],
        ),
    );
    if !affected.is_empty() {
        let names: Vec<&str> = affected.iter().map(|(_, n)| n.as_str()).collect();
        info!("IP ban of {ip} disconnected {}", names.join(", "));
        result.push(Message::broadcast(Text::translatable(
            "commands.banip.info",
            vec![num(affected.len()), Text::literal(names.join(", "))],
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Fixture;
    use mc_admin_command::ErrorKind;
    use mc_admin_world::{ConnectionId, Packet, Player, PlayerList};

    #[test]
    fn bans_literal_address() {
        let mut fx = Fixture::new();
        let code = fx.run_console("ban-ip 192.168.1.20 proxy abuse").unwrap();
        assert_eq!(code, 0);
        let ip: IpAddr = "192.168.1.20".parse().unwrap();
        let entry = fx.state.players.bans().ips.get(&ip).cloned().unwrap();
        assert_eq!(entry.reason, "proxy abuse");
        assert!(fx.packets().is_empty());
        assert_eq!(fx.messages().len(), 1);
    }

    #[test]
    fn bans_player_address_and_disconnects() {
        let mut fx = Fixture::new();
        let code = fx.run_console("ban-ip Bob").unwrap();
        assert_eq!(code, 1);
        assert!(fx.state.players.bans().ips.contains(&"10.0.0.2".parse().unwrap()));
        assert!(fx.state.players.player_by_name("Bob").is_none());
        let out = fx.packets();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].connection, ConnectionId(2));
        assert_eq!(
            out[0].packet,
            Packet::Disconnect {
                reason: Text::key("multiplayer.disconnect.ip_banned")
            }
        );
        assert_eq!(fx.messages().len(), 2);
    }

    #[test]
    fn second_ban_is_already_in_state() {
        let mut fx = Fixture::new();
        fx.run_console("ban-ip 10.9.9.9").unwrap();
        let err = fx.run_console("ban-ip 10.9.9.9 again").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyInState);
        assert_eq!(fx.state.players.bans().ips.len(), 1);
        let ip: IpAddr = "10.9.9.9".parse().unwrap();
        assert_eq!(fx.state.players.bans().ips.get(&ip).unwrap().reason, DEFAULT_REASON);
    }

    #[test]
    fn unknown_target_is_invalid() {
        let mut fx = Fixture::new();
        let err = fx.run_console("ban-ip Nobody").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionFailed);
        assert_eq!(err.reason_key(), Some("commands.banip.invalid"));
        assert!(fx.state.players.bans().ips.is_empty());
    }

    #[test]
    fn disconnects_everyone_on_the_address() {
        let mut list = PlayerList::new(10, 4);
        for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
            let addr = if i < 2 { "10.1.1.1:1" } else { "10.1.1.2:1" };
            list.join(Player::new(name, addr.parse().unwrap(), ConnectionId(i as u64)));
        }
        let mut fx = Fixture::new();
        fx.state.players = Box::new(list);
        assert_eq!(fx.run_console("ban-ip 10.1.1.1").unwrap(), 2);
        let names: Vec<&str> = fx
            .state
            .players
            .players()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["C"]);
    }
}
