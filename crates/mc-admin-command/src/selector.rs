//! Target selectors: @s, @a, @p, @r, @e, or a player name.
//!
//! Parsing is purely syntactic; resolution against the online player list
//! happens inside the action, after the permission check.

use std::cmp::Ordering;

use mc_admin_world::{PlayerId, PlayerRegistry, Text};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CommandError;
use crate::source::CommandSource;

/// Longest valid player name.
pub const MAX_NAME_LEN: usize = 16;

/// A parsed entity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// @s: the command source.
    Sender,
    /// @a: all online players.
    AllPlayers,
    /// @p: nearest player to the source, in the source's dimension.
    NearestPlayer,
    /// @r: a random online player.
    RandomPlayer,
    /// @e: all entities. Only players are tracked, so same as @a.
    AllEntities,
}

/// A target argument before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    Selector(Selector),
    Name(String),
}

/// A player identity that may or may not be online.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Option<PlayerId>,
    pub name: String,
}

/// Try to parse a string as an entity selector.
pub fn parse_selector(s: &str) -> Option<Selector> {
    match s {
        "@s" => Some(Selector::Sender),
        "@a" => Some(Selector::AllPlayers),
        "@p" => Some(Selector::NearestPlayer),
        "@r" => Some(Selector::RandomPlayer),
        "@e" => Some(Selector::AllEntities),
        _ => None,
    }
}

pub fn is_valid_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_NAME_LEN
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a selector or a player name.
pub fn parse_target(s: &str) -> Option<TargetSpec> {
    if s.starts_with('@') {
        parse_selector(s).map(TargetSpec::Selector)
    } else if is_valid_name(s) {
        Some(TargetSpec::Name(s.to_string()))
    } else {
        None
    }
}

/// Resolve a target to online players. Selectors may match nobody; a name
/// that is not online is [`CommandError::NotFound`].
pub fn resolve_players<R: Rng + ?Sized>(
    target: &TargetSpec,
    source: &CommandSource,
    players: &dyn PlayerRegistry,
    rng: &mut R,
) -> Result<Vec<PlayerId>, CommandError> {
    let selector = match target {
        TargetSpec::Name(name) => {
            return players
                .player_by_name(name)
                .map(|p| vec![p.id])
                .ok_or_else(|| CommandError::not_found("argument.player.unknown", vec![]));
        }
        TargetSpec::Selector(selector) => *selector,
    };
    let online = players.players();
    let ids = match selector {
        Selector::Sender => source
            .player
            .filter(|id| players.player(*id).is_some())
            .into_iter()
            .collect(),
        Selector::AllPlayers | Selector::AllEntities => online.iter().map(|p| p.id).collect(),
        Selector::NearestPlayer => online
            .iter()
            .filter(|p| p.dimension == source.dimension)
            .min_by(|a, b| {
                let da = source.position.distance_sq(&a.position);
                let db = source.position.distance_sq(&b.position);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .map(|p| p.id)
            .into_iter()
            .collect(),
        Selector::RandomPlayer => online.choose(rng).map(|p| p.id).into_iter().collect(),
    };
    Ok(ids)
}

/// Like [`resolve_players`], but matching nobody is an action failure.
pub fn require_players<R: Rng + ?Sized>(
    target: &TargetSpec,
    source: &CommandSource,
    players: &dyn PlayerRegistry,
    rng: &mut R,
) -> Result<Vec<PlayerId>, CommandError> {
    let ids = resolve_players(target, source, players, rng)?;
    if ids.is_empty() {
        return Err(CommandError::failed("argument.entity.notfound.player", vec![]));
    }
    Ok(ids)
}

/// Resolve a target to profiles. Selectors match online players; a bare name
/// is accepted even when that player is offline.
pub fn resolve_profiles<R: Rng + ?Sized>(
    target: &TargetSpec,
    source: &CommandSource,
    players: &dyn PlayerRegistry,
    rng: &mut R,
) -> Result<Vec<Profile>, CommandError> {
    if let TargetSpec::Name(name) = target {
        let profile = match players.player_by_name(name) {
            Some(p) => Profile {
                id: Some(p.id),
                name: p.name.clone(),
            },
            None => Profile {
                id: None,
                name: name.clone(),
            },
        };
        return Ok(vec![profile]);
    }
    let profiles: Vec<Profile> = resolve_players(target, source, players, rng)?
        .into_iter()
        .filter_map(|id| players.player(id))
        .map(|p| Profile {
            id: Some(p.id),
            name: p.name.clone(),
        })
        .collect();
    if profiles.is_empty() {
        return Err(CommandError::failed(
            "argument.player.unknown",
            vec![Text::literal(target_label(target))],
        ));
    }
    Ok(profiles)
}

fn target_label(target: &TargetSpec) -> String {
    match target {
        TargetSpec::Name(name) => name.clone(),
        TargetSpec::Selector(Selector::Sender) => "@s".into(),
        TargetSpec::Selector(Selector::AllPlayers) => "@a".into(),
        TargetSpec::Selector(Selector::NearestPlayer) => "@p".into(),
        TargetSpec::Selector(Selector::RandomPlayer) => "@r".into(),
        TargetSpec::Selector(Selector::AllEntities) => "@e".into(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mc_admin_world::{ConnectionId, Dimension, Player, PlayerList, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_players() -> PlayerList {
        let mut list = PlayerList::new(20, 4);
        let positions = [
            ("Alice", Vec3::new(10.0, 64.0, 10.0)),
            ("Bob", Vec3::new(100.0, 64.0, 100.0)),
            ("Charlie", Vec3::new(50.0, 64.0, 50.0)),
        ];
        for (i, (name, pos)) in positions.into_iter().enumerate() {
            let mut player = Player::new(
                name,
                format!("10.0.0.{}:4000", i + 1).parse().unwrap(),
                ConnectionId(i as u64 + 1),
            );
            player.position = pos;
            list.join(player);
        }
        list
    }

    fn source_at(list: &PlayerList, name: &str, pos: Vec3) -> CommandSource {
        let mut source = CommandSource::for_player(list.player_by_name(name).unwrap());
        source.position = pos;
        source
    }

    fn names(list: &PlayerList, ids: &[PlayerId]) -> Vec<String> {
        ids.iter()
            .map(|id| list.player(*id).unwrap().name.clone())
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn parse_all_selectors() {
        assert_eq!(parse_selector("@s"), Some(Selector::Sender));
        assert_eq!(parse_selector("@a"), Some(Selector::AllPlayers));
        assert_eq!(parse_selector("@p"), Some(Selector::NearestPlayer));
        assert_eq!(parse_selector("@r"), Some(Selector::RandomPlayer));
        assert_eq!(parse_selector("@e"), Some(Selector::AllEntities));
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(parse_selector("Steve"), None);
        assert_eq!(parse_selector("@x"), None);
        assert_eq!(parse_target("@"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("bad-name"), None);
        assert_eq!(parse_target("abcdefghijklmnopq"), None);
        assert_eq!(parse_target("Steve_1"), Some(TargetSpec::Name("Steve_1".into())));
    }

    #[test]
    fn resolve_sender() {
        let list = make_players();
        let source = source_at(&list, "Alice", Vec3::ZERO);
        let ids = resolve_players(
            &TargetSpec::Selector(Selector::Sender),
            &source,
            &list,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(names(&list, &ids), vec!["Alice"]);
    }

    #[test]
    fn console_sender_matches_nobody() {
        let list = make_players();
        let ids = resolve_players(
            &TargetSpec::Selector(Selector::Sender),
            &CommandSource::console(Vec3::ZERO),
            &list,
            &mut rng(),
        )
        .unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn resolve_all_players() {
        let list = make_players();
        let source = CommandSource::console(Vec3::ZERO);
        for selector in [Selector::AllPlayers, Selector::AllEntities] {
            let ids =
                resolve_players(&TargetSpec::Selector(selector), &source, &list, &mut rng())
                    .unwrap();
            assert_eq!(names(&list, &ids), vec!["Alice", "Bob", "Charlie"]);
        }
    }

    #[test]
    fn resolve_nearest_player() {
        let list = make_players();
        let nearest = TargetSpec::Selector(Selector::NearestPlayer);

        let source = source_at(&list, "Alice", Vec3::new(0.0, 64.0, 0.0));
        let ids = resolve_players(&nearest, &source, &list, &mut rng()).unwrap();
        assert_eq!(names(&list, &ids), vec!["Alice"]);

        let source = source_at(&list, "Alice", Vec3::new(90.0, 64.0, 90.0));
        let ids = resolve_players(&nearest, &source, &list, &mut rng()).unwrap();
        assert_eq!(names(&list, &ids), vec!["Bob"]);
    }

    #[test]
    fn nearest_ignores_other_dimensions() {
        let list = make_players();
        let mut source = CommandSource::console(Vec3::ZERO);
        source.dimension = Dimension::End;
        let ids = resolve_players(
            &TargetSpec::Selector(Selector::NearestPlayer),
            &source,
            &list,
            &mut rng(),
        )
        .unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn resolve_random_player() {
        let list = make_players();
        let ids = resolve_players(
            &TargetSpec::Selector(Selector::RandomPlayer),
            &CommandSource::console(Vec3::ZERO),
            &list,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(ids.len(), 1);
        assert!(list.player(ids[0]).is_some());
    }

    #[test]
    fn require_players_fails_when_empty() {
        let empty = PlayerList::new(20, 4);
        let err = require_players(
            &TargetSpec::Selector(Selector::AllPlayers),
            &CommandSource::console(Vec3::ZERO),
            &empty,
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionFailed);
    }

    #[test]
    fn resolve_target_literal() {
        let list = make_players();
        let ids = resolve_players(
            &TargetSpec::Name("bob".into()),
            &CommandSource::console(Vec3::ZERO),
            &list,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(names(&list, &ids), vec!["Bob"]);
    }

    #[test]
    fn resolve_target_not_found() {
        let list = make_players();
        let err = resolve_players(
            &TargetSpec::Name("Unknown".into()),
            &CommandSource::console(Vec3::ZERO),
            &list,
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn profiles_accept_offline_names() {
        let list = make_players();
        let console = CommandSource::console(Vec3::ZERO);
        let offline =
            resolve_profiles(&TargetSpec::Name("Ghost".into()), &console, &list, &mut rng())
                .unwrap();
        assert_eq!(
            offline,
            vec![Profile {
                id: None,
                name: "Ghost".into()
            }]
        );

        let online =
            resolve_profiles(&TargetSpec::Name("alice".into()), &console, &list, &mut rng())
                .unwrap();
        assert_eq!(online[0].name, "Alice");
        assert!(online[0].id.is_some());
    }

    #[test]
    fn profiles_from_empty_selector_fail() {
        let empty = PlayerList::new(20, 4);
        let err = resolve_profiles(
            &TargetSpec::Selector(Selector::AllPlayers),
            &CommandSource::console(Vec3::ZERO),
            &empty,
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err.reason_key(), Some("argument.player.unknown"));
    }
}
