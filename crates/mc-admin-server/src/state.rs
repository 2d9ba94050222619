//! Server state the command actions run against, and feedback delivery.

use mc_admin_command::{CommandSource, Message};
use mc_admin_world::{
    GameRule, LevelState, NetworkTransport, Packet, PlayerId, PlayerRegistry, Text, Vec3,
    WeatherProviders, WeatherState,
};
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::lang::Translations;

pub struct ServerState {
    pub players: Box<dyn PlayerRegistry>,
    pub level: Box<dyn LevelState>,
    pub network: Box<dyn NetworkTransport>,
    pub weather: WeatherProviders,
    pub rng: StdRng,
}

impl ServerState {
    pub fn new(
        players: Box<dyn PlayerRegistry>,
        level: Box<dyn LevelState>,
        network: Box<dyn NetworkTransport>,
        weather: WeatherProviders,
        rng: StdRng,
    ) -> Self {
        Self {
            players,
            level,
            network,
            weather,
            rng,
        }
    }

    /// Centre of the world spawn block; where console and RCON commands run from.
    pub fn spawn_origin(&self) -> Vec3 {
        let pos = self.level.default_spawn().pos;
        Vec3::new(pos.x as f64 + 0.5, pos.y as f64, pos.z as f64 + 0.5)
    }

    pub fn rule(&self, rule: GameRule) -> bool {
        self.level.game_rules().get_bool(rule)
    }

    /// Remove a player, send them `reason` and close their connection.
    pub fn disconnect(&mut self, id: PlayerId, reason: Text) -> bool {
        let Some(player) = self.players.disconnect(id, &reason) else {
            return false;
        };
        self.network
            .send(player.connection, Packet::Disconnect { reason });
        self.network.close(player.connection);
        true
    }

    /// Persist ops and bans. Failures are logged, never fatal.
    pub fn persist(&self) {
        if let Err(e) = self.players.save() {
            warn!("Failed to save player lists: {e}");
        }
    }

    /// Broadcast rain and thunder changes since `before`.
    pub fn sync_weather(&mut self, before: WeatherState) {
        let after = self.level.weather();
        if before.raining != after.raining {
            if after.raining {
                self.network.broadcast(Packet::StartRaining);
                self.network.broadcast(Packet::RainLevel(1.0));
            } else {
                self.network.broadcast(Packet::StopRaining);
                self.network.broadcast(Packet::RainLevel(0.0));
            }
        }
        if before.thundering != after.thundering {
            let level = if after.thundering { 1.0 } else { 0.0 };
            self.network.broadcast(Packet::ThunderLevel(level));
        }
    }

    /// Advance the level clock and the weather cycle by one tick.
    pub fn tick(&mut self) {
        self.level.tick();
        if self.rule(GameRule::DoWeatherCycle) {
            let before = self.level.weather();
            let mut weather = before;
            weather.advance(&self.weather, &mut self.rng);
            self.level.set_weather(weather);
            self.sync_weather(before);
        }
    }

    /// Deliver command feedback.
    ///
    /// Players receive chat packets: failures always, successes only while
    /// `sendCommandFeedback` is on. Broadcast messages also reach every other
    /// operator online, and are logged when `logAdminCommands` is on. Lines for
    /// console and RCON sources are rendered and returned.
    pub fn deliver(
        &mut self,
        lang: &Translations,
        messages: Vec<(CommandSource, Message)>,
    ) -> Vec<String> {
        let feedback = self.rule(GameRule::SendCommandFeedback);
        let log_admin = self.rule(GameRule::LogAdminCommands);
        let mut replies = Vec::new();

        for (source, message) in messages {
            match source.player {
                Some(id) => {
                    if message.is_failure() || feedback {
                        self.send_chat(id, message.text.clone());
                    }
                }
                None => replies.push(lang.render(&message.text)),
            }

            if !message.broadcast {
                continue;
            }
            let admin = Text::translatable(
                "chat.type.admin",
                vec![Text::literal(source.name.clone()), message.text],
            );
            if feedback {
                let observers: Vec<PlayerId> = self
                    .players
                    .players()
                    .into_iter()
                    .filter(|p| Some(p.id) != source.player && self.players.is_op(&p.name))
                    .map(|p| p.id)
                    .collect();
                for id in observers {
                    self.send_chat(id, admin.clone());
                }
            }
            if log_admin && source.is_player() {
                info!("{}", lang.render(&admin));
            }
        }
        replies
    }

    fn send_chat(&mut self, id: PlayerId, text: Text) {
        if let Some(player) = self.players.player(id) {
            let connection = player.connection;
            self.network.send(
                connection,
                Packet::SystemChat {
                    text,
                    overlay: false,
                },
            );
        }
    }
}
