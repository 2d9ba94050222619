//! Typed argument kinds, their parsers, and the parsed-argument bag.

use mc_admin_world::{BlockPos, Text, Vec3};
use uuid::Uuid;

use crate::error::CommandError;
use crate::reader::Token;
use crate::selector::{parse_target, TargetSpec};

/// How one parameter's tokens are parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgKind {
    /// A single token, verbatim.
    Word,
    /// The rest of the line, verbatim.
    Greedy,
    Integer { min: i32, max: i32 },
    Bool,
    /// A duration in ticks: `100`, `100t`, `5s` (×20), `0.5d` (×24000).
    Time { min: i32 },
    /// One of a fixed set of words.
    Keyword(&'static [&'static str]),
    /// A selector or player name.
    Targets,
    /// Three coordinates, each absolute or `~`-relative.
    BlockPos,
    /// Yaw in degrees, absolute or `~`-relative.
    Angle,
    Uuid,
    /// 40 hexadecimal characters.
    Sha1,
}

impl ArgKind {
    /// Parse starting at `tokens[0]`. Returns the value and how many tokens it consumed.
    pub(crate) fn parse(
        &self,
        tokens: &[Token<'_>],
        line: &str,
    ) -> Result<(ArgValue, usize), CommandError> {
        let token = tokens[0];
        let value = match *self {
            ArgKind::Word => ArgValue::Word(token.text.to_string()),
            ArgKind::Greedy => {
                let rest = line[token.start..].trim_end();
                return Ok((ArgValue::Word(rest.to_string()), tokens.len()));
            }
            ArgKind::Integer { min, max } => {
                let v: i32 = token.text.parse().map_err(|_| {
                    invalid(token, "parsing.int.invalid", vec![Text::literal(token.text)])
                })?;
                if v < min {
                    return Err(invalid(
                        token,
                        "argument.integer.low",
                        vec![Text::literal(min.to_string()), Text::literal(v.to_string())],
                    ));
                }
                if v > max {
                    return Err(invalid(
                        token,
                        "argument.integer.big",
                        vec![Text::literal(max.to_string()), Text::literal(v.to_string())],
                    ));
                }
                ArgValue::Integer(v)
            }
            ArgKind::Bool => match token.text {
                "true" => ArgValue::Bool(true),
                "false" => ArgValue::Bool(false),
                other => {
                    return Err(invalid(
                        token,
                        "parsing.bool.invalid",
                        vec![Text::literal(other)],
                    ))
                }
            },
            ArgKind::Time { min } => ArgValue::Time(parse_time(token, min)?),
            ArgKind::Keyword(options) => match options.iter().find(|o| **o == token.text) {
                Some(o) => ArgValue::Keyword(*o),
                None => {
                    return Err(invalid(
                        token,
                        "argument.literal.incorrect",
                        vec![Text::literal(options.join("|"))],
                    ))
                }
            },
            ArgKind::Targets => match parse_target(token.text) {
                Some(target) => ArgValue::Targets(target),
                None if token.text.starts_with('@') => {
                    return Err(invalid(
                        token,
                        "argument.entity.selector.unknown",
                        vec![Text::literal(token.text)],
                    ))
                }
                None => return Err(invalid(token, "argument.player.invalid", vec![])),
            },
            ArgKind::BlockPos => {
                if tokens.len() < 3 {
                    return Err(invalid(token, "argument.pos3d.incomplete", vec![]));
                }
                let coords = Coordinates {
                    x: parse_block_coord(tokens[0])?,
                    y: parse_block_coord(tokens[1])?,
                    z: parse_block_coord(tokens[2])?,
                };
                return Ok((ArgValue::BlockPos(coords), 3));
            }
            ArgKind::Angle => ArgValue::Angle(AngleArg(parse_coord(token)?)),
            ArgKind::Uuid => match Uuid::parse_str(token.text) {
                Ok(id) => ArgValue::Uuid(id),
                Err(_) => return Err(invalid(token, "argument.uuid.invalid", vec![])),
            },
            ArgKind::Sha1 => {
                if token.text.len() != 40 || !token.text.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid(token, "argument.hash.invalid", vec![]));
                }
                ArgValue::Word(token.text.to_lowercase())
            }
        };
        Ok((value, 1))
    }

    /// Placeholder shown in usage strings.
    pub(crate) fn usage(&self, name: &str) -> String {
        match self {
            ArgKind::Keyword(options) => format!("({})", options.join("|")),
            ArgKind::BlockPos => format!("<{name}: x y z>"),
            _ => format!("<{name}>"),
        }
    }
}

fn invalid(token: Token<'_>, key: &'static str, args: Vec<Text>) -> CommandError {
    CommandError::invalid(token.text, token.start, Text::translatable(key, args))
}

fn parse_time(token: Token<'_>, min: i32) -> Result<i32, CommandError> {
    let text = token.text;
    let (number, scale) = match text.char_indices().last() {
        Some((i, 't')) => (&text[..i], 1.0),
        Some((i, 's')) => (&text[..i], 20.0),
        Some((i, 'd')) => (&text[..i], 24_000.0),
        Some((_, c)) if c.is_ascii_digit() || c == '.' => (text, 1.0),
        _ => return Err(invalid(token, "argument.time.invalid_unit", vec![])),
    };
    let value: f64 = number
        .parse()
        .map_err(|_| invalid(token, "parsing.float.invalid", vec![Text::literal(text)]))?;
    let ticks = (value * scale).round();
    if !ticks.is_finite() || ticks > i32::MAX as f64 {
        return Err(invalid(token, "parsing.float.invalid", vec![Text::literal(text)]));
    }
    let ticks = ticks as i32;
    if ticks < min {
        return Err(invalid(
            token,
            "argument.time.tick_count_too_low",
            vec![
                Text::literal(min.to_string()),
                Text::literal(ticks.to_string()),
            ],
        ));
    }
    Ok(ticks)
}

fn parse_coord(token: Token<'_>) -> Result<Coord, CommandError> {
    let text = token.text;
    let bad = || invalid(token, "parsing.double.invalid", vec![Text::literal(text)]);
    let finite = |number: &str| {
        number
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(bad)
    };
    match text.strip_prefix('~') {
        Some("") => Ok(Coord::Relative(0.0)),
        Some(offset) => finite(offset).map(Coord::Relative),
        None => finite(text).map(Coord::Absolute),
    }
}

/// Horizontal and vertical limit of a block position, in blocks from the origin.
const WORLD_BOUND: f64 = 30_000_000.0;

/// A coordinate component that must stay inside the world once resolved.
fn parse_block_coord(token: Token<'_>) -> Result<Coord, CommandError> {
    let coord = parse_coord(token)?;
    let (Coord::Absolute(v) | Coord::Relative(v)) = coord;
    if v.abs() > WORLD_BOUND {
        return Err(invalid(token, "argument.pos.outofworld", vec![]));
    }
    Ok(coord)
}

/// One coordinate component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    Absolute(f64),
    /// Offset from the source's own value.
    Relative(f64),
}

impl Coord {
    pub fn resolve(self, base: f64) -> f64 {
        match self {
            Coord::Absolute(v) => v,
            Coord::Relative(offset) => base + offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl Coordinates {
    pub fn resolve(&self, origin: Vec3) -> Vec3 {
        Vec3::new(
            self.x.resolve(origin.x),
            self.y.resolve(origin.y),
            self.z.resolve(origin.z),
        )
    }

    pub fn resolve_block(&self, origin: Vec3) -> BlockPos {
        BlockPos::containing(self.resolve(origin))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleArg(pub Coord);

impl AngleArg {
    /// Resolve against the source's yaw, wrapped into `[-180, 180)`.
    pub fn resolve(self, yaw: f32) -> f32 {
        wrap_degrees(self.0.resolve(yaw as f64) as f32)
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a >= 180.0 {
        a -= 360.0;
    }
    if a < -180.0 {
        a += 360.0;
    }
    a
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Word(String),
    Integer(i32),
    Bool(bool),
    Time(i32),
    Keyword(&'static str),
    Targets(TargetSpec),
    BlockPos(Coordinates),
    Angle(AngleArg),
    Uuid(Uuid),
}

/// Arguments parsed for one invocation, plus the literals of the matched form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<(&'static str, ArgValue)>,
    literals: Vec<&'static str>,
}

impl Args {
    pub(crate) fn push_value(&mut self, name: &'static str, value: ArgValue) {
        self.values.push((name, value));
    }

    pub(crate) fn push_literal(&mut self, literal: &'static str) {
        self.literals.push(literal);
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The `index`-th literal of the matched form (the command name excluded).
    pub fn literal(&self, index: usize) -> Option<&'static str> {
        self.literals.get(index).copied()
    }

    pub fn word(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ArgValue::Word(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name) {
            Some(ArgValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn time(&self, name: &str) -> Option<i32> {
        match self.get(name) {
            Some(ArgValue::Time(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn keyword(&self, name: &str) -> Option<&'static str> {
        match self.get(name) {
            Some(ArgValue::Keyword(k)) => Some(k),
            _ => None,
        }
    }

    pub fn targets(&self, name: &str) -> Option<&TargetSpec> {
        match self.get(name) {
            Some(ArgValue::Targets(t)) => Some(t),
            _ => None,
        }
    }

    pub fn block_pos(&self, name: &str) -> Option<Coordinates> {
        match self.get(name) {
            Some(ArgValue::BlockPos(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn angle(&self, name: &str) -> Option<AngleArg> {
        match self.get(name) {
            Some(ArgValue::Angle(a)) => Some(*a),
            _ => None,
        }
    }

    pub fn uuid(&self, name: &str) -> Option<Uuid> {
        match self.get(name) {
            Some(ArgValue::Uuid(id)) => Some(*id),
            _ => None,
        }
    }
}
