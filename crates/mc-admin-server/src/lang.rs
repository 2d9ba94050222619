//! Translation catalog used to render [`Text`] for the console and RCON.

use std::collections::HashMap;

use mc_admin_world::Text;

const EN_US: &str = include_str!("../assets/lang/en_us.json");

#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    /// The built-in `en_us` catalog.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EN_US)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Render text, substituting `%s` and `%N$s` placeholders. Unknown keys
    /// render as the key itself.
    pub fn render(&self, text: &Text) -> String {
        match text {
            Text::Literal(s) => s.clone(),
            Text::Translatable { key, args } => {
                let args: Vec<String> = args.iter().map(|a| self.render(a)).collect();
                match self.entries.get(key.as_ref()) {
                    Some(template) => format_template(template, &args),
                    None => key.to_string(),
                }
            }
        }
    }
}

fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut rest = template;
    while let Some(i) = rest.find('%') {
        out.push_str(&rest[..i]);
        let spec = &rest[i + 1..];
        if let Some(after) = spec.strip_prefix('%') {
            out.push('%');
            rest = after;
        } else if let Some(after) = spec.strip_prefix('s') {
            push_arg(&mut out, args, next, "%s");
            next += 1;
            rest = after;
        } else if let Some((index, after)) = positional(spec) {
            push_arg(&mut out, args, index, &rest[i..rest.len() - after.len()]);
            rest = after;
        } else {
            out.push('%');
            rest = spec;
        }
    }
    out.push_str(rest);
    out
}

/// Parse `N$s`, returning the zero-based index and what follows.
fn positional(spec: &str) -> Option<(usize, &str)> {
    let digits = spec.find(|c: char| !c.is_ascii_digit())?;
    if digits == 0 {
        return None;
    }
    let after = spec[digits..].strip_prefix("$s")?;
    let n: usize = spec[..digits].parse().ok()?;
    Some((n.checked_sub(1)?, after))
}

fn push_arg(out: &mut String, args: &[String], index: usize, placeholder: &str) {
    match args.get(index) {
        Some(arg) => out.push_str(arg),
        None => out.push_str(placeholder),
    }
}
