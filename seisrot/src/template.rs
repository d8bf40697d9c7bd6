//! File and dataset name templates.
//!
//! Templates use shell-style placeholders for the three things that vary
//! per record: `nt` (network), `sta` (station) and `comp` (component).
//! Both `$sta` and `${sta}` are accepted; `$$` is a literal dollar sign.
//!
//! ```
//! use seisrot::NameTemplate;
//!
//! let t: NameTemplate = "${nt}.${sta}.BX${comp}.semd".parse().unwrap();
//! assert_eq!(t.render("TS", "TS11", 'Z'), "TS.TS11.BXZ.semd");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Var {
    Network,
    Station,
    Component,
}

impl Var {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "nt" => Some(Var::Network),
            "sta" => Some(Var::Station),
            "comp" => Some(Var::Component),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Var(Var),
}

/// A validated name template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    pieces: Vec<Piece>,
}

impl NameTemplate {
    /// Substitute network, station and component codes.
    pub fn render(&self, network: &str, station: &str, component: char) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Var(Var::Network) => out.push_str(network),
                Piece::Var(Var::Station) => out.push_str(station),
                Piece::Var(Var::Component) => out.push(component),
            }
        }
        out
    }

    /// Check whether the template mentions the component at all.
    ///
    /// Without `comp` every component of a station maps to the same name.
    pub fn uses_component(&self) -> bool {
        self.pieces.contains(&Piece::Var(Var::Component))
    }

    /// The template text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for NameTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }

            let name: String = match chars.peek() {
                Some('$') => {
                    chars.next();
                    literal.push('$');
                    continue;
                }
                Some('{') => {
                    chars.next();
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => return Err(Error::invalid_template(s, "unterminated '${'")),
                        }
                    }
                    name
                }
                Some(c) if c.is_ascii_alphabetic() || *c == '_' => {
                    let mut name = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    name
                }
                _ => {
                    return Err(Error::invalid_template(
                        s,
                        "'$' must start a placeholder or be written '$$'",
                    ))
                }
            };

            let var = Var::from_name(&name).ok_or_else(|| {
                Error::invalid_template(
                    s,
                    format!("unknown placeholder '{}' (expected nt, sta or comp)", name),
                )
            })?;

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Var(var));
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        if pieces.is_empty() {
            return Err(Error::invalid_template(s, "template is empty"));
        }

        Ok(NameTemplate {
            source: s.to_string(),
            pieces,
        })
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
