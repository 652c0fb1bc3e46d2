//! WDL data types.
//!
//! A [`WdlType`] renders to its canonical source form through `Display` and
//! can be rebuilt from that form with [`WdlType::parse`]; for every type this
//! module can construct, `parse(t.to_string()) == t`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

lazy_static! {
    static ref IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is a valid regex");
}

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Cannot parse an empty type"))]
    Empty,

    #[snafu(display("Unknown type '{input}'"))]
    Unknown { input: String },

    #[snafu(display("Unbalanced brackets in type '{input}'"))]
    Unbalanced { input: String },

    #[snafu(display("'{name}' cannot name a struct"))]
    InvalidStructName { name: String },

    #[snafu(display("{kind} expects {expected} type argument(s), found {found} in '{input}'"))]
    Arity {
        kind: &'static str,
        expected: usize,
        found: usize,
        input: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

pub const STRING: &str = "String";
pub const INT: &str = "Int";
pub const FLOAT: &str = "Float";
pub const BOOLEAN: &str = "Boolean";
pub const FILE: &str = "File";
pub const DIRECTORY: &str = "Directory";
pub const ARRAY: &str = "Array";
pub const MAP: &str = "Map";
pub const PAIR: &str = "Pair";
pub const OBJECT: &str = "Object";

const KEYWORDS: [&str; 10] = [
    STRING, INT, FLOAT, BOOLEAN, FILE, DIRECTORY, ARRAY, MAP, PAIR, OBJECT,
];

fn is_struct_name(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !KEYWORDS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    String,
    Int,
    Float,
    Boolean,
    File,
    Directory,
    Array { item: Box<WdlType>, nonempty: bool },
    Map { key: Box<WdlType>, value: Box<WdlType> },
    Pair { left: Box<WdlType>, right: Box<WdlType> },
    Object,
    /// Reference to a user-defined struct by name.
    Struct(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WdlType {
    pub kind: TypeKind,
    pub optional: bool,
}

impl WdlType {
    #[must_use]
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(TypeKind::String)
    }

    #[must_use]
    pub fn int() -> Self {
        Self::new(TypeKind::Int)
    }

    #[must_use]
    pub fn float() -> Self {
        Self::new(TypeKind::Float)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(TypeKind::Boolean)
    }

    #[must_use]
    pub fn file() -> Self {
        Self::new(TypeKind::File)
    }

    #[must_use]
    pub fn directory() -> Self {
        Self::new(TypeKind::Directory)
    }

    #[must_use]
    pub fn object() -> Self {
        Self::new(TypeKind::Object)
    }

    #[must_use]
    pub fn array(item: WdlType) -> Self {
        Self::new(TypeKind::Array {
            item: Box::new(item),
            nonempty: false,
        })
    }

    /// `Array[T]+`, an array that must hold at least one element.
    #[must_use]
    pub fn nonempty_array(item: WdlType) -> Self {
        Self::new(TypeKind::Array {
            item: Box::new(item),
            nonempty: true,
        })
    }

    #[must_use]
    pub fn map(key: WdlType, value: WdlType) -> Self {
        Self::new(TypeKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    #[must_use]
    pub fn pair(left: WdlType, right: WdlType) -> Self {
        Self::new(TypeKind::Pair {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Reference a user-defined struct. Keywords and non-identifiers are
    /// rejected, since they would parse back as something else.
    pub fn struct_ref(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        ensure!(is_struct_name(&name), InvalidStructNameSnafu { name });
        Ok(Self::new(TypeKind::Struct(name)))
    }

    /// Mark the type optional (`T?`).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, TypeKind::Boolean)
    }

    /// Parse the textual form of a type, e.g. `Map[String, Array[File]+]?`.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        ensure!(!text.is_empty(), EmptySnafu);

        let (body, optional, nonempty) = strip_quantifiers(text);
        let kind = match body.split_once('[') {
            Some((keyword, rest)) => {
                let inner = rest.strip_suffix(']').context(UnbalancedSnafu { input })?;
                parse_compound(keyword.trim(), inner, input, nonempty)?
            }
            None => {
                ensure!(!body.contains(']'), UnbalancedSnafu { input });
                if nonempty {
                    warn!("Ignoring extraneous non-empty quantifier (+) on '{input}'");
                }
                parse_scalar(body, input)?
            }
        };

        debug!("Parsed type '{input}' as {kind:?}");
        Ok(Self { kind, optional })
    }
}

/// Split trailing `?` and `+` markers off a type in either order.
fn strip_quantifiers(text: &str) -> (&str, bool, bool) {
    let mut body = text;
    let mut optional = false;
    let mut nonempty = false;

    if let Some(rest) = body.strip_suffix('?') {
        body = rest.trim_end();
        optional = true;
    }
    if let Some(rest) = body.strip_suffix('+') {
        body = rest.trim_end();
        nonempty = true;
    }
    if !optional && let Some(rest) = body.strip_suffix('?') {
        body = rest.trim_end();
        optional = true;
    }
    (body, optional, nonempty)
}

fn parse_scalar(body: &str, input: &str) -> Result<TypeKind> {
    let kind = match body {
        STRING => TypeKind::String,
        INT => TypeKind::Int,
        FLOAT => TypeKind::Float,
        BOOLEAN => TypeKind::Boolean,
        FILE => TypeKind::File,
        DIRECTORY => TypeKind::Directory,
        OBJECT => TypeKind::Object,
        name if is_struct_name(name) => TypeKind::Struct(name.to_string()),
        _ => return UnknownSnafu { input }.fail(),
    };
    Ok(kind)
}

fn parse_compound(keyword: &str, inner: &str, input: &str, nonempty: bool) -> Result<TypeKind> {
    let args = split_arguments(inner, input)?;
    let mut parsed = Vec::with_capacity(args.len());
    for arg in &args {
        parsed.push(Box::new(WdlType::parse(arg)?));
    }

    let (kind, expected): (&'static str, usize) = match keyword {
        ARRAY => (ARRAY, 1),
        MAP => (MAP, 2),
        PAIR => (PAIR, 2),
        _ => return UnknownSnafu { input }.fail(),
    };
    ensure!(
        parsed.len() == expected,
        AritySnafu {
            kind,
            expected,
            found: parsed.len(),
            input,
        }
    );
    if nonempty && kind != ARRAY {
        warn!("Ignoring extraneous non-empty quantifier (+) on '{input}'");
    }

    let mut parsed = parsed.into_iter();
    let kind = match (kind, parsed.next(), parsed.next()) {
        (ARRAY, Some(item), None) => TypeKind::Array { item, nonempty },
        (MAP, Some(key), Some(value)) => TypeKind::Map { key, value },
        (PAIR, Some(left), Some(right)) => TypeKind::Pair { left, right },
        _ => return UnknownSnafu { input }.fail(),
    };
    Ok(kind)
}

/// Split bracket contents on commas that are not nested in inner brackets.
fn split_arguments<'a>(inner: &'a str, input: &str) -> Result<Vec<&'a str>> {
    let mut args = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (idx, ch) in inner.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .context(UnbalancedSnafu { input })?;
            }
            ',' if depth == 0 => {
                args.push(inner.get(start..idx).unwrap_or_default().trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    ensure!(depth == 0, UnbalancedSnafu { input });
    args.push(inner.get(start..).unwrap_or_default().trim());
    Ok(args)
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::String => f.write_str(STRING),
            TypeKind::Int => f.write_str(INT),
            TypeKind::Float => f.write_str(FLOAT),
            TypeKind::Boolean => f.write_str(BOOLEAN),
            TypeKind::File => f.write_str(FILE),
            TypeKind::Directory => f.write_str(DIRECTORY),
            TypeKind::Object => f.write_str(OBJECT),
            TypeKind::Struct(name) => f.write_str(name),
            TypeKind::Array { item, nonempty } => {
                write!(f, "{ARRAY}[{item}]{}", if *nonempty { "+" } else { "" })
            }
            TypeKind::Map { key, value } => write!(f, "{MAP}[{key}, {value}]"),
            TypeKind::Pair { left, right } => write!(f, "{PAIR}[{left}, {right}]"),
        }
    }
}

impl fmt::Display for WdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, if self.optional { "?" } else { "" })
    }
}

impl FromStr for WdlType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WdlType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<WdlType> for String {
    fn from(value: WdlType) -> Self {
        value.to_string()
    }
}
