//! Canonical leaf table for environment-variable loading.
//!
//! Each leaf names its key path in the record; the variable name is the path
//! joined with `_`. The environment values are coerced into a JSON tree that
//! is then deserialized into [`Configuration`], the same type the YAML file
//! loads into, so adding a field means one struct field plus one row here.

use serde_json::{Map, Value};

use super::coerce;
use super::settings::{Configuration, DelInstance, DEFAULT_JWT_EXPIRY_SECS};
use super::source::EnvSource;
use crate::shared::{ConfigError, Result};

/// How a raw variable is turned into a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// Strict `"true"` check, false otherwise
    Flag,
    /// Base-10 integer, `null` sentinel when unparsable
    Int,
    /// Base-10 integer with a fallback
    IntOr(i64),
    /// Comma-separated list; unset or empty is fatal
    List,
    /// Mandatory string
    Text,
    /// String that may be absent
    OptionalText,
    /// `"true"`/`"false"` flag or integer minutes
    FlagOrInt,
}

/// One terminal field of the configuration record.
#[derive(Debug, Clone, Copy)]
pub struct Leaf {
    pub path: &'static [&'static str],
    pub kind: LeafKind,
    /// Older variable names consulted when the canonical one is unset
    pub aliases: &'static [&'static str],
}

const fn leaf(path: &'static [&'static str], kind: LeafKind) -> Leaf {
    Leaf {
        path,
        kind,
        aliases: &[],
    }
}

const fn aliased(
    path: &'static [&'static str],
    kind: LeafKind,
    aliases: &'static [&'static str],
) -> Leaf {
    Leaf {
        path,
        kind,
        aliases,
    }
}

use LeafKind::*;

/// Every leaf read in managed mode.
pub const LEAVES: &[Leaf] = &[
    leaf(&["SERVER", "TYPE"], OptionalText),
    leaf(&["SERVER", "PORT"], Int),
    leaf(&["CORS", "ORIGIN"], List),
    leaf(&["CORS", "METHODS"], List),
    leaf(&["CORS", "CREDENTIALS"], Flag),
    leaf(&["SSL_CONF", "PRIVKEY"], OptionalText),
    leaf(&["SSL_CONF", "FULLCHAIN"], OptionalText),
    aliased(&["STORE", "CLEANING_INTERVAL"], Int, &["STORE_CLEANING_TERMINAL"]),
    aliased(&["STORE", "MESSAGES"], Flag, &["STORE_MESSAGE"]),
    leaf(&["STORE", "CONTACTS"], Flag),
    leaf(&["STORE", "CHATS"], Flag),
    leaf(&["DATABASE", "CONNECTION", "URI"], Text),
    leaf(&["DATABASE", "CONNECTION", "DB_PREFIX_NAME"], Text),
    leaf(&["DATABASE", "ENABLED"], Flag),
    leaf(&["DATABASE", "SAVE_DATA", "INSTANCE"], Flag),
    leaf(&["DATABASE", "SAVE_DATA", "OLD_MESSAGE"], Flag),
    leaf(&["DATABASE", "SAVE_DATA", "NEW_MESSAGE"], Flag),
    aliased(
        &["DATABASE", "SAVE_DATA", "MESSAGE_UPDATE"],
        Flag,
        &["DATABASE_SAVE_MESSAGE_UPDATE"],
    ),
    leaf(&["DATABASE", "SAVE_DATA", "CONTACTS"], Flag),
    leaf(&["DATABASE", "SAVE_DATA", "CHATS"], Flag),
    leaf(&["REDIS", "ENABLED"], Flag),
    leaf(&["REDIS", "URI"], Text),
    leaf(&["REDIS", "PREFIX_KEY"], Text),
    leaf(&["LOG", "LEVEL"], List),
    leaf(&["LOG", "COLOR"], Flag),
    leaf(&["DEL_INSTANCE"], FlagOrInt),
    leaf(&["WEBHOOK", "GLOBAL", "URL"], OptionalText),
    leaf(&["WEBHOOK", "GLOBAL", "ENABLED"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "QRCODE_UPDATED"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "MESSAGES_SET"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "MESSAGES_UPSERT"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "MESSAGES_UPDATE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "SEND_MESSAGE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CONTACTS_SET"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CONTACTS_UPDATE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CONTACTS_UPSERT"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "PRESENCE_UPDATE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CHATS_SET"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CHATS_UPDATE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CHATS_DELETE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CHATS_UPSERT"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "CONNECTION_UPDATE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "GROUPS_UPSERT"], Flag),
    aliased(
        &["WEBHOOK", "EVENTS", "GROUP_UPDATE"],
        Flag,
        &["WEBHOOK_EVENTS_GROUPS_UPDATE"],
    ),
    leaf(&["WEBHOOK", "EVENTS", "GROUP_PARTICIPANTS_UPDATE"], Flag),
    leaf(&["WEBHOOK", "EVENTS", "NEW_JWT_TOKEN"], Flag),
    leaf(&["CONFIG_SESSION_PHONE", "CLIENT"], OptionalText),
    leaf(&["CONFIG_SESSION_PHONE", "NAME"], OptionalText),
    leaf(&["QRCODE", "LIMIT"], Int),
    leaf(&["AUTHENTICATION", "TYPE"], Text),
    aliased(
        &["AUTHENTICATION", "API_KEY", "KEY"],
        Text,
        &["AUTHENTICATION_API_KEY"],
    ),
    leaf(
        &["AUTHENTICATION", "JWT", "EXPIRIN_IN"],
        IntOr(DEFAULT_JWT_EXPIRY_SECS),
    ),
    leaf(&["AUTHENTICATION", "JWT", "SECRET"], Text),
];

impl Leaf {
    /// Canonical environment variable name
    pub fn env_name(&self) -> String {
        self.path.join("_")
    }

    /// Dotted key path, used in log output
    pub fn key_path(&self) -> String {
        self.path.join(".")
    }

    /// Look the leaf up, canonical name first, then aliases.
    fn lookup(&self, env: &(impl EnvSource + ?Sized)) -> Option<String> {
        let name = self.env_name();
        if let Some(value) = env.var(&name) {
            return Some(value);
        }
        self.aliases.iter().find_map(|alias| {
            let value = env.var(alias)?;
            tracing::debug!(variable = %alias, canonical = %name, "Using legacy variable name");
            Some(value)
        })
    }

    /// Coerce the raw variable; `Ok(None)` leaves the key out of the tree.
    fn resolve(&self, env: &(impl EnvSource + ?Sized)) -> Result<Option<Value>> {
        let raw = self.lookup(env);
        let raw = raw.as_deref();

        let value = match self.kind {
            Flag => Value::Bool(coerce::flag(raw)),
            Int => match coerce::int(raw) {
                Some(n) => Value::from(n),
                None => {
                    if let Some(raw) = raw {
                        tracing::warn!(
                            variable = %self.env_name(),
                            value = %raw,
                            "Ignoring non-numeric value"
                        );
                    }
                    Value::Null
                }
            },
            IntOr(fallback) => Value::from(coerce::int_or(raw, fallback)),
            List => {
                let raw = raw.ok_or_else(|| ConfigError::MissingVariable(self.env_name()))?;
                let items = coerce::list(raw).ok_or_else(|| ConfigError::EmptyList(self.env_name()))?;
                Value::from(items)
            }
            Text => {
                let raw = raw.ok_or_else(|| ConfigError::MissingVariable(self.env_name()))?;
                Value::from(raw)
            }
            OptionalText => match raw {
                Some(raw) => Value::from(raw),
                None => return Ok(None),
            },
            FlagOrInt => match coerce::del_instance(raw) {
                Some(DelInstance::Flag(flag)) => Value::Bool(flag),
                Some(DelInstance::Minutes(minutes)) => Value::from(minutes),
                None => {
                    if let Some(raw) = raw {
                        tracing::warn!(
                            variable = %self.env_name(),
                            value = %raw,
                            "Value is neither a boolean nor a number"
                        );
                    }
                    Value::Null
                }
            },
        };

        Ok(Some(value))
    }
}

/// Insert `value` at `path`, creating intermediate objects as needed.
fn insert(tree: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            tree.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = tree
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = child {
                insert(child, rest, value);
            }
        }
    }
}

/// Build the raw value tree from the environment.
pub fn env_tree(env: &(impl EnvSource + ?Sized)) -> Result<Value> {
    let mut tree = Map::new();
    for leaf in LEAVES {
        if let Some(value) = leaf.resolve(env)? {
            insert(&mut tree, leaf.path, value);
        }
    }
    Ok(Value::Object(tree))
}

/// Assemble a configuration record from environment variables.
///
/// # Errors
///
/// `MissingVariable` or `EmptyList` for absent mandatory leaves, `Decode` if
/// the assembled tree does not fit the record.
pub fn from_env(env: &(impl EnvSource + ?Sized)) -> Result<Configuration> {
    let tree = env_tree(env)?;
    Ok(serde_json::from_value(tree)?)
}
