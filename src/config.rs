// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlNode, KdlValue};
use miette::{Diagnostic, IntoDiagnostic};
use std::fmt;
use std::io::ErrorKind;
use tokio::fs::read_to_string;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker};

pub const DEFAULT_CONFIG_PATH: &str = "config.kdl";

/// Where a single setting lives: its section and key in the config file, and the environment variable overriding it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Setting {
	pub section: &'static str,
	pub key: &'static str,
	pub env_var: &'static str,
}

impl fmt::Display for Setting {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.section, self.key)
	}
}

pub const BOT_TOKEN: Setting = Setting {
	section: "discord",
	key: "bot_token",
	env_var: "BOT_TOKEN",
};
pub const GUILD_ID: Setting = Setting {
	section: "discord",
	key: "guild_id",
	env_var: "GUILD_ID",
};
pub const REMOVE_COMMANDS_ON_SHUTDOWN: Setting = Setting {
	section: "discord",
	key: "remove_commands_on_shutdown",
	env_var: "REMOVE_COMMANDS_ON_SHUTDOWN",
};
pub const SUPPORT_CATEGORY_ID: Setting = Setting {
	section: "tickets",
	key: "category_id",
	env_var: "SUPPORT_CATEGORY_ID",
};
pub const SUPPORT_ROLE_ID: Setting = Setting {
	section: "tickets",
	key: "support_role_id",
	env_var: "SUPPORT_ROLE_ID",
};

#[derive(Debug)]
pub struct ConfigData {
	pub discord: DiscordConfig,
	pub tickets: TicketConfig,
}

pub struct DiscordConfig {
	pub bot_token: String,
	/// The one guild the bot serves; commands are registered here only.
	pub guild_id: Id<GuildMarker>,
	/// Whether the commands registered at startup are deleted again when the bot shuts down.
	pub remove_commands_on_shutdown: bool,
}

impl fmt::Debug for DiscordConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DiscordConfig")
			.field("bot_token", &"<redacted>")
			.field("guild_id", &self.guild_id)
			.field("remove_commands_on_shutdown", &self.remove_commands_on_shutdown)
			.finish()
	}
}

#[derive(Debug)]
pub struct TicketConfig {
	/// The category under which ticket channels are created. A channel is a ticket channel iff its parent is this.
	pub category_id: Id<ChannelMarker>,
	pub support_role_id: Option<Id<RoleMarker>>,
}

#[derive(Debug, Diagnostic)]
pub enum ConfigError {
	#[diagnostic(
		code(ticket_keeper::config::missing),
		help("Set it in the config file or through its environment variable.")
	)]
	Missing { setting: Setting },
	#[diagnostic(
		code(ticket_keeper::config::invalid_id),
		help("Discord IDs are nonzero integers. They may be written as numbers or as strings of digits.")
	)]
	InvalidId { setting: Setting, value: String },
	#[diagnostic(
		code(ticket_keeper::config::invalid_bool),
		help("Use #true or #false in the config file, or one of true/false/yes/no/1/0 in the environment.")
	)]
	InvalidBool { setting: Setting, value: String },
	#[diagnostic(code(ticket_keeper::config::wrong_type))]
	WrongType { setting: Setting, expected: &'static str },
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Missing { setting } => write!(
				f,
				"missing required setting `{}` (environment variable `{}`)",
				setting, setting.env_var
			),
			Self::InvalidId { setting, value } => write!(f, "`{}` is not a valid ID: {:?}", setting, value),
			Self::InvalidBool { setting, value } => write!(f, "`{}` is not a valid boolean: {:?}", setting, value),
			Self::WrongType { setting, expected } => write!(f, "`{}` must be {}", setting, expected),
		}
	}
}

/// Loads the configuration from the KDL file at `config_path` with environment variable overrides applied.
///
/// A missing file is not an error; the configuration may come from the environment alone.
pub async fn parse_config(config_path: &str) -> miette::Result<ConfigData> {
	load_config(config_path, |name| std::env::var(name).ok()).await
}

async fn load_config(config_path: &str, lookup: impl Fn(&str) -> Option<String>) -> miette::Result<ConfigData> {
	let mut partial = match read_to_string(config_path).await {
		Ok(contents) => {
			let document: KdlDocument = contents.parse()?;
			PartialConfig::from_document(&document)?
		}
		Err(error) if error.kind() == ErrorKind::NotFound => {
			tracing::info!(path = config_path, "No config file found; reading configuration from the environment");
			PartialConfig::default()
		}
		Err(error) => return Err(error).into_diagnostic(),
	};
	partial.apply_overrides(lookup)?;
	Ok(partial.finish()?)
}

#[derive(Debug, Default)]
struct PartialConfig {
	bot_token: Option<String>,
	guild_id: Option<Id<GuildMarker>>,
	remove_commands_on_shutdown: Option<bool>,
	category_id: Option<Id<ChannelMarker>>,
	support_role_id: Option<Id<RoleMarker>>,
}

impl PartialConfig {
	fn from_document(document: &KdlDocument) -> Result<Self, ConfigError> {
		let mut partial = Self::default();
		if let Some(discord) = section(document, "discord") {
			partial.bot_token = string_value(discord, BOT_TOKEN)?;
			partial.guild_id = id_value(discord, GUILD_ID)?;
			partial.remove_commands_on_shutdown = bool_value(discord, REMOVE_COMMANDS_ON_SHUTDOWN)?;
		}
		if let Some(tickets) = section(document, "tickets") {
			partial.category_id = id_value(tickets, SUPPORT_CATEGORY_ID)?;
			partial.support_role_id = id_value(tickets, SUPPORT_ROLE_ID)?;
		}
		Ok(partial)
	}

	fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
		let lookup = |setting: Setting| lookup(setting.env_var).filter(|value| !value.trim().is_empty());

		if let Some(token) = lookup(BOT_TOKEN) {
			self.bot_token = Some(token.trim().to_string());
		}
		if let Some(value) = lookup(GUILD_ID) {
			self.guild_id = Some(parse_id(&value, GUILD_ID)?);
		}
		if let Some(value) = lookup(REMOVE_COMMANDS_ON_SHUTDOWN) {
			self.remove_commands_on_shutdown = Some(parse_bool(&value, REMOVE_COMMANDS_ON_SHUTDOWN)?);
		}
		if let Some(value) = lookup(SUPPORT_CATEGORY_ID) {
			self.category_id = Some(parse_id(&value, SUPPORT_CATEGORY_ID)?);
		}
		if let Some(value) = lookup(SUPPORT_ROLE_ID) {
			self.support_role_id = Some(parse_id(&value, SUPPORT_ROLE_ID)?);
		}
		Ok(())
	}

	fn finish(self) -> Result<ConfigData, ConfigError> {
		let bot_token = self.bot_token.ok_or(ConfigError::Missing { setting: BOT_TOKEN })?;
		let guild_id = self.guild_id.ok_or(ConfigError::Missing { setting: GUILD_ID })?;
		let category_id = self
			.category_id
			.ok_or(ConfigError::Missing {
				setting: SUPPORT_CATEGORY_ID,
			})?;
		Ok(ConfigData {
			discord: DiscordConfig {
				bot_token,
				guild_id,
				remove_commands_on_shutdown: self.remove_commands_on_shutdown.unwrap_or(false),
			},
			tickets: TicketConfig {
				category_id,
				support_role_id: self.support_role_id,
			},
		})
	}
}

fn section<'a>(document: &'a KdlDocument, name: &str) -> Option<&'a KdlDocument> {
	document.get(name).and_then(KdlNode::children)
}

fn string_value(section: &KdlDocument, setting: Setting) -> Result<Option<String>, ConfigError> {
	let Some(value) = section.get_arg(setting.key) else {
		return Ok(None);
	};
	match value.as_string() {
		Some(value) if value.trim().is_empty() => Ok(None),
		Some(value) => Ok(Some(value.trim().to_string())),
		None => Err(ConfigError::WrongType {
			setting,
			expected: "a string",
		}),
	}
}

fn id_value<T>(section: &KdlDocument, setting: Setting) -> Result<Option<Id<T>>, ConfigError> {
	let Some(value) = section.get_arg(setting.key) else {
		return Ok(None);
	};
	match value {
		KdlValue::Integer(number) => u64::try_from(*number)
			.ok()
			.and_then(Id::new_checked)
			.map(Some)
			.ok_or_else(|| ConfigError::InvalidId {
				setting,
				value: number.to_string(),
			}),
		KdlValue::String(text) => parse_id(text, setting).map(Some),
		_ => Err(ConfigError::WrongType {
			setting,
			expected: "an ID",
		}),
	}
}

fn bool_value(section: &KdlDocument, setting: Setting) -> Result<Option<bool>, ConfigError> {
	let Some(value) = section.get_arg(setting.key) else {
		return Ok(None);
	};
	value.as_bool().map(Some).ok_or(ConfigError::WrongType {
		setting,
		expected: "a boolean (#true or #false)",
	})
}

fn parse_id<T>(value: &str, setting: Setting) -> Result<Id<T>, ConfigError> {
	value
		.trim()
		.parse::<u64>()
		.ok()
		.and_then(Id::new_checked)
		.ok_or_else(|| ConfigError::InvalidId {
			setting,
			value: value.to_string(),
		})
}

fn parse_bool(value: &str, setting: Setting) -> Result<bool, ConfigError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "yes" | "1" => Ok(true),
		"false" | "no" | "0" => Ok(false),
		_ => Err(ConfigError::InvalidBool {
			setting,
			value: value.to_string(),
		}),
	}
}
