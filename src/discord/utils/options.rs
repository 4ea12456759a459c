// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::bail;
use twilight_model::application::interaction::application_command::{CommandDataOption, CommandOptionValue};
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

/// Name of the user option shared by `open`, `add`, and `remove`.
pub const USER_OPTION: &str = "user";

/// Gets the value of the named user option, if it was passed.
///
/// An option with the right name but a non-user value is an error, since Discord validates option types against the
/// registered command.
pub fn user_option(options: &[CommandDataOption], name: &str) -> miette::Result<Option<Id<UserMarker>>> {
	let Some(option) = options.iter().find(|option| option.name == name) else {
		return Ok(None);
	};
	match option.value {
		CommandOptionValue::User(user_id) => Ok(Some(user_id)),
		_ => bail!("Command option {} wasn't a user: {:?}", name, option.value),
	}
}

pub fn required_user_option(options: &[CommandDataOption], name: &str) -> miette::Result<Id<UserMarker>> {
	match user_option(options, name)? {
		Some(user_id) => Ok(user_id),
		None => bail!("Command received without required option {}", name),
	}
}
