// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::BotState;
use crate::discord::utils::channels::ticket_channel_of;
use crate::discord::utils::options::{USER_OPTION, required_user_option};
use crate::discord::utils::permissions::member_access_overwrite;
use crate::discord::utils::responses::{ADD_USER_FAILED, ADD_USER_SUCCEEDED, respond_ephemeral};
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::{CommandBuilder, UserBuilder};

pub fn command_definition() -> Command {
	let user = UserBuilder::new(USER_OPTION, "The user to add to the ticket")
		.required(true)
		.build();
	CommandBuilder::new("add", "Add a user to the ticket", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.option(user)
		.build()
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	bot_state: &BotState,
) -> miette::Result<()> {
	let http_client = &bot_state.http_client;
	let application_id = bot_state.application_id;

	let target = required_user_option(&command_data.options, USER_OPTION)?;
	let Some(channel_id) = ticket_channel_of(interaction, bot_state).await? else {
		return Ok(());
	};

	let overwrite = member_access_overwrite(target);
	let content = match http_client.update_channel_permission(channel_id, &overwrite).await {
		Ok(_) => {
			tracing::info!(channel = %channel_id, user = %target, "Added user to ticket");
			ADD_USER_SUCCEEDED
		}
		Err(error) => {
			tracing::warn!(source = ?error, channel = %channel_id, user = %target, "Failed to add user to ticket");
			ADD_USER_FAILED
		}
	};
	respond_ephemeral(interaction, http_client, application_id, content).await
}
