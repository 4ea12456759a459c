// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::BotState;
use crate::discord::utils::channels::ticket_channel_of;
use crate::discord::utils::options::{USER_OPTION, required_user_option};
use crate::discord::utils::permissions::{Refusal, check_removal_target, is_support_staff, member_revoke_overwrite};
use crate::discord::utils::responses::{
	REMOVE_USER_FAILED, REMOVE_USER_SUCCEEDED, USER_FETCH_FAILED, respond_ephemeral,
};
use crate::discord::utils::users::member_roles;
use miette::bail;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::{CommandBuilder, UserBuilder};

pub fn command_definition() -> Command {
	let user = UserBuilder::new(USER_OPTION, "The user to remove from the ticket")
		.required(true)
		.build();
	CommandBuilder::new("remove", "Remove a user from the ticket", CommandType::ChatInput)
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

	let Some(invoker) = interaction.author_id() else {
		bail!("Remove command used by a non-user");
	};
	let target = required_user_option(&command_data.options, USER_OPTION)?;

	if let Err(refusal) = check_removal_target(invoker, target, bot_state.bot_user_id) {
		return respond_ephemeral(interaction, http_client, application_id, refusal.message()).await;
	}

	let target_roles = match member_roles(
		http_client,
		bot_state.config.discord.guild_id,
		command_data.resolved.as_ref(),
		target,
	)
	.await
	{
		Ok(roles) => roles,
		Err(error) => {
			tracing::warn!(source = ?error, user = %target, "Failed to get member to remove from ticket");
			return respond_ephemeral(interaction, http_client, application_id, USER_FETCH_FAILED).await;
		}
	};
	if is_support_staff(&target_roles, bot_state.config.tickets.support_role_id) {
		return respond_ephemeral(
			interaction,
			http_client,
			application_id,
			Refusal::RemoveStaff.message(),
		)
		.await;
	}

	let Some(channel_id) = ticket_channel_of(interaction, bot_state).await? else {
		return Ok(());
	};

	let overwrite = member_revoke_overwrite(target);
	let content = match http_client.update_channel_permission(channel_id, &overwrite).await {
		Ok(_) => {
			tracing::info!(channel = %channel_id, user = %target, "Removed user from ticket");
			REMOVE_USER_SUCCEEDED
		}
		Err(error) => {
			tracing::warn!(source = ?error, channel = %channel_id, user = %target, "Failed to remove user from ticket");
			REMOVE_USER_FAILED
		}
	};
	respond_ephemeral(interaction, http_client, application_id, content).await
}
