// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::BotState;
use crate::discord::utils::options::{USER_OPTION, user_option};
use crate::discord::utils::permissions::{check_open, is_support_staff, member_access_overwrite, role_access_overwrite};
use crate::discord::utils::responses::{
	CHANNEL_CREATE_FAILED, OPEN_ADD_USER_FAILED, USER_FETCH_FAILED, deferred_ephemeral, respond, respond_ephemeral,
	update_deferred,
};
use crate::discord::utils::tickets::{WelcomeMessage, open_reason, ticket_channel_name};
use crate::discord::utils::users::username;
use miette::{IntoDiagnostic, bail};
use twilight_http::request::AuditLogReason;
use twilight_mention::fmt::Mention;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::channel::ChannelType;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::{CommandBuilder, UserBuilder};

pub fn command_definition() -> Command {
	let user = UserBuilder::new(USER_OPTION, "Open a ticket for the selected user")
		.required(false)
		.build();
	CommandBuilder::new("open", "Open a ticket", CommandType::ChatInput)
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
	let config = &bot_state.config;

	let Some(invoker) = interaction.author() else {
		bail!("Open command used by a non-user");
	};
	let Some(invoker_member) = interaction.member.as_ref() else {
		bail!("Open command was used outside of a guild");
	};
	let target = user_option(&command_data.options, USER_OPTION)?.unwrap_or(invoker.id);

	let invoker_is_staff = is_support_staff(&invoker_member.roles, config.tickets.support_role_id);
	if let Err(refusal) = check_open(invoker.id, target, invoker_is_staff) {
		return respond_ephemeral(interaction, http_client, application_id, refusal.message()).await;
	}

	// Opening takes several requests in a row, so acknowledge before starting on them.
	respond(interaction, http_client, application_id, &deferred_ephemeral()).await?;

	let target_name = if target == invoker.id {
		invoker.name.clone()
	} else {
		match username(http_client, command_data.resolved.as_ref(), target).await {
			Ok(name) => name,
			Err(error) => {
				tracing::warn!(source = ?error, user = %target, "Failed to get user for new ticket");
				return update_deferred(interaction, http_client, application_id, USER_FETCH_FAILED).await;
			}
		}
	};

	let channel_name = ticket_channel_name(&target_name);
	let reason = open_reason(&target_name);
	let channel_result = http_client
		.create_guild_channel(config.discord.guild_id, &channel_name)
		.kind(ChannelType::GuildText)
		.parent_id(config.tickets.category_id)
		.reason(&reason)
		.await;
	let channel = match channel_result {
		Ok(response) => response.model().await.into_diagnostic(),
		Err(error) => Err(error).into_diagnostic(),
	};
	let channel = match channel {
		Ok(channel) => channel,
		Err(error) => {
			tracing::warn!(source = ?error, channel_name = %channel_name, "Failed to create ticket channel");
			return update_deferred(interaction, http_client, application_id, CHANNEL_CREATE_FAILED).await;
		}
	};

	let user_overwrite = member_access_overwrite(target);
	if let Err(error) = http_client
		.update_channel_permission(channel.id, &user_overwrite)
		.await
	{
		tracing::warn!(source = ?error, channel = %channel.id, user = %target, "Failed to add user to new ticket");
		return update_deferred(interaction, http_client, application_id, OPEN_ADD_USER_FAILED).await;
	}

	if let Some(support_role_id) = config.tickets.support_role_id {
		let role_overwrite = role_access_overwrite(support_role_id);
		if let Err(error) = http_client
			.update_channel_permission(channel.id, &role_overwrite)
			.await
		{
			tracing::warn!(source = ?error, channel = %channel.id, "Failed to add support role to ticket");
		}
	}

	let welcome = WelcomeMessage::new(target);
	if let Err(error) = welcome
		.set_create_message_data(http_client.create_message(channel.id))
		.await
	{
		tracing::warn!(source = ?error, channel = %channel.id, "Failed to send ticket welcome message");
	}

	tracing::info!(channel = %channel.id, user = %target, opened_by = %invoker.id, "Opened ticket");

	let content = format!("Created a private ticket: {}", channel.id.mention());
	update_deferred(interaction, http_client, application_id, &content).await
}
