// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::BotState;
use crate::discord::utils::channels::ticket_channel_of;
use crate::discord::utils::responses::{CLOSING_TICKET, public_message, respond};
use crate::discord::utils::tickets::close_reason;
use miette::{IntoDiagnostic, bail};
use twilight_http::request::AuditLogReason;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_util::builder::command::CommandBuilder;

pub fn command_definition() -> Command {
	CommandBuilder::new("close", "Close the ticket", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.build()
}

pub async fn handle_command(interaction: &InteractionCreate, bot_state: &BotState) -> miette::Result<()> {
	let Some(invoker) = interaction.author() else {
		bail!("Close command used by a non-user");
	};
	let Some(channel_id) = ticket_channel_of(interaction, bot_state).await? else {
		return Ok(());
	};

	// The response has to go out first; once the channel is gone there's nothing left to respond in.
	respond(
		interaction,
		&bot_state.http_client,
		bot_state.application_id,
		&public_message(CLOSING_TICKET),
	)
	.await?;

	let reason = close_reason(&invoker.name);
	bot_state
		.http_client
		.delete_channel(channel_id)
		.reason(&reason)
		.await
		.into_diagnostic()?;

	tracing::info!(channel = %channel_id, closed_by = %invoker.id, "Closed ticket");
	Ok(())
}
