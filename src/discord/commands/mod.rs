// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::state::BotState;
use super::utils::responses::{NOT_SUPPORT_GUILD, respond_ephemeral};
use miette::bail;
use twilight_model::application::command::Command;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::gateway::payload::incoming::InteractionCreate;

mod add;
mod close;
mod open;
mod remove;

pub fn command_definitions() -> Vec<Command> {
	vec![
		add::command_definition(),
		close::command_definition(),
		open::command_definition(),
		remove::command_definition(),
	]
}

pub async fn route_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	bot_state: &BotState,
) -> miette::Result<()> {
	if interaction.guild_id != Some(bot_state.config.discord.guild_id) {
		return respond_ephemeral(
			interaction,
			&bot_state.http_client,
			bot_state.application_id,
			NOT_SUPPORT_GUILD,
		)
		.await;
	}

	match command_data.name.as_str() {
		"add" => add::handle_command(interaction, command_data, bot_state).await,
		"close" => close::handle_command(interaction, bot_state).await,
		"open" => open::handle_command(interaction, command_data, bot_state).await,
		"remove" => remove::handle_command(interaction, command_data, bot_state).await,
		_ => bail!("Unknown command encountered: {}\n{:?}", command_data.name, command_data),
	}
}
