// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::{command_definitions, route_command};
use super::state::BotState;
use crate::config::ConfigData;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use tokio::task::JoinSet;
use twilight_gateway::{CloseFrame, EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::command::Command;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord.bot_token.clone()))
}

/// Runs the bot until Ctrl+C is received or the gateway connection ends for good.
pub async fn run_bot(config: Arc<ConfigData>, http_client: Arc<Client>) -> miette::Result<()> {
	let intents = Intents::GUILDS;

	let mut shard = Shard::new(ShardId::ONE, config.discord.bot_token.clone(), intents);

	let cache = DefaultInMemoryCache::builder()
		.resource_types(ResourceType::CHANNEL)
		.build();

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};
	let bot_user_id = {
		let user_response = http_client.current_user().await.into_diagnostic()?;
		user_response.model().await.into_diagnostic()?.id
	};

	let registered_commands = {
		let interaction_client = http_client.interaction(application_id);
		let commands = command_definitions();
		interaction_client
			.set_guild_commands(config.discord.guild_id, &commands)
			.await
			.into_diagnostic()?
			.models()
			.await
			.into_diagnostic()?
	};
	tracing::info!(
		guild = %config.discord.guild_id,
		count = registered_commands.len(),
		"Registered commands"
	);

	let bot_state = Arc::new(BotState {
		config: Arc::clone(&config),
		http_client: Arc::clone(&http_client),
		cache,
		application_id,
		bot_user_id,
	});

	let shutdown = tokio::signal::ctrl_c();
	tokio::pin!(shutdown);
	let mut event_tasks = JoinSet::new();
	let mut gateway_open = true;

	loop {
		let event = tokio::select! {
			signal = &mut shutdown => {
				signal.into_diagnostic()?;
				tracing::info!("Received shutdown signal");
				break;
			}
			event = shard.next_event(EventTypeFlags::all()) => event,
		};
		let Some(event) = event else {
			tracing::warn!("Discord gateway connection ended");
			gateway_open = false;
			break;
		};
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		bot_state.cache.update(&event);

		while event_tasks.try_join_next().is_some() {}
		event_tasks.spawn(handle_event(event, Arc::clone(&bot_state)));
	}

	if gateway_open {
		close_gateway(&mut shard).await;
	}

	if !event_tasks.is_empty() {
		tracing::info!(count = event_tasks.len(), "Waiting for in-progress events to finish");
		while event_tasks.join_next().await.is_some() {}
	}

	if config.discord.remove_commands_on_shutdown {
		remove_commands(&bot_state, &registered_commands).await?;
	}

	tracing::info!("Gracefully shutting down");

	Ok(())
}

/// Sends a normal close to Discord and waits for the connection to finish closing.
async fn close_gateway(shard: &mut Shard) {
	shard.close(CloseFrame::NORMAL);
	while let Some(event) = shard.next_event(EventTypeFlags::empty()).await {
		match event {
			Ok(Event::GatewayClose(_)) => break,
			Ok(_) => (),
			Err(error) => {
				tracing::warn!(source = ?error, "error while closing the gateway connection");
				break;
			}
		}
	}
	tracing::info!("Closed Discord gateway connection");
}

/// Deletes the commands this process registered. Other commands in the guild are left alone.
async fn remove_commands(bot_state: &BotState, registered_commands: &[Command]) -> miette::Result<()> {
	tracing::info!("Removing commands");
	let interaction_client = bot_state.http_client.interaction(bot_state.application_id);
	for command in registered_commands {
		let Some(command_id) = command.id else {
			continue;
		};
		interaction_client
			.delete_guild_command(bot_state.config.discord.guild_id, command_id)
			.await
			.into_diagnostic()?;
		tracing::debug!(command = %command.name, "Removed command");
	}
	Ok(())
}

async fn handle_event(event: Event, bot_state: Arc<BotState>) {
	let event_result = handle_event_route(event, &bot_state).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(event: Event, bot_state: &BotState) -> miette::Result<()> {
	tracing::debug!("Incoming gateway message: {:?}", event);
	match event {
		Event::InteractionCreate(interaction) => {
			if let Some(InteractionData::ApplicationCommand(command_data)) = &interaction.data {
				route_command(&interaction, command_data, bot_state).await?;
			}
		}
		Event::Ready(ready) => {
			tracing::info!(user = %ready.user.name, id = %ready.user.id, "Discord gateway is ready; logged in");
		}
		_ => (),
	}
	Ok(())
}
