// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::permissions::Refusal;
use super::responses::{CHANNEL_FETCH_FAILED, respond_ephemeral};
use super::tickets::is_ticket_channel;
use crate::discord::state::BotState;
use miette::{IntoDiagnostic, bail};
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

/// Gets the parent (category) of a channel, from the cache if it's there and from Discord otherwise.
pub async fn channel_parent(
	channel_id: Id<ChannelMarker>,
	http_client: &Client,
	cache: &DefaultInMemoryCache,
) -> miette::Result<Option<Id<ChannelMarker>>> {
	if let Some(channel) = cache.channel(channel_id) {
		return Ok(channel.parent_id);
	}

	tracing::debug!(channel = %channel_id, "Channel not cached; fetching it");
	let channel = http_client
		.channel(channel_id)
		.await
		.into_diagnostic()?
		.model()
		.await
		.into_diagnostic()?;
	Ok(channel.parent_id)
}

/// Finds the ticket channel the interaction was used in. If the channel isn't a ticket channel, or can't be looked
/// up, the user is told so and `None` is returned.
pub async fn ticket_channel_of(
	interaction: &InteractionCreate,
	bot_state: &BotState,
) -> miette::Result<Option<Id<ChannelMarker>>> {
	let Some(channel_id) = interaction.channel.as_ref().map(|channel| channel.id) else {
		bail!("Ticket command used outside of a channel");
	};

	let parent_id = match channel_parent(channel_id, &bot_state.http_client, &bot_state.cache).await {
		Ok(parent_id) => parent_id,
		Err(error) => {
			tracing::warn!(source = ?error, channel = %channel_id, "Failed to look up channel");
			respond_ephemeral(
				interaction,
				&bot_state.http_client,
				bot_state.application_id,
				CHANNEL_FETCH_FAILED,
			)
			.await?;
			return Ok(None);
		}
	};

	if !is_ticket_channel(parent_id, bot_state.config.tickets.category_id) {
		respond_ephemeral(
			interaction,
			&bot_state.http_client,
			bot_state.application_id,
			Refusal::NotTicketChannel.message(),
		)
		.await?;
		return Ok(None);
	}

	Ok(Some(channel_id))
}
