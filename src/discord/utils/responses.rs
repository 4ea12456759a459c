// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_model::channel::message::{AllowedMentions, MessageFlags};
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;

pub const NOT_SUPPORT_GUILD: &str = "This command can only be used in the support server.";
pub const CHANNEL_FETCH_FAILED: &str = "Failed to fetch the channel.";
pub const USER_FETCH_FAILED: &str = "Failed to fetch user information.";
pub const CHANNEL_CREATE_FAILED: &str = "Failed to create a channel for the ticket.";
pub const OPEN_ADD_USER_FAILED: &str = "Failed to add user to ticket";
pub const ADD_USER_FAILED: &str = "Failed to add user to ticket.";
pub const ADD_USER_SUCCEEDED: &str = "User added to ticket.";
pub const REMOVE_USER_FAILED: &str = "Failed to remove user from ticket.";
pub const REMOVE_USER_SUCCEEDED: &str = "User removed from ticket.";
pub const CLOSING_TICKET: &str = "Closing this ticket.";

/// A message response only the invoking user sees. Mentions in it never ping.
pub fn ephemeral_message(content: &str) -> InteractionResponse {
	let response = InteractionResponseDataBuilder::new()
		.content(content)
		.flags(MessageFlags::EPHEMERAL)
		.allowed_mentions(AllowedMentions::default())
		.build();
	InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(response),
	}
}

/// A message response visible to the whole channel. Mentions in it never ping.
pub fn public_message(content: &str) -> InteractionResponse {
	let response = InteractionResponseDataBuilder::new()
		.content(content)
		.allowed_mentions(AllowedMentions::default())
		.build();
	InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(response),
	}
}

/// Acknowledges the interaction with an ephemeral "thinking" state, to be filled in with [update_deferred].
pub fn deferred_ephemeral() -> InteractionResponse {
	let response = InteractionResponseDataBuilder::new()
		.flags(MessageFlags::EPHEMERAL)
		.build();
	InteractionResponse {
		kind: InteractionResponseType::DeferredChannelMessageWithSource,
		data: Some(response),
	}
}

pub async fn respond(
	interaction: &InteractionCreate,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	response: &InteractionResponse,
) -> miette::Result<()> {
	http_client
		.interaction(application_id)
		.create_response(interaction.id, &interaction.token, response)
		.await
		.into_diagnostic()?;
	Ok(())
}

pub async fn respond_ephemeral(
	interaction: &InteractionCreate,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	content: &str,
) -> miette::Result<()> {
	respond(interaction, http_client, application_id, &ephemeral_message(content)).await
}

/// Replaces the content of a response previously sent with [deferred_ephemeral].
pub async fn update_deferred(
	interaction: &InteractionCreate,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	content: &str,
) -> miette::Result<()> {
	let allowed_mentions = AllowedMentions::default();
	http_client
		.interaction(application_id)
		.update_response(&interaction.token)
		.content(Some(content))
		.allowed_mentions(Some(&allowed_mentions))
		.await
		.into_diagnostic()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ephemeral_messages_are_flagged() {
		let response = ephemeral_message(USER_FETCH_FAILED);
		assert_eq!(response.kind, InteractionResponseType::ChannelMessageWithSource);
		let data = response.data.unwrap();
		assert_eq!(data.content.as_deref(), Some(USER_FETCH_FAILED));
		assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
		assert_eq!(data.allowed_mentions, Some(AllowedMentions::default()));
	}

	#[test]
	fn public_messages_are_not_flagged() {
		let response = public_message(CLOSING_TICKET);
		let data = response.data.unwrap();
		assert_eq!(data.content.as_deref(), Some(CLOSING_TICKET));
		assert_eq!(data.flags, None);
	}

	#[test]
	fn deferred_responses_stay_private() {
		let response = deferred_ephemeral();
		assert_eq!(response.kind, InteractionResponseType::DeferredChannelMessageWithSource);
		assert_eq!(response.data.unwrap().flags, Some(MessageFlags::EPHEMERAL));
	}
}
