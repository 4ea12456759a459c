// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_http::request::channel::message::create_message::CreateMessage;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_validate::channel::CHANNEL_NAME_LENGTH_MAX;

pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";

/// Builds the channel name for a user's ticket: `ticket-<username>`, normalized the way Discord normalizes text
/// channel names (lowercase, whitespace becomes a hyphen, runs of hyphens collapse to one) and cut to fit the channel
/// name length limit.
pub fn ticket_channel_name(username: &str) -> String {
	let available = CHANNEL_NAME_LENGTH_MAX - TICKET_CHANNEL_PREFIX.chars().count();
	let mut suffix = String::new();
	let mut last = TICKET_CHANNEL_PREFIX.chars().last();
	for c in username.trim().chars().flat_map(char::to_lowercase) {
		let c = if c.is_whitespace() { '-' } else { c };
		if c == '-' && last == Some('-') {
			continue;
		}
		suffix.push(c);
		last = Some(c);
	}
	let suffix: String = suffix.chars().take(available).collect();
	format!("{}{}", TICKET_CHANNEL_PREFIX, suffix)
}

/// A channel is a ticket channel iff it sits directly under the support category.
pub fn is_ticket_channel(parent_id: Option<Id<ChannelMarker>>, category_id: Id<ChannelMarker>) -> bool {
	parent_id == Some(category_id)
}

/// Audit log reason recorded when a ticket channel is created.
pub fn open_reason(username: &str) -> String {
	format!("Ticket opened for {}", username)
}

/// Audit log reason recorded when a ticket channel is deleted.
pub fn close_reason(closed_by: &str) -> String {
	format!("Ticket closed by {}", closed_by)
}

/// The greeting posted in a freshly opened ticket. It pings the ticket's user and nobody else.
pub struct WelcomeMessage {
	pub content: String,
	pub allowed_mentions: AllowedMentions,
}

impl WelcomeMessage {
	pub fn new(user_id: Id<UserMarker>) -> Self {
		let content = format!(
			"Hello {}, welcome to your ticket! Please describe your issue and a staff member will assist you shortly.",
			user_id.mention()
		);
		let mut allowed_mentions = AllowedMentions::default();
		allowed_mentions.users.push(user_id);
		Self {
			content,
			allowed_mentions,
		}
	}

	/// Adds the welcome message data to a [CreateMessage] builder
	pub fn set_create_message_data<'a>(&'a self, create_message: CreateMessage<'a>) -> CreateMessage<'a> {
		create_message
			.content(&self.content)
			.allowed_mentions(Some(&self.allowed_mentions))
	}
}
