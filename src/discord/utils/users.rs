// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use std::fmt;
use twilight_http::client::Client;
use twilight_http::error::Error;
use twilight_http::response::DeserializeBodyError;
use twilight_model::application::interaction::InteractionDataResolved;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};

/// Error data for getting user/member data
#[derive(Debug, Diagnostic)]
pub enum UserDataError {
	Http(Error),
	Deserialize(DeserializeBodyError),
}

impl From<Error> for UserDataError {
	fn from(error: Error) -> Self {
		Self::Http(error)
	}
}

impl From<DeserializeBodyError> for UserDataError {
	fn from(error: DeserializeBodyError) -> Self {
		Self::Deserialize(error)
	}
}

impl std::error::Error for UserDataError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Http(error) => Some(error),
			Self::Deserialize(error) => Some(error),
		}
	}
}

impl fmt::Display for UserDataError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http(error) => write!(f, "HTTP error: {}", error),
			Self::Deserialize(error) => write!(f, "deserialization error: {}", error),
		}
	}
}

/// Gets a user's username (not their display name), preferring the data Discord resolved with the interaction.
pub async fn username(
	http_client: &Client,
	resolved: Option<&InteractionDataResolved>,
	user_id: Id<UserMarker>,
) -> Result<String, UserDataError> {
	if let Some(user) = resolved.and_then(|resolved| resolved.users.get(&user_id)) {
		return Ok(user.name.clone());
	}

	let user_response = http_client.user(user_id).await?;
	let user = user_response.model().await?;
	Ok(user.name)
}

/// Gets the roles a guild member has, preferring the data Discord resolved with the interaction.
pub async fn member_roles(
	http_client: &Client,
	guild_id: Id<GuildMarker>,
	resolved: Option<&InteractionDataResolved>,
	user_id: Id<UserMarker>,
) -> Result<Vec<Id<RoleMarker>>, UserDataError> {
	if let Some(member) = resolved.and_then(|resolved| resolved.members.get(&user_id)) {
		return Ok(member.roles.clone());
	}

	let member_response = http_client.guild_member(guild_id, user_id).await?;
	let member = member_response.model().await?;
	Ok(member.roles)
}
