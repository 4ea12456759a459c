// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, UserMarker};

/// Everything a command handler needs, shared by all event tasks.
pub struct BotState {
	pub config: Arc<ConfigData>,
	pub http_client: Arc<Client>,
	pub cache: DefaultInMemoryCache,
	pub application_id: Id<ApplicationMarker>,
	/// The bot's own user, which can never be removed from a ticket.
	pub bot_user_id: Id<UserMarker>,
}
