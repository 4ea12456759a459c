// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A fake Discord REST API for exercising command handlers end to end.

use super::state::BotState;
use crate::config::{ConfigData, DiscordConfig, TicketConfig};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::application::interaction::Interaction;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GUILD: u64 = 100;
pub const OTHER_GUILD: u64 = 101;
pub const CATEGORY: u64 = 300;
pub const OTHER_CATEGORY: u64 = 301;
pub const SUPPORT_ROLE: u64 = 400;
pub const TICKET_CHANNEL: u64 = 500;
pub const OTHER_CHANNEL: u64 = 501;
pub const NEW_CHANNEL: u64 = 600;
pub const INVOKER: u64 = 10;
pub const OTHER_USER: u64 = 20;
pub const BOT_USER: u64 = 30;
pub const APPLICATION: u64 = 700;
pub const INTERACTION: u64 = 800;

/// Starts a fake Discord that accepts interaction responses, response edits, permission overwrites, and channel
/// deletes, and knows about one ticket channel and one ordinary channel.
pub async fn mock_discord() -> MockServer {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path_regex(r"/interactions/\d+/[^/]+/callback$"))
		.respond_with(ResponseTemplate::new(204))
		.mount(&server)
		.await;
	Mock::given(method("PATCH"))
		.and(path_regex(r"/webhooks/\d+/[^/]+/messages/@original$"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
		.mount(&server)
		.await;
	Mock::given(method("PUT"))
		.and(path_regex(r"/channels/\d+/permissions/\d+$"))
		.respond_with(ResponseTemplate::new(204))
		.mount(&server)
		.await;
	Mock::given(method("DELETE"))
		.and(path_regex(r"/channels/\d+$"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path_regex(format!(r"/channels/{}$", TICKET_CHANNEL)))
		.respond_with(ResponseTemplate::new(200).set_body_json(channel_json(TICKET_CHANNEL, CATEGORY)))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path_regex(format!(r"/channels/{}$", OTHER_CHANNEL)))
		.respond_with(ResponseTemplate::new(200).set_body_json(channel_json(OTHER_CHANNEL, OTHER_CATEGORY)))
		.mount(&server)
		.await;
	server
}

/// Bot state whose REST client talks to the fake Discord.
pub fn bot_state(server: &MockServer, support_role: Option<u64>) -> BotState {
	let http_client = Client::builder()
		.proxy(server.address().to_string(), true)
		.ratelimiter(None)
		.token(String::from("Bot test-token"))
		.build();
	let config = ConfigData {
		discord: DiscordConfig {
			bot_token: String::from("test-token"),
			guild_id: Id::new(GUILD),
			remove_commands_on_shutdown: false,
		},
		tickets: TicketConfig {
			category_id: Id::new(CATEGORY),
			support_role_id: support_role.map(Id::new),
		},
	};
	BotState {
		config: Arc::new(config),
		http_client: Arc::new(http_client),
		cache: DefaultInMemoryCache::new(),
		application_id: Id::new(APPLICATION),
		bot_user_id: Id::new(BOT_USER),
	}
}

pub fn channel_json(channel_id: u64, parent_id: u64) -> Value {
	json!({
		"id": channel_id.to_string(),
		"type": 0,
		"guild_id": GUILD.to_string(),
		"name": "ticket-channel",
		"parent_id": parent_id.to_string(),
		"position": 0,
		"permission_overwrites": []
	})
}

pub fn user_json(user_id: u64, name: &str) -> Value {
	json!({
		"id": user_id.to_string(),
		"username": name,
		"discriminator": "0",
		"global_name": null,
		"avatar": null
	})
}

fn member_json(roles: &[u64]) -> Value {
	let roles: Vec<String> = roles.iter().map(u64::to_string).collect();
	json!({
		"avatar": null,
		"communication_disabled_until": null,
		"deaf": false,
		"flags": 0,
		"joined_at": "2024-01-01T00:00:00.000000+00:00",
		"mute": false,
		"nick": null,
		"pending": false,
		"permissions": "0",
		"premium_since": null,
		"roles": roles
	})
}

/// A slash command interaction used by [INVOKER] (named "alice") in the given guild and channel.
pub fn interaction(guild_id: u64, channel_id: u64, invoker_roles: &[u64]) -> InteractionCreate {
	let mut member = member_json(invoker_roles);
	member["user"] = user_json(INVOKER, "alice");
	let interaction: Interaction = serde_json::from_value(json!({
		"app_permissions": "0",
		"application_id": APPLICATION.to_string(),
		"authorizing_integration_owners": {},
		"channel": {
			"id": channel_id.to_string(),
			"type": 0,
			"guild_id": guild_id.to_string()
		},
		"context": 0,
		"data": { "id": "900", "name": "test", "type": 1 },
		"entitlements": [],
		"guild_id": guild_id.to_string(),
		"guild_locale": "en-US",
		"id": INTERACTION.to_string(),
		"locale": "en-US",
		"member": member,
		"token": "interaction-token",
		"type": 2
	}))
	.expect("interaction JSON should deserialize");
	InteractionCreate(interaction)
}

/// Command data for `name`, optionally with a `user` option resolved to a member with the given roles.
pub fn command_data(name: &str, user: Option<(u64, &str, &[u64])>) -> CommandData {
	let (options, resolved) = match user {
		Some((user_id, user_name, roles)) => {
			let key = user_id.to_string();
			let options = json!([{ "name": "user", "type": 6, "value": key }]);
			let mut users = Map::new();
			users.insert(key.clone(), user_json(user_id, user_name));
			let mut members = Map::new();
			members.insert(key, member_json(roles));
			let resolved = json!({ "users": users, "members": members });
			(options, resolved)
		}
		None => (json!([]), Value::Null),
	};
	serde_json::from_value(json!({
		"id": "900",
		"name": name,
		"type": 1,
		"options": options,
		"resolved": resolved
	}))
	.expect("command data JSON should deserialize")
}

/// Command data with a `user` option but no resolved data, forcing lookups through the REST API.
pub fn command_data_unresolved(name: &str, user_id: u64) -> CommandData {
	serde_json::from_value(json!({
		"id": "900",
		"name": name,
		"type": 1,
		"options": [{ "name": "user", "type": 6, "value": user_id.to_string() }]
	}))
	.expect("command data JSON should deserialize")
}

/// One request the handler made, reduced to what the tests check.
#[derive(Debug)]
pub struct SentRequest {
	pub method: String,
	/// The path below the API version prefix, e.g. `channels/500`.
	pub route: String,
	pub body: Value,
}

impl SentRequest {
	pub fn summary(&self) -> String {
		format!("{} {}", self.method, self.route)
	}

	pub fn content(&self) -> Option<&str> {
		self.body["data"]["content"]
			.as_str()
			.or_else(|| self.body["content"].as_str())
	}
}

pub async fn sent_requests(server: &MockServer) -> Vec<SentRequest> {
	let requests = server.received_requests().await.unwrap_or_default();
	requests
		.into_iter()
		.map(|request| {
			let path = request.url.path();
			let route = path
				.split_once("/api/v")
				.and_then(|(_, rest)| rest.split_once('/'))
				.map(|(_, route)| route.to_string())
				.unwrap_or_else(|| path.trim_start_matches('/').to_string());
			let body = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
			SentRequest {
				method: request.method.to_string(),
				route,
				body,
			}
		})
		.collect()
}

pub fn callback_route() -> String {
	format!("POST interactions/{}/interaction-token/callback", INTERACTION)
}

pub fn edit_original_route() -> String {
	format!("PATCH webhooks/{}/interaction-token/messages/@original", APPLICATION)
}
