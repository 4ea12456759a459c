// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use ticket_keeper::config::{DEFAULT_CONFIG_PATH, parse_config};
use ticket_keeper::discord::{run_bot, set_up_client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
	// A missing .env file is fine; the settings may come from the config file or the real environment.
	let dotenv_result = dotenvy::dotenv();

	let log_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(log_filter).init();

	if let Err(error) = dotenv_result {
		if !error.not_found() {
			tracing::warn!(source = ?error, "Failed to load .env file");
		}
	}

	let config_path = std::env::args().nth(1);
	let config_path = config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
	let config = Arc::new(parse_config(config_path).await?);
	tracing::debug!(?config, "Loaded configuration");

	let http_client = set_up_client(&config);
	run_bot(config, http_client).await
}
