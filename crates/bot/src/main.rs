use std::sync::Arc;
use std::time::Duration;

use bot_api::{dispatch::BotContext, links::LinkStore, perms::PermStore};
use economy_client::{CurrencyCache, HttpEconomyClient};
use serenity::all::GatewayIntents;
use serenity::Client;
use tracing::info;

mod config;
mod discord;
mod registry;
mod render;

use config::load_settings;
use discord::{DmNotifier, Handler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let backend = Arc::new(HttpEconomyClient::new(&settings.api_url, &settings.api_key));
    let currencies = Arc::new(CurrencyCache::new());

    let http = Arc::new(serenity::http::Http::new(&settings.discord_token));
    let ctx = Arc::new(BotContext {
        backend: backend.clone(),
        currencies: currencies.clone(),
        links: LinkStore::new(&settings.user_map_file),
        perms: PermStore::new(&settings.entity_perms_file),
        notifier: Arc::new(DmNotifier { http }),
    });

    // Prime the currency cache now, then refresh on a fixed interval.
    // The first tick fires immediately.
    {
        let backend = backend.clone();
        let currencies = currencies.clone();
        let period = Duration::from_secs(settings.currency_refresh_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                currencies.refresh(backend.as_ref()).await;
            }
        });
    }

    let intents = GatewayIntents::GUILDS | GatewayIntents::DIRECT_MESSAGES;
    let mut client = Client::builder(&settings.discord_token, intents)
        .event_handler(Handler { ctx })
        .await?;

    info!("starting gateway client");
    client.start().await?;
    Ok(())
}
