//! Serenity gateway adapter: interactions in, rendered replies out.

use std::sync::Arc;

use async_trait::async_trait;
use bot_api::{
    commands::{ArgValue, ButtonCommand, Command, CommandArgs},
    dispatch::{dispatch, dispatch_button, BotContext, Invocation},
    notify::Notifier,
    reply::Reply,
};
use serenity::all::{
    Command as GlobalCommand, CommandInteraction, ComponentInteraction, Context,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, EventHandler,
    Interaction, Ready, ResolvedValue, UserId,
};
use tracing::{debug, error, info, warn};

use crate::{registry, render};

pub struct Handler {
    pub ctx: Arc<BotContext>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "bot online");
        match GlobalCommand::set_global_commands(&ctx.http, registry::commands()).await {
            Ok(registered) => info!(count = registered.len(), "slash commands registered"),
            Err(error) => error!(%error, "failed to register slash commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.handle_command(&ctx, command).await,
            Interaction::Component(component) => self.handle_component(&ctx, component).await,
            _ => {}
        }
    }
}

impl Handler {
    async fn handle_command(&self, ctx: &Context, interaction: CommandInteraction) {
        let args = extract_args(&interaction);
        let Some(command) = Command::parse(&interaction.data.name, &args) else {
            debug!(name = %interaction.data.name, "ignoring unknown command");
            return;
        };

        let invocation = Invocation {
            discord_id: interaction.user.id.to_string(),
            display_name: interaction.user.name.clone(),
            command,
        };
        let reply = dispatch(&self.ctx, &invocation).await;
        send_reply(ctx, &interaction, &reply).await;
    }

    async fn handle_component(&self, ctx: &Context, interaction: ComponentInteraction) {
        // Unrecognized actions are dropped before anything else happens,
        // including the acknowledge.
        if ButtonCommand::parse(&interaction.data.custom_id).is_none() {
            return;
        }

        if let Err(error) = interaction
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            debug!(%error, "component acknowledge failed");
        }

        let Some(reply) = dispatch_button(&self.ctx, &interaction.data.custom_id).await else {
            return;
        };

        // Clearing the components retires the approve/decline buttons.
        let edit = EditInteractionResponse::new()
            .embeds(render::embeds(&reply))
            .components(Vec::new());
        if let Err(error) = interaction.edit_response(&ctx.http, edit).await {
            debug!(%error, "component edit failed");
        }
    }
}

fn extract_args(interaction: &CommandInteraction) -> CommandArgs {
    let mut args = Vec::new();
    for option in interaction.data.options() {
        let value = match option.value {
            ResolvedValue::String(s) => ArgValue::Str(s.to_string()),
            ResolvedValue::Integer(n) => ArgValue::Int(n),
            ResolvedValue::Number(n) => ArgValue::Num(n),
            _ => continue,
        };
        args.push((option.name.to_string(), value));
    }
    CommandArgs::new(args)
}

/// Primary response first; if that fails (already replied, expired
/// token) fall back to the follow-up channel, whose own failure is only
/// logged.
async fn send_reply(ctx: &Context, interaction: &CommandInteraction, reply: &Reply) {
    let mut message = CreateInteractionResponseMessage::new()
        .embeds(render::embeds(reply))
        .components(render::components(reply))
        .ephemeral(reply.ephemeral);
    if let Some(content) = &reply.content {
        message = message.content(content);
    }

    if let Err(error) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        warn!(%error, "primary reply failed, trying follow-up");
        let mut followup = CreateInteractionResponseFollowup::new()
            .embeds(render::embeds(reply))
            .ephemeral(reply.ephemeral);
        if let Some(content) = &reply.content {
            followup = followup.content(content);
        }
        if let Err(error) = interaction.create_followup(&ctx.http, followup).await {
            debug!(%error, "follow-up reply failed");
        }
    }
}

/// Delivers notifications as direct messages.
pub struct DmNotifier {
    pub http: Arc<serenity::http::Http>,
}

#[async_trait]
impl Notifier for DmNotifier {
    async fn notify(&self, discord_id: &str, reply: Reply) -> anyhow::Result<()> {
        let user_id: UserId = discord_id.parse()?;
        let channel = user_id.create_dm_channel(&self.http).await?;
        let mut message = CreateMessage::new().embeds(render::embeds(&reply));
        if let Some(content) = &reply.content {
            message = message.content(content);
        }
        channel.send_message(&self.http, message).await?;
        Ok(())
    }
}
