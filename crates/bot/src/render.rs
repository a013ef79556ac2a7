//! Reply model → serenity builders.

use bot_api::reply::{Button, ButtonStyle, Embed, Reply};
use serenity::all::{
    ButtonStyle as DiscordButtonStyle, CreateActionRow, CreateButton, CreateEmbed,
    CreateEmbedFooter, Timestamp,
};

pub fn embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new().colour(embed.color);
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    if embed.timestamp {
        builder = builder.timestamp(Timestamp::now());
    }
    builder
}

pub fn embeds(reply: &Reply) -> Vec<CreateEmbed> {
    reply.embeds.iter().map(embed).collect()
}

pub fn components(reply: &Reply) -> Vec<CreateActionRow> {
    if reply.buttons.is_empty() {
        Vec::new()
    } else {
        vec![CreateActionRow::Buttons(
            reply.buttons.iter().map(button).collect(),
        )]
    }
}

fn button(button: &Button) -> CreateButton {
    CreateButton::new(&button.custom_id)
        .label(&button.label)
        .style(match button.style {
            ButtonStyle::Success => DiscordButtonStyle::Success,
            ButtonStyle::Danger => DiscordButtonStyle::Danger,
        })
}
