//! Platform-neutral reply model; the Discord layer renders it.

pub const COLOR_ERROR: u32 = 0xff0000;
pub const COLOR_SUCCESS: u32 = 0x00ff00;
pub const COLOR_INFO: u32 = 0x0099ff;
pub const COLOR_PENDING: u32 = 0xffaa00;
pub const COLOR_MUTED: u32 = 0x999999;
pub const COLOR_BURN: u32 = 0xff6600;
pub const COLOR_SALE: u32 = 0xff9900;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<Field>,
    pub footer: Option<String>,
    pub color: u32,
    pub timestamp: bool,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    pub fn inline_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn timestamped(mut self) -> Self {
        self.timestamp = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub buttons: Vec<Button>,
    pub ephemeral: bool,
}

impl Reply {
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Standard error embed, shown only to the invoking user.
    pub fn error(message: impl Into<String>) -> Self {
        Self::embed(
            Embed::new()
                .title("❌ Error")
                .description(message)
                .color(COLOR_ERROR),
        )
        .ephemeral()
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    /// True when this reply is one of the standard rejection embeds
    /// (error color, ephemeral). Used by tests.
    pub fn is_rejection(&self) -> bool {
        self.ephemeral
            && self
                .embeds
                .first()
                .map(|embed| embed.color == COLOR_ERROR)
                .unwrap_or(false)
    }
}
