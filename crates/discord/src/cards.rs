use serde::Serialize;

use rollcall_core::{AvailabilitySummary, DisplayRef, Session, EMPTY_GROUP_PLACEHOLDER};

pub const COLOR_OPEN: u32 = 0x2ecc71;
pub const COLOR_CLOSED: u32 = 0xe74c3c;
pub const COLOR_PANEL: u32 = 0x3498db;

pub const ACTION_VOTE_AVAILABLE: &str = "availability.vote.available.v1";
pub const ACTION_VOTE_UNSURE: &str = "availability.vote.unsure.v1";
pub const ACTION_VOTE_UNAVAILABLE: &str = "availability.vote.unavailable.v1";
pub const ACTION_REMINDER: &str = "availability.remind.v1";
pub const ACTION_RESET: &str = "availability.reset.v1";
pub const ACTION_CLOSE: &str = "availability.close.v1";
pub const ACTION_CREATE: &str = "availability.create.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<CardField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonElement {
    pub action_id: String,
    pub label: String,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub disabled: bool,
}

impl ButtonElement {
    pub fn new(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            label: label.into(),
            style: ButtonStyle::Secondary,
            value: None,
            disabled: false,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A card plus its button rows, ready for `ChatApi::post_card`/`edit_card`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardMessage {
    pub card: Card,
    pub rows: Vec<Vec<ButtonElement>>,
}

pub struct CardBuilder {
    title: String,
    description: String,
    color: u32,
    fields: Vec<CardField>,
    footer: Option<String>,
    rows: Vec<Vec<ButtonElement>>,
}

impl CardBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            color: COLOR_OPEN,
            fields: Vec::new(),
            footer: None,
            rows: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(CardField { name: name.into(), value: value.into(), inline: false });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn row(mut self, buttons: Vec<ButtonElement>) -> Self {
        self.rows.push(buttons);
        self
    }

    pub fn build(self) -> CardMessage {
        CardMessage {
            card: Card {
                title: self.title,
                description: self.description,
                color: self.color,
                fields: self.fields,
                footer: self.footer,
            },
            rows: self.rows,
        }
    }
}

fn group_value(refs: &[DisplayRef]) -> String {
    if refs.is_empty() {
        EMPTY_GROUP_PLACEHOLDER.to_owned()
    } else {
        refs.iter().map(|display| display.0.as_str()).collect::<Vec<_>>().join("\n")
    }
}

/// The status card for a session: three tally fields and the vote/admin
/// button rows. Closed sessions render red, carry the lock marker, and
/// have every button disabled.
pub fn availability_card(session: &Session, summary: &AvailabilitySummary) -> CardMessage {
    let counts = summary.counts();
    let title = if session.closed {
        format!("{} 🔒 (Closed)", session.title)
    } else {
        session.title.clone()
    };

    let session_id = session.id.to_string();
    let disabled = session.closed;

    let mut builder = CardBuilder::new(title)
        .description(session.description.clone())
        .color(if session.closed { COLOR_CLOSED } else { COLOR_OPEN })
        .field(format!("✅ Accepted ({})", counts.accepted), group_value(&summary.accepted))
        .field(format!("❔ Tentative ({})", counts.tentative), group_value(&summary.tentative))
        .field(format!("❌ Declined ({})", counts.declined), group_value(&summary.declined));

    if session.closed {
        builder = builder.footer("This session is closed. Voting disabled.");
    }

    builder
        .row(vec![
            ButtonElement::new(ACTION_VOTE_AVAILABLE, "✅ Available")
                .style(ButtonStyle::Success)
                .value(&session_id)
                .disabled(disabled),
            ButtonElement::new(ACTION_VOTE_UNSURE, "❔ Unsure")
                .style(ButtonStyle::Secondary)
                .value(&session_id)
                .disabled(disabled),
            ButtonElement::new(ACTION_VOTE_UNAVAILABLE, "❌ Unavailable")
                .style(ButtonStyle::Danger)
                .value(&session_id)
                .disabled(disabled),
        ])
        .row(vec![
            ButtonElement::new(ACTION_REMINDER, "🔔 Reminder")
                .style(ButtonStyle::Primary)
                .value(&session_id)
                .disabled(disabled),
            ButtonElement::new(ACTION_RESET, "🔄 Reset votes")
                .style(ButtonStyle::Secondary)
                .value(&session_id)
                .disabled(disabled),
            ButtonElement::new(ACTION_CLOSE, "🔒 Close session")
                .style(ButtonStyle::Secondary)
                .value(&session_id)
                .disabled(disabled),
        ])
        .build()
}

/// The standing panel offering a button to start a new session.
pub fn panel_card() -> CardMessage {
    CardBuilder::new("📝 Availability")
        .description("Click the button below to create a new availability session.")
        .color(COLOR_PANEL)
        .row(vec![
            ButtonElement::new(ACTION_CREATE, "📝 Create availability").style(ButtonStyle::Primary)
        ])
        .build()
}

/// Broadcast text for a reminder, mentioning every target.
pub fn reminder_text(targets: &[DisplayRef]) -> String {
    let mentions = targets.iter().map(|display| display.0.as_str()).collect::<Vec<_>>().join(" ");
    format!("🔔 **Reminder:** Please vote if you'll be present!\n\n{mentions}")
}
