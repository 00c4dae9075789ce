use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use rollcall_core::{
    AccessPolicy, Caller, ChannelRef, MessageRef, SessionId, SessionStore, VoteValue,
};

use crate::api::{CallerContext, ChatApiError, NoopChatApi};
use crate::cards::{
    ACTION_CLOSE, ACTION_CREATE, ACTION_REMINDER, ACTION_RESET, ACTION_VOTE_AVAILABLE,
    ACTION_VOTE_UNAVAILABLE, ACTION_VOTE_UNSURE,
};
use crate::service::AvailabilityService;

/// Slash command that posts the standing panel.
pub const PANEL_COMMAND: &str = "/availability_panel";

/// Context-menu command on a posted card.
pub const EDIT_COMMAND: &str = "Edit availability";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayEnvelope {
    pub envelope_id: String,
    pub event: GatewayEvent,
}

/// Incoming UI events as plain records; handlers are stateless functions
/// over the injected store, so everything routes without live view objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayEvent {
    SlashCommand(SlashCommandEvent),
    ComponentAction(ComponentActionEvent),
    FormSubmit(FormSubmitEvent),
    MessageCommand(MessageCommandEvent),
    Unsupported { event_type: String },
}

impl GatewayEvent {
    pub fn event_type(&self) -> GatewayEventType {
        match self {
            Self::SlashCommand(_) => GatewayEventType::SlashCommand,
            Self::ComponentAction(_) => GatewayEventType::ComponentAction,
            Self::FormSubmit(_) => GatewayEventType::FormSubmit,
            Self::MessageCommand(_) => GatewayEventType::MessageCommand,
            Self::Unsupported { .. } => GatewayEventType::Unsupported,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GatewayEventType {
    SlashCommand,
    ComponentAction,
    FormSubmit,
    MessageCommand,
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashCommandEvent {
    pub command: String,
    pub channel: ChannelRef,
    pub caller: Caller,
    pub context: CallerContext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentActionEvent {
    pub action_id: String,
    pub value: Option<String>,
    pub channel: ChannelRef,
    pub message: MessageRef,
    pub caller: Caller,
    pub context: CallerContext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmitEvent {
    pub form: SubmittedForm,
    pub channel: ChannelRef,
    pub caller: Caller,
    pub context: CallerContext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmittedForm {
    CreateSession { title: String, description: String },
    EditSession { session_id: SessionId, title: String, description: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageCommandEvent {
    pub command: String,
    pub message: MessageRef,
    pub channel: ChannelRef,
    pub caller: Caller,
    pub context: CallerContext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventContext {
    pub correlation_id: String,
}

impl Default for EventContext {
    fn default() -> Self {
        Self { correlation_id: "unknown-correlation-id".to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerResult {
    Processed,
    Ignored,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventHandlerError {
    #[error(transparent)]
    Api(#[from] ChatApiError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Handler(#[from] EventHandlerError),
}

#[async_trait]
pub trait EventHandler: Send + Sync {
    fn event_type(&self) -> GatewayEventType;
    async fn handle(
        &self,
        envelope: &GatewayEnvelope,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError>;
}

#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<GatewayEventType, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.handlers.insert(handler.event_type(), Arc::new(handler));
    }

    pub async fn dispatch(
        &self,
        envelope: &GatewayEnvelope,
        ctx: &EventContext,
    ) -> Result<HandlerResult, DispatchError> {
        let Some(handler) = self.handlers.get(&envelope.event.event_type()) else {
            return Ok(HandlerResult::Ignored);
        };

        handler.handle(envelope, ctx).await.map_err(DispatchError::from)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Dispatcher wired to the given service, one handler per event kind.
pub fn dispatcher_for(service: Arc<AvailabilityService>) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(SlashCommandHandler { service: service.clone() });
    dispatcher.register(ComponentActionHandler { service: service.clone() });
    dispatcher.register(FormSubmitHandler { service: service.clone() });
    dispatcher.register(MessageCommandHandler { service });
    dispatcher
}

/// Offline dispatcher over a fresh store and the noop chat API.
pub fn default_dispatcher() -> EventDispatcher {
    let service = AvailabilityService::new(
        Arc::new(SessionStore::new()),
        Arc::new(NoopChatApi::default()),
        AccessPolicy::AdminOnly,
    );
    dispatcher_for(Arc::new(service))
}

pub struct SlashCommandHandler {
    service: Arc<AvailabilityService>,
}

#[async_trait]
impl EventHandler for SlashCommandHandler {
    fn event_type(&self) -> GatewayEventType {
        GatewayEventType::SlashCommand
    }

    async fn handle(
        &self,
        envelope: &GatewayEnvelope,
        _ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let GatewayEvent::SlashCommand(event) = &envelope.event else {
            return Ok(HandlerResult::Ignored);
        };

        if event.command != PANEL_COMMAND {
            return Ok(HandlerResult::Ignored);
        }

        self.service.post_panel(&event.channel, &event.context).await?;
        Ok(HandlerResult::Processed)
    }
}

pub struct ComponentActionHandler {
    service: Arc<AvailabilityService>,
}

impl ComponentActionHandler {
    fn vote_value(action_id: &str) -> Option<VoteValue> {
        match action_id {
            ACTION_VOTE_AVAILABLE => Some(VoteValue::Available),
            ACTION_VOTE_UNSURE => Some(VoteValue::Unsure),
            ACTION_VOTE_UNAVAILABLE => Some(VoteValue::Unavailable),
            _ => None,
        }
    }
}

#[async_trait]
impl EventHandler for ComponentActionHandler {
    fn event_type(&self) -> GatewayEventType {
        GatewayEventType::ComponentAction
    }

    async fn handle(
        &self,
        envelope: &GatewayEnvelope,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let GatewayEvent::ComponentAction(event) = &envelope.event else {
            return Ok(HandlerResult::Ignored);
        };

        if event.action_id == ACTION_CREATE {
            self.service.open_create_form(&event.caller, &event.context).await?;
            return Ok(HandlerResult::Processed);
        }

        // Every session-scoped button carries the session id as its value.
        let Some(session_id) = event.value.as_deref().map(|id| SessionId(id.to_owned())) else {
            warn!(
                correlation_id = %ctx.correlation_id,
                action_id = %event.action_id,
                "component action without a session value; ignoring"
            );
            return Ok(HandlerResult::Ignored);
        };

        if let Some(value) = Self::vote_value(&event.action_id) {
            self.service.vote(&session_id, &event.caller, value, &event.context).await?;
            return Ok(HandlerResult::Processed);
        }

        match event.action_id.as_str() {
            ACTION_REMINDER => {
                self.service.send_reminder(&session_id, &event.caller, &event.context).await?;
                Ok(HandlerResult::Processed)
            }
            ACTION_RESET => {
                self.service.reset_votes(&session_id, &event.caller, &event.context).await?;
                Ok(HandlerResult::Processed)
            }
            ACTION_CLOSE => {
                self.service.close_session(&session_id, &event.caller, &event.context).await?;
                Ok(HandlerResult::Processed)
            }
            _ => Ok(HandlerResult::Ignored),
        }
    }
}

pub struct FormSubmitHandler {
    service: Arc<AvailabilityService>,
}

#[async_trait]
impl EventHandler for FormSubmitHandler {
    fn event_type(&self) -> GatewayEventType {
        GatewayEventType::FormSubmit
    }

    async fn handle(
        &self,
        envelope: &GatewayEnvelope,
        _ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let GatewayEvent::FormSubmit(event) = &envelope.event else {
            return Ok(HandlerResult::Ignored);
        };

        match &event.form {
            SubmittedForm::CreateSession { title, description } => {
                self.service
                    .create_session(
                        &event.channel,
                        title,
                        description,
                        &event.caller,
                        &event.context,
                    )
                    .await?;
            }
            SubmittedForm::EditSession { session_id, title, description } => {
                self.service
                    .edit_session(session_id, title, description, &event.caller, &event.context)
                    .await?;
            }
        }

        Ok(HandlerResult::Processed)
    }
}

pub struct MessageCommandHandler {
    service: Arc<AvailabilityService>,
}

#[async_trait]
impl EventHandler for MessageCommandHandler {
    fn event_type(&self) -> GatewayEventType {
        GatewayEventType::MessageCommand
    }

    async fn handle(
        &self,
        envelope: &GatewayEnvelope,
        _ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let GatewayEvent::MessageCommand(event) = &envelope.event else {
            return Ok(HandlerResult::Ignored);
        };

        if event.command != EDIT_COMMAND {
            return Ok(HandlerResult::Ignored);
        }

        self.service
            .open_edit_form_for_card(&event.message, &event.caller, &event.context)
            .await?;
        Ok(HandlerResult::Processed)
    }
}
