use std::sync::Arc;

use twilight_http::Client;
use twilight_model::{
    application::interaction::{InteractionData, modal::ModalInteractionComponent},
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::UserMarker},
};

use crate::menu::MenuView;
use crate::respond;

/// Identity seam for access predicates.
///
/// Implemented by [`ComponentEvent`] and by test doubles, so gating logic
/// can be exercised without a live interaction.
pub trait EventActor {
    /// The acting user's id, when the platform supplied one.
    fn actor_id(&self) -> Option<Id<UserMarker>>;
}

/// An inbound component or modal-submit interaction plus reply capability.
///
/// Cheap to clone; both halves are reference-counted.
#[derive(Clone)]
pub struct ComponentEvent {
    http: Arc<Client>,
    interaction: Arc<InteractionCreate>,
}

impl ComponentEvent {
    pub fn new(http: Arc<Client>, interaction: Box<InteractionCreate>) -> Self {
        Self {
            http,
            interaction: Arc::from(interaction),
        }
    }

    pub fn http(&self) -> &Arc<Client> {
        &self.http
    }

    pub fn interaction(&self) -> &InteractionCreate {
        &self.interaction
    }

    /// Custom ID of the component or modal this event originates from.
    pub fn custom_id(&self) -> Option<&str> {
        match self.interaction.data.as_ref()? {
            InteractionData::MessageComponent(data) => Some(&data.custom_id),
            InteractionData::ModalSubmit(data) => Some(&data.custom_id),
            _ => None,
        }
    }

    /// Selected option values of a select-menu submission.
    pub fn select_values(&self) -> &[String] {
        match self.interaction.data.as_ref() {
            Some(InteractionData::MessageComponent(data)) => &data.values,
            _ => &[],
        }
    }

    /// Value of a named text input on a modal-submit event.
    pub fn text_input(&self, custom_id: &str) -> Option<&str> {
        let InteractionData::ModalSubmit(modal) = self.interaction.data.as_ref()? else {
            return None;
        };

        for component in &modal.components {
            if let ModalInteractionComponent::ActionRow(row) = component {
                for nested in &row.components {
                    if let ModalInteractionComponent::TextInput(input) = nested
                        && input.custom_id == custom_id
                    {
                        return Some(input.value.as_str());
                    }
                }
            }
        }

        None
    }

    /// Replace the originating message with a new menu view.
    pub async fn update_message(&self, view: &MenuView) -> anyhow::Result<()> {
        respond::respond_update_message(&self.http, &self.interaction, &view.embeds, &view.components)
            .await
    }

    /// Reply with an ephemeral message only the acting user sees.
    pub async fn reply_ephemeral(&self, content: &str) -> anyhow::Result<()> {
        respond::respond_ephemeral_message(&self.http, &self.interaction, content).await
    }
}

impl EventActor for ComponentEvent {
    fn actor_id(&self) -> Option<Id<UserMarker>> {
        self.interaction.author_id()
    }
}
