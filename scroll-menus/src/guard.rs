use std::{future::Future, pin::Pin, sync::Arc};

use twilight_model::channel::message::component::Component;
use twilight_model::id::{Id, marker::UserMarker};

use crate::event::{ComponentEvent, EventActor};

/// Standardized reply for denied interactions.
pub const NOT_ALLOWED_MESSAGE: &str = "Not Allowed: you cannot use this component.";

/// Boxed future returned by component handlers.
pub type EventFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// First-class async handler invoked with the triggering event.
pub type EventHandler<E> = Arc<dyn Fn(E) -> EventFuture + Send + Sync>;

/// Access predicate deciding whether an event reaches the submit handler.
pub type EventPredicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Box a plain async closure into an [`EventHandler`].
pub fn handler<E, F, Fut>(f: F) -> EventHandler<E>
where
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |event| Box::pin(f(event)))
}

struct Gate<E> {
    predicate: EventPredicate<E>,
    on_denied: EventHandler<E>,
}

/// An interactive control paired with an optional access gate.
///
/// Invocation runs the predicate first: a false verdict redirects the event
/// to the denial handler and stops; a true verdict runs the submit handler.
/// Exactly one of the two runs per invocation. A denied interaction is
/// terminal for that invocation only; the user may interact again.
pub struct Guarded<E> {
    control: Component,
    gate: Option<Gate<E>>,
    on_submit: EventHandler<E>,
}

impl<E> Guarded<E> {
    /// Wrap a control with no access restriction.
    pub fn new<F, Fut>(control: Component, on_submit: F) -> Self
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            control,
            gate: None,
            on_submit: handler(on_submit),
        }
    }

    /// Wrap a control behind a predicate, with an explicit denial handler.
    pub fn with_predicate<P, D, DFut, F, Fut>(
        predicate: P,
        if_denied: D,
        control: Component,
        on_submit: F,
    ) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
        D: Fn(E) -> DFut + Send + Sync + 'static,
        DFut: Future<Output = anyhow::Result<()>> + Send + 'static,
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            control,
            gate: Some(Gate {
                predicate: Arc::new(predicate),
                on_denied: handler(if_denied),
            }),
            on_submit: handler(on_submit),
        }
    }

    /// The wrapped twilight component, for message construction.
    pub fn control(&self) -> &Component {
        &self.control
    }

    /// Custom ID of the wrapped control, when it carries one.
    pub fn custom_id(&self) -> Option<&str> {
        component_custom_id(&self.control)
    }

    /// Run the gate and exactly one of the handlers.
    pub async fn handle(&self, event: E) -> anyhow::Result<()> {
        if let Some(gate) = &self.gate
            && !(gate.predicate)(&event)
        {
            return (gate.on_denied)(event).await;
        }
        (self.on_submit)(event).await
    }
}

impl Guarded<ComponentEvent> {
    /// Restrict a control to a single user.
    ///
    /// Other users get the standard "Not Allowed" ephemeral reply.
    pub fn user<F, Fut>(user_id: Id<UserMarker>, control: Component, on_submit: F) -> Self
    where
        F: Fn(ComponentEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::group(vec![user_id], control, on_submit)
    }

    /// Restrict a control to a set of users, with the standard denial.
    pub fn group<F, Fut>(user_ids: Vec<Id<UserMarker>>, control: Component, on_submit: F) -> Self
    where
        F: Fn(ComponentEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::with_predicate(
            move |event: &ComponentEvent| group_allows(&user_ids, event.actor_id()),
            deny_not_allowed,
            control,
            on_submit,
        )
    }
}

/// Whether the acting user is in the allowed set. A missing identity is
/// always denied.
pub fn group_allows(allowed: &[Id<UserMarker>], actor: Option<Id<UserMarker>>) -> bool {
    actor.is_some_and(|id| allowed.contains(&id))
}

/// Default denial handler: the standard "Not Allowed" ephemeral reply.
async fn deny_not_allowed(event: ComponentEvent) -> anyhow::Result<()> {
    event.reply_ephemeral(NOT_ALLOWED_MESSAGE).await
}

fn component_custom_id(component: &Component) -> Option<&str> {
    match component {
        Component::Button(button) => button.custom_id.as_deref(),
        Component::SelectMenu(menu) => Some(&menu.custom_id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use twilight_model::channel::message::component::{Button, ButtonStyle};

    use super::*;

    struct TestEvent {
        actor: Option<Id<UserMarker>>,
    }

    impl EventActor for TestEvent {
        fn actor_id(&self) -> Option<Id<UserMarker>> {
            self.actor
        }
    }

    fn test_button() -> Component {
        Component::Button(Button {
            id: None,
            custom_id: Some("test-button".to_owned()),
            disabled: false,
            emoji: None,
            label: Some("Press".to_owned()),
            style: ButtonStyle::Secondary,
            url: None,
            sku_id: None,
        })
    }

    fn counting_guard(
        allow: bool,
    ) -> (Guarded<TestEvent>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let submits = Arc::new(AtomicUsize::new(0));
        let denials = Arc::new(AtomicUsize::new(0));
        let submit_count = Arc::clone(&submits);
        let denial_count = Arc::clone(&denials);

        let guarded = Guarded::with_predicate(
            move |_event: &TestEvent| allow,
            move |_event| {
                let denial_count = Arc::clone(&denial_count);
                async move {
                    denial_count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
            test_button(),
            move |_event| {
                let submit_count = Arc::clone(&submit_count);
                async move {
                    submit_count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        );

        (guarded, submits, denials)
    }

    #[tokio::test]
    async fn allowed_event_runs_submit_handler_only() {
        let (guarded, submits, denials) = counting_guard(true);

        guarded
            .handle(TestEvent {
                actor: Some(Id::new(42)),
            })
            .await
            .expect("handler succeeds");

        assert_eq!(submits.load(Ordering::SeqCst), 1);
        assert_eq!(denials.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denied_event_runs_denial_handler_only() {
        let (guarded, submits, denials) = counting_guard(false);

        guarded
            .handle(TestEvent {
                actor: Some(Id::new(42)),
            })
            .await
            .expect("handler succeeds");

        assert_eq!(submits.load(Ordering::SeqCst), 0);
        assert_eq!(denials.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unrestricted_control_always_submits() {
        let submits = Arc::new(AtomicUsize::new(0));
        let submit_count = Arc::clone(&submits);
        let guarded = Guarded::new(test_button(), move |_event: TestEvent| {
            let submit_count = Arc::clone(&submit_count);
            async move {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        guarded
            .handle(TestEvent { actor: None })
            .await
            .expect("handler succeeds");

        assert_eq!(submits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn group_membership_decides_access() {
        let allowed = vec![Id::new(1), Id::new(2)];

        assert!(group_allows(&allowed, Some(Id::new(1))));
        assert!(group_allows(&allowed, Some(Id::new(2))));
        assert!(!group_allows(&allowed, Some(Id::new(3))));
        assert!(!group_allows(&allowed, None));
    }

    #[test]
    fn custom_id_comes_from_the_wrapped_control() {
        let guarded = Guarded::new(test_button(), |_event: TestEvent| async { Ok(()) });
        assert_eq!(guarded.custom_id(), Some("test-button"));
    }
}
