//! Runs [`Effect`]s against the backend and feeds completions back in.

use std::future::Future;
use std::sync::Arc;

use advisor_api::ChatApi;
use advisor_common::{ChatSignal, EventBus, Notification, NotificationQueue, SessionId};
use advisor_config::ChatConfig;
use chrono::Local;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::event::{Effect, Event};
use crate::state::ChatState;

/// Owns the [`ChatState`] and the network tasks acting on its behalf.
///
/// Network calls run concurrently on the tokio runtime, but their
/// completions are applied one at a time from [`Orchestrator::step`], so
/// the state only ever changes on the caller's task.
pub struct Orchestrator {
    state: ChatState,
    api: Arc<dyn ChatApi>,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
    notifications: NotificationQueue,
    bus: EventBus,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn ChatApi>, settings: ChatConfig) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: ChatState::new(settings),
            api,
            completions_tx,
            completions_rx,
            in_flight: 0,
            notifications: NotificationQueue::default(),
            bus: EventBus::default(),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatSignal> {
        self.bus.subscribe()
    }

    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Number of network tasks whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply `event` now and start whatever it asks for.
    pub fn dispatch(&mut self, event: Event) {
        let effects = self.state.apply(event, Local::now());
        self.bus.publish(ChatSignal::StateChanged);
        for effect in effects {
            self.run(effect);
        }
    }

    /// Wait for the next network task to finish and apply its result.
    ///
    /// Returns `false` without waiting when nothing is in flight. Safe to
    /// use as a `tokio::select!` branch.
    pub async fn step(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Apply completions until no network task is left.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    pub fn start(&mut self) {
        self.dispatch(Event::Started);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.dispatch(Event::DraftChanged(text.into()));
    }

    pub fn submit(&mut self) {
        self.dispatch(Event::Submit);
    }

    /// Replace the draft with `question` and submit it.
    pub fn ask(&mut self, question: impl Into<String>) {
        self.set_draft(question);
        self.submit();
    }

    pub fn switch_to(&mut self, id: impl Into<String>) {
        self.dispatch(Event::SwitchTo(SessionId::persisted(id)));
    }

    pub fn new_chat(&mut self) {
        self.dispatch(Event::NewChat);
    }

    pub fn refresh_sidebar(&mut self) {
        self.dispatch(Event::RefreshSidebar);
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.dispatch(Event::DeleteRequested(id.into()));
    }

    pub fn confirm_delete(&mut self) {
        self.dispatch(Event::DeleteConfirmed);
    }

    pub fn cancel_delete(&mut self) {
        self.dispatch(Event::DeleteCancelled);
    }

    fn run(&mut self, effect: Effect) {
        let api = Arc::clone(&self.api);
        match effect {
            Effect::ProbeHealth => {
                self.spawn(async move { Event::HealthProbed(api.health().await) });
            }
            Effect::Query { tag, question } => self.spawn(async move {
                let result = api.query(&question, tag.session.server_id()).await;
                Event::QueryAnswered { tag, result }
            }),
            Effect::LoadSessions => {
                self.spawn(async move { Event::SessionsLoaded(api.list_sessions().await) });
            }
            Effect::LoadHistory { tag } => {
                let Some(id) = tag.session.server_id().map(String::from) else {
                    warn!("history requested for an unsaved session");
                    return;
                };
                self.spawn(async move {
                    let result = api.session_messages(&id).await;
                    Event::HistoryLoaded { tag, result }
                });
            }
            Effect::DeleteSession { session_id } => self.spawn(async move {
                let result = api.delete_session(&session_id).await;
                Event::SessionDeleted { session_id, result }
            }),
            Effect::ConfirmDelete { session_id, title } => {
                self.bus
                    .publish(ChatSignal::ConfirmDelete { session_id, title });
            }
            Effect::Notify(notification) => self.notify(notification),
            Effect::SessionSwitched(id) => {
                self.bus.publish(ChatSignal::SessionSwitched(id));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        debug!(title = %notification.title, "notification queued");
        self.notifications.push(notification);
        self.bus.publish(ChatSignal::Notified);
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let event = task.await;
            if tx.send(event).is_err() {
                debug!("orchestrator gone before completion arrived");
            }
        });
    }
}
