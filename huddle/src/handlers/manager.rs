use std::sync::Arc;

use huddle_api::{Command, CommandEvent, Topic};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{broker::Broker, cancel::Cancellation};

use super::{spawn_consumer, Handler};

/// Centrally manages all registered handlers and routes commands to them.
pub struct Manager {
    broker: Broker,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Manager {
    pub fn new(broker: Broker) -> Self {
        Self {
            broker,
            handlers: vec![],
        }
    }

    /// Register a handler. Ids are unique, a second handler with a known id is ignored.
    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        if self.handlers.iter().any(|h| h.id() == handler.id()) {
            warn!("A handler named {:?} is already registered", handler.id());
            return;
        }

        debug!("Registered handler {:?}", handler.id());
        self.handlers.push(handler);
    }

    pub fn ids(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.id()).collect()
    }

    /// Start every handler and then the command router.
    pub fn start(&self, cancel: Cancellation) -> Vec<JoinHandle<()>> {
        let mut handles: Vec<_> = self
            .handlers
            .iter()
            .flat_map(|h| h.clone().execute_handlers(cancel.clone()))
            .collect();

        let handlers = self.handlers.clone();
        handles.extend(spawn_consumer(
            "manager",
            &self.broker,
            Topic::Command,
            cancel,
            move |event: CommandEvent| {
                route(&handlers, &event);
                futures::future::ready(())
            },
        ));

        info!("Started {} handlers", self.handlers.len());
        handles
    }
}

/// Apply a command to the handler it names, or to all of them when the name
/// is empty. Returns how many handlers were affected.
pub fn route(handlers: &[Arc<dyn Handler>], event: &CommandEvent) -> usize {
    let targets: Vec<_> = handlers
        .iter()
        .filter(|h| event.handler.is_empty() || h.id() == event.handler)
        .collect();

    if targets.is_empty() {
        warn!("No handler named {:?}", event.handler);
    }

    for handler in &targets {
        info!("{:?} for {}", event.command, handler.id());
        match event.command {
            Command::Stop => handler.stop_notifications(),
            Command::Resume => handler.resume_notifications(),
        }
    }

    targets.len()
}
