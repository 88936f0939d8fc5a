//! Publish/subscribe link backed by an in-process inbox.
//!
//! Inbound messages arrive on a bounded `embassy-sync` [`Channel`] that
//! any thread may push into (the console in the host build, a network
//! task on a board). The link resolves topic strings to [`ParamKind`]s
//! against its subscription table and hands typed updates to the core.
//! Outbound readings are written to the log.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info};

use crate::app::ports::LinkPort;
use crate::error::LinkError;
use crate::remote::{OutboundTopic, PAYLOAD_CAPACITY, ParamKind, RemoteUpdate, Topic};

/// Messages that can queue between two control ticks.
pub const INBOX_DEPTH: usize = 8;

const MAX_SUBSCRIPTIONS: usize = ParamKind::ALL.len();

/// Raw message as received from the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: Topic,
    pub payload: heapless::Vec<u8, PAYLOAD_CAPACITY>,
}

impl InboundMessage {
    /// `None` if either part exceeds its capacity.
    pub fn new(topic: &str, payload: &[u8]) -> Option<Self> {
        let mut t = Topic::new();
        t.push_str(topic).ok()?;
        let payload = heapless::Vec::from_slice(payload).ok()?;
        Some(Self { topic: t, payload })
    }
}

pub type Inbox = Channel<CriticalSectionRawMutex, InboundMessage, INBOX_DEPTH>;

/// Process-wide inbox used by the host binary.
pub static INBOX: Inbox = Channel::new();

/// Queue a message. Returns `false` when the inbox is full.
pub fn deliver(inbox: &Inbox, message: InboundMessage) -> bool {
    inbox.try_send(message).is_ok()
}

/// [`LinkPort`] over an [`Inbox`].
pub struct InboxLink {
    inbox: &'static Inbox,
    /// Whether the broker is reachable; flipped from outside.
    broker_up: Arc<AtomicBool>,
    connected: bool,
    subscriptions: heapless::Vec<(Topic, ParamKind), MAX_SUBSCRIPTIONS>,
}

impl InboxLink {
    pub fn new(inbox: &'static Inbox, broker_up: Arc<AtomicBool>) -> Self {
        Self {
            inbox,
            broker_up,
            connected: false,
            subscriptions: heapless::Vec::new(),
        }
    }

    fn resolve(&self, topic: &str) -> Option<ParamKind> {
        self.subscriptions
            .iter()
            .find(|(t, _)| t.as_str() == topic)
            .map(|&(_, kind)| kind)
    }
}

impl LinkPort for InboxLink {
    fn is_connected(&self) -> bool {
        self.connected && self.broker_up.load(Ordering::Acquire)
    }

    fn connect(&mut self) -> Result<(), LinkError> {
        if !self.broker_up.load(Ordering::Acquire) {
            self.connected = false;
            return Err(LinkError::ConnectFailed);
        }
        // Clean session: subscriptions do not survive a reconnect.
        self.subscriptions.clear();
        self.connected = true;
        Ok(())
    }

    fn subscribe(&mut self, topic: &str, kind: ParamKind) -> Result<(), LinkError> {
        if !self.is_connected() {
            return Err(LinkError::Disconnected);
        }
        if self.resolve(topic).is_some() {
            return Ok(());
        }
        let mut t = Topic::new();
        t.push_str(topic).map_err(|_| LinkError::SubscribeFailed)?;
        self.subscriptions
            .push((t, kind))
            .map_err(|_| LinkError::SubscribeFailed)?;
        debug!("Subscribed {} as {:?}", topic, kind);
        Ok(())
    }

    fn poll(&mut self) -> Option<RemoteUpdate> {
        if !self.is_connected() {
            return None;
        }
        while let Ok(message) = self.inbox.try_receive() {
            match self.resolve(&message.topic) {
                Some(kind) => return Some(RemoteUpdate::from_bytes(kind, &message.payload)),
                None => debug!("Dropping message on unsubscribed topic {}", message.topic),
            }
        }
        None
    }

    fn publish(&mut self, topic: OutboundTopic, payload: &str) -> Result<(), LinkError> {
        if !self.is_connected() {
            return Err(LinkError::Disconnected);
        }
        info!("PUB   | {} = {}", topic.as_str(), payload);
        Ok(())
    }
}
