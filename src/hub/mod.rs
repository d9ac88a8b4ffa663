//! Fan-out of stream frames to connected subscribers.
//!
//! Each subscriber owns a bounded queue; `publish` only ever `try_send`s, so
//! a slow or dead subscriber can never stall a producer. A subscriber whose
//! queue is full is disconnected on the spot and the rest keep receiving.

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use crate::models::StreamFrame;

#[derive(Clone)]
pub struct BroadcastHub {
    inner: Arc<Mutex<HubState>>,
    queue_depth: usize,
}

struct HubState {
    subscribers: Vec<SubscriberSlot>,
}

struct SubscriberSlot {
    id: Uuid,
    tx: mpsc::Sender<StreamFrame>,
}

/// Receiving half handed to a connected observer. Dropping it disconnects.
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::Receiver<StreamFrame>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn recv(&mut self) -> Option<StreamFrame> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<StreamFrame> {
        self.receiver.try_recv().ok()
    }
}

impl BroadcastHub {
    pub fn new(queue_depth: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubState {
                subscribers: Vec::new(),
            })),
            queue_depth,
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, receiver) = mpsc::channel(self.queue_depth);
        let id = Uuid::new_v4();
        self.inner
            .lock()
            .unwrap()
            .subscribers
            .push(SubscriberSlot { id, tx });
        debug!("subscriber {id} connected");
        Subscription { id, receiver }
    }

    pub fn unsubscribe(&self, id: Uuid) {
        self.inner
            .lock()
            .unwrap()
            .subscribers
            .retain(|slot| slot.id != id);
    }

    /// Delivers one frame to every connected subscriber in publish order.
    /// Never blocks: overflowing or closed subscribers are dropped silently.
    pub fn publish(&self, frame: StreamFrame) {
        let mut state = self.inner.lock().unwrap();
        state.subscribers.retain(|slot| match slot.tx.try_send(frame.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("subscriber {} fell behind; disconnecting", slot.id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("subscriber {} disconnected", slot.id);
                false
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}
