//! Background event loop.
//!
//! Browser events and inbound extension messages arrive on one channel. Each
//! event is handled in its own task so slow requests never block others;
//! there is no ordering between events.

use orla_protocols::{
    ChannelError, Message, MessageSender, Reply, ReplyToken, TabContext, TabId, dispatch,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::coordinator::Coordinator;

/// Everything the background context reacts to.
#[derive(Debug)]
pub enum BackgroundEvent {
    /// The extension's action icon was clicked on a tab.
    ActionClicked(TabContext),
    /// A tab's URL or loading status changed.
    TabUpdated(TabContext),
    /// The user switched to another tab.
    TabActivated(TabId),
    /// The extension was installed or updated.
    Installed,
    /// An extension-bus message addressed to the background context.
    Message {
        message: Message,
        sender: MessageSender,
        reply: ReplyToken,
    },
}

impl BackgroundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BackgroundEvent::ActionClicked(_) => "action_clicked",
            BackgroundEvent::TabUpdated(_) => "tab_updated",
            BackgroundEvent::TabActivated(_) => "tab_activated",
            BackgroundEvent::Installed => "installed",
            BackgroundEvent::Message { message, .. } => message.kind(),
        }
    }
}

/// Sending side of the event loop.
#[derive(Clone)]
pub struct EventLoopHandle {
    tx: mpsc::Sender<BackgroundEvent>,
    shutdown: CancellationToken,
}

impl EventLoopHandle {
    /// Queue an event.
    pub async fn send(&self, event: BackgroundEvent) -> Result<(), ChannelError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| ChannelError::NoReceiver)
    }

    /// Send `message` as the sidebar UI and wait for the coordinator's reply.
    pub async fn request(&self, message: Message) -> Result<Reply, ChannelError> {
        let (reply, pending) = ReplyToken::channel();
        self.send(BackgroundEvent::Message {
            message,
            sender: MessageSender::sidebar_ui(),
            reply,
        })
        .await?;
        pending.recv().await
    }

    /// Stop accepting events. Queued and in-flight events still finish.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

pub struct EventLoop {
    coordinator: Coordinator,
    rx: mpsc::Receiver<BackgroundEvent>,
    shutdown: CancellationToken,
    tracker: TaskTracker,
}

impl EventLoop {
    pub fn new(coordinator: Coordinator, capacity: usize) -> (Self, EventLoopHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let shutdown = CancellationToken::new();
        let handle = EventLoopHandle {
            tx,
            shutdown: shutdown.clone(),
        };
        let event_loop = Self {
            coordinator,
            rx,
            shutdown,
            tracker: TaskTracker::new(),
        };
        (event_loop, handle)
    }

    /// Run until shutdown is requested or every handle is dropped.
    pub async fn run(mut self) {
        info!("Background event loop started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    debug!("Shutdown requested");
                    break;
                }
                event = self.rx.recv() => match event {
                    Some(event) => self.spawn(event),
                    None => {
                        debug!("All event loop handles dropped");
                        break;
                    }
                },
            }
        }

        self.rx.close();
        while let Some(event) = self.rx.recv().await {
            self.spawn(event);
        }
        self.tracker.close();
        self.tracker.wait().await;
        info!("Background event loop stopped");
    }

    fn spawn(&self, event: BackgroundEvent) {
        let coordinator = self.coordinator.clone();
        self.tracker.spawn(async move {
            handle_event(&coordinator, event).await;
        });
    }
}

async fn handle_event(coordinator: &Coordinator, event: BackgroundEvent) {
    let name = event.name();
    debug!("Handling {}", name);
    let result = match event {
        BackgroundEvent::ActionClicked(tab) => coordinator.handle_icon_click(tab).await,
        BackgroundEvent::TabUpdated(tab) => coordinator.handle_tab_updated(tab).await,
        BackgroundEvent::TabActivated(tab_id) => coordinator.handle_tab_activated(tab_id).await,
        BackgroundEvent::Installed => {
            if let Err(e) = coordinator.handle_installed().await {
                warn!("Install defaults not written: {}", e);
            }
            Ok(())
        }
        BackgroundEvent::Message {
            message,
            sender,
            reply,
        } => {
            dispatch(coordinator, message, sender, reply).await;
            Ok(())
        }
    };
    if let Err(e) = result {
        debug!("{} ended without page info: {}", name, e);
    }
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;
