//! UI event loop
//!
//! Everything that touches a note window runs on one thread: the thread that
//! owns the [`UiEventLoop`]. Platform callbacks that arrive elsewhere (OS hook
//! threads, tray menus, a launcher) post through a cloneable [`UiHandle`]; the
//! loop drains the queue, dispatches to the [`WindowManager`] and then fires
//! any debounced saves that came due. Saves therefore never run concurrently
//! with an edit.
//!
//! Hosts with their own event loop call [`UiEventLoop::pump`] from an idle or
//! timer callback and use [`UiEventLoop::next_deadline`] to schedule the next
//! wake-up. Hosts without one can call [`UiEventLoop::run`].

use std::time::{Duration, Instant};

use async_channel::{Receiver, Sender, TryRecvError};
use tracing::{debug, info, warn};

use crate::error::ResultExt;
use crate::window::{WindowEvent, WindowId};
use crate::window_manager::WindowManager;

/// Longest sleep between queue checks while a save is pending.
const MAX_IDLE_SLICE: Duration = Duration::from_millis(10);

/// Queue capacity; senders block when the UI thread falls this far behind.
const QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    Window { id: WindowId, event: WindowEvent },
    /// Collapse a window without a gesture (silent launch path)
    ForceMini(WindowId),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    ShutdownRequested,
}

/// Thread-safe way to reach the UI thread.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: Sender<UiMessage>,
}

impl UiHandle {
    /// Queue an event for a window. Returns false once the loop is gone.
    pub fn post(&self, id: WindowId, event: WindowEvent) -> bool {
        self.send(UiMessage::Window { id, event })
    }

    pub fn force_mini(&self, id: WindowId) -> bool {
        self.send(UiMessage::ForceMini(id))
    }

    pub fn shutdown(&self) -> bool {
        self.send(UiMessage::Shutdown)
    }

    fn send(&self, message: UiMessage) -> bool {
        self.tx.send_blocking(message).is_ok()
    }
}

pub struct UiEventLoop {
    manager: WindowManager,
    tx: Sender<UiMessage>,
    rx: Receiver<UiMessage>,
}

impl std::fmt::Debug for UiEventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiEventLoop")
            .field("manager", &self.manager)
            .field("queued", &self.rx.len())
            .finish()
    }
}

impl UiEventLoop {
    pub fn new(manager: WindowManager) -> Self {
        let (tx, rx) = async_channel::bounded(QUEUE_CAPACITY);
        Self { manager, tx, rx }
    }

    pub fn handle(&self) -> UiHandle {
        UiHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    /// Direct access for code already running on the UI thread.
    pub fn manager_mut(&mut self) -> &mut WindowManager {
        &mut self.manager
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.manager.next_deadline()
    }

    /// Drain queued messages, then fire due saves.
    pub fn pump(&mut self) -> LoopStatus {
        let mut status = LoopStatus::Running;
        loop {
            match self.rx.try_recv() {
                Ok(message) => {
                    if self.handle_message(message) == LoopStatus::ShutdownRequested {
                        status = LoopStatus::ShutdownRequested;
                        break;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        let fired = self.manager.tick();
        if fired > 0 {
            debug!(fired, "Debounced saves fired");
        }
        status
    }

    fn handle_message(&mut self, message: UiMessage) -> LoopStatus {
        match message {
            UiMessage::Window { id, event } => {
                // Late events for a window that already closed are expected
                self.manager.dispatch(id, event).warn_on_err();
                LoopStatus::Running
            }
            UiMessage::ForceMini(id) => {
                self.manager.force_mini_mode(id).warn_on_err();
                LoopStatus::Running
            }
            UiMessage::Shutdown => LoopStatus::ShutdownRequested,
        }
    }

    /// Block, pumping until shutdown is requested, then close every window.
    pub fn run(mut self) -> WindowManager {
        info!(open_windows = self.manager.len(), "UI loop started");
        loop {
            if self.pump() == LoopStatus::ShutdownRequested {
                break;
            }

            match self.manager.next_deadline() {
                None => match self.rx.recv_blocking() {
                    Ok(message) => {
                        if self.handle_message(message) == LoopStatus::ShutdownRequested {
                            break;
                        }
                    }
                    Err(_) => {
                        warn!("UI queue closed, stopping loop");
                        break;
                    }
                },
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    if !wait.is_zero() && self.rx.is_empty() {
                        std::thread::sleep(wait.min(MAX_IDLE_SLICE));
                    }
                }
            }
        }

        self.manager.close_all();
        info!("UI loop stopped");
        self.manager
    }
}
