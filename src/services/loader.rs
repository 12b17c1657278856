//! Background loading of hall data with stale-response protection.
//!
//! Each request runs on its own thread and reports back over a channel that
//! the UI loop polls. Hall requests are tagged with a generation number; only
//! the response for the most recent selection is handed out, earlier ones are
//! dropped when they arrive.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::models::{HallData, HallId, HallIndex};
use crate::services::data_source::DataSource;

/// Messages sent from loader threads to the UI loop.
#[derive(Debug)]
enum LoadMessage {
    Index(Result<HallIndex, String>),
    Hall {
        generation: u64,
        hall: HallId,
        result: Result<HallData, String>,
    },
}

/// A completed load that is still current.
#[derive(Debug)]
pub enum LoadEvent {
    /// Hall index finished loading
    Index(Result<HallIndex, String>),
    /// Data for the currently selected hall finished loading
    Hall {
        /// Hall the data belongs to
        hall: HallId,
        /// Loaded data or error description
        result: Result<HallData, String>,
    },
}

/// Loader state owned by the UI loop.
pub struct HallLoader {
    source: Arc<dyn DataSource>,
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
    generation: u64,
    pending: usize,
}

impl HallLoader {
    /// Creates a loader reading from `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (sender, receiver) = channel();
        Self {
            source,
            sender,
            receiver,
            generation: 0,
            pending: 0,
        }
    }

    /// The data source requests are served from.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Generation of the most recent hall request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any request has not reported back yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Starts loading the hall index.
    pub fn request_index(&mut self) {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        self.pending += 1;

        thread::spawn(move || {
            let result = source.fetch_index().map_err(|e| format!("{e:#}"));
            let _ = sender.send(LoadMessage::Index(result));
        });
    }

    /// Starts loading a hall, superseding any earlier hall request.
    ///
    /// Returns the generation assigned to this request.
    pub fn request_hall(&mut self, hall: HallId) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        self.pending += 1;

        debug!("Loading hall {hall} (generation {generation})");
        thread::spawn(move || {
            let result = source.fetch_hall(hall).map_err(|e| format!("{e:#}"));
            let _ = sender.send(LoadMessage::Hall {
                generation,
                hall,
                result,
            });
        });

        generation
    }

    /// Drains finished loads, dropping hall responses that are no longer current.
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.pending = self.pending.saturating_sub(1);
                    if let Some(event) = self.accept(message) {
                        events.push(event);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Blocks until every outstanding request has reported back.
    pub fn wait(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while self.pending > 0 {
            match self.receiver.recv() {
                Ok(message) => {
                    self.pending -= 1;
                    if let Some(event) = self.accept(message) {
                        events.push(event);
                    }
                }
                Err(_) => break,
            }
        }
        events
    }

    fn accept(&self, message: LoadMessage) -> Option<LoadEvent> {
        match message {
            LoadMessage::Index(result) => Some(LoadEvent::Index(result)),
            LoadMessage::Hall {
                generation,
                hall,
                result,
            } => {
                if generation == self.generation {
                    Some(LoadEvent::Hall { hall, result })
                } else {
                    debug!(
                        "Dropping stale data for hall {hall} (generation {generation}, current {})",
                        self.generation
                    );
                    None
                }
            }
        }
    }
}
