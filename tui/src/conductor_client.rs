//! Conductor Client
//!
//! Thin wrapper around the Conductor for TUI integration.
//! This client embeds the Conductor directly (no network) and provides
//! a convenient interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All state lives in the Conductor. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to Conductor
//! 3. Receive ConductorMessages
//! 4. Render display state based on messages

use tokio::sync::mpsc;

use hanzi_conductor::{
    Conductor, ConductorMessage, HanziConfig, LoadState, MetadataBackend, Mode, SpeechEngine,
    SpeechKey, SurfaceEvent, SurfaceType, WidgetFactory,
};

/// Capacity of the Conductor -> TUI channel
const CHANNEL_CAPACITY: usize = 256;

/// Client for communicating with the embedded Conductor
pub struct ConductorClient {
    /// The embedded Conductor instance
    conductor: Conductor<Box<dyn MetadataBackend>>,
    /// Receiver for messages from Conductor
    rx: mpsc::Receiver<ConductorMessage>,
}

impl ConductorClient {
    /// Create a client from resolved configuration
    pub fn new(config: &HanziConfig, widgets: Box<dyn WidgetFactory>) -> Self {
        let backend = config.backend_config().build(config.fetch_timeout);
        Self::with_parts(backend, config, widgets, config.speech.build())
    }

    /// Create a client with an explicit backend and speech engine
    pub fn with_parts(
        backend: Box<dyn MetadataBackend>,
        config: &HanziConfig,
        widgets: Box<dyn WidgetFactory>,
        speech: Box<dyn SpeechEngine>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let conductor = Conductor::new(backend, config.conductor_config(), widgets, speech, tx);
        Self { conductor, rx }
    }

    /// Start the Conductor (health check)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.conductor.start().await
    }

    /// Connect this surface to the Conductor
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::Connected {
            event_id: SurfaceEvent::new_event_id(),
            surface_type: SurfaceType::Tui,
        })
        .await
    }

    /// Submit the input line
    pub async fn submit(&mut self, input: String) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::Submit {
            event_id: SurfaceEvent::new_event_id(),
            input,
        })
        .await
    }

    /// Select a board mode
    pub async fn select_mode(&mut self, mode: Mode) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::ModeSelected {
            event_id: SurfaceEvent::new_event_id(),
            mode,
        })
        .await
    }

    /// Press a speech control
    pub async fn speak(&mut self, key: SpeechKey) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::Speak {
            event_id: SurfaceEvent::new_event_id(),
            key,
        })
        .await
    }

    /// Notify Conductor that user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::QuitRequested {
            event_id: SurfaceEvent::new_event_id(),
        })
        .await
    }

    /// Apply completed fetches and callbacks (must be called every frame)
    pub async fn poll(&mut self) -> bool {
        self.conductor.poll().await
    }

    /// Receive all pending messages from the Conductor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<ConductorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Current fetch lifecycle state
    pub fn load_state(&self) -> LoadState {
        self.conductor.load_state()
    }

    /// Name of the metadata backend in use
    pub fn backend_name(&self) -> &str {
        self.conductor.backend_name()
    }

    /// Send raw surface event to Conductor
    pub async fn send_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        self.conductor.handle_event(event).await
    }
}
