//! Ringtones - application wiring
//!
//! Builds the playback manager over a lazily opened cpal output, hooks a
//! status observer into it and hands everything to the UI loop.

use std::{cell::RefCell, rc::Rc};

use color_eyre::eyre::Result as EyreResult;
use rtrb::{Consumer, Producer, RingBuffer};

use rtttl_player::{
    catalog::Catalog,
    engine::CpalContext,
    error::AudioError,
    playback::SessionEnd,
    PlaybackManager, PlayerConfig, StateChange, Transition,
};

use super::ui::UiApp;

/// Scope samples buffered between the audio thread and the UI.
const SCOPE_CAPACITY: usize = 8192;

/// Main application builder
pub struct Ringtones {
    catalog: Catalog,
    config: PlayerConfig,
}

impl Ringtones {
    pub fn new(catalog: Catalog, config: PlayerConfig) -> Self {
        Self { catalog, config }
    }

    /// Run the browser until the user quits.
    pub fn run(self) -> EyreResult<()> {
        // Filled by the opener once the device is up; read by the UI.
        let scope: Rc<RefCell<Option<Consumer<f32>>>> = Rc::default();

        // The output device is only opened on the first play.
        let open_config = self.config.clone();
        let opener = scoped_opener(Rc::clone(&scope), move |scope_tx| {
            CpalContext::open_with_scope(&open_config, scope_tx)
        });
        let mut manager = PlaybackManager::new(self.config, opener);

        let status = Rc::new(RefCell::new(String::from("Ready")));
        let sink = Rc::clone(&status);
        manager.subscribe(move |change: &StateChange<'_>| {
            let line = match change.transition {
                Transition::Started => format!("Playing {}", change.id),
                Transition::Ended(SessionEnd::Completed) => format!("Finished {}", change.id),
                Transition::Ended(SessionEnd::Stopped) => format!("Stopped {}", change.id),
                Transition::Ended(SessionEnd::Superseded) => return,
            };
            *sink.borrow_mut() = line;
        });

        let mut terminal = ratatui::init();
        let result = UiApp::new(self.catalog, manager, scope, status).run(&mut terminal);
        ratatui::restore();
        result
    }
}

/// Wrap `open` so each attempt gets a fresh scope ring. The consumer lands in
/// `sink` only when the attempt succeeds, so a failed open can be retried.
fn scoped_opener<C, F>(
    sink: Rc<RefCell<Option<Consumer<f32>>>>,
    mut open: F,
) -> impl FnMut() -> Result<C, AudioError>
where
    F: FnMut(Producer<f32>) -> Result<C, AudioError>,
{
    move || {
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
        let context = open(scope_tx)?;
        *sink.borrow_mut() = Some(scope_rx);
        Ok(context)
    }
}
