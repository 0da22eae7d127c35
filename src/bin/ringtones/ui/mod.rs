//! TUI module for ringtones
//!
//! A selectable ringtone list over a transport bar and a scope of the
//! audio actually leaving the output stream.

mod list;
mod transport;
mod waveform;

use std::{cell::RefCell, rc::Rc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use rtttl_player::{catalog::Catalog, engine::CpalContext, PlaybackManager};

use list::render_list;
use transport::{render_transport, AudioStats, TransportInfo};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    catalog: Catalog,
    manager: PlaybackManager<CpalContext>,
    /// Ring buffer receiver for audio samples, present once the device is open
    audio_rx: Rc<RefCell<Option<Consumer<f32>>>>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    /// Written by the playback observer, read on every frame
    status: Rc<RefCell<String>>,
    selected: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        catalog: Catalog,
        manager: PlaybackManager<CpalContext>,
        audio_rx: Rc<RefCell<Option<Consumer<f32>>>>,
        status: Rc<RefCell<String>>,
    ) -> Self {
        Self {
            catalog,
            manager,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            status,
            selected: 0,
            should_quit: false,
        }
    }

    /// Run the UI event loop. Playback is stopped on the way out.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Fires the end-of-life timer of the active session
            self.manager.poll();

            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.manager.stop();
        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        let mut audio_rx = self.audio_rx.borrow_mut();
        let Some(rx) = audio_rx.as_mut() else {
            return;
        };

        let mut received = false;
        while let Ok(sample) = rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.catalog.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.manager.stop(),
            _ => {}
        }
    }

    fn toggle_selected(&mut self) {
        let Some(record) = self.catalog.ringtones.get(self.selected) else {
            return;
        };

        let was_playing = self.manager.is_playing(&record.id);
        let started = self.manager.toggle(&record.rtttl_source, &record.id);

        if !was_playing && started.is_none() {
            *self.status.borrow_mut() = format!("Could not play {}", record.title());
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, list, waveform, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(6),    // Ringtone list
                Constraint::Length(8), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let active_title = self
            .manager
            .active_id()
            .and_then(|id| self.catalog.get(id))
            .map(|record| record.title());

        let status = self.status.borrow();
        let info = TransportInfo {
            active_title,
            time_remaining: self.manager.time_remaining(),
            status: status.as_str(),
            sample_rate: self.manager.context().map(CpalContext::sample_rate),
        };
        render_transport(frame, chunks[0], &info, &AudioStats::from_buffer(&self.audio_buffer));

        render_list(
            frame,
            chunks[1],
            &self.catalog.ringtones,
            |id| self.manager.is_playing(id),
            self.selected,
        );

        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = Paragraph::new(" [Q] Quit  [↑/↓] Select  [Enter] Play/Stop  [S] Stop")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
