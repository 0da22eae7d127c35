//! Transport bar widget - shows what is playing, time left, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Per-frame playback snapshot for the transport bar
pub struct TransportInfo<'a> {
    pub active_title: Option<&'a str>,
    pub time_remaining: Option<f64>,
    pub status: &'a str,
    /// `None` until the output device has been opened
    pub sample_rate: Option<f32>,
}

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    info: &TransportInfo<'_>,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" ringtones ").borders(Borders::ALL);

    let playing = info.active_title.is_some();
    let play_symbol = if playing { "▶" } else { "■" };
    let title = info.active_title.unwrap_or("Idle");

    let mut spans = vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, title),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(format!("{}  ", info.status), Style::default().fg(Color::White)),
    ];

    if let Some(remaining) = info.time_remaining {
        spans.push(Span::styled(
            format!("-{:.1}s  ", remaining),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some(sample_rate) = info.sample_rate {
        // 48000 -> "48.0kHz"
        spans.push(Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
        Style::default().fg(Color::Magenta),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
