// Overlay boxes drawn on top of the pitch: title screen and full-time result

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{FrameSnapshot, Outcome};

/// A message to display as an overlay in the center of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMessage {
    pub lines: Vec<String>,
    pub title: Option<String>,
    pub style: OverlayStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    Info,
    Warning,
    Success,
}

impl OverlayMessage {
    pub fn new(lines: Vec<String>, style: OverlayStyle) -> Self {
        Self {
            lines,
            title: None,
            style,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title screen shown before the first kickoff
    pub fn title_screen(snapshot: &FrameSnapshot, start_key: &str, quit_key: &str) -> Self {
        Self::new(
            vec![
                format!("{}  vs  {}", snapshot.player_team, snapshot.opponent_team),
                String::new(),
                "Arrows: Move   Space near the bot: Shove".to_string(),
                String::new(),
                format!("{} to Kick Off  |  {} to Quit", start_key, quit_key),
            ],
            OverlayStyle::Info,
        )
        .with_title("PENGUINFUT")
    }

    /// Full-time result. The next match starts on its own.
    pub fn full_time(snapshot: &FrameSnapshot) -> Option<Self> {
        let outcome = snapshot.outcome?;
        let (headline, style) = match outcome {
            Outcome::PlayerWins => (format!("{} WIN!", snapshot.player_team), OverlayStyle::Success),
            Outcome::BotWins => (format!("{} WIN", snapshot.opponent_team), OverlayStyle::Warning),
            Outcome::Draw => ("DRAW".to_string(), OverlayStyle::Info),
        };

        Some(
            Self::new(
                vec![
                    headline,
                    String::new(),
                    format!("{} - {}", snapshot.score.player, snapshot.score.bot),
                    String::new(),
                    "Next match starts shortly".to_string(),
                ],
                style,
            )
            .with_title("FULL TIME"),
        )
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Success => Color::Green,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Success => Color::LightGreen,
        }
    }
}

/// Box of `content_width` × `content_height` centered in `area`, shrunk to fit
fn centered_box(area: Rect, content_width: u16, content_height: u16) -> Rect {
    let width = content_width.min(area.width.saturating_sub(4));
    let height = content_height.min(area.height.saturating_sub(4));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Render an overlay message in the center of `area`
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let max_line_length = message
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    // Padding for borders and spacing
    let overlay_area = centered_box(
        area,
        max_line_length as u16 + 6,
        message.lines.len() as u16 + 4,
    );

    if overlay_area.width == 0 || overlay_area.height == 0 {
        return;
    }

    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    if let Some(ref title) = message.title {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(message.border_color())
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(block, overlay_area);

    let inner_area = overlay_area.inner(Margin::new(2, 1));

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner_area);
}
