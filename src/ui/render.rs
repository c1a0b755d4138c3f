use anyhow::Context;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};

use super::braille::{BrailleCanvas, Rgb};
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::DisplayConfig;
use crate::game::{FrameSnapshot, MatchState, Renderer};

// Layout: one scoreboard row, then the pitch fills the rest of the screen
const UI_HEADER_ROWS: u16 = 1;

const BACKGROUND: Color = Color::Rgb(0, 0, 0);

/// Colors for everything that is not a team color
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub lines: Rgb,
    pub ball: Rgb,
    pub score: Rgb,
}

impl Palette {
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            lines: display.line_color,
            ball: display.ball_color,
            score: display.score_color,
        }
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

/// Draws snapshots into a ratatui terminal
pub struct TerminalRenderer<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    palette: Palette,
    start_key: String,
    quit_key: String,
}

impl<'a, B: Backend> TerminalRenderer<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, palette: Palette, start_key: &str, quit_key: &str) -> Self {
        Self {
            terminal,
            palette,
            start_key: start_key.to_string(),
            quit_key: quit_key.to_string(),
        }
    }
}

impl<B: Backend> Renderer for TerminalRenderer<'_, B> {
    fn render(&mut self, snapshot: &FrameSnapshot) -> anyhow::Result<()> {
        let overlay = match snapshot.state {
            MatchState::Menu => Some(OverlayMessage::title_screen(
                snapshot,
                &self.start_key,
                &self.quit_key,
            )),
            MatchState::GameOver => OverlayMessage::full_time(snapshot),
            MatchState::Playing => None,
        };
        let palette = self.palette;

        self.terminal
            .draw(|f| draw(f, snapshot, &palette, overlay.as_ref()))
            .context("drawing frame")?;
        Ok(())
    }
}

/// Paint one full frame
pub fn draw(frame: &mut Frame, snapshot: &FrameSnapshot, palette: &Palette, overlay: Option<&OverlayMessage>) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(BACKGROUND));
    frame.render_widget(bg, area);

    draw_scoreboard(frame, snapshot, palette, area);

    let pitch_area = Rect {
        x: area.x,
        y: area.y + UI_HEADER_ROWS,
        width: area.width,
        height: area.height.saturating_sub(UI_HEADER_ROWS),
    };
    let canvas = paint_pitch(snapshot, palette, pitch_area.width as usize, pitch_area.height as usize);
    render_braille_canvas(frame, &canvas, pitch_area);

    if let Some(message) = overlay {
        render_overlay(frame, message, area);
    }
}

/// Maps pitch coordinates onto canvas pixels
#[derive(Debug, Clone, Copy)]
struct Projection {
    scale_x: f32,
    scale_y: f32,
}

impl Projection {
    fn new(canvas: &BrailleCanvas, field_width: f32, field_height: f32) -> Self {
        Self {
            scale_x: canvas.pixel_width() as f32 / field_width,
            scale_y: canvas.pixel_height() as f32 / field_height,
        }
    }

    fn x(&self, v: f32) -> usize {
        (v * self.scale_x).max(0.0) as usize
    }

    fn y(&self, v: f32) -> usize {
        (v * self.scale_y).max(0.0) as usize
    }

    fn rect(&self, r: &crate::game::geometry::Rect) -> (usize, usize, usize, usize) {
        let x = self.x(r.x);
        let y = self.y(r.y);
        let w = self.x(r.right()).saturating_sub(x).max(1);
        let h = self.y(r.bottom()).saturating_sub(y).max(1);
        (x, y, w, h)
    }
}

/// Draw markings, penguins and ball onto a fresh canvas of the given cell size
fn paint_pitch(snapshot: &FrameSnapshot, palette: &Palette, cells_w: usize, cells_h: usize) -> BrailleCanvas {
    let mut canvas = BrailleCanvas::new(cells_w, cells_h);
    if cells_w == 0 || cells_h == 0 {
        return canvas;
    }
    let field = &snapshot.field;
    let proj = Projection::new(&canvas, field.width, field.height);

    // Touchlines and halfway line
    let (pw, ph) = (canvas.pixel_width(), canvas.pixel_height());
    canvas.outline_rect(0, 0, pw, ph, palette.lines);
    canvas.dashed_vline(proj.x(field.width / 2.0), 0, ph, palette.lines);

    for goal in [&field.goal_left, &field.goal_right] {
        let (x, y, w, h) = proj.rect(goal);
        canvas.outline_rect(x, y, w, h, palette.lines);
    }

    for penguin in [&snapshot.player, &snapshot.bot] {
        let bounds = crate::game::geometry::Rect::from_center(penguin.pos, penguin.size);
        let (x, y, w, h) = proj.rect(&bounds);
        if penguin.dashing {
            canvas.outline_rect(x, y, w, h, penguin.color);
        } else {
            canvas.fill_rect(x, y, w, h, penguin.color);
        }
    }

    let ball = &snapshot.ball;
    canvas.fill_ellipse(
        ball.pos.x * proj.scale_x,
        ball.pos.y * proj.scale_y,
        ball.radius * proj.scale_x,
        ball.radius * proj.scale_y,
        palette.ball,
    );

    canvas
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    for y in 0..canvas.cell_height() {
        // Group neighbouring cells of the same color into one span
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_color: Option<Rgb> = None;

        for x in 0..canvas.cell_width() {
            let color = canvas.color_at(x, y);
            if color != run_color && !run.is_empty() {
                spans.push(styled_run(std::mem::take(&mut run), run_color));
            }
            run_color = color;
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(styled_run(run, run_color));
        }

        let row_area = Rect {
            x: area.x,
            y: area.y + y as u16,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn styled_run(text: String, color: Option<Rgb>) -> Span<'static> {
    let fg = color.map(rgb).unwrap_or(Color::White);
    Span::styled(text, Style::default().fg(fg))
}

fn format_clock(secs: f64) -> String {
    let whole = secs.ceil().max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

fn draw_scoreboard(frame: &mut Frame, snapshot: &FrameSnapshot, palette: &Palette, area: Rect) {
    let score_style = Style::default()
        .fg(rgb(palette.score))
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(snapshot.player_team, Style::default().fg(rgb(snapshot.player.color))),
        Span::styled(
            format!("  {} - {}  ", snapshot.score.player, snapshot.score.bot),
            score_style,
        ),
        Span::styled(snapshot.opponent_team, Style::default().fg(rgb(snapshot.bot.color))),
        Span::styled(
            format!("    {}", format_clock(snapshot.remaining_secs)),
            Style::default().fg(rgb(palette.score)),
        ),
    ]);

    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: UI_HEADER_ROWS.min(area.height),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), header);
}
