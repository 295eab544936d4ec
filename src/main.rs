//! Draws a demo scene on a braille canvas.
//!
//! cargo run -- --cols 70 --rows 20
//! cargo run -- --frames 200 --mode 256

use clap::{Parser, ValueEnum};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute, queue, style::Print};
use log::info;
use std::f32::consts::TAU;
use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;
use tplot::geometry::Coord;
use tplot::prelude::*;

const FRAME_TIME: Duration = Duration::from_millis(40);

#[derive(Parser, Debug)]
#[command(version, about = "Draws a demo scene on a braille canvas")]
struct Args {
    /// Canvas width in terminal columns.
    #[arg(long, default_value_t = 70)]
    cols: Coord,
    /// Canvas height in terminal rows.
    #[arg(long, default_value_t = 20)]
    rows: Coord,
    /// Color mode. Detected from the environment if not given.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Number of animation frames to draw. 0 draws the static scene.
    #[arg(long, default_value_t = 0)]
    frames: u32,
    /// Background color as `r,g,b` with 8-bit channels.
    #[arg(long, value_parser = parse_rgb)]
    background: Option<Color>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    None,
    Minimal,
    Ansi,
    #[value(name = "256")]
    Xterm256,
    Truecolor,
}

impl From<ModeArg> for ColorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => ColorMode::None,
            ModeArg::Minimal => ColorMode::Minimal,
            ModeArg::Ansi => ColorMode::Ansi,
            ModeArg::Xterm256 => ColorMode::Xterm256,
            ModeArg::Truecolor => ColorMode::Xterm24bit,
        }
    }
}

fn parse_rgb(s: &str) -> Result<Color, String> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|e| format!("{c:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match channels[..] {
        [r, g, b] => Ok(Color::from([r, g, b])),
        _ => Err(format!("expected three channels, got {}", channels.len())),
    }
}

/// Profile of `mid - amplitude * f(2pi * ((x - x0) / period + phase))`.
fn wave(
    f: fn(f32) -> f32,
    x0: Coord,
    period: f32,
    phase: f32,
    mid: Coord,
    amplitude: f32,
) -> impl Fn(Coord) -> (Coord, Coord) {
    let y = move |x: Coord| {
        let arg = TAU * ((x - x0) as f32 / period + phase);
        mid - (amplitude * f(arg)).round() as Coord
    };
    move |x| (y(x), y(x + 1))
}

fn reference_scene(canvas: &mut BrailleCanvas) {
    let waves = Rect::new(Point::new(12, 42), Point::new(71, 67));
    canvas
        .rect(
            Color::rgb(1.0, 0.35, 0.0),
            Some(Color::rgb(0.0, 0.2, 1.0)),
            Rect::new(Point::new(11, 11), Point::new(40, 40)),
            TerminalOp::Over,
        )
        .path(
            Color::rgb(0.4, 1.0, 0.4),
            [
                Point::new(12, 17),
                Point::new(17, 39),
                Point::new(39, 34),
                Point::new(34, 12),
                Point::new(12, 17),
            ],
            TerminalOp::ClipDst,
        )
        .ellipse(
            Color::rgb(0.6, 0.6, 0.6),
            None,
            Rect::new(Point::new(45, 11), Point::new(75, 41)),
            TerminalOp::Over,
        )
        .ellipse_centered(
            palette::BLACK,
            Some(palette::WHITE),
            Point::new(60, 26),
            Size::new(10, 10),
            TerminalOp::Over,
        )
        .stroke(
            Color::rgb(0.2, 0.2, 1.0),
            waves,
            wave(f32::sin, 12, 30.0, 0.0, 55, 10.0),
            TerminalOp::Over,
        )
        .stroke(
            Color::rgb(1.0, 0.4, 0.4),
            waves,
            wave(f32::cos, 12, 30.0, 0.0, 55, 10.0),
            TerminalOp::ClipSrc,
        );
}

fn write_framed(out: &mut impl Write, block: &dyn Block) -> io::Result<()> {
    let border = "─".repeat(block.width());
    queue!(
        out,
        Clear(ClearType::UntilNewLine),
        Print(format!("┌{border}┐\r\n"))
    )?;
    for line in block.lines() {
        queue!(
            out,
            Clear(ClearType::UntilNewLine),
            Print(format!("│{line}│\r\n"))
        )?;
    }
    queue!(
        out,
        Clear(ClearType::UntilNewLine),
        Print(format!("└{border}┘\r\n"))
    )?;
    out.flush()
}

fn animate(canvas: &mut BrailleCanvas, frames: u32, out: &mut impl Write) -> io::Result<()> {
    let rect = Rect::new(Point::new(0, 0), canvas.size() - Point::new(1, 2));
    let span = rect.size() + Point::new(1, 1);
    let amplitude = span.y / 2;
    let mid = rect.p1.y + amplitude;
    let period = span.x as f32 / 2.0;
    // the frame adds a line above and below the canvas
    let height = canvas.term_size().y as u16 + 2;

    execute!(out, cursor::Hide)?;
    let mut t = 0.0f32;
    for frame in 0..frames {
        canvas
            .clear()
            .stroke(
                Color::rgb(0.2, 0.2, 1.0),
                rect,
                wave(f32::sin, rect.p1.x, period, t, mid, amplitude as f32),
                TerminalOp::Over,
            )
            .stroke(
                Color::rgb(1.0, 0.4, 0.4),
                rect,
                wave(f32::cos, rect.p1.x, period, t, mid, amplitude as f32),
                TerminalOp::Over,
            )
            .line(
                palette::WHITE,
                Point::new(rect.p1.x, mid),
                Point::new(rect.p2.x, mid),
                TerminalOp::ClipSrc,
            );

        write_framed(out, &*canvas)?;
        if frame + 1 < frames {
            sleep(FRAME_TIME);
            queue!(out, cursor::MoveUp(height))?;
        }

        t = (t + 0.01).fract();
    }
    execute!(out, cursor::Show)
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let term = match args.mode {
        Some(mode) => TermInfo::new(mode.into()),
        None => TermInfo::from_env(),
    };
    let mut canvas = BrailleCanvas::new(Size::new(args.cols, args.rows)).with_term(term);
    if let Some(background) = args.background {
        canvas = canvas.with_background(background);
    }
    info!(
        "canvas of {:?} cells, {:?} sub-pixels, mode {:?}",
        canvas.term_size(),
        canvas.size(),
        term.mode
    );

    let mut out = io::stdout().lock();
    if args.frames == 0 {
        reference_scene(&mut canvas);
        canvas.render_to(&mut out)
    } else {
        animate(&mut canvas, args.frames, &mut out)
    }
}
