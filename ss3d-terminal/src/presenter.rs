/// Writes finished frames to a terminal
use crossterm::{
    cursor,
    style::Print,
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use std::io::Write;
use ss3d_core::{FrameBuffer, FrameSink, FrameStats, RenderError, RenderResult};

/// Presentation sink that redraws the whole grid from the top-left corner
pub struct TerminalPresenter<W: Write> {
    writer: W,
    show_fps: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_fps: true,
        }
    }

    pub fn with_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Queue every row plus the optional FPS line, then flush.
    ///
    /// Terminal rows are addressed with `u16`, so taller grids are rejected
    /// before anything is written.
    pub fn draw(&mut self, frame: &FrameBuffer, stats: &FrameStats) -> RenderResult<()> {
        let height = u16::try_from(frame.height()).map_err(|_| {
            RenderError::InvalidConfig(format!(
                "frame height {} exceeds the terminal row range",
                frame.height()
            ))
        })?;

        for (y, row) in (0..height).zip(frame.rows()) {
            let line: String = row.iter().collect();
            self.writer.queue(cursor::MoveTo(0, y))?;
            self.writer.queue(Print(line))?;
        }

        if self.show_fps {
            self.writer.queue(cursor::MoveTo(0, height))?;
            self.writer.queue(Clear(ClearType::UntilNewLine))?;
            self.writer.queue(Print(format!("FPS: {:.1}", stats.fps())))?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> FrameSink for TerminalPresenter<W> {
    fn present(&mut self, frame: &FrameBuffer, stats: &FrameStats) -> RenderResult<()> {
        self.draw(frame, stats)
    }
}
