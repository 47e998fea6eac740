/// Terminal front end driving the SS3D frame loop
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, ClearType},
};
use log::{info, warn};
use rand::rngs::ThreadRng;
use std::io::{stdout, Stdout};
use std::time::Duration;
use ss3d_core::{FrameLoop, Mesh, RenderConfig, RenderResult, SleepPacer};

pub mod presenter;

pub use presenter::TerminalPresenter;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    frames: FrameLoop<ThreadRng>,
    presenter: TerminalPresenter<Stdout>,
    pacer: SleepPacer,
    running: bool,
    frame_count: u64,
}

impl TerminalApp {
    pub fn new(config: RenderConfig, mesh: Mesh) -> RenderResult<Self> {
        let (cols, rows) = terminal::size()?;
        // One extra row for the FPS line
        if (cols as usize) < config.width || (rows as usize) < config.height + 1 {
            warn!(
                "terminal is {}x{}, frame needs {}x{}; output will wrap",
                cols,
                rows,
                config.width,
                config.height + 1
            );
        }

        Ok(Self {
            frames: FrameLoop::new(config, mesh, rand::thread_rng())?,
            presenter: TerminalPresenter::new(stdout()),
            pacer: SleepPacer,
            running: true,
            frame_count: 0,
        })
    }

    pub fn run(&mut self) -> RenderResult<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("rendered {} frames", self.frame_count);
        result
    }

    fn main_loop(&mut self) -> RenderResult<()> {
        while self.running {
            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }
            if !self.running {
                break;
            }

            self.frames.tick(&mut self.presenter, &mut self.pacer)?;
            self.frame_count += 1;
        }

        Ok(())
    }

    fn handle_input(&mut self) -> RenderResult<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                self.running = false;
            }
        }
        Ok(())
    }
}
