mod app;
mod event;
mod tree;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::debug_log;
use crate::model::OrgNode;
use crate::watch;
use app::App;
use event::KeyAction;

pub fn run(path: &str, org: OrgNode, root_id: Option<&str>, poll_interval: u64) -> Result<()> {
    let mut app = App::new(path, org, root_id)?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, poll_interval);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    poll_interval: u64,
) -> Result<()> {
    let poll_duration = Duration::from_millis(poll_interval);

    // Set up the dataset file watcher
    let (_watcher, rx) = watch::watch_file(app.path())?;

    loop {
        terminal.draw(|frame| tree::render(frame, app))?;

        if ct_event::poll(poll_duration)? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    match event::handle_key(app, key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Toggle(id) => app.toggle(&id),
                        KeyAction::ToggleDetail => app.toggle_detail(),
                        KeyAction::Reload => {
                            debug_log::log("manual reload requested");
                            app.reload();
                        }
                        KeyAction::Continue => {}
                    }
                }
            }
        }

        // Check for file changes (non-blocking)
        if watch::wait_for_change(&rx, Duration::ZERO) {
            watch::drain_events(&rx);
            debug_log::log("dataset changed on disk; reloading");
            app.reload();
        }
    }
}
