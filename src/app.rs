use crate::hud::{body_color, draw_help, draw_panel, draw_selection, draw_too_small};
use crate::input::{collect_input_nonblocking, resolve_in_cell, Action};
use crate::term::{canvas_to_cells, Terminal};
use crossterm::style::Color;
use log::{debug, info};
use solarium::config::Settings;
use solarium::{
    AnimationDriver, Catalog, Clock, Control, FrameOutcome, Interaction, Parameters, WallClock,
};
use std::time::{Duration, Instant};

pub(crate) struct App {
    settings: Settings,
    params: Parameters,
    catalog: Catalog,
    driver: AnimationDriver,
    interaction: Interaction,
    focus: Control,
    show_help: bool,
    term: Terminal,
    should_quit: bool,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let catalog = Catalog::default();
        let params = settings.parameters();
        let driver = AnimationDriver::new(&catalog);
        let term = Terminal::begin()?;
        info!(
            "terminal {}x{}, canvas {}x{} px",
            term.layout.cols,
            term.layout.rows,
            term.canvas.width(),
            term.canvas.height()
        );

        Ok(Self {
            settings,
            params,
            catalog,
            driver,
            interaction: Interaction::default(),
            focus: Control::Speed,
            show_help: false,
            term,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.settings.fps() as f32);
        let clock = WallClock;

        self.driver.start();
        while !self.should_quit && self.driver.is_running() {
            let frame_start = Instant::now();
            self.term.resize_if_needed()?;

            let actions = collect_input_nonblocking(frame_dt, &self.term.layout)?;
            for action in actions {
                self.apply(action);
                if self.should_quit {
                    break;
                }
            }
            if self.should_quit {
                break;
            }

            self.render_frame(clock.now_ms())?;

            sleep_until(frame_start + frame_dt);
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::HelpToggle => self.show_help = !self.show_help,
            Action::ToggleView => {
                self.params.view_mode = self.params.view_mode.toggled();
                debug!("view mode {}", self.params.view_mode.label());
            }
            Action::ToggleOrbits => self.params.show_orbits = !self.params.show_orbits,
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::AdjustFocused(steps) => self.params.nudge(self.focus, steps),
            Action::Nudge(control, steps) => {
                self.focus = control;
                self.params.nudge(control, steps);
            }
            Action::ResetParams => self.params = self.settings.parameters(),
            Action::Dismiss => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.interaction.dismiss();
                }
            }
            Action::Pointer(ev) => {
                let cache = self.driver.cache();
                self.interaction.handle(resolve_in_cell(ev, cache), cache);
            }
        }
    }

    fn render_frame(&mut self, now_ms: f64) -> anyhow::Result<()> {
        let bg = Color::Black;
        self.term.cur.clear(bg);

        let layout = self.term.layout;
        let surface = if layout.canvas_usable() {
            Some(&mut self.term.canvas)
        } else {
            None
        };
        let outcome = self.driver.tick(
            now_ms,
            &self.catalog,
            &self.params,
            self.interaction.hovered,
            surface,
        );
        match outcome {
            FrameOutcome::Painted => {
                canvas_to_cells(&self.term.canvas, &mut self.term.cur, self.settings.enable_color, bg)
            }
            FrameOutcome::Skipped => draw_too_small(&mut self.term.cur, &layout),
            FrameOutcome::Cancelled => return Ok(()),
        }

        draw_panel(
            &mut self.term.cur,
            &layout,
            &self.params,
            self.focus,
            &self.interaction,
            &self.catalog,
        );

        if let Some(i) = self.interaction.selected {
            if let Some(body) = self.catalog.get(i) {
                draw_selection(
                    &mut self.term.cur,
                    &layout,
                    &body.info(),
                    body_color(&self.catalog, i),
                );
            }
        }

        if self.show_help {
            draw_help(&mut self.term.cur, &layout);
        }

        self.term.present()?;
        Ok(())
    }

    fn shutdown(&mut self) -> anyhow::Result<()> {
        self.driver.stop();
        self.term.end()
    }
}

pub(crate) fn run(settings: Settings) -> anyhow::Result<()> {
    let mut app = App::init(settings)?;
    let res = app.run();
    app.shutdown()?;
    res
}

/// Frame cap: coarse sleeps, then spin out the last couple of milliseconds.
fn sleep_until(deadline: Instant) {
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        if left.is_zero() {
            break;
        }
        if left > Duration::from_millis(2) {
            std::thread::sleep(left - Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
