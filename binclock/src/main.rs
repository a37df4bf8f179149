use binclock_core::{
    BlockGrid, CellChange, CellSink, ColorMode, Column as BitColumn, DisplayOptions, Layout,
    LocalClock, Rgb, TICK_INTERVAL, TimeSampler, Unit,
};
use iced::keyboard::{self, Event as KeyboardEvent, Key, key::Named};
use iced::widget::{Column, Row, button, column, container, row, text, toggler};
use iced::{
    Background, Border, Color, Element, Event, Length, Subscription, Task, Theme, event, time,
    window,
};
use log::{debug, info, warn};

pub fn main() -> iced::Result {
    env_logger::init();

    iced::application(BinClockApp::default, BinClockApp::update, BinClockApp::view)
        .title("Binary Clock")
        .subscription(BinClockApp::subscription)
        .theme(BinClockApp::theme)
        .run()
}

// =============================================================================
// Block Face (rendering sink)
// =============================================================================

/// What is drawn for each block; fed exclusively through [`CellSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FaceCell {
    lit: bool,
    label: u8,
}

#[derive(Debug, Default)]
struct BlockFace {
    cells: [[FaceCell; BitColumn::COUNT]; Unit::COUNT],
    redraws: u64,
}

impl BlockFace {
    fn cell(&self, row: Unit, column: BitColumn) -> FaceCell {
        self.cells[row.index()][column.index()]
    }
}

impl CellSink for BlockFace {
    fn on_cell_change(&mut self, change: CellChange) {
        self.cells[change.row.index()][change.column.index()] = FaceCell {
            lit: change.active,
            label: change.label,
        };
        self.redraws += 1;
    }
}

// =============================================================================
// Application
// =============================================================================

struct BinClockApp {
    grid: BlockGrid<Box<dyn TimeSampler>>,
    face: BlockFace,
    options: DisplayOptions,
    status: Option<String>,

    // Timer state
    paused: bool,
    focused: bool,
}

#[derive(Debug, Clone)]
enum Message {
    // Timer
    Tick,
    TogglePause,
    WindowFocus(bool),

    // Options panel
    ToggleTitle(bool),
    ToggleTimeDigits(bool),
    ToggleNumbers(bool),
    ToggleNight(bool),
    ToggleVertical(bool),
    NextPalette,

    // Keyboard event
    KeyboardEvent(KeyboardEvent),
}

impl Default for BinClockApp {
    fn default() -> Self {
        Self::with_sampler(Box::new(LocalClock::new()))
    }
}

impl BinClockApp {
    fn with_sampler(sampler: Box<dyn TimeSampler>) -> Self {
        let mut app = Self {
            grid: BlockGrid::new(sampler),
            face: BlockFace::default(),
            options: DisplayOptions::default(),
            status: None,
            paused: false,
            focused: true,
        };

        // Paint immediately instead of waiting for the first timer firing
        app.tick();
        app
    }

    fn is_ticking(&self) -> bool {
        !self.paused && self.focused
    }

    fn tick(&mut self) {
        if let Err(e) = self.grid.tick(&mut self.face) {
            warn!("tick failed: {}", e);
            self.status = Some(format!("Clock error: {}", e));
        }
    }

    /// Redraw every block, now if the clock is running or else on resume.
    fn repaint(&mut self) {
        self.grid.reset();
        if self.is_ticking() {
            self.tick();
        }
    }

    /// Apply a change to the timer flags; a resumed timer starts from a full repaint.
    fn set_timer(&mut self, paused: bool, focused: bool) {
        let was_ticking = self.is_ticking();
        self.paused = paused;
        self.focused = focused;

        match (was_ticking, self.is_ticking()) {
            (false, true) => {
                info!("clock resumed");
                self.grid.reset();
                self.tick();
            }
            (true, false) => info!("clock suspended"),
            _ => {}
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        // Clear previous status on user actions
        if !matches!(
            message,
            Message::Tick | Message::WindowFocus(_) | Message::KeyboardEvent(_)
        ) {
            self.status = None;
        }

        match message {
            Message::Tick => self.tick(),

            Message::TogglePause => {
                self.set_timer(!self.paused, self.focused);
                if self.paused {
                    self.status = Some("Paused".to_string());
                }
            }

            Message::WindowFocus(focused) => self.set_timer(self.paused, focused),

            Message::ToggleTitle(show) => {
                self.options.title_display = show;
            }

            Message::ToggleTimeDigits(show) => {
                self.options.time_digits = show;
                // Resynchronize blocks with the readout
                self.repaint();
            }

            Message::ToggleNumbers(show) => {
                self.options.numbers_on_blocks = show;
                if show {
                    self.repaint();
                }
            }

            Message::ToggleNight(night) => {
                self.options.mode = if night {
                    ColorMode::Night
                } else {
                    ColorMode::Day
                };
            }

            Message::ToggleVertical(vertical) => {
                self.options.layout = if vertical {
                    Layout::Vertical
                } else {
                    Layout::Horizontal
                };
                self.repaint();
            }

            Message::NextPalette => {
                let index = self.options.next_palette();
                debug!("palette {} selected", index);
            }

            Message::KeyboardEvent(event) => {
                if let KeyboardEvent::KeyPressed { key, modifiers, .. } = event {
                    if modifiers.is_empty() {
                        match key.as_ref() {
                            Key::Named(Named::Space) => {
                                return self.update(Message::TogglePause);
                            }
                            Key::Character("t") => {
                                let show = !self.options.title_display;
                                return self.update(Message::ToggleTitle(show));
                            }
                            Key::Character("d") => {
                                let show = !self.options.time_digits;
                                return self.update(Message::ToggleTimeDigits(show));
                            }
                            Key::Character("n") => {
                                let show = !self.options.numbers_on_blocks;
                                return self.update(Message::ToggleNumbers(show));
                            }
                            Key::Character("m") => {
                                let night = self.options.mode.toggled() == ColorMode::Night;
                                return self.update(Message::ToggleNight(night));
                            }
                            Key::Character("l") => {
                                let vertical = self.options.layout.toggled() == Layout::Vertical;
                                return self.update(Message::ToggleVertical(vertical));
                            }
                            Key::Character("p") => {
                                return self.update(Message::NextPalette);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let title = if self.options.title_display {
            text("binary clock").size(32)
        } else {
            text("").size(32)
        };

        // Error/status message
        let status = if let Some(ref msg) = self.status {
            text(msg).size(14)
        } else {
            text("").size(14)
        };

        let clock = match self.options.layout {
            Layout::Horizontal => self.horizontal_grid(),
            Layout::Vertical => self.vertical_grid(),
        };

        // Options panel
        let options = column![
            toggler(self.options.title_display)
                .label("Title")
                .on_toggle(Message::ToggleTitle),
            toggler(self.options.time_digits)
                .label("Time display")
                .on_toggle(Message::ToggleTimeDigits),
            toggler(self.options.numbers_on_blocks)
                .label("Numbers on blocks")
                .on_toggle(Message::ToggleNumbers),
            toggler(self.options.mode == ColorMode::Night)
                .label("Nighttime")
                .on_toggle(Message::ToggleNight),
            toggler(self.options.layout == Layout::Vertical)
                .label("Vertical layout")
                .on_toggle(Message::ToggleVertical),
            row![
                button("Next palette").on_press(Message::NextPalette),
                button(if self.paused { "Resume" } else { "Pause" })
                    .on_press(Message::TogglePause),
            ]
            .spacing(10),
        ]
        .spacing(8);

        // Keyboard shortcuts hint
        let shortcuts_hint = text(
            "Shortcuts: t (title) | d (time display) | n (numbers) | m (night) | l (layout) | p (palette) | space (pause)",
        )
        .size(12);

        let content = column![
            title,
            status,
            clock,
            options,
            shortcuts_hint
        ]
        .spacing(20)
        .padding(20);

        container(content).into()
    }

    /// One row per unit, most significant bit on the left.
    fn horizontal_grid(&self) -> Element<'_, Message> {
        let rows = Unit::ALL.into_iter().map(|unit| {
            let mut blocks: Vec<Element<'_, Message>> = BitColumn::ALL
                .iter()
                .rev()
                .map(|column| self.block(unit, *column))
                .collect();
            if let Some(digits) = self.digits(unit) {
                blocks.push(digits);
            }
            let row: Element<'_, Message> = Row::with_children(blocks).spacing(30).into();
            row
        });

        Column::with_children(rows).spacing(70).into()
    }

    /// One column per unit, most significant bit on top.
    fn vertical_grid(&self) -> Element<'_, Message> {
        let columns = Unit::ALL.into_iter().map(|unit| {
            let mut blocks: Vec<Element<'_, Message>> = BitColumn::ALL
                .iter()
                .rev()
                .map(|column| self.block(unit, *column))
                .collect();
            if let Some(digits) = self.digits(unit) {
                blocks.push(digits);
            }
            let column: Element<'_, Message> = Column::with_children(blocks).spacing(40).into();
            column
        });

        Row::with_children(columns).spacing(80).into()
    }

    fn block(&self, row: Unit, column: BitColumn) -> Element<'_, Message> {
        let cell = self.face.cell(row, column);
        let fill = to_color(self.options.row_color(row));
        let alpha = if cell.lit { 1.0 } else { 0.1 };

        let label = if cell.lit && self.options.numbers_on_blocks {
            cell.label.to_string()
        } else {
            String::new()
        };

        container(text(label).size(16).color(Color::BLACK))
            .width(Length::Fixed(70.0))
            .height(Length::Fixed(30.0))
            .padding([4, 8])
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(Color { a: alpha, ..fill })),
                border: Border {
                    color: fill,
                    width: 3.0,
                    radius: 8.0.into(),
                },
                ..container::Style::default()
            })
            .into()
    }

    fn digits(&self, unit: Unit) -> Option<Element<'_, Message>> {
        if !self.options.time_digits {
            return None;
        }
        let reading = self.grid.reading()?;
        let value = text(format!("{} {:02}", unit.label(), reading.get(unit))).size(20);
        Some(value.into())
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            keyboard::listen().map(Message::KeyboardEvent),
            event::listen_with(window_focus),
        ];
        if self.is_ticking() {
            subscriptions.push(time::every(TICK_INTERVAL).map(|_| Message::Tick));
        }
        Subscription::batch(subscriptions)
    }

    fn theme(&self) -> Theme {
        match self.options.mode {
            ColorMode::Day => Theme::Light,
            ColorMode::Night => Theme::Dark,
        }
    }
}

fn window_focus(event: Event, _status: event::Status, _id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Focused) => Some(Message::WindowFocus(true)),
        Event::Window(window::Event::Unfocused) => Some(Message::WindowFocus(false)),
        _ => None,
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}
