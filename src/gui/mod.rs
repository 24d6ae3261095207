/// ICED GUI Application Module
///
/// Architecture:
/// - The reminder shell owns run state; this module only renders it
/// - The countdown thread reports through a channel drained on every poll tick
/// - The tray icon lives on this thread; its menu events are polled the same way
use crate::config::ReminderConfig;
use crate::notify::Notice;
use crate::shell::{ReminderShell, Services};
use crate::tray::{SystemTray, TrayController};
use iced::{
    executor,
    widget::{Button, Column, Container, Row, Space, Text, TextInput},
    window, Alignment, Application, Command, Element, Length, Settings, Subscription, Theme,
};
use tray_icon::menu::MenuEvent;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub enum Message {
    // Input panel
    LongBreakChanged(String),
    ShortBreakChanged(String),

    // Reminder control
    Start,
    Stop,
    Preset(u64),
    ContinueAndMinimize,

    // Window / tray
    Minimize,
    Restore,
    Close,

    // Poll engine and tray events
    Tick,
}

pub struct EyeReminder {
    config: ReminderConfig,
    shell: ReminderShell,
    tray: TrayController<SystemTray>,
}

impl EyeReminder {
    fn minimize_window(&mut self) -> Command<Message> {
        match self.tray.minimize() {
            Ok(()) => window::change_mode(window::Id::MAIN, window::Mode::Hidden),
            Err(e) => {
                error!("Failed to minimize to tray: {}", e);
                self.shell.notify(&Notice::warning(
                    "Warning",
                    format!("Could not minimize to tray: {}", e),
                ));
                Command::none()
            }
        }
    }

    fn restore_window(&mut self) -> Command<Message> {
        self.tray.restore();
        Command::batch([
            window::change_mode(window::Id::MAIN, window::Mode::Windowed),
            window::gain_focus(window::Id::MAIN),
        ])
    }

    fn poll(&mut self) -> Command<Message> {
        self.shell.pump_events();

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if self.tray.is_restore_item(&event.id) {
                info!("Restore picked from tray menu");
                return self.update(Message::Restore);
            }
        }
        Command::none()
    }
}

impl Application for EyeReminder {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ReminderConfig;

    fn new(config: ReminderConfig) -> (Self, Command<Message>) {
        let app = EyeReminder {
            shell: ReminderShell::new(&config, Services::desktop()),
            tray: TrayController::new(SystemTray::new(config.window_title)),
            config,
        };
        info!("Application initialized");
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from(self.config.window_title)
    }

    fn subscription(&self) -> Subscription<Message> {
        struct EventPoller;

        iced::subscription::unfold(
            std::any::TypeId::of::<EventPoller>(),
            self.config.poll_interval,
            |interval| async move {
                std::thread::sleep(interval);
                (Message::Tick, interval)
            },
        )
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::LongBreakChanged(value) => {
                self.shell.set_long_break(value);
            }

            Message::ShortBreakChanged(value) => {
                self.shell.set_short_break(value);
            }

            Message::Start => {
                if let Err(e) = self.shell.start_cycle() {
                    self.shell.report(&e);
                }
            }

            Message::Stop => {
                if let Err(e) = self.shell.stop() {
                    self.shell.report(&e);
                }
            }

            Message::Preset(seconds) => {
                if let Err(e) = self.shell.start_once(seconds) {
                    self.shell.report(&e);
                }
            }

            Message::ContinueAndMinimize => {
                if let Err(e) = self.shell.start_once(self.config.continue_preset.seconds) {
                    self.shell.report(&e);
                }
                return self.minimize_window();
            }

            Message::Minimize => {
                return self.minimize_window();
            }

            Message::Restore => {
                return self.restore_window();
            }

            Message::Close => {
                self.shell.shutdown();
                self.tray.restore();
                return window::close(window::Id::MAIN);
            }

            Message::Tick => {
                return self.poll();
            }
        }

        Command::none()
    }

    fn view(&self) -> Element<Message> {
        let inputs = self.shell.inputs();

        let status = Text::new(self.shell.display()).size(18);

        let fields = Column::new()
            .spacing(5)
            .align_items(Alignment::Center)
            .push(Text::new("Long break (Min.):"))
            .push(
                TextInput::new("20", &inputs.long_break)
                    .on_input(Message::LongBreakChanged)
                    .padding(6)
                    .width(Length::Fixed(200.0)),
            )
            .push(Text::new("Short break (Sec.):"))
            .push(
                TextInput::new("20", &inputs.short_break)
                    .on_input(Message::ShortBreakChanged)
                    .padding(6)
                    .width(Length::Fixed(200.0)),
            );

        let controls = Row::new()
            .spacing(10)
            .push(button("Start", Message::Start))
            .push(button("Stop", Message::Stop));

        let mut presets = Row::new().spacing(5);
        for preset in self.config.presets {
            presets = presets.push(
                Button::new(Text::new(preset.label).size(12))
                    .on_press(Message::Preset(preset.seconds))
                    .padding(6),
            );
        }

        let window_controls = Row::new()
            .spacing(10)
            .push(button("Minimize", Message::Minimize))
            .push(button("Close", Message::Close));

        let content = Column::new()
            .spacing(12)
            .padding(15)
            .align_items(Alignment::Center)
            .push(status)
            .push(fields)
            .push(controls)
            .push(Space::new(Length::Fill, Length::Fixed(5.0)))
            .push(
                Button::new(Text::new(self.config.continue_preset.label))
                    .on_press(Message::ContinueAndMinimize)
                    .padding(8),
            )
            .push(presets)
            .push(window_controls);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .into()
    }
}

fn button(label: &str, message: Message) -> Button<'_, Message> {
    Button::new(Text::new(label).size(16))
        .on_press(message)
        .width(Length::Fixed(150.0))
        .padding(8)
}

pub fn run(config: ReminderConfig) -> iced::Result {
    let (width, height) = config.window_size;
    EyeReminder::run(Settings {
        flags: config,
        window: iced::window::Settings {
            size: iced::Size::new(width, height),
            resizable: false,
            ..Default::default()
        },
        ..Default::default()
    })
}
