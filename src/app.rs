use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::action::{Action, ActionRegistry};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::{self, AppConfig, GlobalAction, KeyResolver, PaletteAction};
use crate::handler::{HandlerContext, HandlerId, HandlerRegistry, THEME_DARK, THEME_LIGHT};
use crate::page::{self, Page, PageEvent};
use crate::route::{self, Route, Selection};
use crate::site::{BlogConfig, SiteConfig};
use crate::theme::{Appearance, ThemeMode};
use crate::tui::{Event, Tui};
use crate::ui::{
    CommandPalette, Component, ErrorDialog, ErrorDialogEvent, EventResult, HelpEvent, HelpOverlay,
    Keybinding, KeybindingSection, PaletteEvent, StatusBar, Toast, ToastManager, ToastType,
};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 4.0;
const STATUS_BAR_HEIGHT: u16 = 3;

/// Internal messages. Key handling only queues these; `update` applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    // === Lifecycle ===
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,

    // === Overlays ===
    OpenPalette,
    DisplayHelp,
    DisplayError(String),
    ClosePopup,
    ShowToast {
        message: String,
        toast_type: ToastType,
    },

    // === Site ===
    /// An action was picked in the palette.
    SelectAction(Action),
    Navigate(Route),
    Invoke(HandlerId),
    Copy {
        text: String,
        label: String,
    },
}

enum Overlay {
    Palette(CommandPalette),
    Help(HelpOverlay),
    Error(ErrorDialog),
}

pub struct App {
    registry: Arc<ActionRegistry>,
    handlers: Arc<HandlerRegistry>,
    resolver: Arc<KeyResolver>,
    site: SiteConfig,
    blog: BlogConfig,
    /// Where the chosen theme is persisted. `None` disables persistence.
    config_path: Option<PathBuf>,
    appearance: Appearance,
    page: Box<dyn Page>,
    overlay: Option<Overlay>,
    toasts: ToastManager,
    status_bar: StatusBar,
    clipboard: Box<dyn Clipboard>,
    should_quit: bool,
    should_suspend: bool,
    msg_tx: UnboundedSender<AppMessage>,
    msg_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        config: AppConfig,
        registry: Arc<ActionRegistry>,
        handlers: Arc<HandlerRegistry>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings)));
        let site = config.site;
        let blog = config.blog;
        let status_bar = StatusBar::new(
            resolver.clone(),
            site.footer(),
            blog.favicon_glyph.clone(),
        );
        let page = page::build(&Route::Home, &site, &blog, resolver.clone());

        let mut app = Self {
            registry,
            handlers,
            resolver,
            site,
            blog,
            config_path: None,
            appearance: Appearance::new(ThemeMode::Light),
            page,
            overlay: None,
            toasts: ToastManager::new(),
            status_bar,
            clipboard: Box::new(SystemClipboard),
            should_quit: false,
            should_suspend: false,
            msg_tx,
            msg_rx,
        };
        app.apply_mode(config.theme.mode);
        app
    }

    /// Persist theme changes to the config file at `path`.
    #[must_use]
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Override the configured theme for this session only.
    #[must_use]
    pub fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.apply_mode(mode);
        self
    }

    #[must_use]
    pub fn with_start_page(mut self, route: Route) -> Self {
        self.show_route(route);
        self
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    pub const fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        let title = format!("{} {}", self.blog.favicon_glyph, self.site.owner);
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?.with_title(title);
        tui.enter()?;

        loop {
            self.handle_events(&mut tui).await?;
            self.drain_messages(Some(&mut tui))?;
            if self.should_suspend {
                tui.suspend()?;
                self.msg_tx.send(AppMessage::Resume)?;
                self.msg_tx.send(AppMessage::ClearScreen)?;
                tui.resume()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            self.should_quit = true;
            return Ok(());
        };

        match event {
            Event::Quit => self.msg_tx.send(AppMessage::Quit)?,
            Event::Tick => self.msg_tx.send(AppMessage::Tick)?,
            Event::Render => self.msg_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => self.msg_tx.send(AppMessage::Resize(width, height))?,
            Event::Key(key) => self.handle_key(key)?,
            Event::Paste(text) => self.handle_paste(&text),
            Event::Error(e) => warn!("Terminal event error: {e}"),
        }
        Ok(())
    }

    /// Route a key press: open overlay first, then global keys, then the page.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(overlay) = &mut self.overlay {
            match overlay {
                Overlay::Palette(palette) => match palette.handle_key(key)? {
                    EventResult::Event(PaletteEvent::Selected(action)) => {
                        self.msg_tx.send(AppMessage::ClosePopup)?;
                        self.msg_tx.send(AppMessage::SelectAction(action))?;
                    }
                    EventResult::Event(PaletteEvent::Closed) => {
                        self.msg_tx.send(AppMessage::ClosePopup)?;
                    }
                    EventResult::Consumed | EventResult::Ignored => {}
                },
                Overlay::Help(help) => {
                    if let EventResult::Event(HelpEvent::Close) = help.handle_key(key)? {
                        self.msg_tx.send(AppMessage::ClosePopup)?;
                    }
                }
                Overlay::Error(dialog) => {
                    if let EventResult::Event(ErrorDialogEvent::Dismissed) = dialog.handle_key(key)? {
                        self.msg_tx.send(AppMessage::ClosePopup)?;
                    }
                }
            }
            return Ok(());
        }

        if let Some(msg) = self.global_message(&key) {
            self.msg_tx.send(msg)?;
            return Ok(());
        }

        match self.page.handle_key(key)? {
            EventResult::Event(PageEvent::Copy { text, label }) => {
                self.msg_tx.send(AppMessage::Copy { text, label })?;
            }
            EventResult::Consumed | EventResult::Ignored => {}
        }
        Ok(())
    }

    /// Pasted text only has somewhere to go while the palette is open.
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(Overlay::Palette(palette)) = &mut self.overlay {
            palette.handle_paste(text);
        }
    }

    fn global_message(&self, key: &KeyEvent) -> Option<AppMessage> {
        let resolver = &self.resolver;
        if resolver.matches_global(key, GlobalAction::Quit) {
            Some(AppMessage::Quit)
        } else if resolver.matches_global(key, GlobalAction::Palette) {
            Some(AppMessage::OpenPalette)
        } else if resolver.matches_global(key, GlobalAction::Help) {
            Some(AppMessage::DisplayHelp)
        } else if resolver.matches_global(key, GlobalAction::Suspend) {
            Some(AppMessage::Suspend)
        } else if resolver.matches_global(key, GlobalAction::ToggleTheme) {
            let target = match self.appearance.mode() {
                ThemeMode::Dark => THEME_LIGHT,
                ThemeMode::Light | ThemeMode::System => THEME_DARK,
            };
            Some(AppMessage::Invoke(target.into()))
        } else if resolver.matches_global(key, GlobalAction::Back) && self.route() != Route::Home {
            Some(AppMessage::Navigate(Route::Home))
        } else {
            None
        }
    }

    /// Apply every queued message, including ones queued while applying.
    pub fn drain_messages(&mut self, mut tui: Option<&mut Tui>) -> Result<()> {
        while let Ok(msg) = self.msg_rx.try_recv() {
            if !matches!(msg, AppMessage::Tick | AppMessage::Render) {
                debug!("Handling message: {msg:?}");
            }

            match msg {
                AppMessage::Render => {
                    if let Some(tui) = tui.as_deref_mut() {
                        tui.draw(|frame| self.draw(frame))?;
                    }
                }
                AppMessage::Resize(width, height) => {
                    if let Some(tui) = tui.as_deref_mut() {
                        tui.resize(Rect::new(0, 0, width, height))?;
                        tui.draw(|frame| self.draw(frame))?;
                    }
                }
                AppMessage::ClearScreen => {
                    if let Some(tui) = tui.as_deref_mut() {
                        tui.clear()?;
                    }
                }
                msg => self.update(msg)?,
            }
        }
        Ok(())
    }

    fn update(&mut self, msg: AppMessage) -> Result<()> {
        match msg {
            AppMessage::Tick => self.toasts.handle_tick(),
            AppMessage::Quit => self.should_quit = true,
            AppMessage::Suspend => self.should_suspend = true,
            AppMessage::Resume => self.should_suspend = false,
            AppMessage::Render | AppMessage::Resize(..) | AppMessage::ClearScreen => {}

            AppMessage::OpenPalette => {
                self.overlay = Some(Overlay::Palette(CommandPalette::new(
                    self.registry.clone(),
                    self.resolver.clone(),
                )));
            }
            AppMessage::DisplayHelp => {
                self.overlay = Some(Overlay::Help(HelpOverlay::new(self.help_sections())));
            }
            AppMessage::DisplayError(message) => {
                self.overlay = Some(Overlay::Error(ErrorDialog::new(
                    "Error",
                    message,
                    self.resolver.clone(),
                )));
            }
            AppMessage::ClosePopup => self.overlay = None,
            AppMessage::ShowToast {
                message,
                toast_type,
            } => self.toasts.show(Toast::new(message, toast_type)),

            AppMessage::SelectAction(action) => self.select_action(&action)?,
            AppMessage::Navigate(route) => self.show_route(route),
            AppMessage::Invoke(id) => self.invoke(&id)?,
            AppMessage::Copy { text, label } => self.copy(&text, &label)?,
        }
        Ok(())
    }

    fn select_action(&self, action: &Action) -> Result<()> {
        info!("Selected action {:?}", action.name);
        match route::resolve(action) {
            Selection::Navigate(route) => self.msg_tx.send(AppMessage::Navigate(route))?,
            Selection::External(url) => self.msg_tx.send(AppMessage::Copy {
                text: url,
                label: action.name.clone(),
            })?,
            Selection::Invoke(id) => self.msg_tx.send(AppMessage::Invoke(id))?,
            Selection::Inert => debug!("Action {:?} has no effect", action.name),
        }
        Ok(())
    }

    fn show_route(&mut self, route: Route) {
        if self.route() == route {
            return;
        }
        info!("Navigating to {route}");
        self.page = page::build(&route, &self.site, &self.blog, self.resolver.clone());
        self.status_bar.set_route(route);
    }

    fn invoke(&mut self, id: &HandlerId) -> Result<()> {
        let mut ctx = HandlerContext {
            appearance: &mut self.appearance,
            blog: &self.blog,
        };
        if let Err(e) = self.handlers.dispatch(id, &mut ctx) {
            error!("Handler {id} failed: {e}");
            self.msg_tx
                .send(AppMessage::DisplayError(format!("{id} failed: {e}")))?;
            return Ok(());
        }

        let mode = self.appearance.mode();
        self.status_bar.set_mode(mode);
        self.toasts.show(Toast::info(format!("{mode} theme")));
        if let Some(path) = &self.config_path
            && let Err(e) = config::save_theme_mode(path, mode)
        {
            warn!("Failed to save theme mode: {e}");
            self.toasts
                .show(Toast::new("Could not save theme", ToastType::Error));
        }
        Ok(())
    }

    fn copy(&mut self, text: &str, label: &str) -> Result<()> {
        match self.clipboard.set_text(text) {
            Ok(()) => self.msg_tx.send(AppMessage::ShowToast {
                message: format!("Copied {label} link"),
                toast_type: ToastType::Success,
            })?,
            Err(e) => {
                error!("Failed to copy {label}: {e}");
                self.msg_tx
                    .send(AppMessage::DisplayError(format!("Could not copy {label}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Switch the theme outside of a handler, honoring the blog's dark mode switch.
    fn apply_mode(&mut self, mode: ThemeMode) {
        self.appearance.set_mode(mode);
        if self.appearance.mode() == ThemeMode::Dark && !self.blog.dark_mode {
            warn!("Dark mode is disabled in the blog config, using the light theme");
            self.appearance.set_mode(ThemeMode::Light);
        }
        self.status_bar.set_mode(self.appearance.mode());
    }

    fn help_sections(&self) -> Vec<KeybindingSection> {
        let palette = vec![
            Keybinding::new(self.resolver.display_palette(PaletteAction::Next), "Next"),
            Keybinding::new(
                self.resolver.display_palette(PaletteAction::Previous),
                "Previous",
            ),
            Keybinding::new(self.resolver.display_palette(PaletteAction::Execute), "Run"),
            Keybinding::new(self.resolver.display_palette(PaletteAction::Close), "Close"),
        ];
        vec![
            KeybindingSection::new(self.route().title(), self.page.keybindings()),
            KeybindingSection::new("Command palette", palette),
            KeybindingSection::new("Global", self.status_bar.global_keybindings()),
        ]
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let theme = *self.appearance.theme();
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.base).fg(theme.text_primary())),
            area,
        );

        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                .areas(area);
        self.page
            .render(frame, body.inner(Margin::new(2, 1)), &theme);
        self.status_bar
            .render_with_keybindings(frame, status, &theme, &self.page.keybindings());

        if let Some(overlay) = &mut self.overlay {
            match overlay {
                Overlay::Palette(palette) => palette.render(frame, area, &theme),
                Overlay::Help(help) => help.render(frame, area, &theme),
                Overlay::Error(dialog) => dialog.render(frame, area, &theme),
            }
        }
        self.toasts.render(frame, area, &theme);
    }
}
