use std::sync::Arc;
use std::time::Instant;

use eframe::egui::{
    self, Align, Align2, Color32, CornerRadius, Frame, Key, Layout, Margin, RichText, Stroke, Vec2,
    epaint::Shadow,
};
use log::{debug, error, info, warn};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use crate::config::InputConfig;
use crate::focus::announce::{self, ControllerAnnouncer, DeviceProbe};
use crate::focus::classifier::{KeyPress, RawInput};
use crate::focus::engine::EngineReport;
use crate::focus::escape::EscapeOutcome;
use crate::focus::gamepad::{self, ControllerPoll};
use crate::focus::leaf::{LeafKind, LeafSpec};
use crate::focus::navigator::GeometricNavigator;
use crate::focus::scope::ScopeOptions;
use crate::focus::{FocusEngine, InputMode, ModeHandle, SemanticAction};

mod i18n;
mod state;
mod widgets;

use self::i18n::{I18n, Language, detect_system_language};
use self::state::{Page, SettingsTab, Theme, UiCommand};
use self::widgets::{FrameBinder, paint_focus_ring};

const INSTANCES: [&str; 3] = ["Vanilla 1.21", "Modded Survival", "Creative Sandbox"];
const INSTANCE_PICKER_SCOPE: &str = "instance-picker";
const SETTINGS_CONTENT_PANE: &str = "settings-content";
const JVM_ARGS_KEY: &str = "settings-java-args";
const DEFAULT_JVM_ARGS: &str = "-XX:+UseG1GC";
const MEMORY_STEP_MB: i32 = 512;
const MEMORY_MIN_MB: u32 = 1024;
const MEMORY_MAX_MB: u32 = 16384;
const NAV_KEYS: [Key; 6] = [
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::Enter,
    Key::Escape,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThemePalette {
    bg: Color32,
    panel: Color32,
    surface: Color32,
    surface_elev: Color32,
    sunken_surface: Color32,
    border: Color32,
    border_strong: Color32,
    text_primary: Color32,
    text_muted: Color32,
    accent: Color32,
    accent_soft: Color32,
    accent_glow: Color32,
    info: Color32,
}

impl ThemePalette {
    const fn dark() -> Self {
        Self {
            bg: Color32::from_rgb(16, 17, 18),
            panel: Color32::from_rgb(23, 24, 26),
            surface: Color32::from_rgb(31, 33, 35),
            surface_elev: Color32::from_rgb(38, 41, 44),
            sunken_surface: Color32::from_rgb(20, 21, 22),
            border: Color32::from_rgb(55, 59, 63),
            border_strong: Color32::from_rgb(76, 82, 88),
            text_primary: Color32::from_rgb(232, 236, 232),
            text_muted: Color32::from_rgb(170, 178, 172),
            accent: Color32::from_rgb(92, 196, 84),
            accent_soft: Color32::from_rgb(56, 118, 52),
            accent_glow: Color32::from_rgb(160, 236, 140),
            info: Color32::from_rgb(122, 186, 255),
        }
    }

    const fn light() -> Self {
        Self {
            bg: Color32::from_rgb(242, 244, 240),
            panel: Color32::from_rgb(228, 232, 226),
            surface: Color32::from_rgb(248, 250, 246),
            surface_elev: Color32::from_rgb(255, 255, 255),
            sunken_surface: Color32::from_rgb(220, 225, 217),
            border: Color32::from_rgb(196, 204, 192),
            border_strong: Color32::from_rgb(170, 182, 166),
            text_primary: Color32::from_rgb(30, 38, 30),
            text_muted: Color32::from_rgb(86, 100, 86),
            accent: Color32::from_rgb(48, 150, 44),
            accent_soft: Color32::from_rgb(170, 222, 160),
            accent_glow: Color32::from_rgb(28, 120, 36),
            info: Color32::from_rgb(64, 120, 212),
        }
    }
}

impl Theme {
    const fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette::dark(),
            Theme::Light => ThemePalette::light(),
        }
    }
}

fn tint(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), alpha)
}

fn badge_frame(color: Color32) -> Frame {
    Frame::new()
        .fill(tint(color, 32))
        .stroke(Stroke::new(1.0, color))
        .corner_radius(CornerRadius::same(255))
        .inner_margin(Margin::symmetric(10, 4))
}

fn section_frame(colors: &ThemePalette) -> Frame {
    Frame::new()
        .fill(colors.surface)
        .stroke(Stroke::new(1.0, colors.border))
        .corner_radius(CornerRadius::same(14))
        .inner_margin(Margin::same(14))
}

fn elevated_frame(colors: &ThemePalette) -> Frame {
    Frame::new()
        .fill(colors.surface_elev)
        .stroke(Stroke::new(1.0, colors.border_strong))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::symmetric(12, 10))
        .shadow(Shadow {
            offset: [0, 2],
            blur: 10,
            spread: 0,
            color: Color32::from_black_alpha(70),
        })
}

fn primary_cta_button(
    label: impl Into<egui::WidgetText>,
    colors: &ThemePalette,
    min_width: f32,
) -> egui::Button<'static> {
    egui::Button::new(label)
        .fill(colors.accent_soft)
        .stroke(Stroke::new(1.0, colors.accent))
        .min_size(Vec2::new(min_width, 40.0))
}

fn instance_key(index: usize) -> String {
    format!("instance-{index}")
}

fn apply_theme(ctx: &egui::Context, colors: &ThemePalette, intent: &str) {
    let is_dark = colors == &ThemePalette::dark();
    let mut visuals = if is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.panel_fill = colors.bg;
    visuals.window_fill = colors.panel;
    visuals.override_text_color = Some(colors.text_primary);
    visuals.hyperlink_color = colors.accent_glow;
    visuals.widgets.noninteractive.corner_radius = CornerRadius::same(10);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(10);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(10);
    visuals.widgets.active.corner_radius = CornerRadius::same(10);
    visuals.widgets.noninteractive.bg_fill = colors.surface;
    visuals.widgets.inactive.bg_fill = colors.surface_elev;
    visuals.widgets.hovered.bg_fill = colors.accent_soft;
    visuals.widgets.active.bg_fill = colors.accent;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.border);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border_strong);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.3, colors.accent);
    visuals.widgets.active.bg_stroke = Stroke::new(1.5, colors.accent_glow);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text_muted);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text_muted);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.selection.bg_fill = colors.accent;
    visuals.selection.stroke = Stroke::new(1.0, colors.accent_glow);
    visuals.faint_bg_color = colors.sunken_surface;
    visuals.extreme_bg_color = colors.sunken_surface;
    visuals.window_corner_radius = CornerRadius::same(14);
    visuals.window_shadow = Shadow {
        offset: [0, 6],
        blur: 18,
        spread: 0,
        color: if is_dark {
            Color32::from_black_alpha(100)
        } else {
            Color32::from_black_alpha(45)
        },
    };
    visuals.popup_shadow = visuals.window_shadow;

    // A stale hover under a resting mouse cursor must not look like focus.
    if intent != InputMode::Pointer.tag() {
        visuals.widgets.hovered = visuals.widgets.inactive;
    }

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = Vec2::new(12.0, 12.0);
    style.spacing.button_padding = Vec2::new(16.0, 10.0);
    ctx.set_style(style);
}

fn build_runtime() -> Arc<Runtime> {
    match Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(err) => {
            warn!(
                "ui: failed to create multithreaded runtime ({}); trying single-threaded runtime",
                err
            );
            match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => Arc::new(rt),
                Err(fallback_err) => {
                    error!(
                        "ui: failed to create any Tokio runtime ({}); terminating launcher",
                        fallback_err
                    );
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Route shell-level semantic actions to UI commands.
fn subscribe_shell_actions(engine: &mut FocusEngine, commands: &mpsc::UnboundedSender<UiCommand>) {
    let routes = [
        (SemanticAction::Cancel, UiCommand::Back),
        (SemanticAction::PageLeft, UiCommand::CyclePage(-1)),
        (SemanticAction::PageRight, UiCommand::CyclePage(1)),
        (SemanticAction::Menu, UiCommand::OpenInstancePicker),
    ];
    for (action, command) in routes {
        let tx = commands.clone();
        engine.subscribe(action, move |_| {
            let _ = tx.send(command.clone());
        });
    }
}

pub struct LauncherApp {
    // Keeps the device probe's runtime alive for the app's lifetime.
    _runtime: Arc<Runtime>,
    config: InputConfig,
    engine: FocusEngine,
    mode: ModeHandle,
    binder: FrameBinder,
    controllers: ControllerPoll,
    announcer: ControllerAnnouncer,
    commands_rx: mpsc::UnboundedReceiver<UiCommand>,
    commands_tx: mpsc::UnboundedSender<UiCommand>,
    pending_restore: Option<(&'static str, String)>,
    pending_commit: Option<&'static str>,
    text_focus_request: bool,
    text_release_request: bool,
    pads_connected: bool,
    launcher_version: &'static str,
    language: Language,
    theme: Theme,
    page: Page,
    tab: SettingsTab,
    picker_open: bool,
    selected_instance: usize,
    memory_mb: u32,
    jvm_args: String,
    status: Option<String>,
}

impl LauncherApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: InputConfig) -> Self {
        let runtime = build_runtime();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let mut engine = FocusEngine::new(Box::new(GeometricNavigator::new()), config.dead_zone);
        subscribe_shell_actions(&mut engine, &commands_tx);
        let mode = engine.mode_handle();

        let probe: DeviceProbe = Arc::new(announce::detect_device_kind);
        let announcer = ControllerAnnouncer::new(
            runtime.handle().clone(),
            probe,
            config.notice_duration(),
        );
        let controllers = ControllerPoll::start(gamepad::native_source());

        let theme = Theme::Dark;
        apply_theme(&cc.egui_ctx, &theme.palette(), engine.mode_tag());

        Self {
            _runtime: runtime,
            config,
            engine,
            mode,
            binder: FrameBinder::new(commands_tx.clone()),
            controllers,
            announcer,
            commands_rx,
            commands_tx,
            pending_restore: Some((Page::Home.root_scope(), "home-play".to_owned())),
            pending_commit: None,
            text_focus_request: false,
            text_release_request: false,
            pads_connected: false,
            launcher_version: env!("CARGO_PKG_VERSION"),
            language: detect_system_language(),
            theme,
            page: Page::Home,
            tab: SettingsTab::General,
            picker_open: false,
            selected_instance: 0,
            memory_mb: 4096,
            jvm_args: DEFAULT_JVM_ARGS.to_owned(),
            status: None,
        }
    }

    fn colors(&self) -> ThemePalette {
        self.theme.palette()
    }

    fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    /// Translate this frame's egui events, then hide navigation keys from
    /// egui's own widgets.
    fn feed_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            let raw = match event {
                egui::Event::PointerMoved(_) => RawInput::PointerMoved,
                egui::Event::PointerButton { pressed: true, .. } => RawInput::PointerPressed,
                egui::Event::Key {
                    key, pressed: true, ..
                } => RawInput::KeyDown {
                    key: KeyPress::from_egui(key),
                    trusted: true,
                },
                _ => continue,
            };
            let was_typing = self.engine.text_entry().is_some();
            let report = self.engine.handle_input(raw);
            self.apply_report(&report, was_typing);
        }

        let typing = self.engine.text_entry().is_some();
        ctx.input_mut(|i| {
            for key in NAV_KEYS {
                let arrow = !matches!(key, Key::Enter | Key::Escape);
                if typing && arrow {
                    continue;
                }
                i.consume_key(egui::Modifiers::NONE, key);
            }
        });
    }

    fn poll_controllers(&mut self) {
        let Some(pads) = self.controllers.tick() else {
            return;
        };
        self.pads_connected = pads.iter().any(Option::is_some);
        self.announcer.observe(&pads);
        let was_typing = self.engine.text_entry().is_some();
        let report = self.engine.poll_controllers(&pads);
        self.apply_report(&report, was_typing);
    }

    fn apply_report(&mut self, report: &EngineReport, was_typing: bool) {
        if report.mode_changed {
            debug!("ui: intent {}", self.engine.mode_tag());
        }
        if !report.focus_changes.is_empty() || !report.activated.is_empty() {
            debug!(
                "ui: {:?} -> focus {:?}, activated {:?}",
                report.actions,
                self.engine.focused(),
                report.activated
            );
        }
        if let Some(EscapeOutcome::ReleasedTextEntry(key)) = &report.escape {
            debug!("ui: {key} released by cancel");
        }
        // Cancel or a controller move can end editing; egui must let go too.
        if was_typing && self.engine.text_entry().is_none() {
            self.text_release_request = true;
        }
    }

    fn drain_commands(&mut self) -> bool {
        let mut handled = false;
        while let Ok(command) = self.commands_rx.try_recv() {
            handled = true;
            self.run_command(command);
        }
        handled
    }

    fn run_command(&mut self, command: UiCommand) {
        debug!("ui: command {command:?}");
        match command {
            UiCommand::Play => {
                let instance = INSTANCES[self.selected_instance];
                info!("ui: launching {instance} with {} MB", self.memory_mb);
                self.status = Some(self.i18n().launching(instance));
            }
            UiCommand::OpenInstancePicker => {
                if self.page != Page::Home {
                    self.open_page(Page::Home);
                }
                if !self.picker_open {
                    self.picker_open = true;
                    self.pending_restore =
                        Some((INSTANCE_PICKER_SCOPE, instance_key(self.selected_instance)));
                }
            }
            UiCommand::CloseInstancePicker => self.close_picker(),
            UiCommand::SelectInstance(index) => {
                if index < INSTANCES.len() {
                    self.selected_instance = index;
                }
                self.close_picker();
            }
            UiCommand::OpenPage(page) => self.open_page(page),
            UiCommand::CyclePage(step) => {
                if !self.picker_open {
                    self.open_page(self.page.cycle(step));
                }
            }
            UiCommand::SelectTab(tab) => {
                if tab != self.tab {
                    self.tab = tab;
                    self.engine.clear_history(SETTINGS_CONTENT_PANE);
                }
                self.pending_commit = Some(SETTINGS_CONTENT_PANE);
            }
            UiCommand::SetLanguage(language) => self.language = language,
            UiCommand::SetTheme(theme) => self.theme = theme,
            UiCommand::AdjustMemory(delta) => {
                let next = (self.memory_mb as i32 + delta)
                    .clamp(MEMORY_MIN_MB as i32, MEMORY_MAX_MB as i32);
                self.memory_mb = next as u32;
            }
            UiCommand::EditField(key) => {
                if self.engine.text_entry() == Some(key) {
                    self.engine.end_text_entry();
                    self.text_release_request = true;
                } else if let Some(handle) = self.binder.handle(key) {
                    self.engine.begin_text_entry(handle);
                    self.text_focus_request = true;
                }
            }
            // Only reached when focus is outside the picker's scope.
            UiCommand::Back if self.picker_open => self.close_picker(),
            UiCommand::Back => match self.page {
                Page::Home => debug!("ui: back on the home page; nothing to leave"),
                Page::Settings => self.open_page(Page::Home),
            },
        }
    }

    fn open_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.page = page;
        self.picker_open = false;
        self.engine.end_text_entry();
        let fallback = match page {
            Page::Home => "home-play",
            Page::Settings => self.tab.leaf_key(),
        };
        self.pending_restore = Some((page.root_scope(), fallback.to_owned()));
    }

    fn close_picker(&mut self) {
        if self.picker_open {
            self.picker_open = false;
            self.pending_restore = Some((Page::Home.root_scope(), "home-instance".to_owned()));
        }
    }

    /// Runs after the frame's widgets are bound, so freshly drawn leaves can
    /// receive focus.
    fn apply_pending_focus(&mut self) {
        if let Some((scope, fallback)) = self.pending_restore.take() {
            let remembered = self.engine.last_focused(scope).map(str::to_owned);
            let focused = self.engine.restore(scope, Some(&fallback));
            debug!("ui: entered {scope} (remembered {remembered:?}), focus on {focused:?}");
        }
        if let Some(pane) = self.pending_commit.take() {
            self.engine.commit_to_pane(pane);
        }
        self.text_focus_request = false;
        self.text_release_request = false;
    }

    /// Bind a drawn control and paint its focus ring. Pointer clicks focus the
    /// leaf and run its command directly.
    fn bind_leaf(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        spec: LeafSpec,
        command: UiCommand,
    ) {
        let key = spec.key.clone();
        let kind = spec.kind;
        let state = self
            .binder
            .leaf(&mut self.engine, spec, command.clone(), response.rect);
        if response.clicked() && kind == LeafKind::Control {
            let accepted = match self.binder.handle(&key) {
                Some(handle) => self.engine.focus_self(handle),
                None => true,
            };
            if accepted {
                let _ = self.commands_tx.send(command);
            }
        }
        paint_focus_ring(ui, response.rect, state, self.colors().accent_glow);
    }

    /// Outline the pane that owns directional input, outside pointer mode.
    fn pane_highlighted(&self, pane: &str) -> bool {
        self.mode.get().shows_focus_ring() && self.engine.active_pane() == Some(pane)
    }

    fn track_pane_pointer(&mut self, ui: &egui::Ui, pane: &str) {
        let pressed = ui.input(|i| i.pointer.any_pressed());
        if pressed && ui.rect_contains_pointer(ui.min_rect()) {
            self.engine.pointer_in_pane(pane);
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        self.binder
            .scope(&mut self.engine, "top-bar", ScopeOptions::default);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(RichText::new(i18n.heading()).color(colors.accent));
                ui.label(RichText::new(i18n.tagline()).color(colors.text_muted));
            });
            ui.add_space(24.0);
            for page in Page::ALL {
                let label = RichText::new(i18n.page_label(page)).color(colors.text_primary);
                let response = ui.add(egui::Button::new(label).selected(self.page == page));
                let key = match page {
                    Page::Home => "nav-home",
                    Page::Settings => "nav-settings",
                };
                self.bind_leaf(
                    ui,
                    &response,
                    LeafSpec::new(key).in_scope("top-bar"),
                    UiCommand::OpenPage(page),
                );
            }
        });
    }

    fn render_bottom_bar(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        let mode = self.mode.get();
        ui.horizontal(|ui| {
            let hint = i18n.navigation_hint(mode);
            if !hint.is_empty() {
                ui.label(RichText::new(hint).color(colors.text_muted).small());
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                badge_frame(colors.border_strong).show(ui, |ui| {
                    ui.label(
                        RichText::new(i18n.launcher_version(self.launcher_version))
                            .color(colors.text_primary)
                            .small(),
                    );
                });
                badge_frame(colors.info).show(ui, |ui| {
                    ui.label(
                        RichText::new(i18n.mode_label(mode))
                            .color(colors.text_primary)
                            .small(),
                    );
                });
            });
        });
    }

    fn render_home(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        self.binder
            .pane(&mut self.engine, Page::Home.root_scope(), ScopeOptions::default);
        section_frame(colors).show(ui, |ui| {
            ui.set_max_width(420.0);
            ui.label(RichText::new(i18n.instance_label()).color(colors.text_muted));
            ui.label(
                RichText::new(INSTANCES[self.selected_instance])
                    .size(22.0)
                    .strong(),
            );
            ui.add_space(8.0);

            let play = ui.add(primary_cta_button(
                RichText::new(i18n.play_button()).strong(),
                colors,
                260.0,
            ));
            self.bind_leaf(
                ui,
                &play,
                LeafSpec::new("home-play").in_scope("home"),
                UiCommand::Play,
            );

            let change = ui.add(
                egui::Button::new(i18n.select_instance_button()).min_size(Vec2::new(260.0, 34.0)),
            );
            self.bind_leaf(
                ui,
                &change,
                LeafSpec::new("home-instance").in_scope("home"),
                UiCommand::OpenInstancePicker,
            );

            if let Some(status) = &self.status {
                ui.label(RichText::new(status).color(colors.info));
            }
        });
    }

    fn render_instance_picker(&mut self, ctx: &egui::Context, colors: &ThemePalette, i18n: I18n) {
        let commands = self.commands_tx.clone();
        self.binder.scope(&mut self.engine, INSTANCE_PICKER_SCOPE, || {
            ScopeOptions::default().trapping().on_escape(move || {
                let _ = commands.send(UiCommand::CloseInstancePicker);
            })
        });

        // Modal: the page behind takes no pointer input while the picker is open.
        let modal = egui::Modal::new(egui::Id::new(INSTANCE_PICKER_SCOPE))
            .frame(elevated_frame(colors))
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.heading(i18n.instance_picker_title());
                ui.add_space(6.0);
                for (index, name) in INSTANCES.iter().enumerate() {
                    let response = ui.add(
                        egui::Button::new(*name)
                            .selected(index == self.selected_instance)
                            .min_size(Vec2::new(300.0, 34.0)),
                    );
                    self.bind_leaf(
                        ui,
                        &response,
                        LeafSpec::new(instance_key(index)).in_scope(INSTANCE_PICKER_SCOPE),
                        UiCommand::SelectInstance(index),
                    );
                }
            });
        if modal.backdrop_response.clicked() {
            let _ = self.commands_tx.send(UiCommand::CloseInstancePicker);
        }
    }

    fn render_settings_sidebar(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        self.binder.pane(&mut self.engine, "settings-sidebar", || {
            ScopeOptions::default().trapping()
        });
        ui.add_space(8.0);
        for tab in SettingsTab::ALL {
            let label = RichText::new(i18n.tab_label(tab)).color(colors.text_primary);
            let response = ui.add(
                egui::Button::new(label)
                    .selected(self.tab == tab)
                    .min_size(Vec2::new(ui.available_width(), 36.0)),
            );
            self.bind_leaf(
                ui,
                &response,
                LeafSpec::new(tab.leaf_key()).in_scope("settings-sidebar"),
                UiCommand::SelectTab(tab),
            );
        }
        self.track_pane_pointer(ui, "settings-sidebar");
    }

    fn render_settings_content(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        self.binder
            .pane(&mut self.engine, SETTINGS_CONTENT_PANE, ScopeOptions::default);
        let mut frame = section_frame(colors);
        if self.pane_highlighted(SETTINGS_CONTENT_PANE) {
            frame = frame.stroke(Stroke::new(1.5, colors.accent));
        }
        frame.show(ui, |ui| {
            ui.set_max_width(520.0);
            match self.tab {
                SettingsTab::General => self.render_general_tab(ui, colors, i18n),
                SettingsTab::Java => self.render_java_tab(ui, colors, i18n),
                SettingsTab::Appearance => self.render_appearance_tab(ui, colors, i18n),
            }
        });
        self.track_pane_pointer(ui, SETTINGS_CONTENT_PANE);
    }

    fn render_general_tab(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        ui.label(RichText::new(i18n.language_label()).color(colors.text_muted));
        ui.horizontal(|ui| {
            for (language, key) in [
                (Language::English, "settings-language-en"),
                (Language::Ukrainian, "settings-language-uk"),
            ] {
                let response = ui.add(
                    egui::Button::new(language.display_name()).selected(self.language == language),
                );
                self.bind_leaf(
                    ui,
                    &response,
                    LeafSpec::new(key).in_scope(SETTINGS_CONTENT_PANE),
                    UiCommand::SetLanguage(language),
                );
            }
        });
    }

    fn render_java_tab(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        ui.label(RichText::new(i18n.memory_label(self.memory_mb)).color(colors.text_muted));
        self.binder.scope(&mut self.engine, "settings-memory", || {
            ScopeOptions::within(SETTINGS_CONTENT_PANE)
        });
        ui.horizontal(|ui| {
            for (delta, key, enabled, label) in [
                (
                    -MEMORY_STEP_MB,
                    "settings-memory-down",
                    self.memory_mb > MEMORY_MIN_MB,
                    "-",
                ),
                (
                    MEMORY_STEP_MB,
                    "settings-memory-up",
                    self.memory_mb < MEMORY_MAX_MB,
                    "+",
                ),
            ] {
                let response = ui.add_enabled(
                    enabled,
                    egui::Button::new(label).min_size(Vec2::new(48.0, 34.0)),
                );
                self.bind_leaf(
                    ui,
                    &response,
                    LeafSpec::new(key)
                        .in_scope("settings-memory")
                        .enabled(enabled),
                    UiCommand::AdjustMemory(delta),
                );
            }
        });

        ui.add_space(6.0);
        ui.label(RichText::new(i18n.jvm_args_label()).color(colors.text_muted));
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.jvm_args)
                .hint_text(i18n.jvm_args_hint())
                .desired_width(420.0),
        );
        self.bind_leaf(
            ui,
            &response,
            LeafSpec::new(JVM_ARGS_KEY)
                .in_scope(SETTINGS_CONTENT_PANE)
                .text_entry(),
            UiCommand::EditField(JVM_ARGS_KEY),
        );

        if self.text_focus_request {
            response.request_focus();
        }
        if self.text_release_request {
            response.surrender_focus();
        }
        if response.gained_focus()
            && let Some(handle) = self.binder.handle(JVM_ARGS_KEY)
        {
            self.engine.focus_self(handle);
            self.engine.begin_text_entry(handle);
        }
        if response.lost_focus() && self.engine.text_entry() == Some(JVM_ARGS_KEY) {
            self.engine.end_text_entry();
        }
    }

    fn render_appearance_tab(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        ui.label(RichText::new(i18n.theme_heading()).color(colors.text_muted));
        ui.horizontal(|ui| {
            for (theme, key) in [
                (Theme::Dark, "settings-theme-dark"),
                (Theme::Light, "settings-theme-light"),
            ] {
                let response = ui.add(
                    egui::Button::new(i18n.theme_label(theme)).selected(self.theme == theme),
                );
                self.bind_leaf(
                    ui,
                    &response,
                    LeafSpec::new(key).in_scope(SETTINGS_CONTENT_PANE),
                    UiCommand::SetTheme(theme),
                );
            }
        });
    }

    fn render_controller_notice(&self, ctx: &egui::Context, colors: &ThemePalette, i18n: I18n) {
        let notice = self.announcer.notice();
        if !notice.visible() {
            return;
        }
        egui::Area::new(egui::Id::new("controller_notice"))
            .order(egui::Order::Foreground)
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -56.0))
            .show(ctx, |ui| {
                elevated_frame(colors).show(ui, |ui| {
                    ui.label(
                        RichText::new(i18n.controller_notice(notice.kind()))
                            .color(colors.accent_glow)
                            .strong(),
                    );
                });
            });
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let mut next = if self.pads_connected {
            self.config.controller_repaint()
        } else {
            self.config.idle_repaint()
        };
        if let Some(remaining) = self.announcer.notice().remaining(now) {
            next = next.min(remaining);
        }
        ctx.request_repaint_after(next);
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.feed_input(ctx);
        self.poll_controllers();
        self.announcer.sync(now);
        self.drain_commands();

        let colors = self.colors();
        apply_theme(ctx, &colors, self.engine.mode_tag());
        let i18n = self.i18n();

        self.binder.begin_frame();

        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(colors.panel)
                    .stroke(Stroke::new(1.0, colors.border))
                    .inner_margin(Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| self.render_top_bar(ui, &colors, i18n));

        egui::TopBottomPanel::bottom("bottom_bar")
            .frame(
                Frame::new()
                    .fill(colors.panel)
                    .stroke(Stroke::new(1.0, colors.border))
                    .inner_margin(Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| self.render_bottom_bar(ui, &colors, i18n));

        if self.page == Page::Settings {
            let sidebar_stroke = if self.pane_highlighted("settings-sidebar") {
                Stroke::new(1.5, colors.accent)
            } else {
                Stroke::new(1.0, colors.border)
            };
            egui::SidePanel::left("settings_sidebar")
                .resizable(false)
                .exact_width(220.0)
                .frame(
                    Frame::new()
                        .fill(colors.panel)
                        .stroke(sidebar_stroke)
                        .inner_margin(Margin::symmetric(12, 12)),
                )
                .show(ctx, |ui| self.render_settings_sidebar(ui, &colors, i18n));
        }

        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(colors.bg)
                    .inner_margin(Margin::symmetric(18, 16)),
            )
            .show(ctx, |ui| match self.page {
                Page::Home => self.render_home(ui, &colors, i18n),
                Page::Settings => self.render_settings_content(ui, &colors, i18n),
            });

        if self.picker_open {
            self.render_instance_picker(ctx, &colors, i18n);
        }
        self.render_controller_notice(ctx, &colors, i18n);

        self.binder.end_frame(&mut self.engine);
        self.apply_pending_focus();
        if self.drain_commands() {
            ctx.request_repaint();
        }
        self.schedule_repaint(ctx, now);
    }
}
