// Top-level pages of the shell, in PAGE_LEFT / PAGE_RIGHT order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Settings,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Home, Page::Settings];

    /// Neighbouring page, wrapping at either end.
    pub fn cycle(self, step: isize) -> Page {
        let count = Self::ALL.len() as isize;
        let index = Self::ALL.iter().position(|page| *page == self).unwrap_or(0) as isize;
        Self::ALL[(index + step).rem_euclid(count) as usize]
    }

    /// Outermost pane of the page; focus is restored here on entry.
    pub const fn root_scope(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Settings => "settings-sidebar",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Java,
    Appearance,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [
        SettingsTab::General,
        SettingsTab::Java,
        SettingsTab::Appearance,
    ];

    pub const fn leaf_key(self) -> &'static str {
        match self {
            SettingsTab::General => "settings-tab-general",
            SettingsTab::Java => "settings-tab-java",
            SettingsTab::Appearance => "settings-tab-appearance",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

// Requests raised from focus callbacks and pointer clicks, drained by the app
// each frame.
#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    Play,
    OpenInstancePicker,
    CloseInstancePicker,
    SelectInstance(usize),
    OpenPage(Page),
    CyclePage(isize),
    SelectTab(SettingsTab),
    SetLanguage(super::i18n::Language),
    SetTheme(Theme),
    AdjustMemory(i32),
    EditField(&'static str),
    Back,
}
