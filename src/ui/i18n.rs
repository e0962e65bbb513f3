use crate::focus::InputMode;
use crate::focus::announce::DeviceKind;

use super::state::{Page, SettingsTab, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Ukrainian,
}

impl Language {
    pub const fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Ukrainian => "Українська",
        }
    }
}

const LOCALE_LANGUAGE_CODES: [(&[&str], Language); 2] = [
    (&["uk", "ua", "ukr"], Language::Ukrainian),
    (&["en", "eng"], Language::English),
];

fn parse_locale_token(token: &str) -> Option<Language> {
    let normalized = token
        .split(|c| matches!(c, '.' | '@'))
        .next()
        .unwrap_or(token)
        .replace('-', "_")
        .to_ascii_lowercase();
    let language_code = normalized.split('_').next().unwrap_or(&normalized);

    LOCALE_LANGUAGE_CODES.iter().find_map(|(codes, language)| {
        codes
            .iter()
            .any(|code| *code == language_code)
            .then_some(*language)
    })
}

pub fn detect_system_language() -> Language {
    for var in ["LC_ALL", "LANGUAGE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            for token in value.split(':') {
                if let Some(language) = parse_locale_token(token) {
                    return language;
                }
            }
        }
    }

    Language::English
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    fn pick<'a>(self, english: &'a str, ukrainian: &'a str) -> &'a str {
        match self.language {
            Language::English => english,
            Language::Ukrainian => ukrainian,
        }
    }

    pub fn theme_label(self, theme: Theme) -> &'static str {
        match (theme, self.language) {
            (Theme::Dark, Language::English) => "Dark",
            (Theme::Dark, Language::Ukrainian) => "Темна",
            (Theme::Light, Language::English) => "Light",
            (Theme::Light, Language::Ukrainian) => "Світла",
        }
    }

    pub fn page_label(self, page: Page) -> &'static str {
        match page {
            Page::Home => self.pick("Home", "Головна"),
            Page::Settings => self.pick("Settings", "Налаштування"),
        }
    }

    pub fn tab_label(self, tab: SettingsTab) -> &'static str {
        match tab {
            SettingsTab::General => self.pick("General", "Загальні"),
            SettingsTab::Java => self.pick("Java", "Java"),
            SettingsTab::Appearance => self.pick("Appearance", "Вигляд"),
        }
    }

    pub fn mode_label(self, mode: InputMode) -> &'static str {
        match mode {
            InputMode::Pointer => self.pick("Mouse", "Миша"),
            InputMode::Keyboard => self.pick("Keyboard", "Клавіатура"),
            InputMode::Controller => self.pick("Controller", "Контролер"),
        }
    }

    pub fn heading(self) -> &'static str {
        self.pick("Ore Launcher", "Лаунчер Ore")
    }

    pub fn tagline(self) -> &'static str {
        self.pick(
            "Play with a mouse, keyboard or controller",
            "Грайте мишею, клавіатурою або контролером",
        )
    }

    pub fn launcher_version(self, version: &str) -> String {
        match self.language {
            Language::English => format!("Launcher v{version}"),
            Language::Ukrainian => format!("Версія лаунчера v{version}"),
        }
    }

    pub fn play_button(self) -> &'static str {
        self.pick("Play", "Грати")
    }

    pub fn instance_label(self) -> &'static str {
        self.pick("Instance", "Збірка")
    }

    pub fn select_instance_button(self) -> &'static str {
        self.pick("Change instance", "Змінити збірку")
    }

    pub fn instance_picker_title(self) -> &'static str {
        self.pick("Choose an instance", "Оберіть збірку")
    }

    pub fn launching(self, instance: &str) -> String {
        match self.language {
            Language::English => format!("Launching {instance}..."),
            Language::Ukrainian => format!("Запуск {instance}..."),
        }
    }

    pub fn language_label(self) -> &'static str {
        self.pick("Language", "Мова")
    }

    pub fn memory_label(self, megabytes: u32) -> String {
        match self.language {
            Language::English => format!("Memory: {megabytes} MB"),
            Language::Ukrainian => format!("Пам'ять: {megabytes} МБ"),
        }
    }

    pub fn jvm_args_label(self) -> &'static str {
        self.pick("JVM arguments", "Аргументи JVM")
    }

    pub fn jvm_args_hint(self) -> &'static str {
        self.pick("Press Enter to edit", "Натисніть Enter, щоб змінити")
    }

    pub fn theme_heading(self) -> &'static str {
        self.pick("Theme", "Тема")
    }

    pub fn controller_notice(self, kind: DeviceKind) -> &'static str {
        match kind {
            DeviceKind::Handheld => self.pick(
                "Steam Deck controls enabled",
                "Керування Steam Deck увімкнено",
            ),
            DeviceKind::Generic => self.pick("Controller connected", "Контролер підключено"),
        }
    }

    pub fn navigation_hint(self, mode: InputMode) -> &'static str {
        match mode {
            InputMode::Pointer => "",
            InputMode::Keyboard => self.pick(
                "Arrows move · Enter selects · Esc goes back",
                "Стрілки: рух · Enter: вибір · Esc: назад",
            ),
            InputMode::Controller => self.pick(
                "A select · B back · LB/RB switch page · Menu instances",
                "A вибір · B назад · LB/RB сторінка · Menu збірки",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_languages_from_locale_tokens() {
        let samples = [
            ("en_US.UTF-8", Language::English),
            ("uk_UA.UTF-8", Language::Ukrainian),
            ("ua-UA", Language::Ukrainian),
            ("eng_US", Language::English),
        ];

        for (token, expected) in samples {
            assert_eq!(parse_locale_token(token), Some(expected));
        }
    }

    #[test]
    fn ignores_unknown_language_tokens() {
        assert_eq!(parse_locale_token("pl_PL"), None);
    }

    #[test]
    fn notice_text_depends_on_device() {
        let i18n = I18n::new(Language::English);
        assert_ne!(
            i18n.controller_notice(DeviceKind::Handheld),
            i18n.controller_notice(DeviceKind::Generic)
        );
    }
}
