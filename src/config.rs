//! User configuration: key bindings, display options and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/snap-carousel/config.toml`
//! (default `~/.config/snap-carousel/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the carousel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Previous,
    Next,
    PagePrevious,
    PageNext,
    JumpFirst,
    JumpLast,
    Reload,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions.
    pub const ALL: &[Action] = &[
        Action::Previous,
        Action::Next,
        Action::PagePrevious,
        Action::PageNext,
        Action::JumpFirst,
        Action::JumpLast,
        Action::Reload,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Previous => "previous",
            Action::Next => "next",
            Action::PagePrevious => "page_previous",
            Action::PageNext => "page_next",
            Action::JumpFirst => "jump_first",
            Action::JumpLast => "jump_last",
            Action::Reload => "reload",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Only these modifiers take part in matching.
const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

/// Shift is already folded into the character for `Char` keys.
const CHAR_MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::ALT);

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => CHAR_MODIFIER_MASK,
            _ => MODIFIER_MASK,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"←"`, `"Ctrl+r"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file spelling (e.g. `"Left"`, `"Ctrl+r"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        let key = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, true) => "PgUp".into(),
            (KeyCode::PageDown, true) => "PgDn".into(),
            (KeyCode::PageUp, false) => "PageUp".into(),
            (KeyCode::PageDown, false) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+r"`, `"Left"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                // Keep the original case for single characters ("R" ≠ "r").
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

pub const DEFAULT_CELL_WIDTH: u16 = 9;
pub const DEFAULT_GLIDE_SPEED_PCT: u8 = 25;
pub const DEFAULT_FLICK_PROJECTION_MS: u64 = 350;

/// Narrower cells cannot hold "Wed 31".
const MIN_CELL_WIDTH: u16 = 5;
const MAX_CELL_WIDTH: u16 = 30;

/// Bring a cell width from any source into the range the row can draw.
pub fn clamp_cell_width(width: u16) -> u16 {
    width.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
}

/// Application configuration: key bindings and display options.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Cell width in terminal columns.
    pub cell_width: u16,
    /// Fraction of the remaining distance covered per frame, in percent.
    pub glide_speed_pct: u8,
    /// How far ahead a flick is projected before snapping.
    pub flick_projection_ms: u64,
    /// Flash the indicator border on every selection pulse.
    pub feedback_flash: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            cell_width: DEFAULT_CELL_WIDTH,
            glide_speed_pct: DEFAULT_GLIDE_SPEED_PCT,
            flick_projection_ms: DEFAULT_FLICK_PROJECTION_MS,
            feedback_flash: true,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Previous, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Next, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(PagePrevious, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(PageNext, vec![KeyBind::new(PageDown, n), KeyBind::new(Char('w'), n)]);
        m.insert(JumpFirst, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpLast, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)]);
        m.insert(Reload, vec![KeyBind::new(Char('r'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  When several bindings match,
    /// the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Short display of the first binding only.
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "drag/{}{}: scroll | {}: reload | {}: settings | {}: quit",
            self.short_binding(Action::Previous),
            self.short_binding(Action::Next),
            self.short_binding(Action::Reload),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    /// Glide damping as a fraction.
    pub fn glide_speed(&self) -> f64 {
        f64::from(self.glide_speed_pct) / 100.0
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                tracing::debug!("no config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "cell_width" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.cell_width = clamp_cell_width(v);
                    }
                    continue;
                }
                "glide_speed_pct" => {
                    if let Ok(v) = value.parse::<u8>() {
                        config.glide_speed_pct = v.clamp(5, 95);
                    }
                    continue;
                }
                "flick_projection_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.flick_projection_ms = v.min(2000);
                    }
                    continue;
                }
                "feedback_flash" => {
                    config.feedback_flash = value == "true";
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("unknown config key '{key}'");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# snap-carousel configuration".to_string(),
            String::new(),
            "# Display".to_string(),
            format!("cell_width = {}", self.cell_width),
            format!("glide_speed_pct = {}", self.glide_speed_pct),
            format!("flick_projection_ms = {}", self.flick_projection_ms),
            format!("feedback_flash = {}", self.feedback_flash),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/snap-carousel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("snap-carousel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_match() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::Previous)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::JumpLast)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::OpenSettings)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
        assert_eq!(config.match_key(key(KeyCode::Char('r'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn parse_overrides_and_clamps() {
        let config = AppConfig::parse(
            "# comment\n\
             cell_width = 2\n\
             glide_speed_pct = 40\n\
             feedback_flash = false\n\
             reload = Ctrl+r, F5\n\
             bogus = x\n",
        );
        assert_eq!(config.cell_width, 5);
        assert_eq!(config.glide_speed_pct, 40);
        assert!(!config.feedback_flash);
        assert_eq!(
            config.bindings[&Action::Reload],
            vec![
                KeyBind::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(5), KeyModifiers::NONE),
            ]
        );
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn cell_width_is_clamped_to_drawable_range() {
        assert_eq!(clamp_cell_width(0), 5);
        assert_eq!(clamp_cell_width(1), 5);
        assert_eq!(clamp_cell_width(9), 9);
        assert_eq!(clamp_cell_width(200), 30);
        assert_eq!(AppConfig::parse("cell_width = 99").cell_width, 30);
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.cell_width = 13;
        config.feedback_flash = false;
        config
            .bindings
            .insert(Action::PageNext, vec![KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE)]);
        assert_eq!(AppConfig::parse(&config.serialise()), config);
    }
}
