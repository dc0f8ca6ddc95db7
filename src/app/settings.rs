//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::AppState;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle: reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown in the popup.
    pub fn value(&self, state: &AppState) -> String {
        match self {
            Self::Toggle { get, .. } => (if get(state) { "ON" } else { "OFF" }).to_string(),
            Self::Cycle { value, .. } => value(state),
        }
    }

    /// Toggle or advance the item.
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// Next entry of `choices` after `current` (wrapping), or `fallback`'s
/// successor when `current` is not one of them.
fn next_choice<T: Copy + PartialEq>(choices: &[T], current: T, fallback: usize) -> T {
    let idx = choices.iter().position(|c| *c == current).unwrap_or(fallback);
    choices[(idx + 1) % choices.len()]
}

fn persist(state: &mut AppState) {
    if let Err(e) = state.config.save() {
        tracing::warn!("failed to save config: {e:#}");
        state.status_message = Some(format!("Could not save config: {e}"));
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Cycle {
        label: "Cell Width",
        value: |s| format!("{} cols", s.config.cell_width),
        cycle: |s| {
            const WIDTHS: &[u16] = &[7, 9, 11, 13, 15];
            s.config.cell_width = next_choice(WIDTHS, s.config.cell_width, 0);
            persist(s);
            s.apply_options();
            s.status_message = Some(format!("Cell width: {} cols", s.config.cell_width));
        },
    },
    SettingsItem::Cycle {
        label: "Glide Speed",
        value: |s| format!("{}%", s.config.glide_speed_pct),
        cycle: |s| {
            const SPEEDS: &[u8] = &[15, 25, 35, 50];
            s.config.glide_speed_pct = next_choice(SPEEDS, s.config.glide_speed_pct, 0);
            persist(s);
            s.apply_options();
        },
    },
    SettingsItem::Cycle {
        label: "Flick Projection",
        value: |s| format!("{}ms", s.config.flick_projection_ms),
        cycle: |s| {
            const PROJECTIONS: &[u64] = &[0, 200, 350, 600];
            s.config.flick_projection_ms =
                next_choice(PROJECTIONS, s.config.flick_projection_ms, 1);
            persist(s);
        },
    },
    SettingsItem::Toggle {
        label: "Feedback Flash",
        get: |s| s.config.feedback_flash,
        set: |s, v| {
            s.config.feedback_flash = v;
            persist(s);
            s.apply_options();
        },
    },
];
