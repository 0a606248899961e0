//! User-editable match settings.
//!
//! Settings are created once with defaults, written only by
//! `Event::SettingsUpdated`, and survive both connection loss and session
//! resets. Nothing else in the crate clears them.

use serde::{Deserialize, Serialize};

/// Default AI thinking budget per move.
pub const DEFAULT_AI_TIME_LIMIT_MS: u64 = 5_000;

/// Default Quoridor board size.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Who controls each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    HumanVsHuman,
    HumanVsAi,
    AiVsAi,
}

impl GameMode {
    /// Check if at least one seat is AI-controlled.
    pub fn has_ai(&self) -> bool {
        !matches!(self, Self::HumanVsHuman)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HumanVsHuman => "human_vs_human",
            Self::HumanVsAi => "human_vs_ai",
            Self::AiVsAi => "ai_vs_ai",
        }
    }
}

/// AI strength preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl AiDifficulty {
    /// MCTS iteration budget for this preset.
    pub fn mcts_iterations(&self) -> u32 {
        match self {
            Self::Easy => 100,
            Self::Medium => 1_000,
            Self::Hard => 5_000,
            Self::Expert => 10_000,
        }
    }

    /// Easy plays heuristically; everything above it searches.
    pub fn uses_mcts(&self) -> bool {
        !matches!(self, Self::Easy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

/// Match configuration sent with a game-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub mode: GameMode,
    pub ai_difficulty: AiDifficulty,
    pub ai_time_limit_ms: u64,
    pub board_size: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsAi,
            ai_difficulty: AiDifficulty::Medium,
            ai_time_limit_ms: DEFAULT_AI_TIME_LIMIT_MS,
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// The settings partition: match settings plus client preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsState {
    pub game_settings: GameSettings,
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            game_settings: GameSettings::default(),
            theme: Theme::default(),
            sound_enabled: true,
        }
    }
}

/// Partial settings update. Fields left `None` keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub mode: Option<GameMode>,
    pub ai_difficulty: Option<AiDifficulty>,
    pub ai_time_limit_ms: Option<u64>,
    pub board_size: Option<usize>,
    pub theme: Option<Theme>,
    pub sound_enabled: Option<bool>,
}

impl SettingsPatch {
    /// Check if applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl SettingsState {
    /// Return a copy with the patch merged in, field by field.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            game_settings: GameSettings {
                mode: patch.mode.unwrap_or(self.game_settings.mode),
                ai_difficulty: patch
                    .ai_difficulty
                    .unwrap_or(self.game_settings.ai_difficulty),
                ai_time_limit_ms: patch
                    .ai_time_limit_ms
                    .unwrap_or(self.game_settings.ai_time_limit_ms),
                board_size: patch.board_size.unwrap_or(self.game_settings.board_size),
            },
            theme: patch.theme.unwrap_or(self.theme),
            sound_enabled: patch.sound_enabled.unwrap_or(self.sound_enabled),
        }
    }
}
