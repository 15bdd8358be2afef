use thiserror::Error;

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A battle input that was rejected. The battle state is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Battle is over")]
    BattleOver,

    #[error("Not accepting selections right now")]
    NotSelecting,

    #[error("Not the player's turn")]
    NotPlayerTurn,

    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    #[error("Character cannot act: {0}")]
    CharacterDown(String),

    #[error("No character selected")]
    NoCharacterSelected,

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("MP insufficient: need {needed}, have {available}")]
    InsufficientMp { needed: i32, available: i32 },

    #[error("Skill {skill} is cooling down ({remaining} turns left)")]
    SkillOnCooldown { skill: String, remaining: u32 },

    #[error("No skill selected")]
    NoSkillSelected,

    #[error("Invalid target: {0}")]
    InvalidTarget(String),
}
