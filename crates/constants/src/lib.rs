pub mod version;

pub const SERVER_NAME: &str = "MCFruit";
pub const SERVER_ADDRESS: &str = "mcfruit.club";
pub const API_BASE_URL: &str = "http://localhost:8080/api";
pub const AVATAR_BASE_URL: &str = "https://mc-heads.net";
pub const AVATAR_SIZE: u32 = 128;
pub const STATUS_API_URL: &str = "https://api.mcsrvstat.us/3";
pub const STATUS_REFRESH_SECS: u64 = 30;
pub const DEFAULT_ELO: i64 = 1000;
pub const CONFIG_FILE: &str = "mcfruit.toml";

pub const MODE_NAMES: &[(&str, &str)] = &[
  ("nodebuff", "NoDebuff"),
  ("debuff", "Debuff"),
  ("sumo", "Sumo"),
  ("builduhc", "BuildUHC"),
  ("archer", "Archer"),
  ("gapple", "Gapple"),
];
