use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseThemeError {
    #[error("Unknown flower {0:?}, pick rose, tulip or daisy")]
    UnknownFlower(String),

    #[error("Unknown nickname {0:?}, pick princess, babe or sweetie")]
    UnknownNickname(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowerType {
    #[default]
    Rose,
    Tulip,
    Daisy,
}

impl FlowerType {
    pub const ALL: [FlowerType; 3] = [FlowerType::Rose, FlowerType::Tulip, FlowerType::Daisy];

    pub fn emoji(&self) -> &'static str {
        match self {
            FlowerType::Rose => "🌹",
            FlowerType::Tulip => "🌷",
            FlowerType::Daisy => "🌼",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            FlowerType::Rose => "#F8D7DA",
            FlowerType::Tulip => "#E6D0EC",
            FlowerType::Daisy => "#DFF4E3",
        }
    }

    /// Number of petals drawn for the progress flower.
    pub fn petals(&self) -> u32 {
        match self {
            FlowerType::Rose => 8,
            FlowerType::Tulip => 6,
            FlowerType::Daisy => 12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowerType::Rose => "rose",
            FlowerType::Tulip => "tulip",
            FlowerType::Daisy => "daisy",
        }
    }
}

impl fmt::Display for FlowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlowerType {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        FlowerType::ALL
            .into_iter()
            .find(|flower| flower.name() == name)
            .ok_or_else(|| ParseThemeError::UnknownFlower(s.trim().to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nickname {
    #[default]
    Princess,
    Babe,
    Sweetie,
}

impl Nickname {
    pub const ALL: [Nickname; 3] = [Nickname::Princess, Nickname::Babe, Nickname::Sweetie];
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Nickname::Princess => "Princess",
            Nickname::Babe => "Babe",
            Nickname::Sweetie => "Sweetie",
        };

        f.write_str(name)
    }
}

impl FromStr for Nickname {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Nickname::ALL
            .into_iter()
            .find(|nickname| nickname.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseThemeError::UnknownNickname(name.to_owned()))
    }
}
