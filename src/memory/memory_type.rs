// Thu Oct 15 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MemoryType {
    SnesMemory,
    SnesPrgRom,
    SnesWorkRam,
    SnesSaveRam,
    GameboyMemory,
    GbPrgRom,
    GbWorkRam,
    GbCartRam,
    GbHighRam,
    GbVideoRam,
}

/// Groups memory types the way label import toggles are exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelCategory {
    PrgRom,
    WorkRam,
    SaveRam,
    Other,
}

impl MemoryType {
    pub fn is_relative(self) -> bool {
        matches!(self, Self::SnesMemory | Self::GameboyMemory)
    }

    pub fn category(self) -> LabelCategory {
        match self {
            Self::SnesPrgRom | Self::GbPrgRom => LabelCategory::PrgRom,
            Self::SnesWorkRam | Self::GbWorkRam | Self::GbHighRam => LabelCategory::WorkRam,
            Self::SnesSaveRam | Self::GbCartRam => LabelCategory::SaveRam,
            Self::SnesMemory | Self::GameboyMemory | Self::GbVideoRam => LabelCategory::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SnesMemory => "SnesMemory",
            Self::SnesPrgRom => "SnesPrgRom",
            Self::SnesWorkRam => "SnesWorkRam",
            Self::SnesSaveRam => "SnesSaveRam",
            Self::GameboyMemory => "GameboyMemory",
            Self::GbPrgRom => "GbPrgRom",
            Self::GbWorkRam => "GbWorkRam",
            Self::GbCartRam => "GbCartRam",
            Self::GbHighRam => "GbHighRam",
            Self::GbVideoRam => "GbVideoRam",
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpuType {
    Snes,
    Spc,
    NecDsp,
    Sa1,
    Gsu,
    Cx4,
    Gameboy,
    Nes,
    Pce,
}

impl FromStr for CpuType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snes" => Ok(Self::Snes),
            "spc" => Ok(Self::Spc),
            "necdsp" => Ok(Self::NecDsp),
            "sa1" => Ok(Self::Sa1),
            "gsu" => Ok(Self::Gsu),
            "cx4" => Ok(Self::Cx4),
            "gameboy" | "gb" => Ok(Self::Gameboy),
            "nes" => Ok(Self::Nes),
            "pce" => Ok(Self::Pce),
            _ => Err(format!("Unknown CPU type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(MemoryType::SnesPrgRom.category(), LabelCategory::PrgRom);
        assert_eq!(MemoryType::GbHighRam.category(), LabelCategory::WorkRam);
        assert_eq!(MemoryType::GbCartRam.category(), LabelCategory::SaveRam);
        assert_eq!(MemoryType::GbVideoRam.category(), LabelCategory::Other);
    }

    #[test]
    fn test_cpu_type_parse() {
        assert_eq!("GB".parse::<CpuType>(), Ok(CpuType::Gameboy));
        assert_eq!("snes".parse::<CpuType>(), Ok(CpuType::Snes));
        assert_eq!("z80".parse::<CpuType>(), Err("Unknown CPU type: z80".to_string()));
    }
}
