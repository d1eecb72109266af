use serde::Serialize;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Default, Serialize)]
pub struct CueSheet {
    pub files: Vec<CueFile>,
    pub title: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,
    pub catalog: Option<u64>,
    pub cdtextfile: Option<String>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CueFile {
    pub filename: String,
    pub file_type: FileType,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub number: u32,
    pub track_type: TrackType,
    pub flags: TrackFlags,
    pub pregap: Option<Msf>,
    pub indices: Vec<Index>,
    pub postgap: Option<Msf>,
    pub title: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,
    pub isrc: Option<Isrc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Index {
    pub number: u32,
    pub position: Msf,
}

/// A disc time position in minutes, seconds and frames (75 frames per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Msf {
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Msf {
    /// Frame count relative to the start of the containing image file.
    pub fn to_frames(&self) -> u32 {
        (self.minutes as u32 * 60 + self.seconds as u32) * 75 + self.frames as u32
    }
}

impl fmt::Display for Msf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

/// International Standard Recording Code, split into its fixed-width parts.
/// The serial is kept numeric; `Display` restores the zero padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Isrc {
    pub country: String,
    pub owner: String,
    pub year: String,
    pub serial: u32,
}

impl fmt::Display for Isrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{:05}", self.country, self.owner, self.year, self.serial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub tag: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    Binary,
    Motorola,
    Aiff,
    Wave,
    Mp3,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            FileType::Binary => "BINARY",
            FileType::Motorola => "MOTOROLA",
            FileType::Aiff => "AIFF",
            FileType::Wave => "WAVE",
            FileType::Mp3 => "MP3",
        };
        write!(f, "{token}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackType {
    Audio,
    Cdg,
    Mode1_2048,
    Mode1_2352,
    Mode2_2048,
    Mode2_2324,
    Mode2_2336,
    Mode2_2352,
    Cdi2336,
    Cdi2352,
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            TrackType::Audio => "AUDIO",
            TrackType::Cdg => "CDG",
            TrackType::Mode1_2048 => "MODE1/2048",
            TrackType::Mode1_2352 => "MODE1/2352",
            TrackType::Mode2_2048 => "MODE2/2048",
            TrackType::Mode2_2324 => "MODE2/2324",
            TrackType::Mode2_2336 => "MODE2/2336",
            TrackType::Mode2_2352 => "MODE2/2352",
            TrackType::Cdi2336 => "CDI/2336",
            TrackType::Cdi2352 => "CDI/2352",
        };
        write!(f, "{token}")
    }
}

/// Subcode flags of a track. Flags combine freely, so this is a bitmask
/// rather than an enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackFlags(u8);

impl TrackFlags {
    /// Digital copy permitted.
    pub const DCP: TrackFlags = TrackFlags(0x1);
    /// Four-channel audio.
    pub const FOUR_CH: TrackFlags = TrackFlags(0x2);
    /// Pre-emphasis enabled.
    pub const PRE: TrackFlags = TrackFlags(0x4);
    /// Serial copy management system.
    pub const SCMS: TrackFlags = TrackFlags(0x8);

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: TrackFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TrackFlags {
    type Output = TrackFlags;

    fn bitor(self, rhs: TrackFlags) -> TrackFlags {
        TrackFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TrackFlags {
    fn bitor_assign(&mut self, rhs: TrackFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for TrackFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in [
            (TrackFlags::DCP, "DCP"),
            (TrackFlags::FOUR_CH, "4CH"),
            (TrackFlags::PRE, "PRE"),
            (TrackFlags::SCMS, "SCMS"),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msf_converts_to_frames() {
        let msf = Msf {
            minutes: 1,
            seconds: 2,
            frames: 3,
        };
        assert_eq!(msf.to_frames(), (60 + 2) * 75 + 3);
        assert_eq!(Msf::default().to_frames(), 0);
    }

    #[test]
    fn msf_displays_zero_padded() {
        let msf = Msf {
            minutes: 0,
            seconds: 2,
            frames: 15,
        };
        assert_eq!(msf.to_string(), "00:02:15");
    }

    #[test]
    fn isrc_display_restores_serial_padding() {
        let isrc = Isrc {
            country: "US".to_string(),
            owner: "RC1".to_string(),
            year: "76".to_string(),
            serial: 7839,
        };
        assert_eq!(isrc.to_string(), "USRC17607839");
    }

    #[test]
    fn track_flags_combine_independently() {
        let mut flags = TrackFlags::default();
        assert!(flags.is_empty());

        flags |= TrackFlags::DCP;
        flags |= TrackFlags::PRE;
        assert!(flags.contains(TrackFlags::DCP));
        assert!(flags.contains(TrackFlags::PRE));
        assert!(!flags.contains(TrackFlags::FOUR_CH));
        assert!(!flags.contains(TrackFlags::SCMS));
    }

    #[test]
    fn track_flags_display_lists_set_names() {
        let flags = TrackFlags::DCP | TrackFlags::FOUR_CH | TrackFlags::SCMS;
        assert_eq!(flags.to_string(), "DCP 4CH SCMS");
        assert_eq!(TrackFlags::default().to_string(), "");
    }

    #[test]
    fn track_type_displays_canonical_token() {
        assert_eq!(TrackType::Mode2_2324.to_string(), "MODE2/2324");
        assert_eq!(TrackType::Cdi2352.to_string(), "CDI/2352");
        assert_eq!(FileType::Wave.to_string(), "WAVE");
    }
}
