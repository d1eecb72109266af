use crate::cue::error::CueResult;
use crate::cue::models::{
    Comment, CueFile, CueSheet, FileType, Index, Isrc, Msf, Track, TrackFlags, TrackType,
};
use crate::cue::tokenizer::{TokenLine, Tokenizer};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;

/// Where context-sensitive text fields (TITLE, PERFORMER, SONGWRITER) land.
/// Derived from the file/track cursors; a file without tracks still resolves
/// to the sheet level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Sheet,
    File,
    Track,
}

fn context(sheet: &CueSheet) -> Context {
    match sheet.files.last() {
        None => Context::Sheet,
        Some(file) if file.tracks.is_empty() => Context::File,
        Some(_) => Context::Track,
    }
}

fn current_track(sheet: &mut CueSheet) -> Option<&mut Track> {
    sheet.files.last_mut().and_then(|file| file.tracks.last_mut())
}

/// Case-insensitive match of `keyword` against the leading bytes of `token`.
/// Sheet vocabulary matches on prefix, so `TRACKS` still dispatches as TRACK.
fn has_keyword(token: &str, keyword: &str) -> bool {
    token.len() >= keyword.len()
        && token.as_bytes()[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes())
}

fn file_type(token: &str) -> Option<FileType> {
    if has_keyword(token, "BINARY") {
        Some(FileType::Binary)
    } else if has_keyword(token, "WAVE") {
        Some(FileType::Wave)
    } else if has_keyword(token, "MP3") {
        Some(FileType::Mp3)
    } else if has_keyword(token, "AIFF") {
        Some(FileType::Aiff)
    } else if has_keyword(token, "MOTOROLA") {
        Some(FileType::Motorola)
    } else {
        None
    }
}

fn track_type(token: &str) -> Option<TrackType> {
    if has_keyword(token, "AUDIO") {
        Some(TrackType::Audio)
    } else if has_keyword(token, "MODE1/2048") {
        Some(TrackType::Mode1_2048)
    } else if has_keyword(token, "MODE1/2352") {
        Some(TrackType::Mode1_2352)
    } else if has_keyword(token, "MODE2/2048") {
        Some(TrackType::Mode2_2048)
    } else if has_keyword(token, "MODE2/2324") {
        Some(TrackType::Mode2_2324)
    } else if has_keyword(token, "MODE2/2336") {
        Some(TrackType::Mode2_2336)
    } else if has_keyword(token, "MODE2/2352") {
        Some(TrackType::Mode2_2352)
    } else if has_keyword(token, "CDG") {
        Some(TrackType::Cdg)
    } else if has_keyword(token, "CDI/2336") {
        Some(TrackType::Cdi2336)
    } else if has_keyword(token, "CDI/2352") {
        Some(TrackType::Cdi2352)
    } else {
        None
    }
}

/// Base-10 conversion that accepts a token only when it is consumed whole;
/// partial numeric prefixes are rejected, not truncated.
fn number<T: FromStr>(token: Option<&str>) -> Option<T> {
    token.and_then(|t| t.parse().ok())
}

fn time_field(field: &str) -> Option<u8> {
    let n: u8 = field.parse().ok()?;
    (n < 100).then_some(n)
}

/// `mm:ss:ff` time code: exactly three colon-delimited fields, each below
/// 100, the whole token consumed. The textual order maps straight onto
/// minutes, seconds, frames.
fn msf(token: Option<&str>) -> Option<Msf> {
    let mut fields = token?.split(':');
    let minutes = time_field(fields.next()?)?;
    let seconds = time_field(fields.next()?)?;
    let frames = time_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    Some(Msf {
        minutes,
        seconds,
        frames,
    })
}

/// Fixed-width ISRC: 2-char country, 3-char owner, 2-char year, 5-digit
/// serial, 12 characters total.
fn isrc(token: Option<&str>) -> Option<Isrc> {
    let token = token?;
    if token.len() != 12 || !token.is_ascii() {
        return None;
    }
    if !token.as_bytes()[7..].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let serial = token[7..].parse().ok()?;
    Some(Isrc {
        country: token[..2].to_string(),
        owner: token[2..5].to_string(),
        year: token[5..7].to_string(),
        serial,
    })
}

fn flags(line: &TokenLine<'_>) -> TrackFlags {
    let mut flags = TrackFlags::default();
    for n in 1..line.num_tokens() {
        let Some(name) = line.token(n) else {
            break;
        };
        if has_keyword(name, "DCP") {
            flags |= TrackFlags::DCP;
        } else if has_keyword(name, "4CH") {
            flags |= TrackFlags::FOUR_CH;
        } else if has_keyword(name, "PRE") {
            flags |= TrackFlags::PRE;
        } else if has_keyword(name, "SCMS") {
            flags |= TrackFlags::SCMS;
        }
    }
    flags
}

/// Parses an in-memory CUE sheet.
///
/// Never fails: every keyword handler validates its own tokens and a line
/// that does not check out is skipped without touching the model, so the
/// result is at worst a near-empty sheet. Unrecognized keywords are ignored
/// the same way, which keeps real-world sheets with vendor quirks parseable.
pub fn parse(data: &str) -> CueSheet {
    let mut sheet = CueSheet::default();
    let mut lines = Tokenizer::new(data);

    while let Some(line) = lines.next_line() {
        let Some(keyword) = line.token(0) else {
            continue;
        };

        if has_keyword(keyword, "FILE") {
            // FILE <filename> <type>
            let Some(filename) = line.token(1) else {
                continue;
            };
            let Some(file_type) = line.token(2).and_then(file_type) else {
                continue;
            };
            sheet.files.push(CueFile {
                filename: filename.to_string(),
                file_type,
                tracks: Vec::new(),
            });
        } else if has_keyword(keyword, "TRACK") {
            // TRACK <number> <type>
            let Some(file) = sheet.files.last_mut() else {
                continue;
            };
            let Some(number) = number::<u32>(line.token(1)) else {
                continue;
            };
            let Some(track_type) = line.token(2).and_then(track_type) else {
                continue;
            };
            file.tracks.push(Track {
                number,
                track_type,
                flags: TrackFlags::default(),
                pregap: None,
                indices: Vec::new(),
                postgap: None,
                title: None,
                performer: None,
                songwriter: None,
                isrc: None,
            });
        } else if has_keyword(keyword, "INDEX") {
            // INDEX <number> <mm:ss:ff>
            let Some(track) = current_track(&mut sheet) else {
                continue;
            };
            let Some(number) = number::<u32>(line.token(1)) else {
                continue;
            };
            let Some(position) = msf(line.token(2)) else {
                continue;
            };
            track.indices.push(Index { number, position });
        } else if has_keyword(keyword, "PREGAP") {
            // PREGAP <mm:ss:ff>
            let Some(track) = current_track(&mut sheet) else {
                continue;
            };
            let Some(pregap) = msf(line.token(1)) else {
                continue;
            };
            track.pregap = Some(pregap);
        } else if has_keyword(keyword, "POSTGAP") {
            // POSTGAP <mm:ss:ff>
            let Some(track) = current_track(&mut sheet) else {
                continue;
            };
            let Some(postgap) = msf(line.token(1)) else {
                continue;
            };
            track.postgap = Some(postgap);
        } else if has_keyword(keyword, "REM") {
            // REM <tag> <value>, nothing more and nothing less
            if line.num_tokens() != 3 {
                continue;
            }
            let (Some(tag), Some(value)) = (line.token(1), line.token(2)) else {
                continue;
            };
            sheet.comments.push(Comment {
                tag: tag.to_ascii_uppercase(),
                value: value.to_string(),
            });
        } else if has_keyword(keyword, "TITLE") {
            let Some(title) = line.token(1) else {
                continue;
            };
            match context(&sheet) {
                Context::Track => {
                    if let Some(track) = current_track(&mut sheet) {
                        track.title = Some(title.to_string());
                    }
                }
                Context::Sheet | Context::File => sheet.title = Some(title.to_string()),
            }
        } else if has_keyword(keyword, "PERFORMER") {
            let Some(performer) = line.token(1) else {
                continue;
            };
            match context(&sheet) {
                Context::Track => {
                    if let Some(track) = current_track(&mut sheet) {
                        track.performer = Some(performer.to_string());
                    }
                }
                Context::Sheet | Context::File => sheet.performer = Some(performer.to_string()),
            }
        } else if has_keyword(keyword, "SONGWRITER") {
            let Some(songwriter) = line.token(1) else {
                continue;
            };
            match context(&sheet) {
                Context::Track => {
                    if let Some(track) = current_track(&mut sheet) {
                        track.songwriter = Some(songwriter.to_string());
                    }
                }
                Context::Sheet | Context::File => sheet.songwriter = Some(songwriter.to_string()),
            }
        } else if has_keyword(keyword, "ISRC") {
            // ISRC CCOOOYYSSSSS
            let Some(track) = current_track(&mut sheet) else {
                continue;
            };
            let Some(code) = isrc(line.token(1)) else {
                continue;
            };
            track.isrc = Some(code);
        } else if has_keyword(keyword, "FLAGS") {
            // FLAGS [flag1 [flag2 ...]]; unrecognized names are skipped
            let parsed = flags(&line);
            let Some(track) = current_track(&mut sheet) else {
                continue;
            };
            track.flags = parsed;
        } else if has_keyword(keyword, "CATALOG") {
            // CATALOG <number>
            if let Some(catalog) = number::<u64>(line.token(1)) {
                sheet.catalog = Some(catalog);
            }
        } else if has_keyword(keyword, "CDTEXTFILE") {
            // CDTEXTFILE <filename>
            if let Some(cdtextfile) = line.token(1) {
                sheet.cdtextfile = Some(cdtextfile.to_string());
            }
        }
    }

    sheet
}

/// Reads the file at `path` into memory in one go and parses it.
///
/// Only I/O problems surface as errors; malformed sheet content never does.
/// Invalid UTF-8 is replaced rather than rejected, in keeping with the
/// permissive parse.
pub async fn parse_file(path: impl AsRef<Path>) -> CueResult<CueSheet> {
    let data = fs::read(path).await?;
    Ok(parse(&String::from_utf8_lossy(&data)))
}
