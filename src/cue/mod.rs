use crate::cue::error::CueResult;
use crate::cue::models::CueSheet;
use log::debug;
use std::path::PathBuf;

pub mod error;
pub mod models;
mod parser;
mod tokenizer;

pub use parser::{parse, parse_file};

/// Parses the CUE sheet at `cue_path` and prints every populated field,
/// either as indented plain text or as one JSON document.
pub async fn inspect_cue(cue_path: PathBuf, json: bool) -> CueResult<()> {
    debug!("Parsing CUE file: {:?}", cue_path);
    let sheet = parse_file(&cue_path).await?;

    debug!(
        "Parsed {} file(s), {} comment(s)",
        sheet.files.len(),
        sheet.comments.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&sheet)?);
        return Ok(());
    }

    print_sheet(&sheet);
    Ok(())
}

fn print_sheet(sheet: &CueSheet) {
    if let Some(cdtextfile) = &sheet.cdtextfile {
        println!("cdtextfile '{cdtextfile}'");
    }
    if let Some(catalog) = sheet.catalog {
        println!("catalog {catalog}");
    }
    if let Some(title) = &sheet.title {
        println!("title '{title}'");
    }
    if let Some(performer) = &sheet.performer {
        println!("performer '{performer}'");
    }
    if let Some(songwriter) = &sheet.songwriter {
        println!("songwriter '{songwriter}'");
    }

    for file in &sheet.files {
        println!("file '{}' type {}", file.filename, file.file_type);
        for track in &file.tracks {
            println!("- track {} type {}", track.number, track.track_type);
            if let Some(title) = &track.title {
                println!("  title '{title}'");
            }
            if let Some(performer) = &track.performer {
                println!("  performer '{performer}'");
            }
            if let Some(songwriter) = &track.songwriter {
                println!("  songwriter '{songwriter}'");
            }
            if let Some(isrc) = &track.isrc {
                println!("  isrc {isrc}");
            }
            if let Some(pregap) = &track.pregap {
                println!("  pregap {pregap}");
            }
            for index in &track.indices {
                println!(
                    "  - index {} {} (frame {})",
                    index.number,
                    index.position,
                    index.position.to_frames()
                );
            }
            if let Some(postgap) = &track.postgap {
                println!("  postgap {postgap}");
            }
            if !track.flags.is_empty() {
                println!("  flags {}", track.flags);
            }
        }
    }

    for comment in &sheet.comments {
        println!("rem '{}' '{}'", comment.tag, comment.value);
    }
}
