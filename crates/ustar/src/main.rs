use std::{env, path::Path};

use anyhow::{Context, Result, bail};

mod inspect;
mod overview;

const USAGE: &str = "usage:
    ustar inspect <song.txt>
    ustar overview <song.txt> [width] [height]";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["inspect", path] => inspect::run(&load(path)?),
        ["overview", path, rest @ ..] => {
            let mut options = overview::Options::default();
            if let Some(width) = rest.first() {
                options.width = width.parse().context("width must be a number")?;
            }
            if let Some(height) = rest.get(1) {
                options.height = height.parse().context("height must be a number")?;
            }
            overview::run(&load(path)?, options)
        }
        _ => {
            eprintln!("{USAGE}");
            Ok(())
        }
    }
}

/// A song file's text, with the header tags that matter here.
pub struct SongFile {
    pub body: String,
    pub title: Option<String>,
    pub bpm: Option<f64>,
    pub gap_millis: f64,
}

impl SongFile {
    pub fn parse(body: String) -> Result<Self> {
        let mut title = None;
        let mut bpm = None;
        let mut gap_millis = 0.0;
        for line in body.lines() {
            let Some((tag, value)) = line.strip_prefix('#').and_then(|l| l.split_once(':')) else {
                continue;
            };
            let value = value.trim();
            match tag.trim().to_ascii_uppercase().as_str() {
                "TITLE" => title = Some(value.to_owned()),
                // song files written on some locales use a decimal comma
                "BPM" => {
                    bpm = Some(
                        value
                            .replace(',', ".")
                            .parse()
                            .with_context(|| format!("bad #BPM value {value:?}"))?,
                    )
                }
                "GAP" => {
                    gap_millis = value
                        .replace(',', ".")
                        .parse()
                        .with_context(|| format!("bad #GAP value {value:?}"))?
                }
                _ => {}
            }
        }
        if bpm.is_some_and(|bpm: f64| bpm <= 0.0) {
            bail!("#BPM must be positive");
        }
        Ok(Self {
            body,
            title,
            bpm,
            gap_millis,
        })
    }
}

fn load(path: &str) -> Result<SongFile> {
    let path = Path::new(path);
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read {}", path.display()))?;
    tracing::debug!("read {} bytes from {}", body.len(), path.display());
    SongFile::parse(body).with_context(|| format!("in {}", path.display()))
}
