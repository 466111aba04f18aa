use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::*;
use mask_tint::ColorChoice;
use mask_tint::TintError;
use mask_tint::helper::resolve_full_path;
use mask_tint::image_io::{DEFAULT_COMPOSITE_OUTPUT, DEFAULT_MASK_OUTPUT};
use mask_tint::session::Session;

const HELP: &str = "\
commands:
  mask <path>             load the grayscale+alpha mask
  base <path>             load the base image
  color <color>           set the tint (#RRGGBB, r,g,b or a preset name)
  red|green|blue <0-255>  set one channel
  apply                   recompute the blend now (it is also redone after
                          every change once a mask and base are loaded)
  save-mask [path]        save the tinted mask
  save-base [path]        save the masked base
  status                  show what is loaded
  quit";

#[derive(Debug, PartialEq)]
enum Command {
    Mask(PathBuf),
    Base(PathBuf),
    Color(ColorChoice),
    Channel(String, i64),
    Apply,
    SaveMask(PathBuf),
    SaveBase(PathBuf),
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let path_arg = |what: &str| -> Result<PathBuf> {
        if rest.is_empty() {
            bail!("'{verb}' needs a {what}");
        }
        Ok(PathBuf::from(rest))
    };

    let command = match verb {
        "mask" => Command::Mask(path_arg("path")?),
        "base" => Command::Base(path_arg("path")?),
        "color" => Command::Color(rest.parse()?),
        "red" | "green" | "blue" => {
            let value = rest
                .parse::<i64>()
                .with_context(|| format!("'{rest}' is not an integer"))?;
            Command::Channel(verb.to_string(), value)
        }
        "apply" => Command::Apply,
        "save-mask" if rest.is_empty() => Command::SaveMask(PathBuf::from(DEFAULT_MASK_OUTPUT)),
        "save-mask" => Command::SaveMask(PathBuf::from(rest)),
        "save-base" if rest.is_empty() => {
            Command::SaveBase(PathBuf::from(DEFAULT_COMPOSITE_OUTPUT))
        }
        "save-base" => Command::SaveBase(PathBuf::from(rest)),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(Some(command))
}

/// Recompute when a mask is present; without one there is nothing to show yet.
/// A base of the wrong size still leaves the tinted mask updated.
fn refresh(session: &mut Session) -> Result<()> {
    if session.mask().is_some() {
        session.recompute()?;
    }
    Ok(())
}

fn execute(session: &mut Session, command: Command, out: &mut impl Write) -> Result<bool> {
    match command {
        Command::Mask(path) => {
            session.load_mask(&resolve_full_path(&path))?;
            refresh(session)?;
        }
        Command::Base(path) => {
            session.load_base(&resolve_full_path(&path))?;
            refresh(session)?;
        }
        Command::Color(color) => {
            session.set_color(color);
            refresh(session)?;
        }
        Command::Channel(channel, value) => {
            session.set_channel(&channel, value)?;
            refresh(session)?;
        }
        Command::Apply => {
            if !session.can_apply() {
                return Err(TintError::MissingInput("mask and base image").into());
            }
            session.recompute()?;
        }
        Command::SaveMask(path) => {
            session.save_tinted(&path)?;
            writeln!(out, "Mask saved as {}", path.display())?;
        }
        Command::SaveBase(path) => {
            session.save_composited(&path)?;
            writeln!(out, "Masked base image saved as {}", path.display())?;
        }
        Command::Status => {}
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }
    write_status(session, out)?;
    Ok(true)
}

fn write_status(session: &Session, out: &mut impl Write) -> Result<()> {
    let dims = |d: Option<(u32, u32)>| match d {
        Some((w, h)) => format!("{w}x{h}"),
        None => "-".to_string(),
    };
    writeln!(
        out,
        "color {} | mask {} | base {} | tinted {} | composited {}",
        session.color(),
        dims(session.mask().map(|m| m.dimensions())),
        dims(session.base().map(|b| b.dimensions())),
        if session.tinted().is_some() { "yes" } else { "no" },
        if session.composited().is_some() { "yes" } else { "no" },
    )?;
    Ok(())
}

fn drive(input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut session = Session::new();
    for line in input.lines() {
        let line = line?;
        let outcome = parse_command(&line).and_then(|command| match command {
            Some(command) => execute(&mut session, command, out),
            None => Ok(true),
        });
        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => writeln!(out, "{} {:#}", "error:".red(), e)?,
        }
        out.flush()?;
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{HELP}")?;
    drive(stdin.lock(), &mut stdout)
}
