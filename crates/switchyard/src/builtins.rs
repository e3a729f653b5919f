use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use switchyard_commands::Metadata;

use crate::help;
use crate::invoke::Outcome;
use crate::registry::{Context, Handler, Registry};

/// Install the engine's built-in handlers. Consumer handlers registered
/// afterwards may override any of them by reusing the handler name.
pub fn install(registry: &mut Registry) -> anyhow::Result<()> {
    registry.register(help_handler()?)?;
    registry.register(log_handler()?)?;
    registry.register(wd_handler()?)?;
    registry.register(verbosity_handler()?)?;
    registry.register(modules_handler()?)?;
    Ok(())
}

fn help_handler() -> anyhow::Result<Handler> {
    let meta = Metadata::describe("print this help")
        .short('?')
        .short('h')
        .long("help")
        .build()?;

    Ok(Handler::new("help", meta, |ctx: Context<'_>| {
        ctx.sink.note(help::render(ctx.registry));
        Ok(Outcome::Ok)
    }))
}

fn log_handler() -> anyhow::Result<Handler> {
    let meta = Metadata::describe("redirect the log to a file")
        .short('l')
        .long("log")
        .optional("path", "path", "file to write the log to", "")
        .build()?;

    Ok(Handler::new("log", meta, |ctx: Context<'_>| {
        let path = ctx.args[0].as_path().context("path argument")?;
        let path = if path.as_os_str().is_empty() {
            default_log_file()?
        } else {
            path.to_path_buf()
        };

        ctx.sink.redirect_to_file(&path)?;
        Ok(Outcome::Ok)
    }))
}

// a blank path means "name the file after the executable"
fn default_log_file() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot determine the executable path")?;
    let stem = exe.file_stem().context("executable has no file name")?;
    Ok(PathBuf::from(stem).with_extension("log"))
}

fn wd_handler() -> anyhow::Result<Handler> {
    let meta = Metadata::describe("set the working directory")
        .long("wd")
        .required("dir", "path", "directory to switch to")
        .build()?;

    Ok(Handler::new("wd", meta, |ctx: Context<'_>| {
        let dir = ctx.args[0].as_path().context("dir argument")?;
        let dir = dir
            .canonicalize()
            .with_context(|| format!("cannot resolve directory '{}'", dir.display()))?;
        std::env::set_current_dir(&dir)
            .with_context(|| format!("cannot change directory to '{}'", dir.display()))?;

        ctx.sink
            .note(format!("working directory: {}", dir.display()));
        Ok(Outcome::Ok)
    }))
}

fn verbosity_handler() -> anyhow::Result<Handler> {
    let meta = Metadata::describe("set which message categories are emitted")
        .short('v')
        .long("verbosity")
        .required("mask", "byte", "bitmask: 1 = note, 2 = warning, 4 = error")
        .build()?;

    Ok(Handler::new("verbosity", meta, |ctx: Context<'_>| {
        let mask = ctx.args[0].as_byte().context("mask argument")?;
        ctx.sink.set_verbosity(mask);
        Ok(Outcome::Ok)
    }))
}

fn modules_handler() -> anyhow::Result<Handler> {
    let meta = Metadata::describe("list the host environment and registered modules")
        .long("modules")
        .build()?;

    Ok(Handler::new("modules", meta, |ctx: Context<'_>| {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        if let Ok(exe) = std::env::current_exe() {
            let _ = writeln!(out, "executable: {}", exe.display());
        }
        let _ = writeln!(
            out,
            "host: {} / {}",
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        for handler in ctx.registry.handlers() {
            let _ = writeln!(out, "module: {}", handler.name());
        }

        ctx.sink.note(out.trim_end().to_string());
        Ok(Outcome::Ok)
    }))
}
