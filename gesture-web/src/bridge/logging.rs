//! tracing -> browser console
//!
//! Each formatted event is buffered and handed to `console.log` as one line.
//! No timestamps: `SystemTime` is unavailable on wasm32.

use std::cell::RefCell;
use std::io::{self, Write};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, Registry};

use crate::error::{GestureError, Result};

pub struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        web_sys::console::log_1(&line.trim_end().into());
    }
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buffer: Vec::new() }
    }
}

thread_local! {
    static LEVEL_HANDLE: RefCell<Option<reload::Handle<LevelFilter, Registry>>> = RefCell::new(None);
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .parse()
        .map_err(|_| GestureError::Config(format!("unknown log level: {}", level)))
}

/// Install the console subscriber (first call wins)
pub fn init_logging(level: &str) -> Result<()> {
    let filter = parse_level(level)?;
    if LEVEL_HANDLE.with(|h| h.borrow().is_some()) {
        return set_log_level(level);
    }

    let (filter_layer, handle) = reload::Layer::new(filter);
    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(ConsoleMakeWriter)
                .without_time()
                .with_target(false),
        )
        .try_init()
        .is_ok();

    if installed {
        LEVEL_HANDLE.with(|h| *h.borrow_mut() = Some(handle));
    }
    Ok(())
}

/// Change the level of an installed subscriber
pub fn set_log_level(level: &str) -> Result<()> {
    let filter = parse_level(level)?;
    LEVEL_HANDLE.with(|h| match h.borrow().as_ref() {
        Some(handle) => handle
            .modify(|current| *current = filter)
            .map_err(|e| GestureError::Config(e.to_string())),
        None => Ok(()),
    })
}
