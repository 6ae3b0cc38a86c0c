// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Log capture for tests asserting on emitted diagnostics.
use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;

/// Runs `action` under a scoped subscriber and returns its result together
/// with everything it logged.
pub(crate) fn capture_logs<T,>(action: impl FnOnce() -> T,) -> (T, String,)
{
    let buffer = Arc::new(Mutex::new(Vec::new(),),);
    let sink = Arc::clone(&buffer,);
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false,)
        .with_max_level(Level::DEBUG,)
        .with_writer(move || LogBuffer(Arc::clone(&sink,),),)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, action,);
    let logs = String::from_utf8_lossy(&buffer.lock().expect("log buffer poisoned",),).into_owned();
    (result, logs,)
}

struct LogBuffer(Arc<Mutex<Vec<u8,>,>,>,);

impl io::Write for LogBuffer
{
    fn write(&mut self, buf: &[u8],) -> io::Result<usize,>
    {
        self.0.lock().expect("log buffer poisoned",).extend_from_slice(buf,);
        Ok(buf.len(),)
    }

    fn flush(&mut self,) -> io::Result<(),>
    {
        Ok((),)
    }
}
