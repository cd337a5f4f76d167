//! Scrolling text across the chain.
//!
//! A scroll is a fixed number of ticks. On every tick the buffer moves one column to the left
//! and the visible window is flushed to the chain. Whenever the previous glyph has moved fully
//! into view, the next one is staged just right of the visible window. After the last glyph the
//! scroll keeps going until the whole chain is blank again.

use core::str::Chars;
use core::sync::atomic::{AtomicBool, Ordering};

use hal::blocking::delay::DelayMs;
use log::{debug, trace};

use crate::display::buffer::{ColumnBuffer, MODULE_COLS};
use crate::display::Display;
use crate::font::GlyphSource;
use crate::interface::DisplayInterface;
use crate::Error;

/// Progress of a `Scroll`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollState {
    Scrolling,
    Done,
}

/// How a blocking scroll ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEnd {
    Completed,
    Cancelled,
}

/// Columns a glyph occupies in the staging zone, including its trailing gap. Glyphs wider than
/// the staging zone are cut down to fit.
fn staged_width(glyph: &[u8]) -> usize {
    glyph.len().min(MODULE_COLS - 1) + 1
}

/// A scroll in progress. Created by `Display::scroll`, it holds the display until it is
/// dropped.
///
/// Each call to `tick` advances the scroll by one column and returns `WouldBlock` until the
/// last tick, so the caller decides how long a tick lasts and what else runs between ticks:
///
/// ```ignore
/// let mut scroll = display.scroll("Hello", StandardFont)?;
/// while let Err(nb::Error::WouldBlock) = scroll.tick() {
///     delay.delay_ms(50u16);
/// }
/// ```
pub struct Scroll<'d, 't, DI, F>
where
    DI: DisplayInterface,
    F: GlyphSource,
{
    display: &'d mut Display<DI>,
    font: F,
    text: Chars<'t>,
    total_ticks: usize,
    ticks_done: usize,
    next_glyph_in: usize,
}

impl<'d, 't, DI, F> Scroll<'d, 't, DI, F>
where
    DI: DisplayInterface,
    F: GlyphSource,
{
    /// Number of ticks the whole scroll takes.
    pub fn total_ticks(&self) -> usize {
        self.total_ticks
    }

    pub fn remaining_ticks(&self) -> usize {
        self.total_ticks - self.ticks_done
    }

    pub fn state(&self) -> ScrollState {
        if self.ticks_done < self.total_ticks {
            ScrollState::Scrolling
        } else {
            ScrollState::Done
        }
    }

    /// The buffer being scrolled.
    pub fn buffer(&self) -> &ColumnBuffer {
        &self.display.buffer
    }

    /// Advance by one column and flush the visible window. Returns `Ok` once the final tick has
    /// been flushed, and on every call after that.
    pub fn tick(&mut self) -> nb::Result<(), Error<DI::Error>> {
        if self.state() == ScrollState::Done {
            return Ok(());
        }

        self.next_glyph_in = self.next_glyph_in.saturating_sub(1);
        if self.next_glyph_in == 0 {
            let font = &self.font;
            if let Some(glyph) = self.text.by_ref().find_map(|c| font.glyph(c)) {
                let width = staged_width(glyph);
                let buffer = &mut self.display.buffer;
                let start = buffer.staging_start() as isize;
                buffer.write_at(start, &glyph[..width - 1]);
                buffer.write_at(start + width as isize - 1, &[0]);
                self.next_glyph_in = width;
            }
        }

        self.display.buffer.shift_left();
        self.ticks_done += 1;
        trace!("scroll tick {}/{}", self.ticks_done, self.total_ticks);
        self.display.flush().map_err(nb::Error::Other)?;

        if self.state() == ScrollState::Done {
            // Only the left staging zone can still hold columns, and it is never shown.
            self.display.buffer.clear();
            debug!("scroll done after {} ticks", self.total_ticks);
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Start scrolling `text` from the right edge of the chain. The buffer and the chain are
    /// blanked immediately; nothing else is sent until the first `Scroll::tick`. Characters
    /// `font` cannot draw are skipped and take up no time.
    pub fn scroll<'d, 't, F>(
        &'d mut self,
        text: &'t str,
        font: F,
    ) -> Result<Scroll<'d, 't, DI, F>, Error<DI::Error>>
    where
        F: GlyphSource,
    {
        self.buffer.clear();
        self.clear_all()?;
        let glyph_cols: usize = text
            .chars()
            .filter_map(|c| font.glyph(c))
            .map(staged_width)
            .sum();
        let total_ticks = glyph_cols + self.num_modules() * MODULE_COLS;
        debug!("scroll start: {} ticks", total_ticks);
        Ok(Scroll {
            display: self,
            font,
            text: text.chars(),
            total_ticks,
            ticks_done: 0,
            next_glyph_in: 1,
        })
    }

    /// Scroll `text` across the chain and wait for it to finish, pausing `tick_ms` after every
    /// column and `end_ms` after the chain has gone blank.
    pub fn scroll_text<F, D>(
        &mut self,
        text: &str,
        font: F,
        tick_ms: u16,
        end_ms: u16,
        delay: &mut D,
    ) -> Result<(), Error<DI::Error>>
    where
        F: GlyphSource,
        D: DelayMs<u16>,
    {
        let scroll = self.scroll(text, font)?;
        run(scroll, tick_ms, end_ms, delay, None).map(|_| ())
    }

    /// Like `scroll_text`, but checks `cancel` before every tick and stops as soon as it is set.
    /// A cancelled scroll leaves the last flushed frame on the chain and skips the final pause.
    pub fn scroll_text_cancellable<F, D>(
        &mut self,
        text: &str,
        font: F,
        tick_ms: u16,
        end_ms: u16,
        delay: &mut D,
        cancel: &AtomicBool,
    ) -> Result<ScrollEnd, Error<DI::Error>>
    where
        F: GlyphSource,
        D: DelayMs<u16>,
    {
        let scroll = self.scroll(text, font)?;
        run(scroll, tick_ms, end_ms, delay, Some(cancel))
    }
}

fn run<DI, F, D>(
    mut scroll: Scroll<DI, F>,
    tick_ms: u16,
    end_ms: u16,
    delay: &mut D,
    cancel: Option<&AtomicBool>,
) -> Result<ScrollEnd, Error<DI::Error>>
where
    DI: DisplayInterface,
    F: GlyphSource,
    D: DelayMs<u16>,
{
    loop {
        if cancel.map_or(false, |c| c.load(Ordering::Relaxed)) {
            debug!("scroll cancelled, {} ticks left", scroll.remaining_ticks());
            return Ok(ScrollEnd::Cancelled);
        }
        match scroll.tick() {
            Ok(()) => break,
            Err(nb::Error::WouldBlock) => delay.delay_ms(tick_ms),
            Err(nb::Error::Other(e)) => return Err(e),
        }
    }
    delay.delay_ms(tick_ms);
    delay.delay_ms(end_ms);
    Ok(ScrollEnd::Completed)
}
