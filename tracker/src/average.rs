//! Trailing moving average over a fixed-size window

use crate::error::ReportError;

/// Window size used when neither the config nor the command line sets one.
pub const DEFAULT_WINDOW: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than `window` values seen; the average covers all of them.
    WarmingUp,
    /// The buffer is full; the average covers exactly the last `window` values.
    SteadyState,
}

/// Moving average over the last `window` consumed values.
///
/// Until the buffer fills up, `consume` returns the mean of everything seen so
/// far. Once full, each new value overwrites the oldest slot and the sum is
/// recomputed from the buffer rather than adjusted incrementally, so rounding
/// error does not accumulate over long series.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    buffer: Vec<f64>,
    window: usize,
    cursor: usize,
    count: usize,
    sum: f64,
}

impl MovingAverage {
    pub fn new(window: i64) -> Result<Self, ReportError> {
        let size = usize::try_from(window)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ReportError::InvalidParameter(window))?;
        Ok(Self {
            buffer: Vec::new(),
            window: size,
            cursor: 0,
            count: 0,
            sum: 0.0,
        })
    }

    /// Feeds the next value in time order and returns the current average.
    pub fn consume(&mut self, value: f64) -> f64 {
        if self.count < self.window {
            self.buffer.push(value);
            self.sum += value;
            self.count += 1;
            return self.sum / self.count as f64;
        }

        self.buffer[self.cursor] = value;
        self.cursor = (self.cursor + 1) % self.window;
        self.count += 1;
        self.sum = self.buffer.iter().sum();
        self.sum / self.window as f64
    }

    pub fn phase(&self) -> Phase {
        if self.count < self.window {
            Phase::WarmingUp
        } else {
            Phase::SteadyState
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn consumed(&self) -> usize {
        self.count
    }
}
