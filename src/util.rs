//! Timing helpers shared by the library, the CLI and the benchmarks.

use std::time::{Duration, Instant};

/// RAII timer that logs elapsed time on drop.
///
/// With an item count attached, the log line also carries the throughput:
/// ```ignore
/// let _t = Timed::info("Block bounds").items(boxes.len());
/// // logs "Block bounds: 12.345ms (8000 items, 648.1k/s)" when dropped
/// ```
pub struct Timed {
    name: &'static str,
    start: Instant,
    level: log::Level,
    items: Option<usize>,
}

impl Timed {
    pub fn info(name: &'static str) -> Self {
        Self::at(log::Level::Info, name)
    }

    pub fn debug(name: &'static str) -> Self {
        Self::at(log::Level::Debug, name)
    }

    fn at(level: log::Level, name: &'static str) -> Self {
        log::trace!("{}...", name);
        Self {
            name,
            start: Instant::now(),
            level,
            items: None,
        }
    }

    /// Report throughput for `n` processed items.
    pub fn items(mut self, n: usize) -> Self {
        self.items = Some(n);
        self
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        match self.items {
            Some(n) => log::log!(
                self.level,
                "{}: {:.3?} ({} items, {})",
                self.name,
                elapsed,
                n,
                format_rate(n, elapsed)
            ),
            None => log::log!(self.level, "{}: {:.3?}", self.name, elapsed),
        }
    }
}

/// Human-readable items-per-second.
pub fn format_rate(count: usize, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return "N/A".to_string();
    }
    let per_sec = count as f64 / secs;
    if per_sec >= 1_000_000.0 {
        format!("{:.2}M/s", per_sec / 1_000_000.0)
    } else if per_sec >= 1_000.0 {
        format!("{:.1}k/s", per_sec / 1000.0)
    } else {
        format!("{:.0}/s", per_sec)
    }
}

/// Parse counts such as `4096`, `100k` or `1.5m`.
pub fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();
    let (num_str, multiplier) = if let Some(num) = s.strip_suffix('m') {
        (num, 1_000_000.0)
    } else if let Some(num) = s.strip_suffix('k') {
        (num, 1_000.0)
    } else {
        (s.as_str(), 1.0)
    };

    let n = num_str
        .parse::<f64>()
        .map_err(|e| format!("Invalid number '{}': {}", s, e))?;
    if !(n >= 0.0 && n.is_finite()) {
        return Err(format!("Invalid count '{}'", s));
    }
    Ok((n * multiplier) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4096"), Ok(4096));
        assert_eq!(parse_count("100k"), Ok(100_000));
        assert_eq!(parse_count("1.5M"), Ok(1_500_000));
        assert!(parse_count("abc").is_err());
        assert!(parse_count("-3k").is_err());
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(10, Duration::ZERO), "N/A");
        assert_eq!(format_rate(2_000_000, Duration::from_secs(1)), "2.00M/s");
        assert_eq!(format_rate(1500, Duration::from_secs(1)), "1.5k/s");
        assert_eq!(format_rate(12, Duration::from_secs(2)), "6/s");
    }
}
