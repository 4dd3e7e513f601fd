//! Interactive start-time entry for history replay
//!
//! The user is asked for month, day, hour and minute; every component they
//! leave blank or mistype falls back to the current local value, and the
//! year is always the current one. Only a combination that does not form a
//! valid local time (such as February 31st) aborts, in which case the
//! caller falls back to the live feed.

use chrono::{DateTime, Datelike, Local, SecondsFormat, TimeZone, Timelike, Utc};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Ask for a start time on stdin, as a UTC ISO-8601 string
///
/// Returns `None` when the entered components do not form a valid time.
pub fn prompt_start_time() -> Option<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_start_time_from(&mut input, &mut output, Local::now())
}

fn prompt_start_time_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    now: DateTime<Local>,
) -> Option<String> {
    let _ = writeln!(output, "Please enter a date and time to replay from.");
    let _ = writeln!(output, "Empty values will be filled with the current time.");

    let month = read_component(input, output, "month", now.month());
    let day = read_component(input, output, "day", now.day());
    let hour = read_component(input, output, "hour", now.hour());
    let minute = read_component(input, output, "minute", now.minute());

    let start = match Local
        .with_ymd_and_hms(now.year(), month, day, hour, minute, 0)
        .earliest()
    {
        Some(start) => start,
        None => {
            warn!(month, day, hour, minute, "Entered components do not form a valid time");
            return None;
        }
    };

    Some(
        start
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// Read one numeric component, falling back to `default` on blank or
/// unparsable input
fn read_component<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: u32,
) -> u32 {
    let _ = write!(output, "{} [{}]: ", label, default);
    let _ = output.flush();

    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return default;
    }
    line.trim().parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2016, 3, 1, 20, 30, 0)
            .earliest()
            .unwrap()
    }

    fn run(input: &str) -> Option<String> {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        prompt_start_time_from(&mut reader, &mut output, fixed_now())
    }

    #[test]
    fn test_prompt_explains_itself() {
        let mut reader = Cursor::new(b"\n\n\n\n".to_vec());
        let mut output = Vec::new();
        prompt_start_time_from(&mut reader, &mut output, fixed_now());

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with("Please enter a date and time"));
        assert!(printed.contains("Empty values will be filled with the current time"));
        assert!(printed.contains("month [3]:"));
    }

    #[test]
    fn test_explicit_components() {
        let ts = run("2\n14\n8\n15\n").unwrap();
        let parsed = DateTime::parse_from_rfc3339(&ts).unwrap();

        let expected = Local
            .with_ymd_and_hms(2016, 2, 14, 8, 15, 0)
            .earliest()
            .unwrap();
        assert_eq!(parsed.with_timezone(&Utc), expected.with_timezone(&Utc));
    }

    #[test]
    fn test_blank_and_invalid_fall_back_to_now() {
        // Blank month, garbage day, blank hour and minute
        let ts = run("\nnot-a-number\n\n\n").unwrap();
        let parsed = DateTime::parse_from_rfc3339(&ts).unwrap();

        assert_eq!(parsed.with_timezone(&Utc), fixed_now().with_timezone(&Utc));
    }

    #[test]
    fn test_impossible_date_aborts() {
        assert!(run("2\n31\n\n\n").is_none());
    }

    #[test]
    fn test_exhausted_input_falls_back_to_now() {
        let ts = run("").unwrap();
        let parsed = DateTime::parse_from_rfc3339(&ts).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), fixed_now().with_timezone(&Utc));
    }

    #[test]
    fn test_output_is_utc_seconds_precision() {
        let ts = run("\n\n\n\n").unwrap();
        assert!(ts.ends_with('Z'));
        assert!(!ts.contains('.'));
    }
}
