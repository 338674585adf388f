//! Outcome printing shared by `fetch` and `get`.

use anyhow::Result;
use imgbatch_core::{DownloadOutcome, OutcomeReport};

/// Prints outcomes in input order and returns how many failed.
pub fn print_outcomes(outcomes: &[DownloadOutcome], json: bool) -> Result<usize> {
    let reports: Vec<OutcomeReport> = outcomes.iter().map(OutcomeReport::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for line in reports.iter().map(format_line) {
            println!("{}", line);
        }
    }
    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    tracing::info!(total = outcomes.len(), failed, "report printed");
    Ok(failed)
}

pub fn format_line(r: &OutcomeReport) -> String {
    match (&r.error_kind, &r.error) {
        (Some(kind), Some(msg)) => format!(
            "{:<4} {:<10} {}  {}",
            "FAIL",
            kind.as_str(),
            r.source_url,
            msg
        ),
        _ => format!(
            "{:<4} {:>5}x{:<5} {}  {}",
            "OK",
            r.width,
            r.height,
            r.source_url,
            r.file_path.as_deref().unwrap_or("-")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgbatch_core::ErrorKind;

    fn report() -> OutcomeReport {
        OutcomeReport {
            source_url: "http://h/a.png".into(),
            file_path: Some("/d/a.png".into()),
            width: 10,
            height: 20,
            format: Some("png".into()),
            bytes_written: 99,
            error_kind: None,
            error: None,
        }
    }

    #[test]
    fn ok_line() {
        let line = format_line(&report());
        assert!(line.starts_with("OK"));
        assert!(line.contains("10x20"));
        assert!(line.ends_with("/d/a.png"));
    }

    #[test]
    fn fail_line() {
        let mut r = report();
        r.error_kind = Some(ErrorKind::Network);
        r.error = Some("network: unexpected status code: HTTP 404".into());
        let line = format_line(&r);
        assert!(line.starts_with("FAIL"));
        assert!(line.contains("network"));
        assert!(line.contains("HTTP 404"));
    }
}
