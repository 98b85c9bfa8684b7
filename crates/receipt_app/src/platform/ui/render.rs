use receipt_core::{AppViewModel, ExtractionRecord, HistoryView, Screen, Tab};

use super::constants::*;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(navbar(view.active_tab));
    lines.push("=".repeat(RULE_WIDTH));

    if let Some(error) = &view.error_banner {
        lines.push(format!("[!] {error}  (type 'dismiss' to close)"));
        lines.push(String::new());
    }

    match &view.screen {
        Screen::Upload => {
            lines.push("Upload Receipt".to_string());
            lines.push("Upload a screenshot from GPay, PhonePe, or Paytm.".to_string());
            lines.push("Type: upload <path-to-image>".to_string());
        }
        Screen::Result(record) => {
            lines.push("Extracted Details".to_string());
            lines.push("Here's what we found in your receipt.".to_string());
            lines.push(format!("  Amount Paid : {CURRENCY}{}", record.amount));
            lines.push(format!("  UPI ID      : {}", record.upi_id));
            lines.push(format!("  Date        : {}", record.date));
            lines.push("Upload Another ('home') | View History ('history')".to_string());
        }
        Screen::History(history) => {
            lines.push("Payment History".to_string());
            match history {
                HistoryView::Empty => lines.push(format!("  {NO_HISTORY}")),
                HistoryView::Entries(entries) => {
                    lines.extend(entries.iter().map(history_row));
                }
            }
            lines.push("Back to Home ('back')".to_string());
        }
        Screen::Blank => {}
    }

    if view.loading {
        lines.push(String::new());
        lines.push(format!("... {LOADING}"));
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(FOOTER.to_string());
    lines
}

pub fn help() -> Vec<String> {
    [
        "upload <path>  extract details from a payment screenshot",
        "history        show past extractions (re-fetched on every visit)",
        "refresh        re-fetch history without changing the screen",
        "home | back    return to the upload screen",
        "dismiss        close the error banner",
        "quit           exit",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

fn navbar(active: Tab) -> String {
    let tab = |label: &str, tab: Tab| {
        if tab == active {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    };
    format!(
        "{TITLE}  {} {}",
        tab("Upload", Tab::Upload),
        tab("History", Tab::History)
    )
}

fn history_row(record: &ExtractionRecord) -> String {
    format!(
        "  {:<28} {:<14} {CURRENCY}{}",
        record.upi_id, record.date, record.amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(upi_id: &str, amount: &str) -> ExtractionRecord {
        ExtractionRecord::new(amount, upi_id, "01/01/2024")
    }

    #[test]
    fn empty_history_shows_placeholder() {
        let view = AppViewModel {
            screen: Screen::History(HistoryView::Empty),
            active_tab: Tab::History,
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert!(lines.iter().any(|line| line.contains(NO_HISTORY)));
        assert!(lines[0].contains("[History]"));
    }

    #[test]
    fn history_rows_keep_view_model_order() {
        let view = AppViewModel {
            screen: Screen::History(HistoryView::Entries(vec![
                record("c@bank", "3"),
                record("a@bank", "1"),
            ])),
            active_tab: Tab::History,
            ..AppViewModel::default()
        };

        let lines = render(&view);
        let c = lines.iter().position(|l| l.contains("c@bank")).unwrap();
        let a = lines.iter().position(|l| l.contains("a@bank")).unwrap();
        assert!(c < a);
        assert!(!lines.iter().any(|line| line.contains(NO_HISTORY)));
    }

    #[test]
    fn result_shows_amount_with_currency() {
        let view = AppViewModel {
            screen: Screen::Result(record("alice@bank", "250.00")),
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert!(lines.iter().any(|l| l.contains("₹250.00")));
        assert!(lines.iter().any(|l| l.contains("alice@bank")));
        assert!(lines[0].contains("[Upload]"));
    }

    #[test]
    fn banner_and_loading_overlay_are_rendered() {
        let view = AppViewModel {
            loading: true,
            error_banner: Some("blurry image".to_string()),
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert!(lines.iter().any(|l| l.contains("blurry image")));
        assert!(lines.iter().any(|l| l.contains(LOADING)));
    }

    #[test]
    fn blank_screen_renders_only_chrome() {
        let view = AppViewModel {
            screen: Screen::Blank,
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert_eq!(lines.len(), 4);
    }
}
