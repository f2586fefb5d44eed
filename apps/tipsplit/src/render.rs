//! Human and JSON renderings of command results.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{Value, json};
use tip_split::SuggestionNotice;
use tip_split_sdk::{BillInput, BillResult, SuggestionResult};

use crate::format::{format_currency, format_percent};

pub fn split_json(input: &BillInput, result: &BillResult) -> Value {
    json!({
        "input": input,
        "result": result,
        "formatted": {
            "tipAmount": format_currency(result.tip_amount),
            "totalAmount": format_currency(result.total_amount),
            "amountPerPerson": format_currency(result.amount_per_person),
        }
    })
}

pub fn suggestion_json(suggestion: &SuggestionResult) -> Value {
    json!({
        "suggestedTipPercentage": suggestion.suggested_tip_percentage,
        "tipPercentage": suggestion.as_tip_percentage(),
        "reasoning": suggestion.reasoning,
    })
}

pub fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

pub fn print_split(input: &BillInput, result: &BillResult) {
    let total_note = if input.round_total { " (rounded)" } else { "" };

    println!("  Bill:        {}", format_currency(input.bill_amount));
    println!(
        "  Tip:         {} ({})",
        format_currency(result.tip_amount),
        format_percent(input.tip_percentage)
    );
    println!(
        "  Total:       {}{}",
        format_currency(result.total_amount).bold(),
        total_note.dimmed()
    );
    println!("  People:      {}", input.party_size);
    println!(
        "  Per person:  {}",
        format_currency(result.amount_per_person).green().bold()
    );
}

pub fn print_notice(notice: &SuggestionNotice) {
    let title = if notice.is_failure() {
        notice.title().red().bold()
    } else {
        notice.title().green().bold()
    };
    println!("{title} {}", notice.description());
}

pub fn print_suggestion(suggestion: &SuggestionResult) {
    println!(
        "  Suggested tip: {}",
        format_percent(suggestion.as_tip_percentage()).bold()
    );
    println!("  Reasoning:     {}", suggestion.reasoning.dimmed());
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn split_json_carries_raw_and_formatted_amounts() {
        let input = BillInput::new(49.5, 15.0, 3, true);
        let result = BillResult {
            tip_amount: 7.5,
            total_amount: 57.0,
            amount_per_person: 19.0,
        };

        let value = split_json(&input, &result);

        assert_eq!(value["input"]["partySize"], 3);
        assert_eq!(value["input"]["roundTotal"], true);
        assert_eq!(value["result"]["totalAmount"], 57.0);
        assert_eq!(value["formatted"]["tipAmount"], "$7.50");
        assert_eq!(value["formatted"]["amountPerPerson"], "$19.00");
    }

    #[test]
    fn suggestion_json_includes_input_scale() {
        let value = suggestion_json(&SuggestionResult {
            suggested_tip_percentage: 0.2,
            reasoning: "Good".to_owned(),
        });
        assert_eq!(value["tipPercentage"], 20.0);
        assert_eq!(value["reasoning"], "Good");
    }
}
