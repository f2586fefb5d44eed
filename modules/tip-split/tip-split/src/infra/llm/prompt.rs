//! Prompt rendering for tip suggestions.

use tip_split_sdk::SuggestionRequest;

/// Render the instruction sent to the model for one request.
pub fn render(request: &SuggestionRequest) -> String {
    format!(
        "You help diners decide how much to tip at a restaurant.\n\
         \n\
         Read the description of the service and the bill amount below, then \
         suggest a tip percentage expressed as a decimal between 0 and 1 \
         (for example 0.18 for 18%). Give a short explanation for your choice.\n\
         \n\
         Service quality: {service}\n\
         Bill amount: {bill}\n\
         \n\
         Use these ranges as a guide:\n\
         - Exceptional service: 20-25%\n\
         - Good service: 15-20%\n\
         - Average service: 10-15%\n\
         - Poor service: 0-10%",
        service = request.service_quality.trim(),
        bill = request.bill_amount,
    )
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_request_fields() {
        let prompt = render(&SuggestionRequest::new("  Rude and slow  ", 42.5));
        assert!(prompt.contains("Service quality: Rude and slow\n"));
        assert!(prompt.contains("Bill amount: 42.5\n"));
        assert!(prompt.contains("Poor service: 0-10%"));
        assert!(prompt.contains("between 0 and 1"));
    }
}
