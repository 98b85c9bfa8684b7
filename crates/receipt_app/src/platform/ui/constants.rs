pub const TITLE: &str = "UPI Extractor";
pub const FOOTER: &str = "Built for Accuracy & Speed";
pub const LOADING: &str = "Analyzing Receipt...";
pub const NO_HISTORY: &str = "No history found.";
pub const CURRENCY: &str = "₹";
pub const RULE_WIDTH: usize = 48;
