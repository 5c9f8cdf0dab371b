use serde::{Deserialize, Serialize};

/// Static company text printed in the header band and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    pub brand_name: String,
    /// Right-aligned in the header band.
    pub subtitle: String,
    /// Footer line 1, after the brand name.
    pub tagline: String,
    /// Footer line 2, left.
    pub contact: String,
    /// Footer line 2, right.
    pub website: String,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            brand_name: "RAPHEX".to_string(),
            subtitle: "SHIPPING LABEL".to_string(),
            tagline: "Global Shipping Solutions".to_string(),
            contact: "support@raphex.com | +1 (800) 555-0100".to_string(),
            website: "www.raphex.com".to_string(),
        }
    }
}
