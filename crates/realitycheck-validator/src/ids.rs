//! Record identifier formats

use regex::Regex;
use std::sync::LazyLock;

/// `DOMAIN-YYYY-NNN`
pub static CLAIM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+-\d{4}-\d{3}$").unwrap());

/// `CHAIN-YYYY-NNN`
pub static CHAIN_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CHAIN-\d{4}-\d{3}$").unwrap());

/// Whether `id` is a well-formed claim ID
pub fn is_claim_id(id: &str) -> bool {
    CLAIM_ID_RE.is_match(id)
}

/// Whether `id` is a well-formed chain ID
pub fn is_chain_id(id: &str) -> bool {
    CHAIN_ID_RE.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_ids() {
        assert!(is_claim_id("TECH-2026-001"));
        assert!(is_claim_id("RESOURCE-1999-999"));
        assert!(!is_claim_id("tech-2026-001"));
        assert!(!is_claim_id("TECH-26-001"));
        assert!(!is_claim_id("TECH-2026-0001"));
        assert!(!is_claim_id("TECH-2026-001\n"));
    }

    #[test]
    fn test_chain_ids() {
        assert!(is_chain_id("CHAIN-2026-001"));
        assert!(!is_chain_id("TECH-2026-001"));
    }
}
