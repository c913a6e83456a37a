// src/extractors/form4.rs

use crate::utils::error::ExtractError;
use roxmltree::{Document, Node};

// --- Constants ---
// Transaction code "A" marks an acquisition; everything else (dispositions,
// grants coded otherwise) is filtered out.
const ACQUISITION_CODE: &str = "A";

// Flag formats observed in EDGAR Form 4 bodies. Treated as a fixed literal
// set; anything else is falsy.
const TRUTHY_TOKENS: [&str; 3] = ["1", "true", "True"];

// Both transaction collections in an ownershipDocument are scanned.
const TRANSACTION_TABLES: [&str; 2] = ["nonDerivativeTransaction", "derivativeTransaction"];

// Role flags contribute their label in this declared order, after the
// officer title.
const ROLE_FLAGS: [(&str, &str); 3] = [
    ("isDirector", "Director"),
    ("isOfficer", "Officer"),
    ("isTenPercentOwner", "10% Owner"),
];

// --- Data Structures ---

/// Identity fields of one Form 4 filing. Fields missing from the source
/// document default to empty strings; identity gaps never fail extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFiling {
    pub issuer: String,
    pub ticker: String,
    pub owner: String,
    pub role: String,
}

/// One acquisition-coded transaction with both amounts present.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub code: String,
    pub shares: f64,
    pub price: f64,
}

/// Parses a Form 4 XML body into the filing's identity plus its
/// acquisition transactions.
///
/// Only an unparseable document is an error. Within a parseable document,
/// per-entry problems (missing code, empty or non-numeric amounts) drop
/// that entry and the scan continues.
pub fn parse_form4(body: &str) -> Result<(ParsedFiling, Vec<TransactionRecord>), ExtractError> {
    let doc = Document::parse(body)?;
    let root = doc.root();

    let filing = ParsedFiling {
        issuer: find_text(root, "issuerName").unwrap_or_default(),
        ticker: find_text(root, "issuerTradingSymbol").unwrap_or_default(),
        owner: find_text(root, "rptOwnerName").unwrap_or_default(),
        role: parse_role(root),
    };

    let transactions = parse_transactions(root);

    Ok((filing, transactions))
}

/// Builds the role string from the reportingOwnerRelationship block:
/// officer title first (when non-empty), then one label per affirmative
/// flag, semicolon-joined.
fn parse_role(root: Node) -> String {
    let Some(rel) = root
        .descendants()
        .find(|n| n.has_tag_name("reportingOwnerRelationship"))
    else {
        return String::new();
    };

    let mut bits = Vec::new();
    if let Some(title) = find_text(rel, "officerTitle") {
        if !title.is_empty() {
            bits.push(title);
        }
    }
    for (tag, label) in ROLE_FLAGS {
        let affirmative = find_text(rel, tag)
            .is_some_and(|flag| TRUTHY_TOKENS.contains(&flag.as_str()));
        if affirmative {
            bits.push(label.to_string());
        }
    }

    bits.join("; ")
}

/// Scans both transaction tables and keeps acquisition entries whose share
/// count and price are both present and non-zero.
fn parse_transactions(root: Node) -> Vec<TransactionRecord> {
    let mut transactions = Vec::new();
    for table in TRANSACTION_TABLES {
        for entry in root.descendants().filter(|n| n.has_tag_name(table)) {
            match parse_transaction(entry) {
                Some(tx) => transactions.push(tx),
                None => tracing::trace!("Dropped non-qualifying {} entry", table),
            }
        }
    }
    transactions
}

fn parse_transaction(entry: Node) -> Option<TransactionRecord> {
    let code = find_text(entry, "transactionCode")?;
    let shares = find_amount(entry, "transactionShares")?;
    let price = find_amount(entry, "transactionPricePerShare")?;

    if code == ACQUISITION_CODE && shares != 0.0 && price != 0.0 {
        Some(TransactionRecord { code, shares, price })
    } else {
        None
    }
}

/// Trimmed text content of the first descendant with the given tag, or
/// `None` if the element is absent. Text is gathered across nested children
/// since EDGAR wraps amounts in `<value>` elements.
fn find_text(scope: Node, tag: &str) -> Option<String> {
    let node = scope.descendants().find(|n| n.has_tag_name(tag))?;
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    Some(text.trim().to_string())
}

/// Numeric field lookup: empty or absent text is "absent" (never zero), and
/// non-numeric text drops the entry rather than aborting extraction.
fn find_amount(scope: Node, tag: &str) -> Option<f64> {
    let text = find_text(scope, tag)?;
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!("Non-numeric {} value '{}', entry skipped", tag, text);
            None
        }
    }
}
