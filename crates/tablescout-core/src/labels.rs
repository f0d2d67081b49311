//! Label search — locate the caption string that seeds detection.
//!
//! Callers hand the matched node's bounds straight to the detector as the
//! anchor. Matching runs against each node's NFKC-normalized text; reading
//! order (top-to-bottom, then left-to-right) decides which match is first.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::geometry::RectBounds;
use crate::text::TextNode;

/// Options controlling label search behavior.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelSearchOptions {
    /// Whether to interpret the pattern as a regex (default: `true`).
    /// When `false`, the pattern is treated as a literal string.
    pub regex: bool,
    /// Whether the search is case-sensitive (default: `false` — spoken
    /// references arrive in arbitrary casing).
    pub case_sensitive: bool,
}

impl Default for LabelSearchOptions {
    fn default() -> Self {
        Self {
            regex: true,
            case_sensitive: false,
        }
    }
}

/// A label match with the node it was found in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelMatch {
    /// Index of the matched node in the input slice.
    pub node_index: usize,
    /// The matched text (from the normalized node text).
    pub text: String,
    /// The matched node's bounds — the anchor for detection.
    pub bounds: RectBounds,
}

/// Find the first label matching `pattern`, in reading order.
///
/// An invalid regex yields no matches rather than an error.
pub fn find_label(
    nodes: &[TextNode],
    pattern: &str,
    options: &LabelSearchOptions,
) -> Option<LabelMatch> {
    find_all_labels(nodes, pattern, options).into_iter().next()
}

/// Find every label matching `pattern`, in reading order.
pub fn find_all_labels(
    nodes: &[TextNode],
    pattern: &str,
    options: &LabelSearchOptions,
) -> Vec<LabelMatch> {
    if nodes.is_empty() || pattern.is_empty() {
        return Vec::new();
    }

    let base = if options.regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };
    let full = if options.case_sensitive {
        base
    } else {
        format!("(?i){base}")
    };
    let Ok(re) = Regex::new(&full) else {
        return Vec::new();
    };

    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| {
        let (na, nb) = (&nodes[a].bounds, &nodes[b].bounds);
        na.top
            .partial_cmp(&nb.top)
            .unwrap()
            .then_with(|| na.left.partial_cmp(&nb.left).unwrap())
    });

    let mut matches = Vec::new();
    for i in order {
        let normalized: String = nodes[i].text.nfkc().collect();
        if let Some(m) = re.find(&normalized) {
            matches.push(LabelMatch {
                node_index: i,
                text: m.as_str().to_string(),
                bounds: nodes[i].bounds,
            });
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(text: &str, x: f64, y: f64) -> TextNode {
        TextNode::new(text, RectBounds::new(x, y, 60.0, 12.0))
    }

    #[test]
    fn finds_first_in_reading_order() {
        // Stored out of order; reading order is by position, not index.
        let nodes = vec![
            node("Table 2. Results", 40.0, 500.0),
            node("Table 1. Methods", 40.0, 100.0),
        ];
        let m = find_label(&nodes, r"Table \d", &LabelSearchOptions::default()).unwrap();
        assert_eq!(m.node_index, 1);
        assert_eq!(m.text, "Table 1");
        assert_eq!(m.bounds.top, 100.0);
    }

    #[test]
    fn literal_mode_escapes_metacharacters() {
        let nodes = vec![node("Figure (a)", 40.0, 100.0)];
        let options = LabelSearchOptions {
            regex: false,
            ..LabelSearchOptions::default()
        };
        let m = find_label(&nodes, "Figure (a)", &options).unwrap();
        assert_eq!(m.text, "Figure (a)");
    }

    #[test]
    fn case_insensitive_by_default() {
        let nodes = vec![node("TABLE 3", 40.0, 100.0)];
        assert!(find_label(&nodes, "table 3", &LabelSearchOptions::default()).is_some());

        let strict = LabelSearchOptions {
            case_sensitive: true,
            ..LabelSearchOptions::default()
        };
        assert!(find_label(&nodes, "table 3", &strict).is_none());
    }

    #[test]
    fn nfkc_normalization_applies() {
        // Fullwidth digits normalize to ASCII under NFKC.
        let nodes = vec![node("Table １", 40.0, 100.0)];
        assert!(find_label(&nodes, r"Table 1", &LabelSearchOptions::default()).is_some());
    }

    #[test]
    fn invalid_regex_yields_no_matches() {
        let nodes = vec![node("Table 1", 40.0, 100.0)];
        assert!(find_label(&nodes, "Table (", &LabelSearchOptions::default()).is_none());
    }

    #[test]
    fn find_all_returns_every_match() {
        let nodes = vec![
            node("Table 1", 40.0, 100.0),
            node("no match", 40.0, 200.0),
            node("Table 2", 40.0, 300.0),
        ];
        let all = find_all_labels(&nodes, r"Table \d", &LabelSearchOptions::default());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].node_index, 0);
        assert_eq!(all[1].node_index, 2);
    }
}
