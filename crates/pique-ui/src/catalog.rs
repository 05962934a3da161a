use unicode_segmentation::UnicodeSegmentation;

use crate::error::CatalogError;

/// Supplies the ordered list of selectable reaction symbols.
pub trait ReactionCatalog {
    fn reactions(&self) -> Vec<String>;
}

/// The stock 9-symbol set.
pub struct DefaultReactionCatalog;

impl ReactionCatalog for DefaultReactionCatalog {
    fn reactions(&self) -> Vec<String> {
        ["👍", "❤️", "😂", "😮", "😢", "🙏", "🤣", "👏", "🥰"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Caller-supplied ordered symbol list, validated on construction.
pub struct CustomReactionCatalog {
    reactions: Vec<String>,
}

impl CustomReactionCatalog {
    pub fn new(reactions: Vec<String>) -> Result<Self, CatalogError> {
        if reactions.is_empty() {
            return Err(CatalogError::Empty);
        }
        for r in &reactions {
            if r.graphemes(true).count() != 1 {
                return Err(CatalogError::NotASingleSymbol(r.clone()));
            }
        }
        Ok(CustomReactionCatalog { reactions })
    }
}

impl ReactionCatalog for CustomReactionCatalog {
    fn reactions(&self) -> Vec<String> {
        self.reactions.clone()
    }
}
