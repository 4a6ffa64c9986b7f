use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::NGramError;

/// Dense identifier of an interned token.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u32);

impl TokenId {
	/// Id for position `index`, `None` past `u32::MAX`.
	pub fn from_index(index: usize) -> Option<Self> {
		u32::try_from(index).ok().map(TokenId)
	}
}

/// Set of distinct tokens seen in the corpus.
///
/// Tokens are interned in first-seen order, so ids are dense (`0..len()`).
/// The vocabulary is never pruned: `len()` is always the exact number of
/// distinct tokens observed (V).
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Vocabulary {
	ids: HashMap<String, TokenId>,
	tokens: Vec<String>,
}

impl Vocabulary {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the id of `token`, registering it if unseen.
	///
	/// # Errors
	/// `VocabularyOverflow` once every `TokenId` is taken.
	pub fn intern(&mut self, token: &str) -> Result<TokenId, NGramError> {
		if let Some(id) = self.ids.get(token) {
			return Ok(*id);
		}
		let id = TokenId::from_index(self.tokens.len()).ok_or(NGramError::VocabularyOverflow)?;
		self.tokens.push(token.to_owned());
		self.ids.insert(token.to_owned(), id);
		Ok(id)
	}

	pub fn get(&self, token: &str) -> Option<TokenId> {
		self.ids.get(token).copied()
	}

	/// Returns the text of an interned token.
	///
	/// # Panics
	/// If `id` was not produced by this vocabulary.
	pub fn resolve(&self, id: TokenId) -> &str {
		&self.tokens[id.0 as usize]
	}

	/// Whether `id` was produced by this vocabulary.
	pub fn contains_id(&self, id: TokenId) -> bool {
		(id.0 as usize) < self.tokens.len()
	}

	/// Checks that the lookup map and the id list describe the same tokens.
	pub(crate) fn is_consistent(&self) -> bool {
		self.ids.len() == self.tokens.len()
			&& self
				.tokens
				.iter()
				.enumerate()
				.all(|(i, token)| self.ids.get(token).is_some_and(|id| id.0 as usize == i))
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn interning_is_stable() {
		let mut vocab = Vocabulary::new();
		let a = vocab.intern("a").unwrap();
		let b = vocab.intern("b").unwrap();
		assert_eq!(vocab.intern("a").unwrap(), a);
		assert_ne!(a, b);
		assert_eq!(vocab.len(), 2);
		assert_eq!(vocab.resolve(b), "b");
		assert_eq!(vocab.get("b"), Some(b));
		assert_eq!(vocab.get("c"), None);
		assert!(vocab.contains_id(b));
		assert!(!vocab.contains_id(TokenId(2)));
		assert!(vocab.is_consistent());
	}

	#[test]
	#[cfg(target_pointer_width = "64")]
	fn ids_stop_at_u32_range() {
		assert_eq!(TokenId::from_index(7), Some(TokenId(7)));
		assert_eq!(TokenId::from_index(u32::MAX as usize), Some(TokenId(u32::MAX)));
		assert_eq!(TokenId::from_index(u32::MAX as usize + 1), None);
	}
}
