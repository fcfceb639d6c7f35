use super::error::ValidationError;

/// Categories offered on first launch
pub const DEFAULT_CATEGORIES: &[&str] = &["Ders Çalışma", "Kodlama", "Proje", "Kitap Okuma"];

/// Ordered, case-insensitively unique list of category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryList {
    names: Vec<String>,
}

impl Default for CategoryList {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CategoryList {
    pub fn with_defaults() -> Self {
        Self {
            names: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build from a stored list, dropping blanks and duplicates.
    /// An empty result falls back to the defaults.
    pub fn from_stored(stored: Vec<String>) -> Self {
        let mut list = Self { names: Vec::new() };
        for name in stored {
            let _ = list.add(&name);
        }
        if list.names.is_empty() {
            return Self::with_defaults();
        }
        list
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The stored spelling of `name`, matched case-insensitively
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.names[idx].as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        self.names.iter().position(|n| n.to_lowercase() == needle)
    }

    /// Append a new category
    pub fn add(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if let Some(idx) = self.position(name) {
            return Err(ValidationError::DuplicateCategory(self.names[idx].clone()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let list = CategoryList::with_defaults();
        assert_eq!(list.len(), DEFAULT_CATEGORIES.len());
        assert!(list.contains("kodlama"));
    }

    #[test]
    fn test_canonical_returns_stored_spelling() {
        let list = CategoryList::with_defaults();
        assert_eq!(list.canonical("KODLAMA"), Some("Kodlama"));
        assert_eq!(list.canonical("Kodlama"), Some("Kodlama"));
        assert_eq!(list.canonical("Gardening"), None);
    }

    #[test]
    fn test_add_rejects_case_insensitive_duplicates() {
        let mut list = CategoryList::with_defaults();
        assert_eq!(
            list.add("  PROJE "),
            Err(ValidationError::DuplicateCategory("Proje".to_string()))
        );
        assert_eq!(list.add("   "), Err(ValidationError::EmptyCategory));

        list.add(" Spor ").unwrap();
        assert_eq!(list.names().last().map(String::as_str), Some("Spor"));
    }

    #[test]
    fn test_from_stored_cleans_input() {
        let stored = vec![
            "Music".to_string(),
            "".to_string(),
            "music".to_string(),
            "Art".to_string(),
        ];
        let list = CategoryList::from_stored(stored);
        assert_eq!(list.names(), &["Music".to_string(), "Art".to_string()]);
    }

    #[test]
    fn test_from_stored_empty_falls_back() {
        let list = CategoryList::from_stored(Vec::new());
        assert_eq!(list, CategoryList::with_defaults());
        assert!(!list.is_empty());
    }
}
