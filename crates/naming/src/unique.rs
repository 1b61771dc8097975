use std::collections::HashSet;

/// Names already handed out within one plan, export or archive build.
///
/// Deliberately not shared: every operation that names files creates its own
/// set, so two concurrent builds can never influence each other's names.
#[derive(Debug, Default, Clone)]
pub struct UsedNames(HashSet<String>);

impl UsedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claim `name`, or the first free `stem-N.ext` (N from 2) if it is taken.
    ///
    /// ```
    /// use linkfile_naming::UsedNames;
    ///
    /// let mut used = UsedNames::new();
    /// assert_eq!(used.make_unique("example.html"), "example.html");
    /// assert_eq!(used.make_unique("example.html"), "example-2.html");
    /// assert_eq!(used.make_unique("example.html"), "example-3.html");
    /// ```
    pub fn make_unique(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        if self.0.insert(name.clone()) {
            return name;
        }
        let (stem, ext) = name.split_at(name.rfind('.').unwrap_or(name.len()));
        self.probe(|i| format!("{stem}-{i}{ext}"), &name)
    }

    /// Like [`make_unique`](Self::make_unique), but never treats a dot as the
    /// start of an extension.
    pub fn make_unique_base(&mut self, base: impl Into<String>) -> String {
        let base = base.into();
        if self.0.insert(base.clone()) {
            return base;
        }
        self.probe(|i| format!("{base}-{i}"), &base)
    }

    fn probe(&mut self, candidate: impl Fn(usize) -> String, original: &str) -> String {
        let mut i = 2;
        loop {
            let name = candidate(i);
            if self.0.insert(name.clone()) {
                tracing::trace!(original, renamed = %name, "name already used");
                return name;
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_names_are_distinct() {
        let mut used = UsedNames::new();
        let names: Vec<String> = (0..50).map(|_| used.make_unique("example.html")).collect();
        let distinct: HashSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());
        assert_eq!(names[0], "example.html");
        assert_eq!(names[49], "example-50.html");
    }

    #[test]
    fn test_skips_names_claimed_out_of_order() {
        let mut used = UsedNames::new();
        assert_eq!(used.make_unique("a-2.url"), "a-2.url");
        assert_eq!(used.make_unique("a.url"), "a.url");
        assert_eq!(used.make_unique("a.url"), "a-3.url");
    }

    #[test]
    fn test_without_extension() {
        let mut used = UsedNames::new();
        assert_eq!(used.make_unique("readme"), "readme");
        assert_eq!(used.make_unique("readme"), "readme-2");
    }

    #[test]
    fn test_unique_base_keeps_dots() {
        let mut used = UsedNames::new();
        assert_eq!(used.make_unique_base("example.com"), "example.com");
        assert_eq!(used.make_unique_base("example.com"), "example.com-2");
        assert_eq!(used.len(), 2);
        assert!(used.contains("example.com-2"));
    }

    #[test]
    fn test_sets_are_independent() {
        let mut first = UsedNames::new();
        let mut second = UsedNames::new();
        assert_eq!(first.make_unique("x.html"), "x.html");
        assert_eq!(second.make_unique("x.html"), "x.html");
        assert!(second.len() == 1 && !first.is_empty());
    }
}
