/// Name reported for class ids the table does not know.
pub const UNKNOWN_CLASS: &str = "unknown";

/// Resolves a predicted class id to a display name.
///
/// Implementations pick their own fallback for ids they do not know; the
/// tracker never validates the id.
pub trait ClassNames: Send + Sync {
    fn class_name(&self, class_id: u32) -> &str;
}

/// Class names indexed by id.
///
/// ```rust
/// use busprobe::detection::{ClassNames, ClassTable};
///
/// let table = ClassTable::new(["background", "person", "vehicle"]);
/// assert_eq!(table.class_name(1), "person");
/// assert_eq!(table.class_name(42), "unknown");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassTable {
    names: Vec<String>,
}

impl ClassTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ClassNames for ClassTable {
    fn class_name(&self, class_id: u32) -> &str {
        usize::try_from(class_id)
            .ok()
            .and_then(|idx| self.names.get(idx))
            .map_or(UNKNOWN_CLASS, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_falls_back() {
        let t = ClassTable::default();
        assert!(t.is_empty());
        assert_eq!(t.class_name(0), UNKNOWN_CLASS);
    }

    #[test]
    fn out_of_range() {
        let t = ClassTable::new(vec![String::from("cat")]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.class_name(0), "cat");
        assert_eq!(t.class_name(u32::MAX), UNKNOWN_CLASS);
    }
}
