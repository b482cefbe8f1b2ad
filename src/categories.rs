//! Category registry - the fixed set of labels quotes can be tagged with

/// A registry entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    /// Hex color used for the tag and the filter bar
    pub color: &'static str,
}

pub const CATEGORIES: [Category; 8] = [
    Category { name: "god", color: "#3b82f6" },
    Category { name: "love", color: "#ec4899" },
    Category { name: "life", color: "#16a34a" },
    Category { name: "time", color: "#eab308" },
    Category { name: "wisdom", color: "#8b5cf6" },
    Category { name: "death", color: "#ef4444" },
    Category { name: "success", color: "#14b8a6" },
    Category { name: "happiness", color: "#f97316" },
];

/// Look up a category by name. Unknown names return `None`; callers decide the fallback.
pub fn find(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|cat| cat.name == name)
}

/// Position of a category in the registry
pub fn position(name: &str) -> Option<usize> {
    CATEGORIES.iter().position(|cat| cat.name == name)
}
