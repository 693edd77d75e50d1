use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Catalog category, addressed either by display name or by numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "CategoryRecord")]
pub enum Category {
    Name(String),
    Id(u64),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum CategoryRecord {
    Name(String),
    Id(u64),
}

impl TryFrom<CategoryRecord> for Category {
    type Error = ValidationError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        match record {
            CategoryRecord::Name(name) => Self::from_name(name),
            CategoryRecord::Id(id) => Ok(Self::from_id(id)),
        }
    }
}

impl Category {
    /// Names travel in a comma separated list where all-digit text reads as
    /// an id, so a name may contain neither a comma nor only digits.
    pub fn from_name(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name: String = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if name.contains(',') || trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ValidationError::InvalidCategoryName { name });
        }
        Ok(Self::Name(name))
    }

    pub const fn from_id(id: u64) -> Self {
        Self::Id(id)
    }

    /// Reads the wire form: all-digit text is an id, anything else a name.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse::<u64>() {
                return Ok(Self::Id(id));
            }
        }
        Self::from_name(trimmed)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Id(_) => None,
        }
    }

    pub const fn id(&self) -> Option<u64> {
        match self {
            Self::Name(_) => None,
            Self::Id(id) => Some(*id),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Insertion-ordered set of categories without duplicate identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories(Vec<Category>);

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the category was already present.
    pub fn add(&mut self, category: Category) -> bool {
        if self.0.contains(&category) {
            return false;
        }
        self.0.push(category);
        true
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.0.contains(category)
    }

    pub fn all(&self) -> &[Category] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma separated wire form, e.g. `12,45,Jeans`.
    pub fn to_wire(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Blank segments are skipped; duplicates collapse.
    pub fn parse_wire(input: &str) -> Result<Self, ValidationError> {
        let mut categories = Self::new();
        for segment in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            categories.add(Category::parse(segment)?);
        }
        Ok(categories)
    }
}

impl FromIterator<Category> for Categories {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        let mut categories = Self::new();
        for category in iter {
            categories.add(category);
        }
        categories
    }
}

impl<'a> IntoIterator for &'a Categories {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
