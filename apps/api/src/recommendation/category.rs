use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Skill domains shared by quiz tagging, interest affinity and path weights.
///
/// Adding a variant here extends every `CategoryVector` at once, so affinity
/// vectors and path weight vectors cannot disagree on the category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frontend,
    Backend,
    Data,
    Cloud,
    Mobile,
    Security,
}

impl Category {
    pub const COUNT: usize = 6;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Frontend,
        Category::Backend,
        Category::Data,
        Category::Cloud,
        Category::Mobile,
        Category::Security,
    ];

    /// Tag as stored on graded question attempts.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Data => "data",
            Category::Cloud => "cloud",
            Category::Mobile => "mobile",
            Category::Security => "security",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One real value per category. Used for interest affinities and for the
/// weight vector of each career path.
///
/// Serialized as a `{category: value}` map; categories missing from the map
/// deserialize to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, f64>", into = "BTreeMap<Category, f64>")]
pub struct CategoryVector([f64; Category::COUNT]);

impl CategoryVector {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(Category, f64)]) -> Self {
        let mut v = Self::zero();
        for &(category, value) in pairs {
            v.set(category, value);
        }
        v
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: Category, value: f64) {
        self.0[category.index()] = value;
    }

    pub fn add(&mut self, category: Category, delta: f64) {
        self.0[category.index()] += delta;
    }

    /// Iterates in `Category::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl From<BTreeMap<Category, f64>> for CategoryVector {
    fn from(map: BTreeMap<Category, f64>) -> Self {
        let mut v = Self::zero();
        for (category, value) in map {
            v.set(category, value);
        }
        v
    }
}

impl From<CategoryVector> for BTreeMap<Category, f64> {
    fn from(v: CategoryVector) -> Self {
        v.iter().collect()
    }
}
