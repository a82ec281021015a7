//! Place categories used for diversity checks.
//!
//! The enum offers compile-time safety where upstream classification hands
//! over free-form strings.
//!
//! # Examples
//! ```
//! use course_core::Category;
//!
//! assert_eq!(Category::Cafe.as_str(), "cafe");
//! assert_eq!(Category::Museum.to_string(), "museum");
//! ```

/// Kind of place, as assigned by upstream classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Coffee shops and dessert places.
    Cafe,
    /// Sit-down dining.
    Restaurant,
    /// Bars and pubs.
    Bar,
    /// Landmarks and sightseeing spots.
    Attraction,
    /// Museums and galleries.
    Museum,
    /// Parks and outdoor green space.
    Park,
    /// Shops and markets.
    Shopping,
    /// Hands-on experiences and entertainment.
    Activity,
    /// Hotels and other lodging.
    Accommodation,
    /// Anything the classifier could not place.
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Cafe,
        Self::Restaurant,
        Self::Bar,
        Self::Attraction,
        Self::Museum,
        Self::Park,
        Self::Shopping,
        Self::Activity,
        Self::Accommodation,
        Self::Other,
    ];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use course_core::Category;
    ///
    /// assert_eq!(Category::Park.as_str(), "park");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Bar => "bar",
            Self::Attraction => "attraction",
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Shopping => "shopping",
            Self::Activity => "activity",
            Self::Accommodation => "accommodation",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}
