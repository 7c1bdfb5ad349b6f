//! Configuration for splitting road collections and building the search index.
//!
//! Everything has a default matching the OSM road extracts the tool was
//! written for, so `Config::default()` is usually all a caller needs.
use crate::error::{Result, RoadIndexError};
use serde::de::Error;
use std::path::{Path, PathBuf};

/// Upper bound for `precision`; f64 carries ~15-17 significant digits.
pub const MAX_PRECISION: u32 = 15;

/// Pipeline configuration
///
/// # Example
///
/// ```rust
/// use roadindex::Config;
///
/// let json = r#"{
///     "categories": ["motorway", "trunk"],
///     "overflow": "rest",
///     "precision": 4
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.categories, vec!["motorway", "trunk"]);
/// assert_eq!(config.properties.class, "fclass");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Road classes, in matching order
    #[serde(default = "Config::default_categories")]
    pub categories: Vec<String>,

    /// Bucket name for features whose class matches no category
    #[serde(default = "Config::default_overflow")]
    pub overflow: String,

    /// Decimal digits kept in index bounding boxes
    #[serde(default = "Config::default_precision")]
    pub precision: u32,

    /// Per-category file names are `{file_prefix}{category}.{file_extension}`
    #[serde(default = "Config::default_file_prefix")]
    pub file_prefix: String,

    #[serde(default = "Config::default_file_extension")]
    pub file_extension: String,

    /// File name of the search index inside the output directory
    #[serde(default = "Config::default_index_file")]
    pub index_file: String,

    /// Also read the overflow collection when building the index from a store
    #[serde(default)]
    pub index_overflow: bool,

    /// Feature property names to read
    #[serde(default)]
    pub properties: PropertyNames,
}

/// Names of the feature properties holding a road's name, class and
/// reference code.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyNames {
    #[serde(default = "PropertyNames::default_name")]
    pub name: String,

    #[serde(default = "PropertyNames::default_class")]
    pub class: String,

    #[serde(default = "PropertyNames::default_reference")]
    pub reference: String,
}

impl PropertyNames {
    fn default_name() -> String {
        "name".to_string()
    }

    fn default_class() -> String {
        "fclass".to_string()
    }

    fn default_reference() -> String {
        "ref".to_string()
    }
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            class: Self::default_class(),
            reference: Self::default_reference(),
        }
    }
}

impl Config {
    fn default_categories() -> Vec<String> {
        ["motorway", "trunk", "primary", "secondary"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn default_overflow() -> String {
        "others".to_string()
    }

    const fn default_precision() -> u32 {
        5
    }

    fn default_file_prefix() -> String {
        "osm_".to_string()
    }

    fn default_file_extension() -> String {
        "geojson".to_string()
    }

    fn default_index_file() -> String {
        "search_index.json".to_string()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overflow(mut self, overflow: impl Into<String>) -> Self {
        self.overflow = overflow.into();
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        assert!(
            precision <= MAX_PRECISION,
            "Precision must be at most {}",
            MAX_PRECISION
        );
        self.precision = precision;
        self
    }

    pub fn with_index_overflow(mut self, enabled: bool) -> Self {
        self.index_overflow = enabled;
        self
    }

    pub fn with_properties(mut self, properties: PropertyNames) -> Self {
        self.properties = properties;
        self
    }

    /// File name of the collection holding `bucket`, e.g. `osm_motorway.geojson`.
    pub fn collection_file_name(&self, bucket: &str) -> String {
        format!("{}{}.{}", self.file_prefix, bucket, self.file_extension)
    }

    /// Every bucket a split produces: the categories in order, then overflow.
    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.overflow.as_str()))
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.categories.is_empty() {
            return Err("At least one category is required".to_string());
        }

        for (i, category) in self.categories.iter().enumerate() {
            if category.is_empty() {
                return Err("Category names cannot be empty".to_string());
            }
            if self.categories[..i].contains(category) {
                return Err(format!("Duplicate category '{}'", category));
            }
        }

        if self.overflow.is_empty() {
            return Err("Overflow bucket name cannot be empty".to_string());
        }

        if self.categories.contains(&self.overflow) {
            return Err(format!(
                "Overflow bucket '{}' collides with a category",
                self.overflow
            ));
        }

        if self.precision > MAX_PRECISION {
            return Err(format!(
                "Precision {} exceeds maximum of {}",
                self.precision, MAX_PRECISION
            ));
        }

        if self.properties.name.is_empty()
            || self.properties.class.is_empty()
            || self.properties.reference.is_empty()
        {
            return Err("Property names cannot be empty".to_string());
        }

        if self.index_file.is_empty() {
            return Err("Index file name cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a configuration file, choosing the format from its extension.
    ///
    /// `.toml` files need the `toml` feature; anything else is read as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RoadIndexError::io(path, e))?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            #[cfg(feature = "toml")]
            {
                return Ok(Self::from_toml(&text)?);
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(RoadIndexError::InvalidConfig(format!(
                    "{} is TOML but the `toml` feature is disabled",
                    path.display()
                )));
            }
        }

        Ok(Self::from_json(&text)?)
    }

    /// Path of the collection file for `bucket` inside `dir`.
    pub fn collection_path(&self, dir: impl AsRef<Path>, bucket: &str) -> PathBuf {
        dir.as_ref().join(self.collection_file_name(bucket))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: Self::default_categories(),
            overflow: Self::default_overflow(),
            precision: Self::default_precision(),
            file_prefix: Self::default_file_prefix(),
            file_extension: Self::default_file_extension(),
            index_file: Self::default_index_file(),
            properties: PropertyNames::default(),
            index_overflow: false,
        }
    }
}
