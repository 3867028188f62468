//! Catalog record definitions.
//!
//! A catalog is a tree of templates. Every template owns an ordered list of
//! versions, and every version owns the raw files found in its folder. The
//! indexer fills these records in incrementally, so every type here has a
//! sensible empty state.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Identity of a template within a catalog tree.
///
/// Two files describe the same template exactly when they share the base
/// category and the template folder name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TemplateKey {
    /// Base category ("" for the default `templates/` folder)
    pub base: String,

    /// Name of the template folder
    pub folder_name: String,
}

impl TemplateKey {
    /// Create a key from a base category and folder name.
    pub fn new(base: impl Into<String>, folder_name: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            folder_name: folder_name.into(),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base.is_empty() {
            write!(f, "{}", self.folder_name)
        } else {
            write!(f, "{}*{}", self.base, self.folder_name)
        }
    }
}

/// A catalog template and everything accumulated for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    /// Base category, taken from the path
    #[serde(skip_deserializing)]
    pub base: String,

    /// Template folder name, taken from the path
    #[serde(skip_deserializing)]
    pub folder_name: String,

    /// Display name
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,

    /// Primary category
    #[serde(deserialize_with = "scalar_string")]
    pub category: String,

    /// Additional categories
    #[serde(deserialize_with = "scalar_strings")]
    pub categories: Vec<String>,

    /// Human-readable description
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,

    /// Template-level version declared by the definition file
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,

    /// Version the catalog suggests by default
    #[serde(alias = "default_version", deserialize_with = "scalar_string")]
    pub default_version: String,

    #[serde(deserialize_with = "scalar_string")]
    pub maintainer: String,

    #[serde(deserialize_with = "scalar_string")]
    pub license: String,

    #[serde(
        rename = "projectURL",
        alias = "project_url",
        deserialize_with = "scalar_string"
    )]
    pub project_url: String,

    /// Versions this template can be upgraded from
    #[serde(alias = "upgrade_from", deserialize_with = "scalar_string")]
    pub upgrade_from: String,

    #[serde(alias = "is_system", deserialize_with = "scalar_string")]
    pub is_system: String,

    #[serde(deserialize_with = "scalar_string_map")]
    pub labels: BTreeMap<String, String>,

    /// Base64-encoded icon payload
    #[serde(skip_deserializing)]
    pub icon: String,

    /// File name the icon was read from
    #[serde(skip_deserializing)]
    pub icon_filename: String,

    /// Whole-template readme
    #[serde(skip_deserializing)]
    pub readme: String,

    /// Versions in the order their folders were first seen
    #[serde(skip_deserializing)]
    pub versions: Vec<Version>,
}

impl Template {
    /// Create an empty partial record for a key.
    pub fn partial(key: &TemplateKey) -> Self {
        Self {
            base: key.base.clone(),
            folder_name: key.folder_name.clone(),
            ..Default::default()
        }
    }

    /// The identity this template is stored under.
    pub fn key(&self) -> TemplateKey {
        TemplateKey::new(self.base.clone(), self.folder_name.clone())
    }

    /// Name used in reports: the declared name, else the folder name.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.folder_name
        } else {
            &self.name
        }
    }

    /// Identifier of the version at `index`, as used in error messages.
    pub fn version_label(&self, index: usize) -> String {
        format!("{}:{}", self.key(), index)
    }

    /// Attach a file to the version identified by `id`.
    ///
    /// The version is created at the end of the list when it does not exist yet.
    pub fn add_version_file(&mut self, id: VersionId, file: CatalogFile) {
        match self.versions.iter_mut().find(|v| v.id == id) {
            Some(version) => version.files.push(file),
            None => {
                let mut version = Version::new(id);
                version.files.push(file);
                self.versions.push(version);
            }
        }
    }
}

/// How a version folder identifies itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum VersionId {
    /// Legacy ordinal folder such as `templates/foo/3/`
    Revision(u64),

    /// Semantic-version folder such as `templates/foo/v1.2.3/`
    Semver(String),
}

impl VersionId {
    /// Resolve a folder token, or `None` when it is neither form.
    ///
    /// Integers win over semver, and the semver token is kept verbatim
    /// (including any leading `v`).
    pub fn from_folder(token: &str) -> Option<Self> {
        if let Ok(revision) = token.parse::<u64>() {
            return Some(VersionId::Revision(revision));
        }

        let bare = token.strip_prefix('v').unwrap_or(token);
        if semver::Version::parse(bare).is_ok() {
            return Some(VersionId::Semver(token.to_string()));
        }

        None
    }

    /// The revision number, if this is a revision folder.
    pub fn revision(&self) -> Option<u64> {
        match self {
            VersionId::Revision(r) => Some(*r),
            VersionId::Semver(_) => None,
        }
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionId::Revision(r) => write!(f, "{}", r),
            VersionId::Semver(s) => write!(f, "{}", s),
        }
    }
}

/// One version of a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Folder identity, never changed by overrides
    pub id: VersionId,

    /// Effective version string (empty when unknown)
    pub version: String,

    /// Lowest supported platform version (empty = unbounded)
    pub minimum_rancher_version: String,

    /// Highest supported platform version (empty = unbounded)
    pub maximum_rancher_version: String,

    pub upgrade_from: String,

    pub questions: Vec<Question>,

    /// Readme found inside the version folder
    pub readme: String,

    /// Files of the version folder, in walk order
    pub files: Vec<CatalogFile>,
}

impl Version {
    /// Create an empty version for a folder identity.
    ///
    /// Semver folders start out with their folder token as version string.
    pub fn new(id: VersionId) -> Self {
        let version = match &id {
            VersionId::Semver(token) => token.clone(),
            VersionId::Revision(_) => String::new(),
        };
        Self {
            id,
            version,
            minimum_rancher_version: String::new(),
            maximum_rancher_version: String::new(),
            upgrade_from: String::new(),
            questions: Vec::new(),
            readme: String::new(),
            files: Vec::new(),
        }
    }

    /// Apply metadata parsed from an override file.
    ///
    /// The compatibility range, upgrade expression and questions are replaced.
    /// The version string is replaced only when the override declares one.
    /// Identity and files are untouched.
    pub fn apply_override(&mut self, over: VersionOverride) {
        if !over.version.is_empty() {
            self.version = over.version;
        }
        self.minimum_rancher_version = over.minimum_rancher_version;
        self.maximum_rancher_version = over.maximum_rancher_version;
        self.upgrade_from = over.upgrade_from;
        self.questions = over.questions;
    }

    /// First file whose name satisfies `pred`.
    pub fn find_file(&self, pred: impl Fn(&str) -> bool) -> Option<&CatalogFile> {
        self.files.iter().find(|f| pred(&f.name))
    }
}

/// A file found inside a version folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFile {
    /// File name without directories
    pub name: String,

    /// Raw text contents
    pub contents: String,
}

impl CatalogFile {
    /// Create a file entry.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Version metadata parsed from `rancher-compose.yml` or `template-version.yml`.
///
/// Overrides carry no folder identity and no files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VersionOverride {
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,

    #[serde(alias = "minimumRancherVersion", deserialize_with = "scalar_string")]
    pub minimum_rancher_version: String,

    #[serde(alias = "maximumRancherVersion", deserialize_with = "scalar_string")]
    pub maximum_rancher_version: String,

    #[serde(alias = "upgradeFrom", deserialize_with = "scalar_string")]
    pub upgrade_from: String,

    pub questions: Vec<Question>,
}

/// A configuration question a version asks at deploy time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    #[serde(deserialize_with = "scalar_string")]
    pub variable: String,

    #[serde(deserialize_with = "scalar_string")]
    pub label: String,

    #[serde(deserialize_with = "scalar_string")]
    pub description: String,

    #[serde(rename = "type", deserialize_with = "scalar_string")]
    pub question_type: String,

    #[serde(deserialize_with = "lenient_bool")]
    pub required: bool,

    pub default: Option<Value>,

    #[serde(deserialize_with = "scalar_strings")]
    pub options: Vec<String>,
}

/// Render a YAML scalar as a string; `None` for sequences and mappings.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn expect_scalar<E: de::Error>(value: Value) -> std::result::Result<String, E> {
    match scalar_text(&value) {
        Some(text) => Ok(text),
        None => Err(E::custom(format!("expected a scalar, found {:?}", value))),
    }
}

fn scalar_entry<E: de::Error>(
    key: Value,
    value: Value,
) -> std::result::Result<(String, String), E> {
    let key = expect_scalar::<E>(key)?;
    Ok((key, expect_scalar::<E>(value)?))
}

/// Accept any YAML scalar where a string is expected.
///
/// Catalog files routinely write `version: 1.0` or `isSystem: true` unquoted.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    expect_scalar(Value::deserialize(deserializer)?)
}

/// A list of scalars rendered as strings. A lone scalar is a one-item list.
fn scalar_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items.into_iter().map(expect_scalar).collect(),
        other => expect_scalar(other).map(|s| vec![s]),
    }
}

/// A mapping with scalar keys and values, all rendered as strings.
fn scalar_string_map<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(key, value)| scalar_entry(key, value))
            .collect(),
        other => Err(de::Error::custom(format!("expected a mapping, found {:?}", other))),
    }
}

/// A boolean that may also be written as a string (`"true"`) or a number.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let flag = match &value {
        Value::Null => Some(false),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    };
    match flag {
        Some(flag) => Ok(flag),
        None => Err(de::Error::custom(format!("expected a boolean, found {:?}", value))),
    }
}
