//! Contract models for translation service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Locale marker that routes an entry to the owner's own base column
pub const DEFAULT_LOCALE: &str = "default";

/// Kind of entity that can own translations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnerKind {
    Store,
    Item,
    Category,
    Campaign,
    ItemCampaign,
    Banner,
    Coupon,
    Brand,
    AddOn,
    Unit,
    Attribute,
    Zone,
    Module,
    ParcelCategory,
    DmVehicle,
    FlashSale,
    SubscriptionPackage,
    EmailTemplate,
}

impl OwnerKind {
    /// Every known owner kind
    pub const ALL: [OwnerKind; 18] = [
        Self::Store,
        Self::Item,
        Self::Category,
        Self::Campaign,
        Self::ItemCampaign,
        Self::Banner,
        Self::Coupon,
        Self::Brand,
        Self::AddOn,
        Self::Unit,
        Self::Attribute,
        Self::Zone,
        Self::Module,
        Self::ParcelCategory,
        Self::DmVehicle,
        Self::FlashSale,
        Self::SubscriptionPackage,
        Self::EmailTemplate,
    ];

    /// Stable tag stored in the `owner_type` column
    pub fn tag(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Item => "item",
            Self::Category => "category",
            Self::Campaign => "campaign",
            Self::ItemCampaign => "item_campaign",
            Self::Banner => "banner",
            Self::Coupon => "coupon",
            Self::Brand => "brand",
            Self::AddOn => "add_on",
            Self::Unit => "unit",
            Self::Attribute => "attribute",
            Self::Zone => "zone",
            Self::Module => "module",
            Self::ParcelCategory => "parcel_category",
            Self::DmVehicle => "dm_vehicle",
            Self::FlashSale => "flash_sale",
            Self::SubscriptionPackage => "subscription_package",
            Self::EmailTemplate => "email_template",
        }
    }

    /// Parse a storage tag back into a kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Field names that carry per-locale variants for this kind
    pub fn translatable_fields(self) -> &'static [&'static str] {
        match self {
            Self::Store => &["name", "address"],
            Self::Item => &["name", "description"],
            Self::Category => &["name"],
            Self::Campaign | Self::ItemCampaign => &["title", "description"],
            Self::Banner => &["title"],
            Self::Coupon => &["title", "details"],
            Self::Brand => &["name"],
            Self::AddOn => &["name"],
            Self::Unit => &["unit"],
            Self::Attribute => &["name"],
            Self::Zone => &["name"],
            Self::Module => &["module_name", "description"],
            Self::ParcelCategory => &["name", "description"],
            Self::DmVehicle => &["type", "model"],
            Self::FlashSale => &["title"],
            Self::SubscriptionPackage => &["package_name", "description"],
            Self::EmailTemplate => &[
                "title",
                "body",
                "button_name",
                "footer_text",
                "copyright_text",
            ],
        }
    }

    /// Whether `key` is one of this kind's translatable fields
    pub fn is_translatable(self, key: &str) -> bool {
        self.translatable_fields().contains(&key)
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OwnerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim()).ok_or_else(|| format!("unknown owner kind '{}'", s))
    }
}

/// Tagged reference to one owning entity instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerRef {
    pub kind: OwnerKind,
    pub id: i64,
}

impl OwnerRef {
    pub fn new(kind: OwnerKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for OwnerRef {
    type Err = String;

    /// Parses the `kind:id` form, e.g. `store:12`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("owner '{}' must look like kind:id", s))?;
        let id = id
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid owner id in '{}': {}", s, e))?;
        Ok(Self::new(kind.parse()?, id))
    }
}

/// A stored per-locale value of one field of one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Surrogate key
    pub id: i32,
    /// Owning entity
    pub owner: OwnerRef,
    /// Language code
    pub locale: String,
    /// Field name
    pub key: String,
    /// Translated text
    pub value: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// One `{locale, key, value}` triple submitted to the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Language code, or [`DEFAULT_LOCALE`] for the owner's base column
    pub locale: String,
    /// Field name
    pub key: String,
    /// Text to store; empty is kept as empty
    pub value: String,
}

impl TranslationEntry {
    pub fn new(
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Whether the entry targets the owner's base column
    pub fn is_default(&self) -> bool {
        self.locale.trim().eq_ignore_ascii_case(DEFAULT_LOCALE)
    }
}

/// Result of a successfully committed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub owner: OwnerRef,
    /// Upserted translation rows, in submission order
    pub translations: Vec<Translation>,
    /// Keys written to the owner's base columns
    pub defaults_written: Vec<String>,
}

/// Writing direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }
}

/// Reference data row describing a language the application accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// Language code (e.g. "en", "ar", "ckb")
    pub code: String,
    /// English name
    pub name: String,
    /// Name in the language itself
    pub native_name: String,
    pub direction: TextDirection,
    pub is_active: bool,
    /// Base language that entities are authored in
    pub is_default: bool,
    /// Member of the Kurdish fallback group
    pub is_fallback: bool,
    /// Position in language tabs
    pub sort_order: i32,
    /// Alternative codes accepted for this language
    pub aliases: Vec<String>,
}

impl SupportedLanguage {
    /// Minimal active, left-to-right language
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: code.into(),
            native_name: name.clone(),
            name,
            direction: TextDirection::Ltr,
            is_active: true,
            is_default: false,
            is_fallback: false,
            sort_order: 0,
            aliases: Vec::new(),
        }
    }

    /// Whether `code` names this language, directly or through an alias
    pub fn answers_to(&self, code: &str) -> bool {
        let code = code.trim();
        self.code.eq_ignore_ascii_case(code)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(code))
    }
}
