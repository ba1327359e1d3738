//! [`Listing`] definitions.

use std::{fmt, str::FromStr};

use common::{DateTime, Price};
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

/// Product listing shown in the storefront.
///
/// Either posted by the user and kept in the local storage
/// ([`Provenance::Local`]), or fetched from the remote catalog
/// ([`Provenance::Remote`]).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Record", into = "Record")]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// [`Price`] of this [`Listing`].
    pub price: Price,

    /// [`ImageUrl`] shown in the product card.
    pub thumbnail: ImageUrl,

    /// [`ImageUrl`]s shown in the product details.
    pub images: Vec<ImageUrl>,

    /// [`Brand`] of this [`Listing`], if known.
    pub brand: Option<Brand>,

    /// [`Category`] of this [`Listing`], if known.
    pub category: Option<Category>,
}

impl Listing {
    /// Returns [`Provenance`] of this [`Listing`].
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.id.provenance()
    }

    /// Indicates whether this [`Listing`] was posted by the user.
    #[must_use]
    pub fn is_user_ad(&self) -> bool {
        self.provenance() == Provenance::Local
    }

    /// Returns the main [`ImageUrl`] of the product details, falling back to
    /// the [`Listing::thumbnail`] if there are no [`Listing::images`].
    #[must_use]
    pub fn primary_image(&self) -> &ImageUrl {
        self.images.first().unwrap_or(&self.thumbnail)
    }
}

/// Origin of a [`Listing`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Provenance {
    /// Posted by the user and kept in the local storage.
    Local,

    /// Fetched from the remote catalog.
    Remote,
}

/// ID of a [`Listing`], namespaced by its [`Provenance`].
///
/// Renders as `user-{millis}` for [`Provenance::Local`] and as
/// `catalog-{id}` for [`Provenance::Remote`], so IDs of different origins
/// never collide.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Id {
    /// ID of a [`Listing`] posted by the user.
    ///
    /// Always starts with the `user-` prefix.
    Local(String),

    /// ID assigned to a [`Listing`] by the remote catalog.
    Remote(String),
}

impl Id {
    /// Prefix of [`Id::Local`].
    const LOCAL_PREFIX: &'static str = "user-";

    /// Prefix of the rendered [`Id::Remote`].
    const REMOTE_PREFIX: &'static str = "catalog-";

    /// Creates a new [`Id::Local`] out of the provided creation [`DateTime`].
    #[must_use]
    pub fn local(posted_at: DateTime) -> Self {
        Self::Local(format!(
            "{}{}",
            Self::LOCAL_PREFIX,
            posted_at.unix_timestamp_millis(),
        ))
    }

    /// Returns [`Provenance`] of this [`Id`].
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        match self {
            Self::Local(_) => Provenance::Local,
            Self::Remote(_) => Provenance::Remote,
        }
    }

    /// Creates a new [`Id::Local`] out of the stored `raw` value, prefixing it
    /// if needed.
    fn local_from_raw(raw: String) -> Self {
        if raw.starts_with(Self::LOCAL_PREFIX) {
            Self::Local(raw)
        } else {
            Self::Local(format!("{}{raw}", Self::LOCAL_PREFIX))
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => f.write_str(id),
            Self::Remote(id) => write!(f, "{}{id}", Self::REMOTE_PREFIX),
        }
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix(Self::REMOTE_PREFIX) {
            if !id.is_empty() {
                return Ok(Self::Remote(id.to_owned()));
            }
        }
        if s.len() > Self::LOCAL_PREFIX.len()
            && s.starts_with(Self::LOCAL_PREFIX)
        {
            return Ok(Self::Local(s.to_owned()));
        }
        Err("invalid `listing::Id`")
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] out of the trimmed `title`, if it's valid.
    #[must_use]
    pub fn new(title: impl AsRef<str>) -> Option<Self> {
        let title = title.as_ref().trim();
        (!title.is_empty() && title.len() <= 512)
            .then(|| Self(title.to_owned()))
    }
}

/// Description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] out of the trimmed `description`, if it's
    /// not empty.
    #[must_use]
    pub fn new(description: impl AsRef<str>) -> Option<Self> {
        let description = description.as_ref().trim();
        (!description.is_empty()).then(|| Self(description.to_owned()))
    }

    /// Returns the first `max_chars` characters of this [`Description`].
    ///
    /// Never splits a character in half.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> &str {
        self.0
            .char_indices()
            .nth(max_chars)
            .map_or(self.0.as_str(), |(end, _)| &self.0[..end])
    }
}

/// URL of a [`Listing`] image.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] out of the trimmed `url`, if it's valid.
    #[must_use]
    pub fn new(url: impl AsRef<str>) -> Option<Self> {
        let url = url.as_ref().trim();
        (!url.is_empty() && !url.contains(char::is_whitespace))
            .then(|| Self(url.to_owned()))
    }
}

/// Brand of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Brand(String);

impl Brand {
    /// Creates a new [`Brand`] out of the trimmed `brand`, if it's not empty.
    #[must_use]
    pub fn new(brand: impl AsRef<str>) -> Option<Self> {
        let brand = brand.as_ref().trim();
        (!brand.is_empty()).then(|| Self(brand.to_owned()))
    }
}

/// Category of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Category(String);

impl Category {
    /// Creates a new [`Category`] out of the trimmed `category`, if it's not
    /// empty.
    #[must_use]
    pub fn new(category: impl AsRef<str>) -> Option<Self> {
        let category = category.as_ref().trim();
        (!category.is_empty()).then(|| Self(category.to_owned()))
    }
}

/// [`Listing`] decoded from the remote catalog.
///
/// Always has [`Provenance::Remote`], regardless of what the catalog claims.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "Record")]
pub struct Remote(pub Listing);

impl TryFrom<Record> for Remote {
    type Error = &'static str;

    fn try_from(mut record: Record) -> Result<Self, Self::Error> {
        record.is_user_ad = false;
        Listing::try_from(record).map(Self)
    }
}

/// Serialized shape of a [`Listing`].
///
/// Shared by the `userAds` storage record and the remote catalog responses.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Raw ID of the [`Listing`].
    pub id: RawId,

    /// Title of the [`Listing`].
    pub title: String,

    /// Description of the [`Listing`].
    pub description: String,

    /// Price of the [`Listing`].
    pub price: Price,

    /// Thumbnail URL of the [`Listing`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Image URLs of the [`Listing`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// Indicator whether the [`Listing`] was posted by the user.
    #[serde(default)]
    pub is_user_ad: bool,

    /// Brand of the [`Listing`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Category of the [`Listing`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Raw ID of a [`Record`], as numbers are used by the remote catalog.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric ID.
    Number(u64),

    /// Textual ID.
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl TryFrom<Record> for Listing {
    type Error = &'static str;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record {
            id,
            title,
            description,
            price,
            thumbnail,
            images,
            is_user_ad,
            brand,
            category,
        } = record;

        let id = match (is_user_ad, id) {
            (true, raw) => Id::local_from_raw(raw.to_string()),
            (false, RawId::Number(n)) => Id::Remote(n.to_string()),
            (false, RawId::Text(s)) if !s.trim().is_empty() => {
                Id::Remote(s.trim().to_owned())
            }
            (false, RawId::Text(_)) => return Err("empty `Listing.id`"),
        };
        let images = images
            .iter()
            .map(ImageUrl::new)
            .collect::<Option<Vec<_>>>()
            .ok_or("invalid `Listing.images`")?;
        let thumbnail = match thumbnail {
            Some(url) => ImageUrl::new(url),
            None => images.first().cloned(),
        }
        .ok_or("invalid `Listing.thumbnail`")?;

        Ok(Self {
            id,
            title: Title::new(title).ok_or("invalid `Listing.title`")?,
            description: Description::new(description)
                .ok_or("invalid `Listing.description`")?,
            price,
            thumbnail,
            images,
            brand: brand.and_then(Brand::new),
            category: category.and_then(Category::new),
        })
    }
}

impl From<Listing> for Record {
    fn from(listing: Listing) -> Self {
        let is_user_ad = listing.is_user_ad();
        let Listing {
            id,
            title,
            description,
            price,
            thumbnail,
            images,
            brand,
            category,
        } = listing;

        let id = match id {
            Id::Local(id) => RawId::Text(id),
            Id::Remote(id) => id
                .parse::<u64>()
                .map_or_else(|_| RawId::Text(id), RawId::Number),
        };

        Self {
            id,
            title: title.0,
            description: description.0,
            price,
            thumbnail: Some(thumbnail.0),
            images: images.into_iter().map(|i| i.0).collect(),
            is_user_ad,
            brand: brand.map(|b| b.0),
            category: category.map(|c| c.0),
        }
    }
}
