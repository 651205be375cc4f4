use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// The closed set of block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Hero,
    Text,
    Card,
    Image,
    Table,
    List,
    Grid,
    Callout,
    Quote,
    Divider,
    Video,
    Audio,
}

impl BlockKind {
    pub const ALL: [BlockKind; 12] = [
        Self::Hero,
        Self::Text,
        Self::Card,
        Self::Image,
        Self::Table,
        Self::List,
        Self::Grid,
        Self::Callout,
        Self::Quote,
        Self::Divider,
        Self::Video,
        Self::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Text => "text",
            Self::Card => "card",
            Self::Image => "image",
            Self::Table => "table",
            Self::List => "list",
            Self::Grid => "grid",
            Self::Callout => "callout",
            Self::Quote => "quote",
            Self::Divider => "divider",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeroBackground {
    GradientBlue,
    #[default]
    GradientGray,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroBlock {
    pub badge: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    #[serde(skip)]
    pub background: HeroBackground,
}

/// Authored HTML, rendered as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextBlock {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardItem {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<CardItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageBlock {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListBlock {
    pub items: Vec<String>,
    #[serde(rename = "type", default)]
    pub style: ListStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridItem {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridBlock {
    pub items: Vec<GridItem>,
    #[serde(default = "GridBlock::default_columns")]
    pub columns: u8,
}

impl GridBlock {
    fn default_columns() -> u8 {
        2
    }

    /// Responsive column classes; anything but 3 or 4 falls back to 2.
    pub fn column_classes(&self) -> &'static str {
        match self.columns {
            3 => "grid-cols-1 md:grid-cols-3",
            4 => "grid-cols-1 md:grid-cols-2 lg:grid-cols-4",
            _ => "grid-cols-1 md:grid-cols-2",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalloutKind {
    #[default]
    Info,
    Warning,
    Error,
    Success,
    Tip,
}

impl CalloutKind {
    /// Unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "warning" => Self::Warning,
            "error" => Self::Error,
            "success" => Self::Success,
            "tip" => Self::Tip,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalloutBlock {
    pub title: Option<String>,
    pub content: String,
    #[serde(skip)]
    pub kind: CalloutKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteBlock {
    pub quote: String,
    pub author: Option<String>,
    #[serde(rename = "title")]
    pub author_title: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DividerStyle {
    #[default]
    Default,
    Dotted,
    Thick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividerBlock {
    pub style: DividerStyle,
}

/// Shared by `video` and `audio`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaBlock {
    pub src: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VariantMeta {
    background: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    style: Option<String>,
}

/// A block's payload, decoded according to its tag.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Hero(HeroBlock),
    Text(TextBlock),
    Card(CardBlock),
    Image(ImageBlock),
    Table(TableBlock),
    List(ListBlock),
    Grid(GridBlock),
    Callout(CalloutBlock),
    Quote(QuoteBlock),
    Divider(DividerBlock),
    Video(MediaBlock),
    Audio(MediaBlock),
    /// Known tag, payload does not have the expected shape.
    Invalid { kind: BlockKind, reason: String },
    /// Tag outside the known set.
    Unsupported { block_type: String },
}

fn payload<T: DeserializeOwned>(content: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(content)
}

fn variant_meta(metadata: Option<&Value>) -> Result<VariantMeta, serde_json::Error> {
    match metadata {
        None | Some(Value::Null) => Ok(VariantMeta::default()),
        Some(value) => VariantMeta::deserialize(value),
    }
}

impl BlockBody {
    pub fn decode(block_type: &str, content: &Value, metadata: Option<&Value>) -> Self {
        let Some(kind) = BlockKind::parse(block_type) else {
            return Self::Unsupported {
                block_type: block_type.to_string(),
            };
        };

        match Self::decode_known(kind, content, metadata) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("content block `{}` has malformed payload: {}", kind, e);
                Self::Invalid {
                    kind,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn decode_known(
        kind: BlockKind,
        content: &Value,
        metadata: Option<&Value>,
    ) -> Result<Self, serde_json::Error> {
        let meta = variant_meta(metadata)?;

        let body = match kind {
            BlockKind::Hero => {
                let mut hero: HeroBlock = payload(content)?;
                if meta.background.as_deref() == Some("gradient-blue") {
                    hero.background = HeroBackground::GradientBlue;
                }
                Self::Hero(hero)
            }
            BlockKind::Text => Self::Text(payload(content)?),
            BlockKind::Card => Self::Card(payload(content)?),
            BlockKind::Image => Self::Image(payload(content)?),
            BlockKind::Table => Self::Table(payload(content)?),
            BlockKind::List => Self::List(payload(content)?),
            BlockKind::Grid => Self::Grid(payload(content)?),
            BlockKind::Callout => {
                let mut callout: CalloutBlock = payload(content)?;
                callout.kind = meta
                    .kind
                    .as_deref()
                    .map(CalloutKind::from_name)
                    .unwrap_or_default();
                Self::Callout(callout)
            }
            BlockKind::Quote => Self::Quote(payload(content)?),
            BlockKind::Divider => {
                let style = match meta.style.as_deref() {
                    Some("dotted") => DividerStyle::Dotted,
                    Some("thick") => DividerStyle::Thick,
                    _ => DividerStyle::Default,
                };
                Self::Divider(DividerBlock { style })
            }
            BlockKind::Video => Self::Video(payload(content)?),
            BlockKind::Audio => Self::Audio(payload(content)?),
        };

        Ok(body)
    }

    /// `None` for unsupported tags.
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            Self::Hero(_) => Some(BlockKind::Hero),
            Self::Text(_) => Some(BlockKind::Text),
            Self::Card(_) => Some(BlockKind::Card),
            Self::Image(_) => Some(BlockKind::Image),
            Self::Table(_) => Some(BlockKind::Table),
            Self::List(_) => Some(BlockKind::List),
            Self::Grid(_) => Some(BlockKind::Grid),
            Self::Callout(_) => Some(BlockKind::Callout),
            Self::Quote(_) => Some(BlockKind::Quote),
            Self::Divider(_) => Some(BlockKind::Divider),
            Self::Video(_) => Some(BlockKind::Video),
            Self::Audio(_) => Some(BlockKind::Audio),
            Self::Invalid { kind, .. } => Some(*kind),
            Self::Unsupported { .. } => None,
        }
    }
}
