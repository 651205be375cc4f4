use std::collections::HashSet;

use askama::Template;
use serde_json::json;
use uuid::Uuid;

use super::block::*;
use crate::model::entity::{ContentBlock, InteractionType};
use crate::tokens::{self, CalloutPalette};

impl HeroBackground {
    pub fn classes(&self) -> &'static str {
        match self {
            Self::GradientBlue => tokens::hero::GRADIENT_BLUE,
            Self::GradientGray => tokens::hero::GRADIENT_GRAY,
        }
    }
}

impl CalloutKind {
    pub fn palette(&self) -> CalloutPalette {
        match self {
            Self::Info => tokens::callout::INFO,
            Self::Warning => tokens::callout::WARNING,
            Self::Error => tokens::callout::ERROR,
            Self::Success => tokens::callout::SUCCESS,
            Self::Tip => tokens::callout::TIP,
        }
    }
}

impl DividerStyle {
    pub fn classes(&self) -> &'static str {
        match self {
            Self::Default => tokens::divider::DEFAULT,
            Self::Dotted => tokens::divider::DOTTED,
            Self::Thick => tokens::divider::THICK,
        }
    }
}

#[derive(Template)]
#[template(path = "blocks/frame.html")]
struct FrameTemplate<'a> {
    id: Uuid,
    block_type: &'a str,
    inner: String,
}

#[derive(Template)]
#[template(path = "blocks/hero.html")]
struct HeroTemplate<'a> {
    b: &'a HeroBlock,
    background: &'static str,
}

#[derive(Template)]
#[template(path = "blocks/text.html")]
struct TextTemplate<'a> {
    b: &'a TextBlock,
}

#[derive(Template)]
#[template(path = "blocks/card.html")]
struct CardTemplate<'a> {
    b: &'a CardBlock,
}

#[derive(Template)]
#[template(path = "blocks/image.html")]
struct ImageTemplate<'a> {
    b: &'a ImageBlock,
}

#[derive(Template)]
#[template(path = "blocks/table.html")]
struct TableTemplate<'a> {
    b: &'a TableBlock,
}

#[derive(Template)]
#[template(path = "blocks/list.html")]
struct ListTemplate<'a> {
    b: &'a ListBlock,
    ordered: bool,
}

#[derive(Template)]
#[template(path = "blocks/grid.html")]
struct GridTemplate<'a> {
    b: &'a GridBlock,
    columns: &'static str,
}

#[derive(Template)]
#[template(path = "blocks/callout.html")]
struct CalloutTemplate<'a> {
    b: &'a CalloutBlock,
    palette: CalloutPalette,
}

#[derive(Template)]
#[template(path = "blocks/quote.html")]
struct QuoteTemplate<'a> {
    b: &'a QuoteBlock,
}

#[derive(Template)]
#[template(path = "blocks/divider.html")]
struct DividerTemplate {
    class: &'static str,
}

#[derive(Template)]
#[template(path = "blocks/video.html")]
struct VideoTemplate<'a> {
    b: &'a MediaBlock,
}

#[derive(Template)]
#[template(path = "blocks/audio.html")]
struct AudioTemplate<'a> {
    b: &'a MediaBlock,
}

#[derive(Template)]
#[template(path = "blocks/unsupported.html")]
struct UnsupportedTemplate<'a> {
    block_type: &'a str,
}

#[derive(Template)]
#[template(path = "blocks/invalid.html")]
struct InvalidTemplate<'a> {
    kind: BlockKind,
    reason: &'a str,
}

fn emit<T: Template>(template: T) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!("block template failed to render: {}", e);
        String::new()
    })
}

/// Renders one block body to an HTML fragment.
pub fn render_body(body: &BlockBody) -> String {
    match body {
        BlockBody::Hero(b) => emit(HeroTemplate {
            b,
            background: b.background.classes(),
        }),
        BlockBody::Text(b) => emit(TextTemplate { b }),
        BlockBody::Card(b) => emit(CardTemplate { b }),
        BlockBody::Image(b) => emit(ImageTemplate { b }),
        BlockBody::Table(b) => emit(TableTemplate { b }),
        BlockBody::List(b) => emit(ListTemplate {
            b,
            ordered: b.style == ListStyle::Ordered,
        }),
        BlockBody::Grid(b) => emit(GridTemplate {
            b,
            columns: b.column_classes(),
        }),
        BlockBody::Callout(b) => emit(CalloutTemplate {
            b,
            palette: b.kind.palette(),
        }),
        BlockBody::Quote(b) => emit(QuoteTemplate { b }),
        BlockBody::Divider(b) => emit(DividerTemplate {
            class: b.style.classes(),
        }),
        BlockBody::Video(b) => emit(VideoTemplate { b }),
        BlockBody::Audio(b) => emit(AudioTemplate { b }),
        BlockBody::Invalid { kind, reason } => emit(InvalidTemplate {
            kind: *kind,
            reason,
        }),
        BlockBody::Unsupported { block_type } => emit(UnsupportedTemplate { block_type }),
    }
}

/// Renders a stored block inside its frame.
pub fn render_block(block: &ContentBlock) -> String {
    emit(FrameTemplate {
        id: block.id,
        block_type: &block.block_type,
        inner: render_body(&block.body()),
    })
}

/// Receives interactions produced while rendering.
pub trait InteractionSink: Send + Sync {
    fn record(&self, content_block_id: Uuid, kind: InteractionType, metadata: serde_json::Value);
}

/// Renders blocks and reports a `view` for each block the first time it is shown.
#[derive(Default)]
pub struct BlockRenderer<'a> {
    sink: Option<&'a dyn InteractionSink>,
    seen: HashSet<Uuid>,
}

impl<'a> BlockRenderer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: &'a dyn InteractionSink) -> Self {
        Self {
            sink: Some(sink),
            seen: HashSet::new(),
        }
    }

    pub fn render(&mut self, block: &ContentBlock) -> String {
        if self.seen.insert(block.id) {
            if let Some(sink) = self.sink {
                sink.record(
                    block.id,
                    InteractionType::View,
                    json!({ "blockType": block.block_type }),
                );
            }
        }
        render_block(block)
    }

    /// Blocks are rendered in `order_index` order, ties keep input order.
    pub fn render_section(&mut self, blocks: &[ContentBlock]) -> String {
        let mut ordered: Vec<&ContentBlock> = blocks.iter().collect();
        ordered.sort_by_key(|block| block.order_index);
        ordered
            .into_iter()
            .map(|block| self.render(block))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;

    fn block(block_type: &str, order_index: i32, content: Value, metadata: Option<Value>) -> ContentBlock {
        ContentBlock {
            id: Uuid::new_v4(),
            section_id: Uuid::nil(),
            block_type: block_type.to_string(),
            order_index,
            content,
            metadata,
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<(Uuid, InteractionType)>>);

    impl InteractionSink for RecordingSink {
        fn record(&self, id: Uuid, kind: InteractionType, _metadata: Value) {
            self.0.lock().unwrap().push((id, kind));
        }
    }

    #[test]
    fn unknown_tag_renders_fallback() {
        let html = render_block(&block("carousel", 0, json!({}), None));
        assert!(html.contains("Unsupported block type: carousel"));
    }

    #[test]
    fn malformed_payload_renders_authoring_placeholder() {
        let html = render_block(&block("image", 0, json!({"alt": "no src"}), None));
        assert!(html.contains("data-authoring-error"));
        assert!(html.contains("Malformed image block"));
    }

    #[test]
    fn text_passes_html_through_and_other_fields_are_escaped() {
        let text = render_block(&block("text", 0, json!({"content": "<p>Lockout</p>"}), None));
        assert!(text.contains("<p>Lockout</p>"));

        let quote = render_block(&block("quote", 0, json!({"quote": "<script>x</script>"}), None));
        assert!(!quote.contains("<script>"));
        assert!(quote.contains("&lt;script&gt;"));
    }

    #[test]
    fn callout_and_divider_use_token_classes() {
        let callout = render_block(&block(
            "callout",
            0,
            json!({"title": "Stop", "content": "Isolate energy first."}),
            Some(json!({"type": "error"})),
        ));
        assert!(callout.contains(tokens::callout::ERROR.background));

        let divider = render_block(&block("divider", 0, Value::Null, Some(json!({"style": "dotted"}))));
        assert!(divider.contains(tokens::divider::DOTTED));
    }

    #[test]
    fn ordered_list_and_table_cells() {
        let list = render_block(&block("list", 0, json!({"items": ["one", "two"], "type": "ordered"}), None));
        assert!(list.contains("<ol"));
        assert!(list.contains("<li>two</li>"));

        let table = render_block(&block(
            "table",
            0,
            json!({"headers": ["PPE"], "rows": [["Gloves"], ["Goggles"]]}),
            None,
        ));
        assert!(table.contains("<th class=\"border border-border p-3 text-left font-semibold\">PPE</th>"));
        assert!(table.contains(">Goggles</td>"));
    }

    #[test]
    fn section_renders_in_order_and_views_once() {
        let sink = RecordingSink::default();
        let second = block("text", 2, json!({"content": "second"}), None);
        let first = block("text", 1, json!({"content": "first"}), None);
        let blocks = vec![second.clone(), first.clone()];

        let mut renderer = BlockRenderer::with_sink(&sink);
        let html = renderer.render_section(&blocks);
        renderer.render_section(&blocks);

        let first_at = html.find("first").unwrap();
        let second_at = html.find("second").unwrap();
        assert!(first_at < second_at);

        let views = sink.0.lock().unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0], (first.id, InteractionType::View));
        assert_eq!(views[1], (second.id, InteractionType::View));
    }
}
