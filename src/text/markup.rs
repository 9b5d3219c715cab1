use html5ever::{parse_document, tendril::TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Concatenates every text node of `html` in document order, skipping
/// scripting and style subtrees. Whitespace is kept as it appears.
pub fn strip_markup(html: &str) -> String {
    let dom: RcDom = parse_document(RcDom::default(), Default::default()).one(html);
    let mut text = String::with_capacity(html.len() / 2);
    collect_text(&dom.document, &mut text);
    text
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Element { name, .. } => {
            let tag = name.local.as_ref();
            if SKIPPED_ELEMENTS
                .iter()
                .any(|skipped| tag.eq_ignore_ascii_case(skipped))
            {
                return;
            }
        }
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {}
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}
