//! Raw vector markup: injected as-is, with the surface look forced onto every `<svg>`.

use lol_html::{RewriteStrSettings, element, rewrite_str};

use crate::theme::MARKUP_SVG_STYLE;
use crate::{RenderError, Result};

/// Which `<svg>` elements of a fragment get restyled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SvgTargets {
    All,
    First,
}

/// Applies [`MARKUP_SVG_STYLE`] to every `<svg>` element of `markup`.
///
/// The markup itself is trusted and not validated; malformed input comes out however the HTML
/// rewriter tokenizes it.
pub fn render_markup(markup: &str) -> Result<String> {
    style_svg_elements(markup, &MARKUP_SVG_STYLE, SvgTargets::All)
}

pub(crate) fn style_svg_elements(
    html: &str,
    declarations: &[(&str, &str)],
    targets: SvgTargets,
) -> Result<String> {
    let mut styled = 0usize;
    let handlers = vec![element!("svg", |el| {
        if targets == SvgTargets::First && styled > 0 {
            return Ok(());
        }
        styled += 1;
        let style = merge_inline_style(el.get_attribute("style").as_deref(), declarations);
        el.set_attribute("style", &style)?;
        Ok(())
    })];

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| RenderError::Rewrite(err.to_string()))
}

/// Layers `overrides` onto an inline `style` value, like assigning `el.style.<prop>` in a browser:
/// existing declarations for the same property are replaced in place, others are kept, and new
/// ones are appended in order.
pub(crate) fn merge_inline_style(existing: Option<&str>, overrides: &[(&str, &str)]) -> String {
    let mut decls: Vec<(String, String)> = existing
        .unwrap_or_default()
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty())
                .then(|| (prop.to_ascii_lowercase(), value.to_string()))
        })
        .collect();

    for (prop, value) in overrides {
        match decls.iter_mut().find(|(p, _)| p == prop) {
            Some(slot) => slot.1 = (*value).to_string(),
            None => decls.push(((*prop).to_string(), (*value).to_string())),
        }
    }

    decls
        .iter()
        .map(|(p, v)| format!("{p}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}
