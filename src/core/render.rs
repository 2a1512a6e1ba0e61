//! Page renderer: picks the not-found, winner, or game page for a node
//! and wraps it in the shared base layout.

use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::core::graph::GameMap;
use crate::core::template::{Segment, Template, TemplateError};
use crate::schema::node::{Direction, Node};

/// Slot in `base.html` that receives the rendered page.
pub const CONTENT_SLOT: &str = "content";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{page}: {source}")]
    Template {
        page: String,
        #[source]
        source: TemplateError,
    },
    #[error("unknown node field: {0}")]
    UnknownField(String),
    #[error("unknown predicate: {0}")]
    UnknownPredicate(String),
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
    #[error("base template has no {{content}} slot")]
    MissingContentSlot,
    #[error("{0} template references a node but none was resolved")]
    MissingNode(Page),
}

/// The three presentation templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    NotFound,
    Winner,
    Game,
}

impl Page {
    /// Template file name under the static directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::NotFound => "notfound.html",
            Self::Winner => "winner.html",
            Self::Game => "game.html",
        }
    }

    /// Choose the page for a resolved node.
    pub fn select(map: &GameMap, node: Option<&Node>) -> Page {
        match node {
            None => Page::NotFound,
            Some(node) if map.is_winner(node) => Page::Winner,
            Some(_) => Page::Game,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "notfound",
            Self::Winner => "winner",
            Self::Game => "game",
        })
    }
}

/// Evaluate a named predicate against a node.
pub fn predicate(name: &str, node: &Node) -> Option<bool> {
    match name {
        "has_forward" => Some(node.has_forward()),
        "has_left" => Some(node.edge(Direction::Left).is_some()),
        "has_right" => Some(node.edge(Direction::Right).is_some()),
        _ => None,
    }
}

/// Parsed page templates, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Renderer {
    base: Template,
    not_found: Template,
    winner: Template,
    game: Template,
}

impl Renderer {
    /// Load `base.html` plus the three page templates from `dir`.
    pub fn load(dir: &Path) -> Result<Renderer, RenderError> {
        let load = |file: &str| {
            Template::load(&dir.join(file)).map_err(|source| RenderError::Template {
                page: file.to_string(),
                source,
            })
        };
        Ok(Renderer {
            base: checked_base(load("base.html")?)?,
            not_found: load(Page::NotFound.file_name())?,
            winner: load(Page::Winner.file_name())?,
            game: load(Page::Game.file_name())?,
        })
    }

    /// Build a renderer from in-memory template sources.
    pub fn from_sources(
        base: &str,
        not_found: &str,
        winner: &str,
        game: &str,
    ) -> Result<Renderer, RenderError> {
        let parse = |page: &str, src: &str| {
            Template::parse(src).map_err(|source| RenderError::Template {
                page: page.to_string(),
                source,
            })
        };
        Ok(Renderer {
            base: checked_base(parse("base", base)?)?,
            not_found: parse("notfound", not_found)?,
            winner: parse("winner", winner)?,
            game: parse("game", game)?,
        })
    }

    fn template(&self, page: Page) -> &Template {
        match page {
            Page::NotFound => &self.not_found,
            Page::Winner => &self.winner,
            Page::Game => &self.game,
        }
    }

    /// Render the full HTML document for `node`.
    pub fn render(&self, map: &GameMap, node: Option<&Node>) -> Result<String, RenderError> {
        let page = Page::select(map, node);
        self.render_page(page, node)
    }

    /// Render a specific page, bypassing selection.
    pub fn render_page(&self, page: Page, node: Option<&Node>) -> Result<String, RenderError> {
        let mut body = String::new();
        render_segments(&self.template(page).segments, page, node, None, &mut body)?;

        let mut out = String::new();
        render_segments(&self.base.segments, page, node, Some(&body), &mut out)?;
        Ok(out)
    }
}

fn checked_base(base: Template) -> Result<Template, RenderError> {
    if base.slots().contains(&CONTENT_SLOT) {
        Ok(base)
    } else {
        Err(RenderError::MissingContentSlot)
    }
}

fn render_segments(
    segments: &[Segment],
    page: Page,
    node: Option<&Node>,
    content: Option<&str>,
    out: &mut String,
) -> Result<(), RenderError> {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::NodeField { field } => {
                let node = node.ok_or(RenderError::MissingNode(page))?;
                let value = match field.as_str() {
                    "id" => Some(&node.id),
                    "left" => node.left.as_ref(),
                    "right" => node.right.as_ref(),
                    "forward" => node.forward.as_ref(),
                    _ => return Err(RenderError::UnknownField(field.clone())),
                };
                if let Some(value) = value {
                    escape_html(value.as_str(), out);
                }
            }
            Segment::Slot(name) => match content {
                Some(body) if name == CONTENT_SLOT => out.push_str(body),
                _ => return Err(RenderError::UnknownSlot(name.clone())),
            },
            Segment::If {
                predicate: name,
                negate,
                body,
            } => {
                let node = node.ok_or(RenderError::MissingNode(page))?;
                let holds = predicate(name, node)
                    .ok_or_else(|| RenderError::UnknownPredicate(name.clone()))?;
                if holds != *negate {
                    render_segments(body, page, Some(node), content, out)?;
                }
            }
        }
    }
    Ok(())
}

fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "<html><title>{if:has_left}Node {node.id}{end}</title><main>{content}</main></html>";
    const BASE_PLAIN: &str = "<main>{content}</main>";
    const NOT_FOUND: &str = "lost";
    const WINNER: &str = "won at {node.id}";
    const GAME: &str = "at {node.id}{if:has_forward} fwd={node.forward}{end}{if:not_has_forward} wall{end}";

    fn renderer() -> Renderer {
        Renderer::from_sources(BASE_PLAIN, NOT_FOUND, WINNER, GAME).unwrap()
    }

    #[test]
    fn select_pages() {
        let map = GameMap::standard().unwrap();
        assert_eq!(Page::select(&map, None), Page::NotFound);
        assert_eq!(Page::select(&map, map.lookup("5green")), Page::Winner);
        assert_eq!(Page::select(&map, map.lookup("1")), Page::Game);
        assert_eq!(Page::select(&map, map.lookup("404")), Page::Game);
    }

    #[test]
    fn render_game_with_forward() {
        let map = GameMap::standard().unwrap();
        let html = renderer().render(&map, map.lookup("1")).unwrap();
        assert_eq!(html, "<main>at 1 fwd=2</main>");
    }

    #[test]
    fn render_game_without_forward() {
        let map = GameMap::standard().unwrap();
        let html = renderer().render(&map, map.lookup("2")).unwrap();
        assert_eq!(html, "<main>at 2 wall</main>");
    }

    #[test]
    fn render_winner_and_not_found() {
        let map = GameMap::standard().unwrap();
        let r = renderer();
        assert_eq!(r.render(&map, Some(map.winner())).unwrap(), "<main>won at 5green</main>");
        assert_eq!(r.render(&map, None).unwrap(), "<main>lost</main>");
    }

    #[test]
    fn base_sees_node() {
        let map = GameMap::standard().unwrap();
        let r = Renderer::from_sources(BASE, NOT_FOUND, WINNER, GAME).unwrap();
        let html = r.render(&map, map.lookup("3")).unwrap();
        assert!(html.starts_with("<html><title>Node 3</title>"));
    }

    #[test]
    fn base_node_reference_without_node_fails() {
        let map = GameMap::standard().unwrap();
        let r = Renderer::from_sources(BASE, NOT_FOUND, WINNER, GAME).unwrap();
        let err = r.render(&map, None).unwrap_err();
        assert!(matches!(err, RenderError::MissingNode(Page::NotFound)));
    }

    #[test]
    fn unknown_field_and_predicate() {
        let map = GameMap::standard().unwrap();
        let r = Renderer::from_sources(BASE_PLAIN, NOT_FOUND, WINNER, "{node.title}").unwrap();
        let err = r.render(&map, map.lookup("1")).unwrap_err();
        assert_eq!(err.to_string(), "unknown node field: title");

        let r = Renderer::from_sources(BASE_PLAIN, NOT_FOUND, WINNER, "{if:is_dark}x{end}").unwrap();
        let err = r.render(&map, map.lookup("1")).unwrap_err();
        assert!(matches!(err, RenderError::UnknownPredicate(p) if p == "is_dark"));
    }

    #[test]
    fn content_slot_only_in_base() {
        let map = GameMap::standard().unwrap();
        let r = Renderer::from_sources(BASE_PLAIN, "{content}", WINNER, GAME).unwrap();
        assert!(matches!(r.render(&map, None), Err(RenderError::UnknownSlot(_))));
    }

    #[test]
    fn base_without_content_slot_rejected() {
        let err = Renderer::from_sources("<main></main>", NOT_FOUND, WINNER, GAME).unwrap_err();
        assert!(matches!(err, RenderError::MissingContentSlot));
        assert_eq!(err.to_string(), "base template has no {content} slot");

        // A slot nested in a conditional still counts.
        assert!(Renderer::from_sources(BASE, NOT_FOUND, WINNER, GAME).is_ok());
        assert!(Renderer::from_sources("{if:has_left}{content}{end}", NOT_FOUND, WINNER, GAME).is_ok());
    }

    #[test]
    fn parse_failure_names_page() {
        let err = Renderer::from_sources(BASE_PLAIN, NOT_FOUND, "{oops", GAME).unwrap_err();
        assert!(err.to_string().starts_with("winner: template parse error"));
    }

    #[test]
    fn field_values_are_escaped() {
        let mut out = String::new();
        escape_html("<a href=\"x\">&'", &mut out);
        assert_eq!(out, "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn predicates() {
        let map = GameMap::standard().unwrap();
        let two = map.lookup("2").unwrap();
        assert_eq!(predicate("has_forward", two), Some(false));
        assert_eq!(predicate("has_left", two), Some(true));
        assert_eq!(predicate("has_right", two), Some(true));
        assert_eq!(predicate("has_back", two), None);
    }

    #[test]
    fn load_shipped_templates() {
        let map = GameMap::standard().unwrap();
        let r = Renderer::load(Path::new("static")).unwrap();
        let html = r.render(&map, map.lookup("4")).unwrap();
        assert!(html.contains("/game/4?path=forward"));
    }
}
