// Font loading and text shaping for the icon's label.
// Any problem with the preferred scalable font switches to the built-in
// bitmap font; loading never fails from the caller's point of view.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::tiny_skia::{Path as GlyphPath, Rect};
use tracing::debug;
use usvg::fontdb;

use crate::bitmap_font::BitmapFont;
use crate::error::IconError;

/// Glyph outlines for a shaped string, in text-local coordinates.
#[derive(Debug, Clone, Default)]
pub struct GlyphRun {
    paths: Vec<GlyphPath>,
    bounds: Option<Rect>,
}

impl GlyphRun {
    pub fn push(&mut self, path: GlyphPath) {
        let next = path.bounds();
        self.bounds = match self.bounds {
            None => Some(next),
            Some(current) => Rect::from_ltrb(
                current.left().min(next.left()),
                current.top().min(next.top()),
                current.right().max(next.right()),
                current.bottom().max(next.bottom()),
            ),
        };
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[GlyphPath] {
        &self.paths
    }

    /// Ink bounding box, `None` when nothing would be drawn.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A font loaded from a file, shaped through usvg's text engine.
pub struct ScalableFont {
    path: PathBuf,
    fontdb: Arc<fontdb::Database>,
    family: String,
    size: f32,
}

impl ScalableFont {
    pub fn load(path: &Path, size: f32) -> Result<Self, IconError> {
        let data = fs::read(path)
            .map_err(|e| IconError::resource_unavailable(path, e.to_string()))?;
        let mut db = fontdb::Database::new();
        db.load_font_data(data);

        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| IconError::resource_unavailable(path, "no usable font face"))?;

        Ok(ScalableFont {
            path: path.to_path_buf(),
            fontdb: Arc::new(db),
            family,
            size,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Shape `text` into absolute glyph outlines. Text nodes are converted to
    /// paths while usvg parses the document, so the result is the flattened
    /// geometry.
    pub fn shape(&self, text: &str) -> Result<GlyphRun, IconError> {
        let svg = text_document(text, &self.family, self.size);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| IconError::resource_unavailable(&self.path, e.to_string()))?;

        let mut run = GlyphRun::default();
        collect_paths(tree.root(), &mut run);
        Ok(run)
    }
}

fn collect_paths(group: &usvg::Group, run: &mut GlyphRun) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect_paths(group, run),
            usvg::Node::Text(text) => collect_paths(text.flattened(), run),
            usvg::Node::Path(path) => {
                if let Some(outline) = path.data().clone().transform(path.abs_transform()) {
                    run.push(outline);
                }
            }
            usvg::Node::Image(_) => {}
        }
    }
}

fn text_document(text: &str, family: &str, size: f32) -> String {
    // Generous canvas; only the geometry is used, never the viewport.
    let width = size * (text.chars().count() as f32 + 1.0) * 2.0;
    let height = size * 3.0;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="0" y="{size}" font-family="{family}" font-size="{size}">{text}</text></svg>"#,
        family = escape_xml(family),
        text = escape_xml(text),
    )
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The font the label is drawn with.
pub enum GlyphFont {
    Scalable(ScalableFont),
    Builtin(BitmapFont),
}

impl GlyphFont {
    /// Load the preferred font, or fall back to the built-in bitmap font.
    pub fn load_or_builtin(path: &Path, size: f32) -> Self {
        match ScalableFont::load(path, size) {
            Ok(font) => {
                debug!("Using font '{}' from {}", font.family(), path.display());
                GlyphFont::Scalable(font)
            }
            Err(e) => {
                debug!("{}, using built-in font", e);
                GlyphFont::Builtin(BitmapFont::new(size))
            }
        }
    }

    pub fn builtin(size: f32) -> Self {
        GlyphFont::Builtin(BitmapFont::new(size))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, GlyphFont::Builtin(_))
    }

    /// Shape `text`. A scalable font that yields no ink for visible text
    /// (e.g. the face lacks the glyphs) is replaced by the bitmap font.
    pub fn shape(&self, text: &str) -> GlyphRun {
        match self {
            GlyphFont::Builtin(font) => font.shape(text),
            GlyphFont::Scalable(font) => or_builtin(font.shape(text), text, font.size),
        }
    }
}

/// Keep a scalable run unless shaping failed or produced no ink for visible text.
fn or_builtin(shaped: Result<GlyphRun, IconError>, text: &str, size: f32) -> GlyphRun {
    let visible = text.chars().any(|c| !c.is_whitespace());
    match shaped {
        Ok(run) if !run.is_empty() || !visible => run,
        Ok(_) => {
            debug!("Scalable font produced no glyphs for '{}', using built-in font", text);
            BitmapFont::new(size).shape(text)
        }
        Err(e) => {
            debug!("{}, using built-in font", e);
            BitmapFont::new(size).shape(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Common on Linux CI images; tests that need a real face skip without it.
    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    #[test]
    fn test_missing_font_falls_back() {
        let font = GlyphFont::load_or_builtin(Path::new("/nonexistent/font.ttf"), 120.0);
        assert!(font.is_builtin());
        assert!(font.shape("PL").bounds().is_some());
    }

    #[test]
    fn test_garbage_font_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let font = GlyphFont::load_or_builtin(file.path(), 120.0);
        assert!(font.is_builtin());
    }

    #[test]
    fn test_scalable_load_reports_resource_unavailable() {
        let err = ScalableFont::load(Path::new("/nonexistent/font.ttf"), 120.0)
            .err()
            .expect("missing file must not load");
        assert!(matches!(err, IconError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_scalable_font_shapes_text() {
        if !Path::new(SYSTEM_FONT).exists() {
            println!("⚠️  {} not found, skipping", SYSTEM_FONT);
            return;
        }

        let font = GlyphFont::load_or_builtin(Path::new(SYSTEM_FONT), 120.0);
        assert!(!font.is_builtin());

        let run = font.shape("PL");
        let bounds = run.bounds().expect("PL has ink");
        assert!(bounds.width() > 60.0 && bounds.width() < 240.0);
        assert!(bounds.height() > 60.0 && bounds.height() < 130.0);
    }

    #[test]
    fn test_run_bounds_union() {
        let mut run = GlyphRun::default();
        run.push(resvg::tiny_skia::PathBuilder::from_rect(
            Rect::from_xywh(10.0, 20.0, 5.0, 5.0).unwrap(),
        ));
        run.push(resvg::tiny_skia::PathBuilder::from_rect(
            Rect::from_xywh(30.0, 5.0, 10.0, 2.0).unwrap(),
        ));

        let bounds = run.bounds().unwrap();
        assert_eq!(
            (bounds.left(), bounds.top(), bounds.right(), bounds.bottom()),
            (10.0, 5.0, 40.0, 25.0)
        );
        assert_eq!(run.len(), 2);
    }

    #[test]
    fn test_garbage_font_reports_no_face() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let err = ScalableFont::load(file.path(), 120.0)
            .err()
            .expect("garbage bytes must not load");
        assert!(err.to_string().contains("no usable font face"), "{}", err);
    }

    #[test]
    fn test_blank_scalable_run_uses_builtin() {
        let run = or_builtin(Ok(GlyphRun::default()), "PL", 120.0);
        assert_eq!(run.bounds(), BitmapFont::new(120.0).shape("PL").bounds());
        assert!(!run.is_empty());
    }

    #[test]
    fn test_blank_run_kept_for_whitespace() {
        let run = or_builtin(Ok(GlyphRun::default()), "  ", 120.0);
        assert!(run.is_empty());
    }

    #[test]
    fn test_shaping_error_uses_builtin() {
        let err = IconError::resource_unavailable("/fonts/broken.ttf", "parse failed");
        let run = or_builtin(Err(err), "PL", 120.0);
        assert_eq!(run.len(), BitmapFont::new(120.0).shape("PL").len());
    }

    #[test]
    fn test_inked_scalable_run_is_kept() {
        let mut shaped = GlyphRun::default();
        shaped.push(resvg::tiny_skia::PathBuilder::from_rect(
            Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap(),
        ));
        let run = or_builtin(Ok(shaped), "PL", 120.0);
        assert_eq!(run.len(), 1);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A&B<\"C\">"), "A&amp;B&lt;&quot;C&quot;&gt;");
    }
}
