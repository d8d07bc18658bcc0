//! Where and how the resolved name is drawn on the invitation template.
//!
//! The PDF merge itself belongs to a [`DocumentRenderer`] implementation.
//! This module owns the template geometry, the font choice and the
//! conversion from the designer's top-left coordinates to the PDF
//! bottom-left origin.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entry::NameEntry;
use crate::error::CoreError;
use crate::resolver::Resolver;

pub const TEMPLATE_PDF: &str = "Invitation card.pdf";
pub const OUTPUT_FILENAME: &str = "Vadhel Sarthak's Wedding Invitation.pdf";
pub const BUNDLED_FONT_PATH: &str = "fonts/NotoSansGujarati-Regular.ttf";
pub const FALLBACK_FONT: &str = "Helvetica";

pub const FONT_SIZE_MIN: f32 = 13.0;
pub const FONT_SIZE_MAX: f32 = 15.0;
pub const DEFAULT_FONT_SIZE: f32 = 15.0;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, CoreError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::Validation(format!(
                "colour must be #RRGGBB, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| CoreError::Validation(format!("colour {hex:?}: {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// Crimson.
impl Default for Rgb {
    fn default() -> Self {
        Self {
            r: 0xDC,
            g: 0x14,
            b: 0x3C,
        }
    }
}

/// A text position on one template page, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Zero-based page index.
    pub page_index: usize,
    pub x: f32,
    pub y_from_top: f32,
}

/// The font a renderer should draw with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontChoice {
    /// A Gujarati TrueType font shipped alongside the template.
    Bundled { path: PathBuf },
    /// A built-in PDF font. Gujarati glyphs will not render with it.
    Fallback { name: String },
}

/// Prefer the bundled Gujarati font, falling back to Helvetica.
pub fn select_font(path: &Path) -> FontChoice {
    if path.is_file() {
        tracing::info!(
            path = %path.display(),
            "Using bundled Gujarati font",
        );
        FontChoice::Bundled {
            path: path.to_path_buf(),
        }
    } else {
        tracing::warn!(
            path = %path.display(),
            fallback = FALLBACK_FONT,
            "Gujarati font not found, names will render with the fallback font",
        );
        FontChoice::Fallback {
            name: FALLBACK_FONT.to_string(),
        }
    }
}

/// One piece of text to stamp onto one page, in PDF coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub page_index: usize,
    pub x: f32,
    /// Distance from the bottom edge of the page.
    pub y: f32,
    pub text: String,
}

/// Everything a renderer needs to personalise one invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlan {
    pub template_path: PathBuf,
    pub font: FontChoice,
    pub font_size: f32,
    pub color: Rgb,
    pub overlays: Vec<TextOverlay>,
}

/// Geometry and styling of the invitation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationLayout {
    pub template_path: PathBuf,
    pub output_filename: String,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub color: Rgb,
    pub placements: Vec<Placement>,
}

impl Default for InvitationLayout {
    /// Pages 1 and 4 of the wedding card.
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(TEMPLATE_PDF),
            output_filename: OUTPUT_FILENAME.to_string(),
            font_path: PathBuf::from(BUNDLED_FONT_PATH),
            font_size: DEFAULT_FONT_SIZE,
            color: Rgb::default(),
            placements: vec![
                Placement {
                    page_index: 0,
                    x: 170.0,
                    y_from_top: 490.0,
                },
                Placement {
                    page_index: 3,
                    x: 95.0,
                    y_from_top: 186.0,
                },
            ],
        }
    }
}

impl InvitationLayout {
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    /// Check the font size range and that every placement is on the page.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&self.font_size) {
            return Err(CoreError::Validation(format!(
                "font size {} outside {FONT_SIZE_MIN}..={FONT_SIZE_MAX}",
                self.font_size
            )));
        }
        if self.placements.is_empty() {
            return Err(CoreError::Validation("layout has no placements".into()));
        }
        if let Some(p) = self
            .placements
            .iter()
            .find(|p| p.x < 0.0 || p.y_from_top < 0.0)
        {
            return Err(CoreError::Validation(format!(
                "placement on page {} has negative coordinates",
                p.page_index + 1
            )));
        }
        Ok(())
    }

    /// Overlays for `text` on a template whose pages have the given heights.
    ///
    /// Placements on pages the template does not have are skipped.
    pub fn overlays(&self, text: &str, page_heights: &[f32]) -> Vec<TextOverlay> {
        self.placements
            .iter()
            .filter_map(|p| {
                let Some(height) = page_heights.get(p.page_index) else {
                    tracing::warn!(
                        page = p.page_index + 1,
                        page_count = page_heights.len(),
                        "Template has no such page, skipping overlay",
                    );
                    return None;
                };
                Some(TextOverlay {
                    page_index: p.page_index,
                    x: p.x,
                    y: height - p.y_from_top,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    /// Full render plan, including the font decision.
    pub fn plan(&self, text: &str, page_heights: &[f32]) -> OverlayPlan {
        OverlayPlan {
            template_path: self.template_path.clone(),
            font: select_font(&self.font_path),
            font_size: self.font_size,
            color: self.color,
            overlays: self.overlays(text, page_heights),
        }
    }

    /// Resolve `raw_name` and plan where it is drawn.
    ///
    /// Fails on an invalid layout or a name that resolves to nothing.
    pub async fn plan_for(
        &self,
        resolver: &Resolver,
        raw_name: &str,
        page_heights: &[f32],
    ) -> Result<(NameEntry, OverlayPlan), CoreError> {
        self.validate()?;
        let entry = resolver.resolve_entry(raw_name).await;
        if entry.resolved_text.is_empty() {
            return Err(CoreError::Validation("guest name is required".into()));
        }
        let plan = self.plan(&entry.resolved_text, page_heights);
        Ok((entry, plan))
    }
}

/// Produces the personalised document from a plan.
pub trait DocumentRenderer {
    fn render(&self, plan: &OverlayPlan) -> Result<Vec<u8>, CoreError>;
}

/// A resolved guest name and the document rendered for it.
#[derive(Debug, Clone)]
pub struct PersonalizedInvitation {
    pub entry: NameEntry,
    pub plan: OverlayPlan,
    pub document: Vec<u8>,
}

/// Resolve `raw_name` and render the invitation for it.
pub async fn personalize<R: DocumentRenderer + ?Sized>(
    resolver: &Resolver,
    renderer: &R,
    layout: &InvitationLayout,
    raw_name: &str,
    page_heights: &[f32],
) -> Result<PersonalizedInvitation, CoreError> {
    let (entry, plan) = layout.plan_for(resolver, raw_name, page_heights).await?;
    let document = renderer.render(&plan)?;
    tracing::info!(
        name = %entry.resolved_text,
        overlays = plan.overlays.len(),
        bytes = document.len(),
        "Rendered personalised invitation",
    );
    Ok(PersonalizedInvitation {
        entry,
        plan,
        document,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
