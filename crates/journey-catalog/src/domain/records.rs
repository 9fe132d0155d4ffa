//! Screen records and their presentation attributes.

use journey_core::screen_id::ScreenId;
use serde::{Deserialize, Serialize};

/// A decorative entrance/idle animation applied to a screen card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    /// Fade the card in.
    FadeIn,
    /// Sweep a highlight across the card.
    Shimmer,
    /// Slow floating motion.
    Drift,
    /// Gentle opacity pulse.
    Pulse,
    /// Slow vertical bounce.
    BounceSlow,
}

impl Animation {
    /// CSS class the front-end applies for this animation.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::FadeIn => "animate-fadeIn",
            Self::Shimmer => "animate-shimmer",
            Self::Drift => "animate-drift",
            Self::Pulse => "animate-pulse",
            Self::BounceSlow => "animate-bounce-slow",
        }
    }
}

/// Card layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    /// Single centered column.
    #[default]
    Centered,
    /// Image and text side by side.
    SplitHorizontal,
    /// Image above text.
    SplitVertical,
}

/// Symbolic icon shown at the top of a screen card.
///
/// Names follow the front-end icon set in kebab-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Anchor,
    Aperture,
    Award,
    BookOpen,
    Brain,
    Cloud,
    Coffee,
    Compass,
    Crown,
    Diamond,
    Edit3,
    Eye,
    Feather,
    Film,
    Flower,
    Gift,
    Globe,
    Heart,
    Key,
    Leaf,
    Lightbulb,
    Mail,
    Mountain,
    Palette,
    PartyPopper,
    PenTool,
    Rocket,
    Sailboat,
    Search,
    Shield,
    Smile,
    Sprout,
    Star,
    Telescope,
    TreePine,
    User,
    VenetianMask,
    Wand2,
    Waves,
    Wind,
    Zap,
}

/// Per-screen colour theme and animation set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenStyle {
    /// Accent colour (any CSS colour string).
    #[serde(default)]
    pub accent_color: Option<String>,
    /// Ordered animation set.
    #[serde(default)]
    pub animations: Vec<Animation>,
    /// Card layout.
    #[serde(default)]
    pub layout: LayoutType,
    /// Text colour override.
    #[serde(default)]
    pub text_color: Option<String>,
    /// Background colour override.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Font size override.
    #[serde(default)]
    pub font_size: Option<String>,
    /// Font family override.
    #[serde(default)]
    pub font_family: Option<String>,
}

/// A decorative flourish described for the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenEffect {
    /// Effect name.
    pub kind: String,
    /// What the effect looks like.
    pub description: String,
}

/// One page of the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenRecord {
    /// 1-based position in the journey.
    pub id: ScreenId,
    /// Card title.
    pub title: String,
    /// Multi-line poem text.
    pub content: String,
    /// Absolute image URL.
    #[serde(default)]
    pub image_path: Option<String>,
    /// Alternative text for the image.
    #[serde(default)]
    pub image_alt: Option<String>,
    /// Presentation theme.
    #[serde(default)]
    pub style: Option<ScreenStyle>,
    /// Explicit successor; takes precedence over `id + 1`.
    #[serde(default)]
    pub suggested_next: Option<ScreenId>,
    /// Card icon.
    pub icon: Icon,
    /// Decorative flourishes.
    #[serde(default)]
    pub effects: Vec<ScreenEffect>,
}

impl ScreenRecord {
    /// Animations to apply, falling back to a fade-in when the record
    /// declares none.
    #[must_use]
    pub fn active_animations(&self) -> Vec<Animation> {
        match &self.style {
            Some(style) if !style.animations.is_empty() => style.animations.clone(),
            _ => vec![Animation::FadeIn],
        }
    }

    /// Accent colour, if the record declares one.
    #[must_use]
    pub fn accent_color(&self) -> Option<&str> {
        self.style.as_ref().and_then(|s| s.accent_color.as_deref())
    }
}
