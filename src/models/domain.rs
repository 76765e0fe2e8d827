use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

/// Identifier of a candidate within a deck
pub type CandidateId = u32;

/// Horizontal distance a drag must exceed to count as a decision
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;
/// Drag rotation is `delta / divisor` degrees
pub const DEFAULT_ROTATION_DIVISOR: f64 = 20.0;
/// Fling exit translation, independent of the gesture distance
pub const DEFAULT_FLING_OFFSET: f64 = 400.0;
/// Fling exit rotation in degrees
pub const DEFAULT_FLING_ROTATION_DEG: f64 = 15.0;
pub const DEFAULT_STANDARD_DELAY_MS: u64 = 375;
pub const DEFAULT_MATCH_DELAY_MS: u64 = 1200;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 200;

/// A potential training partner shown on the swipe card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Candidate {
    pub id: CandidateId,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 16, max = 100))]
    pub age: u8,
    #[validate(length(min = 1))]
    pub gym: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub image: String,
    /// Display label such as "2.1 km"
    #[serde(default)]
    pub distance: String,
    /// Whether this candidate already liked the viewer
    #[serde(rename = "likedYou", alias = "liked_you", default)]
    pub liked_you: bool,
}

/// Fixed, read-only list of candidates for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl Deck {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// The two built-in partner profiles used when no deck file is configured
    pub fn mock() -> Self {
        Self::new(vec![
            Candidate {
                id: 1,
                name: "Ana Silva".to_string(),
                age: 28,
                gym: "Smart Fit Centro".to_string(),
                goal: "Ganho de Massa".to_string(),
                schedule: "Manhã (7h-9h)".to_string(),
                experience: "Intermediário".to_string(),
                interests: vec![
                    "Musculação".to_string(),
                    "Funcional".to_string(),
                    "Yoga".to_string(),
                ],
                image: "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158".to_string(),
                distance: "2.1 km".to_string(),
                liked_you: true,
            },
            Candidate {
                id: 2,
                name: "Carlos Santos".to_string(),
                age: 32,
                gym: "Smart Fit Centro".to_string(),
                goal: "Perda de Peso".to_string(),
                schedule: "Tarde (18h-20h)".to_string(),
                experience: "Iniciante".to_string(),
                interests: vec![
                    "Cardio".to_string(),
                    "Natação".to_string(),
                    "Crossfit".to_string(),
                ],
                image: "https://images.unsplash.com/photo-1649972904349-6e44c42644a7".to_string(),
                distance: "1.8 km".to_string(),
                liked_you: false,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}

/// Discrete outcome of a swipe or an action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Like,
    Reject,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Like => write!(f, "like"),
            Decision::Reject => write!(f, "reject"),
        }
    }
}

/// Visual card transform: horizontal translation plus rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "translateX")]
    pub translate_x: f64,
    #[serde(rename = "rotateDeg")]
    pub rotate_deg: f64,
}

impl Transform {
    pub const NEUTRAL: Transform = Transform {
        translate_x: 0.0,
        rotate_deg: 0.0,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Exit animation played once a decision is resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAnimation {
    #[default]
    None,
    Rejecting,
    Liking,
}

impl DecisionAnimation {
    /// Fixed fling transform for this animation, `None` when idle
    pub fn fling(&self, offset: f64, rotation_deg: f64) -> Option<Transform> {
        match self {
            DecisionAnimation::None => None,
            DecisionAnimation::Liking => Some(Transform {
                translate_x: offset,
                rotate_deg: rotation_deg,
            }),
            DecisionAnimation::Rejecting => Some(Transform {
                translate_x: -offset,
                rotate_deg: -rotation_deg,
            }),
        }
    }
}

impl From<Decision> for DecisionAnimation {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Like => DecisionAnimation::Liking,
            Decision::Reject => DecisionAnimation::Rejecting,
        }
    }
}

/// Pointer drag being tracked by the swipe interpreter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    pub origin_x: Option<f64>,
    pub delta_x: f64,
    pub is_active: bool,
}

/// A mutual match recorded during the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub candidate: Candidate,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

impl MatchRecord {
    pub fn new(candidate: Candidate) -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate,
            matched_at: chrono::Utc::now(),
        }
    }
}

/// Screens the session can hand control to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum Destination {
    Welcome,
    Register,
    Login,
    Match,
    Schedule,
    AiTrainer,
    Social,
    Rewards,
    Gyms,
    Profile,
    History,
    Chat {
        #[serde(rename = "candidateId")]
        candidate_id: CandidateId,
    },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Welcome => write!(f, "welcome"),
            Destination::Register => write!(f, "register"),
            Destination::Login => write!(f, "login"),
            Destination::Match => write!(f, "match"),
            Destination::Schedule => write!(f, "schedule"),
            Destination::AiTrainer => write!(f, "ai-trainer"),
            Destination::Social => write!(f, "social"),
            Destination::Rewards => write!(f, "rewards"),
            Destination::Gyms => write!(f, "gyms"),
            Destination::Profile => write!(f, "profile"),
            Destination::History => write!(f, "history"),
            Destination::Chat { candidate_id } => write!(f, "chat/{}", candidate_id),
        }
    }
}

/// Tunables for gestures and pacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub threshold: f64,
    pub rotation_divisor: f64,
    pub fling_offset: f64,
    pub fling_rotation_deg: f64,
    /// Delay before advancing on every path except a mutual match
    pub standard_delay: Duration,
    /// Delay before the match notification appears
    pub match_delay: Duration,
    /// Hide/show pulse for the next card's entrance
    pub reveal_delay: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SWIPE_THRESHOLD,
            rotation_divisor: DEFAULT_ROTATION_DIVISOR,
            fling_offset: DEFAULT_FLING_OFFSET,
            fling_rotation_deg: DEFAULT_FLING_ROTATION_DEG,
            standard_delay: Duration::from_millis(DEFAULT_STANDARD_DELAY_MS),
            match_delay: Duration::from_millis(DEFAULT_MATCH_DELAY_MS),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
        }
    }
}

/// Running counters for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub likes: u32,
    pub rejects: u32,
    pub matches: u32,
    /// Releases that stayed within the threshold
    pub insufficient: u32,
    pub advances: u32,
    pub wraps: u32,
}
